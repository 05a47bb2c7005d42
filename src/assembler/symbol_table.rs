/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! The symbol table. Built incrementally during pass1 (each label
//! declaration inserts an entry, uniqueness enforced on insert) and
//! finalized during pass2 (data symbols relocated by the final code
//! length, `.entry` names cross-checked against what was actually
//! declared).
//!
//! Backed by an `IndexMap` rather than `std::collections::HashMap` so
//! that the `.ent`/`.ext` listings come out in declaration order instead
//! of an arbitrary hash order.

use indexmap::IndexMap;

use crate::errors::AssemblyError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Code,
    Data,
    External,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub value: i32,
    pub kind: SymbolKind,
    pub declared_at: usize,
    pub entry: bool,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a freshly declared label. Fails if the name is already
    /// taken, by any kind of symbol.
    pub fn declare(
        &mut self,
        name: &str,
        value: i32,
        kind: SymbolKind,
        line: usize,
    ) -> Result<(), AssemblyError> {
        if let Some(existing) = self.symbols.get(name) {
            return Err(AssemblyError::Semantic {
                line,
                reason: format!(
                    "symbol `{}` is already defined (line {})",
                    name, existing.declared_at
                ),
            });
        }
        self.symbols.insert(
            name.to_string(),
            Symbol {
                value,
                kind,
                declared_at: line,
                entry: false,
            },
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Marks `name` as exported via `.entry`. The symbol must already
    /// exist and must not be external: a name can't be both imported and
    /// exported by the same file.
    pub fn mark_entry(&mut self, name: &str, line: usize) -> Result<(), AssemblyError> {
        match self.symbols.get_mut(name) {
            Some(symbol) if symbol.kind == SymbolKind::External => Err(AssemblyError::Semantic {
                line,
                reason: format!("`{}` is declared both `.extern` and `.entry`", name),
            }),
            Some(symbol) => {
                symbol.entry = true;
                Ok(())
            }
            None => Err(AssemblyError::Semantic {
                line,
                reason: format!("`.entry {}` refers to a symbol that is never defined", name),
            }),
        }
    }

    /// Shifts every data symbol's address by `offset` (the final code
    /// image length), run once pass1 finishes and the true boundary
    /// between code and data addresses is known.
    pub fn relocate_data(&mut self, offset: i32) {
        for symbol in self.symbols.values_mut() {
            if symbol.kind == SymbolKind::Data {
                symbol.value += offset;
            }
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.symbols
            .iter()
            .filter(|(_, s)| s.entry)
            .map(|(name, s)| (name.as_str(), s))
    }
}
