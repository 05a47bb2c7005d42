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

//! The growing machine-word image pass1 builds and pass2 finishes. Code
//! words start at address 100 (`CODE_START`); data words are addressed
//! from 0 during pass1 and only get their final address once the code
//! image's length is known, at which point `SymbolTable::relocate_data`
//! and [`MemoryImage::relocate_data`] both shift by the same offset.

use crate::errors::AssemblyError;
use crate::lexer::clamp_to_bits;

pub const CODE_START: i32 = 100;
pub const MEMORY_WORDS: i32 = 256;

/// Address/Relocatable/External tag carried by operand words. Values match
/// the 2-bit field encoding directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Are {
    Absolute = 0b00,
    External = 0b01,
    Relocatable = 0b10,
}

impl Are {
    pub fn bits(self) -> u16 {
        self as u16
    }
}

/// One 14-bit memory cell. `Placeholder` is a word pass1 couldn't finish
/// because it names a symbol not yet (or never, until pass2 checks)
/// resolved; every `Placeholder` must be gone by the time pass2 hands the
/// image to the output writers.
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryWord {
    Instruction(u16),
    Operand(i32, Are),
    Data(i32),
    Placeholder { symbol: String, line: usize },
}

impl MemoryWord {
    /// Packs this word down to its 14 significant bits. Panics if called
    /// on an unresolved `Placeholder` — pass2 must resolve every
    /// placeholder before output.
    pub fn encode(&self) -> u16 {
        match self {
            MemoryWord::Instruction(word) => *word & 0x3FFF,
            MemoryWord::Operand(value, are) => (clamp_to_bits(*value, 12) << 2) | are.bits(),
            MemoryWord::Data(value) => clamp_to_bits(*value, 14),
            MemoryWord::Placeholder { symbol, .. } => {
                unreachable!("placeholder for `{}` was never resolved", symbol)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryImage {
    pub code: Vec<MemoryWord>,
    pub data: Vec<MemoryWord>,
}

impl MemoryImage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The code counter: the address the *next* code word would land at.
    pub fn ic(&self) -> i32 {
        CODE_START + self.code.len() as i32
    }

    /// The data counter: the address the next data word would land at,
    /// relative to the start of the data segment (not yet relocated).
    pub fn dc(&self) -> i32 {
        self.data.len() as i32
    }

    pub fn push_code(&mut self, word: MemoryWord, line: usize) -> Result<(), AssemblyError> {
        self.code.push(word);
        self.check_bounds(line)
    }

    pub fn push_data(&mut self, word: MemoryWord, line: usize) -> Result<(), AssemblyError> {
        self.data.push(word);
        self.check_bounds(line)
    }

    /// The only fatal, file-halting condition: the combined code and data
    /// image outgrows the machine's 256 addressable words.
    fn check_bounds(&self, line: usize) -> Result<(), AssemblyError> {
        if self.ic() + self.dc() > MEMORY_WORDS {
            return Err(AssemblyError::resource(
                line,
                format!(
                    "memory image overflow: IC+DC exceeds {} words",
                    MEMORY_WORDS
                ),
                true,
            ));
        }
        Ok(())
    }

    /// Appends the data image after the code image and shifts every data
    /// word's own address references by `offset` — data words carry no
    /// symbol references themselves, so this only concerns the caller's
    /// bookkeeping (symbol table relocation), not the words in `self.data`.
    pub fn finalize(&mut self) {
        self.code.append(&mut self.data);
    }
}
