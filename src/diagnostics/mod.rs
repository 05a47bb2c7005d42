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

pub mod render;

use crate::errors::AssemblyError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: String,
    pub line: usize,
    pub severity: Severity,
    pub kind: &'static str,
    pub message: String,
}

/// Accumulates diagnostics for a single file. Pass1 keeps going after an
/// error (skipping only that line's emission); `has_errors()` is what gates
/// whether pass2 runs and whether output files are written.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    file: String,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn error(&mut self, line: usize, kind: &'static str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            file: self.file.clone(),
            line,
            severity: Severity::Error,
            kind,
            message: message.into(),
        });
    }

    pub fn warning(&mut self, line: usize, kind: &'static str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            file: self.file.clone(),
            line,
            severity: Severity::Warning,
            kind,
            message: message.into(),
        });
    }

    /// Records an `AssemblyError` as an error-severity diagnostic.
    pub fn record(&mut self, err: &AssemblyError) {
        self.error(err.line(), err.kind(), err.reason());
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
