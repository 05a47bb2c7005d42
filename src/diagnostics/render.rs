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

//! Pretty-printing diagnostics to the console. A thin collaborator: it only
//! formats what the diagnostic collector handed it, it never decides
//! whether assembly succeeded.

use colored::Colorize;

use super::{Diagnostic, Severity};

/// Prints one diagnostic per line to stderr, e.g.:
/// `error: foo.as:12: Duplicate label definition: LEN`
pub fn print(diagnostic: &Diagnostic) {
    match diagnostic.severity {
        Severity::Error => {
            let tag = "error:".red().bold();
            eprintln!(
                "{} {}:{}: {}",
                tag, diagnostic.file, diagnostic.line, diagnostic.message
            );
        }
        Severity::Warning => {
            let tag = "warning:".yellow().bold();
            eprintln!(
                "{} {}:{}: {}",
                tag, diagnostic.file, diagnostic.line, diagnostic.message
            );
        }
    }
}

pub fn print_all<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) {
    for diagnostic in diagnostics {
        print(diagnostic);
    }
}
