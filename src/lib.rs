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

pub mod assembler;
pub mod ast;
pub mod diagnostics;
pub mod errors;
pub mod file_reader;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod preprocessor;
pub mod reserved;

use std::path::Path;

use anyhow::{Context, Result};

use ast::AssemblyLine;
use diagnostics::DiagnosticCollector;
use file_reader::FileReader;

/// The three artifacts produced by a successful assembly, ready to be
/// written next to the source file. `entries`/`externals` are `None`
/// when the file declares none of either.
pub struct Artifacts {
    pub object: String,
    pub entries: Option<String>,
    pub externals: Option<String>,
}

/// Runs the full pipeline for one source file: macro expansion, per-line
/// parsing, then both assembler passes. Returns `None` if any stage
/// recorded an error; the caller should render `diagnostics` either way.
pub fn assemble_file<F: FileReader>(
    source_path: &Path,
    reader: &F,
    diagnostics: &mut DiagnosticCollector,
) -> Result<Option<Artifacts>> {
    let source = reader
        .read_to_string(source_path)
        .with_context(|| format!("reading {}", source_path.display()))?;

    let raw_lines = preprocessor::expand(&source, diagnostics);
    if diagnostics.has_errors() {
        return Ok(None);
    }

    let mut lines: Vec<AssemblyLine> = Vec::new();
    for raw in &raw_lines {
        let code = lexer::strip_comment(&raw.text);
        if code.is_empty() {
            continue;
        }
        match parser::parse_line(code, raw.line_number) {
            Ok(line) => {
                if !line.is_empty() {
                    lines.push(line);
                }
            }
            Err(err) => diagnostics.record(&err),
        }
    }
    if diagnostics.has_errors() {
        return Ok(None);
    }

    let Some(assembly) = assembler::assemble(&lines, diagnostics) else {
        return Ok(None);
    };

    let object = output::write_object(&assembly.image, assembly.code_words, assembly.data_words);
    let entries = output::write_entries(&assembly.entries);
    let externals = output::write_externals(&assembly.externals);

    Ok(Some(Artifacts {
        object,
        entries,
        externals,
    }))
}
