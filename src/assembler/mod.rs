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

//! The two passes proper. Pass1 walks the parsed, macro-expanded source
//! once, builds the symbol table, lays out the memory image and leaves a
//! `Placeholder` word everywhere a label reference couldn't be resolved
//! yet. Pass2 only runs if pass1 produced no errors; it relocates the
//! data segment, resolves every placeholder, and records the external
//! references and entry symbols the output writers need.

pub mod encoder;
pub mod memory_image;
pub mod symbol_table;

use crate::ast::{AssemblyLine, Directive, Instruction, Operand};
use crate::diagnostics::DiagnosticCollector;
use crate::errors::AssemblyError;
use crate::reserved;

use memory_image::{Are, MemoryImage, MemoryWord};
use symbol_table::{SymbolKind, SymbolTable};

/// A resolved `.extern` reference: where in the final image it is used.
#[derive(Debug, Clone)]
pub struct ExternalUse {
    pub name: String,
    pub address: i32,
}

/// A resolved `.entry` symbol: its final address.
#[derive(Debug, Clone)]
pub struct EntrySymbol {
    pub name: String,
    pub address: i32,
}

pub struct Assembly {
    pub image: MemoryImage,
    pub code_words: usize,
    pub data_words: usize,
    pub entries: Vec<EntrySymbol>,
    pub externals: Vec<ExternalUse>,
}

struct Pass1 {
    image: MemoryImage,
    symbols: SymbolTable,
    entry_requests: Vec<(String, usize)>,
}

/// Runs pass1 over the already macro-expanded, parsed lines. Returns
/// `None` (after recording every diagnostic) if any error occurred;
/// pass2 must not run on a pass1 that failed.
fn run_pass1(lines: &[AssemblyLine], diagnostics: &mut DiagnosticCollector) -> Option<Pass1> {
    let mut image = MemoryImage::new();
    let mut symbols = SymbolTable::new();
    let mut entry_requests = Vec::new();
    let mut ok = true;

    for line in lines {
        if let Err(err) = process_line(line, &mut image, &mut symbols, &mut entry_requests, diagnostics) {
            diagnostics.record(&err);
            ok = false;
            if err.is_fatal() {
                break;
            }
        }
    }

    if ok { Some(Pass1 { image, symbols, entry_requests }) } else { None }
}

fn process_line(
    line: &AssemblyLine,
    image: &mut MemoryImage,
    symbols: &mut SymbolTable,
    entry_requests: &mut Vec<(String, usize)>,
    diagnostics: &mut DiagnosticCollector,
) -> Result<(), AssemblyError> {
    if let Some(label) = &line.label {
        validate_label(label, line.line_number)?;
    }

    match (&line.directive, &line.instruction) {
        (Some(Directive::Entry(name)), None) => {
            if line.label.is_some() {
                diagnostics.warning(
                    line.line_number,
                    "semantic",
                    "label before `.entry` is ignored",
                );
            }
            entry_requests.push((name.clone(), line.line_number));
        }
        (Some(Directive::Extern(name)), None) => {
            if line.label.is_some() {
                diagnostics.warning(
                    line.line_number,
                    "semantic",
                    "label before `.extern` is ignored",
                );
            }
            validate_label(name, line.line_number)?;
            symbols.declare(name, 0, SymbolKind::External, line.line_number)?;
        }
        (Some(Directive::Data(values)), None) => {
            if let Some(label) = &line.label {
                symbols.declare(label, image.dc(), SymbolKind::Data, line.line_number)?;
            }
            for value in values {
                image.push_data(MemoryWord::Data(*value), line.line_number)?;
            }
        }
        (Some(Directive::String(text)), None) => {
            if let Some(label) = &line.label {
                symbols.declare(label, image.dc(), SymbolKind::Data, line.line_number)?;
            }
            for byte in text.bytes() {
                image.push_data(MemoryWord::Data(byte as i32), line.line_number)?;
            }
            image.push_data(MemoryWord::Data(0), line.line_number)?;
        }
        (None, Some(instruction)) => {
            if let Some(label) = &line.label {
                symbols.declare(label, image.ic(), SymbolKind::Code, line.line_number)?;
            }
            encode_instruction(instruction, image, line.line_number)?;
        }
        (None, None) => {}
        (Some(_), Some(_)) => unreachable!("grammar never builds both a directive and an instruction"),
    }

    Ok(())
}

fn validate_label(name: &str, line: usize) -> Result<(), AssemblyError> {
    if !reserved::is_valid_identifier(name) {
        return Err(AssemblyError::Lexical {
            line,
            reason: format!("`{}` is not a valid label name", name),
        });
    }
    if reserved::is_reserved(name) {
        return Err(AssemblyError::Semantic {
            line,
            reason: format!("`{}` collides with a reserved word", name),
        });
    }
    Ok(())
}

fn encode_instruction(
    instruction: &Instruction,
    image: &mut MemoryImage,
    line: usize,
) -> Result<(), AssemblyError> {
    encoder::operand_validators::validate(instruction, line)?;

    image.push_code(
        MemoryWord::Instruction(encoder::encode_first_word(instruction)),
        line,
    )?;

    for operand in [&instruction.src, &instruction.dst] {
        if let Some(operand) = operand {
            for word in placeholder_words(operand, line) {
                image.push_code(word, line)?;
            }
        }
    }

    Ok(())
}

/// Builds the additional words for `operand`, using a `Placeholder` for
/// anything that names a label; pass2 fills those in once every symbol
/// is known.
fn placeholder_words(operand: &Operand, line: usize) -> Vec<MemoryWord> {
    match operand {
        Operand::Register(_) => Vec::new(),
        Operand::Immediate(value) => vec![MemoryWord::Operand(*value, Are::Absolute)],
        Operand::Direct(label) => vec![MemoryWord::Placeholder {
            symbol: label.clone(),
            line,
        }],
        Operand::JumpParams(label, op1, op2) => {
            let mut words = vec![MemoryWord::Placeholder {
                symbol: label.clone(),
                line,
            }];
            words.push(placeholder_for_param(op1, line));
            words.push(placeholder_for_param(op2, line));
            words
        }
    }
}

fn placeholder_for_param(operand: &Operand, line: usize) -> MemoryWord {
    match operand {
        Operand::Register(r) => MemoryWord::Operand(r.index() as i32, Are::Absolute),
        Operand::Immediate(value) => MemoryWord::Operand(*value, Are::Absolute),
        Operand::Direct(label) => MemoryWord::Placeholder {
            symbol: label.clone(),
            line,
        },
        Operand::JumpParams(..) => unreachable!("the grammar forbids nested jump_params"),
    }
}

/// Pass2: relocates data, resolves every placeholder, and reports
/// dangling `.entry`/undefined-symbol errors. Only called after pass1
/// succeeded.
fn run_pass2(pass1: Pass1, diagnostics: &mut DiagnosticCollector) -> Option<Assembly> {
    let Pass1 { mut image, mut symbols, entry_requests } = pass1;
    let mut ok = true;

    let code_words = image.code.len();
    let data_words = image.data.len();
    let data_offset = image.ic();
    symbols.relocate_data(data_offset);
    image.finalize();

    let mut externals = Vec::new();

    for word in image.code.iter_mut() {
        let (symbol_name, line) = match word {
            MemoryWord::Placeholder { symbol, line } => (symbol.clone(), *line),
            _ => continue,
        };

        match symbols.get(&symbol_name) {
            Some(symbol) if symbol.kind == SymbolKind::External => {
                externals.push(ExternalUse {
                    name: symbol_name,
                    // the address gets filled in once we know the word's own
                    // position; patched below after this loop via index.
                    address: 0,
                });
                *word = MemoryWord::Operand(0, Are::External);
            }
            Some(symbol) => {
                *word = MemoryWord::Operand(symbol.value, Are::Relocatable);
            }
            None => {
                diagnostics.error(
                    line,
                    "semantic",
                    format!("undefined symbol `{}`", symbol_name),
                );
                ok = false;
                *word = MemoryWord::Operand(0, Are::Absolute);
            }
        }
    }

    // Second sweep: now that every word has a final address, fill in the
    // external-use addresses we stubbed above.
    let mut external_iter = externals.iter_mut();
    for (index, word) in image.code.iter().enumerate() {
        if let MemoryWord::Operand(_, Are::External) = word {
            if let Some(use_) = external_iter.next() {
                use_.address = memory_image::CODE_START + index as i32;
            }
        }
    }

    let mut entries = Vec::new();
    for (name, line) in &entry_requests {
        match symbols.mark_entry(name, *line) {
            Ok(()) => {}
            Err(err) => {
                diagnostics.record(&err);
                ok = false;
            }
        }
    }
    for (name, symbol) in symbols.entries() {
        entries.push(EntrySymbol {
            name: name.to_string(),
            address: symbol.value,
        });
    }

    if !ok {
        return None;
    }

    Some(Assembly {
        image,
        code_words,
        data_words,
        entries,
        externals,
    })
}

/// Runs both passes over already macro-expanded, parsed lines.
pub fn assemble(lines: &[AssemblyLine], diagnostics: &mut DiagnosticCollector) -> Option<Assembly> {
    let pass1 = run_pass1(lines, diagnostics)?;
    run_pass2(pass1, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Opcode, Register};

    fn line(line_number: usize, label: Option<&str>, instruction: Option<Instruction>, directive: Option<Directive>) -> AssemblyLine {
        AssemblyLine {
            line_number,
            label: label.map(|s| s.to_string()),
            instruction,
            directive,
        }
    }

    #[test]
    fn minimal_program_assembles() {
        let lines = vec![line(
            1,
            None,
            Some(Instruction { opcode: Opcode::Stop, src: None, dst: None }),
            None,
        )];
        let mut diagnostics = DiagnosticCollector::new("t.as");
        let assembly = assemble(&lines, &mut diagnostics).unwrap();
        assert_eq!(assembly.image.code.len(), 1);
    }

    #[test]
    fn data_directive_with_entry_resolves_address() {
        let lines = vec![
            line(1, Some("LEN"), None, Some(Directive::Data(vec![6, -9, 15]))),
            line(2, None, None, Some(Directive::Entry("LEN".to_string()))),
            line(
                3,
                None,
                Some(Instruction { opcode: Opcode::Stop, src: None, dst: None }),
                None,
            ),
        ];
        let mut diagnostics = DiagnosticCollector::new("t.as");
        let assembly = assemble(&lines, &mut diagnostics).unwrap();
        assert_eq!(assembly.entries.len(), 1);
        assert_eq!(assembly.entries[0].name, "LEN");
        // one code word (stop) occupies address 100; data starts at 101.
        assert_eq!(assembly.entries[0].address, 101);
    }

    #[test]
    fn label_before_extern_is_a_warning_not_an_error() {
        let lines = vec![
            line(1, Some("L"), None, Some(Directive::Extern("EXT".to_string()))),
            line(
                2,
                None,
                Some(Instruction {
                    opcode: Opcode::Jmp,
                    src: None,
                    dst: Some(Operand::Direct("EXT".to_string())),
                }),
                None,
            ),
        ];
        let mut diagnostics = DiagnosticCollector::new("t.as");
        assert!(assemble(&lines, &mut diagnostics).is_some());
        assert!(!diagnostics.has_errors());
        assert!(diagnostics.iter().any(|d| d.severity == crate::diagnostics::Severity::Warning));
    }

    #[test]
    fn external_reference_is_recorded() {
        let lines = vec![
            line(1, None, None, Some(Directive::Extern("EXT".to_string()))),
            line(
                2,
                None,
                Some(Instruction {
                    opcode: Opcode::Jmp,
                    src: None,
                    dst: Some(Operand::Direct("EXT".to_string())),
                }),
                None,
            ),
        ];
        let mut diagnostics = DiagnosticCollector::new("t.as");
        let assembly = assemble(&lines, &mut diagnostics).unwrap();
        assert_eq!(assembly.externals.len(), 1);
        assert_eq!(assembly.externals[0].name, "EXT");
    }

    #[test]
    fn illegal_addressing_mode_is_rejected() {
        let lines = vec![line(
            1,
            None,
            Some(Instruction {
                opcode: Opcode::Mov,
                src: Some(Operand::Register(Register::R1)),
                dst: Some(Operand::Immediate(5)),
            }),
            None,
        )];
        let mut diagnostics = DiagnosticCollector::new("t.as");
        assert!(assemble(&lines, &mut diagnostics).is_none());
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn undefined_symbol_is_rejected() {
        let lines = vec![line(
            1,
            None,
            Some(Instruction {
                opcode: Opcode::Jmp,
                src: None,
                dst: Some(Operand::Direct("NOWHERE".to_string())),
            }),
            None,
        )];
        let mut diagnostics = DiagnosticCollector::new("t.as");
        assert!(assemble(&lines, &mut diagnostics).is_none());
        assert!(diagnostics.has_errors());
    }
}
