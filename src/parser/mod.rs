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

//! Per-line syntax parsing. Pass1 feeds one already comment-stripped,
//! already macro-expanded line of source at a time; this module turns it
//! into an [`AssemblyLine`](crate::ast::AssemblyLine), or an
//! [`AssemblyError::Syntactic`](crate::errors::AssemblyError) if it
//! doesn't match `grammar.pest`.
//!
//! Addressing-mode legality per opcode (the destination/source mode
//! table for each mnemonic) is *not* enforced here; the grammar only
//! knows operand shapes, not which opcodes accept which shapes. That
//! check belongs to pass1, which has the opcode in hand alongside the
//! already-built operand.

mod ast_builder;

use pest::Parser;
use pest_derive::Parser;

use crate::ast::AssemblyLine;
use crate::errors::AssemblyError;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct LineParser;

pub fn parse_line(code: &str, line_number: usize) -> Result<AssemblyLine, AssemblyError> {
    let mut pairs = LineParser::parse(Rule::line, code)
        .map_err(|e| AssemblyError::from_pest(e, line_number))?;
    let line_pair = pairs.next().expect("Rule::line always produces a pair");

    let mut result = AssemblyLine {
        line_number,
        ..Default::default()
    };

    for pair in line_pair.into_inner() {
        match pair.as_rule() {
            Rule::label => {
                result.label = Some(pair.as_str().trim_end_matches(':').to_string());
            }
            Rule::directive => {
                result.directive = Some(ast_builder::build_directive(pair, line_number)?);
            }
            Rule::instruction => {
                result.instruction = Some(ast_builder::build_instruction(pair, line_number)?);
            }
            Rule::EOI => {}
            other => unreachable!("unexpected top-level rule: {:?}", other),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Directive, Opcode, Operand, Register};

    #[test]
    fn parses_label_and_two_operand_instruction() {
        let line = parse_line("LOOP: mov r1, r2", 1).unwrap();
        assert_eq!(line.label.as_deref(), Some("LOOP"));
        let instr = line.instruction.unwrap();
        assert_eq!(instr.opcode, Opcode::Mov);
        assert_eq!(instr.src, Some(Operand::Register(Register::R1)));
        assert_eq!(instr.dst, Some(Operand::Register(Register::R2)));
    }

    #[test]
    fn parses_immediate_and_single_operand_instruction() {
        let line = parse_line("prn #-5", 2).unwrap();
        let instr = line.instruction.unwrap();
        assert_eq!(instr.opcode, Opcode::Prn);
        assert_eq!(instr.dst, Some(Operand::Immediate(-5)));
        assert!(instr.src.is_none());
    }

    #[test]
    fn parses_zero_operand_instruction() {
        let line = parse_line("stop", 3).unwrap();
        assert_eq!(line.instruction.unwrap().opcode, Opcode::Stop);
    }

    #[test]
    fn parses_jump_params_operand() {
        let line = parse_line("jmp LOOP(r1, #2)", 4).unwrap();
        let instr = line.instruction.unwrap();
        match instr.dst.unwrap() {
            Operand::JumpParams(label, op1, op2) => {
                assert_eq!(label, "LOOP");
                assert_eq!(*op1, Operand::Register(Register::R1));
                assert_eq!(*op2, Operand::Immediate(2));
            }
            other => panic!("expected jump-params operand, got {:?}", other),
        }
    }

    #[test]
    fn parses_data_directive() {
        let line = parse_line("LEN: .data 6, -9, 15", 5).unwrap();
        assert_eq!(line.label.as_deref(), Some("LEN"));
        assert_eq!(line.directive, Some(Directive::Data(vec![6, -9, 15])));
    }

    #[test]
    fn parses_string_directive() {
        let line = parse_line(".string \"abc\"", 6).unwrap();
        assert_eq!(line.directive, Some(Directive::String("abc".to_string())));
    }

    #[test]
    fn parses_entry_and_extern_directives() {
        assert_eq!(
            parse_line(".entry LEN", 7).unwrap().directive,
            Some(Directive::Entry("LEN".to_string()))
        );
        assert_eq!(
            parse_line(".extern EXT", 8).unwrap().directive,
            Some(Directive::Extern("EXT".to_string()))
        );
    }

    #[test]
    fn label_only_line_is_not_empty() {
        let line = parse_line("LOOP:", 9).unwrap();
        assert!(!line.is_empty());
        assert!(line.instruction.is_none());
    }

    #[test]
    fn blank_line_is_empty() {
        let line = parse_line("", 10).unwrap();
        assert!(line.is_empty());
    }

    #[test]
    fn unknown_mnemonic_is_syntactic_error() {
        let err = parse_line("frobnicate r1", 11).unwrap_err();
        assert!(matches!(err, AssemblyError::Syntactic { line: 11, .. }));
    }
}
