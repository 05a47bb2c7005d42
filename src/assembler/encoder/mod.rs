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

//! Packs an [`Instruction`](crate::ast::Instruction) into its first word.
//!
//! Register operands of the instruction's own src/dst fields never cost
//! an additional word: the first word's bits 5-3 and 2-0 carry the
//! register number directly. A register used as one of `jump_params`'s
//! two parameters is not one of those fields, so it still gets its own
//! additional word, built alongside the rest of the instruction's extra
//! words in `assembler::placeholder_words`.

pub mod operand_validators;

use crate::ast::{Instruction, Operand};

pub fn encode_first_word(instr: &Instruction) -> u16 {
    let src_mode = instr.src.as_ref().map_or(0, Operand::mode) as u16;
    let dst_mode = instr.dst.as_ref().map_or(0, Operand::mode) as u16;
    let src_reg = register_field(instr.src.as_ref());
    let dst_reg = register_field(instr.dst.as_ref());
    (src_mode << 12) | ((instr.opcode.code() as u16) << 8) | (dst_mode << 6) | (src_reg << 3) | dst_reg
}

fn register_field(operand: Option<&Operand>) -> u16 {
    match operand {
        Some(Operand::Register(r)) => r.index() as u16,
        _ => 0,
    }
}
