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

use pest::iterators::Pair;

use crate::ast::{Instruction, Opcode};
use crate::errors::AssemblyError;
use crate::parser::Rule;

use super::operands::build_operand;

/// Builds an `instruction` pair: `instr2 | instr1 | instr0`.
pub fn build_instruction(pair: Pair<Rule>, line_number: usize) -> Result<Instruction, AssemblyError> {
    let inner = pair
        .into_inner()
        .next()
        .expect("instruction always wraps exactly one arity group");

    match inner.as_rule() {
        Rule::instr0 => {
            let mnemonic = inner
                .into_inner()
                .next()
                .expect("instr0 carries a mnemonic0")
                .as_str();
            let opcode = opcode_for(mnemonic);
            Ok(Instruction {
                opcode,
                src: None,
                dst: None,
            })
        }
        Rule::instr1 => {
            let mut fields = inner.into_inner();
            let mnemonic = fields.next().expect("instr1 carries a mnemonic1").as_str();
            let operand_pair = fields.next().expect("instr1 carries one operand");
            let opcode = opcode_for(mnemonic);
            let dst = build_operand(operand_pair, line_number)?;
            Ok(Instruction {
                opcode,
                src: None,
                dst: Some(dst),
            })
        }
        Rule::instr2 => {
            let mut fields = inner.into_inner();
            let mnemonic = fields.next().expect("instr2 carries a mnemonic2").as_str();
            let src_pair = fields.next().expect("instr2 carries a source operand");
            let dst_pair = fields.next().expect("instr2 carries a destination operand");
            let opcode = opcode_for(mnemonic);
            let src = build_operand(src_pair, line_number)?;
            let dst = build_operand(dst_pair, line_number)?;
            Ok(Instruction {
                opcode,
                src: Some(src),
                dst: Some(dst),
            })
        }
        other => unreachable!("unexpected instruction arity rule: {:?}", other),
    }
}

fn opcode_for(mnemonic: &str) -> Opcode {
    Opcode::from_mnemonic(mnemonic)
        .unwrap_or_else(|| unreachable!("grammar only admits known mnemonics, got `{}`", mnemonic))
}
