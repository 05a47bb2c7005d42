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

//! Addressing-mode legality per opcode. The grammar only knows operand
//! *shapes*; which of those shapes a given mnemonic actually accepts is
//! a semantic property checked here, once pass1 has both the opcode and
//! the already-built operand in hand.

use crate::ast::{Instruction, Opcode};
use crate::errors::AssemblyError;

fn legal_src_modes(opcode: Opcode) -> &'static [u8] {
    match opcode {
        Opcode::Mov | Opcode::Add | Opcode::Sub | Opcode::Cmp => &[0, 1, 3],
        Opcode::Lea => &[1],
        _ => &[],
    }
}

fn legal_dst_modes(opcode: Opcode) -> &'static [u8] {
    match opcode {
        Opcode::Mov | Opcode::Add | Opcode::Sub | Opcode::Lea => &[1, 3],
        Opcode::Cmp | Opcode::Prn => &[0, 1, 3],
        Opcode::Not | Opcode::Clr | Opcode::Inc | Opcode::Dec | Opcode::Red => &[1, 3],
        Opcode::Jmp | Opcode::Bne | Opcode::Jsr => &[1, 2],
        Opcode::Rts | Opcode::Stop => &[],
    }
}

pub fn validate(instr: &Instruction, line: usize) -> Result<(), AssemblyError> {
    if let Some(src) = &instr.src {
        let legal = legal_src_modes(instr.opcode);
        if !legal.contains(&src.mode()) {
            return Err(AssemblyError::Semantic {
                line,
                reason: format!(
                    "`{}` does not accept addressing mode {} as its source operand",
                    instr.opcode.mnemonic(),
                    src.mode()
                ),
            });
        }
    }
    if let Some(dst) = &instr.dst {
        let legal = legal_dst_modes(instr.opcode);
        if !legal.contains(&dst.mode()) {
            return Err(AssemblyError::Semantic {
                line,
                reason: format!(
                    "`{}` does not accept addressing mode {} as its destination operand",
                    instr.opcode.mnemonic(),
                    dst.mode()
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Operand, Register};

    #[test]
    fn mov_rejects_immediate_destination() {
        let instr = Instruction {
            opcode: Opcode::Mov,
            src: Some(Operand::Register(Register::R1)),
            dst: Some(Operand::Immediate(5)),
        };
        assert!(validate(&instr, 1).is_err());
    }

    #[test]
    fn lea_requires_direct_source() {
        let instr = Instruction {
            opcode: Opcode::Lea,
            src: Some(Operand::Register(Register::R1)),
            dst: Some(Operand::Register(Register::R2)),
        };
        assert!(validate(&instr, 1).is_err());
    }

    #[test]
    fn jmp_accepts_jump_params_destination() {
        let instr = Instruction {
            opcode: Opcode::Jmp,
            src: None,
            dst: Some(Operand::JumpParams(
                "L".to_string(),
                Box::new(Operand::Register(Register::R1)),
                Box::new(Operand::Immediate(2)),
            )),
        };
        assert!(validate(&instr, 1).is_ok());
    }

    #[test]
    fn prn_accepts_any_of_its_three_modes() {
        for operand in [
            Operand::Immediate(1),
            Operand::Direct("L".to_string()),
            Operand::Register(Register::R3),
        ] {
            let instr = Instruction {
                opcode: Opcode::Prn,
                src: None,
                dst: Some(operand),
            };
            assert!(validate(&instr, 1).is_ok());
        }
    }
}
