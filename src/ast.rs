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

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

impl Register {
    pub fn index(&self) -> u8 {
        match self {
            Register::R0 => 0,
            Register::R1 => 1,
            Register::R2 => 2,
            Register::R3 => 3,
            Register::R4 => 4,
            Register::R5 => 5,
            Register::R6 => 6,
            Register::R7 => 7,
        }
    }
}

// Represents all possible forms an argument to an instruction can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Immediate(i32),                                 // #integer
    Direct(String),                                  // label
    JumpParams(String, Box<Operand>, Box<Operand>), // label(op1, op2)
    Register(Register),                              // rN
}

impl Operand {
    /// The 2-bit addressing mode number used in the instruction word and in
    /// the legal-mode tables: 0=immediate, 1=direct, 2=jump-params, 3=register.
    pub fn mode(&self) -> u8 {
        match self {
            Operand::Immediate(_) => 0,
            Operand::Direct(_) => 1,
            Operand::JumpParams(_, _, _) => 2,
            Operand::Register(_) => 3,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Opcode {
    Mov,
    Cmp,
    Add,
    Sub,
    Not,
    Clr,
    Lea,
    Inc,
    Dec,
    Jmp,
    Bne,
    Red,
    Prn,
    Jsr,
    Rts,
    Stop,
}

impl Opcode {
    /// Opcode numbers fixed by the instruction word layout.
    pub fn code(&self) -> u8 {
        match self {
            Opcode::Mov => 0,
            Opcode::Cmp => 1,
            Opcode::Add => 2,
            Opcode::Sub => 3,
            Opcode::Not => 4,
            Opcode::Clr => 5,
            Opcode::Lea => 6,
            Opcode::Inc => 7,
            Opcode::Dec => 8,
            Opcode::Jmp => 9,
            Opcode::Bne => 10,
            Opcode::Red => 11,
            Opcode::Prn => 12,
            Opcode::Jsr => 13,
            Opcode::Rts => 14,
            Opcode::Stop => 15,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Mov => "mov",
            Opcode::Cmp => "cmp",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Not => "not",
            Opcode::Clr => "clr",
            Opcode::Lea => "lea",
            Opcode::Inc => "inc",
            Opcode::Dec => "dec",
            Opcode::Jmp => "jmp",
            Opcode::Bne => "bne",
            Opcode::Red => "red",
            Opcode::Prn => "prn",
            Opcode::Jsr => "jsr",
            Opcode::Rts => "rts",
            Opcode::Stop => "stop",
        }
    }

    pub fn from_mnemonic(name: &str) -> Option<Opcode> {
        Some(match name {
            "mov" => Opcode::Mov,
            "cmp" => Opcode::Cmp,
            "add" => Opcode::Add,
            "sub" => Opcode::Sub,
            "not" => Opcode::Not,
            "clr" => Opcode::Clr,
            "lea" => Opcode::Lea,
            "inc" => Opcode::Inc,
            "dec" => Opcode::Dec,
            "jmp" => Opcode::Jmp,
            "bne" => Opcode::Bne,
            "red" => Opcode::Red,
            "prn" => Opcode::Prn,
            "jsr" => Opcode::Jsr,
            "rts" => Opcode::Rts,
            "stop" => Opcode::Stop,
            _ => return None,
        })
    }

    /// Number of operands this opcode's group takes (0, 1 or 2).
    pub fn arity(&self) -> usize {
        match self {
            Opcode::Mov | Opcode::Cmp | Opcode::Add | Opcode::Sub | Opcode::Lea => 2,
            Opcode::Not
            | Opcode::Clr
            | Opcode::Inc
            | Opcode::Dec
            | Opcode::Jmp
            | Opcode::Bne
            | Opcode::Jsr
            | Opcode::Red
            | Opcode::Prn => 1,
            Opcode::Rts | Opcode::Stop => 0,
        }
    }
}

// Represents a single instruction: an opcode plus 0, 1 or 2 operands.
// `src` is only ever populated for the two-operand group; the one-operand
// group's sole operand lives in `dst` (it is always a destination, e.g.
// `inc r2` increments r2).
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub src: Option<Operand>,
    pub dst: Option<Operand>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Data(Vec<i32>),   // .data 6,-9,15
    String(String),   // .string "abc"
    Entry(String),    // .entry LABEL
    Extern(String),   // .extern LABEL
}

// --- Assembly Line Structure ---

// Represents a single line of the flattened, post-macro-expansion source.
// `line_number` always points at the *original* file line, even for lines
// that came out of a macro body (see `preprocessor`), so diagnostics report
// the use-site rather than the macro definition.
#[derive(Debug, Clone, Default)]
pub struct AssemblyLine {
    pub line_number: usize,
    pub label: Option<String>,
    pub instruction: Option<Instruction>,
    pub directive: Option<Directive>,
}

impl AssemblyLine {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.instruction.is_none() && self.directive.is_none()
    }
}
