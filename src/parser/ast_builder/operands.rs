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

use crate::ast::{Operand, Register};
use crate::errors::AssemblyError;
use crate::lexer::{MAX_LITERAL, MIN_LITERAL};
use crate::parser::Rule;

pub fn parse_integer(text: &str, line_number: usize) -> Result<i32, AssemblyError> {
    let value: i32 = text.parse().map_err(|_| AssemblyError::Lexical {
        line: line_number,
        reason: format!("invalid integer literal `{}`", text),
    })?;
    if value < MIN_LITERAL || value > MAX_LITERAL {
        return Err(AssemblyError::resource(
            line_number,
            format!(
                "integer literal {} is out of range [{}, {}]",
                value, MIN_LITERAL, MAX_LITERAL
            ),
            false,
        ));
    }
    Ok(value)
}

fn register_from_str(text: &str) -> Register {
    match text.as_bytes()[1] {
        b'0' => Register::R0,
        b'1' => Register::R1,
        b'2' => Register::R2,
        b'3' => Register::R3,
        b'4' => Register::R4,
        b'5' => Register::R5,
        b'6' => Register::R6,
        b'7' => Register::R7,
        other => unreachable!("grammar only admits r0..r7, got byte {}", other),
    }
}

/// Builds an `operand` pair: `immediate | jump_params | register | direct`.
pub fn build_operand(pair: Pair<Rule>, line_number: usize) -> Result<Operand, AssemblyError> {
    let inner = pair
        .into_inner()
        .next()
        .expect("operand always wraps exactly one alternative");
    match inner.as_rule() {
        Rule::immediate => Ok(Operand::Immediate(parse_integer(
            &inner.as_str()[1..],
            line_number,
        )?)),
        Rule::register => Ok(Operand::Register(register_from_str(inner.as_str()))),
        Rule::direct => Ok(Operand::Direct(inner.as_str().to_string())),
        Rule::jump_params => build_jump_params(inner, line_number),
        other => unreachable!("unexpected operand alternative: {:?}", other),
    }
}

/// Builds a `jump_params` pair: `identifier ~ "(" ~ inner_operand ~ "," ~ inner_operand ~ ")"`.
fn build_jump_params(pair: Pair<Rule>, line_number: usize) -> Result<Operand, AssemblyError> {
    let mut fields = pair.into_inner();
    let label = fields
        .next()
        .expect("jump_params always starts with a label")
        .as_str()
        .to_string();
    let first = build_inner_operand(fields.next().expect("jump_params first parameter"), line_number)?;
    let second = build_inner_operand(fields.next().expect("jump_params second parameter"), line_number)?;
    Ok(Operand::JumpParams(label, Box::new(first), Box::new(second)))
}

/// Builds an `inner_operand` pair: `immediate | register | direct` (no
/// nested jump-params, matching the grammar).
fn build_inner_operand(pair: Pair<Rule>, line_number: usize) -> Result<Operand, AssemblyError> {
    let inner = pair
        .into_inner()
        .next()
        .expect("inner_operand always wraps exactly one alternative");
    match inner.as_rule() {
        Rule::immediate => Ok(Operand::Immediate(parse_integer(
            &inner.as_str()[1..],
            line_number,
        )?)),
        Rule::register => Ok(Operand::Register(register_from_str(inner.as_str()))),
        Rule::direct => Ok(Operand::Direct(inner.as_str().to_string())),
        other => unreachable!("unexpected inner_operand alternative: {:?}", other),
    }
}
