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

//! Shared line-level text utilities used by both the preprocessor and
//! pass1: stripping a trailing `;` comment and trimming whitespace.
//! Tokenization past this point (operands, registers, immediates, strings)
//! is the grammar's job (see `grammar.pest`).

/// Range accepted for `.data` values and immediate operand literals:
/// [-2^13, 2^13 - 1].
pub const MIN_LITERAL: i32 = -8192;
pub const MAX_LITERAL: i32 = 8191;

pub fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(idx) => line[..idx].trim(),
        None => line.trim(),
    }
}

/// Two's-complement clamp of a value into `bits` bits, returned as the
/// low `bits` bits of a u16 (ready to be shifted into a word).
pub fn clamp_to_bits(value: i32, bits: u32) -> u16 {
    let mask = (1u32 << bits) - 1;
    (value as u32 & mask) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_comment() {
        assert_eq!(strip_comment("  mov r1, r2 ; move it"), "mov r1, r2");
        assert_eq!(strip_comment("; only a comment"), "");
        assert_eq!(strip_comment("stop"), "stop");
    }

    #[test]
    fn clamps_negative_into_fourteen_bits() {
        assert_eq!(clamp_to_bits(-9, 14), 0b11_1111_1111_0111);
        assert_eq!(clamp_to_bits(15, 14), 15);
    }
}
