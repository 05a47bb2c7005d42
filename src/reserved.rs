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

//! Identifier rules shared by the macro table, the symbol table and the
//! parser: labels and macro names are both "identifiers" in the sense of
//! spec §3, and both must dodge the same set of reserved words.

use crate::ast::Opcode;

const DIRECTIVE_KEYWORDS: [&str; 4] = ["data", "string", "entry", "extern"];

pub fn is_register_name(name: &str) -> bool {
    matches!(
        name,
        "r0" | "r1" | "r2" | "r3" | "r4" | "r5" | "r6" | "r7"
    )
}

pub fn is_reserved(name: &str) -> bool {
    Opcode::from_mnemonic(name).is_some()
        || is_register_name(name)
        || name == "mcr"
        || name == "endmcr"
        || DIRECTIVE_KEYWORDS.contains(&name)
}

/// Case-sensitive, 1..31 chars, starts with a letter, letters and digits only.
pub fn is_valid_identifier(name: &str) -> bool {
    if name.is_empty() || name.len() > 31 {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(is_valid_identifier("LEN"));
        assert!(is_valid_identifier("label1"));
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1label"));
        assert!(!is_valid_identifier("has space"));
        assert!(!is_valid_identifier("under_score"));
        assert!(!is_valid_identifier(&"a".repeat(32)));
    }

    #[test]
    fn flags_reserved_words() {
        assert!(is_reserved("mov"));
        assert!(is_reserved("r3"));
        assert!(is_reserved("mcr"));
        assert!(is_reserved("endmcr"));
        assert!(is_reserved("data"));
        assert!(!is_reserved("LEN"));
    }
}
