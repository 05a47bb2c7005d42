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

//! The macro expander. Reads raw source lines, recognizes `mcr`/`endmcr`
//! blocks, and replaces macro-use lines with the stored body. Expansion is
//! single-level: a macro body may not itself contain `mcr`, and macros are
//! only visible from the line after their `endmcr` onward.

use indexmap::IndexMap;

use crate::diagnostics::DiagnosticCollector;
use crate::lexer::strip_comment as code_part;
use crate::reserved;

/// One line of the flattened output stream, tagged with the original
/// source line it came from (the use-site, for lines pulled out of a
/// macro body).
#[derive(Debug, Clone)]
pub struct RawLine {
    pub line_number: usize,
    pub text: String,
}

struct Macro {
    body: Vec<String>,
}

pub fn expand(source: &str, diagnostics: &mut DiagnosticCollector) -> Vec<RawLine> {
    let mut macros: IndexMap<String, Macro> = IndexMap::new();
    let mut output = Vec::new();

    let lines: Vec<&str> = source.lines().collect();
    let mut i = 0usize;

    while i < lines.len() {
        let line_number = i + 1;
        let code = code_part(lines[i]);

        if code.is_empty() {
            output.push(RawLine {
                line_number,
                text: lines[i].to_string(),
            });
            i += 1;
            continue;
        }

        let tokens: Vec<&str> = code.split_whitespace().collect();

        if tokens[0] == "mcr" {
            if tokens.len() != 2 {
                diagnostics.error(
                    line_number,
                    "semantic",
                    "extraneous tokens on mcr line; expected `mcr NAME`",
                );
                i += 1;
                continue;
            }
            let name = tokens[1];
            if reserved::is_reserved(name) || !reserved::is_valid_identifier(name) {
                diagnostics.error(
                    line_number,
                    "semantic",
                    format!("macro name `{}` is reserved or not a valid identifier", name),
                );
            } else if macros.contains_key(name) {
                diagnostics.error(
                    line_number,
                    "semantic",
                    format!("duplicate macro definition: {}", name),
                );
            }

            let mut body = Vec::new();
            let mut terminated = false;
            i += 1;
            while i < lines.len() {
                let body_code = code_part(lines[i]);
                if body_code == "endmcr" {
                    terminated = true;
                    i += 1;
                    break;
                }
                if body_code.split_whitespace().next() == Some("endmcr") {
                    diagnostics.error(
                        i + 1,
                        "semantic",
                        "extraneous tokens on endmcr line",
                    );
                    terminated = true;
                    i += 1;
                    break;
                }
                if body_code.split_whitespace().next() == Some("mcr") {
                    diagnostics.error(
                        i + 1,
                        "semantic",
                        "a macro definition may not be nested inside another",
                    );
                    i += 1;
                    continue;
                }
                body.push(lines[i].to_string());
                i += 1;
            }

            if !terminated {
                diagnostics.error(
                    line_number,
                    "semantic",
                    format!("unterminated macro definition: {}", name),
                );
            }

            if !macros.contains_key(name) {
                macros.insert(name.to_string(), Macro { body });
            }
            continue;
        }

        if tokens[0] == "endmcr" {
            diagnostics.error(line_number, "semantic", "endmcr without a matching mcr");
            i += 1;
            continue;
        }

        let is_label_prefixed = tokens[0].ends_with(':');
        if !is_label_prefixed {
            if let Some(mac) = macros.get(tokens[0]) {
                if tokens.len() == 1 {
                    for body_line in &mac.body {
                        output.push(RawLine {
                            line_number,
                            text: body_line.clone(),
                        });
                    }
                    i += 1;
                    continue;
                } else {
                    diagnostics.error(
                        line_number,
                        "syntactic",
                        format!("macro use of `{}` mixed with other tokens", tokens[0]),
                    );
                    i += 1;
                    continue;
                }
            }
        }

        output.push(RawLine {
            line_number,
            text: lines[i].to_string(),
        });
        i += 1;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_ok(source: &str) -> Vec<RawLine> {
        let mut diagnostics = DiagnosticCollector::new("test.as");
        let out = expand(source, &mut diagnostics);
        assert!(!diagnostics.has_errors(), "unexpected errors");
        out
    }

    #[test]
    fn expands_single_use() {
        let lines = expand_ok("mcr m\nmov r1, r2\nadd r1, #5\nendmcr\nm\nstop\n");
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["mov r1, r2", "add r1, #5", "stop"]);
    }

    #[test]
    fn use_site_tracks_original_line() {
        let lines = expand_ok("mcr m\nmov r1, r2\nendmcr\nstop\nm\n");
        assert_eq!(lines[0].text, "stop");
        assert_eq!(lines[1].text, "mov r1, r2");
        assert_eq!(lines[1].line_number, 5);
    }

    #[test]
    fn unterminated_macro_is_an_error() {
        let mut diagnostics = DiagnosticCollector::new("test.as");
        expand("mcr m\nmov r1, r2\n", &mut diagnostics);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn duplicate_macro_name_is_an_error() {
        let mut diagnostics = DiagnosticCollector::new("test.as");
        expand("mcr m\nstop\nendmcr\nmcr m\nstop\nendmcr\n", &mut diagnostics);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn reserved_macro_name_is_an_error() {
        let mut diagnostics = DiagnosticCollector::new("test.as");
        expand("mcr mov\nstop\nendmcr\n", &mut diagnostics);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn macro_use_with_extra_tokens_is_an_error() {
        let mut diagnostics = DiagnosticCollector::new("test.as");
        expand("mcr m\nstop\nendmcr\nm extra\n", &mut diagnostics);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn label_before_macro_name_is_not_expanded() {
        // Not a recognized macro use (label prefix present); passed through
        // unchanged and left for pass1 to reject as an unknown mnemonic.
        let lines = expand_ok("mcr m\nstop\nendmcr\nL: m\n");
        assert_eq!(lines.last().unwrap().text, "L: m");
    }
}
