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

use crate::ast::Directive;
use crate::errors::AssemblyError;
use crate::parser::Rule;

use super::operands::parse_integer;

/// Builds a `directive` pair: `data_directive | string_directive | entry_directive | extern_directive`.
pub fn build_directive(pair: Pair<Rule>, line_number: usize) -> Result<Directive, AssemblyError> {
    let inner = pair
        .into_inner()
        .next()
        .expect("directive always wraps exactly one alternative");

    match inner.as_rule() {
        Rule::data_directive => {
            let values = inner
                .into_inner()
                .map(|p| parse_integer(p.as_str(), line_number))
                .collect::<Result<Vec<i32>, AssemblyError>>()?;
            Ok(Directive::Data(values))
        }
        Rule::string_directive => {
            let literal = inner
                .into_inner()
                .next()
                .expect("string_directive carries a string_lit")
                .as_str();
            let content = &literal[1..literal.len() - 1];
            if !content.is_ascii() || content.bytes().any(|b| b < 0x20 || b > 0x7e) {
                return Err(AssemblyError::Lexical {
                    line: line_number,
                    reason: "string literal must contain only printable ASCII characters"
                        .to_string(),
                });
            }
            Ok(Directive::String(content.to_string()))
        }
        Rule::entry_directive => {
            let name = inner
                .into_inner()
                .next()
                .expect("entry_directive carries a label name")
                .as_str()
                .to_string();
            Ok(Directive::Entry(name))
        }
        Rule::extern_directive => {
            let name = inner
                .into_inner()
                .next()
                .expect("extern_directive carries a label name")
                .as_str()
                .to_string();
            Ok(Directive::Extern(name))
        }
        other => unreachable!("unexpected directive alternative: {:?}", other),
    }
}
