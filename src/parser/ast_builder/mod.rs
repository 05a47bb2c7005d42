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

//! Turns pest `Pair`s matched against `grammar.pest` into [`ast`](crate::ast)
//! nodes. Split by concern: `operands` builds operand values, `instructions`
//! dispatches the three instruction arities, `directives` builds the four
//! directive kinds.

mod directives;
mod instructions;
mod operands;

pub use directives::build_directive;
pub use instructions::build_instruction;
