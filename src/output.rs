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

//! Renders a finished [`Assembly`](crate::assembler::Assembly) into the
//! three output artifacts: the object file, the entry listing and the
//! external-reference listing.
//!
//! Addresses are always a 4-digit zero-padded decimal field, tab
//! separated from whatever follows — the structural contract every
//! output file shares. Only the 14-bit word *value* in `.ob` uses the
//! project's established base-4 rendering: 7 digits, 2 bits each, most
//! significant pair first, alphabet `0`..`3`.

use std::fmt::Write as _;

use crate::assembler::memory_image::{MemoryImage, CODE_START};
use crate::assembler::{EntrySymbol, ExternalUse};

fn render_word(word: u16) -> String {
    let mut rendered = String::with_capacity(7);
    for shift in (0..7).rev() {
        let digit = (word >> (shift * 2)) & 0b11;
        rendered.push(std::char::from_digit(digit as u32, 4).expect("2-bit digit is always 0..3"));
    }
    rendered
}

fn render_address(address: i32) -> String {
    format!("{:04}", address)
}

/// The `.ob` file: a header line with the code and data word counts,
/// followed by one `<address>\t<word>` line per memory cell.
pub fn write_object(image: &MemoryImage, code_words: usize, data_words: usize) -> String {
    let mut out = String::new();
    writeln!(out, "{} {}", code_words, data_words).expect("writing to a String never fails");
    for (index, word) in image.code.iter().enumerate() {
        let address = CODE_START + index as i32;
        writeln!(out, "{}\t{}", render_address(address), render_word(word.encode()))
            .expect("writing to a String never fails");
    }
    out
}

/// The `.ent` file: one `<name>\t<address>` line per exported symbol, or
/// `None` if the file declares no entries.
pub fn write_entries(entries: &[EntrySymbol]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }
    let mut out = String::new();
    for entry in entries {
        writeln!(out, "{}\t{}", entry.name, render_address(entry.address))
            .expect("writing to a String never fails");
    }
    Some(out)
}

/// The `.ext` file: one `<name>\t<address>` line per external reference
/// *use site* (a symbol used three times produces three lines), or
/// `None` if the file references no externals.
pub fn write_externals(externals: &[ExternalUse]) -> Option<String> {
    if externals.is_empty() {
        return None;
    }
    let mut out = String::new();
    for use_ in externals {
        writeln!(out, "{}\t{}", use_.name, render_address(use_.address))
            .expect("writing to a String never fails");
    }
    Some(out)
}
