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

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;

use w14asm::diagnostics::{self, DiagnosticCollector};
use w14asm::file_reader::AsFileReader;

#[derive(ClapParser)]
#[clap(version, author = "Connor Nolan")]
struct Opts {
    /// Source files to assemble. A missing `.as` extension is added.
    #[clap(required = true)]
    files: Vec<PathBuf>,

    /// Disable colored diagnostic output.
    #[clap(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    if opts.no_color {
        colored::control::set_override(false);
    }

    let reader = AsFileReader;
    let mut all_succeeded = true;

    for file in &opts.files {
        let source_path = with_as_extension(file);
        match assemble_one(&source_path, &reader) {
            Ok(true) => {}
            Ok(false) => {
                eprintln!("Failed to assemble {}", source_path.display());
                all_succeeded = false;
            }
            Err(err) => {
                eprintln!("error: {:#}", err);
                all_succeeded = false;
            }
        }
    }

    if all_succeeded {
        println!("All files assembled successfully");
        ExitCode::SUCCESS
    } else {
        eprintln!("One or more files failed to assemble");
        ExitCode::FAILURE
    }
}

fn with_as_extension(path: &PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path.clone()
    } else {
        path.with_extension("as")
    }
}

/// Assembles a single file, writing its artifacts next to it and
/// rendering any diagnostics. Returns `Ok(false)` (not an `Err`) when
/// assembly failed cleanly with diagnostics to show the user.
fn assemble_one(source_path: &PathBuf, reader: &AsFileReader) -> Result<bool> {
    let mut diagnostics = DiagnosticCollector::new(source_path.display().to_string());

    let artifacts = w14asm::assemble_file(source_path, reader, &mut diagnostics)
        .with_context(|| format!("assembling {}", source_path.display()))?;

    diagnostics::render::print_all(diagnostics.iter());

    let Some(artifacts) = artifacts else {
        return Ok(false);
    };

    fs::write(source_path.with_extension("ob"), artifacts.object)
        .with_context(|| format!("writing {}", source_path.with_extension("ob").display()))?;

    if let Some(entries) = artifacts.entries {
        fs::write(source_path.with_extension("ent"), entries)
            .with_context(|| format!("writing {}", source_path.with_extension("ent").display()))?;
    }

    if let Some(externals) = artifacts.externals {
        fs::write(source_path.with_extension("ext"), externals)
            .with_context(|| format!("writing {}", source_path.with_extension("ext").display()))?;
    }

    println!("Successfully assembled {}", source_path.display());
    Ok(true)
}
