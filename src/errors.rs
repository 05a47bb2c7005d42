use thiserror::Error;

use crate::parser::Rule;

/// Errors produced while processing a single line. Every variant carries the
/// *original* source line number (macro expansions report the use-site, not
/// the definition) so a `Diagnostic` can be built from it without further
/// context.
///
/// `Resource` is the only variant pass1 treats as fatal for the whole file
/// (see `AssemblyError::is_fatal`); every other variant is collected and the
/// offending line's emission is skipped, and processing continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("{reason}")]
    Lexical { line: usize, reason: String },

    #[error("{reason}")]
    Syntactic { line: usize, reason: String },

    #[error("{reason}")]
    Semantic { line: usize, reason: String },

    /// `fatal` is true only for the memory-overflow case (IC+DC > 256),
    /// which halts the current file; an out-of-range literal is also a
    /// Resource-kind diagnostic but only costs its own line.
    #[error("{reason}")]
    Resource {
        line: usize,
        reason: String,
        fatal: bool,
    },
}

impl AssemblyError {
    pub fn line(&self) -> usize {
        match self {
            AssemblyError::Lexical { line, .. }
            | AssemblyError::Syntactic { line, .. }
            | AssemblyError::Semantic { line, .. }
            | AssemblyError::Resource { line, .. } => *line,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            AssemblyError::Lexical { reason, .. }
            | AssemblyError::Syntactic { reason, .. }
            | AssemblyError::Semantic { reason, .. }
            | AssemblyError::Resource { reason, .. } => reason,
        }
    }

    pub fn resource(line: usize, reason: impl Into<String>, fatal: bool) -> AssemblyError {
        AssemblyError::Resource {
            line,
            reason: reason.into(),
            fatal,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AssemblyError::Lexical { .. } => "lexical",
            AssemblyError::Syntactic { .. } => "syntactic",
            AssemblyError::Semantic { .. } => "semantic",
            AssemblyError::Resource { .. } => "resource",
        }
    }

    /// Resource errors (memory overflow) halt the current file; everything
    /// else is recoverable at the per-line granularity.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AssemblyError::Resource { fatal: true, .. })
    }

    /// Turns a pest grammar failure for `line_number` into a `Syntactic`
    /// error carrying pest's own positional message.
    pub fn from_pest(err: pest::error::Error<Rule>, line_number: usize) -> AssemblyError {
        AssemblyError::Syntactic {
            line: line_number,
            reason: err.to_string(),
        }
    }
}
