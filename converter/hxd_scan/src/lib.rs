//! Haxe declaration scanner.
//!
//! Turns raw Haxe source text into a [`hxd_ir::ModuleInfo`] without a
//! grammar or AST library:
//!
//! 1. [`cleanup`] blanks comments (extracting their bodies with line
//!    numbers) and deletes whitespace inside generic parameter lists,
//!    keeping the line structure intact.
//! 2. [`scanner`] walks the cleaned text once, left to right, matching
//!    declaration heads and members with hand-rolled patterns and
//!    tracking scope with a brace counter plus a container stack.
//!
//! Malformed input never fails: unmatched text is skipped character by
//! character and the result degrades to a partial or empty module.

pub mod cleanup;
pub mod matchers;
pub mod scanner;

pub use cleanup::{clean_source, CleanOutput};
pub use scanner::{scan, ScanSession};

#[cfg(test)]
mod tests;
