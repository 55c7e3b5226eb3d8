//! TypeScript declaration rendering.
//!
//! Pure text generation over a [`hxd_ir::ModuleInfo`]: [`types`] builds
//! the per-module type replacement table and resolves raw Haxe type
//! names (builtins, import substitution, function-arrow rewriting);
//! [`dumper`] walks the declaration tree and emits indented,
//! `module`-wrapped `.d.ts` text through the [`emitter`]. Rendering
//! never fails — unresolved types fall back to `any` and unparseable
//! type text passes through unchanged.

pub mod dumper;
pub mod emitter;
pub mod types;

pub use dumper::render;
pub use emitter::StringEmitter;
pub use types::{argument_name, TypeResolver};
