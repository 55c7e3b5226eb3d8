//! Declaration model for the hxd converter.
//!
//! The scanner produces a [`ModuleInfo`] per source file; the emitter
//! consumes it read-only. The model is a flat, ordered list of
//! declaration entries (classes, interfaces, typedefs, enums), each
//! carrying its own ordered members.
//!
//! # Entry replacement
//!
//! A module holds at most one entry per `(kind, name)` pair. Redefining
//! a declaration removes the earlier entry and appends the new one at
//! the end — last definition wins, positioned nearest the end.

pub mod comment;
pub mod entry;
pub mod member;
pub mod module_info;

pub use comment::Comment;
pub use entry::{ClassDecl, DeclarationEntry, EntryKind, EnumDecl, EnumValue, InterfaceDecl, TypedefDecl};
pub use member::{Argument, Member};
pub use module_info::ModuleInfo;
