//! Top-level declaration entries.
//!
//! Each entry is one construct recognized by the scanner. Entries of
//! different kinds never replace each other, so the discriminant
//! [`EntryKind`] participates in the module's uniqueness key.

use crate::member::{Argument, Member};

/// Discriminant of a [`DeclarationEntry`], used in the `(kind, name)`
/// uniqueness key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EntryKind {
    Class,
    Interface,
    Typedef,
    Enum,
}

/// A `class` declaration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClassDecl {
    /// Class name, possibly carrying a generic parameter list.
    pub name: String,
    /// Single superclass, possibly generic.
    pub extends_class: Option<String>,
    pub implements_interfaces: Vec<String>,
    /// `extern class` — members are public by default.
    pub is_extern: bool,
    pub is_private: bool,
    pub members: Vec<Member>,
    pub comment: Option<String>,
}

/// An `interface` declaration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InterfaceDecl {
    pub name: String,
    pub extends_interfaces: Vec<String>,
    pub is_private: bool,
    pub members: Vec<Member>,
    pub comment: Option<String>,
}

/// A `typedef` declaration.
///
/// Either a direct alias to another type name, or a structural type
/// with members — never both.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TypedefDecl {
    pub name: String,
    /// `typedef Name = Other;`
    pub alias: Option<String>,
    /// `typedef Name = { ... }` members. Empty when `alias` is set.
    pub members: Vec<Member>,
    pub is_private: bool,
    pub comment: Option<String>,
}

/// One case of an enum.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumValue {
    pub name: String,
    /// `Some` marks a payload-carrying constructor case.
    pub arguments: Option<Vec<Argument>>,
}

/// An `enum` declaration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub values: Vec<EnumValue>,
    pub is_private: bool,
    pub comment: Option<String>,
}

/// A top-level (or nested) declaration recorded in a module.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeclarationEntry {
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Typedef(TypedefDecl),
    Enum(EnumDecl),
}

impl DeclarationEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            DeclarationEntry::Class(_) => EntryKind::Class,
            DeclarationEntry::Interface(_) => EntryKind::Interface,
            DeclarationEntry::Typedef(_) => EntryKind::Typedef,
            DeclarationEntry::Enum(_) => EntryKind::Enum,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DeclarationEntry::Class(decl) => &decl.name,
            DeclarationEntry::Interface(decl) => &decl.name,
            DeclarationEntry::Typedef(decl) => &decl.name,
            DeclarationEntry::Enum(decl) => &decl.name,
        }
    }

    pub fn is_private(&self) -> bool {
        match self {
            DeclarationEntry::Class(decl) => decl.is_private,
            DeclarationEntry::Interface(decl) => decl.is_private,
            DeclarationEntry::Typedef(decl) => decl.is_private,
            DeclarationEntry::Enum(decl) => decl.is_private,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            DeclarationEntry::Class(decl) => decl.comment.as_deref(),
            DeclarationEntry::Interface(decl) => decl.comment.as_deref(),
            DeclarationEntry::Typedef(decl) => decl.comment.as_deref(),
            DeclarationEntry::Enum(decl) => decl.comment.as_deref(),
        }
    }
}
