//! Single-pass declaration scanner.
//!
//! Consumes preprocessed text left to right. At each cursor position the
//! matchers are tried in fixed priority order — package, import,
//! interface, typedef, class, method, property, enum, enum value,
//! string literal, braces, preprocessor line — and the first hit wins.
//! Anything else advances the cursor one character. The scanner never
//! raises an error: malformed input degrades to a partial or empty
//! module, by design.
//!
//! # Containers
//!
//! Open containers live on an explicit stack of frames, each recording
//! the brace depth at which it opened. A close brace that drops the
//! depth below the top frame's snapshot pops that frame. Members attach
//! to the top frame's entry; enum values only while an enum is on top.
//!
//! A session owns all mutable scan state (cursor, brace counter, frame
//! stack, comment queue) and is consumed by a single invocation — never
//! shared, never reentrant.

use std::collections::VecDeque;

use hxd_ir::{
    ClassDecl, Comment, DeclarationEntry, EntryKind, EnumDecl, EnumValue, InterfaceDecl, Member,
    ModuleInfo, TypedefDecl,
};

use crate::cleanup::clean_source;
use crate::matchers::{self, TypedefBody};

/// Scan Haxe source text into a [`ModuleInfo`].
///
/// `module_name` is the requested root name, typically the source file
/// stem. Scanning the same text twice yields structurally identical
/// results.
pub fn scan(source: &str, module_name: &str) -> ModuleInfo {
    ScanSession::new(source, module_name).run()
}

/// An open container and the brace depth it opened at.
struct Frame {
    kind: EntryKind,
    name: String,
    depth_at_open: i64,
    is_extern_class: bool,
}

/// All mutable state of one scan invocation.
pub struct ScanSession {
    text: String,
    comments: VecDeque<Comment>,
    pos: usize,
    braces: i64,
    stack: Vec<Frame>,
    info: ModuleInfo,
}

impl ScanSession {
    /// Preprocess `source` and set up a fresh session.
    pub fn new(source: &str, module_name: &str) -> Self {
        let cleaned = clean_source(source);
        ScanSession {
            text: cleaned.text,
            comments: cleaned.comments.into(),
            pos: 0,
            braces: 0,
            stack: Vec::new(),
            info: ModuleInfo::new(module_name),
        }
    }

    /// Run the scan to completion and return the module.
    pub fn run(mut self) -> ModuleInfo {
        let text = std::mem::take(&mut self.text);

        while self.pos < text.len() {
            let rest = &text[self.pos..];

            if self.info.package.is_none() {
                if let Some(head) = matchers::package(rest) {
                    if let Some(path) = head.path {
                        if !path.is_empty() {
                            self.info.package = Some(path);
                        }
                    }
                    self.pos += head.len;
                    continue;
                }
            }

            if let Some(head) = matchers::import(rest) {
                if let Some(path) = head.path {
                    self.info.push_dependency(path);
                }
                self.pos += head.len;
                continue;
            }

            if let Some(head) = matchers::interface(rest) {
                self.open_interface(&text, head);
                continue;
            }

            if let Some(head) = matchers::typedef(rest) {
                self.open_typedef(&text, head);
                continue;
            }

            if let Some(head) = matchers::class(rest) {
                self.open_class(&text, head);
                continue;
            }

            if let Some(container) = self.member_container() {
                if let Some(head) = matchers::method(rest) {
                    self.record_method(&text, &container, head);
                    continue;
                }
                if let Some(head) = matchers::property(rest) {
                    self.record_property(&text, &container, head);
                    continue;
                }
            }

            if let Some(head) = matchers::enum_head(rest) {
                self.open_enum(&text, head);
                continue;
            }

            if let Some(name) = self.open_enum_name() {
                if let Some(head) = matchers::enum_value(rest) {
                    self.info.append_enum_value(
                        &name,
                        EnumValue {
                            name: head.name,
                            arguments: head.arguments,
                        },
                    );
                    self.pos += head.len;
                    continue;
                }
            }

            if let Some(len) = matchers::quoted_string(rest) {
                self.pos += len;
                continue;
            }

            if rest.starts_with('{') {
                self.braces += 1;
                self.pos += 1;
                continue;
            }

            if rest.starts_with('}') {
                self.braces -= 1;
                if self
                    .stack
                    .last()
                    .is_some_and(|frame| self.braces < frame.depth_at_open)
                {
                    self.stack.pop();
                }
                self.pos += 1;
                continue;
            }

            if let Some(len) = matchers::preprocessor_line(rest) {
                self.pos += len;
                continue;
            }

            self.pos += rest.chars().next().map_or(1, char::len_utf8);
        }

        self.info
    }

    fn open_interface(&mut self, text: &str, head: matchers::InterfaceHead) {
        let comment = self.pending_comment(text);
        if head.opens_brace {
            self.braces += 1;
        }
        self.info.upsert_entry(DeclarationEntry::Interface(InterfaceDecl {
            name: head.name.clone(),
            extends_interfaces: head.extends,
            is_private: head.is_private,
            members: Vec::new(),
            comment,
        }));
        self.stack.push(Frame {
            kind: EntryKind::Interface,
            name: head.name,
            depth_at_open: self.braces,
            is_extern_class: false,
        });
        self.pos += head.len;
    }

    fn open_typedef(&mut self, text: &str, head: matchers::TypedefHead) {
        let comment = self.pending_comment(text);
        match head.body {
            TypedefBody::Struct => {
                self.braces += 1;
                self.info.upsert_entry(DeclarationEntry::Typedef(TypedefDecl {
                    name: head.name.clone(),
                    alias: None,
                    members: Vec::new(),
                    is_private: head.is_private,
                    comment,
                }));
                self.stack.push(Frame {
                    kind: EntryKind::Typedef,
                    name: head.name,
                    depth_at_open: self.braces,
                    is_extern_class: false,
                });
            }
            // An alias typedef is complete at its semicolon and opens no
            // container; stray members can never attach to it.
            TypedefBody::Alias(alias) => {
                self.info.upsert_entry(DeclarationEntry::Typedef(TypedefDecl {
                    name: head.name,
                    alias: Some(alias),
                    members: Vec::new(),
                    is_private: head.is_private,
                    comment,
                }));
            }
        }
        self.pos += head.len;
    }

    fn open_class(&mut self, text: &str, head: matchers::ClassHead) {
        let comment = self.pending_comment(text);
        if head.opens_brace {
            self.braces += 1;
        }
        self.info.upsert_entry(DeclarationEntry::Class(ClassDecl {
            name: head.name.clone(),
            extends_class: head.extends,
            implements_interfaces: head.implements,
            is_extern: head.is_extern,
            is_private: head.is_private,
            members: Vec::new(),
            comment,
        }));
        self.stack.push(Frame {
            kind: EntryKind::Class,
            name: head.name,
            depth_at_open: self.braces,
            is_extern_class: head.is_extern,
        });
        self.pos += head.len;
    }

    fn open_enum(&mut self, text: &str, head: matchers::EnumHead) {
        let comment = self.pending_comment(text);
        if head.opens_brace {
            self.braces += 1;
        }
        self.info.upsert_entry(DeclarationEntry::Enum(EnumDecl {
            name: head.name.clone(),
            values: Vec::new(),
            is_private: head.is_private,
            comment,
        }));
        self.stack.push(Frame {
            kind: EntryKind::Enum,
            name: head.name,
            depth_at_open: self.braces,
            is_extern_class: false,
        });
        self.pos += head.len;
    }

    fn record_method(&mut self, text: &str, container: &ContainerRef, head: matchers::MethodHead) {
        let comment = self.pending_comment(text);
        let member = Member::Method {
            name: head.name,
            arguments: head.arguments,
            return_type: head.return_type,
            is_static: head.modifiers.is_static,
            is_private: container.member_is_private(head.modifiers.has_public),
            comment,
        };
        self.info.append_member(container.kind, &container.name, member);
        if head.opens_brace {
            self.braces += 1;
        }
        self.pos += head.len;
    }

    fn record_property(&mut self, text: &str, container: &ContainerRef, head: matchers::PropertyHead) {
        let comment = self.pending_comment(text);
        let member = Member::Property {
            name: head.name,
            ty: head.ty,
            is_static: head.modifiers.is_static,
            is_private: container.member_is_private(head.modifiers.has_public),
            default_value: head.default_value,
            comment,
        };
        self.info.append_member(container.kind, &container.name, member);
        self.pos += head.len;
    }

    /// The top frame, if it can hold methods and properties.
    fn member_container(&self) -> Option<ContainerRef> {
        let frame = self.stack.last()?;
        match frame.kind {
            EntryKind::Class | EntryKind::Interface | EntryKind::Typedef => Some(ContainerRef {
                kind: frame.kind,
                name: frame.name.clone(),
                is_extern_class: frame.is_extern_class,
            }),
            EntryKind::Enum => None,
        }
    }

    /// Name of the enum on top of the stack, if any.
    fn open_enum_name(&self) -> Option<String> {
        let frame = self.stack.last()?;
        (frame.kind == EntryKind::Enum).then(|| frame.name.clone())
    }

    /// Pop every queued comment that ended before the current line and
    /// concatenate them for attachment.
    fn pending_comment(&mut self, text: &str) -> Option<String> {
        let line = line_of(text, self.pos);
        let mut parts: Vec<String> = Vec::new();
        while self.comments.front().is_some_and(|c| c.line < line) {
            if let Some(comment) = self.comments.pop_front() {
                parts.push(comment.text);
            }
        }
        let joined = parts.join("\n");
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

/// Snapshot of the top frame used while recording a member.
struct ContainerRef {
    kind: EntryKind,
    name: String,
    is_extern_class: bool,
}

impl ContainerRef {
    /// A member is private unless it carries `public`, the container is
    /// a typedef (typedef members are always public), or the enclosing
    /// class is extern.
    fn member_is_private(&self, has_public: bool) -> bool {
        !has_public
            && self.kind != EntryKind::Typedef
            && !(self.kind == EntryKind::Class && self.is_extern_class)
    }
}

/// 1-based line of a byte position.
fn line_of(text: &str, pos: usize) -> usize {
    text[..pos].bytes().filter(|b| *b == b'\n').count() + 1
}
