//! Per-file module information.

use crate::entry::{DeclarationEntry, EntryKind, EnumValue};
use crate::member::Member;

/// Everything the scanner learned about one source file.
///
/// Built once per scan invocation, then read-only during rendering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModuleInfo {
    /// Requested root/module name (usually the source file stem).
    pub module_name: String,
    /// Declared package, if any (`package a.b.c;`).
    pub package: Option<String>,
    /// Imported dotted paths, in first-seen order, unique.
    pub dependencies: Vec<String>,
    /// Ordered declaration entries; at most one per `(kind, name)`.
    pub entries: Vec<DeclarationEntry>,
}

impl ModuleInfo {
    pub fn new(module_name: impl Into<String>) -> Self {
        ModuleInfo {
            module_name: module_name.into(),
            package: None,
            dependencies: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Record an import. Duplicate paths are ignored, keeping the
    /// position of the first occurrence.
    pub fn push_dependency(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.dependencies.contains(&path) {
            self.dependencies.push(path);
        }
    }

    /// Insert an entry, replacing any earlier definition with the same
    /// kind and name. The new entry always lands at the end, so a
    /// redefinition moves the declaration toward the end rather than
    /// updating in place.
    pub fn upsert_entry(&mut self, entry: DeclarationEntry) {
        let kind = entry.kind();
        let name = entry.name().to_string();
        self.entries
            .retain(|existing| existing.kind() != kind || existing.name() != name);
        self.entries.push(entry);
    }

    /// Find the most recent entry with the given kind and name.
    pub fn entry(&self, kind: EntryKind, name: &str) -> Option<&DeclarationEntry> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.kind() == kind && entry.name() == name)
    }

    /// Append a member to the most recent entry matching `(kind, name)`.
    ///
    /// Silently does nothing when the entry is absent, is an enum, or
    /// is an alias typedef — alias and structural members are mutually
    /// exclusive, and the scanner never routes members to enums.
    pub fn append_member(&mut self, kind: EntryKind, name: &str, member: Member) {
        let target = self
            .entries
            .iter_mut()
            .rev()
            .find(|entry| entry.kind() == kind && entry.name() == name);
        match target {
            Some(DeclarationEntry::Class(decl)) => decl.members.push(member),
            Some(DeclarationEntry::Interface(decl)) => decl.members.push(member),
            Some(DeclarationEntry::Typedef(decl)) if decl.alias.is_none() => {
                decl.members.push(member);
            }
            _ => {}
        }
    }

    /// Append a value to the most recent enum with the given name.
    /// No-op when the enum is absent.
    pub fn append_enum_value(&mut self, name: &str, value: EnumValue) {
        let target = self
            .entries
            .iter_mut()
            .rev()
            .find(|entry| entry.kind() == EntryKind::Enum && entry.name() == name);
        if let Some(DeclarationEntry::Enum(decl)) = target {
            decl.values.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{ClassDecl, TypedefDecl};
    use pretty_assertions::assert_eq;

    fn class(name: &str) -> DeclarationEntry {
        DeclarationEntry::Class(ClassDecl {
            name: name.to_string(),
            ..ClassDecl::default()
        })
    }

    #[test]
    fn dependencies_stay_unique_and_ordered() {
        let mut info = ModuleInfo::new("Example");
        info.push_dependency("haxe.ds.StringMap");
        info.push_dependency("js.html.Element");
        info.push_dependency("haxe.ds.StringMap");
        assert_eq!(
            info.dependencies,
            vec!["haxe.ds.StringMap".to_string(), "js.html.Element".to_string()]
        );
    }

    #[test]
    fn redefinition_replaces_and_moves_to_end() {
        let mut info = ModuleInfo::new("Example");
        info.upsert_entry(class("Foo"));
        info.upsert_entry(class("Bar"));
        info.upsert_entry(class("Foo"));

        let names: Vec<&str> = info.entries.iter().map(DeclarationEntry::name).collect();
        assert_eq!(names, vec!["Bar", "Foo"]);
    }

    #[test]
    fn same_name_different_kind_coexist() {
        let mut info = ModuleInfo::new("Example");
        info.upsert_entry(class("Foo"));
        info.upsert_entry(DeclarationEntry::Typedef(TypedefDecl {
            name: "Foo".to_string(),
            ..TypedefDecl::default()
        }));
        assert_eq!(info.entries.len(), 2);
    }

    #[test]
    fn members_attach_to_latest_entry() {
        let mut info = ModuleInfo::new("Example");
        info.upsert_entry(class("Foo"));
        info.append_member(
            EntryKind::Class,
            "Foo",
            Member::Property {
                name: "x".to_string(),
                ty: Some("Int".to_string()),
                is_static: false,
                is_private: false,
                default_value: None,
                comment: None,
            },
        );

        match info.entry(EntryKind::Class, "Foo") {
            Some(DeclarationEntry::Class(decl)) => {
                assert_eq!(decl.members.len(), 1);
                assert_eq!(decl.members[0].name(), "x");
            }
            other => panic!("expected class entry, got {other:?}"),
        }
    }

    #[test]
    fn alias_typedef_never_receives_members() {
        let mut info = ModuleInfo::new("Example");
        info.upsert_entry(DeclarationEntry::Typedef(TypedefDecl {
            name: "Alias".to_string(),
            alias: Some("String".to_string()),
            ..TypedefDecl::default()
        }));
        info.append_member(
            EntryKind::Typedef,
            "Alias",
            Member::Property {
                name: "stray".to_string(),
                ty: None,
                is_static: false,
                is_private: false,
                default_value: None,
                comment: None,
            },
        );

        match info.entry(EntryKind::Typedef, "Alias") {
            Some(DeclarationEntry::Typedef(decl)) => assert!(decl.members.is_empty()),
            other => panic!("expected typedef entry, got {other:?}"),
        }
    }
}
