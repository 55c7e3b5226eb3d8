use crate::scan;
use hxd_ir::{Argument, DeclarationEntry, EntryKind, Member, ModuleInfo};
use pretty_assertions::assert_eq;

fn class_members<'a>(info: &'a ModuleInfo, name: &str) -> &'a [Member] {
    match info.entry(EntryKind::Class, name) {
        Some(DeclarationEntry::Class(decl)) => &decl.members,
        other => panic!("expected class {name}, got {other:?}"),
    }
}

#[test]
fn scanning_twice_is_deterministic() {
    let source = "package a.b;\nimport a.b.C;\nclass Foo { public var x:Int; }\nenum E { A; }";
    assert_eq!(scan(source, "Foo"), scan(source, "Foo"));
}

#[test]
fn package_and_imports_are_recorded() {
    let info = scan(
        "package com.tools;\nimport haxe.ds.StringMap;\nimport js.html.Element;\nclass T {}",
        "T",
    );
    assert_eq!(info.package.as_deref(), Some("com.tools"));
    assert_eq!(
        info.dependencies,
        vec!["haxe.ds.StringMap".to_string(), "js.html.Element".to_string()]
    );
}

#[test]
fn second_package_line_is_ignored() {
    let info = scan("package first;\npackage second;\n", "T");
    assert_eq!(info.package.as_deref(), Some("first"));
}

#[test]
fn class_members_and_visibility() {
    let info = scan(
        "class Foo { public var x:Int; private var y:String; var z:Bool; }",
        "Foo",
    );
    let members = class_members(&info, "Foo");
    assert_eq!(members.len(), 3);
    assert!(!members[0].is_private());
    assert!(members[1].is_private());
    // No modifier at all defaults to private.
    assert!(members[2].is_private());
}

#[test]
fn extern_class_members_default_public() {
    let info = scan("extern class Ext { var x:Int; function f():Void; }", "Ext");
    let members = class_members(&info, "Ext");
    assert!(members.iter().all(|m| !m.is_private()));
}

#[test]
fn typedef_members_are_always_public() {
    let info = scan(
        "typedef Options = {\n    var width:Int;\n    var height:Int;\n}",
        "Options",
    );
    match info.entry(EntryKind::Typedef, "Options") {
        Some(DeclarationEntry::Typedef(decl)) => {
            assert!(decl.alias.is_none());
            assert_eq!(decl.members.len(), 2);
            assert!(decl.members.iter().all(|m| !m.is_private()));
        }
        other => panic!("expected typedef, got {other:?}"),
    }
}

#[test]
fn alias_typedef_is_closed_immediately() {
    // The stray `var` after the alias must not attach to it.
    let info = scan("typedef Name = String;\nvar stray:Int;", "Name");
    match info.entry(EntryKind::Typedef, "Name") {
        Some(DeclarationEntry::Typedef(decl)) => {
            assert_eq!(decl.alias.as_deref(), Some("String"));
            assert!(decl.members.is_empty());
        }
        other => panic!("expected typedef, got {other:?}"),
    }
}

#[test]
fn redefinition_keeps_last_and_moves_to_end() {
    let info = scan(
        "class Foo { public var a:Int; }\nclass Bar {}\nclass Foo { public var b:Int; }",
        "Foo",
    );
    let names: Vec<&str> = info.entries.iter().map(DeclarationEntry::name).collect();
    assert_eq!(names, vec!["Bar", "Foo"]);
    let members = class_members(&info, "Foo");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name(), "b");
}

#[test]
fn comments_attach_across_an_import() {
    let info = scan(
        "/** First */\nimport foo.Bar;\n/** Second */\nclass Doc {\n}",
        "Doc",
    );
    let entry = info.entry(EntryKind::Class, "Doc");
    assert_eq!(
        entry.and_then(DeclarationEntry::comment),
        Some("First\nSecond")
    );
}

#[test]
fn comment_after_a_class_does_not_attach_to_it() {
    let info = scan("class A {\n}\n/** Later */\nclass B {\n}", "A");
    assert_eq!(
        info.entry(EntryKind::Class, "A").and_then(DeclarationEntry::comment),
        None
    );
    assert_eq!(
        info.entry(EntryKind::Class, "B").and_then(DeclarationEntry::comment),
        Some("Later")
    );
}

#[test]
fn member_comment_attaches() {
    let info = scan(
        "class A {\n    /** Doc for x */\n    public var x:Int;\n}",
        "A",
    );
    let members = class_members(&info, "A");
    match &members[0] {
        Member::Property { comment, .. } => {
            assert_eq!(comment.as_deref(), Some("Doc for x"));
        }
        other => panic!("expected property, got {other:?}"),
    }
}

#[test]
fn enum_values_with_and_without_payload() {
    let info = scan(
        "enum Color {\n    Red;\n    Green;\n    Rgb(r:Int, g:Int, b:Int);\n}",
        "Color",
    );
    match info.entry(EntryKind::Enum, "Color") {
        Some(DeclarationEntry::Enum(decl)) => {
            assert_eq!(decl.values.len(), 3);
            assert!(decl.values[0].arguments.is_none());
            let args = decl.values[2].arguments.as_deref().unwrap_or_default();
            assert_eq!(args.len(), 3);
            assert_eq!(args[1], Argument::typed("g", "Int"));
        }
        other => panic!("expected enum, got {other:?}"),
    }
}

#[test]
fn method_body_braces_do_not_close_the_class() {
    let info = scan(
        "class A {\n    public function f() { if (true) { } }\n    public var y:Int;\n}",
        "A",
    );
    let members = class_members(&info, "A");
    assert_eq!(members.len(), 2);
    assert_eq!(members[1].name(), "y");
}

#[test]
fn string_literal_braces_are_skipped() {
    let info = scan("class A {\n}\n\"stray } brace\"\nclass B {\n}", "A");
    assert!(info.entry(EntryKind::Class, "B").is_some());
}

#[test]
fn preprocessor_branches_are_scanned_linearly() {
    let info = scan(
        "class A {\n#if js\n    public var x:Int;\n#else\n    public var y:Int;\n#end\n}",
        "A",
    );
    let members = class_members(&info, "A");
    let names: Vec<&str> = members.iter().map(Member::name).collect();
    assert_eq!(names, vec!["x", "y"]);
}

#[test]
fn generic_class_name_survives() {
    let info = scan("class Pair< K , V > {\n}", "Pair");
    assert!(info.entry(EntryKind::Class, "Pair<K,V>").is_some());
}

#[test]
fn interface_with_heritage_and_methods() {
    let info = scan(
        "interface IShape extends IBase {\n    function area():Float;\n}",
        "IShape",
    );
    match info.entry(EntryKind::Interface, "IShape") {
        Some(DeclarationEntry::Interface(decl)) => {
            assert_eq!(decl.extends_interfaces, vec!["IBase".to_string()]);
            assert_eq!(decl.members.len(), 1);
        }
        other => panic!("expected interface, got {other:?}"),
    }
}

#[test]
fn class_heritage_clauses_are_recorded() {
    let info = scan(
        "class Foo extends bar.Base implements IOne implements ITwo {\n}",
        "Foo",
    );
    match info.entry(EntryKind::Class, "Foo") {
        Some(DeclarationEntry::Class(decl)) => {
            assert_eq!(decl.extends_class.as_deref(), Some("bar.Base"));
            assert_eq!(decl.implements_interfaces.len(), 2);
        }
        other => panic!("expected class, got {other:?}"),
    }
}

#[test]
fn garbage_degrades_to_an_empty_module() {
    let info = scan("?? !! ++ not haxe at all", "Junk");
    assert!(info.entries.is_empty());
    assert!(info.package.is_none());
}

#[test]
fn comment_with_multibyte_whitespace_line_attaches() {
    let info = scan("/* x\n\u{3000}\n*/\nclass A {\n}", "A");
    assert_eq!(
        info.entry(EntryKind::Class, "A").and_then(DeclarationEntry::comment),
        Some("x")
    );
}

#[test]
fn junk_before_a_declaration_is_skipped() {
    let info = scan("@&$\nclass A {\n}", "A");
    assert_eq!(info.entries.len(), 1);
}
