//! Driver integration tests.

use std::fs;
use std::path::Path;

use hxdc::commands::{convert_directory, convert_file, convert_source};
use hxdc::DriverError;
use pretty_assertions::assert_eq;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn convert_source_returns_text_and_model() {
    let (text, module) = convert_source("package p;\nclass X {}", "X");
    assert_eq!(module.package.as_deref(), Some("p"));
    assert!(text.contains("class X {"));
}

#[test]
fn package_relocates_output() -> TestResult {
    let src = tempfile::tempdir()?;
    let out = tempfile::tempdir()?;
    fs::create_dir_all(src.path().join("tools"))?;
    fs::write(
        src.path().join("tools/Box.hx"),
        "package com.demo;\nclass Box { public var w:Int; }\n",
    )?;

    let written = convert_file(src.path(), Path::new("tools/Box.hx"), out.path())?;
    assert_eq!(written, out.path().join("com/demo/Box.d.ts"));
    let text = fs::read_to_string(&written)?;
    assert!(text.starts_with("module com.demo {"));
    assert!(text.contains("w: integer;"));
    Ok(())
}

#[test]
fn no_package_mirrors_source_layout() -> TestResult {
    let src = tempfile::tempdir()?;
    let out = tempfile::tempdir()?;
    fs::create_dir_all(src.path().join("ui"))?;
    fs::write(src.path().join("ui/Panel.hx"), "class Panel {}\n")?;

    let written = convert_file(src.path(), Path::new("ui/Panel.hx"), out.path())?;
    assert_eq!(written, out.path().join("ui/Panel.d.ts"));
    Ok(())
}

#[test]
fn directory_conversion_is_recursive_and_sorted() -> TestResult {
    let src = tempfile::tempdir()?;
    let out = tempfile::tempdir()?;
    fs::create_dir_all(src.path().join("b"))?;
    fs::write(src.path().join("b/Late.hx"), "class Late {}\n")?;
    fs::write(src.path().join("Aaa.hx"), "class Aaa {}\n")?;
    fs::write(src.path().join("notes.txt"), "ignored")?;

    let written = convert_directory(src.path(), out.path())?;
    assert_eq!(
        written,
        vec![out.path().join("Aaa.d.ts"), out.path().join("b/Late.d.ts")]
    );
    Ok(())
}

#[test]
fn existing_output_is_overwritten() -> TestResult {
    let src = tempfile::tempdir()?;
    let out = tempfile::tempdir()?;
    fs::write(
        src.path().join("Thing.hx"),
        "class Thing { public var a:Int; }\n",
    )?;
    fs::write(out.path().join("Thing.d.ts"), "stale")?;

    convert_file(src.path(), Path::new("Thing.hx"), out.path())?;
    let text = fs::read_to_string(out.path().join("Thing.d.ts"))?;
    assert!(!text.contains("stale"));
    assert!(text.contains("a: integer;"));
    Ok(())
}

#[test]
fn missing_source_directory_is_reported() -> TestResult {
    let out = tempfile::tempdir()?;
    let result = convert_directory(Path::new("no-such-source-dir"), out.path());
    assert!(matches!(result, Err(DriverError::NotADirectory(_))));
    Ok(())
}
