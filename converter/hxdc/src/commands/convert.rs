//! Batch conversion: scan Haxe sources and write `.d.ts` files.

use std::fs;
use std::path::{Path, PathBuf};

use hxd_ir::ModuleInfo;
use tracing::info;

use crate::error::DriverError;

/// Scan and render in one step, returning the declaration text plus
/// the read-only model for the caller's use.
pub fn convert_source(source: &str, module_name: &str) -> (String, ModuleInfo) {
    let info = hxd_scan::scan(source, module_name);
    let output = hxd_emit::render(&info);
    (output, info)
}

/// Convert one file found at `relative` under `src_root`, writing below
/// `out_root`.
///
/// The module name is the file stem. The output path mirrors the
/// relative source path with `.hx` replaced by `.d.ts` — unless the
/// source declares a package, which relocates the output under the
/// package path (dots become path separators) so the tree mirrors the
/// declared namespace. Existing output is deleted, then rewritten.
pub fn convert_file(
    src_root: &Path,
    relative: &Path,
    out_root: &Path,
) -> Result<PathBuf, DriverError> {
    let src_path = src_root.join(relative);
    let module_name = relative
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| DriverError::NoModuleName(src_path.clone()))?
        .to_string();

    let source = fs::read_to_string(&src_path).map_err(|e| DriverError::io(&src_path, e))?;
    let (output, module) = convert_source(&source, &module_name);

    let file_name = format!("{module_name}.d.ts");
    let out_path = match &module.package {
        Some(package) => {
            let mut dir = out_root.to_path_buf();
            for segment in package.split('.') {
                dir.push(segment);
            }
            dir.join(&file_name)
        }
        None => out_root
            .join(relative.parent().unwrap_or(Path::new("")))
            .join(&file_name),
    };

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent).map_err(|e| DriverError::io(parent, e))?;
    }
    if out_path.exists() {
        fs::remove_file(&out_path).map_err(|e| DriverError::io(&out_path, e))?;
    }
    fs::write(&out_path, output).map_err(|e| DriverError::io(&out_path, e))?;

    info!("convert {} -> {}", relative.display(), file_name);
    Ok(out_path)
}

/// Convert every `.hx` file under `src_dir`, recursively, in sorted
/// path order for deterministic runs. Returns the written paths.
pub fn convert_directory(src_dir: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, DriverError> {
    if !src_dir.is_dir() {
        return Err(DriverError::NotADirectory(src_dir.to_path_buf()));
    }
    let mut sources = Vec::new();
    collect_haxe_files(src_dir, Path::new(""), &mut sources)?;
    sources.sort();

    let mut written = Vec::with_capacity(sources.len());
    for relative in &sources {
        written.push(convert_file(src_dir, relative, out_dir)?);
    }
    Ok(written)
}

fn collect_haxe_files(
    root: &Path,
    relative: &Path,
    found: &mut Vec<PathBuf>,
) -> Result<(), DriverError> {
    let dir = root.join(relative);
    let entries = fs::read_dir(&dir).map_err(|e| DriverError::io(&dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| DriverError::io(&dir, e))?;
        let rel = relative.join(entry.file_name());
        if entry.path().is_dir() {
            collect_haxe_files(root, &rel, found)?;
        } else if rel.extension().is_some_and(|ext| ext == "hx") {
            found.push(rel);
        }
    }
    Ok(())
}
