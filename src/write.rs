//! Site writing.
//!
//! Stage 3 of the build pipeline. Puts rendered pages and static assets on
//! disk under the output root. Page writes are independent of each other
//! and run from the parallel render loop; asset installation happens once
//! up front.
//!
//! ## Asset layering
//!
//! Assets resolve in two layers: files under `<source>/assets/` are copied
//! verbatim, then the embedded stock stylesheet and placeholder image fill
//! any gap the source tree left. Stock files never overwrite user files, so
//! a site restyles itself by shipping its own `assets/css/style.css`.
//!
//! The default build is in-place (`--source . --output .`), where the
//! source asset tree and the output asset tree are the same directory. The
//! copy phase detects that and skips itself rather than copying files onto
//! themselves.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Root-relative path of the fallback cover image.
pub const PLACEHOLDER_PATH: &str = "assets/images/placeholder.svg";

/// Root-relative path of the stylesheet every page links.
pub const STYLESHEET_PATH: &str = "assets/css/style.css";

const STOCK_STYLESHEET: &str = include_str!("../static/style.css");
const STOCK_PLACEHOLDER: &str = include_str!("../static/placeholder.svg");

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What the asset installation did.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssetReport {
    /// Files copied from the source asset tree.
    pub copied: usize,
    /// Embedded stock files written because the source had no counterpart.
    pub stock_installed: usize,
}

/// Write one rendered page under the output root, creating parent
/// directories as needed. `rel_path` uses forward slashes, as produced by
/// the renderers.
pub fn write_page(output_root: &Path, rel_path: &str, html: &str) -> Result<PathBuf, WriteError> {
    let path = output_root.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, html).map_err(|source| WriteError::WriteFile {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Install static assets under the output root: source asset tree first,
/// stock files for whatever is still missing.
pub fn install_assets(source_root: &Path, output_root: &Path) -> Result<AssetReport, WriteError> {
    let mut report = AssetReport::default();
    let source_assets = source_root.join("assets");
    let output_assets = output_root.join("assets");

    if source_assets.is_dir() && !same_directory(&source_assets, &output_assets) {
        for entry in WalkDir::new(&source_assets)
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = match entry.path().strip_prefix(&source_assets) {
                Ok(rel) => rel,
                Err(_) => continue,
            };
            let dst = output_assets.join(rel);
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::copy(entry.path(), &dst).map_err(|source| WriteError::WriteFile {
                path: dst.clone(),
                source,
            })?;
            report.copied += 1;
        }
    }

    for (rel, content) in [
        (STYLESHEET_PATH, STOCK_STYLESHEET),
        (PLACEHOLDER_PATH, STOCK_PLACEHOLDER),
    ] {
        let dst = output_root.join(rel);
        if dst.exists() {
            continue;
        }
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&dst, content).map_err(|source| WriteError::WriteFile {
            path: dst.clone(),
            source,
        })?;
        report.stock_installed += 1;
    }

    Ok(report)
}

/// True when both paths name the same directory. Canonicalizes when it can;
/// falls back to a lexical comparison when either side does not exist yet.
fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
