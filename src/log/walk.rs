//! Deterministic recursive file listing.
//!
//! Within every directory the files come first, sorted by name, followed by
//! each subdirectory (also sorted by name) expanded the same way. Symlinks to
//! directories are not followed.

use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// List every file under `root`.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    visit(root, &mut out)?;
    Ok(out)
}

fn visit(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();

    let entries =
        fs::read_dir(dir).with_context(|| format!("read log directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("list log directory {}", dir.display()))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("stat {}", path.display()))?;

        if file_type.is_dir() {
            dirs.push(path);
        } else if file_type.is_symlink() && path.is_dir() {
            tracing::debug!("not following directory symlink {}", path.display());
        } else {
            files.push(path);
        }
    }

    files.sort();
    dirs.sort();

    out.extend(files);
    for sub in dirs {
        visit(&sub, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn files_before_subdirs_all_sorted() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for rel in ["zz/b.log", "zz/a.log", "c.log", "aa/x.log", "a.log", "aa/deep/y.log"] {
            touch(root, rel);
        }

        let got: Vec<String> = collect_files(root)
            .unwrap()
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(
            got,
            vec!["a.log", "c.log", "aa/x.log", "aa/deep/y.log", "zz/a.log", "zz/b.log"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlinks_are_not_followed() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("logs");
        touch(&root, "a.log");
        touch(dir.path(), "elsewhere/hidden.log");
        std::os::unix::fs::symlink(dir.path().join("elsewhere"), root.join("linked")).unwrap();

        let got: Vec<PathBuf> = collect_files(&root).unwrap();
        assert_eq!(got, vec![root.join("a.log")]);
    }

    #[test]
    fn empty_tree() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        assert!(collect_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = collect_files(&dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("read log directory"));
    }
}
