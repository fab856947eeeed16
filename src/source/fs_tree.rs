//! Directory trees loaded one level at a time.

use super::SourceError;
use crate::view_state::{Tree, TreeBuilder};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One file system entry in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

impl FsEntry {
    /// Describe `path`, following symlinks to decide whether it is a directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let is_dir = path.is_dir();
        Self { path, name, is_dir }
    }

    /// Full path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last path component.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

impl fmt::Display for FsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dir {
            write!(f, "{}/", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Lists directory contents when a node is first expanded.
///
/// Children are sorted directories first, then by name. Hidden entries
/// (leading `.`) are left out unless `show_hidden` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTreeBuilder {
    /// Include dot files.
    pub show_hidden: bool,
}

impl TreeBuilder<FsEntry> for FsTreeBuilder {
    fn can_expand(&self, data: &FsEntry) -> bool {
        data.is_dir
    }

    fn children(&self, data: &FsEntry) -> Vec<FsEntry> {
        let entries = match fs::read_dir(&data.path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %data.path.display(), error = %e, "Cannot list directory");
                return Vec::new();
            }
        };
        let mut children: Vec<FsEntry> = entries
            .filter_map(Result::ok)
            .map(|entry| FsEntry::new(entry.path()))
            .filter(|entry| self.show_hidden || !entry.name.starts_with('.'))
            .collect();
        children.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
        children
    }
}

/// Tree rooted at `dir` with its first level loaded.
///
/// # Errors
/// Returns `SourceError::FileNotFound` if `dir` is missing and
/// `SourceError::NotADirectory` if it is a file.
pub fn open_tree(dir: &Path, builder: &FsTreeBuilder) -> Result<Tree<FsEntry>, SourceError> {
    if !dir.exists() {
        return Err(SourceError::FileNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(SourceError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    let mut tree = Tree::new(FsEntry::new(dir));
    let root = tree.root();
    tree.load_children(root, builder);
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vport_fs_tree_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::write(dir.join("b.txt"), "b").unwrap();
        fs::write(dir.join("a.txt"), "a").unwrap();
        fs::write(dir.join(".hidden"), "h").unwrap();
        fs::write(dir.join("sub").join("inner.txt"), "i").unwrap();
        dir
    }

    #[test]
    fn directories_sort_first_and_hidden_are_skipped() {
        let dir = scratch("order");
        let builder = FsTreeBuilder::default();
        let tree = open_tree(&dir, &builder).unwrap();
        let names: Vec<String> = tree
            .children(tree.root())
            .iter()
            .map(|&id| tree.data(id).unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["sub/", "a.txt", "b.txt"]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn show_hidden_includes_dot_files() {
        let dir = scratch("hidden");
        let builder = FsTreeBuilder { show_hidden: true };
        let tree = open_tree(&dir, &builder).unwrap();
        assert_eq!(tree.children(tree.root()).len(), 4);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn subdirectories_load_on_expand() {
        let dir = scratch("lazy");
        let builder = FsTreeBuilder::default();
        let mut tree = open_tree(&dir, &builder).unwrap();
        let sub = tree.children(tree.root())[0];
        assert!(tree.can_expand(sub, &builder));
        assert!(!tree.has_children(sub));
        assert!(tree.expand_with(sub, &builder));
        assert_eq!(tree.children(sub).len(), 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn files_are_rejected_as_roots() {
        let dir = scratch("file_root");
        let result = open_tree(&dir.join("a.txt"), &FsTreeBuilder::default());
        assert!(matches!(result, Err(SourceError::NotADirectory { .. })));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_roots_are_rejected() {
        let result = open_tree(Path::new("/nonexistent/vport"), &FsTreeBuilder::default());
        assert!(matches!(result, Err(SourceError::FileNotFound { .. })));
    }
}
