//! Where rxview keeps its settings.
//!
//! A project scope lives in a `.rxview/` directory found by walking up from
//! the working directory; the global scope lives in the platform config dir.

use crate::error::{Result, RxviewError};
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};

pub const PROJECT_DIR: &str = ".rxview";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Project,
    Global,
}

#[derive(Debug, Clone)]
pub struct RxviewPaths {
    pub project: PathBuf,
    pub global: PathBuf,
}

impl RxviewPaths {
    /// Resolves the project dir from `cwd` and the global dir from the platform.
    pub fn discover(cwd: &Path) -> Result<Self> {
        let project = find_project_root(cwd)
            .unwrap_or_else(|| cwd.to_path_buf())
            .join(PROJECT_DIR);
        let global = ProjectDirs::from("com", "rxview", "rxview")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| RxviewError::Api("Could not determine config dir".to_string()))?;
        Ok(Self { project, global })
    }

    pub fn scope_dir(&self, scope: Scope) -> &Path {
        match scope {
            Scope::Project => &self.project,
            Scope::Global => &self.global,
        }
    }
}

/// Walks up from `cwd` to the nearest directory holding a `.rxview/`.
/// Stops at the home directory or the filesystem root.
pub fn find_project_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return Some(current);
        }

        if home_dir.as_ref() == Some(&current) {
            return None;
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent.to_path_buf(),
            _ => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_nearest_ancestor() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("repo");
        let nested = root.join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(root.join(PROJECT_DIR)).unwrap();

        assert_eq!(find_project_root(&nested), Some(root.clone()));
        assert_eq!(find_project_root(&root), Some(root));
    }

    #[test]
    fn child_project_wins_over_parent() {
        let temp = TempDir::new().unwrap();
        let parent = temp.path().join("parent");
        let child = parent.join("child");
        fs::create_dir_all(child.join(PROJECT_DIR)).unwrap();
        fs::create_dir(parent.join(PROJECT_DIR)).unwrap();

        assert_eq!(find_project_root(&child), Some(child));
    }

    #[test]
    fn plain_file_named_like_the_dir_does_not_count() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("repo");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(PROJECT_DIR), "").unwrap();

        assert_ne!(find_project_root(&dir), Some(dir));
    }

    #[test]
    fn scope_dir_selects_path() {
        let paths = RxviewPaths {
            project: PathBuf::from("/work/.rxview"),
            global: PathBuf::from("/home/u/.config/rxview"),
        };
        assert_eq!(paths.scope_dir(Scope::Project), Path::new("/work/.rxview"));
        assert_eq!(
            paths.scope_dir(Scope::Global),
            Path::new("/home/u/.config/rxview")
        );
    }
}
