// File: ./src/context.rs
//! Where Lania keeps its files.
//!
//! Everything lives in two directories: one for data (the task file and
//! `lania.log`) and one for `config.toml`. An [`AppContext`] only has to
//! say where those two are; every concrete path is derived from them.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "lania.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    Data,
    Config,
}

impl DirKind {
    /// Subdirectory name used under a `--root` override or a test root.
    fn subdir(self) -> &'static str {
        match self {
            DirKind::Data => "data",
            DirKind::Config => "config",
        }
    }
}

pub trait AppContext: std::fmt::Debug {
    /// Returns the directory for `kind`, creating it when missing.
    fn dir(&self, kind: DirKind) -> Result<PathBuf>;

    fn get_data_dir(&self) -> Result<PathBuf> {
        self.dir(DirKind::Data)
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.dir(DirKind::Config)
    }

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// `None` when there is no usable data directory; logging is then skipped.
    fn get_log_path(&self) -> Option<PathBuf> {
        self.get_data_dir().ok().map(|p| p.join(LOG_FILE_NAME))
    }

    /// Resolves the configured task file: absolute paths are used as given,
    /// relative ones land in the data directory.
    fn get_task_file_path(&self, data_file: &Path) -> Result<PathBuf> {
        if data_file.is_absolute() {
            return Ok(data_file.to_path_buf());
        }
        Ok(self.get_data_dir()?.join(data_file))
    }
}

fn create_dir(path: PathBuf) -> Result<PathBuf> {
    std::fs::create_dir_all(&path)
        .with_context(|| format!("Could not create directory '{}'", path.display()))?;
    Ok(path)
}

/// Platform directories, or `<root>/data` and `<root>/config` under `--root`.
#[derive(Clone, Debug)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }
}

impl AppContext for StandardContext {
    fn dir(&self, kind: DirKind) -> Result<PathBuf> {
        let path = match &self.override_root {
            Some(root) => root.join(kind.subdir()),
            None => {
                let proj = ProjectDirs::from("com", "lania", "lania")
                    .context("No home directory to keep Lania's files in")?;
                match kind {
                    DirKind::Data => proj.data_dir().to_path_buf(),
                    DirKind::Config => proj.config_dir().to_path_buf(),
                }
            }
        };
        create_dir(path)
    }
}

/// A throwaway root under the system temp dir, removed on drop.
#[derive(Clone, Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("lania_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).expect("failed to create test root");
        Self { root }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn dir(&self, kind: DirKind) -> Result<PathBuf> {
        create_dir(self.root.join(kind.subdir()))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
