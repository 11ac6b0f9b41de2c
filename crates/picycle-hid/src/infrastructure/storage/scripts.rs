//! ScriptLibrary: a directory of saved DuckyScript files.
//!
//! Scripts are plain `.txt` files.  Names coming from the command line are
//! reduced to a bare file name before touching the disk, so a library can
//! never read or write outside its directory.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

const SCRIPT_EXTENSION: &str = "txt";

#[derive(Debug, Error)]
pub enum ScriptStoreError {
    #[error("script {0:?} not found")]
    NotFound(String),

    /// Nothing usable remains after sanitizing.
    #[error("invalid script name {0:?}")]
    InvalidName(String),

    #[error("I/O error accessing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One listed script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptEntry {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct ScriptLibrary {
    root: PathBuf,
}

impl ScriptLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Lists `.txt` scripts sorted case-insensitively.  Dotfiles are skipped
    /// and a missing directory lists as empty.
    pub fn list(&self) -> Result<Vec<ScriptEntry>, ScriptStoreError> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(io_error(&self.root, source)),
        };

        let mut scripts = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| io_error(&self.root, source))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            if name.starts_with('.')
                || path.extension().and_then(|e| e.to_str()) != Some(SCRIPT_EXTENSION)
            {
                continue;
            }
            let metadata = entry
                .metadata()
                .map_err(|source| io_error(&path, source))?;
            if metadata.is_file() {
                scripts.push(ScriptEntry {
                    name,
                    size: metadata.len(),
                });
            }
        }
        scripts.sort_by_key(|s| s.name.to_lowercase());
        Ok(scripts)
    }

    /// Reads a script by name.  Only the final path component of `name` is
    /// used; a missing `.txt` extension is tried as a fallback.
    pub fn load(&self, name: &str) -> Result<String, ScriptStoreError> {
        let path = self.existing_path(name)?;
        std::fs::read_to_string(&path).map_err(|source| io_error(&path, source))
    }

    /// Writes a script, creating the directory.  Returns the stored file name.
    pub fn save(&self, name: &str, content: &str) -> Result<String, ScriptStoreError> {
        let file_name = sanitize_name(name)?;
        std::fs::create_dir_all(&self.root).map_err(|source| io_error(&self.root, source))?;

        let path = self.root.join(&file_name);
        std::fs::write(&path, content).map_err(|source| io_error(&path, source))?;
        info!(script = %file_name, bytes = content.len(), "saved script");
        Ok(file_name)
    }

    pub fn delete(&self, name: &str) -> Result<(), ScriptStoreError> {
        let path = self.existing_path(name)?;
        std::fs::remove_file(&path).map_err(|source| io_error(&path, source))?;
        info!(script = %path.display(), "deleted script");
        Ok(())
    }

    fn existing_path(&self, name: &str) -> Result<PathBuf, ScriptStoreError> {
        let base = basename(name).ok_or_else(|| ScriptStoreError::InvalidName(name.to_string()))?;
        let candidates = [
            self.root.join(base),
            self.root.join(format!("{base}.{SCRIPT_EXTENSION}")),
        ];
        candidates
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| ScriptStoreError::NotFound(base.to_string()))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ScriptStoreError {
    ScriptStoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn basename(name: &str) -> Option<&str> {
    let base = name.rsplit(['/', '\\']).next()?.trim();
    match base {
        "" | "." | ".." => None,
        b => Some(b),
    }
}

/// Keeps `[A-Za-z0-9_.-]`, strips leading dots, and appends `.txt`.
pub fn sanitize_name(name: &str) -> Result<String, ScriptStoreError> {
    let base = basename(name).unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        return Err(ScriptStoreError::InvalidName(name.to_string()));
    }

    let suffix = format!(".{SCRIPT_EXTENSION}");
    if cleaned.to_ascii_lowercase().ends_with(&suffix) {
        Ok(cleaned.to_string())
    } else {
        Ok(format!("{cleaned}{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_library() -> (ScriptLibrary, PathBuf) {
        let dir = std::env::temp_dir().join(format!("picycle-scripts-{}", Uuid::new_v4()));
        (ScriptLibrary::new(&dir), dir)
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("hello").unwrap(), "hello.txt");
        assert_eq!(sanitize_name("open term!.txt").unwrap(), "openterm.txt");
        assert_eq!(sanitize_name("../../etc/passwd").unwrap(), "passwd.txt");
        assert_eq!(sanitize_name(".hidden").unwrap(), "hidden.txt");
        assert!(matches!(sanitize_name("..."), Err(ScriptStoreError::InvalidName(_))));
        assert!(matches!(sanitize_name("/"), Err(ScriptStoreError::InvalidName(_))));
    }

    #[test]
    fn test_missing_directory_lists_empty() {
        let (lib, _) = temp_library();
        assert!(lib.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_list_load_delete() {
        // Arrange
        let (lib, dir) = temp_library();
        lib.save("beta", "STRING b").unwrap();
        lib.save("Alpha.txt", "STRING a").unwrap();
        std::fs::write(dir.join(".secret.txt"), "x").unwrap();
        std::fs::write(dir.join("notes.md"), "x").unwrap();

        // Act
        let listed = lib.list().unwrap();

        // Assert
        let names: Vec<&str> = listed.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha.txt", "beta.txt"]);
        assert_eq!(listed[1].size, 8);
        assert_eq!(lib.load("beta").unwrap(), "STRING b");
        assert_eq!(lib.load("beta.txt").unwrap(), "STRING b");

        lib.delete("beta").unwrap();
        assert!(matches!(lib.load("beta"), Err(ScriptStoreError::NotFound(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_ignores_directory_components() {
        let (lib, dir) = temp_library();
        lib.save("payload", "ENTER").unwrap();

        assert_eq!(lib.load("../../somewhere/payload").unwrap(), "ENTER");
        assert!(matches!(lib.load(".."), Err(ScriptStoreError::InvalidName(_))));
        std::fs::remove_dir_all(&dir).ok();
    }
}
