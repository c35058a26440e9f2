use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// The slice of `package.json` this buildpack cares about: whether a start
/// script is declared and what it runs.
#[derive(Debug, Default, Deserialize)]
pub struct PackageJson {
    #[serde(default)]
    pub scripts: Scripts,
}

#[derive(Debug, Default, Deserialize)]
pub struct Scripts {
    pub start: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum PackageJsonError {
    /// The descriptor file does not exist. Callers treat this as
    /// non-applicability rather than a hard failure.
    #[error("no 'package.json' in {0}")]
    Missing(PathBuf),
    #[error("IO Error: {0}")]
    Io(#[source] io::Error),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PackageJson {
    /// Read `<project_dir>/package.json`.
    pub fn read(project_dir: &Path) -> Result<PackageJson, PackageJsonError> {
        let path = project_dir.join("package.json");
        let file = File::open(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                PackageJsonError::Missing(project_dir.to_path_buf())
            } else {
                PackageJsonError::Io(e)
            }
        })?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn has_start_script(&self) -> bool {
        self.scripts.start.is_some()
    }

    pub fn start_script(&self) -> Option<&str> {
        self.scripts.start.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_start_script() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "app", "scripts": {"start": "node server.js", "test": "jest"}}"#,
        )
        .unwrap();

        let pkg = PackageJson::read(dir.path()).unwrap();
        assert!(pkg.has_start_script());
        assert_eq!(pkg.start_script(), Some("node server.js"));
    }

    #[test]
    fn tolerates_missing_scripts_block() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "app"}"#).unwrap();

        let pkg = PackageJson::read(dir.path()).unwrap();
        assert!(!pkg.has_start_script());
    }

    #[test]
    fn missing_file_is_its_own_variant() {
        let dir = tempdir().unwrap();
        assert_matches!(
            PackageJson::read(dir.path()),
            Err(PackageJsonError::Missing(_))
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{not json").unwrap();

        assert_matches!(PackageJson::read(dir.path()), Err(PackageJsonError::Json(_)));
    }
}
