use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Resolve the project root for an application directory.
///
/// `project_path` is the raw `BP_NODE_PROJECT_PATH` value: a path relative to
/// the working directory pointing at the project in monorepo-style layouts.
/// When set, the resulting directory must exist.
pub fn find_project_path(
    working_dir: &Path,
    project_path: Option<&str>,
) -> Result<PathBuf, anyhow::Error> {
    match project_path {
        None => Ok(working_dir.to_path_buf()),
        Some(relative) => {
            let path = working_dir.join(relative);
            fs::metadata(&path)
                .with_context(|| format!("could not find project path {}", path.display()))?;
            Ok(path)
        }
    }
}
