use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// Turn a report destination from the command line or config into a file path.
///
/// An existing directory, or a path ending with a separator, receives a
/// timestamped `quality_report_<timestamp>.<extension>` file. Missing parent
/// directories are created.
pub fn resolve_file_path(path: &str, timestamp: &str, extension: &str) -> Result<PathBuf> {
    let target = Path::new(path);
    let filename = format!("quality_report_{}.{}", timestamp, extension);

    let output_path = if target.exists() {
        if target.is_dir() {
            target.join(&filename)
        } else {
            target.to_path_buf()
        }
    } else if path.ends_with('/') || path.ends_with('\\') {
        fs::create_dir_all(target)
            .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        target.join(filename)
    } else {
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }
        target.to_path_buf()
    };
    Ok(output_path)
}
