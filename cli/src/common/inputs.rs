use std::fs;
use std::path::{Path, PathBuf};

use errors::*;

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.starts_with('.'))
}

fn directory_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .chain_err(|| format!("Error reading input directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .chain_err(|| format!("Error reading input directory {}", dir.display()))?
            .path();
        if path.is_file() && !is_hidden(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Expands the `--input` arguments into the list of files to read, in order.
///
/// A directory contributes the regular files directly inside it, sorted by name, skipping
/// hidden ones. Any other path is kept as given, so a missing file is reported by the engine
/// when it is opened.
pub fn discover_inputs(inputs: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            let found = directory_files(path)?;
            if found.is_empty() {
                warn!("Input directory {} holds no files", path.display());
            }
            files.extend(found);
        } else {
            files.push(path.to_path_buf());
        }
    }
    debug!("Discovered {} input files", files.len());
    Ok(files)
}
