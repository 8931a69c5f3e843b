use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::APP_DIR_NAME;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("model file {path} does not exist")]
    ExplicitMissing { path: PathBuf },
    #[error("model {name} not found; searched: {}", format_paths(.searched))]
    NotFound { name: String, searched: Vec<PathBuf> },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Locate a model file by name. Nothing is ever downloaded.
///
/// Resolution order:
/// 1. `explicit`, if given (must exist, no fallback)
/// 2. User data directory (`<data_dir>/FaceRecognition/models/`)
/// 3. Directory containing the running executable
/// 4. Current working directory
pub fn resolve(name: &str, explicit: Option<&Path>) -> Result<PathBuf, ModelResolveError> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(ModelResolveError::ExplicitMissing {
            path: path.to_path_buf(),
        });
    }
    resolve_in(name, &search_dirs())
}

/// Returns the first `dir/name` that exists, in order.
pub fn resolve_in(name: &str, dirs: &[PathBuf]) -> Result<PathBuf, ModelResolveError> {
    let candidates: Vec<PathBuf> = dirs.iter().map(|d| d.join(name)).collect();
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }
    Err(ModelResolveError::NotFound {
        name: name.to_string(),
        searched: candidates,
    })
}

/// Platform-specific model directory.
///
/// - macOS: `~/Library/Application Support/FaceRecognition/models/`
/// - Linux: `$XDG_DATA_HOME/FaceRecognition/models/` or `~/.local/share/FaceRecognition/models/`
/// - Windows: `%APPDATA%/FaceRecognition/models/`
pub fn model_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR_NAME).join("models"))
}

fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = model_data_dir() {
        dirs.push(dir);
    }
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(dir);
    }
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    dirs
}
