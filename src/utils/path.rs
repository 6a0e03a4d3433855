//! Path utilities: expand ~, normalise user-supplied data file names.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Resolve a path typed by the user into the data file path to use:
/// `~` is expanded and `.csv` is appended when no extension is given.
pub fn normalize_data_path(input: &str) -> String {
    let mut p = expand_tilde(input.trim());
    if p.extension().is_none() && p.file_name().is_some() {
        p.set_extension("csv");
    }
    p.to_string_lossy().to_string()
}
