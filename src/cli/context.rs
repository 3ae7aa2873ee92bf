use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global data directory path.
/// If `custom` is provided, uses that path; otherwise the per-user config
/// directory, or `.cdnwatch` when the platform has none.
pub fn init(custom: Option<&str>) {
    let dir = custom
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|d| d.join("cdnwatch")))
        .unwrap_or_else(|| PathBuf::from(".cdnwatch"));
    let _ = DATA_DIR.set(dir);
}

/// Get the current data directory path.
pub fn data_dir() -> &'static Path {
    DATA_DIR
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(".cdnwatch"))
}
