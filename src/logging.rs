use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;

/// `<cache_dir>/starshapes/starshapes.log`
pub fn default_log_path() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("starshapes").join("starshapes.log")
}

/// Route `tracing` output to a file so it never lands on the TUI's screen.
///
/// Returns `false` when the file cannot be opened; the app then runs without logs.
pub fn init(path: &Path, level: Level) -> bool {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritable_path_reports_no_logging() {
        let blocker = std::env::temp_dir().join(format!("starshapes-log-{}", std::process::id()));
        fs::write(&blocker, b"not a directory").unwrap();
        assert!(!init(&blocker.join("starshapes.log"), Level::INFO));
        let _ = fs::remove_file(&blocker);
    }
}
