use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "FullScreenOverlay";
const CONFIG_FILE: &str = "config.yaml";
const LOG_FILE: &str = "fullscreen-overlay.log";

/// Where a kind of file lives. Config goes under the user's config dir, logs under local data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Config,
    Data,
}

impl Location {
    fn base(self) -> Option<PathBuf> {
        match self {
            Location::Config => dirs::config_dir(),
            Location::Data => dirs::data_local_dir(),
        }
    }

    fn dir(self) -> Option<PathBuf> {
        self.base().map(|base| app_dir(&base))
    }
}

fn app_dir(base: &Path) -> PathBuf {
    base.join(APP_DIR)
}

pub fn log_file_path() -> Option<PathBuf> {
    Location::Data.dir().map(|dir| dir.join(LOG_FILE))
}

pub fn default_config_path() -> Option<PathBuf> {
    Location::Config.dir().map(|dir| dir.join(CONFIG_FILE))
}

/// An explicit path wins. Otherwise fall back to the per-user config file.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    }
}

/// Create the log directory, returning it when it is usable
pub fn ensure_data_dir() -> Option<PathBuf> {
    let dir = Location::Data.dir()?;
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
