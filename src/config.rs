use std::env;
use std::path::PathBuf;

/// Session settings gathered from flags, with environment fallbacks.
///
/// Environment variables:
/// - JOBBOARD_DARK: start in dark theme ("1", "true", "yes")
/// - JOBBOARD_LOG_DIR: where log files go (default: the platform data dir)
/// - JOBBOARD_LOG: tracing filter directive (default: "info")
#[derive(Debug, Clone)]
pub struct Config {
    pub dark_theme: bool,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn resolve(dark_flag: bool, log_dir_flag: Option<PathBuf>) -> Self {
        let dark_theme = dark_flag || env::var("JOBBOARD_DARK").map(|v| is_truthy(&v)).unwrap_or(false);

        let log_dir = match log_dir_flag {
            Some(dir) => dir,
            None => match env::var("JOBBOARD_LOG_DIR") {
                Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => Self::default_log_dir(),
            },
        };

        Self { dark_theme, log_dir }
    }

    fn default_log_dir() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "jobboard") {
            proj_dirs.data_dir().join("logs")
        } else {
            PathBuf::from("logs")
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
