// Runtime configuration, resolved once in `main` and handed to the
// modules that need it.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://westeurope.api.cognitive.microsoft.com/face/v1.0";
pub const KEY_FILE_NAME: &str = "face.key";

/// Fixed delays of the person-group workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Pause after every face upload attempt (service rate limit).
    pub upload_delay: Duration,
    /// Pause between two training status polls.
    pub poll_interval: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            upload_delay: Duration::from_secs(1),
            poll_interval: Duration::from_secs(5),
        }
    }
}

impl Pacing {
    /// No delays at all. Used by tests.
    pub const fn immediate() -> Self {
        Pacing {
            upload_delay: Duration::ZERO,
            poll_interval: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub key_file: PathBuf,
    pub pacing: Pacing,
}

impl Config {
    /// Build the configuration from `FACE_API_ENDPOINT` and `FACE_KEY_FILE`,
    /// falling back to the public endpoint and a `face.key` file next to
    /// the executable.
    pub fn from_env() -> Self {
        let endpoint = std::env::var("FACE_API_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.into());
        let key_file = std::env::var_os("FACE_KEY_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_key_file);
        Config {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            key_file,
            pacing: Pacing::default(),
        }
    }
}

/// `face.key` in the executable's directory; the home directory (or the
/// current one) when the executable path cannot be resolved.
pub fn default_key_file() -> PathBuf {
    let dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(KEY_FILE_NAME)
}
