use crate::error::{JoplError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration persisted between runs, stored in the user config dir.
///
/// The core never touches this file on its own; the CLI loads it before
/// connecting and writes it back after a first-run pairing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoplConfig {
    /// Access token for the data API, minted by the pairing handshake.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl JoplConfig {
    /// The user-scoped directory holding config.json.
    pub fn config_dir() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "jopl", "jopl")
            .ok_or_else(|| JoplError::Config("could not determine config directory".into()))?;
        Ok(dirs.config_dir().to_path_buf())
    }

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(JoplError::Io)?;
        let config: JoplConfig =
            serde_json::from_str(&content).map_err(JoplError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory, restricting the file to owner
    /// read/write — it holds a credential.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(JoplError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(JoplError::Serialization)?;
        fs::write(&config_path, content).map_err(JoplError::Io)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&config_path, fs::Permissions::from_mode(0o600))
                .map_err(JoplError::Io)?;
        }

        Ok(())
    }
}
