//! Global serializer defaults, optionally loaded from a TOML file.
//!
//! ```toml
//! [serializer]
//! embed = "ids"
//! id_field = "uuid"
//! meta_key = "extra"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::association::EmbedMode;
use crate::options::{DEFAULT_META_KEY, Options};
use crate::Result;

/// Field read off related objects in id-only mode when none is given.
pub const DEFAULT_ID_FIELD: &str = "id";

/// Process-wide defaults for schemas and serialization calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    /// Embed mode for associations whose type declares none.
    pub embed: EmbedMode,
    pub id_field: String,
    pub meta_key: String,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            embed: EmbedMode::Objects,
            id_field: DEFAULT_ID_FIELD.to_owned(),
            meta_key: DEFAULT_META_KEY.to_owned(),
        }
    }
}

/// Raw TOML structure.
#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    serializer: SerializerConfig,
}

impl SerializerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        Ok(file.serializer)
    }

    /// Loads config from `path`. Falls back to defaults, with a log line,
    /// when the file is missing or invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No serializer config found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded serializer config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse serializer config {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read serializer config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Base per-call options carrying the configured meta key.
    pub fn options(&self) -> Options {
        Options::new().meta_key(self.meta_key.clone())
    }
}
