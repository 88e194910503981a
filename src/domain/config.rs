use std::{
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// The name of the configuration file in the catalog root.
pub const FILE_NAME: &str = "courseinfo.toml";

/// Configuration for a course catalog.
///
/// This struct holds settings that control where records are stored and how
/// the store behaves when several processes write to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Path of the `SQLite` database file.
    ///
    /// Relative paths are resolved against the catalog root.
    database: PathBuf,

    /// How long a write waits for another writer's lock before failing, in
    /// milliseconds.
    busy_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        Self::parse(&content)
    }

    /// Loads `courseinfo.toml` from the catalog root, falling back to the
    /// defaults only if there is no such file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(root: &Path) -> Result<Self, String> {
        let path = root.join(FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No {FILE_NAME} in {}, using defaults", root.display());
                Ok(Self::default())
            }
            Err(e) => Err(format!("Failed to read config file: {e}")),
        }
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The configured database path, resolved against `root` if relative.
    #[must_use]
    pub fn database_path(&self, root: &Path) -> PathBuf {
        root.join(&self.database)
    }

    /// Sets the database path.
    pub fn set_database(&mut self, database: PathBuf) {
        self.database = database;
    }

    /// The busy timeout for contended writes, in milliseconds.
    #[must_use]
    pub const fn busy_timeout_ms(&self) -> u64 {
        self.busy_timeout_ms
    }
}

fn default_database() -> PathBuf {
    PathBuf::from("courseinfo.sqlite3")
}

const fn default_busy_timeout_ms() -> u64 {
    5000
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_database")]
        database: PathBuf,

        #[serde(default = "default_busy_timeout_ms")]
        busy_timeout_ms: u64,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                database,
                busy_timeout_ms,
            } => Self {
                database,
                busy_timeout_ms,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            database: config.database,
            busy_timeout_ms: config.busy_timeout_ms,
        }
    }
}
