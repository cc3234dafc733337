//! Configuration for relui-daemon

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Workflow template configuration
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Dispatch topic configuration
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub listen_addr: SocketAddr,

    /// Directory static assets are served from
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            static_dir: default_static_dir(),
        }
    }
}

/// Workflow template configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Directory holding template documents
    #[serde(default = "default_templates_dir")]
    pub dir: PathBuf,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: default_templates_dir(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// In-memory storage (for development/testing)
    #[default]
    Memory,

    /// One JSON document per run in a directory
    File {
        /// Directory runs are written to
        path: PathBuf,
    },
}

/// Dispatch topic configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Topic name dispatch requests are published on
    #[serde(default = "default_topic")]
    pub topic: String,

    /// How long a start-task request waits for the publish acknowledgment
    #[serde(default = "default_ack_timeout")]
    pub ack_timeout_secs: u64,

    /// Transport carrying published messages
    #[serde(default)]
    pub transport: TransportConfig,
}

impl DispatchConfig {
    pub fn ack_timeout(&self) -> Duration {
        Duration::from_secs(self.ack_timeout_secs)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            topic: default_topic(),
            ack_timeout_secs: default_ack_timeout(),
            transport: TransportConfig::default(),
        }
    }
}

/// Dispatch transport
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// In-process topic, acknowledged locally
    #[default]
    Memory,

    /// Push each message to a worker endpoint over HTTP
    Http {
        /// Endpoint URL
        endpoint: String,
    },
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("workflows")
}

fn default_topic() -> String {
    "relui-tasks".to_string()
}

fn default_ack_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Load configuration from defaults, an optional file and `RELUI__*` environment variables
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&DaemonConfig::default())?);

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // e.g. RELUI__SERVER__STATIC_DIR, RELUI__DISPATCH__ACK_TIMEOUT_SECS
        builder = builder.add_source(
            config::Environment::with_prefix("RELUI")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the daemon unusable
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.dispatch.ack_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "dispatch.ack_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve a relative asset directory
///
/// The daemon may be started from the workspace root or from its own crate
/// directory; relative paths that do not exist in the working directory are
/// tried against the crate directory.
pub fn resolve_relative(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    let in_crate = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
    if in_crate.exists() {
        in_crate
    } else {
        path.to_path_buf()
    }
}
