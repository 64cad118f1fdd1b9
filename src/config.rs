use serde::Deserialize;
use std::path::Path;

/// Used when neither CONFIG_FILE nor this file exists.
pub const DEFAULT_CONFIG_PATH: &str = "appmonitor.toml";

/// Output target meaning standard output.
pub const STDOUT: &str = "-";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// tracing EnvFilter directive; RUST_LOG takes precedence.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// "-" for stdout, otherwise a file path the report is written to.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

fn default_output() -> String {
    STDOUT.into()
}

impl ReportConfig {
    pub fn writes_to_stdout(&self) -> bool {
        self.output == STDOUT
    }
}

impl AppConfig {
    /// Load from CONFIG_FILE if set (must exist), else `appmonitor.toml` if present, else defaults.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_path(&path),
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::load_from_path(DEFAULT_CONFIG_PATH)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("config {}: {}", path.display(), e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.logging.filter.trim().is_empty(),
            "logging.filter must be non-empty"
        );
        anyhow::ensure!(
            !self.report.output.trim().is_empty(),
            "report.output must be non-empty (use \"-\" for stdout)"
        );
        Ok(())
    }
}
