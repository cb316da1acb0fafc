use std::fs;
use std::path::Path;

use anyhow::Context;
use decimal_id::Strategy;

pub mod tracing;
pub use tracing::TracingConfig;

/// The file [`Config::load()`] falls back to if no path was given.
pub const DEFAULT_PATH: &str = "./idconv.toml";

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Configuration for [`tracing-subscriber`].
    pub tracing: TracingConfig,

    pub conversion: ConversionConfig,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConversionConfig {
    /// Whether to use 64-bit arithmetic, digit strings, or both.
    pub strategy: Strategy,
}

impl Config {
    /// Reads the configuration from `path`, or from [`DEFAULT_PATH`] if it exists.
    ///
    /// If neither is available, the default configuration is used.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::read(path);
        }

        let default_path = Path::new(DEFAULT_PATH);

        if fs::exists(default_path).context("failed to check for configuration file")? {
            Self::read(default_path)
        } else {
            Ok(Self::default())
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration file `{}`", path.display()))
            .and_then(|text| text.parse())
    }
}

impl std::str::FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("failed to parse configuration file")
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = "".parse::<Config>().unwrap();

        assert!(config.tracing.enable);
        assert!(config.tracing.stderr.enable);
        assert!(!config.tracing.files.enable);
        assert_eq!(config.conversion.strategy, Strategy::Auto);
    }

    #[test]
    fn full_file() {
        let config = r#"
            [tracing]
            enable = true

            [tracing.stderr]
            enable = false
            ansi = false

            [tracing.files]
            enable = true
            directory = "/tmp/idconv-logs"

            [conversion]
            strategy = "digit-string"
        "#
        .parse::<Config>()
        .unwrap();

        assert!(!config.tracing.stderr.enable);
        assert!(!config.tracing.stderr.ansi);
        assert!(config.tracing.files.enable);
        assert_eq!(config.tracing.files.directory, PathBuf::from("/tmp/idconv-logs"));
        assert_eq!(config.conversion.strategy, Strategy::DigitString);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!("[conversion]\noffset = 1\n".parse::<Config>().is_err());
        assert!("[conversion]\nstrategy = \"fast\"\n".parse::<Config>().is_err());
        assert!("[logging]\n".parse::<Config>().is_err());
    }

    #[test]
    fn missing_file() {
        let path = Path::new("/this/path/does/not/exist/idconv.toml");
        assert!(Config::load(Some(path)).is_err());
    }
}
