use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "memehoard.toml";

/// Environment prefix for overrides, nested keys are separated by `__`
/// (e.g. `MEMEHOARD_FETCH__TARGET_COUNT=20`).
const ENV_PREFIX: &str = "MEMEHOARD_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(Figment::new().merge(Toml::file(path)))
}

/// Load configuration from an optional explicit path.
///
/// An explicit path must exist. Without one, `memehoard.toml` is used when
/// present, otherwise the built-in defaults. Environment overrides apply in
/// every case.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.exists() {
                load_config(fallback)
            } else {
                extract(Figment::from(Serialized::defaults(Config::default())))
            }
        }
    }
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[fetch]
target_count = 25

[optimize]
quality = 70
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.fetch.target_count, 25);
        assert_eq!(config.optimize.quality, 70);
    }

    #[test]
    fn test_load_config_from_str_wrong_type() {
        let toml = r#"
[fetch]
batch_size = "lots"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/memehoard.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_or_default_explicit_missing_path() {
        let result = load_config_or_default(Some(Path::new("/nonexistent/memehoard.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[paths]
output_dir = "out/memes"

[fetch]
channels = ["wholesomememes"]
stagnation_limit = 3
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.paths.output_dir.to_str().unwrap(), "out/memes");
        assert_eq!(config.fetch.channels, vec!["wholesomememes"]);
        assert_eq!(config.fetch.stagnation_limit, 3);
        assert_eq!(config.fetch.batch_size, 50);
    }
}
