//! JSON configuration: extra schemes and aliases, traversal defaults and
//! logging.

mod error;

pub use error::{ConfigError, ConfigErrorCode, ConfigResult};

use crate::name::{validate_scheme, NameParser, ParserMode};
use crate::scheme::SchemeRegistry;
use crate::select::{TraversalOptions, TraversalOrder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreConfig {
    pub include_builtin_schemes: bool,
    pub schemes: Vec<SchemeConfig>,
    /// alias -> scheme
    pub aliases: BTreeMap<String, String>,
    pub fallback_scheme: Option<String>,
    pub traversal: TraversalConfig,
    pub logging: LoggingConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            include_builtin_schemes: true,
            schemes: Vec::new(),
            aliases: BTreeMap::new(),
            fallback_scheme: None,
            traversal: TraversalConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeConfig {
    pub scheme: String,
    #[serde(default)]
    pub default_port: Option<u16>,
    #[serde(default = "default_parser_mode")]
    pub mode: ParserMode,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub replacement: Option<String>,
}

fn default_parser_mode() -> ParserMode {
    ParserMode::GenericUrl
}

impl SchemeConfig {
    fn parser(&self) -> NameParser {
        match (self.mode, self.default_port) {
            (ParserMode::PathOnly, _) => NameParser::path_only(),
            (ParserMode::GenericUrl, Some(port)) => NameParser::generic_url(port),
            (ParserMode::GenericUrl, None) => NameParser::generic_url_without_port(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraversalConfig {
    pub order: TraversalOrder,
    pub max_results: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` adds to it.
    pub level: String,
    /// Log to `<log_dir>/vfs-select.log` instead of stderr.
    pub log_dir: Option<PathBuf>,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            ansi: false,
        }
    }
}

impl CoreConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(raw).map_err(|err| {
            ConfigError::new(
                ConfigErrorCode::InvalidFormat,
                format!("Invalid configuration: {err}"),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            ConfigError::new(
                ConfigErrorCode::ReadFailed,
                format!("Failed to read {}: {err}", path.display()),
            )
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for entry in &self.schemes {
            validate_scheme(&entry.scheme)
                .map_err(|err| ConfigError::invalid_value(err.to_string()))?;
            if entry.mode == ParserMode::PathOnly && entry.default_port.is_some() {
                return Err(ConfigError::invalid_value(format!(
                    "Path-only scheme '{}' cannot have a default port",
                    entry.scheme
                )));
            }
            if entry.deprecated && entry.replacement.is_none() {
                return Err(ConfigError::invalid_value(format!(
                    "Deprecated scheme '{}' needs a replacement",
                    entry.scheme
                )));
            }
        }
        for alias in self.aliases.keys() {
            validate_scheme(alias).map_err(|err| ConfigError::invalid_value(err.to_string()))?;
        }
        if self.traversal.max_results == Some(0) {
            return Err(ConfigError::invalid_value("maxResults must be greater than 0"));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid_value("Logging level cannot be empty"));
        }
        Ok(())
    }

    /// Builds a registry from the built-in table (when enabled) plus the
    /// configured schemes, aliases and fallback. Deprecated entries are added
    /// last so their replacements can be declared anywhere in the list.
    pub fn build_registry(&self) -> ConfigResult<SchemeRegistry> {
        let mut registry = if self.include_builtin_schemes {
            SchemeRegistry::with_builtins()
        } else {
            SchemeRegistry::new()
        };

        let (deprecated, current): (Vec<&SchemeConfig>, Vec<&SchemeConfig>) =
            self.schemes.iter().partition(|entry| entry.deprecated);
        for entry in current {
            registry
                .register(&entry.scheme, entry.parser())
                .map_err(|err| ConfigError::invalid_value(err.to_string()))?;
        }
        for entry in deprecated {
            let replacement = entry.replacement.as_deref().unwrap_or_default();
            registry
                .register_deprecated(&entry.scheme, entry.parser(), replacement)
                .map_err(|err| ConfigError::invalid_value(err.to_string()))?;
        }
        for (alias, scheme) in &self.aliases {
            registry
                .register_alias(alias, scheme)
                .map_err(|err| ConfigError::invalid_value(err.to_string()))?;
        }
        if let Some(fallback) = &self.fallback_scheme {
            registry
                .set_fallback_scheme(fallback)
                .map_err(|err| ConfigError::invalid_value(err.to_string()))?;
        }
        Ok(registry)
    }

    pub fn traversal_options(&self) -> TraversalOptions {
        TraversalOptions {
            order: self.traversal.order,
            max_results: self.traversal.max_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::time::{Duration, SystemTime};

    #[test]
    fn empty_document_uses_defaults() {
        let config = CoreConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(config.include_builtin_schemes);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.traversal_options(), TraversalOptions::default());
    }

    #[test]
    fn builds_registry_with_custom_schemes() {
        let config = CoreConfig::from_json_str(
            r#"{
                "schemes": [
                    { "scheme": "legacy", "defaultPort": 8081, "deprecated": true, "replacement": "modern" },
                    { "scheme": "modern", "defaultPort": 8080 },
                    { "scheme": "vault", "mode": "pathOnly" }
                ],
                "aliases": { "mod": "modern" },
                "fallbackScheme": "file",
                "traversal": { "order": "postOrder", "maxResults": 50 }
            }"#,
        )
        .unwrap();
        let registry = config.build_registry().unwrap();

        let name = registry.parse_name("mod://host/a").unwrap();
        assert_eq!(name.scheme(), "modern");
        assert_eq!(name.port(), Some(8080));
        assert_eq!(registry.parse_name("legacy://host/").unwrap().port(), Some(8081));
        assert!(registry.resolve("legacy").unwrap().is_deprecated());
        assert_eq!(registry.parse_name("vault:/x/y").unwrap().path(), "/x/y");
        assert_eq!(registry.parse_name("/tmp/z").unwrap().scheme(), "file");
        assert!(registry.contains("https"));

        let options = config.traversal_options();
        assert_eq!(options.order, TraversalOrder::PostOrder);
        assert_eq!(options.max_results, Some(50));
    }

    #[test]
    fn builtins_can_be_left_out() {
        let config = CoreConfig::from_json_str(
            r#"{
                "includeBuiltinSchemes": false,
                "schemes": [{ "scheme": "mem", "mode": "pathOnly" }]
            }"#,
        )
        .unwrap();
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.schemes(), vec!["mem"]);
    }

    #[test]
    fn rejects_invalid_values() {
        let cases = [
            r#"{ "schemes": [{ "scheme": "9bad" }] }"#,
            r#"{ "schemes": [{ "scheme": "pp", "mode": "pathOnly", "defaultPort": 1 }] }"#,
            r#"{ "schemes": [{ "scheme": "old", "deprecated": true }] }"#,
            r#"{ "traversal": { "maxResults": 0 } }"#,
            r#"{ "logging": { "level": " " } }"#,
        ];
        for raw in cases {
            let err = CoreConfig::from_json_str(raw).expect_err(raw);
            assert_eq!(err.code(), ConfigErrorCode::InvalidValue, "{raw}");
        }

        let err = CoreConfig::from_json_str("{ not json").expect_err("syntax");
        assert_eq!(err.code(), ConfigErrorCode::InvalidFormat);
        let err = CoreConfig::from_json_str(r#"{ "traversal": { "order": "sideways" } }"#)
            .expect_err("unknown order");
        assert_eq!(err.code(), ConfigErrorCode::InvalidFormat);
    }

    #[test]
    fn registry_errors_surface_as_invalid_values() {
        let config = CoreConfig::from_json_str(r#"{ "aliases": { "web": "gopher" } }"#).unwrap();
        let err = config.build_registry().expect_err("unknown alias target");
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);

        let config = CoreConfig::from_json_str(r#"{ "fallbackScheme": "nope" }"#).unwrap();
        assert!(config.build_registry().is_err());
    }

    #[test]
    fn load_reads_files() {
        let ts = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_nanos();
        let path = env::temp_dir().join(format!("vfs-select-config-{ts}.json"));
        std::fs::write(&path, r#"{ "logging": { "level": "debug", "ansi": true } }"#).unwrap();
        let config = CoreConfig::load(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.ansi);
        let _ = std::fs::remove_file(&path);

        let err = CoreConfig::load(&path).expect_err("removed");
        assert_eq!(err.code(), ConfigErrorCode::ReadFailed);
    }
}
