use crate::error::{ConfigError, ConfigErrorKind};
use crate::hardening::{MAX_SVG_SIZE_ENV, MAX_SVG_SIZE_PROPERTY};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

// leading integer with optional sign, the rest of the input is ignored
static LEADING_INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").unwrap());

/// Configuration as handed to the validator. Every level may be absent.
///
/// ```toml
/// [limits.preview]
/// maxSVGSize = 40960
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub limits: Option<Limits>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Limits {
    #[serde(default)]
    pub preview: Option<PreviewLimits>,
}

/// Preview limits keyed by property name (e.g. `maxSVGSize`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PreviewLimits(pub HashMap<String, LimitValue>);

/// A configured limit, as loosely typed as the source it came from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LimitValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl LimitValue {
    /// Parses the value as a base-10 integer, taking the leading digits of text.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            LimitValue::Integer(i) => Some(*i),
            LimitValue::Float(f) if f.is_finite() => {
                let t = f.trunc();
                if t >= i64::MIN as f64 && t <= i64::MAX as f64 { Some(t as i64) } else { None }
            }
            LimitValue::Float(_) => None,
            LimitValue::Text(s) => LEADING_INT_RE
                .captures(s)
                .and_then(|cap| cap[1].parse::<i64>().ok()),
            LimitValue::Other(_) => None,
        }
    }
}

impl From<i64> for LimitValue {
    fn from(v: i64) -> Self { LimitValue::Integer(v) }
}

impl From<&str> for LimitValue {
    fn from(v: &str) -> Self { LimitValue::Text(v.to_string()) }
}

impl Config {
    /// Loads a `.toml` or `.json` configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let wrap = |source| ConfigError::File { path: path.to_path_buf(), source };

        let data = std::fs::read_to_string(path).map_err(|e| wrap(ConfigErrorKind::Read(e)))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&data).map_err(|e| wrap(ConfigErrorKind::ParseToml(e))),
            Some("json") => Self::from_json_str(&data).map_err(|e| wrap(ConfigErrorKind::ParseJson(e))),
            _ => Err(wrap(ConfigErrorKind::UnsupportedFormat)),
        }
    }

    pub fn from_toml_str(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(data)
    }

    pub fn from_json_str(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// Builds a configuration from `SVG_MAX_SIZE` (a `.env` file is honored).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::from_filename(".env");

        let mut cfg = Self::default();
        match std::env::var(MAX_SVG_SIZE_ENV) {
            Ok(v) => cfg = cfg.with_limit(MAX_SVG_SIZE_PROPERTY, v.as_str()),
            Err(std::env::VarError::NotPresent) => {}
            Err(e) => return Err(ConfigError::InvalidEnv(MAX_SVG_SIZE_ENV.to_string(), e.to_string())),
        }

        Ok(cfg)
    }

    /// Sets `limits.preview.<property>`, creating the intermediate levels.
    pub fn with_limit(mut self, property: &str, value: impl Into<LimitValue>) -> Self {
        let preview = self
            .limits
            .get_or_insert_with(Limits::default)
            .preview
            .get_or_insert_with(PreviewLimits::default);
        preview.0.insert(property.to_string(), value.into());
        self
    }

    /// Overlays the preview limits of `other` on top of ours.
    pub fn merge(mut self, other: Config) -> Self {
        let Some(preview) = other.limits.and_then(|l| l.preview) else {
            return self;
        };
        for (property, value) in preview.0 {
            self = self.with_limit(&property, value);
        }
        self
    }

    /// Looks up `limits.preview.<property>`.
    pub fn preview_limit(&self, property: &str) -> Option<&LimitValue> {
        self.limits.as_ref()?.preview.as_ref()?.0.get(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_integer_parsing() {
        assert_eq!(LimitValue::from("123").as_integer(), Some(123));
        assert_eq!(LimitValue::from("  42kb").as_integer(), Some(42));
        assert_eq!(LimitValue::from("-7").as_integer(), Some(-7));
        assert_eq!(LimitValue::from("+8").as_integer(), Some(8));
        assert_eq!(LimitValue::from("abc").as_integer(), None);
        assert_eq!(LimitValue::from("").as_integer(), None);
        assert_eq!(LimitValue::from("99999999999999999999999").as_integer(), None);
        assert_eq!(LimitValue::Float(10.9).as_integer(), Some(10));
        assert_eq!(LimitValue::Float(f64::NAN).as_integer(), None);
        assert_eq!(LimitValue::Integer(5).as_integer(), Some(5));
    }

    #[test]
    fn toml_nested_levels() {
        let cfg = Config::from_toml_str("[limits.preview]\nmaxSVGSize = 10000\n").unwrap();
        assert_eq!(cfg.preview_limit("maxSVGSize"), Some(&LimitValue::Integer(10000)));

        let cfg = Config::from_toml_str("[limits]\n").unwrap();
        assert!(cfg.preview_limit("maxSVGSize").is_none());

        let cfg = Config::from_toml_str("").unwrap();
        assert!(cfg.limits.is_none());
    }

    #[test]
    fn json_loosely_typed_values() {
        let cfg = Config::from_json_str(
            r#"{"limits":{"preview":{"maxSVGSize":"2048","maxImageSize":[1,2],"other":null}}}"#,
        )
        .unwrap();
        assert_eq!(cfg.preview_limit("maxSVGSize").and_then(LimitValue::as_integer), Some(2048));
        assert_eq!(cfg.preview_limit("maxImageSize").and_then(LimitValue::as_integer), None);
        assert_eq!(cfg.preview_limit("other").and_then(LimitValue::as_integer), None);
    }

    #[test]
    fn with_limit_and_merge() {
        let base = Config::default().with_limit("maxSVGSize", 10_i64);
        let over = Config::default().with_limit("maxSVGSize", "20");
        let merged = base.merge(over);
        assert_eq!(merged.preview_limit("maxSVGSize"), Some(&LimitValue::from("20")));

        let kept = Config::default().with_limit("maxSVGSize", 10_i64).merge(Config::default());
        assert_eq!(kept.preview_limit("maxSVGSize"), Some(&LimitValue::Integer(10)));
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("svg-gate-config-test.yaml");
        std::fs::write(&path, "limits: {}").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::File { source: ConfigErrorKind::UnsupportedFormat, .. }));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_toml_file() {
        let path = std::env::temp_dir().join("svg-gate-config-test.toml");
        std::fs::write(&path, "[limits.preview]\nmaxSVGSize = \"512\"\n").unwrap();
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.preview_limit("maxSVGSize").and_then(LimitValue::as_integer), Some(512));
        let _ = std::fs::remove_file(&path);
    }
}
