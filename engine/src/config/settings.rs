// Reader settings, loaded from a JSON file
use serde::Deserialize;
use shared::models::Kind;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::EngineError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub delimiter: String,
    pub has_headers: bool,
    // Column name -> type name ("int64", "float64", "time.Time", ...)
    pub columns: BTreeMap<String, Kind>,
    pub markdown: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            delimiter: ",".to_string(),
            has_headers: true,
            columns: BTreeMap::new(),
            markdown: false,
        }
    }
}

impl EngineSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let settings = Self::from_json(&text)?;
        info!(path = %path.display(), columns = settings.columns.len(), "Loaded settings");
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(text)?;
        settings.delimiter_byte()?;

        for (name, kind) in &settings.columns {
            if *kind == Kind::Unsupported {
                // Conversion of this column will fail on the first non-empty cell
                warn!(column = %name, "Column declared with an unsupported type");
            } else {
                debug!(column = %name, kind = %kind, "Column type declared");
            }
        }
        Ok(settings)
    }

    pub fn delimiter_byte(&self) -> Result<u8, EngineError> {
        match self.delimiter.as_bytes() {
            [b] => Ok(*b),
            _ => Err(EngineError::ConfigError(format!(
                "delimiter must be a single byte, got '{}'",
                self.delimiter
            ))),
        }
    }

    pub fn kind_of(&self, column: &str) -> Kind {
        self.columns.get(column).copied().unwrap_or(Kind::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.delimiter_byte().unwrap(), b',');
        assert!(settings.has_headers);
        assert_eq!(settings.kind_of("anything"), Kind::String);
    }

    #[test]
    fn test_from_json_partial() {
        let settings = EngineSettings::from_json(
            r#"{ "delimiter": ";", "columns": { "price": "float64", "day": "time.Time", "odd": "uint8" } }"#,
        )
        .unwrap();
        assert_eq!(settings.delimiter_byte().unwrap(), b';');
        assert!(settings.has_headers);
        assert_eq!(settings.kind_of("price"), Kind::Float64);
        assert_eq!(settings.kind_of("day"), Kind::Date);
        assert_eq!(settings.kind_of("odd"), Kind::Unsupported);
        assert_eq!(settings.kind_of("symbol"), Kind::String);
    }

    #[test]
    fn test_bad_delimiter() {
        let result = EngineSettings::from_json(r#"{ "delimiter": ";;" }"#);
        assert!(matches!(result, Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "markdown": true, "columns": {{ "n": "int32" }} }}"#).unwrap();
        let settings = EngineSettings::load(file.path()).unwrap();
        assert!(settings.markdown);
        assert_eq!(settings.kind_of("n"), Kind::Int32);
    }

    #[test]
    fn test_load_missing_file() {
        let result = EngineSettings::load("/nonexistent/valconv/settings.json");
        assert!(matches!(result, Err(EngineError::IoError { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        assert!(matches!(
            EngineSettings::from_json("{ not json"),
            Err(EngineError::JsonError { .. })
        ));
    }
}
