//! Export and import of a single configuration document.

use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};

use crate::error::GafeteError;
use crate::label::Configuration;

/// Keys a file must carry to count as a configuration document.
const REQUIRED_KEYS: [&str; 3] = ["styles", "elements", "timestamp"];

/// `label-config-<slug>-<YYYY-MM-DD>.json`, where the slug keeps ASCII
/// alphanumerics, replaces everything else with `_` and lowercases.
pub fn export_file_name(name: &str, date: NaiveDate) -> String {
    let slug: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("label-config-{slug}-{}.json", date.format("%Y-%m-%d"))
}

/// Write `config` as pretty JSON into `dir`, returning the file path.
pub fn export_to_file(config: &Configuration, dir: &Path) -> Result<PathBuf, GafeteError> {
    let path = dir.join(export_file_name(&config.name, Utc::now().date_naive()));
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    tracing::info!(path = %path.display(), "exported label configuration");
    Ok(path)
}

/// Read a configuration document exported by [`export_to_file`] or by an
/// older version of the editor.
pub fn import_from_file(path: &Path) -> Result<Configuration, GafeteError> {
    let bytes = std::fs::read(path)?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| GafeteError::Validation(format!("Failed to parse configuration file: {e}")))?;

    let missing = REQUIRED_KEYS
        .iter()
        .any(|key| value.get(key).is_none_or(|v| v.is_null()));
    if missing {
        return Err(GafeteError::Validation(
            "Invalid configuration file format".to_string(),
        ));
    }

    let config: Configuration = serde_json::from_value(value)
        .map_err(|e| GafeteError::Validation(format!("Failed to parse configuration file: {e}")))?;
    tracing::info!(path = %path.display(), name = %config.name, "imported label configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{ElementId, LayoutElement};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            export_file_name("Congreso Médico 2024", date),
            "label-config-congreso_m_dico_2024-2024-03-09.json"
        );
    }

    #[test]
    fn test_export_then_import() {
        let dir = TempDir::new().unwrap();
        let mut config = Configuration::new("Feria");
        config
            .elements
            .push(LayoutElement::text(ElementId::Name, "Ana", &config.styles.name));

        let path = export_to_file(&config, dir.path()).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("label-config-feria-"));

        let imported = import_from_file(&path).unwrap();
        assert_eq!(imported, config);
    }

    #[test]
    fn test_import_rejects_missing_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{"name":"x","styles":{},"elements":[]}"#).unwrap();
        let err = import_from_file(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Invalid configuration file format"
        );
    }

    #[test]
    fn test_import_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.json");
        std::fs::write(&path, "PK\u{3}\u{4}").unwrap();
        assert!(matches!(
            import_from_file(&path),
            Err(GafeteError::Validation(_))
        ));
    }

    #[test]
    fn test_import_rejects_non_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("badge.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G', 0xff, 0xfe, 0xfd]).unwrap();
        assert!(matches!(
            import_from_file(&path),
            Err(GafeteError::Validation(_))
        ));
    }

    #[test]
    fn test_import_legacy_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.json");
        std::fs::write(
            &path,
            r#"{
                "name": "Viejo",
                "styles": { "pageWidth": 62, "nameFontSize": 20 },
                "elements": [],
                "timestamp": 1700000000000
            }"#,
        )
        .unwrap();

        let config = import_from_file(&path).unwrap();
        assert_eq!(config.version, 2);
        assert_eq!(config.styles.page_width, 62.0);
        assert_eq!(config.styles.name.font_size, 20.0);
    }
}
