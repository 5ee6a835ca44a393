//! `biostudy.toml` settings.
//!
//! Looked up at `--config` when given, otherwise in the platform config
//! directory:
//! - macOS: ~/Library/Application Support/edu.biostudy.Biostudy/
//! - Windows: %APPDATA%/biostudy/Biostudy/config/
//! - Linux: ~/.config/biostudy/

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use biostudy_core::{ReportCollector, SearchOptions};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "edu";
const APP_ORG: &str = "biostudy";
const APP_NAME: &str = "Biostudy";
const CONFIG_FILENAME: &str = "biostudy.toml";

/// Overrides `[source] path`.
pub const KNOWLEDGE_BASE_ENV_VAR: &str = "BIOSTUDY_KNOWLEDGE_BASE";

/// Knowledge base used when nothing else names one.
pub const DEFAULT_KNOWLEDGE_BASE: &str = "knowledge_base.csv";

/// Token in `[ocr] args` replaced by the image path.
pub const IMAGE_ARG_TOKEN: &str = "{image}";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub search: SearchOptions,
    pub ocr: OcrSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub path: Option<PathBuf>,
}

/// External text recognizer. Diagram search is off while `command` is unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    pub command: Option<String>,
    pub args: Vec<String>,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            command: None,
            args: vec![IMAGE_ARG_TOKEN.to_string(), "stdout".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub title: Option<String>,
    /// Directory for exports written without an explicit file name.
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    /// Loads `explicit` if given, else the platform settings file.
    ///
    /// Never fails: a missing or unreadable file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match settings_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("could not determine settings path, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    tracing::info!(path = %path.display(), "loaded settings");
                    settings
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "failed to read settings, using defaults");
                Self::default()
            }
        }
    }

    /// Knowledge base path after applying the environment override.
    pub fn knowledge_base_path(&self) -> PathBuf {
        self.resolve_knowledge_base(std::env::var_os(KNOWLEDGE_BASE_ENV_VAR))
    }

    /// Precedence: non-empty `env_value`, then `[source] path`, then the default.
    pub fn resolve_knowledge_base(&self, env_value: Option<OsString>) -> PathBuf {
        if let Some(value) = env_value
            && !value.is_empty()
        {
            return PathBuf::from(value);
        }
        self.source
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KNOWLEDGE_BASE))
    }

    pub fn report_collector(&self) -> ReportCollector {
        match &self.report.title {
            Some(title) if !title.trim().is_empty() => ReportCollector::with_title(title.trim()),
            _ => ReportCollector::new(),
        }
    }

    pub fn export_dir(&self) -> PathBuf {
        self.report
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Platform settings file, if a home directory can be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use biostudy_core::{ImagePolicy, SearchField};

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [search]
            image_policy = "exhaustive"
            "#,
        )
        .unwrap();
        assert_eq!(settings.search.image_policy, ImagePolicy::Exhaustive);
        assert_eq!(
            settings.search.fields,
            vec![SearchField::Topic, SearchField::Explanation]
        );
        assert_eq!(settings.ocr, OcrSettings::default());
    }

    #[test]
    fn test_full_file() {
        let settings: Settings = toml::from_str(
            r#"
            [source]
            path = "notes/biotech.json"

            [search]
            fields = ["topic", "ten_points"]
            image_policy = "disabled"

            [ocr]
            command = "tesseract"
            args = ["{image}", "-", "--psm", "6"]

            [report]
            title = "EXAM PREP"
            output_dir = "reports"
            "#,
        )
        .unwrap();
        assert_eq!(settings.source.path, Some(PathBuf::from("notes/biotech.json")));
        assert_eq!(
            settings.search.fields,
            vec![SearchField::Topic, SearchField::TenPoints]
        );
        assert_eq!(settings.ocr.command.as_deref(), Some("tesseract"));
        assert_eq!(settings.ocr.args.len(), 4);
        assert_eq!(settings.report_collector().export(), "EXAM PREP\n=========\n\n");
        assert_eq!(settings.export_dir(), PathBuf::from("reports"));
    }

    #[test]
    fn test_knowledge_base_precedence() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.resolve_knowledge_base(None),
            PathBuf::from(DEFAULT_KNOWLEDGE_BASE)
        );

        settings.source.path = Some(PathBuf::from("configured.csv"));
        assert_eq!(
            settings.resolve_knowledge_base(None),
            PathBuf::from("configured.csv")
        );
        assert_eq!(
            settings.resolve_knowledge_base(Some(OsString::new())),
            PathBuf::from("configured.csv")
        );
        assert_eq!(
            settings.resolve_knowledge_base(Some(OsString::from("env.csv"))),
            PathBuf::from("env.csv")
        );
    }

    #[test]
    fn test_blank_title_uses_default_header() {
        let mut settings = Settings::default();
        settings.report.title = Some("   ".to_string());
        assert!(
            settings
                .report_collector()
                .export()
                .starts_with("BIOTECH STUDY REPORT\n")
        );
    }

    #[test]
    fn test_default_settings_serializable() {
        let text = toml::to_string_pretty(&Settings::default()).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
