//! Text recognition through an external program.

use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use biostudy_core::{NoRecognizer, RecognitionError, TextRecognizer};

use crate::settings::{IMAGE_ARG_TOKEN, OcrSettings};

/// Runs a command per image and treats each non-blank stdout line as a fragment.
///
/// `{image}` in `args` is replaced by the image path; when no argument
/// mentions it the path is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for one invocation on `image`.
    pub fn arguments(&self, image: &Path) -> Vec<String> {
        let image = image.display().to_string();
        let mut substituted = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains(IMAGE_ARG_TOKEN) {
                    substituted = true;
                    arg.replace(IMAGE_ARG_TOKEN, &image)
                } else {
                    arg.clone()
                }
            })
            .collect();
        if !substituted {
            args.push(image);
        }
        args
    }
}

impl TextRecognizer for CommandRecognizer {
    fn recognize(&self, path: &Path) -> Result<Vec<String>, RecognitionError> {
        let output = Command::new(&self.program)
            .args(self.arguments(path))
            .output()
            .map_err(|e| {
                RecognitionError::new(path, format!("failed to run {}: {e}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::new(
                path,
                format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            ));
        }

        Ok(parse_fragments(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Non-blank, trimmed lines of recognizer output.
pub fn parse_fragments(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Recognizer for the `[ocr]` settings; [`NoRecognizer`] when no command is set.
pub fn recognizer_from_settings(ocr: &OcrSettings) -> Arc<dyn TextRecognizer> {
    match ocr.command.as_deref().map(str::trim) {
        Some(program) if !program.is_empty() => {
            tracing::debug!(program, "using external text recognizer");
            Arc::new(CommandRecognizer::new(program, ocr.args.clone()))
        }
        _ => Arc::new(NoRecognizer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_arguments_substitute_image_token() {
        let recognizer = CommandRecognizer::new(
            "tesseract",
            vec!["{image}".to_string(), "stdout".to_string()],
        );
        assert_eq!(
            recognizer.arguments(&PathBuf::from("img/pcr.png")),
            vec!["img/pcr.png".to_string(), "stdout".to_string()]
        );
    }

    #[test]
    fn test_arguments_append_image_without_token() {
        let recognizer =
            CommandRecognizer::new("ocr", vec!["--lang".to_string(), "eng".to_string()]);
        assert_eq!(
            recognizer.arguments(&PathBuf::from("a.png")),
            vec!["--lang".to_string(), "eng".to_string(), "a.png".to_string()]
        );
    }

    #[test]
    fn test_parse_fragments_drops_blank_lines() {
        assert_eq!(
            parse_fragments("  Taq Polymerase \n\n Primer\r\n"),
            vec!["Taq Polymerase".to_string(), "Primer".to_string()]
        );
    }

    #[test]
    fn test_missing_program_is_recognition_error() {
        let recognizer = CommandRecognizer::new("biostudy-no-such-ocr-binary", Vec::new());
        let err = recognizer.recognize(Path::new("diagram.png")).unwrap_err();
        assert_eq!(err.path, PathBuf::from("diagram.png"));
        assert!(err.message.contains("biostudy-no-such-ocr-binary"));
    }

    #[test]
    fn test_blank_command_falls_back_to_no_recognizer() {
        let ocr = OcrSettings {
            command: Some("  ".to_string()),
            args: Vec::new(),
        };
        let recognizer = recognizer_from_settings(&ocr);
        assert!(recognizer.recognize(Path::new("x.png")).unwrap().is_empty());
    }
}
