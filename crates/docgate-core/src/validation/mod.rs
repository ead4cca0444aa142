use crate::models::{FileDescriptor, FileStatus, ValidatedFile, ValidationResponse};

/// Ingestion input validator
///
/// Classifies incoming file references by name suffix against a configured
/// extension allow-list, without coupling to how files are later fetched or
/// parsed downstream.
pub struct InputValidator {
    suffixes: Vec<String>,
}

impl InputValidator {
    /// Build a validator from an extension allow-list.
    ///
    /// Extensions are normalized to lower-case; a leading dot is accepted
    /// and stripped; empty entries are ignored.
    pub fn new(supported_extensions: &[String]) -> Self {
        let suffixes = supported_extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .map(|e| format!(".{}", e))
            .collect();

        Self { suffixes }
    }

    fn is_supported(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.suffixes.iter().any(|s| lowered.ends_with(s))
    }

    /// Classify each file as `Supported` or `Unsupported` by its lower-cased
    /// name suffix, preserving input order.
    ///
    /// `is_valid` reflects only whether the input list was non-empty; a list
    /// of exclusively unsupported files still validates. Each unsupported
    /// file is logged individually.
    pub fn classify(&self, files: &[FileDescriptor]) -> ValidationResponse {
        let mut results = Vec::with_capacity(files.len());

        for file in files {
            let status = if self.is_supported(&file.name) {
                FileStatus::Supported
            } else {
                tracing::info!(
                    file_name = %file.name,
                    "File type not supported for ingestion"
                );
                FileStatus::Unsupported
            };

            results.push(ValidatedFile {
                status,
                name: file.name.clone(),
            });
        }

        ValidationResponse {
            is_valid: !results.is_empty(),
            files: results,
        }
    }
}
