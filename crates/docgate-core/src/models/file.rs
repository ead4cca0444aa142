use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// A file reference submitted for ingestion. The name is the only attribute
/// this service reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileDescriptor {
    pub name: String,
}

/// Classification outcome for a single file.
///
/// Serialized exactly as `"Supported"` / `"Unsupported"`; downstream
/// consumers match on these literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FileStatus {
    Supported,
    Unsupported,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Supported => write!(f, "Supported"),
            FileStatus::Unsupported => write!(f, "Unsupported"),
        }
    }
}

/// Per-file result before job tagging. Also the per-file shape forwarded to
/// the status service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidatedFile {
    pub status: FileStatus,
    pub name: String,
}

/// Classification outcome for one ingestion event.
///
/// `is_valid` is true iff the input file sequence was non-empty. It does NOT
/// depend on any individual file being supported: a non-empty list made up
/// entirely of unsupported files is still a valid input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    pub files: Vec<ValidatedFile>,
}

impl ValidationResponse {
    pub fn supported_count(&self) -> u64 {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Supported)
            .count() as u64
    }

    pub fn unsupported_count(&self) -> u64 {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Unsupported)
            .count() as u64
    }

    /// Attach the job id to every file result, preserving order, names, and
    /// statuses. The job id is taken as-is; it is not validated here.
    pub fn tag_with_job(self, job_id: &str) -> TaggedResponse {
        TaggedResponse {
            is_valid: self.is_valid,
            files: self
                .files
                .into_iter()
                .map(|f| TaggedFile {
                    status: f.status,
                    name: f.name,
                    job_id: job_id.to_string(),
                })
                .collect(),
        }
    }
}

/// Per-file result after the job id has been attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaggedFile {
    pub status: FileStatus,
    pub name: String,
    #[serde(rename = "jobid")]
    pub job_id: String,
}

/// The invocation result returned to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaggedResponse {
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    pub files: Vec<TaggedFile>,
}

/// Payload sent to the ingestion-status service. Files travel in the
/// untagged shape; the job id rides alongside once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatusReport {
    #[serde(rename = "jobid")]
    pub job_id: String,
    pub files: Vec<ValidatedFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> ValidationResponse {
        ValidationResponse {
            is_valid: true,
            files: vec![
                ValidatedFile {
                    status: FileStatus::Supported,
                    name: "a.pdf".to_string(),
                },
                ValidatedFile {
                    status: FileStatus::Supported,
                    name: "b.PDF".to_string(),
                },
                ValidatedFile {
                    status: FileStatus::Unsupported,
                    name: "c.docx".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_file_status_serializes_as_exact_literals() {
        assert_eq!(
            serde_json::to_value(FileStatus::Supported).unwrap(),
            serde_json::json!("Supported")
        );
        assert_eq!(
            serde_json::to_value(FileStatus::Unsupported).unwrap(),
            serde_json::json!("Unsupported")
        );
    }

    #[test]
    fn test_file_status_display_matches_serialization() {
        assert_eq!(FileStatus::Supported.to_string(), "Supported");
        assert_eq!(FileStatus::Unsupported.to_string(), "Unsupported");
    }

    #[test]
    fn test_validation_response_wire_shape() {
        let response = sample_response();
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["isValid"], serde_json::json!(true));
        assert_eq!(value["files"][0]["status"], "Supported");
        assert_eq!(value["files"][0]["name"], "a.pdf");
        assert_eq!(value["files"][2]["status"], "Unsupported");
        // Untagged files must not carry a job id
        assert!(value["files"][0].get("jobid").is_none());
    }

    #[test]
    fn test_counts() {
        let response = sample_response();
        assert_eq!(response.supported_count(), 2);
        assert_eq!(response.unsupported_count(), 1);
    }

    #[test]
    fn test_tag_with_job_adds_jobid_to_every_file() {
        let tagged = sample_response().tag_with_job("job-123");

        assert!(tagged.is_valid);
        assert_eq!(tagged.files.len(), 3);
        for file in &tagged.files {
            assert_eq!(file.job_id, "job-123");
        }
        // Names and statuses survive unchanged, in order
        assert_eq!(tagged.files[0].name, "a.pdf");
        assert_eq!(tagged.files[0].status, FileStatus::Supported);
        assert_eq!(tagged.files[1].name, "b.PDF");
        assert_eq!(tagged.files[1].status, FileStatus::Supported);
        assert_eq!(tagged.files[2].name, "c.docx");
        assert_eq!(tagged.files[2].status, FileStatus::Unsupported);
    }

    #[test]
    fn test_tag_with_job_on_empty_response() {
        let response = ValidationResponse {
            is_valid: false,
            files: vec![],
        };
        let tagged = response.tag_with_job("job-1");
        assert!(!tagged.is_valid);
        assert!(tagged.files.is_empty());
    }

    #[test]
    fn test_tagged_response_wire_shape() {
        let tagged = sample_response().tag_with_job("job-123");
        let value = serde_json::to_value(&tagged).unwrap();

        assert_eq!(value["isValid"], serde_json::json!(true));
        assert_eq!(value["files"][0]["jobid"], "job-123");
        assert_eq!(value["files"][0]["status"], "Supported");
        assert_eq!(value["files"][0]["name"], "a.pdf");
    }

    #[test]
    fn test_job_status_report_wire_shape() {
        let report = JobStatusReport {
            job_id: "job-9".to_string(),
            files: sample_response().files,
        };
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["jobid"], "job-9");
        assert_eq!(value["files"][1]["name"], "b.PDF");
        assert!(value["files"][1].get("jobid").is_none());
    }
}
