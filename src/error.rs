use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocTextError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("No input files were given")]
    NoInputFiles,

    #[error("Document could not be read: {path}")]
    UnreadableDocument { path: String, message: String },

    #[error("Document {path} has no {part} part")]
    MissingDocumentPart { path: String, part: String },

    #[error("Malformed document XML: {message}")]
    MalformedXml { message: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

/// Serializable classification of a per-file failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnreadableDocument,
    MissingDocumentPart,
    MalformedXml,
    InvalidPath,
    Io,
    /// Errors that never concern a single document (configuration, cancellation).
    Other,
}

impl DocTextError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DocTextError::UnreadableDocument { .. } => ErrorKind::UnreadableDocument,
            DocTextError::MissingDocumentPart { .. } => ErrorKind::MissingDocumentPart,
            DocTextError::MalformedXml { .. } => ErrorKind::MalformedXml,
            DocTextError::InvalidPath { .. } => ErrorKind::InvalidPath,
            DocTextError::Io(_) => ErrorKind::Io,
            _ => ErrorKind::Other,
        }
    }

    /// Attach the offending document path to errors raised without one.
    pub fn with_document_path(self, path: &std::path::Path) -> Self {
        let path = path.display().to_string();
        match self {
            DocTextError::UnreadableDocument { message, .. } => {
                DocTextError::UnreadableDocument { path, message }
            }
            DocTextError::MissingDocumentPart { part, .. } => {
                DocTextError::MissingDocumentPart { path, part }
            }
            DocTextError::MalformedXml { message } => DocTextError::MalformedXml {
                message: format!("{}: {}", path, message),
            },
            other => other,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for DocTextError {
    fn user_message(&self) -> String {
        match self {
            DocTextError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            DocTextError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            DocTextError::NoInputFiles => "No input files to extract".to_string(),
            DocTextError::UnreadableDocument { path, message } => {
                format!("Could not read document {}: {}", path, message)
            }
            DocTextError::MissingDocumentPart { path, part } => {
                format!("Document {} is missing its {} part", path, part)
            }
            DocTextError::MalformedXml { message } => {
                format!("Document XML is malformed: {}", message)
            }
            DocTextError::Cancelled => "Operation was cancelled by user".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            DocTextError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            DocTextError::NoInputFiles => Some(
                "Pass document filenames as arguments (e.g., doctext report.docx notes.docx) or list them under [job] input_filenames in doctext.toml.".to_string()
            ),
            DocTextError::UnreadableDocument { .. } | DocTextError::MissingDocumentPart { .. } => Some(
                "Make sure the file is a Word .docx document and not a legacy .doc or a renamed file. Drop --fail-fast to skip unreadable documents.".to_string()
            ),
            DocTextError::MalformedXml { .. } => Some(
                "Open and re-save the document in a word processor to repair it.".to_string()
            ),
            DocTextError::Io(_) => Some(
                "Ensure you have the necessary read/write permissions for the base and output directories.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for DocTextError {
    fn from(error: zip::result::ZipError) -> Self {
        match error {
            zip::result::ZipError::Io(e) => DocTextError::Io(e),
            zip::result::ZipError::FileNotFound => DocTextError::MissingDocumentPart {
                path: "document".to_string(),
                part: "requested".to_string(),
            },
            other => DocTextError::UnreadableDocument {
                path: "document".to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl From<quick_xml::Error> for DocTextError {
    fn from(error: quick_xml::Error) -> Self {
        DocTextError::MalformedXml {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocTextError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_user_friendly_messages() {
        let error = DocTextError::UnreadableDocument {
            path: "/tmp/a.docx".to_string(),
            message: "invalid Zip archive".to_string(),
        };
        assert!(error.user_message().contains("/tmp/a.docx"));
        assert!(error.suggestion().is_some());
        assert!(DocTextError::Cancelled.suggestion().is_none());
    }

    #[test]
    fn test_error_kind_classification() {
        let io = DocTextError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(io.kind(), ErrorKind::Io);
        assert_eq!(
            DocTextError::MalformedXml { message: "x".into() }.kind(),
            ErrorKind::MalformedXml
        );
        assert_eq!(
            DocTextError::InvalidPath { path: "..".into() }.kind(),
            ErrorKind::InvalidPath
        );
        assert_eq!(DocTextError::NoInputFiles.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_zip_error_conversion() {
        let error = DocTextError::from(zip::result::ZipError::InvalidArchive("bad".into()));
        assert!(matches!(error, DocTextError::UnreadableDocument { .. }));

        let error = DocTextError::from(zip::result::ZipError::FileNotFound);
        assert!(matches!(error, DocTextError::MissingDocumentPart { .. }));
    }

    #[test]
    fn test_with_document_path() {
        let error = DocTextError::UnreadableDocument {
            path: "document".to_string(),
            message: "bad".to_string(),
        }
        .with_document_path(Path::new("/tmp/x.docx"));

        match error {
            DocTextError::UnreadableDocument { path, .. } => assert_eq!(path, "/tmp/x.docx"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
