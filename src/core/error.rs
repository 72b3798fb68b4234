//! Error handling for netviz.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`NetvizError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions
//!    for CLI users
//!
//! Failures split into two tiers. Anything that goes wrong *while walking a
//! document's modules* (a reference that does not resolve, a candidate that
//! escapes the root, a referenced file that fails to parse) is a soft,
//! per-module condition: it is logged as a warning and the walk continues, so
//! a partially-successful graph can still be rendered. Only context-level
//! failures surface as [`NetvizError`] values to the caller, because in those
//! cases there is no partial document to return:
//!
//! - [`NetvizError::SessionNotFound`] - a subgraph fetch named a session that
//!   was never created or has been destroyed
//! - [`NetvizError::TargetNotFound`] - the specifically requested file does
//!   not exist under the session root
//! - [`NetvizError::DocumentParse`] / [`NetvizError::Interpolation`] - the
//!   *top-level* document itself is unusable
//!
//! Use [`user_friendly_error`] at the CLI boundary to convert any error into
//! a displayable context with suggestions.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for netviz operations.
///
/// Each variant represents a caller-visible failure mode. Soft per-module
/// resolution failures never appear here; they are recorded as warnings by
/// the resolver and leave the affected field untouched.
#[derive(Error, Debug)]
pub enum NetvizError {
    /// A session id was presented that the session context does not know.
    ///
    /// Raised by subgraph fetches and session operations when the id was
    /// never created or has already been destroyed.
    #[error("session '{session_id}' does not exist")]
    SessionNotFound {
        /// The opaque session identifier that failed to resolve
        session_id: String,
    },

    /// The specifically requested file is absent under the session root.
    ///
    /// Distinct from a generic processing failure so the boundary layer can
    /// map it to a not-found response.
    #[error("file '{path}' not found under the session root")]
    TargetNotFound {
        /// Root-relative path that was requested
        path: String,
    },

    /// The document could not be parsed as YAML.
    #[error("failed to parse document: {reason}")]
    DocumentParse {
        /// Parser diagnostic
        reason: String,
    },

    /// An interpolation expression could not be resolved within the document.
    #[error("cannot resolve interpolation '${{{expression}}}': {reason}")]
    Interpolation {
        /// The dotted expression inside `${...}`
        expression: String,
        /// Why resolution failed
        reason: String,
    },

    /// A path was rejected before reaching the storage backend.
    ///
    /// Storage backends refuse any path that lexically escapes their root.
    #[error("path '{path}' escapes the storage root")]
    PathEscapesRoot {
        /// The offending path as supplied
        path: String,
    },

    /// An uploaded archive contains an entry that would land outside the
    /// session namespace.
    #[error("archive entry '{name}' escapes the session root")]
    ArchiveEntryEscape {
        /// Entry name as recorded in the archive
        name: String,
    },

    /// The uploaded archive could not be read.
    #[error("failed to read archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A remote blob store request failed or returned an unexpected status.
    #[error("remote storage {operation} failed for '{path}': {reason}")]
    RemoteStorage {
        /// The storage operation being performed (read, write, list, delete)
        operation: String,
        /// Root-relative path involved
        path: String,
        /// Transport or status diagnostic
        reason: String,
    },

    /// Engine configuration file was present but invalid.
    #[error("invalid configuration in {path}: {reason}")]
    Config {
        /// Configuration file path
        path: String,
        /// What was wrong
        reason: String,
    },

    /// IO error from [`std::io::Error`].
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error from [`serde_yaml::Error`].
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP transport error from [`reqwest::Error`].
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Any other error, message preserved.
    #[error("{0:#}")]
    Other(anyhow::Error),
}

/// Wrapper adding user-facing suggestions and details to an error.
///
/// Rendered by the CLI with [`ErrorContext::display`]; the error line is red,
/// details yellow, suggestion green.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying netviz error
    pub error: NetvizError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: NetvizError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining why the error occurred.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Known [`NetvizError`] variants receive tailored suggestions; everything
/// else is wrapped with its message preserved.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    match error.downcast::<NetvizError>() {
        Ok(err) => contextualize(err),
        Err(other) => ErrorContext::new(NetvizError::Other(other)),
    }
}

fn contextualize(error: NetvizError) -> ErrorContext {
    match &error {
        NetvizError::SessionNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Create a session first, or re-upload the bundle to obtain a fresh session id")
            .with_details("Session ids are minted at upload time and become invalid once the session is destroyed"),
        NetvizError::TargetNotFound { path } => {
            let details = format!("'{path}' was resolved against the session root only");
            ErrorContext::new(error)
                .with_suggestion("Check the relative path recorded on the module's config field")
                .with_details(details)
        }
        NetvizError::DocumentParse { .. } => ErrorContext::new(error)
            .with_suggestion("Validate the document with a YAML linter before uploading"),
        NetvizError::Interpolation { expression, .. } => {
            let details = format!("the expression '${{{expression}}}' must name a value within the same document");
            ErrorContext::new(error).with_details(details)
        }
        NetvizError::PathEscapesRoot { .. } | NetvizError::ArchiveEntryEscape { .. } => {
            ErrorContext::new(error)
                .with_details("References and archive entries may not use '..' to leave the upload root")
        }
        NetvizError::RemoteStorage { .. } => ErrorContext::new(error)
            .with_suggestion("Check that the blob store endpoint is reachable and the namespace exists"),
        NetvizError::Config { .. } => ErrorContext::new(error)
            .with_suggestion("Fix the configuration file or unset NETVIZ_CONFIG to use defaults"),
        _ => ErrorContext::new(error),
    }
}
