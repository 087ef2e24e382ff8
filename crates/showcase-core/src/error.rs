use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::TagId;

pub type Result<T> = std::result::Result<T, ShowcaseError>;

/// Failures raised while loading a catalog or deriving panel data from it.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("unknown tag '{tag}'")]
    UnknownTag { tag: TagId },
    #[error("tag '{tag}' appears more than once in the canonical tag order")]
    DuplicateOrderEntry { tag: TagId },
    #[error("malformed source URL '{url}': {reason}")]
    MalformedSourceUrl { url: String, reason: String },
    #[error("template '{0}' not found")]
    TemplateNotFound(String),
    #[error("in template '{template}'")]
    Template {
        template: String,
        #[source]
        source: Box<ShowcaseError>,
    },
    #[error("invalid JSON in {}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to access {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
    #[error(transparent)]
    Glob(#[from] glob::GlobError),
}

impl ShowcaseError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ShowcaseError::File {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed_source(url: &str, reason: &str) -> Self {
        ShowcaseError::MalformedSourceUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Attach the owning template's title to an error raised while processing it.
    pub fn in_template(self, template: &str) -> Self {
        ShowcaseError::Template {
            template: template.to_string(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn chain(err: &ShowcaseError) -> Vec<String> {
        let mut messages = vec![err.to_string()];
        let mut source = err.source();
        while let Some(cause) = source {
            messages.push(cause.to_string());
            source = cause.source();
        }
        messages
    }

    #[test]
    fn wrapped_errors_name_each_cause_once() {
        let err = ShowcaseError::UnknownTag { tag: "x".into() }.in_template("Web");
        assert_eq!(chain(&err), vec!["in template 'Web'", "unknown tag 'x'"]);
    }

    #[test]
    fn file_errors_leave_the_io_cause_to_the_chain() {
        let io = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = ShowcaseError::file("/data/tags.json", io);
        assert_eq!(chain(&err), vec!["failed to access /data/tags.json", "no such file"]);
    }
}
