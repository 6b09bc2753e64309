//! Documents to analyze: SEO fields plus body content
//!
//! A document is either a JSON record (`{"seoTitle", "seoDescription",
//! "focusKeyphrase", "content"}`, every key optional) or any other file,
//! whose full text is taken as the body content.

use crate::AnalysisInput;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Suffixes picked up when walking a directory
pub const DEFAULT_DOCUMENT_PATTERNS: [&str; 4] = [".seo.json", ".html", ".htm", ".md"];

/// Directories never walked or watched
const SKIPPED_DIRS: [&str; 2] = ["node_modules", ".git"];

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid document JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// SEO fields together with the body they describe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(flatten)]
    pub fields: AnalysisInput,
    /// Body content, markup allowed
    #[serde(default)]
    pub content: String,
}

impl Document {
    /// A document with no SEO fields, only body content
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            fields: AnalysisInput::default(),
            content: content.into(),
        }
    }

    /// Load a document from disk. `.json` files are parsed as records,
    /// anything else is raw body content.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&text).map_err(|source| DocumentError::Parse {
                path: path.to_path_buf(),
                source,
            })
        } else {
            Ok(Self::from_content(text))
        }
    }

    /// Read a document from a stream (stdin). Input that is a JSON object is
    /// parsed as a record; anything else is raw body content.
    pub fn from_reader<R: Read>(mut reader: R, label: &Path) -> Result<Self, DocumentError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| DocumentError::Read {
                path: label.to_path_buf(),
                source,
            })?;

        if text.trim_start().starts_with('{') {
            serde_json::from_str(&text).map_err(|source| DocumentError::Parse {
                path: label.to_path_buf(),
                source,
            })
        } else {
            Ok(Self::from_content(text))
        }
    }

    /// Replace fields with values given on the command line
    pub fn with_overrides(
        mut self,
        title: Option<&str>,
        description: Option<&str>,
        focus_keyphrase: Option<&str>,
    ) -> Self {
        if let Some(title) = title {
            self.fields.seo_title = Some(title.to_string());
        }
        if let Some(description) = description {
            self.fields.seo_description = Some(description.to_string());
        }
        if let Some(keyphrase) = focus_keyphrase {
            self.fields.focus_keyphrase = Some(keyphrase.to_string());
        }
        self
    }
}

/// Whether `path` names a document under the given suffix patterns
pub fn is_document_file(path: &Path, patterns: &[&str]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    if path
        .components()
        .any(|c| SKIPPED_DIRS.iter().any(|d| c.as_os_str() == *d))
    {
        return false;
    }

    patterns.iter().any(|p| name.ends_with(p))
}
