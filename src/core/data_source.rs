//! One-shot dataset loading with embedded fallback.
//!
//! The dataset comes from a JSON document at a relative file path (default
//! `data.json`) or an http(s) URL. Any failure, including a document with no
//! portfolios, substitutes the embedded fixtures. Nothing here is surfaced to
//! the user as an error; the reason is kept on the outcome and logged.

use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::OnceCell;
use url::Url;

use super::fixtures::fallback_dataset;
use super::model::{Dataset, PortfolioDocument};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("malformed document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("document contains no portfolios")]
    Empty,
}

pub type Result<T> = std::result::Result<T, DataError>;

// ============================================================================
// Location
// ============================================================================

/// Where the dataset document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    File(PathBuf),
    Url(Url),
}

impl DataLocation {
    /// `http://` and `https://` values are URLs, everything else is a path.
    pub fn parse(source: &str) -> Self {
        match Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => DataLocation::Url(url),
            _ => DataLocation::File(PathBuf::from(source)),
        }
    }
}

impl std::fmt::Display for DataLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataLocation::File(path) => write!(f, "{}", path.display()),
            DataLocation::Url(url) => write!(f, "{url}"),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Where the session's dataset came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    Document(String),
    /// Embedded fixtures, with the reason the document was rejected.
    Fallback(String),
}

impl DataOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataOrigin::Fallback(_))
    }
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub origin: DataOrigin,
}

/// Retrieve and normalize the document. No retries, no timeout.
pub async fn fetch(location: &DataLocation) -> Result<Dataset> {
    let body = match location {
        DataLocation::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| DataError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        DataLocation::Url(url) => {
            let response = reqwest::get(url.clone()).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(DataError::Status(status.as_u16()));
            }
            response.bytes().await?.to_vec()
        }
    };

    let document: PortfolioDocument = serde_json::from_slice(&body)?;
    let dataset = Dataset::from_document(document);
    if dataset.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(dataset)
}

/// Load the dataset, substituting the embedded fixtures on any failure.
pub async fn load(location: &DataLocation) -> LoadOutcome {
    match fetch(location).await {
        Ok(dataset) => {
            tracing::info!(source = %location, portfolios = dataset.len(), "dataset loaded");
            LoadOutcome {
                dataset,
                origin: DataOrigin::Document(location.to_string()),
            }
        }
        Err(e) => {
            tracing::warn!(source = %location, error = %e, "using embedded fallback dataset");
            LoadOutcome {
                dataset: fallback_dataset().clone(),
                origin: DataOrigin::Fallback(e.to_string()),
            }
        }
    }
}

static SESSION: OnceCell<LoadOutcome> = OnceCell::const_new();

/// Load once per process. Later calls return the first outcome regardless of
/// the location passed.
pub async fn load_session(location: &DataLocation) -> &'static LoadOutcome {
    SESSION.get_or_init(|| load(location)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            DataLocation::parse("data.json"),
            DataLocation::File(PathBuf::from("data.json"))
        );
        assert!(matches!(
            DataLocation::parse("https://example.com/data.json"),
            DataLocation::Url(_)
        ));
        // A non-http scheme is still treated as a path.
        assert!(matches!(
            DataLocation::parse("c:/data/data.json"),
            DataLocation::File(_)
        ));
    }

    #[tokio::test]
    async fn test_missing_file_falls_back() {
        let outcome = load(&DataLocation::File("does/not/exist.json".into())).await;
        assert!(outcome.origin.is_fallback());
        assert_eq!(&outcome.dataset, fallback_dataset());
    }

    #[tokio::test]
    async fn test_malformed_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = fetch(&DataLocation::File(file.path().into())).await.unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[tokio::test]
    async fn test_empty_list_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"portfolios": []}}"#).unwrap();
        let location = DataLocation::File(file.path().into());
        assert!(matches!(fetch(&location).await, Err(DataError::Empty)));
        assert!(load(&location).await.origin.is_fallback());
    }

    #[tokio::test]
    async fn test_valid_file_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"portfolios": [{{"id": "x", "name": "X", "confidence": "Robust"}}]}}"#
        )
        .unwrap();
        let outcome = load(&DataLocation::File(file.path().into())).await;
        assert!(!outcome.origin.is_fallback());
        assert_eq!(outcome.dataset.len(), 1);
        assert_eq!(outcome.dataset.first().unwrap().name, "X");
    }
}
