//! Remote data source abstraction.
//!
//! The dashboard core never talks HTTP directly; it consumes regions and
//! per-region datasets through [`RemoteDataSource`]. Implementations:
//! - [`crate::http::HttpSource`]: the proxy endpoints over `reqwest`
//! - [`crate::memo::MemoSource`]: response memo wrapped around another source
//! - [`crate::memory::MemorySource`]: in-memory, scriptable, for tests and demos

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use foundation::{CatalogResponse, DatasetResponse, RegionCode};

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Failure of a single remote fetch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    /// Network unreachable, connection reset, request aborted.
    #[error("transport error: {0}")]
    Transport(String),
    /// The remote answered with a non-success status.
    #[error("upstream returned HTTP {status}{}", message_suffix(.message))]
    Upstream { status: u16, message: Option<String> },
    /// The body could not be decoded into the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl SourceError {
    pub fn upstream(status: u16) -> Self {
        SourceError::Upstream {
            status,
            message: None,
        }
    }

    /// HTTP status for upstream failures, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Trait for region catalog + dataset providers.
///
/// Implementations must be `Send + Sync` for use across async tasks.
/// Methods return boxed futures for dyn-compatibility.
pub trait RemoteDataSource: Send + Sync {
    /// Fetch the list of all regions.
    fn fetch_region_catalog(&self) -> BoxFuture<'_, Result<CatalogResponse, SourceError>>;

    /// Fetch the full multi-category dataset for one region.
    fn fetch_region_dataset(
        &self,
        code: RegionCode,
    ) -> BoxFuture<'_, Result<DatasetResponse, SourceError>>;
}

impl<S: RemoteDataSource + ?Sized> RemoteDataSource for Arc<S> {
    fn fetch_region_catalog(&self) -> BoxFuture<'_, Result<CatalogResponse, SourceError>> {
        (**self).fetch_region_catalog()
    }

    fn fetch_region_dataset(
        &self,
        code: RegionCode,
    ) -> BoxFuture<'_, Result<DatasetResponse, SourceError>> {
        (**self).fetch_region_dataset(code)
    }
}

#[cfg(test)]
mod tests {
    use super::SourceError;
    use std::time::Duration;

    #[test]
    fn display_includes_upstream_message_when_present() {
        assert_eq!(
            SourceError::upstream(503).to_string(),
            "upstream returned HTTP 503"
        );
        let e = SourceError::Upstream {
            status: 404,
            message: Some("Failed to fetch population data from external API".into()),
        };
        assert_eq!(
            e.to_string(),
            "upstream returned HTTP 404: Failed to fetch population data from external API"
        );
        assert_eq!(e.status(), Some(404));
        assert_eq!(SourceError::Timeout(Duration::from_secs(1)).status(), None);
    }
}
