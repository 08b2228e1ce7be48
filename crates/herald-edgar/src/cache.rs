//! Durable filing cache
//!
//! One text file per (company, accession) pair. The presence of the file is
//! the cache-hit signal, so entries are written to a temporary name and
//! renamed into place.
//!
//! Access is single-threaded. Parallel callers would need per-key locking to
//! keep the at-most-once download guarantee.

use crate::error::{EdgarError, FetchError};
use crate::fetcher::decode_lossy;
use herald_domain::traits::HttpFetch;
use herald_domain::{Cik, FilingReference};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Cache-first access to filing documents
#[derive(Debug, Clone)]
pub struct FilingCache<F> {
    fetcher: F,
    cache_dir: PathBuf,
    archives_url: String,
}

impl<F> FilingCache<F>
where
    F: HttpFetch<Error = FetchError>,
{
    /// Create a cache rooted at `cache_dir`
    ///
    /// The directory is created on the first write.
    pub fn new(fetcher: F, cache_dir: impl Into<PathBuf>, archives_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            cache_dir: cache_dir.into(),
            archives_url: archives_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Cache directory
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// File holding the cached document for a filing
    pub fn entry_path(&self, cik: Cik, filing: &FilingReference) -> PathBuf {
        self.cache_dir.join(format!("{}.txt", filing.cache_key(cik)))
    }

    /// Download URL of a filing's primary document
    pub fn document_url(&self, cik: Cik, filing: &FilingReference) -> String {
        format!("{}/{}", self.archives_url, filing.archive_path(cik))
    }

    /// Whether a filing is already cached
    pub async fn contains(&self, cik: Cik, filing: &FilingReference) -> bool {
        tokio::fs::try_exists(self.entry_path(cik, filing))
            .await
            .unwrap_or(false)
    }

    /// Return the filing's content, downloading it only on a cache miss
    ///
    /// A successful non-empty download is persisted before being returned.
    /// Failures are returned without touching the cache. A failed write is
    /// logged and the content is still returned.
    pub async fn get_or_fetch(&self, cik: Cik, filing: &FilingReference) -> Result<String, EdgarError> {
        let path = self.entry_path(cik, filing);

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                debug!(path = %path.display(), "Cache hit");
                return Ok(decode_lossy(&bytes));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                warn!("Unreadable cache entry {}: {}; refetching", path.display(), e);
            }
        }

        let url = self.document_url(cik, filing);
        debug!(url = %url, "Cache miss, downloading");
        let content = self.fetcher.fetch(&url).await?;

        if content.is_empty() {
            warn!("Empty document for {}; not caching", filing.accession);
            return Ok(content);
        }

        if let Err(e) = self.persist(&path, &content).await {
            warn!("Failed to cache {}: {}", path.display(), e);
        }

        Ok(content)
    }

    async fn persist(&self, path: &Path, content: &str) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.cache_dir).await?;

        let tmp = path.with_extension("txt.partial");
        tokio::fs::write(&tmp, content.as_bytes()).await?;
        tokio::fs::rename(&tmp, path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::future::Future;

    struct NeverFetch;

    impl HttpFetch for NeverFetch {
        type Error = FetchError;

        fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
            std::future::ready(Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }))
        }
    }

    fn filing() -> FilingReference {
        FilingReference::new(
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            "0000320193-24-000123".parse().unwrap(),
            "aapl-20241101.htm",
        )
    }

    #[test]
    fn test_entry_path_and_url() {
        let cache = FilingCache::new(
            NeverFetch,
            "/tmp/cache",
            "https://www.sec.gov/Archives/edgar/data/",
        );
        let cik = Cik::new(320193).unwrap();

        assert_eq!(
            cache.entry_path(cik, &filing()),
            PathBuf::from("/tmp/cache/0000320193_0000320193-24-000123.txt")
        );
        assert_eq!(
            cache.document_url(cik, &filing()),
            "https://www.sec.gov/Archives/edgar/data/0000320193/000032019324000123/aapl-20241101.htm"
        );
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FilingCache::new(NeverFetch, dir.path(), "http://127.0.0.1:9");
        let cik = Cik::new(320193).unwrap();

        let result = cache.get_or_fetch(cik, &filing()).await;
        assert!(matches!(
            result,
            Err(EdgarError::Fetch(FetchError::Status { status: 404, .. }))
        ));
        assert!(!cache.contains(cik, &filing()).await);
    }

    #[tokio::test]
    async fn test_preexisting_entry_is_served_without_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FilingCache::new(NeverFetch, dir.path(), "http://127.0.0.1:9");
        let cik = Cik::new(320193).unwrap();

        std::fs::write(cache.entry_path(cik, &filing()), b"<p>cached\xff body</p>").unwrap();

        let content = cache.get_or_fetch(cik, &filing()).await.unwrap();
        assert_eq!(content, "<p>cached body</p>");
    }
}
