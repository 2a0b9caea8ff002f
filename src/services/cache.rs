use crate::models::Center;
use crate::services::source::{RecordSource, SourceError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Thirty days: the dataset is refreshed monthly
pub const DEFAULT_CATALOG_TTL_SECS: u64 = 60 * 60 * 24 * 30;

const CATALOG_KEY: &str = "hemocentros:all";

/// Fetched collection with the moment it was loaded
#[derive(Debug, Clone)]
pub struct Catalog {
    pub centers: Arc<Vec<Center>>,
    pub fetched_at: DateTime<Utc>,
}

/// Record source wrapper keeping the fetched collection in memory
///
/// Only successful fetches are cached; a failure is returned to every caller
/// waiting on that fetch and the next call tries the source again. Concurrent
/// misses share a single fetch.
pub struct CachedSource<S> {
    inner: S,
    cache: moka::future::Cache<&'static str, Catalog>,
}

impl<S: RecordSource + Sync> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        let cache = moka::future::CacheBuilder::new(1)
            .time_to_live(ttl)
            .build();

        Self { inner, cache }
    }

    pub fn with_default_ttl(inner: S) -> Self {
        Self::new(inner, Duration::from_secs(DEFAULT_CATALOG_TTL_SECS))
    }

    /// Get the catalog from cache, fetching it on a miss
    pub async fn catalog(&self) -> Result<Catalog, SourceError> {
        let catalog = self
            .cache
            .try_get_with(CATALOG_KEY, async {
                tracing::trace!("Catalog cache miss");
                let centers = self.inner.fetch_all().await?;
                Ok::<_, SourceError>(Catalog {
                    centers: Arc::new(centers),
                    fetched_at: Utc::now(),
                })
            })
            .await?;

        tracing::trace!("Catalog ready ({} centers)", catalog.centers.len());
        Ok(catalog)
    }

    /// Drop the cached catalog so the next call refetches
    pub async fn invalidate(&self) {
        self.cache.invalidate(CATALOG_KEY).await;
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: RecordSource + Sync> RecordSource for CachedSource<S> {
    async fn fetch_all(&self) -> Result<Vec<Center>, SourceError> {
        let catalog = self.catalog().await?;
        Ok(catalog.centers.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl RecordSource for CountingSource {
        async fn fetch_all(&self) -> Result<Vec<Center>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SourceError::ApiError("unavailable".into()));
            }
            Ok(vec![Center {
                id: "1".to_string(),
                name: "Hemocentro".to_string(),
                region: "SP".to_string(),
                address: String::new(),
                phone: None,
                latitude: -23.5,
                longitude: -46.6,
            }])
        }
    }

    #[tokio::test]
    async fn test_fetches_once() {
        let cached = CachedSource::with_default_ttl(CountingSource {
            calls: AtomicUsize::new(0),
            fail: false,
        });

        assert_eq!(cached.fetch_all().await.unwrap().len(), 1);
        assert_eq!(cached.fetch_all().await.unwrap().len(), 1);
        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 1);

        cached.invalidate().await;
        cached.fetch_all().await.unwrap();
        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_not_cached() {
        let cached = CachedSource::with_default_ttl(CountingSource {
            calls: AtomicUsize::new(0),
            fail: true,
        });

        assert!(cached.fetch_all().await.is_err());
        assert!(cached.fetch_all().await.is_err());
        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
    }

    struct SlowSource {
        calls: AtomicUsize,
    }

    impl RecordSource for SlowSource {
        async fn fetch_all(&self) -> Result<Vec<Center>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_fetch() {
        let cached = CachedSource::with_default_ttl(SlowSource {
            calls: AtomicUsize::new(0),
        });

        let (first, second, third) =
            tokio::join!(cached.catalog(), cached.catalog(), cached.catalog());
        assert!(first.is_ok() && second.is_ok() && third.is_ok());
        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 1);
    }
}
