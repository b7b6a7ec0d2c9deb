// Document Source Module
// Loads the benchmark export from a local file or an HTTP URL, derives the
// leaderboard, and memoizes the first outcome for the process lifetime.

use crate::errors::BoardError;
use crate::leaderboard::build_view_map;
use crate::types::{EvalDocument, LeaderboardData};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Where the benchmark export comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// Interpret a CLI-style string: `http://`/`https://` prefixes mean a
    /// URL, everything else a file path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::File(PathBuf::from(raw))
        }
    }

    /// Fetch and decode the raw document.
    pub async fn fetch(&self) -> Result<EvalDocument, BoardError> {
        match self {
            DataSource::File(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| BoardError::Io(format!("{}: {e}", path.display())))?;
                EvalDocument::from_json(&content).map_err(|e| BoardError::Decode(e.to_string()))
            }
            DataSource::Url(url) => {
                let response = reqwest::get(url)
                    .await
                    .map_err(|e| BoardError::Fetch(e.to_string()))?;
                if !response.status().is_success() {
                    return Err(BoardError::Fetch(format!(
                        "load failed: {}",
                        response.status().as_u16()
                    )));
                }
                response
                    .json::<EvalDocument>()
                    .await
                    .map_err(|e| BoardError::Decode(e.to_string()))
            }
        }
    }

    /// Fetch the document and derive the full leaderboard from it.
    pub async fn load(&self) -> Result<LeaderboardData, BoardError> {
        let document = self.fetch().await?;
        Ok(derive_leaderboard(&document))
    }
}

/// Build the leaderboard views from a decoded document, passing the upstream
/// timestamp through for display.
pub fn derive_leaderboard(document: &EvalDocument) -> LeaderboardData {
    LeaderboardData {
        last_updated: document.last_updated.clone(),
        views: build_view_map(&document.data_structure.models),
    }
}

/// Memoizing wrapper around a [`DataSource`].
///
/// The first `load` performs the fetch and derivation; its outcome - success
/// or the opaque failure string - is cached and returned unchanged on every
/// later call. Refreshing the data requires a process restart. Concurrent
/// first calls share a single upstream fetch.
pub struct CachedSource {
    source: DataSource,
    cell: OnceCell<Result<Arc<LeaderboardData>, String>>,
}

impl CachedSource {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Load the leaderboard, fetching upstream at most once.
    pub async fn load(&self) -> Result<Arc<LeaderboardData>, String> {
        self.cell
            .get_or_init(|| async {
                match self.source.load().await {
                    Ok(data) => {
                        tracing::info!(
                            models = data.views.overall.len(),
                            last_updated = %data.last_updated,
                            "leaderboard built"
                        );
                        Ok(Arc::new(data))
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "leaderboard load failed");
                        Err(e.to_string())
                    }
                }
            })
            .await
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": "1.0",
        "last_updated": "2025-06-01T00:00:00+00:00",
        "data_structure": {
            "models": [
                {"model_id": "a", "name": "A",
                 "organization": {"id": "openai", "name": "OpenAI", "icon_url": null},
                 "scores": {"chat": 0.8}},
                {"model_id": "b", "name": "B",
                 "organization": {"id": "anthropic", "name": "Anthropic", "icon_url": null},
                 "scores": {"gpqa": 0.9}}
            ],
            "last_fetched": null
        }
    }"#;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("llmboard-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_parse_source() {
        assert!(matches!(
            DataSource::parse("https://example.com/data.json"),
            DataSource::Url(_)
        ));
        assert!(matches!(
            DataSource::parse("http://localhost/data.json"),
            DataSource::Url(_)
        ));
        assert!(matches!(
            DataSource::parse("data/leaderboard.json"),
            DataSource::File(_)
        ));
    }

    #[test]
    fn test_derive_leaderboard() {
        let document = EvalDocument::from_json(SAMPLE).unwrap();
        let data = derive_leaderboard(&document);
        assert_eq!(data.last_updated, "2025-06-01T00:00:00+00:00");
        assert_eq!(data.views.overall.len(), 2);
        assert_eq!(data.views.overall[0].name, "B");
    }

    #[tokio::test]
    async fn test_file_source_loads() {
        let path = temp_path("load.json");
        tokio::fs::write(&path, SAMPLE).await.unwrap();
        let data = DataSource::File(path.clone()).load().await.unwrap();
        assert_eq!(data.views.overall.len(), 2);
        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = DataSource::File(temp_path("missing.json")).load().await;
        assert!(matches!(result, Err(BoardError::Io(_))));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let path = temp_path("bad.json");
        tokio::fs::write(&path, "not json").await.unwrap();
        let result = DataSource::File(path.clone()).load().await;
        assert!(matches!(result, Err(BoardError::Decode(_))));
        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_cached_source_loads_once() {
        let path = temp_path("cached.json");
        tokio::fs::write(&path, SAMPLE).await.unwrap();
        let cached = CachedSource::new(DataSource::File(path.clone()));
        let first = cached.load().await.unwrap();
        // Corrupt the file after the first load; the cache must not re-read.
        tokio::fs::write(&path, "not json").await.unwrap();
        let second = cached.load().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_cached_source_caches_failure() {
        let path = temp_path("cached-failure.json");
        let cached = CachedSource::new(DataSource::File(path.clone()));
        let first = cached.load().await.unwrap_err();
        // Even after the file appears, the failed outcome stays cached.
        tokio::fs::write(&path, SAMPLE).await.unwrap();
        let second = cached.load().await.unwrap_err();
        assert_eq!(first, second);
        tokio::fs::remove_file(&path).await.ok();
    }
}
