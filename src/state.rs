use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use dashmap::DashMap;

use crate::config::Config;
use crate::dataset;
use crate::error::DatasetError;
use crate::types::profile::ProfileRecord;

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    http: reqwest::Client,
    cache: Arc<DashMap<PathBuf, CachedDataset>>,
}

struct CachedDataset {
    modified: SystemTime,
    records: Arc<Vec<ProfileRecord>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.llm_timeout)
            .build()
            .unwrap_or_default();

        Self {
            config: Arc::new(config),
            http,
            cache: Arc::new(DashMap::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Returns the parsed dataset, re-reading the file whenever its
    /// modification time changes. Every caller gets the same immutable
    /// snapshot; a file without a readable mtime is parsed fresh each call.
    pub fn records(&self) -> Result<Arc<Vec<ProfileRecord>>, DatasetError> {
        let path = &self.config.dataset_path;
        let modified = std::fs::metadata(path).ok().and_then(|m| m.modified().ok());

        if let Some(modified) = modified {
            if let Some(cached) = self.cache.get(path) {
                if cached.modified == modified {
                    return Ok(cached.records.clone());
                }
            }
        }

        let records = Arc::new(dataset::load_dataset(path)?);
        tracing::info!("Loaded {} profiles from {}", records.len(), path.display());

        if let Some(modified) = modified {
            self.cache.insert(
                path.clone(),
                CachedDataset {
                    modified,
                    records: records.clone(),
                },
            );
        }

        Ok(records)
    }
}
