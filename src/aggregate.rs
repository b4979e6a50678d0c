use crate::api::http::HttpContentSource;
use crate::api::ContentSource;
use crate::config::Config;
use crate::document::{AggregatedPayload, HomeData, HomeDocument};
use crate::error::{AggregationError, FetchError};
use crate::sections::{AppsWeLove, CultureZine, CuratedCollections};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Builds the homepage payload. Holds no state between runs.
pub struct Aggregator {
    content: Arc<dyn ContentSource>,
    zine: Arc<dyn ContentSource>,
    config: Config,
}

impl Aggregator {
    pub fn new(content: Arc<dyn ContentSource>, zine: Arc<dyn ContentSource>, config: Config) -> Self {
        Self { content, zine, config }
    }

    /// HTTP sources for the content API and the zine, as configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let content = HttpContentSource::new(
            &config.content_api.base_url,
            config.content_api.request_timeout(),
        )?;
        let zine = HttpContentSource::new(
            &config.culture_zine.base_url,
            config.culture_zine.request_timeout(),
        )?;
        Ok(Self::new(Arc::new(content), Arc::new(zine), config.clone()))
    }

    /// Run every section builder concurrently and merge the results into the
    /// document. All builders are awaited; if any failed the run fails and no
    /// payload is produced.
    pub async fn aggregate(&self, document: &HomeDocument) -> Result<AggregatedPayload, AggregationError> {
        let started = Instant::now();

        let zine = CultureZine::new(&*self.zine, &self.config.culture_zine);
        let collections = CuratedCollections::new(
            &*self.content,
            &self.config.curated_collections,
            self.config.content_api.page_limit,
        );
        let apps = AppsWeLove::new(&*self.content, &self.config.apps_we_love);

        let (culture_zine, curated_collections, apps_we_love) = tokio::join!(
            zine.build(),
            collections.build(&document.curated_collections),
            apps.build(&document.apps_we_love),
        );

        // Inspect every result before bailing so each failure is logged.
        let culture_zine = section("cultureZine", culture_zine);
        let curated_collections = section("curatedCollections", curated_collections);
        let apps_we_love = section("appsWeLove", apps_we_love);

        let data = HomeData {
            culture_zine: culture_zine?,
            curated_collections: curated_collections?,
            apps_we_love: apps_we_love?,
        };

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            culture_zine = data.culture_zine.len(),
            curated_collections = data.curated_collections.len(),
            apps_we_love = data.apps_we_love.len(),
            "homepage aggregated"
        );
        Ok(AggregatedPayload::new(document.clone(), data))
    }

    /// Aggregate and write the payload to `path`. On failure `path` is left
    /// as it was, so the last good homepage stays published.
    pub async fn build_and_publish(&self, document: &HomeDocument, path: &Path) -> Result<AggregatedPayload> {
        match self.aggregate(document).await {
            Ok(payload) => {
                payload.publish(path)?;
                tracing::info!(path = %path.display(), "homepage payload published");
                Ok(payload)
            }
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    "homepage build failed, keeping the published payload"
                );
                Err(anyhow::Error::new(e).context("homepage build failed; nothing published"))
            }
        }
    }
}

fn section<T>(name: &'static str, result: Result<T, FetchError>) -> Result<T, AggregationError> {
    result.map_err(|source| {
        tracing::warn!(section = name, error = %source, "section build failed");
        AggregationError { section: name, source }
    })
}
