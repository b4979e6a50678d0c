use super::{canonical_record, or_canonical};
use crate::api::types::{RemoteCollection, RemoteProject, RemoteUser, TrimmedUser};
use crate::api::{get_json, ApiRequest, ContentSource};
use crate::collector::{collect_unique_stream, UniqueEntities};
use crate::config::CuratedCollectionsConfig;
use crate::error::FetchError;
use crate::pagination::fetch_all_pages;
use futures_util::future::try_join_all;
use futures_util::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Editor-authored entry in `curatedCollections`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDescriptor {
    pub full_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSection {
    pub title: String,
    pub description: String,
    pub full_url: String,
    pub users: Vec<TrimmedUser>,
    /// Number of projects in the collection.
    pub count: usize,
    pub collection_style: String,
}

/// Featured collections: canonical metadata, project count, and a handful of
/// distinct contributors per collection.
pub struct CuratedCollections<'a> {
    api: &'a dyn ContentSource,
    config: &'a CuratedCollectionsConfig,
    page_limit: u32,
}

impl<'a> CuratedCollections<'a> {
    pub fn new(api: &'a dyn ContentSource, config: &'a CuratedCollectionsConfig, page_limit: u32) -> Self {
        Self { api, config, page_limit }
    }

    pub async fn build(&self, descriptors: &[CollectionDescriptor]) -> Result<Vec<CollectionSection>, FetchError> {
        if descriptors.is_empty() {
            return Ok(Vec::new());
        }

        let request = ApiRequest::new("/v1/collections/by/fullUrl")
            .keys("fullUrl", descriptors.iter().map(|d| &d.full_url));
        let canonical: HashMap<String, RemoteCollection> = get_json(self.api, &request).await?;

        let sections = try_join_all(
            descriptors
                .iter()
                .enumerate()
                .map(|(position, descriptor)| self.build_one(position, descriptor, &canonical)),
        )
        .await?;

        tracing::debug!(section = "curatedCollections", count = sections.len(), "section built");
        Ok(sections)
    }

    async fn build_one(
        &self,
        position: usize,
        descriptor: &CollectionDescriptor,
        canonical: &HashMap<String, RemoteCollection>,
    ) -> Result<CollectionSection, FetchError> {
        let collection = canonical_record(canonical, "collection", &descriptor.full_url)?;

        let projects: Vec<RemoteProject> = fetch_all_pages(
            self.api,
            ApiRequest::new("/v1/collections/by/fullUrl/projects")
                .param("fullUrl", &descriptor.full_url)
                .param("limit", self.page_limit),
        )
        .await?;

        let api = self.api;
        let limit = self.page_limit;
        let user_groups = stream::iter(projects.iter()).then(move |project| {
            fetch_all_pages::<RemoteUser>(
                api,
                ApiRequest::new("/v1/projects/by/id/users")
                    .param("id", &project.id)
                    .param("limit", limit),
            )
        });
        let users = collect_unique_stream(UniqueEntities::new(), user_groups, self.config.max_users).await?;

        tracing::trace!(
            full_url = descriptor.full_url.as_str(),
            projects = projects.len(),
            users = users.len(),
            "collection resolved"
        );

        Ok(CollectionSection {
            title: or_canonical(descriptor.title.as_deref(), &collection.name),
            description: or_canonical(descriptor.description.as_deref(), &collection.description),
            full_url: descriptor.full_url.clone(),
            users: users.into_vec().into_iter().map(TrimmedUser::from).collect(),
            count: projects.len(),
            collection_style: or_canonical(descriptor.style.as_deref(), &self.default_style(position)),
        })
    }

    /// Palette entry for `position`, wrapping around the palette.
    fn default_style(&self, position: usize) -> String {
        self.config.styles.iter().cycle().nth(position).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeContentSource;
    use serde_json::json;

    fn descriptor(full_url: &str) -> CollectionDescriptor {
        CollectionDescriptor {
            full_url: full_url.to_string(),
            title: None,
            description: None,
            style: None,
            extra: Map::new(),
        }
    }

    fn users(ids: &[u64]) -> Value {
        Value::Array(ids.iter().map(|id| json!({ "id": id, "login": format!("user{}", id) })).collect())
    }

    /// One collection `key` holding a single project `proj-<key>` with users `ids`.
    fn with_collection(api: FakeContentSource, key: &str, ids: &[u64]) -> FakeContentSource {
        let project = format!("proj-{}", key.replace('/', "-"));
        api.route(
            &format!("/v1/collections/by/fullUrl/projects?fullUrl={}&limit=100", key),
            json!({ "items": [{ "id": project }], "hasMore": false }),
        )
        .route(
            &format!("/v1/projects/by/id/users?id={}&limit=100", project),
            json!({ "items": users(ids), "hasMore": false }),
        )
    }

    #[tokio::test]
    async fn test_positions_and_styles_follow_descriptors() {
        let api = FakeContentSource::new().route(
            "/v1/collections/by/fullUrl?fullUrl=a/one&fullUrl=a/two&fullUrl=a/three&fullUrl=a/four",
            json!({
                "a/one": { "id": 1, "name": "One", "description": "first" },
                "a/two": { "id": 2, "name": "Two", "description": "second" },
                "a/three": { "id": 3, "name": "Three", "description": "third" },
                "a/four": { "id": 4, "name": "Four", "description": "fourth" }
            }),
        );
        let api = with_collection(api, "a/one", &[1]);
        let api = with_collection(api, "a/two", &[2]);
        let api = with_collection(api, "a/three", &[3]);
        let api = with_collection(api, "a/four", &[4]);

        let mut two = descriptor("a/two");
        two.title = Some("Hand picked".to_string());
        two.style = Some("triangle".to_string());
        let descriptors = vec![descriptor("a/one"), two, descriptor("a/three"), descriptor("a/four")];

        let config = CuratedCollectionsConfig::default();
        let sections = CuratedCollections::new(&api, &config, 100).build(&descriptors).await.unwrap();

        assert_eq!(sections.len(), 4);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Hand picked", "Three", "Four"]);
        assert_eq!(sections[1].description, "second");
        let styles: Vec<&str> = sections.iter().map(|s| s.collection_style.as_str()).collect();
        assert_eq!(styles, vec!["wavey", "triangle", "triangle", "wavey"]);
        assert_eq!(sections[2].users[0].login.as_deref(), Some("user3"));
    }

    #[tokio::test]
    async fn test_users_stop_after_group_crossing_cap() {
        let api = FakeContentSource::new()
            .route(
                "/v1/collections/by/fullUrl?fullUrl=x/y",
                json!({ "x/y": { "id": 9, "name": "XY", "description": "" } }),
            )
            .route(
                "/v1/collections/by/fullUrl/projects?fullUrl=x/y&limit=100",
                json!({ "items": [{ "id": "p1" }, { "id": "p2" }, { "id": "p3" }], "hasMore": false }),
            )
            .route("/v1/projects/by/id/users?id=p1&limit=100", json!({ "items": users(&[1, 2, 3]), "hasMore": false }))
            .route("/v1/projects/by/id/users?id=p2&limit=100", json!({ "items": users(&[3, 4, 5, 6]), "hasMore": false }))
            .route("/v1/projects/by/id/users?id=p3&limit=100", json!({ "items": users(&[7]), "hasMore": false }));

        let config = CuratedCollectionsConfig::default();
        let sections = CuratedCollections::new(&api, &config, 100)
            .build(&[descriptor("x/y")])
            .await
            .unwrap();

        assert_eq!(sections[0].count, 3);
        assert_eq!(sections[0].users.len(), 6);
        assert_eq!(api.call_count("/v1/projects/by/id/users?id=p3"), 0);
    }

    #[tokio::test]
    async fn test_missing_canonical_collection_fails_builder() {
        let api = FakeContentSource::new().route(
            "/v1/collections/by/fullUrl?fullUrl=a/b&fullUrl=gone/away",
            json!({ "a/b": { "id": 1, "name": "AB" } }),
        );
        let api = with_collection(api, "a/b", &[1]);

        let config = CuratedCollectionsConfig::default();
        let err = CuratedCollections::new(&api, &config, 100)
            .build(&[descriptor("a/b"), descriptor("gone/away")])
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::MissingCanonicalRecord { resource: "collection", .. }));
    }

    #[tokio::test]
    async fn test_no_descriptors_makes_no_requests() {
        let api = FakeContentSource::new();
        let config = CuratedCollectionsConfig::default();
        let sections = CuratedCollections::new(&api, &config, 100).build(&[]).await.unwrap();
        assert!(sections.is_empty());
        assert!(api.calls().is_empty());
    }
}
