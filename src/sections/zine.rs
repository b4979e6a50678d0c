//! Featured posts from the culture zine, a Ghost blog outside the content API.

use crate::api::types::EntityId;
use crate::api::{get_json, ApiRequest, ContentSource};
use crate::config::CultureZineConfig;
use crate::error::FetchError;
use serde::{Deserialize, Serialize};

const POST_FIELDS: &str = "id,title,url,feature_image,primary_tag";

#[derive(Debug, Deserialize)]
struct PostsResponse {
    posts: Vec<GhostPost>,
}

#[derive(Debug, Deserialize)]
struct GhostPost {
    id: EntityId,
    title: String,
    url: String,
    feature_image: Option<String>,
    primary_tag: Option<GhostTag>,
}

#[derive(Debug, Deserialize)]
struct GhostTag {
    name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CulturePost {
    pub id: EntityId,
    pub title: String,
    pub url: String,
    pub img: Option<String>,
    /// Name of the post's primary tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl GhostPost {
    fn into_culture_post(self) -> CulturePost {
        CulturePost {
            id: self.id,
            title: self.title,
            url: self.url,
            img: self.feature_image,
            source: self.primary_tag.map(|t| t.name),
        }
    }
}

pub struct CultureZine<'a> {
    api: &'a dyn ContentSource,
    config: &'a CultureZineConfig,
}

impl<'a> CultureZine<'a> {
    pub fn new(api: &'a dyn ContentSource, config: &'a CultureZineConfig) -> Self {
        Self { api, config }
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::new(self.config.posts_path.as_str())
            .param("client_id", &self.config.client_id)
            .param("client_secret", &self.config.client_secret)
            .param("filter", "featured:true")
            .param("limit", self.config.post_limit)
            .param("fields", POST_FIELDS)
            .param("include", "tags")
    }

    pub async fn build(&self) -> Result<Vec<CulturePost>, FetchError> {
        let resp: PostsResponse = get_json(self.api, &self.request()).await?;
        let posts: Vec<CulturePost> = resp.posts.into_iter().map(GhostPost::into_culture_post).collect();
        tracing::debug!(section = "cultureZine", count = posts.len(), "section built");
        Ok(posts)
    }
}
