use super::{canonical_record, or_canonical};
use crate::api::types::{RemoteProject, RemoteUser, TrimmedUser};
use crate::api::{get_json, ApiRequest, ContentSource};
use crate::config::AppsWeLoveConfig;
use crate::error::FetchError;
use crate::pagination::fetch_first_page;
use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Editor-authored entry in `appsWeLove`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSection {
    pub domain: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    pub users: Vec<TrimmedUser>,
    pub description: String,
}

/// Featured projects with the first few of their members.
pub struct AppsWeLove<'a> {
    api: &'a dyn ContentSource,
    config: &'a AppsWeLoveConfig,
}

impl<'a> AppsWeLove<'a> {
    pub fn new(api: &'a dyn ContentSource, config: &'a AppsWeLoveConfig) -> Self {
        Self { api, config }
    }

    pub async fn build(&self, descriptors: &[ProjectDescriptor]) -> Result<Vec<ProjectSection>, FetchError> {
        if descriptors.is_empty() {
            return Ok(Vec::new());
        }

        let request = ApiRequest::new("/v1/projects/by/domain")
            .keys("domain", descriptors.iter().map(|d| &d.domain));
        let canonical: HashMap<String, RemoteProject> = get_json(self.api, &request).await?;

        let sections = try_join_all(descriptors.iter().map(|d| self.build_one(d, &canonical))).await?;
        tracing::debug!(section = "appsWeLove", count = sections.len(), "section built");
        Ok(sections)
    }

    async fn build_one(
        &self,
        descriptor: &ProjectDescriptor,
        canonical: &HashMap<String, RemoteProject>,
    ) -> Result<ProjectSection, FetchError> {
        let project = canonical_record(canonical, "project", &descriptor.domain)?;

        // One page only: the section shows a few faces, not the whole team.
        let users: Vec<RemoteUser> = fetch_first_page(
            self.api,
            &ApiRequest::new("/v1/projects/by/domain/users")
                .param("domain", &descriptor.domain)
                .param("limit", self.config.user_page_limit),
        )
        .await?;

        Ok(ProjectSection {
            domain: descriptor.domain.clone(),
            title: or_canonical(descriptor.title.as_deref(), &project.domain),
            img: descriptor.img.clone(),
            users: users
                .into_iter()
                .take(self.config.max_users)
                .map(TrimmedUser::from)
                .collect(),
            description: or_canonical(descriptor.description.as_deref(), &project.description),
        })
    }
}
