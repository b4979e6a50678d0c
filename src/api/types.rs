use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Stable identity of a remote record. The content API uses numeric ids for
/// users and string ids for projects and collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(u64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for EntityId {
    fn from(n: u64) -> Self {
        EntityId::Number(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

/// Anything the content API identifies by `id`.
pub trait Entity {
    fn entity_id(&self) -> &EntityId;
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
    /// Opaque ordering cursor; only its presence matters to the walker.
    #[serde(default)]
    pub last_order_value: Option<Value>,
}

// ── Content API records ──────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCollection {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProject {
    pub id: EntityId,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub description: String,
}

/// A user as returned by the content API, display fields plus whatever else
/// the API sends along.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    pub id: EntityId,
    pub avatar_url: Option<String>,
    pub avatar_thumbnail_url: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub has_cover_image: Option<bool>,
    pub cover_color: Option<String>,
    pub thanks_count: Option<u64>,
    pub utc_offset: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for RemoteCollection {
    fn entity_id(&self) -> &EntityId {
        &self.id
    }
}

impl Entity for RemoteProject {
    fn entity_id(&self) -> &EntityId {
        &self.id
    }
}

impl Entity for RemoteUser {
    fn entity_id(&self) -> &EntityId {
        &self.id
    }
}

/// The fixed allow-list of user fields the homepage renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimmedUser {
    pub id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_cover_image: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thanks_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<i64>,
}

impl From<RemoteUser> for TrimmedUser {
    fn from(user: RemoteUser) -> Self {
        Self {
            id: user.id,
            avatar_url: user.avatar_url,
            avatar_thumbnail_url: user.avatar_thumbnail_url,
            login: user.login,
            name: user.name,
            location: user.location,
            color: user.color,
            description: user.description,
            has_cover_image: user.has_cover_image,
            cover_color: user.cover_color,
            thanks_count: user.thanks_count,
            utc_offset: user.utc_offset,
        }
    }
}
