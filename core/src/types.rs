//! Wire types for the CMS catalog and the favorites service.
//!
//! # Design
//! Catalog field names follow the CMS content type (Spanish keys such as
//! `titulo` and `tipo_recurso`); the Rust fields use English names and serde
//! renames. Favorites DTOs are defined independently from the
//! favorites-server crate; integration tests catch drift between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `{ "data": ..., "meta": ... }` wrapper the CMS puts around every payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEnvelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: serde_json::Value,
}

/// A learning resource as returned by the CMS.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    pub id: u64,
    pub attributes: ResourceAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAttributes {
    #[serde(rename = "titulo", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<Description>,
    /// Free-form kind label; see [`ResourceKind`] for the recognised values.
    #[serde(rename = "tipo_recurso", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "imagen", default)]
    pub image: Option<Media>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Either plain text or the CMS rich-text block list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Blocks(Vec<DescriptionBlock>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DescriptionBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub children: Vec<BlockChild>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockChild {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Media {
    #[serde(default)]
    pub data: Option<Vec<MediaFile>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaFile {
    pub id: u64,
    pub attributes: MediaAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaAttributes {
    pub url: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "alternativeText", default)]
    pub alternative_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Article,
    Video,
    Other,
}

impl ResourceKind {
    /// Case-insensitive; anything unrecognised is `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "artículo" => ResourceKind::Article,
            "video" => ResourceKind::Video,
            _ => ResourceKind::Other,
        }
    }
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        ResourceKind::parse(&self.attributes.kind)
    }

    /// First attached image, if any.
    pub fn primary_image(&self) -> Option<&MediaFile> {
        self.attributes.image.as_ref()?.data.as_ref()?.first()
    }
}

/// `{ "success": ..., "message": ..., "data": ... }` envelope of the favorites service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoritesEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteList {
    pub favorites: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub is_favorite: bool,
}

/// Outcome of toggling a favorite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub is_favorite: bool,
    pub message: String,
}
