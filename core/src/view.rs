//! View models for the list and detail screens.
//!
//! Everything here is pure: it turns `Resource` records into the strings a
//! front-end shows, without knowing how they will be drawn.

use chrono::{DateTime, Utc};

use crate::types::{Description, Resource, ResourceKind};

/// Longest description shown on a list card, in characters.
pub const SUMMARY_CHARS: usize = 160;

/// Resources whose title or kind contains `term`, ignoring case.
///
/// An empty term keeps everything.
pub fn filter_resources<'a>(resources: &'a [Resource], term: &str) -> Vec<&'a Resource> {
    let term = term.to_lowercase();
    resources
        .iter()
        .filter(|resource| {
            resource.attributes.title.to_lowercase().contains(&term)
                || resource.attributes.kind.to_lowercase().contains(&term)
        })
        .collect()
}

/// Plain text of a description. Rich-text blocks contribute the text of
/// their first child; empty pieces are dropped and the rest joined by a space.
pub fn description_text(description: Option<&Description>) -> String {
    match description {
        None => String::new(),
        Some(Description::Text(text)) => text.clone(),
        Some(Description::Blocks(blocks)) => blocks
            .iter()
            .filter_map(|block| block.children.first())
            .map(|child| child.text.as_str())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Absolute URL of the resource's first image. Relative CMS upload paths are
/// resolved against `catalog_base`.
pub fn image_url(resource: &Resource, catalog_base: &str) -> Option<String> {
    let url = &resource.primary_image()?.attributes.url;
    if url.starts_with("http") {
        Some(url.clone())
    } else {
        Some(format!("{}{url}", catalog_base.trim_end_matches('/')))
    }
}

pub fn kind_label(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn short_date(at: &DateTime<Utc>) -> String {
    at.format("%-d %b %Y").to_string()
}

pub fn long_date(at: &DateTime<Utc>) -> String {
    at.format("%-d %B %Y").to_string()
}

fn summarize(text: &str) -> String {
    if text.chars().count() <= SUMMARY_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(SUMMARY_CHARS).collect();
    format!("{}…", cut.trim_end())
}

/// One entry of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCard {
    pub id: u64,
    pub title: String,
    pub kind: ResourceKind,
    pub kind_label: String,
    pub summary: String,
    pub published: Option<String>,
    pub image_url: Option<String>,
    pub is_favorite: bool,
}

impl ResourceCard {
    pub fn new(resource: &Resource, catalog_base: &str, is_favorite: bool) -> Self {
        let attributes = &resource.attributes;
        Self {
            id: resource.id,
            title: attributes.title.clone(),
            kind: resource.kind(),
            kind_label: kind_label(&attributes.kind),
            summary: summarize(&description_text(attributes.description.as_ref())),
            published: attributes.published_at.as_ref().map(short_date),
            image_url: image_url(resource, catalog_base),
            is_favorite,
        }
    }
}

/// The single-resource screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDetail {
    pub id: u64,
    pub title: String,
    pub kind: ResourceKind,
    pub kind_label: String,
    pub description: String,
    pub published: Option<String>,
    pub image_url: Option<String>,
    pub link: Option<String>,
    pub is_favorite: bool,
}

impl ResourceDetail {
    pub fn new(resource: &Resource, catalog_base: &str, is_favorite: bool) -> Self {
        let attributes = &resource.attributes;
        Self {
            id: resource.id,
            title: attributes.title.clone(),
            kind: resource.kind(),
            kind_label: kind_label(&attributes.kind),
            description: description_text(attributes.description.as_ref()),
            published: attributes.published_at.as_ref().map(long_date),
            image_url: image_url(resource, catalog_base),
            link: attributes.url.clone().filter(|url| !url.is_empty()),
            is_favorite,
        }
    }
}
