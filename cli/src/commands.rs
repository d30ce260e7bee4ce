//! Subcommand implementations. Each returns the text to print.

use std::collections::HashSet;
use std::io::Write;

use anyhow::{Context, Result};
use catalog_core::{
    filter_resources, CatalogService, ResourceCache, ResourceCard, ResourceDetail, Transport,
};
use tracing::warn;

use crate::args::{ListArgs, ResourceArgs};
use crate::render;

pub fn list<T: Transport>(service: &mut CatalogService<T>, args: &ListArgs) -> Result<String> {
    list_once(service, args, args.refresh)
}

fn list_once<T: Transport>(
    service: &mut CatalogService<T>,
    args: &ListArgs,
    force_refresh: bool,
) -> Result<String> {
    let resources = service
        .resources(force_refresh)
        .context("failed to load resources")?;
    let search = args.search.as_deref().unwrap_or("");
    let matching = filter_resources(&resources, search);

    // Favorite markers are cosmetic; the listing still renders without them.
    let favorites: HashSet<String> = match service.favorites() {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => {
            warn!("could not load favorites: {e}");
            HashSet::new()
        }
    };

    let base = service.catalog().base_url();
    let cards: Vec<ResourceCard> = matching
        .into_iter()
        .map(|r| ResourceCard::new(r, base, favorites.contains(&r.id.to_string())))
        .collect();
    Ok(render::cards(&cards, args.search.as_deref()))
}

/// Print the listing, then keep re-printing it with a forced refresh.
///
/// `between_rounds` runs after each round and decides whether there is
/// another; the binary saves the cache and sleeps there.
pub fn watch<T: Transport>(
    service: &mut CatalogService<T>,
    args: &ListArgs,
    out: &mut impl Write,
    mut between_rounds: impl FnMut(&ResourceCache) -> bool,
) -> Result<()> {
    let mut force_refresh = args.refresh;
    loop {
        let text = list_once(service, args, force_refresh)?;
        write!(out, "{text}")?;
        out.flush()?;
        if !between_rounds(service.cache()) {
            return Ok(());
        }
        force_refresh = true;
    }
}

pub fn show<T: Transport>(service: &CatalogService<T>, args: &ResourceArgs) -> Result<String> {
    let resource = service
        .resource(args.id)
        .with_context(|| format!("failed to load resource {}", args.id))?;
    let is_favorite = service
        .favorite_status(args.id)
        .with_context(|| format!("failed to load favorite status of {}", args.id))?;
    let view = ResourceDetail::new(&resource, service.catalog().base_url(), is_favorite);
    Ok(render::detail(&view))
}

pub fn toggle<T: Transport>(service: &CatalogService<T>, args: &ResourceArgs) -> Result<String> {
    let toggle = service
        .toggle_favorite(args.id)
        .with_context(|| format!("failed to toggle favorite {}", args.id))?;
    Ok(format!("{}\n", toggle.message))
}

pub fn favorites<T: Transport>(service: &CatalogService<T>) -> Result<String> {
    let mut ids = service.favorites().context("failed to load favorites")?;
    if ids.is_empty() {
        return Ok(format!("{} has no favorites.\n", service.user_id()));
    }
    ids.sort();
    Ok(ids.iter().map(|id| format!("{id}\n")).collect())
}
