//! CLI argument definitions using clap derive

use std::path::PathBuf;

use catalog_core::ClientConfig;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::cache_file::CacheFile;

/// Browse learning resources and manage favorites
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// CMS base URL
    #[arg(long, global = true, env = "CATALOG_API_URL")]
    pub catalog_url: Option<String>,

    /// Favorites service base URL
    #[arg(long, global = true, env = "FAVORITES_API_URL")]
    pub favorites_url: Option<String>,

    /// User whose favorites are shown
    #[arg(long, global = true, env = "FAVORITES_USER_ID")]
    pub user: Option<String>,

    /// Where the resource listing is kept between runs
    /// [default: <cache dir>/catalog/resources.json]
    #[arg(long, global = true, env = "CATALOG_CACHE_FILE")]
    pub cache_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List resources
    List(ListArgs),

    /// Show a single resource
    Show(ResourceArgs),

    /// Add or remove a resource from favorites
    Toggle(ResourceArgs),

    /// List favorited resource ids
    Favorites,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only resources whose title or kind contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Bypass the cache
    #[arg(long)]
    pub refresh: bool,

    /// Keep running and refresh every five minutes
    #[arg(long)]
    pub watch: bool,
}

#[derive(Args, Debug)]
pub struct ResourceArgs {
    /// Resource id
    pub id: u64,
}

impl Cli {
    /// Flag or environment values, with defaults for anything unset or empty.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::from_lookup(|key| match key {
            "CATALOG_API_URL" => self.catalog_url.clone(),
            "FAVORITES_API_URL" => self.favorites_url.clone(),
            "FAVORITES_USER_ID" => self.user.clone(),
            _ => None,
        })
    }

    pub fn resource_cache(&self) -> CacheFile {
        CacheFile::new(self.cache_file.clone().or_else(CacheFile::default_path))
    }
}
