//! CLI command implementations.

pub mod browse;
pub mod fav;
pub mod meta;
pub mod show;

pub use browse::{cmd_ls, cmd_search};
pub use fav::{cmd_fav_add, cmd_fav_ls, cmd_fav_rm};
pub use meta::{cmd_categories, cmd_count};
pub use show::{cmd_featured, cmd_related, cmd_show};

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::provider::HttpProvider;

/// Identity placeholder for favorites commands; the HTTP store scopes by
/// bearer token, so this never reaches the wire.
pub(crate) const CLI_IDENTITY: &str = "cli";

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load config and build the API client every command shares.
pub(crate) fn build_provider() -> Result<(Config, HttpProvider)> {
    let config = Config::load()?;
    let provider = HttpProvider::new(&config)?;
    Ok((config, provider))
}
