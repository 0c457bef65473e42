//! Favorites commands. These talk to the store directly; the optimistic
//! overlay only earns its keep in a long-lived interactive view.

use owo_colors::OwoColorize;

use crate::error::{HubError, Result};
use crate::provider::{FavoritesStore, ListProvider};

use super::{CLI_IDENTITY, build_provider, print_json};

/// List the signed-in user's favorites, resolving names where possible.
pub async fn cmd_fav_ls(output_json: bool) -> Result<()> {
    let (_config, provider) = build_provider()?;
    let ids = provider.favorite_ids(CLI_IDENTITY).await.map_err(auth_hint)?;

    if output_json {
        return print_json(&ids);
    }
    if ids.is_empty() {
        println!("No favorites yet.");
        return Ok(());
    }
    for id in &ids {
        match provider.get_tool(id).await? {
            Some(tool) => println!("{}  {}", id.cyan(), tool.name),
            None => println!("{}  {}", id.cyan(), "(no longer listed)".dimmed()),
        }
    }
    Ok(())
}

pub async fn cmd_fav_add(id: &str) -> Result<()> {
    let (_config, provider) = build_provider()?;
    provider
        .add_favorite(CLI_IDENTITY, id)
        .await
        .map_err(auth_hint)?;
    println!("Added {id} to favorites.");
    Ok(())
}

pub async fn cmd_fav_rm(id: &str) -> Result<()> {
    let (_config, provider) = build_provider()?;
    provider
        .remove_favorite(CLI_IDENTITY, id)
        .await
        .map_err(auth_hint)?;
    println!("Removed {id} from favorites.");
    Ok(())
}

/// The CLI equivalent of the web client's sign-in redirect.
fn auth_hint(error: HubError) -> HubError {
    match error {
        HubError::Unauthenticated => HubError::Config(
            "not signed in: set PICKAIHUB_TOKEN or auth.token in pickaihub.yaml".to_string(),
        ),
        other => other,
    }
}
