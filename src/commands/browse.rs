//! Catalog listing and local search commands.

use owo_colors::OwoColorize;

use crate::browse::{Coordinator, EmptyKind};
use crate::display::tool_table;
use crate::error::Result;
use crate::session::BrowseSession;
use crate::types::SortMode;

use super::{build_provider, print_json};

/// List tools, optionally filtered by a URL-style query token.
///
/// `query` goes through the same intent derivation the web client uses: a
/// category id selects that category, anything else is a provider-side
/// text search. `pages` controls how many infinite-scroll steps to take.
pub async fn cmd_ls(query: Option<&str>, sort: SortMode, pages: u32, output_json: bool) -> Result<()> {
    let (config, provider) = build_provider()?;
    let coordinator = Coordinator::new(config.page_size, config.search.threshold);
    let mut session =
        BrowseSession::new(coordinator, provider.clone(), provider).with_sort(sort);

    match query {
        Some(query) if !query.trim().is_empty() => session.set_url_query(query).await,
        _ => session.start().await,
    }
    for _ in 1..pages {
        session.scroll_end().await;
    }

    let vm = session.view_model();
    if let Some(error) = &vm.load_error {
        eprintln!("{} {}", "warning:".yellow(), error);
    }

    if output_json {
        return print_json(&vm.tools);
    }

    if vm.tools.is_empty() {
        println!("No tools found.");
        return Ok(());
    }

    println!("{}", tool_table(&vm.tools, |id| vm.favorite_ids.contains(id)));
    if vm.has_more {
        println!("{}", "More available; raise --pages to fetch further.".dimmed());
    } else {
        println!("{}", "No more tools found.".dimmed());
    }
    Ok(())
}

/// Fuzzy-search locally over fetched pages.
///
/// Fetches `pages` pages for the category (or the whole catalog), then
/// runs the typo-tolerant local filter over them, the same path the web
/// client's live search box takes.
pub async fn cmd_search(
    query: &str,
    category: Option<&str>,
    pages: u32,
    output_json: bool,
) -> Result<()> {
    if let Some(category) = category
        && !crate::categories::is_category_id(category)
    {
        return Err(crate::error::HubError::InvalidCategory(category.to_string()));
    }

    let (config, provider) = build_provider()?;
    let coordinator = Coordinator::new(config.page_size, config.search.threshold);
    let mut session = BrowseSession::new(coordinator, provider.clone(), provider);

    match category {
        Some(category) => session.set_url_query(category).await,
        None => session.start().await,
    }
    for _ in 1..pages {
        session.scroll_end().await;
    }

    let total_fetched = session.view_model().tools.len();
    session.set_live_search(query);
    let vm = session.view_model();

    if output_json {
        return print_json(&vm.tools);
    }

    match vm.empty_state {
        Some(EmptyKind::NoLocalMatches) => {
            println!("No tools match '{query}'. Try different keywords.");
        }
        Some(_) => {
            println!("No tools found.");
        }
        None => {
            println!("{}", tool_table(&vm.tools, |id| vm.favorite_ids.contains(id)));
            println!(
                "{}",
                format!("{} of {} fetched tools match", vm.tools.len(), total_fetched).dimmed()
            );
        }
    }
    Ok(())
}
