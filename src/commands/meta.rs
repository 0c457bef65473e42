//! Catalog metadata commands.

use crate::display::category_table;
use crate::error::Result;
use crate::provider::ListProvider;

use super::{build_provider, print_json};

/// Per-category tool counts.
pub async fn cmd_categories(output_json: bool) -> Result<()> {
    let (_config, provider) = build_provider()?;
    let mut counts = provider.category_counts().await?;
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    if output_json {
        return print_json(&counts);
    }
    println!("{}", category_table(&counts));
    Ok(())
}

/// Total number of catalog entries.
pub async fn cmd_count() -> Result<()> {
    let (_config, provider) = build_provider()?;
    let count = provider.total_tool_count().await?;
    println!("{count}");
    Ok(())
}
