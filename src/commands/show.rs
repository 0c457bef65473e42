//! Single-tool lookup commands.

use crate::display::{render_tool_detail, tool_table};
use crate::error::{HubError, Result};
use crate::provider::ListProvider;

use super::{build_provider, print_json};

/// Show one tool by id (or by name for non-UUID identifiers).
pub async fn cmd_show(id: &str, output_json: bool) -> Result<()> {
    let (_config, provider) = build_provider()?;

    let Some(tool) = provider.get_tool(id).await? else {
        return Err(HubError::ToolNotFound(id.to_string()));
    };

    if output_json {
        return print_json(&tool);
    }
    print!("{}", render_tool_detail(&tool));
    Ok(())
}

/// List trending tools.
pub async fn cmd_featured(limit: u32, output_json: bool) -> Result<()> {
    let (_config, provider) = build_provider()?;
    let tools = provider.featured_tools(limit).await?;

    if output_json {
        return print_json(&tools);
    }
    if tools.is_empty() {
        println!("No featured tools right now.");
        return Ok(());
    }
    println!("{}", tool_table(&tools, |_| false));
    Ok(())
}

/// List tools in the same category as the given one.
pub async fn cmd_related(id: &str, limit: u32, output_json: bool) -> Result<()> {
    let (_config, provider) = build_provider()?;

    let Some(tool) = provider.get_tool(id).await? else {
        return Err(HubError::ToolNotFound(id.to_string()));
    };
    let related = provider.related_tools(&tool.category, &tool.id, limit).await?;

    if output_json {
        return print_json(&related);
    }
    if related.is_empty() {
        println!("No related tools in '{}'.", tool.category_label);
        return Ok(());
    }
    println!("{}", tool_table(&related, |_| false));
    Ok(())
}
