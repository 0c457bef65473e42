//! CLI output formatting.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::types::{CategoryCount, Tool};

/// A row in the tool list table
#[derive(Tabled)]
pub struct ToolRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Pricing")]
    pricing: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

fn tool_row(tool: &Tool, favorited: bool) -> ToolRow {
    let mut name = tool.name.clone();
    if tool.is_trending {
        name.push_str(" 🔥");
    }
    if tool.is_new {
        name.push_str(" [new]");
    }
    if favorited {
        name.push_str(" ★");
    }
    ToolRow {
        name,
        category: tool.category_label.clone(),
        pricing: tool.pricing_label.clone(),
        rating: format!("{:.1}", tool.rating),
        tags: tool.tags.join(", "),
    }
}

/// Render a list of tools as a table, marking favorited entries.
pub fn tool_table(tools: &[Tool], is_favorited: impl Fn(&str) -> bool) -> String {
    let rows: Vec<ToolRow> = tools
        .iter()
        .map(|tool| tool_row(tool, is_favorited(&tool.id)))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Render per-category counts as a table.
pub fn category_table(counts: &[CategoryCount]) -> String {
    #[derive(Tabled)]
    struct CountRow {
        #[tabled(rename = "Category")]
        category: String,
        #[tabled(rename = "Tools")]
        count: u64,
    }

    let rows: Vec<CountRow> = counts
        .iter()
        .map(|c| CountRow {
            category: crate::categories::category_label(&c.category).to_string(),
            count: c.count,
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Multi-line detail view for a single tool.
pub fn render_tool_detail(tool: &Tool) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", tool.name.bold()));
    if !tool.url.is_empty() {
        out.push_str(&format!("{}\n", tool.url.cyan()));
    }
    out.push('\n');
    if !tool.description.is_empty() {
        out.push_str(&format!("{}\n\n", tool.description));
    }

    out.push_str(&format!(
        "Category: {}   Pricing: {}   Rating: {:.1}\n",
        tool.category_label, tool.pricing_label, tool.rating
    ));
    if !tool.visits.is_empty() {
        out.push_str(&format!("Visits: {}\n", tool.visits));
    }
    if !tool.launch_date.is_empty() {
        out.push_str(&format!("Launched: {}\n", tool.launch_date));
    }
    if !tool.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", tool.tags.join(", ")));
    }
    if let Some(detail) = &tool.price_detail {
        out.push_str(&format!("Price detail: {}\n", detail));
    }
    if let Some(features) = &tool.features
        && !features.is_empty()
    {
        out.push_str("\nFeatures:\n");
        for feature in features {
            out.push_str(&format!("  - {}\n", feature));
        }
    }
    if let Some(links) = &tool.social_links {
        let mut pairs = Vec::new();
        if let Some(twitter) = &links.twitter {
            pairs.push(format!("twitter: {twitter}"));
        }
        if let Some(discord) = &links.discord {
            pairs.push(format!("discord: {discord}"));
        }
        if let Some(linkedin) = &links.linkedin {
            pairs.push(format!("linkedin: {linkedin}"));
        }
        if let Some(github) = &links.github {
            pairs.push(format!("github: {github}"));
        }
        if !pairs.is_empty() {
            out.push_str(&format!("\nLinks: {}\n", pairs.join("  ")));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_table_marks_favorites() {
        let tools = vec![
            Tool {
                id: "a".to_string(),
                name: "Alpha".to_string(),
                ..Default::default()
            },
            Tool {
                id: "b".to_string(),
                name: "Beta".to_string(),
                ..Default::default()
            },
        ];
        let table = tool_table(&tools, |id| id == "b");
        assert!(table.contains("Beta ★"));
        assert!(!table.contains("Alpha ★"));
    }

    #[test]
    fn test_detail_includes_features() {
        let tool = Tool {
            id: "a".to_string(),
            name: "Alpha".to_string(),
            features: Some(vec!["does things".to_string()]),
            ..Default::default()
        };
        let detail = render_tool_detail(&tool);
        assert!(detail.contains("does things"));
    }
}
