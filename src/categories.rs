//! Static category taxonomy for the catalog.
//!
//! The category list is fixed at build time; the catalog API reports
//! per-category counts but never invents new categories. Lookup is
//! case-insensitive so URL tokens like "Image" still resolve.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use unicase::UniCase;

/// The neutral category: no category filter applied.
pub const CATEGORY_ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub static ALL_CATEGORIES: &[Category] = &[
    Category { id: "all", label: "All", icon: "🔍" },
    Category { id: "text", label: "Text", icon: "✍️" },
    Category { id: "image", label: "Image", icon: "🎨" },
    Category { id: "video", label: "Video", icon: "🎥" },
    Category { id: "code", label: "Code", icon: "💻" },
    Category { id: "audio", label: "Audio", icon: "🎵" },
    Category { id: "business", label: "Business", icon: "💼" },
    Category { id: "marketing", label: "Marketing", icon: "📈" },
    Category { id: "productivity", label: "Productivity", icon: "⚡" },
    Category { id: "education", label: "Education", icon: "📚" },
    Category { id: "finance", label: "Finance", icon: "💰" },
    Category { id: "3d", label: "3D", icon: "🧊" },
    Category { id: "fun", label: "Fun", icon: "🎮" },
];

static CATEGORY_INDEX: Lazy<HashMap<UniCase<String>, &'static Category>> = Lazy::new(|| {
    ALL_CATEGORIES
        .iter()
        .map(|c| (UniCase::new(c.id.to_string()), c))
        .collect()
});

/// Look up a category by id, case-insensitively.
pub fn find_category(token: &str) -> Option<&'static Category> {
    CATEGORY_INDEX.get(&UniCase::new(token.to_string())).copied()
}

/// Whether a token names a known category id.
pub fn is_category_id(token: &str) -> bool {
    find_category(token).is_some()
}

/// Display label for a category id, falling back to the id itself.
pub fn category_label(id: &str) -> &str {
    match find_category(id) {
        Some(c) => c.label,
        None => id,
    }
}
