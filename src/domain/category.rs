//! The fixed category catalog and category reference resolution.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A named spending or income category from the fixed catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub kind: CategoryKind,
}

/// Direction a category applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Income => "Income",
            CategoryKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Reference from a transaction to a category: either an id into the fixed
/// catalog, or a free-text custom name. The two are mutually exclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CategoryRef {
    Catalog(String),
    Custom(String),
}

static CATALOG: Lazy<Vec<Category>> = Lazy::new(|| {
    fn entry(id: &str, name: &str, icon: &str, kind: CategoryKind) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            kind,
        }
    }
    vec![
        entry("cat_salary", "Salary", "briefcase", CategoryKind::Income),
        entry("cat_freelance", "Freelance", "laptop", CategoryKind::Income),
        entry("cat_food", "Food & Dining", "utensils", CategoryKind::Expense),
        entry("cat_transport", "Transport", "car", CategoryKind::Expense),
        entry("cat_shopping", "Shopping", "shopping-bag", CategoryKind::Expense),
        entry("cat_bills", "Bills & Utilities", "file-text", CategoryKind::Expense),
        entry("cat_entertainment", "Entertainment", "film", CategoryKind::Expense),
        entry("cat_health", "Health", "heart", CategoryKind::Expense),
    ]
});

/// Returns the fixed category catalog.
pub fn catalog() -> &'static [Category] {
    &CATALOG
}

/// Looks up a catalog category by exact id match.
pub fn catalog_category(id: &str) -> Option<&'static Category> {
    CATALOG.iter().find(|category| category.id == id)
}

/// Resolves a human-readable category label.
///
/// A custom name wins, then a catalog id lookup, then the literal "Other".
pub fn resolve_category_label(reference: Option<&CategoryRef>) -> String {
    match reference {
        Some(CategoryRef::Custom(name)) => name.clone(),
        Some(CategoryRef::Catalog(id)) => catalog_category(id)
            .map(|category| category.name.clone())
            .unwrap_or_else(|| "Other".to_string()),
        None => "Other".to_string(),
    }
}
