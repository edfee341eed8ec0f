//! Category display formatting
//!
//! Formats the suggestion list, filter options and favorites for terminal
//! output.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::CategoryList;
use crate::services::Favorite;

#[derive(Tabled)]
struct FavoriteRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Uses (30 days)")]
    count: usize,
}

/// Format the category suggestion list
pub fn format_category_list(categories: &CategoryList) -> String {
    if categories.is_empty() {
        return "No categories yet.\n\nCategories are learned as you add or import expenses."
            .to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("Categories ({}):\n", categories.len()));
    for name in categories.names() {
        output.push_str(&format!("  {}\n", name));
    }
    output
}

/// Format distinct categories used by expenses
pub fn format_category_options(options: &[String]) -> String {
    let mut output = String::from("all\n");
    for option in options {
        output.push_str(option);
        output.push('\n');
    }
    output
}

/// Format favorites as a ranked table
pub fn format_favorites(favorites: &[Favorite]) -> String {
    if favorites.is_empty() {
        return "No favorite categories in the last 30 days.".to_string();
    }

    let rows = favorites.iter().enumerate().map(|(i, f)| FavoriteRow {
        rank: i + 1,
        name: f.name.clone(),
        count: f.count,
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.modify(Columns::single(2), Alignment::right());
    table.to_string()
}
