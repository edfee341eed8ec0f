//! Category CLI commands
//!
//! Implements CLI commands for the category suggestion list.

use clap::Subcommand;

use crate::display::{format_category_list, format_category_options, format_favorites};
use crate::error::BudgetMateResult;
use crate::models::Calendar;
use crate::services::CategoryService;
use crate::storage::RecordStore;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List known categories
    List,

    /// List categories used by expenses (filter choices)
    Options,

    /// Rename a category and every expense that uses it
    Rename {
        /// Current name (any casing)
        old: String,
        /// New name
        new: String,
    },

    /// Remove a category from the suggestions; expenses keep it
    Delete {
        /// Category name
        name: String,
    },

    /// Show the most used categories of the last 30 days
    Favorites,
}

/// Handle a category command
pub fn handle_category_command(
    store: &dyn RecordStore,
    calendar: &Calendar,
    cmd: CategoryCommands,
) -> BudgetMateResult<()> {
    let service = CategoryService::new(store);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()));
        }

        CategoryCommands::Options => {
            print!("{}", format_category_options(&service.filter_options()));
        }

        CategoryCommands::Rename { old, new } => {
            let result = service.rename(&old, &new)?;
            println!(
                "Renamed '{}' to '{}' ({} expense(s) updated)",
                old.trim(),
                result.name,
                result.updated
            );
        }

        CategoryCommands::Delete { name } => {
            service.delete(&name)?;
            println!("Removed '{}' from category suggestions", name.trim());
        }

        CategoryCommands::Favorites => {
            println!("{}", format_favorites(&service.favorites(calendar)));
        }
    }

    Ok(())
}
