pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{FoodPatch, NewFood};

#[derive(Parser)]
#[command(name = "foodboard")]
#[command(about = "A terminal dashboard for a REST-backed food menu", long_about = None)]
pub struct Cli {
    /// Base URL of the food API, overriding the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Append logs to this file
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    /// Launches the TUI when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all foods
    List,
    /// Add a new food (always stored as available)
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        price: f64,
        /// URL of the food picture
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Update fields of an existing food
    Update {
        /// Id of the food to update
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        available: Option<bool>,
    },
    /// Delete a food
    Delete {
        /// Id of the food to delete
        id: i64,
    },
    /// Launch the TUI
    Tui,
}

impl Commands {
    /// The candidate carried by `add`, if this is one.
    pub fn new_food(&self) -> Option<NewFood> {
        match self {
            Commands::Add {
                name,
                description,
                price,
                image,
            } => Some(NewFood {
                name: name.clone(),
                description: description.clone(),
                price: *price,
                available: true,
                image: image.clone(),
            }),
            _ => None,
        }
    }

    /// The patch carried by `update`, if this is one.
    pub fn patch(&self) -> Option<FoodPatch> {
        match self {
            Commands::Update {
                name,
                description,
                price,
                image,
                available,
                ..
            } => Some(FoodPatch {
                name: name.clone(),
                description: description.clone(),
                price: *price,
                available: *available,
                image: image.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["foodboard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_add_requires_name_and_price() {
        assert!(Cli::try_parse_from(["foodboard", "add", "--name", "Pizza"]).is_err());

        let cli =
            Cli::try_parse_from(["foodboard", "add", "--name", "Pizza", "--price", "20"]).unwrap();
        let candidate = cli.command.unwrap().new_food().unwrap();
        assert_eq!(candidate.name, "Pizza");
        assert_eq!(candidate.price, 20.0);
        assert_eq!(candidate.description, "");
    }

    #[test]
    fn test_update_patch_and_global_url() {
        let cli = Cli::try_parse_from([
            "foodboard",
            "update",
            "3",
            "--price",
            "12.5",
            "--available",
            "false",
            "--api-url",
            "http://menu.test",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://menu.test"));
        let command = cli.command.unwrap();
        assert!(matches!(command, Commands::Update { id: 3, .. }));

        let patch = command.patch().unwrap();
        assert_eq!(patch.price, Some(12.5));
        assert_eq!(patch.available, Some(false));
        assert!(patch.name.is_none());
    }
}
