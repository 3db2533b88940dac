use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::SortKey;
use crate::store::DEFAULT_PREFS_PATH;

#[derive(Parser, Debug)]
#[command(name = "address-book", version, about = "Personal contact list")]
pub struct Cli {
    /// Storage choice (file, mem) are available
    #[arg(long, env = "STORAGE_CHOICE", default_value_t = String::from("file"))]
    pub storage_choice: String,

    /// Preference file holding the stored contacts
    #[arg(long, env = "PREFS_PATH", default_value_t = String::from(DEFAULT_PREFS_PATH))]
    pub prefs_path: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact
    Add {
        /// Contact first name
        #[arg(long)]
        first_name: String,

        /// Contact last name
        #[arg(long)]
        last_name: String,

        /// Contact email address
        #[arg(long)]
        email: String,
    },
    /// List contacts
    List {
        /// Sort ordering (default is stored order)
        #[arg(long)]
        sort: Option<SortField>,
    },
    /// Change the email of an existing contact
    /// Names cannot be edited once a contact is created
    Edit {
        /// Position of the contact as shown by `list`
        #[arg(long)]
        index: usize,

        /// New email address
        #[arg(long)]
        email: String,
    },
    /// Delete the contact at a position shown by `list`
    Delete {
        #[arg(long)]
        index: usize,
    },
    /// Delete every contact
    Clear,
    /// Add contacts in bulk from a .json or .csv file
    /// (defaults to the bundled sample contacts)
    Generate {
        /// File path to the source file
        #[arg(short, long)]
        src: Option<PathBuf>,
    },
}

/// Supported sort keys
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SortField {
    FirstName,
    LastName,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::FirstName => SortKey::FirstName,
            SortField::LastName => SortKey::LastName,
        }
    }
}
