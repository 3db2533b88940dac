use crate::{
    domain::{Contact, ContactListManager, import},
    prelude::{
        AppError,
        command::{Cli, Commands},
        store::{StorageMediums, parse_storage_type},
    },
};
use clap::Parser;
use dotenv::dotenv;
use tracing::debug;

pub fn run_app() -> Result<(), AppError> {
    // .env has to be in the environment before clap reads `env =` defaults
    dotenv().ok();
    let cli = Cli::parse();

    let medium = StorageMediums::from(&cli.storage_choice)?;
    let storage = parse_storage_type(medium, &cli.prefs_path)?;

    let mut manager = ContactListManager::new(storage);
    debug!(medium = manager.medium(), path = %cli.prefs_path, "storage ready");
    let report = manager.load()?;

    for skipped in &report.skipped {
        eprintln!("Warning: {}", skipped);
    }

    match cli.command {
        Commands::Add {
            first_name,
            last_name,
            email,
        } => {
            manager.add(Contact::new(first_name, last_name, email))?;

            println!("Contact added successfully");
            Ok(())
        }

        // Listing contacts
        Commands::List { sort } => {
            if manager.is_empty() {
                println!("No contact yet");
                return Ok(());
            }

            if let Some(field) = sort {
                manager.sort_by(field.into());
            }

            for (mut i, c) in manager.contacts().iter().enumerate() {
                i += 1;
                println!("{i:>3}. {:<15} {:<15} {}", c.first_name, c.last_name, c.email);
            }
            Ok(())
        }

        // Edit Contact
        Commands::Edit { index, email } => {
            manager.update(position(index)?, &email)?;

            println!("Contact updated successfully");
            Ok(())
        }

        // Delete Contact
        Commands::Delete { index } => {
            manager.remove(position(index)?)?;

            println!("Contact deleted successfully");
            Ok(())
        }

        Commands::Clear => {
            manager.clear()?;

            println!("All contacts cleared");
            Ok(())
        }

        // Bulk add from a fixture file
        Commands::Generate { src } => {
            let entries = import::read_entries(src.as_deref())?;
            let report = manager.import(entries)?;

            for (pos, e) in &report.rejected {
                eprintln!("Entry {}: {}", pos + 1, e);
            }

            println!(
                "Imported {} contacts, rejected {}",
                report.imported,
                report.rejected.len()
            );
            Ok(())
        }
    }
}

/// Converts a 1-based position from `list` output into a list index.
fn position(index: usize) -> Result<usize, AppError> {
    index
        .checked_sub(1)
        .ok_or_else(|| AppError::Validation("Contact positions start at 1".to_string()))
}
