use super::*;
use csv::Reader;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const BUNDLED_CONTACTS: &str = include_str!("../../assets/mock_contacts.json");

/// One raw row from an import source, before validation.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl From<ImportEntry> for Contact {
    fn from(entry: ImportEntry) -> Self {
        Contact::new(entry.first_name, entry.last_name, entry.email)
    }
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: usize,
    /// Position in the source and the reason the entry was refused.
    pub rejected: Vec<(usize, AppError)>,
}

/// Reads import rows from `src`, or from the bundled sample set when `src` is `None`.
pub fn read_entries(src: Option<&Path>) -> Result<Vec<ImportEntry>, AppError> {
    let Some(path) = src else {
        return Ok(serde_json::from_str(BUNDLED_CONTACTS)?);
    };

    if !path.exists() {
        return Err(AppError::NotFound(format!("Import file {}", path.display())));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => {
            let data = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&data)?)
        }
        Some("csv") => {
            let mut reader = Reader::from_path(path)?;
            let mut entries = Vec::new();

            for result in reader.deserialize() {
                let entry: ImportEntry = result?;
                entries.push(entry);
            }
            Ok(entries)
        }
        _ => Err(AppError::Validation(
            "Import file must be a .json or .csv file".to_string(),
        )),
    }
}

impl ContactListManager {
    /// Runs every entry through [`ContactListManager::add`]. Invalid entries are
    /// reported, storage failures abort the import.
    pub fn import(&mut self, entries: Vec<ImportEntry>) -> Result<ImportReport, AppError> {
        let mut report = ImportReport::default();

        for (position, entry) in entries.into_iter().enumerate() {
            match self.add(entry.into()) {
                Ok(_) => report.imported += 1,
                Err(e) if e.is_validation() => {
                    warn!(position, "rejected import entry: {e}");
                    report.rejected.push((position, e));
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            imported = report.imported,
            rejected = report.rejected.len(),
            "import finished"
        );
        Ok(report)
    }
}
