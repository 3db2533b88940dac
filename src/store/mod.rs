pub mod codec;
pub mod file;
pub mod memory;

use crate::domain::contact::Contact;
use crate::errors::AppError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub use file::FileStore;
pub use memory::MemStore;

/// Preference key holding every encoded contact record.
pub const CONTACT_KEY: &str = "contact_key";

pub const DEFAULT_PREFS_PATH: &str = "./.instance/preferences.json";

/// Flat key-value medium: preference key to a list of string records.
pub type Preferences = BTreeMap<String, Vec<String>>;

pub trait ContactStore: Send {
    /// Encoded records stored under [`CONTACT_KEY`], empty when nothing was saved yet.
    fn load(&self) -> Result<Vec<String>, AppError>;

    /// Replaces everything under [`CONTACT_KEY`] with the encoded `contacts`.
    fn save(&mut self, contacts: &[Contact]) -> Result<(), AppError>;

    fn medium(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMediums {
    File,
    Mem,
}

impl StorageMediums {
    pub fn is_file(&self) -> bool {
        matches!(self, StorageMediums::File)
    }

    pub fn is_mem(&self) -> bool {
        matches!(self, StorageMediums::Mem)
    }

    pub fn is_which(&self) -> &str {
        if self.is_file() { "file" } else { "mem" }
    }

    pub fn from(str: &str) -> Result<Self, AppError> {
        match str {
            "file" => Ok(StorageMediums::File),
            "mem" => Ok(StorageMediums::Mem),
            _ => Err(AppError::Validation(
                "Not a recognized storage medium".to_string(),
            )),
        }
    }
}

pub fn parse_storage_type(
    medium: StorageMediums,
    prefs_path: &str,
) -> Result<Box<dyn ContactStore>, AppError> {
    match medium {
        StorageMediums::File => Ok(Box::new(FileStore::new(prefs_path)?)),
        StorageMediums::Mem => Ok(Box::new(MemStore::new())),
    }
}

pub fn create_file_parent(path: &str) -> Result<(), AppError> {
    let path = Path::new(path);

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
