use super::*;
use std::fs::OpenOptions;
use std::io::{Read, Write};
use tempfile::NamedTempFile;
use tracing::debug;

/// Preference file on disk: a JSON object of preference keys to string lists.
pub struct FileStore {
    pub path: String,
}

impl FileStore {
    pub fn new(path: &str) -> Result<Self, AppError> {
        create_file_parent(path)?;

        Ok(FileStore {
            path: path.to_string(),
        })
    }

    pub fn read_preferences(&self) -> Result<Preferences, AppError> {
        if !fs::exists(Path::new(&self.path))? {
            return Ok(Preferences::new());
        }

        let mut file = OpenOptions::new().read(true).open(&self.path)?;

        let mut data = String::new();
        file.read_to_string(&mut data)?;

        // serde_json will give an error if data is empty
        if data.trim().is_empty() {
            return Ok(Preferences::new());
        }

        Ok(serde_json::from_str(&data)?)
    }

    /// Writes a sibling temp file and renames it over the preference file,
    /// so an interrupted save leaves the previous file intact.
    fn write_preferences(&self, prefs: &Preferences) -> Result<(), AppError> {
        create_file_parent(&self.path)?;

        let dir = match Path::new(&self.path).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        let data = serde_json::to_string_pretty(prefs)?;
        file.write_all(data.as_bytes())?;
        file.as_file().sync_all()?;

        file.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }
}

impl ContactStore for FileStore {
    fn load(&self) -> Result<Vec<String>, AppError> {
        let mut prefs = self.read_preferences()?;
        let records = prefs.remove(CONTACT_KEY).unwrap_or_default();

        debug!(path = %self.path, records = records.len(), "loaded contact records");
        Ok(records)
    }

    fn save(&mut self, contacts: &[Contact]) -> Result<(), AppError> {
        // Other preference keys survive a contact save.
        let mut prefs = self.read_preferences()?;
        prefs.insert(CONTACT_KEY.to_string(), codec::encode_records(contacts)?);

        self.write_preferences(&prefs)?;

        debug!(path = %self.path, records = contacts.len(), "saved contact records");
        Ok(())
    }

    fn medium(&self) -> &str {
        "file"
    }
}
