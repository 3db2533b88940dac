use super::*;

/// In-process preferences. Nothing outlives the process.
#[derive(Debug, Default, Clone)]
pub struct MemStore {
    pub data: Preferences,
    pub saves: usize,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the collection key with raw records, malformed ones included.
    pub fn with_records(records: Vec<String>) -> Self {
        let mut store = Self::new();
        store.data.insert(CONTACT_KEY.to_string(), records);
        store
    }
}

impl ContactStore for MemStore {
    fn load(&self) -> Result<Vec<String>, AppError> {
        Ok(self.data.get(CONTACT_KEY).cloned().unwrap_or_default())
    }

    fn save(&mut self, contacts: &[Contact]) -> Result<(), AppError> {
        self.data
            .insert(CONTACT_KEY.to_string(), codec::encode_records(contacts)?);
        self.saves += 1;
        Ok(())
    }

    fn medium(&self) -> &str {
        "mem"
    }
}
