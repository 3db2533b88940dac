use super::*;
use tracing::{debug, warn};

/// Field a contact list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    FirstName,
    LastName,
}

/// What changed in the collection, so a view can re-render just that part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Inserted(usize),
    Updated(usize),
    Removed(usize),
    Reset,
}

/// Outcome of [`ContactListManager::load`].
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<AppError>,
}

/// Sole owner of the contact list. Every successful mutation is written
/// through to the store before it returns; a failed save undoes the mutation.
pub struct ContactListManager {
    contacts: Vec<Contact>,
    storage: Box<dyn ContactStore>,
}

impl ContactListManager {
    pub fn new(storage: Box<dyn ContactStore>) -> Self {
        Self {
            contacts: Vec::new(),
            storage,
        }
    }

    pub fn load(&mut self) -> Result<LoadReport, AppError> {
        let records = self.storage.load()?;
        let (contacts, skipped) = codec::decode_records(&records);

        for failure in &skipped {
            warn!("skipping stored contact: {failure}");
        }

        self.contacts = contacts;
        debug!(loaded = self.contacts.len(), skipped = skipped.len(), "contacts loaded");

        Ok(LoadReport {
            loaded: self.contacts.len(),
            skipped,
        })
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, index: usize) -> Option<&Contact> {
        self.contacts.get(index)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn medium(&self) -> &str {
        self.storage.medium()
    }

    pub fn add(&mut self, contact: Contact) -> Result<Change, AppError> {
        contact.validate()?;

        self.contacts.push(contact);
        if let Err(e) = self.save() {
            self.contacts.pop();
            return Err(e);
        }

        Ok(Change::Inserted(self.contacts.len() - 1))
    }

    /// Replaces the email of the contact at `index`. Names are fixed once created.
    pub fn update(&mut self, index: usize, new_email: &str) -> Result<Change, AppError> {
        self.check_index(index)?;

        if !contact::validate_email(new_email)? {
            return Err(AppError::Validation(contact::ValidationReq::email_req()));
        }

        let old_email = std::mem::replace(&mut self.contacts[index].email, new_email.to_string());
        if let Err(e) = self.save() {
            self.contacts[index].email = old_email;
            return Err(e);
        }

        Ok(Change::Updated(index))
    }

    pub fn remove(&mut self, index: usize) -> Result<Change, AppError> {
        self.check_index(index)?;

        let removed = self.contacts.remove(index);
        if let Err(e) = self.save() {
            self.contacts.insert(index, removed);
            return Err(e);
        }

        Ok(Change::Removed(index))
    }

    pub fn clear(&mut self) -> Result<Change, AppError> {
        let previous = std::mem::take(&mut self.contacts);
        if let Err(e) = self.save() {
            self.contacts = previous;
            return Err(e);
        }

        Ok(Change::Reset)
    }

    /// Stable, case-sensitive sort. The new order is not saved here; it
    /// reaches the store with the next mutation.
    pub fn sort_by(&mut self, key: SortKey) -> Change {
        match key {
            SortKey::FirstName => self.contacts.sort_by(|a, b| a.first_name.cmp(&b.first_name)),
            SortKey::LastName => self.contacts.sort_by(|a, b| a.last_name.cmp(&b.last_name)),
        }

        Change::Reset
    }

    fn check_index(&self, index: usize) -> Result<(), AppError> {
        if index < self.contacts.len() {
            return Ok(());
        }

        warn!(index, len = self.contacts.len(), "contact index out of range");
        Err(AppError::IndexOutOfRange {
            index,
            len: self.contacts.len(),
        })
    }

    fn save(&mut self) -> Result<(), AppError> {
        self.storage.save(&self.contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;
    use std::sync::{Arc, Mutex};

    /// Store handle the test keeps a second reference to.
    #[derive(Clone, Default)]
    struct SharedStore(Arc<Mutex<MemStore>>);

    impl SharedStore {
        fn saves(&self) -> usize {
            self.0.lock().map(|s| s.saves).unwrap_or_default()
        }

        fn records(&self) -> Vec<String> {
            self.0
                .lock()
                .ok()
                .and_then(|s| s.load().ok())
                .unwrap_or_default()
        }
    }

    impl ContactStore for SharedStore {
        fn load(&self) -> Result<Vec<String>, AppError> {
            self.0.lock().map_err(|e| AppError::NotFound(e.to_string()))?.load()
        }

        fn save(&mut self, contacts: &[Contact]) -> Result<(), AppError> {
            self.0
                .lock()
                .map_err(|e| AppError::NotFound(e.to_string()))?
                .save(contacts)
        }

        fn medium(&self) -> &str {
            "mem"
        }
    }

    /// Store whose every save fails, as a full disk would.
    struct FailingStore(Vec<String>);

    impl ContactStore for FailingStore {
        fn load(&self) -> Result<Vec<String>, AppError> {
            Ok(self.0.clone())
        }

        fn save(&mut self, _contacts: &[Contact]) -> Result<(), AppError> {
            Err(AppError::Io(std::io::Error::other("disk full")))
        }

        fn medium(&self) -> &str {
            "failing"
        }
    }

    fn contact(first: &str, last: &str, email: &str) -> Contact {
        Contact::new(first.to_string(), last.to_string(), email.to_string())
    }

    fn manager() -> (ContactListManager, SharedStore) {
        let store = SharedStore::default();
        (ContactListManager::new(Box::new(store.clone())), store)
    }

    #[test]
    fn add_appends_and_saves_once() -> Result<(), AppError> {
        let (mut manager, store) = manager();

        manager.add(contact("Bob", "Z", "b@x.com"))?;
        let change = manager.add(contact("Amy", "Y", "a@x.com"))?;

        assert_eq!(change, Change::Inserted(1));
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.contacts()[1].first_name, "Amy");
        assert_eq!(store.saves(), 2);
        Ok(())
    }

    #[test]
    fn invalid_add_leaves_list_untouched() -> Result<(), AppError> {
        let (mut manager, store) = manager();
        manager.add(contact("Jane", "Doe", "jane@example.com"))?;

        let err = manager.add(contact("", "Doe", "jane@example.com")).unwrap_err();
        assert!(err.is_validation());

        let err = manager.add(contact("Jane", "Doe", "not-an-email")).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(manager.len(), 1);
        assert_eq!(store.saves(), 1);
        Ok(())
    }

    #[test]
    fn duplicates_are_allowed() -> Result<(), AppError> {
        let (mut manager, _) = manager();

        manager.add(contact("Jane", "Doe", "jane@example.com"))?;
        manager.add(contact("Jane", "Doe", "jane@example.com"))?;

        assert_eq!(manager.len(), 2);
        Ok(())
    }

    #[test]
    fn update_changes_only_email() -> Result<(), AppError> {
        let (mut manager, store) = manager();
        manager.add(contact("Jane", "Doe", "jane@example.com"))?;

        let change = manager.update(0, "jane.doe@example.com")?;

        assert_eq!(change, Change::Updated(0));
        assert_eq!(
            manager.get(0),
            Some(&contact("Jane", "Doe", "jane.doe@example.com"))
        );
        assert_eq!(store.saves(), 2);
        Ok(())
    }

    #[test]
    fn update_checks_bounds_before_email() -> Result<(), AppError> {
        let (mut manager, store) = manager();
        manager.add(contact("Jane", "Doe", "jane@example.com"))?;

        let err = manager.update(1, "not-an-email").unwrap_err();
        assert!(matches!(err, AppError::IndexOutOfRange { index: 1, len: 1 }));

        let err = manager.update(0, "not-an-email").unwrap_err();
        assert!(err.is_validation());

        assert_eq!(manager.contacts()[0].email, "jane@example.com");
        assert_eq!(store.saves(), 1);
        Ok(())
    }

    #[test]
    fn remove_drops_contact_and_rejects_bad_index() -> Result<(), AppError> {
        let (mut manager, store) = manager();
        manager.add(contact("Amy", "Y", "a@x.com"))?;
        manager.add(contact("Bob", "Z", "b@x.com"))?;

        let err = manager.remove(2).unwrap_err();
        assert!(err.is_index_out_of_range());
        assert_eq!(manager.len(), 2);

        assert_eq!(manager.remove(0)?, Change::Removed(0));
        assert_eq!(manager.len(), 1);
        assert!(manager.contacts().iter().all(|c| c.first_name != "Amy"));
        assert_eq!(store.saves(), 3);
        Ok(())
    }

    #[test]
    fn clear_persists_empty_list() -> Result<(), AppError> {
        let (mut manager, store) = manager();
        manager.add(contact("Amy", "Y", "a@x.com"))?;

        assert_eq!(manager.clear()?, Change::Reset);

        assert!(manager.is_empty());
        assert!(store.records().is_empty());
        assert_eq!(store.saves(), 2);
        Ok(())
    }

    #[test]
    fn sort_is_stable_and_not_saved() -> Result<(), AppError> {
        let (mut manager, store) = manager();
        manager.add(contact("Bob", "Z", "b@x.com"))?;
        manager.add(contact("Amy", "Y", "a@x.com"))?;
        manager.add(contact("Bob", "A", "b2@x.com"))?;

        manager.sort_by(SortKey::FirstName);

        let order: Vec<(&str, &str)> = manager
            .contacts()
            .iter()
            .map(|c| (c.first_name.as_str(), c.last_name.as_str()))
            .collect();
        assert_eq!(order, vec![("Amy", "Y"), ("Bob", "Z"), ("Bob", "A")]);
        assert_eq!(store.saves(), 3);

        manager.sort_by(SortKey::LastName);
        assert_eq!(manager.contacts()[0].last_name, "A");
        Ok(())
    }

    #[test]
    fn sort_is_case_sensitive() -> Result<(), AppError> {
        let (mut manager, _) = manager();
        manager.add(contact("amy", "Y", "a@x.com"))?;
        manager.add(contact("Bob", "Z", "b@x.com"))?;

        manager.sort_by(SortKey::FirstName);

        assert_eq!(manager.contacts()[0].first_name, "Bob");
        Ok(())
    }

    #[test]
    fn reload_yields_same_set() -> Result<(), AppError> {
        let (mut manager, store) = manager();
        manager.add(contact("Bob", "Z", "b@x.com"))?;
        manager.add(contact("Amy", "Y", "a@x.com"))?;
        let before: Vec<Contact> = manager.contacts().to_vec();

        let mut reloaded = ContactListManager::new(Box::new(store.clone()));
        let report = reloaded.load()?;
        assert_eq!(report.loaded, 2);
        assert!(report.skipped.is_empty());

        // Saving what was loaded and loading again changes nothing.
        reloaded.clear()?;
        for c in before.iter().cloned() {
            reloaded.add(c)?;
        }
        reloaded.load()?;

        let mut after = reloaded.contacts().to_vec();
        let mut expected = before;
        after.sort_by(|a, b| a.email.cmp(&b.email));
        expected.sort_by(|a, b| a.email.cmp(&b.email));
        assert_eq!(after, expected);
        Ok(())
    }

    #[test]
    fn load_skips_malformed_records() -> Result<(), AppError> {
        let store = MemStore::with_records(vec![
            r#"{"firstName":"Jane","lastName":"Doe","email":"jane@example.com"}"#.to_string(),
            "garbage".to_string(),
        ]);
        let mut manager = ContactListManager::new(Box::new(store));

        let report = manager.load()?;

        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(report.skipped[0], AppError::Decode(_)));
        assert_eq!(manager.contacts()[0].first_name, "Jane");
        Ok(())
    }

    #[test]
    fn end_to_end_add_update_remove() -> Result<(), AppError> {
        let (mut manager, store) = manager();

        manager.add(contact("Jane", "Doe", "jane@example.com"))?;
        manager.update(0, "jane.doe@example.com")?;
        assert_eq!(manager.contacts()[0].first_name, "Jane");
        assert_eq!(manager.contacts()[0].last_name, "Doe");

        manager.remove(0)?;

        assert!(manager.is_empty());
        assert!(store.records().is_empty());
        Ok(())
    }

    #[test]
    fn sorted_order_is_written_by_next_mutation() -> Result<(), AppError> {
        let (mut manager, store) = manager();
        manager.add(contact("Bob", "Z", "b@x.com"))?;
        manager.add(contact("Amy", "Y", "a@x.com"))?;

        manager.sort_by(SortKey::FirstName);
        manager.add(contact("Carl", "A", "c@x.com"))?;

        let mut reloaded = ContactListManager::new(Box::new(store.clone()));
        reloaded.load()?;

        let order: Vec<&str> = reloaded
            .contacts()
            .iter()
            .map(|c| c.first_name.as_str())
            .collect();
        assert_eq!(order, vec!["Amy", "Bob", "Carl"]);
        Ok(())
    }

    #[test]
    fn failed_save_undoes_every_mutation() -> Result<(), AppError> {
        let stored = codec::encode_records(&[
            contact("Amy", "Y", "a@x.com"),
            contact("Bob", "Z", "b@x.com"),
        ])?;
        let mut manager = ContactListManager::new(Box::new(FailingStore(stored)));
        manager.load()?;
        let before = manager.contacts().to_vec();

        // Retrying a failed add must not leave duplicates behind.
        let jane = contact("Jane", "Doe", "jane@example.com");
        assert!(matches!(manager.add(jane.clone()), Err(AppError::Io(_))));
        assert!(matches!(manager.add(jane), Err(AppError::Io(_))));
        assert_eq!(manager.contacts(), before.as_slice());

        assert!(manager.update(1, "bob@example.com").is_err());
        assert_eq!(manager.contacts(), before.as_slice());

        assert!(manager.remove(0).is_err());
        assert_eq!(manager.contacts(), before.as_slice());

        assert!(manager.clear().is_err());
        assert_eq!(manager.contacts(), before.as_slice());
        Ok(())
    }
}
