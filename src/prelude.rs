pub use crate::cli::{command, run::run_app};
pub use crate::domain::{
    Change, ContactListManager, ImportEntry, ImportReport, LoadReport, SortKey,
    contact::{self, Contact, check_entry, validate},
    import,
};
pub use crate::errors::AppError;
pub use crate::store::{self, CONTACT_KEY, ContactStore, FileStore, MemStore, codec};
