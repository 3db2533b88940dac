pub mod contact;
pub mod import;
pub mod manager;

use crate::errors::AppError;
use crate::store::{ContactStore, codec};

pub use contact::{Contact, check_entry, validate};
pub use import::{ImportEntry, ImportReport};
pub use manager::{Change, ContactListManager, LoadReport, SortKey};
