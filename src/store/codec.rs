use super::*;

pub fn encode_record(contact: &Contact) -> Result<String, AppError> {
    Ok(serde_json::to_string(contact)?)
}

pub fn encode_records(contacts: &[Contact]) -> Result<Vec<String>, AppError> {
    contacts.iter().map(encode_record).collect()
}

pub fn decode_record(record: &str) -> Result<Contact, AppError> {
    serde_json::from_str(record).map_err(|e| AppError::Decode(format!("{record:?}: {e}")))
}

/// Decodes every record it can. Malformed records come back as
/// [`AppError::Decode`] next to the contacts instead of failing the batch.
pub fn decode_records<S: AsRef<str>>(records: &[S]) -> (Vec<Contact>, Vec<AppError>) {
    let mut contacts = Vec::with_capacity(records.len());
    let mut failures = Vec::new();

    for record in records {
        match decode_record(record.as_ref()) {
            Ok(contact) => contacts.push(contact),
            Err(e) => failures.push(e),
        }
    }

    (contacts, failures)
}
