use core::fmt;

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    Regex(regex::Error),
    NotFound(String),
    Validation(String),
    IndexOutOfRange { index: usize, len: usize },
    Decode(String),
}

impl AppError {
    /// True for errors the user can fix by correcting their input.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, AppError::IndexOutOfRange { .. })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err)
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Regex(err)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => {
                write!(f, "I/O error while accessing a file or resource: {}", e)
            }
            AppError::Json(e) => {
                write!(f, "Invalid JSON data: {}", e)
            }
            AppError::Csv(e) => {
                write!(f, "Invalid CSV data: {}", e)
            }
            AppError::Regex(e) => {
                write!(f, "Invalid validation pattern: {}", e)
            }
            AppError::NotFound(item) => {
                write!(f, "{} Not found", item)
            }
            AppError::Validation(msg) => {
                write!(f, "Validation failed: {}", msg)
            }
            AppError::IndexOutOfRange { index, len } => {
                write!(
                    f,
                    "Index {} is out of range for a contact list of {} entries",
                    index, len
                )
            }
            AppError::Decode(msg) => {
                write!(f, "Could not decode contact record: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {}
