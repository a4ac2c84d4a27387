use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudyError {
    #[error("Storage is not available in this environment")]
    StorageUnavailable,

    #[error("Storage quota exceeded while writing '{0}'")]
    QuotaExceeded(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("User with this email already exists: {0}")]
    DuplicateEmail(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl StudyError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StudyError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StudyError>;
