use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to save matrix \"{name}\": {reason}")]
    Storage { name: String, reason: String },

    #[error("A matrix name must not be blank")]
    BlankName,

    #[error("No matrix found with the name \"{0}\"")]
    NotFound(String),

    #[error("Failed to load matrix \"{name}\": data might be corrupted ({reason})")]
    Corrupt { name: String, reason: String },

    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// True for load failures that reset the session to the empty system.
    pub fn resets_session(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::Corrupt { .. })
    }
}
