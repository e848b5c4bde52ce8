use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Duplicate record id: {0}")]
    Duplicate(String),
}
