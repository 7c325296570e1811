/// Errors produced by the `recipebox-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A string was not a 24-character hexadecimal object id.
    #[error("{value} is not a valid id")]
    InvalidObjectId { value: String },
}
