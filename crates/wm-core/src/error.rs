/// Alias for `Result<T, WarpError>`.
pub type WarpResult<T> = Result<T, WarpError>;

/// Errors that can occur when manipulating the warp directory.
#[derive(Debug, thiserror::Error)]
pub enum WarpError {
    /// A warp with the same name (ignoring case) already exists.
    #[error("warp already exists: \"{0}\"")]
    DuplicateName(String),

    /// The named warp does not exist in the directory.
    #[error("warp not found: \"{0}\"")]
    UnknownWarp(String),
}
