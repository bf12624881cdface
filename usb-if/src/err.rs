/// Error reported by a platform collaborator (regulator, clock, PHY or
/// device lookup).
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Not found")]
    NotFound,
    /// The operation has no backing implementation on this platform.
    /// Rail control treats this as a successful no-op.
    #[error("Not supported")]
    NotSupported,
    #[error("Timeout")]
    Timeout,
    #[error("I/O error: {0}")]
    Io(i32),
}

impl PlatformError {
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported)
    }
}
