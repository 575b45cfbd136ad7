use signin_domain::shared::DomainError;

/// Extension trait folding store client errors into the domain taxonomy
pub trait ResultExt<T, E> {
    /// Convert error to DomainError::StorageUnavailable
    /// Usage: `result.to_storage_err()?`
    fn to_storage_err(self) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn to_storage_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::StorageUnavailable(e.to_string()))
    }
}
