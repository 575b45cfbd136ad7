use async_trait::async_trait;

use crate::shared::DomainError;

/// Key-value store holding one packed bitmap per key.
///
/// Implementations must make `set_bit` atomic per key and must treat a missing key
/// as an all-zero value. Offsets go up to `MAX_BIT_OFFSET`, widths up to
/// `MAX_BIT_WIDTH`; anything else is `InvalidArgument`. Every other failure is
/// reported as `StorageUnavailable`.
#[async_trait]
pub trait SignInBitmapStore: Send + Sync {
    /// Set (or clear) the bit at `offset`, creating the value if needed
    async fn set_bit(&self, key: &str, offset: u32, value: bool) -> Result<(), DomainError>;

    /// Read bits `0..width` as an unsigned integer; bit `i` of the result is offset `i`
    async fn get_unsigned_bits(&self, key: &str, width: u32) -> Result<u64, DomainError>;
}
