mod bitmap;
mod domain_service;
mod repository;
mod value_objects;


pub use bitmap::{
    consecutive_days_ending_at, low_bits_mask, validate_offset, validate_width, MonthBits,
    MAX_BIT_OFFSET, MAX_BIT_WIDTH,
};
pub use domain_service::{SignInEncoder, StreakCounter};
pub use repository::SignInBitmapStore;
pub use value_objects::{SignInDate, SignInMonth, StorageKey};
