use crate::shared::DomainError;

/// Widest unsigned field a bitmap store hands back in one read.
pub const MAX_BIT_WIDTH: u32 = 63;

/// Highest bit offset a bitmap store accepts for a write.
pub const MAX_BIT_OFFSET: u32 = MAX_BIT_WIDTH - 1;

pub fn validate_offset(offset: u32) -> Result<(), DomainError> {
    if offset > MAX_BIT_OFFSET {
        return Err(DomainError::InvalidArgument(format!(
            "Bit offset {} exceeds maximum {}",
            offset, MAX_BIT_OFFSET
        )));
    }
    Ok(())
}

pub fn validate_width(width: u32) -> Result<(), DomainError> {
    if width == 0 || width > MAX_BIT_WIDTH {
        return Err(DomainError::InvalidArgument(format!(
            "Bit width must be between 1 and {}, got {}",
            MAX_BIT_WIDTH, width
        )));
    }
    Ok(())
}

/// Mask selecting the lowest `width` bits. `width` must be at most 63.
pub fn low_bits_mask(width: u32) -> u64 {
    (1u64 << width) - 1
}

/// Count consecutive set bits starting at bit `width - 1` and walking down to bit 0.
///
/// Bit `i` stands for day `i + 1`, so this is the streak that ends on day `width`.
/// Bits at or above `width` are ignored.
pub fn consecutive_days_ending_at(bits: u64, width: u32) -> u32 {
    let mut streak = 0;
    for offset in (0..width).rev() {
        if (bits >> offset) & 1 == 0 {
            break;
        }
        streak += 1;
    }
    streak
}

/// The first `width` days of one month as fetched from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBits {
    bits: u64,
    width: u32,
}

impl MonthBits {
    pub fn new(bits: u64, width: u32) -> Result<Self, DomainError> {
        validate_width(width)?;
        Ok(Self {
            bits: bits & low_bits_mask(width),
            width,
        })
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of days covered, day 1 through day `width`
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Whether the user signed in on `day` (1-based). Days outside the window read as false.
    pub fn is_signed_in(&self, day: u32) -> bool {
        if day == 0 || day > self.width {
            return false;
        }
        (self.bits >> (day - 1)) & 1 == 1
    }

    /// Streak ending on the last covered day
    pub fn current_streak(&self) -> u32 {
        consecutive_days_ending_at(self.bits, self.width)
    }

    pub fn signed_in_days(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Per-day flags, index 0 is day 1
    pub fn days(&self) -> impl Iterator<Item = bool> + '_ {
        (1..=self.width).map(move |day| self.is_signed_in(day))
    }
}
