//! Fixed-point price utilities.
//!
//! ## Overview
//!
//! Prices are stored as u64 scaled by 10^8 so that matching compares plain
//! integers and never touches floating point. Parsing, display and VWAP go
//! through `rust_decimal`.
//!
//! ## Examples
//!
//! ```
//! use limit_book::types::price::{to_fixed, from_fixed_trimmed};
//!
//! let price = to_fixed("10.25").unwrap();
//! assert_eq!(price, 1_025_000_000);
//! assert_eq!(from_fixed_trimmed(price), "10.25");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point prices: 10^8
pub const SCALE: u64 = 100_000_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// Returns `None` if parsing fails, the value is negative, or it does not fit.
/// Digits beyond the 8th decimal place are rounded.
///
/// ```
/// use limit_book::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-3"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to fixed-point u64
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert fixed-point u64 to a string without trailing zeros
///
/// ```
/// use limit_book::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(1_000_000_000), "10");
/// assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    fixed_to_decimal(value).normalize().to_string()
}

// ============================================================================
// Aggregates
// ============================================================================

/// Volume-weighted average price.
///
/// `notional_raw` is Σ(price · quantity) with prices still scaled by 10^8.
/// The divisor is clamped to 1 so an empty tape yields zero.
///
/// The division runs in `u128` first, so the result stays defined even when
/// the notional is far beyond `Decimal` range. A notional built from trades
/// at `u64` prices always averages to a `u64` raw price; anything larger
/// saturates at `Decimal::MAX`.
///
/// ```
/// use limit_book::types::price::vwap;
/// use rust_decimal::Decimal;
///
/// assert_eq!(vwap(0, 0), Decimal::ZERO);
/// // 2 @ 11 + 1 @ 10 = 32 / 3
/// let v = vwap(2 * 1_100_000_000 + 1_000_000_000, 3);
/// assert_eq!(v.round_dp(4).to_string(), "10.6667");
/// ```
pub fn vwap(notional_raw: u128, total_quantity: u64) -> Decimal {
    let divisor = total_quantity.max(1);
    let whole = notional_raw / u128::from(divisor);
    // Remainder is below the divisor, so it fits a u64
    let rest = (notional_raw % u128::from(divisor)) as u64;

    let Some(whole) = Decimal::from_u128(whole) else {
        return Decimal::MAX;
    };
    let fraction = Decimal::from(rest) / Decimal::from(divisor);
    (whole + fraction) / Decimal::from(SCALE)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed_basic() {
        assert_eq!(to_fixed("10"), Some(1_000_000_000));
        assert_eq!(to_fixed("9.5"), Some(950_000_000));
        assert_eq!(to_fixed(" 11 "), Some(1_100_000_000));
        assert_eq!(to_fixed("50000.12345678"), Some(5_000_012_345_678));
    }

    #[test]
    fn test_to_fixed_rejects_garbage() {
        assert_eq!(to_fixed("-1.0"), None);
        assert_eq!(to_fixed("abc"), None);
        assert_eq!(to_fixed(""), None);
    }

    #[test]
    fn test_to_fixed_rounds_extra_digits() {
        assert_eq!(to_fixed("0.000000015"), Some(2));
    }

    #[test]
    fn test_zero_parses() {
        // Zero is representable; the engine rejects it as a limit price
        assert_eq!(to_fixed("0"), Some(0));
    }

    #[test]
    fn test_from_fixed_trimmed() {
        assert_eq!(from_fixed_trimmed(100_000_000), "1");
        assert_eq!(from_fixed_trimmed(123_456_789), "1.23456789");
        assert_eq!(from_fixed_trimmed(0), "0");
    }

    #[test]
    fn test_vwap_single_price() {
        assert_eq!(vwap(3 * 1_000_000_000, 3), Decimal::from(10));
    }

    #[test]
    fn test_vwap_empty_tape_is_zero() {
        assert_eq!(vwap(0, 0), Decimal::ZERO);
    }

    #[test]
    fn test_vwap_notional_beyond_decimal_range() {
        // ~1.7e38 raw notional, well past Decimal::MAX
        let quantity = u64::MAX / 2;
        let notional = u128::from(u64::MAX) * u128::from(quantity);

        let expected = Decimal::from(u64::MAX) / Decimal::from(SCALE);
        assert_eq!(vwap(notional, quantity), expected);
    }

    #[test]
    fn test_vwap_large_price_and_volume() {
        // 1000.0 per unit over 1e9 units in two fills
        let price = 100_000_000_000u128;
        let notional = price * 400_000_000 + (price + 2) * 600_000_000;

        let v = vwap(notional, 1_000_000_000);
        assert_eq!(v.round_dp(8), Decimal::new(100_000_000_001, 8));
    }
}
