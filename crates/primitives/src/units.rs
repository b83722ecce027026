//! Wei and ETH decimal-string conversion.
//!
//! Monetary values stay decimal strings at the API surface and `u128` wei
//! internally; floats never touch them.

use thiserror::Error;

/// Wei per ETH.
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

const DECIMALS: usize = 18;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount is not a plain decimal number")]
    NotDecimal,
    #[error("amount is negative")]
    Negative,
    #[error("amount has more than 18 decimal places")]
    TooManyDecimals,
    #[error("amount is below the 1 wei minimum")]
    TooSmall,
    #[error("amount does not fit the wei range")]
    Overflow,
}

/// Parses an ETH decimal string into wei.
pub fn parse_ether(amount: &str) -> Result<u128, AmountError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(AmountError::Empty);
    }
    if let Some(rest) = amount.strip_prefix('-') {
        return if is_decimal_body(rest) {
            Err(AmountError::Negative)
        } else {
            Err(AmountError::NotDecimal)
        };
    }
    let (whole, frac) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(AmountError::NotDecimal);
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::NotDecimal);
    }
    if frac.len() > DECIMALS {
        return Err(AmountError::TooManyDecimals);
    }

    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| AmountError::Overflow)?
    };
    let frac: u128 = if frac.is_empty() {
        0
    } else {
        format!("{frac:0<width$}", width = DECIMALS)
            .parse()
            .map_err(|_| AmountError::Overflow)?
    };

    whole
        .checked_mul(WEI_PER_ETH)
        .and_then(|wei| wei.checked_add(frac))
        .ok_or(AmountError::Overflow)
}

/// As [`parse_ether`], additionally rejecting amounts below 1 wei.
pub fn parse_positive_ether(amount: &str) -> Result<u128, AmountError> {
    match parse_ether(amount)? {
        0 => Err(AmountError::TooSmall),
        wei => Ok(wei),
    }
}

/// Formats wei as an ETH decimal string, trimming trailing fractional zeros.
#[must_use]
#[expect(clippy::integer_division, reason = "truncating split at the wei scale is the point")]
pub fn format_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETH;
    let frac = wei % WEI_PER_ETH;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:018}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

fn is_decimal_body(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_decimal_value() {
        for input in ["0.01", "1", "0.000000000000000001"] {
            let wei = parse_ether(input).unwrap();
            assert_eq!(format_ether(wei), input, "round trip for {input}");
        }
    }

    #[test]
    fn test_parse_known_values() {
        assert_eq!(parse_ether("1").unwrap(), WEI_PER_ETH);
        assert_eq!(parse_ether("0.01").unwrap(), 10_000_000_000_000_000);
        assert_eq!(parse_ether("0.000000000000000001").unwrap(), 1);
        assert_eq!(parse_ether("0").unwrap(), 0);
        assert_eq!(parse_ether("1.5").unwrap(), 1_500_000_000_000_000_000);
        assert_eq!(parse_ether(".5").unwrap(), 500_000_000_000_000_000);
        assert_eq!(parse_ether(" 2 ").unwrap(), 2 * WEI_PER_ETH);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_ether(""), Err(AmountError::Empty));
        assert_eq!(parse_ether("   "), Err(AmountError::Empty));
        assert_eq!(parse_ether("abc"), Err(AmountError::NotDecimal));
        assert_eq!(parse_ether("1.2.3"), Err(AmountError::NotDecimal));
        assert_eq!(parse_ether("."), Err(AmountError::NotDecimal));
        assert_eq!(parse_ether("1e18"), Err(AmountError::NotDecimal));
        assert_eq!(parse_ether("-1"), Err(AmountError::Negative));
        assert_eq!(parse_ether("-abc"), Err(AmountError::NotDecimal));
    }

    #[test]
    fn test_parse_rejects_sub_wei_precision() {
        assert_eq!(
            parse_ether("0.0000000000000000001"),
            Err(AmountError::TooManyDecimals)
        );
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let huge = "3".repeat(39);
        assert_eq!(parse_ether(&huge), Err(AmountError::Overflow));
    }

    #[test]
    fn test_positive_parse_rejects_zero_and_negative() {
        assert_eq!(parse_positive_ether("0"), Err(AmountError::TooSmall));
        assert_eq!(parse_positive_ether("0.0"), Err(AmountError::TooSmall));
        assert_eq!(parse_positive_ether("-1"), Err(AmountError::Negative));
        assert_eq!(parse_positive_ether("0.01").unwrap(), 10_000_000_000_000_000);
    }

    #[test]
    fn test_format_trims_trailing_zeros() {
        assert_eq!(format_ether(0), "0");
        assert_eq!(format_ether(WEI_PER_ETH), "1");
        assert_eq!(format_ether(10_000_000_000_000_000), "0.01");
        assert_eq!(format_ether(1), "0.000000000000000001");
        assert_eq!(format_ether(1_500_000_000_000_000_000), "1.5");
    }
}
