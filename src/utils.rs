use ethers::types::U256;
use thiserror::Error;

/// Decimals of USDC, the unit vault balances are reported in
pub const USDC_DECIMALS: u32 = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount cannot be empty")]
    Empty,
    #[error("amount cannot be negative: {0}")]
    Negative(String),
    #[error("invalid amount '{input}': {reason}")]
    Invalid { input: String, reason: String },
}

/// Format a yield fraction as a percentage (`0.0523` -> `5.23%`)
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    if !fraction.is_finite() {
        return "-".to_string();
    }
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// Format a USDC base-unit amount for display, grouped and rounded half-up
pub fn normalize_usdc(amount: U256, decimals: usize) -> String {
    format_token_amount(amount, USDC_DECIMALS, decimals)
}

/// Format a token base-unit amount with `token_decimals` as a grouped decimal string
pub fn format_token_amount(amount: U256, token_decimals: u32, display_decimals: usize) -> String {
    let raw = ethers::utils::format_units(amount, token_decimals).unwrap_or_else(|_| "0".to_string());
    let (int_part, frac_part) = round_half_up(&raw, display_decimals);
    let grouped = group_thousands(&int_part);
    if frac_part.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

/// Format a token amount without rounding or grouping, suitable for an input field
pub fn format_token_input(amount: U256, token_decimals: u32) -> String {
    let raw = ethers::utils::format_units(amount, token_decimals).unwrap_or_else(|_| "0".to_string());
    match raw.split_once('.') {
        Some((int_part, frac_part)) => {
            let frac = frac_part.trim_end_matches('0');
            if frac.is_empty() {
                int_part.to_string()
            } else {
                format!("{}.{}", int_part, frac)
            }
        }
        None => raw,
    }
}

/// Parse a user-entered decimal amount into token base units
///
/// # Errors
/// Returns an error for empty, negative or malformed input, or input with more
/// fractional digits than the token supports
pub fn parse_token_amount(input: &str, token_decimals: u32) -> Result<U256, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(AmountError::Negative(trimmed.to_string()));
    }
    ethers::utils::parse_units(trimmed, token_decimals)
        .map(|pu| pu.into())
        .map_err(|e| AmountError::Invalid {
            input: trimmed.to_string(),
            reason: e.to_string(),
        })
}

/// Round a plain decimal string to `places` fractional digits, half-up.
/// Returns the integer and fractional digit strings.
fn round_half_up(raw: &str, places: usize) -> (String, String) {
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw, ""));
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places))
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part.as_bytes().get(places).is_some_and(|d| *d >= b'5');
    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - places;
    let to_string = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    let mut int_digits = to_string(&digits[..split]);
    let trimmed = int_digits.trim_start_matches('0');
    int_digits = if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() };
    (int_digits, to_string(&digits[split..]))
}

fn group_thousands(int_digits: &str) -> String {
    let len = int_digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in int_digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== format_percent tests ====================

    #[test]
    fn test_format_percent_two_decimals() {
        assert_eq!(format_percent(0.0523, 2), "5.23%");
    }

    #[test]
    fn test_format_percent_zero() {
        assert_eq!(format_percent(0.0, 2), "0.00%");
    }

    #[test]
    fn test_format_percent_not_finite() {
        assert_eq!(format_percent(f64::NAN, 2), "-");
        assert_eq!(format_percent(f64::INFINITY, 2), "-");
    }

    // ==================== normalize_usdc tests ====================

    #[test]
    fn test_normalize_usdc_rounds_to_whole_dollars() {
        // 1,234,567.89 USDC
        let amount = U256::from(1_234_567_890_000u64);
        assert_eq!(normalize_usdc(amount, 0), "1,234,568");
    }

    #[test]
    fn test_normalize_usdc_rounds_down_below_half() {
        let amount = U256::from(999_499_999u64);
        assert_eq!(normalize_usdc(amount, 0), "999");
    }

    #[test]
    fn test_normalize_usdc_carry_into_new_digit() {
        let amount = U256::from(999_995_000u64);
        assert_eq!(normalize_usdc(amount, 2), "1,000.00");
    }

    #[test]
    fn test_normalize_usdc_zero() {
        assert_eq!(normalize_usdc(U256::zero(), 0), "0");
        assert_eq!(normalize_usdc(U256::zero(), 2), "0.00");
    }

    // ==================== format_token_amount tests ====================

    #[test]
    fn test_format_token_amount_eighteen_decimals() {
        // 1.5 tokens
        let amount = U256::from(15u64) * U256::from(10u64.pow(17));
        assert_eq!(format_token_amount(amount, 18, 4), "1.5000");
    }

    #[test]
    fn test_format_token_input_trims_zeros() {
        let amount = U256::from(2_500_000u64);
        assert_eq!(format_token_input(amount, 6), "2.5");
        assert_eq!(format_token_input(U256::from(3_000_000u64), 6), "3");
    }

    // ==================== parse_token_amount tests ====================

    #[test]
    fn test_parse_token_amount_fractional() {
        let result = parse_token_amount("12.5", 6).unwrap();
        assert_eq!(result, U256::from(12_500_000u64));
    }

    #[test]
    fn test_parse_token_amount_with_whitespace() {
        let result = parse_token_amount("  1  ", 18).unwrap();
        assert_eq!(result, U256::from(10u64.pow(18)));
    }

    #[test]
    fn test_parse_token_amount_empty_fails() {
        assert_eq!(parse_token_amount("   ", 6), Err(AmountError::Empty));
    }

    #[test]
    fn test_parse_token_amount_negative_fails() {
        let err = parse_token_amount("-3", 6).unwrap_err();
        assert!(matches!(err, AmountError::Negative(_)));
    }

    #[test]
    fn test_parse_token_amount_garbage_fails() {
        let err = parse_token_amount("abc", 6).unwrap_err();
        assert!(matches!(err, AmountError::Invalid { .. }));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("123456789"), "123,456,789");
    }
}
