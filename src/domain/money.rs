use std::fmt;

/// Monetary amounts are integer cents to avoid floating-point precision issues.
/// €50.00 = 5000 cents.
pub type Cents = i64;

/// Interest rates are integer basis points (hundredths of a percent),
/// so a rate entered as "5" is stored as 500.
pub type RateBps = i64;

/// Format a fixed-point value (two fraction digits) as a decimal string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_fixed(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, value.abs() / 100, value.abs() % 100)
}

/// Parse a decimal string into a fixed-point value with two fraction digits.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000.
/// Extra fraction digits are truncated.
pub fn parse_fixed(input: &str) -> Result<i64, ParseFixedError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    if digits.is_empty() {
        return Err(ParseFixedError::InvalidFormat);
    }

    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };
    if fraction.contains('.') {
        return Err(ParseFixedError::InvalidFormat);
    }
    // A bare "." (or "-.") carries no digits at all.
    if whole.is_empty() && fraction.is_empty() {
        return Err(ParseFixedError::InvalidFormat);
    }

    let units: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| ParseFixedError::InvalidFormat)?
    };

    // Keep at most two fraction digits, walking chars so multi-byte input
    // is rejected instead of panicking on a slice boundary.
    let mut hundredths: i64 = 0;
    let mut kept = 0;
    for c in fraction.chars().take(2) {
        let digit = c.to_digit(10).ok_or(ParseFixedError::InvalidFormat)?;
        hundredths = hundredths * 10 + digit as i64;
        kept += 1;
    }
    if kept == 1 {
        hundredths *= 10;
    }

    let value = units
        .checked_mul(100)
        .and_then(|v| v.checked_add(hundredths))
        .ok_or(ParseFixedError::Overflow)?;
    Ok(if negative { -value } else { value })
}

/// Balance after applying an interest rate, rounded half away from zero
/// to whole cents: balance + balance * rate / 10_000.
pub fn apply_interest(balance: Cents, rate: RateBps) -> Cents {
    let scaled = balance as i128 * rate as i128;
    let rounded = (scaled + 5_000 * scaled.signum()) / 10_000;
    balance + rounded as Cents
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFixedError {
    InvalidFormat,
    Overflow,
}

impl fmt::Display for ParseFixedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFixedError::InvalidFormat => write!(f, "invalid decimal format"),
            ParseFixedError::Overflow => write!(f, "decimal value out of range"),
        }
    }
}

impl std::error::Error for ParseFixedError {}
