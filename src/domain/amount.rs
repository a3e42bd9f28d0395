use std::fmt;

/// Expense amounts are plain floating-point values, matching the REAL column
/// they persist to. Rounding happens only at display time.
pub type Amount = f64;

/// Parse a user-supplied amount into a finite number.
/// Every boundary that accepts an amount goes through this function.
/// Example: "50.00" -> 50.0, "12.5" -> 12.5, "100" -> 100.0
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;
    if !value.is_finite() {
        return Err(ParseAmountError::NotFinite);
    }
    Ok(value)
}

/// Format an amount with two decimal places for display.
/// Example: 50.0 -> "50.00", -12.345 -> "-12.35"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    NotFinite,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
            ParseAmountError::NotFinite => write!(f, "amount must be a finite number"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
