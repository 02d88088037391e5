//! Text cleaning and price parsing policies

/// Collapses whitespace runs to a single space and trims
///
/// Returns `None` when nothing is left.
pub fn clean_text(text: &str) -> Option<String> {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Parses a displayed price into a number
///
/// Every character other than an ASCII digit or `.` is dropped before
/// parsing, so currency symbols and thousands separators are ignored.
/// Text that leaves no parsable number yields `None`, never zero.
///
/// # Example
///
/// ```
/// use shelf_scout::extract::parse_price;
///
/// assert_eq!(parse_price("₹8,999.00"), Some(8999.0));
/// assert_eq!(parse_price("free"), None);
/// ```
pub fn parse_price(text: &str) -> Option<f64> {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if digits.is_empty() {
        return None;
    }

    digits.parse::<f64>().ok().filter(|price| price.is_finite())
}
