/// Separator between author full names in a single cell.
pub(crate) const AUTHOR_SEPARATOR: &str = "; ";

/// Separator between the parts of an affiliation; the last part names the country.
pub(crate) const AFFILIATION_SEPARATOR: &str = ", ";

/// Parses the leading base-10 integer of a cell.
///
/// Leading whitespace and a single `+` or `-` sign are accepted, and parsing stops
/// at the first non-digit, so `"2020 "` and `"12abc"` both yield a number while
/// `"n/a"` and `""` yield `None`. Values that overflow `i64` also yield `None`.
pub(crate) fn parse_int_prefix(cell: &str) -> Option<i64> {
    let trimmed = cell.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].bytes().try_fold(0i64, |acc, b| {
        acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
    })?;

    Some(if negative { -magnitude } else { magnitude })
}

/// Returns the text after the last `separator`, or the whole input if there is none.
pub(crate) fn last_segment<'a>(value: &'a str, separator: &str) -> &'a str {
    value
        .rsplit_once(separator)
        .map_or(value, |(_, last)| last)
}

/// Splits an author cell into full names. An empty cell has no authors.
pub(crate) fn split_authors(cell: &str) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    cell.split(AUTHOR_SEPARATOR).map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("2020", Some(2020))]
    #[case("  2020", Some(2020))]
    #[case("2020 ", Some(2020))]
    #[case("12abc", Some(12))]
    #[case("12.7", Some(12))]
    #[case("-5", Some(-5))]
    #[case("+7", Some(7))]
    #[case("0", Some(0))]
    #[case("n/a", None)]
    #[case("", None)]
    #[case("   ", None)]
    #[case("-", None)]
    #[case("abc12", None)]
    #[case("99999999999999999999999", None)]
    fn test_parse_int_prefix(#[case] cell: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_int_prefix(cell), expected);
    }

    #[rstest]
    #[case("Dept X, MIT, United States", "United States")]
    #[case("United Kingdom", "United Kingdom")]
    #[case("", "")]
    #[case("Dept X, ", "")]
    #[case("Dept X,France", "Dept X,France")]
    fn test_last_segment(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(last_segment(value, AFFILIATION_SEPARATOR), expected);
    }

    #[test]
    fn test_split_authors() {
        assert_eq!(split_authors("Smith J.; Doe A."), vec!["Smith J.", "Doe A."]);
        assert_eq!(split_authors("Smith J."), vec!["Smith J."]);
        assert_eq!(split_authors("Smith J.; "), vec!["Smith J.", ""]);
        assert!(split_authors("").is_empty());
    }
}
