//! Price line matching.

use super::FieldExtractor;
use super::patterns::PRICE_LINE;

/// Matcher for price lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceLineRule;

impl FieldExtractor for PriceLineRule {
    type Output<'a> = f64;

    fn extract<'a>(&self, line: &'a str) -> Option<Self::Output<'a>> {
        match_price_line(line)
    }
}

/// Match a price line and parse its amount.
///
/// The amount must carry exactly two fractional digits, separated by `.` or
/// `,`. A single trailing quantity digit is allowed and discarded.
pub fn match_price_line(line: &str) -> Option<f64> {
    let caps = PRICE_LINE.captures(line)?;
    parse_price(caps.get(1)?.as_str())
}

/// Parse an amount with either decimal separator.
pub fn parse_price(s: &str) -> Option<f64> {
    s.replace(',', ".").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_match_price_line() {
        assert_eq!(match_price_line("3.89"), Some(3.89));
        assert_eq!(match_price_line("3,89"), Some(3.89));
        assert_eq!(match_price_line("3.89 3"), Some(3.89));
        assert_eq!(match_price_line("12.00\t2"), Some(12.0));
    }

    #[test]
    fn test_fractional_digits_must_be_two() {
        assert_eq!(match_price_line("3.8"), None);
        assert_eq!(match_price_line("3.891"), None);
        assert_eq!(match_price_line("3"), None);
    }

    #[test]
    fn test_rejects_negative_and_noise() {
        assert_eq!(match_price_line("-3.89"), None);
        assert_eq!(match_price_line("$3.89"), None);
        assert_eq!(match_price_line("3.89 12"), None);
        assert_eq!(match_price_line("3.89 A"), None);
        assert_eq!(match_price_line("no price here"), None);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("45,20"), Some(45.2));
        assert_eq!(parse_price("0.99"), Some(0.99));
        assert_eq!(parse_price("abc"), None);
    }
}
