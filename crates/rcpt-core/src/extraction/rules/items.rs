//! Item line matching.

use super::FieldExtractor;
use super::patterns::ITEM_LINE;

/// An item line split into its number and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLine<'a> {
    /// Leading digit run.
    pub number: &'a str,
    /// Remaining text, trimmed.
    pub name: &'a str,
}

/// Matcher for "item number + name" lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemLineRule;

impl FieldExtractor for ItemLineRule {
    type Output<'a> = ItemLine<'a>;

    fn extract<'a>(&self, line: &'a str) -> Option<Self::Output<'a>> {
        match_item_line(line)
    }
}

/// Split a line into item number and name.
pub fn match_item_line(line: &str) -> Option<ItemLine<'_>> {
    let caps = ITEM_LINE.captures(line)?;
    let number = caps.get(1)?.as_str();
    let name = caps.get(2)?.as_str().trim();

    Some(ItemLine { number, name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_match_item_line() {
        assert_eq!(
            match_item_line("48757 SPRING MIX"),
            Some(ItemLine { number: "48757", name: "SPRING MIX" })
        );
        assert_eq!(
            match_item_line("1   ORGANIC   EGGS  "),
            Some(ItemLine { number: "1", name: "ORGANIC   EGGS" })
        );
    }

    #[test]
    fn test_item_line_requires_leading_digits_and_space() {
        assert_eq!(match_item_line("SUBTOTAL 12"), None);
        assert_eq!(match_item_line("48757SPRING"), None);
        assert_eq!(match_item_line("48757"), None);
        assert_eq!(match_item_line(""), None);
    }

    #[test]
    fn test_price_line_can_look_like_item_line() {
        // "3 89" reads as item number 3, name "89"
        assert_eq!(
            match_item_line("3 89"),
            Some(ItemLine { number: "3", name: "89" })
        );
        assert_eq!(match_item_line("3.89 3"), None);
    }
}
