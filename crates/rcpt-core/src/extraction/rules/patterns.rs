//! Regex patterns for the receipt line layout.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Item line: "48757 SPRING MIX" -> item number, item name
    pub static ref ITEM_LINE: Regex = Regex::new(
        r"^([0-9]+)\s+(.+)"
    ).unwrap();

    // Price line: "3.89", "3,89", or "3.89 3" with a trailing quantity digit
    pub static ref PRICE_LINE: Regex = Regex::new(
        r"^([0-9]+[.,][0-9]{2})(?:\s+[0-9])?$"
    ).unwrap();
}
