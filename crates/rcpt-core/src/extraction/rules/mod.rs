//! Rule-based matchers for receipt lines.

pub mod items;
pub mod patterns;
pub mod prices;
pub mod summary;

pub use items::{ItemLine, ItemLineRule, match_item_line};
pub use prices::{PriceLineRule, match_price_line, parse_price};
pub use summary::SummaryFilter;

/// Trait for single-line field matchers.
pub trait FieldExtractor {
    /// The type of value this matcher produces.
    type Output<'a>;

    /// Match one trimmed line, returning `None` when the line does not fit.
    fn extract<'a>(&self, line: &'a str) -> Option<Self::Output<'a>>;
}
