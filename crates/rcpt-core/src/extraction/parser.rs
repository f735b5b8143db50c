//! Adjacent-pair line item parser.

use std::iter::Peekable;

use tracing::{debug, trace};

use crate::models::config::ExtractionConfig;
use crate::models::receipt::{ReceiptItem, TextLine};

use super::ItemExtractor;
use super::rules::{FieldExtractor, ItemLineRule, PriceLineRule, SummaryFilter};

/// Extracts `(item number, item name, price)` from adjacent OCR lines.
///
/// Every adjacent pair `(lines[i], lines[i + 1])` is examined. A pair yields
/// an item when the first line is an item line, the second is a price line,
/// and the item name is not a summary row. After a match the scan resumes at
/// `i + 1`, so the price line is itself considered as the next item line.
#[derive(Debug, Clone, Default)]
pub struct LineItemExtractor {
    item_rule: ItemLineRule,
    price_rule: PriceLineRule,
    summary: SummaryFilter,
}

impl LineItemExtractor {
    /// Create an extractor with the default summary keywords.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::default().with_summary_filter(SummaryFilter::from_config(config))
    }

    /// Replace the summary row filter.
    pub fn with_summary_filter(mut self, summary: SummaryFilter) -> Self {
        self.summary = summary;
        self
    }

    /// Lazily extract items from any sequence of lines.
    pub fn items<I, S>(&self, lines: I) -> Items<'_, I::IntoIter>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Items {
            extractor: self,
            lines: lines.into_iter().peekable(),
        }
    }

    fn match_pair(&self, current: &str, next: &str) -> Option<ReceiptItem> {
        let item = self.item_rule.extract(current)?;

        let Some(price) = self.price_rule.extract(next) else {
            trace!(line = current, "item line not followed by a price");
            return None;
        };

        if self.summary.is_summary(item.name) {
            debug!(item_name = item.name, "skipping summary row");
            return None;
        }

        Some(ReceiptItem::new(item.number, item.name, price))
    }
}

impl ItemExtractor for LineItemExtractor {
    fn extract(&self, lines: &[TextLine]) -> Vec<ReceiptItem> {
        let items: Vec<_> = self.items(lines).collect();
        debug!("Extracted {} items from {} lines", items.len(), lines.len());
        items
    }

    fn extract_from_text(&self, text: &str) -> Vec<ReceiptItem> {
        self.extract(&TextLine::from_text(text))
    }
}

/// Lazy iterator over the items of a line sequence.
pub struct Items<'e, I: Iterator> {
    extractor: &'e LineItemExtractor,
    lines: Peekable<I>,
}

impl<I, S> Iterator for Items<'_, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = ReceiptItem;

    fn next(&mut self) -> Option<ReceiptItem> {
        while let Some(current) = self.lines.next() {
            let next = self.lines.peek()?;
            if let Some(item) = self
                .extractor
                .match_pair(current.as_ref().trim(), next.as_ref().trim())
            {
                return Some(item);
            }
        }
        None
    }
}
