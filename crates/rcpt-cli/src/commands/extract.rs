//! Extract command - pull line items from a single OCR output file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use clap::Args;
use console::style;
use tracing::{debug, info};

use rcpt_core::extraction::{ItemExtractor, LineItemExtractor};
use rcpt_core::models::receipt::{ReceiptItem, TextLine, total_price};
use rcpt_core::ocr::OcrDocument;
use rcpt_core::sink::{
    ITEM_NAME_DIMENSION, ITEM_NUMBER_DIMENSION, MeasureRecord, USER_ID_DIMENSION, build_records,
};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file: plain text (one OCR line per line) or a saved Textract JSON response
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Emit time-series records instead of items
    #[arg(long)]
    records: bool,

    /// User id dimension for records
    #[arg(long, default_value = "local")]
    user_id: String,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let lines = load_lines(&args.input)?;
    if lines.is_empty() {
        anyhow::bail!("No text found in {}", args.input.display());
    }

    let extractor = LineItemExtractor::from_config(&config.extraction);
    let items = extractor.extract(&lines);

    let output = if args.records {
        let records = build_records(&args.user_id, &config.sink.measure_name, &items, Utc::now());
        format_records(&records, args.format)?
    } else {
        format_items(&items, args.format)?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read OCR lines from a text file or a saved Textract JSON response.
pub fn load_lines(path: &Path) -> anyhow::Result<Vec<TextLine>> {
    let content = fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let lines = if is_json {
        OcrDocument::from_json(&content)?.lines()
    } else {
        TextLine::from_text(&content)
    };

    debug!("Loaded {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

pub fn format_items(items: &[ReceiptItem], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(["item_number", "item_name", "price"])?;
            for item in items {
                let price = format!("{:.2}", item.price);
                wtr.write_record([&item.item_number, &item.item_name, &price])?;
            }
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => Ok(format_text(items)),
    }
}

fn format_records(records: &[MeasureRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Text => Ok(format_records_text(records)),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record([
                "user_id",
                "item_number",
                "item_name",
                "measure_name",
                "measure_value",
                "time",
            ])?;
            for record in records {
                let mut row: Vec<&str> =
                    record.dimensions.iter().map(|d| d.value.as_str()).collect();
                row.extend([
                    record.measure_name.as_str(),
                    record.measure_value.as_str(),
                    record.time.as_str(),
                ]);
                wtr.write_record(&row)?;
            }
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
    }
}

fn format_text(items: &[ReceiptItem]) -> String {
    let mut output = String::new();

    if items.is_empty() {
        output.push_str("No items found\n");
        return output;
    }

    let name_width = items
        .iter()
        .map(|i| i.item_name.chars().count())
        .max()
        .unwrap_or(0);

    for item in items {
        output.push_str(&format!(
            "{:>8}  {:<width$}  {:>8.2}\n",
            item.item_number,
            item.item_name,
            item.price,
            width = name_width
        ));
    }

    output.push_str(&format!(
        "\n{} items, total {:.2}\n",
        items.len(),
        total_price(items)
    ));

    output
}

fn format_records_text(records: &[MeasureRecord]) -> String {
    if records.is_empty() {
        return "No records\n".to_string();
    }

    let header = ["user_id", "item_number", "item_name", "value", "time"];
    let rows: Vec<[&str; 5]> = records
        .iter()
        .map(|r| {
            [
                r.dimension(USER_ID_DIMENSION).unwrap_or_default(),
                r.dimension(ITEM_NUMBER_DIMENSION).unwrap_or_default(),
                r.dimension(ITEM_NAME_DIMENSION).unwrap_or_default(),
                r.measure_value.as_str(),
                r.time.as_str(),
            ]
        })
        .collect();

    // Widths in chars, which is what `{:<width$}` pads by
    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: &[&str; 5]| {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line.trim_end())
    };

    let mut output = render(&header);
    for row in &rows {
        output.push_str(&render(row));
    }
    output.push_str(&format!(
        "\n{} records, measure {}\n",
        records.len(),
        records[0].measure_name
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn items() -> Vec<ReceiptItem> {
        vec![
            ReceiptItem::new("48757", "SPRING MIX", 3.89),
            ReceiptItem::new("1234", "EGGS", 5.0),
        ]
    }

    #[test]
    fn test_format_csv() {
        let csv = format_items(&items(), OutputFormat::Csv).unwrap();
        assert_eq!(
            csv,
            "item_number,item_name,price\n48757,SPRING MIX,3.89\n1234,EGGS,5.00\n"
        );
    }

    #[test]
    fn test_format_text_total() {
        let text = format_items(&items(), OutputFormat::Text).unwrap();
        assert!(text.contains("SPRING MIX"));
        assert!(text.ends_with("2 items, total 8.89\n"));
    }

    #[test]
    fn test_format_text_aligns_non_ascii_names() {
        let items = vec![
            ReceiptItem::new("77", "CRÈME FRAÎCHE", 2.49),
            ReceiptItem::new("1234", "EGGS", 5.0),
        ];
        let text = format_items(&items, OutputFormat::Text).unwrap();
        let rows: Vec<&str> = text.lines().take(2).collect();

        assert_eq!(rows[0].chars().count(), rows[1].chars().count());
        assert!(rows[0].ends_with("    2.49"));
        assert!(rows[1].ends_with("    5.00"));
    }

    #[test]
    fn test_format_records_text_table() {
        let records = build_records("u1", "price", &items(), Utc::now());
        let text = format_records(&records, OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("user_id  item_number  item_name   value  time"));
        assert!(lines[1].starts_with("u1       48757        SPRING MIX  3.89   "));
        assert!(lines[2].starts_with("u1       1234         EGGS        5      "));
        assert!(text.ends_with("2 records, measure price\n"));
        assert!(serde_json::from_str::<serde_json::Value>(&text).is_err());
    }

    #[test]
    fn test_format_records_csv() {
        let records = build_records("u1", "price", &items(), Utc::now());
        let csv = format_records(&records, OutputFormat::Csv).unwrap();
        let second_line = csv.lines().nth(1).unwrap();
        assert!(second_line.starts_with("u1,48757,SPRING MIX,price,3.89,"));
    }

    #[test]
    fn test_load_lines_from_textract_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.json");
        fs::write(
            &path,
            r#"{"Blocks": [{"BlockType": "LINE", "Text": "48757 SPRING MIX"}, {"BlockType": "WORD", "Text": "x"}, {"BlockType": "LINE", "Text": "3.89"}]}"#,
        )
        .unwrap();

        let lines = load_lines(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "3.89");
    }
}
