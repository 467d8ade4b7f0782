use crate::error::{DashboardError, Result};
use crate::record::SalesRecord;
use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const COL_DATE: &str = "Data";
pub const COL_MEDICINE: &str = "Medicamento";
pub const COL_CATEGORY: &str = "Categoria";
pub const COL_QUANTITY: &str = "Quantidade";
pub const COL_PRICE: &str = "Preço";
pub const COL_CITY: &str = "Cidade";
pub const COL_SELLER: &str = "Vendedor";

pub const DEFAULT_QUANTITY: u32 = 1;
pub const DEFAULT_UNIT_PRICE: f64 = 0.0;

/// A coercion failure observed while parsing. Defaults still apply (the row
/// stays in the set except for `InvalidDate`, which skips it); the warning
/// makes the degradation visible instead of silent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    InvalidDate { line: usize, value: String },
    InvalidQuantity { line: usize, value: String },
    InvalidPrice { line: usize, value: String },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::InvalidDate { line, value } => {
                write!(f, "line {}: unparseable date {:?}, row skipped", line, value)
            }
            ParseWarning::InvalidQuantity { line, value } => {
                write!(
                    f,
                    "line {}: invalid quantity {:?}, defaulted to {}",
                    line, value, DEFAULT_QUANTITY
                )
            }
            ParseWarning::InvalidPrice { line, value } => {
                write!(
                    f,
                    "line {}: invalid price {:?}, defaulted to {}",
                    line, value, DEFAULT_UNIT_PRICE
                )
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<SalesRecord>,
    pub warnings: Vec<ParseWarning>,
}

struct ColumnIndex {
    date: Option<usize>,
    medicine: Option<usize>,
    category: Option<usize>,
    quantity: Option<usize>,
    price: Option<usize>,
    city: Option<usize>,
    seller: Option<usize>,
}

impl ColumnIndex {
    fn from_header(header: &[&str]) -> Self {
        let position = |name: &str| header.iter().position(|h| *h == name);
        Self {
            date: position(COL_DATE),
            medicine: position(COL_MEDICINE),
            category: position(COL_CATEGORY),
            quantity: position(COL_QUANTITY),
            price: position(COL_PRICE),
            city: position(COL_CITY),
            seller: position(COL_SELLER),
        }
    }
}

/// Parses delimited sales text into records plus coercion warnings.
///
/// The first non-empty line is the header; columns are matched by name. The
/// delimiter is a tab if the header contains one, a comma otherwise. A column
/// missing from the header yields an empty string or the numeric default,
/// silently; a present-but-malformed value yields the default plus a warning.
pub fn parse(raw_text: &str) -> Result<ParseOutcome> {
    let mut lines = raw_text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or(DashboardError::EmptyInput)?;
    let delimiter = if header_line.contains('\t') { '\t' } else { ',' };
    let header: Vec<&str> = header_line.split(delimiter).map(clean_field).collect();
    let columns = ColumnIndex::from_header(&header);

    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut saw_data_line = false;

    for (line_no, line) in lines {
        saw_data_line = true;
        let fields: Vec<&str> = line.split(delimiter).map(clean_field).collect();
        let field = |idx: Option<usize>| idx.and_then(|i| fields.get(i)).copied().unwrap_or("");

        let raw_date = field(columns.date);
        let date = match parse_date(raw_date) {
            Some(date) => date,
            None => {
                let warning = ParseWarning::InvalidDate {
                    line: line_no,
                    value: raw_date.to_string(),
                };
                warn!("{}", warning);
                warnings.push(warning);
                continue;
            }
        };

        let raw_quantity = field(columns.quantity);
        let quantity = if raw_quantity.is_empty() {
            DEFAULT_QUANTITY
        } else {
            match raw_quantity.parse::<u32>() {
                Ok(q) if q > 0 => q,
                _ => {
                    let warning = ParseWarning::InvalidQuantity {
                        line: line_no,
                        value: raw_quantity.to_string(),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                    DEFAULT_QUANTITY
                }
            }
        };

        let raw_price = field(columns.price);
        let unit_price = if raw_price.is_empty() {
            DEFAULT_UNIT_PRICE
        } else {
            match parse_price(raw_price) {
                Some(price) => price,
                None => {
                    let warning = ParseWarning::InvalidPrice {
                        line: line_no,
                        value: raw_price.to_string(),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                    DEFAULT_UNIT_PRICE
                }
            }
        };

        records.push(SalesRecord::new(
            date,
            field(columns.medicine).to_string(),
            field(columns.category).to_string(),
            quantity,
            unit_price,
            field(columns.city).to_string(),
            field(columns.seller).to_string(),
        ));
    }

    if !saw_data_line {
        return Err(DashboardError::EmptyInput);
    }

    Ok(ParseOutcome { records, warnings })
}

/// Strips surrounding whitespace and one pair of matching quotes.
fn clean_field(raw: &str) -> &str {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed);
    unquoted.trim()
}

/// Accepts ISO (`2024-01-31`) and pt-BR (`31/01/2024`) dates.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
}

/// Strips the `R$` marker, normalizes a lone comma decimal separator, and
/// parses a non-negative amount.
fn parse_price(raw: &str) -> Option<f64> {
    let stripped = raw.strip_prefix("R$").unwrap_or(raw).trim();
    let normalized = if stripped.contains(',') && !stripped.contains('.') {
        stripped.replace(',', ".")
    } else {
        stripped.to_string()
    };
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
