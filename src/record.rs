use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed line of the sales file. Created once at load time and never
/// mutated; filtered views are fresh collections over clones of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub medicine: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub city: String,
    pub seller: String,
    /// Always `quantity × unit_price`, recomputed at parse time. Never read
    /// from the input file.
    pub line_total: f64,
}

impl SalesRecord {
    pub fn new(
        date: NaiveDate,
        medicine: String,
        category: String,
        quantity: u32,
        unit_price: f64,
        city: String,
        seller: String,
    ) -> Self {
        let line_total = f64::from(quantity) * unit_price;
        Self {
            date,
            medicine,
            category,
            quantity,
            unit_price,
            city,
            seller,
            line_total,
        }
    }
}

/// Categorical fields the dashboard filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    City,
    Category,
    Medicine,
    Seller,
}

impl Dimension {
    /// The fixed cascade order for dependent filters: selections on a
    /// dimension only narrow the option lists of dimensions after it.
    pub const CASCADE: [Dimension; 4] = [
        Dimension::City,
        Dimension::Category,
        Dimension::Medicine,
        Dimension::Seller,
    ];

    pub fn value_of<'a>(&self, record: &'a SalesRecord) -> &'a str {
        match self {
            Dimension::City => &record.city,
            Dimension::Category => &record.category,
            Dimension::Medicine => &record.medicine,
            Dimension::Seller => &record.seller,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::City => "city",
            Dimension::Category => "category",
            Dimension::Medicine => "medicine",
            Dimension::Seller => "seller",
        };
        write!(f, "{}", name)
    }
}

/// Time-bucket size used by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

/// Which series value seeds the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMetric {
    Revenue,
    Units,
}
