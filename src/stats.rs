use crate::record::SalesRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How many entries a product ranking shows by default.
pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// Headline numbers for the stats cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of sale records.
    pub total_sales: usize,
    /// Sum of quantities.
    pub total_units: u64,
    /// Sum of line totals.
    pub total_revenue: f64,
    /// Revenue per sale; 0 for an empty set.
    pub average_ticket: f64,
    /// Product with the highest summed quantity, if any.
    pub top_product: Option<String>,
}

impl DashboardStats {
    pub fn compute(records: &[SalesRecord]) -> Self {
        let total_sales = records.len();
        let total_units: u64 = records.iter().map(|r| u64::from(r.quantity)).sum();
        let total_revenue: f64 = records.iter().map(|r| r.line_total).sum();
        let average_ticket = if total_sales > 0 {
            total_revenue / total_sales as f64
        } else {
            0.0
        };
        let top_product = top_products(records, 1)
            .into_iter()
            .next()
            .map(|rank| rank.product);

        Self {
            total_sales,
            total_units,
            total_revenue,
            average_ticket,
            top_product,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRank {
    pub product: String,
    pub units: u64,
}

/// Products ranked by summed units, descending, ties broken alphabetically,
/// capped at `limit`. Records with an empty product name are ignored.
pub fn top_products(records: &[SalesRecord], limit: usize) -> Vec<ProductRank> {
    let mut units_by_product: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        if record.medicine.is_empty() {
            continue;
        }
        *units_by_product.entry(&record.medicine).or_default() += u64::from(record.quantity);
    }

    let mut ranking: Vec<ProductRank> = units_by_product
        .into_iter()
        .map(|(product, units)| ProductRank {
            product: product.to_string(),
            units,
        })
        .collect();
    ranking.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.product.cmp(&b.product)));
    ranking.truncate(limit);
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(medicine: &str, quantity: u32, price: f64) -> SalesRecord {
        SalesRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            medicine.to_string(),
            "Analgésico".to_string(),
            quantity,
            price,
            "SP".to_string(),
            "Ana".to_string(),
        )
    }

    #[test]
    fn test_compute_headline_numbers() {
        let records = vec![
            record("Aspirina", 2, 10.0),
            record("Dipirona", 5, 4.0),
            record("Aspirina", 1, 10.0),
        ];
        let stats = DashboardStats::compute(&records);
        assert_eq!(stats.total_sales, 3);
        assert_eq!(stats.total_units, 8);
        assert_eq!(stats.total_revenue, 50.0);
        assert!((stats.average_ticket - 50.0 / 3.0).abs() < 1e-9);
        // Dipirona wins on units (5 vs 3) despite lower revenue.
        assert_eq!(stats.top_product.as_deref(), Some("Dipirona"));
    }

    #[test]
    fn test_empty_set_yields_zeroes() {
        let stats = DashboardStats::compute(&[]);
        assert_eq!(stats.total_sales, 0);
        assert_eq!(stats.total_revenue, 0.0);
        assert_eq!(stats.average_ticket, 0.0);
        assert_eq!(stats.top_product, None);
    }

    #[test]
    fn test_top_products_ranking() {
        let records = vec![
            record("Aspirina", 3, 10.0),
            record("Dipirona", 5, 4.0),
            record("Vitamina C", 5, 8.0),
            record("Dorflex", 1, 12.0),
        ];
        let ranking = top_products(&records, 3);
        assert_eq!(ranking.len(), 3);
        // Tie between Dipirona and Vitamina C resolves alphabetically.
        assert_eq!(ranking[0].product, "Dipirona");
        assert_eq!(ranking[1].product, "Vitamina C");
        assert_eq!(ranking[2].product, "Aspirina");
    }

    #[test]
    fn test_top_products_ignores_empty_names() {
        let records = vec![record("", 100, 1.0), record("Aspirina", 1, 1.0)];
        let ranking = top_products(&records, TOP_PRODUCTS_LIMIT);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].product, "Aspirina");
    }
}
