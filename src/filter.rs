use crate::record::{Dimension, SalesRecord};
use serde::{Deserialize, Serialize};

/// A single dimension's filter state: the "all" sentinel or a concrete value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    pub fn value(value: impl Into<String>) -> Self {
        Selection::Value(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Value(value) => value == candidate,
        }
    }
}

/// The user's filter choices across all four dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub city: Selection,
    pub category: Selection,
    pub medicine: Selection,
    pub seller: Selection,
}

impl FilterSelection {
    pub fn get(&self, dimension: Dimension) -> &Selection {
        match dimension {
            Dimension::City => &self.city,
            Dimension::Category => &self.category,
            Dimension::Medicine => &self.medicine,
            Dimension::Seller => &self.seller,
        }
    }

    pub fn set(&mut self, dimension: Dimension, selection: Selection) {
        match dimension {
            Dimension::City => self.city = selection,
            Dimension::Category => self.category = selection,
            Dimension::Medicine => self.medicine = selection,
            Dimension::Seller => self.seller = selection,
        }
    }

    pub fn with(mut self, dimension: Dimension, value: impl Into<String>) -> Self {
        self.set(dimension, Selection::value(value));
        self
    }
}

/// Dependent option lists for a resolved selection, one per dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub cities: Vec<String>,
    pub categories: Vec<String>,
    pub medicines: Vec<String>,
    pub sellers: Vec<String>,
}

impl FilterOptions {
    pub fn dependent(records: &[SalesRecord], selection: &FilterSelection) -> Self {
        Self {
            cities: dependent_options(records, Dimension::City, selection),
            categories: dependent_options(records, Dimension::Category, selection),
            medicines: dependent_options(records, Dimension::Medicine, selection),
            sellers: dependent_options(records, Dimension::Seller, selection),
        }
    }
}

fn distinct<'a, I>(records: I, dimension: Dimension) -> Vec<String>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut values: Vec<String> = records
        .into_iter()
        .map(|record| dimension.value_of(record))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    values.sort();
    values.dedup();
    values
}

/// Sorted, deduplicated values of `dimension`, ignoring empty fields.
pub fn distinct_values(records: &[SalesRecord], dimension: Dimension) -> Vec<String> {
    distinct(records, dimension)
}

/// Conjunctive filtering: a record passes only if every non-"all" dimension
/// matches. The base set is never mutated.
pub fn apply_filters(records: &[SalesRecord], selection: &FilterSelection) -> Vec<SalesRecord> {
    records
        .iter()
        .filter(|record| {
            Dimension::CASCADE
                .iter()
                .all(|dimension| selection.get(*dimension).matches(dimension.value_of(record)))
        })
        .cloned()
        .collect()
}

/// Option list for `dimension`, narrowed by the selections on dimensions that
/// causally precede it in the cascade. Later dimensions never narrow it.
pub fn dependent_options(
    records: &[SalesRecord],
    dimension: Dimension,
    selection: &FilterSelection,
) -> Vec<String> {
    let narrowed = records.iter().filter(|record| {
        Dimension::CASCADE
            .iter()
            .take_while(|preceding| **preceding != dimension)
            .all(|preceding| selection.get(*preceding).matches(preceding.value_of(record)))
    });
    distinct(narrowed, dimension)
}

/// Walks the cascade in order, resetting any selected value that is no longer
/// present in its narrowed option list back to "all". A reset feeds into the
/// narrowing of every subsequent dimension.
pub fn resolve_selection(records: &[SalesRecord], selection: &FilterSelection) -> FilterSelection {
    let mut resolved = selection.clone();
    for dimension in Dimension::CASCADE {
        let options = dependent_options(records, dimension, &resolved);
        if let Selection::Value(value) = resolved.get(dimension) {
            if !options.iter().any(|option| option == value) {
                resolved.set(dimension, Selection::All);
            }
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(city: &str, category: &str, medicine: &str, seller: &str) -> SalesRecord {
        SalesRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            medicine.to_string(),
            category.to_string(),
            1,
            10.0,
            city.to_string(),
            seller.to_string(),
        )
    }

    fn sample() -> Vec<SalesRecord> {
        vec![
            record("SP", "Analgésico", "Aspirina", "Ana"),
            record("SP", "Analgésico", "Dipirona", "Bruno"),
            record("SP", "Vitamina", "Vitamina C", "Ana"),
            record("RJ", "Antibiótico", "Amoxicilina", "Carla"),
            record("RJ", "Analgésico", "Dipirona", "Carla"),
        ]
    }

    #[test]
    fn test_distinct_values_sorted_without_duplicates() {
        let records = sample();
        assert_eq!(
            distinct_values(&records, Dimension::City),
            vec!["RJ".to_string(), "SP".to_string()]
        );
        assert_eq!(
            distinct_values(&records, Dimension::Seller),
            vec!["Ana".to_string(), "Bruno".to_string(), "Carla".to_string()]
        );
    }

    #[test]
    fn test_distinct_values_ignores_empty_fields() {
        let mut records = sample();
        records.push(record("", "Analgésico", "Aspirina", "Ana"));
        assert_eq!(
            distinct_values(&records, Dimension::City),
            vec!["RJ".to_string(), "SP".to_string()]
        );
    }

    #[test]
    fn test_apply_filters_is_conjunctive() {
        let records = sample();
        let selection = FilterSelection::default()
            .with(Dimension::City, "SP")
            .with(Dimension::Seller, "Ana");
        let filtered = apply_filters(&records, &selection);
        assert_eq!(filtered.len(), 2);
        assert!(filtered
            .iter()
            .all(|r| r.city == "SP" && r.seller == "Ana"));
    }

    #[test]
    fn test_all_selection_keeps_every_record() {
        let records = sample();
        let filtered = apply_filters(&records, &FilterSelection::default());
        assert_eq!(filtered.len(), records.len());
    }

    #[test]
    fn test_dependent_options_narrow_by_preceding_dimensions_only() {
        let records = sample();
        let selection = FilterSelection::default().with(Dimension::City, "SP");

        // Category options narrow to SP's categories.
        assert_eq!(
            dependent_options(&records, Dimension::Category, &selection),
            vec!["Analgésico".to_string(), "Vitamina".to_string()]
        );

        // A seller selection (after category in the cascade) must not narrow
        // the category options.
        let with_seller = selection.clone().with(Dimension::Seller, "Ana");
        assert_eq!(
            dependent_options(&records, Dimension::Category, &with_seller),
            dependent_options(&records, Dimension::Category, &selection)
        );

        // City options are never narrowed: city is first in the cascade.
        assert_eq!(
            dependent_options(&records, Dimension::City, &with_seller),
            vec!["RJ".to_string(), "SP".to_string()]
        );
    }

    #[test]
    fn test_resolve_selection_resets_stale_values() {
        let records = sample();
        // Antibiótico only exists in RJ; with SP selected it must reset.
        let selection = FilterSelection::default()
            .with(Dimension::City, "SP")
            .with(Dimension::Category, "Antibiótico");
        let resolved = resolve_selection(&records, &selection);
        assert_eq!(resolved.city, Selection::value("SP"));
        assert_eq!(resolved.category, Selection::All);
    }

    #[test]
    fn test_resolve_selection_cascades_resets() {
        let records = sample();
        // Amoxicilina is only sold in RJ under Antibiótico. With SP selected
        // the category resets, and the medicine (absent among SP records)
        // resets too.
        let selection = FilterSelection::default()
            .with(Dimension::City, "SP")
            .with(Dimension::Category, "Antibiótico")
            .with(Dimension::Medicine, "Amoxicilina");
        let resolved = resolve_selection(&records, &selection);
        assert_eq!(resolved.category, Selection::All);
        assert_eq!(resolved.medicine, Selection::All);
    }

    #[test]
    fn test_resolve_selection_is_idempotent() {
        let records = sample();
        let selection = FilterSelection::default()
            .with(Dimension::City, "SP")
            .with(Dimension::Category, "Antibiótico");
        let once = resolve_selection(&records, &selection);
        let twice = resolve_selection(&records, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_resolved_values_stay_within_their_option_lists() {
        let records = sample();
        let selection = FilterSelection::default()
            .with(Dimension::City, "RJ")
            .with(Dimension::Medicine, "Dipirona");
        let resolved = resolve_selection(&records, &selection);
        for dimension in Dimension::CASCADE {
            if let Selection::Value(value) = resolved.get(dimension) {
                let options = dependent_options(&records, dimension, &resolved);
                assert!(options.contains(value));
            }
        }
    }
}
