use crate::record::{Granularity, SalesRecord};
use crate::utils::{month_start, period_label, week_start};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Daily table mode bypasses aggregation and returns at most this many raw
/// records, in input order.
pub const DAILY_TABLE_CAP: usize = 500;

/// One point of the chart series: the bucket's starting date plus the summed
/// revenue and units of every record in the bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub period: NaiveDate,
    pub revenue: f64,
    pub units: u64,
}

impl ChartPoint {
    /// String key for chart axes: ISO forms whose lexicographic order equals
    /// chronological order (`%Y-%m-%d` daily/weekly, `%Y-%m` monthly).
    pub fn chart_key(&self, granularity: Granularity) -> String {
        chart_key(self.period, granularity)
    }
}

pub fn chart_key(period: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Monthly => period.format("%Y-%m").to_string(),
        Granularity::Daily | Granularity::Weekly => period.format("%Y-%m-%d").to_string(),
    }
}

/// Start of the bucket a record dated `date` falls into.
pub fn bucket_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Daily => date,
        Granularity::Weekly => week_start(date),
        Granularity::Monthly => month_start(date),
    }
}

/// Table-oriented rollup of one bucket. Label sets are deduplicated and
/// sorted; every source record contributes to exactly one summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: NaiveDate,
    pub label: String,
    pub total_quantity: u64,
    pub total_revenue: f64,
    pub medicines: Vec<String>,
    pub categories: Vec<String>,
    pub cities: Vec<String>,
    pub sellers: Vec<String>,
}

#[derive(Debug, Default)]
struct Bucket {
    revenue: f64,
    units: u64,
    medicines: BTreeSet<String>,
    categories: BTreeSet<String>,
    cities: BTreeSet<String>,
    sellers: BTreeSet<String>,
}

impl Bucket {
    fn absorb(&mut self, record: &SalesRecord) {
        self.revenue += record.line_total;
        self.units += u64::from(record.quantity);
        insert_label(&mut self.medicines, &record.medicine);
        insert_label(&mut self.categories, &record.category);
        insert_label(&mut self.cities, &record.city);
        insert_label(&mut self.sellers, &record.seller);
    }
}

fn insert_label(set: &mut BTreeSet<String>, value: &str) {
    if !value.is_empty() && !set.contains(value) {
        set.insert(value.to_string());
    }
}

/// Chart series and table summaries from one pass over one sorted map, so
/// both outputs share chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodAggregation {
    pub series: Vec<ChartPoint>,
    pub summaries: Vec<PeriodSummary>,
}

pub fn aggregate(records: &[SalesRecord], granularity: Granularity) -> PeriodAggregation {
    let mut buckets: BTreeMap<NaiveDate, Bucket> = BTreeMap::new();

    for record in records {
        buckets
            .entry(bucket_start(record.date, granularity))
            .or_default()
            .absorb(record);
    }

    let series = buckets
        .iter()
        .map(|(period, bucket)| ChartPoint {
            period: *period,
            revenue: bucket.revenue,
            units: bucket.units,
        })
        .collect();

    let summaries = buckets
        .into_iter()
        .map(|(period, bucket)| PeriodSummary {
            period,
            label: period_label(period, granularity),
            total_quantity: bucket.units,
            total_revenue: bucket.revenue,
            medicines: bucket.medicines.into_iter().collect(),
            categories: bucket.categories.into_iter().collect(),
            cities: bucket.cities.into_iter().collect(),
            sellers: bucket.sellers.into_iter().collect(),
        })
        .collect();

    PeriodAggregation { series, summaries }
}

/// Chart-oriented series only, sorted ascending by bucket start.
pub fn chart_series(records: &[SalesRecord], granularity: Granularity) -> Vec<ChartPoint> {
    aggregate(records, granularity).series
}

/// What the detail table shows for a granularity: raw records (capped) for
/// daily, period summaries otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "rows", rename_all = "snake_case")]
pub enum TableView {
    Records(Vec<SalesRecord>),
    Summaries(Vec<PeriodSummary>),
}

impl TableView {
    pub fn build(records: &[SalesRecord], granularity: Granularity) -> Self {
        match granularity {
            Granularity::Daily => {
                TableView::Records(records.iter().take(DAILY_TABLE_CAP).cloned().collect())
            }
            Granularity::Weekly | Granularity::Monthly => {
                TableView::Summaries(aggregate(records, granularity).summaries)
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TableView::Records(rows) => rows.len(),
            TableView::Summaries(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
