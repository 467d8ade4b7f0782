//! # Pharmacy Sales Engine
//!
//! The data engine behind a pharmacy sales dashboard: it parses a delimited
//! sales file once, keeps the record set immutable for the session, and
//! recomputes filtered views (stats, chart series, period table, projection)
//! on every filter change.
//!
//! ## Core Concepts
//!
//! - **SalesRecord**: one parsed input line with a derived `line_total`
//! - **FilterSelection**: per-dimension choices with dependent option lists
//!   (city → category → medicine → seller)
//! - **Period aggregation**: one bucketing pass per granularity feeds both
//!   the chart series and the table summaries in the same order
//! - **Projection**: a labeled placeholder series, never a real forecast
//!
//! ## Example
//!
//! ```rust
//! use pharmacy_sales_engine::{
//!     Dimension, FilterSelection, Granularity, ProjectionMetric, SalesHistory,
//! };
//!
//! let csv = "Data,Medicamento,Categoria,Quantidade,Preço,Cidade,Vendedor\n\
//!            2024-01-01,Aspirina,Analgésico,2,R$ 10.00,SP,Ana\n\
//!            2024-01-02,Dipirona,Analgésico,1,R$ 5.00,RJ,Bruno";
//!
//! let history = SalesHistory::from_delimited(csv).unwrap();
//! let selection = FilterSelection::default().with(Dimension::City, "SP");
//! let view = history.view(&selection, Granularity::Daily, ProjectionMetric::Revenue);
//!
//! assert_eq!(view.stats.total_sales, 1);
//! assert_eq!(view.stats.total_revenue, 20.0);
//! ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod parser;
pub mod projection;
pub mod record;
pub mod render;
pub mod stats;
pub mod utils;

#[cfg(feature = "prediction-api")]
pub mod api;

pub use aggregate::{
    aggregate, bucket_start, chart_key, chart_series, ChartPoint, PeriodAggregation,
    PeriodSummary, TableView, DAILY_TABLE_CAP,
};
pub use error::{DashboardError, Result};
pub use filter::*;
pub use parser::{parse, ParseOutcome, ParseWarning};
pub use projection::{
    NaiveProjection, Projection, ProjectionPoint, ProjectionStrategy, PROJECTION_POINTS,
};
pub use record::*;
pub use render::DashboardReport;
pub use stats::{top_products, DashboardStats, ProductRank, TOP_PRODUCTS_LIMIT};
pub use utils::*;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the presentation layer needs after one filter change. Plain
/// data only: chart handles and DOM lifecycle stay on the consumer's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// The selection after stale values were reset to "all".
    pub selection: FilterSelection,
    /// Dependent option lists for the resolved selection.
    pub options: FilterOptions,
    pub granularity: Granularity,
    pub stats: DashboardStats,
    pub series: Vec<ChartPoint>,
    pub table: TableView,
    pub projection: Projection,
}

/// The session's record set: loaded once, immutable afterwards. Filtered
/// views are computed freshly per call and never touch the base set.
#[derive(Debug, Clone)]
pub struct SalesHistory {
    records: Vec<SalesRecord>,
    warnings: Vec<ParseWarning>,
}

impl SalesHistory {
    pub fn from_delimited(raw_text: &str) -> Result<Self> {
        let outcome = parser::parse(raw_text)?;
        info!(
            "loaded {} sales records ({} warnings)",
            outcome.records.len(),
            outcome.warnings.len()
        );
        Ok(Self {
            records: outcome.records,
            warnings: outcome.warnings,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw_text = std::fs::read_to_string(path)?;
        Self::from_delimited(&raw_text)
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Recomputes the dashboard with the placeholder projection strategy.
    pub fn view(
        &self,
        selection: &FilterSelection,
        granularity: Granularity,
        metric: ProjectionMetric,
    ) -> DashboardView {
        self.view_with_strategy(selection, granularity, metric, &NaiveProjection)
    }

    /// Recomputes the dashboard with a caller-provided projection strategy.
    ///
    /// The projection is seeded from the full record set's series, not the
    /// filtered subset, so it is stable across filter changes.
    pub fn view_with_strategy(
        &self,
        selection: &FilterSelection,
        granularity: Granularity,
        metric: ProjectionMetric,
        strategy: &dyn ProjectionStrategy,
    ) -> DashboardView {
        let resolved = filter::resolve_selection(&self.records, selection);
        let options = FilterOptions::dependent(&self.records, &resolved);
        let filtered = filter::apply_filters(&self.records, &resolved);
        debug!(
            "view: {} of {} records after filtering",
            filtered.len(),
            self.records.len()
        );

        let aggregation = aggregate::aggregate(&filtered, granularity);
        let stats = DashboardStats::compute(&filtered);

        let table = match granularity {
            Granularity::Daily => {
                TableView::Records(filtered.iter().take(DAILY_TABLE_CAP).cloned().collect())
            }
            Granularity::Weekly | Granularity::Monthly => {
                TableView::Summaries(aggregation.summaries)
            }
        };

        let full_series = aggregate::chart_series(&self.records, granularity);
        let projection = strategy.project(&full_series, granularity, metric, PROJECTION_POINTS);

        DashboardView {
            selection: resolved,
            options,
            granularity,
            stats,
            series: aggregation.series,
            table,
            projection,
        }
    }
}
