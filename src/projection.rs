use crate::aggregate::ChartPoint;
use crate::record::{Granularity, ProjectionMetric};
use crate::utils::advance_period;
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of synthetic future points produced for the projection chart.
pub const PROJECTION_POINTS: usize = 7;

const NOISE_FACTOR: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub period: NaiveDate,
    pub value: f64,
}

/// A labeled projected series. The label travels with the data so a consumer
/// can never present the placeholder as a real forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub label: String,
    pub metric: ProjectionMetric,
    pub points: Vec<ProjectionPoint>,
}

/// Seam for swapping in a real forecasting model without touching the
/// aggregator: the aggregator hands over a plain series, the strategy hands
/// back a labeled projection.
pub trait ProjectionStrategy {
    fn label(&self) -> &str;

    fn project(
        &self,
        series: &[ChartPoint],
        granularity: Granularity,
        metric: ProjectionMetric,
        points: usize,
    ) -> Projection;
}

/// Placeholder strategy: repeats the series' last value with uniform upward
/// noise (`v × (1 + r × 0.1)`, `r ∈ [0,1)`). Every run yields different
/// values. Not a statistical model.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveProjection;

impl ProjectionStrategy for NaiveProjection {
    fn label(&self) -> &str {
        "Projeção ingênua (placeholder, não é um modelo estatístico)"
    }

    fn project(
        &self,
        series: &[ChartPoint],
        granularity: Granularity,
        metric: ProjectionMetric,
        points: usize,
    ) -> Projection {
        let mut projected = Vec::with_capacity(points);

        if let Some(last) = series.last() {
            let seed = match metric {
                ProjectionMetric::Revenue => last.revenue,
                ProjectionMetric::Units => last.units as f64,
            };

            let mut rng = rand::thread_rng();
            let mut period = last.period;
            for _ in 0..points {
                period = advance_period(period, granularity);
                let r: f64 = rng.gen();
                projected.push(ProjectionPoint {
                    period,
                    value: seed * (1.0 + r * NOISE_FACTOR),
                });
            }
        }

        Projection {
            label: self.label().to_string(),
            metric,
            points: projected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Vec<ChartPoint> {
        vec![
            ChartPoint {
                period: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                revenue: 50.0,
                units: 5,
            },
            ChartPoint {
                period: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                revenue: 100.0,
                units: 20,
            },
        ]
    }

    #[test]
    fn test_projects_the_requested_number_of_points() {
        let projection = NaiveProjection.project(
            &series(),
            Granularity::Daily,
            ProjectionMetric::Revenue,
            PROJECTION_POINTS,
        );
        assert_eq!(projection.points.len(), PROJECTION_POINTS);
    }

    #[test]
    fn test_points_stay_within_the_noise_band() {
        // Seed is the last value (100.0); each point is v × (1 + r × 0.1)
        // with r in [0,1), so values lie in [100, 110).
        let projection = NaiveProjection.project(
            &series(),
            Granularity::Daily,
            ProjectionMetric::Revenue,
            PROJECTION_POINTS,
        );
        for point in &projection.points {
            assert!(point.value >= 100.0);
            assert!(point.value < 110.0);
        }
    }

    #[test]
    fn test_units_metric_seeds_from_units() {
        let projection = NaiveProjection.project(
            &series(),
            Granularity::Daily,
            ProjectionMetric::Units,
            PROJECTION_POINTS,
        );
        for point in &projection.points {
            assert!(point.value >= 20.0);
            assert!(point.value < 22.0);
        }
    }

    #[test]
    fn test_periods_advance_from_the_last_bucket() {
        let projection = NaiveProjection.project(
            &series(),
            Granularity::Weekly,
            ProjectionMetric::Revenue,
            3,
        );
        let periods: Vec<NaiveDate> = projection.points.iter().map(|p| p.period).collect();
        assert_eq!(
            periods,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 23).unwrap(),
            ]
        );
    }

    #[test]
    fn test_empty_series_projects_nothing() {
        let projection = NaiveProjection.project(
            &[],
            Granularity::Daily,
            ProjectionMetric::Revenue,
            PROJECTION_POINTS,
        );
        assert!(projection.points.is_empty());
    }

    #[test]
    fn test_label_declares_the_placeholder() {
        let projection = NaiveProjection.project(
            &series(),
            Granularity::Daily,
            ProjectionMetric::Revenue,
            1,
        );
        assert!(projection.label.contains("placeholder"));
    }
}
