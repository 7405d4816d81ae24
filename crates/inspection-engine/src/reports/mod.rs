//! Report aggregation
//!
//! Turns the per-period counts of a report snapshot into chart series and
//! headline figures. Counts are read as reported; `total` is never derived
//! from the other columns.

pub mod chart;
pub mod metrics;
pub mod parse;
pub mod period;
pub mod pivot;

pub use chart::{metric_style, ChartBuilder};
pub use metrics::{compliance_rate, sum_across_reports, summarize, ReportSummary};
pub use parse::{parse_count_record, parse_report, parse_reports};
pub use pivot::{pivot_daily, pivot_daily_with_format, pivot_quarterly};

use crate::config::EngineConfig;
use crate::error::Result;
use inspection_types::{ChartData, Metric, ReportSnapshot, SeriesPoint};

/// Report transforms bound to the configured label format
#[derive(Debug, Clone)]
pub struct ReportAggregator {
    daily_label_format: String,
}

impl ReportAggregator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            daily_label_format: config.daily_label_format.clone(),
        }
    }

    pub fn quarterly(&self, report: &ReportSnapshot, metric: Metric) -> Vec<SeriesPoint> {
        pivot_quarterly(&report.quarterly_trend, metric)
    }

    pub fn daily(&self, report: &ReportSnapshot, metric: Metric) -> Result<Vec<SeriesPoint>> {
        pivot_daily_with_format(&report.daily_inspections, metric, &self.daily_label_format)
    }

    /// One dataset per metric over Q1..Q4
    pub fn quarterly_chart(
        &self,
        report: &ReportSnapshot,
        metrics: &[Metric],
    ) -> Result<ChartData> {
        metrics
            .iter()
            .try_fold(ChartBuilder::new(), |builder, metric| {
                builder.series(
                    metric.display_name(),
                    &self.quarterly(report, *metric),
                    metric_style(*metric),
                )
            })
            .map(ChartBuilder::build)
    }

    /// One dataset per metric over the report's days
    pub fn daily_chart(&self, report: &ReportSnapshot, metrics: &[Metric]) -> Result<ChartData> {
        metrics
            .iter()
            .try_fold(ChartBuilder::new(), |builder, metric| {
                builder.series(
                    metric.display_name(),
                    &self.daily(report, *metric)?,
                    metric_style(*metric),
                )
            })
            .map(ChartBuilder::build)
    }

    pub fn summary(&self, report: &ReportSnapshot) -> ReportSummary {
        summarize(report)
    }
}

impl Default for ReportAggregator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
