use crate::error::{EngineError, Result};
use inspection_types::{ChartData, ChartDataset, Metric, SeriesPoint};
use serde_json::{json, Map, Value};

/// Assembles several series over the same labels into one chart payload
#[derive(Debug, Default)]
pub struct ChartBuilder {
    labels: Option<Vec<String>>,
    datasets: Vec<ChartDataset>,
}

impl ChartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dataset. Its labels must match those of earlier datasets.
    pub fn series(
        mut self,
        label: impl Into<String>,
        points: &[SeriesPoint],
        style: Map<String, Value>,
    ) -> Result<Self> {
        let label = label.into();
        let labels: Vec<String> = points.iter().map(|p| p.label.clone()).collect();

        match &self.labels {
            Some(existing) if *existing != labels => {
                return Err(EngineError::invalid_data(
                    format!("chart dataset {}", label),
                    "labels differ from earlier datasets",
                ));
            }
            Some(_) => {}
            None => self.labels = Some(labels),
        }

        self.datasets.push(ChartDataset {
            label,
            data: points.iter().map(|p| p.value).collect(),
            style,
        });
        Ok(self)
    }

    pub fn build(self) -> ChartData {
        ChartData {
            labels: self.labels.unwrap_or_default(),
            datasets: self.datasets,
        }
    }
}

/// Default dashboard colors for a metric's line
pub fn metric_style(metric: Metric) -> Map<String, Value> {
    let color = match metric {
        Metric::Total => "rgb(59, 130, 246)",
        Metric::Compliant => "rgb(16, 185, 129)",
        Metric::NonCompliant => "rgb(239, 68, 68)",
        Metric::Pending => "rgb(245, 158, 11)",
    };

    let mut style = Map::new();
    style.insert("borderColor".into(), json!(color));
    style.insert("backgroundColor".into(), json!(color));
    style.insert("tension".into(), json!(0.1));
    style
}
