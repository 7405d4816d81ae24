//! Inspection report snapshots and chart-ready series.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Count column selectable for a pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Total,
    Compliant,
    #[serde(alias = "nonCompliant")]
    NonCompliant,
    Pending,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Total,
        Metric::Compliant,
        Metric::NonCompliant,
        Metric::Pending,
    ];

    /// Legend text used for chart datasets
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Total => "Total",
            Self::Compliant => "Compliant",
            Self::NonCompliant => "Non-Compliant",
            Self::Pending => "Pending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    pub fn label(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.label() == label)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Report discriminator sent by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Inspection,
    Monitoring,
    Establishment,
}

impl ReportKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "inspection" => Some(Self::Inspection),
            "monitoring" => Some(Self::Monitoring),
            "establishment" => Some(Self::Establishment),
            _ => None,
        }
    }
}

/// Inspection counts for one period.
///
/// `None` means the server sent nothing for the field. `total` is taken as
/// reported and never derived from the other three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionCountRecord {
    pub total: Option<u64>,
    pub compliant: Option<u64>,
    pub non_compliant: Option<u64>,
    pub pending: Option<u64>,
}

impl InspectionCountRecord {
    pub fn new(total: u64, compliant: u64, non_compliant: u64, pending: u64) -> Self {
        Self {
            total: Some(total),
            compliant: Some(compliant),
            non_compliant: Some(non_compliant),
            pending: Some(pending),
        }
    }

    pub fn get(&self, metric: Metric) -> Option<u64> {
        match metric {
            Metric::Total => self.total,
            Metric::Compliant => self.compliant,
            Metric::NonCompliant => self.non_compliant,
            Metric::Pending => self.pending,
        }
    }

    pub fn set(&mut self, metric: Metric, value: Option<u64>) {
        match metric {
            Metric::Total => self.total = value,
            Metric::Compliant => self.compliant = value,
            Metric::NonCompliant => self.non_compliant = value,
            Metric::Pending => self.pending = value,
        }
    }

    pub fn with(mut self, metric: Metric, value: u64) -> Self {
        self.set(metric, Some(value));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub kind: ReportKind,
    pub totals: InspectionCountRecord,
    #[serde(default)]
    pub quarterly_trend: BTreeMap<Quarter, InspectionCountRecord>,
    /// Keyed by ISO `YYYY-MM-DD` date
    #[serde(default)]
    pub daily_inspections: BTreeMap<String, InspectionCountRecord>,
}

impl ReportSnapshot {
    pub fn new(kind: ReportKind, totals: InspectionCountRecord) -> Self {
        Self {
            kind,
            totals,
            quarterly_trend: BTreeMap::new(),
            daily_inspections: BTreeMap::new(),
        }
    }
}

/// One labelled value of a pivoted series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: u64,
    /// True when `value` is zero because the source had no entry
    pub defaulted: bool,
}

impl SeriesPoint {
    pub fn measured(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value,
            defaulted: false,
        }
    }

    pub fn absent(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: 0,
            defaulted: true,
        }
    }

    pub fn from_count(label: impl Into<String>, value: Option<u64>) -> Self {
        match value {
            Some(v) => Self::measured(label, v),
            None => Self::absent(label),
        }
    }
}

/// Chart payload handed to the renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<u64>,
    /// Renderer styling (colors, tension, fill), passed through untouched
    #[serde(flatten)]
    pub style: serde_json::Map<String, serde_json::Value>,
}
