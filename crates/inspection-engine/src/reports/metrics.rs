use inspection_types::{InspectionCountRecord, Metric, ReportKind, ReportSnapshot};
use serde::{Deserialize, Serialize};

/// Percentage of compliant inspections with exactly two decimals.
///
/// Rounds half-up in integer arithmetic. A zero total yields `"0.00"`.
pub fn compliance_rate(compliant: u64, total: u64) -> String {
    if total == 0 {
        return "0.00".to_string();
    }

    let compliant = u128::from(compliant);
    let total = u128::from(total);
    let hundredths = (compliant * 20_000 + total) / (total * 2);

    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

/// Sum one metric over several records. Absent fields count as zero.
pub fn sum_across_reports<'r, I>(records: I, metric: Metric) -> u64
where
    I: IntoIterator<Item = &'r InspectionCountRecord>,
{
    records
        .into_iter()
        .filter_map(|record| record.get(metric))
        .fold(0u64, u64::saturating_add)
}

/// Headline numbers for a report card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub kind: ReportKind,
    pub total: u64,
    pub compliant: u64,
    pub non_compliant: u64,
    pub pending: u64,
    pub compliance_rate: String,
}

pub fn summarize(report: &ReportSnapshot) -> ReportSummary {
    let totals = &report.totals;
    let total = totals.total.unwrap_or(0);
    let compliant = totals.compliant.unwrap_or(0);

    ReportSummary {
        kind: report.kind,
        total,
        compliant,
        non_compliant: totals.non_compliant.unwrap_or(0),
        pending: totals.pending.unwrap_or(0),
        compliance_rate: compliance_rate(compliant, total),
    }
}
