//! Validation of raw report payloads.
//!
//! Counts arrive either as JSON integers or as digit strings (database
//! aggregates are serialized as strings). `null` or a missing key means the
//! field is absent. Anything else is rejected and the whole snapshot fails.

use crate::error::{EngineError, Result};
use crate::reports::period::{parse_iso_date, parse_quarter};
use inspection_types::{InspectionCountRecord, Metric, ReportKind, ReportSnapshot};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Parse one count field. `field` names it in the error.
pub fn parse_count(value: Option<&Value>, field: &str) -> Result<Option<u64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| EngineError::invalid_data(field, n)),
        Some(Value::String(s)) => {
            let digits = s.trim();
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(EngineError::invalid_data(field, format!("{:?}", s)));
            }
            digits
                .parse::<u64>()
                .map(Some)
                .map_err(|_| EngineError::invalid_data(field, format!("{:?}", s)))
        }
        Some(other) => Err(EngineError::invalid_data(field, other)),
    }
}

fn record_field_names(metric: Metric) -> &'static [&'static str] {
    match metric {
        Metric::Total => &["total"],
        Metric::Compliant => &["compliant"],
        Metric::NonCompliant => &["non_compliant", "nonCompliant"],
        Metric::Pending => &["pending"],
    }
}

/// Parse a `{total, compliant, non_compliant, pending}` object
pub fn parse_count_record(value: &Value, context: &str) -> Result<InspectionCountRecord> {
    let object = value
        .as_object()
        .ok_or_else(|| EngineError::invalid_data(context, value))?;

    let mut record = InspectionCountRecord::default();
    for metric in Metric::ALL {
        let names = record_field_names(metric);
        let found = names.iter().find_map(|name| object.get(*name).map(|v| (*name, v)));
        if let Some((name, raw)) = found {
            let count = parse_count(Some(raw), &format!("{}.{}", context, name))?;
            record.set(metric, count);
        }
    }

    Ok(record)
}

/// Keyed section of a report. PHP encodes an empty map as `[]`.
fn keyed_section<'v>(
    report: &'v Map<String, Value>,
    key: &str,
) -> Result<Option<&'v Map<String, Value>>> {
    match report.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(Value::Array(items)) if items.is_empty() => Ok(None),
        Some(other) => Err(EngineError::invalid_data(key, other)),
    }
}

/// Parse one report object as sent by the reports data endpoint
pub fn parse_report(value: &Value) -> Result<ReportSnapshot> {
    let report = value
        .as_object()
        .ok_or_else(|| EngineError::invalid_data("report", value))?;

    let kind = match report.get("type") {
        Some(Value::String(name)) => ReportKind::from_name(name)
            .ok_or_else(|| EngineError::invalid_data("type", name))?,
        Some(other) => return Err(EngineError::invalid_data("type", other)),
        None => return Err(EngineError::invalid_data("type", "missing")),
    };

    let totals = InspectionCountRecord {
        total: parse_count(report.get("total_inspections"), "total_inspections")?,
        compliant: parse_count(report.get("compliant_count"), "compliant_count")?,
        non_compliant: parse_count(report.get("non_compliant_count"), "non_compliant_count")?,
        pending: parse_count(report.get("pending_count"), "pending_count")?,
    };

    let mut quarterly_trend = BTreeMap::new();
    if let Some(section) = keyed_section(report, "quarterly_trend")? {
        for (label, raw) in section {
            let quarter = parse_quarter(label)?;
            let record = parse_count_record(raw, &format!("quarterly_trend.{}", label))?;
            quarterly_trend.insert(quarter, record);
        }
    }

    let mut daily_inspections = BTreeMap::new();
    if let Some(section) = keyed_section(report, "daily_inspections")? {
        for (date, raw) in section {
            parse_iso_date(date)?;
            let record = parse_count_record(raw, &format!("daily_inspections.{}", date))?;
            daily_inspections.insert(date.clone(), record);
        }
    }

    Ok(ReportSnapshot {
        kind,
        totals,
        quarterly_trend,
        daily_inspections,
    })
}

/// Parse a JSON array of reports. One bad report fails the batch.
pub fn parse_reports(value: &Value) -> Result<Vec<ReportSnapshot>> {
    let items = value
        .as_array()
        .ok_or_else(|| EngineError::invalid_data("reports", value))?;
    let reports = items.iter().map(parse_report).collect::<Result<Vec<_>>>()?;
    tracing::debug!(reports = reports.len(), "parsed report snapshots");
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspection_types::Quarter;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_count_distinguishes_absent_from_invalid() {
        assert_eq!(parse_count(None, "total").unwrap(), None);
        assert_eq!(parse_count(Some(&json!(null)), "total").unwrap(), None);
        assert_eq!(parse_count(Some(&json!(12)), "total").unwrap(), Some(12));
        assert_eq!(parse_count(Some(&json!(" 7 ")), "total").unwrap(), Some(7));

        for bad in [json!("abc"), json!(-1), json!(2.5), json!(""), json!(true), json!([1])] {
            let err = parse_count(Some(&bad), "total").unwrap_err();
            assert!(matches!(err, EngineError::InvalidData { ref field, .. } if field == "total"));
        }
    }

    #[test]
    fn test_parse_count_record_accepts_camel_case() {
        let record =
            parse_count_record(&json!({"total": 5, "nonCompliant": "2"}), "q").unwrap();
        assert_eq!(record.total, Some(5));
        assert_eq!(record.non_compliant, Some(2));
        assert_eq!(record.compliant, None);
    }

    #[test]
    fn test_parse_count_record_names_the_field() {
        let err = parse_count_record(&json!({"pending": "n/a"}), "daily_inspections.2024-03-01")
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidData {
                field: "daily_inspections.2024-03-01.pending".into(),
                found: "\"n/a\"".into(),
            }
        );
    }

    #[test]
    fn test_parse_full_report() {
        let raw = json!({
            "type": "inspection",
            "total_inspections": 12,
            "compliant_count": "8",
            "non_compliant_count": 3,
            "pending_count": null,
            "quarterly_trend": {
                "Q1": {"total": 5, "compliant": 4, "non_compliant": 1, "pending": 0},
                "Q3": {"total": 7}
            },
            "daily_inspections": {
                "2024-03-02": {"total": 5},
                "2024-03-01": {"total": 3}
            }
        });
        let report = parse_report(&raw).unwrap();

        assert_eq!(report.kind, ReportKind::Inspection);
        assert_eq!(report.totals.compliant, Some(8));
        assert_eq!(report.totals.pending, None);
        assert_eq!(report.quarterly_trend.len(), 2);
        assert_eq!(report.quarterly_trend[&Quarter::Q3].total, Some(7));
        assert_eq!(report.daily_inspections["2024-03-01"].total, Some(3));
    }

    #[test]
    fn test_empty_sections_encoded_as_arrays() {
        let raw = json!({"type": "monitoring", "quarterly_trend": [], "daily_inspections": []});
        let report = parse_report(&raw).unwrap();
        assert!(report.quarterly_trend.is_empty());
        assert!(report.daily_inspections.is_empty());
        assert_eq!(report.totals, InspectionCountRecord::default());
    }

    #[test]
    fn test_rejects_bad_keys_and_kinds() {
        let bad_quarter = json!({"type": "inspection", "quarterly_trend": {"Q5": {"total": 1}}});
        assert!(parse_report(&bad_quarter).is_err());

        let bad_date = json!({"type": "inspection", "daily_inspections": {"03/01/2024": {}}});
        assert!(parse_report(&bad_date).is_err());

        let padded = json!({"type": "inspection", "daily_inspections": {"2024-03- 1": {}}});
        assert!(parse_report(&padded).is_err());

        let bad_kind = json!({"type": "audit"});
        assert!(parse_report(&bad_kind).is_err());

        assert!(parse_report(&json!({})).is_err());
    }

    #[test]
    fn test_batch_fails_atomically() {
        let raw = json!([
            {"type": "inspection", "total_inspections": 3},
            {"type": "monitoring", "total_inspections": "lots"}
        ]);
        let err = parse_reports(&raw).unwrap_err();
        assert!(err.to_string().contains("total_inspections"));
    }
}
