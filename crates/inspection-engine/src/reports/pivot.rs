use crate::error::{EngineError, Result};
use crate::reports::period::{date_label, parse_iso_date, DEFAULT_DAILY_LABEL};
use inspection_types::{InspectionCountRecord, Metric, Quarter, SeriesPoint};
use std::collections::BTreeMap;

/// Four points, Q1 through Q4, whatever quarters the input holds
pub fn pivot_quarterly(
    records: &BTreeMap<Quarter, InspectionCountRecord>,
    metric: Metric,
) -> Vec<SeriesPoint> {
    Quarter::ALL
        .into_iter()
        .map(|quarter| {
            let value = records.get(&quarter).and_then(|r| r.get(metric));
            SeriesPoint::from_count(quarter.label(), value)
        })
        .collect()
}

/// Daily series in date order, labelled `Mar 1` style
pub fn pivot_daily<'r, I, K>(records: I, metric: Metric) -> Result<Vec<SeriesPoint>>
where
    I: IntoIterator<Item = (K, &'r InspectionCountRecord)>,
    K: AsRef<str>,
{
    pivot_daily_with_format(records, metric, DEFAULT_DAILY_LABEL)
}

/// Daily series with a custom chrono label pattern.
///
/// Keys are sorted explicitly, so the output does not depend on the
/// iteration order of the input. Any invalid or repeated date fails the whole
/// series.
pub fn pivot_daily_with_format<'r, I, K>(
    records: I,
    metric: Metric,
    pattern: &str,
) -> Result<Vec<SeriesPoint>>
where
    I: IntoIterator<Item = (K, &'r InspectionCountRecord)>,
    K: AsRef<str>,
{
    let mut entries: Vec<(String, &InspectionCountRecord)> = records
        .into_iter()
        .map(|(key, record)| (key.as_ref().to_string(), record))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    if let Some(pair) = entries.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(EngineError::invalid_data("daily date", format!("{} (repeated)", pair[0].0)));
    }

    let points = entries
        .iter()
        .map(|(key, record)| {
            let date = parse_iso_date(key)?;
            let label = date_label(date, pattern)?;
            Ok(SeriesPoint::from_count(label, record.get(metric)))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(points = points.len(), ?metric, "pivoted daily series");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_quarterly_empty_input_gives_four_zeros() {
        let points = pivot_quarterly(&BTreeMap::new(), Metric::Total);
        assert_eq!(
            points,
            vec![
                SeriesPoint::absent("Q1"),
                SeriesPoint::absent("Q2"),
                SeriesPoint::absent("Q3"),
                SeriesPoint::absent("Q4"),
            ]
        );
        assert!(points.iter().all(|p| p.value == 0));
    }

    #[test]
    fn test_quarterly_fills_gaps_in_fixed_order() {
        let mut records = BTreeMap::new();
        records.insert(Quarter::Q4, InspectionCountRecord::new(9, 6, 2, 1));
        records.insert(Quarter::Q2, InspectionCountRecord::default().with(Metric::Total, 4));

        let compliant = pivot_quarterly(&records, Metric::Compliant);
        let labels: Vec<_> = compliant.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Q1", "Q2", "Q3", "Q4"]);
        assert_eq!(compliant[3], SeriesPoint::measured("Q4", 6));
        // Q2 exists but has no compliant count
        assert!(compliant[1].defaulted);

        let totals = pivot_quarterly(&records, Metric::Total);
        assert_eq!(totals[1], SeriesPoint::measured("Q2", 4));
    }

    #[test]
    fn test_daily_sorted_and_labelled() {
        let mut records = HashMap::new();
        records.insert("2024-03-02", InspectionCountRecord::default().with(Metric::Total, 5));
        records.insert("2024-03-01", InspectionCountRecord::default().with(Metric::Total, 3));

        let points = pivot_daily(records.iter().map(|(k, v)| (*k, v)), Metric::Total).unwrap();
        assert_eq!(
            points,
            vec![
                SeriesPoint::measured("Mar 1", 3),
                SeriesPoint::measured("Mar 2", 5),
            ]
        );
    }

    #[test]
    fn test_daily_absent_metric_defaults_to_zero() {
        let mut records = BTreeMap::new();
        records.insert("2024-01-15".to_string(), InspectionCountRecord::default());
        let points = pivot_daily(&records, Metric::Pending).unwrap();
        assert_eq!(points, vec![SeriesPoint::absent("Jan 15")]);
    }

    #[test]
    fn test_daily_crosses_year_boundary() {
        let mut records = BTreeMap::new();
        records.insert("2024-01-02".to_string(), InspectionCountRecord::new(1, 1, 0, 0));
        records.insert("2023-12-31".to_string(), InspectionCountRecord::new(2, 1, 1, 0));
        let points = pivot_daily(&records, Metric::Total).unwrap();
        let labels: Vec<_> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Dec 31", "Jan 2"]);
    }

    #[test]
    fn test_daily_rejects_invalid_key_atomically() {
        let good = InspectionCountRecord::new(1, 1, 0, 0);
        let input = vec![("2024-03-01", &good), ("not-a-date", &good)];
        assert!(matches!(
            pivot_daily(input, Metric::Total),
            Err(EngineError::InvalidData { .. })
        ));
    }

    #[test]
    fn test_daily_rejects_space_padded_key() {
        let february = InspectionCountRecord::new(1, 1, 0, 0);
        let march = InspectionCountRecord::new(2, 1, 1, 0);
        let input = vec![("2024-02-15", &february), ("2024- 3-01", &march)];
        assert!(matches!(
            pivot_daily(input, Metric::Total),
            Err(EngineError::InvalidData { .. })
        ));
    }

    #[test]
    fn test_daily_rejects_repeated_dates() {
        let record = InspectionCountRecord::new(1, 1, 0, 0);
        let input = vec![("2024-03-01", &record), ("2024-03-01", &record)];
        let err = pivot_daily(input, Metric::Total).unwrap_err();
        assert!(err.to_string().contains("repeated"));
    }

    #[test]
    fn test_daily_custom_pattern() {
        let record = InspectionCountRecord::new(4, 2, 2, 0);
        let points =
            pivot_daily_with_format(vec![("2024-07-04", &record)], Metric::NonCompliant, "%d/%m")
                .unwrap();
        assert_eq!(points, vec![SeriesPoint::measured("04/07", 2)]);
    }
}
