//! Result shaping for the report charts

use serde::Serialize;

use crate::entity::Entity;
use crate::models::EventCount;

/// Running totals up to and including `event_date`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CumulativeCount {
    pub event_date: String,
    pub positive: i64,
    pub negative: i64,
}

/// Fill NULL sums with zero, sort by date, then take running totals
pub fn cumulative_counts(counts: &[EventCount]) -> Vec<CumulativeCount> {
    let mut sorted: Vec<&EventCount> = counts.iter().collect();
    sorted.sort_by(|a, b| a.event_date.cmp(&b.event_date));

    let mut positive = 0;
    let mut negative = 0;
    sorted
        .into_iter()
        .map(|count| {
            positive += count.positive_events.unwrap_or(0);
            negative += count.negative_events.unwrap_or(0);
            CumulativeCount {
                event_date: count.event_date.clone(),
                positive,
                negative,
            }
        })
        .collect()
}

/// Collapse per-row positive-class probabilities into one risk score
///
/// Teams average across members; an employee has exactly one row.
/// Returns `None` when there is nothing to score.
pub fn recruitment_risk(entity: Entity, probabilities: &[f64]) -> Option<f64> {
    match entity {
        Entity::Team => {
            if probabilities.is_empty() {
                None
            } else {
                Some(probabilities.iter().sum::<f64>() / probabilities.len() as f64)
            }
        }
        Entity::Employee => probabilities.first().copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(date: &str, positive: Option<i64>, negative: Option<i64>) -> EventCount {
        EventCount {
            event_date: date.to_string(),
            positive_events: positive,
            negative_events: negative,
        }
    }

    #[test]
    fn test_cumulative_counts() {
        let counts = vec![
            count("2024-01-01", Some(3), Some(1)),
            count("2024-01-02", Some(2), Some(0)),
        ];
        let cumulative = cumulative_counts(&counts);

        let totals: Vec<(i64, i64)> = cumulative.iter().map(|c| (c.positive, c.negative)).collect();
        assert_eq!(totals, vec![(3, 1), (5, 1)]);
    }

    #[test]
    fn test_cumulative_counts_fill_and_sort() {
        let counts = vec![
            count("2024-03-05", None, Some(2)),
            count("2024-03-01", Some(1), None),
        ];
        let cumulative = cumulative_counts(&counts);

        assert_eq!(cumulative[0].event_date, "2024-03-01");
        assert_eq!((cumulative[0].positive, cumulative[0].negative), (1, 0));
        assert_eq!((cumulative[1].positive, cumulative[1].negative), (1, 2));
    }

    #[test]
    fn test_cumulative_counts_monotonic() {
        let counts: Vec<EventCount> = (1..=28)
            .map(|day| count(&format!("2024-02-{day:02}"), Some(day % 4), Some(day % 3)))
            .collect();
        let cumulative = cumulative_counts(&counts);

        for pair in cumulative.windows(2) {
            assert!(pair[1].positive >= pair[0].positive);
            assert!(pair[1].negative >= pair[0].negative);
        }
    }

    #[test]
    fn test_cumulative_counts_empty() {
        assert!(cumulative_counts(&[]).is_empty());
    }

    #[test]
    fn test_team_risk_is_mean() {
        let risk = recruitment_risk(Entity::Team, &[0.2, 0.4, 0.9]).unwrap();
        assert!((risk - 0.5).abs() < 1e-12);
        assert_eq!(recruitment_risk(Entity::Team, &[]), None);
    }

    #[test]
    fn test_employee_risk_is_single_row() {
        assert_eq!(recruitment_risk(Entity::Employee, &[0.7]), Some(0.7));
        assert_eq!(recruitment_risk(Entity::Employee, &[]), None);
    }
}
