//! Itinerary ordering.
//!
//! Every comparison ends with the node sequence so that equal-cost
//! itineraries still sort the same way on every run.

use std::cmp::Ordering;

use super::mode::Metric;
use super::path::Itinerary;

/// Order by total fare, then total time, then path.
///
/// Used to rank fewest-stop paths, which all have the same hop count.
pub fn cheapest_first(a: &Itinerary, b: &Itinerary) -> Ordering {
    a.total_fare
        .total_cmp(&b.total_fare)
        .then_with(|| a.total_time.total_cmp(&b.total_time))
        .then_with(|| a.path.cmp(&b.path))
}

/// Order by `metric`, then the other metric, then path.
pub fn by_metric(metric: Metric) -> impl Fn(&Itinerary, &Itinerary) -> Ordering {
    move |a, b| {
        metric
            .primary(a)
            .total_cmp(&metric.primary(b))
            .then_with(|| metric.secondary(a).total_cmp(&metric.secondary(b)))
            .then_with(|| a.path.cmp(&b.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TeraId;

    fn it(path: &[&str], fare: f64, time: f64) -> Itinerary {
        Itinerary::new(
            path.iter().map(|s| TeraId::parse(s).unwrap()).collect(),
            fare,
            time,
        )
    }

    #[test]
    fn cheapest_first_by_fare() {
        let mut all = vec![it(&["a", "x"], 20.0, 1.0), it(&["a", "y"], 10.0, 9.0)];
        all.sort_by(cheapest_first);
        assert_eq!(all[0].total_fare, 10.0);
    }

    #[test]
    fn cheapest_first_breaks_fare_ties_by_time() {
        let mut all = vec![it(&["a", "x"], 10.0, 9.0), it(&["a", "y"], 10.0, 3.0)];
        all.sort_by(cheapest_first);
        assert_eq!(all[0].total_time, 3.0);
    }

    #[test]
    fn cheapest_first_breaks_full_ties_by_path() {
        let mut all = vec![it(&["a", "c", "d"], 5.0, 5.0), it(&["a", "b", "d"], 5.0, 5.0)];
        all.sort_by(cheapest_first);
        assert_eq!(all[0].path[1].as_str(), "b");
    }

    #[test]
    fn by_time_uses_fare_as_tiebreak() {
        let mut all = vec![
            it(&["a", "x"], 30.0, 10.0),
            it(&["a", "y"], 15.0, 10.0),
            it(&["a", "z"], 1.0, 12.0),
        ];
        all.sort_by(by_metric(Metric::Time));
        let order: Vec<&str> = all.iter().map(|i| i.path[1].as_str()).collect();
        assert_eq!(order, vec!["y", "x", "z"]);
    }

    #[test]
    fn by_fare_matches_cheapest_first() {
        let a = it(&["a", "b"], 10.0, 4.0);
        let b = it(&["a", "c"], 10.0, 2.0);
        assert_eq!(by_metric(Metric::Fare)(&a, &b), cheapest_first(&a, &b));
    }
}
