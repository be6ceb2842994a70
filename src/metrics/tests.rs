use std::sync::Arc;

use super::*;

#[test]
fn test_track_increments_band_count_per_call() {
    let metrics = EvaluationMetrics::new();

    metrics.track_evaluation("6", "taskResponse", 6.0);
    metrics.track_evaluation("6", "coherenceCohesion", 5.0);
    metrics.track_evaluation("7", "taskResponse", 7.5);

    let distribution = metrics.band_distribution();
    assert_eq!(distribution.get("6"), Some(&2));
    assert_eq!(distribution.get("7"), Some(&1));
}

#[test]
fn test_average_scores_by_band() {
    let metrics = EvaluationMetrics::new();

    metrics.track_evaluation("6", "taskResponse", 5.0);
    metrics.track_evaluation("6", "taskResponse", 7.0);
    metrics.track_evaluation("6", "lexicalResource", 6.0);

    let averages = metrics.average_scores_by_band();
    assert_eq!(averages.get("6-taskResponse"), Some(&6.0));
    assert_eq!(averages.get("6-lexicalResource"), Some(&6.0));
    assert_eq!(averages.len(), 2);
}

#[test]
fn test_reset_leaves_both_maps_empty() {
    let metrics = EvaluationMetrics::new();
    metrics.track_evaluation("5.5", "taskResponse", 5.0);

    metrics.reset();

    assert!(metrics.average_scores_by_band().is_empty());
    assert!(metrics.band_distribution().is_empty());
}

#[test]
fn test_concurrent_tracking_stays_consistent() {
    let metrics = Arc::new(EvaluationMetrics::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let metrics = Arc::clone(&metrics);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    metrics.track_evaluation("6", "taskResponse", 6.0);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(metrics.band_distribution().get("6"), Some(&800));
    let averages = metrics.average_scores_by_band();
    assert_eq!(averages.get("6-taskResponse"), Some(&6.0));
}
