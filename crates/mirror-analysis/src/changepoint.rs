//! Sliding-window changepoint detection.
//!
//! A point `i` is a changepoint when the mean of the `WINDOW` samples after
//! it differs from the mean of the `WINDOW` samples before it by more than
//! `penalty` standard deviations of the whole series. Detections closer
//! than `WINDOW` to the previous one are suppressed.

use mirror_core::vector;

/// Window on each side of a candidate changepoint.
pub const WINDOW: usize = 10;

/// Indices of detected changepoints, ascending.
///
/// Series shorter than `2 * WINDOW` have no changepoints.
pub fn detect_changepoints(signal: &[f64], penalty: f64) -> Vec<usize> {
    let n = signal.len();
    if n < 2 * WINDOW {
        return Vec::new();
    }
    let threshold = penalty * vector::std_dev(signal);

    let mut changepoints: Vec<usize> = Vec::new();
    for i in WINDOW..(n - WINDOW) {
        let before = vector::mean(&signal[i - WINDOW..i]);
        let after = vector::mean(&signal[i..i + WINDOW]);
        if (after - before).abs() > threshold {
            let spaced = changepoints.last().map_or(true, |&last| i - last > WINDOW);
            if spaced {
                changepoints.push(i);
            }
        }
    }
    changepoints
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_signal(at: usize, len: usize) -> Vec<f64> {
        (0..len).map(|i| if i < at { 0.0 } else { 1.0 }).collect()
    }

    #[test]
    fn short_series_have_no_changepoints() {
        assert!(detect_changepoints(&step_signal(10, 19), 0.1).is_empty());
    }

    #[test]
    fn constant_series_have_no_changepoints() {
        assert!(detect_changepoints(&[0.5; 50], 0.0).is_empty());
    }

    #[test]
    fn step_is_detected_once() {
        let signal = step_signal(25, 50);
        let cps = detect_changepoints(&signal, 1.5);
        assert_eq!(cps.len(), 1);
        assert!((15..=25).contains(&cps[0]), "{:?}", cps);
    }

    #[test]
    fn detections_are_spaced_by_more_than_window() {
        let signal: Vec<f64> = (0..120).map(|i| ((i / 30) % 2) as f64).collect();
        let cps = detect_changepoints(&signal, 0.5);
        assert!(cps.len() >= 2);
        for pair in cps.windows(2) {
            assert!(pair[1] - pair[0] > WINDOW);
        }
    }
}
