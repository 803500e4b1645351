//! Time calculation utilities for fade animations

use std::time::{Duration, Instant};

/// Calculate animation progress (0.0 to 1.0) at `now`
///
/// # Arguments
/// * `start` - Animation start time
/// * `now` - Time to evaluate at
/// * `duration` - Total animation duration
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if an animation started at `start` has finished by `now`
#[inline]
pub fn is_complete(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation of one 8-bit color channel
#[inline]
pub fn lerp_u8(from: u8, to: u8, t: f64) -> u8 {
    lerp(from as f64, to as f64, t.clamp(0.0, 1.0)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(1.0, 0.0, 0.25) - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_lerp_u8() {
        assert_eq!(lerp_u8(0, 200, 0.0), 0);
        assert_eq!(lerp_u8(0, 200, 0.5), 100);
        assert_eq!(lerp_u8(200, 0, 1.0), 0);
        assert_eq!(lerp_u8(0, 255, 2.0), 255);
    }

    #[test]
    fn test_progress() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        assert!((progress(start, start, duration) - 0.0).abs() < 0.001);
        assert!((progress(start, start + Duration::from_millis(50), duration) - 0.25).abs() < 0.001);
        assert!((progress(start, start + Duration::from_secs(1), duration) - 1.0).abs() < 0.001);
        assert!(is_complete(start, start + duration, duration));
        assert!(!is_complete(start, start + Duration::from_millis(199), duration));
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress(start, start, Duration::ZERO) - 1.0).abs() < 0.001);
    }
}
