//! Joint angles and relative offsets over landmark coordinates
//!
//! Angle at joint `b` uses vectors b→a and b→c:
//! cos(θ) = (v1 · v2) / (|v1| × |v2|)

use crate::DEGENERATE_VECTOR_EPSILON;

/// Angle at `b` in degrees, in [0, 180].
///
/// Returns None when either vector has (near) zero length.
pub fn joint_angle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Option<f64> {
    let v1 = (a.0 - b.0, a.1 - b.1);
    let v2 = (c.0 - b.0, c.1 - b.1);

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let mag1 = v1.0.hypot(v1.1);
    let mag2 = v2.0.hypot(v2.1);

    if mag1 < DEGENERATE_VECTOR_EPSILON || mag2 < DEGENERATE_VECTOR_EPSILON {
        return None;
    }

    // Rounding can push the ratio just outside [-1, 1]
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    let angle = cos_angle.acos().to_degrees();

    angle.is_finite().then_some(angle)
}

/// Midpoint of two values (shoulder line, shoulder center)
pub fn midpoint(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// True when `y` is above `reference` in frame coordinates (smaller y is higher)
pub fn is_above(y: f64, reference: f64) -> bool {
    y < reference
}

/// Absolute horizontal offset between two x positions
pub fn horizontal_offset(x: f64, reference_x: f64) -> f64 {
    (x - reference_x).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_angle() {
        let angle = joint_angle((0.0, 1.0), (0.0, 0.0), (1.0, 0.0)).unwrap();
        assert!((angle - 90.0).abs() < 0.5, "got {}", angle);
    }

    #[test]
    fn test_straight_line() {
        let angle = joint_angle((0.0, 0.0), (0.5, 0.0), (1.0, 0.0)).unwrap();
        assert!((angle - 180.0).abs() < 0.5);
    }

    #[test]
    fn test_folded() {
        let angle = joint_angle((1.0, 0.0), (0.0, 0.0), (2.0, 0.0)).unwrap();
        assert!(angle.abs() < 0.5);
    }

    #[test]
    fn test_degenerate_inputs_are_guarded() {
        assert_eq!(joint_angle((0.3, 0.3), (0.3, 0.3), (1.0, 0.0)), None);
        assert_eq!(joint_angle((0.0, 1.0), (0.3, 0.3), (0.3, 0.3)), None);
        assert_eq!(joint_angle((0.5, 0.5), (0.5, 0.5), (0.5, 0.5)), None);
    }

    #[test]
    fn test_offsets() {
        assert!((midpoint(0.2, 0.4) - 0.3).abs() < 1e-12);
        assert!(is_above(0.1, 0.2));
        assert!(!is_above(0.2, 0.2));
        assert!((horizontal_offset(0.4, 0.5) - 0.1).abs() < 1e-12);
    }
}
