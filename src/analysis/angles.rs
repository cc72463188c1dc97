//! Joint angle calculation using dot product
//!
//! Computes the interior angle at a joint from three keypoints, e.g. the
//! knee angle from hip -> knee -> ankle.

/// Calculate the angle at `vertex` in degrees
///
/// Uses dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
///
/// Returns angle in degrees, 0-180:
/// - 90° = joint fully bent
/// - 180° = limb fully straight
///
/// Either limb collapsing to zero length (joint occluded, points on top of
/// each other) returns 0.0 so a bad frame never aborts detection.
pub fn joint_angle(a: (f32, f32), vertex: (f32, f32), b: (f32, f32)) -> f32 {
    // Limb vectors out of the joint
    let v1 = (a.0 - vertex.0, a.1 - vertex.1);
    let v2 = (b.0 - vertex.0, b.1 - vertex.1);

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    if mag1 < 0.0001 || mag2 < 0.0001 {
        return 0.0;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;

    // Clamp before acos: floating point can overshoot ±1 for collinear points
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);

    cos_angle.acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_limb() {
        // Hip, knee, ankle in a vertical line
        let hip = (0.5, 0.2);
        let knee = (0.5, 0.5);
        let ankle = (0.5, 0.8);
        let angle = joint_angle(hip, knee, ankle);
        assert!((angle - 180.0).abs() < 1.0);
    }

    #[test]
    fn test_right_angle() {
        let hip = (0.0, 0.0);
        let knee = (0.5, 0.0);
        let ankle = (0.5, 0.5);
        let angle = joint_angle(hip, knee, ankle);
        assert!((angle - 90.0).abs() < 1.0);
    }

    #[test]
    fn test_folded_limb() {
        // Both ends on the same side of the joint
        let a = (1.0, 0.0);
        let vertex = (0.0, 0.0);
        let b = (2.0, 0.0);
        let angle = joint_angle(a, vertex, b);
        assert!(angle.abs() < 1.0);
    }

    #[test]
    fn test_degenerate_returns_zero() {
        // End point sitting on the vertex
        let angle = joint_angle((0.3, 0.3), (0.3, 0.3), (0.7, 0.7));
        assert_eq!(angle, 0.0);

        let angle = joint_angle((0.1, 0.9), (0.7, 0.7), (0.7, 0.7));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_range_is_bounded() {
        let samples = [
            ((0.0, 0.0), (0.1, 0.9), (0.9, 0.1)),
            ((1.0, 1.0), (0.0, 0.0), (-1.0, -1.0)),
            ((0.2, 0.8), (0.5, 0.5), (0.8, 0.2)),
        ];
        for (a, v, b) in samples {
            let angle = joint_angle(a, v, b);
            assert!((0.0..=180.0).contains(&angle), "angle {} out of range", angle);
        }
    }
}
