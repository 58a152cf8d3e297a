/// Angle in degrees at vertex `b` formed by the rays towards `a` and `c`.
///
/// The result lies in `[0, 180]`. It is NaN when `a` or `c` coincides with `b`.
pub fn joint_angle(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    let ba = [a[0] - b[0], a[1] - b[1]];
    let bc = [c[0] - b[0], c[1] - b[1]];

    let dot = ba[0] * bc[0] + ba[1] * bc[1];
    let norm = ba[0].hypot(ba[1]) * bc[0].hypot(bc[1]);
    if norm == 0.0 {
        return f64::NAN;
    }

    (dot / norm).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Component-wise midpoint of two points.
pub fn midpoint(lhs: [f64; 2], rhs: [f64; 2]) -> [f64; 2] {
    [(lhs[0] + rhs[0]) / 2.0, (lhs[1] + rhs[1]) / 2.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn right_straight_and_folded_angles() {
        assert_abs_diff_eq!(joint_angle([1.0, 0.0], [0.0, 0.0], [0.0, 1.0]), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(joint_angle([-1.0, 0.0], [0.0, 0.0], [2.0, 0.0]), 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(joint_angle([1.0, 0.0], [0.0, 0.0], [3.0, 0.0]), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(joint_angle([1.0, 1.0], [0.0, 0.0], [1.0, 0.0]), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn coincident_points_have_no_angle() {
        assert!(joint_angle([0.0, 0.0], [0.0, 0.0], [1.0, 0.0]).is_nan());
    }

    #[test]
    fn midpoint_of_points() {
        assert_eq!(midpoint([0.0, 2.0], [4.0, 6.0]), [2.0, 4.0]);
    }
}
