use serde::{Deserialize, Serialize};

/// Curve family used by a fuzzy set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipShape {
    Triangular,
    Trapezoidal,
    Gaussian,
}

impl MembershipShape {
    /// Number of parameters the shape is defined by.
    pub const fn arity(self) -> usize {
        match self {
            MembershipShape::Triangular => 3,
            MembershipShape::Trapezoidal => 4,
            MembershipShape::Gaussian => 2,
        }
    }

    /// Whether the breakpoints must be non-decreasing.
    pub const fn requires_ordered_parameters(self) -> bool {
        matches!(
            self,
            MembershipShape::Triangular | MembershipShape::Trapezoidal
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            MembershipShape::Triangular => "triangular",
            MembershipShape::Trapezoidal => "trapezoidal",
            MembershipShape::Gaussian => "gaussian",
        }
    }
}

/// Degree of membership of `x` in the curve described by `shape` and `parameters`.
///
/// A parameter list that does not match the shape yields `0.0` so a misconfigured set only
/// silences the rules that reference it. Registry validation rejects such sets up front.
pub fn evaluate(x: f64, shape: MembershipShape, parameters: &[f64]) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }

    let degree = match (shape, parameters) {
        (MembershipShape::Triangular, &[a, b, c]) => triangular(x, a, b, c),
        (MembershipShape::Trapezoidal, &[a, b, c, d]) => trapezoidal(x, a, b, c, d),
        (MembershipShape::Gaussian, &[mean, sigma]) => gaussian(x, mean, sigma),
        _ => 0.0,
    };

    if degree.is_nan() {
        0.0
    } else {
        degree.clamp(0.0, 1.0)
    }
}

pub fn triangular(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if a == b && b == c {
        return point(x, a);
    }
    if a == b || b == c {
        return trapezoidal(x, a, b, b, c);
    }

    if x <= a || x >= c {
        0.0
    } else if x <= b {
        (x - a) / (b - a)
    } else {
        (c - x) / (c - b)
    }
}

/// Trapezoid with an inclusive plateau over `[b, c]`.
///
/// `b == c` collapses the plateau to a single peak, which is the triangle `(a, b, d)`. Edges
/// are only divided when they have non-zero width: reaching the rising branch implies
/// `a <= x < b`, reaching the falling branch implies `c < x <= d`.
pub fn trapezoidal(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if a == b && b == c && c == d {
        return point(x, a);
    }

    if x < a || x > d {
        0.0
    } else if x >= b && x <= c {
        1.0
    } else if x < b {
        (x - a) / (b - a)
    } else {
        (d - x) / (d - c)
    }
}

pub fn gaussian(x: f64, mean: f64, sigma: f64) -> f64 {
    if sigma.is_nan() || sigma <= 0.0 {
        return point(x, mean);
    }
    let offset = x - mean;
    (-(offset * offset) / (2.0 * sigma * sigma)).exp()
}

fn point(x: f64, at: f64) -> f64 {
    if x == at {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn triangular_rises_and_falls_around_peak() {
        let params = [0.0, 5.0, 10.0];
        assert_eq!(evaluate(-1.0, MembershipShape::Triangular, &params), 0.0);
        assert_eq!(evaluate(0.0, MembershipShape::Triangular, &params), 0.0);
        assert!((evaluate(2.5, MembershipShape::Triangular, &params) - 0.5).abs() < EPS);
        assert_eq!(evaluate(5.0, MembershipShape::Triangular, &params), 1.0);
        assert!((evaluate(7.5, MembershipShape::Triangular, &params) - 0.5).abs() < EPS);
        assert_eq!(evaluate(10.0, MembershipShape::Triangular, &params), 0.0);
    }

    #[test]
    fn triangular_with_shared_left_point_acts_as_left_shoulder() {
        let params = [0.0, 0.0, 4.0];
        assert_eq!(evaluate(0.0, MembershipShape::Triangular, &params), 1.0);
        assert!((evaluate(1.0, MembershipShape::Triangular, &params) - 0.75).abs() < EPS);
        assert_eq!(evaluate(-0.1, MembershipShape::Triangular, &params), 0.0);
    }

    #[test]
    fn triangular_with_shared_right_point_acts_as_right_shoulder() {
        let params = [6.0, 10.0, 10.0];
        assert_eq!(evaluate(10.0, MembershipShape::Triangular, &params), 1.0);
        assert!((evaluate(8.0, MembershipShape::Triangular, &params) - 0.5).abs() < EPS);
        assert_eq!(evaluate(10.5, MembershipShape::Triangular, &params), 0.0);
    }

    #[test]
    fn collapsed_triangle_is_a_point_indicator() {
        let params = [3.0, 3.0, 3.0];
        assert_eq!(evaluate(3.0, MembershipShape::Triangular, &params), 1.0);
        assert_eq!(evaluate(3.000_001, MembershipShape::Triangular, &params), 0.0);
        assert_eq!(evaluate(2.999_999, MembershipShape::Triangular, &params), 0.0);
    }

    #[test]
    fn trapezoid_plateau_is_inclusive() {
        let params = [1.0, 3.0, 5.0, 7.0];
        assert_eq!(evaluate(1.0, MembershipShape::Trapezoidal, &params), 0.0);
        assert!((evaluate(2.0, MembershipShape::Trapezoidal, &params) - 0.5).abs() < EPS);
        assert_eq!(evaluate(3.0, MembershipShape::Trapezoidal, &params), 1.0);
        assert_eq!(evaluate(5.0, MembershipShape::Trapezoidal, &params), 1.0);
        assert!((evaluate(6.0, MembershipShape::Trapezoidal, &params) - 0.5).abs() < EPS);
        assert_eq!(evaluate(7.0, MembershipShape::Trapezoidal, &params), 0.0);
    }

    #[test]
    fn trapezoid_without_plateau_matches_triangle() {
        let trapezoid = [2.0, 4.0, 4.0, 8.0];
        let triangle = [2.0, 4.0, 8.0];
        for step in 0..=100 {
            let x = step as f64 * 0.1;
            let lhs = evaluate(x, MembershipShape::Trapezoidal, &trapezoid);
            let rhs = evaluate(x, MembershipShape::Triangular, &triangle);
            assert!((lhs - rhs).abs() < EPS, "x={x}: {lhs} != {rhs}");
        }
    }

    #[test]
    fn shoulder_trapezoids_reach_full_membership_at_domain_edges() {
        assert_eq!(
            evaluate(0.0, MembershipShape::Trapezoidal, &[0.0, 0.0, 2.0, 4.0]),
            1.0
        );
        assert_eq!(
            evaluate(1.0, MembershipShape::Trapezoidal, &[0.6, 0.8, 1.0, 1.0]),
            1.0
        );
    }

    #[test]
    fn collapsed_trapezoid_is_a_point_indicator() {
        let params = [2.0; 4];
        assert_eq!(evaluate(2.0, MembershipShape::Trapezoidal, &params), 1.0);
        assert_eq!(evaluate(2.5, MembershipShape::Trapezoidal, &params), 0.0);
    }

    #[test]
    fn gaussian_peaks_at_mean() {
        let params = [50.0, 10.0];
        assert_eq!(evaluate(50.0, MembershipShape::Gaussian, &params), 1.0);
        let one_sigma = evaluate(60.0, MembershipShape::Gaussian, &params);
        assert!((one_sigma - (-0.5f64).exp()).abs() < EPS);
        assert_eq!(one_sigma, evaluate(40.0, MembershipShape::Gaussian, &params));
    }

    #[test]
    fn gaussian_without_spread_is_a_point_indicator() {
        assert_eq!(evaluate(5.0, MembershipShape::Gaussian, &[5.0, 0.0]), 1.0);
        assert_eq!(evaluate(5.1, MembershipShape::Gaussian, &[5.0, 0.0]), 0.0);
        assert_eq!(evaluate(5.1, MembershipShape::Gaussian, &[5.0, -1.0]), 0.0);
    }

    #[test]
    fn wrong_parameter_count_degrades_to_zero() {
        assert_eq!(evaluate(1.0, MembershipShape::Triangular, &[0.0, 1.0]), 0.0);
        assert_eq!(evaluate(1.0, MembershipShape::Trapezoidal, &[0.0, 1.0, 2.0]), 0.0);
        assert_eq!(evaluate(1.0, MembershipShape::Gaussian, &[]), 0.0);
    }

    #[test]
    fn non_finite_input_has_no_membership() {
        let params = [0.0, 0.0, 10.0, 10.0];
        assert_eq!(evaluate(f64::NAN, MembershipShape::Trapezoidal, &params), 0.0);
        assert_eq!(
            evaluate(f64::INFINITY, MembershipShape::Trapezoidal, &params),
            0.0
        );
    }
}
