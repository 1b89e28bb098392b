//! Gauss-Jacobi quadrature rules.

use crate::quadrature::types::NumericalQuadratureDefinition;
use crate::types::ReferenceCellType;
use itertools::iproduct;
use std::f64::consts::PI;

/// Evaluate the Jacobi polynomial P^(a, 0)_n and its first derivative at a point
fn jacobi(a: f64, n: usize, x: f64) -> (f64, f64) {
    let mut p = [1.0, 0.0];
    let mut dp = [0.0, 0.0];
    if n == 0 {
        return (p[0], dp[0]);
    }
    p[1] = (x * (a + 2.0) + a) * 0.5;
    dp[1] = a * 0.5 + 1.0;
    for k in 2..=n {
        let k = k as f64;
        let a1 = 2.0 * k * (k + a) * (2.0 * k + a - 2.0);
        let a2 = (2.0 * k + a - 1.0) * (a * a) / a1;
        let a3 = (2.0 * k + a - 1.0) * (2.0 * k + a) / (2.0 * k * (k + a));
        let a4 = 2.0 * (k + a - 1.0) * (k - 1.0) * (2.0 * k + a) / a1;
        let value = p[1] * (x * a3 + a2) - p[0] * a4;
        let deriv = dp[1] * (x * a3 + a2) - dp[0] * a4 + a3 * p[1];
        p = [p[1], value];
        dp = [dp[1], deriv];
    }
    (p[1], dp[1])
}

/// The roots of P^(a, 0)_m on [-1, 1], in increasing order
///
/// Computed by Newton iteration, deflating the roots that have already been found.
fn jacobi_roots(a: f64, m: usize) -> Vec<f64> {
    const EPS: f64 = 1e-8;
    const MAX_ITERATIONS: usize = 100;

    let mut x = vec![0.0; m];
    for k in 0..m {
        x[k] = -((2.0 * k as f64 + 1.0) * PI / (2.0 * m as f64)).cos();
        if k > 0 {
            x[k] = 0.5 * (x[k] + x[k - 1]);
        }
        for _ in 0..MAX_ITERATIONS {
            let s = x[..k].iter().map(|xi| 1.0 / (x[k] - xi)).sum::<f64>();
            let (f, fp) = jacobi(a, m, x[k]);
            let delta = f / (fp - f * s);
            x[k] -= delta;
            if delta.abs() < EPS {
                break;
            }
        }
    }
    x
}

/// Gauss-Jacobi points and weights on [-1, 1] for the weight (1 - x)^a
pub fn gauss_jacobi_rule(a: f64, m: usize) -> (Vec<f64>, Vec<f64>) {
    let pts = jacobi_roots(a, m);
    let scale = 2f64.powf(a + 1.0);
    let wts = pts
        .iter()
        .map(|x| {
            let (_, fp) = jacobi(a, m, *x);
            scale / (1.0 - x * x) / (fp * fp)
        })
        .collect();
    (pts, wts)
}

/// A Gauss-Jacobi rule with m points in each direction
pub fn make_gauss_jacobi_quadrature(
    cell_type: ReferenceCellType,
    m: usize,
) -> NumericalQuadratureDefinition {
    let (dim, points, weights) = match cell_type {
        ReferenceCellType::Point => (0, vec![], vec![1.0]),
        ReferenceCellType::Interval => {
            let (pts, wts) = gauss_jacobi_rule(0.0, m);
            (
                1,
                pts.iter().map(|x| 0.5 * (1.0 + x)).collect(),
                wts.iter().map(|w| 0.5 * w).collect(),
            )
        }
        ReferenceCellType::Quadrilateral => {
            let (pts, wts) = gauss_jacobi_rule(0.0, m);
            let mut points = Vec::with_capacity(2 * m * m);
            let mut weights = Vec::with_capacity(m * m);
            for (i, j) in iproduct!(0..m, 0..m) {
                points.push(0.5 * (1.0 + pts[i]));
                points.push(0.5 * (1.0 + pts[j]));
                weights.push(0.25 * wts[i] * wts[j]);
            }
            (2, points, weights)
        }
        ReferenceCellType::Hexahedron => {
            let (pts, wts) = gauss_jacobi_rule(0.0, m);
            let mut points = Vec::with_capacity(3 * m * m * m);
            let mut weights = Vec::with_capacity(m * m * m);
            for (i, j, k) in iproduct!(0..m, 0..m, 0..m) {
                points.push(0.5 * (1.0 + pts[i]));
                points.push(0.5 * (1.0 + pts[j]));
                points.push(0.5 * (1.0 + pts[k]));
                weights.push(0.125 * wts[i] * wts[j] * wts[k]);
            }
            (3, points, weights)
        }
        ReferenceCellType::Triangle => {
            let (ptx, wx) = gauss_jacobi_rule(0.0, m);
            let (pty, wy) = gauss_jacobi_rule(1.0, m);
            let mut points = Vec::with_capacity(2 * m * m);
            let mut weights = Vec::with_capacity(m * m);
            for (i, j) in iproduct!(0..m, 0..m) {
                points.push(0.25 * (1.0 + ptx[i]) * (1.0 - pty[j]));
                points.push(0.5 * (1.0 + pty[j]));
                weights.push(wx[i] * wy[j] * 0.125);
            }
            (2, points, weights)
        }
        ReferenceCellType::Tetrahedron => {
            let (ptx, wx) = gauss_jacobi_rule(0.0, m);
            let (pty, wy) = gauss_jacobi_rule(1.0, m);
            let (ptz, wz) = gauss_jacobi_rule(2.0, m);
            let mut points = Vec::with_capacity(3 * m * m * m);
            let mut weights = Vec::with_capacity(m * m * m);
            for (i, j, k) in iproduct!(0..m, 0..m, 0..m) {
                points.push(0.125 * (1.0 + ptx[i]) * (1.0 - pty[j]) * (1.0 - ptz[k]));
                points.push(0.25 * (1.0 + pty[j]) * (1.0 - ptz[k]));
                points.push(0.5 * (1.0 + ptz[k]));
                weights.push(wx[i] * wy[j] * wz[k] * 0.125 * 0.125);
            }
            (3, points, weights)
        }
    };
    NumericalQuadratureDefinition {
        dim,
        order: 2 * m - 1,
        npoints: weights.len(),
        weights,
        points,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::*;

    #[test]
    fn test_legendre_roots() {
        let (pts, wts) = gauss_jacobi_rule(0.0, 3);
        let r = (0.6f64).sqrt();
        assert_relative_eq!(pts[0], -r, epsilon = 1e-14);
        assert_relative_eq!(pts[1], 0.0, epsilon = 1e-14);
        assert_relative_eq!(pts[2], r, epsilon = 1e-14);
        assert_relative_eq!(wts[0], 5.0 / 9.0, epsilon = 1e-14);
        assert_relative_eq!(wts[1], 8.0 / 9.0, epsilon = 1e-14);
        assert_relative_eq!(wts[2], 5.0 / 9.0, epsilon = 1e-14);
    }

    #[test]
    fn test_jacobi_weights() {
        for a in [0.0, 1.0, 2.0] {
            for m in 1..8 {
                let (pts, wts) = gauss_jacobi_rule(a, m);
                // Integrate (1 - x)^a x^j for every degree the rule is exact for
                for j in 0..2 * m {
                    let approx = pts
                        .iter()
                        .zip(&wts)
                        .map(|(x, w)| w * x.powi(j as i32))
                        .sum::<f64>();
                    let mut exact = 0.0;
                    // (1 - x)^a = sum_i binom(a, i) (-x)^i
                    let binom = [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 2.0, 1.0]];
                    for (i, b) in binom[a as usize].iter().enumerate() {
                        let p = i + j;
                        if p % 2 == 0 {
                            exact += b * (-1f64).powi(i as i32) * 2.0 / (p as f64 + 1.0);
                        }
                    }
                    assert_relative_eq!(approx, exact, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_points_inside_cell() {
        for m in 1..6 {
            let rule = make_gauss_jacobi_quadrature(ReferenceCellType::Tetrahedron, m);
            for p in rule.points.chunks(3) {
                assert!(p.iter().all(|x| *x > 0.0));
                assert!(p.iter().sum::<f64>() < 1.0);
            }
            let rule = make_gauss_jacobi_quadrature(ReferenceCellType::Triangle, m);
            for p in rule.points.chunks(2) {
                assert!(p.iter().all(|x| *x > 0.0));
                assert!(p.iter().sum::<f64>() < 1.0);
            }
        }
    }
}
