//! Orthonormal polynomials on reference cells
//!
//! Interval, quadrilateral and hexahedron sets are products of orthonormal shifted Legendre
//! polynomials. Triangle and tetrahedron sets are graded products of Legendre polynomials that
//! have been orthonormalised on the cell, so the first `polynomial_count(cell, k)` functions span
//! the polynomials of degree `k` for every `k`.

use crate::arrays::Array3D;
use crate::element::reference_cell;
use crate::quadrature::make_quadrature;
use crate::types::{ElementError, ReferenceCellType};
use nalgebra::DMatrix;

/// Tabulate orthonormal Legendre polynomials on [0, 1] and their derivatives
///
/// The result has shape `[nderivs + 1, degree + 1, npoints]`.
fn tabulate_legendre_1d(x: &[f64], degree: usize, nderivs: usize) -> Array3D<f64> {
    let mut data = Array3D::<f64>::new([nderivs + 1, degree + 1, x.len()]);
    for k in 0..nderivs + 1 {
        for i in 0..x.len() {
            *data.get_mut([k, 0, i]).unwrap() = if k == 0 { 1.0 } else { 0.0 };
        }
        for p in 1..degree + 1 {
            let a = 1.0 - 1.0 / p as f64;
            let b = (a + 1.0) * ((2.0 * p as f64 + 1.0) / (2.0 * p as f64 - 1.0)).sqrt();
            for (i, xi) in x.iter().enumerate() {
                let mut value = (2.0 * xi - 1.0) * data.get([k, p - 1, i]).unwrap() * b;
                if p > 1 {
                    value -= data.get([k, p - 2, i]).unwrap()
                        * a
                        * ((2.0 * p as f64 + 1.0) / (2.0 * p as f64 - 3.0)).sqrt();
                }
                if k > 0 {
                    value += 2.0 * k as f64 * data.get([k - 1, p - 1, i]).unwrap() * b;
                }
                *data.get_mut([k, p, i]).unwrap() = value;
            }
        }
    }
    data
}

/// The degrees in each direction of each product polynomial
///
/// For simplices the list is graded by total degree.
fn product_powers(cell_type: ReferenceCellType, degree: usize) -> Vec<Vec<usize>> {
    let n = degree;
    match cell_type {
        ReferenceCellType::Point => vec![vec![]],
        ReferenceCellType::Interval => (0..n + 1).map(|i| vec![i]).collect(),
        ReferenceCellType::Quadrilateral => {
            let mut powers = vec![];
            for i in 0..n + 1 {
                for j in 0..n + 1 {
                    powers.push(vec![i, j]);
                }
            }
            powers
        }
        ReferenceCellType::Hexahedron => {
            let mut powers = vec![];
            for i in 0..n + 1 {
                for j in 0..n + 1 {
                    for k in 0..n + 1 {
                        powers.push(vec![i, j, k]);
                    }
                }
            }
            powers
        }
        ReferenceCellType::Triangle => {
            let mut powers = vec![];
            for t in 0..n + 1 {
                for j in 0..t + 1 {
                    powers.push(vec![t - j, j]);
                }
            }
            powers
        }
        ReferenceCellType::Tetrahedron => {
            let mut powers = vec![];
            for t in 0..n + 1 {
                for m in 0..t + 1 {
                    for k in 0..m + 1 {
                        powers.push(vec![t - m, m - k, k]);
                    }
                }
            }
            powers
        }
    }
}

/// The derivative orders in each direction, in the order used by tabulation
fn derivative_powers(tdim: usize, nderivs: usize) -> Vec<Vec<usize>> {
    let mut powers = vec![];
    for n in 0..nderivs + 1 {
        match tdim {
            0 => {
                if n == 0 {
                    powers.push(vec![]);
                }
            }
            1 => powers.push(vec![n]),
            2 => {
                for j in 0..n + 1 {
                    powers.push(vec![n - j, j]);
                }
            }
            _ => {
                for m in 0..n + 1 {
                    for k in 0..m + 1 {
                        powers.push(vec![n - m, m - k, k]);
                    }
                }
            }
        }
    }
    powers
}

/// The index of a partial derivative in tabulated data
///
/// `derivs[i]` is the number of times the function is differentiated in direction `i`.
pub fn derivative_index(derivs: &[usize]) -> usize {
    match derivs.len() {
        0 => 0,
        1 => derivs[0],
        2 => {
            let n = derivs[0] + derivs[1];
            n * (n + 1) / 2 + derivs[1]
        }
        _ => {
            let n = derivs[0] + derivs[1] + derivs[2];
            let m = derivs[1] + derivs[2];
            n * (n + 1) * (n + 2) / 6 + m * (m + 1) / 2 + derivs[2]
        }
    }
}

/// The index of the product polynomial with the given degree in each direction
///
/// Only defined for interval, quadrilateral and hexahedron cells.
pub fn tensor_index(degree: usize, powers: &[usize]) -> usize {
    powers.iter().fold(0, |acc, p| acc * (degree + 1) + p)
}

/// Tabulate products of 1D Legendre polynomials
fn tabulate_products(
    points: &DMatrix<f64>,
    powers: &[Vec<usize>],
    degree: usize,
    nderivs: usize,
) -> Array3D<f64> {
    let tdim = points.ncols();
    let npts = points.nrows();
    let tables = (0..tdim)
        .map(|d| {
            let x = points.column(d).iter().copied().collect::<Vec<_>>();
            tabulate_legendre_1d(&x, degree, nderivs)
        })
        .collect::<Vec<_>>();
    let derivs = derivative_powers(tdim, nderivs);
    let mut data = Array3D::<f64>::new([derivs.len(), powers.len(), npts]);
    for (d, deriv) in derivs.iter().enumerate() {
        for (i, power) in powers.iter().enumerate() {
            for p in 0..npts {
                *data.get_mut([d, i, p]).unwrap() = tables
                    .iter()
                    .zip(deriv.iter().zip(power))
                    .map(|(table, (k, q))| *table.get([*k, *q, p]).unwrap())
                    .product();
            }
        }
    }
    data
}

/// Coefficients of the orthonormal set in terms of the graded product polynomials on a simplex
///
/// Row `i` holds the coefficients of orthonormal polynomial `i`. The matrix is lower triangular.
fn simplex_orthonormalisation(cell_type: ReferenceCellType, degree: usize) -> DMatrix<f64> {
    let powers = product_powers(cell_type, degree);
    let n = powers.len();
    let rule = make_quadrature(cell_type, 2 * degree);
    let mut values = tabulate_products(&rule.points_matrix(), &powers, degree, 0).matrix(0);
    for (mut col, w) in values.column_iter_mut().zip(&rule.weights) {
        col *= w.sqrt();
    }
    // Column i of u holds the weighted values of function i
    let mut u = values.transpose();
    let mut coeffs = DMatrix::<f64>::identity(n, n);
    for i in 0..n {
        // Gram-Schmidt, with one reorthogonalisation pass
        for _ in 0..2 {
            for j in 0..i {
                let uj = u.column(j).clone_owned();
                let cj = coeffs.column(j).clone_owned();
                let proj = u.column(i).dot(&uj);
                u.column_mut(i).axpy(-proj, &uj, 1.0);
                coeffs.column_mut(i).axpy(-proj, &cj, 1.0);
            }
        }
        let norm = u.column(i).norm();
        u.column_mut(i).unscale_mut(norm);
        coeffs.column_mut(i).unscale_mut(norm);
    }
    coeffs.transpose()
}

/// The number of polynomials
pub fn polynomial_count(cell_type: ReferenceCellType, degree: usize) -> usize {
    match cell_type {
        ReferenceCellType::Point => 1,
        ReferenceCellType::Interval => degree + 1,
        ReferenceCellType::Triangle => (degree + 1) * (degree + 2) / 2,
        ReferenceCellType::Quadrilateral => (degree + 1) * (degree + 1),
        ReferenceCellType::Tetrahedron => (degree + 1) * (degree + 2) * (degree + 3) / 6,
        ReferenceCellType::Hexahedron => (degree + 1) * (degree + 1) * (degree + 1),
    }
}

/// The total number of partial derivatives up to and including a degree
pub fn derivative_count(cell_type: ReferenceCellType, derivatives: usize) -> usize {
    match reference_cell::dim(cell_type) {
        0 => 1,
        1 => derivatives + 1,
        2 => (derivatives + 1) * (derivatives + 2) / 2,
        _ => (derivatives + 1) * (derivatives + 2) * (derivatives + 3) / 6,
    }
}

/// The shape of a table containing the values of Legendre polynomials
pub fn legendre_shape(
    cell_type: ReferenceCellType,
    points: &DMatrix<f64>,
    degree: usize,
    derivatives: usize,
) -> [usize; 3] {
    [
        derivative_count(cell_type, derivatives),
        polynomial_count(cell_type, degree),
        points.nrows(),
    ]
}

/// Tabulate orthonormal polynomials
///
/// `data` must have the shape given by [legendre_shape]. Entry `[d, i, p]` is the partial
/// derivative with index `d` (see [derivative_index]) of polynomial `i` at point `p`.
pub fn tabulate_legendre_polynomials(
    cell_type: ReferenceCellType,
    points: &DMatrix<f64>,
    degree: usize,
    derivatives: usize,
    data: &mut Array3D<f64>,
) -> Result<(), ElementError> {
    let tdim = reference_cell::dim(cell_type);
    if points.ncols() != tdim {
        return Err(ElementError::DimensionMismatch {
            expected: tdim,
            found: points.ncols(),
        });
    }
    let shape = legendre_shape(cell_type, points, degree, derivatives);
    for (expected, found) in shape.iter().zip(data.shape()) {
        if expected != found {
            return Err(ElementError::DimensionMismatch {
                expected: *expected,
                found: *found,
            });
        }
    }

    let powers = product_powers(cell_type, degree);
    let products = tabulate_products(points, &powers, degree, derivatives);
    if reference_cell::is_simplex(cell_type) && tdim > 1 {
        let coeffs = simplex_orthonormalisation(cell_type, degree);
        for d in 0..shape[0] {
            let values = &coeffs * products.matrix(d);
            for i in 0..shape[1] {
                for p in 0..shape[2] {
                    *data.get_mut([d, i, p]).unwrap() = values[(i, p)];
                }
            }
        }
    } else {
        *data = products;
    }
    Ok(())
}

/// Tabulate orthonormal polynomials into a new table
pub fn tabulate_legendre_polynomials_alloc(
    cell_type: ReferenceCellType,
    points: &DMatrix<f64>,
    degree: usize,
    derivatives: usize,
) -> Result<Array3D<f64>, ElementError> {
    let mut data = Array3D::<f64>::new(legendre_shape(cell_type, points, degree, derivatives));
    tabulate_legendre_polynomials(cell_type, points, degree, derivatives, &mut data)?;
    Ok(data)
}

/// Coefficients of the products of a linear function with the top degree orthonormal polynomials
///
/// For each orthonormal polynomial `q` of degree `degree - 1` that is orthogonal to every
/// polynomial of degree `degree - 2`, the row for `q` holds the coefficients of `factor * q` in
/// the orthonormal polynomials of degree `degree`. Only defined for simplices.
pub fn multiply_top_degree(
    cell_type: ReferenceCellType,
    degree: usize,
    factor: impl Fn(&[f64]) -> f64,
) -> Result<DMatrix<f64>, ElementError> {
    let start = if degree > 1 {
        polynomial_count(cell_type, degree - 2)
    } else {
        0
    };
    let end = if degree > 0 {
        polynomial_count(cell_type, degree - 1)
    } else {
        0
    };
    let rule = make_quadrature(cell_type, 2 * degree);
    let points = rule.points_matrix();
    let table = tabulate_legendre_polynomials_alloc(cell_type, &points, degree, 0)?.matrix(0);
    let weighted = (0..rule.npoints)
        .map(|q| {
            let point = points.row(q).iter().copied().collect::<Vec<_>>();
            rule.weights[q] * factor(&point)
        })
        .collect::<Vec<_>>();
    Ok(DMatrix::from_fn(end - start, table.nrows(), |i, l| {
        weighted
            .iter()
            .enumerate()
            .map(|(q, w)| w * table[(start + i, q)] * table[(l, q)])
            .sum()
    }))
}
