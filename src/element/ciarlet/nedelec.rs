//! Nedelec elements of the first and second kinds

use crate::element::ciarlet::moments::{
    make_dot_integral_moments, make_empty_dofs, make_integral_moments,
    make_tangent_integral_moments, MomentSpace,
};
use crate::element::ciarlet::{
    lagrange, raviart_thomas, CiarletElement, EntityMatrices, EntityPoints,
};
use crate::element::polynomials::{multiply_top_degree, polynomial_count};
use crate::element::reference_cell;
use crate::types::{Continuity, ElementError, ElementFamily, MapType, ReferenceCellType};
use nalgebra::DMatrix;

/// Tolerance used to detect linearly dependent spanning functions
const RANK_TOLERANCE: f64 = 1e-10;

/// The kind of Nedelec element
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum NedelecKind {
    /// Nedelec first kind, spanning `P_{k-1}^d + S_k`
    First,
    /// Nedelec second kind, spanning `P_k^d`
    Second,
}

/// Create a Nedelec element
pub fn create(
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
    kind: NedelecKind,
) -> Result<CiarletElement, ElementError> {
    let family = match kind {
        NedelecKind::First => ElementFamily::NedelecFirstKind,
        NedelecKind::Second => ElementFamily::NedelecSecondKind,
    };
    if !matches!(
        cell_type,
        ReferenceCellType::Triangle | ReferenceCellType::Tetrahedron
    ) || degree < 1
    {
        return Err(ElementError::UnsupportedElement {
            family,
            cell: cell_type,
            degree,
        });
    }
    let tdim = reference_cell::dim(cell_type);
    let wcoeffs = match kind {
        NedelecKind::First => first_kind_span(cell_type, degree)?,
        NedelecKind::Second => DMatrix::identity(
            tdim * polynomial_count(cell_type, degree),
            tdim * polynomial_count(cell_type, degree),
        ),
    };

    let quadrature_degree = 2 * degree;
    let mut x: EntityPoints = [vec![], vec![], vec![], vec![]];
    let mut m: EntityMatrices = [vec![], vec![], vec![], vec![]];
    (x[0], m[0]) = make_empty_dofs(cell_type, 0);

    // Tangential moments on edges
    let edge_degree = match kind {
        NedelecKind::First => degree - 1,
        NedelecKind::Second => degree,
    };
    let edge_space = MomentSpace::from_element(
        &lagrange::create(
            ReferenceCellType::Interval,
            edge_degree,
            Continuity::Discontinuous,
        )?,
        quadrature_degree,
    )?;
    (x[1], m[1]) = make_tangent_integral_moments(cell_type, &edge_space)?;

    // Moments on faces, and on the interior of a tetrahedron
    for d in 2..=tdim {
        let entity_type = reference_cell::entity_types(cell_type)[d][0];
        (x[d], m[d]) = match kind {
            NedelecKind::First => {
                // Vector moments against P_{k-2} on faces and P_{k-3} on tetrahedra
                let lost = d - 1;
                if degree > lost {
                    let space = MomentSpace::from_element(
                        &lagrange::create(
                            entity_type,
                            degree - 1 - lost,
                            Continuity::Discontinuous,
                        )?,
                        quadrature_degree,
                    )?;
                    make_integral_moments(cell_type, d, &space, tdim)?
                } else {
                    make_empty_dofs(cell_type, d)
                }
            }
            NedelecKind::Second => {
                // Moments against Raviart-Thomas of degree k-1 on faces and k-2 on tetrahedra
                let lost = d - 1;
                if degree > lost {
                    let space = MomentSpace::from_element(
                        &raviart_thomas::create(
                            entity_type,
                            degree - lost,
                            Continuity::Discontinuous,
                        )?,
                        quadrature_degree,
                    )?;
                    make_dot_integral_moments(cell_type, d, &space)?
                } else {
                    make_empty_dofs(cell_type, d)
                }
            }
        };
    }

    CiarletElement::create(
        family,
        cell_type,
        degree,
        vec![tdim],
        wcoeffs,
        x,
        m,
        MapType::CovariantPiola,
        continuity,
        degree,
    )
}

/// A spanning set for the first kind space `P_{k-1}^d + S_k`
///
/// `S_k` is spanned by the functions `q (y, -x)` in 2D and `q (e_m x x)` in 3D, where `q` runs
/// over the top degree orthonormal polynomials of degree `k - 1`. In 3D these are linearly
/// dependent, so the rows are orthonormalised and dependent rows are dropped.
fn first_kind_span(
    cell_type: ReferenceCellType,
    degree: usize,
) -> Result<DMatrix<f64>, ElementError> {
    let tdim = reference_cell::dim(cell_type);
    let pdim = polynomial_count(cell_type, degree);
    let nv = polynomial_count(cell_type, degree - 1);

    let mut rows: Vec<Vec<f64>> = vec![];
    for c in 0..tdim {
        for l in 0..nv {
            let mut row = vec![0.0; tdim * pdim];
            row[c * pdim + l] = 1.0;
            rows.push(row);
        }
    }

    // Each cross product is given by the component of x and its sign for each component
    let cross_products: Vec<[Option<(usize, f64)>; 3]> = if tdim == 2 {
        vec![[Some((1, 1.0)), Some((0, -1.0)), None]]
    } else {
        vec![
            [None, Some((2, -1.0)), Some((1, 1.0))],
            [Some((2, 1.0)), None, Some((0, -1.0))],
            [Some((1, -1.0)), Some((0, 1.0)), None],
        ]
    };
    for product in &cross_products {
        let mut blocks = vec![];
        for entry in product.iter().take(tdim) {
            blocks.push(match entry {
                Some((i, sign)) => Some(multiply_top_degree(cell_type, degree, |x| {
                    sign * x[*i]
                })?),
                None => None,
            });
        }
        let ns = blocks.iter().flatten().map(|b| b.nrows()).next().unwrap_or(0);
        for i in 0..ns {
            let mut row = vec![0.0; tdim * pdim];
            for (c, block) in blocks.iter().enumerate() {
                if let Some(block) = block {
                    for l in 0..pdim {
                        row[c * pdim + l] = block[(i, l)];
                    }
                }
            }
            rows.push(row);
        }
    }

    // Orthonormalise, dropping rows that are in the span of earlier rows
    let mut basis: Vec<Vec<f64>> = vec![];
    for mut row in rows {
        for _ in 0..2 {
            for b in &basis {
                let proj = row.iter().zip(b).map(|(r, v)| r * v).sum::<f64>();
                for (r, v) in row.iter_mut().zip(b) {
                    *r -= proj * v;
                }
            }
        }
        let norm = row.iter().map(|r| r * r).sum::<f64>().sqrt();
        if norm > RANK_TOLERANCE {
            basis.push(row.iter().map(|r| r / norm).collect());
        }
    }
    Ok(DMatrix::from_fn(basis.len(), tdim * pdim, |i, j| basis[i][j]))
}
