//! Integral moment DOFs
//!
//! A moment DOF is the integral over a subentity of a function against one of the functions of
//! a moment space. The functions are tabulated at the points of a quadrature rule on the
//! subentity's reference cell, so each DOF is a weighted sum of point values.

use crate::element::ciarlet::CiarletElement;
use crate::element::polynomials::{tabulate_legendre_polynomials_alloc, tensor_index};
use crate::element::reference_cell;
use crate::quadrature::make_quadrature;
use crate::traits::FiniteElement;
use crate::types::{ElementError, ReferenceCellType};
use itertools::Itertools;
use nalgebra::DMatrix;

/// A set of functions on a reference cell, tabulated at quadrature points
#[derive(Debug, Clone)]
pub struct MomentSpace {
    cell_type: ReferenceCellType,
    points: DMatrix<f64>,
    weights: Vec<f64>,
    /// One matrix per component, with one row per function and one column per point
    values: Vec<DMatrix<f64>>,
}

impl MomentSpace {
    /// The basis functions of an element
    pub fn from_element(
        element: &CiarletElement,
        quadrature_degree: usize,
    ) -> Result<Self, ElementError> {
        let cell_type = element.cell_type();
        let rule = make_quadrature(cell_type, quadrature_degree);
        let points = rule.points_matrix();
        let table = element.tabulate_alloc(&points, 0)?;
        let value_size = element.value_size();
        let values = (0..value_size)
            .map(|c| {
                DMatrix::from_fn(element.dim(), rule.npoints, |f, q| {
                    table.row(0, q)[f * value_size + c]
                })
            })
            .collect();
        Ok(Self {
            cell_type,
            points,
            weights: rule.weights,
            values,
        })
    }

    /// Orthonormal products of Legendre polynomials with a maximum degree in each direction
    ///
    /// Defined on intervals, quadrilaterals and hexahedra.
    pub fn legendre(
        cell_type: ReferenceCellType,
        degrees: &[usize],
        quadrature_degree: usize,
    ) -> Result<Self, ElementError> {
        let tdim = reference_cell::dim(cell_type);
        if degrees.len() != tdim {
            return Err(ElementError::DimensionMismatch {
                expected: tdim,
                found: degrees.len(),
            });
        }
        let max_degree = degrees.iter().copied().max().unwrap_or(0);
        let rule = make_quadrature(cell_type, quadrature_degree);
        let points = rule.points_matrix();
        let table = tabulate_legendre_polynomials_alloc(cell_type, &points, max_degree, 0)?;
        let rows = degrees
            .iter()
            .map(|d| 0..d + 1)
            .multi_cartesian_product()
            .map(|powers| tensor_index(max_degree, &powers))
            .collect::<Vec<_>>();
        let values = DMatrix::from_fn(rows.len(), rule.npoints, |f, q| {
            table.get([0, rows[f], q]).copied().unwrap_or(0.0)
        });
        Ok(Self {
            cell_type,
            points,
            weights: rule.weights,
            values: vec![values],
        })
    }

    /// The number of functions
    pub fn dim(&self) -> usize {
        self.values.first().map_or(0, |v| v.nrows())
    }

    /// The number of components of each function
    pub fn value_size(&self) -> usize {
        self.values.len()
    }

    /// The number of quadrature points
    pub fn npoints(&self) -> usize {
        self.points.nrows()
    }

    /// The reference cell the functions are defined on
    pub fn cell_type(&self) -> ReferenceCellType {
        self.cell_type
    }
}

/// The points and matrices of moment DOFs on every subentity of one dimension
pub type MomentDofs = (Vec<DMatrix<f64>>, Vec<DMatrix<f64>>);

fn check_entity(
    cell_type: ReferenceCellType,
    entity_dim: usize,
    space: &MomentSpace,
) -> Result<usize, ElementError> {
    let expected = reference_cell::dim(space.cell_type);
    if entity_dim != expected {
        return Err(ElementError::DimensionMismatch {
            expected,
            found: entity_dim,
        });
    }
    Ok(reference_cell::entity_counts(cell_type)[entity_dim])
}

/// Build moment DOFs with a function that fills in the matrix for one subentity
fn make_moments(
    cell_type: ReferenceCellType,
    entity_dim: usize,
    space: &MomentSpace,
    ndofs: usize,
    value_size: usize,
    fill: impl Fn(&mut DMatrix<f64>, &[Vec<f64>]),
) -> Result<MomentDofs, ElementError> {
    let nentities = check_entity(cell_type, entity_dim, space)?;
    let mut points = vec![];
    let mut matrices = vec![];
    for e in 0..nentities {
        let (_, axes) = reference_cell::sub_entity_geometry(cell_type, entity_dim, e);
        points.push(reference_cell::map_to_entity(
            cell_type,
            entity_dim,
            e,
            &space.points,
        ));
        let mut mat = DMatrix::<f64>::zeros(ndofs, value_size * space.npoints());
        fill(&mut mat, &axes);
        matrices.push(mat);
    }
    Ok((points, matrices))
}

/// Moments against a scalar space
///
/// If `value_size` is 1 there is one DOF per function. Otherwise there is one DOF for each
/// function and each axis of the subentity, with the function multiplied by that axis.
pub fn make_integral_moments(
    cell_type: ReferenceCellType,
    entity_dim: usize,
    space: &MomentSpace,
    value_size: usize,
) -> Result<MomentDofs, ElementError> {
    let npts = space.npoints();
    let nfunctions = space.dim();
    if value_size == 1 {
        make_moments(cell_type, entity_dim, space, nfunctions, 1, |mat, _| {
            for f in 0..nfunctions {
                for q in 0..npts {
                    mat[(f, q)] = space.weights[q] * space.values[0][(f, q)];
                }
            }
        })
    } else {
        make_moments(
            cell_type,
            entity_dim,
            space,
            nfunctions * entity_dim,
            value_size,
            |mat, axes| {
                for f in 0..nfunctions {
                    for (a, axis) in axes.iter().enumerate() {
                        for q in 0..npts {
                            let v = space.weights[q] * space.values[0][(f, q)];
                            for (c, t) in axis.iter().enumerate() {
                                mat[(f * entity_dim + a, c * npts + q)] = v * t;
                            }
                        }
                    }
                }
            },
        )
    }
}

/// Moments of the component along one axis of each subentity against a scalar space
pub fn make_axis_integral_moments(
    cell_type: ReferenceCellType,
    entity_dim: usize,
    space: &MomentSpace,
    axis: usize,
) -> Result<MomentDofs, ElementError> {
    let tdim = reference_cell::dim(cell_type);
    let npts = space.npoints();
    let nfunctions = space.dim();
    make_moments(
        cell_type,
        entity_dim,
        space,
        nfunctions,
        tdim,
        |mat, axes| {
            for f in 0..nfunctions {
                for q in 0..npts {
                    let v = space.weights[q] * space.values[0][(f, q)];
                    for (c, t) in axes[axis].iter().enumerate() {
                        mat[(f, c * npts + q)] = v * t;
                    }
                }
            }
        },
    )
}

/// Moments of each axis component of a subentity against Legendre products
///
/// Component `i` is tested against the products with degree at most `own_degree` in direction
/// `i` and at most `other_degree` in every other direction.
pub fn make_componentwise_legendre_moments(
    cell_type: ReferenceCellType,
    entity_dim: usize,
    own_degree: usize,
    other_degree: usize,
    quadrature_degree: usize,
) -> Result<MomentDofs, ElementError> {
    let entity_type = reference_cell::entity_types(cell_type)[entity_dim][0];
    let mut dofs = make_empty_dofs(cell_type, entity_dim);
    for i in 0..entity_dim {
        let degrees = (0..entity_dim)
            .map(|d| if d == i { own_degree } else { other_degree })
            .collect::<Vec<_>>();
        let space = MomentSpace::legendre(entity_type, &degrees, quadrature_degree)?;
        let moments = make_axis_integral_moments(cell_type, entity_dim, &space, i)?;
        dofs = if i == 0 {
            moments
        } else {
            concatenate(dofs, moments)
        };
    }
    Ok(dofs)
}

/// Tangential moments on the edges of a cell against a scalar space
pub fn make_tangent_integral_moments(
    cell_type: ReferenceCellType,
    space: &MomentSpace,
) -> Result<MomentDofs, ElementError> {
    make_axis_integral_moments(cell_type, 1, space, 0)
}

/// Normal moments on the facets of a cell against a scalar space
pub fn make_normal_integral_moments(
    cell_type: ReferenceCellType,
    space: &MomentSpace,
) -> Result<MomentDofs, ElementError> {
    let tdim = reference_cell::dim(cell_type);
    let npts = space.npoints();
    let nfunctions = space.dim();
    make_moments(
        cell_type,
        tdim - 1,
        space,
        nfunctions,
        tdim,
        |mat, axes| {
            let normal = match axes {
                [t] => vec![-t[1], t[0]],
                [t0, t1] => vec![
                    t0[1] * t1[2] - t0[2] * t1[1],
                    t0[2] * t1[0] - t0[0] * t1[2],
                    t0[0] * t1[1] - t0[1] * t1[0],
                ],
                _ => vec![0.0; tdim],
            };
            for f in 0..nfunctions {
                for q in 0..npts {
                    let v = space.weights[q] * space.values[0][(f, q)];
                    for (c, n) in normal.iter().enumerate() {
                        mat[(f, c * npts + q)] = v * n;
                    }
                }
            }
        },
    )
}

/// Moments against a vector-valued space
///
/// The components of each function are taken along the axes of the subentity.
pub fn make_dot_integral_moments(
    cell_type: ReferenceCellType,
    entity_dim: usize,
    space: &MomentSpace,
) -> Result<MomentDofs, ElementError> {
    if space.value_size() != entity_dim {
        return Err(ElementError::DimensionMismatch {
            expected: entity_dim,
            found: space.value_size(),
        });
    }
    let tdim = reference_cell::dim(cell_type);
    let npts = space.npoints();
    let nfunctions = space.dim();
    make_moments(
        cell_type,
        entity_dim,
        space,
        nfunctions,
        tdim,
        |mat, axes| {
            for f in 0..nfunctions {
                for q in 0..npts {
                    for c in 0..tdim {
                        mat[(f, c * npts + q)] = space.weights[q]
                            * axes
                                .iter()
                                .enumerate()
                                .map(|(a, axis)| space.values[a][(f, q)] * axis[c])
                                .sum::<f64>();
                    }
                }
            }
        },
    )
}

/// No DOFs on any subentity of one dimension
pub fn make_empty_dofs(cell_type: ReferenceCellType, entity_dim: usize) -> MomentDofs {
    let tdim = reference_cell::dim(cell_type);
    let nentities = reference_cell::entity_counts(cell_type)[entity_dim];
    (
        vec![DMatrix::zeros(0, tdim); nentities],
        vec![DMatrix::zeros(0, 0); nentities],
    )
}

/// Join the DOFs of two sets of moments that share their points
pub fn concatenate(first: MomentDofs, second: MomentDofs) -> MomentDofs {
    let (points, first_matrices) = first;
    let matrices = first_matrices
        .into_iter()
        .zip(second.1)
        .map(|(a, b)| {
            let mut joined = DMatrix::<f64>::zeros(a.nrows() + b.nrows(), a.ncols());
            joined.rows_mut(0, a.nrows()).copy_from(&a);
            joined.rows_mut(a.nrows(), b.nrows()).copy_from(&b);
            joined
        })
        .collect();
    (points, matrices)
}
