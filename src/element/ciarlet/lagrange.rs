//! Lagrange elements

use crate::element::ciarlet::{CiarletElement, EntityMatrices, EntityPoints};
use crate::element::polynomials::polynomial_count;
use crate::element::reference_cell;
use crate::types::{Continuity, ElementError, ElementFamily, MapType, ReferenceCellType};
use log::warn;
use nalgebra::DMatrix;

/// Degrees above which equally spaced points give a badly conditioned element
const MAX_STABLE_DEGREE: usize = 10;

/// The points of an equally spaced lattice of size `n` in the interior of a reference cell
///
/// The points are given in the cell's own coordinates, one per row.
pub fn interior_lattice(cell_type: ReferenceCellType, n: usize) -> DMatrix<f64> {
    let h = 1.0 / n as f64;
    let mut points: Vec<Vec<f64>> = vec![];
    match cell_type {
        ReferenceCellType::Point => points.push(vec![]),
        ReferenceCellType::Interval => {
            for i0 in 1..n {
                points.push(vec![i0 as f64 * h]);
            }
        }
        ReferenceCellType::Triangle => {
            for i0 in 1..n {
                for i1 in 1..n - i0 {
                    points.push(vec![i0 as f64 * h, i1 as f64 * h]);
                }
            }
        }
        ReferenceCellType::Quadrilateral => {
            for i0 in 1..n {
                for i1 in 1..n {
                    points.push(vec![i0 as f64 * h, i1 as f64 * h]);
                }
            }
        }
        ReferenceCellType::Tetrahedron => {
            for i0 in 1..n {
                for i1 in 1..n - i0 {
                    for i2 in 1..n - i0 - i1 {
                        points.push(vec![i0 as f64 * h, i1 as f64 * h, i2 as f64 * h]);
                    }
                }
            }
        }
        ReferenceCellType::Hexahedron => {
            for i0 in 1..n {
                for i1 in 1..n {
                    for i2 in 1..n {
                        points.push(vec![i0 as f64 * h, i1 as f64 * h, i2 as f64 * h]);
                    }
                }
            }
        }
    }
    let tdim = reference_cell::dim(cell_type);
    DMatrix::from_fn(points.len(), tdim, |i, j| points[i][j])
}

/// Create a Lagrange element
pub fn create(
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
) -> Result<CiarletElement, ElementError> {
    let family = match continuity {
        Continuity::Continuous => ElementFamily::Lagrange,
        Continuity::Discontinuous => ElementFamily::DiscontinuousLagrange,
    };
    if cell_type == ReferenceCellType::Point
        || (degree == 0 && continuity == Continuity::Continuous)
    {
        return Err(ElementError::UnsupportedElement {
            family,
            cell: cell_type,
            degree,
        });
    }
    if degree > MAX_STABLE_DEGREE {
        warn!(
            "Creating a degree {} Lagrange element on equally spaced points. The element may be badly conditioned.",
            degree
        );
    }

    let dim = polynomial_count(cell_type, degree);
    let tdim = reference_cell::dim(cell_type);
    let wcoeffs = DMatrix::<f64>::identity(dim, dim);

    let mut x: EntityPoints = [vec![], vec![], vec![], vec![]];
    let mut m: EntityMatrices = [vec![], vec![], vec![], vec![]];
    let entity_counts = reference_cell::entity_counts(cell_type);
    if degree == 0 {
        for (d, counts) in entity_counts.iter().enumerate().take(tdim) {
            for _e in 0..*counts {
                x[d].push(DMatrix::zeros(0, tdim));
                m[d].push(DMatrix::zeros(0, 0));
            }
        }
        let midpoint = reference_cell::midpoint(cell_type);
        x[tdim].push(DMatrix::from_row_slice(1, tdim, &midpoint));
        m[tdim].push(DMatrix::identity(1, 1));
    } else {
        for vertex in reference_cell::vertices(cell_type) {
            x[0].push(DMatrix::from_row_slice(1, tdim, &vertex));
            m[0].push(DMatrix::identity(1, 1));
        }
        for (d, entity_types) in reference_cell::entity_types(cell_type)
            .iter()
            .enumerate()
            .take(tdim + 1)
            .skip(1)
        {
            for (e, entity_type) in entity_types.iter().enumerate() {
                let pts = reference_cell::map_to_entity(
                    cell_type,
                    d,
                    e,
                    &interior_lattice(*entity_type, degree),
                );
                let npts = pts.nrows();
                x[d].push(pts);
                m[d].push(DMatrix::identity(npts, npts));
            }
        }
    }
    CiarletElement::create(
        family,
        cell_type,
        degree,
        vec![],
        wcoeffs,
        x,
        m,
        MapType::Identity,
        continuity,
        degree,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::FiniteElement;

    #[test]
    fn test_interior_lattice_sizes() {
        for n in 1..6 {
            let m = n - 1;
            assert_eq!(interior_lattice(ReferenceCellType::Interval, n).nrows(), m);
            assert_eq!(interior_lattice(ReferenceCellType::Quadrilateral, n).nrows(), m * m);
            assert_eq!(interior_lattice(ReferenceCellType::Hexahedron, n).nrows(), m * m * m);
            assert_eq!(
                interior_lattice(ReferenceCellType::Triangle, n).nrows(),
                if n > 2 { (n - 1) * (n - 2) / 2 } else { 0 }
            );
            assert_eq!(
                interior_lattice(ReferenceCellType::Tetrahedron, n).nrows(),
                if n > 3 { (n - 1) * (n - 2) * (n - 3) / 6 } else { 0 }
            );
        }
    }

    #[test]
    fn test_continuous_degree_0() {
        assert_eq!(
            create(ReferenceCellType::Triangle, 0, Continuity::Continuous).err(),
            Some(ElementError::UnsupportedElement {
                family: ElementFamily::Lagrange,
                cell: ReferenceCellType::Triangle,
                degree: 0
            })
        );
    }

    #[test]
    fn test_dof_counts() {
        let e = create(ReferenceCellType::Tetrahedron, 4, Continuity::Continuous).unwrap();
        assert_eq!(
            e.entity_dof_counts(),
            vec![vec![1; 4], vec![3; 6], vec![3; 4], vec![1]]
        );
        let e = create(ReferenceCellType::Hexahedron, 3, Continuity::Continuous).unwrap();
        assert_eq!(
            e.entity_dof_counts(),
            vec![vec![1; 8], vec![2; 12], vec![4; 6], vec![8]]
        );
    }
}
