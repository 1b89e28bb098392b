//! DOF transformations for reflected and rotated subentities

use crate::element::ciarlet::CiarletElement;
use crate::element::map::pull_back_tabulation;
use crate::element::reference_cell;
use crate::element::symmetry::{generators, reference_entity_map, AffineMap};
use crate::traits::FiniteElement;
use crate::types::{ElementError, MapType};
use log::debug;
use nalgebra::DMatrix;

/// Entries closer than this to an integer in {-1, 0, 1} are snapped to it
const SNAP_TOLERANCE: f64 = 1e-10;

fn snap(value: f64) -> f64 {
    for target in [-1.0, 0.0, 1.0] {
        if (value - target).abs() < SNAP_TOLERANCE {
            return target;
        }
    }
    value
}

/// The action of one generator on the DOFs of entity 0 of a dimension
fn entity_block(
    element: &CiarletElement,
    entity_dim: usize,
    map: &AffineMap,
) -> Result<DMatrix<f64>, ElementError> {
    let dofs = element.entity_dofs(entity_dim, 0).unwrap_or(&[]);
    let n = dofs.len();
    if n == 0 {
        return Ok(DMatrix::zeros(0, 0));
    }
    let points = &element.interpolation_points()[entity_dim][0];
    let matrix = &element.interpolation_matrices()[entity_dim][0];
    let npts = points.nrows();
    let vs = element.value_size();

    let table = element.tabulate_alloc(&map.map_points(points), 0)?;
    let pulled = pull_back_tabulation(element.map_type(), map.jacobian(), &table)?;

    let mut block = DMatrix::<f64>::zeros(n, n);
    for (k, dof) in dofs.iter().enumerate() {
        for l in 0..n {
            let mut value = 0.0;
            for q in 0..npts {
                let row = pulled.row(0, q);
                for c in 0..vs {
                    value += matrix[(l, c * npts + q)] * row[dof * vs + c];
                }
            }
            block[(k, l)] = snap(value);
        }
    }
    Ok(block)
}

/// Compute the base permutations of an element
///
/// For every edge there is one matrix, for its reflection. For every face of a
/// three-dimensional cell there are two, for its rotation then its reflection. Each matrix is
/// the identity outside the rows and columns of the DOFs of its entity.
pub(crate) fn base_permutations(
    element: &CiarletElement,
) -> Result<Vec<DMatrix<f64>>, ElementError> {
    if element.map_type() == MapType::DoubleCovariantPiola {
        return Err(ElementError::UnsupportedPermutations(element.family()));
    }
    let cell_type = element.cell_type();
    let tdim = reference_cell::dim(cell_type);
    let dim = element.dim();

    let mut perms = vec![];
    for entity_dim in 1..tdim {
        let entity_type = reference_cell::entity_types(cell_type)[entity_dim][0];
        let mut blocks = vec![];
        for g in generators(entity_type) {
            let map = reference_entity_map(cell_type, entity_dim, g.kind())
                .ok_or(ElementError::UnsupportedPermutations(element.family()))?;
            blocks.push(entity_block(element, entity_dim, &map)?);
        }
        for e in 0..reference_cell::entity_counts(cell_type)[entity_dim] {
            let dofs = element.entity_dofs(entity_dim, e).unwrap_or(&[]);
            for block in &blocks {
                let mut perm = DMatrix::<f64>::identity(dim, dim);
                if block.nrows() == dofs.len() {
                    for (i, row) in dofs.iter().enumerate() {
                        for (j, col) in dofs.iter().enumerate() {
                            perm[(*row, *col)] = block[(i, j)];
                        }
                    }
                } else {
                    return Err(ElementError::DimensionMismatch {
                        expected: block.nrows(),
                        found: dofs.len(),
                    });
                }
                perms.push(perm);
            }
        }
    }
    debug!(
        "Computed {} base permutations for {} element on {}",
        perms.len(),
        element.family(),
        cell_type
    );
    Ok(perms)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::element::ciarlet::lagrange;
    use crate::types::{Continuity, ReferenceCellType};
    use approx::*;

    #[test]
    fn test_snap() {
        assert_eq!(snap(1.0 - 1e-12), 1.0);
        assert_eq!(snap(-1e-13), 0.0);
        assert_eq!(snap(0.5), 0.5);
    }

    #[test]
    fn test_lagrange_2_triangle() {
        // One DOF per edge, so every edge reflection is the identity
        let e = lagrange::create(ReferenceCellType::Triangle, 2, Continuity::Continuous).unwrap();
        let perms = base_permutations(&e).unwrap();
        assert_eq!(perms.len(), 3);
        for p in &perms {
            assert_relative_eq!(*p, DMatrix::identity(6, 6), epsilon = 1e-14);
        }
    }

    #[test]
    fn test_lagrange_3_tetrahedron_face() {
        // One interior DOF per face, so face rotations and reflections are trivial
        let e = lagrange::create(ReferenceCellType::Tetrahedron, 3, Continuity::Continuous)
            .unwrap();
        let perms = base_permutations(&e).unwrap();
        assert_eq!(perms.len(), 14);
        for p in &perms[6..] {
            assert_relative_eq!(*p, DMatrix::identity(20, 20), epsilon = 1e-14);
        }
        // Edge 0 has DOFs 4 and 5, which are swapped
        let dofs = e.entity_dofs(1, 0).unwrap();
        assert_eq!(perms[0][(dofs[0], dofs[1])], 1.0);
        assert_eq!(perms[0][(dofs[1], dofs[0])], 1.0);
        assert_eq!(perms[0][(dofs[0], dofs[0])], 0.0);
    }
}
