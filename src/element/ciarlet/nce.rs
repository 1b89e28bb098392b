//! Nedelec first kind elements on quadrilaterals and hexahedra

use crate::element::ciarlet::moments::{
    make_componentwise_legendre_moments, make_empty_dofs, make_tangent_integral_moments,
    MomentSpace,
};
use crate::element::ciarlet::rtc::tensor_span;
use crate::element::ciarlet::{CiarletElement, EntityMatrices, EntityPoints};
use crate::element::reference_cell;
use crate::types::{Continuity, ElementError, ElementFamily, MapType, ReferenceCellType};

/// Create a Nedelec first kind element on a quadrilateral or hexahedron
pub fn create(
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
) -> Result<CiarletElement, ElementError> {
    if !matches!(
        cell_type,
        ReferenceCellType::Quadrilateral | ReferenceCellType::Hexahedron
    ) || degree < 1
    {
        return Err(ElementError::UnsupportedElement {
            family: ElementFamily::Nce,
            cell: cell_type,
            degree,
        });
    }
    let tdim = reference_cell::dim(cell_type);
    let wcoeffs = tensor_span(cell_type, degree, degree - 1, degree);

    let quadrature_degree = 2 * degree;
    let mut x: EntityPoints = [vec![], vec![], vec![], vec![]];
    let mut m: EntityMatrices = [vec![], vec![], vec![], vec![]];
    (x[0], m[0]) = make_empty_dofs(cell_type, 0);

    let edge_space = MomentSpace::legendre(
        ReferenceCellType::Interval,
        &[degree - 1],
        quadrature_degree,
    )?;
    (x[1], m[1]) = make_tangent_integral_moments(cell_type, &edge_space)?;

    for d in 2..=tdim {
        (x[d], m[d]) = if degree > 1 {
            make_componentwise_legendre_moments(
                cell_type,
                d,
                degree - 1,
                degree - 2,
                quadrature_degree,
            )?
        } else {
            make_empty_dofs(cell_type, d)
        };
    }

    CiarletElement::create(
        ElementFamily::Nce,
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::FiniteElement;
    use approx::*;
    use nalgebra::DMatrix;

    #[test]
    fn test_nce_1_quadrilateral() {
        let e = create(ReferenceCellType::Quadrilateral, 1, Continuity::Continuous).unwrap();
        assert_eq!(e.dim(), 4);
        let points = DMatrix::from_row_slice(3, 2, &[0.0, 0.0, 0.3, 0.8, 1.0, 0.5]);
        let data = e.tabulate_alloc(&points, 0).unwrap();
        for p in 0..3 {
            let (x, y) = (points[(p, 0)], points[(p, 1)]);
            let expected = [[1.0 - y, 0.0], [0.0, 1.0 - x], [0.0, x], [y, 0.0]];
            for (b, value) in expected.iter().enumerate() {
                for c in 0..2 {
                    assert_relative_eq!(
                        *data.get([0, p, b, c]).unwrap(),
                        value[c],
                        epsilon = 1e-12
                    );
                }
            }
        }
    }

    #[test]
    fn test_nce_hexahedron_dof_counts() {
        let e = create(ReferenceCellType::Hexahedron, 2, Continuity::Continuous).unwrap();
        assert_eq!(e.dim(), 54);
        assert_eq!(
            e.entity_dof_counts(),
            vec![vec![0; 8], vec![2; 12], vec![4; 6], vec![6]]
        );
    }

    #[test]
    fn test_unsupported() {
        assert!(create(ReferenceCellType::Tetrahedron, 1, Continuity::Continuous).is_err());
    }
}
