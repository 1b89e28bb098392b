//! Raviart-Thomas elements on quadrilaterals and hexahedra

use crate::element::ciarlet::moments::{
    make_componentwise_legendre_moments, make_empty_dofs, make_normal_integral_moments,
    MomentSpace,
};
use crate::element::ciarlet::{CiarletElement, EntityMatrices, EntityPoints};
use crate::element::polynomials::{polynomial_count, tensor_index};
use crate::element::reference_cell;
use crate::types::{Continuity, ElementError, ElementFamily, MapType, ReferenceCellType};
use itertools::Itertools;
use nalgebra::DMatrix;

/// A vector-valued tensor product space
///
/// Component `i` is spanned by the products of Legendre polynomials with degree at most
/// `own_degree` in direction `i` and at most `other_degree` in every other direction. The
/// coefficients are given in the orthonormal polynomials of degree `degree`.
pub(crate) fn tensor_span(
    cell_type: ReferenceCellType,
    degree: usize,
    own_degree: usize,
    other_degree: usize,
) -> DMatrix<f64> {
    let tdim = reference_cell::dim(cell_type);
    let pdim = polynomial_count(cell_type, degree);
    let mut rows = vec![];
    for i in 0..tdim {
        for powers in (0..tdim)
            .map(|d| 0..(if d == i { own_degree } else { other_degree }) + 1)
            .multi_cartesian_product()
        {
            rows.push(i * pdim + tensor_index(degree, &powers));
        }
    }
    let mut wcoeffs = DMatrix::<f64>::zeros(rows.len(), tdim * pdim);
    for (r, col) in rows.iter().enumerate() {
        wcoeffs[(r, *col)] = 1.0;
    }
    wcoeffs
}

/// Create a Raviart-Thomas element on a quadrilateral or hexahedron
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
            family: ElementFamily::Rtc,
            cell: cell_type,
            degree,
        });
    }
    let tdim = reference_cell::dim(cell_type);
    let wcoeffs = tensor_span(cell_type, degree, degree, degree - 1);

    let quadrature_degree = 2 * degree;
    let mut x: EntityPoints = [vec![], vec![], vec![], vec![]];
    let mut m: EntityMatrices = [vec![], vec![], vec![], vec![]];
    for d in 0..tdim - 1 {
        (x[d], m[d]) = make_empty_dofs(cell_type, d);
    }

    let facet_type = reference_cell::entity_types(cell_type)[tdim - 1][0];
    let facet_space =
        MomentSpace::legendre(facet_type, &vec![degree - 1; tdim - 1], quadrature_degree)?;
    (x[tdim - 1], m[tdim - 1]) = make_normal_integral_moments(cell_type, &facet_space)?;

    (x[tdim], m[tdim]) = if degree > 1 {
        make_componentwise_legendre_moments(
            cell_type,
            tdim,
            degree - 2,
            degree - 1,
            quadrature_degree,
        )?
    } else {
        make_empty_dofs(cell_type, tdim)
    };

    CiarletElement::create(
        ElementFamily::Rtc,
        cell_type,
        degree,
        vec![tdim],
        wcoeffs,
        x,
        m,
        MapType::ContravariantPiola,
        continuity,
        degree,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::FiniteElement;
    use approx::*;

    #[test]
    fn test_tensor_span() {
        let span = tensor_span(ReferenceCellType::Quadrilateral, 2, 2, 1);
        assert_eq!(span.nrows(), 12);
        assert_eq!(span.ncols(), 18);
        for r in 0..12 {
            assert_eq!(span.row(r).iter().sum::<f64>(), 1.0);
        }
    }

    #[test]
    fn test_rtc_1_quadrilateral() {
        let e = create(ReferenceCellType::Quadrilateral, 1, Continuity::Continuous).unwrap();
        assert_eq!(e.dim(), 4);
        assert_eq!(e.entity_dof_counts(), vec![vec![0; 4], vec![1; 4], vec![0]]);
        let points = DMatrix::from_row_slice(3, 2, &[0.0, 0.0, 0.3, 0.8, 1.0, 0.5]);
        let data = e.tabulate_alloc(&points, 0).unwrap();
        for p in 0..3 {
            let (x, y) = (points[(p, 0)], points[(p, 1)]);
            let expected = [[0.0, 1.0 - y], [x - 1.0, 0.0], [-x, 0.0], [0.0, y]];
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
    fn test_rtc_hexahedron_dof_counts() {
        let e = create(ReferenceCellType::Hexahedron, 2, Continuity::Continuous).unwrap();
        assert_eq!(e.dim(), 36);
        assert_eq!(
            e.entity_dof_counts(),
            vec![vec![0; 8], vec![0; 12], vec![4; 6], vec![12]]
        );
    }

    #[test]
    fn test_unsupported() {
        assert!(create(ReferenceCellType::Triangle, 1, Continuity::Continuous).is_err());
        assert!(create(ReferenceCellType::Quadrilateral, 0, Continuity::Continuous).is_err());
    }
}
