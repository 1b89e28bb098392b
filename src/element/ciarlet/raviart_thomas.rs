//! Raviart-Thomas elements

use crate::element::ciarlet::moments::{
    make_empty_dofs, make_integral_moments, make_normal_integral_moments, MomentSpace,
};
use crate::element::ciarlet::{lagrange, CiarletElement, EntityMatrices, EntityPoints};
use crate::element::polynomials::{multiply_top_degree, polynomial_count};
use crate::element::reference_cell;
use crate::types::{Continuity, ElementError, ElementFamily, MapType, ReferenceCellType};
use nalgebra::DMatrix;

/// Create a Raviart-Thomas element
///
/// The element of degree `k` spans `P_{k-1}^d + x P_{k-1}`.
pub fn create(
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
) -> Result<CiarletElement, ElementError> {
    if !matches!(
        cell_type,
        ReferenceCellType::Triangle | ReferenceCellType::Tetrahedron
    ) || degree < 1
    {
        return Err(ElementError::UnsupportedElement {
            family: ElementFamily::RaviartThomas,
            cell: cell_type,
            degree,
        });
    }

    let tdim = reference_cell::dim(cell_type);
    let pdim = polynomial_count(cell_type, degree);
    let nv = polynomial_count(cell_type, degree - 1);

    let mut blocks = vec![];
    for c in 0..tdim {
        blocks.push(multiply_top_degree(cell_type, degree, |x| x[c])?);
    }
    let ns = blocks[0].nrows();
    let mut wcoeffs = DMatrix::<f64>::zeros(tdim * nv + ns, tdim * pdim);
    for c in 0..tdim {
        for l in 0..nv {
            wcoeffs[(c * nv + l, c * pdim + l)] = 1.0;
        }
        wcoeffs
            .view_mut((tdim * nv, c * pdim), (ns, pdim))
            .copy_from(&blocks[c]);
    }

    let quadrature_degree = 2 * degree;
    let mut x: EntityPoints = [vec![], vec![], vec![], vec![]];
    let mut m: EntityMatrices = [vec![], vec![], vec![], vec![]];
    for d in 0..tdim - 1 {
        (x[d], m[d]) = make_empty_dofs(cell_type, d);
    }

    let facet_type = reference_cell::entity_types(cell_type)[tdim - 1][0];
    let facet_space = MomentSpace::from_element(
        &lagrange::create(facet_type, degree - 1, Continuity::Discontinuous)?,
        quadrature_degree,
    )?;
    (x[tdim - 1], m[tdim - 1]) = make_normal_integral_moments(cell_type, &facet_space)?;

    (x[tdim], m[tdim]) = if degree > 1 {
        let interior_space = MomentSpace::from_element(
            &lagrange::create(cell_type, degree - 2, Continuity::Discontinuous)?,
            quadrature_degree,
        )?;
        make_integral_moments(cell_type, tdim, &interior_space, tdim)?
    } else {
        make_empty_dofs(cell_type, tdim)
    };

    CiarletElement::create(
        ElementFamily::RaviartThomas,
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
