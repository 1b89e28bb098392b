//! Crouzeix-Raviart elements

use crate::element::ciarlet::moments::make_empty_dofs;
use crate::element::ciarlet::{CiarletElement, EntityMatrices, EntityPoints};
use crate::element::polynomials::polynomial_count;
use crate::element::reference_cell;
use crate::types::{Continuity, ElementError, ElementFamily, MapType, ReferenceCellType};
use nalgebra::DMatrix;

/// Create a Crouzeix-Raviart element
///
/// The DOFs are point evaluations at the midpoints of the facets.
pub fn create(
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
) -> Result<CiarletElement, ElementError> {
    if !matches!(
        cell_type,
        ReferenceCellType::Triangle | ReferenceCellType::Tetrahedron
    ) || degree != 1
    {
        return Err(ElementError::UnsupportedElement {
            family: ElementFamily::CrouzeixRaviart,
            cell: cell_type,
            degree,
        });
    }
    let tdim = reference_cell::dim(cell_type);
    let pdim = polynomial_count(cell_type, 1);
    let topology = reference_cell::topology(cell_type);

    let mut x: EntityPoints = [vec![], vec![], vec![], vec![]];
    let mut m: EntityMatrices = [vec![], vec![], vec![], vec![]];
    for d in 0..tdim - 1 {
        (x[d], m[d]) = make_empty_dofs(cell_type, d);
    }
    for facet in &topology.entities[tdim - 1] {
        let midpoint = DMatrix::from_fn(1, tdim, |_, j| {
            facet.iter().map(|v| topology.vertices[*v][j]).sum::<f64>() / facet.len() as f64
        });
        x[tdim - 1].push(midpoint);
        m[tdim - 1].push(DMatrix::identity(1, 1));
    }
    (x[tdim], m[tdim]) = make_empty_dofs(cell_type, tdim);

    CiarletElement::create(
        ElementFamily::CrouzeixRaviart,
        cell_type,
        degree,
        vec![],
        DMatrix::identity(pdim, pdim),
        x,
        m,
        MapType::Identity,
        continuity,
        degree,
    )
}
