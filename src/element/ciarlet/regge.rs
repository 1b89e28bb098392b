//! Regge elements

use crate::element::ciarlet::lagrange::interior_lattice;
use crate::element::ciarlet::{CiarletElement, EntityMatrices, EntityPoints};
use crate::element::polynomials::polynomial_count;
use crate::element::reference_cell;
use crate::types::{Continuity, ElementError, ElementFamily, MapType, ReferenceCellType};
use nalgebra::DMatrix;

/// Create a Regge element
///
/// The element of degree `r` spans the symmetric matrix-valued polynomials of degree `r`. Its
/// DOFs are the values of `t^T S t` at lattice points of each subentity, for the tangent `t` of
/// each edge of that subentity.
pub fn create(
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
) -> Result<CiarletElement, ElementError> {
    if !matches!(
        cell_type,
        ReferenceCellType::Triangle | ReferenceCellType::Tetrahedron
    ) {
        return Err(ElementError::UnsupportedElement {
            family: ElementFamily::Regge,
            cell: cell_type,
            degree,
        });
    }
    let tdim = reference_cell::dim(cell_type);
    let pdim = polynomial_count(cell_type, degree);
    let nsym = tdim * (tdim + 1) / 2;

    let mut wcoeffs = DMatrix::<f64>::zeros(nsym * pdim, tdim * tdim * pdim);
    let mut s = 0;
    for i in 0..tdim {
        for j in i..tdim {
            for l in 0..pdim {
                if i == j {
                    wcoeffs[(s * pdim + l, (i * tdim + i) * pdim + l)] = 1.0;
                } else {
                    wcoeffs[(s * pdim + l, (i * tdim + j) * pdim + l)] = 0.5;
                    wcoeffs[(s * pdim + l, (j * tdim + i) * pdim + l)] = 0.5;
                }
            }
            s += 1;
        }
    }

    let topology = reference_cell::topology(cell_type);
    let mut x: EntityPoints = [vec![], vec![], vec![], vec![]];
    let mut m: EntityMatrices = [vec![], vec![], vec![], vec![]];
    for _ in &topology.vertices {
        x[0].push(DMatrix::zeros(0, tdim));
        m[0].push(DMatrix::zeros(0, 0));
    }
    for d in 1..=tdim {
        for (e, entity_type) in reference_cell::entity_types(cell_type)[d].iter().enumerate() {
            let entity = &topology.entities[d][e];
            let pts = reference_cell::map_to_entity(
                cell_type,
                d,
                e,
                &interior_lattice(*entity_type, degree + 2),
            );
            let npts = pts.nrows();
            let tangents = reference_cell::edges(*entity_type)
                .iter()
                .map(|edge| {
                    let v0 = &topology.vertices[entity[edge[0]]];
                    let v1 = &topology.vertices[entity[edge[1]]];
                    v1.iter().zip(v0).map(|(a, b)| a - b).collect::<Vec<_>>()
                })
                .collect::<Vec<_>>();
            let nedges = tangents.len();

            let mut mat = DMatrix::<f64>::zeros(npts * nedges, tdim * tdim * npts);
            for p in 0..npts {
                for (i, t) in tangents.iter().enumerate() {
                    for c0 in 0..tdim {
                        for c1 in 0..tdim {
                            mat[(p * nedges + i, (c0 * tdim + c1) * npts + p)] = t[c0] * t[c1];
                        }
                    }
                }
            }
            x[d].push(pts);
            m[d].push(mat);
        }
    }

    CiarletElement::create(
        ElementFamily::Regge,
        cell_type,
        degree,
        vec![tdim, tdim],
        wcoeffs,
        x,
        m,
        MapType::DoubleCovariantPiola,
        continuity,
        degree,
    )
}
