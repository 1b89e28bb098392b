//! Finite elements

pub mod ciarlet;
pub mod map;
pub mod polynomials;
pub mod reference_cell;
pub mod symmetry;

use crate::element::ciarlet::{
    crouzeix_raviart, lagrange, nce, nedelec, raviart_thomas, regge, rtc, CiarletElement,
};
use crate::types::{Continuity, ElementError, ElementFamily, ReferenceCellType};

/// Create an element
pub fn create_element(
    family: ElementFamily,
    cell_type: ReferenceCellType,
    degree: usize,
) -> Result<CiarletElement, ElementError> {
    if cell_type == ReferenceCellType::Point {
        return Err(ElementError::UnsupportedElement {
            family,
            cell: cell_type,
            degree,
        });
    }
    match family {
        ElementFamily::Lagrange => lagrange::create(cell_type, degree, Continuity::Continuous),
        ElementFamily::DiscontinuousLagrange => {
            lagrange::create(cell_type, degree, Continuity::Discontinuous)
        }
        ElementFamily::NedelecFirstKind => nedelec::create(
            cell_type,
            degree,
            Continuity::Continuous,
            nedelec::NedelecKind::First,
        ),
        ElementFamily::NedelecSecondKind => nedelec::create(
            cell_type,
            degree,
            Continuity::Continuous,
            nedelec::NedelecKind::Second,
        ),
        ElementFamily::RaviartThomas => {
            raviart_thomas::create(cell_type, degree, Continuity::Continuous)
        }
        ElementFamily::Regge => regge::create(cell_type, degree, Continuity::Continuous),
        ElementFamily::CrouzeixRaviart => {
            crouzeix_raviart::create(cell_type, degree, Continuity::Continuous)
        }
        ElementFamily::Rtc => rtc::create(cell_type, degree, Continuity::Continuous),
        ElementFamily::Nce => nce::create(cell_type, degree, Continuity::Continuous),
    }
}

/// Create an element from the names of its family and cell
///
/// ```
/// use refelement::{create, FiniteElement};
///
/// let element = create("Lagrange", "triangle", 1).unwrap();
/// assert_eq!(element.dim(), 3);
/// assert_eq!(element.base_permutations().unwrap().len(), 3);
/// ```
pub fn create(family: &str, cell: &str, degree: usize) -> Result<CiarletElement, ElementError> {
    create_element(family.parse()?, cell.parse()?, degree)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::FiniteElement;
    use crate::types::MapType;

    #[test]
    fn test_create_by_name() {
        let e = create("N1curl", "tetrahedron", 2).unwrap();
        assert_eq!(e.family(), ElementFamily::NedelecFirstKind);
        assert_eq!(e.cell_type(), ReferenceCellType::Tetrahedron);
        assert_eq!(e.dim(), 20);
        assert_eq!(e.map_type(), MapType::CovariantPiola);

        let e = create("DP", "quadrilateral", 0).unwrap();
        assert_eq!(e.family(), ElementFamily::DiscontinuousLagrange);
        assert_eq!(e.continuity(), Continuity::Discontinuous);
        assert_eq!(e.dim(), 1);
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(
            create("Argyris", "triangle", 5).err(),
            Some(ElementError::UnknownFamily("Argyris".to_string()))
        );
        assert_eq!(
            create("Lagrange", "prism", 1).err(),
            Some(ElementError::UnknownCell("prism".to_string()))
        );
    }

    #[test]
    fn test_unsupported_combinations() {
        let cases = [
            (ElementFamily::Lagrange, ReferenceCellType::Point, 1),
            (ElementFamily::Lagrange, ReferenceCellType::Triangle, 0),
            (ElementFamily::Regge, ReferenceCellType::Hexahedron, 1),
            (ElementFamily::RaviartThomas, ReferenceCellType::Interval, 1),
            (ElementFamily::NedelecSecondKind, ReferenceCellType::Quadrilateral, 1),
            (ElementFamily::CrouzeixRaviart, ReferenceCellType::Tetrahedron, 2),
            (ElementFamily::Rtc, ReferenceCellType::Tetrahedron, 1),
            (ElementFamily::Nce, ReferenceCellType::Hexahedron, 0),
        ];
        for (family, cell, degree) in cases {
            assert_eq!(
                create_element(family, cell, degree).err(),
                Some(ElementError::UnsupportedElement {
                    family,
                    cell,
                    degree
                })
            );
        }
    }

    #[test]
    fn test_map_types() {
        for (family, cell, map_type) in [
            (ElementFamily::Lagrange, ReferenceCellType::Hexahedron, MapType::Identity),
            (ElementFamily::RaviartThomas, ReferenceCellType::Triangle, MapType::ContravariantPiola),
            (ElementFamily::Nce, ReferenceCellType::Quadrilateral, MapType::CovariantPiola),
            (ElementFamily::Regge, ReferenceCellType::Triangle, MapType::DoubleCovariantPiola),
        ] {
            assert_eq!(create_element(family, cell, 1).unwrap().map_type(), map_type);
        }
    }
}
