//! General type definitions

use std::fmt;
use std::str::FromStr;

/// The type of a reference cell
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum ReferenceCellType {
    /// A point
    Point = 0,
    /// A line interval
    Interval = 1,
    /// A triangle
    Triangle = 2,
    /// A quadrilateral
    Quadrilateral = 3,
    /// A tetrahedron (whose faces are all triangles)
    Tetrahedron = 4,
    /// A hexahedron (whose faces are all quadrilaterals)
    Hexahedron = 5,
}

impl ReferenceCellType {
    /// Create a reference cell type from a u8
    pub fn from(i: u8) -> Option<ReferenceCellType> {
        match i {
            0 => Some(ReferenceCellType::Point),
            1 => Some(ReferenceCellType::Interval),
            2 => Some(ReferenceCellType::Triangle),
            3 => Some(ReferenceCellType::Quadrilateral),
            4 => Some(ReferenceCellType::Tetrahedron),
            5 => Some(ReferenceCellType::Hexahedron),
            _ => None,
        }
    }
}

impl fmt::Display for ReferenceCellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceCellType::Point => "point",
            ReferenceCellType::Interval => "interval",
            ReferenceCellType::Triangle => "triangle",
            ReferenceCellType::Quadrilateral => "quadrilateral",
            ReferenceCellType::Tetrahedron => "tetrahedron",
            ReferenceCellType::Hexahedron => "hexahedron",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ReferenceCellType {
    type Err = ElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "point" => Ok(ReferenceCellType::Point),
            "interval" => Ok(ReferenceCellType::Interval),
            "triangle" => Ok(ReferenceCellType::Triangle),
            "quadrilateral" => Ok(ReferenceCellType::Quadrilateral),
            "tetrahedron" => Ok(ReferenceCellType::Tetrahedron),
            "hexahedron" => Ok(ReferenceCellType::Hexahedron),
            _ => Err(ElementError::UnknownCell(s.to_string())),
        }
    }
}

/// The family of an element
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum ElementFamily {
    /// Continuous Lagrange
    Lagrange = 0,
    /// Discontinuous Lagrange
    DiscontinuousLagrange = 1,
    /// Nédélec (first kind) H(curl)
    NedelecFirstKind = 2,
    /// Nédélec (second kind) H(curl)
    NedelecSecondKind = 3,
    /// Raviart-Thomas H(div)
    RaviartThomas = 4,
    /// Regge
    Regge = 5,
    /// Crouzeix-Raviart
    CrouzeixRaviart = 6,
    /// H(div) element on a quadrilateral or hexahedron
    Rtc = 7,
    /// H(curl) element on a quadrilateral or hexahedron
    Nce = 8,
}

impl fmt::Display for ElementFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementFamily::Lagrange => "Lagrange",
            ElementFamily::DiscontinuousLagrange => "Discontinuous Lagrange",
            ElementFamily::NedelecFirstKind => "Nedelec 1st kind H(curl)",
            ElementFamily::NedelecSecondKind => "Nedelec 2nd kind H(curl)",
            ElementFamily::RaviartThomas => "Raviart-Thomas",
            ElementFamily::Regge => "Regge",
            ElementFamily::CrouzeixRaviart => "Crouzeix-Raviart",
            ElementFamily::Rtc => "RTC",
            ElementFamily::Nce => "NCE",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ElementFamily {
    type Err = ElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lagrange" | "P" | "Q" => Ok(ElementFamily::Lagrange),
            "Discontinuous Lagrange" | "DP" | "DQ" => Ok(ElementFamily::DiscontinuousLagrange),
            "Nedelec 1st kind H(curl)" | "N1curl" => Ok(ElementFamily::NedelecFirstKind),
            "Nedelec 2nd kind H(curl)" | "N2curl" => Ok(ElementFamily::NedelecSecondKind),
            "Raviart-Thomas" | "RT" | "N1div" => Ok(ElementFamily::RaviartThomas),
            "Regge" => Ok(ElementFamily::Regge),
            "Crouzeix-Raviart" | "CR" => Ok(ElementFamily::CrouzeixRaviart),
            "RTC" | "RTCF" | "NCF" => Ok(ElementFamily::Rtc),
            "NCE" | "RTCE" | "N1curl quadrilateral" => Ok(ElementFamily::Nce),
            _ => Err(ElementError::UnknownFamily(s.to_string())),
        }
    }
}

/// The map type used by an element
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum MapType {
    /// Identity map
    Identity = 0,
    /// Covariant Piola map
    CovariantPiola = 1,
    /// Contravariant Piola map
    ContravariantPiola = 2,
    /// Double covariant Piola map
    DoubleCovariantPiola = 3,
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MapType::Identity => "affine",
            MapType::CovariantPiola => "covariant Piola",
            MapType::ContravariantPiola => "contravariant Piola",
            MapType::DoubleCovariantPiola => "double covariant Piola",
        };
        write!(f, "{name}")
    }
}

/// Continuity type
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum Continuity {
    /// The element has standard continuity between cells
    Continuous = 0,
    /// The element is discontinuous between cells
    ///
    /// All DOFs of the element are associated with the interior of the cell
    Discontinuous = 1,
}

/// Errors raised by element creation, tabulation and transformation
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    /// The family is not defined on the cell, or not for this degree
    #[error("{family} element of degree {degree} is not defined on a {cell}")]
    UnsupportedElement {
        /// The element family
        family: ElementFamily,
        /// The reference cell
        cell: ReferenceCellType,
        /// The requested degree
        degree: usize,
    },
    /// The family name is not recognised
    #[error("Unknown element family: {0}")]
    UnknownFamily(String),
    /// The cell name is not recognised
    #[error("Unknown cell: {0}")]
    UnknownCell(String),
    /// DOF permutations are not implemented for the family
    #[error("DOF permutations unsupported for this family: {0}")]
    UnsupportedPermutations(ElementFamily),
    /// The map type cannot be applied
    #[error("Unsupported map type: {0}")]
    UnsupportedMapping(MapType),
    /// An input has the wrong size
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The expected size
        expected: usize,
        /// The size that was passed in
        found: usize,
    },
    /// A matrix that must be inverted is singular
    #[error("Singular matrix")]
    SingularMatrix,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cell_type_from_u8() {
        for i in 0..6 {
            let cell = ReferenceCellType::from(i).unwrap();
            assert_eq!(cell as u8, i);
        }
        assert!(ReferenceCellType::from(6).is_none());
    }

    #[test]
    fn test_cell_names() {
        for i in 0..6 {
            let cell = ReferenceCellType::from(i).unwrap();
            assert_eq!(cell.to_string().parse::<ReferenceCellType>(), Ok(cell));
        }
        assert_eq!(
            "prism".parse::<ReferenceCellType>(),
            Err(ElementError::UnknownCell("prism".to_string()))
        );
    }

    #[test]
    fn test_family_names() {
        for family in [
            ElementFamily::Lagrange,
            ElementFamily::DiscontinuousLagrange,
            ElementFamily::NedelecFirstKind,
            ElementFamily::NedelecSecondKind,
            ElementFamily::RaviartThomas,
            ElementFamily::Regge,
            ElementFamily::CrouzeixRaviart,
            ElementFamily::Rtc,
            ElementFamily::Nce,
        ] {
            assert_eq!(family.to_string().parse::<ElementFamily>(), Ok(family));
        }
        assert_eq!("N1curl".parse::<ElementFamily>(), Ok(ElementFamily::NedelecFirstKind));
        assert!("Bubble".parse::<ElementFamily>().is_err());
    }
}
