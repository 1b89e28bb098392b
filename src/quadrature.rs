//! Quadrature rules on reference cells

pub mod gauss_jacobi;
pub mod types;

pub use gauss_jacobi::make_gauss_jacobi_quadrature;
pub use types::NumericalQuadratureDefinition;

use crate::types::ReferenceCellType;

/// A quadrature rule that integrates polynomials of the given degree exactly
pub fn make_quadrature(cell_type: ReferenceCellType, degree: usize) -> NumericalQuadratureDefinition {
    make_gauss_jacobi_quadrature(cell_type, degree / 2 + 1)
}
