//! Type definitions.
use nalgebra::DMatrix;

/// Definition of a numerical quadrature rule.
#[derive(Debug, Clone)]
pub struct NumericalQuadratureDefinition {
    /// The dimension d of a single point.
    pub dim: usize,

    /// The polynomial degree the rule integrates exactly.
    pub order: usize,

    /// The number of points of the quadrature rule.
    pub npoints: usize,

    /// The weights of the quadrature rule.
    pub weights: Vec<f64>,
    /// The point coordinates of the quadrature rule.
    ///
    /// A single point has the coordinates p_1, p_2, ..., p_d,
    /// with d being the dimension of the point (typically, 1, 2, or 3).
    /// The vector points stores all points in consecutive order.
    /// Hence, the first point starts at position zero, the second point at
    /// position d, and the third point at position 2d.
    pub points: Vec<f64>,
}

impl NumericalQuadratureDefinition {
    /// The points as a matrix with one row per point
    pub fn points_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.npoints, self.dim, &self.points)
    }
}
