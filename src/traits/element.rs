//! Finite element definitions

use crate::arrays::Array4D;
use crate::element::polynomials::derivative_count;
use crate::types::{Continuity, ElementError, MapType, ReferenceCellType};
use nalgebra::DMatrix;

/// A finite element defined on a reference cell
pub trait FiniteElement {
    /// The reference cell type
    fn cell_type(&self) -> ReferenceCellType;

    /// The highest degree polynomial in the element's polynomial set
    fn embedded_superdegree(&self) -> usize;

    /// The shape of the values returned by functions in $\mathcal{V}$.
    ///
    /// If the values are scalar an empty slice is returned.
    fn value_shape(&self) -> &[usize];

    /// The number of values returned.
    ///
    /// If (for example) `value_shape` is `[3, 4]` then `value_size` is $3\times4 = 12$.
    /// If `value_shape` returns an empty array (ie the shape functions are scalar) the
    /// value size is 1.
    fn value_size(&self) -> usize;

    /// The push forward / pull back map to use for this element
    fn map_type(&self) -> MapType;

    /// The continuity of the element between cells
    fn continuity(&self) -> Continuity;

    /// The number of basis functions
    fn dim(&self) -> usize;

    /// Tabulate the values of the basis functions and their derivatives at a set of points
    ///
    /// `points` has one row per point. `data` must have the shape given by
    /// [FiniteElement::tabulate_array_shape]; entry `[d, p, b, c]` is the partial derivative with
    /// index `d` of component `c` of basis function `b` at point `p`.
    fn tabulate(
        &self,
        points: &DMatrix<f64>,
        nderivs: usize,
        data: &mut Array4D<f64>,
    ) -> Result<(), ElementError>;

    /// The DOFs that are associated with a subentity of the reference cell
    fn entity_dofs(&self, entity_dim: usize, entity_number: usize) -> Option<&[usize]>;

    /// The number of DOFs associated with each subentity, indexed by dimension then entity
    fn entity_dof_counts(&self) -> Vec<Vec<usize>>;

    /// The shape of the data to pass to [FiniteElement::tabulate]
    fn tabulate_array_shape(&self, nderivs: usize, npoints: usize) -> [usize; 4] {
        [
            derivative_count(self.cell_type(), nderivs),
            npoints,
            self.dim(),
            self.value_size(),
        ]
    }

    /// Tabulate into a newly allocated array
    fn tabulate_alloc(
        &self,
        points: &DMatrix<f64>,
        nderivs: usize,
    ) -> Result<Array4D<f64>, ElementError> {
        let mut data = Array4D::<f64>::new(self.tabulate_array_shape(nderivs, points.nrows()));
        self.tabulate(points, nderivs, &mut data)?;
        Ok(data)
    }
}
