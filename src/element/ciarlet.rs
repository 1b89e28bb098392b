//! Finite element definitions

use crate::arrays::{Array3D, Array4D};
use crate::element::polynomials::{
    legendre_shape, polynomial_count, tabulate_legendre_polynomials,
    tabulate_legendre_polynomials_alloc,
};
use crate::element::reference_cell;
use crate::traits::FiniteElement;
use crate::types::{Continuity, ElementError, ElementFamily, MapType, ReferenceCellType};
use log::debug;
use nalgebra::{DMatrix, DVector};

pub mod crouzeix_raviart;
pub mod lagrange;
pub mod moments;
pub mod nce;
pub mod nedelec;
mod permutations;
pub mod raviart_thomas;
pub mod regge;
pub mod rtc;

/// Interpolation points for each subentity, indexed by dimension then entity
///
/// Each matrix has one row per point.
pub type EntityPoints = [Vec<DMatrix<f64>>; 4];

/// Interpolation matrices for each subentity, indexed by dimension then entity
///
/// Each matrix has one row per DOF. Column `c * npoints + q` holds the weight of component `c` at
/// point `q`.
pub type EntityMatrices = [Vec<DMatrix<f64>>; 4];

/// A Ciarlet element
#[derive(Debug, Clone)]
pub struct CiarletElement {
    family: ElementFamily,
    cell_type: ReferenceCellType,
    degree: usize,
    embedded_superdegree: usize,
    map_type: MapType,
    value_shape: Vec<usize>,
    value_size: usize,
    continuity: Continuity,
    dim: usize,
    coefficients: DMatrix<f64>,
    entity_dofs: [Vec<Vec<usize>>; 4],
    interpolation_points: EntityPoints,
    interpolation_matrices: EntityMatrices,
    base_permutations: Option<Vec<DMatrix<f64>>>,
}

impl CiarletElement {
    /// Create a Ciarlet element
    ///
    /// The rows of `polynomial_coeffs` span the element's polynomial set: column
    /// `c * npolys + l` holds the coefficient of orthonormal polynomial `l` in component `c`.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        family: ElementFamily,
        cell_type: ReferenceCellType,
        degree: usize,
        value_shape: Vec<usize>,
        polynomial_coeffs: DMatrix<f64>,
        interpolation_points: EntityPoints,
        interpolation_matrices: EntityMatrices,
        map_type: MapType,
        continuity: Continuity,
        embedded_superdegree: usize,
    ) -> Result<Self, ElementError> {
        let tdim = reference_cell::dim(cell_type);
        let value_size = value_shape.iter().product::<usize>();
        let pdim = polynomial_count(cell_type, embedded_superdegree);

        let mut dim = 0;
        for (pts_i, mats_i) in interpolation_points
            .iter()
            .zip(&interpolation_matrices)
        {
            if pts_i.len() != mats_i.len() {
                return Err(ElementError::DimensionMismatch {
                    expected: pts_i.len(),
                    found: mats_i.len(),
                });
            }
            for (pts, mat) in pts_i.iter().zip(mats_i) {
                check_size(pts.ncols(), tdim)?;
                check_size(mat.ncols(), pts.nrows() * value_size)?;
                dim += mat.nrows();
            }
        }
        check_size(polynomial_coeffs.nrows(), dim)?;
        check_size(polynomial_coeffs.ncols(), pdim * value_size)?;

        let (new_pts, new_mats) = if continuity == Continuity::Discontinuous {
            make_discontinuous(interpolation_points, interpolation_matrices, tdim, value_size)
        } else {
            (interpolation_points, interpolation_matrices)
        };

        // Compute the dual matrix
        let mut d_matrix = DMatrix::<f64>::zeros(value_size * pdim, dim);
        let mut dof = 0;
        for (pts_i, mats_i) in new_pts.iter().zip(&new_mats) {
            for (pts, mat) in pts_i.iter().zip(mats_i) {
                let npts = pts.nrows();
                if npts > 0 {
                    let table =
                        tabulate_legendre_polynomials_alloc(cell_type, pts, embedded_superdegree, 0)?
                            .matrix(0);
                    for c in 0..value_size {
                        let block = &table * mat.columns(c * npts, npts).transpose();
                        d_matrix
                            .view_mut((c * pdim, dof), (pdim, mat.nrows()))
                            .copy_from(&block);
                    }
                }
                dof += mat.nrows();
            }
        }

        let inverse = (&polynomial_coeffs * &d_matrix)
            .try_inverse()
            .ok_or(ElementError::SingularMatrix)?;
        let coefficients = inverse * &polynomial_coeffs;

        let mut entity_dofs = [vec![], vec![], vec![], vec![]];
        let mut dof = 0;
        for (i, mats_i) in new_mats.iter().enumerate() {
            for mat in mats_i {
                entity_dofs[i].push((dof..dof + mat.nrows()).collect::<Vec<_>>());
                dof += mat.nrows();
            }
        }

        let mut element = CiarletElement {
            family,
            cell_type,
            degree,
            embedded_superdegree,
            map_type,
            value_shape,
            value_size,
            continuity,
            dim,
            coefficients,
            entity_dofs,
            interpolation_points: new_pts,
            interpolation_matrices: new_mats,
            base_permutations: None,
        };
        element.base_permutations = match permutations::base_permutations(&element) {
            Ok(perms) => Some(perms),
            Err(ElementError::UnsupportedPermutations(_)) => None,
            Err(e) => {
                return Err(e);
            }
        };
        debug!(
            "Created {} element of degree {} on {} with {} DOFs",
            family, degree, cell_type, dim
        );
        Ok(element)
    }

    /// The element family
    pub fn family(&self) -> ElementFamily {
        self.family
    }

    /// The polynomial degree
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The interpolation points of each subentity
    pub fn interpolation_points(&self) -> &EntityPoints {
        &self.interpolation_points
    }

    /// The interpolation matrices of each subentity
    pub fn interpolation_matrices(&self) -> &EntityMatrices {
        &self.interpolation_matrices
    }

    /// The matrices that permute the DOFs when a subentity is reflected or rotated
    ///
    /// Edges come first, one reflection each. Then each face contributes its rotation followed
    /// by its reflection.
    pub fn base_permutations(&self) -> Result<&[DMatrix<f64>], ElementError> {
        match &self.base_permutations {
            Some(perms) => Ok(perms),
            None => Err(ElementError::UnsupportedPermutations(self.family)),
        }
    }

    /// Apply a base permutation to a vector of DOF values in place
    pub fn apply_base_permutation(
        &self,
        index: usize,
        dofs: &mut [f64],
    ) -> Result<(), ElementError> {
        let perms = self.base_permutations()?;
        let perm = perms.get(index).ok_or(ElementError::DimensionMismatch {
            expected: perms.len(),
            found: index,
        })?;
        check_size(dofs.len(), self.dim)?;
        let result = perm * DVector::from_column_slice(dofs);
        dofs.copy_from_slice(result.as_slice());
        Ok(())
    }
}

impl FiniteElement for CiarletElement {
    fn value_shape(&self) -> &[usize] {
        &self.value_shape
    }
    fn value_size(&self) -> usize {
        self.value_size
    }
    fn map_type(&self) -> MapType {
        self.map_type
    }
    fn cell_type(&self) -> ReferenceCellType {
        self.cell_type
    }
    fn embedded_superdegree(&self) -> usize {
        self.embedded_superdegree
    }
    fn continuity(&self) -> Continuity {
        self.continuity
    }
    fn dim(&self) -> usize {
        self.dim
    }
    fn tabulate(
        &self,
        points: &DMatrix<f64>,
        nderivs: usize,
        data: &mut Array4D<f64>,
    ) -> Result<(), ElementError> {
        let shape = self.tabulate_array_shape(nderivs, points.nrows());
        for (expected, found) in shape.iter().zip(data.shape()) {
            check_size(*found, *expected)?;
        }
        let mut table = Array3D::<f64>::new(legendre_shape(
            self.cell_type,
            points,
            self.embedded_superdegree,
            nderivs,
        ));
        tabulate_legendre_polynomials(
            self.cell_type,
            points,
            self.embedded_superdegree,
            nderivs,
            &mut table,
        )?;

        let pdim = table.shape()[1];
        for d in 0..table.shape()[0] {
            let polys = table.matrix(d);
            for j in 0..self.value_size {
                let values = self.coefficients.columns(j * pdim, pdim) * &polys;
                for p in 0..points.nrows() {
                    let row = data.row_mut(d, p);
                    for b in 0..self.dim {
                        row[b * self.value_size + j] = values[(b, p)];
                    }
                }
            }
        }
        Ok(())
    }
    fn entity_dofs(&self, entity_dim: usize, entity_number: usize) -> Option<&[usize]> {
        if entity_dim < 4 && entity_number < self.entity_dofs[entity_dim].len() {
            Some(&self.entity_dofs[entity_dim][entity_number])
        } else {
            None
        }
    }
    fn entity_dof_counts(&self) -> Vec<Vec<usize>> {
        let tdim = reference_cell::dim(self.cell_type);
        self.entity_dofs[..tdim + 1]
            .iter()
            .map(|dofs_i| dofs_i.iter().map(|dofs| dofs.len()).collect())
            .collect()
    }
}

fn check_size(found: usize, expected: usize) -> Result<(), ElementError> {
    if found == expected {
        Ok(())
    } else {
        Err(ElementError::DimensionMismatch { expected, found })
    }
}

/// Move every interpolation point and DOF to the interior of the cell
fn make_discontinuous(
    points: EntityPoints,
    matrices: EntityMatrices,
    tdim: usize,
    value_size: usize,
) -> (EntityPoints, EntityMatrices) {
    let npts = points.iter().flatten().map(|p| p.nrows()).sum::<usize>();
    let ndofs = matrices.iter().flatten().map(|m| m.nrows()).sum::<usize>();

    let mut new_pts: EntityPoints = [vec![], vec![], vec![], vec![]];
    let mut new_mats: EntityMatrices = [vec![], vec![], vec![], vec![]];
    for (i, pts_i) in points.iter().enumerate().take(tdim) {
        for _ in pts_i {
            new_pts[i].push(DMatrix::zeros(0, tdim));
            new_mats[i].push(DMatrix::zeros(0, 0));
        }
    }

    let mut all_pts = DMatrix::<f64>::zeros(npts, tdim);
    let mut all_mat = DMatrix::<f64>::zeros(ndofs, value_size * npts);
    let mut pn = 0;
    let mut dn = 0;
    for (pts, mat) in points.iter().flatten().zip(matrices.iter().flatten()) {
        let n = pts.nrows();
        all_pts.rows_mut(pn, n).copy_from(pts);
        for c in 0..value_size {
            all_mat
                .view_mut((dn, c * npts + pn), (mat.nrows(), n))
                .copy_from(&mat.columns(c * n, n));
        }
        pn += n;
        dn += mat.nrows();
    }
    new_pts[tdim].push(all_pts);
    new_mats[tdim].push(all_mat);
    (new_pts, new_mats)
}
