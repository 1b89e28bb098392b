//! Pull backs of tabulated values through affine maps

use crate::arrays::Array4D;
use crate::types::{ElementError, MapType};
use nalgebra::{DMatrix, DVector};

/// Pull back one value of a function through an affine map with the given Jacobian
///
/// If `F(x) = Jx + b` and `value` is `phi(F(x))`, the result is the value at `x` of the pull back
/// of `phi` by `F`:
/// - identity: `phi(F(x))`
/// - covariant Piola: `J^T phi(F(x))`
/// - contravariant Piola: `det(J) J^{-1} phi(F(x))`
pub fn pull_back(
    map_type: MapType,
    jacobian: &DMatrix<f64>,
    value: &[f64],
) -> Result<Vec<f64>, ElementError> {
    let tdim = jacobian.nrows();
    match map_type {
        MapType::Identity => Ok(value.to_vec()),
        MapType::CovariantPiola => {
            check_size(value.len(), tdim)?;
            let v = DVector::from_column_slice(value);
            Ok((jacobian.transpose() * v).as_slice().to_vec())
        }
        MapType::ContravariantPiola => {
            check_size(value.len(), tdim)?;
            let det = jacobian.determinant();
            let inverse = jacobian
                .clone()
                .try_inverse()
                .ok_or(ElementError::SingularMatrix)?;
            let v = DVector::from_column_slice(value);
            Ok((inverse * v * det).as_slice().to_vec())
        }
        MapType::DoubleCovariantPiola => Err(ElementError::UnsupportedMapping(map_type)),
    }
}

/// Pull back the values in a table computed at mapped points
///
/// `data` has shape `[nderivs, npoints, dim, value_size]`. Only the values (derivative index 0)
/// are pulled back. Derivatives are not transformed: every derivative block of `data` is
/// discarded and the result has shape `[1, npoints, dim, value_size]`.
pub fn pull_back_tabulation(
    map_type: MapType,
    jacobian: &DMatrix<f64>,
    data: &Array4D<f64>,
) -> Result<Array4D<f64>, ElementError> {
    let [_, npts, dim, value_size] = *data.shape();
    let mut out = Array4D::<f64>::new([1, npts, dim, value_size]);
    for p in 0..npts {
        let values = data.row(0, p);
        let out_values = out.row_mut(0, p);
        for b in 0..dim {
            let pulled = pull_back(
                map_type,
                jacobian,
                &values[b * value_size..(b + 1) * value_size],
            )?;
            out_values[b * value_size..(b + 1) * value_size].copy_from_slice(&pulled);
        }
    }
    Ok(out)
}

fn check_size(found: usize, expected: usize) -> Result<(), ElementError> {
    if found == expected {
        Ok(())
    } else {
        Err(ElementError::DimensionMismatch { expected, found })
    }
}
