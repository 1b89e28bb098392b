//! Owned multidimensional arrays

use nalgebra::DMatrix;

/// A three-dimensional row-major array
#[derive(Debug, Clone, PartialEq)]
pub struct Array3D<T> {
    data: Vec<T>,
    shape: [usize; 3],
}

impl<T: Clone + Default> Array3D<T> {
    /// Create an array of default values
    pub fn new(shape: [usize; 3]) -> Self {
        Self {
            data: vec![T::default(); shape[0] * shape[1] * shape[2]],
            shape,
        }
    }
}

impl<T> Array3D<T> {
    /// The shape of the array
    pub fn shape(&self) -> &[usize; 3] {
        &self.shape
    }
    /// Get an item
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        if index.iter().zip(&self.shape).all(|(i, s)| i < s) {
            self.data
                .get((index[0] * self.shape[1] + index[1]) * self.shape[2] + index[2])
        } else {
            None
        }
    }
    /// Get a mutable item
    pub fn get_mut(&mut self, index: [usize; 3]) -> Option<&mut T> {
        if index.iter().zip(&self.shape).all(|(i, s)| i < s) {
            self.data
                .get_mut((index[0] * self.shape[1] + index[1]) * self.shape[2] + index[2])
        } else {
            None
        }
    }
    /// The underlying data
    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl Array3D<f64> {
    /// Copy the 2D slice at the given first index into a matrix
    pub fn matrix(&self, index0: usize) -> DMatrix<f64> {
        let size = self.shape[1] * self.shape[2];
        DMatrix::from_row_slice(
            self.shape[1],
            self.shape[2],
            &self.data[index0 * size..(index0 + 1) * size],
        )
    }
}

/// A four-dimensional row-major array
#[derive(Debug, Clone, PartialEq)]
pub struct Array4D<T> {
    data: Vec<T>,
    shape: [usize; 4],
}

impl<T: Clone + Default> Array4D<T> {
    /// Create an array of default values
    pub fn new(shape: [usize; 4]) -> Self {
        Self {
            data: vec![T::default(); shape[0] * shape[1] * shape[2] * shape[3]],
            shape,
        }
    }
}

impl<T> Array4D<T> {
    fn offset(&self, index: [usize; 4]) -> Option<usize> {
        if index.iter().zip(&self.shape).all(|(i, s)| i < s) {
            Some(
                ((index[0] * self.shape[1] + index[1]) * self.shape[2] + index[2]) * self.shape[3]
                    + index[3],
            )
        } else {
            None
        }
    }
    /// The shape of the array
    pub fn shape(&self) -> &[usize; 4] {
        &self.shape
    }
    /// Get an item
    pub fn get(&self, index: [usize; 4]) -> Option<&T> {
        self.offset(index).map(|i| &self.data[i])
    }
    /// Get a mutable item
    pub fn get_mut(&mut self, index: [usize; 4]) -> Option<&mut T> {
        self.offset(index).map(|i| &mut self.data[i])
    }
    /// The values for one derivative at one point
    ///
    /// Component `c` of basis function `b` is at position `b * shape[3] + c`.
    pub fn row(&self, index0: usize, index1: usize) -> &[T] {
        let size = self.shape[2] * self.shape[3];
        let start = (index0 * self.shape[1] + index1) * size;
        &self.data[start..start + size]
    }
    /// Mutable values for one derivative at one point
    pub fn row_mut(&mut self, index0: usize, index1: usize) -> &mut [T] {
        let size = self.shape[2] * self.shape[3];
        let start = (index0 * self.shape[1] + index1) * size;
        &mut self.data[start..start + size]
    }
    /// The underlying data
    pub fn data(&self) -> &[T] {
        &self.data
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_array_3d() {
        let mut arr = Array3D::<usize>::new([2, 3, 4]);
        *arr.get_mut([1, 2, 3]).unwrap() = 7;
        *arr.get_mut([0, 1, 0]).unwrap() = 5;
        assert_eq!(*arr.get([1, 2, 3]).unwrap(), 7);
        assert_eq!(*arr.get([0, 1, 0]).unwrap(), 5);
        assert_eq!(arr.data()[23], 7);
        assert_eq!(arr.data()[4], 5);
        assert!(arr.get([2, 0, 0]).is_none());
        assert!(arr.get([0, 0, 4]).is_none());
    }

    #[test]
    fn test_array_3d_matrix() {
        let mut arr = Array3D::<f64>::new([2, 2, 3]);
        *arr.get_mut([1, 0, 2]).unwrap() = 1.5;
        *arr.get_mut([1, 1, 0]).unwrap() = -2.0;
        let m = arr.matrix(1);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m[(0, 2)], 1.5);
        assert_eq!(m[(1, 0)], -2.0);
        assert_eq!(arr.matrix(0), DMatrix::zeros(2, 3));
    }

    #[test]
    fn test_array_4d() {
        let mut arr = Array4D::<f64>::new([1, 2, 3, 2]);
        *arr.get_mut([0, 1, 2, 1]).unwrap() = 4.0;
        *arr.get_mut([0, 0, 1, 0]).unwrap() = 3.0;
        assert_eq!(*arr.get([0, 1, 2, 1]).unwrap(), 4.0);
        assert_eq!(arr.row(0, 1)[5], 4.0);
        assert_eq!(arr.row(0, 0)[2], 3.0);
        assert_eq!(arr.row(0, 0).len(), 6);
        arr.row_mut(0, 0)[0] = 1.0;
        assert_eq!(*arr.get([0, 0, 0, 0]).unwrap(), 1.0);
        assert!(arr.get([1, 0, 0, 0]).is_none());
    }
}
