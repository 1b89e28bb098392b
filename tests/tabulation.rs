use approx::*;
use nalgebra::DMatrix;
use rayon::prelude::*;
use refelement::arrays::Array4D;
use refelement::element::polynomials::derivative_count;
use refelement::{create, ElementError, FiniteElement, ReferenceCellType};

fn tetrahedron_points(n: usize) -> DMatrix<f64> {
    DMatrix::from_fn(n, 3, |i, j| {
        let t = (i as f64 + 0.5) / n as f64;
        t * [0.2, 0.3, 0.4][j]
    })
}

#[test]
fn test_deterministic() {
    let e = create("N2curl", "tetrahedron", 3).unwrap();
    let points = tetrahedron_points(10);
    let first = e.tabulate_alloc(&points, 2).unwrap();
    let second = e.tabulate_alloc(&points, 2).unwrap();
    assert_eq!(first.data(), second.data());
}

#[test]
fn test_concurrent_tabulation() {
    let e = create("Lagrange", "tetrahedron", 4).unwrap();
    let points = tetrahedron_points(20);
    let expected = e.tabulate_alloc(&points, 1).unwrap();
    let results = (0..32)
        .into_par_iter()
        .map(|_| e.tabulate_alloc(&points, 1).unwrap())
        .collect::<Vec<_>>();
    for result in results {
        assert_eq!(result.data(), expected.data());
    }
}

#[test]
fn test_shape() {
    let e = create("RT", "triangle", 2).unwrap();
    let points = DMatrix::from_row_slice(3, 2, &[0.1, 0.1, 0.5, 0.2, 0.0, 0.9]);
    let data = e.tabulate_alloc(&points, 2).unwrap();
    assert_eq!(
        *data.shape(),
        [derivative_count(ReferenceCellType::Triangle, 2), 3, e.dim(), 2]
    );
    assert_eq!(data.shape()[0], 6);
}

#[test]
fn test_points_outside_cell() {
    let e = create("Lagrange", "triangle", 1).unwrap();
    let points = DMatrix::from_row_slice(1, 2, &[2.0, -1.0]);
    let data = e.tabulate_alloc(&points, 0).unwrap();
    assert_relative_eq!(*data.get([0, 0, 0, 0]).unwrap(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(*data.get([0, 0, 1, 0]).unwrap(), 2.0, epsilon = 1e-12);
    assert_relative_eq!(*data.get([0, 0, 2, 0]).unwrap(), -1.0, epsilon = 1e-12);
}

#[test]
fn test_partition_of_unity() {
    for (family, cell) in [
        ("Lagrange", "quadrilateral"),
        ("Q", "hexahedron"),
        ("P", "tetrahedron"),
    ] {
        let e = create(family, cell, 3).unwrap();
        let points = DMatrix::from_fn(5, e.entity_dof_counts().len() - 1, |i, j| {
            0.1 + 0.03 * (i + j) as f64
        });
        let data = e.tabulate_alloc(&points, 1).unwrap();
        for p in 0..5 {
            assert_relative_eq!(data.row(0, p).iter().sum::<f64>(), 1.0, epsilon = 1e-10);
            for d in 1..data.shape()[0] {
                assert_abs_diff_eq!(data.row(d, p).iter().sum::<f64>(), 0.0, epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn test_dimension_errors() {
    let e = create("N1curl", "triangle", 2).unwrap();
    let points = DMatrix::from_row_slice(2, 2, &[0.1, 0.1, 0.2, 0.3]);

    let mut wrong_value_size = Array4D::<f64>::new([1, 2, e.dim(), 3]);
    assert_eq!(
        e.tabulate(&points, 0, &mut wrong_value_size),
        Err(ElementError::DimensionMismatch {
            expected: 2,
            found: 3
        })
    );

    let mut wrong_derivatives = Array4D::<f64>::new([1, 2, e.dim(), 2]);
    assert!(e.tabulate(&points, 1, &mut wrong_derivatives).is_err());

    let mut data = Array4D::<f64>::new(e.tabulate_array_shape(1, 2));
    assert!(e.tabulate(&points, 1, &mut data).is_ok());

    let three_dimensional = DMatrix::from_row_slice(1, 3, &[0.1, 0.1, 0.1]);
    assert!(e.tabulate_alloc(&three_dimensional, 0).is_err());
}
