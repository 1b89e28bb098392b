//! Cell definitions

use crate::types::ReferenceCellType;
use lazy_static::lazy_static;
use nalgebra::DMatrix;
use std::collections::HashMap;

/// The topological dimension of the cell
pub fn dim(cell: ReferenceCellType) -> usize {
    match cell {
        ReferenceCellType::Point => 0,
        ReferenceCellType::Interval => 1,
        ReferenceCellType::Triangle => 2,
        ReferenceCellType::Quadrilateral => 2,
        ReferenceCellType::Tetrahedron => 3,
        ReferenceCellType::Hexahedron => 3,
    }
}
/// Is the cell a simplex?
pub fn is_simplex(cell: ReferenceCellType) -> bool {
    match cell {
        ReferenceCellType::Point => true,
        ReferenceCellType::Interval => true,
        ReferenceCellType::Triangle => true,
        ReferenceCellType::Quadrilateral => false,
        ReferenceCellType::Tetrahedron => true,
        ReferenceCellType::Hexahedron => false,
    }
}

/// The vertices of the reference cell
pub fn vertices(cell: ReferenceCellType) -> Vec<Vec<f64>> {
    match cell {
        ReferenceCellType::Point => vec![],
        ReferenceCellType::Interval => vec![vec![0.0], vec![1.0]],
        ReferenceCellType::Triangle => vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]],
        ReferenceCellType::Quadrilateral => vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
        ],
        ReferenceCellType::Tetrahedron => vec![
            vec![0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ],
        ReferenceCellType::Hexahedron => vec![
            vec![0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![1.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![0.0, 1.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ],
    }
}

/// The midpoint of the cell
pub fn midpoint(cell: ReferenceCellType) -> Vec<f64> {
    match cell {
        ReferenceCellType::Point => vec![],
        ReferenceCellType::Interval => vec![0.5],
        ReferenceCellType::Triangle => vec![1.0 / 3.0; 2],
        ReferenceCellType::Quadrilateral => vec![0.5; 2],
        ReferenceCellType::Tetrahedron => vec![0.25; 3],
        ReferenceCellType::Hexahedron => vec![0.5; 3],
    }
}

/// The volume of the reference cell
pub fn volume(cell: ReferenceCellType) -> f64 {
    match cell {
        ReferenceCellType::Point => 0.0,
        ReferenceCellType::Interval => 1.0,
        ReferenceCellType::Triangle => 0.5,
        ReferenceCellType::Quadrilateral => 1.0,
        ReferenceCellType::Tetrahedron => 1.0 / 6.0,
        ReferenceCellType::Hexahedron => 1.0,
    }
}

/// The edges of the reference cell
pub fn edges(cell: ReferenceCellType) -> Vec<Vec<usize>> {
    match cell {
        ReferenceCellType::Point => vec![],
        ReferenceCellType::Interval => vec![vec![0, 1]],
        ReferenceCellType::Triangle => vec![vec![1, 2], vec![0, 2], vec![0, 1]],
        ReferenceCellType::Quadrilateral => vec![vec![0, 1], vec![0, 2], vec![1, 3], vec![2, 3]],
        ReferenceCellType::Tetrahedron => vec![
            vec![2, 3],
            vec![1, 3],
            vec![1, 2],
            vec![0, 3],
            vec![0, 2],
            vec![0, 1],
        ],
        ReferenceCellType::Hexahedron => vec![
            vec![0, 1],
            vec![0, 2],
            vec![0, 4],
            vec![1, 3],
            vec![1, 5],
            vec![2, 3],
            vec![2, 6],
            vec![3, 7],
            vec![4, 5],
            vec![4, 6],
            vec![5, 7],
            vec![6, 7],
        ],
    }
}

/// The faces of the reference cell
pub fn faces(cell: ReferenceCellType) -> Vec<Vec<usize>> {
    match cell {
        ReferenceCellType::Point => vec![],
        ReferenceCellType::Interval => vec![],
        ReferenceCellType::Triangle => vec![vec![0, 1, 2]],
        ReferenceCellType::Quadrilateral => vec![vec![0, 1, 2, 3]],
        ReferenceCellType::Tetrahedron => {
            vec![vec![1, 2, 3], vec![0, 2, 3], vec![0, 1, 3], vec![0, 1, 2]]
        }
        ReferenceCellType::Hexahedron => vec![
            vec![0, 1, 2, 3],
            vec![0, 1, 4, 5],
            vec![0, 2, 4, 6],
            vec![1, 3, 5, 7],
            vec![2, 3, 6, 7],
            vec![4, 5, 6, 7],
        ],
    }
}

/// The types of the subentities of the reference cell
pub fn entity_types(cell: ReferenceCellType) -> Vec<Vec<ReferenceCellType>> {
    match cell {
        ReferenceCellType::Point => vec![vec![ReferenceCellType::Point], vec![], vec![], vec![]],
        ReferenceCellType::Interval => vec![
            vec![ReferenceCellType::Point; 2],
            vec![ReferenceCellType::Interval],
            vec![],
            vec![],
        ],
        ReferenceCellType::Triangle => vec![
            vec![ReferenceCellType::Point; 3],
            vec![ReferenceCellType::Interval; 3],
            vec![ReferenceCellType::Triangle],
            vec![],
        ],
        ReferenceCellType::Quadrilateral => vec![
            vec![ReferenceCellType::Point; 4],
            vec![ReferenceCellType::Interval; 4],
            vec![ReferenceCellType::Quadrilateral],
            vec![],
        ],
        ReferenceCellType::Tetrahedron => vec![
            vec![ReferenceCellType::Point; 4],
            vec![ReferenceCellType::Interval; 6],
            vec![ReferenceCellType::Triangle; 4],
            vec![ReferenceCellType::Tetrahedron],
        ],
        ReferenceCellType::Hexahedron => vec![
            vec![ReferenceCellType::Point; 8],
            vec![ReferenceCellType::Interval; 12],
            vec![ReferenceCellType::Quadrilateral; 6],
            vec![ReferenceCellType::Hexahedron],
        ],
    }
}

/// The number of subentities of each dimension
pub fn entity_counts(cell: ReferenceCellType) -> Vec<usize> {
    match cell {
        ReferenceCellType::Point => vec![1, 0, 0, 0],
        ReferenceCellType::Interval => vec![2, 1, 0, 0],
        ReferenceCellType::Triangle => vec![3, 3, 1, 0],
        ReferenceCellType::Quadrilateral => vec![4, 4, 1, 0],
        ReferenceCellType::Tetrahedron => vec![4, 6, 4, 1],
        ReferenceCellType::Hexahedron => vec![8, 12, 6, 1],
    }
}

/// The fixed topology and geometry of a reference cell
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    /// Vertex coordinates
    pub vertices: Vec<Vec<f64>>,
    /// Edges, as pairs of vertex indices
    pub edges: Vec<Vec<usize>>,
    /// Faces, as lists of vertex indices
    pub faces: Vec<Vec<usize>>,
    /// The vertices of every subentity, indexed by dimension then entity
    pub entities: Vec<Vec<Vec<usize>>>,
}

impl Topology {
    fn new(cell: ReferenceCellType) -> Self {
        let vertices = vertices(cell);
        let edges = edges(cell);
        let faces = faces(cell);
        let tdim = dim(cell);
        let mut entities = vec![(0..vertices.len()).map(|v| vec![v]).collect::<Vec<_>>()];
        if tdim >= 1 {
            entities.push(edges.clone());
        }
        if tdim >= 2 {
            entities.push(faces.clone());
        }
        if tdim == 3 {
            entities.push(vec![(0..vertices.len()).collect()]);
        }
        Self {
            vertices,
            edges,
            faces,
            entities,
        }
    }
}

lazy_static! {
    static ref TOPOLOGIES: HashMap<ReferenceCellType, Topology> = [
        ReferenceCellType::Point,
        ReferenceCellType::Interval,
        ReferenceCellType::Triangle,
        ReferenceCellType::Quadrilateral,
        ReferenceCellType::Tetrahedron,
        ReferenceCellType::Hexahedron,
    ]
    .into_iter()
    .map(|cell| (cell, Topology::new(cell)))
    .collect();
}

/// The shared topology of a reference cell
pub fn topology(cell: ReferenceCellType) -> &'static Topology {
    &TOPOLOGIES[&cell]
}

/// The origin and axes of a subentity
///
/// A point with local coordinates `s` on the subentity's own reference cell is at
/// `origin + sum_j s[j] * axes[j]`. The axes run from the first vertex of the subentity to
/// vertices 1, 2 (and 3) of a simplex, or vertices 1, 2 (and 4) of a quadrilateral or hexahedron.
pub fn sub_entity_geometry(
    cell: ReferenceCellType,
    entity_dim: usize,
    entity_number: usize,
) -> (Vec<f64>, Vec<Vec<f64>>) {
    let t = topology(cell);
    let entity = &t.entities[entity_dim][entity_number];
    let origin = t.vertices[entity[0]].clone();
    let axis_vertices = if entity.len() == entity_dim + 1 {
        vec![1, 2, 3]
    } else {
        vec![1, 2, 4]
    };
    let axes = axis_vertices[..entity_dim]
        .iter()
        .map(|i| entity[*i])
        .map(|v| {
            t.vertices[v]
                .iter()
                .zip(&origin)
                .map(|(a, b)| a - b)
                .collect()
        })
        .collect();
    (origin, axes)
}

/// Map points from the reference cell of a subentity onto the subentity
pub fn map_to_entity(
    cell_type: ReferenceCellType,
    entity_dim: usize,
    entity_number: usize,
    points: &DMatrix<f64>,
) -> DMatrix<f64> {
    let (origin, axes) = sub_entity_geometry(cell_type, entity_dim, entity_number);
    DMatrix::from_fn(points.nrows(), origin.len(), |i, j| {
        origin[j]
            + axes
                .iter()
                .enumerate()
                .map(|(a, axis)| points[(i, a)] * axis[j])
                .sum::<f64>()
    })
}
