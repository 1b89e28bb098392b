//! Symmetries of the subentities of reference cells
//!
//! Each edge has one generating symmetry (a reflection). Each face has two: a rotation then a
//! reflection. The generators are fixed tables, built once.

use crate::element::reference_cell;
use crate::types::ReferenceCellType;
use lazy_static::lazy_static;
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;

/// The kind of a generating symmetry
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SymmetryKind {
    /// A reflection, of order 2
    Reflection,
    /// A rotation, of order 3 on a triangle and 4 on a quadrilateral
    Rotation,
}

/// An affine map `x -> Jx + b`
#[derive(Debug, Clone, PartialEq)]
pub struct AffineMap {
    jacobian: DMatrix<f64>,
    offset: DVector<f64>,
}

impl AffineMap {
    /// Create a map from the rows of its Jacobian and its offset
    pub fn new(jacobian_rows: &[&[f64]], offset: &[f64]) -> Self {
        let dim = offset.len();
        Self {
            jacobian: DMatrix::from_fn(dim, dim, |i, j| jacobian_rows[i][j]),
            offset: DVector::from_column_slice(offset),
        }
    }
    /// The Jacobian of the map
    pub fn jacobian(&self) -> &DMatrix<f64> {
        &self.jacobian
    }
    /// The dimension of the space the map acts on
    pub fn dim(&self) -> usize {
        self.offset.len()
    }
    /// Map a point
    pub fn map_point(&self, point: &[f64]) -> Vec<f64> {
        (0..self.dim())
            .map(|i| {
                self.offset[i]
                    + point
                        .iter()
                        .enumerate()
                        .map(|(j, x)| self.jacobian[(i, j)] * x)
                        .sum::<f64>()
            })
            .collect()
    }
    /// Map a set of points stored one per row
    pub fn map_points(&self, points: &DMatrix<f64>) -> DMatrix<f64> {
        let mut mapped = points * self.jacobian.transpose();
        for mut row in mapped.row_iter_mut() {
            row += self.offset.transpose();
        }
        mapped
    }
}

/// A generating symmetry of a reference entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySymmetry {
    kind: SymmetryKind,
    entity_type: ReferenceCellType,
    order: usize,
    vertex_map: Vec<usize>,
    map: AffineMap,
}

impl EntitySymmetry {
    /// The kind of symmetry
    pub fn kind(&self) -> SymmetryKind {
        self.kind
    }
    /// The type of entity the symmetry acts on
    pub fn entity_type(&self) -> ReferenceCellType {
        self.entity_type
    }
    /// The smallest k > 0 such that applying the symmetry k times is the identity
    pub fn order(&self) -> usize {
        self.order
    }
    /// The image of each vertex of the entity
    ///
    /// Vertex `i` is mapped to vertex `vertex_map()[i]`.
    pub fn vertex_map(&self) -> &[usize] {
        &self.vertex_map
    }
    /// The symmetry as an affine map on the entity's local coordinates
    pub fn map(&self) -> &AffineMap {
        &self.map
    }
    /// Map a point in local coordinates of the entity
    pub fn map_point(&self, point: &[f64]) -> Vec<f64> {
        self.map.map_point(point)
    }
}

lazy_static! {
    static ref GENERATORS: HashMap<ReferenceCellType, Vec<EntitySymmetry>> = HashMap::from([
        (
            ReferenceCellType::Interval,
            vec![EntitySymmetry {
                kind: SymmetryKind::Reflection,
                entity_type: ReferenceCellType::Interval,
                order: 2,
                vertex_map: vec![1, 0],
                map: AffineMap::new(&[&[-1.0]], &[1.0]),
            }],
        ),
        (
            ReferenceCellType::Triangle,
            vec![
                EntitySymmetry {
                    kind: SymmetryKind::Rotation,
                    entity_type: ReferenceCellType::Triangle,
                    order: 3,
                    vertex_map: vec![1, 2, 0],
                    map: AffineMap::new(&[&[-1.0, -1.0], &[1.0, 0.0]], &[1.0, 0.0]),
                },
                EntitySymmetry {
                    kind: SymmetryKind::Reflection,
                    entity_type: ReferenceCellType::Triangle,
                    order: 2,
                    vertex_map: vec![0, 2, 1],
                    map: AffineMap::new(&[&[0.0, 1.0], &[1.0, 0.0]], &[0.0, 0.0]),
                },
            ],
        ),
        (
            ReferenceCellType::Quadrilateral,
            vec![
                EntitySymmetry {
                    kind: SymmetryKind::Rotation,
                    entity_type: ReferenceCellType::Quadrilateral,
                    order: 4,
                    vertex_map: vec![1, 3, 0, 2],
                    map: AffineMap::new(&[&[0.0, -1.0], &[1.0, 0.0]], &[1.0, 0.0]),
                },
                EntitySymmetry {
                    kind: SymmetryKind::Reflection,
                    entity_type: ReferenceCellType::Quadrilateral,
                    order: 2,
                    vertex_map: vec![0, 2, 1, 3],
                    map: AffineMap::new(&[&[0.0, 1.0], &[1.0, 0.0]], &[0.0, 0.0]),
                },
            ],
        ),
    ]);
}

/// The generating symmetries of a reference entity
///
/// Points, tetrahedra and hexahedra have no generators here.
pub fn generators(entity_type: ReferenceCellType) -> &'static [EntitySymmetry] {
    match GENERATORS.get(&entity_type) {
        Some(g) => g.as_slice(),
        None => &[],
    }
}

/// The generating symmetries of a subentity of a cell
///
/// Only edges and faces that are not the whole cell have symmetries.
pub fn symmetries(
    cell_type: ReferenceCellType,
    entity_dim: usize,
    entity_number: usize,
) -> &'static [EntitySymmetry] {
    if entity_dim == 0 || entity_dim >= reference_cell::dim(cell_type) {
        return &[];
    }
    match reference_cell::entity_types(cell_type)[entity_dim].get(entity_number) {
        Some(entity_type) => generators(*entity_type),
        None => &[],
    }
}

/// Every symmetry of a reference entity, as a map on its vertices
///
/// The identity is first.
pub fn symmetry_group(entity_type: ReferenceCellType) -> Vec<Vec<usize>> {
    let nvertices = reference_cell::entity_counts(entity_type)[0];
    let mut group = vec![(0..nvertices).collect::<Vec<_>>()];
    let mut i = 0;
    while i < group.len() {
        for g in generators(entity_type) {
            let composed = group[i].iter().map(|v| g.vertex_map[*v]).collect::<Vec<_>>();
            if !group.contains(&composed) {
                group.push(composed);
            }
        }
        i += 1;
    }
    group
}

/// A map of the whole reference cell that acts as a generating symmetry on entity 0 of a dimension
///
/// The map sends entity 0 of dimension `entity_dim` to itself, and restricted to that entity it
/// is the generator of the given kind.
pub fn reference_entity_map(
    cell_type: ReferenceCellType,
    entity_dim: usize,
    kind: SymmetryKind,
) -> Option<AffineMap> {
    match (cell_type, entity_dim, kind) {
        (ReferenceCellType::Triangle, 1, SymmetryKind::Reflection) => Some(AffineMap::new(
            &[&[0.0, 1.0], &[1.0, 0.0]],
            &[0.0, 0.0],
        )),
        (ReferenceCellType::Quadrilateral, 1, SymmetryKind::Reflection) => Some(AffineMap::new(
            &[&[-1.0, 0.0], &[0.0, 1.0]],
            &[1.0, 0.0],
        )),
        (ReferenceCellType::Tetrahedron, 1, SymmetryKind::Reflection)
        | (ReferenceCellType::Tetrahedron, 2, SymmetryKind::Reflection) => Some(AffineMap::new(
            &[&[1.0, 0.0, 0.0], &[0.0, 0.0, 1.0], &[0.0, 1.0, 0.0]],
            &[0.0, 0.0, 0.0],
        )),
        (ReferenceCellType::Tetrahedron, 2, SymmetryKind::Rotation) => Some(AffineMap::new(
            &[&[0.0, 0.0, 1.0], &[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]],
            &[0.0, 0.0, 0.0],
        )),
        (ReferenceCellType::Hexahedron, 1, SymmetryKind::Reflection) => Some(AffineMap::new(
            &[&[-1.0, 0.0, 0.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]],
            &[1.0, 0.0, 0.0],
        )),
        (ReferenceCellType::Hexahedron, 2, SymmetryKind::Rotation) => Some(AffineMap::new(
            &[&[0.0, -1.0, 0.0], &[1.0, 0.0, 0.0], &[0.0, 0.0, 1.0]],
            &[1.0, 0.0, 0.0],
        )),
        (ReferenceCellType::Hexahedron, 2, SymmetryKind::Reflection) => Some(AffineMap::new(
            &[&[0.0, 1.0, 0.0], &[1.0, 0.0, 0.0], &[0.0, 0.0, 1.0]],
            &[0.0, 0.0, 0.0],
        )),
        _ => None,
    }
}
