//! Reference finite elements
//!
//! Ciarlet elements on reference cells, with tabulation of their basis functions and the
//! matrices that transform their DOFs when an edge or face of the cell is reflected or rotated.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod arrays;
pub mod element;
pub mod quadrature;
pub mod traits;
pub mod types;

pub use element::ciarlet::CiarletElement;
pub use element::{create, create_element};
pub use traits::FiniteElement;
pub use types::{Continuity, ElementError, ElementFamily, MapType, ReferenceCellType};
