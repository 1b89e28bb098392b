//! Trait definitions

mod element;

pub use element::FiniteElement;
