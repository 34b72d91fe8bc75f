#![forbid(unsafe_code)]
//! Graph model for graphj: a string-keyed graph container, a rooted tree view, planar geometry,
//! vertex shapes and edge paths.

pub mod alg;
pub mod geom;
pub mod graph;
pub mod path;
pub mod shape;
pub mod tree;

pub use alg::NotATree;
pub use geom::{Point, Rect, Size, Transform, Vector, point, vector};
pub use graph::{EdgeKey, Graph, GraphOptions};
pub use path::{Path, Segment};
pub use shape::Shape;
pub use tree::Tree;
