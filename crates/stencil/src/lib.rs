#![deny(bare_trait_objects)]
#![no_std]

//! The algorithmic cores of a stencil-based 2D vector graphics renderer.
//!
//! This meta-crate reexports the following sub-crates for convenience:
//!
//! * **stencil_path** - Raw path storage and iteration.
//! * **stencil_tessellation** - Triangulation of filled paths into vertex
//!   streams, including the grout triangles that stitch an outer curve
//!   pass to the inner triangulation.
//! * **stencil_board** - The rectangle intersection board used to order
//!   overlapping draws into groups.
//!
//! Each `stencil_<name>` crate is reexported as a `<name>` module. For
//! example, `stencil_tessellation::Triangulator` is also available as
//! `stencil::tessellation::Triangulator`.
//!
//! # Examples
//!
//! ```
//! use stencil::math::point;
//! use stencil::path::RawPath;
//! use stencil::tessellation::{FillOptions, TriangleVertex, Triangulator};
//!
//! let mut builder = RawPath::builder();
//! builder.move_to(point(10.0, 10.0));
//! builder.quadratic_bezier_to(point(50.0, 90.0), point(90.0, 10.0));
//! builder.close();
//! let path = builder.build();
//!
//! let mut vertices: Vec<TriangleVertex> = Vec::new();
//! let mut triangulator = Triangulator::new();
//! triangulator
//!     .triangulate(&path, &FillOptions::default(), &mut vertices)
//!     .unwrap();
//! assert!(vertices.len() % 3 == 0);
//! ```

pub use stencil_board as board;
pub use stencil_path as path;
pub use stencil_tessellation as tessellation;

pub use crate::path::math;
pub use crate::path::FillRule;
