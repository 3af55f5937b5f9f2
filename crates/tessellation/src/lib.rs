#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]
#![allow(dead_code)]
#![no_std]

//! Triangulation of filled 2D paths.
//!
//! ## Overview
//!
//! The most interesting type of this crate is
//! [Triangulator](struct.Triangulator.html). It converts arbitrary filled
//! paths, curves, self-intersections, holes and all, into a plain triangle
//! stream that a GPU can rasterize, applying one of the
//! [fill rules](enum.FillRule.html) to decide which regions are inside.
//!
//! The output goes through the
//! [GeometrySink](geometry_builder/trait.GeometrySink.html) trait (see the
//! [geometry_builder](geometry_builder/index.html) module), so the triangles
//! can be written directly into whatever vertex storage the renderer uses.
//!
//! Renderers that draw curves in a separate pass can additionally ask for
//! [grout triangles](grout/index.html), which make the inner triangulation
//! and an outer curve pass add up to the coverage of a classic
//! winding-rule fan.
//!
//! ## Example
//!
//! ```
//! use stencil_path::RawPath;
//! use stencil_path::math::point;
//! use stencil_tessellation::{FillOptions, TriangleVertex, Triangulator};
//!
//! // A self-intersecting bowtie.
//! let mut builder = RawPath::builder();
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(1.0, 1.0));
//! builder.line_to(point(1.0, 0.0));
//! builder.line_to(point(0.0, 1.0));
//! builder.close();
//! let path = builder.build();
//!
//! let mut buffer: Vec<TriangleVertex> = Vec::new();
//! let mut triangulator = Triangulator::new();
//! let result = triangulator
//!     .triangulate(&path, &FillOptions::even_odd(), &mut buffer)
//!     .unwrap();
//! println!("{} vertices", result.vertex_count);
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use stencil_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
mod fill;
mod flatten;
pub mod geometry_builder;
pub mod grout;
mod mesh;

#[cfg(test)]
mod fill_tests;

pub use crate::path::math;

#[doc(inline)]
pub use crate::error::*;

#[doc(inline)]
pub use crate::fill::{FillOptions, Triangulation, Triangulator};

#[doc(inline)]
pub use crate::geometry_builder::{GeometrySink, NoOutput, TriangleVertex};

#[doc(inline)]
pub use crate::grout::GroutTriangleList;

pub use crate::path::FillRule;
