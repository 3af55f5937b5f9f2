#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]
#![no_std]

//! Raw path storage for the stencil renderer crates.
//!
//! A [RawPath](struct.RawPath.html) is a compact verb buffer plus point
//! buffer. It is the input format consumed by the triangulator in
//! `stencil_tessellation`, which iterates over it as a sequence of
//! [PathEvent](enum.PathEvent.html)s.
//!
//! This crate is reexported in `stencil`.
//!
//! # Examples
//!
//! ```
//! use stencil_path::RawPath;
//! use stencil_path::math::point;
//!
//! let mut builder = RawPath::builder();
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(1.0, 2.0));
//! builder.line_to(point(2.0, 0.0));
//! builder.close();
//! let path = builder.build();
//!
//! for event in path.iter() {
//!     println!("{:?}", event);
//! }
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub use euclid;

mod events;
mod path;

pub use crate::events::PathEvent;
pub use crate::path::{Builder, Iter, RawPath, Verb};

pub mod math {
    //! f32 euclid aliases used by all of the stencil crates.

    use euclid;

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Alias for ```euclid::default::Size2D<f32>```.
    pub type Size = euclid::default::Size2D<f32>;

    /// Alias for ```euclid::default::Box2D<f32>```
    pub type Box2D = euclid::default::Box2D<f32>;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }
}

/// The fill rule defines how to determine what is inside and what is outside
/// of a shape.
///
/// `EvenOdd` and `NonZero` are the rules from the SVG specification.
/// `Clockwise` only fills the regions whose accumulated winding is positive,
/// which renderers use for clipping and for shapes that are known to be
/// oriented consistently.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FillRule {
    EvenOdd,
    NonZero,
    Clockwise,
}

impl FillRule {
    #[inline]
    pub fn is_in(self, winding_number: i32) -> bool {
        match self {
            FillRule::EvenOdd => winding_number % 2 != 0,
            FillRule::NonZero => winding_number != 0,
            FillRule::Clockwise => winding_number > 0,
        }
    }

    #[inline]
    pub fn is_out(self, winding_number: i32) -> bool {
        !self.is_in(winding_number)
    }
}

#[test]
fn fill_rules() {
    assert!(FillRule::EvenOdd.is_in(1));
    assert!(FillRule::EvenOdd.is_out(2));
    assert!(FillRule::EvenOdd.is_in(-3));
    assert!(FillRule::NonZero.is_in(2));
    assert!(FillRule::NonZero.is_in(-2));
    assert!(FillRule::NonZero.is_out(0));
    assert!(FillRule::Clockwise.is_in(2));
    assert!(FillRule::Clockwise.is_out(-1));
    assert!(FillRule::Clockwise.is_out(0));
}
