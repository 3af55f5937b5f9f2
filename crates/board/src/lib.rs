#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![no_std]

//! Rectangle intersection queries for ordering overlapping draws.
//!
//! An [IntersectionBoard](struct.IntersectionBoard.html) manages a set of
//! axis-aligned rectangles across a viewport. Each time a rectangle is
//! added, it is assigned a *group index* that is one larger than the
//! maximum group index among the previously added rectangles it
//! intersects. A renderer uses the group index to serialize overlapping
//! draws while letting non-overlapping ones share a pass.
//!
//! The viewport is divided into 255 by 255 pixel tiles so that tile-local
//! coordinates fit in bytes, and each tile packs its rectangles into
//! SIMD-friendly chunks of eight (see the [tile](tile/index.html) module).
//!
//! ## Example
//!
//! ```
//! use stencil_board::IntersectionBoard;
//!
//! let mut board = IntersectionBoard::new();
//! board.resize_and_reset(300, 300);
//! assert_eq!(board.add_rectangle([0, 0, 100, 100]), 1);
//! assert_eq!(board.add_rectangle([50, 50, 150, 150]), 2);
//! // Does not overlap the others: it can draw in the first group.
//! assert_eq!(board.add_rectangle([200, 200, 250, 250]), 1);
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod tile;

use crate::tile::IntersectionTile;
use alloc::vec::Vec;

/// The size of one tile in pixels.
const TILE_SIZE: i32 = 255;

/// Assigns group indices to rectangles across a variable-sized viewport.
///
/// A board is cheap to reset and is typically reused frame to frame. It is
/// not thread-safe; separate boards can be used from separate threads.
pub struct IntersectionBoard {
    viewport_width: i32,
    viewport_height: i32,
    cols: i32,
    rows: i32,
    tiles: Vec<IntersectionTile>,
}

impl IntersectionBoard {
    pub fn new() -> Self {
        IntersectionBoard {
            viewport_width: 0,
            viewport_height: 0,
            cols: 0,
            rows: 0,
            tiles: Vec::new(),
        }
    }

    /// Resizes the board to a viewport and forgets every rectangle.
    ///
    /// Tile storage is retained where possible, so resetting to the same
    /// size does not reallocate.
    pub fn resize_and_reset(&mut self, viewport_width: u32, viewport_height: u32) {
        self.viewport_width = viewport_width as i32;
        self.viewport_height = viewport_height as i32;
        self.cols = (self.viewport_width + TILE_SIZE - 1) / TILE_SIZE;
        self.rows = (self.viewport_height + TILE_SIZE - 1) / TILE_SIZE;
        let count = (self.cols * self.rows) as usize;
        self.tiles.truncate(count);
        while self.tiles.len() < count {
            self.tiles.push(IntersectionTile::new(0, 0));
        }
        for y in 0..self.rows {
            for x in 0..self.cols {
                self.tiles[(y * self.cols + x) as usize].reset(x * TILE_SIZE, y * TILE_SIZE, 0);
            }
        }
    }

    /// Adds a rectangle and assigns it a group index that is one larger
    /// than the max group index in the set of existing rectangles it
    /// intersects.
    ///
    /// Returns the assigned group index, or 0 if the rectangle is empty,
    /// negative, or entirely offscreen, in which case the board is left
    /// untouched.
    pub fn add_rectangle(&mut self, ltrb: [i32; 4]) -> u16 {
        if self.tiles.is_empty() {
            return 0;
        }
        let [l, t, r, b] = ltrb;
        // Discard empty, negative, or offscreen rectangles.
        if l >= self.viewport_width
            || t >= self.viewport_height
            || r <= 0
            || b <= 0
            || l >= r
            || t >= b
        {
            return 0;
        }

        // Find the tiled row and column that each corner falls on.
        let col0 = (l / TILE_SIZE).clamp(0, self.cols - 1);
        let row0 = (t / TILE_SIZE).clamp(0, self.rows - 1);
        let col1 = ((r - 1) / TILE_SIZE).clamp(0, self.cols - 1);
        let row1 = ((b - 1) / TILE_SIZE).clamp(0, self.rows - 1);
        debug_assert!(col0 <= col1 && row0 <= row1);

        // Accumulate the max group index from each tile the rectangle
        // touches.
        let mut max_group_indices = [0u16; 8];
        for y in row0..=row1 {
            for x in col0..=col1 {
                let tile = &self.tiles[(y * self.cols + x) as usize];
                max_group_indices = tile.find_max_intersecting_group_index(ltrb, max_group_indices);
            }
        }

        let group_index = max_group_indices.iter().copied().fold(0, u16::max) + 1;

        // Add the rectangle and its newly-found group index to each tile
        // it touches.
        for y in row0..=row1 {
            for x in col0..=col1 {
                self.tiles[(y * self.cols + x) as usize].add_rectangle(ltrb, group_index);
            }
        }

        group_index
    }
}

impl Default for IntersectionBoard {
    fn default() -> Self {
        Self::new()
    }
}
