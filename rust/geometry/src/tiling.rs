// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Square grid tiling of rectangles
//!
//! A `width × length` rectangle (width along x, length along y) is covered by
//! as many `length × length` squares as fit along x. The leftover strip is
//! tiled the same way with the axes swapped, which is the Euclidean algorithm
//! on the two side lengths. Each leftover strip is kept as a single
//! [`TileKind::Remainder`] tile holding its own tiling.

use crate::error::{check_sample_count, Result};
use nalgebra::{Point2, Vector2};

/// Remainders smaller than this fraction of the largest side count as zero
const REMAINDER_TOLERANCE: f64 = 1e-9;

/// Upper bound on the number of squares in one tiling
pub const MAX_GRID_TILES: usize = 100_000;

/// What a tile contains
#[derive(Debug, Clone, PartialEq)]
pub enum TileKind {
    /// A full square grid
    Square,
    /// A leftover strip and the tiles covering it
    Remainder(Vec<GridTile>),
}

/// Axis-aligned tile placed by [`tile_grid`]
#[derive(Debug, Clone, PartialEq)]
pub struct GridTile {
    /// Lower-left corner
    pub origin: Point2<f64>,
    pub size_x: f64,
    pub size_y: f64,
    pub kind: TileKind,
}

impl GridTile {
    fn square(origin: Point2<f64>, size: f64) -> Self {
        Self {
            origin,
            size_x: size,
            size_y: size,
            kind: TileKind::Square,
        }
    }

    pub fn is_square(&self) -> bool {
        matches!(self.kind, TileKind::Square)
    }

    /// Leaf squares in placement order
    pub fn squares(&self) -> Vec<&GridTile> {
        match &self.kind {
            TileKind::Square => vec![self],
            TileKind::Remainder(children) => children.iter().flat_map(GridTile::squares).collect(),
        }
    }

    /// Grid line segments inside the tile, one division every `division`
    /// units (at least one division per square)
    pub fn lines(&self, division: f64) -> Vec<[Point2<f64>; 2]> {
        match &self.kind {
            TileKind::Square => {
                let size = self.size_x;
                let divisions = if division > 0.0 && division.is_finite() {
                    ((size / division).round() as usize).max(1)
                } else {
                    1
                };
                let spacing = size / divisions as f64;
                let o = self.origin;

                let mut lines = Vec::with_capacity(2 * (divisions + 1));
                for k in 0..=divisions {
                    let offset = k as f64 * spacing;
                    lines.push([
                        Point2::new(o.x + offset, o.y),
                        Point2::new(o.x + offset, o.y + size),
                    ]);
                    lines.push([
                        Point2::new(o.x, o.y + offset),
                        Point2::new(o.x + size, o.y + offset),
                    ]);
                }
                lines
            }
            TileKind::Remainder(children) => {
                children.iter().flat_map(|c| c.lines(division)).collect()
            }
        }
    }

    fn translate(&mut self, offset: Vector2<f64>) {
        self.origin += offset;
        if let TileKind::Remainder(children) = &mut self.kind {
            for child in children {
                child.translate(offset);
            }
        }
    }

    /// Mirror across the diagonal `x = y`
    fn transposed(self) -> Self {
        let kind = match self.kind {
            TileKind::Square => TileKind::Square,
            TileKind::Remainder(children) => {
                TileKind::Remainder(children.into_iter().map(GridTile::transposed).collect())
            }
        };
        Self {
            origin: Point2::new(self.origin.y, self.origin.x),
            size_x: self.size_y,
            size_y: self.size_x,
            kind,
        }
    }
}

/// Largest `k` with `k * m <= n`, or 0 when `n < m`.
///
/// Ratios within a relative `1e-9` of an integer round up to it, so
/// `integer_division(0.1, 0.3)` is 3.
pub fn integer_division(m: f64, n: f64) -> usize {
    if !(m > 0.0) || !(n >= m) || !m.is_finite() || !n.is_finite() {
        return 0;
    }
    quotient(n, m) as usize
}

fn quotient(n: f64, m: f64) -> f64 {
    let ratio = n / m;
    let nearest = ratio.round();
    if (ratio - nearest).abs() <= REMAINDER_TOLERANCE * ratio {
        nearest
    } else {
        ratio.floor()
    }
}

/// Tile a rectangle of `width` along x and `length` along y anchored at
/// `origin`.
///
/// Non-positive or non-finite sides give no tiles. The square count grows
/// with `width / length`; tilings of more than [`MAX_GRID_TILES`] squares are
/// rejected before any tile is built.
pub fn tile_grid(length: f64, width: f64, origin: Point2<f64>) -> Result<Vec<GridTile>> {
    if !(length > 0.0 && width > 0.0) || !length.is_finite() || !width.is_finite() {
        return Ok(Vec::new());
    }

    let min_size = REMAINDER_TOLERANCE * length.max(width);
    check_sample_count("grid", square_count(length, width, min_size), MAX_GRID_TILES)?;

    let mut tiles = tile_from_zero(length, width, min_size);
    for tile in &mut tiles {
        tile.translate(origin.coords);
    }
    Ok(tiles)
}

/// Number of squares `tile_from_zero` places, stopping early once past the cap
fn square_count(length: f64, width: f64, min_size: f64) -> f64 {
    let (mut short, mut long) = (length.min(width), length.max(width));
    let mut total = 0.0;
    loop {
        let k = quotient(long, short);
        total += k;
        let rest = long - k * short;
        if rest <= min_size || total > MAX_GRID_TILES as f64 {
            return total;
        }
        (short, long) = (rest, short);
    }
}

fn tile_from_zero(length: f64, width: f64, min_size: f64) -> Vec<GridTile> {
    if length > width {
        return tile_from_zero(width, length, min_size)
            .into_iter()
            .map(GridTile::transposed)
            .collect();
    }

    let k = integer_division(length, width);
    let mut tiles: Vec<GridTile> = (0..k)
        .map(|i| GridTile::square(Point2::new(i as f64 * length, 0.0), length))
        .collect();

    let rest = width - k as f64 * length;
    if rest > min_size {
        let start = k as f64 * length;
        let mut children = tile_from_zero(length, rest, min_size);
        for child in &mut children {
            child.translate(Vector2::new(start, 0.0));
        }
        tiles.push(GridTile {
            origin: Point2::new(start, 0.0),
            size_x: rest,
            size_y: length,
            kind: TileKind::Remainder(children),
        });
    }

    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn area(tiles: &[GridTile]) -> f64 {
        tiles
            .iter()
            .flat_map(GridTile::squares)
            .map(|t| t.size_x * t.size_y)
            .sum()
    }

    #[test]
    fn test_integer_division() {
        assert_eq!(integer_division(3.0, 13.0), 4);
        assert_eq!(integer_division(3.0, 12.0), 4);
        assert_eq!(integer_division(5.0, 3.0), 0);
        assert_eq!(integer_division(0.1, 0.3), 3);
        assert_eq!(integer_division(0.0, 3.0), 0);
    }

    #[test]
    fn test_integer_division_tolerance_is_relative() {
        assert_eq!(integer_division(0.1e-6, 0.3e6), 3_000_000_000_000);
        // 1e-10 short of 1e9 relative, far more than 1e-9 absolute
        assert_eq!(integer_division(1.0, 1e9 * (1.0 - 1e-10)), 1_000_000_000);
        assert_eq!(integer_division(1.0, 1e9 * (1.0 - 1e-8)), 999_999_990);
    }

    #[test]
    fn test_lopsided_rectangle_is_rejected() {
        assert!(matches!(
            tile_grid(1e-6, 1e6, Point2::origin()),
            Err(crate::error::Error::TooManySamples { what: "grid", .. })
        ));
        assert!(tile_grid(1e6, 1e-6, Point2::origin()).is_err());
        assert_eq!(tile_grid(1.0, 1000.0, Point2::origin()).unwrap().len(), 1000);
    }

    #[test]
    fn test_three_by_thirteen() {
        let tiles = tile_grid(3.0, 13.0, Point2::origin()).unwrap();
        assert_eq!(tiles.len(), 5);
        for (i, t) in tiles[..4].iter().enumerate() {
            assert!(t.is_square());
            assert_eq!(t.origin, Point2::new(3.0 * i as f64, 0.0));
            assert_eq!((t.size_x, t.size_y), (3.0, 3.0));
        }

        let rest = &tiles[4];
        assert!(!rest.is_square());
        assert_eq!(rest.origin, Point2::new(12.0, 0.0));
        assert_eq!((rest.size_x, rest.size_y), (1.0, 3.0));

        let unit: Vec<_> = rest.squares().iter().map(|t| t.origin).collect();
        assert_eq!(
            unit,
            vec![
                Point2::new(12.0, 0.0),
                Point2::new(12.0, 1.0),
                Point2::new(12.0, 2.0)
            ]
        );
        assert_relative_eq!(area(&tiles), 39.0);
    }

    #[test]
    fn test_long_side_first_is_transposed() {
        let tiles = tile_grid(13.0, 3.0, Point2::new(1.0, 2.0)).unwrap();
        assert_eq!(tiles.len(), 5);
        assert_eq!(tiles[1].origin, Point2::new(1.0, 5.0));
        assert_eq!((tiles[4].size_x, tiles[4].size_y), (3.0, 1.0));
        assert_eq!(tiles[4].origin, Point2::new(1.0, 14.0));
        assert_relative_eq!(area(&tiles), 39.0);
    }

    #[test]
    fn test_irrational_ratio_terminates_and_covers() {
        let w = 2f64.sqrt();
        let tiles = tile_grid(1.0, w, Point2::origin()).unwrap();
        assert_relative_eq!(area(&tiles), w, epsilon = 1e-6);
    }

    #[test]
    fn test_non_positive_sides_are_empty() {
        assert!(tile_grid(0.0, 3.0, Point2::origin()).unwrap().is_empty());
        assert!(tile_grid(3.0, -1.0, Point2::origin()).unwrap().is_empty());
        assert!(tile_grid(f64::NAN, 1.0, Point2::origin()).unwrap().is_empty());
    }

    #[test]
    fn test_square_lines() {
        let tiles = tile_grid(2.0, 2.0, Point2::origin()).unwrap();
        assert_eq!(tiles.len(), 1);
        let lines = tiles[0].lines(0.5);
        // 4 divisions -> 5 lines each way
        assert_eq!(lines.len(), 10);
        assert!(lines.contains(&[Point2::new(0.5, 0.0), Point2::new(0.5, 2.0)]));
        assert!(lines.contains(&[Point2::new(0.0, 2.0), Point2::new(2.0, 2.0)]));
    }
}
