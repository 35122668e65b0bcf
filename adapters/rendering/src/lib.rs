#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Mitosis adapters.
//!
//! A backend draws from a [`Scene`]: a read-only, pixel-space description of
//! every slot tile, its wall edges, its token, and its winning tint. Scenes
//! are rebuilt from field queries each frame; nothing here can mutate the
//! simulation. Texture ownership lives entirely in the backend, never in
//! the core grid state.

use anyhow::Result;
use glam::Vec2;
use mitosis_core::{CellCoord, Walls, CELL_SIZE, SLOT_SIZE, WALL_WIDTH};
use mitosis_world::{query, Field};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a fully opaque color from byte RGB channels.
    #[must_use]
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::translucent(red, green, blue, u8::MAX)
    }

    /// Creates a color from byte RGBA channels.
    #[must_use]
    pub const fn translucent(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: alpha as f32 / 255.0,
        }
    }
}

/// Board backdrop behind the tiles.
pub const BACKGROUND: Color = Color::opaque(255, 255, 255);
/// Tint applied to winning target tiles.
pub const TILE_WINNING: Color = Color::opaque(245, 245, 245);
/// Tint applied to ordinary tiles, translucent dark red.
pub const TILE_REGULAR: Color = Color::translucent(139, 0, 0, 200);
/// Color of wall segments along tile edges.
pub const WALL: Color = Color::opaque(40, 40, 40);
/// Color of an occupying token.
pub const TOKEN: Color = Color::opaque(70, 160, 70);

/// Pixel-space description of one slot tile, ready to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileVisual {
    /// Grid cell the tile represents.
    pub cell: CellCoord,
    /// Top-left corner of the tile in field pixel space.
    pub origin: Vec2,
    /// Wall edges to draw along the tile border.
    pub walls: Walls,
    /// Whether a token occupies the tile.
    pub occupied: bool,
    /// Whether the tile is a winning target.
    pub winning: bool,
}

impl TileVisual {
    /// Tint for the tile backdrop.
    #[must_use]
    pub const fn tint(&self) -> Color {
        if self.winning {
            TILE_WINNING
        } else {
            TILE_REGULAR
        }
    }

    /// Top-left corner and size of the full tile square.
    #[must_use]
    pub fn tile_rect(&self) -> (Vec2, Vec2) {
        (self.origin, Vec2::splat(SLOT_SIZE as f32))
    }

    /// Top-left corner and size of the interior rectangle where a token is
    /// drawn, inset from the tile by the wall band.
    #[must_use]
    pub fn token_rect(&self) -> (Vec2, Vec2) {
        (
            self.origin + Vec2::splat(WALL_WIDTH as f32),
            Vec2::splat(CELL_SIZE as f32),
        )
    }
}

/// Read-only, pixel-space description of a whole field.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    tiles: Vec<TileVisual>,
    pixel_size: Vec2,
}

impl Scene {
    /// Builds a scene from the current field state, row-major.
    #[must_use]
    pub fn from_field(field: &Field) -> Self {
        let tiles = query::slots(field)
            .map(|(cell, slot)| TileVisual {
                cell,
                origin: Vec2::new(
                    (cell.column() as i32 * SLOT_SIZE) as f32,
                    (cell.row() as i32 * SLOT_SIZE) as f32,
                ),
                walls: slot.walls(),
                occupied: slot.occupied(),
                winning: slot.winning(),
            })
            .collect();
        Self {
            tiles,
            pixel_size: Vec2::new(
                query::pixel_width(field) as f32,
                query::pixel_height(field) as f32,
            ),
        }
    }

    /// Tiles composing the scene in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[TileVisual] {
        &self.tiles
    }

    /// Width and height of the field in pixels.
    #[must_use]
    pub const fn pixel_size(&self) -> Vec2 {
        self.pixel_size
    }
}

/// Backend seam: anything that can put a scene in front of the player.
pub trait Presenter {
    /// Presents the provided scene, returning an error when the backend
    /// cannot complete the frame.
    fn present(&mut self, scene: &Scene) -> Result<()>;
}
