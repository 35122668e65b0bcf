//! Plain-text presentation of a scene.
//!
//! Tokens render as `o`, winning targets as `*`, and a token sitting on a
//! target as `@`. An edge is drawn closed when either adjacent slot walls
//! it, which is exactly when a token cannot cross it; the outer boundary is
//! always closed because nothing ever spreads off the grid.

use anyhow::Result;
use mitosis_core::SLOT_SIZE;
use mitosis_rendering::{Presenter, Scene, TileVisual};

/// Presenter that draws scenes onto stdout.
#[derive(Debug, Default)]
pub(crate) struct TextPresenter;

impl Presenter for TextPresenter {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        print!("{}", render(scene));
        Ok(())
    }
}

pub(crate) fn render(scene: &Scene) -> String {
    let columns = (scene.pixel_size().x as i32 / SLOT_SIZE).max(0) as usize;
    let rows = (scene.pixel_size().y as i32 / SLOT_SIZE).max(0) as usize;
    let tiles = scene.tiles();

    let mut out = String::new();
    for row in 0..rows {
        for column in 0..columns {
            out.push('+');
            let closed = row == 0
                || tiles[row * columns + column].walls.north()
                || tiles[(row - 1) * columns + column].walls.south();
            out.push_str(if closed { "---" } else { "   " });
        }
        out.push_str("+\n");
        for column in 0..columns {
            let closed = column == 0
                || tiles[row * columns + column].walls.west()
                || tiles[row * columns + column - 1].walls.east();
            out.push(if closed { '|' } else { ' ' });
            out.push(' ');
            out.push(glyph(&tiles[row * columns + column]));
            out.push(' ');
        }
        out.push_str("|\n");
    }
    for _ in 0..columns {
        out.push_str("+---");
    }
    out.push_str("+\n");
    out
}

fn glyph(tile: &TileVisual) -> char {
    match (tile.occupied, tile.winning) {
        (true, true) => '@',
        (true, false) => 'o',
        (false, true) => '*',
        (false, false) => ' ',
    }
}
