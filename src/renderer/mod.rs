//! Presentation port
//!
//! The simulation never touches pixels. It emits palette-indexed draw calls
//! through `Presentation`; the host turns them into whatever it renders with.

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList};

use glam::Vec2;

use crate::sim::Rect;

/// Write-only drawing surface, fantasy-console style
///
/// Screen size is part of the run configuration (`GameState::screen`), not
/// of the surface.
pub trait Presentation {
    /// Clear the screen to `color` and begin a new frame
    fn cls(&mut self, color: u8);
    /// Filled rectangle
    fn rect(&mut self, rect: Rect, color: u8);
    /// Rectangle outline
    fn rectb(&mut self, rect: Rect, thickness: f32, color: u8);
    /// Filled circle
    fn circ(&mut self, center: Vec2, radius: f32, color: u8);
    /// Circle outline
    fn circb(&mut self, center: Vec2, radius: f32, thickness: f32, color: u8);
    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: u8);
    /// Sprite by sheet index
    fn spr(&mut self, sprite: u16, pos: Vec2);
    /// Bitmap text
    fn print(&mut self, text: &str, pos: Vec2, color: u8);
}
