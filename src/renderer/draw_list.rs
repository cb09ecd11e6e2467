//! Recorded draw commands for one frame
//!
//! Hosts that batch their drawing (or tests that inspect it) use `DrawList`
//! as the presentation target and replay `commands()` afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Presentation;
use crate::palette::Palette;
use crate::sim::Rect;

/// A single recorded primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Rect { rect: Rect, color: u8 },
    RectOutline { rect: Rect, thickness: f32, color: u8 },
    Circle { center: Vec2, radius: f32, color: u8 },
    CircleOutline { center: Vec2, radius: f32, thickness: f32, color: u8 },
    Line { from: Vec2, to: Vec2, thickness: f32, color: u8 },
    Sprite { sprite: u16, pos: Vec2 },
    Text { text: String, pos: Vec2, color: u8 },
}

impl DrawCommand {
    /// Palette index this command draws with (sprites carry their own colors)
    pub fn color(&self) -> Option<u8> {
        match self {
            DrawCommand::Rect { color, .. }
            | DrawCommand::RectOutline { color, .. }
            | DrawCommand::Circle { color, .. }
            | DrawCommand::CircleOutline { color, .. }
            | DrawCommand::Line { color, .. }
            | DrawCommand::Text { color, .. } => Some(*color),
            DrawCommand::Sprite { .. } => None,
        }
    }
}

/// Frame-sized command buffer; `cls` starts a new frame
#[derive(Debug, Clone)]
pub struct DrawList {
    palette: Palette,
    background: u8,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl DrawList {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            background: 0,
            commands: Vec::with_capacity(256),
            frames: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Palette index of the last clear
    pub fn background(&self) -> u8 {
        self.background
    }

    /// Background color as `0xRRGGBB`
    pub fn background_rgb(&self) -> u32 {
        self.palette.rgb(self.background).unwrap_or(0)
    }

    /// Resolve a command's color through the palette
    pub fn resolve(&self, command: &DrawCommand) -> Option<u32> {
        command.color().and_then(|c| self.palette.rgb(c))
    }

    /// Number of frames begun so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Count sprite draws with the given sheet index
    pub fn sprite_count(&self, sprite: u16) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { sprite: s, .. } if *s == sprite))
            .count()
    }

    /// All text printed this frame
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl Presentation for DrawList {
    fn cls(&mut self, color: u8) {
        self.commands.clear();
        self.background = color;
        self.frames += 1;
    }

    fn rect(&mut self, rect: Rect, color: u8) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn rectb(&mut self, rect: Rect, thickness: f32, color: u8) {
        self.commands.push(DrawCommand::RectOutline {
            rect,
            thickness,
            color,
        });
    }

    fn circ(&mut self, center: Vec2, radius: f32, color: u8) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn circb(&mut self, center: Vec2, radius: f32, thickness: f32, color: u8) {
        self.commands.push(DrawCommand::CircleOutline {
            center,
            radius,
            thickness,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: u8) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            thickness,
            color,
        });
    }

    fn spr(&mut self, sprite: u16, pos: Vec2) {
        self.commands.push(DrawCommand::Sprite { sprite, pos });
    }

    fn print(&mut self, text: &str, pos: Vec2, color: u8) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            color,
        });
    }
}
