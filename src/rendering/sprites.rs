//! Lookup from decoded tile visuals to renderer-owned sprite handles
//!
//! Renderers register one handle per `SpriteKey` and look visuals up through
//! the table, so texture choice never branches on what occupies a cell.

use crate::rendering::decoder::{TileKind, TileVisual};

/// Sprite variant needed to draw a visual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Single-edge stub
    Endpoint,
    /// Two edges on one axis
    Straight,
    /// Two edges on different axes
    Corner,
    /// Three-way junction
    Tee,
    /// Four-way junction
    Cross,
}

impl SpriteKey {
    /// Every key in table order
    pub const ALL: [Self; 5] = [
        Self::Endpoint,
        Self::Straight,
        Self::Corner,
        Self::Tee,
        Self::Cross,
    ];

    const fn slot(self) -> usize {
        self as usize
    }

    /// Sprite variant for a visual, or `None` when nothing is drawn
    pub fn for_visual(visual: &TileVisual) -> Option<Self> {
        match visual.kind {
            TileKind::None => None,
            TileKind::Endpoint => Some(Self::Endpoint),
            TileKind::Straight => Some(Self::Straight),
            TileKind::Corner => Some(Self::Corner),
            TileKind::Junction if visual.arm_count() >= 4 => Some(Self::Cross),
            TileKind::Junction => Some(Self::Tee),
        }
    }
}

/// Table of sprite handles keyed by `SpriteKey`
#[derive(Debug, Clone)]
pub struct SpriteSheet<T> {
    sprites: [Option<T>; 5],
}

impl<T> Default for SpriteSheet<T> {
    fn default() -> Self {
        Self {
            sprites: [None, None, None, None, None],
        }
    }
}

impl<T> SpriteSheet<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the sprite for a key, returning the one it replaces
    pub fn insert(&mut self, key: SpriteKey, sprite: T) -> Option<T> {
        self.sprites
            .get_mut(key.slot())
            .and_then(|entry| entry.replace(sprite))
    }

    /// Sprite registered for a key
    pub fn get(&self, key: SpriteKey) -> Option<&T> {
        self.sprites.get(key.slot()).and_then(Option::as_ref)
    }

    /// Sprite needed to draw a visual
    pub fn lookup(&self, visual: &TileVisual) -> Option<&T> {
        SpriteKey::for_visual(visual).and_then(|key| self.get(key))
    }

    /// Test if every key has a sprite
    pub fn is_complete(&self) -> bool {
        self.sprites.iter().all(Option::is_some)
    }
}
