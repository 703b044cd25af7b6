//! Sprites and the display surface seam.

use flyby_core::{ElementContent, Viewport};
use glam::Vec2;

use crate::id::ElementId;
use crate::pool::Member;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Draw data for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sprite {
    pub id: ElementId,
    pub content: ElementContent,
    /// Screen position in px.
    pub position: Vec2,
    pub depth: f32,
    /// Degrees.
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Larger draws on top.
    pub stacking: i32,
}

impl Sprite {
    /// Snapshot of a pool member's current state.
    pub fn of(member: &Member) -> Self {
        let state = member.flight.state();
        Self {
            id: member.element.id,
            content: member.element.content,
            position: state.position,
            depth: state.depth,
            rotation: state.rotation,
            scale: state.scale,
            opacity: state.opacity,
            stacking: state.stacking_order(),
        }
    }
}

/// Where sprites end up.
///
/// [`ChaosField::render`](crate::ChaosField::render) calls `begin_frame`, then
/// `draw` once per sprite from back to front, then `end_frame`.
pub trait DisplaySurface {
    /// Called before the first sprite of a frame.
    fn begin_frame(&mut self, viewport: Viewport) {
        let _ = viewport;
    }

    /// Draws one sprite.
    fn draw(&mut self, sprite: &Sprite);

    /// Called after the last sprite of a frame.
    fn end_frame(&mut self) {}
}

/// A rendered frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Host time in ms.
    pub time: f64,
    pub viewport: Viewport,
    pub sprites: Vec<Sprite>,
}

/// Surface that keeps every frame in memory.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    frames: Vec<Frame>,
    time: f64,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timestamp stamped on the next frame.
    pub fn at(&mut self, time: f64) -> &mut Self {
        self.time = time;
        self
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Removes and returns the recorded frames.
    pub fn take(&mut self) -> Vec<Frame> {
        std::mem::take(&mut self.frames)
    }
}

impl DisplaySurface for FrameRecorder {
    fn begin_frame(&mut self, viewport: Viewport) {
        self.frames.push(Frame {
            time: self.time,
            viewport,
            sprites: Vec::new(),
        });
    }

    fn draw(&mut self, sprite: &Sprite) {
        if let Some(frame) = self.frames.last_mut() {
            frame.sprites.push(*sprite);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyby_core::Glyph;

    fn sprite(serial: u32, depth: f32) -> Sprite {
        Sprite {
            id: ElementId { epoch: 0, serial },
            content: ElementContent::Emoji(Glyph::Clap),
            position: Vec2::ZERO,
            depth,
            rotation: 0.0,
            scale: 1.0,
            opacity: 1.0,
            stacking: 0,
        }
    }

    #[test]
    fn test_recorder_collects_frames() {
        let mut recorder = FrameRecorder::new();
        recorder.at(16.0).begin_frame(Viewport::default());
        recorder.draw(&sprite(0, -500.0));
        recorder.draw(&sprite(1, -100.0));
        recorder.end_frame();
        recorder.at(32.0).begin_frame(Viewport::default());
        recorder.end_frame();

        assert_eq!(recorder.frames().len(), 2);
        assert_eq!(recorder.frames()[0].time, 16.0);
        assert_eq!(recorder.frames()[0].sprites.len(), 2);
        assert!(recorder.last().unwrap().sprites.is_empty());
        assert_eq!(recorder.take().len(), 2);
        assert!(recorder.frames().is_empty());
    }

    #[test]
    fn test_draw_before_begin_is_ignored() {
        let mut recorder = FrameRecorder::new();
        recorder.draw(&sprite(0, 0.0));
        assert!(recorder.frames().is_empty());
    }
}
