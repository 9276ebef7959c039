//! Collision detection and response for axis-aligned rectangles
//!
//! Two policies are provided:
//! - [`validate_movement`]: axis-separated validity (X first, then Y), the
//!   player only moves along axes that stay clear of every floor.
//! - [`resolve_continuous`]: compares the floors hit before and after each
//!   axis move and snaps the player against the nearest newly-contacted edge.
//!
//! Both only consider active floors and never depend on floor order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Floor;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        }
    }

    /// Overlap including shared edges
    #[inline]
    pub fn touches(&self, other: &Rect) -> bool {
        self.right() >= other.left
            && self.left <= other.right()
            && self.bottom() >= other.top
            && self.top <= other.bottom()
    }

    /// Overlap with positive area
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.left
            && self.left < other.right()
            && self.bottom() > other.top
            && self.top < other.bottom()
    }
}

/// Per-axis result of the axis-separated check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMove {
    pub x_valid: bool,
    pub y_valid: bool,
}

impl AxisMove {
    /// Apply only the valid components of `delta` to `pos`
    pub fn apply(self, pos: Vec2, delta: Vec2) -> Movement {
        let mut pos = pos;
        if self.x_valid {
            pos.x += delta.x;
        }
        if self.y_valid {
            pos.y += delta.y;
        }
        Movement {
            pos,
            x_blocked: !self.x_valid,
            y_blocked: !self.y_valid,
        }
    }
}

/// Resolved player position after collision handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub pos: Vec2,
    pub x_blocked: bool,
    pub y_blocked: bool,
}

fn solid(floors: &[Floor]) -> impl Iterator<Item = &Rect> {
    floors.iter().filter(|f| f.active).map(|f| &f.rect)
}

/// Decide which axes of `delta` the player may move along.
///
/// X is tested with the X-displaced rectangle at the original Y. Y is then
/// tested at whichever X survived. Each axis is a single pass over all
/// floors, so floor order cannot change the outcome.
pub fn validate_movement(player: &Rect, delta: Vec2, floors: &[Floor]) -> AxisMove {
    let moved_x = player.translated(delta.x, 0.0);
    let x_valid = !solid(floors).any(|floor| moved_x.touches(floor));

    let base = if x_valid { moved_x } else { *player };
    let moved_y = base.translated(0.0, delta.y);
    let y_valid = !solid(floors).any(|floor| moved_y.touches(floor));

    AxisMove { x_valid, y_valid }
}

/// Floors overlapping `post` that were not already overlapping `pre`
fn newly_hit<'a>(pre: &'a Rect, post: &'a Rect, floors: &'a [Floor]) -> impl Iterator<Item = &'a Rect> {
    solid(floors).filter(move |floor| post.overlaps(floor) && !pre.overlaps(floor))
}

/// Move the player one axis at a time, snapping against contacted edges.
///
/// Floors the player already overlaps before an axis move are ignored for
/// that axis so an embedded player can always work its way out.
pub fn resolve_continuous(player: &Rect, delta: Vec2, floors: &[Floor]) -> Movement {
    let mut rect = *player;
    let mut x_blocked = false;
    let mut y_blocked = false;

    if delta.x != 0.0 {
        let moved = rect.translated(delta.x, 0.0);
        let left = if delta.x > 0.0 {
            newly_hit(&rect, &moved, floors)
                .map(|floor| floor.left)
                .reduce(f32::min)
                .map(|edge| (edge - rect.width).floor())
        } else {
            newly_hit(&rect, &moved, floors)
                .map(|floor| floor.right())
                .reduce(f32::max)
                .map(f32::ceil)
        };
        match left {
            Some(left) => {
                rect.left = left;
                x_blocked = true;
            }
            None => rect = moved,
        }
    }

    if delta.y != 0.0 {
        let moved = rect.translated(0.0, delta.y);
        let top = if delta.y > 0.0 {
            newly_hit(&rect, &moved, floors)
                .map(|floor| floor.top)
                .reduce(f32::min)
                .map(|edge| (edge - rect.height).floor())
        } else {
            newly_hit(&rect, &moved, floors)
                .map(|floor| floor.bottom())
                .reduce(f32::max)
                .map(f32::ceil)
        };
        match top {
            Some(top) => {
                rect.top = top;
                y_blocked = true;
            }
            None => rect = moved,
        }
    }

    Movement {
        pos: Vec2::new(rect.left, rect.top),
        x_blocked,
        y_blocked,
    }
}
