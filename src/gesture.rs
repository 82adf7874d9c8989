//! Gesture recognition shared by several puzzles
//!
//! Two small protocols: a drag-based swipe detector with a bounded
//! distance/time window, and a two-threshold oscillation counter used for
//! cheek puffing and device shaking.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Cardinal swipe direction in scene space (y points up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Unit vector pointing the way of the swipe
    pub fn vector(self) -> Vec2 {
        match self {
            SwipeDirection::Up => Vec2::Y,
            SwipeDirection::Down => Vec2::NEG_Y,
            SwipeDirection::Left => Vec2::NEG_X,
            SwipeDirection::Right => Vec2::X,
        }
    }
}

/// Thresholds a drag has to beat to count as a swipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeRules {
    /// Scene points
    pub min_distance: f32,
    /// Scene points per second
    pub min_speed: f32,
    /// Seconds an armed cursor waits for the drag to cover `min_distance`
    pub window: f32,
}

impl Default for SwipeRules {
    fn default() -> Self {
        Self {
            min_distance: 50.0,
            min_speed: 400.0,
            window: 0.5,
        }
    }
}

/// Share of the displacement an axis needs before it counts
const AXIS_SHARE: f32 = 0.4;

/// Classify a displacement covered in `elapsed` seconds.
///
/// Each axis counts when it carries more than 40% of the distance. When
/// both do, the larger component wins, ties going to the horizontal one.
pub fn classify(delta: Vec2, elapsed: f32, rules: &SwipeRules) -> Option<SwipeDirection> {
    let distance = delta.length();
    if distance <= rules.min_distance {
        return None;
    }
    let speed = if elapsed > 0.0 {
        distance / elapsed
    } else {
        f32::INFINITY
    };
    if speed <= rules.min_speed {
        return None;
    }

    let axis = |component: f32| {
        if (component / distance).abs() > AXIS_SHARE {
            component.signum()
        } else {
            0.0
        }
    };
    let (x, y) = (axis(delta.x), axis(delta.y));
    let horizontal = x != 0.0 && (y == 0.0 || delta.x.abs() >= delta.y.abs());
    if horizontal {
        Some(if x > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        })
    } else if y > 0.0 {
        Some(SwipeDirection::Up)
    } else if y < 0.0 {
        Some(SwipeDirection::Down)
    } else {
        None
    }
}

/// Where and when a swipe attempt started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeCursor {
    pub start: Vec2,
    pub time: f32,
}

/// Result of feeding a drag position to a tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Nothing armed
    Idle,
    /// Armed, the drag has not gone far enough yet
    Pending,
    Swipe(SwipeDirection),
    /// The attempt failed and the cursor was cleared
    Rejected,
}

/// One armed swipe cursor at a time
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeTracker {
    cursor: Option<SwipeCursor>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm at `point` unless already armed; returns whether it armed
    pub fn arm(&mut self, point: Vec2, now: f32) -> bool {
        if self.cursor.is_some() {
            return false;
        }
        self.cursor = Some(SwipeCursor {
            start: point,
            time: now,
        });
        true
    }

    pub fn disarm(&mut self) {
        self.cursor = None;
    }

    pub fn is_armed(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn cursor(&self) -> Option<SwipeCursor> {
        self.cursor
    }

    /// Feed the current drag position
    pub fn track(&mut self, point: Vec2, now: f32, rules: &SwipeRules) -> SwipeOutcome {
        let Some(cursor) = self.cursor else {
            return SwipeOutcome::Idle;
        };
        let delta = point - cursor.start;
        let elapsed = now - cursor.time;
        if delta.length() > rules.min_distance {
            self.cursor = None;
            return match classify(delta, elapsed, rules) {
                Some(direction) => SwipeOutcome::Swipe(direction),
                None => SwipeOutcome::Rejected,
            };
        }
        if elapsed > rules.window {
            self.cursor = None;
            return SwipeOutcome::Rejected;
        }
        SwipeOutcome::Pending
    }
}

/// What one sample did to an oscillator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillationStep {
    /// No threshold crossed, or already completed
    Idle,
    /// A crossing counted; this many remain
    Crossed(u32),
    /// The final crossing; reported exactly once
    Completed,
}

/// Counts alternating crossings of a low and a high threshold.
///
/// Only the last threshold reached is remembered. The first counted
/// crossing is always the high one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdOscillator {
    pub low: f32,
    pub high: f32,
    reached_upper: bool,
    remaining: u32,
}

impl ThresholdOscillator {
    pub fn new(low: f32, high: f32, crossings: u32) -> Self {
        Self {
            low,
            high,
            reached_upper: false,
            remaining: crossings,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    pub fn feed(&mut self, value: f32) -> OscillationStep {
        if self.remaining == 0 {
            return OscillationStep::Idle;
        }
        let crossed = if self.reached_upper {
            value < self.low
        } else {
            value > self.high
        };
        if !crossed {
            return OscillationStep::Idle;
        }
        self.reached_upper = !self.reached_upper;
        self.remaining -= 1;
        if self.remaining == 0 {
            OscillationStep::Completed
        } else {
            OscillationStep::Crossed(self.remaining)
        }
    }
}
