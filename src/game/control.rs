use std::sync::atomic::{AtomicU8, Ordering};

use super::action::Direction;

/// Hands direction changes from the input thread to the loop thread.
///
/// The input side writes the requested direction; the loop reads it once at
/// the start of each tick and publishes the heading it actually applied.
#[derive(Debug)]
pub struct DirectionControl {
    requested: AtomicU8,
    heading: AtomicU8,
}

impl DirectionControl {
    pub fn new(initial: Direction) -> Self {
        Self {
            requested: AtomicU8::new(initial.to_u8()),
            heading: AtomicU8::new(initial.to_u8()),
        }
    }

    /// Request a turn. Returns false when the turn reverses the current
    /// heading and was ignored.
    pub fn set_direction(&self, direction: Direction) -> bool {
        if self.heading().is_opposite(direction) {
            return false;
        }
        self.requested.store(direction.to_u8(), Ordering::Release);
        true
    }

    /// Direction the next tick should take
    pub fn requested(&self) -> Direction {
        Direction::from_u8(self.requested.load(Ordering::Acquire))
    }

    /// Direction applied on the most recent tick
    pub fn heading(&self) -> Direction {
        Direction::from_u8(self.heading.load(Ordering::Acquire))
    }

    pub(crate) fn publish_heading(&self, heading: Direction) {
        self.heading.store(heading.to_u8(), Ordering::Release);
    }
}

impl Default for DirectionControl {
    fn default() -> Self {
        Self::new(Direction::Right)
    }
}
