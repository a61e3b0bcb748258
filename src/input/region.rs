use crate::game::Direction;

/// Screen area that turns a tap into a direction.
///
/// The top and bottom quarters span the full width and take priority. The
/// left and right quarters cover the remaining middle band. Taps in the
/// centre do nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn direction_at(&self, x: f32, y: f32) -> Option<Direction> {
        if y < self.height / 4.0 {
            Some(Direction::Up)
        } else if y > 3.0 * self.height / 4.0 {
            Some(Direction::Down)
        } else if x < self.width / 4.0 {
            Some(Direction::Left)
        } else if x > 3.0 * self.width / 4.0 {
            Some(Direction::Right)
        } else {
            None
        }
    }
}
