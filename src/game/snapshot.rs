use serde::Serialize;

use super::action::Direction;
use super::state::{Cell, GameState};

/// Point-in-time copy of the game state for whoever draws it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Snake cells, head first
    pub body: Vec<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
    pub game_over: bool,
    pub direction: Direction,
    pub grid_size: usize,
}

impl Snapshot {
    pub fn head(&self) -> Option<Cell> {
        self.body.first().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            body: state.snake.segments().copied().collect(),
            food: state.food,
            score: state.score,
            game_over: state.game_over,
            direction: state.snake.direction,
            grid_size: state.grid_size,
        }
    }
}
