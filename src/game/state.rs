use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

use super::action::Direction;
use super::config::{MAX_GRID_SIZE, MIN_GRID_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("snake body must contain at least one cell")]
    EmptySnake,
    #[error("grid_size must be in [{}, {}], got {0}", MIN_GRID_SIZE, MAX_GRID_SIZE)]
    GridSize(usize),
    #[error("cell ({x}, {y}) appears twice in the snake body")]
    DuplicateSegment { x: i32, y: i32 },
    #[error("cell ({x}, {y}) lies outside a {grid_size}x{grid_size} grid")]
    OutOfBounds { x: i32, y: i32, grid_size: usize },
    #[error("food at ({x}, {y}) overlaps the snake")]
    FoodOnSnake { x: i32, y: i32 },
}

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta, without wrapping
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one step in `direction` on a toroidal grid of side `grid_size`
    pub fn stepped(&self, direction: Direction, grid_size: usize) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy).wrapped(grid_size)
    }

    /// Fold both coordinates back into `[0, grid_size)`
    pub fn wrapped(&self, grid_size: usize) -> Self {
        let side = grid_size as i32;
        Self {
            x: self.x.rem_euclid(side),
            y: self.y.rem_euclid(side),
        }
    }

    pub fn is_in_bounds(&self, grid_size: usize) -> bool {
        let side = grid_size as i32;
        (0..side).contains(&self.x) && (0..side).contains(&self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at the front. Never empty.
    body: VecDeque<Cell>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a single-cell snake
    pub fn new(head: Cell, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([head]),
            direction,
        }
    }

    /// Create a snake from explicit segments, head first
    pub fn from_segments(
        segments: impl IntoIterator<Item = Cell>,
        direction: Direction,
    ) -> Result<Self, StateError> {
        let body: VecDeque<Cell> = segments.into_iter().collect();
        if body.is_empty() {
            return Err(StateError::EmptySnake);
        }
        Ok(Self { body, direction })
    }

    /// Get the head cell
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail cell (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Cell> {
        self.body.iter()
    }

    /// Check if any segment, head and tail included, occupies `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Insert a new head. The tail is dropped unless the snake grows.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true for a snake built through this API
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) snake: Snake,
    pub(crate) food: Option<Cell>,
    pub(crate) grid_size: usize,
    pub(crate) score: u32,
    pub(crate) game_over: bool,
}

impl GameState {
    /// Create an active game state. The grid size must be in the accepted
    /// range, every cell must be inside the grid, the body must not repeat a
    /// cell and the food must not overlap the snake.
    pub fn new(snake: Snake, food: Cell, grid_size: usize) -> Result<Self, StateError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&grid_size) {
            return Err(StateError::GridSize(grid_size));
        }

        let out_of_bounds = snake
            .segments()
            .chain(std::iter::once(&food))
            .find(|cell| !cell.is_in_bounds(grid_size));
        if let Some(cell) = out_of_bounds {
            return Err(StateError::OutOfBounds {
                x: cell.x,
                y: cell.y,
                grid_size,
            });
        }

        let mut seen = HashSet::with_capacity(snake.len());
        if let Some(cell) = snake.segments().find(|cell| !seen.insert(**cell)) {
            return Err(StateError::DuplicateSegment {
                x: cell.x,
                y: cell.y,
            });
        }

        if snake.occupies(food) {
            return Err(StateError::FoodOnSnake {
                x: food.x,
                y: food.y,
            });
        }

        Ok(Self {
            snake,
            food: Some(food),
            grid_size,
            score: 0,
            game_over: false,
        })
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_by(-1, 0), Cell::new(4, 5));
        assert_eq!(cell.moved_by(0, 1), Cell::new(5, 6));
        assert_eq!(cell.moved_by(0, -1), Cell::new(5, 4));
    }

    #[test]
    fn test_cell_wraps_on_every_edge() {
        assert_eq!(Cell::new(0, 7).stepped(Direction::Left, 20), Cell::new(19, 7));
        assert_eq!(Cell::new(19, 7).stepped(Direction::Right, 20), Cell::new(0, 7));
        assert_eq!(Cell::new(4, 0).stepped(Direction::Up, 20), Cell::new(4, 19));
        assert_eq!(Cell::new(4, 19).stepped(Direction::Down, 20), Cell::new(4, 0));
        assert_eq!(Cell::new(2, 2).stepped(Direction::Right, 4), Cell::new(3, 2));
    }

    #[test]
    fn test_bounds_checking() {
        assert!(Cell::new(0, 0).is_in_bounds(20));
        assert!(Cell::new(19, 19).is_in_bounds(20));
        assert!(!Cell::new(-1, 0).is_in_bounds(20));
        assert!(!Cell::new(20, 0).is_in_bounds(20));
        assert!(!Cell::new(0, 20).is_in_bounds(20));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert_eq!(snake.tail(), Cell::new(5, 5));

        assert_eq!(
            Snake::from_segments(Vec::new(), Direction::Up),
            Err(StateError::EmptySnake)
        );
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::from_segments(
            [Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)],
            Direction::Right,
        )
        .unwrap();

        snake.advance(Cell::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.tail(), Cell::new(4, 5));

        snake.advance(Cell::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(7, 5));
        assert_eq!(snake.tail(), Cell::new(4, 5));
    }

    #[test]
    fn test_occupancy_includes_head_and_tail() {
        let snake =
            Snake::from_segments([Cell::new(5, 5), Cell::new(4, 5)], Direction::Right).unwrap();
        assert!(snake.occupies(Cell::new(5, 5)));
        assert!(snake.occupies(Cell::new(4, 5)));
        assert!(!snake.occupies(Cell::new(10, 10)));
    }

    #[test]
    fn test_state_validation() {
        let snake = Snake::new(Cell::new(1, 1), Direction::Right);

        let state = GameState::new(snake.clone(), Cell::new(0, 0), 4).unwrap();
        assert_eq!(state.food(), Some(Cell::new(0, 0)));
        assert!(!state.is_game_over());
        assert_eq!(
            GameState::new(snake.clone(), Cell::new(1, 1), 4),
            Err(StateError::FoodOnSnake { x: 1, y: 1 })
        );
        assert_eq!(
            GameState::new(snake, Cell::new(4, 0), 4),
            Err(StateError::OutOfBounds {
                x: 4,
                y: 0,
                grid_size: 4
            })
        );
    }

    #[test]
    fn test_state_rejects_repeated_segments() {
        let snake = Snake::from_segments(
            [Cell::new(1, 1), Cell::new(2, 1), Cell::new(1, 1)],
            Direction::Left,
        )
        .unwrap();

        assert_eq!(
            GameState::new(snake, Cell::new(0, 0), 4),
            Err(StateError::DuplicateSegment { x: 1, y: 1 })
        );
    }

    #[test]
    fn test_state_rejects_unsupported_grid_sizes() {
        let snake = Snake::new(Cell::new(0, 0), Direction::Right);

        assert_eq!(
            GameState::new(snake.clone(), Cell::new(0, 0), 1),
            Err(StateError::GridSize(1))
        );
        assert_eq!(
            GameState::new(snake.clone(), Cell::new(1, 0), MAX_GRID_SIZE + 1),
            Err(StateError::GridSize(MAX_GRID_SIZE + 1))
        );
        assert_eq!(
            GameState::new(snake, Cell::new(1, 0), usize::MAX),
            Err(StateError::GridSize(usize::MAX))
        );
    }
}
