use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{
    action::Direction,
    config::{ConfigError, GameConfig},
    snapshot::Snapshot,
    state::{Cell, GameState, Snake},
};

/// Score awarded for each food eaten
pub const FOOD_REWARD: u32 = 10;

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved one cell without growing
    Moved,
    /// The snake ate the food and grew; carries the new score
    Ate { score: u32 },
    /// The next head was already part of the body; the game is now over
    Collided,
    /// The game was already over, nothing changed
    Halted,
}

/// The game engine that owns the authoritative state
///
/// All operations take `&mut self` and finish synchronously. Callers on
/// different threads must serialise access themselves.
pub struct SnakeEngine<R = StdRng> {
    state: GameState,
    rng: R,
}

impl SnakeEngine<StdRng> {
    /// Create an engine seeded from OS entropy
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SnakeEngine<R> {
    pub fn with_rng(config: &GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = initial_state(config.grid_size, &mut rng);
        Ok(Self { state, rng })
    }

    /// Resume from an arbitrary state, e.g. a hand-built test position
    pub fn from_state(state: GameState, rng: R) -> Self {
        Self { state, rng }
    }

    /// Request a new direction for the next tick.
    ///
    /// A request for the exact opposite of the current direction is dropped,
    /// as is any request after game over. The check runs against the stored
    /// direction at call time, so two calls between ticks may chain into a
    /// reversal.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.state.game_over {
            return;
        }

        let current = self.state.snake.direction;
        if current.is_opposite(requested) {
            debug!(?current, ?requested, "ignoring reversal");
            return;
        }

        self.state.snake.direction = requested;
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.game_over {
            return TickOutcome::Halted;
        }

        let grid_size = self.state.grid_size;
        let snake = &self.state.snake;
        let next_head = snake.head().stepped(snake.direction, grid_size);

        // The colliding head is never inserted
        if snake.occupies(next_head) {
            self.state.game_over = true;
            debug!(x = next_head.x, y = next_head.y, score = self.state.score, "self collision");
            return TickOutcome::Collided;
        }

        let ate_food = self.state.food == Some(next_head);
        self.state.snake.advance(next_head, ate_food);

        if !ate_food {
            return TickOutcome::Moved;
        }

        self.state.score += FOOD_REWARD;
        let food = spawn_food(&mut self.rng, &self.state.snake, grid_size);
        self.state.food = Some(food);
        debug!(
            score = self.state.score,
            length = self.state.snake.len(),
            food_x = food.x,
            food_y = food.y,
            "food eaten"
        );

        TickOutcome::Ate {
            score: self.state.score,
        }
    }

    /// Start a fresh game on the same grid
    pub fn reset(&mut self) {
        self.state = initial_state(self.state.grid_size, &mut self.rng);
        debug!(grid_size = self.state.grid_size, "game reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn direction(&self) -> Direction {
        self.state.snake.direction
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }
}

fn initial_state<R: Rng>(grid_size: usize, rng: &mut R) -> GameState {
    let center = (grid_size / 2) as i32;
    let snake = Snake::new(Cell::new(center, center), Direction::Right);
    let food = spawn_food(rng, &snake, grid_size);

    GameState {
        snake,
        food: Some(food),
        grid_size,
        score: 0,
        game_over: false,
    }
}

/// Draw uniform cells until one lands outside the snake.
///
/// Never returns if the snake covers the whole grid; play cannot realistically
/// reach that length, so the case is left unhandled.
fn spawn_food<R: Rng>(rng: &mut R, snake: &Snake, grid_size: usize) -> Cell {
    let side = grid_size as i32;
    loop {
        let cell = Cell::new(rng.gen_range(0..side), rng.gen_range(0..side));

        if !snake.occupies(cell) {
            return cell;
        }
    }
}
