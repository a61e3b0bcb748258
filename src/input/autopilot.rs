use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::game::{Cell, Direction, Snapshot};
use crate::modes::Presenter;

/// Pick a direction that heads for the food without running into the body.
///
/// Only directions the engine would accept are considered. Returns `None`
/// when every move is fatal or the frame carries no snake.
pub fn choose_direction(snapshot: &Snapshot) -> Option<Direction> {
    let head = snapshot.head()?;
    let current = snapshot.direction;

    Direction::ALL
        .into_iter()
        .filter(|dir| !current.is_opposite(*dir))
        .map(|dir| (dir, head.stepped(dir, snapshot.grid_size)))
        .filter(|(_, next)| !snapshot.body.contains(next))
        .min_by_key(|(dir, next)| {
            let distance = snapshot
                .food
                .map_or(0, |food| wrapped_distance(*next, food, snapshot.grid_size));
            // Prefer going straight on ties
            (distance, *dir != current)
        })
        .map(|(dir, _)| dir)
}

/// Manhattan distance on a torus
fn wrapped_distance(a: Cell, b: Cell, grid_size: usize) -> u32 {
    let side = grid_size as u32;
    let axis = |from: i32, to: i32| {
        let d = from.abs_diff(to);
        d.min(side - d)
    };
    axis(a.x, b.x) + axis(a.y, b.y)
}

/// Steers the snake from the frames it is shown, then passes them on
pub struct Autopilot<P> {
    inner: P,
    inputs: UnboundedSender<Direction>,
}

impl<P: Presenter> Autopilot<P> {
    pub fn new(inner: P, inputs: UnboundedSender<Direction>) -> Self {
        Self { inner, inputs }
    }
}

impl<P: Presenter> Presenter for Autopilot<P> {
    fn on_frame(&mut self, snapshot: &Snapshot) {
        self.inner.on_frame(snapshot);

        if snapshot.game_over {
            return;
        }

        let Some(direction) = choose_direction(snapshot) else {
            return;
        };

        if direction != snapshot.direction && self.inputs.send(direction).is_err() {
            warn!(?direction, "input channel closed, dropping autopilot move");
        }
    }

    fn on_game_over(&mut self, snapshot: &Snapshot) {
        self.inner.on_game_over(snapshot);
    }
}
