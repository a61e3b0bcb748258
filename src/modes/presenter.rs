use tracing::{debug, info};

use crate::game::Snapshot;

/// Receives a snapshot after every tick and reset
pub trait Presenter {
    fn on_frame(&mut self, snapshot: &Snapshot);

    /// Called once when a game ends, after the final `on_frame`
    fn on_game_over(&mut self, snapshot: &Snapshot);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn on_frame(&mut self, snapshot: &Snapshot) {
        (**self).on_frame(snapshot);
    }

    fn on_game_over(&mut self, snapshot: &Snapshot) {
        (**self).on_game_over(snapshot);
    }
}

/// Writes frames to the tracing subscriber instead of a screen
#[derive(Debug, Default)]
pub struct LogPresenter {
    last_score: u32,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for LogPresenter {
    fn on_frame(&mut self, snapshot: &Snapshot) {
        debug!(
            head = ?snapshot.head(),
            length = snapshot.len(),
            direction = ?snapshot.direction,
            score = snapshot.score,
            "frame"
        );

        if snapshot.score != self.last_score {
            if snapshot.score > self.last_score {
                info!(score = snapshot.score, length = snapshot.len(), "score");
            }
            self.last_score = snapshot.score;
        }
    }

    fn on_game_over(&mut self, snapshot: &Snapshot) {
        info!(
            score = snapshot.score,
            length = snapshot.len(),
            "game over"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction};

    fn frame(body: Vec<Cell>, score: u32) -> Snapshot {
        Snapshot {
            body,
            food: None,
            score,
            game_over: false,
            direction: Direction::Left,
            grid_size: 8,
        }
    }

    #[test]
    fn test_tracks_last_score() {
        let mut presenter = LogPresenter::new();

        presenter.on_frame(&frame(vec![Cell::new(1, 1)], 10));
        assert_eq!(presenter.last_score, 10);

        presenter.on_frame(&frame(vec![Cell::new(4, 4)], 0));
        assert_eq!(presenter.last_score, 0);
    }

    #[test]
    fn test_empty_frame_is_logged() {
        let mut presenter = LogPresenter::new();
        let empty = frame(Vec::new(), 0);

        presenter.on_frame(&empty);
        presenter.on_game_over(&empty);
        assert_eq!(presenter.last_score, 0);
    }
}
