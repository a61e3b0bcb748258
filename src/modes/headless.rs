//! Clock-driven session runner
//!
//! The driver owns the engine for the whole session. Directions arrive on an
//! unbounded channel and are applied strictly between ticks, so the engine
//! only ever sees sequential calls.

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Instant, MissedTickBehavior, interval, sleep};
use tracing::{debug, info, warn};

use crate::game::{Direction, GameConfig, SnakeEngine, TickOutcome};
use crate::metrics::{GameMetrics, SessionSummary};
use crate::modes::Presenter;

/// Configuration for a driven session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Grid size and tick period
    pub game: GameConfig,

    /// Seed for food placement; entropy when absent
    pub seed: Option<u64>,

    /// Stop after this many finished games
    pub max_games: Option<u32>,

    /// Stop after this many ticks across all games
    pub max_ticks: Option<u64>,

    /// Pause between a game over and the next game
    pub restart_delay_ms: u64,
}

impl SessionConfig {
    pub fn new(game: GameConfig) -> Self {
        Self {
            game,
            seed: None,
            max_games: Some(1),
            max_ticks: None,
            restart_delay_ms: 1000,
        }
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }
}

pub struct SessionDriver<P> {
    config: SessionConfig,
    engine: SnakeEngine,
    presenter: P,
    inputs: UnboundedReceiver<Direction>,
    metrics: GameMetrics,
}

impl<P: Presenter> SessionDriver<P> {
    pub fn new(
        config: SessionConfig,
        presenter: P,
        inputs: UnboundedReceiver<Direction>,
    ) -> Result<Self> {
        let engine = match config.seed {
            Some(seed) => SnakeEngine::with_seed(&config.game, seed),
            None => SnakeEngine::new(&config.game),
        }
        .context("Invalid game configuration")?;

        Ok(Self::with_engine(config, engine, presenter, inputs))
    }

    /// Drive an engine that was set up elsewhere
    pub fn with_engine(
        config: SessionConfig,
        engine: SnakeEngine,
        presenter: P,
        inputs: UnboundedReceiver<Direction>,
    ) -> Self {
        Self {
            config,
            engine,
            presenter,
            inputs,
            metrics: GameMetrics::new(),
        }
    }

    /// Tick until a limit is reached or Ctrl+C arrives
    pub async fn run(self) -> Result<SessionSummary> {
        self.run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(%err, "cannot listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Tick until a limit is reached or `shutdown` completes.
    ///
    /// `shutdown` is polled for the whole session, including the pause
    /// between games.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<SessionSummary>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let restart_timer = sleep(Duration::ZERO);
        tokio::pin!(restart_timer);
        let mut restarting = false;

        let mut tick_timer = interval(self.config.game.tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut inputs_open = true;

        info!(
            grid_size = self.engine.state().grid_size(),
            tick_ms = self.config.game.tick_interval_ms,
            "session started"
        );
        self.metrics.on_game_start();
        self.presenter.on_frame(&self.engine.snapshot());

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("interrupted");
                    break;
                }

                maybe_direction = self.inputs.recv(), if inputs_open => {
                    match maybe_direction {
                        Some(direction) => self.engine.set_direction(direction),
                        None => {
                            debug!("input channel closed");
                            inputs_open = false;
                        }
                    }
                }

                _ = &mut restart_timer, if restarting => {
                    restarting = false;
                    self.restart();
                    tick_timer.reset_immediately();
                }

                _ = tick_timer.tick(), if !restarting => {
                    let game_ended = self.advance();

                    if self.tick_limit_reached() {
                        info!("tick limit reached");
                        break;
                    }

                    if game_ended {
                        if self.game_limit_reached() {
                            break;
                        }

                        restart_timer
                            .as_mut()
                            .reset(Instant::now() + self.config.restart_delay());
                        restarting = true;
                    }
                }
            }
        }

        let summary = self.metrics.summary();
        info!(
            games = summary.games_played,
            high_score = summary.high_score,
            ticks = summary.total_ticks,
            "session finished"
        );
        Ok(summary)
    }

    /// Tick once and publish the result. Returns true when the game just ended.
    fn advance(&mut self) -> bool {
        let outcome = self.engine.tick();
        self.metrics.on_tick();

        let snapshot = self.engine.snapshot();
        self.presenter.on_frame(&snapshot);

        match outcome {
            TickOutcome::Collided => {
                self.metrics.on_game_over(snapshot.score);
                info!(
                    score = snapshot.score,
                    ticks = self.metrics.game_ticks,
                    elapsed = %self.metrics.format_time(),
                    "game over"
                );
                self.presenter.on_game_over(&snapshot);
                true
            }
            TickOutcome::Ate { score } => {
                debug!(score, "food eaten");
                false
            }
            TickOutcome::Moved | TickOutcome::Halted => false,
        }
    }

    fn restart(&mut self) {
        // Inputs aimed at the finished game must not steer the new one
        while self.inputs.try_recv().is_ok() {}

        self.engine.reset();
        self.metrics.on_game_start();
        info!(game = self.metrics.games_played + 1, "new game");
        self.presenter.on_frame(&self.engine.snapshot());
    }

    fn tick_limit_reached(&self) -> bool {
        self.config
            .max_ticks
            .is_some_and(|limit| self.metrics.total_ticks >= limit)
    }

    fn game_limit_reached(&self) -> bool {
        self.config
            .max_games
            .is_some_and(|limit| self.metrics.games_played >= limit)
    }
}
