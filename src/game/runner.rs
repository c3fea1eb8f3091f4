//! Timer-driven game loop.
//!
//! One task owns the [`Game`] and its view. Ticks, food spawns and input are
//! multiplexed with `tokio::select!`; every arm runs to completion before the
//! next one is polled, so input can never land in the middle of a tick.

use log::info;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Instant, MissedTickBehavior, interval, interval_at};

use super::engine::{Game, TickOutcome};
use crate::error::GameError;
use crate::input::KeyAction;
use crate::render::{Scoreboard, Surface};
use crate::shutdown::Shutdown;

pub const CRASHED_MESSAGE: &str = "You crashed!";
pub const WON_MESSAGE: &str = "You won!";
pub const PAUSED_MESSAGE: &str = "Paused";

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Crashed { score: u32 },
    Won { score: u32 },
    Restart,
    Quit,
    Cancelled,
}

pub struct GameLoop<V> {
    game: Game,
    view: V,
    paused: bool,
}

impl<V: Surface + Scoreboard> GameLoop<V> {
    pub fn new(game: Game, view: V) -> Self {
        Self {
            game,
            view,
            paused: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Swap in a fresh game, keeping the view
    pub fn reset(&mut self, game: Game) {
        self.game = game;
        self.paused = false;
        self.view.clear_message();
    }

    /// Run the session until the snake dies, the player leaves, or shutdown
    /// is signalled.
    pub async fn run(
        &mut self,
        input: &mut UnboundedReceiver<KeyAction>,
        shutdown: &mut Shutdown,
    ) -> Result<SessionEnd, GameError> {
        let tick_delay = self.game.config().tick_delay();
        let food_interval = self.game.config().food_interval();

        let mut ticker = interval(tick_delay);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut food_timer = interval_at(Instant::now() + food_interval, food_interval);
        food_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.view.show_score(self.game.score());
        info!(
            "session started: {}x{} grid, tick {:?}",
            self.game.grid().width(),
            self.game.grid().height(),
            tick_delay
        );

        loop {
            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    info!("session cancelled after {} ticks", self.game.ticks());
                    return Ok(SessionEnd::Cancelled);
                }

                Some(action) = input.recv() => match action {
                    KeyAction::Steer(direction) => {
                        if !self.paused {
                            self.game.steer(direction);
                        }
                    }
                    KeyAction::Pause => {
                        self.paused = !self.paused;
                        if self.paused {
                            self.view.show_message(PAUSED_MESSAGE);
                        } else {
                            self.view.clear_message();
                            ticker.reset();
                            food_timer.reset();
                        }
                        self.view.present()?;
                    }
                    KeyAction::Restart => return Ok(SessionEnd::Restart),
                    KeyAction::Quit => return Ok(SessionEnd::Quit),
                    KeyAction::None => {}
                },

                _ = ticker.tick(), if !self.paused => {
                    if let Some(end) = self.step()? {
                        return Ok(end);
                    }
                }

                _ = food_timer.tick(), if !self.paused => {
                    self.game.spawn_food();
                }
            }
        }
    }

    /// One tick: paint what changed, advance the game, report the result.
    pub fn step(&mut self) -> Result<Option<SessionEnd>, GameError> {
        self.game.render_grid(&mut self.view)?;
        self.view.present()?;

        let outcome = self.game.tick()?;
        let score = self.game.score();
        match outcome {
            TickOutcome::Moved => Ok(None),
            TickOutcome::Ate => {
                self.view.show_score(score);
                Ok(None)
            }
            TickOutcome::Crashed => {
                self.finish(CRASHED_MESSAGE)?;
                Ok(Some(SessionEnd::Crashed { score }))
            }
            TickOutcome::Won => {
                self.view.show_score(score);
                self.finish(WON_MESSAGE)?;
                Ok(Some(SessionEnd::Won { score }))
            }
        }
    }

    fn finish(&mut self, message: &str) -> Result<(), GameError> {
        self.game.render_grid(&mut self.view)?;
        self.view.show_message(message);
        self.view.present()?;
        info!("{} score {}", message, self.game.score());
        Ok(())
    }
}
