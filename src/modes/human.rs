use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::stderr;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::game::{Game, GameConfig, GameLoop, SessionEnd};
use crate::input::{InputHandler, KeyAction};
use crate::render::TerminalView;
use crate::render::terminal::CrosstermTerminal;
use crate::shutdown::{Shutdown, ShutdownHandle};

pub struct HumanMode {
    config: GameConfig,
    best_score: u32,
    games_played: u32,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            best_score: 0,
            games_played: 0,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Reject a bad configuration before touching the terminal
        let game = Game::new(self.config.clone()).context("Invalid game configuration")?;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let (pixel_width, pixel_height) = self.config.pixel_size()?;
        let view = TerminalView::new(terminal, pixel_width, pixel_height);
        let mut game_loop = GameLoop::new(game, view);

        // Run sessions with cleanup
        let result = self.run_sessions(&mut game_loop).await;

        let mut view = game_loop.into_view();
        Self::cleanup_terminal(view.terminal_mut())?;

        info!(
            "exiting after {} games, best score {}",
            self.games_played, self.best_score
        );
        result
    }

    async fn run_sessions(&mut self, game_loop: &mut GameLoop<TerminalView>) -> Result<()> {
        let (tx, mut input) = unbounded_channel();
        let pump = tokio::spawn(pump_input(tx));

        let handle = ShutdownHandle::new();
        let mut shutdown = handle.subscribe();
        let signal = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => handle.trigger(),
                Err(err) => {
                    warn!("cannot listen for Ctrl+C: {}", err);
                    // Keep the handle alive; dropping it would stop the game
                    std::future::pending::<()>().await
                }
            }
        });

        game_loop.view_mut().start_session(self.best_score);
        let result = loop {
            let end = match game_loop.run(&mut input, &mut shutdown).await {
                Ok(end) => end,
                Err(err) => break Err(err).context("Game session failed"),
            };

            match end {
                SessionEnd::Crashed { score } | SessionEnd::Won { score } => {
                    self.record(score);
                    if !wait_for_restart(&mut input, &mut shutdown).await {
                        break Ok(());
                    }
                }
                SessionEnd::Restart => self.record(game_loop.game().score()),
                SessionEnd::Quit | SessionEnd::Cancelled => break Ok(()),
            }

            if let Err(err) = self.restart(game_loop) {
                break Err(err);
            }
        };

        pump.abort();
        signal.abort();
        result
    }

    fn restart(&self, game_loop: &mut GameLoop<TerminalView>) -> Result<()> {
        let game = Game::new(self.config.clone()).context("Failed to start a new game")?;
        game_loop.reset(game);
        game_loop.view_mut().start_session(self.best_score);
        info!("starting game {}", self.games_played + 1);
        Ok(())
    }

    fn record(&mut self, score: u32) {
        self.games_played += 1;
        self.best_score = self.best_score.max(score);
    }

    fn cleanup_terminal(terminal: &mut CrosstermTerminal) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Forward key presses from the terminal into the game's input channel
async fn pump_input(tx: UnboundedSender<KeyAction>) {
    let handler = InputHandler::new();
    let mut events = EventStream::new();

    while let Some(event) = events.next().await {
        match event {
            // Only process key press events, not release
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let action = handler.handle_key_event(key);
                if action != KeyAction::None && tx.send(action).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(err) => {
                warn!("terminal event stream failed: {}", err);
                break;
            }
        }
    }
}

/// After a game ends, wait for the player to restart (true) or leave (false)
async fn wait_for_restart(
    input: &mut UnboundedReceiver<KeyAction>,
    shutdown: &mut Shutdown,
) -> bool {
    loop {
        tokio::select! {
            _ = shutdown.recv() => return false,
            action = input.recv() => match action {
                Some(KeyAction::Restart) => return true,
                Some(KeyAction::Quit) | None => return false,
                Some(_) => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tracks_best_score() {
        let mut mode = HumanMode::new(GameConfig::default());
        mode.record(5);
        mode.record(2);
        assert_eq!(mode.best_score, 5);
        assert_eq!(mode.games_played, 2);
    }

    #[tokio::test]
    async fn test_wait_for_restart() {
        let handle = ShutdownHandle::new();
        let mut shutdown = handle.subscribe();
        let (tx, mut rx) = unbounded_channel();

        tx.send(KeyAction::Pause).unwrap();
        tx.send(KeyAction::Restart).unwrap();
        assert!(wait_for_restart(&mut rx, &mut shutdown).await);

        tx.send(KeyAction::Quit).unwrap();
        assert!(!wait_for_restart(&mut rx, &mut shutdown).await);

        handle.trigger();
        assert!(!wait_for_restart(&mut rx, &mut shutdown).await);
    }
}
