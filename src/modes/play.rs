use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{Direction, Game, GameStatus};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::Renderer;

/// Render rate used when none is given
pub const DEFAULT_FPS: u32 = 60;

/// Interactive play in the terminal.
///
/// Every frame ticks the game with the time since the loop started; the game
/// decides whether a movement step is due.
pub struct PlayMode {
    game: Game,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    frame_interval: Duration,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(game: Game, fps: u32) -> Self {
        let fps = fps.max(1);

        Self {
            game,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            frame_interval: Duration::from_secs(1) / fps,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            "starting play: {}x{} grid, {}ms move delay, {:?} per frame",
            self.game.config().grid_size,
            self.game.config().grid_size,
            self.game.config().move_delay_ms,
            self.frame_interval
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "leaving after {} rounds, best score {}",
            self.metrics.rounds_played, self.metrics.best_score
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let clock = Instant::now();

        let mut frame_timer = interval(self.frame_interval);
        // A late frame just runs late; the game never steps more than once per tick anyway
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Frame: advance the game, then draw
                _ = frame_timer.tick() => {
                    self.on_frame(clock.elapsed());
                    let snapshot = self.game.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => self.steer(direction),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn steer(&mut self, direction: Direction) {
        let restarting = self.game.status() != GameStatus::Playing;
        self.game.handle_input(direction);

        if restarting {
            self.metrics.on_round_start();
            info!("new round, food at {:?}", self.game.food());
        }
    }

    fn on_frame(&mut self, now: Duration) {
        if let Some(step) = self.game.tick(now) {
            if step.ate_food {
                debug!(
                    "ate food, score {}, length {}, next food at {:?}",
                    self.game.score(),
                    self.game.snake().len(),
                    self.game.food()
                );
            }

            let status = self.game.status();
            if status != GameStatus::Playing {
                match step.collision_type {
                    Some(collision) => info!(
                        "round over: {:?} at {:?}, score {}",
                        collision,
                        self.game.snake().head(),
                        self.game.score()
                    ),
                    None => info!("board filled, score {}", self.game.score()),
                }
                self.metrics.on_round_end(status, self.game.score());
            }
        }

        self.metrics.update();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> PlayMode {
        PlayMode::new(Game::seeded(GameConfig::small(), 9), DEFAULT_FPS)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// Drive frames at 60 Hz until the round ends
    fn play_until_over(mode: &mut PlayMode, now: &mut Duration) {
        while mode.game.status() == GameStatus::Playing {
            mode.on_frame(*now);
            *now += Duration::from_millis(16);
        }
    }

    #[test]
    fn test_frame_interval() {
        assert_eq!(mode().frame_interval, Duration::from_secs(1) / 60);
        let clamped = PlayMode::new(Game::seeded(GameConfig::small(), 1), 0);
        assert_eq!(clamped.frame_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_frames_respect_move_delay() {
        let mut mode = mode();
        let start = mode.game.snake().head();

        // 60 Hz for 0.5s: first frame moves, then one step per 96ms (six frames)
        let mut now = Duration::ZERO;
        for _ in 0..30 {
            mode.on_frame(now);
            now += Duration::from_millis(16);
        }

        let moved = mode.game.snake().head().x - start.x;
        assert_eq!(moved, 5);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_arrow_steers_while_playing() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Down));
        assert_eq!(mode.game.snake().next_direction(), Direction::Down);
    }

    #[test]
    fn test_arrow_restarts_after_game_over() {
        let mut mode = mode();
        let mut now = Duration::ZERO;
        mode.handle_event(key(KeyCode::Up));
        play_until_over(&mut mode, &mut now);

        assert_eq!(mode.game.status(), GameStatus::GameOver);
        assert_eq!(mode.metrics.rounds_played, 1);

        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.game.status(), GameStatus::Playing);
        assert_eq!(mode.game.score(), 0);

        // Ending again counts a second round
        mode.handle_event(key(KeyCode::Up));
        play_until_over(&mut mode, &mut now);
        assert_eq!(mode.metrics.rounds_played, 2);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut mode = mode();
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        mode.handle_event(Event::Key(release));
        assert!(!mode.should_quit);
    }
}
