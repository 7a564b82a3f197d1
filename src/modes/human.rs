use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::cell::Cell;
use std::io::{Stderr, stderr};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{info, warn};

use crate::game::{GameConfig, GameEngine, Millis, TickScheduler};
use crate::input::{InputHandler, KeyAction, NamePrompt, PromptAction};
use crate::leaderboard::{Leaderboard, LeaderboardStore};
use crate::render::{Overlay, Renderer};

/// What happens around the board once a game has ended
enum AfterGame {
    Playing,
    Naming { score: u32, prompt: NamePrompt },
    Saved(Option<usize>),
}

pub struct HumanMode {
    engine: GameEngine,
    scheduler: TickScheduler,
    renderer: Renderer,
    input_handler: InputHandler,
    leaderboard: Leaderboard,
    store: LeaderboardStore,
    after_game: AfterGame,
    /// Filled by the engine's game-over callback
    finished: Rc<Cell<Option<u32>>>,
    epoch: Instant,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, store: LeaderboardStore, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        let leaderboard = store.load()?;
        let scheduler = TickScheduler::from_millis(config.base_tick_ms);

        let mut engine = match seed {
            Some(seed) => GameEngine::seeded(config, seed),
            None => GameEngine::new(config),
        };
        let finished = Rc::new(Cell::new(None));
        let sink = Rc::clone(&finished);
        engine.on_game_over(move |score| sink.set(Some(score)));

        Ok(Self {
            engine,
            scheduler,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            leaderboard,
            store,
            after_game: AfterGame::Playing,
            finished,
            epoch: Instant::now(),
            should_quit: false,
        })
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

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick, cadence follows the engine's state
                _ = self.scheduler.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| self.draw(frame)).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            self.sync_scheduler();

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn now(&self) -> Millis {
        self.epoch.elapsed().as_millis() as Millis
    }

    fn draw(&self, frame: &mut Frame) {
        let overlay = match &self.after_game {
            AfterGame::Playing => Overlay::None,
            AfterGame::Naming { prompt, .. } => Overlay::NameEntry(prompt.text()),
            AfterGame::Saved(rank) => Overlay::Saved(*rank),
        };
        let now = self.now();
        self.renderer.render(
            frame,
            &self.engine.snapshot_at(now),
            now,
            &self.leaderboard,
            overlay,
        );
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            if let AfterGame::Naming { score, prompt } = &mut self.after_game {
                let score = *score;
                match prompt.handle_key_event(key) {
                    PromptAction::Editing => {}
                    PromptAction::Submit(name) => self.save_score(&name, score),
                    PromptAction::Quit => self.should_quit = true,
                }
                return Ok(());
            }

            match self.input_handler.handle_key_event(key, self.engine.status()) {
                KeyAction::Game(intent) => self.engine.apply(intent),
                KeyAction::Restart => self.reset_game(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) {
        let now = self.now();
        self.engine.tick(now);

        if let Some(score) = self.finished.take() {
            self.after_game = if self.leaderboard.qualifies(score) {
                AfterGame::Naming {
                    score,
                    prompt: NamePrompt::new(),
                }
            } else {
                AfterGame::Saved(None)
            };
        }
    }

    fn sync_scheduler(&mut self) {
        self.scheduler
            .sync(self.engine.status(), self.engine.speed_boost_active());
    }

    fn save_score(&mut self, name: &str, score: u32) {
        let rank = self.leaderboard.record(name, score, Local::now());
        info!(score, ?rank, "score recorded");

        // Keep playing even if the file cannot be written
        if let Err(err) = self.store.save(&self.leaderboard) {
            warn!("failed to save leaderboard: {err:#}");
        }

        self.after_game = AfterGame::Saved(rank);
    }

    fn reset_game(&mut self) {
        self.engine.reset();
        self.finished.set(None);
        self.after_game = AfterGame::Playing;
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
