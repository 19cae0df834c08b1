//! Terminal host for the falling-block gameplay core
//!
//! The host owns the terminal and the frame cadence: it polls crossterm
//! events, maps them to symbolic game keys, and drives the scenario through
//! `dispatch_event`/`update` before handing the frame to the renderer.

mod action;
mod audio;
mod bag;
mod cell;
mod field;
mod gravity;
mod queue;
mod scenario;
mod score;
mod srs;
mod tetromino;
mod theme;
mod ui;

use action::{GameKey, InputEvent};
use audio::{AudioManager, SilentPlayer, SoundPlayer};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use scenario::{Scenario, ScenarioState};
use std::collections::HashMap;
use std::io::{self, stdout};
use std::path::Path;
use std::time::{Duration, Instant};
use theme::Theme;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// A held key with no repeat event for this long counts as released.
/// Terminals do not reliably deliver key-up, so releases are synthesized
/// from the gap in the auto-repeat stream.
const KEY_TIMEOUT: Duration = Duration::from_millis(100);

/// Tracks keys whose release matters (movement and drop modes)
struct HeldKeys {
    last_seen: HashMap<GameKey, Instant>,
}

impl HeldKeys {
    fn new() -> Self {
        Self {
            last_seen: HashMap::new(),
        }
    }

    fn tracked(key: GameKey) -> bool {
        matches!(
            key,
            GameKey::Left | GameKey::Right | GameKey::SoftDrop | GameKey::HardDrop
        )
    }

    /// Record a press; true when this is a fresh key-down rather than an
    /// auto-repeat of a key already held
    fn press(&mut self, key: GameKey, now: Instant) -> bool {
        if !Self::tracked(key) {
            return true;
        }
        self.last_seen.insert(key, now).is_none()
    }

    fn release(&mut self, key: GameKey) {
        self.last_seen.remove(&key);
    }

    /// Keys whose repeat stream went quiet; they are considered released
    fn expire(&mut self, now: Instant) -> Vec<GameKey> {
        let expired: Vec<GameKey> = self
            .last_seen
            .iter()
            .filter(|&(_, &seen)| now.duration_since(seen) > KEY_TIMEOUT)
            .map(|(&key, _)| key)
            .collect();
        for key in &expired {
            self.last_seen.remove(key);
        }
        expired
    }

    fn clear(&mut self) {
        self.last_seen.clear();
    }
}

fn map_key(code: KeyCode) -> Option<GameKey> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(GameKey::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(GameKey::Right),
        KeyCode::Down | KeyCode::Char('s') => Some(GameKey::SoftDrop),
        KeyCode::Char(' ') => Some(GameKey::HardDrop),
        KeyCode::Up | KeyCode::Char('x') => Some(GameKey::RotateRight),
        KeyCode::Char('z') => Some(GameKey::RotateLeft),
        KeyCode::Char('c') => Some(GameKey::Hold),
        KeyCode::Char('p') | KeyCode::Esc => Some(GameKey::Pause),
        _ => None,
    }
}

fn new_scenario() -> Scenario {
    let sounds: Box<dyn SoundPlayer> = match AudioManager::new() {
        Some(audio) => Box::new(audio),
        None => {
            tracing::warn!("audio unavailable, continuing silent");
            Box::new(SilentPlayer)
        }
    };
    Scenario::new(sounds)
}

fn main() -> io::Result<()> {
    // Log to a file so the alternate screen stays clean
    let log_dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::never(&log_dir, "blockfall.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let theme = Theme::load(Path::new("assets/theme.json"));
    let mut scenario = new_scenario();
    let mut held = HeldKeys::new();
    let mut last_frame = Instant::now();

    tracing::info!("session started");

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };

            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(());
            }
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('r') if scenario.state() == ScenarioState::GameOver => {
                    tracing::info!("restart");
                    scenario = new_scenario();
                    held.clear();
                    continue;
                }
                _ => {}
            }

            let Some(game_key) = map_key(key.code) else {
                continue;
            };
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if held.press(game_key, Instant::now()) {
                        scenario.dispatch_event(InputEvent::KeyDown(game_key));
                    }
                }
                KeyEventKind::Release => {
                    held.release(game_key);
                    scenario.dispatch_event(InputEvent::KeyUp(game_key));
                }
            }
        }

        for key in held.expire(Instant::now()) {
            scenario.dispatch_event(InputEvent::KeyUp(key));
        }

        let delta = last_frame.elapsed();
        last_frame = Instant::now();
        scenario.update(delta);

        terminal.draw(|frame| ui::render(frame, &scenario, &theme))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }
}
