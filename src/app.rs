//! Top-level state machine
//!
//! Menu and game screens share one loop. Game over is a phase of the session
//! rather than a nested wait loop, so every state is driven by the same
//! `frame` call.

use std::path::PathBuf;

use crate::audio::{AudioBackend, AudioManager};
use crate::platform::{FrameInput, InputEvent, Key, KeySet};
use crate::renderer::{Surface, draw_game_over, draw_menu, draw_session};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, KeyOutcome, TickInput, handle_key, tick};
use crate::tuning::Tuning;
use crate::ui::{MainMenu, MenuAction};

/// Which screen owns input and drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game,
}

/// Whether the loop should keep going after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

fn tick_input(held: &KeySet) -> TickInput {
    TickInput {
        move_left: held.contains(Key::Left),
        move_right: held.contains(Key::Right),
    }
}

pub struct App<B: AudioBackend> {
    tuning: Tuning,
    settings: Settings,
    /// Where toggled settings are written back, if anywhere
    settings_path: Option<PathBuf>,
    menu: MainMenu,
    screen: Screen,
    session: Option<GameState>,
    audio: AudioManager<B>,
    base_seed: u64,
    games_started: u64,
}

impl<B: AudioBackend> App<B> {
    pub fn new(tuning: Tuning, settings: Settings, backend: B, seed: u64) -> Self {
        let mut audio = AudioManager::new(backend, &settings);
        audio.start_music();
        Self {
            tuning,
            settings,
            settings_path: None,
            menu: MainMenu::new(),
            screen: Screen::Menu,
            session: None,
            audio,
            base_seed: seed,
            games_started: 0,
        }
    }

    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// One full frame: edge keys, one simulation tick, draw, present
    pub fn frame(&mut self, input: &FrameInput, now_ms: u64, surface: &mut impl Surface) -> FrameOutcome {
        if self.handle_input(&input.events) == FrameOutcome::Quit {
            return FrameOutcome::Quit;
        }
        self.update(&input.held, now_ms);
        self.draw(surface);
        surface.present();
        FrameOutcome::Continue
    }

    /// Route edge-triggered events to the active screen
    pub fn handle_input(&mut self, events: &[InputEvent]) -> FrameOutcome {
        for event in events {
            let outcome = match *event {
                InputEvent::Quit => {
                    log::info!("Window closed");
                    FrameOutcome::Quit
                }
                InputEvent::KeyDown(key) => self.handle_key(key),
            };
            if outcome == FrameOutcome::Quit {
                self.audio.stop_music();
                return FrameOutcome::Quit;
            }
        }
        FrameOutcome::Continue
    }

    fn handle_key(&mut self, key: Key) -> FrameOutcome {
        match self.screen {
            Screen::Menu => match self.menu.handle_key(key) {
                MenuAction::None => {}
                MenuAction::StartGame => self.start_game(),
                MenuAction::ToggleSound => self.toggle_sound(),
                MenuAction::Quit => {
                    log::info!("Quit from menu");
                    return FrameOutcome::Quit;
                }
            },
            Screen::Game => {
                let Some(session) = self.session.as_mut() else {
                    self.screen = Screen::Menu;
                    return FrameOutcome::Continue;
                };
                if handle_key(session, key) == KeyOutcome::ExitToMenu {
                    log::info!("Back to menu with score {}", session.score);
                    self.screen = Screen::Menu;
                }
            }
        }
        FrameOutcome::Continue
    }

    /// Advance the running session by one tick and play its cues
    pub fn update(&mut self, held: &KeySet, now_ms: u64) {
        if self.screen != Screen::Game {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        tick(session, &tick_input(held), now_ms);

        let events = session.drain_events();
        self.audio.handle_events(&events);
        for event in &events {
            if let GameEvent::GameOver { score } = event {
                log::info!("Final score {} on level {}", score, session.level + 1);
            }
        }
    }

    /// Draw the active screen (without presenting)
    pub fn draw(&self, surface: &mut impl Surface) {
        match (self.screen, &self.session) {
            (Screen::Game, Some(session)) if session.phase == GamePhase::GameOver => {
                draw_game_over(surface, session);
            }
            (Screen::Game, Some(session)) => draw_session(surface, session, &self.settings),
            _ => draw_menu(
                surface,
                &self.menu,
                &self.settings,
                self.tuning.screen_width,
                self.tuning.screen_height,
            ),
        }
    }

    fn start_game(&mut self) {
        let seed = self.base_seed.wrapping_add(self.games_started);
        self.games_started += 1;
        log::info!("Starting game {} (seed {})", self.games_started, seed);
        self.session = Some(GameState::new(self.tuning.clone(), seed));
        self.screen = Screen::Game;
    }

    fn toggle_sound(&mut self) {
        self.settings.toggle_muted();
        self.audio.apply_settings(&self.settings);
        if let Some(path) = &self.settings_path {
            if let Err(err) = self.settings.save(path) {
                log::warn!("Could not save settings: {}", err);
            }
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameState> {
        self.session.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn menu(&self) -> &MainMenu {
        &self.menu
    }

    pub fn audio(&self) -> &AudioManager<B> {
        &self.audio
    }
}
