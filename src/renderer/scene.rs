//! Draw pass
//!
//! Pure reads of game state. Animation counters and particle motion are
//! advanced by the tick, never here.

use glam::Vec2;

use super::Surface;
use crate::Rgb;
use crate::colors::{BLACK, BLUE, GREEN, GREY, RED, WHITE};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Effect, GameState, Overlay, Rect};
use crate::ui::{ConfirmDialog, MainMenu, MenuOption};

/// Rough text advance for centring; real glyph metrics are the surface's business
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

fn draw_centered(surface: &mut impl Surface, text: &str, center: Vec2, color: Rgb, size: f32) {
    let pos = Vec2::new(center.x - text_width(text, size) / 2.0, center.y - size / 2.0);
    surface.draw_text(text, pos, color, size);
}

fn draw_particles(surface: &mut impl Surface, effect: &Effect) {
    for particle in effect.live_particles() {
        surface.fill_circle(particle.pos, PARTICLE_RADIUS, particle.color);
    }
}

/// Draw a running session: playfield, effects, HUD and any overlay
pub fn draw_session(surface: &mut impl Surface, state: &GameState, settings: &Settings) {
    let width = state.tuning.screen_width;
    let height = state.tuning.screen_height;

    surface.clear(BLACK);

    for tile in state.tiles.iter().filter(|t| t.active) {
        surface.fill_rect(tile.rect, tile.color);
        if tile.hits > 1 {
            let center = tile.rect.center();
            surface.draw_text(
                &tile.hits.to_string(),
                Vec2::new(center.x, center.y - 5.0),
                WHITE,
                TILE_FONT_SIZE,
            );
        }
    }

    let paddle = &state.paddle;
    if paddle.visible {
        let rect = Rect::new(paddle.pos.x, paddle.pos.y - paddle.jump, paddle.width(), paddle.height);
        surface.fill_rect(rect, paddle.color());
    }

    for ball in &state.balls {
        surface.fill_circle(ball.pos, ball.radius, RED);
    }

    let pickup = &state.pickup;
    if pickup.active {
        // First half of the blink cycle green, second half blue
        let color = if pickup.frame < PICKUP_BLINK_FRAMES / 2 { GREEN } else { BLUE };
        surface.fill_circle(pickup.pos, pickup.radius, color);
    }

    for effect in state.explosions.iter().chain(&state.bonus_effects) {
        draw_particles(surface, effect);
    }

    for text in &state.bonus_texts {
        match &text.dissolve {
            None => surface.draw_text(&text.label, text.pos, WHITE, BONUS_FONT_SIZE),
            Some(effect) => draw_particles(surface, effect),
        }
    }

    if settings.show_hud {
        surface.draw_text(&format!("Score: {}", state.score), Vec2::new(10.0, 10.0), WHITE, FONT_SIZE);
        surface.draw_text(
            &format!("Lives: {}", state.lives),
            Vec2::new(width - 150.0, 10.0),
            WHITE,
            FONT_SIZE,
        );
        surface.draw_text(
            &format!("Level: {}", state.level + 1),
            Vec2::new(width / 2.0 - 50.0, 10.0),
            WHITE,
            FONT_SIZE,
        );
    }

    match &state.overlay {
        Overlay::None => {}
        Overlay::Paused => draw_pause(surface, width, height),
        Overlay::ExitConfirm(dialog) => {
            draw_pause(surface, width, height);
            draw_exit_dialog(surface, dialog, width, height);
        }
    }
}

fn draw_pause(surface: &mut impl Surface, width: f32, height: f32) {
    surface.draw_text("Paused", Vec2::new(width / 2.0 - 50.0, height / 2.0), WHITE, PAUSE_FONT_SIZE);
}

fn option_color(index: usize, selected: usize) -> Rgb {
    if index == selected { WHITE } else { GREY }
}

fn draw_exit_dialog(surface: &mut impl Surface, dialog: &ConfirmDialog, width: f32, height: f32) {
    let x = ((width - DIALOG_WIDTH) / 2.0).floor();
    let y = ((height - DIALOG_HEIGHT) / 2.0).floor();
    let frame = Rect::new(x, y, DIALOG_WIDTH, DIALOG_HEIGHT);

    surface.fill_rect(frame, BLACK);
    surface.stroke_rect(frame, WHITE, 2.0);
    surface.draw_text(
        "Return to the main menu?",
        Vec2::new(x + 10.0, y + 50.0),
        WHITE,
        BONUS_FONT_SIZE,
    );
    for (i, option) in ConfirmDialog::OPTIONS.iter().enumerate() {
        surface.draw_text(
            option,
            Vec2::new(x + 100.0 + i as f32 * 150.0, y + 120.0),
            option_color(i, dialog.selected),
            BONUS_FONT_SIZE,
        );
    }
}

/// Draw the main menu, or its quit prompt when open
pub fn draw_menu(surface: &mut impl Surface, menu: &MainMenu, settings: &Settings, width: f32, height: f32) {
    surface.clear(BLACK);
    let center = Vec2::new(width / 2.0, height / 2.0);

    if let Some(dialog) = &menu.quit_dialog {
        draw_centered(
            surface,
            "Are you sure you want to quit?",
            center - Vec2::new(0.0, 50.0),
            WHITE,
            FONT_SIZE,
        );
        for (i, option) in ConfirmDialog::OPTIONS.iter().enumerate() {
            let pos = center + Vec2::new((i as f32 - 0.5) * 100.0, 50.0);
            draw_centered(surface, option, pos, option_color(i, dialog.selected), FONT_SIZE);
        }
        return;
    }

    for (i, option) in MenuOption::ALL.iter().enumerate() {
        let pos = center + Vec2::new(0.0, i as f32 * 50.0);
        draw_centered(
            surface,
            option.label(settings.muted),
            pos,
            option_color(i, menu.selected),
            FONT_SIZE,
        );
    }
}

/// Final-score screen shown until the restart key
pub fn draw_game_over(surface: &mut impl Surface, state: &GameState) {
    let width = state.tuning.screen_width;
    let height = state.tuning.screen_height;
    surface.clear(BLACK);
    surface.draw_text(
        &format!("Game over! Your score: {}", state.score),
        Vec2::new(width / 2.0 - 150.0, height / 2.0 - 50.0),
        WHITE,
        FONT_SIZE,
    );
    surface.draw_text(
        "Press SPACE to play again",
        Vec2::new(width / 2.0 - 250.0, height / 2.0),
        WHITE,
        FONT_SIZE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::sim::{BonusText, EffectKind, GamePhase};
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session() -> GameState {
        GameState::new(Tuning::default(), 77)
    }

    fn draw(state: &GameState) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        draw_session(&mut surface, state, &Settings::default());
        surface
    }

    #[test]
    fn inactive_tiles_are_skipped_and_hits_labelled() {
        let mut state = session();
        for tile in &mut state.tiles {
            tile.active = false;
        }
        state.tiles[0].active = true;
        state.tiles[0].hits = 3;
        let surface = draw(&state);

        let tile_rects = surface.filled_rects().filter(|(r, _)| *r == state.tiles[0].rect).count();
        assert_eq!(tile_rects, 1);
        // Tile plus paddle
        assert_eq!(surface.filled_rects().count(), 2);
        assert!(surface.texts().any(|t| t == "3"));
    }

    #[test]
    fn paddle_raised_by_jump_and_hidden_when_invisible() {
        let mut state = session();
        state.paddle.jump = 4.0;
        let surface = draw(&state);
        let expected = Rect::new(350.0, 546.0, 100.0, 20.0);
        assert!(surface.filled_rects().any(|(r, c)| r == expected && c == WHITE));

        state.paddle.visible = false;
        let surface = draw(&state);
        assert!(!surface.filled_rects().any(|(r, _)| r.y > 500.0));
    }

    #[test]
    fn pickup_blinks_green_then_blue() {
        let mut state = session();
        state.pickup.active = true;
        state.pickup.pos = Vec2::new(100.0, 100.0);
        state.pickup.frame = 2;
        let surface = draw(&state);
        assert!(surface.circles().any(|(c, r, col)| c == state.pickup.pos && r == 15.0 && col == GREEN));

        state.pickup.frame = 7;
        let surface = draw(&state);
        assert!(surface.circles().any(|(c, _, col)| c == state.pickup.pos && col == BLUE));
    }

    #[test]
    fn only_live_particles_are_drawn() {
        let mut state = session();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spent = Effect::spawn(&mut rng, EffectKind::TileExplosion, Vec2::ZERO, 5, 1);
        spent.advance();
        state.explosions.push(spent);
        state
            .bonus_effects
            .push(Effect::spawn(&mut rng, EffectKind::BonusBurst, Vec2::ZERO, 4, 10));
        let surface = draw(&state);
        let particles = surface.circles().filter(|(_, r, _)| *r == PARTICLE_RADIUS).count();
        assert_eq!(particles, 4);
    }

    #[test]
    fn bonus_text_label_then_particles() {
        let mut state = session();
        let mut rng = Pcg32::seed_from_u64(2);
        state
            .bonus_texts
            .push(BonusText::new(Vec2::new(200.0, 200.0), "Ball slowed!", 0, 2_000));
        assert!(draw(&state).has_text("Ball slowed!"));

        state.bonus_texts[0].update(&mut rng, 2_000);
        let surface = draw(&state);
        assert!(!surface.has_text("Ball slowed!"));
        assert!(surface.circles().filter(|(_, r, _)| *r == PARTICLE_RADIUS).count() > 0);
    }

    #[test]
    fn hud_respects_setting() {
        let state = session();
        let surface = draw(&state);
        assert!(surface.has_text("Score: 0"));
        assert!(surface.has_text("Lives: 3"));
        assert!(surface.has_text("Level: 1"));

        let mut settings = Settings::default();
        settings.show_hud = false;
        let mut surface = RecordingSurface::new();
        draw_session(&mut surface, &state, &settings);
        assert!(!surface.has_text("Score"));
    }

    #[test]
    fn overlays() {
        let mut state = session();
        state.overlay = Overlay::Paused;
        let surface = draw(&state);
        assert!(surface.has_text("Paused"));
        assert!(!surface.has_text("main menu"));

        state.overlay = Overlay::ExitConfirm(ConfirmDialog { selected: 1 });
        let surface = draw(&state);
        assert!(surface.has_text("Paused"));
        assert!(surface.has_text("Return to the main menu?"));
        assert_eq!(surface.text_color("Yes"), Some(GREY));
        assert_eq!(surface.text_color("No"), Some(WHITE));
        assert!(surface
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::StrokeRect { width, .. } if *width == 2.0)));
    }

    #[test]
    fn menu_and_quit_prompt() {
        let mut menu = MainMenu::new();
        let mut settings = Settings::default();
        let mut surface = RecordingSurface::new();
        draw_menu(&mut surface, &menu, &settings, 800.0, 600.0);
        assert_eq!(surface.text_color("Start game"), Some(WHITE));
        assert_eq!(surface.text_color("Sound: on"), Some(GREY));

        settings.muted = true;
        menu.quit_dialog = Some(ConfirmDialog::new());
        draw_menu(&mut surface, &menu, &settings, 800.0, 600.0);
        assert!(surface.has_text("Are you sure you want to quit?"));
        assert!(!surface.has_text("Start game"));
    }

    #[test]
    fn game_over_shows_final_score() {
        let mut state = session();
        state.score = 420;
        state.phase = GamePhase::GameOver;
        let mut surface = RecordingSurface::new();
        draw_game_over(&mut surface, &state);
        assert!(surface.has_text("Game over! Your score: 420"));
        assert!(surface.has_text("SPACE"));
    }
}
