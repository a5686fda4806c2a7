//! Power-ups
//!
//! Six bonus kinds. Four are timed: each holds one absolute deadline slot and
//! reverts when the clock passes it. Re-activating a timed kind that is still
//! running only pushes its deadline out; the effect is not applied twice.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::effects::{BonusText, Effect};
use super::state::{Ball, GameEvent, GameState};

/// Bonus types a pickup can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    ExtendBat,
    SlowBall,
    ExtraLife,
    SpeedUp,
    MultiBall,
    Invisibility,
}

impl BonusKind {
    pub const ALL: [BonusKind; 6] = [
        BonusKind::ExtendBat,
        BonusKind::SlowBall,
        BonusKind::ExtraLife,
        BonusKind::SpeedUp,
        BonusKind::MultiBall,
        BonusKind::Invisibility,
    ];

    /// Uniform pick over all kinds
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&BonusKind::ExtraLife)
    }

    /// On-screen label shown on pickup
    pub fn label(&self) -> &'static str {
        match self {
            BonusKind::ExtendBat => "Bat extended!",
            BonusKind::SlowBall => "Ball slowed!",
            BonusKind::ExtraLife => "+1 life!",
            BonusKind::SpeedUp => "Ball sped up!",
            BonusKind::MultiBall => "Multi-ball!",
            BonusKind::Invisibility => "Invisibility!",
        }
    }

    /// Timed kinds revert on expiry; the rest are instantaneous
    pub fn is_timed(&self) -> bool {
        matches!(
            self,
            BonusKind::ExtendBat | BonusKind::SlowBall | BonusKind::SpeedUp | BonusKind::Invisibility
        )
    }
}

/// Absolute deadlines (clock ms) of the timed power-ups. Zero means inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpTimers {
    pub extend_bat: u64,
    pub slow_ball: u64,
    pub speed_up: u64,
    pub invisibility: u64,
}

impl PowerUpTimers {
    fn slot_mut(&mut self, kind: BonusKind) -> Option<&mut u64> {
        match kind {
            BonusKind::ExtendBat => Some(&mut self.extend_bat),
            BonusKind::SlowBall => Some(&mut self.slow_ball),
            BonusKind::SpeedUp => Some(&mut self.speed_up),
            BonusKind::Invisibility => Some(&mut self.invisibility),
            BonusKind::ExtraLife | BonusKind::MultiBall => None,
        }
    }

    pub fn deadline(&self, kind: BonusKind) -> u64 {
        match kind {
            BonusKind::ExtendBat => self.extend_bat,
            BonusKind::SlowBall => self.slow_ball,
            BonusKind::SpeedUp => self.speed_up,
            BonusKind::Invisibility => self.invisibility,
            BonusKind::ExtraLife | BonusKind::MultiBall => 0,
        }
    }

    pub fn is_active(&self, kind: BonusKind) -> bool {
        self.deadline(kind) != 0
    }

    /// Arm (or re-arm) a timed slot. Returns false for instantaneous kinds.
    pub fn arm(&mut self, kind: BonusKind, deadline: u64) -> bool {
        match self.slot_mut(kind) {
            Some(slot) => {
                *slot = deadline.max(1);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, kind: BonusKind) {
        if let Some(slot) = self.slot_mut(kind) {
            *slot = 0;
        }
    }

    /// Timed kinds whose deadline has passed
    pub fn due(&self, now_ms: u64) -> Vec<BonusKind> {
        BonusKind::ALL
            .into_iter()
            .filter(|kind| kind.is_timed())
            .filter(|&kind| {
                let deadline = self.deadline(kind);
                deadline != 0 && now_ms >= deadline
            })
            .collect()
    }
}

fn scale_balls(balls: &mut [Ball], factor: f32) {
    for ball in balls {
        ball.vel *= factor;
    }
}

fn reset_ball_speed(balls: &mut [Ball], base: Vec2) {
    for ball in balls {
        ball.vel = base;
    }
}

/// Apply a bonus picked up at `at`: effect, deadline, label and burst
pub fn activate_bonus(state: &mut GameState, kind: BonusKind, at: Vec2, now_ms: u64) {
    let already_running = state.timers.is_active(kind);

    match kind {
        BonusKind::ExtendBat => {
            if !already_running {
                state.paddle.extended = true;
                state.paddle.clamp(state.tuning.screen_width);
            }
        }
        BonusKind::SlowBall => {
            if !already_running {
                scale_balls(&mut state.balls, 0.5);
            }
        }
        BonusKind::SpeedUp => {
            if !already_running {
                scale_balls(&mut state.balls, 1.5);
            }
        }
        BonusKind::ExtraLife => {
            state.lives = state.lives.saturating_add(1);
        }
        BonusKind::MultiBall => {
            let origin = state.balls.first().map_or_else(|| state.screen_center(), |b| b.pos);
            let speed = state.tuning.multi_ball_speed;
            for _ in 0..2 {
                let vel = Vec2::new(
                    *[-speed, speed].choose(&mut state.rng).unwrap_or(&speed),
                    *[-speed, speed].choose(&mut state.rng).unwrap_or(&speed),
                );
                state.balls.push(Ball::new(origin, vel, state.tuning.ball_radius));
            }
        }
        BonusKind::Invisibility => {
            state.paddle.visible = false;
        }
    }

    if state.timers.arm(kind, now_ms + state.tuning.powerup_duration_ms) {
        log::debug!(
            "{:?} {} until {}ms",
            kind,
            if already_running { "extended" } else { "active" },
            state.timers.deadline(kind)
        );
    } else {
        log::debug!("{:?} applied", kind);
    }

    state.bonus_texts.push(BonusText::new(at, kind.label(), now_ms, state.tuning.bonus_text_ms));
    state.bonus_effects.push(Effect::bonus_burst(&mut state.rng, at));
    state.events.push(GameEvent::BonusActivated(kind));
}

/// Revert a timed bonus and clear its slot
pub fn expire_bonus(state: &mut GameState, kind: BonusKind) {
    match kind {
        BonusKind::ExtendBat => {
            state.paddle.extended = false;
        }
        BonusKind::SlowBall | BonusKind::SpeedUp => {
            let base = state.base_velocity();
            reset_ball_speed(&mut state.balls, base);
        }
        BonusKind::Invisibility => {
            state.paddle.visible = true;
        }
        BonusKind::ExtraLife | BonusKind::MultiBall => {}
    }
    state.timers.clear(kind);
    state.events.push(GameEvent::BonusExpired(kind));
    log::debug!("{:?} expired", kind);
}

/// Expire every timed bonus whose deadline has passed
pub fn expire_due(state: &mut GameState, now_ms: u64) {
    for kind in state.timers.due(now_ms) {
        expire_bonus(state, kind);
    }
}
