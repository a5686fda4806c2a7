//! Particle effects
//!
//! Purely visual: tile explosions, bonus pickup bursts and the dissolve of
//! bonus labels. Every particle of an effect is spawned up front; the effect
//! is done once all of them have run out of lifetime.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Rgb;
use crate::consts::*;

/// A single particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    /// Remaining lifetime in ticks
    pub life: i32,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// What spawned an effect (drives nothing but debugging and logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    TileExplosion,
    BonusBurst,
    TextDissolve,
}

/// An owned burst of particles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub origin: Vec2,
    pub particles: Vec<Particle>,
}

fn random_particle<R: Rng>(rng: &mut R, pos: Vec2, life: i32) -> Particle {
    Particle {
        pos,
        vel: Vec2::new(
            rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
            rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
        ),
        color: [rng.random(), rng.random(), rng.random()],
        life,
    }
}

impl Effect {
    /// Spawn `count` particles at `origin` with random velocity and colour
    pub fn spawn<R: Rng>(rng: &mut R, kind: EffectKind, origin: Vec2, count: usize, life: i32) -> Self {
        let particles = (0..count).map(|_| random_particle(rng, origin, life)).collect();
        Self {
            kind,
            origin,
            particles,
        }
    }

    /// Spawn `count` particles scattered up to `spread` pixels around `origin`
    pub fn scattered<R: Rng>(
        rng: &mut R,
        kind: EffectKind,
        origin: Vec2,
        count: usize,
        spread: f32,
        life: i32,
    ) -> Self {
        let particles = (0..count)
            .map(|_| {
                // Whole-pixel offsets
                let offset = Vec2::new(
                    rng.random_range(-spread..=spread).round(),
                    rng.random_range(-spread..=spread).round(),
                );
                random_particle(rng, origin + offset, life)
            })
            .collect();
        Self {
            kind,
            origin,
            particles,
        }
    }

    pub fn tile_explosion<R: Rng>(rng: &mut R, origin: Vec2) -> Self {
        Self::spawn(rng, EffectKind::TileExplosion, origin, BURST_PARTICLES, BURST_LIFETIME)
    }

    pub fn bonus_burst<R: Rng>(rng: &mut R, origin: Vec2) -> Self {
        Self::spawn(rng, EffectKind::BonusBurst, origin, BURST_PARTICLES, BURST_LIFETIME)
    }

    /// Move every particle one tick and burn one tick of lifetime
    pub fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.life -= 1;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.particles.iter().all(|p| !p.is_alive())
    }

    /// Particles that should still be drawn
    pub fn live_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }
}

/// Advance every effect in `effects` and drop the finished ones
pub fn advance_effects(effects: &mut Vec<Effect>) {
    for effect in effects.iter_mut() {
        effect.advance();
    }
    effects.retain(|e| !e.is_expired());
}

/// A floating label shown when a bonus is picked up.
///
/// Displays until `explode_at`, then dissolves into particles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusText {
    pub pos: Vec2,
    pub label: String,
    /// Clock time (ms) at which the label dissolves
    pub explode_at: u64,
    pub dissolve: Option<Effect>,
}

impl BonusText {
    pub fn new(pos: Vec2, label: impl Into<String>, now_ms: u64, display_ms: u64) -> Self {
        Self {
            pos,
            label: label.into(),
            explode_at: now_ms + display_ms,
            dissolve: None,
        }
    }

    /// Advance one tick: explode once due, then move the dissolve particles
    pub fn update<R: Rng>(&mut self, rng: &mut R, now_ms: u64) {
        if self.dissolve.is_none() && now_ms >= self.explode_at {
            let count = self.label.chars().count() * DISSOLVE_PARTICLES_PER_CHAR;
            self.dissolve = Some(Effect::scattered(
                rng,
                EffectKind::TextDissolve,
                self.pos,
                count,
                DISSOLVE_SPREAD,
                DISSOLVE_LIFETIME,
            ));
        }
        if let Some(effect) = &mut self.dissolve {
            effect.advance();
        }
    }

    /// Finished once the dissolve has burnt out
    pub fn is_finished(&self) -> bool {
        self.dissolve.as_ref().is_some_and(Effect::is_expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn spawn_respects_count_and_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let effect = Effect::spawn(&mut rng, EffectKind::TileExplosion, Vec2::new(10.0, 20.0), 50, 30);
        assert_eq!(effect.particles.len(), 50);
        for p in &effect.particles {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert!(p.vel.x.abs() <= 2.0 && p.vel.y.abs() <= 2.0);
            assert_eq!(p.life, 30);
        }
    }

    #[test]
    fn effect_expires_after_lifetime() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut effect = Effect::tile_explosion(&mut rng, Vec2::ZERO);
        for _ in 0..29 {
            effect.advance();
            assert!(!effect.is_expired());
        }
        effect.advance();
        assert!(effect.is_expired());
        assert_eq!(effect.live_particles().count(), 0);
    }

    #[test]
    fn advance_moves_by_velocity() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut effect = Effect::bonus_burst(&mut rng, Vec2::new(100.0, 100.0));
        let before: Vec<_> = effect.particles.iter().map(|p| (p.pos, p.vel)).collect();
        effect.advance();
        for (p, (pos, vel)) in effect.particles.iter().zip(before) {
            assert_eq!(p.pos, pos + vel);
        }
    }

    #[test]
    fn advance_effects_prunes_expired() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut effects = vec![
            Effect::spawn(&mut rng, EffectKind::TileExplosion, Vec2::ZERO, 3, 1),
            Effect::spawn(&mut rng, EffectKind::BonusBurst, Vec2::ZERO, 3, 5),
        ];
        advance_effects(&mut effects);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].kind, EffectKind::BonusBurst);
    }

    #[test]
    fn bonus_text_dissolves_after_display_time() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut text = BonusText::new(Vec2::new(400.0, 300.0), "Multi-ball!", 1_000, 2_000);

        text.update(&mut rng, 2_999);
        assert!(text.dissolve.is_none());

        text.update(&mut rng, 3_000);
        let dissolve = text.dissolve.as_ref().unwrap();
        assert_eq!(dissolve.particles.len(), "Multi-ball!".len() * 10);
        for p in &dissolve.particles {
            // Spawned within the spread, then advanced once
            assert!((p.pos.x - 400.0).abs() <= 52.0);
            assert!((p.pos.y - 300.0).abs() <= 52.0);
            assert_eq!(p.life, 59);
        }

        for _ in 0..59 {
            assert!(!text.is_finished());
            text.update(&mut rng, 4_000);
        }
        assert!(text.is_finished());
    }
}
