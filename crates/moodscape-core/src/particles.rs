//! Pointer-driven particle simulation.
//!
//! Each particle is tagged with the preset that was active when it spawned
//! and keeps following that preset's motion and render rules for its whole
//! life. The engine owns the live collection, a coherent noise field and its
//! own RNG, so independent instances never share state.

use crate::constants::{NOISE_SEED_RANGE, TRAIL_CAP_CAAPI, TRAIL_CAP_PSILOCYBIN};
use crate::paint::{wrap_hue, Hsba, Painter};
use crate::preset::PresetKey;
use glam::Vec2;
use noise::{NoiseFn, Perlin};
use rand::prelude::*;
use std::collections::VecDeque;
use std::f32::consts::TAU;

/// Per-preset spawn ranges and per-frame rates.
#[derive(Clone, Copy, Debug)]
pub struct SpawnParams {
    pub speed: (f32, f32),
    pub lifespan: f32,
    pub decay: f32,
    pub size: (f32, f32),
    pub hue: (f32, f32),
    pub hue_drift: f32,
    pub speed_cap: Option<f32>,
}

const CALM: SpawnParams = SpawnParams {
    speed: (0.5, 2.0),
    lifespan: 255.0,
    decay: 1.5,
    size: (5.0, 15.0),
    hue: (180.0, 280.0), // blues, purples
    hue_drift: 0.5,
    speed_cap: None,
};

const DOPAMINE: SpawnParams = SpawnParams {
    speed: (2.0, 5.0),
    lifespan: 150.0,
    decay: 2.5,
    size: (3.0, 10.0),
    hue: (0.0, 60.0), // reds to yellows
    hue_drift: 1.0,
    speed_cap: Some(8.0),
};

const OXYTOCIN: SpawnParams = SpawnParams {
    speed: (0.3, 1.0),
    lifespan: 220.0,
    decay: 1.2,
    size: (20.0, 40.0),
    hue: (330.0, 360.0), // pinks
    hue_drift: 0.1,
    speed_cap: Some(1.0),
};

const PSILOCYBIN: SpawnParams = SpawnParams {
    speed: (1.0, 3.0),
    lifespan: 255.0,
    decay: 1.0,
    size: (2.0, 6.0),
    hue: (150.0, 300.0),
    hue_drift: 0.3,
    speed_cap: Some(3.0),
};

const CAAPI: SpawnParams = SpawnParams {
    speed: (0.5, 1.5),
    lifespan: 300.0,
    decay: 0.8,
    size: (1.0, 4.0),
    hue: (80.0, 160.0), // earthy greens
    hue_drift: 0.1,
    speed_cap: Some(2.0),
};

#[inline]
pub fn spawn_params(preset: PresetKey) -> &'static SpawnParams {
    match preset {
        PresetKey::Calm => &CALM,
        PresetKey::Dopamine => &DOPAMINE,
        PresetKey::Oxytocin => &OXYTOCIN,
        PresetKey::Psilocybin => &PSILOCYBIN,
        PresetKey::Caapi => &CAAPI,
    }
}

/// Smooth 2D noise mapped into `[0, 1]`.
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    pub fn sample(&self, x: f64, y: f64) -> f32 {
        let v = self.perlin.get([x, y]) as f32;
        (v * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

/// Bounded history of positions, oldest first.
#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<Vec2>,
    cap: usize,
}

impl Trail {
    pub fn new(cap: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(cap + 1),
            cap,
        }
    }

    /// Append a point, evicting the oldest one once the cap is exceeded.
    pub fn push(&mut self, point: Vec2) {
        self.points.push_back(point);
        if self.points.len() > self.cap {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }
}

/// Preset-specific motion state carried by a particle.
#[derive(Clone, Debug)]
pub enum Motion {
    Calm,
    Dopamine { acceleration: Vec2 },
    Oxytocin { saturation: f32 },
    Psilocybin { noise_offset: Vec2, trail: Trail },
    Caapi { noise_offset: Vec2, trail: Trail },
}

impl Motion {
    pub fn preset(&self) -> PresetKey {
        match self {
            Motion::Calm => PresetKey::Calm,
            Motion::Dopamine { .. } => PresetKey::Dopamine,
            Motion::Oxytocin { .. } => PresetKey::Oxytocin,
            Motion::Psilocybin { .. } => PresetKey::Psilocybin,
            Motion::Caapi { .. } => PresetKey::Caapi,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Dead once this goes below zero; never clamped.
    pub lifespan: f32,
    pub size: f32,
    pub hue: f32,
    pub motion: Motion,
}

fn noise_offset(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.gen_range(0.0..NOISE_SEED_RANGE),
        rng.gen_range(0.0..NOISE_SEED_RANGE),
    )
}

impl Particle {
    /// Create a particle at `at` using the spawn ranges of `preset`.
    pub fn spawn(preset: PresetKey, at: Vec2, rng: &mut impl Rng) -> Self {
        let p = spawn_params(preset);
        let direction = Vec2::from_angle(rng.gen_range(0.0..TAU));
        let velocity = direction * rng.gen_range(p.speed.0..p.speed.1);
        let size = rng.gen_range(p.size.0..p.size.1);
        let hue = rng.gen_range(p.hue.0..p.hue.1);
        let motion = match preset {
            PresetKey::Calm => Motion::Calm,
            PresetKey::Dopamine => Motion::Dopamine {
                acceleration: Vec2::ZERO,
            },
            PresetKey::Oxytocin => Motion::Oxytocin {
                saturation: rng.gen_range(50.0..70.0),
            },
            PresetKey::Psilocybin => Motion::Psilocybin {
                noise_offset: noise_offset(rng),
                trail: Trail::new(TRAIL_CAP_PSILOCYBIN),
            },
            PresetKey::Caapi => Motion::Caapi {
                noise_offset: noise_offset(rng),
                trail: Trail::new(TRAIL_CAP_CAAPI),
            },
        };
        Self {
            position: at,
            velocity,
            lifespan: p.lifespan,
            size,
            hue,
            motion,
        }
    }

    #[inline]
    pub fn preset(&self) -> PresetKey {
        self.motion.preset()
    }

    #[inline]
    pub fn params(&self) -> &'static SpawnParams {
        spawn_params(self.preset())
    }

    pub fn trail(&self) -> Option<&Trail> {
        match &self.motion {
            Motion::Psilocybin { trail, .. } | Motion::Caapi { trail, .. } => Some(trail),
            _ => None,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.lifespan < 0.0
    }

    /// Advance one frame. `frame_count` is the engine's global frame counter.
    pub fn update(&mut self, field: &NoiseField, frame_count: u64) {
        let p = self.params();
        match &mut self.motion {
            Motion::Calm => {}
            Motion::Dopamine { acceleration } => {
                self.velocity += *acceleration;
            }
            Motion::Oxytocin { .. } => {
                self.velocity.x += (self.position.y * 0.01).sin() * 0.02;
                self.velocity.y += (self.position.x * 0.01).cos() * 0.02;
            }
            Motion::Psilocybin {
                noise_offset,
                trail,
            } => {
                let t = frame_count as f64 * 0.005;
                let n = field.sample(noise_offset.x as f64 + t, noise_offset.y as f64 + t);
                self.velocity += Vec2::from_angle(n * TAU * 4.0) * 0.1;
                trail.push(self.position);
            }
            Motion::Caapi {
                noise_offset,
                trail,
            } => {
                let n = field.sample(
                    (noise_offset.x + self.position.x * 0.008) as f64,
                    (noise_offset.y + self.position.y * 0.008) as f64,
                );
                self.velocity += Vec2::from_angle(n * TAU * 2.0) * 0.08;
                trail.push(self.position);
            }
        }
        if let Some(cap) = p.speed_cap {
            self.velocity = self.velocity.clamp_length_max(cap);
        }
        self.lifespan -= p.decay;
        self.hue = wrap_hue(self.hue + p.hue_drift);
        self.position += self.velocity;
    }

    pub fn render<P: Painter + ?Sized>(&self, painter: &mut P) {
        let life = self.lifespan / self.params().lifespan;
        match &self.motion {
            Motion::Calm => {
                painter.fill_circle(self.position, self.size, Hsba::new(self.hue, 90.0, 90.0, life));
            }
            Motion::Dopamine { .. } => {
                painter.fill_circle(
                    self.position,
                    self.size,
                    Hsba::new(self.hue, 100.0, 100.0, life),
                );
                // sparkle halo
                painter.fill_circle(
                    self.position,
                    self.size * 1.5,
                    Hsba::new(self.hue, 50.0, 100.0, life * 0.5),
                );
            }
            Motion::Oxytocin { saturation } => {
                painter.fill_circle(
                    self.position,
                    self.size * 1.5,
                    Hsba::new(self.hue, saturation - 20.0, 100.0, life * 0.2),
                );
                painter.fill_circle(
                    self.position,
                    self.size,
                    Hsba::new(self.hue, *saturation, 100.0, life * 0.6),
                );
            }
            Motion::Psilocybin { trail, .. } => {
                stroke_trail(painter, trail, (1.0, self.size), life, |i| {
                    Hsba::new(self.hue + i * 0.5, 90.0, 90.0, 1.0)
                });
                painter.fill_circle(
                    self.position,
                    self.size,
                    Hsba::new(self.hue, 90.0, 100.0, life),
                );
            }
            Motion::Caapi { trail, .. } => {
                stroke_trail(painter, trail, (0.5, self.size), life * 0.7, |i| {
                    Hsba::new(self.hue + i * 0.2, 60.0, 80.0, 1.0)
                });
            }
        }
    }
}

/// Draw a trail as segments whose weight grows across `weights` and whose
/// alpha rises from transparent at the oldest point towards `max_alpha`.
fn stroke_trail<P: Painter + ?Sized>(
    painter: &mut P,
    trail: &Trail,
    weights: (f32, f32),
    max_alpha: f32,
    color_at: impl Fn(f32) -> Hsba,
) {
    let (min_weight, max_weight) = weights;
    let n = trail.len() as f32;
    let mut prev: Option<Vec2> = None;
    for (i, point) in trail.iter().enumerate() {
        if let Some(from) = prev {
            let t = i as f32 / n;
            let mut color = color_at(i as f32);
            color.alpha = (t * max_alpha).clamp(0.0, 1.0);
            let weight = min_weight + (max_weight - min_weight) * t;
            painter.stroke_segment(from, *point, weight, color);
        }
        prev = Some(*point);
    }
}

/// Owns the live particle collection and steps it once per display frame.
pub struct ParticleEngine {
    particles: Vec<Particle>,
    active: PresetKey,
    field: NoiseField,
    rng: StdRng,
    frame_count: u64,
    viewport: Vec2,
    removed: u64,
}

impl ParticleEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            active: PresetKey::default(),
            field: NoiseField::new(seed as u32),
            rng: StdRng::seed_from_u64(seed),
            frame_count: 0,
            viewport: Vec2::ZERO,
            removed: 0,
        }
    }

    /// Preset used for particles spawned from now on.
    pub fn set_active_preset(&mut self, preset: PresetKey) {
        self.active = preset;
    }

    pub fn active_preset(&self) -> PresetKey {
        self.active
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(0.0), height.max(0.0));
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total number of particles removed since construction.
    pub fn removed_count(&self) -> u64 {
        self.removed
    }

    /// Fade the canvas, spawn at the pointer if it is down, then update,
    /// draw and cull every live particle.
    pub fn on_frame<P: Painter + ?Sized>(&mut self, pointer: Option<Vec2>, painter: &mut P) {
        self.frame_count += 1;
        painter.fade(
            self.viewport.x,
            self.viewport.y,
            self.active.background_fade_alpha(),
        );

        if let Some(at) = pointer {
            for _ in 0..self.active.spawn_per_frame() {
                let particle = Particle::spawn(self.active, at, &mut self.rng);
                self.particles.push(particle);
            }
        }

        let field = &self.field;
        let frame_count = self.frame_count;
        let before = self.particles.len();
        self.particles.retain_mut(|p| {
            p.update(field, frame_count);
            p.render(painter);
            !p.is_dead()
        });
        self.removed += (before - self.particles.len()) as u64;
    }
}
