// Host-side tests for the particle engine, drawn through a recording painter.

use glam::Vec2;
use moodscape_core::{spawn_params, Hsba, Painter, Particle, ParticleEngine, PresetKey, Trail};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct RecordingPainter {
    fades: Vec<(f32, f32, f32)>,
    circles: Vec<(Vec2, f32, Hsba)>,
    segments: Vec<(Vec2, Vec2, f32, Hsba)>,
}

impl RecordingPainter {
    fn clear(&mut self) {
        self.fades.clear();
        self.circles.clear();
        self.segments.clear();
    }
}

impl Painter for RecordingPainter {
    fn fade(&mut self, width: f32, height: f32, alpha: f32) {
        self.fades.push((width, height, alpha));
    }

    fn fill_circle(&mut self, center: Vec2, diameter: f32, color: Hsba) {
        self.circles.push((center, diameter, color));
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2, weight: f32, color: Hsba) {
        self.segments.push((from, to, weight, color));
    }
}

const CENTER: Vec2 = Vec2::new(400.0, 300.0);

fn engine(preset: PresetKey) -> ParticleEngine {
    let mut e = ParticleEngine::new(7);
    e.resize(800.0, 600.0);
    e.set_active_preset(preset);
    e
}

fn run(
    e: &mut ParticleEngine,
    painter: &mut RecordingPainter,
    frames: usize,
    pointer: Option<Vec2>,
) {
    for _ in 0..frames {
        e.on_frame(pointer, painter);
    }
}

#[test]
fn idle_pointer_only_fades_the_canvas() {
    let mut e = engine(PresetKey::Calm);
    let mut painter = RecordingPainter::default();
    run(&mut e, &mut painter, 10, None);
    assert!(e.particles().is_empty());
    assert_eq!(painter.fades.len(), 10);
    assert_eq!(painter.fades[0], (800.0, 600.0, 0.05));
    assert!(painter.circles.is_empty());
    assert_eq!(e.frame_count(), 10);
}

#[test]
fn fade_alpha_follows_active_preset() {
    let mut painter = RecordingPainter::default();
    for (preset, alpha) in [
        (PresetKey::Calm, 0.05),
        (PresetKey::Dopamine, 0.1),
        (PresetKey::Oxytocin, 0.05),
        (PresetKey::Psilocybin, 0.05),
        (PresetKey::Caapi, 0.1),
    ] {
        painter.clear();
        let mut e = engine(preset);
        e.on_frame(None, &mut painter);
        assert_eq!(painter.fades[0].2, alpha, "fade alpha for {}", preset);
    }
}

#[test]
fn pressed_pointer_spawns_two_per_frame() {
    let mut e = engine(PresetKey::Calm);
    let mut painter = RecordingPainter::default();
    e.on_frame(Some(CENTER), &mut painter);
    assert_eq!(e.particles().len(), 2);
    run(&mut e, &mut painter, 4, Some(CENTER));
    assert_eq!(e.particles().len(), 10);
    run(&mut e, &mut painter, 5, None);
    assert_eq!(e.particles().len(), 10, "releasing the pointer stops spawning");
}

#[test]
fn spawned_particle_starts_within_preset_ranges() {
    let mut rng = StdRng::seed_from_u64(3);
    for preset in PresetKey::ALL {
        let p = spawn_params(preset);
        for _ in 0..50 {
            let particle = Particle::spawn(preset, CENTER, &mut rng);
            let speed = particle.velocity.length();
            assert!(
                speed >= p.speed.0 - 1e-4 && speed <= p.speed.1 + 1e-4,
                "{} speed {} out of range",
                preset,
                speed
            );
            assert!(particle.size >= p.size.0 && particle.size < p.size.1);
            assert!(particle.hue >= p.hue.0 && particle.hue < p.hue.1);
            assert_eq!(particle.lifespan, p.lifespan);
            assert_eq!(particle.position, CENTER);
            assert_eq!(particle.preset(), preset);
        }
    }
}

#[test]
fn dopamine_particle_lives_sixty_updates() {
    let mut e = engine(PresetKey::Dopamine);
    let mut painter = RecordingPainter::default();
    e.on_frame(Some(CENTER), &mut painter);
    run(&mut e, &mut painter, 59, None);
    assert_eq!(e.particles().len(), 2, "alive at lifespan exactly zero");
    assert!(e.particles().iter().all(|p| p.lifespan == 0.0));

    e.on_frame(None, &mut painter);
    assert!(e.particles().is_empty());
    assert_eq!(e.removed_count(), 2);
}

#[test]
fn calm_particle_lives_one_hundred_seventy_updates() {
    let mut e = engine(PresetKey::Calm);
    let mut painter = RecordingPainter::default();
    e.on_frame(Some(CENTER), &mut painter);
    run(&mut e, &mut painter, 169, None);
    assert_eq!(e.particles().len(), 2);
    e.on_frame(None, &mut painter);
    assert!(e.particles().is_empty());
}

#[test]
fn particles_keep_their_spawn_preset() {
    let mut e = engine(PresetKey::Calm);
    let mut painter = RecordingPainter::default();
    e.on_frame(Some(CENTER), &mut painter);
    e.set_active_preset(PresetKey::Dopamine);
    assert_eq!(e.active_preset(), PresetKey::Dopamine);
    e.on_frame(Some(CENTER), &mut painter);

    let presets: Vec<PresetKey> = e.particles().iter().map(|p| p.preset()).collect();
    assert_eq!(
        presets,
        vec![
            PresetKey::Calm,
            PresetKey::Calm,
            PresetKey::Dopamine,
            PresetKey::Dopamine
        ]
    );
    // calm particles still decay at the calm rate
    assert_eq!(e.particles()[0].lifespan, 255.0 - 1.5 * 2.0);
}

#[test]
fn speeds_never_exceed_preset_caps() {
    for (preset, cap) in [
        (PresetKey::Dopamine, 8.0),
        (PresetKey::Oxytocin, 1.0),
        (PresetKey::Psilocybin, 3.0),
        (PresetKey::Caapi, 2.0),
    ] {
        let mut e = engine(preset);
        let mut painter = RecordingPainter::default();
        for _ in 0..120 {
            e.on_frame(Some(CENTER), &mut painter);
            for p in e.particles() {
                assert!(
                    p.velocity.length() <= cap + 1e-4,
                    "{} speed {} above cap {}",
                    preset,
                    p.velocity.length(),
                    cap
                );
            }
        }
    }
}

#[test]
fn trails_stop_growing_at_their_cap() {
    for (preset, cap) in [(PresetKey::Psilocybin, 25), (PresetKey::Caapi, 40)] {
        let mut e = engine(preset);
        let mut painter = RecordingPainter::default();
        e.on_frame(Some(CENTER), &mut painter);
        run(&mut e, &mut painter, 99, None);
        for p in e.particles() {
            let trail = p.trail().expect("trail");
            assert_eq!(trail.len(), cap, "{} trail length", preset);
            assert_eq!(trail.cap(), cap);
        }
    }
}

#[test]
fn trail_evicts_oldest_point_first() {
    let mut trail = Trail::new(25);
    for i in 0..30 {
        trail.push(Vec2::new(i as f32, 0.0));
    }
    let xs: Vec<f32> = trail.iter().map(|p| p.x).collect();
    assert_eq!(xs.len(), 25);
    assert_eq!(xs[0], 5.0);
    assert_eq!(xs[24], 29.0);
}

#[test]
fn trail_records_position_before_each_move() {
    let mut e = engine(PresetKey::Psilocybin);
    let mut painter = RecordingPainter::default();
    e.on_frame(Some(CENTER), &mut painter);
    for p in e.particles() {
        let trail: Vec<Vec2> = p.trail().expect("trail").iter().copied().collect();
        assert_eq!(trail, vec![CENTER]);
        assert_ne!(p.position, CENTER);
    }
}

#[test]
fn non_trail_presets_have_no_trail() {
    let mut rng = StdRng::seed_from_u64(1);
    for preset in [PresetKey::Calm, PresetKey::Dopamine, PresetKey::Oxytocin] {
        assert!(Particle::spawn(preset, CENTER, &mut rng).trail().is_none());
    }
}

#[test]
fn hues_stay_wrapped() {
    let mut e = engine(PresetKey::Oxytocin);
    let mut painter = RecordingPainter::default();
    for _ in 0..200 {
        e.on_frame(Some(CENTER), &mut painter);
        assert!(e
            .particles()
            .iter()
            .all(|p| p.hue >= 0.0 && p.hue < 360.0));
    }
}

#[test]
fn calm_draws_one_circle_with_life_alpha() {
    let mut e = engine(PresetKey::Calm);
    let mut painter = RecordingPainter::default();
    e.on_frame(Some(CENTER), &mut painter);
    assert_eq!(painter.circles.len(), 2);
    let (center, diameter, color) = painter.circles[0];
    let p = &e.particles()[0];
    assert_eq!(center, p.position);
    assert_eq!(diameter, p.size);
    assert!((color.alpha - (255.0 - 1.5) / 255.0).abs() < 1e-6);
    assert_eq!(color.saturation, 90.0);
    assert_eq!(color.brightness, 90.0);
}

#[test]
fn dopamine_and_oxytocin_draw_a_halo() {
    for preset in [PresetKey::Dopamine, PresetKey::Oxytocin] {
        let mut e = engine(preset);
        let mut painter = RecordingPainter::default();
        e.on_frame(Some(CENTER), &mut painter);
        assert_eq!(painter.circles.len(), 4, "{} draws two circles each", preset);
        let size = e.particles()[0].size;
        let diameters: Vec<f32> = painter.circles[..2].iter().map(|c| c.1).collect();
        assert!(diameters.contains(&size));
        assert!(diameters.contains(&(size * 1.5)));
    }
}

#[test]
fn caapi_draws_only_its_trail() {
    let mut e = engine(PresetKey::Caapi);
    let mut painter = RecordingPainter::default();
    e.on_frame(Some(CENTER), &mut painter);
    assert!(painter.segments.is_empty(), "single point draws nothing");
    e.on_frame(None, &mut painter);
    painter.clear();
    e.on_frame(None, &mut painter);
    assert!(painter.circles.is_empty());
    // 3 points per trail, 2 particles
    assert_eq!(painter.segments.len(), 4);
}

#[test]
fn psilocybin_trail_fades_in_towards_the_head() {
    let mut e = engine(PresetKey::Psilocybin);
    let mut painter = RecordingPainter::default();
    e.on_frame(Some(CENTER), &mut painter);
    run(&mut e, &mut painter, 9, None);
    painter.clear();
    e.on_frame(None, &mut painter);
    let first_particle: Vec<f32> = painter.segments[..10].iter().map(|s| s.3.alpha).collect();
    assert!(first_particle.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(painter.circles.len(), 2, "head circle per particle");
}

#[test]
fn separate_engines_do_not_share_particles() {
    let mut a = engine(PresetKey::Calm);
    let mut b = engine(PresetKey::Calm);
    let mut painter = RecordingPainter::default();
    run(&mut a, &mut painter, 5, Some(CENTER));
    run(&mut b, &mut painter, 5, None);
    assert_eq!(a.particles().len(), 10);
    assert!(b.particles().is_empty());
}

#[test]
fn same_seed_gives_same_simulation() {
    let mut a = engine(PresetKey::Caapi);
    let mut b = engine(PresetKey::Caapi);
    let mut painter = RecordingPainter::default();
    run(&mut a, &mut painter, 30, Some(CENTER));
    run(&mut b, &mut painter, 30, Some(CENTER));
    let pa: Vec<Vec2> = a.particles().iter().map(|p| p.position).collect();
    let pb: Vec<Vec2> = b.particles().iter().map(|p| p.position).collect();
    assert_eq!(pa, pb);
}

#[test]
fn dopamine_session_reaches_steady_population() {
    let mut e = engine(PresetKey::Dopamine);
    let mut painter = RecordingPainter::default();
    run(&mut e, &mut painter, 150, Some(CENTER));
    // spawned during the last 60 frames survive
    assert_eq!(e.particles().len(), 120);
    assert!(e.particles().len() < 300);
    assert_eq!(e.removed_count(), 180);
    assert!(e
        .particles()
        .iter()
        .all(|p| p.hue >= 0.0 && p.hue < 360.0));
}

#[test]
fn resize_keeps_live_particles() {
    let mut e = engine(PresetKey::Calm);
    let mut painter = RecordingPainter::default();
    run(&mut e, &mut painter, 3, Some(CENTER));
    e.resize(1024.0, 768.0);
    assert_eq!(e.viewport(), Vec2::new(1024.0, 768.0));
    assert_eq!(e.particles().len(), 6);
    painter.clear();
    e.on_frame(None, &mut painter);
    assert_eq!(painter.fades[0], (1024.0, 768.0, 0.05));
}

#[test]
fn active_preset_round_trip_leaves_particles_alone() {
    let mut e = engine(PresetKey::Calm);
    let mut painter = RecordingPainter::default();
    run(&mut e, &mut painter, 3, Some(CENTER));
    let before: Vec<(Vec2, f32)> = e.particles().iter().map(|p| (p.position, p.lifespan)).collect();
    for key in PresetKey::ALL {
        e.set_active_preset(key);
        assert_eq!(e.active_preset(), key);
    }
    let after: Vec<(Vec2, f32)> = e.particles().iter().map(|p| (p.position, p.lifespan)).collect();
    assert_eq!(before, after);
    assert_eq!(e.frame_count(), 3);
}
