// Host-side tests for the synthesized reverb impulse.

use moodscape_core::ImpulseResponse;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn impulse(seed: u64) -> ImpulseResponse {
    let mut rng = StdRng::seed_from_u64(seed);
    ImpulseResponse::generate(1000.0, 2.0, 1.5, &mut rng)
}

#[test]
fn length_is_sample_rate_times_duration() {
    let ir = impulse(1);
    assert_eq!(ir.len(), 2000);
    assert_eq!(ir.right.len(), 2000);
    assert!((ir.duration_sec() - 2.0).abs() < 1e-6);
}

#[test]
fn left_decays_and_right_swells() {
    let ir = impulse(2);
    let n = ir.len() as f32;
    for i in 0..ir.len() {
        let t = i as f32;
        let left_env = (1.0 - t / n).powf(1.5);
        let right_env = (1.0 - (n - t) / n).powf(1.5);
        assert!(ir.left[i].abs() <= left_env + 1e-6, "left sample {} above envelope", i);
        assert!(ir.right[i].abs() <= right_env + 1e-6, "right sample {} above envelope", i);
    }
    assert_eq!(ir.right[0], 0.0);
}

#[test]
fn energy_moves_from_left_to_right() {
    let ir = impulse(3);
    let half = ir.len() / 2;
    let energy = |s: &[f32]| s.iter().map(|x| x * x).sum::<f32>();
    assert!(energy(&ir.left[..half]) > energy(&ir.left[half..]));
    assert!(energy(&ir.right[..half]) < energy(&ir.right[half..]));
}

#[test]
fn same_seed_same_room() {
    assert_eq!(impulse(9).left, impulse(9).left);
    assert_ne!(impulse(9).left, impulse(10).left);
}

#[test]
fn zero_duration_is_empty() {
    let mut rng = StdRng::seed_from_u64(0);
    let ir = ImpulseResponse::generate(44100.0, 0.0, 1.5, &mut rng);
    assert!(ir.is_empty());
    assert_eq!(ir.duration_sec(), 0.0);
}
