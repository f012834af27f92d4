// Shared audio/visual tuning constants used by the engines and the web frontend.

// Mix levels (linear gain)
pub const MASTER_LEVEL: f32 = 0.8;
pub const MUSIC_LEVEL: f32 = 0.6;
pub const AMBIENT_LEVEL: f32 = 0.4;
pub const BINAURAL_LEVEL: f32 = 0.1; // beats stay well under the music

// Reverb impulse
pub const REVERB_SECONDS: f32 = 2.0;
pub const REVERB_DECAY: f32 = 1.5;

// Binaural beat offsets (Hz added to the right ear)
pub const ALPHA_BEAT_HZ: f32 = 10.0;
pub const THETA_BEAT_HZ: f32 = 6.0;

// Timing (seconds)
pub const FADE_OUT_SEC: f64 = 1.5;
pub const SESSION_SEC: f64 = 90.0;
pub const SCREEN_TRANSITION_SEC: f64 = 1.5;
pub const INTRO_FADE_SEC: f64 = 1.0;

// Particles
pub const SPAWN_PER_FRAME: usize = 2;
pub const TRAIL_CAP_PSILOCYBIN: usize = 25;
pub const TRAIL_CAP_CAAPI: usize = 40;
pub const NOISE_SEED_RANGE: f32 = 1000.0;

// Background overlay alpha; higher alpha gives shorter trails
pub const FADE_ALPHA_SOFT: f32 = 0.05;
pub const FADE_ALPHA_SHORT: f32 = 0.1;

// Colour model ranges (HSB)
pub const HUE_MAX: f32 = 360.0;
pub const SAT_MAX: f32 = 100.0;
pub const BRIGHT_MAX: f32 = 100.0;
