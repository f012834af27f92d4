// Element ids, CSS class names and timer lengths used by the page glue.
// Engine tuning lives in `moodscape_core::constants`.
use moodscape_core::constants::{INTRO_FADE_SEC, SCREEN_TRANSITION_SEC, SESSION_SEC};

// Canvas
pub const CANVAS_ID: &str = "experience-canvas";

// Screens
pub const INTRO_SCREEN_ID: &str = "intro-screen";
pub const START_SCREEN_ID: &str = "start-screen";
pub const EXPERIENCE_SCREEN_ID: &str = "experience-screen";
pub const END_SCREEN_ID: &str = "end-screen";

// Intro slideshow
pub const INTRO_TITLE_ID: &str = "intro-title";
pub const INTRO_SUBTITLE_ID: &str = "intro-subtitle";
pub const INTRO_TEXT_ID: &str = "intro-text-container";

// Start screen
pub const START_BUTTON_ID: &str = "start-button";
pub const RESTART_BUTTON_ID: &str = "restart-button";
pub const MAIN_TITLE_ID: &str = "main-title";
pub const MAIN_SUBTITLE_ID: &str = "main-subtitle";
pub const PRESET_RADIO_NAME: &str = "trip-type";
pub const BINAURAL_RADIO_NAME: &str = "binaural";
pub const DEFAULT_PRESET_RADIO_ID: &str = "trip-calm";

// CSS classes
pub const HIDDEN_CLASS: &str = "d-none";
pub const SCREEN_FADE_IN: &str = "screen-fade-in";
pub const SCREEN_FADE_OUT: &str = "screen-fade-out";
pub const TEXT_FADE_IN: &str = "text-fade-in";
pub const TEXT_FADE_OUT: &str = "text-fade-out";

// Timers (milliseconds)
pub const INTRO_FADE_MS: i32 = (INTRO_FADE_SEC * 1000.0) as i32;
pub const SCREEN_TRANSITION_MS: i32 = (SCREEN_TRANSITION_SEC * 1000.0) as i32;
pub const SESSION_MS: i32 = (SESSION_SEC * 1000.0) as i32;

// Diagnostics
pub const FRAME_REPORT_SEC: f32 = 5.0;
