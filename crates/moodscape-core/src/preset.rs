use crate::constants::{ALPHA_BEAT_HZ, FADE_ALPHA_SHORT, FADE_ALPHA_SOFT, SPAWN_PER_FRAME, THETA_BEAT_HZ};
use crate::error::PresetError;
use std::fmt;
use std::str::FromStr;

/// Identity of one of the five mood presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PresetKey {
    #[default]
    Calm,
    Dopamine,
    Oxytocin,
    Psilocybin,
    Caapi,
}

impl PresetKey {
    /// Every preset, in intro slideshow order.
    pub const ALL: [PresetKey; 5] = [
        PresetKey::Calm,
        PresetKey::Dopamine,
        PresetKey::Oxytocin,
        PresetKey::Psilocybin,
        PresetKey::Caapi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PresetKey::Calm => "calm",
            PresetKey::Dopamine => "dopamine",
            PresetKey::Oxytocin => "oxytocin",
            PresetKey::Psilocybin => "psilocybin",
            PresetKey::Caapi => "caapi",
        }
    }

    pub fn preset(self) -> &'static Preset {
        &PRESETS[self as usize]
    }

    /// Carrier frequency of the left-ear binaural tone.
    #[inline]
    pub fn binaural_base_hz(self) -> f32 {
        match self {
            PresetKey::Dopamine => 140.0,
            PresetKey::Oxytocin => 100.0, // lower, warmer
            PresetKey::Psilocybin => 80.0,
            PresetKey::Caapi => 60.0,
            PresetKey::Calm => 110.0,
        }
    }

    /// Alpha of the black overlay painted over the canvas each frame.
    #[inline]
    pub fn background_fade_alpha(self) -> f32 {
        match self {
            PresetKey::Dopamine | PresetKey::Caapi => FADE_ALPHA_SHORT,
            _ => FADE_ALPHA_SOFT,
        }
    }

    #[inline]
    pub fn spawn_per_frame(self) -> usize {
        SPAWN_PER_FRAME
    }

    /// Only the calm preset layers the ambient loop under its music.
    #[inline]
    pub fn has_ambient_layer(self) -> bool {
        matches!(self, PresetKey::Calm)
    }
}

impl fmt::Display for PresetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetKey {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| PresetError(s.to_string()))
    }
}

/// Immutable display and asset record for a preset.
#[derive(Clone, Debug)]
pub struct Preset {
    pub key: PresetKey,
    pub title: &'static str,
    /// May contain a single `<br>` separating the two sentences.
    pub subtitle: &'static str,
    pub background: &'static str,
    pub music: &'static str,
}

/// Looping ambient recording used by the calm preset.
pub const AMBIENT_ASSET: &str = "nature-sounds.mp3";

/// Indexed by `PresetKey as usize`.
pub static PRESETS: [Preset; 5] = [
    Preset {
        key: PresetKey::Calm,
        title: "Calma Creativa",
        subtitle: "Una simulación segura y recreativa de los efectos positivos percibidos del cannabis en el cerebro.<br>El objetivo es ayudarte a encontrar un espacio de relajación y creatividad, como una herramienta de apoyo para reducir o dejar el consumo.",
        background: "calm-background.png",
        music: "calm-music.mp3",
    },
    Preset {
        key: PresetKey::Dopamine,
        title: "Euforia Energética",
        subtitle: "Una experiencia estimulante para aumentar la motivación y la energía positiva.<br>Utiliza estímulos visuales y auditivos vibrantes para generar una sensación de recompensa y euforia, ideal para empezar el día o una tarea creativa.",
        background: "dopamine-background.png",
        music: "dopamine-music.mp3",
    },
    Preset {
        key: PresetKey::Oxytocin,
        title: "Conexión Empática",
        subtitle: "Fomenta sentimientos de amor, confianza y conexión social.<br>Una experiencia diseñada para evocar calidez y empatía, recordándote la belleza de las relaciones humanas y el afecto.",
        background: "oxytocin-background.png",
        music: "oxytocin-music.mp3",
    },
    Preset {
        key: PresetKey::Psilocybin,
        title: "Viaje Místico",
        subtitle: "Una exploración introspectiva y sensorial inspirada en los efectos de la psilocibina.<br>Diseñado para expandir la percepción, fomentar la creatividad y conectar con la naturaleza de la conciencia.",
        background: "psilocybin-background.png",
        music: "psilocybin-music.mp3",
    },
    Preset {
        key: PresetKey::Caapi,
        title: "Viaje de Introspección",
        subtitle: "Inspirado en la liana Banisteriopsis caapi, esta experiencia te guía hacia un profundo viaje interior.<br>Un espacio para la reflexión, la sanación y la conexión con las raíces de tu ser.",
        background: "caapi-background.png",
        music: "caapi-music.mp3",
    },
];

/// Every asset the audio engine decodes at start-up: five music loops plus ambience.
pub fn all_assets() -> Vec<&'static str> {
    let mut assets: Vec<&'static str> = PRESETS.iter().map(|p| p.music).collect();
    assets.push(AMBIENT_ASSET);
    assets
}

/// Whether and at which beat frequency the binaural pair is synthesized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BinauralMode {
    #[default]
    None,
    Alpha,
    Theta,
}

impl BinauralMode {
    /// Lenient parse of the radio value: anything that is not `none` or `alpha` is theta.
    pub fn from_key(key: &str) -> Self {
        match key {
            "none" => BinauralMode::None,
            "alpha" => BinauralMode::Alpha,
            _ => BinauralMode::Theta,
        }
    }

    /// Frequency difference between the two ears, if beats are enabled.
    pub fn beat_hz(self) -> Option<f32> {
        match self {
            BinauralMode::None => None,
            BinauralMode::Alpha => Some(ALPHA_BEAT_HZ),
            BinauralMode::Theta => Some(THETA_BEAT_HZ),
        }
    }
}
