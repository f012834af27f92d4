//! Layered playback: a looping music bed, an optional ambient loop and an
//! optional binaural pair, mixed through a shared reverb into a master bus.
//!
//! The graph (gains + convolver) is built once by [`AudioEngine::initialize`]
//! and lives as long as the engine. Every [`AudioEngine::play`] creates a
//! fresh [`Voice`] of single-use sources; [`AudioEngine::stop`] fades the
//! master bus out and [`AudioEngine::finish_stop`] tears the voice down once
//! the fade has elapsed.

use crate::backend::AudioBackend;
use crate::constants::{
    AMBIENT_LEVEL, BINAURAL_LEVEL, FADE_OUT_SEC, MASTER_LEVEL, MUSIC_LEVEL, REVERB_DECAY,
    REVERB_SECONDS,
};
use crate::error::AudioError;
use crate::impulse::ImpulseResponse;
use crate::preset::{BinauralMode, PresetKey, AMBIENT_ASSET};
use fnv::FnvHashMap;
use futures_util::future::join_all;
use rand::prelude::*;
use smallvec::{smallvec, SmallVec};

/// Linear gain of each bus.
#[derive(Clone, Debug)]
pub struct MixLevels {
    pub master: f32,
    pub music: f32,
    pub ambient: f32,
    pub binaural: f32,
}

impl Default for MixLevels {
    fn default() -> Self {
        Self {
            master: MASTER_LEVEL,
            music: MUSIC_LEVEL,
            ambient: AMBIENT_LEVEL,
            binaural: BINAURAL_LEVEL,
        }
    }
}

/// Shape of the synthesized reverb impulse.
#[derive(Clone, Debug)]
pub struct ReverbParams {
    pub seconds: f32,
    pub decay: f32,
}

impl Default for ReverbParams {
    fn default() -> Self {
        Self {
            seconds: REVERB_SECONDS,
            decay: REVERB_DECAY,
        }
    }
}

/// Engine parameters fixed at construction time.
///
/// - `levels` sets the bus gains; `levels.master` is also the level the master
///   bus returns to after a fade-out
/// - `fade_out_sec` is the length of the master ramp started by `stop`
/// - `impulse_seed` seeds the reverb noise so the room sounds the same every load
#[derive(Clone, Debug)]
pub struct AudioParams {
    pub levels: MixLevels,
    pub reverb: ReverbParams,
    pub fade_out_sec: f64,
    pub impulse_seed: u64,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            levels: MixLevels::default(),
            reverb: ReverbParams::default(),
            fade_out_sec: FADE_OUT_SEC,
            impulse_seed: 0x1234_ABCD,
        }
    }
}

/// Decoded buffers keyed by asset reference.
pub struct BufferCache<B> {
    buffers: FnvHashMap<String, B>,
}

impl<B> Default for BufferCache<B> {
    fn default() -> Self {
        Self {
            buffers: FnvHashMap::default(),
        }
    }
}

impl<B> BufferCache<B> {
    pub fn get(&self, asset: &str) -> Option<&B> {
        self.buffers.get(asset)
    }

    pub fn insert(&mut self, asset: &str, buffer: B) {
        self.buffers.insert(asset.to_string(), buffer);
    }

    pub fn contains(&self, asset: &str) -> bool {
        self.buffers.contains_key(asset)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

/// Decode every asset concurrently. A failed asset is logged and left out of
/// the cache; it never aborts the other loads.
pub async fn load_assets<B: AudioBackend>(backend: &B, assets: &[&str]) -> BufferCache<B::Buffer> {
    let mut unique: Vec<&str> = Vec::with_capacity(assets.len());
    for asset in assets {
        if !unique.contains(asset) {
            unique.push(*asset);
        }
    }

    let loads = unique.iter().map(|&asset| async move { (asset, backend.decode(asset).await) });
    let mut cache = BufferCache::default();
    for (asset, result) in join_all(loads).await {
        match result {
            Ok(buffer) => cache.insert(asset, buffer),
            Err(e) => log::error!("[audio] error loading audio file {}: {}", asset, e),
        }
    }
    log::info!("[audio] decoded {}/{} assets", cache.len(), unique.len());
    cache
}

/// Persistent part of the graph.
struct AudioGraph<B: AudioBackend> {
    backend: B,
    master: B::Node,
    music: B::Node,
    ambient: B::Node,
    binaural: B::Node,
}

impl<B: AudioBackend> AudioGraph<B> {
    // music, ambient -> reverb -> master -> out; binaural -> master (dry)
    fn build(backend: B, params: &AudioParams) -> Result<Self, AudioError> {
        let levels = &params.levels;
        let master = backend.create_gain(levels.master)?;
        backend.connect(&master, &backend.destination())?;

        let mut rng = StdRng::seed_from_u64(params.impulse_seed);
        let impulse = ImpulseResponse::generate(
            backend.sample_rate(),
            params.reverb.seconds,
            params.reverb.decay,
            &mut rng,
        );
        let reverb = backend.create_convolver(&impulse)?;
        backend.connect(&reverb, &master)?;

        let music = backend.create_gain(levels.music)?;
        backend.connect(&music, &reverb)?;

        let ambient = backend.create_gain(levels.ambient)?;
        backend.connect(&ambient, &reverb)?;

        let binaural = backend.create_gain(levels.binaural)?;
        backend.connect(&binaural, &master)?;

        Ok(Self {
            backend,
            master,
            music,
            ambient,
            binaural,
        })
    }

    fn start_binaural(
        &self,
        left_hz: f32,
        right_hz: f32,
    ) -> Result<SmallVec<[B::Source; 2]>, AudioError> {
        let merger = self.backend.create_merger(2)?;
        self.backend.connect(&merger, &self.binaural)?;
        let left = self.backend.start_oscillator(left_hz, &merger, 0)?;
        let right = match self.backend.start_oscillator(right_hz, &merger, 1) {
            Ok(r) => r,
            Err(e) => {
                self.backend.stop_source(left);
                return Err(e);
            }
        };
        Ok(smallvec![left, right])
    }
}

/// Sources created by a single `play`. Never restarted once stopped.
pub struct Voice<S> {
    pub preset: PresetKey,
    pub mode: BinauralMode,
    pub music: S,
    pub ambient: Option<S>,
    pub binaural: SmallVec<[S; 2]>,
    /// Left and right carrier frequencies when beats are running.
    pub binaural_hz: Option<(f32, f32)>,
}

enum Playback<S> {
    Idle,
    Playing(Voice<S>),
    FadingOut(Voice<S>),
}

pub struct AudioEngine<B: AudioBackend> {
    params: AudioParams,
    graph: Option<AudioGraph<B>>,
    buffers: BufferCache<B::Buffer>,
    playback: Playback<B::Source>,
}

impl<B: AudioBackend> Default for AudioEngine<B> {
    fn default() -> Self {
        Self::new(AudioParams::default())
    }
}

impl<B: AudioBackend> AudioEngine<B> {
    pub fn new(params: AudioParams) -> Self {
        Self {
            params,
            graph: None,
            buffers: BufferCache::default(),
            playback: Playback::Idle,
        }
    }

    pub fn params(&self) -> &AudioParams {
        &self.params
    }

    pub fn is_initialized(&self) -> bool {
        self.graph.is_some()
    }

    /// True from a successful `play` until `finish_stop` completes, fade included.
    pub fn is_playing(&self) -> bool {
        !matches!(self.playback, Playback::Idle)
    }

    pub fn is_fading_out(&self) -> bool {
        matches!(self.playback, Playback::FadingOut(_))
    }

    pub fn backend(&self) -> Option<&B> {
        self.graph.as_ref().map(|g| &g.backend)
    }

    pub fn buffers(&self) -> &BufferCache<B::Buffer> {
        &self.buffers
    }

    /// The active voice, including one that is currently fading out.
    pub fn voice(&self) -> Option<&Voice<B::Source>> {
        match &self.playback {
            Playback::Idle => None,
            Playback::Playing(v) | Playback::FadingOut(v) => Some(v),
        }
    }

    /// Build the persistent graph around `backend` and adopt the decoded
    /// buffers. Calling it again after success is a no-op.
    pub fn initialize(
        &mut self,
        backend: B,
        buffers: BufferCache<B::Buffer>,
    ) -> Result<(), AudioError> {
        if self.is_initialized() {
            log::debug!("[audio] already initialized");
            return Ok(());
        }
        backend.resume();
        let graph = AudioGraph::build(backend, &self.params)?;
        self.buffers = buffers;
        self.graph = Some(graph);
        log::info!("[audio] graph ready with {} buffers", self.buffers.len());
        Ok(())
    }

    /// Start the layers for `preset`. Ignored before initialization or while a
    /// voice is active; fails without side effects if the music is not loaded.
    pub fn play(&mut self, preset: PresetKey, mode: BinauralMode) -> Result<(), AudioError> {
        let Some(graph) = self.graph.as_ref() else {
            log::debug!("[audio] play ignored: not initialized");
            return Ok(());
        };
        if self.is_playing() {
            log::debug!("[audio] play ignored: already playing");
            return Ok(());
        }
        let music_asset = preset.preset().music;
        let Some(music_buffer) = self.buffers.get(music_asset) else {
            return Err(AudioError::MissingBuffer(music_asset));
        };

        graph.backend.resume();
        let music = graph.backend.start_buffer(music_buffer, true, &graph.music)?;

        let ambient = if preset.has_ambient_layer() {
            match self.buffers.get(AMBIENT_ASSET) {
                Some(buffer) => match graph.backend.start_buffer(buffer, true, &graph.ambient) {
                    Ok(src) => Some(src),
                    Err(e) => {
                        log::warn!("[audio] ambient layer skipped: {}", e);
                        None
                    }
                },
                None => {
                    log::warn!("[audio] ambient buffer not loaded; skipping layer");
                    None
                }
            }
        } else {
            None
        };

        let mut binaural = SmallVec::new();
        let mut binaural_hz = None;
        if let Some(beat) = mode.beat_hz() {
            let left_hz = preset.binaural_base_hz();
            let right_hz = left_hz + beat;
            match graph.start_binaural(left_hz, right_hz) {
                Ok(oscs) => {
                    binaural = oscs;
                    binaural_hz = Some((left_hz, right_hz));
                }
                Err(e) => log::warn!("[audio] binaural layer skipped: {}", e),
            }
        }

        log::info!(
            "[audio] playing {} ambient={} binaural={:?}",
            preset,
            ambient.is_some(),
            binaural_hz
        );
        self.playback = Playback::Playing(Voice {
            preset,
            mode,
            music,
            ambient,
            binaural,
            binaural_hz,
        });
        Ok(())
    }

    /// Begin fading the master bus to silence. Returns false (and does
    /// nothing) unless a voice is playing. The voice stays alive until
    /// `finish_stop`.
    pub fn stop(&mut self) -> bool {
        let voice = match std::mem::replace(&mut self.playback, Playback::Idle) {
            Playback::Playing(v) => v,
            other => {
                self.playback = other;
                log::debug!("[audio] stop ignored: not playing");
                return false;
            }
        };
        if let Some(graph) = &self.graph {
            let now = graph.backend.current_time();
            // anchor the ramp at the current level so it starts now
            graph
                .backend
                .set_gain_at(&graph.master, self.params.levels.master, now);
            graph
                .backend
                .ramp_gain_to(&graph.master, 0.0, now + self.params.fade_out_sec);
        }
        self.playback = Playback::FadingOut(voice);
        true
    }

    /// Stop and discard the fading voice, restore the master level and clear
    /// the playing state. No-op unless a fade-out is in progress.
    pub fn finish_stop(&mut self) {
        let voice = match std::mem::replace(&mut self.playback, Playback::Idle) {
            Playback::FadingOut(v) => v,
            other => {
                self.playback = other;
                return;
            }
        };
        if let Some(graph) = &self.graph {
            let Voice {
                music,
                ambient,
                binaural,
                ..
            } = voice;
            graph.backend.stop_source(music);
            if let Some(src) = ambient {
                graph.backend.stop_source(src);
            }
            for osc in binaural {
                graph.backend.stop_source(osc);
            }
            let now = graph.backend.current_time();
            graph
                .backend
                .set_gain_at(&graph.master, self.params.levels.master, now);
        }
        log::info!("[audio] stopped");
    }
}
