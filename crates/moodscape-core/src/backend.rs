//! Seam between the audio engine and a concrete audio platform.
//!
//! The web frontend implements this on top of a Web Audio `AudioContext`.
//! Node handles are cheap clones of platform objects. Sources are single-use:
//! `stop_source` consumes them, so a stopped source cannot be started or
//! stopped again.

use crate::error::AudioError;
use crate::impulse::ImpulseResponse;
use futures_util::future::LocalBoxFuture;

pub trait AudioBackend {
    /// Handle to a persistent graph node (gain, convolver, merger, output).
    type Node: Clone;
    /// Decoded PCM audio.
    type Buffer: Clone;
    /// A started buffer source or oscillator.
    type Source;

    fn sample_rate(&self) -> f32;

    /// Audio clock in seconds.
    fn current_time(&self) -> f64;

    /// Resume the context if the platform suspended it.
    fn resume(&self);

    fn destination(&self) -> Self::Node;

    fn create_gain(&self, value: f32) -> Result<Self::Node, AudioError>;

    fn create_convolver(&self, impulse: &ImpulseResponse) -> Result<Self::Node, AudioError>;

    fn create_merger(&self, inputs: u32) -> Result<Self::Node, AudioError>;

    fn connect(&self, from: &Self::Node, to: &Self::Node) -> Result<(), AudioError>;

    /// Schedule `gain` to jump to `value` at `when`.
    fn set_gain_at(&self, gain: &Self::Node, value: f32, when: f64);

    /// Schedule a linear ramp of `gain` that reaches `value` at `when`.
    fn ramp_gain_to(&self, gain: &Self::Node, value: f32, when: f64);

    /// Create a buffer source routed into `dest` and start it now.
    fn start_buffer(
        &self,
        buffer: &Self::Buffer,
        looping: bool,
        dest: &Self::Node,
    ) -> Result<Self::Source, AudioError>;

    /// Create a sine oscillator routed into input `input` of `dest` and start it now.
    fn start_oscillator(
        &self,
        frequency_hz: f32,
        dest: &Self::Node,
        input: u32,
    ) -> Result<Self::Source, AudioError>;

    fn stop_source(&self, source: Self::Source);

    /// Fetch and decode one asset.
    fn decode<'a>(&'a self, asset: &'a str) -> LocalBoxFuture<'a, Result<Self::Buffer, AudioError>>;
}
