use rand::Rng;

/// Two-channel noise burst used as the convolution reverb's impulse.
///
/// The left channel decays from full scale towards silence while the right
/// channel's envelope is mirrored and swells towards the end, which gives
/// the tail a slow left-to-right drift.
#[derive(Clone, Debug)]
pub struct ImpulseResponse {
    pub sample_rate: f32,
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

impl ImpulseResponse {
    /// Generate `floor(sample_rate * seconds)` frames with envelopes raised to `decay`.
    pub fn generate(sample_rate: f32, seconds: f32, decay: f32, rng: &mut impl Rng) -> Self {
        let len = (sample_rate * seconds).max(0.0) as usize;
        let mut left = Vec::with_capacity(len);
        let mut right = Vec::with_capacity(len);
        let n = len as f32;
        for i in 0..len {
            let i = i as f32;
            left.push(rng.gen_range(-1.0..1.0) * (1.0 - i / n).powf(decay));
            right.push(rng.gen_range(-1.0..1.0) * (1.0 - (n - i) / n).powf(decay));
        }
        Self {
            sample_rate,
            left,
            right,
        }
    }

    /// Frames per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn duration_sec(&self) -> f32 {
        if self.sample_rate > 0.0 {
            self.len() as f32 / self.sample_rate
        } else {
            0.0
        }
    }
}
