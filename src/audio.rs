use futures_util::future::{FutureExt, LocalBoxFuture};
use moodscape_core::{AudioBackend, AudioError, ImpulseResponse};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// `AudioBackend` over a browser `AudioContext`.
pub struct WebAudioBackend {
    ctx: web::AudioContext,
}

fn node_error(label: &'static str, e: JsValue) -> AudioError {
    log::error!("{} node error: {:?}", label, e);
    AudioError::NodeCreation(label, format!("{:?}", e))
}

fn connection_error(e: JsValue) -> AudioError {
    AudioError::Connection(format!("{:?}", e))
}

impl WebAudioBackend {
    pub fn new() -> Result<Self, AudioError> {
        let ctx = web::AudioContext::new().map_err(|e| AudioError::Backend(format!("{:?}", e)))?;
        Ok(Self { ctx })
    }

    fn start_scheduled(
        source: web::AudioScheduledSourceNode,
    ) -> Result<web::AudioScheduledSourceNode, AudioError> {
        source
            .start()
            .map_err(|e| AudioError::Backend(format!("start: {:?}", e)))?;
        Ok(source)
    }
}

impl AudioBackend for WebAudioBackend {
    type Node = web::AudioNode;
    type Buffer = web::AudioBuffer;
    type Source = web::AudioScheduledSourceNode;

    fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate()
    }

    fn current_time(&self) -> f64 {
        self.ctx.current_time()
    }

    fn resume(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            _ = self.ctx.resume();
        }
    }

    fn destination(&self) -> web::AudioNode {
        self.ctx.destination().into()
    }

    fn create_gain(&self, value: f32) -> Result<web::AudioNode, AudioError> {
        let g = web::GainNode::new(&self.ctx).map_err(|e| node_error("Gain", e))?;
        g.gain().set_value(value);
        Ok(g.into())
    }

    fn create_convolver(&self, impulse: &ImpulseResponse) -> Result<web::AudioNode, AudioError> {
        let reverb = web::ConvolverNode::new(&self.ctx).map_err(|e| node_error("Convolver", e))?;
        let ir = self
            .ctx
            .create_buffer(2, impulse.len() as u32, impulse.sample_rate)
            .map_err(|e| node_error("Impulse buffer", e))?;
        for (channel, data) in [&impulse.left, &impulse.right].into_iter().enumerate() {
            let mut samples = data.clone();
            ir.copy_to_channel(&mut samples, channel as i32)
                .map_err(|e| node_error("Impulse buffer", e))?;
        }
        reverb.set_buffer(Some(&ir));
        Ok(reverb.into())
    }

    fn create_merger(&self, inputs: u32) -> Result<web::AudioNode, AudioError> {
        let merger = self
            .ctx
            .create_channel_merger_with_number_of_inputs(inputs)
            .map_err(|e| node_error("ChannelMerger", e))?;
        Ok(merger.into())
    }

    fn connect(&self, from: &web::AudioNode, to: &web::AudioNode) -> Result<(), AudioError> {
        from.connect_with_audio_node(to)
            .map(|_| ())
            .map_err(connection_error)
    }

    fn set_gain_at(&self, gain: &web::AudioNode, value: f32, when: f64) {
        if let Some(g) = gain.dyn_ref::<web::GainNode>() {
            _ = g.gain().cancel_scheduled_values(when);
            _ = g.gain().set_value_at_time(value, when);
        }
    }

    fn ramp_gain_to(&self, gain: &web::AudioNode, value: f32, when: f64) {
        if let Some(g) = gain.dyn_ref::<web::GainNode>() {
            _ = g.gain().linear_ramp_to_value_at_time(value, when);
        }
    }

    fn start_buffer(
        &self,
        buffer: &web::AudioBuffer,
        looping: bool,
        dest: &web::AudioNode,
    ) -> Result<web::AudioScheduledSourceNode, AudioError> {
        let src =
            web::AudioBufferSourceNode::new(&self.ctx).map_err(|e| node_error("BufferSource", e))?;
        src.set_buffer(Some(buffer));
        src.set_loop(looping);
        src.connect_with_audio_node(dest).map_err(connection_error)?;
        Self::start_scheduled(src.into())
    }

    fn start_oscillator(
        &self,
        frequency_hz: f32,
        dest: &web::AudioNode,
        input: u32,
    ) -> Result<web::AudioScheduledSourceNode, AudioError> {
        let osc = web::OscillatorNode::new(&self.ctx).map_err(|e| node_error("Oscillator", e))?;
        osc.set_type(web::OscillatorType::Sine);
        osc.frequency().set_value(frequency_hz);
        osc.connect_with_audio_node_and_output_and_input(dest, 0, input)
            .map_err(connection_error)?;
        Self::start_scheduled(osc.into())
    }

    fn stop_source(&self, source: web::AudioScheduledSourceNode) {
        _ = source.stop();
        _ = source.disconnect();
    }

    fn decode<'a>(
        &'a self,
        asset: &'a str,
    ) -> LocalBoxFuture<'a, Result<web::AudioBuffer, AudioError>> {
        async move {
            let fail = |reason: String| AudioError::Decode {
                asset: asset.to_string(),
                reason,
            };
            let window = web::window().ok_or_else(|| fail("no window".into()))?;
            let resp: web::Response = JsFuture::from(window.fetch_with_str(asset))
                .await
                .map_err(|e| fail(format!("{:?}", e)))?
                .dyn_into()
                .map_err(|e| fail(format!("{:?}", e)))?;
            if !resp.ok() {
                return Err(fail(format!("HTTP {}", resp.status())));
            }
            let bytes = resp.array_buffer().map_err(|e| fail(format!("{:?}", e)))?;
            let bytes: js_sys::ArrayBuffer = JsFuture::from(bytes)
                .await
                .map_err(|e| fail(format!("{:?}", e)))?
                .dyn_into()
                .map_err(|e| fail(format!("{:?}", e)))?;
            let decoding = self
                .ctx
                .decode_audio_data(&bytes)
                .map_err(|e| fail(format!("{:?}", e)))?;
            JsFuture::from(decoding)
                .await
                .map_err(|e| fail(format!("{:?}", e)))?
                .dyn_into::<web::AudioBuffer>()
                .map_err(|e| fail(format!("{:?}", e)))
        }
        .boxed_local()
    }
}
