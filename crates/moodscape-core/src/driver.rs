/// Who steps the particle engine each display frame.
///
/// The page starts with its own animation loop. Once a script calls the
/// exported `onFrame`, that script owns stepping and the built-in loop
/// stands down, so the canvas is never faded or simulated twice per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FrameDriver {
    #[default]
    Internal,
    External,
}

impl FrameDriver {
    /// Record a frame request from `source`; returns whether to step now.
    pub fn accept(&mut self, source: FrameDriver) -> bool {
        match (*self, source) {
            (FrameDriver::Internal, FrameDriver::External) => {
                log::info!("[frame] external driver took over");
                *self = FrameDriver::External;
                true
            }
            (FrameDriver::External, FrameDriver::Internal) => false,
            _ => true,
        }
    }
}
