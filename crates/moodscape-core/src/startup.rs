//! One audio initialization shared by every caller.
//!
//! The page may ask for audio from several places before the first decode
//! finishes. Each caller gets a clone of the same in-flight future, so every
//! await resolves only once the graph and buffers exist.

use crate::audio::{load_assets, AudioEngine};
use crate::backend::AudioBackend;
use crate::error::AudioError;
use futures_util::future::{FutureExt, LocalBoxFuture, Shared};
use std::cell::RefCell;
use std::rc::Rc;

pub type StartupFuture = Shared<LocalBoxFuture<'static, Result<(), AudioError>>>;

pub struct AudioStartup<B: AudioBackend + 'static> {
    engine: Rc<RefCell<AudioEngine<B>>>,
    pending: Rc<RefCell<Option<StartupFuture>>>,
}

impl<B: AudioBackend + 'static> Clone for AudioStartup<B> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            pending: self.pending.clone(),
        }
    }
}

impl<B: AudioBackend + 'static> AudioStartup<B> {
    pub fn new(engine: Rc<RefCell<AudioEngine<B>>>) -> Self {
        Self {
            engine,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn engine(&self) -> &Rc<RefCell<AudioEngine<B>>> {
        &self.engine
    }

    pub fn is_loading(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Start initialization, or join the one already running. `make_backend`
    /// only runs for the call that starts the load.
    pub fn initialize<F>(&self, make_backend: F, assets: Vec<&'static str>) -> StartupFuture
    where
        F: FnOnce() -> Result<B, AudioError> + 'static,
    {
        if let Some(running) = self.pending.borrow().as_ref() {
            log::debug!("[audio] joining initialization in flight");
            return running.clone();
        }
        let engine = self.engine.clone();
        let pending = self.pending.clone();
        let load = async move {
            let result = if engine.borrow().is_initialized() {
                Ok(())
            } else {
                match make_backend() {
                    Ok(backend) => {
                        let buffers = load_assets(&backend, &assets).await;
                        engine.borrow_mut().initialize(backend, buffers)
                    }
                    Err(e) => Err(e),
                }
            };
            // later calls start fresh; a failed start can be retried
            pending.borrow_mut().take();
            result
        }
        .boxed_local()
        .shared();
        *self.pending.borrow_mut() = Some(load.clone());
        load
    }
}
