//! Off-thread conversion: one request in, one rendered grid out.

use std::sync::mpsc;
use std::thread;

use rayon::prelude::*;

use crate::config::ConversionConfig;
use crate::render::RenderedGrid;
use crate::{convert, AsciifyError, Result};

/// Pixels plus the config to convert them with.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub pixels: Vec<u8>,
    pub config: ConversionConfig,
}

impl ConversionRequest {
    pub fn new(pixels: Vec<u8>, config: ConversionConfig) -> Self {
        Self { pixels, config }
    }

    pub fn run(&self) -> Result<RenderedGrid> {
        convert(&self.pixels, &self.config)
    }
}

/// Handle to a conversion running on its own thread.
pub struct PendingConversion {
    response: mpsc::Receiver<Result<RenderedGrid>>,
    handle: thread::JoinHandle<()>,
}

impl PendingConversion {
    /// Block until the worker replies.
    pub fn wait(self) -> Result<RenderedGrid> {
        let response = self.response.recv();
        if self.handle.join().is_err() {
            return Err(AsciifyError::Worker("conversion thread panicked".into()));
        }
        response.map_err(|_| AsciifyError::Worker("conversion thread sent no response".into()))?
    }
}

/// Start converting `request` on a dedicated thread.
pub fn spawn_conversion(request: ConversionRequest) -> Result<PendingConversion> {
    let (tx, rx) = mpsc::sync_channel(1);
    let handle = thread::Builder::new()
        .name("asciify-worker".into())
        .spawn(move || {
            log::trace!(
                "worker converting {}x{} image",
                request.config.source_width,
                request.config.source_height
            );
            // Receiver may be gone if the caller dropped the handle
            let _ = tx.send(request.run());
        })?;
    Ok(PendingConversion {
        response: rx,
        handle,
    })
}

/// Convert independent requests in parallel. Results keep request order.
pub fn convert_batch(requests: &[ConversionRequest]) -> Vec<Result<RenderedGrid>> {
    requests.par_iter().map(ConversionRequest::run).collect()
}
