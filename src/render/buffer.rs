use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::encode::engine::Encoder;
use crate::foundation::error::{BarmillError, BarmillResult};
use crate::options::normalize::fixup_options;
use crate::options::record::Options;
use crate::render::pipeline::encode_into;
use crate::render::raster::RasterSink;
use crate::render::sink::DrawingSink;

/// PNG render whose compression runs when the value is first polled.
///
/// Resolves exactly once, to the image bytes or to the error that stopped the render.
#[must_use = "the PNG is only produced when the future is awaited"]
pub struct PendingPng {
    prepared: Option<BarmillResult<RasterSink>>,
}

impl Future for PendingPng {
    type Output = BarmillResult<Vec<u8>>;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        let out = match self.get_mut().prepared.take() {
            Some(prepared) => prepared.and_then(|mut sink| sink.finalize()),
            None => Err(BarmillError::validation("png future polled after completion")),
        };
        Poll::Ready(out)
    }
}

/// Buffer entry point, deferred form: normalize, encode now, compress on await.
#[tracing::instrument(skip_all)]
pub fn to_buffer(opts: Options, engine: &dyn Encoder) -> PendingPng {
    PendingPng {
        prepared: Some(prepare(opts, engine)),
    }
}

/// Buffer entry point, callback form: `done` is called exactly once.
pub fn to_buffer_with<F>(opts: Options, engine: &dyn Encoder, done: F)
where
    F: FnOnce(BarmillResult<Vec<u8>>),
{
    done(prepare(opts, engine).and_then(|mut sink| sink.finalize()));
}

fn prepare(mut opts: Options, engine: &dyn Encoder) -> BarmillResult<RasterSink> {
    fixup_options(&mut opts);
    let mut sink = RasterSink::new(&opts);
    encode_into(&opts, &mut sink, engine)?;
    Ok(sink)
}

#[cfg(test)]
#[path = "../../tests/unit/render/buffer.rs"]
mod tests;
