use super::*;
use std::cell::Cell;
use std::task::Waker;

use crate::encode::engine::StackItem;
use crate::foundation::core::{Point, Rgb};
use crate::foundation::error::EncodingError;
use crate::render::sink::Drawing;

struct OneBar {
    reject: bool,
}

impl Encoder for OneBar {
    fn encode(
        &self,
        drawing: &mut dyn Drawing,
        _bcid: &str,
        _text: &str,
        _opts: &Options,
    ) -> Result<(), EncodingError> {
        if self.reject {
            return Err(EncodingError::new("bwipp.unknownEncoder: no such symbology"));
        }
        drawing.init(4.0, 2.0);
        drawing.line(Point::new(0.5, 0.0), Point::new(0.5, 2.0), 1.0, Rgb::BLACK);
        Ok(())
    }

    fn encode_raw(
        &self,
        _drawing: &mut dyn Drawing,
        _bcid: &str,
        _text: &str,
        _opts: &Options,
    ) -> Result<Vec<StackItem>, EncodingError> {
        Ok(Vec::new())
    }
}

fn opts() -> Options {
    Options::new()
        .with("bcid", "code128")
        .with("text", "1")
        .with("scale", 3)
        .with("paddingwidth", 1)
}

#[test]
fn deferred_value_resolves_to_png() {
    let png = pollster::block_on(to_buffer(opts(), &OneBar { reject: false })).unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (18, 6));
}

#[test]
fn deferred_value_rejects_with_missing_field() {
    let err = pollster::block_on(to_buffer(
        opts().with("bcid", ""),
        &OneBar { reject: false },
    ))
    .unwrap_err();
    assert!(matches!(err, BarmillError::MissingField("bcid")));
}

#[test]
fn deferred_value_resolves_only_once() {
    let mut fut = to_buffer(opts(), &OneBar { reject: false });
    let mut cx = Context::from_waker(Waker::noop());
    assert!(matches!(
        Pin::new(&mut fut).poll(&mut cx),
        Poll::Ready(Ok(_))
    ));
    assert!(matches!(
        Pin::new(&mut fut).poll(&mut cx),
        Poll::Ready(Err(BarmillError::Validation(_)))
    ));
}

#[test]
fn callback_receives_exactly_one_result() {
    let calls = Cell::new(0);
    to_buffer_with(opts(), &OneBar { reject: false }, |res| {
        calls.set(calls.get() + 1);
        assert!(res.unwrap().starts_with(b"\x89PNG"));
    });
    assert_eq!(calls.get(), 1);
}

#[test]
fn callback_receives_engine_error() {
    let calls = Cell::new(0);
    to_buffer_with(opts(), &OneBar { reject: true }, |res| {
        calls.set(calls.get() + 1);
        let err = res.unwrap_err();
        assert_eq!(
            err.as_encoding().map(EncodingError::message),
            Some("bwipp.unknownEncoder: no such symbology")
        );
    });
    assert_eq!(calls.get(), 1);
}
