use super::*;
use std::cell::RefCell;
use std::sync::Arc;

use serde_json::json;

use crate::encode::engine::{ArrayView, Dict};
use crate::foundation::core::FontSpec;
use crate::foundation::error::EncodingError;
use crate::render::sink::Drawing;

#[derive(Default)]
struct StackEncoder {
    seen: RefCell<Option<(String, String, Options)>>,
}

impl Encoder for StackEncoder {
    fn encode(
        &self,
        _drawing: &mut dyn Drawing,
        _bcid: &str,
        _text: &str,
        _opts: &Options,
    ) -> Result<(), EncodingError> {
        Err(EncodingError::new("raw-only engine"))
    }

    fn encode_raw(
        &self,
        drawing: &mut dyn Drawing,
        bcid: &str,
        text: &str,
        opts: &Options,
    ) -> Result<Vec<StackItem>, EncodingError> {
        *self.seen.borrow_mut() = Some((bcid.to_owned(), text.to_owned(), opts.clone()));
        if bcid == "nosuchcode" {
            return Err(EncodingError::new("bwipp.unknownEncoder"));
        }
        let font = FontSpec {
            name: "OCR-B".to_owned(),
            width: 10.0,
            height: 10.0,
        };
        drawing.measure(text, &font);

        let backing: Arc<[Value]> = (0..12).map(|i| json!(i)).collect::<Vec<_>>().into();
        let first = Dict::new()
            .with("ren", RawValue::Scalar(json!("renlinear")))
            .with("sbs", ArrayView::new(Arc::clone(&backing), 2, 5).into())
            .with("bhs", ArrayView::new(Arc::clone(&backing), 0, 3).into())
            .with("height", json!(0.5).into())
            .with("opt", RawValue::Scalar(json!({"inkspread": 0.15})));
        let second = Dict::new()
            .with("pixs", ArrayView::whole(vec![json!(1), json!(0), json!(1)]).into())
            .with("pixx", json!(3).into())
            .with("pixy", json!(1).into());
        Ok(vec![
            StackItem::Dict(first),
            StackItem::Other(RawValue::Scalar(json!("stray"))),
            StackItem::Dict(second),
        ])
    }
}

#[test]
fn records_keep_only_recognized_fields_in_order() {
    let engine = StackEncoder::default();
    let records = extract_raw(RawInput::parts("code128", "12345", Options::new()), &engine).unwrap();
    assert_eq!(records.len(), 2);

    let keys: Vec<_> = records[0].keys().collect();
    assert_eq!(keys, vec![RawKey::Sbs, RawKey::Bhs, RawKey::Height]);
    let keys: Vec<_> = records[1].keys().collect();
    assert_eq!(keys, vec![RawKey::Pixs, RawKey::Pixx, RawKey::Pixy]);

    for record in &records {
        for key in record.keys() {
            assert!(RawKey::ALL.contains(&key));
        }
    }
}

#[test]
fn array_views_are_materialized_to_their_range() {
    let engine = StackEncoder::default();
    let records = extract_raw(RawInput::parts("code128", "12345", Options::new()), &engine).unwrap();
    let sbs = records[0].get(RawKey::Sbs).and_then(RawField::as_array).unwrap();
    assert_eq!(sbs, &[json!(2), json!(3), json!(4), json!(5), json!(6)]);
    let bhs = records[0].get(RawKey::Bhs).and_then(RawField::as_array).unwrap();
    assert_eq!(bhs, &[json!(0), json!(1), json!(2)]);
    assert_eq!(
        records[0].get(RawKey::Height),
        Some(&RawField::Scalar(json!(0.5)))
    );
}

#[test]
fn records_serialize_as_plain_objects() {
    let engine = StackEncoder::default();
    let records = extract_raw(RawInput::parts("code128", "12345", Options::new()), &engine).unwrap();
    let v = serde_json::to_value(&records).unwrap();
    assert_eq!(
        v,
        json!([
            {"sbs": [2, 3, 4, 5, 6], "bhs": [0, 1, 2], "height": 0.5},
            {"pixs": [1, 0, 1], "pixx": 3, "pixy": 1}
        ])
    );
}

#[test]
fn single_record_form_reads_bcid_and_text() {
    let engine = StackEncoder::default();
    let opts = Options::new()
        .with("bcid", "qrcode")
        .with("text", "hello")
        .with("eclevel", "M");
    let records = extract_raw(opts.clone(), &engine).unwrap();
    assert_eq!(records.len(), 2);

    let seen = engine.seen.borrow().clone().unwrap();
    assert_eq!(seen.0, "qrcode");
    assert_eq!(seen.1, "hello");
    assert_eq!(seen.2, opts);
}

#[test]
fn empty_inputs_fail_before_engine() {
    let engine = StackEncoder::default();
    let err = extract_raw(RawInput::parts("", "1", Options::new()), &engine).unwrap_err();
    assert!(matches!(err, BarmillError::MissingField("bcid")));
    let err = extract_raw(Options::new().with("bcid", "code128"), &engine).unwrap_err();
    assert!(matches!(err, BarmillError::MissingField("text")));
    assert!(engine.seen.borrow().is_none());
}

#[test]
fn engine_errors_propagate() {
    let engine = StackEncoder::default();
    let err = extract_raw(RawInput::parts("nosuchcode", "1", Options::new()), &engine).unwrap_err();
    assert_eq!(
        err.as_encoding().map(EncodingError::message),
        Some("bwipp.unknownEncoder")
    );
}
