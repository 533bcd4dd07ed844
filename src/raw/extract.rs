use serde::ser::SerializeMap as _;
use serde_json::Value;

use crate::encode::engine::{Encoder, RawValue, StackItem};
use crate::foundation::error::{BarmillError, BarmillResult};
use crate::options::record::Options;
use crate::render::null::NullSink;

/// Fields kept from each engine dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RawKey {
    Pixs,
    Pixx,
    Pixy,
    Sbs,
    Bbs,
    Bhs,
    Width,
    Height,
}

impl RawKey {
    pub const ALL: [RawKey; 8] = [
        Self::Pixs,
        Self::Pixx,
        Self::Pixy,
        Self::Sbs,
        Self::Bbs,
        Self::Bhs,
        Self::Width,
        Self::Height,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pixs => "pixs",
            Self::Pixx => "pixx",
            Self::Pixy => "pixy",
            Self::Sbs => "sbs",
            Self::Bbs => "bbs",
            Self::Bhs => "bhs",
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

/// A field value with any array view copied out.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum RawField {
    Scalar(Value),
    Array(Vec<Value>),
}

impl RawField {
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(v) => Some(v),
            Self::Scalar(_) => None,
        }
    }
}

/// Plain record for one encoded segment; fields keep the engine's order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(RawKey, RawField)>,
}

impl RawRecord {
    pub fn get(&self, key: RawKey) -> Option<&RawField> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = RawKey> + '_ {
        self.fields.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RawKey, &RawField)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl serde::Serialize for RawRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k.name(), v)?;
        }
        map.end()
    }
}

/// Arguments of the raw extraction entry point.
#[derive(Clone, Debug)]
pub enum RawInput {
    /// A full option record carrying `bcid` and `text`; it is also what the engine sees.
    Options(Options),
    /// Encoder id, payload, and the remaining options.
    Parts {
        encoder: String,
        text: String,
        options: Options,
    },
}

impl From<Options> for RawInput {
    fn from(opts: Options) -> Self {
        Self::Options(opts)
    }
}

impl RawInput {
    pub fn parts(encoder: impl Into<String>, text: impl Into<String>, options: Options) -> Self {
        Self::Parts {
            encoder: encoder.into(),
            text: text.into(),
            options,
        }
    }
}

/// Run the engine in raw mode and return one plain record per dictionary it produced.
///
/// Non-dictionary stack entries are dropped.
#[tracing::instrument(skip_all)]
pub fn extract_raw(
    input: impl Into<RawInput>,
    engine: &dyn Encoder,
) -> BarmillResult<Vec<RawRecord>> {
    let (encoder, text, options) = match input.into() {
        RawInput::Options(opts) => {
            let encoder = opts.text("bcid");
            let text = opts.text("text");
            (encoder, text, opts)
        }
        RawInput::Parts {
            encoder,
            text,
            options,
        } => (
            Some(encoder).filter(|s| !s.is_empty()),
            Some(text).filter(|s| !s.is_empty()),
            options,
        ),
    };
    let text = text.ok_or_else(|| BarmillError::missing_field("text"))?;
    let encoder = encoder.ok_or_else(|| BarmillError::missing_field("bcid"))?;

    let mut sink = NullSink;
    let stack = engine.encode_raw(&mut sink, &encoder, &text, &options)?;
    let total = stack.len();
    let records: Vec<RawRecord> = stack.into_iter().filter_map(plain_record).collect();
    if records.len() != total {
        tracing::debug!(dropped = total - records.len(), "non-dictionary stack entries");
    }
    Ok(records)
}

fn plain_record(item: StackItem) -> Option<RawRecord> {
    let StackItem::Dict(dict) = item else {
        return None;
    };
    let fields = dict
        .iter()
        .filter_map(|(name, value)| {
            let key = RawKey::from_name(name)?;
            let field = match value {
                RawValue::Scalar(v) => RawField::Scalar(v.clone()),
                RawValue::View(view) => RawField::Array(view.materialize()),
            };
            Some((key, field))
        })
        .collect();
    Some(RawRecord { fields })
}

#[cfg(test)]
#[path = "../../tests/unit/raw/extract.rs"]
mod tests;
