use std::sync::Arc;

use serde_json::Value;

use crate::foundation::error::EncodingError;
use crate::options::record::Options;
use crate::render::sink::Drawing;

/// A symbology encoding engine.
///
/// Implementations must be stateless per call: every invocation receives its own drawing
/// target and option record, and nothing is carried over between calls.
pub trait Encoder {
    /// Encode `text` as symbology `bcid`, issuing drawing primitives against `drawing`.
    fn encode(
        &self,
        drawing: &mut dyn Drawing,
        bcid: &str,
        text: &str,
        opts: &Options,
    ) -> Result<(), EncodingError>;

    /// Encode without drawing and return the engine's per-segment result stack.
    ///
    /// `drawing` is only used for measurements the engine performs before layout.
    fn encode_raw(
        &self,
        drawing: &mut dyn Drawing,
        bcid: &str,
        text: &str,
        opts: &Options,
    ) -> Result<Vec<StackItem>, EncodingError>;
}

/// One entry of the engine's raw result stack.
#[derive(Clone, Debug, PartialEq)]
pub enum StackItem {
    /// Dictionary describing one rendered segment.
    Dict(Dict),
    /// Any other stack value.
    Other(RawValue),
}

/// Engine dictionary with entries kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dict {
    entries: Vec<(String, RawValue)>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: RawValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: RawValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A dictionary value: either a plain value or a window into a shared array.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Scalar(Value),
    View(ArrayView),
}

impl From<Value> for RawValue {
    fn from(v: Value) -> Self {
        Self::Scalar(v)
    }
}

impl From<ArrayView> for RawValue {
    fn from(v: ArrayView) -> Self {
        Self::View(v)
    }
}

/// `len` elements of a shared backing array starting at `offset`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayView {
    backing: Arc<[Value]>,
    offset: usize,
    len: usize,
}

impl ArrayView {
    pub fn new(backing: Arc<[Value]>, offset: usize, len: usize) -> Self {
        Self {
            backing,
            offset,
            len,
        }
    }

    /// View covering the whole of `values`.
    pub fn whole(values: Vec<Value>) -> Self {
        let len = values.len();
        Self::new(values.into(), 0, len)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn backing(&self) -> &Arc<[Value]> {
        &self.backing
    }

    /// Owned copy of the addressed range, clamped to the backing array.
    pub fn materialize(&self) -> Vec<Value> {
        let end = self.offset.saturating_add(self.len).min(self.backing.len());
        let start = self.offset.min(end);
        self.backing[start..end].to_vec()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/engine.rs"]
mod tests;
