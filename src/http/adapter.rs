use serde_json::Value;

use crate::encode::engine::Encoder;
use crate::options::record::Options;
use crate::render::buffer::to_buffer;

pub const CONTENT_TYPE_PNG: &str = "image/png";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Status, content type and body for the host server to write back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl HttpResponse {
    fn png(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_PNG,
            body,
        }
    }

    fn bad_request(message: String) -> Self {
        Self {
            status: 400,
            content_type: CONTENT_TYPE_TEXT,
            body: message.into_bytes(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Parse a request target or bare query string into options.
///
/// Parameters with an empty value become `true`. A repeated parameter collects its values, in
/// order, into an array.
pub fn options_from_query(target: &str) -> Options {
    let query = match target.split_once('?') {
        Some((_, q)) => q,
        None if target.starts_with('/') => "",
        None => target,
    };
    let query = query.split_once('#').map_or(query, |(q, _)| q);

    let mut opts = Options::new();
    for (k, v) in form_urlencoded::parse(query.as_bytes()) {
        let value = if v.is_empty() {
            Value::Bool(true)
        } else {
            Value::String(v.into_owned())
        };
        let merged = match opts.remove(&k) {
            Some(Value::Array(mut seen)) => {
                seen.push(value);
                Value::Array(seen)
            }
            Some(first) => Value::Array(vec![first, value]),
            None => value,
        };
        opts.set(k.into_owned(), merged);
    }
    opts
}

/// Render the barcode described by `target`'s query; `overrides` win over query parameters.
#[tracing::instrument(skip(overrides, engine))]
pub async fn handle_request(
    target: &str,
    overrides: Option<&Options>,
    engine: &dyn Encoder,
) -> HttpResponse {
    let mut opts = options_from_query(target);
    if let Some(extra) = overrides {
        opts.merge_from(extra);
    }
    match to_buffer(opts, engine).await {
        Ok(png) => HttpResponse::png(png),
        Err(err) => {
            tracing::debug!(error = %err, "request rejected");
            HttpResponse::bad_request(err.to_string())
        }
    }
}

/// [`handle_request`] for synchronous hosts.
pub fn handle_request_blocking(
    target: &str,
    overrides: Option<&Options>,
    engine: &dyn Encoder,
) -> HttpResponse {
    pollster::block_on(handle_request(target, overrides, engine))
}

#[cfg(test)]
#[path = "../../tests/unit/http/adapter.rs"]
mod tests;
