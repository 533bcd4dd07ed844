//! Request adapter: query string in, PNG or plain-text error out.

pub mod adapter;
