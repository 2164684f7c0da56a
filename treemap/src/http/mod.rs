//! HTTP access to the API server.
//!
//! [`AsyncHttpClient`] is the transport seam (a `reqwest` implementation
//! ships as [`AsyncReqwestClient`]); [`Requester`] layers JSON decoding on top.

mod client;
mod requester;

pub use client::{AsyncHttpClient, AsyncReqwestClient, HttpError, DEFAULT_HTTP_TIMEOUT};
pub use requester::Requester;

#[cfg(test)]
pub use client::tests::MockAsyncHttpClient;
