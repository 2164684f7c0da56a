//! JSON requester on top of [`AsyncHttpClient`].

use serde::de::DeserializeOwned;
use tracing::debug;

use super::client::{AsyncHttpClient, HttpError};

/// Issues GET requests and decodes JSON bodies.
#[derive(Clone)]
pub struct Requester<C> {
    client: C,
}

impl<C: AsyncHttpClient> Requester<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetches `url` and decodes the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let body = self.client.get(url).await?;
        debug!(url = url, bytes = body.len(), "Decoding JSON response");
        serde_json::from_slice(&body).map_err(|e| HttpError::InvalidResponse(e.to_string()))
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::client::tests::MockAsyncHttpClient;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Body {
        data: Vec<u32>,
    }

    #[tokio::test]
    async fn test_get_json_decodes_body() {
        let requester = Requester::new(MockAsyncHttpClient::ok(r#"{"data":[1,2,3]}"#));

        let body: Body = requester.get_json("http://api/trees").await.unwrap();

        assert_eq!(body, Body { data: vec![1, 2, 3] });
        assert_eq!(requester.client().requested_urls(), vec!["http://api/trees"]);
    }

    #[tokio::test]
    async fn test_get_json_invalid_body() {
        let requester = Requester::new(MockAsyncHttpClient::ok("<html>"));

        let result: Result<Body, _> = requester.get_json("http://api/trees").await;

        assert!(matches!(result, Err(HttpError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_get_json_propagates_transport_error() {
        let requester = Requester::new(MockAsyncHttpClient::failing(HttpError::Status {
            status: 500,
            url: "http://api/trees".to_string(),
        }));

        let result: Result<Body, _> = requester.get_json("http://api/trees").await;

        assert!(matches!(result, Err(HttpError::Status { status: 500, .. })));
    }
}
