use super::ProviderError;
use crate::timeout::RequestTimeout;

use hyper::body::{Body, Bytes};
use hyper::client::{Client, HttpConnector};
use hyper::header::{ACCEPT, USER_AGENT};
use hyper::http::uri::Uri;
use hyper::{Request, StatusCode};
use hyper_tls::HttpsConnector;

const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Blocking GET client shared by the providers.
///
/// Owns a current-thread tokio runtime, every call is driven to completion with `block_on`
/// and is bounded by the request timeout, body included.
pub struct HttpFetcher {
    client: Client<HttpsConnector<HttpConnector>>,
    runtime: tokio::runtime::Runtime,
    timeout: RequestTimeout,
}

impl HttpFetcher {
    pub fn new(timeout: RequestTimeout) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let https = HttpsConnector::new();
        let client = Client::builder().build::<_, Body>(https);
        Ok(Self {
            client,
            runtime,
            timeout,
        })
    }

    pub fn timeout(&self) -> RequestTimeout {
        self.timeout
    }

    /// Body of a `200 OK` response to `GET uri`.
    pub fn get(&self, uri: Uri) -> Result<Bytes, ProviderError> {
        let duration = self.timeout.duration();
        log::debug!("GET {uri}");
        self.runtime.block_on(async {
            tokio::time::timeout(duration, self.fetch(uri))
                .await
                .map_err(|_| ProviderError::Timeout(duration))?
        })
    }

    async fn fetch(&self, uri: Uri) -> Result<Bytes, ProviderError> {
        let request = Request::builder()
            .uri(uri)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "application/json")
            .body(Body::empty())?;
        let response = self.client.request(request).await?;
        if response.status() != StatusCode::OK {
            return Err(response.status().into());
        }
        Ok(hyper::body::to_bytes(response.into_body()).await?)
    }
}
