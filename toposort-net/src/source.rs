use std::error::Error as StdError;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use toposort_core::{parse_document, Endpoint, EndpointSource, Error, Result};
use tracing::{info, warn};

const USER_AGENT: &str = concat!("toposorter/", env!("CARGO_PKG_VERSION"));

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_user_agent(timeout, USER_AGENT)
    }

    pub fn with_user_agent(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::HttpClient(error_chain(&e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl EndpointSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<Vec<Endpoint>> {
        info!(%url, "fetching relay directory");
        let fetch_err = |e: reqwest::Error| Error::Fetch {
            url: url.to_string(),
            reason: error_chain(&e),
        };

        let resp = self.client.get(url).send().map_err(fetch_err)?;
        let status = resp.status();
        if status != StatusCode::OK {
            warn!(%url, status = status.as_u16(), "directory request rejected");
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.text().map_err(fetch_err)?;
        parse_document(&body)
    }
}

// reqwest's top-level message is the same for every transport failure; the
// cause (dns, refused, tls, timeout) only shows up further down the chain.
fn error_chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut cur = err.source();
    while let Some(cause) = cur {
        let msg = cause.to_string();
        if !out.contains(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        cur = cause.source();
    }
    out
}
