use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(rename = "addr")]
    pub address: String,
    pub port: u16,
    pub continent: String,
    pub state: String,
}

impl Endpoint {
    pub fn new(address: &str, port: u16, continent: &str, state: &str) -> Self {
        Self {
            address: address.to_string(),
            port,
            continent: continent.to_string(),
            state: state.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SourceDocument {
    #[serde(rename = "Producers")]
    producers: Vec<Endpoint>,
}

pub trait EndpointSource {
    fn fetch(&self, url: &str) -> Result<Vec<Endpoint>>;
}

impl<S: EndpointSource + ?Sized> EndpointSource for &S {
    fn fetch(&self, url: &str) -> Result<Vec<Endpoint>> {
        (**self).fetch(url)
    }
}

/// Every record must be complete; nothing is skipped.
pub fn parse_document(body: &str) -> Result<Vec<Endpoint>> {
    let doc: SourceDocument = serde_json::from_str(body)?;
    if doc.producers.is_empty() {
        return Err(Error::NoEndpoints);
    }
    for (index, ep) in doc.producers.iter().enumerate() {
        if ep.port == 0 {
            return Err(Error::InvalidRecord {
                index,
                reason: format!("{} has port 0", ep.address),
            });
        }
        if ep.address.trim().is_empty() {
            return Err(Error::InvalidRecord {
                index,
                reason: "empty addr".to_string(),
            });
        }
    }
    debug!(count = doc.producers.len(), "parsed source document");
    Ok(doc.producers)
}
