use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::TOPOLOGY_VALENCY;
use crate::{Error, RankedCollection, RankedEndpoint, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyEntry {
    pub addr: String,
    pub port: u16,
    pub valency: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyDocument {
    #[serde(rename = "Producers")]
    pub producers: Vec<TopologyEntry>,
}

impl TopologyDocument {
    pub fn from_entries(entries: &[RankedEndpoint]) -> Self {
        let producers = entries
            .iter()
            .map(|e| TopologyEntry {
                addr: e.endpoint.address.clone(),
                port: e.endpoint.port,
                valency: TOPOLOGY_VALENCY,
            })
            .collect();
        Self { producers }
    }
}

pub fn render_topology(entries: &[RankedEndpoint]) -> Result<String> {
    let doc = TopologyDocument::from_entries(entries);
    Ok(serde_json::to_string(&doc)?)
}

/// Overwrites `path` with the first `limit` ranked entries. Returns how many
/// entries went into the file.
pub fn write_topology<P: AsRef<Path>>(path: P, ranked: &RankedCollection, limit: usize) -> Result<usize> {
    let path = path.as_ref();
    let entries = ranked.top(limit);
    let text = render_topology(entries)?;
    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), entries = entries.len(), "topology written");
    Ok(entries.len())
}
