//! Latency ranking of relay endpoints and topology file generation.
//!
//! The network-facing pieces (socket prober, HTTP source) live in
//! `toposort-net`; this crate only sees them through [`Probe`] and
//! [`EndpointSource`].

pub mod constants;

mod config;
mod endpoint;
mod error;
mod pipeline;
mod probe;
mod rank;
mod topology;

pub use config::{expand_tilde, Config};
pub use endpoint::{parse_document, Endpoint, EndpointSource};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunSummary};
pub use probe::{Probe, ProbeOutcome, UnreachableReason};
pub use rank::{rank, RankedCollection, RankedEndpoint};
pub use topology::{render_topology, write_topology, TopologyDocument, TopologyEntry};
