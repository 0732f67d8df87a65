pub const DEFAULT_SOURCE_URL: &str = "https://explorer.cardano-mainnet.iohk.io/relays/topology.json";
// JSON is a subset of YAML, so the node reads this file as-is.
pub const DEFAULT_OUTPUT_PATH: &str = "topology.yaml";
pub const DEFAULT_LIMIT: usize = 4;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3_000;
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_CONNECTIVITY_HOST: &str = "www.google.com";
pub const DEFAULT_CONNECTIVITY_PORT: u16 = 80;

pub const MAX_PROBE_TIMEOUT_MS: u64 = 60_000;

/// Legacy placeholder latency for unreachable relays. Ordering uses
/// `ProbeOutcome::Unreachable` instead; no allowed timeout reaches this value.
pub const SENTINEL_LATENCY_SECS: f64 = 255.0;

pub const TOPOLOGY_VALENCY: u32 = 1;
