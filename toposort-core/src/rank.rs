use std::fmt;

use tracing::info;

use crate::{Endpoint, Probe, ProbeOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEndpoint {
    pub endpoint: Endpoint,
    pub outcome: ProbeOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedCollection {
    entries: Vec<RankedEndpoint>,
}

impl RankedCollection {
    // stable: ties keep input order
    pub fn from_measurements(mut entries: Vec<RankedEndpoint>) -> Self {
        entries.sort_by(|a, b| a.outcome.rank_cmp(&b.outcome));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedEndpoint> {
        self.entries.iter()
    }

    pub fn top(&self, n: usize) -> &[RankedEndpoint] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn measured_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_reachable()).count()
    }

    pub fn unreachable_count(&self) -> usize {
        self.len() - self.measured_count()
    }
}

impl<'a> IntoIterator for &'a RankedCollection {
    type Item = &'a RankedEndpoint;
    type IntoIter = std::slice::Iter<'a, RankedEndpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub fn rank<P: Probe>(endpoints: &[Endpoint], prober: &mut P) -> RankedCollection {
    let mut measured = Vec::with_capacity(endpoints.len());
    for ep in endpoints {
        let outcome = prober.probe(&ep.address, ep.port);
        measured.push(RankedEndpoint {
            endpoint: ep.clone(),
            outcome,
        });
    }
    let ranked = RankedCollection::from_measurements(measured);
    info!(
        total = ranked.len(),
        reachable = ranked.measured_count(),
        unreachable = ranked.unreachable_count(),
        "ranking complete"
    );
    ranked
}

impl fmt::Display for RankedCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w_rank = self.entries.len().to_string().len().max(1);
        let w_addr = column_width("addr", self.entries.iter().map(|e| e.endpoint.address.len()));
        let w_cont = column_width("continent", self.entries.iter().map(|e| e.endpoint.continent.len()));
        let w_state = column_width("state", self.entries.iter().map(|e| e.endpoint.state.len()));

        writeln!(
            f,
            "{:>w_rank$}  {:<w_addr$}  {:>5}  {:<w_cont$}  {:<w_state$}  RTT (s)",
            "#", "addr", "port", "continent", "state",
        )?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(
                f,
                "{:>w_rank$}  {:<w_addr$}  {:>5}  {:<w_cont$}  {:<w_state$}  {}",
                i + 1,
                entry.endpoint.address,
                entry.endpoint.port,
                entry.endpoint.continent,
                entry.endpoint.state,
                entry.outcome,
            )?;
        }
        write!(
            f,
            "[{} rows: {} reachable, {} unreachable]",
            self.len(),
            self.measured_count(),
            self.unreachable_count()
        )
    }
}

fn column_width(header: &str, lens: impl Iterator<Item = usize>) -> usize {
    lens.max().unwrap_or(0).max(header.len())
}
