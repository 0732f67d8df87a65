use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use crate::{rank, write_topology, Config, EndpointSource, Error, Probe, ProbeOutcome, RankedCollection, Result};

#[derive(Debug)]
pub struct RunSummary {
    pub ranked: RankedCollection,
    pub written: usize,
    pub output_path: PathBuf,
}

/// Connectivity check, fetch, rank, report, write. Any failure before the
/// write leaves the output file untouched.
pub struct Pipeline<'a, S, P> {
    cfg: &'a Config,
    source: S,
    prober: P,
}

impl<'a, S: EndpointSource, P: Probe> Pipeline<'a, S, P> {
    pub fn new(cfg: &'a Config, source: S, prober: P) -> Self {
        Self { cfg, source, prober }
    }

    pub fn check_connectivity(&mut self) -> Result<()> {
        let host = &self.cfg.connectivity_host;
        let port = self.cfg.connectivity_port;
        match self.prober.probe(host, port) {
            ProbeOutcome::Measured(_) => Ok(()),
            ProbeOutcome::Unreachable(reason) => Err(Error::NoConnectivity {
                host: host.clone(),
                port,
                reason: reason.to_string(),
            }),
        }
    }

    pub fn run<W: Write>(&mut self, report: &mut W) -> Result<RunSummary> {
        if self.cfg.check_connectivity {
            self.check_connectivity()?;
        }

        let endpoints = self.source.fetch(&self.cfg.source_url)?;
        info!(count = endpoints.len(), url = %self.cfg.source_url, "fetched endpoints");

        let ranked = rank(&endpoints, &mut self.prober);

        writeln!(report, "\nRanked endpoints:\n{}\n", ranked)?;
        report.flush()?;

        let output_path = self.cfg.output_path();
        let written = write_topology(&output_path, &ranked, self.cfg.limit)?;

        Ok(RunSummary {
            ranked,
            written,
            output_path,
        })
    }
}
