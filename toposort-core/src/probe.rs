use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnreachableReason {
    Refused,
    Unresolved,
    TimedOut,
    Io(String),
}

impl fmt::Display for UnreachableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnreachableReason::Refused => write!(f, "connection refused"),
            UnreachableReason::Unresolved => write!(f, "NXDOMAIN"),
            UnreachableReason::TimedOut => write!(f, "timeout"),
            UnreachableReason::Io(msg) => write!(f, "{}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Measured(Duration),
    Unreachable(UnreachableReason),
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Measured(_))
    }

    pub fn latency(&self) -> Option<Duration> {
        match self {
            ProbeOutcome::Measured(d) => Some(*d),
            ProbeOutcome::Unreachable(_) => None,
        }
    }

    pub fn latency_secs(&self) -> Option<f64> {
        self.latency().map(|d| d.as_secs_f64())
    }

    /// Measured outcomes first, fastest first; all unreachable outcomes tie.
    pub fn rank_cmp(&self, other: &ProbeOutcome) -> Ordering {
        match (self, other) {
            (ProbeOutcome::Measured(a), ProbeOutcome::Measured(b)) => a.cmp(b),
            (ProbeOutcome::Measured(_), ProbeOutcome::Unreachable(_)) => Ordering::Less,
            (ProbeOutcome::Unreachable(_), ProbeOutcome::Measured(_)) => Ordering::Greater,
            (ProbeOutcome::Unreachable(_), ProbeOutcome::Unreachable(_)) => Ordering::Equal,
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Measured(d) => write!(f, "{:.6}", d.as_secs_f64()),
            ProbeOutcome::Unreachable(reason) => write!(f, "unreachable ({})", reason),
        }
    }
}

/// One attempt, no retries. Implementations close what they open before returning.
pub trait Probe {
    fn probe(&mut self, host: &str, port: u16) -> ProbeOutcome;
}

impl<P: Probe + ?Sized> Probe for &mut P {
    fn probe(&mut self, host: &str, port: u16) -> ProbeOutcome {
        (**self).probe(host, port)
    }
}
