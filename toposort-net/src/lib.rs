use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::{Duration, Instant};

use toposort_core::{Probe, ProbeOutcome, UnreachableReason};
use tracing::{debug, info, warn};

mod source;

pub use source::HttpSource;

/// Times a single TCP handshake per call. The connect() round trip is only an
/// approximation of RTT, good enough to order relays.
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn measure(&self, host: &str, port: u16) -> ProbeOutcome {
        info!("Check RTT on {} {}/tcp", host, port);

        let addr = match resolve_first(host, port) {
            Ok(addr) => addr,
            Err(err) => {
                warn!(%host, port, error = %err, "{} NXDOMAIN or timeout", host);
                return ProbeOutcome::Unreachable(UnreachableReason::Unresolved);
            }
        };

        match connect_once(addr, self.timeout) {
            Ok(elapsed) => {
                debug!(%host, %addr, rtt_s = elapsed.as_secs_f64(), "connected");
                ProbeOutcome::Measured(elapsed)
            }
            Err(err) => {
                let reason = classify(&err);
                match &reason {
                    UnreachableReason::Refused => {
                        warn!(%host, port, error = %err, "{} connection refused", host)
                    }
                    UnreachableReason::TimedOut | UnreachableReason::Unresolved => {
                        warn!(%host, port, error = %err, "{} NXDOMAIN or timeout", host)
                    }
                    UnreachableReason::Io(_) => {
                        warn!(%host, port, "{} unexpected error: {}", host, err)
                    }
                }
                ProbeOutcome::Unreachable(reason)
            }
        }
    }
}

impl Probe for TcpProber {
    fn probe(&mut self, host: &str, port: u16) -> ProbeOutcome {
        self.measure(host, port)
    }
}

/// Opens one socket, connects, drops it. Name resolution is done by the
/// caller so it never counts toward the measured time.
fn connect_once(addr: SocketAddr, timeout: Duration) -> io::Result<Duration> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let start = Instant::now();
    socket.connect_timeout(&addr.into(), timeout)?;
    Ok(start.elapsed())
}

fn classify(err: &io::Error) -> UnreachableReason {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => UnreachableReason::Refused,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => UnreachableReason::TimedOut,
        _ => UnreachableReason::Io(err.to_string()),
    }
}

fn resolve_first(host: &str, port: u16) -> io::Result<SocketAddr> {
    pick_address((host, port).to_socket_addrs()?)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no resolved addresses"))
}

// IPv4 first; a dual-stack relay must not look dead on a host without a v6 route.
fn pick_address(addrs: impl Iterator<Item = SocketAddr>) -> Option<SocketAddr> {
    let mut fallback = None;
    for addr in addrs {
        if matches!(addr, SocketAddr::V4(_)) {
            return Some(addr);
        }
        fallback.get_or_insert(addr);
    }
    fallback
}
