use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use toposort_core::{EndpointSource, Error};
use toposort_net::HttpSource;

/// Answers exactly one request with the given status line and body.
fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
        }
        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
        .unwrap();
        stream.flush().unwrap();
    });
    format!("http://{}/relays/topology.json", addr)
}

fn source() -> HttpSource {
    let client = Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    HttpSource::with_client(client)
}

#[test]
fn fetches_and_parses_producers() {
    let url = serve_once(
        "200 OK",
        r#"{"Producers":[{"addr":"relays-new.cardano-mainnet.example","port":3001,"continent":"Europe","state":"IE"}]}"#,
    );

    let endpoints = source().fetch(&url).unwrap();

    assert_eq!(endpoints.len(), 1);
    assert_eq!(endpoints[0].address, "relays-new.cardano-mainnet.example");
    assert_eq!(endpoints[0].port, 3001);
    assert_eq!(endpoints[0].state, "IE");
}

#[test]
fn non_ok_status_is_fatal() {
    let url = serve_once("503 Service Unavailable", "{}");

    match source().fetch(&url) {
        Err(Error::HttpStatus { status, url: u }) => {
            assert_eq!(status, 503);
            assert_eq!(u, url);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn missing_producers_is_a_parse_error() {
    let url = serve_once("200 OK", r#"{"Consumers":[]}"#);
    assert!(matches!(source().fetch(&url), Err(Error::Parse(_))));
}

#[test]
fn unreachable_directory_is_a_fetch_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = source().fetch(&format!("http://{}/topology.json", addr));

    match result {
        Err(Error::Fetch { reason, .. }) => {
            assert!(
                reason.to_lowercase().contains("connection refused"),
                "cause missing from {:?}",
                reason
            );
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn unknown_directory_host_reports_dns_failure() {
    let result = source().fetch("http://relay.toposorter.invalid/topology.json");

    match result {
        Err(Error::Fetch { url, reason }) => {
            assert_eq!(url, "http://relay.toposorter.invalid/topology.json");
            assert!(reason.to_lowercase().contains("dns"), "cause missing from {:?}", reason);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn invalid_user_agent_fails_client_setup() {
    let result = HttpSource::with_user_agent(Duration::from_secs(30), "toposorter\n0.1");
    assert!(matches!(result, Err(Error::HttpClient(_))));
}

#[test]
fn default_client_builds() {
    assert!(HttpSource::new(Duration::from_secs(30)).is_ok());
}
