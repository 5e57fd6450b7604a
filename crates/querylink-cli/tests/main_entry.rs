//! Integration tests for the `querylink` binary entry point.
//!
//! Verifies user-facing failures for an empty query and an unreachable node,
//! and a full exchange with a node listening on a local port.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::{contains, starts_with};

#[test]
fn empty_query_exits_with_failure() {
    let mut command = cargo_bin_cmd!("querylink");
    command
        .assert()
        .failure()
        .stderr(contains("Please enter a SQL query"));
}

#[test]
fn unreachable_node_reports_connection_error() {
    let mut command = cargo_bin_cmd!("querylink");
    command.args([
        "--node-socket",
        "tcp://127.0.0.1:1",
        "--output",
        "human",
        "SHOW",
        "DATABASES",
    ]);
    command
        .assert()
        .failure()
        .stdout("")
        .stderr(starts_with("Connection error: "));
}

#[test]
fn table_list_is_printed_on_stdout() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind node");
    let port = listener.local_addr().expect("node addr").port();
    let node = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept client");
        let mut request = String::new();
        BufReader::new(stream.try_clone().expect("clone stream"))
            .read_line(&mut request)
            .expect("read query");
        stream
            .write_all(b"Tables:\norders\ncustomers\nEND_RESULTS\n")
            .expect("write reply");
        request
    });

    let mut command = cargo_bin_cmd!("querylink");
    command.args([
        "--node-socket",
        &format!("tcp://127.0.0.1:{port}"),
        "--output",
        "human",
        "show",
        "tables",
    ]);
    command
        .assert()
        .success()
        .stdout("Table Name\n----------\norders\ncustomers\n(2 rows)\n");

    assert_eq!(node.join().expect("node thread"), "show tables\n");
}
