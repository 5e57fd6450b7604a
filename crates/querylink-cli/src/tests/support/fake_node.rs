//! Fake processing node for behavioural tests.
//!
//! Provides a TCP server that records the query line and replies with canned
//! protocol lines, so CLI tests run without a real node.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};

/// A node that accepts a single connection and replies with canned lines.
pub(in crate::tests) struct FakeNode {
    port: u16,
    requests: Arc<Mutex<Vec<String>>>,
    result: Arc<Mutex<Option<Result<()>>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl FakeNode {
    /// Spawns a node listening on an ephemeral TCP port.
    ///
    /// When no client connects within two seconds the node stops quietly, so
    /// tests where the CLI bails out early do not hang.
    pub fn spawn(lines: Vec<String>) -> Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).context("bind fake node")?;
        listener
            .set_nonblocking(true)
            .context("fake node nonblocking")?;
        let port = listener.local_addr().context("local addr")?.port();
        let requests: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let result: Arc<Mutex<Option<Result<()>>>> = Arc::new(Mutex::new(None));
        let requests_clone = Arc::clone(&requests);
        let result_clone = Arc::clone(&result);
        let handle = thread::spawn(move || {
            let outcome = Self::serve_client(&listener, &lines, &requests_clone);
            if let Ok(mut guard) = result_clone.lock() {
                *guard = Some(outcome);
            }
        });
        Ok(Self {
            port,
            requests,
            result,
            handle: Some(handle),
        })
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Waits for the node thread and returns the query lines it received.
    pub fn take_requests(&mut self) -> Result<Vec<String>> {
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| anyhow!("fake node thread panicked"))?;
        }
        if let Some(outcome) = self
            .result
            .lock()
            .map_err(|error| anyhow!("lock fake node result: {error}"))?
            .take()
        {
            outcome.context("fake node failed")?;
        }
        let requests = self
            .requests
            .lock()
            .map_err(|error| anyhow!("lock requests: {error}"))?;
        Ok(requests.clone())
    }

    fn serve_client(
        listener: &TcpListener,
        lines: &[String],
        requests: &Arc<Mutex<Vec<String>>>,
    ) -> Result<()> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            match listener.accept() {
                Ok((stream, _)) => {
                    stream
                        .set_nonblocking(false)
                        .context("blocking client stream")?;
                    Self::record_request(&stream, requests)?;
                    let mut writer = stream;
                    return write_lines(&mut writer, lines).context("write response lines");
                }
                Err(ref error)
                    if error.kind() == io::ErrorKind::WouldBlock && Instant::now() < deadline =>
                {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(ref error) if error.kind() == io::ErrorKind::WouldBlock => return Ok(()),
                Err(error) => return Err(error).context("accept connection"),
            }
        }
    }

    fn record_request(stream: &TcpStream, requests: &Arc<Mutex<Vec<String>>>) -> Result<()> {
        let mut line = String::new();
        let mut reader = BufReader::new(stream.try_clone().context("clone stream")?);
        if reader.read_line(&mut line).context("read query line")? == 0 {
            return Ok(());
        }
        requests
            .lock()
            .map_err(|error| anyhow!("lock requests: {error}"))?
            .push(line);
        Ok(())
    }
}

impl Drop for FakeNode {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Writes each line followed by `\n`, then flushes.
fn write_lines(stream: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        stream.write_all(line.as_bytes())?;
        stream.write_all(b"\n")?;
    }
    stream.flush()
}
