//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

use downtime_monitor::health::{Probe, ProbeOutcome};
use downtime_monitor::output::{Sink, SinkError};

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` decides the status code of each response.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = u16> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;

                        let status = f().await;
                        let response = format!(
                            "HTTP/1.1 {} Mock\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                            status
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Probe that replays a script, then repeats `fallback`.
pub struct ScriptedProbe {
    script: Mutex<VecDeque<ProbeOutcome>>,
    fallback: ProbeOutcome,
}

impl ScriptedProbe {
    pub fn new(script: Vec<ProbeOutcome>, fallback: ProbeOutcome) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
        }
    }
}

impl Probe for ScriptedProbe {
    async fn check(&self, _target: &Url) -> ProbeOutcome {
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}

/// Sink that keeps lines in memory.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Wait until at least `count` lines were written, or give up after `deadline`.
    pub async fn wait_for(&self, count: usize, deadline: Duration) -> Vec<String> {
        let poll = async {
            loop {
                if self.lines.lock().unwrap().len() >= count {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        };
        let _ = tokio::time::timeout(deadline, poll).await;
        self.lines()
    }
}

impl Sink for MemorySink {
    fn write(&self, line: &str) -> Result<(), SinkError> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

/// Sink whose every write fails.
pub struct BrokenSink;

impl Sink for BrokenSink {
    fn write(&self, _line: &str) -> Result<(), SinkError> {
        Err(SinkError::Write(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "sink closed",
        )))
    }
}

/// Sink that accepts the first `allowed` writes and fails the rest.
#[derive(Clone)]
pub struct FailAfterSink {
    allowed: Arc<AtomicUsize>,
    inner: MemorySink,
}

impl FailAfterSink {
    pub fn new(allowed: usize) -> Self {
        Self {
            allowed: Arc::new(AtomicUsize::new(allowed)),
            inner: MemorySink::default(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.inner.lines()
    }
}

impl Sink for FailAfterSink {
    fn write(&self, line: &str) -> Result<(), SinkError> {
        let granted = self
            .allowed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if !granted {
            return BrokenSink.write(line);
        }
        self.inner.write(line)
    }
}
