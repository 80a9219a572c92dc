//! TCP endpoint for next-guess requests.
//!
//! Line-delimited JSON: every request line carries the full history of the
//! game so far and is answered by exactly one response line. Connections
//! may send any number of requests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use crate::advisor::{Outcome, WordleAdvisor};
use crate::error::Result;
use crate::solver::GuessRecord;
use crate::word::Word;

/// Longest request line accepted, newline included. A client that sends
/// more without a newline gets an error response and is disconnected.
pub const MAX_REQUEST_BYTES: u64 = 64 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on the time spent computing one answer.
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextGuessRequest {
    #[serde(default)]
    pub history: Vec<GuessRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NextGuessResponse {
    Guess { next_guess: Word, remaining: usize },
    NotAWord { word: Word },
    NoGuess,
    Error { message: String },
}

impl From<Outcome> for NextGuessResponse {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Guess { guess, remaining } => NextGuessResponse::Guess {
                next_guess: guess.word,
                remaining,
            },
            Outcome::NotAWord(word) => NextGuessResponse::NotAWord { word },
            Outcome::NoGuessAvailable => NextGuessResponse::NoGuess,
        }
    }
}

pub fn parse_request(line: &str) -> Result<NextGuessRequest> {
    Ok(serde_json::from_str(line)?)
}

/// Answer one request line.
pub fn handle_line(advisor: &WordleAdvisor, line: &str) -> NextGuessResponse {
    handle_line_until(advisor, line, &AtomicBool::new(false)).unwrap_or(NextGuessResponse::NoGuess)
}

/// Answer one request line unless `cancel` is set before scoring finishes.
pub fn handle_line_until(
    advisor: &WordleAdvisor,
    line: &str,
    cancel: &AtomicBool,
) -> Option<NextGuessResponse> {
    match parse_request(line) {
        Ok(request) => advisor.advise_until(&request.history, cancel).map(Into::into),
        Err(e) => Some(NextGuessResponse::Error {
            message: e.to_string(),
        }),
    }
}

/// Start the TCP server
///
/// `ready_tx` receives the bound address once the listener is up, which
/// lets callers bind to port 0.
pub async fn run_server(
    config: ServerConfig,
    advisor: Arc<WordleAdvisor>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.address()).await?;
    let bound = listener.local_addr()?;
    info!("Listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut client_id_counter = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!("Client {} connected from {}", client_id, addr);

        let advisor = Arc::clone(&advisor);
        let timeout = config.request_timeout;
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, advisor, timeout).await {
                warn!("Client {} error: {}", client_id, e);
            }
            info!("Client {} disconnected", client_id);
        });
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    advisor: Arc<WordleAdvisor>,
    timeout: Duration,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = (&mut reader)
            .take(MAX_REQUEST_BYTES)
            .read_until(b'\n', &mut buf)
            .await?;
        if n == 0 {
            break;
        }
        let oversized = n as u64 == MAX_REQUEST_BYTES && buf.last() != Some(&b'\n');

        let response = if oversized {
            warn!("Client {} sent a request over {} bytes", client_id, MAX_REQUEST_BYTES);
            NextGuessResponse::Error {
                message: format!("request exceeds {} bytes", MAX_REQUEST_BYTES),
            }
        } else {
            let line = String::from_utf8_lossy(&buf).trim().to_string();
            if line.is_empty() {
                continue;
            }
            debug!("Client {} request: {}", client_id, line);
            answer(&advisor, client_id, line, timeout).await
        };

        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;

        if oversized {
            break;
        }
    }

    Ok(())
}

/// Run one request on the blocking pool. On timeout the scoring is
/// cancelled and awaited so it no longer occupies the rayon pool.
async fn answer(
    advisor: &Arc<WordleAdvisor>,
    client_id: usize,
    line: String,
    timeout: Duration,
) -> NextGuessResponse {
    let cancel = Arc::new(AtomicBool::new(false));
    let mut work = {
        let advisor = Arc::clone(advisor);
        let cancel = Arc::clone(&cancel);
        tokio::task::spawn_blocking(move || handle_line_until(&advisor, &line, &cancel))
    };

    match tokio::time::timeout(timeout, &mut work).await {
        Ok(Ok(Some(response))) => response,
        Ok(Ok(None)) => NextGuessResponse::Error {
            message: "request cancelled".to_string(),
        },
        Ok(Err(e)) => NextGuessResponse::Error {
            message: format!("request failed: {}", e),
        },
        Err(_) => {
            warn!("Client {} request timed out after {:?}", client_id, timeout);
            cancel.store(true, Ordering::Relaxed);
            let _ = work.await;
            NextGuessResponse::Error {
                message: format!("request timed out after {:?}", timeout),
            }
        }
    }
}
