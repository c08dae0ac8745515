//! Event channel transport.
//!
//! Provides [`EventChannel`], a handle pairing an intent sender with an
//! event receiver, and [`connect`], which supervises sessions produced by
//! a [`Connector`]: on session loss the channel reconnects with a bounded
//! retry count and a fixed backoff. Intents emitted while no session is
//! live are dropped — there is no acknowledgement or retry contract at
//! this layer, and nothing is queued for later delivery.
//!
//! The channel is an injected dependency: callers construct one per
//! engine, and tests substitute a scripted [`Connector`].

use std::{future::Future, time::Duration};

use banter_proto::{ClientIntent, ServerEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Transport errors.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// No session could be established within the retry budget.
    #[error("connection failed after {attempts} attempts: {reason}")]
    Exhausted {
        /// How many attempts were made.
        attempts: u32,
        /// The last connection error.
        reason: String,
    },
}

/// Reconnection policy: bounded attempts with a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum connection attempts per (re)connection sequence.
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 5, delay: Duration::from_secs(1) }
    }
}

/// One live session produced by a [`Connector`].
///
/// The connector owns the actual socket I/O; the session exposes it as a
/// channel pair. The session is considered dead once `events` closes.
pub struct Session {
    /// Outbound intents into the session.
    pub intents: mpsc::Sender<ClientIntent>,
    /// Inbound events out of the session.
    pub events: mpsc::Receiver<ServerEvent>,
}

/// Establishes sessions against the messaging service.
pub trait Connector: Send + 'static {
    /// Connection error type.
    type Error: std::error::Error + Send + 'static;

    /// Establish one session.
    fn connect(&mut self) -> impl Future<Output = Result<Session, Self::Error>> + Send;
}

/// Handle to a supervised event channel.
pub struct EventChannel {
    /// Send intents to the server.
    pub to_server: mpsc::Sender<ClientIntent>,
    /// Receive events from the server. Closes when the retry budget is
    /// exhausted.
    pub from_server: mpsc::Receiver<ServerEvent>,
    abort_handle: tokio::task::AbortHandle,
}

impl EventChannel {
    /// Stop the supervision task and drop the session.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Connect and supervise the channel.
///
/// # Errors
///
/// Returns [`ChannelError::Exhausted`] when the initial connection cannot
/// be established within the retry budget.
pub async fn connect<C: Connector>(
    mut connector: C,
    policy: RetryPolicy,
) -> Result<EventChannel, ChannelError> {
    let session = establish(&mut connector, policy).await?;

    let (to_server_tx, to_server_rx) = mpsc::channel::<ClientIntent>(32);
    let (from_server_tx, from_server_rx) = mpsc::channel::<ServerEvent>(32);

    let handle = tokio::spawn(run_channel(connector, policy, session, to_server_rx, from_server_tx));

    Ok(EventChannel {
        to_server: to_server_tx,
        from_server: from_server_rx,
        abort_handle: handle.abort_handle(),
    })
}

/// Attempt to establish a session within the retry budget.
async fn establish<C: Connector>(
    connector: &mut C,
    policy: RetryPolicy,
) -> Result<Session, ChannelError> {
    let mut reason = String::new();
    for attempt in 1..=policy.max_attempts {
        match connector.connect().await {
            Ok(session) => return Ok(session),
            Err(e) => {
                tracing::warn!(attempt, max = policy.max_attempts, error = %e, "connect failed");
                reason = e.to_string();
            },
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.delay).await;
        }
    }
    Err(ChannelError::Exhausted { attempts: policy.max_attempts, reason })
}

/// Bridge between the channel handle and the live session, reconnecting
/// on session loss.
async fn run_channel<C: Connector>(
    mut connector: C,
    policy: RetryPolicy,
    mut session: Session,
    mut to_server: mpsc::Receiver<ClientIntent>,
    from_server: mpsc::Sender<ServerEvent>,
) {
    loop {
        tokio::select! {
            intent = to_server.recv() => {
                match intent {
                    Some(intent) => {
                        if session.intents.send(intent).await.is_err() {
                            tracing::warn!("intent dropped: session closed");
                        }
                    },
                    // Caller dropped the handle.
                    None => break,
                }
            },
            event = session.events.recv() => {
                match event {
                    Some(event) => {
                        if from_server.send(event).await.is_err() {
                            break;
                        }
                    },
                    None => {
                        // Drop intents that arrived for the dead session.
                        while to_server.try_recv().is_ok() {
                            tracing::warn!("intent dropped: channel disconnected");
                        }
                        match establish(&mut connector, policy).await {
                            Ok(next) => session = next,
                            Err(e) => {
                                tracing::error!(error = %e, "reconnect failed, closing channel");
                                break;
                            },
                        }
                    },
                }
            },
        }
    }
}
