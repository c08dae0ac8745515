//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific
//! I/O implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration: a desktop view, a terminal, and a scripted test double
//! all run the same loop.

use std::future::Future;

use banter_client::{ApiRequest, ApiResponse};
use banter_proto::{ClientIntent, ServerEvent};

use crate::{App, AppEvent};

/// A scroll instruction for the message area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEffect {
    /// Scroll to the bottom, e.g. after a live message arrived.
    ToBottom,
    /// Restore a specific offset, e.g. after older history was prepended.
    ToOffset(f64),
}

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next UI event.
    ///
    /// Returns an available event, or `None` when the input source has
    /// closed and the application should shut down.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Receive the next event from the channel, or `None` when no event
    /// is currently available.
    fn recv_event(&mut self) -> impl Future<Output = Option<ServerEvent>> + Send;

    /// Emit an intent over the channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel rejected the emit outright. A
    /// silently dropped intent is not an error at this layer.
    fn emit(&mut self, intent: ClientIntent) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Execute a REST request. Returns the response to feed back, or
    /// `None` for a mutation that completed with no payload.
    fn execute(&mut self, request: ApiRequest) -> impl Future<Output = Option<ApiResponse>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Apply a scroll effect to the message area.
    ///
    /// # Errors
    ///
    /// Returns an error if the view rejected the instruction.
    fn scroll(&mut self, effect: ScrollEffect) -> Result<(), Self::Error>;
}
