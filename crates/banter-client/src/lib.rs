//! Client
//!
//! Sans-IO state machine for one open conversation against the Banter
//! messaging service. The client receives events ([`ClientEvent`]) — user
//! intents, inbound channel events, fetch results — processes them through
//! pure state machine logic, and returns actions ([`ClientAction`]) for the
//! caller to execute: channel emits, REST requests, and view effects.
//!
//! # Components
//!
//! - [`Client`]: the conversation engine
//! - [`ClientEvent`] / [`ClientAction`]: inputs and outputs
//! - [`ChatApi`]: the REST data-fetch boundary
//!
//! # Optional features
//!
//! - `http`: [`HttpApi`], a reqwest-backed [`ChatApi`]
//! - `transport`: [`transport::EventChannel`], an injected channel handle
//!   with bounded-retry reconnection

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod api;
mod client;
mod error;
mod event;

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "transport")]
pub mod transport;

pub use api::{ApiError, ChatApi, MessagePage, execute_request};
pub use client::{Client, PAGE_SIZE};
pub use error::ClientError;
pub use event::{ApiRequest, ApiResponse, ClientAction, ClientEvent, FetchKind};
#[cfg(feature = "http")]
pub use http::HttpApi;
