//! fnbridge-core — shared translation core for function invocation envelopes.
//!
//! A routing layer delivers one JSON envelope per call to a stateless
//! function. This crate owns the version-independent half of the bridge:
//! the canonical [`Request`] a handler reads, the [`ResponseCollector`] it
//! writes into, and the [`Adapter`] that wires an envelope [`Translator`]
//! around a [`Handler`].
//!
//! # Architecture
//!
//! ```text
//! inbound envelope (v1 | v2)
//!   │
//!   ├── Translator::parse        → Request
//!   ├── Handler::serve           → ResponseCollector
//!   ├── Translator::serialize    → outbound envelope
//!   │
//!   ▼
//! routing layer
//! ```
//!
//! Each variant crate (`fnbridge-v1`, `fnbridge-v2`) only implements
//! [`Translator`]; everything else lives here.

mod adapter;
mod body;
pub mod config;
mod context;
mod error;
mod handler;
mod header;
mod request;
mod response;
pub mod serde_ext;
pub mod target;

pub use adapter::{Adapter, Translator};
pub use body::Body;
pub use config::{BridgeConfig, MetadataConfig};
pub use context::InvocationContext;
pub use error::{BridgeError, BridgeResult};
pub use handler::Handler;
pub use header::{Header, HeaderMap};
pub use request::{Request, RequestBuilder};
pub use response::{CollectedResponse, ResponseCollector};
