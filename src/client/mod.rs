//! Client-side request pipeline.
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch    - Client orchestrator and call pipeline
//! ├── options  - Options Builder: descriptor -> transport options
//! ├── payload  - Payload Serializer: body -> bytes
//! ├── response - Response Normalizer: raw response -> stable record
//! └── session  - Caller-owned last request/response cache
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Client`] | Stateless orchestrator with verb helpers and `call` |
//! | [`ClientBuilder`] | Transport injection, default headers, status policy |
//! | [`Session`] | `&mut self` wrapper retaining the last call pair |
//!
//! The leaf modules are pure: [`resolve`] performs no I/O, and
//! [`serialize_payload`] and [`normalize`] are deterministic. All I/O lives
//! behind the [`Transport`](crate::transport::Transport) seam.

mod fetch;
pub mod options;
pub mod payload;
pub mod response;
mod session;

pub use fetch::{Client, ClientBuilder};
pub use options::resolve;
pub use payload::serialize as serialize_payload;
pub use response::normalize;
pub use session::Session;
