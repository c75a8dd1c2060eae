//! Streaming core: connection registry, per-session generation loop, and
//! the synthetic transaction generator.

pub mod generator;
pub mod manager;
pub mod session;
pub mod types;

pub use generator::{GeneratorConfig, TransactionGenerator};
pub use manager::{ConnectionManager, EventSink, SessionId};
pub use session::StreamSession;
pub use types::{Envelope, GeneratorHints, ScoredTransaction, TransactionEvent};
