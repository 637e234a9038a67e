pub mod client;
pub mod error;
pub mod session;

pub use client::SearchClient;
pub use error::ClientError;
pub use session::{LogEntry, LogKind, Phase, SessionController, SessionSnapshot};
