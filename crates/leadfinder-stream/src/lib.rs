pub mod decode;
pub mod dispatch;
pub mod types;

pub use decode::LineDecoder;
pub use dispatch::dispatch_line;
pub use types::{BusinessRecord, SearchResult, StreamEvent};
