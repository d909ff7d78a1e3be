//! The response surface returned from `Session`/`AsyncSession`/`WebSocket` calls.

mod body;
mod queue;
mod response;
mod streaming;

pub use body::ResponseBody;
pub use queue::{Chunk, Queue, SinkQueue};
pub use response::{HistoryEntry, HttpResponse};
pub use streaming::{iter_content, iter_lines, ContentIter, LineIter};
