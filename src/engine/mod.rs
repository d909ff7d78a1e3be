//! Transfer engine: the concurrency core that multiplexes in-flight
//! transfers over the shared connection pool (§4.E).

mod multiplexer;
pub mod transfer;

pub use multiplexer::{Engine, TransferTicket};
pub use transfer::{TransferId, TransferState};
