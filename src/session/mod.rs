//! The user-facing request surface: `Session`/`AsyncSession`, each owning its
//! own pool, cookie jar, and fingerprint catalog rather than reaching into
//! any process-global state (redirect-following, auth-retry, and option
//! compilation all happen per call in [`request`]).

pub mod async_session;
pub mod defaults;
pub mod request;
pub mod sync_session;

pub use async_session::{AsyncSession, AsyncSessionBuilder, RequestBuilder};
pub use defaults::SessionDefaults;
pub use sync_session::{BlockingRequestBuilder, Session, SessionBuilder};
