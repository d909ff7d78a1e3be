//! Option Compiler: reduces a request's scattered inputs (method, url, body,
//! headers, cookies, auth, impersonation, proxy, verify, streaming) into one
//! ordered transport program, per the step numbering fixed in `compiler`.

pub mod auth;
pub mod compiler;
pub mod value;

pub use auth::{AuthCache, AuthSpec, CompiledAuth};
pub use compiler::{
    compile, CompiledProxy, CompiledRequest, CompilerInput, HttpVersionOverride, ProxyMap,
    RedirectPolicy, VerifyPolicy,
};
pub use value::{OptionValue, RawOptions};
