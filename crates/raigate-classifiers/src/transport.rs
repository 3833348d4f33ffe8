//! Mapping from HTTP client failures to raigate errors, shared by every
//! hosted-service backend

use raigate_core::Error;

/// A client-side timeout becomes [`Error::Timeout`]; any other failure to
/// reach the service becomes [`Error::Transport`]
pub fn map_transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::transport(e.to_string())
    }
}
