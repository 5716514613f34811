//! Browser automation sessions for JavaScript-heavy directory sites.
//!
//! Every unit of work gets its own [`Session`] from a [`SessionProvider`]:
//! a separate browser process with its own profile directory, cookies and
//! execution context, launched with anti-detection flags. Sessions are never
//! pooled, so a crashed or hung session cannot affect a sibling.

pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod session;
#[cfg(any(test, feature = "test-util"))]
pub mod static_site;

pub use engine::{ChromeSession, ChromeSessionProvider};
pub use error::{BrowserError, Result};
pub use fingerprint::FingerprintConfig;
pub use session::{Session, SessionProvider};
