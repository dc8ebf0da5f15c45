//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGHUP (configurable) → ConfigStore::reload on a blocking thread
//!
//! Shutdown (shutdown.rs):
//!     ctrl-c / SIGTERM → broadcast → reload tasks exit
//! ```
//!
//! # Design Decisions
//! - Reload failures are logged, never fatal
//! - The reload signal is an adapter concern; the store only exposes `reload`

pub mod shutdown;
#[cfg(unix)]
pub mod signals;

pub use shutdown::Shutdown;
#[cfg(unix)]
pub use signals::{spawn_signal_reloader, ReloadSignal};
