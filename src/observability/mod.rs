//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config::store produces:
//!     → tracing events (load failures, reloads, fail-soft lookups)
//!     → metrics.rs (load outcomes, lookup failures, tree size)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, pretty or JSON)
//!     → Prometheus endpoint (optional, watch mode)
//! ```
//!
//! # Design Decisions
//! - Diagnostics never influence control flow
//! - Metrics are cheap and no-ops without a recorder

pub mod logging;
pub mod metrics;
