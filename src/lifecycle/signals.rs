//! OS signal reload trigger.
//!
//! # Responsibilities
//! - Register a handler for the configured reload signal
//! - Run `ConfigStore::reload` on every delivery
//! - Stop when the shutdown broadcast fires
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Reload runs on the blocking pool since it does file I/O
//! - Hangup is the default; interrupt stays selectable for deployments
//!   that already send it

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::ConfigStore;

/// Signal that triggers a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloadSignal {
    #[default]
    Hangup,
    Interrupt,
    User1,
    User2,
}

impl ReloadSignal {
    fn kind(&self) -> SignalKind {
        match self {
            ReloadSignal::Hangup => SignalKind::hangup(),
            ReloadSignal::Interrupt => SignalKind::interrupt(),
            ReloadSignal::User1 => SignalKind::user_defined1(),
            ReloadSignal::User2 => SignalKind::user_defined2(),
        }
    }
}

impl fmt::Display for ReloadSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReloadSignal::Hangup => "SIGHUP",
            ReloadSignal::Interrupt => "SIGINT",
            ReloadSignal::User1 => "SIGUSR1",
            ReloadSignal::User2 => "SIGUSR2",
        };
        f.write_str(name)
    }
}

impl FromStr for ReloadSignal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_prefix("sig").unwrap_or(&name);
        match name {
            "hup" | "hangup" => Ok(ReloadSignal::Hangup),
            "int" | "interrupt" => Ok(ReloadSignal::Interrupt),
            "usr1" | "user1" => Ok(ReloadSignal::User1),
            "usr2" | "user2" => Ok(ReloadSignal::User2),
            _ => Err(format!("unknown reload signal: {}", s)),
        }
    }
}

/// Spawn a task that reloads `store` each time `reload_signal` arrives.
///
/// The handler is registered before this returns, so a signal sent right
/// after the call is not lost.
pub fn spawn_signal_reloader(
    store: Arc<ConfigStore>,
    reload_signal: ReloadSignal,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<JoinHandle<()>> {
    let mut stream = signal(reload_signal.kind())?;
    tracing::info!(signal = %reload_signal, "Reload signal handler installed");

    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                received = stream.recv() => {
                    if received.is_none() {
                        break;
                    }
                    tracing::info!(signal = %reload_signal, "Reload signal received");
                    let store = store.clone();
                    match tokio::task::spawn_blocking(move || store.reload()).await {
                        Ok(Ok(())) => {}
                        // Already logged by the store.
                        Ok(Err(_)) => {}
                        Err(e) => tracing::error!(error = %e, "Reload task panicked"),
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Reload listener received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signal_names() {
        assert_eq!("HUP".parse::<ReloadSignal>(), Ok(ReloadSignal::Hangup));
        assert_eq!("sigint".parse::<ReloadSignal>(), Ok(ReloadSignal::Interrupt));
        assert_eq!("SIGUSR1".parse::<ReloadSignal>(), Ok(ReloadSignal::User1));
        assert_eq!("user2".parse::<ReloadSignal>(), Ok(ReloadSignal::User2));
        assert!("term".parse::<ReloadSignal>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for sig in [
            ReloadSignal::Hangup,
            ReloadSignal::Interrupt,
            ReloadSignal::User1,
            ReloadSignal::User2,
        ] {
            assert_eq!(sig.to_string().parse::<ReloadSignal>(), Ok(sig));
        }
    }
}
