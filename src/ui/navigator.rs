//! # Navigation
//!
//! Page changes after an operation. The terminal navigator has no pages to
//! render, so it prints each move and remembers where the user "is".
//!
//! Delayed redirects run on their own tokio task and cannot be cancelled once
//! scheduled; [`TerminalNavigator::wait_pending`] lets a short-lived process
//! wait for them instead of exiting first.

use log::{info, warn};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Moves the user to another page.
pub trait Navigator {
    /// Navigate now.
    fn redirect(&self, location: &str);

    /// Navigate after `delay`; the call itself returns immediately.
    fn redirect_with_delay(&self, location: &str, delay: Duration);
}

/// [`Navigator`] that prints navigations to stdout.
pub struct TerminalNavigator {
    location: Arc<Mutex<String>>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl TerminalNavigator {
    pub fn new(start: &str) -> Self {
        Self {
            location: Arc::new(Mutex::new(start.to_string())),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// The page the user is currently on.
    pub fn location(&self) -> String {
        self.location
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Waits until every scheduled redirect has happened.
    pub async fn wait_pending(&self) {
        let handles = {
            let mut pending = self
                .pending
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::take(&mut *pending)
        };

        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Scheduled redirect did not complete: {}", e);
            }
        }
    }
}

fn navigate(current: &Mutex<String>, target: &str) {
    info!("➡️  Navigating to {}", target);
    println!("-> {}", target);
    *current.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = target.to_string();
}

impl Navigator for TerminalNavigator {
    fn redirect(&self, location: &str) {
        navigate(&self.location, location);
    }

    fn redirect_with_delay(&self, location: &str, delay: Duration) {
        let current = Arc::clone(&self.location);
        let target = location.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigate(&current, &target);
        });

        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_moves_immediately() {
        let navigator = TerminalNavigator::new("/");
        navigator.redirect("/visualizar?id=5");
        assert_eq!(navigator.location(), "/visualizar?id=5");
    }

    #[tokio::test]
    async fn delayed_redirect_lands_after_wait() {
        let navigator = TerminalNavigator::new("/cadastrar");
        navigator.redirect_with_delay("/listar", Duration::from_millis(20));

        assert_eq!(navigator.location(), "/cadastrar");

        navigator.wait_pending().await;
        assert_eq!(navigator.location(), "/listar");
    }
}
