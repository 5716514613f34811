//! Interrupt handling: the first signal cancels the run, a second one forces exit.

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// How interrupt watching ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// A second signal arrived after the run was already cancelled
    Forced,
    /// The signal source failed; no further signals will be seen
    Unavailable,
}

/// Cancel `token` on the first interrupt and return on the second.
///
/// `next_interrupt` resolves once per delivered signal.
pub async fn watch_interrupts<F, Fut>(mut next_interrupt: F, token: CancellationToken) -> Interrupt
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = next_interrupt().await {
        tracing::warn!("Cannot listen for interrupts: {}", e);
        return Interrupt::Unavailable;
    }
    tracing::warn!("Interrupt received, stopping after the current batch (press Ctrl-C again to exit now)");
    token.cancel();

    match next_interrupt().await {
        Ok(()) => Interrupt::Forced,
        Err(e) => {
            tracing::warn!("Cannot listen for interrupts: {}", e);
            Interrupt::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::{mpsc, Mutex};

    fn channel_source(
        rx: mpsc::Receiver<()>,
    ) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>> {
        let rx = Arc::new(Mutex::new(rx));
        move || {
            let rx = Arc::clone(&rx);
            Box::pin(async move {
                rx.lock()
                    .await
                    .recv()
                    .await
                    .ok_or_else(|| std::io::Error::other("signal source closed"))
            })
        }
    }

    #[tokio::test]
    async fn test_first_interrupt_cancels_second_forces_exit() {
        let (tx, rx) = mpsc::channel(4);
        let token = CancellationToken::new();
        let watcher = tokio::spawn(watch_interrupts(channel_source(rx), token.clone()));

        tx.send(()).await.expect("send first interrupt");
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .expect("token cancelled");
        assert!(!watcher.is_finished());

        tx.send(()).await.expect("send second interrupt");
        let outcome = tokio::time::timeout(Duration::from_secs(1), watcher)
            .await
            .expect("watcher returns")
            .expect("watcher task");
        assert_eq!(outcome, Interrupt::Forced);
    }

    #[tokio::test]
    async fn test_unavailable_source_leaves_token_alone() {
        let (tx, rx) = mpsc::channel::<()>(1);
        drop(tx);
        let token = CancellationToken::new();

        let outcome = watch_interrupts(channel_source(rx), token.clone()).await;
        assert_eq!(outcome, Interrupt::Unavailable);
        assert!(!token.is_cancelled());
    }
}
