use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
enum DebounceState {
    Idle,
    Pending {
        generation: u64,
        token: CancellationToken,
    },
}

#[derive(Debug)]
struct Shared {
    state: DebounceState,
    next_generation: u64,
}

/// Delayed single-shot trigger. Scheduling while a timer is pending cancels
/// the pending timer; only the most recently armed action ever runs.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    shared: Arc<Mutex<Shared>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            shared: Arc::new(Mutex::new(Shared {
                state: DebounceState::Idle,
                next_generation: 0,
            })),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.lock().state, DebounceState::Pending { .. })
    }

    /// Arms the timer. `action` is only invoked after the delay elapses
    /// without another `schedule` or `cancel`, so anything it reads is read
    /// at expiry time. Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let generation = {
            let mut shared = self.lock();
            if let DebounceState::Pending { token, .. } = &shared.state {
                token.cancel();
            }
            shared.next_generation += 1;
            let generation = shared.next_generation;
            shared.state = DebounceState::Pending {
                generation,
                token: token.clone(),
            };
            generation
        };

        tracing::trace!("Debounce timer armed (generation {})", generation);

        let delay = self.delay;
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!("Debounce timer {} cancelled", generation);
                }
                _ = tokio::time::sleep(delay) => {
                    if Self::take_expired(&shared, generation) {
                        action().await;
                    }
                }
            }
        });
    }

    /// Discards the pending action, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        let mut shared = self.lock();
        match std::mem::replace(&mut shared.state, DebounceState::Idle) {
            DebounceState::Pending { token, .. } => {
                token.cancel();
                true
            }
            DebounceState::Idle => false,
        }
    }

    // Pending -> Idle, but only for the timer that is still current.
    fn take_expired(shared: &Mutex<Shared>, generation: u64) -> bool {
        let mut shared = shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match &shared.state {
            DebounceState::Pending {
                generation: current,
                token,
            } if *current == generation && !token.is_cancelled() => {
                shared.state = DebounceState::Idle;
                true
            }
            _ => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
