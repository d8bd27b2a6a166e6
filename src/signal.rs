//! Single-slot press signal.
//!
//! Hands an accepted button edge from the interrupt path to the
//! acknowledge task.  The primitive is split into two halves:
//!
//! - [`EventSignal`] — owned by the waiting task; [`EventSignal::take`]
//!   blocks until the signal is raised, then consumes it.
//! - [`SignalRaiser`] — cloneable handle given to the ISR;
//!   [`SignalRaiser::raise_from_isr`] is non-blocking and additionally
//!   requests a scheduler re-evaluation so a higher-priority waiter
//!   preempts the interrupted context as soon as the ISR returns.
//!
//! Semantics: raising while nobody waits latches the signal for the next
//! `take`; raising while already raised coalesces into one; each raise
//! releases at most one waiter.  No raise is ever lost between being set
//! and being taken.
//!
//! On ESP-IDF the signal is a FreeRTOS task notification (the lightweight
//! binary-semaphore analog), so [`EventSignal::new`] must run on the task
//! that will later call `take`.  On the host it is a mutex/condvar latch
//! with the same contract, used by the simulation tests.

#[cfg(target_os = "espidf")]
mod imp {
    use std::num::NonZeroU32;
    use std::sync::Arc;

    use esp_idf_hal::delay;
    use esp_idf_hal::task::notification::{Notification, Notifier};

    pub struct EventSignal {
        inner: Notification,
    }

    #[derive(Clone)]
    pub struct SignalRaiser {
        notifier: Arc<Notifier>,
    }

    impl EventSignal {
        /// Create the signal pair.  FreeRTOS task notifications are
        /// addressed to the creating task, so this must be called from
        /// the task that will `take`.
        pub fn new() -> (Self, SignalRaiser) {
            let inner = Notification::new();
            let notifier = inner.notifier();
            (Self { inner }, SignalRaiser { notifier })
        }

        /// Block the calling task until the signal is raised, then
        /// consume it.  Infinite timeout; the task has no other purpose.
        pub fn take(&self) {
            while self.inner.wait(delay::BLOCK).is_none() {}
        }
    }

    impl SignalRaiser {
        /// Raise the signal.  ISR-safe; performs the FreeRTOS
        /// yield-from-ISR request when a higher-priority task was woken.
        pub fn raise_from_isr(&self) {
            let pressed = NonZeroU32::new(1).unwrap();
            // SAFETY: notify_and_yield is the ISR-context entry point of
            // the notifier; the owning task outlives the ISR registration.
            let _ = unsafe { self.notifier.notify_and_yield(pressed) };
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod imp {
    use std::sync::{Arc, Condvar, Mutex};

    struct Shared {
        raised: Mutex<bool>,
        wake: Condvar,
    }

    pub struct EventSignal {
        shared: Arc<Shared>,
    }

    #[derive(Clone)]
    pub struct SignalRaiser {
        shared: Arc<Shared>,
    }

    impl EventSignal {
        pub fn new() -> (Self, SignalRaiser) {
            let shared = Arc::new(Shared {
                raised: Mutex::new(false),
                wake: Condvar::new(),
            });
            (
                Self {
                    shared: Arc::clone(&shared),
                },
                SignalRaiser { shared },
            )
        }

        /// Block until raised, then consume the signal.
        pub fn take(&self) {
            let mut raised = self
                .shared
                .raised
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            while !*raised {
                raised = self
                    .shared
                    .wake
                    .wait(raised)
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
            }
            *raised = false;
        }

        /// Test-only peek at the latch.
        #[cfg(test)]
        pub(crate) fn is_raised(&self) -> bool {
            *self
                .shared
                .raised
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
        }
    }

    impl SignalRaiser {
        /// Latch the signal and release one waiter, if any.
        pub fn raise_from_isr(&self) {
            let mut raised = self
                .shared
                .raised
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *raised = true;
            self.shared.wake.notify_one();
        }
    }
}

pub use imp::{EventSignal, SignalRaiser};
