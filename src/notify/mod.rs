//! Failure notification channel.
//!
//! Every failing outcome built with `fail` passes its error through a
//! [`NotificationChannel`] exactly once per error instance:
//!
//! 1. an instance the channel has already handled is returned untouched;
//!    otherwise it is claimed atomically, so concurrent callers routing the
//!    same instance run the hooks once;
//! 2. a call-site trace is attached if the error has none and capture is on;
//! 3. *replace* hooks run in registration order, each receiving the previous
//!    hook's result;
//! 4. the final instance is marked handled;
//! 5. *observe* hooks run.
//!
//! Panics raised by hooks are swallowed. Hooks that construct failures of
//! their own do not re-enter the channel on the same thread.
//!
//! The process-wide channel is [`NotificationChannel::global`]. Hooks are
//! meant to be registered once at startup; `fail_in` constructors accept an
//! explicitly passed channel instead.
//!
//! # Examples
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! use outcome_rail::{Error, NotificationChannel, Outcome};
//!
//! let channel = NotificationChannel::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&seen);
//! channel.on_observe(move |_| {
//!     counter.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! let error = Error::new("disk full");
//! let first: Outcome<()> = Outcome::fail_in(&channel, error.clone());
//! let again: Outcome<()> = Outcome::fail_in(&channel, first.error().clone());
//! assert!(again.is_fail());
//! assert_eq!(seen.load(Ordering::Relaxed), 1);
//! ```

use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError, RwLock};

mod handled;

use handled::HandledSet;

use crate::diagnostics::FrameFilter;
use crate::types::error::Error;

type ReplaceHook = Arc<dyn Fn(&Error) -> Error + Send + Sync>;
type ObserveHook = Arc<dyn Fn(&Error) + Send + Sync>;

static GLOBAL: LazyLock<NotificationChannel> = LazyLock::new(NotificationChannel::new);

thread_local! {
    static NOTIFYING: Cell<bool> = const { Cell::new(false) };
}

/// Hooks and bookkeeping consulted whenever a failing outcome is built.
pub struct NotificationChannel {
    replace: RwLock<Vec<ReplaceHook>>,
    observe: RwLock<Vec<ObserveHook>>,
    handled: Mutex<HandledSet>,
    capture_traces: AtomicBool,
    frames: RwLock<FrameFilter>,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("replace_hooks", &read(&self.replace).len())
            .field("observe_hooks", &read(&self.observe).len())
            .field("capture_traces", &self.capture_traces())
            .finish_non_exhaustive()
    }
}

impl NotificationChannel {
    /// A channel without hooks, capturing traces with the default frame rules.
    pub fn new() -> Self {
        Self {
            replace: RwLock::new(Vec::new()),
            observe: RwLock::new(Vec::new()),
            handled: Mutex::new(HandledSet::default()),
            capture_traces: AtomicBool::new(true),
            frames: RwLock::new(FrameFilter::new()),
        }
    }

    /// The process-wide channel used by `fail`.
    #[inline]
    pub fn global() -> &'static NotificationChannel {
        &GLOBAL
    }

    /// Registers a hook that may substitute the error being routed.
    pub fn on_replace<F>(&self, hook: F)
    where
        F: Fn(&Error) -> Error + Send + Sync + 'static,
    {
        write(&self.replace).push(Arc::new(hook));
    }

    /// Registers a hook that is told about every newly routed error.
    pub fn on_observe<F>(&self, hook: F)
    where
        F: Fn(&Error) + Send + Sync + 'static,
    {
        write(&self.observe).push(Arc::new(hook));
    }

    /// Removes every registered hook.
    pub fn clear_hooks(&self) {
        write(&self.replace).clear();
        write(&self.observe).clear();
    }

    /// Enables or disables attaching call-site traces to routed errors.
    ///
    /// Even when enabled, capture only happens if `RUST_BACKTRACE` or
    /// `RUST_LIB_BACKTRACE` enables backtraces.
    pub fn set_capture_traces(&self, enabled: bool) {
        self.capture_traces.store(enabled, Ordering::Relaxed);
    }

    #[inline]
    pub fn capture_traces(&self) -> bool {
        self.capture_traces.load(Ordering::Relaxed)
    }

    /// Edits the frame rules used for trace capture.
    ///
    /// ```
    /// use outcome_rail::NotificationChannel;
    ///
    /// let channel = NotificationChannel::new();
    /// channel.configure_frames(|frames| {
    ///     *frames = frames.clone().hide_prefix("my_app::support::");
    /// });
    /// ```
    pub fn configure_frames<F>(&self, configure: F)
    where
        F: FnOnce(&mut FrameFilter),
    {
        let mut frames = self.frames.write().unwrap_or_else(PoisonError::into_inner);
        configure(&mut frames);
    }

    /// Runs `f` with the current frame rules.
    pub fn with_frames<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&FrameFilter) -> R,
    {
        let frames = self.frames.read().unwrap_or_else(PoisonError::into_inner);
        f(&frames)
    }

    /// Whether this exact instance has already been routed through the channel.
    pub fn is_handled(&self, error: &Error) -> bool {
        self.handled().contains(error)
    }

    fn handled(&self) -> MutexGuard<'_, HandledSet> {
        self.handled.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks an instance as handled without running any hook.
    pub fn mark_handled(&self, error: &Error) {
        self.handled().insert(error);
    }

    /// Routes `error` through the channel and returns the instance to store.
    pub fn notify(&self, error: Error) -> Error {
        let Some(_guard) = ReentrancyGuard::enter() else {
            return error;
        };
        if !self.handled().insert(&error) {
            return error;
        }

        let original = error.clone();
        let mut current = error;

        if current.stack_trace().is_none() && self.capture_traces() {
            if let Some(trace) = self.with_frames(FrameFilter::capture_if_enabled) {
                current = current.with_stack_trace(trace);
            }
        }
        let traced = current.clone();

        let replace = read(&self.replace).clone();
        for hook in replace {
            let input = current.clone();
            match panic::catch_unwind(AssertUnwindSafe(|| hook(&input))) {
                Ok(next) => current = next,
                Err(_) => {
                    rail_trace!(warn, hook = "replace", "notification hook panicked; ignored");
                },
            }
        }

        {
            let mut handled = self.handled();
            handled.insert(&current);
            if !current.ptr_eq(&traced) && !current.ptr_eq(&original) {
                handled.remove(&original);
            }
        }

        let observe = read(&self.observe).clone();
        for hook in observe {
            if panic::catch_unwind(AssertUnwindSafe(|| hook(&current))).is_err() {
                rail_trace!(warn, hook = "observe", "notification hook panicked; ignored");
            }
        }

        rail_trace!(trace, title = current.title(), "failure routed");
        current
    }
}

/// Marks the current thread as running channel hooks.
struct ReentrancyGuard;

impl ReentrancyGuard {
    fn enter() -> Option<Self> {
        NOTIFYING.with(|flag| (!flag.replace(true)).then_some(ReentrancyGuard))
    }
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        NOTIFYING.with(|flag| flag.set(false));
    }
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Shorthand for [`NotificationChannel::global`].
#[inline]
pub fn channel() -> &'static NotificationChannel {
    NotificationChannel::global()
}
