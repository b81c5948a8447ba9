//! Runtime abstraction layer for async operations
//!
//! The widget's handlers are plain futures. Hosts with synchronous event
//! callbacks (egui frames, DOM listeners) hand them to [`spawn`], which routes
//! them to Tokio, `wasm-bindgen-futures`, or an inline executor depending on
//! the enabled features.

use crate::prelude::{Future, Pin};

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(
        &self,
        future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> Box<dyn AsyncHandle>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;
}

/// Spawns a future on the global runtime
pub fn spawn<F>(future: F) -> Box<dyn AsyncHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    runtime().spawn_boxed(Box::pin(future))
}

/// Default spawner implementations
pub mod spawners {
    use super::*;

    #[cfg(feature = "tokio-runtime")]
    pub mod tokio_impl {
        use super::*;
        use ::tokio::task::JoinHandle;

        /// Tokio-based async spawner.
        ///
        /// Uses the runtime current at spawn time, so it must be called from
        /// within a Tokio context.
        pub struct TokioSpawner;

        impl AsyncSpawner for TokioSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Box<dyn AsyncHandle> {
                Box::new(TokioHandle(::tokio::spawn(future)))
            }
        }

        struct TokioHandle(JoinHandle<()>);

        impl AsyncHandle for TokioHandle {
            fn is_finished(&self) -> bool {
                self.0.is_finished()
            }
        }
    }

    #[cfg(feature = "wasm")]
    pub mod wasm {
        use super::*;
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        /// WASM-compatible async spawner
        pub struct WasmSpawner;

        impl AsyncSpawner for WasmSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Box<dyn AsyncHandle> {
                let finished = Arc::new(AtomicBool::new(false));
                let flag = finished.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    future.await;
                    flag.store(true, Ordering::Release);
                });
                Box::new(WasmHandle { finished })
            }
        }

        struct WasmHandle {
            finished: Arc<AtomicBool>,
        }

        impl AsyncHandle for WasmHandle {
            fn is_finished(&self) -> bool {
                self.finished.load(Ordering::Acquire)
            }
        }
    }

    /// Runs the future to completion on the calling thread.
    pub struct InlineSpawner;

    impl AsyncSpawner for InlineSpawner {
        fn spawn_boxed(
            &self,
            future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
        ) -> Box<dyn AsyncHandle> {
            futures::executor::block_on(future);
            Box::new(Finished)
        }
    }

    struct Finished;

    impl AsyncHandle for Finished {
        fn is_finished(&self) -> bool {
            true
        }
    }
}

/// Async helpers shared by the controllers
pub mod async_utils {
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Monotonic ticket counter for in-flight requests.
    ///
    /// Each request takes a ticket before awaiting; when the response comes
    /// back the holder asks whether its ticket is still the newest one. No
    /// request is ever aborted, late responses are simply recognizable.
    #[derive(Debug, Default)]
    pub struct RequestSequence {
        latest: AtomicU64,
    }

    impl RequestSequence {
        pub fn new() -> Self {
            Self::default()
        }

        /// Issues the next ticket; tickets start at 1.
        pub fn issue(&self) -> u64 {
            self.latest.fetch_add(1, Ordering::SeqCst) + 1
        }

        pub fn is_latest(&self, ticket: u64) -> bool {
            self.latest.load(Ordering::SeqCst) == ticket
        }

        /// Makes every outstanding ticket stale without issuing a request.
        pub fn invalidate(&self) {
            self.latest.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Global runtime instance
static RUNTIME: std::sync::OnceLock<Box<dyn AsyncSpawner>> = std::sync::OnceLock::new();

/// Initialize the runtime with a specific spawner. Only the first call wins.
pub fn init_runtime(spawner: Box<dyn AsyncSpawner>) {
    if RUNTIME.set(spawner).is_err() {
        log::debug!("runtime already initialized, keeping the existing spawner");
    }
}

/// Get the global runtime spawner
pub fn runtime() -> &'static dyn AsyncSpawner {
    RUNTIME
        .get_or_init(|| {
            #[cfg(feature = "tokio-runtime")]
            {
                Box::new(spawners::tokio_impl::TokioSpawner)
            }

            #[cfg(all(feature = "wasm", not(feature = "tokio-runtime")))]
            {
                Box::new(spawners::wasm::WasmSpawner)
            }

            #[cfg(not(any(feature = "tokio-runtime", feature = "wasm")))]
            {
                Box::new(spawners::InlineSpawner)
            }
        })
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::async_utils::RequestSequence;
    use super::*;

    #[test]
    fn newer_ticket_makes_older_stale() {
        let requests = RequestSequence::new();
        let first = requests.issue();
        assert!(requests.is_latest(first));

        let second = requests.issue();
        assert!(!requests.is_latest(first));
        assert!(requests.is_latest(second));

        requests.invalidate();
        assert!(!requests.is_latest(second));
    }

    #[test]
    fn inline_spawner_runs_to_completion() {
        let (tx, rx) = std::sync::mpsc::channel();
        let handle = spawners::InlineSpawner.spawn_boxed(Box::pin(async move {
            let _ = tx.send(7);
        }));
        assert!(handle.is_finished());
        assert_eq!(rx.recv().ok(), Some(7));
    }

    #[cfg(feature = "tokio-runtime")]
    #[::tokio::test]
    async fn test_tokio_spawner() {
        let handle = spawn(async {
            ::tokio::time::sleep(::tokio::time::Duration::from_millis(10)).await;
        });

        ::tokio::time::sleep(::tokio::time::Duration::from_millis(50)).await;
        assert!(handle.is_finished());
    }
}
