use chemiscope::engine::diagnostics::{Warning, WarningCallback};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Counts conversion warnings as they are raised. The warnings themselves
/// reach the terminal through the `warn!` events of the engine.
#[derive(Clone, Default)]
pub struct CliWarningHandler {
    count: Arc<Mutex<usize>>,
}

impl CliWarningHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_callback(&self) -> WarningCallback<'static> {
        let count = self.count.clone();

        Box::new(move |_: &Warning| {
            let Ok(mut count_guard) = count.lock() else {
                warn!("Warning counter mutex was poisoned. Cannot record warning.");
                return;
            };
            *count_guard += 1;
        })
    }

    pub fn count(&self) -> usize {
        self.count.lock().map(|guard| *guard).unwrap_or(0)
    }
}
