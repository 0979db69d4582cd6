//! Navigation side effects.

use parking_lot::Mutex;

/// Performs a page navigation.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Navigator that records every redirect and logs it.
///
/// Outside a browser there is no page to leave, so the host inspects
/// [`RedirectLog::last`] to decide where the user should go next.
#[derive(Debug, Default)]
pub struct RedirectLog {
    targets: Mutex<Vec<String>>,
}

impl RedirectLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.targets.lock().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.targets.lock().len()
    }
}

impl Navigator for RedirectLog {
    fn redirect(&self, path: &str) {
        tracing::info!(target_path = %path, "Redirecting");
        self.targets.lock().push(path.to_string());
    }
}
