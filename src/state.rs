use std::sync::Arc;

use crate::api::Backend;
use crate::config::Config;
use crate::console::Console;
use crate::extractors::BackendSession;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub backend: Arc<dyn Backend>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn Backend>) -> Self {
        Self { config, backend }
    }

    /// Console bound to the browser's backend session for one request.
    pub fn console(&self, session: BackendSession) -> Console<'_> {
        Console::new(self.backend.as_ref(), &self.config, session.0)
    }
}
