use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::host::{EventLog, Host, LogFacade};
use crate::models::Settings;
use crate::render::{CardRenderer, PayloadRenderer};

pub type SharedState = Arc<AppState>;

// Shared by every handler; settings can be replaced at runtime
pub struct AppState {
    pub settings: RwLock<Settings>,
    pub config_path: PathBuf, // where PUT /api/settings persists
    pub renderer: Arc<dyn CardRenderer>,
    pub log: LogFacade,
}

impl AppState {
    pub fn new(settings: Settings, config_path: PathBuf) -> SharedState {
        Self::with_renderer(settings, config_path, Arc::new(PayloadRenderer))
    }

    pub fn with_renderer(
        settings: Settings,
        config_path: PathBuf,
        renderer: Arc<dyn CardRenderer>,
    ) -> SharedState {
        Arc::new(Self {
            settings: RwLock::new(settings),
            config_path,
            renderer,
            log: LogFacade,
        })
    }
}

impl Host for AppState {
    fn settings(&self) -> Settings {
        // a poisoned lock still holds the last written settings
        match self.settings.read() {
            Ok(s) => s.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn log(&self) -> &dyn EventLog {
        &self.log
    }
}
