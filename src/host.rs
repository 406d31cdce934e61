// --------------------------------------------------
// Capabilities a command handler receives from whoever hosts it
// (the HTTP server, a chat bot, a test).
//
// - EventLog: logging, passed in instead of a global logger
// - Host: config lookup + logging
// - ReplySink: where replies go
// --------------------------------------------------

use serde::Serialize;

use crate::models::Settings;
use crate::render::RenderedCard;

pub trait EventLog: Send + Sync {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Forwards to the `log` facade (env_logger in the binary).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl EventLog for LogFacade {
    fn info(&self, msg: &str) {
        log::info!("{msg}");
    }

    fn warn(&self, msg: &str) {
        log::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        log::error!("{msg}");
    }
}

pub trait Host: Send + Sync {
    fn settings(&self) -> Settings;
    fn log(&self) -> &dyn EventLog;
}

pub trait ReplySink: Send {
    fn image(&mut self, card: RenderedCard);
    fn plain(&mut self, text: String);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    Image { card: RenderedCard },
    Plain { text: String },
}

// Sink that keeps replies in order, returned as JSON by the HTTP layer
#[derive(Debug, Default)]
pub struct CollectedReplies {
    pub replies: Vec<Reply>,
}

impl ReplySink for CollectedReplies {
    fn image(&mut self, card: RenderedCard) {
        self.replies.push(Reply::Image { card });
    }

    fn plain(&mut self, text: String) {
        self.replies.push(Reply::Plain { text });
    }
}

// Test log that remembers every line with its level
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingLog {
    pub lines: std::sync::Mutex<Vec<(log::Level, String)>>,
}

#[cfg(test)]
impl RecordingLog {
    pub fn has(&self, level: log::Level, needle: &str) -> bool {
        self.lines
            .lock()
            .map(|lines| lines.iter().any(|(l, m)| *l == level && m.contains(needle)))
            .unwrap_or(false)
    }

    fn push(&self, level: log::Level, msg: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, msg.to_string()));
        }
    }
}

#[cfg(test)]
impl EventLog for RecordingLog {
    fn info(&self, msg: &str) {
        self.push(log::Level::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(log::Level::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.push(log::Level::Error, msg);
    }
}
