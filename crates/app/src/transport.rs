use std::process::Command;

use crate::error::{AppError, Result};

/// Delivery channel for the composed report.
pub trait Transport {
    fn deliver(&self, target: &str, message: &str) -> Result<()>;
}

/// Sends the report over iMessage through the messenger bridge CLI.
pub struct MessengerTransport;

impl Transport for MessengerTransport {
    fn deliver(&self, target: &str, message: &str) -> Result<()> {
        let status = Command::new("moltbot")
            .args([
                "message", "send", "--channel", "imessage", "--target", target, "--message",
                message,
            ])
            .status()
            .map_err(|err| AppError::DeliveryFailed(format!("spawn moltbot: {}", err)))?;
        if status.success() {
            Ok(())
        } else {
            Err(AppError::DeliveryFailed(format!(
                "moltbot exited with {}",
                status
            )))
        }
    }
}

/// Archives a copy of the report to Apple Notes via osascript.
pub struct NotesArchive {
    folder: String,
}

impl NotesArchive {
    pub fn new(folder: String) -> Self {
        Self { folder }
    }

    pub fn save(&self, title: &str, body: &str) -> Result<()> {
        let script = format!(
            "tell application \"Notes\"\n  tell folder \"{folder}\"\n    \
             make new note with properties {{name:\"{title}\", body:\"{body}\"}}\n  \
             end tell\nend tell",
            folder = escape(&self.folder),
            title = escape(title),
            body = escape_body(body),
        );
        let status = Command::new("osascript")
            .args(["-e", &script])
            .status()
            .map_err(|err| AppError::DeliveryFailed(format!("spawn osascript: {}", err)))?;
        if status.success() {
            Ok(())
        } else {
            Err(AppError::DeliveryFailed(format!(
                "osascript exited with {}",
                status
            )))
        }
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn escape_body(value: &str) -> String {
    escape(value).replace('\n', "<br>")
}
