//! Chat transcript logging to disk.
//!
//! When enabled, received messages and topics are appended to daily files
//! named `<target>_<date>.log` in the configured directory.

use crate::config::TranscriptConfig;
use crate::protocol::ClientEvent;
use chrono::{DateTime, Local};
use std::collections::{HashMap, VecDeque};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// Most transcript files kept open at once.
pub const MAX_OPEN_FILES: usize = 16;

/// Appends chat events to per-target daily log files.
///
/// Handles for today's files are cached, oldest-opened first out once
/// [`MAX_OPEN_FILES`] is reached. Handles from earlier days are closed as
/// soon as a new file is opened.
pub struct Transcript {
    enabled: bool,
    dir: PathBuf,
    file_handles: HashMap<String, File>,
    open_order: VecDeque<String>,
}

impl Transcript {
    pub fn new(config: &TranscriptConfig) -> Self {
        Self {
            enabled: config.enabled,
            dir: config.resolved_dir(),
            file_handles: HashMap::new(),
            open_order: VecDeque::new(),
        }
    }

    /// Record an event. No-op when disabled or for events without a target.
    pub fn record(&mut self, event: &ClientEvent) {
        if !self.enabled {
            return;
        }
        let now = Local::now();
        let Some((target, line)) = format_entry(event, &now) else {
            return;
        };
        let suffix = format!("_{}.log", now.format("%Y-%m-%d"));
        let filename = format!("{}{}", sanitize_target(&target), suffix);

        if !self.file_handles.contains_key(&filename) {
            self.evict(&suffix);
            match self.open(&filename) {
                Ok(file) => {
                    self.file_handles.insert(filename.clone(), file);
                    self.open_order.push_back(filename.clone());
                }
                Err(e) => {
                    warn!(file = %filename, error = %e, "cannot open transcript file");
                    return;
                }
            }
        }
        if let Some(handle) = self.file_handles.get_mut(&filename) {
            if let Err(e) = writeln!(handle, "{}", line) {
                warn!(file = %filename, error = %e, "transcript write failed");
            }
        }
    }

    /// Number of transcript files currently held open.
    pub fn open_files(&self) -> usize {
        self.file_handles.len()
    }

    /// Close handles from other days, then the oldest ones until a new
    /// file fits under the cap.
    fn evict(&mut self, today_suffix: &str) {
        let handles = &mut self.file_handles;
        self.open_order.retain(|name| {
            let current = name.ends_with(today_suffix);
            if !current {
                handles.remove(name);
            }
            current
        });
        while self.file_handles.len() >= MAX_OPEN_FILES {
            let Some(oldest) = self.open_order.pop_front() else {
                break;
            };
            self.file_handles.remove(&oldest);
        }
    }

    fn open(&self, filename: &str) -> std::io::Result<File> {
        fs::create_dir_all(&self.dir)?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join(filename))
    }
}

/// The transcript target and line for an event, if it is recorded at all.
pub fn format_entry(event: &ClientEvent, at: &DateTime<Local>) -> Option<(String, String)> {
    let ts = at.format("%H:%M:%S");
    match event {
        ClientEvent::Message(m) => Some((
            m.target.clone(),
            format!("[{}] <{}> {}", ts, m.sender, m.message),
        )),
        ClientEvent::Topic(t) => Some((
            t.channel.clone(),
            format!("[{}] *** topic: {}", ts, t.topic),
        )),
        _ => None,
    }
}

/// Replace anything outside `[A-Za-z0-9._-]` so the target is a safe file name.
pub fn sanitize_target(target: &str) -> String {
    target
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
