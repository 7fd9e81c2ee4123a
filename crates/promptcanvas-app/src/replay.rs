//! Scripted editing sessions.
//!
//! A session file is a JSON array of events applied in order to a canvas,
//! standing in for the pointer and keyboard input of an interactive host.
//!
//! ```json
//! [
//!   {"kind": "tool", "tool": "rectangle"},
//!   {"kind": "pointer", "event": {"type": "down", "position": {"x": 10, "y": 10}}},
//!   {"kind": "pointer", "event": {"type": "up", "position": {"x": 90, "y": 60}}},
//!   {"kind": "key", "press": {"key": "z", "modifiers": {"ctrl": true}}}
//! ]
//! ```

use std::path::{Path, PathBuf};

use kurbo::Point;
use promptcanvas_core::{
    Action, Canvas, EditorAction, IngestFile, KeyPress, PointerEvent, SerializableColor, ToolKind,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult, read_file};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropStep {
    Begin,
    Confirm,
    Cancel,
}

/// One recorded input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    Pointer { event: PointerEvent },
    Key { press: KeyPress },
    Tool { tool: ToolKind },
    Action { action: EditorAction },
    Style {
        #[serde(default)]
        stroke_color: Option<SerializableColor>,
        #[serde(default)]
        stroke_width: Option<f64>,
        /// A hex color, or `"none"` for no fill.
        #[serde(default)]
        fill: Option<String>,
    },
    Crop { step: CropStep },
    /// Drop an image file. Relative paths resolve against the session file.
    Image { path: PathBuf },
    ImageUrl { url: String, width: f64, height: f64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    /// Net history steps added by the session.
    pub commits: usize,
}

pub fn parse_session(json: &str) -> AppResult<Vec<SessionEvent>> {
    serde_json::from_str(json).map_err(|source| AppError::Json {
        what: "session",
        source,
    })
}

/// Apply one event. Rejected edits are not errors; only unreadable input is.
pub fn apply_event(canvas: &mut Canvas, event: &SessionEvent, base_dir: &Path) -> AppResult<()> {
    match event {
        SessionEvent::Pointer { event } => canvas.handle_pointer(event),
        SessionEvent::Key { press } => {
            if canvas.handle_key(press).is_none() {
                log::debug!("unbound key {:?}", press.key);
            }
        }
        SessionEvent::Tool { tool } => canvas.set_tool(*tool),
        SessionEvent::Action { action } => {
            canvas.apply_action(*action);
        }
        SessionEvent::Style {
            stroke_color,
            stroke_width,
            fill,
        } => {
            if let Some(color) = stroke_color {
                canvas.set_stroke_color(*color);
            }
            if let Some(width) = stroke_width {
                canvas.set_stroke_width(*width);
            }
            if let Some(fill) = fill {
                match fill.as_str() {
                    "none" | "" => {
                        canvas.set_fill_color(None);
                    }
                    hex => match SerializableColor::from_hex(hex) {
                        Ok(color) => {
                            canvas.set_fill_color(Some(color));
                        }
                        Err(err) => canvas.notify_error(err.to_string()),
                    },
                }
            }
        }
        SessionEvent::Crop { step } => {
            let applied = match step {
                CropStep::Begin => canvas.begin_crop_selected(),
                CropStep::Confirm => canvas.confirm_crop(),
                CropStep::Cancel => canvas.cancel_crop(),
            };
            if !applied {
                log::debug!("crop {:?} ignored", step);
            }
        }
        SessionEvent::Image { path } => {
            let path = base_dir.join(path);
            let bytes = read_file(&path)?;
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
            canvas.ingest_files(&[IngestFile::new(name, bytes)]);
        }
        SessionEvent::ImageUrl { url, width, height } => {
            canvas.add_image_url(url, *width, *height);
        }
    }
    Ok(())
}

/// Apply every event in order.
pub fn replay(canvas: &mut Canvas, events: &[SessionEvent], base_dir: &Path) -> AppResult<ReplaySummary> {
    let before = canvas.history().cursor();
    for event in events {
        apply_event(canvas, event, base_dir)?;
    }
    // A session may end mid-gesture; treat end of input as release.
    if canvas.action() != Action::Idle {
        canvas.pointer_up(Point::ZERO);
    }
    let after = canvas.history().cursor();
    Ok(ReplaySummary {
        events: events.len(),
        commits: after.saturating_sub(before),
    })
}
