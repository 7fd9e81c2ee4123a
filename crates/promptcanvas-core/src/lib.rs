//! PromptCanvas Core Library
//!
//! Platform-agnostic document model and editing state machine for the
//! PromptCanvas image editor.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod crop;
pub mod document;
pub mod elements;
pub mod generation;
pub mod geometry;
pub mod history;
pub mod ingest;
pub mod input;
pub mod interaction;
pub mod notice;
pub mod selection;
pub mod storage;
pub mod tools;

pub use camera::ViewTransform;
pub use canvas::{Canvas, LayerMove};
pub use config::{ConfigError, EditorConfig};
pub use crop::CropState;
pub use document::{Document, DocumentError};
pub use elements::{Element, ElementId, ImageElement, PathElement, SerializableColor, ShapeElement, ShapeKind};
pub use generation::{GENERATED_IMAGE_ANCHOR, GENERATED_IMAGE_SIZE, GenerationOutcome, GenerationTicket};
pub use history::History;
pub use ingest::{IngestError, IngestFile};
pub use input::{EditorAction, KeyPress, Modifiers, PointerEvent, resolve_key};
pub use interaction::Action;
pub use notice::{Notice, NoticeLevel, Notices};
pub use selection::{Handle, HandleKind, Selection};
pub use storage::{Storage, StorageError, StorageResult};
pub use tools::{ToolKind, ToolStyle};
