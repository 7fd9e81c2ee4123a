//! Subcommand implementations.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use kurbo::Rect;
use promptcanvas_core::storage::FileStorage;
use promptcanvas_core::{Canvas, Document, EditorConfig, NoticeLevel, Storage};
use promptcanvas_generate::{GeminiClient, GeneratorConfig, HttpFetcher, generate_into};

use crate::cli::{Cli, Command, LibraryCommand};
use crate::error::{AppError, AppResult, read_text, write_text};
use crate::replay::{parse_session, replay};
use crate::shortcuts::ShortcutRegistry;

/// Element counts and overall bounds of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub counts: BTreeMap<&'static str, usize>,
    pub bounds: Option<Rect>,
}

impl DocumentInfo {
    pub fn of(document: &Document) -> Self {
        let mut counts = BTreeMap::new();
        for element in document.elements() {
            *counts.entry(element.kind_name()).or_insert(0) += 1;
        }
        Self {
            counts,
            bounds: document.bounds(),
        }
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl fmt::Display for DocumentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} element(s)", self.total())?;
        for (kind, count) in &self.counts {
            writeln!(f, "  {kind:6} {count}")?;
        }
        match self.bounds {
            Some(b) => write!(f, "bounds: ({:.1}, {:.1}) - ({:.1}, {:.1})", b.x0, b.y0, b.x1, b.y1),
            None => write!(f, "bounds: empty"),
        }
    }
}

pub fn load_config(path: Option<&Path>) -> AppResult<EditorConfig> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    let json = read_text(path)?;
    EditorConfig::from_json(&json).map_err(|source| AppError::Config {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_document(path: &Path) -> AppResult<Document> {
    Ok(Document::from_json(&read_text(path)?)?)
}

fn write_document(canvas: &Canvas, output: Option<&Path>) -> AppResult<()> {
    let json = canvas.to_json()?;
    match output {
        Some(path) => {
            write_text(path, &json)?;
            log::info!("wrote {} element(s) to {}", canvas.document().len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn report_notices(canvas: &Canvas) {
    for notice in canvas.notices.iter() {
        match notice.level {
            NoticeLevel::Info => eprintln!("{}", notice.message),
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
        }
    }
}

fn open_library(dir: Option<PathBuf>) -> AppResult<FileStorage> {
    Ok(match dir {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::default_location()?,
    })
}

pub async fn run(cli: Cli) -> AppResult<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Info { document } => {
            println!("{}", DocumentInfo::of(&load_document(&document)?));
        }
        Command::Replay { session, from, output } => {
            let document = match from {
                Some(path) => load_document(&path)?,
                None => Document::new(),
            };
            let mut canvas = Canvas::with_document(document, config);
            let events = parse_session(&read_text(&session)?)?;
            let base_dir = session.parent().unwrap_or(Path::new("."));
            let summary = replay(&mut canvas, &events, base_dir)?;
            log::info!("replayed {} event(s), {} history step(s)", summary.events, summary.commits);
            report_notices(&canvas);
            write_document(&canvas, output.as_deref())?;
        }
        Command::Generate {
            document,
            prompt,
            select,
            output,
        } => {
            let mut canvas = Canvas::with_document(load_document(&document)?, config);
            let mut ids = Vec::with_capacity(select.len());
            for wanted in &select {
                let id = canvas
                    .elements()
                    .iter()
                    .map(|el| el.id())
                    .find(|id| id.to_string() == *wanted)
                    .ok_or_else(|| AppError::UnknownElement(wanted.clone()))?;
                ids.push(id);
            }
            canvas.selection.set(ids);

            let generator_config = GeneratorConfig::from_env()?;
            let generator = GeminiClient::new(&generator_config)?;
            let fetcher = HttpFetcher::new(generator_config.timeouts)?;
            let added = generate_into(&mut canvas, &prompt, &generator, &fetcher).await;
            report_notices(&canvas);
            match added {
                Some(id) => {
                    eprintln!("added image {id}");
                    write_document(&canvas, Some(output.as_deref().unwrap_or(document.as_path())))?;
                }
                None => log::warn!("no image generated"),
            }
        }
        Command::Library { dir, action } => {
            let storage = open_library(dir)?;
            run_library(&storage, action, config).await?;
        }
        Command::Shortcuts => ShortcutRegistry::print_all(),
    }
    Ok(())
}

async fn run_library(storage: &dyn Storage, action: LibraryCommand, config: EditorConfig) -> AppResult<()> {
    match action {
        LibraryCommand::List => {
            for name in storage.list().await? {
                println!("{name}");
            }
        }
        LibraryCommand::Save { name, document } => {
            let canvas = Canvas::with_document(load_document(&document)?, config);
            canvas.save_to(storage, &name).await?;
        }
        LibraryCommand::Open { name, output } => {
            let mut canvas = Canvas::with_config(config);
            canvas.load_from(storage, &name).await?;
            write_document(&canvas, output.as_deref())?;
        }
        LibraryCommand::Delete { name } => {
            storage.delete(&name).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use pollster::block_on;
    use promptcanvas_core::storage::MemoryStorage;
    use promptcanvas_core::{ConfigError, Element, PathElement, ShapeElement, ShapeKind};

    fn sample() -> Document {
        let mut path = PathElement::new(Point::new(0.0, 0.0));
        path.add_point(Point::new(20.0, 5.0));
        Document::from_elements(vec![
            Element::Shape(ShapeElement::new(ShapeKind::Rectangle, Point::new(10.0, 10.0)).with_rect(Rect::new(
                10.0, 10.0, 110.0, 60.0,
            ))),
            Element::Shape(ShapeElement::new(ShapeKind::Circle, Point::new(0.0, 0.0))),
            Element::Path(path),
        ])
        .unwrap()
    }

    #[test]
    fn test_document_info() {
        let info = DocumentInfo::of(&sample());
        assert_eq!(info.total(), 3);
        assert_eq!(info.counts.get("shape"), Some(&2));
        assert_eq!(info.counts.get("path"), Some(&1));
        let bounds = info.bounds.unwrap();
        assert!((bounds.x1 - 110.0).abs() < 1e-9);
        assert!(info.to_string().starts_with("3 element(s)"));

        let empty = DocumentInfo::of(&Document::new());
        assert_eq!(empty.to_string(), "0 element(s)\nbounds: empty");
    }

    #[test]
    fn test_load_config() {
        assert_eq!(load_config(None).unwrap(), EditorConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.json");
        std::fs::write(&path, r#"{"pasteOffset": 25}"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert!((config.paste_offset - 25.0).abs() < f64::EPSILON);

        std::fs::write(&path, "{").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(AppError::Config { .. })));
        std::fs::write(&path, r#"{"minScalePercent": 300}"#).unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(AppError::Config {
                source: ConfigError::Invalid(_),
                ..
            })
        ));
        assert!(matches!(
            load_config(Some(&dir.path().join("missing.json"))),
            Err(AppError::Io { .. })
        ));
    }

    #[test]
    fn test_library_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let doc_path = dir.path().join("in.json");
        let out_path = dir.path().join("out.json");
        let original = sample();
        std::fs::write(&doc_path, original.to_json().unwrap()).unwrap();

        let storage = MemoryStorage::new();
        let config = EditorConfig::default();
        block_on(run_library(
            &storage,
            LibraryCommand::Save {
                name: "sketch".into(),
                document: doc_path,
            },
            config.clone(),
        ))
        .unwrap();
        assert_eq!(block_on(storage.list()).unwrap(), vec!["sketch".to_string()]);

        block_on(run_library(
            &storage,
            LibraryCommand::Open {
                name: "sketch".into(),
                output: Some(out_path.clone()),
            },
            config.clone(),
        ))
        .unwrap();
        assert_eq!(load_document(&out_path).unwrap(), original);

        block_on(run_library(&storage, LibraryCommand::Delete { name: "sketch".into() }, config.clone())).unwrap();
        assert!(matches!(
            block_on(run_library(
                &storage,
                LibraryCommand::Open {
                    name: "sketch".into(),
                    output: None,
                },
                config,
            )),
            Err(AppError::Storage(_))
        ));
    }

    #[test]
    fn test_replay_command_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let session = dir.path().join("session.json");
        let output = dir.path().join("out.json");
        std::fs::write(
            &session,
            r#"[
                {"kind": "tool", "tool": "triangle"},
                {"kind": "pointer", "event": {"type": "down", "position": {"x": 0, "y": 0}}},
                {"kind": "pointer", "event": {"type": "move", "position": {"x": 40, "y": 40}}},
                {"kind": "pointer", "event": {"type": "up", "position": {"x": 40, "y": 40}}}
            ]"#,
        )
        .unwrap();

        let cli = Cli {
            config: None,
            command: Command::Replay {
                session,
                from: None,
                output: Some(output.clone()),
            },
        };
        block_on(run(cli)).unwrap();
        let document = load_document(&output).unwrap();
        assert_eq!(document.len(), 1);
        assert_eq!(document.elements()[0].as_shape().unwrap().shape_kind, ShapeKind::Triangle);
    }
}
