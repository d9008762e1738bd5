//! Lokale Präferenzen: Raster-Offset pro Stockwerk.
//!
//! Fehlende oder kaputte Einträge ergeben nie einen Fehler, sondern `None`
//! (der Aufrufer startet dann bei `(0, 0)`).

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::grid::normalize_stored_offset;

/// Präfix der Speicherschlüssel.
pub const STORAGE_KEY_PREFIX: &str = "buildmap.floorEditor.gridOffset.";

/// Speicherschlüssel für ein Stockwerk.
pub fn storage_key(floor_id: u64) -> String {
    format!("{STORAGE_KEY_PREFIX}{floor_id}")
}

/// Persistenz des Raster-Offsets.
pub trait GridOffsetStore {
    /// Gespeicherter Offset, normalisiert; `None` wenn nicht vorhanden oder unlesbar.
    fn load(&mut self, floor_id: u64) -> Option<DVec2>;
    /// Speichert den Offset; Fehler werden protokolliert und verschluckt.
    fn save(&mut self, floor_id: u64, offset: DVec2);
}

/// Fehlende Achsen werden als 0 gelesen.
#[derive(Debug, Serialize, Deserialize)]
struct StoredOffset {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
}

fn encode(offset: DVec2) -> Option<String> {
    let normalized = normalize_stored_offset(offset.x, offset.y);
    serde_json::to_string(&StoredOffset {
        x: normalized.x,
        y: normalized.y,
    })
    .ok()
}

fn decode(text: &str) -> Option<DVec2> {
    match serde_json::from_str::<StoredOffset>(text) {
        Ok(stored) => Some(normalize_stored_offset(stored.x, stored.y)),
        Err(e) => {
            log::debug!("Gespeicherter Raster-Offset unlesbar: {}", e);
            None
        }
    }
}

/// Eine JSON-Datei pro Stockwerk in einem Verzeichnis.
#[derive(Debug, Clone)]
pub struct FileGridOffsetStore {
    dir: PathBuf,
}

impl FileGridOffsetStore {
    /// Erstellt einen Store unter `dir` (wird beim ersten Schreiben angelegt).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Dateipfad für ein Stockwerk.
    pub fn path_for(&self, floor_id: u64) -> PathBuf {
        self.dir.join(format!("{}.json", storage_key(floor_id)))
    }
}

impl GridOffsetStore for FileGridOffsetStore {
    fn load(&mut self, floor_id: u64) -> Option<DVec2> {
        let path = self.path_for(floor_id);
        let text = std::fs::read_to_string(&path).ok()?;
        decode(&text)
    }

    fn save(&mut self, floor_id: u64, offset: DVec2) {
        let Some(text) = encode(offset) else {
            return;
        };
        let path = self.path_for(floor_id);
        let result = std::fs::create_dir_all(&self.dir).and_then(|_| std::fs::write(&path, text));
        if let Err(e) = result {
            log::warn!(
                "Raster-Offset konnte nicht gespeichert werden ({}): {}",
                path.display(),
                e
            );
        }
    }
}

/// Store im Speicher; Klone teilen den Inhalt.
#[derive(Debug, Clone, Default)]
pub struct MemoryGridOffsetStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryGridOffsetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schreibt einen Rohwert (z. B. kaputte Daten).
    pub fn insert_raw(&self, floor_id: u64, text: impl Into<String>) {
        self.entries
            .borrow_mut()
            .insert(storage_key(floor_id), text.into());
    }

    /// Liest den Rohwert eines Stockwerks.
    pub fn raw(&self, floor_id: u64) -> Option<String> {
        self.entries.borrow().get(&storage_key(floor_id)).cloned()
    }
}

impl GridOffsetStore for MemoryGridOffsetStore {
    fn load(&mut self, floor_id: u64) -> Option<DVec2> {
        let text = self.raw(floor_id)?;
        decode(&text)
    }

    fn save(&mut self, floor_id: u64, offset: DVec2) {
        if let Some(text) = encode(offset) {
            self.entries.borrow_mut().insert(storage_key(floor_id), text);
        }
    }
}
