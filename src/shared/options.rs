//! Zentrale Konfiguration für den BuildMap-Grundriss-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::grid::{GRID_STEP_DEFAULT, GRID_STEP_MAX, GRID_STEP_MIN};
use crate::core::viewport::{DEFAULT_ZOOM_SENSITIVITY, SCALE_MAX, SCALE_MIN};
use crate::core::GridStepBounds;

// ── Viewport ────────────────────────────────────────────────────────

/// Zoom-Faktor der Toolbar-Buttons.
pub const ZOOM_BUTTON_STEP: f64 = 1.2;

// ── Raster ──────────────────────────────────────────────────────────

/// Bewegung (normalisiert), ab der ein Raster-Drag als Drag zählt.
pub const GRID_DRAG_THRESHOLD: f64 = 0.004;
/// Zeitfenster für Doppelklick auf den Raster-Griff (ms).
pub const GRID_DOUBLE_CLICK_MS: f64 = 280.0;
/// Sperrzeit für erneute Pointer-Capture-Anfragen nach Verlust (ms).
pub const CAPTURE_RETRY_COOLDOWN_MS: f64 = 200.0;

// ── Treffer ─────────────────────────────────────────────────────────

/// Fangradius für Drag-to-Connect in Screen-Pixeln.
pub const CONNECT_HIT_RADIUS_PX: f64 = 30.0;
/// Trefferradius eines Fulcrum-Markers in Screen-Pixeln.
pub const MARKER_HIT_RADIUS_PX: f64 = 12.0;
/// Toleranz für Rechtsklick auf Verbindungslinien in Screen-Pixeln.
pub const EDGE_HIT_TOLERANCE_PX: f64 = 6.0;

// ── Layout ──────────────────────────────────────────────────────────

/// Entprellzeit für Resize/Fit-Neuberechnung (ms).
pub const RESIZE_DEBOUNCE_MS: f64 = 100.0;

// ── Backend ─────────────────────────────────────────────────────────

/// Standard-Basis-URL des BuildMap-API-Servers.
pub const API_BASE_URL: &str = "http://localhost:8080";
/// Umgebungsvariable mit dem Bearer-Token.
pub const API_TOKEN_ENV: &str = "BUILDMAP_TOKEN";
/// Timeout pro Request in Sekunden.
pub const API_TIMEOUT_SECS: u64 = 15;

/// Laufzeit-Optionen des Editors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorOptions {
    // ── Viewport ─────────────────────────────────────────────────
    /// Zoom pro Wheel-Delta-Einheit
    pub zoom_sensitivity: f64,
    /// Minimaler Zoom-Faktor
    pub scale_min: f64,
    /// Maximaler Zoom-Faktor
    pub scale_max: f64,
    /// Faktor für Zoom-Buttons
    pub zoom_button_step: f64,

    // ── Raster ───────────────────────────────────────────────────
    pub grid_step_default: f64,
    pub grid_step_min: f64,
    pub grid_step_max: f64,
    /// Ab dieser Bewegung (normalisiert) wird Pointer-Capture angefordert
    pub grid_drag_threshold: f64,
    pub grid_double_click_ms: f64,
    pub capture_retry_cooldown_ms: f64,

    // ── Treffer ──────────────────────────────────────────────────
    /// Fangradius für Drag-to-Connect (px)
    pub connect_hit_radius_px: f64,
    /// Trefferradius der Marker (px)
    #[serde(default = "default_marker_hit_radius_px")]
    pub marker_hit_radius_px: f64,
    /// Toleranz für Linien-Treffer (px)
    #[serde(default = "default_edge_hit_tolerance_px")]
    pub edge_hit_tolerance_px: f64,

    // ── Layout ───────────────────────────────────────────────────
    pub resize_debounce_ms: f64,

    // ── Backend ──────────────────────────────────────────────────
    /// Basis-URL der REST-API
    pub api_base_url: String,
    /// Name der Umgebungsvariable mit dem Bearer-Token
    pub api_token_env: String,
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,

    // ── Lokaler Speicher ─────────────────────────────────────────
    /// Verzeichnis für gespeicherte Raster-Offsets (`None` = neben der Binary)
    #[serde(default)]
    pub grid_offset_dir: Option<PathBuf>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            scale_min: SCALE_MIN,
            scale_max: SCALE_MAX,
            zoom_button_step: ZOOM_BUTTON_STEP,

            grid_step_default: GRID_STEP_DEFAULT,
            grid_step_min: GRID_STEP_MIN,
            grid_step_max: GRID_STEP_MAX,
            grid_drag_threshold: GRID_DRAG_THRESHOLD,
            grid_double_click_ms: GRID_DOUBLE_CLICK_MS,
            capture_retry_cooldown_ms: CAPTURE_RETRY_COOLDOWN_MS,

            connect_hit_radius_px: CONNECT_HIT_RADIUS_PX,
            marker_hit_radius_px: MARKER_HIT_RADIUS_PX,
            edge_hit_tolerance_px: EDGE_HIT_TOLERANCE_PX,

            resize_debounce_ms: RESIZE_DEBOUNCE_MS,

            api_base_url: API_BASE_URL.to_string(),
            api_token_env: API_TOKEN_ENV.to_string(),
            api_timeout_secs: API_TIMEOUT_SECS,

            grid_offset_dir: None,
        }
    }
}

/// Serde-Default für `marker_hit_radius_px` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_marker_hit_radius_px() -> f64 {
    MARKER_HIT_RADIUS_PX
}

fn default_edge_hit_tolerance_px() -> f64 {
    EDGE_HIT_TOLERANCE_PX
}

fn default_api_timeout_secs() -> u64 {
    API_TIMEOUT_SECS
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> PathBuf {
        Self::binary_dir().join("buildmap_floor_editor.toml")
    }

    /// Verzeichnis für Raster-Offsets: konfiguriert oder `grid_offsets/` neben der Binary.
    pub fn grid_offset_dir(&self) -> PathBuf {
        self.grid_offset_dir
            .clone()
            .unwrap_or_else(|| Self::binary_dir().join("grid_offsets"))
    }

    /// Raster-Grenzen aus den Optionen.
    pub fn grid_step_bounds(&self) -> GridStepBounds {
        GridStepBounds {
            default: self.grid_step_default,
            min: self.grid_step_min,
            max: self.grid_step_max,
        }
    }

    fn binary_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
