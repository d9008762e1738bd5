use glam::DVec2;

use crate::app::forms::{ConnectionForm, FulcrumForm};
use crate::app::state::LoadTicket;
use crate::core::{AreaGraph, Floor, FulcrumWithConnections, InterfloorRow};
use crate::shared::EditorOptions;

/// Maustaste eines Pointer-Drucks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// App-Intent Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
///
/// Pointer-Positionen sind Seitenkoordinaten (wie `clientX/Y`), Zeitstempel
/// Millisekunden einer monotonen Host-Uhr.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Container wurde verschoben oder in der Größe geändert
    ViewportResized {
        origin: DVec2,
        size: DVec2,
        now_ms: f64,
    },
    /// Zeitsignal des Hosts (löst fällige Debounces aus)
    Tick { now_ms: f64 },
    /// Taste auf dem Canvas gedrückt
    PointerPressed { pos: DVec2, button: PointerButton },
    /// Pointer bewegt (Dokumentebene); `movement` ist die relative Rohbewegung
    PointerMoved {
        pos: DVec2,
        movement: DVec2,
        now_ms: f64,
    },
    /// Taste losgelassen (Dokumentebene)
    PointerReleased { pos: DVec2 },
    /// Pointer hat das Dokument verlassen
    PointerLeft,
    /// Mausrad über dem Canvas
    WheelScrolled { pos: DVec2, delta_y: f64 },
    /// Rechtsklick auf dem Canvas
    ContextMenuRequested { pos: DVec2 },
    /// Escape gedrückt
    EscapePressed,
    /// Stufenweise hineinzoomen
    ZoomInRequested,
    /// Stufenweise herauszoomen
    ZoomOutRequested,
    /// Scale 1, Offset 0
    ResetViewRequested,

    /// Raster ein/aus
    GridToggled,
    /// Rasterweite verdoppeln
    GridStepIncreased,
    /// Rasterweite halbieren
    GridStepDecreased,
    /// Raster-Offset auf (0, 0)
    GridOffsetResetRequested,
    /// Druck auf den Raster-Griff
    GridHandlePressed { pos: DVec2, now_ms: f64 },
    /// Host meldet Änderung des Pointer-Captures
    PointerCaptureChanged { captured: bool, now_ms: f64 },

    /// Stockwerk öffnen (lädt synchron über das Backend)
    FloorOpenRequested { floor_id: u64 },
    /// Asynchron geladene Stockwerksdaten
    FloorDataReceived {
        ticket: LoadTicket,
        floor: Floor,
        fulcrums: Vec<FulcrumWithConnections>,
    },
    /// Asynchron geladener Bereichsgraph für das Stockwerk-Panel
    InterfloorDataReceived {
        ticket: LoadTicket,
        focal: Option<u64>,
        area: AreaGraph,
    },
    /// Datei als Grundriss gewählt
    FloorPlanUploaded { bytes: Vec<u8>, mime: String },
    /// Grundriss entfernen (nur lokal bis zum Speichern)
    FloorPlanCleared,
    /// Grundriss speichern
    FloorPlanSaveRequested,

    /// Fulcrum-Formular abgeschickt
    FulcrumFormSubmitted { form: FulcrumForm },
    /// Eine Zeile des Stockwerk-Panels geändert
    InterfloorRowEdited { row: InterfloorRow },
    /// Fulcrum aus dem Edit-Modal löschen
    FulcrumDeleteRequested,
    /// Fulcrum-Modal schließen
    FulcrumModalClosed,
    /// Verbindungs-Formular abgeschickt
    ConnectionFormSubmitted { form: ConnectionForm },
    /// Verbindung aus dem Edit-Modal löschen
    ConnectionDeleteRequested,
    /// Verbindungs-Modal schließen
    ConnectionModalClosed,
    /// Fehlermeldung bestätigt
    ErrorDismissed,
    /// Optionen wurden geändert
    OptionsChanged { options: Box<EditorOptions> },
}
