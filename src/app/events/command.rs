use glam::DVec2;

use crate::app::forms::{ConnectionForm, FulcrumForm};
use crate::app::state::LoadTicket;
use crate::core::{AreaGraph, Floor, FulcrumWithConnections, InterfloorRow};
use crate::shared::EditorOptions;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
///
/// Positionen sind hier bereits aufgelöst: `local` = container-relativ,
/// `pointer` = Seitenkoordinate, `position` = normalisiert.
#[derive(Debug, Clone)]
pub enum AppCommand {
    // === Viewport ===
    /// Container-Ursprung sofort, Größe über Debounce übernehmen
    ScheduleResize {
        origin: DVec2,
        size: DVec2,
        now_ms: f64,
    },
    /// Fällige Resize-Anforderung anwenden
    FlushResize { now_ms: f64 },
    /// Pan beginnen
    BeginPan { local: DVec2 },
    /// Pan fortsetzen
    PanTo { local: DVec2 },
    /// Pan beenden
    EndPan,
    /// Zoom zum Cursor
    ZoomAtCursor { local: DVec2, delta_y: f64 },
    /// Stufenzoom um die Container-Mitte
    ZoomBy { factor: f64 },
    /// Viewport zurücksetzen
    ResetView,

    // === Raster ===
    ToggleGrid,
    IncreaseGridStep,
    DecreaseGridStep,
    ResetGridOffset,
    /// Druck auf den Raster-Griff
    PressGridHandle { position: DVec2, now_ms: f64 },
    /// Bewegung während des Raster-Drags
    MoveGridHandle {
        position: DVec2,
        movement: DVec2,
        now_ms: f64,
    },
    /// Raster-Drag beenden
    ReleaseGridHandle,
    /// Capture-Status vom Host
    SetPointerCaptured { captured: bool, now_ms: f64 },

    // === Drag-to-Connect ===
    /// Geste am Fulcrum beginnen
    BeginConnectDrag { from: u64 },
    /// Vorschau nachführen
    UpdateConnectPreview { pointer: DVec2 },
    /// Loslassen auswerten
    FinishConnectDrag { pointer: DVec2 },
    /// Laufende Geste abbrechen
    CancelGesture,

    // === Stockwerk & Grundriss ===
    /// Stockwerk über das Backend laden
    LoadFloor { floor_id: u64 },
    /// Geladene Stockwerksdaten übernehmen
    ApplyFloorData {
        ticket: LoadTicket,
        floor: Floor,
        fulcrums: Vec<FulcrumWithConnections>,
    },
    /// Bereichsgraph für das Panel laden
    LoadInterfloorRows { focal: Option<u64> },
    /// Geladenen Bereichsgraphen übernehmen
    ApplyInterfloorData {
        ticket: LoadTicket,
        focal: Option<u64>,
        area: AreaGraph,
    },
    /// Hochgeladene Datei als Grundriss setzen
    SetFloorPlanFromUpload { bytes: Vec<u8>, mime: String },
    /// Grundriss lokal entfernen
    ClearFloorPlan,
    /// Grundriss im Backend speichern
    SaveFloorPlan,

    // === Modals ===
    OpenFulcrumCreate { position: DVec2 },
    OpenFulcrumEdit { fulcrum_id: u64 },
    OpenConnectionCreate { from: u64, to: u64 },
    OpenConnectionEdit { from: u64, to: u64 },
    SubmitFulcrumForm { form: FulcrumForm },
    UpdateInterfloorRow { row: InterfloorRow },
    DeleteFulcrum,
    CloseFulcrumModal,
    SubmitConnectionForm { form: ConnectionForm },
    DeleteConnection,
    CloseConnectionModal,

    // === Sonstiges ===
    DismissError,
    ApplyOptions { options: Box<EditorOptions> },
}
