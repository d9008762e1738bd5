use glam::DVec2;

/// Benachrichtigungen an den Host nach erfolgreichen Zustandsänderungen.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    FloorLoaded { floor_id: u64, fulcrums: usize },
    FulcrumCreated { id: u64 },
    FulcrumUpdated { id: u64 },
    FulcrumDeleted { id: u64 },
    /// Drag-to-Connect wurde über einem Ziel losgelassen
    ConnectionCommitted { from: u64, to: u64 },
    ConnectionSaved { from: u64, to: u64 },
    ConnectionDeleted { from: u64, to: u64 },
    GridOffsetChanged { floor_id: u64, offset: DVec2 },
    FloorPlanSaved { floor_id: u64 },
    ErrorRaised { message: String },
}
