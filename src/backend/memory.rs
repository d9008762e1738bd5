//! Backend im Speicher mit der Semantik der REST-API.
//!
//! Soft-Delete, Ablehnung doppelter Verbindungen und Bereichsprüfung verhalten
//! sich wie auf dem Server. Klone teilen denselben Speicher.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use indexmap::IndexMap;

use super::{BackendError, FloorPlanBackend};
use crate::core::{
    ConnectionDraft, Floor, FloorUpdate, Fulcrum, FulcrumDraft, FulcrumRecord,
    FulcrumWithConnections,
};

/// Backend-Operation, z. B. für Fehlerinjektion und Aufrufprotokoll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOperation {
    FloorsByArea,
    FloorById,
    UpdateFloor,
    FulcrumsByFloor,
    FulcrumsByArea,
    CreateFulcrum,
    UpdateFulcrum,
    DeleteFulcrum,
    AddConnection,
    RemoveConnection,
}

#[derive(Debug, Clone)]
struct StoredFulcrum {
    fulcrum: Fulcrum,
    area_id: u64,
    deleted: bool,
    connections: IndexMap<u64, f64>,
}

impl StoredFulcrum {
    fn to_entry(&self) -> FulcrumWithConnections {
        FulcrumWithConnections {
            record: FulcrumRecord::new(self.fulcrum.clone(), self.deleted),
            connections: self.connections.iter().map(|(to, w)| (*to, *w)).collect(),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryStore {
    floors: IndexMap<u64, Floor>,
    fulcrums: IndexMap<u64, StoredFulcrum>,
    next_fulcrum_id: u64,
    pending_failures: HashMap<BackendOperation, usize>,
    failing_pairs: HashSet<(u64, u64)>,
    calls: Vec<BackendOperation>,
}

impl MemoryStore {
    fn enter(&mut self, op: BackendOperation) -> Result<(), BackendError> {
        self.calls.push(op);
        if let Some(remaining) = self.pending_failures.get_mut(&op) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(BackendError::Transport(format!("{op:?}: Verbindung getrennt")));
            }
        }
        Ok(())
    }

    fn fulcrum(&self, id: u64) -> Result<&StoredFulcrum, BackendError> {
        self.fulcrums
            .get(&id)
            .ok_or_else(|| BackendError::NotFound(format!("Fulcrum {id}")))
    }

    fn floor(&self, id: u64) -> Result<&Floor, BackendError> {
        self.floors
            .get(&id)
            .ok_or_else(|| BackendError::NotFound(format!("Floor {id}")))
    }

    fn check_pair(&self, from: u64, to: u64) -> Result<(), BackendError> {
        if self.failing_pairs.contains(&(from, to)) {
            return Err(BackendError::Transport(format!(
                "Verbindung {from} -> {to}: Zeitüberschreitung"
            )));
        }
        let left = self.fulcrum(from)?;
        let right = self.fulcrum(to)?;
        if left.area_id != right.area_id {
            return Err(BackendError::Rejected {
                status: 400,
                message: "Fulcrums must belong to the same mapping area".into(),
            });
        }
        Ok(())
    }

    fn validate_draft(&self, draft: &FulcrumDraft) -> Result<u64, BackendError> {
        if draft.name.trim().is_empty() {
            return Err(BackendError::Rejected {
                status: 400,
                message: "name: must not be blank".into(),
            });
        }
        if draft.has_qr && draft.facing_direction.is_none() {
            return Err(BackendError::Rejected {
                status: 400,
                message: "Facing direction is required when QR is enabled".into(),
            });
        }
        Ok(self.floor(draft.floor_id)?.mapping_area_id)
    }
}

/// Backend im Speicher; Klone teilen den Zustand.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    store: Rc<RefCell<MemoryStore>>,
}

impl InMemoryBackend {
    /// Erstellt ein leeres Backend.
    pub fn new() -> Self {
        let backend = Self::default();
        backend.store.borrow_mut().next_fulcrum_id = 1;
        backend
    }

    /// Legt ein Stockwerk an oder ersetzt es.
    pub fn insert_floor(&self, floor: Floor) {
        self.store.borrow_mut().floors.insert(floor.id, floor);
    }

    /// Legt einen Fulcrum direkt an (ohne Validierung). Der Bereich ergibt sich aus dem Stockwerk.
    pub fn insert_fulcrum(&self, fulcrum: Fulcrum) {
        let mut store = self.store.borrow_mut();
        let area_id = store
            .floors
            .get(&fulcrum.floor_id)
            .map(|f| f.mapping_area_id)
            .unwrap_or_default();
        store.next_fulcrum_id = store.next_fulcrum_id.max(fulcrum.id + 1);
        store.fulcrums.insert(
            fulcrum.id,
            StoredFulcrum {
                fulcrum,
                area_id,
                deleted: false,
                connections: IndexMap::new(),
            },
        );
    }

    /// Legt eine Verbindung direkt an (ersetzt bestehende).
    pub fn insert_connection(&self, from: u64, to: u64, weight: f64) {
        if let Some(stored) = self.store.borrow_mut().fulcrums.get_mut(&from) {
            stored.connections.insert(to, weight);
        }
    }

    /// Markiert einen Fulcrum als soft-gelöscht.
    pub fn mark_deleted(&self, id: u64) {
        if let Some(stored) = self.store.borrow_mut().fulcrums.get_mut(&id) {
            stored.deleted = true;
        }
    }

    /// Lässt die nächsten `count` Aufrufe von `op` mit einem Netzwerkfehler scheitern.
    pub fn fail_next(&self, op: BackendOperation, count: usize) {
        self.store.borrow_mut().pending_failures.insert(op, count);
    }

    /// Lässt jedes Hinzufügen/Entfernen von `from → to` scheitern.
    pub fn fail_pair(&self, from: u64, to: u64) {
        self.store.borrow_mut().failing_pairs.insert((from, to));
    }

    /// Gewicht der gespeicherten Verbindung `from → to`.
    pub fn connection(&self, from: u64, to: u64) -> Option<f64> {
        self.store
            .borrow()
            .fulcrums
            .get(&from)
            .and_then(|s| s.connections.get(&to).copied())
    }

    /// Gespeicherter Fulcrum samt Lösch-Flag.
    pub fn stored_fulcrum(&self, id: u64) -> Option<(Fulcrum, bool)> {
        self.store
            .borrow()
            .fulcrums
            .get(&id)
            .map(|s| (s.fulcrum.clone(), s.deleted))
    }

    /// Gespeichertes Stockwerk.
    pub fn stored_floor(&self, id: u64) -> Option<Floor> {
        self.store.borrow().floors.get(&id).cloned()
    }

    /// Protokoll aller bisherigen Aufrufe.
    pub fn calls(&self) -> Vec<BackendOperation> {
        self.store.borrow().calls.clone()
    }

    /// Leert das Aufrufprotokoll.
    pub fn clear_calls(&self) {
        self.store.borrow_mut().calls.clear();
    }
}

impl FloorPlanBackend for InMemoryBackend {
    fn floors_by_area(&mut self, area_id: u64) -> Result<Vec<Floor>, BackendError> {
        let mut store = self.store.borrow_mut();
        store.enter(BackendOperation::FloorsByArea)?;
        Ok(store
            .floors
            .values()
            .filter(|f| f.mapping_area_id == area_id)
            .cloned()
            .collect())
    }

    fn floor_by_id(&mut self, floor_id: u64) -> Result<Floor, BackendError> {
        let mut store = self.store.borrow_mut();
        store.enter(BackendOperation::FloorById)?;
        store.floor(floor_id).cloned()
    }

    fn update_floor(&mut self, floor_id: u64, update: &FloorUpdate) -> Result<Floor, BackendError> {
        let mut store = self.store.borrow_mut();
        store.enter(BackendOperation::UpdateFloor)?;
        let floor = store
            .floors
            .get_mut(&floor_id)
            .ok_or_else(|| BackendError::NotFound(format!("Floor {floor_id}")))?;
        floor.name = update.name.clone();
        floor.level = update.level;
        floor.description = update.description.clone();
        floor.svg_plan = update.svg_plan.clone();
        Ok(floor.clone())
    }

    fn fulcrums_by_floor(
        &mut self,
        floor_id: u64,
    ) -> Result<Vec<FulcrumWithConnections>, BackendError> {
        let mut store = self.store.borrow_mut();
        store.enter(BackendOperation::FulcrumsByFloor)?;
        Ok(store
            .fulcrums
            .values()
            .filter(|s| s.fulcrum.floor_id == floor_id)
            .map(StoredFulcrum::to_entry)
            .collect())
    }

    fn fulcrums_by_area(
        &mut self,
        area_id: u64,
    ) -> Result<Vec<FulcrumWithConnections>, BackendError> {
        let mut store = self.store.borrow_mut();
        store.enter(BackendOperation::FulcrumsByArea)?;
        Ok(store
            .fulcrums
            .values()
            .filter(|s| s.area_id == area_id)
            .map(StoredFulcrum::to_entry)
            .collect())
    }

    fn create_fulcrum(&mut self, draft: &FulcrumDraft) -> Result<Fulcrum, BackendError> {
        let mut store = self.store.borrow_mut();
        store.enter(BackendOperation::CreateFulcrum)?;
        let area_id = store.validate_draft(draft)?;
        let id = store.next_fulcrum_id.max(1);
        store.next_fulcrum_id = id + 1;
        let fulcrum = draft.clone().into_fulcrum(id);
        store.fulcrums.insert(
            id,
            StoredFulcrum {
                fulcrum: fulcrum.clone(),
                area_id,
                deleted: false,
                connections: IndexMap::new(),
            },
        );
        Ok(fulcrum)
    }

    fn update_fulcrum(&mut self, id: u64, draft: &FulcrumDraft) -> Result<Fulcrum, BackendError> {
        let mut store = self.store.borrow_mut();
        store.enter(BackendOperation::UpdateFulcrum)?;
        let area_id = store.validate_draft(draft)?;
        let stored = store
            .fulcrums
            .get_mut(&id)
            .ok_or_else(|| BackendError::NotFound(format!("Fulcrum {id}")))?;
        stored.fulcrum = draft.clone().into_fulcrum(id);
        stored.area_id = area_id;
        Ok(stored.fulcrum.clone())
    }

    fn delete_fulcrum(&mut self, id: u64) -> Result<(), BackendError> {
        let mut store = self.store.borrow_mut();
        store.enter(BackendOperation::DeleteFulcrum)?;
        let stored = store
            .fulcrums
            .get_mut(&id)
            .ok_or_else(|| BackendError::NotFound(format!("Fulcrum {id}")))?;
        stored.deleted = true;
        Ok(())
    }

    fn add_connection(&mut self, from: u64, draft: &ConnectionDraft) -> Result<(), BackendError> {
        let mut store = self.store.borrow_mut();
        store.enter(BackendOperation::AddConnection)?;
        let to = draft.connected_fulcrum_id;
        store.check_pair(from, to)?;
        let stored = store
            .fulcrums
            .get_mut(&from)
            .ok_or_else(|| BackendError::NotFound(format!("Fulcrum {from}")))?;
        if stored.connections.contains_key(&to) {
            return Err(BackendError::ConnectionAlreadyExists { from, to });
        }
        stored.connections.insert(to, draft.weight);
        Ok(())
    }

    fn remove_connection(&mut self, from: u64, to: u64) -> Result<(), BackendError> {
        let mut store = self.store.borrow_mut();
        store.enter(BackendOperation::RemoveConnection)?;
        store.check_pair(from, to)?;
        if let Some(stored) = store.fulcrums.get_mut(&from) {
            stored.connections.shift_remove(&to);
        }
        Ok(())
    }
}
