//! Zustand der beiden Editor-Modals und deren Reducer.
//!
//! Fulcrum- und Verbindungs-Modal sind unabhängig. Schließen setzt ein Modal
//! vollständig auf den Ausgangszustand zurück.

use glam::DVec2;

use super::forms::{ConnectionForm, FulcrumForm, ValidationErrors};
use super::state::LoadTicket;
use crate::core::{Fulcrum, InterfloorRow};

/// Anlegen oder Bearbeiten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalMode {
    #[default]
    Create,
    Edit,
}

/// Zustand des Fulcrum-Modals.
#[derive(Debug, Clone, Default)]
pub struct FulcrumModalState {
    pub visible: bool,
    pub mode: ModalMode,
    /// Bearbeiteter Fulcrum (nur im Edit-Modus)
    pub fulcrum_id: Option<u64>,
    /// Zielposition (nur im Create-Modus)
    pub position: Option<DVec2>,
    pub form: FulcrumForm,
    pub errors: ValidationErrors,
    /// Laufende Ladeanforderung für das Stockwerk-Panel
    pub interfloor_ticket: Option<LoadTicket>,
}

/// Zustand des Verbindungs-Modals.
#[derive(Debug, Clone, Default)]
pub struct ConnectionModalState {
    pub visible: bool,
    pub mode: ModalMode,
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub form: ConnectionForm,
    pub errors: ValidationErrors,
}

impl ConnectionModalState {
    /// `(from, to)` des Modals, falls gesetzt.
    pub fn endpoints(&self) -> Option<(u64, u64)> {
        self.from.zip(self.to)
    }
}

/// Zustandsübergänge der Modals.
#[derive(Debug, Clone)]
pub enum ModalAction {
    OpenFulcrumCreate { floor_id: u64, position: DVec2 },
    OpenFulcrumEdit { fulcrum: Fulcrum },
    SetInterfloorTicket(LoadTicket),
    SetInterfloorRows(Vec<InterfloorRow>),
    UpdateInterfloorRow(InterfloorRow),
    SetFulcrumForm(FulcrumForm),
    SetFulcrumErrors(ValidationErrors),
    CloseFulcrum,
    OpenConnectionCreate { from: u64, to: u64 },
    OpenConnectionEdit {
        from: u64,
        to: u64,
        weight: f64,
        bidirectional: bool,
    },
    SetConnectionForm(ConnectionForm),
    SetConnectionErrors(ValidationErrors),
    CloseConnection,
}

/// Beide Modals des Editors.
#[derive(Debug, Clone, Default)]
pub struct EditorModals {
    pub fulcrum: FulcrumModalState,
    pub connection: ConnectionModalState,
}

impl EditorModals {
    /// Ob irgendein Modal sichtbar ist; Canvas-Gesten sind dann gesperrt.
    pub fn any_visible(&self) -> bool {
        self.fulcrum.visible || self.connection.visible
    }

    /// Wendet einen Übergang an.
    pub fn apply(&mut self, action: ModalAction) {
        match action {
            ModalAction::OpenFulcrumCreate { floor_id, position } => {
                self.fulcrum = FulcrumModalState {
                    visible: true,
                    mode: ModalMode::Create,
                    fulcrum_id: None,
                    position: Some(position),
                    form: FulcrumForm::for_create(floor_id, position),
                    ..FulcrumModalState::default()
                };
            }
            ModalAction::OpenFulcrumEdit { fulcrum } => {
                self.fulcrum = FulcrumModalState {
                    visible: true,
                    mode: ModalMode::Edit,
                    fulcrum_id: Some(fulcrum.id),
                    position: None,
                    form: FulcrumForm::for_edit(&fulcrum),
                    ..FulcrumModalState::default()
                };
            }
            ModalAction::SetInterfloorTicket(ticket) => {
                self.fulcrum.interfloor_ticket = Some(ticket);
            }
            ModalAction::SetInterfloorRows(rows) => {
                self.fulcrum.form.interfloor = rows;
                self.fulcrum.interfloor_ticket = None;
            }
            ModalAction::UpdateInterfloorRow(row) => {
                if let Some(existing) = self
                    .fulcrum
                    .form
                    .interfloor
                    .iter_mut()
                    .find(|r| r.fulcrum_id == row.fulcrum_id)
                {
                    *existing = row;
                }
            }
            ModalAction::SetFulcrumForm(form) => {
                self.fulcrum.form = form;
            }
            ModalAction::SetFulcrumErrors(errors) => {
                self.fulcrum.errors = errors;
            }
            ModalAction::CloseFulcrum => {
                self.fulcrum = FulcrumModalState::default();
            }
            ModalAction::OpenConnectionCreate { from, to } => {
                self.connection = ConnectionModalState {
                    visible: true,
                    mode: ModalMode::Create,
                    from: Some(from),
                    to: Some(to),
                    form: ConnectionForm::default(),
                    errors: ValidationErrors::new(),
                };
            }
            ModalAction::OpenConnectionEdit {
                from,
                to,
                weight,
                bidirectional,
            } => {
                self.connection = ConnectionModalState {
                    visible: true,
                    mode: ModalMode::Edit,
                    from: Some(from),
                    to: Some(to),
                    form: ConnectionForm::new(weight, bidirectional),
                    errors: ValidationErrors::new(),
                };
            }
            ModalAction::SetConnectionForm(form) => {
                self.connection.form = form;
            }
            ModalAction::SetConnectionErrors(errors) => {
                self.connection.errors = errors;
            }
            ModalAction::CloseConnection => {
                self.connection = ConnectionModalState::default();
            }
        }
    }
}
