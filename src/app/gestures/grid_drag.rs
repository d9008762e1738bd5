//! Verschieben des Raster-Ursprungs über den Griff.
//!
//! Absolutes Tracking bis zur Bewegungsschwelle, danach optional
//! Pointer-Capture mit relativen Deltas. Geht der Capture verloren, läuft die
//! Geste absolut weiter und setzt beim nächsten Pointer-Punkt neu auf.

use glam::DVec2;

use super::pointer_host::{CaptureGuard, DocumentPointerGuard, SharedPointerHost};
use crate::core::GridSettings;

/// Griff-Zustand über einzelne Gesten hinweg (Doppelklick, Capture-Cooldown).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridHandleState {
    last_press_ms: Option<f64>,
    last_capture_loss_ms: Option<f64>,
}

/// Ergebnis eines Drucks auf den Griff.
#[derive(Debug)]
pub enum GridPress {
    /// Doppelklick: Offset wurde auf `(0, 0)` gesetzt, keine Geste
    Reset,
    /// Neue Geste
    Started(GridDrag),
}

impl GridHandleState {
    /// Verarbeitet einen Druck auf den Griff bei `pointer` (normalisiert).
    pub fn press(
        &mut self,
        grid: &mut GridSettings,
        pointer: DVec2,
        now_ms: f64,
        double_click_ms: f64,
        host: &SharedPointerHost,
    ) -> GridPress {
        if let Some(last) = self.last_press_ms {
            if now_ms - last < double_click_ms {
                self.last_press_ms = None;
                grid.reset_offset();
                log::debug!("Raster-Offset per Doppelklick zurückgesetzt");
                return GridPress::Reset;
            }
        }
        self.last_press_ms = Some(now_ms);
        GridPress::Started(GridDrag::begin(grid.offset(), pointer, host))
    }

    /// Merkt den Zeitpunkt eines Capture-Verlusts.
    pub fn record_capture_loss(&mut self, now_ms: f64) {
        self.last_capture_loss_ms = Some(now_ms);
    }

    /// Ob ein Capture wieder angefordert werden darf.
    pub fn may_request_capture(&self, now_ms: f64, cooldown_ms: f64) -> bool {
        self.last_capture_loss_ms
            .map_or(true, |lost| now_ms - lost > cooldown_ms)
    }
}

/// Laufende Griff-Geste.
#[derive(Debug)]
pub struct GridDrag {
    start_offset: DVec2,
    anchor: DVec2,
    moved: bool,
    rebase_pending: bool,
    capture: Option<CaptureGuard>,
    _subscription: DocumentPointerGuard,
}

impl GridDrag {
    fn begin(start_offset: DVec2, anchor: DVec2, host: &SharedPointerHost) -> Self {
        log::debug!("Raster-Drag gestartet");
        Self {
            start_offset,
            anchor,
            moved: false,
            rebase_pending: false,
            capture: None,
            _subscription: DocumentPointerGuard::subscribe(host),
        }
    }

    /// Ob die Geste im Capture-Modus läuft.
    pub fn is_captured(&self) -> bool {
        self.capture.is_some()
    }

    /// Ob die Bewegungsschwelle bereits überschritten wurde.
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Absolute Bewegung zu `pointer` (normalisiert).
    ///
    /// Liefert den neuen Offset, wenn er sich geändert hat. Beim ersten
    /// Überschreiten der Schwelle wird Capture angefordert, sofern der
    /// Cooldown seit dem letzten Verlust abgelaufen ist.
    #[allow(clippy::too_many_arguments)]
    pub fn move_absolute(
        &mut self,
        grid: &mut GridSettings,
        pointer: DVec2,
        threshold: f64,
        handle: &GridHandleState,
        now_ms: f64,
        cooldown_ms: f64,
        host: &SharedPointerHost,
    ) -> Option<DVec2> {
        if self.capture.is_some() {
            return None;
        }
        if self.rebase_pending {
            self.rebase_pending = false;
            self.anchor = pointer;
            self.start_offset = grid.offset();
            return None;
        }

        let delta = pointer - self.anchor;
        if !self.moved {
            if delta.length() < threshold {
                return None;
            }
            self.moved = true;
            if handle.may_request_capture(now_ms, cooldown_ms) {
                self.capture = CaptureGuard::acquire(host);
                if self.capture.is_some() {
                    log::debug!("Raster-Drag im Capture-Modus");
                }
            }
        }
        Some(grid.set_offset(self.start_offset + delta))
    }

    /// Relative Bewegung im Capture-Modus (`movement` in Pixeln).
    pub fn move_relative(
        &mut self,
        grid: &mut GridSettings,
        movement: DVec2,
        image_size: DVec2,
        scale: f64,
    ) -> Option<DVec2> {
        if self.capture.is_none() {
            return None;
        }
        let extent = image_size * scale;
        if extent.x <= 0.0 || extent.y <= 0.0 || !extent.is_finite() {
            return None;
        }
        Some(grid.set_offset(grid.offset() + movement / extent))
    }

    /// Der Host hat den Capture entzogen.
    pub fn capture_lost(&mut self, handle: &mut GridHandleState, now_ms: f64) {
        handle.record_capture_loss(now_ms);
        if self.capture.take().is_some() {
            self.rebase_pending = true;
            log::debug!("Capture verloren, Raster-Drag läuft absolut weiter");
        }
    }

    /// Beendet die Geste; Capture und Abonnement enden mit `self`.
    pub fn end(self) {
        log::debug!("Raster-Drag beendet (bewegt: {})", self.moved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gestures::pointer_host::RecordingPointerHost;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    const THRESHOLD: f64 = 0.004;
    const COOLDOWN: f64 = 200.0;

    fn host(capture: bool) -> (Rc<RefCell<RecordingPointerHost>>, SharedPointerHost) {
        let concrete = Rc::new(RefCell::new(RecordingPointerHost::new(capture)));
        let shared: SharedPointerHost = concrete.clone();
        (concrete, shared)
    }

    fn start(
        handle: &mut GridHandleState,
        grid: &mut GridSettings,
        pointer: DVec2,
        now: f64,
        host: &SharedPointerHost,
    ) -> GridDrag {
        match handle.press(grid, pointer, now, 280.0, host) {
            GridPress::Started(drag) => drag,
            GridPress::Reset => panic!("Unerwarteter Doppelklick"),
        }
    }

    #[test]
    fn test_small_motion_below_threshold_is_ignored() {
        let (_, shared) = host(false);
        let mut handle = GridHandleState::default();
        let mut grid = GridSettings::new();
        let mut drag = start(&mut handle, &mut grid, DVec2::new(0.5, 0.5), 0.0, &shared);

        let changed = drag.move_absolute(
            &mut grid,
            DVec2::new(0.502, 0.501),
            THRESHOLD,
            &handle,
            10.0,
            COOLDOWN,
            &shared,
        );
        assert!(changed.is_none());
        assert!(!drag.has_moved());
        assert_eq!(grid.offset(), DVec2::ZERO);
    }

    #[test]
    fn test_absolute_motion_wraps_offset() {
        let (_, shared) = host(false);
        let mut handle = GridHandleState::default();
        let mut grid = GridSettings::new();
        let mut drag = start(&mut handle, &mut grid, DVec2::new(0.5, 0.5), 0.0, &shared);

        let offset = drag
            .move_absolute(
                &mut grid,
                DVec2::new(0.55, 0.49),
                THRESHOLD,
                &handle,
                10.0,
                COOLDOWN,
                &shared,
            )
            .expect("Offset sollte sich ändern");
        assert_relative_eq!(offset.x, 0.01, epsilon = 1e-9);
        assert_relative_eq!(offset.y, 0.03, epsilon = 1e-9);
        assert!(!drag.is_captured());
    }

    #[test]
    fn test_double_press_resets_offset() {
        let (_, shared) = host(false);
        let mut handle = GridHandleState::default();
        let mut grid = GridSettings::new();
        grid.set_offset(DVec2::new(0.01, 0.02));

        let drag = start(&mut handle, &mut grid, DVec2::new(0.5, 0.5), 1000.0, &shared);
        drag.end();
        let second = handle.press(&mut grid, DVec2::new(0.5, 0.5), 1200.0, 280.0, &shared);
        assert!(matches!(second, GridPress::Reset));
        assert_eq!(grid.offset(), DVec2::ZERO);

        let third = handle.press(&mut grid, DVec2::new(0.5, 0.5), 1300.0, 280.0, &shared);
        assert!(matches!(third, GridPress::Started(_)));
    }

    #[test]
    fn test_capture_mode_uses_relative_movement() {
        let (concrete, shared) = host(true);
        let mut handle = GridHandleState::default();
        let mut grid = GridSettings::new();
        let mut drag = start(&mut handle, &mut grid, DVec2::new(0.5, 0.5), 0.0, &shared);

        drag.move_absolute(
            &mut grid,
            DVec2::new(0.51, 0.5),
            THRESHOLD,
            &handle,
            10.0,
            COOLDOWN,
            &shared,
        );
        assert!(drag.is_captured());
        assert!(concrete.borrow().captured);

        let before = grid.offset();
        let offset = drag
            .move_relative(&mut grid, DVec2::new(8.0, 0.0), DVec2::new(400.0, 300.0), 2.0)
            .expect("Relative Bewegung sollte greifen");
        assert_relative_eq!(offset.x, before.x + 0.01, epsilon = 1e-9);

        drag.end();
        assert!(!concrete.borrow().captured);
        assert_eq!(concrete.borrow().active_subscriptions, 0);
    }

    #[test]
    fn test_capture_loss_rebases_and_respects_cooldown() {
        let (concrete, shared) = host(true);
        let mut handle = GridHandleState::default();
        let mut grid = GridSettings::new();
        let mut drag = start(&mut handle, &mut grid, DVec2::new(0.5, 0.5), 0.0, &shared);
        drag.move_absolute(
            &mut grid,
            DVec2::new(0.51, 0.5),
            THRESHOLD,
            &handle,
            10.0,
            COOLDOWN,
            &shared,
        );
        let kept = grid.offset();

        concrete.borrow_mut().revoke_capture();
        drag.capture_lost(&mut handle, 50.0);
        assert!(!drag.is_captured());
        assert!(drag
            .move_relative(&mut grid, DVec2::new(5.0, 5.0), DVec2::ONE, 1.0)
            .is_none());

        // Erster absoluter Punkt setzt nur neu auf.
        let rebased = drag.move_absolute(
            &mut grid,
            DVec2::new(0.9, 0.9),
            THRESHOLD,
            &handle,
            60.0,
            COOLDOWN,
            &shared,
        );
        assert!(rebased.is_none());
        assert_eq!(grid.offset(), kept);

        let offset = drag
            .move_absolute(
                &mut grid,
                DVec2::new(0.905, 0.9),
                THRESHOLD,
                &handle,
                70.0,
                COOLDOWN,
                &shared,
            )
            .expect("Offset sollte sich ändern");
        assert_relative_eq!(offset.x, kept.x + 0.005, epsilon = 1e-9);

        assert!(!handle.may_request_capture(200.0, COOLDOWN));
        assert!(handle.may_request_capture(260.0, COOLDOWN));
    }
}
