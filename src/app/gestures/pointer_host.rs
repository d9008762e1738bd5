//! Schnittstelle zum Host für dokumentweite Pointer-Events und Pointer-Capture.
//!
//! Beide Ressourcen werden über Guards gehalten, die im `Drop` freigeben. So
//! endet jede Subscription bzw. jeder Capture auf allen Ausstiegspfaden einer
//! Geste (Loslassen, Abbruch, Fehler, Verwerfen des States).

use std::cell::RefCell;
use std::rc::Rc;

/// Vom Host bereitgestellte Pointer-Fähigkeiten.
pub trait PointerHost {
    /// Abonniert Pointer-Move/Up auf Dokumentebene.
    fn subscribe_document_pointer(&mut self);
    /// Beendet das Dokument-Abonnement.
    fn unsubscribe_document_pointer(&mut self);
    /// Fordert exklusiven Pointer-Capture an; `false`, wenn nicht verfügbar oder verweigert.
    fn request_pointer_capture(&mut self) -> bool;
    /// Gibt einen gehaltenen Capture frei.
    fn release_pointer_capture(&mut self);
}

/// Geteilter Zugriff auf den Pointer-Host.
pub type SharedPointerHost = Rc<RefCell<dyn PointerHost>>;

/// Host ohne Dokument-Events und ohne Capture.
#[derive(Debug, Default)]
pub struct NoopPointerHost;

impl PointerHost for NoopPointerHost {
    fn subscribe_document_pointer(&mut self) {}
    fn unsubscribe_document_pointer(&mut self) {}
    fn request_pointer_capture(&mut self) -> bool {
        false
    }
    fn release_pointer_capture(&mut self) {}
}

/// Protokollierender Host, z. B. für Tests und Headless-Sessions.
#[derive(Debug, Default)]
pub struct RecordingPointerHost {
    /// Ob Capture-Anfragen gewährt werden
    pub capture_supported: bool,
    /// Aktuell aktive Dokument-Abonnements
    pub active_subscriptions: usize,
    /// Ob gerade ein Capture gehalten wird
    pub captured: bool,
    /// Anzahl Capture-Anfragen
    pub capture_requests: usize,
}

impl RecordingPointerHost {
    /// Host mit oder ohne Capture-Unterstützung.
    pub fn new(capture_supported: bool) -> Self {
        Self {
            capture_supported,
            ..Self::default()
        }
    }

    /// Simuliert, dass der Host den Capture von sich aus entzieht.
    pub fn revoke_capture(&mut self) {
        self.captured = false;
    }
}

impl PointerHost for RecordingPointerHost {
    fn subscribe_document_pointer(&mut self) {
        self.active_subscriptions += 1;
    }

    fn unsubscribe_document_pointer(&mut self) {
        self.active_subscriptions = self.active_subscriptions.saturating_sub(1);
    }

    fn request_pointer_capture(&mut self) -> bool {
        self.capture_requests += 1;
        self.captured = self.capture_supported;
        self.captured
    }

    fn release_pointer_capture(&mut self) {
        self.captured = false;
    }
}

/// Hält ein Dokument-Abonnement für die Dauer einer Geste.
pub struct DocumentPointerGuard {
    host: SharedPointerHost,
}

impl DocumentPointerGuard {
    /// Abonniert sofort; Freigabe beim Drop.
    pub fn subscribe(host: &SharedPointerHost) -> Self {
        match host.try_borrow_mut() {
            Ok(mut h) => h.subscribe_document_pointer(),
            Err(_) => log::warn!("Pointer-Host belegt, Dokument-Abonnement übersprungen"),
        }
        Self {
            host: Rc::clone(host),
        }
    }
}

impl Drop for DocumentPointerGuard {
    fn drop(&mut self) {
        match self.host.try_borrow_mut() {
            Ok(mut h) => h.unsubscribe_document_pointer(),
            Err(_) => log::warn!("Pointer-Host belegt, Dokument-Abonnement nicht beendet"),
        }
    }
}

/// Hält einen gewährten Pointer-Capture.
pub struct CaptureGuard {
    host: SharedPointerHost,
}

impl CaptureGuard {
    /// Fordert Capture an; `None`, wenn der Host ihn nicht gewährt.
    pub fn acquire(host: &SharedPointerHost) -> Option<Self> {
        let granted = host
            .try_borrow_mut()
            .map(|mut h| h.request_pointer_capture())
            .unwrap_or(false);
        granted.then(|| Self {
            host: Rc::clone(host),
        })
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if let Ok(mut h) = self.host.try_borrow_mut() {
            h.release_pointer_capture();
        }
    }
}

impl std::fmt::Debug for DocumentPointerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DocumentPointerGuard")
    }
}

impl std::fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CaptureGuard")
    }
}
