//! Generationszähler für Ladevorgänge; veraltete Antworten werden verworfen.

/// Was geladen wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadTarget {
    Floor(u64),
    Area(u64),
}

/// Marke einer Ladeanforderung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub target: LoadTarget,
    pub generation: u64,
}

/// Vergibt Tickets und kennt das jeweils aktuelle pro Art.
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    generation: u64,
    floor: Option<LoadTicket>,
    area: Option<LoadTicket>,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Beginnt einen Ladevorgang; ein älterer derselben Art wird damit veraltet.
    pub fn begin(&mut self, target: LoadTarget) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket {
            target,
            generation: self.generation,
        };
        match target {
            LoadTarget::Floor(_) => self.floor = Some(ticket),
            LoadTarget::Area(_) => self.area = Some(ticket),
        }
        ticket
    }

    /// `true`, wenn `ticket` noch das neueste seiner Art ist.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        let slot = match ticket.target {
            LoadTarget::Floor(_) => self.floor,
            LoadTarget::Area(_) => self.area,
        };
        slot.as_ref() == Some(ticket)
    }

    /// Schließt einen Ladevorgang ab.
    pub fn finish(&mut self, ticket: &LoadTicket) {
        if !self.is_current(ticket) {
            return;
        }
        match ticket.target {
            LoadTarget::Floor(_) => self.floor = None,
            LoadTarget::Area(_) => self.area = None,
        }
    }

    /// Ob gerade ein Stockwerk geladen wird.
    pub fn floor_pending(&self) -> bool {
        self.floor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let mut tracker = LoadTracker::new();
        let first = tracker.begin(LoadTarget::Floor(1));
        let second = tracker.begin(LoadTarget::Floor(2));
        let area = tracker.begin(LoadTarget::Area(7));

        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
        assert!(tracker.is_current(&area));

        tracker.finish(&second);
        assert!(!tracker.is_current(&second));
        assert!(!tracker.floor_pending());
    }
}
