/// Verzögert einen Wert, bis seit der letzten Änderung `delay_ms` vergangen sind.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay_ms: f64,
    pending: Option<(T, f64)>,
}

impl<T> Debounce<T> {
    /// Neuer Debouncer mit Wartezeit in Millisekunden.
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            pending: None,
        }
    }

    /// Ersetzt den wartenden Wert und startet die Frist neu.
    pub fn schedule(&mut self, value: T, now_ms: f64) {
        self.pending = Some((value, now_ms + self.delay_ms));
    }

    /// Liefert den Wert, sobald die Frist abgelaufen ist.
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        match self.pending.as_ref() {
            Some((_, due)) if now_ms >= *due => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn set_delay(&mut self, delay_ms: f64) {
        self.delay_ms = delay_ms.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_released_after_quiet_period() {
        let mut debounce = Debounce::new(100.0);
        debounce.schedule(1, 0.0);
        debounce.schedule(2, 50.0);

        assert_eq!(debounce.poll(120.0), None);
        assert_eq!(debounce.poll(150.0), Some(2));
        assert!(!debounce.is_pending());
        assert_eq!(debounce.poll(400.0), None);
    }
}
