/// Ticket handed out for one request; compared on arrival
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Monotonic request counter. Only the response of the most recently
/// issued request is allowed to land.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    pub fn advance(&mut self) -> Generation {
        self.current = self.current.wrapping_add(1);
        Generation(self.current)
    }

    pub fn is_current(&self, ticket: Generation) -> bool {
        ticket.0 == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_ticket_rejected() {
        let mut counter = GenerationCounter::default();
        let first = counter.advance();
        assert!(counter.is_current(first));
        let second = counter.advance();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }
}
