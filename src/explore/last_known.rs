// src/explore/last_known.rs

/// Sequence number handed out per query so late responses can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Holds the most recent successful result so views can keep showing it
/// while a refetch is outstanding.
#[derive(Debug, Clone)]
pub struct LastKnown<T> {
    held: Option<T>,
    next_ticket: u64,
    applied: Option<Ticket>,
}

impl<T> Default for LastKnown<T> {
    fn default() -> Self {
        Self {
            held: None,
            next_ticket: 0,
            applied: None,
        }
    }
}

impl<T> LastKnown<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `current` when defined, otherwise return what is held.
    pub fn update(&mut self, current: Option<T>) -> Option<&T> {
        if let Some(value) = current {
            self.held = Some(value);
        }
        self.held.as_ref()
    }

    pub fn get(&self) -> Option<&T> {
        self.held.as_ref()
    }

    pub fn issue(&mut self) -> Ticket {
        let t = Ticket(self.next_ticket);
        self.next_ticket += 1;
        t
    }

    /// True if a newer ticket has already been applied.
    pub fn is_stale(&self, ticket: Ticket) -> bool {
        self.applied.is_some_and(|applied| ticket < applied)
    }

    /// Like `update`, but a result whose ticket is older than one already
    /// applied is ignored.
    pub fn resolve(&mut self, ticket: Ticket, current: Option<T>) -> Option<&T> {
        if self.is_stale(ticket) {
            tracing::debug!(?ticket, "dropping stale query result");
            return self.held.as_ref();
        }
        if current.is_some() {
            self.applied = Some(ticket);
            // Tickets issued from here on must sort after this one.
            self.next_ticket = self.next_ticket.max(ticket.0 + 1);
        }
        self.update(current)
    }
}
