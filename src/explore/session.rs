// src/explore/session.rs
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::domain::Listing;
use crate::errors::ServerError;
use crate::explore::debounce::Debouncer;
use crate::explore::last_known::{LastKnown, Ticket};

/// In-memory half of one browser's explore state: the debounced bounds and
/// the last listings that came back for them.
#[derive(Debug)]
pub struct ExploreSession {
    bounds: Debouncer<String>,
    houses: LastKnown<Vec<Listing>>,
    /// Settled bounds the cached houses were fetched for.
    fetched_for: Option<String>,
}

/// What the listings panel should do for this request.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelPlan {
    /// Bounds still moving: show `cached`, ask again after `retry_in`.
    Pending {
        cached: Option<Vec<Listing>>,
        retry_in: Duration,
    },
    /// Cached houses already match the settled bounds.
    Fresh { houses: Vec<Listing> },
    /// Settled bounds need a query; report the result with `ticket`.
    Fetch {
        bounds: String,
        ticket: Ticket,
        cached: Option<Vec<Listing>>,
    },
}

impl ExploreSession {
    pub fn new(initial_bounds: String, delay: Duration) -> Self {
        Self {
            bounds: Debouncer::new(initial_bounds, delay),
            houses: LastKnown::new(),
            fetched_for: None,
        }
    }

    pub fn record_bounds(&mut self, raw: String, now: Instant) {
        self.bounds.push(raw, now);
    }

    pub fn plan(&mut self, now: Instant) -> PanelPlan {
        let settled = self.bounds.poll(now).clone();
        let cached = self.houses.get().cloned();

        if let Some(retry_in) = self.bounds.remaining(now) {
            return PanelPlan::Pending { cached, retry_in };
        }

        match (&self.fetched_for, cached) {
            (Some(fetched), Some(houses)) if *fetched == settled => PanelPlan::Fresh { houses },
            (_, cached) => PanelPlan::Fetch {
                bounds: settled,
                ticket: self.houses.issue(),
                cached,
            },
        }
    }

    /// Merge a query result; `None` (failed or still loading) keeps the
    /// last-known houses.
    pub fn apply(&mut self, ticket: Ticket, bounds: &str, data: Option<Vec<Listing>>) -> Vec<Listing> {
        if data.is_some() && !self.houses.is_stale(ticket) {
            self.fetched_for = Some(bounds.to_string());
        }
        self.houses.resolve(ticket, data).cloned().unwrap_or_default()
    }

    pub fn cached(&self) -> Option<&Vec<Listing>> {
        self.houses.get()
    }

    pub fn latest_bounds(&self) -> &str {
        self.bounds.latest()
    }

    /// Force the next settled plan to query again.
    pub fn invalidate(&mut self) {
        self.fetched_for = None;
    }
}

/// All explore sessions of this process, keyed by view session id.
///
/// Sessions untouched for `idle` are dropped; the next request for one
/// rebuilds it from the persisted bounds.
pub struct ExploreSessions {
    delay: Duration,
    idle: Duration,
    inner: Mutex<Registry>,
}

struct Registry {
    sessions: HashMap<String, (ExploreSession, Instant)>,
    last_sweep: Option<Instant>,
}

impl Registry {
    fn sweep(&mut self, now: Instant, idle: Duration) {
        let due = match self.last_sweep {
            Some(at) => now.saturating_duration_since(at) >= idle,
            None => true,
        };
        if !due {
            return;
        }
        let before = self.sessions.len();
        self.sessions
            .retain(|_, (_, seen)| now.saturating_duration_since(*seen) < idle);
        self.last_sweep = Some(now);

        let evicted = before - self.sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.sessions.len(), "idle explore sessions dropped");
        }
    }
}

impl ExploreSessions {
    pub fn new(delay: Duration, idle: Duration) -> Self {
        Self {
            delay,
            idle,
            inner: Mutex::new(Registry {
                sessions: HashMap::new(),
                last_sweep: None,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Registry>, ServerError> {
        self.inner.lock().map_err(|_| ServerError::InternalError)
    }

    /// Run `f` on the session for `id`, creating it from `initial_bounds`
    /// (the persisted bounds) on first use. Keep `f` short: the lock is
    /// shared by every request.
    pub fn with_session<T, I, F>(
        &self,
        id: &str,
        now: Instant,
        initial_bounds: I,
        f: F,
    ) -> Result<T, ServerError>
    where
        I: FnOnce() -> Result<String, ServerError>,
        F: FnOnce(&mut ExploreSession) -> T,
    {
        let mut registry = self.lock()?;
        registry.sweep(now, self.idle);

        if !registry.sessions.contains_key(id) {
            let initial = initial_bounds()?;
            let session = ExploreSession::new(initial, self.delay);
            registry.sessions.insert(id.to_string(), (session, now));
        }
        match registry.sessions.get_mut(id) {
            Some((session, seen)) => {
                *seen = now;
                Ok(f(session))
            }
            None => Err(ServerError::InternalError),
        }
    }

    /// Like `with_session`, but never creates one.
    pub fn with_existing<T, F>(&self, id: &str, f: F) -> Result<Option<T>, ServerError>
    where
        F: FnOnce(&ExploreSession) -> T,
    {
        let registry = self.lock()?;
        Ok(registry.sessions.get(id).map(|(session, _)| f(session)))
    }

    pub fn invalidate_all(&self) -> Result<(), ServerError> {
        let mut registry = self.lock()?;
        for (session, _) in registry.sessions.values_mut() {
            session.invalidate();
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn session_count(&self) -> Result<usize, ServerError> {
        Ok(self.lock()?.sessions.len())
    }
}
