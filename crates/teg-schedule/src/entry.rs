//! Pending-event entry and its ordering key.

use std::cmp::Ordering;
use std::fmt;

use teg_core::{SimTime, VariableValue, VertexId};

// ── EventKey ──────────────────────────────────────────────────────────────────

/// The dispatch-ordering key: time ascending, then priority ascending.
///
/// Priority uses `total_cmp` for the same reason `SimTime` does — the event
/// list must stay totally ordered even if a model computes a NaN priority.
#[derive(Copy, Clone, Debug)]
pub struct EventKey {
    pub time:     SimTime,
    pub priority: f64,
}

impl PartialEq for EventKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EventKey {}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.priority.total_cmp(&other.priority))
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, p={})", self.time, self.priority)
    }
}

// ── ScheduleEntry ─────────────────────────────────────────────────────────────

/// One pending event: when to fire, with what urgency, which vertex, and the
/// parameter snapshot evaluated at scheduling time.
///
/// Exclusively owned by the [`FutureEventList`](crate::FutureEventList)
/// between creation and dispatch or cancellation.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleEntry {
    pub time:     SimTime,
    pub priority: f64,
    pub vertex:   VertexId,
    /// Evaluated parameter values, bound to the target vertex's declared
    /// parameter names at dispatch.
    pub params:   Vec<VariableValue>,
}

impl ScheduleEntry {
    pub fn new(time: SimTime, priority: f64, vertex: VertexId, params: Vec<VariableValue>) -> Self {
        Self {
            time,
            priority,
            vertex,
            params,
        }
    }

    #[inline]
    pub fn key(&self) -> EventKey {
        EventKey {
            time:     self.time,
            priority: self.priority,
        }
    }

    /// Does this entry match a cancellation request?
    ///
    /// `filter = None` matches any entry for `vertex`; `Some(values)` also
    /// requires the stored parameter snapshot to equal `values` by value.
    pub fn matches(&self, vertex: VertexId, filter: Option<&[VariableValue]>) -> bool {
        self.vertex == vertex && filter.is_none_or(|values| self.params == values)
    }
}
