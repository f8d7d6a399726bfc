use std::cmp::Ordering;
use std::fmt;

/// Simulated time in minutes, totally ordered so it can key the event heap.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    ClientArrival {
        client_id: usize,
    },
    ServiceStart {
        client_id: usize,
        counter_id: usize,
        queued: bool,
    },
    ClientDeparture {
        client_id: usize,
        counter_id: usize,
    },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduledEvent {
    pub time: SimTime,
    pub event: Event,
}

impl ScheduledEvent {
    pub fn new(time: f64, event: Event) -> Self {
        Self {
            time: SimTime(time),
            event,
        }
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.event.priority().cmp(&other.event.priority()))
            .then_with(|| self.event.tiebreaker().cmp(&other.event.tiebreaker()))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Event {
    // Counters free up before waiting clients start, and both settle before
    // a new arrival looks at the queue.
    fn priority(&self) -> u8 {
        match self {
            Event::ClientDeparture { .. } => 0,
            Event::ServiceStart { .. } => 1,
            Event::ClientArrival { .. } => 2,
        }
    }

    fn tiebreaker(&self) -> usize {
        match self {
            Event::ClientDeparture { client_id, .. }
            | Event::ServiceStart { client_id, .. }
            | Event::ClientArrival { client_id } => *client_id,
        }
    }
}
