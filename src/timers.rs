//! Timer scheduler on the simulation clock
//!
//! Intervals and one-shot delays are measured in simulated milliseconds, so
//! they stay in lockstep with the fixed-timestep tick loop and can be tested
//! without a browser. Every timer handle stays owned here; `cancel_all`
//! leaves nothing pending.

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// One second of the round timer
    Countdown,
    /// End of the "FINAL BOSS!" announcement
    BossIntro,
    /// Boss fires at the ship
    BossShot,
}

/// Handle returned by `set_interval` / `set_timeout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    due_ms: f64,
    /// `Some` for repeating timers
    period_ms: Option<f64>,
}

/// Pending timers, fired in due order by [`Timers::advance_to`]
#[derive(Debug, Clone, Default)]
pub struct Timers {
    pending: Vec<Timer>,
    next_id: u32,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `kind` every `period_ms`, first at `now_ms + period_ms`
    pub fn set_interval(&mut self, kind: TimerKind, now_ms: f64, period_ms: f64) -> TimerId {
        self.schedule(kind, now_ms + period_ms, Some(period_ms))
    }

    /// Fire `kind` once at `now_ms + delay_ms`
    pub fn set_timeout(&mut self, kind: TimerKind, now_ms: f64, delay_ms: f64) -> TimerId {
        self.schedule(kind, now_ms + delay_ms, None)
    }

    fn schedule(&mut self, kind: TimerKind, due_ms: f64, period_ms: Option<f64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // A zero period would fire forever within one advance
        let period_ms = period_ms.map(|p| p.max(1.0));
        self.pending.push(Timer {
            id,
            kind,
            due_ms,
            period_ms,
        });
        log::debug!("Timer {:?} {:?} due at {:.0}ms", id, kind, due_ms);
        id
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    /// Cancel every pending timer
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Cancelling {} timers", self.pending.len());
        }
        self.pending.clear();
    }

    /// Whether a timer of this kind is pending
    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|t| t.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Collect every firing due at or before `now_ms`, earliest first.
    ///
    /// Intervals that fall due several times are reported once per period.
    /// Ties keep scheduling order.
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<TimerKind> {
        let mut fired: Vec<(f64, TimerId, TimerKind)> = Vec::new();

        self.pending.retain_mut(|timer| {
            while timer.due_ms <= now_ms {
                fired.push((timer.due_ms, timer.id, timer.kind));
                match timer.period_ms {
                    Some(period) => timer.due_ms += period,
                    None => return false,
                }
            }
            true
        });

        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.0.cmp(&b.1.0)));
        fired.into_iter().map(|(_, _, kind)| kind).collect()
    }
}
