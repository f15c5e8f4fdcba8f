//! The `PortSim` struct, its event loop and the seven event handlers.

use port_core::{PortConfig, SimTime, TankerId, VariateSource};
use port_events::{Event, EventKind, EventQueue};
use port_fleet::{Phase, Progress, Tanker, TankerStore};
use tracing::{debug, info, warn};

use crate::dispatch::{self, Side};
use crate::{PortObserver, PortState, PortStats, PortView, SimError, SimResult};

// ── PortSim ───────────────────────────────────────────────────────────────────

/// The discrete-event port simulator.
///
/// `PortSim<V>` owns the port state, the event queue and the tanker fleet,
/// and drives the loop:
///
/// 1. **Select**: take the earliest pending event (ties by kind priority).
/// 2. **Stop** if it fires at or after the horizon.
/// 3. **Account**: charge the state that held since the previous event to
///    the time-weighted statistics, then advance the clock.
/// 4. **Dispatch** to the handler for the event's kind, which mutates the
///    state and schedules follow-on events.
/// 5. **Check** for a blocked situation (and, when auditing, every
///    invariant), then notify the observer.
///
/// Create via [`PortSimBuilder`][crate::PortSimBuilder].
pub struct PortSim<V: VariateSource> {
    /// Run configuration.  Never mutated after construction.
    pub config: PortConfig,

    pub state: PortState,

    /// Pending events, one lane per kind.
    pub queue: EventQueue,

    /// Every tanker generated and not yet departed.
    pub fleet: TankerStore,

    pub stats: PortStats,

    /// Source of inter-arrival, travel and unloading durations.
    pub variates: V,

    /// Run the full invariant audit after every event.
    pub(crate) audit: bool,

    pub(crate) was_blocked: bool,
    pub(crate) finished:    bool,
}

impl<V: VariateSource> PortSim<V> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the next event would fire at or after `config.horizon`,
    /// then finalise statistics at the horizon.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: PortObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            wharves = self.config.max_wharves,
            tugs = self.config.max_tugs,
            horizon = self.config.horizon.minutes(),
            policy = %self.config.policy,
            "simulation starting"
        );
        while self.step(observer)? {}
        self.finish(observer);
        info!(
            events = self.stats.events_processed,
            generated = self.stats.generated,
            done = self.stats.done,
            blocked = self.stats.blocked_events,
            "simulation done"
        );
        Ok(())
    }

    /// Process at most `n` events.  Does not finalise statistics.
    ///
    /// Useful for tests and incremental stepping.  Returns the number of
    /// events actually processed (fewer than `n` once the horizon is hit).
    pub fn run_events<O: PortObserver>(&mut self, n: usize, observer: &mut O) -> SimResult<usize> {
        let mut processed = 0;
        while processed < n && self.step(observer)? {
            processed += 1;
        }
        Ok(processed)
    }

    /// Process the next event.  Returns `false` without doing anything once
    /// the next event lies at or beyond the horizon.
    pub fn step<O: PortObserver>(&mut self, observer: &mut O) -> SimResult<bool> {
        if self.finished {
            return Ok(false);
        }
        let Some(next) = self.queue.next_event() else {
            return Ok(false);
        };
        if next.time >= self.config.horizon {
            return Ok(false);
        }

        // Statistics close over the state the event is about to change,
        // its own payload included.
        self.accumulate(next.time);

        // Consume before dispatching so a tanker payload leaves the queue
        // before the handler gives it a new location.
        let event = self.queue.consume_head(next.kind).ok_or_else(|| self.violation(
            format!("{} lane emptied between peek and pop", next.kind),
        ))?;
        self.state.clock = event.time;
        debug!(clock = event.time.minutes(), %event, "dispatch");

        self.dispatch(event, observer)?;
        self.stats.events_processed += 1;

        let blocked = self.view().is_blocked();
        if blocked {
            self.stats.blocked_events += 1;
            if !self.was_blocked {
                warn!(
                    clock = self.state.clock.minutes(),
                    berths = self.state.berths_in_use(),
                    held = self.state.berth_queue.len(),
                    "port entered a blocked situation"
                );
            }
            observer.on_blocked(self.state.clock);
        }
        self.was_blocked = blocked;

        let view = self.view();
        if self.audit {
            view.check_invariants()?;
        }
        observer.on_event(&event, &view);
        Ok(true)
    }

    /// Read-only view of the whole simulator.
    pub fn view(&self) -> PortView<'_> {
        PortView {
            config: &self.config,
            state:  &self.state,
            queue:  &self.queue,
            fleet:  &self.fleet,
            stats:  &self.stats,
        }
    }

    /// Whether the run has reached its horizon and been finalised.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // ── Loop internals ────────────────────────────────────────────────────

    /// Charge the state held since the last update to the time-weighted
    /// statistics, up to `now`.
    fn accumulate(&mut self, now: SimTime) {
        let dt = (now.minutes() - self.stats.observed_until).max(0.0);
        let inside = self.view().tankers_inside() as f64;
        let waiting = self.state.entrance.len() as f64;
        let berths = self.state.berths_in_use() as f64;
        let unloading = self.state.wharf_occupied.len() as f64;

        let stats = &mut self.stats;
        stats.entrance_queue.observe(waiting, dt);
        stats.inside_port.observe(inside, dt);
        stats.at_wharves.observe(berths, dt);
        stats.unloading.observe(unloading, dt);
        stats.observed_until = stats.observed_until.max(now.minutes());
    }

    /// Advance the clock to the horizon and close the statistics.
    fn finish<O: PortObserver>(&mut self, observer: &mut O) {
        if self.finished {
            return;
        }
        let end = if self.config.horizon > self.state.clock { self.config.horizon } else { self.state.clock };
        self.accumulate(end);
        self.state.clock = end;
        self.finished = true;
        observer.on_sim_end(&self.view());
    }

    fn dispatch<O: PortObserver>(&mut self, event: Event, observer: &mut O) -> SimResult<()> {
        match event.kind {
            EventKind::TankerArrivalAtEntrance => self.on_tanker_arrival_at_entrance(self.payload(&event)?),
            EventKind::TugArrivalAtEntrance    => self.on_tug_arrival_at_entrance(),
            EventKind::TankerArrivalAtWharf    => self.on_tanker_arrival_at_wharf(self.payload(&event)?),
            EventKind::UnloadingDone           => self.on_unloading_done(self.payload(&event)?),
            EventKind::TugArrivalAtWharf       => self.on_tug_arrival_at_wharf(),
            EventKind::TankerDeparture         => self.on_tanker_departure(self.payload(&event)?, observer),
            EventKind::TugAvailable            => self.on_tug_available(),
        }
    }

    // ── Handlers ──────────────────────────────────────────────────────────

    /// A tanker joins the entrance queue.  The next arrival is scheduled
    /// immediately, and an idle tug is sent if one is available.
    fn on_tanker_arrival_at_entrance(&mut self, id: TankerId) -> SimResult<()> {
        self.tanker_mut(id)?.enter(Phase::Entrance);
        self.state.entrance.push_back(id);
        self.stats.waiting += 1;

        let gap = self.variates.inter_arrival(self.state.clock);
        self.generate_tanker(self.later(gap))?;

        self.send_idle_tug(Side::Entrance)
    }

    /// A tug reaches the entrance and tows the longest-waiting tanker in.
    fn on_tug_arrival_at_entrance(&mut self) -> SimResult<()> {
        let id = self
            .state
            .entrance
            .pop_front()
            .ok_or_else(|| self.violation("tug reached an empty entrance queue".into()))?;
        let now = self.state.clock;
        let tanker = self.tanker_mut(id)?;
        tanker.enter(Phase::TowedIn);
        tanker.entered_at = Some(now);
        self.stats.waiting = self.stats.waiting.saturating_sub(1);
        self.stats.inside += 1;

        let trip = self.variates.full_trip();
        self.schedule_for(EventKind::TankerArrivalAtWharf, id, self.later(trip))
    }

    /// A towed tanker reaches the wharves.  With a free berth it starts
    /// unloading and its tug is released; otherwise it is held, with its
    /// tug, until a berth frees.
    fn on_tanker_arrival_at_wharf(&mut self, id: TankerId) -> SimResult<()> {
        if !self.state.has_free_berth() {
            self.tanker_mut(id)?.enter(Phase::AwaitingBerth);
            self.state.berth_queue.push_back(id);
            self.stats.wharf_saturations += 1;
            warn!(
                clock = self.state.clock.minutes(),
                tanker = %id,
                held = self.state.berth_queue.len(),
                "every berth taken; tanker held with its tug"
            );
            return Ok(());
        }

        self.start_unloading(id)
    }

    /// Put `id` on a free berth, release its tug and schedule the end of
    /// unloading.
    fn start_unloading(&mut self, id: TankerId) -> SimResult<()> {
        self.tanker_mut(id)?.enter(Phase::Unloading);
        self.state.wharf_occupied.push(id);
        self.queue.schedule_tug(EventKind::TugAvailable, self.state.clock)?;

        let duration = self.variates.unloading().max(0.0);
        self.tanker_mut(id)?.record_progress(Progress::Interval(duration));
        self.queue
            .schedule_tanker(EventKind::UnloadingDone, self.later(duration), id)?;
        Ok(())
    }

    /// A tanker finishes unloading but keeps its berth until towed out.
    fn on_unloading_done(&mut self, id: TankerId) -> SimResult<()> {
        let pos = self
            .state
            .wharf_occupied
            .iter()
            .position(|&t| t == id)
            .ok_or_else(|| self.violation(format!("{id} finished unloading but was not at a berth")))?;
        self.state.wharf_occupied.remove(pos);
        self.state.wharf_done.push_back(id);
        self.tanker_mut(id)?.enter(Phase::AwaitingTug);

        self.send_idle_tug(Side::Wharf)
    }

    /// A tug reaches the wharves and tows the longest-waiting finished
    /// tanker out.  The berth it frees goes straight to the head of the berth
    /// queue, ahead of any tanker still being towed in.
    fn on_tug_arrival_at_wharf(&mut self) -> SimResult<()> {
        let id = self
            .state
            .wharf_done
            .pop_front()
            .ok_or_else(|| self.violation("tug reached the wharves with no tanker to tow".into()))?;
        self.tanker_mut(id)?.enter(Phase::TowedOut);
        let trip = self.variates.full_trip();
        self.schedule_for(EventKind::TankerDeparture, id, self.later(trip))?;

        if let Some(held) = self.state.berth_queue.pop_front() {
            debug!(tanker = %held, "berth freed for held tanker");
            let now = self.state.clock;
            self.tanker_mut(held)?.record_progress(Progress::At(now));
            self.start_unloading(held)?;
        }
        Ok(())
    }

    /// A tanker leaves the port; its tug is released.
    fn on_tanker_departure<O: PortObserver>(&mut self, id: TankerId, observer: &mut O) -> SimResult<()> {
        let now = self.state.clock;
        let mut tanker: Tanker = self.fleet.retire(id).ok_or(SimError::UnknownTanker(id))?;
        tanker.enter(Phase::Departed);

        self.stats.time_in_port.record(tanker.total_elapsed);
        self.stats.time_inside.record(tanker.time_inside(now).unwrap_or(0.0));
        self.stats.inside = self.stats.inside.saturating_sub(1);
        self.stats.done += 1;

        self.queue.schedule_tug(EventKind::TugAvailable, now)?;
        debug!(tanker = %tanker, minutes = tanker.total_elapsed, "departed");
        observer.on_departure(&tanker, now);
        Ok(())
    }

    /// A tug has dropped its tanker.  It is sent wherever the dispatch
    /// policy finds unmet demand, or goes idle.
    fn on_tug_available(&mut self) -> SimResult<()> {
        match dispatch::choose_side(self.config.policy, &self.state, &self.queue) {
            Some(side) => {
                let trip = self.variates.empty_trip();
                self.queue.schedule_tug(side.tug_arrival(), self.later(trip))?;
            }
            None => {
                if self.state.free_tugs >= self.state.max_tugs {
                    return Err(self.violation("tug released while every tug was already idle".into()));
                }
                self.state.free_tugs += 1;
            }
        }
        Ok(())
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Create a tanker arriving at `at` and schedule its entrance arrival.
    pub(crate) fn generate_tanker(&mut self, at: SimTime) -> SimResult<TankerId> {
        let id = self.fleet.spawn(at);
        self.stats.generated += 1;
        self.schedule_for(EventKind::TankerArrivalAtEntrance, id, at)?;
        Ok(id)
    }

    /// Send one idle tug to `side` if there is both an idle tug and a tanker
    /// there not already covered by a tug en route.
    fn send_idle_tug(&mut self, side: Side) -> SimResult<()> {
        if self.state.free_tugs == 0 || !dispatch::has_unmet_demand(side, &self.state, &self.queue) {
            return Ok(());
        }
        self.state.free_tugs -= 1;
        let trip = self.variates.empty_trip();
        self.queue.schedule_tug(side.tug_arrival(), self.later(trip))?;
        Ok(())
    }

    /// Schedule a tanker-scoped event, charging the tanker up to `at`.
    fn schedule_for(&mut self, kind: EventKind, id: TankerId, at: SimTime) -> SimResult<()> {
        self.tanker_mut(id)?.record_progress(Progress::At(at));
        self.queue.schedule_tanker(kind, at, id)?;
        Ok(())
    }

    /// The clock `minutes` from now.  Negative or NaN durations count as 0 so
    /// the clock never runs backwards.
    #[inline]
    fn later(&self, minutes: f64) -> SimTime {
        self.state.clock.after(minutes.max(0.0))
    }

    fn payload(&self, event: &Event) -> SimResult<TankerId> {
        event
            .tanker
            .ok_or_else(|| self.violation(format!("{} dispatched without a tanker", event.kind)))
    }

    fn tanker_mut(&mut self, id: TankerId) -> SimResult<&mut Tanker> {
        self.fleet.get_mut(id).ok_or(SimError::UnknownTanker(id))
    }

    fn violation(&self, what: String) -> SimError {
        SimError::Invariant { at: self.state.clock.minutes(), what }
    }
}
