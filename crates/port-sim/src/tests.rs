//! Integration tests for port-sim.

use port_core::{DispatchPolicy, FixedVariates, PortConfig, SimTime, TankerId, TugTravel};
use port_events::{Event, EventKind, EventQueue};
use port_fleet::{Phase, Tanker};

use crate::dispatch::{choose_side, has_unmet_demand};
use crate::{
    NoopObserver, PortObserver, PortSim, PortSimBuilder, PortState, PortView, Sample, Side, SimError,
    TimeWeighted,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(max_wharves: usize, max_tugs: usize, horizon: f64) -> PortConfig {
    PortConfig {
        max_wharves,
        max_tugs,
        horizon: SimTime(horizon),
        seed: Some(42),
        ..PortConfig::default()
    }
}

fn fixed(inter_arrival: f64, empty_trip: f64, full_trip: f64, unloading: f64) -> FixedVariates {
    FixedVariates { inter_arrival, empty_trip, full_trip, unloading }
}

/// Deterministic simulator with the first tanker arriving at t = 0.
fn fixed_sim(config: PortConfig, variates: FixedVariates) -> PortSim<FixedVariates> {
    PortSimBuilder::new(config, variates)
        .first_arrival_at(SimTime::ZERO)
        .allow_empty_pools(true)
        .audit(true)
        .build()
        .unwrap()
}

/// Everything the simulator reports, kept for later assertions.
#[derive(Default)]
struct Recorder {
    events:     Vec<(EventKind, f64, u64)>,
    departures: Vec<(TankerId, f64, Vec<Phase>, f64)>,
    blocked_at: Vec<f64>,
    ended_at:   Option<f64>,
}

impl PortObserver for Recorder {
    fn on_event(&mut self, event: &Event, view: &PortView<'_>) {
        self.events.push((event.kind, view.state.clock.minutes(), view.stats.blocked_events));
    }

    fn on_departure(&mut self, tanker: &Tanker, at: SimTime) {
        self.departures
            .push((tanker.id, at.minutes(), tanker.route.clone(), tanker.total_elapsed));
    }

    fn on_blocked(&mut self, at: SimTime) {
        self.blocked_at.push(at.minutes());
    }

    fn on_sim_end(&mut self, view: &PortView<'_>) {
        self.ended_at = Some(view.state.clock.minutes());
    }
}

const FULL_ROUTE: [Phase; 6] = [
    Phase::Entrance,
    Phase::TowedIn,
    Phase::Unloading,
    Phase::AwaitingTug,
    Phase::TowedOut,
    Phase::Departed,
];

// ── PortSimBuilder validation ─────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn schedules_first_arrival() {
        let sim = PortSimBuilder::new(test_config(2, 2, 100.0), FixedVariates::uniform(7.0))
            .build()
            .unwrap();
        let head = sim.queue.next_event().unwrap();
        assert_eq!(head.kind, EventKind::TankerArrivalAtEntrance);
        assert_eq!(head.time, SimTime(7.0));
        assert_eq!(head.tanker, Some(TankerId::FIRST));
        assert_eq!(sim.stats.generated, 1);
        assert_eq!(sim.state.free_tugs, 2);
    }

    #[test]
    fn explicit_first_arrival_overrides_draw() {
        let sim = PortSimBuilder::new(test_config(2, 2, 100.0), FixedVariates::uniform(7.0))
            .first_arrival_at(SimTime(3.5))
            .build()
            .unwrap();
        assert_eq!(sim.queue.next_event().unwrap().time, SimTime(3.5));
    }

    #[test]
    fn zero_tugs_rejected_by_default() {
        let result = PortSimBuilder::new(test_config(2, 0, 100.0), FixedVariates::uniform(1.0)).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn zero_wharves_accepted_when_allowed() {
        let result = PortSimBuilder::new(test_config(0, 2, 100.0), FixedVariates::uniform(1.0))
            .allow_empty_pools(true)
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn bad_sigma_rejected() {
        let mut config = test_config(2, 2, 100.0);
        config.travel = TugTravel { sig_full: 0.0, ..TugTravel::default() };
        assert!(matches!(PortSimBuilder::stochastic(config), Err(SimError::Config(_))));
    }

    #[test]
    fn negative_first_arrival_rejected() {
        let result = PortSimBuilder::new(test_config(2, 2, 100.0), FixedVariates::uniform(1.0))
            .first_arrival_at(SimTime(-1.0))
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn stochastic_builder_is_seeded() {
        let a = PortSimBuilder::stochastic(test_config(2, 2, 100.0)).unwrap().build().unwrap();
        let b = PortSimBuilder::stochastic(test_config(2, 2, 100.0)).unwrap().build().unwrap();
        assert_eq!(a.queue.next_event().unwrap().time, b.queue.next_event().unwrap().time);
    }
}

// ── Deterministic single-tanker runs ──────────────────────────────────────────

#[cfg(test)]
mod single_tanker_tests {
    use super::*;

    #[test]
    fn one_tanker_departs_after_three_legs() {
        // Tow in 10, unload 10, tow out 10; empty trips are instant.
        let mut sim = fixed_sim(test_config(1, 1, 100.0), fixed(1000.0, 0.0, 10.0, 10.0));
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.departures.len(), 1);
        let (id, at, route, elapsed) = &rec.departures[0];
        assert_eq!(*id, TankerId::FIRST);
        assert_eq!(*at, 30.0);
        assert_eq!(route.as_slice(), FULL_ROUTE.as_slice());
        assert_eq!(*elapsed, 30.0);

        assert_eq!(sim.stats.events_processed, 8);
        assert_eq!(sim.stats.done, 1);
        assert_eq!(sim.stats.inside, 0);
        assert_eq!(sim.state.free_tugs, 1);
        assert_eq!(sim.stats.blocked_events, 0);
        assert!(rec.blocked_at.is_empty());
    }

    #[test]
    fn uniform_durations_depart_at_fifty() {
        let mut variates = FixedVariates::uniform(10.0);
        variates.inter_arrival = 1000.0;
        let mut sim = fixed_sim(test_config(1, 1, 100.0), variates);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.departures.len(), 1);
        assert_eq!(rec.departures[0].1, 50.0);
        assert_eq!(sim.stats.time_in_port.mean(), 50.0);
        // Towed in at 10, so 40 minutes inside.
        assert_eq!(sim.stats.time_inside.mean(), 40.0);
    }

    #[test]
    fn time_weighted_statistics_close_at_horizon() {
        let mut sim = fixed_sim(test_config(1, 1, 100.0), fixed(1000.0, 0.0, 10.0, 10.0));
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.ended_at, Some(100.0));
        assert_eq!(sim.state.clock, SimTime(100.0));
        assert_eq!(sim.stats.observed_until, 100.0);
        // Inside the port from 0 to 30, at a berth from 10 to 20.
        assert!((sim.stats.mean_inside() - 0.3).abs() < 1e-12);
        assert!((sim.stats.mean_at_wharves() - 0.1).abs() < 1e-12);
        assert!((sim.stats.mean_unloading() - 0.1).abs() < 1e-12);
        assert_eq!(sim.stats.inside_port.max(), 1.0);
    }

    #[test]
    fn tow_legs_count_as_inside() {
        let mut sim = PortSimBuilder::new(test_config(1, 1, 100.0), fixed(1000.0, 0.0, 10.0, 10.0))
            .first_arrival_at(SimTime::ZERO)
            .build()
            .unwrap();
        // Through the tow-in: towed from 0, berthed at 10.
        sim.run_events(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.stats.inside_port.area(), 10.0);
        assert_eq!(sim.stats.at_wharves.area(), 0.0);

        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.stats.inside_port.area(), 30.0);
        assert_eq!(sim.stats.at_wharves.area(), 10.0);
        assert_eq!(sim.stats.unloading.area(), 10.0);
    }

    #[test]
    fn events_are_delivered_in_time_order() {
        let mut sim = fixed_sim(test_config(1, 1, 100.0), fixed(1000.0, 0.0, 10.0, 10.0));
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let kinds: Vec<EventKind> = rec.events.iter().map(|e| e.0).collect();
        assert_eq!(kinds, vec![
            EventKind::TankerArrivalAtEntrance,
            EventKind::TugArrivalAtEntrance,
            EventKind::TankerArrivalAtWharf,
            EventKind::TugAvailable,
            EventKind::UnloadingDone,
            EventKind::TugArrivalAtWharf,
            EventKind::TankerDeparture,
            EventKind::TugAvailable,
        ]);
        assert!(rec.events.windows(2).all(|w| w[0].1 <= w[1].1));
    }
}

// ── Stepping and termination ──────────────────────────────────────────────────

#[cfg(test)]
mod loop_tests {
    use super::*;

    #[test]
    fn run_events_stops_after_n() {
        let mut sim = fixed_sim(test_config(1, 1, 100.0), fixed(1000.0, 0.0, 10.0, 10.0));
        assert_eq!(sim.run_events(3, &mut NoopObserver).unwrap(), 3);
        assert_eq!(sim.stats.events_processed, 3);
        assert_eq!(sim.state.clock, SimTime(10.0));
        assert!(!sim.is_finished());
    }

    #[test]
    fn run_events_returns_fewer_at_horizon() {
        let mut sim = fixed_sim(test_config(1, 1, 100.0), fixed(1000.0, 0.0, 10.0, 10.0));
        assert_eq!(sim.run_events(50, &mut NoopObserver).unwrap(), 8);
        // The horizon has been hit but statistics are not finalised.
        assert_eq!(sim.state.clock, SimTime(30.0));
    }

    #[test]
    fn event_at_horizon_is_not_processed() {
        let mut sim = fixed_sim(test_config(1, 1, 10.0), fixed(10.0, 0.0, 100.0, 10.0));
        sim.run(&mut NoopObserver).unwrap();
        // Arrival at 0 and tug at 0; the second arrival at 10 is left pending.
        assert_eq!(sim.stats.events_processed, 2);
        assert_eq!(sim.queue.pending_count(EventKind::TankerArrivalAtEntrance), 1);
        assert_eq!(sim.state.clock, SimTime(10.0));
    }

    #[test]
    fn tugs_en_route_counts_empty_trips_only() {
        let mut sim = fixed_sim(test_config(1, 2, 100.0), fixed(1000.0, 5.0, 10.0, 10.0));
        assert_eq!(sim.view().tugs_en_route(), 0);

        // Arrival at 0 sends a tug, due at the entrance at 5.
        sim.run_events(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.view().tugs_en_route(), 1);
        assert_eq!(sim.view().tugs_busy(), 1);

        // Now towing, so busy but no longer travelling empty.
        sim.run_events(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.view().tugs_en_route(), 0);
        assert_eq!(sim.view().tugs_busy(), 1);
        assert_eq!(sim.state.free_tugs, 1);
    }

    #[test]
    fn zero_horizon_runs_nothing() {
        let mut sim = fixed_sim(test_config(1, 1, 0.0), FixedVariates::uniform(1.0));
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(sim.stats.events_processed, 0);
        assert!(sim.is_finished());
        assert_eq!(rec.ended_at, Some(0.0));
    }

    #[test]
    fn step_after_finish_is_a_no_op() {
        let mut sim = fixed_sim(test_config(1, 1, 100.0), fixed(1000.0, 0.0, 10.0, 10.0));
        sim.run(&mut NoopObserver).unwrap();
        assert!(!sim.step(&mut NoopObserver).unwrap());
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.stats.events_processed, 8);
    }
}

// ── Empty tug pool ────────────────────────────────────────────────────────────

#[cfg(test)]
mod no_tug_tests {
    use super::*;

    #[test]
    fn entrance_queue_grows_without_tugs() {
        let mut sim = fixed_sim(test_config(2, 0, 200.0), fixed(10.0, 1.0, 1.0, 1.0));
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(sim.stats.events_processed, 20);
        assert_eq!(sim.state.entrance.len(), 20);
        assert_eq!(sim.stats.waiting, 20);
        assert_eq!(sim.stats.generated, 21);
        assert_eq!(sim.stats.inside, 0);
        assert!(rec.departures.is_empty());
        // Both berths stay free, so the port is never blocked.
        assert_eq!(sim.stats.blocked_events, 0);
    }

    #[test]
    fn entrance_queue_mean_is_time_weighted() {
        let mut sim = fixed_sim(test_config(2, 0, 200.0), fixed(10.0, 1.0, 1.0, 1.0));
        sim.run(&mut NoopObserver).unwrap();
        // Length k over [10(k-1), 10k) for k = 1..=20.
        assert!((sim.stats.entrance_queue.area() - 2100.0).abs() < 1e-9);
        assert!((sim.stats.mean_waiting() - 10.5).abs() < 1e-12);
        assert_eq!(sim.stats.entrance_queue.max(), 20.0);
    }

    #[test]
    fn longer_horizon_means_longer_queue() {
        let mut short = fixed_sim(test_config(2, 0, 200.0), fixed(10.0, 1.0, 1.0, 1.0));
        let mut long = fixed_sim(test_config(2, 0, 400.0), fixed(10.0, 1.0, 1.0, 1.0));
        short.run(&mut NoopObserver).unwrap();
        long.run(&mut NoopObserver).unwrap();
        assert_eq!(long.state.entrance.len(), 40);
        assert!(long.state.entrance.len() > short.state.entrance.len());
    }
}

// ── Saturated wharves and deadlock ────────────────────────────────────────────

#[cfg(test)]
mod saturation_tests {
    use super::*;

    #[test]
    fn no_berths_holds_every_towed_tanker() {
        let mut sim = fixed_sim(test_config(0, 3, 100.0), fixed(5.0, 1.0, 2.0, 10.0));
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(sim.stats.wharf_saturations, 3);
        assert_eq!(sim.state.berth_queue.len(), 3);
        assert_eq!(sim.state.free_tugs, 0);
        assert_eq!(sim.stats.events_processed, 26);
        assert_eq!(sim.stats.blocked_events, 20);
        assert_eq!(rec.blocked_at.len(), 20);
        assert!(rec.departures.is_empty());
    }

    #[test]
    fn blocked_count_rises_on_every_event_once_tugs_run_out() {
        let mut sim = fixed_sim(test_config(0, 3, 100.0), fixed(5.0, 1.0, 2.0, 10.0));
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let third_wharf_attempt = rec
            .events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.0 == EventKind::TankerArrivalAtWharf)
            .nth(2)
            .map(|(i, _)| i)
            .unwrap();
        let tail = &rec.events[third_wharf_attempt - 1..];
        assert!(tail.windows(2).all(|w| w[1].2 == w[0].2 + 1));
    }

    #[test]
    fn single_tug_single_berth_deadlocks() {
        // Tanker 1 finishes unloading while the only tug is holding tanker 2
        // at the full wharf; neither can ever move.
        let mut sim = fixed_sim(test_config(1, 1, 100.0), FixedVariates::uniform(10.0));
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(sim.stats.events_processed, 16);
        assert_eq!(sim.stats.generated, 11);
        assert_eq!(sim.stats.wharf_saturations, 1);
        assert_eq!(sim.stats.blocked_events, 11);
        assert_eq!(sim.state.wharf_done, [TankerId(1)]);
        assert_eq!(sim.state.berth_queue, [TankerId(2)]);
        assert_eq!(sim.state.entrance.len(), 8);
        assert_eq!(sim.stats.inside, 2);
        assert_eq!(sim.stats.done, 0);
        assert!(rec.departures.is_empty());
    }

    #[test]
    fn held_tanker_takes_the_freed_berth() {
        // Tanker 2 reaches the only berth at 13 and is held until tanker 1
        // is towed out at 15; it departs at 30.
        let mut sim = fixed_sim(test_config(1, 3, 100.0), fixed(8.0, 0.0, 5.0, 10.0));
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert!(sim.stats.wharf_saturations >= 1);
        assert_eq!(rec.departures[0].0, TankerId(1));
        assert_eq!(rec.departures[0].1, 20.0);
        let held = rec.departures.iter().find(|d| d.2.contains(&Phase::AwaitingBerth)).unwrap();
        assert_eq!(held.0, TankerId(2));
        assert_eq!(held.1, 30.0);
        assert_eq!(
            held.2.as_slice(),
            [
                Phase::Entrance,
                Phase::TowedIn,
                Phase::AwaitingBerth,
                Phase::Unloading,
                Phase::AwaitingTug,
                Phase::TowedOut,
                Phase::Departed,
            ]
            .as_slice()
        );
    }

    #[test]
    fn freed_berth_goes_to_the_held_tanker_at_once() {
        let mut sim = PortSimBuilder::new(test_config(1, 3, 100.0), fixed(1000.0, 0.0, 5.0, 10.0))
            .first_arrival_at(SimTime(500.0))
            .build()
            .unwrap();
        // One tanker done at the only berth, one held behind it, and a tug
        // on its way to tow the first out.
        let done = sim.fleet.spawn(SimTime::ZERO);
        let held = sim.fleet.spawn(SimTime::ZERO);
        sim.state.wharf_done.push_back(done);
        sim.state.berth_queue.push_back(held);
        sim.state.free_tugs = 1;
        sim.queue.schedule_tug(EventKind::TugArrivalAtWharf, SimTime(10.0)).unwrap();
        sim.view().check_invariants().unwrap();

        assert!(sim.step(&mut NoopObserver).unwrap());
        assert_eq!(sim.state.wharf_occupied, [held]);
        assert!(sim.state.berth_queue.is_empty());
        assert_eq!(sim.queue.pending_count(EventKind::TankerArrivalAtWharf), 0);
        assert_eq!(sim.queue.tankers(EventKind::UnloadingDone).collect::<Vec<_>>(), [held]);
        sim.view().check_invariants().unwrap();

        // A tanker towed in at the same instant finds the berth taken.
        let late = sim.fleet.spawn(SimTime::ZERO);
        sim.queue
            .schedule_tanker(EventKind::TankerArrivalAtWharf, SimTime(10.0), late)
            .unwrap();
        assert!(sim.step(&mut NoopObserver).unwrap());
        assert_eq!(sim.state.wharf_occupied, [held]);
        assert_eq!(sim.state.berth_queue, [late]);
        assert_eq!(sim.stats.wharf_saturations, 1);
    }
}

// ── Seeded stochastic runs ────────────────────────────────────────────────────

#[cfg(test)]
mod stochastic_tests {
    use super::*;

    /// Checks tug conservation and clock order on every event.
    #[derive(Default)]
    struct Auditor {
        last_clock: f64,
        events:     usize,
        departures: Vec<(f64, Vec<Phase>, f64)>,
    }

    impl PortObserver for Auditor {
        fn on_event(&mut self, _event: &Event, view: &PortView<'_>) {
            let s = view.state;
            assert!(s.clock.minutes() >= self.last_clock);
            assert!(s.free_tugs <= s.max_tugs);
            assert!(s.berths_in_use() <= s.max_wharves);
            assert_eq!(s.free_tugs + view.tugs_busy(), s.max_tugs);
            self.last_clock = s.clock.minutes();
            self.events += 1;
        }

        fn on_departure(&mut self, tanker: &Tanker, at: SimTime) {
            self.departures
                .push((at.since(tanker.arrival_time), tanker.route.clone(), tanker.total_elapsed));
        }
    }

    fn week_run(policy: DispatchPolicy, seed: u64) -> (PortSim<port_core::StochasticVariates>, Auditor) {
        let config = PortConfig { policy, seed: Some(seed), ..PortConfig::default() };
        let mut sim = PortSimBuilder::stochastic(config).unwrap().audit(true).build().unwrap();
        let mut auditor = Auditor::default();
        sim.run(&mut auditor).unwrap();
        (sim, auditor)
    }

    fn assert_consistent(sim: &PortSim<port_core::StochasticVariates>, auditor: &Auditor) {
        assert!(auditor.events > 0);
        assert_eq!(sim.stats.events_processed as usize, auditor.events);
        assert_eq!(sim.stats.done as usize, auditor.departures.len());
        assert_eq!(sim.stats.generated, sim.fleet.generated() as u64);
        assert_eq!(sim.fleet.live() as u64, sim.stats.generated - sim.stats.done);
        for (span, route, elapsed) in &auditor.departures {
            assert!(*elapsed >= 0.0);
            assert!((span - elapsed).abs() < 1e-6);
            let mut expected = FULL_ROUTE.to_vec();
            if route.contains(&Phase::AwaitingBerth) {
                expected.insert(2, Phase::AwaitingBerth);
            }
            assert_eq!(route, &expected);
        }
    }

    #[test]
    fn default_policy_week_keeps_invariants() {
        let (sim, auditor) = week_run(DispatchPolicy::EntranceFirst, 1);
        assert_consistent(&sim, &auditor);
        assert!(sim.stats.done > 0);
    }

    #[test]
    fn wharf_first_week_keeps_invariants() {
        let (sim, auditor) = week_run(DispatchPolicy::WharfFirst, 2);
        assert_consistent(&sim, &auditor);
        assert!(sim.stats.done > 0);
    }

    #[test]
    fn audited_weeks_hold_across_capacities() {
        for policy in [DispatchPolicy::EntranceFirst, DispatchPolicy::WharfFirst] {
            for (max_wharves, max_tugs) in [(20, 10), (5, 3), (2, 1), (1, 4)] {
                let config =
                    PortConfig { policy, max_wharves, max_tugs, seed: Some(7), ..PortConfig::default() };
                let mut sim = PortSimBuilder::stochastic(config).unwrap().audit(true).build().unwrap();
                let result = sim.run(&mut NoopObserver);
                assert!(result.is_ok(), "{policy}, {max_wharves} wharves, {max_tugs} tugs: {result:?}");
                assert!(sim.stats.events_processed > 0);
            }
        }
    }

    #[test]
    fn same_seed_same_run() {
        let (a, _) = week_run(DispatchPolicy::EntranceFirst, 99);
        let (b, _) = week_run(DispatchPolicy::EntranceFirst, 99);
        assert_eq!(a.stats.events_processed, b.stats.events_processed);
        assert_eq!(a.stats.done, b.stats.done);
        assert_eq!(a.stats.time_in_port.mean(), b.stats.time_in_port.mean());
    }
}

// ── Invariant violations ──────────────────────────────────────────────────────

#[cfg(test)]
mod violation_tests {
    use super::*;

    #[test]
    fn duplicate_location_detected() {
        let mut sim = fixed_sim(test_config(1, 1, 100.0), fixed(1000.0, 5.0, 10.0, 10.0));
        sim.run_events(1, &mut NoopObserver).unwrap();
        sim.state.entrance.push_back(TankerId::FIRST);
        assert!(matches!(sim.view().check_invariants(), Err(SimError::Invariant { .. })));
    }

    #[test]
    fn berthed_tanker_is_located_once() {
        let mut sim = fixed_sim(test_config(1, 1, 100.0), fixed(1000.0, 0.0, 10.0, 10.0));
        sim.run_events(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.state.wharf_occupied, [TankerId::FIRST]);
        assert_eq!(sim.queue.pending_count(EventKind::UnloadingDone), 1);
        assert!(sim.view().check_invariants().is_ok());
    }

    #[test]
    fn unmatched_unloading_completion_detected() {
        let mut sim = fixed_sim(test_config(1, 1, 100.0), fixed(1000.0, 0.0, 10.0, 10.0));
        sim.run_events(3, &mut NoopObserver).unwrap();
        sim.queue
            .schedule_tanker(EventKind::UnloadingDone, SimTime(25.0), TankerId::FIRST)
            .unwrap();
        assert!(matches!(sim.view().check_invariants(), Err(SimError::Invariant { .. })));
    }

    #[test]
    fn unloading_completion_without_berth_detected() {
        let mut sim = fixed_sim(test_config(1, 1, 100.0), fixed(1000.0, 0.0, 10.0, 10.0));
        sim.run_events(3, &mut NoopObserver).unwrap();
        // Same number of completions as berths, but for the tanker still
        // approaching the entrance.
        sim.queue.consume_head(EventKind::UnloadingDone).unwrap();
        sim.queue
            .schedule_tanker(EventKind::UnloadingDone, SimTime(20.0), TankerId(2))
            .unwrap();
        assert!(matches!(sim.view().check_invariants(), Err(SimError::Invariant { .. })));
    }

    #[test]
    fn extra_free_tug_detected() {
        let mut sim = fixed_sim(test_config(1, 2, 100.0), fixed(1000.0, 5.0, 10.0, 10.0));
        sim.run_events(1, &mut NoopObserver).unwrap();
        sim.state.free_tugs += 1;
        assert!(sim.view().check_invariants().is_err());
    }

    #[test]
    fn audit_fails_the_step() {
        let mut sim = fixed_sim(test_config(1, 2, 100.0), fixed(1000.0, 5.0, 10.0, 10.0));
        sim.state.max_tugs = 5;
        assert!(matches!(sim.step(&mut NoopObserver), Err(SimError::Invariant { .. })));
    }

    #[test]
    fn tug_at_empty_entrance_is_an_error() {
        let mut sim = PortSimBuilder::new(test_config(1, 1, 100.0), FixedVariates::uniform(10.0))
            .first_arrival_at(SimTime(5.0))
            .build()
            .unwrap();
        sim.queue.schedule_tug(EventKind::TugArrivalAtEntrance, SimTime(1.0)).unwrap();
        assert!(matches!(sim.step(&mut NoopObserver), Err(SimError::Invariant { .. })));
    }

    #[test]
    fn departure_of_unknown_tanker_is_an_error() {
        let mut sim = PortSimBuilder::new(test_config(1, 1, 100.0), FixedVariates::uniform(10.0))
            .first_arrival_at(SimTime(5.0))
            .build()
            .unwrap();
        sim.queue
            .schedule_tanker(EventKind::TankerDeparture, SimTime(1.0), TankerId(99))
            .unwrap();
        assert!(matches!(sim.step(&mut NoopObserver), Err(SimError::UnknownTanker(TankerId(99)))));
    }

    #[test]
    fn releasing_an_idle_tug_is_an_error() {
        let mut sim = PortSimBuilder::new(test_config(1, 1, 100.0), FixedVariates::uniform(10.0))
            .first_arrival_at(SimTime(5.0))
            .build()
            .unwrap();
        sim.queue.schedule_tug(EventKind::TugAvailable, SimTime(1.0)).unwrap();
        assert!(matches!(sim.step(&mut NoopObserver), Err(SimError::Invariant { .. })));
    }
}

// ── Dispatch policy ───────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    fn state_with_both_sides_waiting() -> PortState {
        let mut state = PortState::new(2, 2);
        state.entrance.push_back(TankerId(1));
        state.wharf_done.push_back(TankerId(2));
        state
    }

    #[test]
    fn entrance_first_prefers_entrance() {
        let state = state_with_both_sides_waiting();
        let queue = EventQueue::new();
        assert_eq!(choose_side(DispatchPolicy::EntranceFirst, &state, &queue), Some(Side::Entrance));
    }

    #[test]
    fn wharf_first_prefers_wharf() {
        let state = state_with_both_sides_waiting();
        let queue = EventQueue::new();
        assert_eq!(choose_side(DispatchPolicy::WharfFirst, &state, &queue), Some(Side::Wharf));
    }

    #[test]
    fn covered_side_is_skipped() {
        let state = state_with_both_sides_waiting();
        let mut queue = EventQueue::new();
        queue.schedule_tug(EventKind::TugArrivalAtEntrance, SimTime(3.0)).unwrap();
        assert!(!has_unmet_demand(Side::Entrance, &state, &queue));
        assert_eq!(choose_side(DispatchPolicy::EntranceFirst, &state, &queue), Some(Side::Wharf));
    }

    #[test]
    fn no_demand_means_idle() {
        let state = PortState::new(2, 2);
        let queue = EventQueue::new();
        assert_eq!(choose_side(DispatchPolicy::EntranceFirst, &state, &queue), None);
        assert_eq!(choose_side(DispatchPolicy::WharfFirst, &state, &queue), None);
    }

    #[test]
    fn side_maps_to_tug_arrival() {
        assert_eq!(Side::Entrance.tug_arrival(), EventKind::TugArrivalAtEntrance);
        assert_eq!(Side::Wharf.tug_arrival(), EventKind::TugArrivalAtWharf);
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats_tests {
    use super::*;

    #[test]
    fn time_weighted_mean() {
        let mut tw = TimeWeighted::default();
        tw.observe(2.0, 10.0);
        tw.observe(4.0, 5.0);
        assert_eq!(tw.area(), 40.0);
        assert_eq!(tw.max(), 4.0);
        assert!((tw.mean_over(20.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn time_weighted_empty_span_is_zero() {
        let tw = TimeWeighted::default();
        assert_eq!(tw.mean_over(0.0), 0.0);
    }

    #[test]
    fn sample_mean_and_max() {
        let mut s = Sample::default();
        assert_eq!(s.mean(), 0.0);
        s.record(10.0);
        s.record(30.0);
        assert_eq!(s.count(), 2);
        assert_eq!(s.mean(), 20.0);
        assert_eq!(s.max(), 30.0);
    }
}
