//! Drives the controller with a synthetic solver to check whole-run behavior.

use cadence_core::{IterationFeedback, Observer};
use cadence_stepper::{
    adaptive::{Action, Config, Controller, Event, IterationTarget, Policy},
    limiter::{Limiter, LimiterConfig},
    table::{OutOfRange, PiecewiseLinearTable},
};

/// A solver whose stiffness peaks around `t = 3`.
///
/// Steps longer than the local limit fail; shorter steps converge in a number
/// of iterations proportional to how close they come to the limit.
fn solve(time: f64, dt: f64) -> IterationFeedback {
    let limit = 0.05 + 0.5 * (time - 3.0).abs();
    let load = dt / limit;
    if load > 1.0 {
        IterationFeedback::failed(25, 500)
    } else {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let nonlinear = 1 + (load * 9.0).round() as usize;
        IterationFeedback::converged(nonlinear, nonlinear * 5)
    }
}

#[derive(Default)]
struct Trace {
    accepted: Vec<(f64, f64)>,
    rejected: usize,
}

impl Observer<Event, Action> for Trace {
    fn observe(&mut self, event: &Event) -> Option<Action> {
        match *event {
            Event::Accepted { time, dt, .. } => self.accepted.push((time, dt)),
            Event::Rejected { .. } => self.rejected += 1,
        }
        None
    }
}

fn run(controller: &mut Controller, end: f64) -> Trace {
    let mut trace = Trace::default();
    while controller.time() < end {
        let feedback = solve(controller.time(), controller.propose_step());
        controller
            .report_result_observed(feedback, &mut trace)
            .expect("run completes");
        assert!(trace.accepted.len() + trace.rejected < 10_000, "run did not finish");
    }
    trace
}

#[test]
fn heuristic_run_hits_breakpoints_and_respects_bounds() {
    let breakpoints = [0.5, 2.0, 3.0, 4.25, 6.0];
    let mut controller = Controller::new(
        Config {
            initial_dt: 0.1,
            dt_min: Some(1e-4),
            dt_max: Some(0.8),
            target: Some(IterationTarget::new(5, 2)),
            breakpoints: breakpoints.to_vec(),
            ..Config::default()
        },
        Policy::Heuristic,
        None,
    )
    .expect("valid controller");

    let trace = run(&mut controller, 6.0);

    let times: Vec<f64> = trace.accepted.iter().map(|&(t, _)| t).collect();
    assert!(times.windows(2).all(|pair| pair[0] < pair[1]));
    for breakpoint in breakpoints {
        assert_eq!(
            times.iter().filter(|&&t| t == breakpoint).count(),
            1,
            "breakpoint {breakpoint} not hit exactly once"
        );
    }

    for &(time, dt) in &trace.accepted {
        let landed = breakpoints.contains(&time);
        assert!(dt <= 0.8, "dt = {dt} above dt_max at t = {time}");
        assert!(landed || dt >= 1e-4, "dt = {dt} below dt_min at t = {time}");
    }

    // The stiff region forces rejections and small steps.
    assert!(trace.rejected > 0);
    assert!(trace.accepted.iter().any(|&(t, dt)| (2.5..3.5).contains(&t) && dt <= 0.1));
    assert_eq!(controller.time(), 6.0);
    assert!(controller.remaining_breakpoints().is_empty());
}

#[test]
fn table_run_follows_schedule_and_stops_at_every_row() {
    let table = PiecewiseLinearTable::from_pairs(
        [(0.0, 0.02), (1.0, 0.2), (2.5, 0.2), (3.0, 0.02), (5.0, 0.5)],
        OutOfRange::Clamp,
    )
    .expect("valid table");
    let rows = table.times().to_vec();

    let mut controller = Controller::new(
        Config {
            dt_min: Some(1e-4),
            ..Config::default()
        },
        Policy::TableDriven(table),
        None,
    )
    .expect("valid controller");

    let trace = run(&mut controller, 5.0);

    let times: Vec<f64> = trace.accepted.iter().map(|&(t, _)| t).collect();
    for row in rows.into_iter().skip(1) {
        assert!(times.contains(&row), "table time {row} was not a stop");
    }
    assert!(trace.accepted.iter().all(|&(_, dt)| dt <= 0.5));
}

#[test]
fn limited_run_bounds_change_in_limiting_function() {
    let max_change = 0.05;
    let signal = |t: f64| (2.0 * t).sin();
    let limiter = Limiter::new(
        signal,
        LimiterConfig {
            floor: Some(1e-5),
            ..LimiterConfig::new(max_change)
        },
    )
    .expect("valid limiter");

    let mut controller = Controller::new(
        Config {
            initial_dt: 0.5,
            dt_max: Some(1.0),
            ..Config::default()
        },
        Policy::Heuristic,
        Some(limiter),
    )
    .expect("valid controller");

    let mut previous = controller.time();
    let mut steps = 0;
    while controller.time() < 4.0 {
        controller
            .report_result(IterationFeedback::converged(2, 4))
            .expect("accepted");
        let now = controller.time();
        let change = (signal(now) - signal(previous)).abs();
        assert!(
            change <= max_change * (1.0 + 1e-9),
            "change {change} over [{previous}, {now}]"
        );
        previous = now;
        steps += 1;
    }

    // sin(2t) is bounded by slope 2, so each step is at least ~max_change / 2.
    assert!(steps < 400, "{steps} steps is too many");
}
