use std::time::Duration;

use algo_trace::algorithms::sorting::BubbleSort;
use algo_trace::{
    input, registry, AlgorithmArgs, Error, InputError, PlaybackBuilder, PlaybackController,
    PlaybackError, PlaybackState, Recorder, TickOutcome, TraceEngine, Trace,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Command {
    Play,
    Pause,
    Forward,
    Back,
    Tick,
    StaleTick,
    Advance(u64),
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Play),
        Just(Command::Pause),
        Just(Command::Forward),
        Just(Command::Back),
        Just(Command::Tick),
        Just(Command::StaleTick),
        (0u64..350).prop_map(Command::Advance),
    ]
}

fn numbered(len: usize) -> Trace<usize> {
    let mut rec = Recorder::new();
    for i in 0..len {
        rec.record(format!("step {i}"), i);
    }
    rec.finish()
}

proptest! {
    #[test]
    fn position_stays_in_bounds_and_matches_state(
        len in 1usize..8,
        commands in prop::collection::vec(command(), 0..40),
    ) {
        let mut c: PlaybackController<usize> = PlaybackController::with_period(Duration::from_millis(100));
        c.load(numbered(len)).unwrap();
        let mut stale = None;

        for cmd in commands {
            match cmd {
                Command::Play => {
                    let previous = c.live_token();
                    let token = c.play().unwrap();
                    if previous.is_some() && previous != token {
                        stale = previous;
                    }
                }
                Command::Pause => {
                    let previous = c.live_token();
                    c.pause().unwrap();
                    stale = previous.or(stale);
                }
                Command::Forward | Command::Back => {
                    let previous = c.live_token();
                    let at = if matches!(cmd, Command::Forward) {
                        c.step_forward().unwrap()
                    } else {
                        c.step_back().unwrap()
                    };
                    prop_assert_eq!(Some(at), c.position());
                    prop_assert!(!c.is_playing());
                    stale = previous.or(stale);
                }
                Command::Tick => {
                    if let Some(token) = c.live_token() {
                        let outcome = c.on_tick(token);
                        prop_assert_ne!(outcome, TickOutcome::Stale);
                    }
                }
                Command::StaleTick => {
                    if let Some(token) = stale {
                        let before = (c.state(), c.position());
                        prop_assert_eq!(c.on_tick(token), TickOutcome::Stale);
                        prop_assert_eq!(before, (c.state(), c.position()));
                    }
                }
                Command::Advance(ms) => {
                    c.advance(Duration::from_millis(ms));
                }
            }

            let position = c.position().unwrap();
            prop_assert!(position < len);
            prop_assert_eq!(c.is_playing(), c.live_token().is_some());
            if c.state() == PlaybackState::Complete {
                prop_assert_eq!(position, len - 1);
            }
            let frame = c.frame().unwrap();
            prop_assert_eq!(frame.step.state, position);
            prop_assert_eq!(frame.total, len);
        }
    }

    #[test]
    fn playing_without_interruption_reaches_every_step(len in 2usize..20) {
        let mut c = PlaybackController::with_period(Duration::from_millis(10));
        c.load(numbered(len)).unwrap();
        let token = c.play().unwrap().unwrap();
        let mut seen = vec![c.frame().unwrap().step.state];
        loop {
            let outcome = c.on_tick(token);
            seen.push(c.frame().unwrap().step.state);
            if outcome == TickOutcome::Completed {
                break;
            }
        }
        prop_assert_eq!(seen, (0..len).collect::<Vec<_>>());
        prop_assert_eq!(c.state(), PlaybackState::Complete);
    }
}

#[test]
fn run_loads_a_fresh_trace() {
    let bubble = registry().get("sorting/bubble-sort").unwrap();
    let mut c = PlaybackController::new();
    let output = c
        .run(bubble, &AlgorithmArgs::Values(vec![5, 2, 8, 1, 9, 4]))
        .unwrap();
    assert_eq!(output.to_string(), "[1, 2, 4, 5, 8, 9]");
    assert_eq!(c.state(), PlaybackState::Ready);
    assert_eq!(c.position(), Some(0));

    let token = c.play().unwrap().unwrap();
    c.on_tick(token);
    assert_eq!(c.position(), Some(1));

    // a second run replaces the trace and cancels the schedule
    c.run(bubble, &AlgorithmArgs::Values(vec![2, 1])).unwrap();
    assert_eq!(c.on_tick(token), TickOutcome::Stale);
    assert_eq!(c.position(), Some(0));
    assert_eq!(c.state(), PlaybackState::Ready);
}

#[test]
fn rejected_run_leaves_controller_empty() {
    let bfs = registry().get("graph/bfs").unwrap();
    let mut c = PlaybackController::new();
    c.run(bfs, &AlgorithmArgs::Values(vec![1])).unwrap_err();
    assert_eq!(c.state(), PlaybackState::Empty);

    let err = c.play().unwrap_err();
    assert_eq!(err, PlaybackError::NoTrace);
}

#[test]
fn parse_failure_never_reaches_the_controller() {
    let bfs = registry().get("graph/bfs").unwrap();
    let fields = [("vertices", "3"), ("edges", "0-1,1-5"), ("start", "0")]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
    let err = input::parse_args(bfs.args, &fields).unwrap_err();
    assert_eq!(
        err,
        InputError::VertexOutOfRange {
            vertex: 5,
            vertices: 3
        }
    );
    let err: Error = err.into();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn builder_preloads_engine_output() {
    let trace = TraceEngine::new(BubbleSort).run(&[3, 1, 2]).trace;
    let total = trace.len();
    let mut c = PlaybackBuilder::new()
        .with_period(Duration::from_millis(250))
        .with_trace(trace)
        .build();
    assert_eq!(c.total_steps(), total);
    c.play().unwrap();
    assert_eq!(c.advance(Duration::from_millis(600)), 2);
    assert_eq!(c.position(), Some(2));
}
