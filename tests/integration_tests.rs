//! Integration tests for stepper-pulse.
//!
//! These tests drive the public API end to end against the simulation
//! backends and check the observable pulse trains.

use proptest::prelude::*;

use stepper_pulse::command::Shell;
use stepper_pulse::config::{parse_config, TrapezoidConfig};
use stepper_pulse::error::{Error, MotorError};
use stepper_pulse::motion::{Direction, RateProgram, TrapezoidProfile};
use stepper_pulse::motor::{GeneratorState, MotionEngine, PeriodicTimer};
use stepper_pulse::sim::{Line, SimDelay, SimPeripherals, SimPin, SimTimer, Trace};

const MS: u64 = 1_000_000;

type Engine = MotionEngine<SimPin, SimPin, SimPin, SimDelay>;

// =============================================================================
// Helpers
// =============================================================================

fn engine(trace: &Trace, enabled: bool) -> Engine {
    // OE is active low: a low resting level means enabled
    MotionEngine::builder()
        .step_pin(trace.pin(Line::Step, false))
        .dir_pin(trace.pin(Line::Direction, false))
        .enable_pin(trace.pin(Line::Enable, !enabled))
        .delay(trace.delay())
        .build()
        .unwrap()
}

fn ready_shell<'p>(
    trace: &Trace,
    program: &'p RateProgram,
) -> Shell<'p, SimPin, SimPin, SimPin, SimDelay, SimTimer, SimPeripherals> {
    let mut shell = Shell::new(
        engine(trace, false),
        program,
        SimTimer::new(),
        SimPeripherals::new(),
    );
    shell.run_line("init").unwrap();
    shell.run_line("enable 0").unwrap();
    shell
}

// =============================================================================
// Immediate stepper
// =============================================================================

#[test]
fn test_step_five_forward_and_back() {
    let trace = Trace::new();
    let mut engine = engine(&trace, true);

    engine.step(5, 2).unwrap();
    assert_eq!(trace.edges_on(Line::Step).len(), 10);
    assert!(trace
        .intervals_on(Line::Step)
        .iter()
        .all(|&gap| gap == 2 * MS));
    assert_eq!(engine.direction(), Some(Direction::Clockwise));

    trace.clear();
    engine.step(-5, 2).unwrap();
    assert_eq!(trace.edges_on(Line::Step).len(), 10);
    assert_eq!(engine.direction(), Some(Direction::CounterClockwise));

    // CounterClockwise drives FR high
    let dir = trace.edges_on(Line::Direction);
    assert_eq!(dir.len(), 1);
    assert!(dir[0].high);
}

#[test]
fn test_inverted_direction_line() {
    let trace = Trace::new();
    let mut engine = MotionEngine::builder()
        .step_pin(trace.pin(Line::Step, false))
        .dir_pin(trace.pin(Line::Direction, false))
        .enable_pin(trace.pin(Line::Enable, false))
        .delay(trace.delay())
        .invert_direction(true)
        .build()
        .unwrap();

    engine.step(1, 1).unwrap();

    let dir = trace.edges_on(Line::Direction);
    assert_eq!(dir.len(), 1);
    assert!(dir[0].high);
}

#[test]
fn test_disabled_driver_emits_nothing() {
    let trace = Trace::new();
    let mut engine = engine(&trace, false);

    assert_eq!(
        engine.step(5, 2),
        Err(Error::Motor(MotorError::DriverDisabled))
    );
    assert_eq!(
        engine.run_trapezoid(),
        Err(Error::Motor(MotorError::DriverDisabled))
    );
    assert!(trace.edges().is_empty());
    assert_eq!(trace.now_ns(), 0);
}

proptest! {
    #[test]
    fn prop_step_emits_two_transitions_per_pulse(n in -200i32..=200, d in 1u32..20) {
        prop_assume!(n != 0);
        let trace = Trace::new();
        let mut engine = engine(&trace, true);

        engine.step(n, d).unwrap();

        let edges = trace.edges_on(Line::Step);
        prop_assert_eq!(edges.len() as u32, 2 * n.unsigned_abs());
        let gaps = trace.intervals_on(Line::Step);
        prop_assert!(gaps.iter().all(|&gap| gap == d as u64 * MS));
        prop_assert_eq!(engine.direction(), Some(Direction::from_steps(n)));
        prop_assert_eq!(trace.now_ns(), 2 * n.unsigned_abs() as u64 * d as u64 * MS);
    }
}

// =============================================================================
// Periodic rate generator
// =============================================================================

#[test]
fn test_arm_twenty_by_four() {
    let trace = Trace::new();
    let program = RateProgram::new();
    let mut shell = ready_shell(&trace, &program);

    shell.run_line("step-timer 20 4").unwrap();

    let mut toggled_at = Vec::new();
    for t in 1..=200u32 {
        if shell.tick().unwrap() {
            toggled_at.push(t);
        }
    }

    let expected: Vec<u32> = (1..=20).map(|k| 4 * k).collect();
    assert_eq!(toggled_at, expected);
    assert_eq!(program.steps_emitted(), 20);
    // Exhausted but still armed and dividing
    assert!(shell.timer().is_running());
    assert_eq!(program.state(), GeneratorState::Armed);
}

#[test]
fn test_negative_budget_sets_counter_clockwise() {
    let trace = Trace::new();
    let program = RateProgram::new();
    let mut shell = ready_shell(&trace, &program);

    shell.run_line("steptim -6 1").unwrap();
    for _ in 0..6 {
        shell.tick().unwrap();
    }

    assert_eq!(shell.engine().direction(), Some(Direction::CounterClockwise));
    assert_eq!(program.step_budget(), 6);
    assert_eq!(trace.edges_on(Line::Step).len(), 6);
}

#[test]
fn test_zero_divisor_rejected() {
    let trace = Trace::new();
    let program = RateProgram::new();
    let mut shell = ready_shell(&trace, &program);

    assert_eq!(
        shell.run_line("step-timer 10 0"),
        Err(Error::Motor(MotorError::InvalidRateDivisor(0)))
    );
    assert!(!shell.timer().is_running());
}

#[test]
fn test_no_ticks_before_arm() {
    let trace = Trace::new();
    let program = RateProgram::new();
    let mut shell = ready_shell(&trace, &program);

    for _ in 0..50 {
        assert!(!shell.tick().unwrap());
    }
    assert!(trace.edges_on(Line::Step).is_empty());
}

#[test]
fn test_static_program() {
    static PROGRAM: RateProgram = RateProgram::new();

    let trace = Trace::new();
    let mut engine = engine(&trace, true);
    let mut timer = SimTimer::new();

    engine.arm(&PROGRAM, &mut timer, 2, 3).unwrap();
    let toggles = (0..9)
        .filter(|_| engine.on_tick(&PROGRAM).unwrap())
        .count();

    assert_eq!(toggles, 2);
    PROGRAM.stop(&mut timer);
    assert_eq!(PROGRAM.state(), GeneratorState::Idle);
}

proptest! {
    #[test]
    fn prop_emitted_tracks_windows(budget in 0i32..64, divisor in 1u32..8, k in 0u32..80) {
        let trace = Trace::new();
        let mut engine = engine(&trace, true);
        let program = RateProgram::new();
        let mut timer = SimTimer::new();

        engine.arm(&program, &mut timer, budget, divisor).unwrap();
        for _ in 0..k * divisor {
            engine.on_tick(&program).unwrap();
        }

        prop_assert_eq!(program.steps_emitted(), k.min(budget as u32));
        prop_assert_eq!(trace.edges_on(Line::Step).len() as u32, k.min(budget as u32));
    }
}

// =============================================================================
// Trapezoidal profiler
// =============================================================================

#[test]
fn test_default_trapezoid_delays() {
    let config = TrapezoidConfig::default();
    let delay = |i| TrapezoidProfile::delay_at(config, i).unwrap();

    assert_eq!(delay(0), 10);
    assert_eq!(delay(19), 10);
    assert_eq!(delay(20), 9);
    assert_eq!(delay(199), 1);
    assert!((200..3000).all(|i| delay(i) == 1));
    for j in 0..10 {
        assert_eq!(delay(3000 + 20 * j), (1 + j).min(10));
    }
    assert_eq!(delay(3199), 10);
    assert_eq!(TrapezoidProfile::delay_at(config, 3200), None);
}

#[test]
fn test_trapezoid_through_shell() {
    let trace = Trace::new();
    let program = RateProgram::new();
    let mut shell = ready_shell(&trace, &program);

    shell.run_line("steptrapeze").unwrap();

    let rising = trace
        .edges_on(Line::Step)
        .iter()
        .filter(|edge| edge.high)
        .count();
    assert_eq!(rising, 3200);
    assert_eq!(
        trace.now_ns(),
        TrapezoidProfile::total_duration(TrapezoidConfig::default()) * MS
    );
}

#[test]
fn test_configured_short_trapezoid() {
    let config = parse_config(
        r#"
[trapezoid]
total_steps = 40
accel_steps = 10
decel_start = 30
start_delay = 3
min_delay = 1
cadence = 5
"#,
    )
    .unwrap();

    let trace = Trace::new();
    let mut engine = MotionEngine::builder()
        .from_config(&config)
        .step_pin(trace.pin(Line::Step, false))
        .dir_pin(trace.pin(Line::Direction, false))
        .enable_pin(trace.pin(Line::Enable, false))
        .delay(trace.delay())
        .build()
        .unwrap();

    engine.run_trapezoid().unwrap();

    let rising = trace
        .edges_on(Line::Step)
        .iter()
        .filter(|edge| edge.high)
        .count();
    assert_eq!(rising, 40);
    assert_eq!(
        trace.now_ns(),
        TrapezoidProfile::total_duration(config.trapezoid) * MS
    );
}
