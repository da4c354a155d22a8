//! Timer-driven stepping example.
//!
//! Arms the periodic rate generator from configuration and fires the
//! simulated interrupt by hand, the way a timer ISR would. The interrupt
//! reaches the STEP line through its own handle into a shared cell.
//!
//! Run with: `cargo run --example timer_stepping`

use stepper_pulse::{
    config::parse_config,
    motor::PeriodicTimer,
    sim::{Line, SimPin, SimTimer, Trace},
    CsState, MotionEngine, RateProgram, SharedPin, StepTicker,
};

/// Shared with the interrupt handler on real hardware.
static PROGRAM: RateProgram = RateProgram::new();

fn main() {
    println!("=== Timer Stepping Example ===\n");

    let config = parse_config(
        r#"
[timer]
base_period_us = 1000
"#,
    )
    .expect("Failed to parse config");

    let trace = Trace::new();
    let step = CsState::new(trace.pin(Line::Step, false));
    let mut timer = SimTimer::new();
    let mut engine = MotionEngine::builder()
        .from_config(&config)
        .step_pin(SharedPin::<SimPin, _>::new(&step))
        .dir_pin(trace.pin(Line::Direction, false))
        .enable_pin(trace.pin(Line::Enable, false))
        .delay(trace.delay())
        .build()
        .expect("Failed to build engine");

    let divisor = config.timer.divisor_for_pulse_rate(125.0);
    println!(
        "Base rate {} Hz, divisor {} gives {} Hz pulses",
        config.timer.base_frequency_hz(),
        divisor,
        config.timer.pulse_rate_hz(divisor)
    );

    // 10 pulses = 20 toggles
    engine
        .arm(&PROGRAM, &mut timer, 20, divisor)
        .expect("Failed to arm");
    println!("Armed: state {}", PROGRAM.state().name());

    let mut ticker = StepTicker::new(&PROGRAM, SharedPin::<SimPin, _>::new(&step));
    let period_ns = config.timer.base_period_us as u64 * 1_000;
    let mut ticks = 0u32;
    while timer.is_running() && !PROGRAM.is_exhausted() {
        trace.advance_ns(period_ns);
        ticker.on_tick().expect("Tick failed");
        ticks += 1;
    }

    println!(
        "Emitted {} toggles over {} ticks ({} ms)",
        PROGRAM.steps_emitted(),
        ticks,
        trace.now_ns() / 1_000_000
    );

    PROGRAM.stop(&mut timer);
    println!("Stopped: state {}", PROGRAM.state().name());

    println!("\n=== Example Complete ===");
}
