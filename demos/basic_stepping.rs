//! Basic stepping example.
//!
//! Builds an engine on simulated pins, runs a few blocking moves and the
//! trapezoidal profile, then prints what the STEP line did.
//!
//! Run with: `cargo run --example basic_stepping`

use stepper_pulse::{
    config::TrapezoidConfig,
    motion::{StepCommand, TrapezoidProfile},
    sim::{Line, Trace},
    MotionEngine,
};

fn main() {
    println!("=== Basic Stepping Example ===\n");

    let trace = Trace::new();

    // OE rests high: driver outputs disabled
    let mut engine = MotionEngine::builder()
        .name("demo_axis")
        .step_pin(trace.pin(Line::Step, false))
        .dir_pin(trace.pin(Line::Direction, false))
        .enable_pin(trace.pin(Line::Enable, true))
        .delay(trace.delay())
        .build()
        .expect("Failed to build engine");

    println!("Engine created: {}", engine.name());

    match engine.step(10, 2) {
        Ok(()) => println!("Unexpected: moved while disabled"),
        Err(e) => println!("Step while disabled: {}", e),
    }

    engine.gate_mut().enable().expect("Failed to enable driver");
    println!("Driver enabled: {}", engine.is_enabled().unwrap_or(false));

    for command in [StepCommand::new(10, 2), StepCommand::new(-4, 5)] {
        let start = trace.now_ns();
        trace.clear();
        engine.execute(command).expect("Step failed");

        println!(
            "\nstep({}, {}): {:?}, {} transitions in {} ms",
            command.step_count,
            command.delay,
            command.direction(),
            trace.edges_on(Line::Step).len(),
            (trace.now_ns() - start) / 1_000_000
        );
    }

    println!("\n=== Trapezoidal Profile ===");
    let config = TrapezoidConfig::default();
    println!("Total steps: {}", config.total_steps);
    println!("Acceleration zone: {} steps", config.accel_steps);
    println!("Cruise zone: {} steps", config.cruise_steps());
    println!("Deceleration zone: {} steps", config.decel_steps());
    println!(
        "Expected duration: {} ms",
        TrapezoidProfile::total_duration(config)
    );

    let start = trace.now_ns();
    trace.clear();
    engine.run_trapezoid().expect("Trapezoid failed");

    let pulses = trace
        .edges_on(Line::Step)
        .iter()
        .filter(|edge| edge.high)
        .count();
    println!(
        "Emitted {} pulses in {} ms",
        pulses,
        (trace.now_ns() - start) / 1_000_000
    );

    println!("\n=== Example Complete ===");
}
