//! Interactive command console example.
//!
//! Reads commands from stdin and runs them against simulated hardware.
//! After each line the simulated timer is serviced until the armed budget
//! is spent.
//!
//! Run with: `cargo run --example command_console`
//!
//! Try: `init`, `enable 0`, `step 5 2`, `steptim 20 4`, `steptrapeze`

use std::io::{self, BufRead, Write};

use stepper_pulse::{
    command::{Response, Shell},
    motor::PeriodicTimer,
    sim::{Line, SimPeripherals, SimTimer, Trace},
    MotionEngine, RateProgram,
};

/// Ticks serviced per line before giving up on an armed program.
const MAX_TICKS: u32 = 100_000;

fn main() {
    println!("=== Command Console Example ===");
    println!("Type 'help' for commands, Ctrl-D to quit.\n");

    let trace = Trace::new();
    let program = RateProgram::new();
    let engine = MotionEngine::builder()
        .name("console")
        .step_pin(trace.pin(Line::Step, false))
        .dir_pin(trace.pin(Line::Direction, false))
        .enable_pin(trace.pin(Line::Enable, true))
        .delay(trace.delay())
        .build()
        .expect("Failed to build engine");

    let mut shell = Shell::new(engine, &program, SimTimer::new(), SimPeripherals::new());

    let stdin = io::stdin();
    prompt();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                println!("Read error: {}", e);
                break;
            }
        };

        trace.clear();
        match shell.run_line(&line) {
            Ok(Response::Done) => {}
            Ok(Response::Help(commands)) => {
                for info in commands {
                    let alias = info.alias.map(|a| format!(" ({})", a)).unwrap_or_default();
                    println!("  {:<16}{:<18}{}{}", info.name, info.usage, info.help, alias);
                }
            }
            Err(e) => println!("{}", e),
        }

        let mut ticks = 0;
        while shell.timer().is_running() && !program.is_exhausted() && ticks < MAX_TICKS {
            trace.advance_ns(1_000_000);
            if let Err(e) = shell.tick() {
                println!("{}", e);
                break;
            }
            ticks += 1;
        }

        let steps = trace.edges_on(Line::Step).len();
        if steps > 0 {
            println!("{} STEP transitions", steps);
        }
        prompt();
    }
}

fn prompt() {
    print!("> ");
    io::stdout().flush().ok();
}
