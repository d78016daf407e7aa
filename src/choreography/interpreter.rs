//! Script interpreter.
//!
//! Executes a [`Script`] synchronously on the calling thread.  The only
//! suspension point is [`DelayNs::delay_ms`]; actuator writes are
//! instantaneous.  Steps run strictly in authored order and a step never
//! starts before the previous one's full duration has elapsed.
//!
//! There is no cancellation: once started, a script runs to completion.

use embedded_hal::delay::DelayNs;
use log::trace;

use super::{Script, Step, pulse_cycles};
use crate::actuators::ActuatorState;
use crate::app::ports::ActuatorPort;

/// Summary of one script execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Steps executed, counting each pass through a repeated block.
    pub steps_executed: u32,
    /// Sum of all waits issued.
    pub scheduled_ms: u64,
}

/// Run `script` to completion, driving `actuators` and blocking on `clock`.
pub fn run(
    script: &Script,
    actuators: &mut impl ActuatorPort,
    clock: &mut impl DelayNs,
) -> RunReport {
    let mut report = RunReport::default();
    run_steps(script.steps(), actuators, clock, &mut report);
    report
}

fn run_steps(
    steps: &[Step],
    actuators: &mut impl ActuatorPort,
    clock: &mut impl DelayNs,
    report: &mut RunReport,
) {
    for step in steps {
        report.steps_executed = report.steps_executed.saturating_add(1);
        match step {
            Step::SetActuator(state) => apply(*state, actuators),
            Step::Wait(ms) => wait(*ms, clock, report),
            Step::RepeatBlock { steps, count } => {
                for _ in 0..*count {
                    run_steps(steps, actuators, clock, report);
                }
            }
            Step::AlternatePulse {
                targets,
                interval_ms,
                total_ms,
            } => {
                let cycles = pulse_cycles(*total_ms, *interval_ms);
                trace!("pulse {:?}: {} cycles @ {}ms", targets, cycles, interval_ms);
                for _ in 0..cycles {
                    targets.on_states().for_each(|s| apply(s, actuators));
                    wait(*interval_ms, clock, report);
                    targets.off_states().for_each(|s| apply(s, actuators));
                    wait(*interval_ms, clock, report);
                }
            }
        }
    }
}

fn apply(state: ActuatorState, actuators: &mut impl ActuatorPort) {
    match state {
        ActuatorState::Limb(s) => actuators.set_limb(s),
        ActuatorState::Mouth(s) => actuators.set_mouth(s),
    }
}

fn wait(ms: u32, clock: &mut impl DelayNs, report: &mut RunReport) {
    clock.delay_ms(ms);
    report.scheduled_ms = report.scheduled_ms.saturating_add(u64::from(ms));
}
