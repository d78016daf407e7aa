//! Choreography scripts: timed actuator moves played against a track.
//!
//! A [`Script`] is plain data, an ordered list of [`Step`]s.  The
//! [`interpreter`] walks it against the wall clock; the [`catalogue`] holds
//! the authored script for each track.  Timing is open-loop: the MP3
//! module never reports its position, so a script only lines up with the
//! music because its waits were tuned by ear.
//!
//! Scripts are finite by construction.  [`Step::RepeatBlock`] repeats a
//! nested list a fixed number of times and there is no unbounded loop.

pub mod catalogue;
pub mod interpreter;

use crate::actuators::{ActuatorState, LimbState, MouthState};

pub use catalogue::Catalogue;
pub use interpreter::{RunReport, run};

/// The effectors moved together by one [`Step::AlternatePulse`].
///
/// The limb can pulse to at most one extension per step (the motor cannot
/// turn both ways), so the limb is an `Option` rather than a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseSet {
    /// Limb position held during the "on" half of each cycle.
    pub limb: Option<LimbState>,
    /// Whether the mouth opens during the "on" half of each cycle.
    pub mouth: bool,
}

impl PulseSet {
    pub const MOUTH: Self = Self {
        limb: None,
        mouth: true,
    };
    pub const HEAD: Self = Self {
        limb: Some(LimbState::HeadOut),
        mouth: false,
    };
    pub const TAIL: Self = Self {
        limb: Some(LimbState::TailOut),
        mouth: false,
    };

    /// Also flap the mouth in step with the limb.
    pub const fn with_mouth(self) -> Self {
        Self {
            limb: self.limb,
            mouth: true,
        }
    }

    /// Positions written at the start of each cycle.
    pub(crate) fn on_states(self) -> impl Iterator<Item = ActuatorState> {
        let limb = self.limb.map(ActuatorState::Limb);
        let mouth = self.mouth.then_some(ActuatorState::Mouth(MouthState::Open));
        limb.into_iter().chain(mouth)
    }

    /// Positions written halfway through each cycle.
    pub(crate) fn off_states(self) -> impl Iterator<Item = ActuatorState> {
        let limb = self.limb.map(|_| ActuatorState::Limb(LimbState::Neutral));
        let mouth = self.mouth.then_some(ActuatorState::Mouth(MouthState::Closed));
        limb.into_iter().chain(mouth)
    }
}

/// One primitive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Drive an effector to a position.  Takes no time.
    SetActuator(ActuatorState),
    /// Block for this many milliseconds.
    Wait(u32),
    /// Run `steps` back to back `count` times.  Timing error is not
    /// corrected between repeats.
    RepeatBlock { steps: Vec<Step>, count: u16 },
    /// Alternate `targets` on and off every `interval_ms` for
    /// [`pulse_cycles`]`(total_ms, interval_ms)` full cycles.
    AlternatePulse {
        targets: PulseSet,
        interval_ms: u32,
        total_ms: u32,
    },
}

impl Step {
    /// Time this step blocks for, ignoring scheduling overhead.
    pub fn nominal_duration_ms(&self) -> u64 {
        match self {
            Self::SetActuator(_) => 0,
            Self::Wait(ms) => u64::from(*ms),
            Self::RepeatBlock { steps, count } => {
                u64::from(*count).saturating_mul(sum_durations(steps))
            }
            Self::AlternatePulse {
                interval_ms,
                total_ms,
                ..
            } => u64::from(pulse_cycles(*total_ms, *interval_ms)) * 2 * u64::from(*interval_ms),
        }
    }
}

/// Saturates instead of wrapping on absurdly nested repeats.
fn sum_durations(steps: &[Step]) -> u64 {
    steps
        .iter()
        .map(Step::nominal_duration_ms)
        .fold(0, u64::saturating_add)
}

/// Full on/off cycles that fit in `total_ms`.
///
/// Each cycle is two intervals long.  Leftover time shorter than a whole
/// cycle is dropped (floor division), so `pulse_cycles(1000, 200) == 2`.
/// A zero interval yields no cycles.
pub const fn pulse_cycles(total_ms: u32, interval_ms: u32) -> u32 {
    if interval_ms == 0 {
        return 0;
    }
    total_ms / interval_ms / 2
}

/// An immutable, finite choreography.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    /// A script with no steps: the track plays and nothing moves.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> ScriptBuilder {
        ScriptBuilder::new()
    }

    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total blocking time of the whole script.
    pub fn nominal_duration_ms(&self) -> u64 {
        sum_durations(&self.steps)
    }
}

/// Fluent builder using the vocabulary the routines are written in.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    steps: Vec<Step>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn wait(self, ms: u32) -> Self {
        self.step(Step::Wait(ms))
    }

    pub fn limb(self, state: LimbState) -> Self {
        self.step(Step::SetActuator(ActuatorState::Limb(state)))
    }

    pub fn mouth(self, state: MouthState) -> Self {
        self.step(Step::SetActuator(ActuatorState::Mouth(state)))
    }

    pub fn head_out(self) -> Self {
        self.limb(LimbState::HeadOut)
    }

    pub fn tail_out(self) -> Self {
        self.limb(LimbState::TailOut)
    }

    pub fn limb_rest(self) -> Self {
        self.limb(LimbState::Neutral)
    }

    pub fn mouth_open(self) -> Self {
        self.mouth(MouthState::Open)
    }

    pub fn mouth_close(self) -> Self {
        self.mouth(MouthState::Closed)
    }

    /// Open, hold for `ms`, close.  One sung word.
    pub fn mouth_open_for(self, ms: u32) -> Self {
        self.mouth_open().wait(ms).mouth_close()
    }

    /// Head out for a sung line, then back to rest.
    pub fn sing_line(self, ms: u32) -> Self {
        self.head_out().mouth_open_for(ms).limb_rest()
    }

    pub fn pulse(self, targets: PulseSet, interval_ms: u32, total_ms: u32) -> Self {
        self.step(Step::AlternatePulse {
            targets,
            interval_ms,
            total_ms,
        })
    }

    /// Rapid speech: flap the mouth for `total_ms` at `interval_ms`.
    pub fn flap_mouth_for(self, total_ms: u32, interval_ms: u32) -> Self {
        self.pulse(PulseSet::MOUTH, interval_ms, total_ms)
    }

    pub fn flap_head_for(self, total_ms: u32, interval_ms: u32) -> Self {
        self.pulse(PulseSet::HEAD, interval_ms, total_ms)
    }

    pub fn flap_tail_for(self, total_ms: u32, interval_ms: u32) -> Self {
        self.pulse(PulseSet::TAIL, interval_ms, total_ms)
    }

    /// One head bop: out for `interval_ms`, rest for `interval_ms`.
    pub fn flap_head(self, interval_ms: u32) -> Self {
        self.head_out().wait(interval_ms).limb_rest().wait(interval_ms)
    }

    /// One tail bop: out for `interval_ms`, rest for `interval_ms`.
    pub fn flap_tail(self, interval_ms: u32) -> Self {
        self.tail_out().wait(interval_ms).limb_rest().wait(interval_ms)
    }

    /// Repeat the steps written by `body` `count` times.
    pub fn repeat(self, count: u16, body: impl FnOnce(ScriptBuilder) -> ScriptBuilder) -> Self {
        let steps = body(ScriptBuilder::new()).steps;
        self.step(Step::RepeatBlock { steps, count })
    }

    /// Splice in a reusable phrase.
    pub fn phrase(self, body: impl FnOnce(ScriptBuilder) -> ScriptBuilder) -> Self {
        body(self)
    }

    pub fn build(self) -> Script {
        Script { steps: self.steps }
    }
}
