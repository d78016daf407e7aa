//! Actuator model: the two effectors and the positions they can hold.
//!
//! Each effector is a DC motor behind an H-bridge driven by two direction
//! lines.  A motor can only turn one way at a time, so every position is
//! a variant of a single enum: "head out and tail out at once" is not
//! representable.
//!
//! | Position                | IN1  | IN2  |
//! |-------------------------|------|------|
//! | `Neutral` / coast       | LOW  | LOW  |
//! | `HeadOut` / `Open`      | LOW  | HIGH |
//! | `TailOut` / `Closed`    | HIGH | LOW  |
//!
//! The physical part is assumed to reach the commanded position well
//! within the shortest scripted interval.  Nothing in software checks it.

/// Level pair applied to an H-bridge's two direction lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectionCode {
    /// (LOW, LOW): motor unpowered, spring returns the part.
    #[default]
    Coast,
    /// (LOW, HIGH)
    Forward,
    /// (HIGH, LOW)
    Reverse,
}

impl DirectionCode {
    /// Levels for (IN1, IN2); `true` = HIGH.
    pub const fn lines(self) -> (bool, bool) {
        match self {
            Self::Coast => (false, false),
            Self::Forward => (false, true),
            Self::Reverse => (true, false),
        }
    }
}

/// Position of the shared head/tail motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LimbState {
    #[default]
    Neutral,
    /// Head swings out from the plaque.
    HeadOut,
    /// Tail swings out from the plaque.
    TailOut,
}

impl LimbState {
    pub const fn direction(self) -> DirectionCode {
        match self {
            Self::Neutral => DirectionCode::Coast,
            Self::HeadOut => DirectionCode::Forward,
            Self::TailOut => DirectionCode::Reverse,
        }
    }
}

/// Position of the mouth motor.
///
/// `Closed` actively drives the jaw shut.  Letting the jaw coast is not a
/// scripted position; only [`ActuatorPort::rest_all`] does that.
///
/// [`ActuatorPort::rest_all`]: crate::app::ports::ActuatorPort::rest_all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouthState {
    #[default]
    Closed,
    Open,
}

impl MouthState {
    pub const fn direction(self) -> DirectionCode {
        match self {
            Self::Open => DirectionCode::Forward,
            Self::Closed => DirectionCode::Reverse,
        }
    }
}

/// A target position for one effector.  The effector is implied by the
/// variant, so a step can never pair the mouth with a limb position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorState {
    Limb(LimbState),
    Mouth(MouthState),
}
