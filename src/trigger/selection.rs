//! Selected track number with wrap-around.

/// The track that plays on the next trigger, always in `1..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSelection {
    current: u8,
    max: u8,
}

impl TrackSelection {
    /// Start at track 1 of `1..=max`.
    pub fn new(max: u8) -> Self {
        Self::starting_at(1, max)
    }

    /// Start at `track`, pulled into range if it falls outside `1..=max`.
    pub fn starting_at(track: u8, max: u8) -> Self {
        let max = max.max(1);
        let current = if (1..=max).contains(&track) { track } else { 1 };
        Self { current, max }
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    /// Step to the next track, wrapping `max` → 1.  Returns the new track.
    pub fn advance(&mut self) -> u8 {
        self.current = next_track(self.current, self.max);
        self.current
    }
}

/// `t + 1`, or 1 once `t` reaches `max`.
pub const fn next_track(t: u8, max: u8) -> u8 {
    if t >= max { 1 } else { t + 1 }
}
