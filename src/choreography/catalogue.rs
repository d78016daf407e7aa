//! Authored choreography, one script per music track.
//!
//! Timings were set by ear against the MP3s in folder `01` on the SD card.
//! Comments give the lyric each phrase is synced to.  Tracks whose routine
//! hasn't been written yet are present with an empty script, so they play
//! audio only.

use std::collections::BTreeMap;

use super::{Script, ScriptBuilder};
use crate::error::ScriptError;

/// One catalogue entry.
#[derive(Debug, Clone)]
pub struct TrackEntry {
    pub title: &'static str,
    pub script: Script,
}

/// Track number → choreography.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    entries: BTreeMap<u8, TrackEntry>,
}

impl Catalogue {
    /// An empty catalogue: every lookup reports [`ScriptError::NotDefined`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The routines shipped on the device.
    pub fn authored() -> Self {
        let mut c = Self::new();
        c.insert(1, "Warp Brothers - Phatt Bass", phatt_bass());
        c.insert(2, "Meghan Trainor - All About That Bass", all_about_that_bass());
        c.insert(3, "Mr Scruff - Fish", fish());
        c.insert(4, "System of a Down - Chop Suey!", chop_suey());
        c.insert(5, "Nirvana - Smells Like Teen Spirit", Script::empty());
        c.insert(6, "Rage Against the Machine - Killing in the Name", Script::empty());
        c.insert(7, "Metallica - Enter Sandman", Script::empty());
        c
    }

    /// Add or replace the entry for `track`.
    pub fn insert(&mut self, track: u8, title: &'static str, script: Script) {
        self.entries.insert(track, TrackEntry { title, script });
    }

    pub fn script(&self, track: u8) -> Result<&Script, ScriptError> {
        self.entries
            .get(&track)
            .map(|e| &e.script)
            .ok_or(ScriptError::NotDefined { track })
    }

    pub fn title(&self, track: u8) -> Option<&'static str> {
        self.entries.get(&track).map(|e| e.title)
    }

    /// Track numbers with an entry, ascending.
    pub fn tracks(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Track 1
// ---------------------------------------------------------------------------

fn phatt_bass() -> Script {
    Script::builder()
        .wait(3000) // *sirens*
        .head_out()
        .wait(1000)
        .mouth_open_for(1000) // Listen
        .wait(1000)
        .mouth_open_for(500) // to the
        .wait(300)
        .mouth_open_for(300) // phatt
        .wait(200)
        .flap_mouth_for(1750, 250) // bass... bass... bass... bass...
        .tail_out()
        .mouth_open_for(300) // bass...
        .limb_rest()
        .mouth_open_for(300) // bass...
        .tail_out()
        .mouth_open_for(300) // bass...
        .limb_rest()
        .wait(300)
        .flap_tail_for(5400, 200) // *early 2000s techno noises*
        .head_out()
        .wait(200)
        .mouth_open_for(600) // phatt
        .wait(600)
        .mouth_open_for(600) // bass
        .repeat(10, |b| b.flap_tail_for(400, 200).flap_head_for(400, 200))
        .build()
}

// ---------------------------------------------------------------------------
// Track 2
// ---------------------------------------------------------------------------

/// Limb out, two quick mouth flaps, limb back.  One bar of the verse.
fn shake(b: ScriptBuilder, out: fn(ScriptBuilder) -> ScriptBuilder) -> ScriptBuilder {
    out(b)
        .mouth_open()
        .wait(150)
        .mouth_close()
        .wait(150)
        .limb_rest()
        .mouth_open()
        .wait(150)
        .mouth_close()
        .wait(150)
}

fn all_about_that_bass() -> Script {
    Script::builder()
        .wait(300)
        .head_out()
        .wait(1000)
        .flap_mouth_for(2250, 250) // Because you know I'm all about that bass, 'bout that bass, no treble
        .limb_rest()
        .flap_mouth_for(1750, 250) // I'm all about that bass, 'bout that bass, no treble
        .head_out()
        .flap_mouth_for(1750, 250) // I'm all about that bass, 'bout that bass, no treble
        .limb_rest()
        .flap_mouth_for(1250, 250) // I'm all about that bass, 'bout that
        .flap_mouth_for(500, 125) // bass bass bass bass
        .wait(500)
        // Yeah, it's pretty clear, I ain't no size two...
        .repeat(12, |b| shake(b, ScriptBuilder::tail_out))
        // 'Cause I got that boom boom that all the boys chase...
        .repeat(10, |b| shake(b, ScriptBuilder::head_out))
        // basses
        .repeat(2, |b| {
            b.tail_out()
                .mouth_open()
                .wait(150)
                .mouth_close()
                .wait(150)
                .limb_rest()
        })
        .wait(500)
        .build()
}

// ---------------------------------------------------------------------------
// Track 3
// ---------------------------------------------------------------------------

/// "Fish" ×8, tail on every other word, then "Eating fish".
fn fish_chorus(b: ScriptBuilder) -> ScriptBuilder {
    b.repeat(4, |b| {
        b.tail_out()
            .mouth_open_for(340)
            .wait(100)
            .limb_rest()
            .mouth_open_for(340)
            .wait(100)
    })
    .mouth_open_for(340) // Fish
    .wait(100)
    .head_out()
    .wait(100)
    .mouth_open_for(1300) // Eating fish
    .limb_rest()
}

fn fish() -> Script {
    Script::builder()
        .wait(300)
        .head_out()
        .mouth_open_for(2400) // Now listen to me young fellow
        .wait(300)
        .mouth_open_for(2400) // What need is there for fish to sing
        .wait(300)
        .mouth_open_for(3000) // When I can roar and bellow?
        .limb_rest()
        .wait(1000)
        .phrase(fish_chorus)
        .wait(400)
        .repeat(2, |b| b.mouth_open_for(700).wait(300)) // *unintelligible noises*
        .wait(1400)
        .phrase(fish_chorus)
        .wait(3800)
        .mouth_open_for(2600) // Fish are really...
        .wait(1800)
        .mouth_open_for(2600) // Fish are really...
        .wait(2000)
        .build()
}

// ---------------------------------------------------------------------------
// Track 4
// ---------------------------------------------------------------------------

/// Backing-vocal echo after a line.
fn echo(b: ScriptBuilder) -> ScriptBuilder {
    b.wait(50).mouth_open_for(500).wait(50) // You wanted to
}

fn chop_suey() -> Script {
    Script::builder()
        .sing_line(300) // Wake up
        .wait(100)
        .mouth_open_for(300) // *whisper* Wake up
        .wait(100)
        .sing_line(1500) // Grab a brush and put a little make-up
        .wait(600)
        .sing_line(1320) // Hide the scars to fade away the shake-up
        .phrase(echo)
        .sing_line(1320) // Why'd you leave the keys upon the table?
        .wait(550)
        .sing_line(1320) // Here you go create another fable
        .phrase(echo)
        .sing_line(1250) // Grab a brush and put a little make-up
        .phrase(echo)
        .sing_line(1320) // Hide the scars to fade away the shake-up
        .phrase(echo)
        .sing_line(1320) // Why'd you leave the keys upon the table?
        .phrase(echo)
        .mouth_open_for(1500) // I don't think you trust
        .wait(1500)
        .mouth_open_for(700) // in
        .wait(1200)
        .mouth_open_for(800) // my
        .wait(1100)
        .mouth_open_for(2800) // Self-righteous suicide
        .wait(1000)
        .mouth_open_for(700) // I
        .wait(1200)
        .mouth_open_for(900) // cry
        .wait(850)
        .mouth_open_for(1900) // when angels deserve to
        .wait(50)
        .sing_line(3200) // DIEEEE
        .wait(50)
        .flap_tail_for(2100, 125)
        .wait(50)
        .sing_line(1800) // *roar*
        .wait(500)
        .build()
}
