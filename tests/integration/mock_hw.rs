//! Mock hardware adapters for integration tests.
//!
//! All mocks share one simulated clock, so every recorded actuator call
//! and MP3 frame carries the millisecond it happened at.  The clock only
//! advances when the code under test blocks on [`DelayNs`].

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use bigmouth::actuators::{LimbState, MouthState};
use bigmouth::app::events::AppEvent;
use bigmouth::app::ports::{ActuatorPort, EventSink, InputPort, SerialPort};
use bigmouth::app::service::AppService;
use bigmouth::audio::{Command, Frame};
use bigmouth::choreography::Catalogue;
use bigmouth::config::SystemConfig;
use bigmouth::error::SerialError;
use bigmouth::trigger::TriggerEvent;
use embedded_hal::delay::DelayNs;

// ── Simulated clock ───────────────────────────────────────────

/// Nanoseconds since power-on.
#[derive(Clone, Default)]
pub struct SimClock {
    ns: Rc<Cell<u64>>,
}

#[allow(dead_code)]
impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.ns.get() / 1_000_000
    }
}

impl DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.ns.set(self.ns.get() + u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.ns.set(self.ns.get() + u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ns.set(self.ns.get() + u64::from(ms) * 1_000_000);
    }
}

// ── Actuators ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCall {
    Limb(LimbState),
    Mouth(MouthState),
    RestAll,
}

pub struct MockActuators {
    clock: SimClock,
    pub calls: Vec<(u64, ActuatorCall)>,
}

#[allow(dead_code)]
impl MockActuators {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            calls: Vec::new(),
        }
    }

    /// Calls without timestamps.
    pub fn history(&self) -> Vec<ActuatorCall> {
        self.calls.iter().map(|&(_, c)| c).collect()
    }

    pub fn moves(&self) -> usize {
        self.calls
            .iter()
            .filter(|(_, c)| !matches!(c, ActuatorCall::RestAll))
            .count()
    }
}

impl ActuatorPort for MockActuators {
    fn set_limb(&mut self, state: LimbState) {
        self.calls.push((self.clock.now_ms(), ActuatorCall::Limb(state)));
    }

    fn set_mouth(&mut self, state: MouthState) {
        self.calls.push((self.clock.now_ms(), ActuatorCall::Mouth(state)));
    }

    fn rest_all(&mut self) {
        self.calls.push((self.clock.now_ms(), ActuatorCall::RestAll));
    }
}

// ── MP3 serial link ───────────────────────────────────────────

/// Decodes every write as a frame; a malformed frame fails the test.
pub struct MockSerial {
    clock: SimClock,
    pub frames: Vec<(u64, Frame)>,
}

#[allow(dead_code)]
impl MockSerial {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            frames: Vec::new(),
        }
    }

    /// `(command, data)` pairs in send order.
    pub fn commands(&self) -> Vec<(Command, u16)> {
        self.frames
            .iter()
            .map(|(_, f)| (f.command(), f.data()))
            .collect()
    }

    /// Commands sent from index `from` onwards.
    pub fn commands_since(&self, from: usize) -> Vec<(Command, u16)> {
        self.commands().split_off(from)
    }
}

impl SerialPort for MockSerial {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        let frame = Frame::parse(bytes).expect("well-formed MP3 frame");
        self.frames.push((self.clock.now_ms(), frame));
        Ok(())
    }
}

// ── Button + light sensor ─────────────────────────────────────

#[derive(Default)]
pub struct Panel {
    /// Button held during `[start, end)` ms.
    pub held: Vec<(u64, u64)>,
    /// Light readings, consumed one per sample.  Empty repeats `idle_light`.
    pub light: VecDeque<f32>,
    pub idle_light: f32,
    pub light_reads: u32,
}

/// Input adapter backed by a [`Panel`] the test keeps a handle to.
pub struct MockInput {
    clock: SimClock,
    panel: Rc<RefCell<Panel>>,
}

#[allow(dead_code)]
impl MockInput {
    pub fn new(clock: &SimClock) -> (Self, Rc<RefCell<Panel>>) {
        let panel = Rc::new(RefCell::new(Panel {
            idle_light: 0.5,
            ..Panel::default()
        }));
        let input = Self {
            clock: clock.clone(),
            panel: panel.clone(),
        };
        (input, panel)
    }
}

impl InputPort for MockInput {
    fn button_pressed(&mut self) -> bool {
        let t = self.clock.now_ms();
        self.panel
            .borrow()
            .held
            .iter()
            .any(|&(s, e)| t >= s && t < e)
    }

    fn light_level(&mut self) -> f32 {
        let mut panel = self.panel.borrow_mut();
        panel.light_reads += 1;
        let idle = panel.idle_light;
        panel.light.pop_front().unwrap_or(idle)
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Booted service + handles ──────────────────────────────────

pub type App = AppService<MockActuators, MockInput, MockSerial, SimClock>;

pub struct Rig {
    pub app: App,
    pub panel: Rc<RefCell<Panel>>,
    pub clock: SimClock,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    /// Boot with `setup` applied to the panel before power-on.
    pub fn boot_with(
        config: SystemConfig,
        catalogue: Catalogue,
        setup: impl FnOnce(&mut Panel),
    ) -> Self {
        let clock = SimClock::new();
        let (input, panel) = MockInput::new(&clock);
        setup(&mut panel.borrow_mut());
        let mut sink = RecordingSink::default();
        let app = AppService::boot(
            config,
            catalogue,
            MockActuators::new(&clock),
            input,
            MockSerial::new(&clock),
            clock.clone(),
            &mut sink,
        )
        .expect("boot");
        Self {
            app,
            panel,
            clock,
            sink,
        }
    }

    /// Default config, shipped routines, button released at boot.
    pub fn button_mode() -> Self {
        Self::boot_with(SystemConfig::default(), Catalogue::authored(), |_| {})
    }

    /// Hold the button for `ms`, starting now.
    pub fn hold(&self, ms: u64) {
        let now = self.clock.now_ms();
        self.panel.borrow_mut().held.push((now, now + ms));
    }

    pub fn tick(&mut self) -> Option<TriggerEvent> {
        self.app.tick(&mut self.sink)
    }

    pub fn frames_so_far(&self) -> usize {
        self.app.serial().frames.len()
    }

    pub fn calls_so_far(&self) -> usize {
        self.app.actuators().calls.len()
    }
}
