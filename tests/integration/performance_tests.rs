//! Integration tests for the play → choreograph → stop cycle.

use crate::mock_hw::{ActuatorCall, Rig};

use bigmouth::actuators::{LimbState, MouthState};
use bigmouth::app::events::AppEvent;
use bigmouth::audio::Command;
use bigmouth::choreography::{Catalogue, RunReport, Script, Step};
use bigmouth::config::SystemConfig;
use bigmouth::trigger::{TriggerEvent, TriggerState};

fn finished(rig: &Rig) -> Vec<(u8, RunReport)> {
    rig.sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::PerformanceFinished { track, report } => Some((*track, *report)),
            _ => None,
        })
        .collect()
}

#[test]
fn tap_plays_music_runs_script_then_stops() {
    let mut rig = Rig::button_mode();
    let frames = rig.frames_so_far();
    let calls = rig.calls_so_far();
    rig.hold(100);

    assert_eq!(rig.tick(), Some(TriggerEvent::Play(1)));
    assert_eq!(
        rig.app.serial().commands_since(frames),
        vec![
            (Command::SetVolume, 30),
            (Command::RepeatPlay, 0),
            (Command::PlayFolderTrack, 0x0101),
            (Command::Stop, 0),
        ]
    );

    let moves = &rig.app.actuators().calls[calls..];
    assert!(moves.len() > 2);
    assert_eq!(moves.last().map(|&(_, c)| c), Some(ActuatorCall::RestAll));
    assert_eq!(rig.app.trigger_state(), TriggerState::Idle);
    assert_eq!(rig.app.performances(), 1);
}

#[test]
fn script_runs_between_play_and_stop() {
    let mut rig = Rig::button_mode();
    let frames = rig.frames_so_far();
    let calls = rig.calls_so_far();
    rig.hold(100);
    rig.tick();

    let sent = &rig.app.serial().frames[frames..];
    let play_at = sent[2].0;
    let stop_at = sent[3].0;
    let (_, report) = finished(&rig)[0];

    let script = rig.app.catalogue().script(1).unwrap();
    let lead_in = match script.steps().first() {
        Some(Step::Wait(ms)) => u64::from(*ms),
        _ => 0,
    };

    let first_move_at = rig.app.actuators().calls[calls].0;
    assert_eq!(first_move_at, play_at + 50 + lead_in, "script starts after the settle gap");
    assert_eq!(stop_at, play_at + 50 + report.scheduled_ms + 50);
    assert_eq!(report.scheduled_ms, script.nominal_duration_ms());
}

#[test]
fn events_bracket_the_performance() {
    let mut rig = Rig::button_mode();
    let before = rig.sink.events.len();
    rig.hold(100);
    rig.tick();

    let events = &rig.sink.events[before..];
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], AppEvent::PerformanceStarted { track: 1 });
    assert!(matches!(
        events[1],
        AppEvent::PerformanceFinished { track: 1, report } if report.steps_executed > 0
    ));
}

#[test]
fn missing_script_still_plays_audio() {
    let mut rig = Rig::boot_with(SystemConfig::default(), Catalogue::new(), |_| {});
    let frames = rig.frames_so_far();
    let calls = rig.calls_so_far();
    rig.hold(100);

    assert_eq!(rig.tick(), Some(TriggerEvent::Play(1)));
    assert!(rig.sink.events.contains(&AppEvent::ScriptMissing { track: 1 }));
    assert_eq!(
        rig.app.serial().commands_since(frames),
        vec![
            (Command::SetVolume, 30),
            (Command::RepeatPlay, 0),
            (Command::PlayFolderTrack, 0x0101),
            (Command::Stop, 0),
        ]
    );
    let after: Vec<_> = rig.app.actuators().history().split_off(calls);
    assert_eq!(after, vec![ActuatorCall::RestAll]);
    assert_eq!(finished(&rig), vec![(1, RunReport::default())]);
}

#[test]
fn stub_track_plays_with_motors_still() {
    let config = SystemConfig {
        autoplay_track: Some(5),
        ..SystemConfig::default()
    };
    let mut rig = Rig::boot_with(config, Catalogue::authored(), |_| {});
    let calls = rig.calls_so_far();

    assert_eq!(rig.tick(), Some(TriggerEvent::Play(5)));
    assert!(!rig
        .sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::ScriptMissing { .. })));
    assert!(rig
        .app
        .serial()
        .commands()
        .contains(&(Command::PlayFolderTrack, 0x0105)));
    assert_eq!(rig.app.actuators().moves(), 0);
    assert_eq!(rig.calls_so_far(), calls + 1);
}

#[test]
fn autoplay_repeats_and_ignores_inputs() {
    let config = SystemConfig {
        autoplay_track: Some(3),
        ..SystemConfig::default()
    };
    let mut rig = Rig::boot_with(config, Catalogue::authored(), |_| {});
    rig.hold(60_000);

    assert_eq!(rig.tick(), Some(TriggerEvent::Play(3)));
    assert_eq!(rig.tick(), Some(TriggerEvent::Play(3)));
    assert_eq!(rig.app.current_track(), 1);
    assert_eq!(
        finished(&rig).iter().map(|&(t, _)| t).collect::<Vec<_>>(),
        vec![3, 3]
    );
}

#[test]
fn custom_catalogue_drives_exact_motor_sequence() {
    let mut catalogue = Catalogue::new();
    catalogue.insert(
        1,
        "Test Tone",
        Script::builder()
            .head_out()
            .mouth_open_for(200)
            .limb_rest()
            .flap_tail_for(400, 100)
            .build(),
    );
    let mut rig = Rig::boot_with(SystemConfig::default(), catalogue, |_| {});
    let calls = rig.calls_so_far();
    rig.hold(100);
    rig.tick();

    let after = rig.app.actuators().history().split_off(calls);
    assert_eq!(
        after,
        vec![
            ActuatorCall::Limb(LimbState::HeadOut),
            ActuatorCall::Mouth(MouthState::Open),
            ActuatorCall::Mouth(MouthState::Closed),
            ActuatorCall::Limb(LimbState::Neutral),
            // 400 / 100 / 2 = 2 cycles
            ActuatorCall::Limb(LimbState::TailOut),
            ActuatorCall::Limb(LimbState::Neutral),
            ActuatorCall::Limb(LimbState::TailOut),
            ActuatorCall::Limb(LimbState::Neutral),
            ActuatorCall::RestAll,
        ]
    );
    let (_, report) = finished(&rig)[0];
    assert_eq!(report.scheduled_ms, 200 + 4 * 100);
}
