//! Integration tests for boot, mode selection and the trigger loop.

use crate::mock_hw::{ActuatorCall, Rig};

use bigmouth::app::commands::AppCommand;
use bigmouth::app::events::AppEvent;
use bigmouth::audio::Command;
use bigmouth::choreography::Catalogue;
use bigmouth::config::SystemConfig;
use bigmouth::trigger::{TriggerEvent, TriggerMode, TriggerState};

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn button_boot_silences_rests_and_announces_track_one() {
    let rig = Rig::button_mode();

    assert_eq!(rig.app.mode(), TriggerMode::Button);
    assert_eq!(rig.app.current_track(), 1);
    assert_eq!(rig.app.actuators().history(), vec![ActuatorCall::RestAll]);
    assert_eq!(
        rig.app.serial().commands(),
        vec![
            (Command::Stop, 0),
            (Command::SetVolume, 10),
            (Command::RepeatPlay, 0),
            (Command::PlayFolderTrack, 0x0201),
        ]
    );
    assert_eq!(
        rig.sink.events,
        vec![
            AppEvent::TrackSelected {
                track: 1,
                title: Some("Warp Brothers - Phatt Bass"),
            },
            AppEvent::Started {
                mode: TriggerMode::Button,
                track: 1,
            },
        ]
    );
    // Four frames at 50 ms settle either side, then the post-announce pause.
    assert_eq!(rig.clock.now_ms(), 4 * 100 + 1_000);
}

#[test]
fn held_button_at_boot_selects_sensor_mode() {
    let rig = Rig::boot_with(SystemConfig::default(), Catalogue::authored(), |p| {
        p.held.push((0, 1_000));
        p.light.push_back(0.30);
    });

    assert_eq!(rig.app.mode(), TriggerMode::Sensor);
    assert_eq!(rig.app.current_track(), 1);
    assert_eq!(rig.app.poll_interval_ms(), 250);
    assert_eq!(
        rig.app.serial().commands(),
        vec![
            (Command::Stop, 0),
            (Command::SetVolume, 10),
            (Command::RepeatPlay, 0),
            (Command::PlayFolderTrack, 0x0263),
            (Command::SetVolume, 10),
            (Command::RepeatPlay, 0),
            (Command::PlayFolderTrack, 0x0201),
        ]
    );

    let panel = rig.panel.borrow();
    assert_eq!(panel.light_reads, 1, "exactly one baseline sample at boot");
    // Stop + sensor clip (400 ms), hold until 1000, settle 2000,
    // track announcement (300 ms), post-announce 1000.
    assert_eq!(rig.clock.now_ms(), 1_000 + 2_000 + 300 + 1_000);
}

#[test]
fn sensor_baseline_waits_for_release_and_settle() {
    let rig = Rig::boot_with(SystemConfig::default(), Catalogue::authored(), |p| {
        p.held.push((0, 5_000));
    });
    let sensor_clip_at = rig.app.serial().frames[3].0;
    let announce_at = rig.app.serial().frames[4].0;
    assert!(sensor_clip_at < 5_000);
    assert!(announce_at >= 5_000 + 2_000);
}

#[test]
fn boot_rejects_invalid_config() {
    let clock = crate::mock_hw::SimClock::new();
    let (input, _panel) = crate::mock_hw::MockInput::new(&clock);
    let mut sink = crate::mock_hw::RecordingSink::default();
    let config = SystemConfig {
        music_volume: 31,
        ..SystemConfig::default()
    };
    let booted = bigmouth::app::service::AppService::boot(
        config,
        Catalogue::authored(),
        crate::mock_hw::MockActuators::new(&clock),
        input,
        crate::mock_hw::MockSerial::new(&clock),
        clock.clone(),
        &mut sink,
    );
    assert!(booted.is_err());
    assert!(sink.events.is_empty());
    assert_eq!(clock.now_ms(), 0, "nothing is sent before validation");
}

// ── Button mode ───────────────────────────────────────────────

#[test]
fn idle_tick_only_waits_poll_interval() {
    let mut rig = Rig::button_mode();
    let t0 = rig.clock.now_ms();
    let frames = rig.frames_so_far();

    assert_eq!(rig.tick(), None);
    assert_eq!(rig.clock.now_ms() - t0, 50);
    assert_eq!(rig.frames_so_far(), frames);
    assert_eq!(rig.app.trigger_state(), TriggerState::Idle);
}

#[test]
fn hold_advances_and_announces_without_music() {
    let mut rig = Rig::button_mode();
    let frames = rig.frames_so_far();
    let calls = rig.calls_so_far();
    rig.hold(1_500);

    assert_eq!(rig.tick(), Some(TriggerEvent::AdvanceTrack(2)));
    assert_eq!(rig.app.current_track(), 2);
    assert_eq!(
        rig.app.serial().commands_since(frames),
        vec![
            (Command::SetVolume, 10),
            (Command::RepeatPlay, 0),
            (Command::PlayFolderTrack, 0x0202),
        ]
    );
    assert_eq!(rig.calls_so_far(), calls, "no motor moves on a hold");
    assert_eq!(
        rig.sink.events.last(),
        Some(&AppEvent::TrackSelected {
            track: 2,
            title: Some("Meghan Trainor - All About That Bass"),
        })
    );
    assert_eq!(rig.app.performances(), 0);
}

#[test]
fn holds_cycle_through_every_track_and_wrap() {
    let mut rig = Rig::button_mode();
    let max = rig.app.config().max_track;
    let mut seen = Vec::new();
    for _ in 0..max {
        rig.hold(600);
        if let Some(TriggerEvent::AdvanceTrack(t)) = rig.tick() {
            seen.push(t);
        }
    }
    assert_eq!(seen, vec![2, 3, 4, 5, 6, 7, 1]);
    assert_eq!(
        rig.app.serial().commands().last(),
        Some(&(Command::PlayFolderTrack, 0x0201))
    );
}

#[test]
fn tap_after_hold_plays_selected_track() {
    let mut rig = Rig::button_mode();
    rig.hold(700);
    rig.tick();
    rig.tick();
    rig.hold(700);
    rig.tick();
    assert_eq!(rig.app.current_track(), 3);

    let frames = rig.frames_so_far();
    rig.hold(100);
    assert_eq!(rig.tick(), Some(TriggerEvent::Play(3)));
    let sent = rig.app.serial().commands_since(frames);
    assert_eq!(sent[2], (Command::PlayFolderTrack, 0x0103));
}

// ── Sensor mode ───────────────────────────────────────────────

fn sensor_rig(readings: &[f32]) -> Rig {
    let readings = readings.to_vec();
    Rig::boot_with(SystemConfig::default(), Catalogue::authored(), move |p| {
        p.held.push((0, 500));
        p.light.extend(readings);
    })
}

#[test]
fn light_jump_triggers_fixed_track() {
    let mut rig = sensor_rig(&[0.30, 0.31, 0.60]);
    let t0 = rig.clock.now_ms();

    assert_eq!(rig.tick(), None);
    assert_eq!(rig.clock.now_ms() - t0, 250);
    assert_eq!(rig.tick(), Some(TriggerEvent::Play(1)));
    assert_eq!(rig.app.performances(), 1);
}

#[test]
fn slow_drift_never_triggers() {
    let drift: Vec<f32> = (0..40).map(|i| 0.20 + i as f32 * 0.01).collect();
    let mut rig = sensor_rig(&drift);
    for _ in 1..drift.len() {
        assert_eq!(rig.tick(), None);
    }
}

#[test]
fn darkening_triggers_too() {
    let mut rig = sensor_rig(&[0.70, 0.60]);
    assert_eq!(rig.tick(), Some(TriggerEvent::Play(1)));
}

#[test]
fn level_after_performance_is_the_new_baseline() {
    let mut rig = sensor_rig(&[0.30, 0.80, 0.80, 0.81]);
    assert_eq!(rig.tick(), Some(TriggerEvent::Play(1)));
    assert_eq!(rig.tick(), None);
    assert_eq!(rig.tick(), None);
}

#[test]
fn sensor_mode_ignores_button() {
    let mut rig = sensor_rig(&[0.5]);
    let frames = rig.frames_so_far();
    rig.hold(3_000);
    assert_eq!(rig.tick(), None);
    assert_eq!(rig.frames_so_far(), frames);
    assert_eq!(rig.app.current_track(), 1);
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn stop_command_silences_and_rests() {
    let mut rig = Rig::button_mode();
    let frames = rig.frames_so_far();
    rig.app.handle_command(AppCommand::Stop, &mut rig.sink);
    assert_eq!(
        rig.app.serial().commands_since(frames),
        vec![(Command::Stop, 0)]
    );
    assert_eq!(
        rig.app.actuators().history().last(),
        Some(&ActuatorCall::RestAll)
    );
}

#[test]
fn advance_command_matches_a_hold() {
    let mut rig = Rig::button_mode();
    rig.app.handle_command(AppCommand::AdvanceTrack, &mut rig.sink);
    assert_eq!(rig.app.current_track(), 2);
    assert_eq!(
        rig.app.serial().commands().last(),
        Some(&(Command::PlayFolderTrack, 0x0202))
    );
}

#[test]
fn advance_command_ignored_in_sensor_mode() {
    let mut rig = sensor_rig(&[]);
    let frames = rig.frames_so_far();
    rig.app.handle_command(AppCommand::AdvanceTrack, &mut rig.sink);
    assert_eq!(rig.app.current_track(), 1);
    assert_eq!(rig.frames_so_far(), frames);
}

#[test]
fn play_command_performs_directly() {
    let mut rig = Rig::button_mode();
    rig.app.handle_command(AppCommand::Play(4), &mut rig.sink);
    assert_eq!(rig.app.performances(), 1);
    assert!(rig
        .app
        .serial()
        .commands()
        .contains(&(Command::PlayFolderTrack, 0x0104)));
    assert_eq!(rig.app.current_track(), 1, "selection is untouched");
}
