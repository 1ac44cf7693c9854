use airfret::engine::InteractionEngine;
use airfret::io::{RecordingSink, SinkCommand};
use airfret::layout::{LayoutSettings, ZoneLayout};
use airfret::tracking::{Finger, FingerId, FingerState, Hand, HandId};

fn pentatonic_layout() -> ZoneLayout {
    let settings = LayoutSettings {
        width: 1000.0,
        height: 400.0,
        padding: 20.0,
        active_scale: Some("Major Pentatonic".to_string()),
        ..LayoutSettings::default()
    };
    ZoneLayout::new(settings)
}

fn hand(id: HandId, finger: Finger, x: i32, y: i32) -> Hand {
    Hand::new(id)
        .with_finger(finger, FingerState::Extended)
        .with_landmark(finger.tip_landmark(), x, y, 0.0)
}

#[test]
fn full_performance_arc() {
    // Two pentatonic rows of five 192x180 zones; zone centers sit at
    // x = 116 + 192 * column, y = 110 for the top row.
    let mut layout = pentatonic_layout();
    assert_eq!(layout.len(), 10);
    assert_eq!(layout.zones()[0].note(), 60);
    assert_eq!(layout.zones()[1].note(), 62);

    let mut engine = InteractionEngine::new();
    let mut sink = RecordingSink::new();
    let finger = FingerId::new(HandId::Right, Finger::Index);

    // Claim the C4 zone dead center.
    let frame = vec![hand(HandId::Right, Finger::Index, 116, 110)];
    engine.process_frame(&frame, layout.zones_mut(), &mut sink);

    // Hold: modulation only, no retrigger.
    engine.process_frame(&frame, layout.zones_mut(), &mut sink);

    // Slide into the D4 zone: off then on within one frame.
    let slid = vec![hand(HandId::Right, Finger::Index, 308, 110)];
    engine.process_frame(&slid, layout.zones_mut(), &mut sink);

    // Hands gone: everything released.
    engine.process_frame(&[], layout.zones_mut(), &mut sink);

    assert_eq!(
        sink.commands,
        vec![
            SinkCommand::NoteOn { note: 60, velocity: 64, finger },
            SinkCommand::PitchBend { value: 0, finger },
            SinkCommand::Intensity { value: 64, finger, note: 60 },
            SinkCommand::NoteOff { note: 60, finger },
            SinkCommand::NoteOn { note: 62, velocity: 64, finger },
            SinkCommand::NoteOff { note: 62, finger },
        ]
    );
    assert_eq!(engine.active_notes(), 0);
    assert!(layout.zones().iter().all(|z| z.is_free()));
}

#[test]
fn held_note_tracks_vertical_motion() {
    let mut layout = pentatonic_layout();
    let mut engine = InteractionEngine::new();
    let mut sink = RecordingSink::new();

    // Enter near the top of the zone: soft.
    let top = vec![hand(HandId::Left, Finger::Index, 116, 40)];
    engine.process_frame(&top, layout.zones_mut(), &mut sink);
    let finger = FingerId::new(HandId::Left, Finger::Index);
    assert_eq!(
        sink.commands,
        vec![SinkCommand::NoteOn { note: 60, velocity: 14, finger }]
    );
    sink.clear();

    // Press down toward the bottom edge: intensity rises, note holds.
    let low = vec![hand(HandId::Left, Finger::Index, 116, 190)];
    engine.process_frame(&low, layout.zones_mut(), &mut sink);
    assert_eq!(sink.note_ons(), 0);
    assert!(sink
        .commands
        .contains(&SinkCommand::Intensity { value: 120, finger, note: 60 }));
    assert_eq!(engine.active_notes(), 1);
}

#[test]
fn channel_pool_round_trip_under_pressure() {
    let mut layout = pentatonic_layout();
    let mut engine = InteractionEngine::new().with_channel_range(2..=3);
    let mut sink = RecordingSink::new();

    // Three fingers land in three zones; only two channels exist.
    let crowded = vec![Hand::new(HandId::Right)
        .with_finger(Finger::Thumb, FingerState::Extended)
        .with_finger(Finger::Index, FingerState::Extended)
        .with_finger(Finger::Middle, FingerState::Extended)
        .with_landmark(Finger::Thumb.tip_landmark(), 116, 110, 0.0)
        .with_landmark(Finger::Index.tip_landmark(), 308, 110, 0.0)
        .with_landmark(Finger::Middle.tip_landmark(), 500, 110, 0.0)];
    engine.process_frame(&crowded, layout.zones_mut(), &mut sink);

    assert_eq!(sink.note_ons(), 2);
    assert_eq!(engine.active_notes(), 2);
    assert_eq!(engine.channels().available(), 0);
    // The dropped finger's zone stays free for later claims.
    assert!(layout.zones()[2].is_free());
    sink.clear();

    // Everything lifts, then one finger returns: a channel is free again.
    engine.process_frame(&[], layout.zones_mut(), &mut sink);
    assert_eq!(sink.note_offs(), 2);

    let back = vec![hand(HandId::Right, Finger::Middle, 500, 110)];
    engine.process_frame(&back, layout.zones_mut(), &mut sink);
    let middle = FingerId::new(HandId::Right, Finger::Middle);
    assert_eq!(engine.binding_for(middle).unwrap().channel, 2);
}

#[test]
fn scale_change_rebuilds_zones_after_release() {
    let mut layout = pentatonic_layout();
    let mut engine = InteractionEngine::new();
    let mut sink = RecordingSink::new();

    let frame = vec![hand(HandId::Right, Finger::Index, 116, 110)];
    engine.process_frame(&frame, layout.zones_mut(), &mut sink);
    assert_eq!(engine.active_notes(), 1);

    // Claims index into the zone list, so release before regenerating.
    engine.release_all(layout.zones_mut(), &mut sink);
    layout.set_scale(None);

    // Chromatic over two octaves from C4: 24 zones, all free.
    assert_eq!(layout.len(), 24);
    assert!(layout.zones().iter().all(|z| z.is_free()));

    engine.process_frame(&frame, layout.zones_mut(), &mut sink);
    assert_eq!(engine.active_notes(), 1);
}

#[cfg(feature = "rtrb")]
#[test]
fn queued_commands_replay_in_order() {
    use airfret::io::queue::{command_queue, drain_into};

    let mut layout = pentatonic_layout();
    let mut engine = InteractionEngine::new();
    let (mut queued, mut rx) = command_queue(64);

    let frame = vec![hand(HandId::Right, Finger::Index, 116, 110)];
    engine.process_frame(&frame, layout.zones_mut(), &mut queued);
    engine.process_frame(&[], layout.zones_mut(), &mut queued);

    let mut replayed = RecordingSink::new();
    let applied = drain_into(&mut rx, &mut replayed);
    assert_eq!(applied, 2);

    let finger = FingerId::new(HandId::Right, Finger::Index);
    assert_eq!(
        replayed.commands,
        vec![
            SinkCommand::NoteOn { note: 60, velocity: 64, finger },
            SinkCommand::NoteOff { note: 60, finger },
        ]
    );
}
