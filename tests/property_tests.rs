//! Property tests for the shot event state machine.
//!
//! Random signal streams with random frame gaps must never break the
//! tracker's structural invariants.

use proptest::prelude::*;

use shot_tracker_rs::{
    ShotEvent, ShotEventRecord, ShotEventTracker, ShotState, ShotTrackerConfig, ShotType,
};

fn config_strategy() -> impl Strategy<Value = ShotTrackerConfig> {
    (1i64..40, 1i64..20, 0i64..30).prop_map(|(reset, min_between, cooldown)| {
        ShotTrackerConfig::new(reset, min_between, cooldown)
    })
}

/// (frame gap, jump, layup, ball). Gaps of zero repeat a frame index.
fn stream_strategy() -> impl Strategy<Value = Vec<(i64, bool, bool, bool)>> {
    prop::collection::vec((0i64..3, any::<bool>(), any::<bool>(), any::<bool>()), 0..300)
}

fn assert_state_consistent(tracker: &ShotEventTracker) {
    let config = tracker.config();
    match tracker.state() {
        ShotState::Idle => {
            assert!(!tracker.is_shot_in_progress());
            assert_eq!(tracker.shot_type(), ShotType::None);
            assert_eq!(tracker.shot_start_frame(), None);
            assert_eq!(tracker.shot_deadline_frame(), None);
            assert_eq!(tracker.frames_since_start(), 0);
        }
        ShotState::InProgress => {
            assert!(tracker.is_shot_in_progress());
            assert_ne!(tracker.shot_type(), ShotType::None);
            let start = tracker.shot_start_frame().expect("start frame set");
            assert_eq!(tracker.shot_deadline_frame(), Some(start + config.reset_time_frames));
            assert!(tracker.frames_since_start() >= 1);
        }
    }
}

proptest! {
    #[test]
    fn prop_state_and_record_invariants(config in config_strategy(), stream in stream_strategy()) {
        let mut tracker = ShotEventTracker::new(config).unwrap();
        let mut frame = 0i64;
        let mut all: Vec<ShotEventRecord> = Vec::new();
        let mut last_made: Option<i64> = None;

        for (gap, jump, layup, ball) in stream {
            frame += gap;
            let events = tracker.update(frame, jump, layup, ball).unwrap();

            prop_assert!(events.len() <= 2);
            for record in &events {
                prop_assert_eq!(record.frame, frame);
                prop_assert_ne!(record.shot_type, ShotType::None);
            }
            if events.len() == 2 {
                prop_assert_eq!(events[0].event, ShotEvent::Missed);
                prop_assert_eq!(events[1].event, ShotEvent::Start);
            }
            // A shot cannot be made on the frame it starts.
            prop_assert!(!(events.iter().any(|r| r.event == ShotEvent::Start)
                && events.iter().any(|r| r.event == ShotEvent::Made)));

            if let Some(made) = tracker.last_made_frame() {
                prop_assert!(last_made.map_or(true, |prev| made >= prev));
            }
            last_made = tracker.last_made_frame();

            assert_state_consistent(&tracker);
            all.extend(events);
        }

        // Records alternate START, terminal, START, terminal, ...
        for (i, record) in all.iter().enumerate() {
            prop_assert_eq!(record.event == ShotEvent::Start, i % 2 == 0);
        }
        // A terminal record carries the type of the START before it.
        for pair in all.chunks(2) {
            if pair.len() == 2 {
                prop_assert_eq!(pair[0].shot_type, pair[1].shot_type);
                prop_assert!(pair[1].frame >= pair[0].frame);
            }
        }
        // The in-progress flag matches an odd number of records.
        prop_assert_eq!(tracker.is_shot_in_progress(), all.len() % 2 == 1);
    }

    #[test]
    fn prop_starts_respect_cooldown(config in config_strategy(), stream in stream_strategy()) {
        let mut tracker = ShotEventTracker::new(config).unwrap();
        let mut frame = 0i64;
        let mut last_made: Option<i64> = None;

        for (gap, jump, layup, ball) in stream {
            frame += gap;
            for record in tracker.update(frame, jump, layup, ball).unwrap() {
                match record.event {
                    ShotEvent::Start => {
                        if let Some(made) = last_made {
                            prop_assert!(record.frame - made >= config.cooldown_frames_after_made);
                        }
                    }
                    ShotEvent::Made => last_made = Some(record.frame),
                    ShotEvent::Missed => {}
                }
            }
        }
    }

    #[test]
    fn prop_all_false_stream_is_silent(config in config_strategy(), gaps in prop::collection::vec(0i64..5, 0..100)) {
        let mut tracker = ShotEventTracker::new(config).unwrap();
        let mut frame = 0i64;
        for gap in gaps {
            frame += gap;
            prop_assert!(tracker.update(frame, false, false, false).unwrap().is_empty());
            prop_assert_eq!(tracker.consecutive_jump_shot_frames(), 0);
            prop_assert_eq!(tracker.consecutive_layup_frames(), 0);
            prop_assert_eq!(tracker.consecutive_ball_in_basket_frames(), 0);
        }
        prop_assert_eq!(tracker.state(), ShotState::Idle);
    }

    #[test]
    fn prop_flush_always_leaves_idle(config in config_strategy(), stream in stream_strategy()) {
        let mut tracker = ShotEventTracker::new(config).unwrap();
        let mut frame = 0i64;
        for (gap, jump, layup, ball) in stream {
            frame += gap;
            tracker.update(frame, jump, layup, ball).unwrap();
        }

        let was_in_progress = tracker.is_shot_in_progress();
        let flushed = tracker.flush(frame).unwrap();
        prop_assert_eq!(flushed.is_some(), was_in_progress);
        if let Some(record) = flushed {
            prop_assert_eq!(record.event, ShotEvent::Missed);
        }
        prop_assert_eq!(tracker.state(), ShotState::Idle);
    }
}
