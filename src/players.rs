//! One shot tracker per tracked player.
//!
//! The shot state machine follows a single entity. Scenes with several
//! players keep an independent [`ShotEventTracker`] per tracker id, as
//! assigned by an upstream multi-object tracker.
//!
//! Drive it with [`PlayerShotTrackers::update_frame`] once per video frame.
//! Every known player advances on every frame, so a player the detector
//! missed sees an all-false frame and a shot in progress still reaches its
//! deadline.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::shot::{FrameSignals, ShotEventRecord};
use crate::tracker::{ShotEventTracker, ShotTrackerConfig};
use crate::{Error, Result};

/// A record attributed to the player whose tracker emitted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerShotEvent {
    pub player_id: i64,
    #[serde(flatten)]
    pub record: ShotEventRecord,
}

/// Shot trackers keyed by player id, created on first sight.
#[derive(Debug, Clone)]
pub struct PlayerShotTrackers {
    config: ShotTrackerConfig,
    trackers: HashMap<i64, ShotEventTracker>,
}

impl PlayerShotTrackers {
    /// Create an empty set of trackers sharing `config`.
    ///
    /// The configuration is validated once here, so creating a tracker for a
    /// new player later cannot fail.
    pub fn new(config: ShotTrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            trackers: HashMap::new(),
        })
    }

    /// Advance every player by one video frame.
    ///
    /// # Arguments
    /// * `frame_index` - Index of the current frame
    /// * `signals` - Signals for the players seen on this frame, keyed by player id
    ///
    /// Known players missing from `signals` are fed
    /// [`FrameSignals::idle`]. Players seen for the first time get a new
    /// tracker. Players are processed in ascending id order.
    ///
    /// # Returns
    /// Every record emitted on this frame, tagged with its player id.
    pub fn update_frame(
        &mut self,
        frame_index: i64,
        signals: &HashMap<i64, FrameSignals>,
    ) -> Result<Vec<PlayerShotEvent>> {
        if let Some((player_id, s)) = signals.iter().find(|(_, s)| s.frame_index != frame_index) {
            return Err(Error::InvalidValue(format!(
                "signals for player {} are for frame {}, expected {}",
                player_id, s.frame_index, frame_index
            )));
        }

        let ids: BTreeSet<i64> = self
            .trackers
            .keys()
            .chain(signals.keys())
            .copied()
            .collect();

        let mut events = Vec::new();
        for player_id in ids {
            let frame = signals
                .get(&player_id)
                .copied()
                .unwrap_or_else(|| FrameSignals::idle(frame_index));
            events.extend(self.update(player_id, &frame)?);
        }
        Ok(events)
    }

    /// Feed one frame of signals for a single player.
    ///
    /// Only that player's tracker advances. Prefer
    /// [`update_frame`](Self::update_frame) for live streams; calling this for
    /// a subset of players lets the others fall behind.
    ///
    /// # Arguments
    /// * `player_id` - Upstream tracker id of the player
    /// * `signals` - Detector signals for this player on this frame
    ///
    /// # Returns
    /// The records emitted by this player's tracker, tagged with `player_id`.
    pub fn update(&mut self, player_id: i64, signals: &FrameSignals) -> Result<Vec<PlayerShotEvent>> {
        let tracker = match self.trackers.entry(player_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!(player_id, "tracking shots for new player");
                entry.insert(ShotEventTracker::new(self.config)?)
            }
        };

        let records = tracker.update_signals(signals)?;
        Ok(records
            .into_iter()
            .map(|record| PlayerShotEvent { player_id, record })
            .collect())
    }

    /// Flush every tracker at `frame_index`, in ascending player id order.
    pub fn flush_all(&mut self, frame_index: i64) -> Result<Vec<PlayerShotEvent>> {
        let mut ids: Vec<i64> = self.trackers.keys().copied().collect();
        ids.sort_unstable();

        let mut events = Vec::new();
        for player_id in ids {
            if let Some(tracker) = self.trackers.get_mut(&player_id) {
                if let Some(record) = tracker.flush(frame_index)? {
                    events.push(PlayerShotEvent { player_id, record });
                }
            }
        }
        Ok(events)
    }

    /// Stop tracking a player, e.g. when its track is lost for good.
    ///
    /// Any shot in progress is dropped unresolved; flush the returned
    /// tracker first if a terminal record is wanted.
    pub fn remove(&mut self, player_id: i64) -> Option<ShotEventTracker> {
        self.trackers.remove(&player_id)
    }

    pub fn get(&self, player_id: i64) -> Option<&ShotEventTracker> {
        self.trackers.get(&player_id)
    }

    /// Ids of every tracked player, ascending.
    pub fn player_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.trackers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn config(&self) -> &ShotTrackerConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShotType;

    fn jump(frame: i64) -> FrameSignals {
        FrameSignals::new(frame, true, false, false)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = PlayerShotTrackers::new(ShotTrackerConfig::new(0, 5, 0));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_players_are_independent() {
        let mut players = PlayerShotTrackers::new(ShotTrackerConfig::new(10, 5, 8)).unwrap();

        for frame in 0..3 {
            let a = players.update(1, &jump(frame)).unwrap();
            let b = players.update(2, &FrameSignals::idle(frame)).unwrap();
            assert!(b.is_empty());
            if frame == 2 {
                assert_eq!(
                    a,
                    vec![PlayerShotEvent {
                        player_id: 1,
                        record: ShotEventRecord::start(2, ShotType::Jump)
                    }]
                );
            }
        }

        assert_eq!(players.len(), 2);
        assert!(players.get(1).unwrap().is_shot_in_progress());
        assert!(!players.get(2).unwrap().is_shot_in_progress());
    }

    fn frame_of(entries: &[(i64, FrameSignals)]) -> HashMap<i64, FrameSignals> {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_absent_player_shot_times_out_on_time() {
        let mut players = PlayerShotTrackers::new(ShotTrackerConfig::new(10, 5, 8)).unwrap();

        let mut events = Vec::new();
        for frame in 0..3 {
            events.extend(players.update_frame(frame, &frame_of(&[(7, jump(frame))])).unwrap());
        }
        assert_eq!(
            events,
            vec![PlayerShotEvent {
                player_id: 7,
                record: ShotEventRecord::start(2, ShotType::Jump)
            }]
        );

        // Player 7 drops out of the detections; only player 8 is reported.
        for frame in 3..100 {
            let emitted = players
                .update_frame(frame, &frame_of(&[(8, FrameSignals::idle(frame))]))
                .unwrap();
            if frame == 12 {
                assert_eq!(
                    emitted,
                    vec![PlayerShotEvent {
                        player_id: 7,
                        record: ShotEventRecord::missed(12, ShotType::Jump)
                    }]
                );
            } else {
                assert!(emitted.is_empty(), "unexpected events at frame {frame}: {emitted:?}");
            }
        }
        assert!(!players.get(7).unwrap().is_shot_in_progress());
        assert_eq!(players.get(7).unwrap().last_frame_index(), Some(99));
    }

    #[test]
    fn test_absent_frames_break_consecutive_runs() {
        let mut players = PlayerShotTrackers::new(ShotTrackerConfig::new(10, 5, 8)).unwrap();

        players.update_frame(0, &frame_of(&[(7, jump(0))])).unwrap();
        players.update_frame(1, &frame_of(&[(7, jump(1))])).unwrap();
        for frame in 2..50 {
            players
                .update_frame(frame, &frame_of(&[(8, FrameSignals::idle(frame))]))
                .unwrap();
        }
        assert_eq!(players.get(7).unwrap().consecutive_jump_shot_frames(), 0);

        let events = players.update_frame(50, &frame_of(&[(7, jump(50))])).unwrap();
        assert!(events.is_empty());
        assert!(!players.get(7).unwrap().is_shot_in_progress());
    }

    #[test]
    fn test_update_frame_orders_by_player_id() {
        let mut players = PlayerShotTrackers::new(ShotTrackerConfig::new(10, 5, 8)).unwrap();
        for frame in 0..2 {
            players
                .update_frame(frame, &frame_of(&[(9, jump(frame)), (2, jump(frame))]))
                .unwrap();
        }
        let last = players
            .update_frame(2, &frame_of(&[(9, jump(2)), (2, jump(2))]))
            .unwrap();
        let ids: Vec<i64> = last.iter().map(|e| e.player_id).collect();
        assert_eq!(ids, vec![2, 9]);
    }

    #[test]
    fn test_update_frame_rejects_mismatched_frame() {
        let mut players = PlayerShotTrackers::new(ShotTrackerConfig::default()).unwrap();
        let result = players.update_frame(5, &frame_of(&[(1, FrameSignals::idle(4))]));
        assert!(matches!(result, Err(Error::InvalidValue(_))));
        assert!(players.is_empty());
    }

    #[test]
    fn test_flush_all_in_id_order() {
        let mut players = PlayerShotTrackers::new(ShotTrackerConfig::new(30, 5, 8)).unwrap();
        for id in [9, 3, 5] {
            for frame in 0..3 {
                players.update(id, &jump(frame)).unwrap();
            }
        }
        players.update(5, &FrameSignals::new(3, false, false, true)).unwrap();
        players.update(5, &FrameSignals::new(4, false, false, true)).unwrap();

        let flushed = players.flush_all(10).unwrap();
        let ids: Vec<i64> = flushed.iter().map(|e| e.player_id).collect();
        assert_eq!(ids, vec![3, 9]);
        assert!(flushed
            .iter()
            .all(|e| e.record == ShotEventRecord::missed(10, ShotType::Jump)));
        assert_eq!(players.player_ids(), vec![3, 5, 9]);
    }

    #[test]
    fn test_remove_player() {
        let mut players = PlayerShotTrackers::new(ShotTrackerConfig::default()).unwrap();
        players.update(4, &FrameSignals::idle(0)).unwrap();
        assert!(players.remove(4).is_some());
        assert!(players.remove(4).is_none());
        assert!(players.is_empty());
    }

    #[test]
    fn test_player_event_serializes_flat() {
        let event = PlayerShotEvent {
            player_id: 7,
            record: ShotEventRecord::made(12, ShotType::Layup),
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"player_id": 7, "event": "MADE", "frame": 12, "type": "LAYUP"})
        );
    }
}
