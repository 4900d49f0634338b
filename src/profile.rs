use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::content::MoodId;
use crate::error::Result;
use crate::reading::Reading;

pub const STARTING_COINS: u64 = 100;
pub const READING_REWARD: u64 = 10;

/// The single durable record. Created with defaults on first load,
/// mutated in place, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub coins: u64,
    pub streak_days: u32,
    pub selected_mood: Option<MoodId>,
    pub readings: Vec<Reading>,
    pub last_check_in: NaiveDate,
    #[serde(default)]
    pub onboarded: bool,
}

impl UserProfile {
    pub fn fresh(today: NaiveDate) -> Self {
        UserProfile {
            coins: STARTING_COINS,
            streak_days: 1,
            selected_mood: None,
            readings: Vec::new(),
            last_check_in: today,
            onboarded: false,
        }
    }
}

/// What a daily check-in did to the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// Already checked in today.
    Unchanged,
    /// Exactly one calendar day since the last check-in.
    Continued { streak_days: u32 },
    /// Two or more days missed.
    Reset,
}

#[derive(Debug)]
pub struct ProfileStore {
    config: Config,
    pub profile: UserProfile,
}

impl ProfileStore {
    /// Load the stored profile, substituting defaults when the file is
    /// missing or corrupt. Storage trouble is logged, never surfaced.
    pub fn load(config: Config, today: NaiveDate) -> Self {
        let profile = match std::fs::read_to_string(config.profile_file()) {
            Ok(content) => match serde_json::from_str::<UserProfile>(&content) {
                Ok(profile) => profile,
                Err(e) => {
                    eprintln!("Stored profile unreadable, starting fresh: {}", e);
                    UserProfile::fresh(today)
                }
            },
            Err(_) => UserProfile::fresh(today),
        };

        ProfileStore { config, profile }
    }

    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.profile)?;
        std::fs::write(self.config.profile_file(), content)?;
        Ok(())
    }

    /// Best-effort save. A failed write degrades to "not persisted".
    pub fn persist(&self) {
        if let Err(e) = self.save() {
            eprintln!("Failed to save profile: {}", e);
        }
    }

    /// Calendar-day streak logic. One day since the last check-in
    /// continues the streak, more than one resets it, the same day is
    /// a no-op. Day boundaries, not elapsed hours.
    pub fn check_in(&mut self, today: NaiveDate) -> CheckInOutcome {
        let days_since = (today - self.profile.last_check_in).num_days();
        let outcome = match days_since {
            d if d <= 0 => return CheckInOutcome::Unchanged,
            1 => {
                self.profile.streak_days += 1;
                CheckInOutcome::Continued {
                    streak_days: self.profile.streak_days,
                }
            }
            _ => {
                self.profile.streak_days = 1;
                CheckInOutcome::Reset
            }
        };
        self.profile.last_check_in = today;
        self.persist();
        outcome
    }

    pub fn select_mood(&mut self, mood: MoodId) {
        self.profile.selected_mood = Some(mood);
        self.persist();
    }

    pub fn mark_onboarded(&mut self) {
        self.profile.onboarded = true;
        self.persist();
    }

    /// Append a completed reading and award its coins.
    pub fn record_reading(&mut self, reading: Reading) {
        self.profile.coins += READING_REWARD;
        self.profile.readings.push(reading);
        self.persist();
    }

    /// The most recent readings, oldest first, for the altar grimoire.
    pub fn recent_readings(&self, count: usize) -> &[Reading] {
        let len = self.profile.readings.len();
        &self.profile.readings[len.saturating_sub(count)..]
    }

    pub fn last_reading(&self) -> Option<&Reading> {
        self.profile.readings.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::reading::generate_reading;

    fn store() -> (tempfile::TempDir, ProfileStore) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        let store = ProfileStore::load(config, date(2026, 8, 26));
        (dir, store)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fresh_profile_defaults() {
        let (_dir, store) = store();
        assert_eq!(store.profile.coins, 100);
        assert_eq!(store.profile.streak_days, 1);
        assert_eq!(store.profile.selected_mood, None);
        assert!(store.profile.readings.is_empty());
    }

    #[test]
    fn test_check_in_same_day_is_unchanged() {
        let (_dir, mut store) = store();
        assert_eq!(store.check_in(date(2026, 8, 26)), CheckInOutcome::Unchanged);
        assert_eq!(store.profile.streak_days, 1);
    }

    #[test]
    fn test_check_in_next_day_continues_streak() {
        let (_dir, mut store) = store();
        assert_eq!(
            store.check_in(date(2026, 8, 27)),
            CheckInOutcome::Continued { streak_days: 2 }
        );
        assert_eq!(store.profile.last_check_in, date(2026, 8, 27));
    }

    #[test]
    fn test_check_in_after_gap_resets_streak() {
        let (_dir, mut store) = store();
        store.check_in(date(2026, 8, 27));
        store.check_in(date(2026, 8, 28));
        assert_eq!(store.profile.streak_days, 3);

        assert_eq!(store.check_in(date(2026, 8, 30)), CheckInOutcome::Reset);
        assert_eq!(store.profile.streak_days, 1);
    }

    #[test]
    fn test_record_reading_awards_coins_and_appends() {
        let (_dir, mut store) = store();
        let mut rng = StdRng::seed_from_u64(3);
        let reading = generate_reading(&mut rng, Some(MoodId::Chaos), Utc::now());

        store.record_reading(reading);
        assert_eq!(store.profile.coins, 110);
        assert_eq!(store.profile.readings.len(), 1);
        assert_eq!(store.profile.readings[0].mood, MoodId::Chaos);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();

        let mut store = ProfileStore::load(config.clone(), date(2026, 8, 26));
        store.select_mood(MoodId::Toxic);
        let mut rng = StdRng::seed_from_u64(9);
        store.record_reading(generate_reading(&mut rng, Some(MoodId::Toxic), Utc::now()));
        store.record_reading(generate_reading(&mut rng, Some(MoodId::Toxic), Utc::now()));

        let reloaded = ProfileStore::load(config, date(2026, 8, 26));
        assert_eq!(reloaded.profile.coins, 120);
        assert_eq!(reloaded.profile.streak_days, 1);
        assert_eq!(reloaded.profile.selected_mood, Some(MoodId::Toxic));
        assert_eq!(reloaded.profile.readings.len(), 2);
        assert_eq!(
            reloaded.profile.readings[0].card,
            store.profile.readings[0].card
        );
    }

    #[test]
    fn test_corrupt_profile_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        std::fs::write(config.profile_file(), "{not json").unwrap();

        let store = ProfileStore::load(config, date(2026, 8, 26));
        assert_eq!(store.profile.coins, 100);
        assert_eq!(store.profile.streak_days, 1);
    }

    #[test]
    fn test_recent_readings_slice() {
        let (_dir, mut store) = store();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            store.record_reading(generate_reading(&mut rng, None, Utc::now()));
        }
        assert_eq!(store.recent_readings(8).len(), 8);
        assert_eq!(store.recent_readings(20).len(), 10);
    }
}
