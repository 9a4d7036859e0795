/// Integration tests exercising the store end to end
use chrono::{Duration, Local};
use tempfile::NamedTempFile;
use wellness_tracker::*;

fn memory_store() -> WellnessStore {
    WellnessStore::open_in_memory().expect("Failed to open in-memory store")
}

fn habit(name: &str, target: u32) -> Habit {
    Habit::new(name.to_string(), String::new(), target, Habit::UNIT_TIMES.to_string())
        .expect("valid habit")
}

#[cfg(test)]
mod round_trip_tests {
    use super::*;

    #[test]
    fn test_habits_round_trip_preserves_order_and_fields() {
        let mut store = memory_store();
        let habits = vec![habit("Run", 1), habit("Read", 20), habit("Stretch", 3)];

        store.save_habits(&habits).unwrap();
        assert_eq!(store.habits().unwrap(), habits);
    }

    #[test]
    fn test_progress_round_trip() {
        let mut store = memory_store();
        let h = habit("Run", 1);
        let today = Local::now().date_naive();

        let records = vec![
            HabitProgress::completed(h.id.clone(), today, 1),
            HabitProgress::new(h.id.clone(), today - Duration::days(1)),
        ];
        for record in &records {
            store.save_progress_for_day(record).unwrap();
        }

        assert_eq!(store.habit_progress().unwrap(), records);
    }

    #[test]
    fn test_moods_and_intake_read_back_newest_first() {
        let mut store = memory_store();

        let older = MoodEntry::new(MoodType::Calm, "first".to_string()).unwrap();
        let mut newer = MoodEntry::new(MoodType::Happy, "second".to_string()).unwrap();
        newer.timestamp = older.timestamp + Duration::milliseconds(10);
        store.save_mood_entry(&older).unwrap();
        store.save_mood_entry(&newer).unwrap();
        assert_eq!(
            store.mood_entries().unwrap(),
            vec![newer.clone(), older.clone()]
        );

        let sip = HydrationIntake::new(200, String::new()).unwrap();
        let mut gulp = HydrationIntake::new(500, String::new()).unwrap();
        gulp.timestamp = sip.timestamp + Duration::milliseconds(10);
        store.add_hydration_intake(&sip).unwrap();
        store.add_hydration_intake(&gulp).unwrap();
        assert_eq!(store.hydration_intake().unwrap(), vec![gulp, sip]);
    }

    #[test]
    fn test_blank_identity_records_are_dropped() {
        let mut store = memory_store();
        let h = habit("Real", 1);
        store.save_habit(&h).unwrap();

        // Manually widen the count over slots that have no usable id
        let mut edit = store.prefs().edit();
        edit.put_i64("habits_count", 3)
            .put_string("habit_1_id", "")
            .put_string("habit_2_id", "not-a-uuid");
        store.prefs_mut().apply(edit).unwrap();

        assert_eq!(store.habits().unwrap(), vec![h]);
    }

    #[test]
    fn test_store_persists_across_reopen() {
        let file = NamedTempFile::new().expect("Failed to create temp file");
        let habits = vec![habit("Walk", 1), habit("Hydrate", 8)];

        {
            let mut store = WellnessStore::open(file.path()).unwrap();
            store.save_habits(&habits).unwrap();
            store.set_first_launch(false).unwrap();
        }

        let store = WellnessStore::open(file.path()).unwrap();
        assert_eq!(store.habits().unwrap(), habits);
        assert!(!store.is_first_launch().unwrap());
    }
}

#[cfg(test)]
mod upsert_and_delete_tests {
    use super::*;

    #[test]
    fn test_upsert_known_identity_keeps_count() {
        let mut store = memory_store();
        let mut h = habit("Run", 1);
        store.save_habit(&h).unwrap();

        h.update(None, None, Some(5), None, None).unwrap();
        store.save_habit(&h).unwrap();

        let habits = store.habits().unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].target_value, 5);
    }

    #[test]
    fn test_upsert_new_identity_grows_count_by_one() {
        let mut store = memory_store();
        store.save_habit(&habit("One", 1)).unwrap();
        store.save_habit(&habit("Two", 1)).unwrap();

        assert_eq!(store.habits().unwrap().len(), 2);
    }

    #[test]
    fn test_progress_upsert_by_habit_and_day() {
        let mut store = memory_store();
        let h = habit("Run", 3);
        let today = Local::now().date_naive();

        store
            .save_progress_for_day(&HabitProgress::new(h.id.clone(), today))
            .unwrap();
        store
            .save_progress_for_day(&HabitProgress::completed(h.id.clone(), today, 3))
            .unwrap();
        // Same habit, different day: a new record
        store
            .save_progress_for_day(&HabitProgress::new(h.id.clone(), today - Duration::days(1)))
            .unwrap();

        let progress = store.habit_progress().unwrap();
        assert_eq!(progress.len(), 2);
        let todays = store.today_progress(&h.id).unwrap().unwrap();
        assert!(todays.is_completed);
        assert_eq!(todays.current_value, 3);
    }

    #[test]
    fn test_delete_habit_cascades_only_its_progress() {
        let mut store = memory_store();
        let kept = habit("Keep", 1);
        let dropped = habit("Drop", 1);
        store.save_habit(&kept).unwrap();
        store.save_habit(&dropped).unwrap();

        let today = Local::now().date_naive();
        for h in [&kept, &dropped] {
            store
                .save_progress_for_day(&HabitProgress::completed(h.id.clone(), today, 1))
                .unwrap();
            store
                .save_progress_for_day(&HabitProgress::completed(
                    h.id.clone(),
                    today - Duration::days(1),
                    1,
                ))
                .unwrap();
        }

        store.delete_habit(&dropped.id).unwrap();

        assert!(store.habit(&dropped.id).unwrap().is_none());
        assert!(store.habit(&kept.id).unwrap().is_some());
        let progress = store.habit_progress().unwrap();
        assert_eq!(progress.len(), 2);
        assert!(progress.iter().all(|p| p.habit_id == kept.id));
    }

    #[test]
    fn test_delete_mood_entry() {
        let mut store = memory_store();
        let kept = MoodEntry::new(MoodType::Happy, String::new()).unwrap();
        let removed = MoodEntry::new(MoodType::Sad, String::new()).unwrap();
        store.save_mood_entry(&kept).unwrap();
        store.save_mood_entry(&removed).unwrap();

        store.delete_mood_entry(&removed.id).unwrap();

        let entries = store.mood_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, kept.id);
    }
}

#[cfg(test)]
mod streak_tests {
    use super::*;

    #[test]
    fn test_streak_over_stored_progress() {
        let mut store = memory_store();
        let h = habit("Run", 1);
        store.save_habit(&h).unwrap();

        let today = Local::now().date_naive();
        for offset in 0..3 {
            store
                .save_progress_for_day(&HabitProgress::completed(
                    h.id.clone(),
                    today - Duration::days(offset),
                    1,
                ))
                .unwrap();
        }
        // A completed day separated by a gap does not count
        store
            .save_progress_for_day(&HabitProgress::completed(
                h.id.clone(),
                today - Duration::days(5),
                1,
            ))
            .unwrap();

        assert_eq!(store.habit_streak(&h.id).unwrap(), 3);
    }

    #[test]
    fn test_incomplete_today_means_no_streak() {
        let mut store = memory_store();
        let h = habit("Run", 2);
        store.save_habit(&h).unwrap();

        let today = Local::now().date_naive();
        store
            .save_progress_for_day(&HabitProgress::new(h.id.clone(), today))
            .unwrap();
        store
            .save_progress_for_day(&HabitProgress::completed(
                h.id.clone(),
                today - Duration::days(1),
                2,
            ))
            .unwrap();

        assert_eq!(store.habit_streak(&h.id).unwrap(), 0);
    }
}

#[cfg(test)]
mod hydration_tests {
    use super::*;

    #[test]
    fn test_today_totals() {
        let mut store = memory_store();
        store
            .add_hydration_intake(&HydrationIntake::new(250, String::new()).unwrap())
            .unwrap();
        store
            .add_hydration_intake(&HydrationIntake::new(500, "bottle".to_string()).unwrap())
            .unwrap();

        assert_eq!(store.today_total_hydration().unwrap(), 750);
        assert_eq!(store.today_hydration_intake().unwrap().len(), 2);
    }

    #[test]
    fn test_daily_summary_uses_saved_goal() {
        let mut store = memory_store();
        let settings = HydrationSettings {
            daily_goal_ml: 600,
            ..Default::default()
        };
        store.save_hydration_settings(&settings).unwrap();
        store
            .add_hydration_intake(&HydrationIntake::new(750, String::new()).unwrap())
            .unwrap();

        let today = Local::now().date_naive();
        let summary = store.daily_hydration(today).unwrap();
        assert_eq!(summary.goal_ml, 600);
        assert!(summary.goal_reached);
        assert_eq!(summary.remaining_ml(), 0);
    }
}

#[cfg(test)]
mod auth_tests {
    use super::*;

    #[test]
    fn test_duplicate_registration_rejected_case_insensitively() {
        let mut store = memory_store();

        assert!(store
            .register_user("Sam", "sam@example.com", "pass1234")
            .unwrap());
        assert!(store.is_registered().unwrap());

        // Same email in different case fails the second time
        assert!(!store
            .register_user("Sam", "SAM@Example.COM", "other")
            .unwrap());
    }

    #[test]
    fn test_login_matches_email_case_insensitively() {
        let mut store = memory_store();
        store
            .register_user("Sam", "sam@example.com", "pass1234")
            .unwrap();

        assert!(store.validate_login("SAM@EXAMPLE.COM", "pass1234").unwrap());
        assert!(!store.validate_login("sam@example.com", "wrong").unwrap());
        assert!(!store.validate_login("other@example.com", "pass1234").unwrap());
    }

    #[test]
    fn test_clear_user_removes_credentials() {
        let mut store = memory_store();
        store
            .register_user("Sam", "sam@example.com", "pass1234")
            .unwrap();

        store.clear_user().unwrap();

        assert!(!store.is_registered().unwrap());
        assert!(!store.validate_login("sam@example.com", "pass1234").unwrap());
        assert_eq!(store.registered_email().unwrap(), None);
    }

    #[test]
    fn test_login_state_flag() {
        let mut store = memory_store();
        assert!(!store.is_logged_in().unwrap());
        store.set_logged_in(true).unwrap();
        assert!(store.is_logged_in().unwrap());
    }
}

#[cfg(test)]
mod export_tests {
    use super::*;

    #[test]
    fn test_export_contains_every_collection() {
        let mut store = memory_store();
        let h = habit("Run", 1);
        store.save_habit(&h).unwrap();
        let today = Local::now().date_naive();
        store
            .save_progress_for_day(&HabitProgress::completed(h.id.clone(), today, 1))
            .unwrap();
        store
            .save_mood_entry(&MoodEntry::new(MoodType::Excited, "good run".to_string()).unwrap())
            .unwrap();
        store
            .add_hydration_intake(&HydrationIntake::new(300, String::new()).unwrap())
            .unwrap();

        let json = store.export_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["habits"].as_array().unwrap().len(), 1);
        assert_eq!(value["habitProgress"].as_array().unwrap().len(), 1);
        assert_eq!(value["moodEntries"].as_array().unwrap().len(), 1);
        assert_eq!(value["hydrationIntake"].as_array().unwrap().len(), 1);
        assert!(value["hydrationSettings"]["dailyGoalMl"].is_u64());
        assert!(value["exportDate"].is_i64());
        assert_eq!(value["habits"][0]["id"], h.id.to_string());
    }

    #[test]
    fn test_clear_all_empties_the_store() {
        let mut store = memory_store();
        store.save_habit(&habit("Run", 1)).unwrap();
        store
            .register_user("Sam", "sam@example.com", "pass1234")
            .unwrap();

        store.clear_all().unwrap();

        assert!(store.habits().unwrap().is_empty());
        assert!(!store.is_registered().unwrap());
    }
}
