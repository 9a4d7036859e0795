/// Unit tests for the domain layer and pure calculations
use chrono::NaiveDate;
use wellness_tracker::*;

#[cfg(test)]
mod domain_tests {
    use super::*;

    #[test]
    fn test_habit_validation() {
        assert!(Habit::new(
            "Meditate".to_string(),
            "Ten quiet minutes".to_string(),
            10,
            Habit::UNIT_MINUTES.to_string(),
        )
        .is_ok());

        // Empty name, zero target and blank unit are all rejected
        assert!(Habit::new("".to_string(), String::new(), 1, "times".to_string()).is_err());
        assert!(Habit::new("X".to_string(), String::new(), 0, "times".to_string()).is_err());
        assert!(Habit::new("X".to_string(), String::new(), 1, "  ".to_string()).is_err());
    }

    #[test]
    fn test_progress_percentage() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let progress = HabitProgress::completed(HabitId::new(), date, 6);
        assert_eq!(progress.progress_percentage(8), 75);
        assert_eq!(progress.progress_percentage(3), 100);
    }

    #[test]
    fn test_mood_type_set() {
        assert_eq!(MoodType::all().len(), 10);
        assert_eq!(MoodType::from_name("ANXIOUS"), Some(MoodType::Anxious));
        assert_eq!(MoodType::from_name("bogus"), None);
        assert_eq!(MoodType::Neutral.intensity(), 3);
        assert_eq!(MoodType::VerySad.intensity(), 1);
    }

    #[test]
    fn test_mood_entry_defaults() {
        let entry = MoodEntry::new(MoodType::Tired, String::new()).unwrap();
        assert_eq!(entry.emoji, MoodType::Tired.emoji());
        assert!(!entry.has_notes());
    }

    #[test]
    fn test_hydration_settings_defaults_and_bounds() {
        let settings = HydrationSettings::default();
        assert_eq!(settings.daily_goal_ml, HydrationSettings::DEFAULT_GOAL_ML);
        assert_eq!(
            settings.reminder_interval_minutes,
            HydrationSettings::INTERVAL_1_HOUR
        );

        assert_eq!(
            HydrationSettings::clamped_goal(0),
            HydrationSettings::MIN_GOAL_ML
        );
        assert_eq!(
            HydrationSettings::clamped_goal(u32::MAX),
            HydrationSettings::MAX_GOAL_ML
        );
    }

    #[test]
    fn test_next_reminder_rolls_to_tomorrow() {
        let settings = HydrationSettings::default(); // window opens 08:00
        let evening = NaiveDate::from_ymd_opt(2026, 7, 1)
            .unwrap()
            .and_hms_opt(21, 0, 0)
            .unwrap();

        let next = settings.next_reminder_from(evening).unwrap();
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2026, 7, 2).unwrap());
    }
}

#[cfg(test)]
mod streak_tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn completed_on(habit_id: &HabitId, date: NaiveDate) -> HabitProgress {
        HabitProgress::completed(habit_id.clone(), date, 1)
    }

    #[test]
    fn test_n_consecutive_days_yield_n() {
        let habit_id = HabitId::new();
        let today = day(2026, 7, 10);
        let progress: Vec<HabitProgress> = (0..4)
            .map(|offset| completed_on(&habit_id, today - chrono::Duration::days(offset)))
            .collect();

        assert_eq!(habit_streak(&habit_id, &progress, today), 4);
    }

    #[test]
    fn test_gap_resets_to_run_ending_today() {
        let habit_id = HabitId::new();
        let today = day(2026, 7, 10);
        let progress = vec![
            completed_on(&habit_id, today),
            completed_on(&habit_id, day(2026, 7, 9)),
            // nothing on the 8th
            completed_on(&habit_id, day(2026, 7, 7)),
            completed_on(&habit_id, day(2026, 7, 6)),
            completed_on(&habit_id, day(2026, 7, 5)),
        ];

        assert_eq!(habit_streak(&habit_id, &progress, today), 2);
    }

    #[test]
    fn test_empty_progress_is_zero() {
        assert_eq!(habit_streak(&HabitId::new(), &[], day(2026, 7, 10)), 0);
    }
}
