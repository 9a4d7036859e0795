/// Streak calculation and derived statistics
///
/// This module computes streaks and summary statistics from loaded
/// collections. Everything here is a pure function of its inputs; callers
/// pass `today` explicitly so results are reproducible.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{Habit, HabitId, HabitProgress, HydrationIntake, MoodEntry, MoodType};

/// Streak walks stop after a year of history
const STREAK_LOOKBACK_DAYS: usize = 365;

/// Count consecutive completed calendar days ending today
///
/// Starting from `today`, walk backward one day at a time while a completed
/// progress record exists for the habit, stopping at the first gap. A habit
/// not completed today has a streak of 0.
pub fn habit_streak(habit_id: &HabitId, progress: &[HabitProgress], today: NaiveDate) -> u32 {
    let completed: HashSet<NaiveDate> = progress
        .iter()
        .filter(|p| &p.habit_id == habit_id && p.is_completed)
        .map(|p| p.date)
        .collect();

    consecutive_days_ending(&completed, today)
}

fn consecutive_days_ending(days: &HashSet<NaiveDate>, end: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut checking = end;

    for _ in 0..STREAK_LOOKBACK_DAYS {
        if days.contains(&checking) {
            streak += 1;
            checking = checking - Duration::days(1);
        } else {
            break;
        }
    }

    streak
}

/// Longest run of consecutive days anywhere in a day set
fn longest_run(days: &HashSet<NaiveDate>) -> u32 {
    let mut sorted: Vec<NaiveDate> = days.iter().copied().collect();
    sorted.sort();

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for date in sorted {
        run = match previous {
            Some(prev) if date - prev == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }

    longest
}

/// Summary statistics for one habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitStats {
    pub habit_id: HabitId,
    /// Current consecutive completed days ending today
    pub current_streak: u32,
    /// Best streak ever achieved for this habit
    pub longest_streak: u32,
    /// Total number of completed days
    pub total_completions: u32,
    /// Completed days / days since creation (0.0 to 1.0)
    pub completion_rate: f64,
}

impl HabitStats {
    /// Calculate statistics from a habit's progress records
    pub fn calculate(habit: &Habit, progress: &[HabitProgress], today: NaiveDate) -> Self {
        let completed: HashSet<NaiveDate> = progress
            .iter()
            .filter(|p| p.habit_id == habit.id && p.is_completed)
            .map(|p| p.date)
            .collect();

        let current_streak = consecutive_days_ending(&completed, today);
        let longest_streak = longest_run(&completed).max(current_streak);
        let total_completions = completed.len() as u32;

        let days_tracked = (today - habit.created_at.date_naive()).num_days() + 1;
        let completion_rate = if days_tracked > 0 {
            (total_completions as f64 / days_tracked as f64).min(1.0)
        } else {
            0.0
        };

        Self {
            habit_id: habit.id.clone(),
            current_streak,
            longest_streak,
            total_completions,
            completion_rate,
        }
    }
}

/// Summary statistics for the mood journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodStats {
    /// Mean intensity across all entries (0.0 when empty)
    pub average_mood: f64,
    /// Mood logged most often, Neutral when empty
    pub most_frequent_mood: MoodType,
    pub total_entries: u32,
    pub mood_counts: HashMap<MoodType, u32>,
    /// Mean intensity per weekday, Monday first (0.0 for unseen days)
    pub weekly_trend: Vec<f64>,
}

impl MoodStats {
    /// Calculate statistics from mood journal entries
    pub fn calculate(entries: &[MoodEntry]) -> Self {
        let total_entries = entries.len() as u32;

        let mut mood_counts: HashMap<MoodType, u32> = HashMap::new();
        for entry in entries {
            *mood_counts.entry(entry.mood).or_insert(0) += 1;
        }

        let average_mood = if entries.is_empty() {
            0.0
        } else {
            let sum: u32 = entries.iter().map(|e| e.mood.intensity() as u32).sum();
            sum as f64 / entries.len() as f64
        };

        let most_frequent_mood = mood_counts
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(mood, _)| *mood)
            .unwrap_or(MoodType::Neutral);

        let mut sums = [0u32; 7];
        let mut counts = [0u32; 7];
        for entry in entries {
            let weekday = entry.date.weekday().num_days_from_monday() as usize;
            sums[weekday] += entry.mood.intensity() as u32;
            counts[weekday] += 1;
        }
        let weekly_trend = (0..7)
            .map(|i| {
                if counts[i] > 0 {
                    sums[i] as f64 / counts[i] as f64
                } else {
                    0.0
                }
            })
            .collect();

        Self {
            average_mood,
            most_frequent_mood,
            total_entries,
            mood_counts,
            weekly_trend,
        }
    }
}

/// Summary statistics for hydration tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationStats {
    /// Mean intake across tracked days, in ml
    pub average_daily_intake_ml: u32,
    /// Days meeting the goal / days tracked (0.0 to 1.0)
    pub goal_achievement_rate: f64,
    pub total_days_tracked: u32,
    /// Consecutive goal-met days ending today
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl HydrationStats {
    /// Calculate statistics from intake records against a daily goal
    pub fn calculate(intake: &[HydrationIntake], goal_ml: u32, today: NaiveDate) -> Self {
        let mut daily_totals: HashMap<NaiveDate, u32> = HashMap::new();
        for record in intake {
            *daily_totals.entry(record.date).or_insert(0) += record.amount_ml;
        }

        let total_days_tracked = daily_totals.len() as u32;
        let average_daily_intake_ml = if daily_totals.is_empty() {
            0
        } else {
            let sum: u64 = daily_totals.values().map(|&v| v as u64).sum();
            (sum / daily_totals.len() as u64) as u32
        };

        let goal_days: HashSet<NaiveDate> = daily_totals
            .iter()
            .filter(|(_, &total)| goal_ml > 0 && total >= goal_ml)
            .map(|(&date, _)| date)
            .collect();

        let goal_achievement_rate = if total_days_tracked > 0 {
            goal_days.len() as f64 / total_days_tracked as f64
        } else {
            0.0
        };

        let current_streak = consecutive_days_ending(&goal_days, today);
        let longest_streak = longest_run(&goal_days).max(current_streak);

        Self {
            average_daily_intake_ml,
            goal_achievement_rate,
            total_days_tracked,
            current_streak,
            longest_streak,
        }
    }
}
