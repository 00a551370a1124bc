use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use rand::rngs::StdRng;
use rand::Rng;

use crate::models::AttendanceStatus;

/// Tuesday and Thursday 17:00 slots between September and the end of May.
pub fn training_slots(season_start_year: i32) -> Vec<DateTime<Utc>> {
    let first = NaiveDate::from_ymd_opt(season_start_year, 9, 1).expect("valid date");
    let last = NaiveDate::from_ymd_opt(season_start_year + 1, 5, 31).expect("valid date");

    let mut slots = Vec::new();
    let mut day = first;
    while day <= last {
        if matches!(day.weekday(), Weekday::Tue | Weekday::Thu) {
            slots.push(day.and_hms_opt(17, 0, 0).expect("valid time").and_utc());
        }
        day = day + Duration::days(1);
    }

    slots
}

/// Draw one attendance line. The propensity sets how often the player
/// shows up at all; lateness and excused absences split the rest.
pub fn draw_attendance(rng: &mut StdRng, propensity: f64) -> AttendanceStatus {
    if rng.gen_bool(propensity.clamp(0.0, 1.0)) {
        if rng.gen_bool(0.08) {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        }
    } else if rng.gen_bool(0.6) {
        AttendanceStatus::Excused
    } else {
        AttendanceStatus::Absent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_slots_fall_on_training_days() {
        let slots = training_slots(2024);

        assert!(!slots.is_empty());
        for slot in &slots {
            assert!(matches!(slot.weekday(), Weekday::Tue | Weekday::Thu));
        }

        // Roughly two sessions a week over nine months.
        assert!(slots.len() > 70 && slots.len() < 85);
    }

    #[test]
    fn test_diligent_players_attend_more() {
        let mut rng = StdRng::seed_from_u64(9);

        let mut diligent = 0;
        let mut flaky = 0;
        for _ in 0..500 {
            if draw_attendance(&mut rng, 0.95) == AttendanceStatus::Present {
                diligent += 1;
            }
            if draw_attendance(&mut rng, 0.55) == AttendanceStatus::Present {
                flaky += 1;
            }
        }

        assert!(diligent > flaky);
    }
}
