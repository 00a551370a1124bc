use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::InjurySeverity;

/// Injury probability tables. Weights lean toward the knocks that
/// actually fill a youth academy's medical log.
const INJURY_TYPES: &[(&str, &str, InjurySeverity, u32)] = &[
    ("Bokaszalag-húzódás", "boka", InjurySeverity::Minor, 22),
    ("Izomhúzódás", "comb", InjurySeverity::Minor, 24),
    ("Térdzúzódás", "térd", InjurySeverity::Minor, 14),
    ("Combizom-szakadás", "comb", InjurySeverity::Moderate, 10),
    ("Achilles-gyulladás", "vádli", InjurySeverity::Moderate, 8),
    ("Agyrázkódás", "fej", InjurySeverity::Moderate, 5),
    ("Ágyéki húzódás", "ágyék", InjurySeverity::Minor, 9),
    ("Kulcscsonttörés", "váll", InjurySeverity::Severe, 4),
    ("Térdszalag-szakadás", "térd", InjurySeverity::Severe, 4),
];

pub const PLAN_TEMPLATES: &[(&str, &str)] = &[
    ("Gyengébb láb fejlesztése", "technika"),
    ("Fejjáték javítása", "technika"),
    ("Beadások pontosítása", "technika"),
    ("Állóképesség növelése", "erőnlét"),
    ("Gyorsaság fejlesztése", "erőnlét"),
    ("Pozíciójáték érlelése", "taktika"),
    ("Letámadás időzítése", "taktika"),
    ("Kapusreflexek élesítése", "kapusképzés"),
];

#[derive(Debug)]
pub struct InjuryDraw {
    pub description: &'static str,
    pub body_part: &'static str,
    pub severity: InjurySeverity,
    pub recovery_days: i64,
}

/// Season-level injury chance per player; older squads pick up more.
pub fn injury_probability(age: i32) -> f64 {
    0.08 + 0.01 * (age - 8).max(0) as f64
}

pub fn draw_injury(rng: &mut StdRng) -> InjuryDraw {
    let total: u32 = INJURY_TYPES.iter().map(|(_, _, _, w)| w).sum();
    let mut roll = rng.gen_range(0..total);

    let mut picked = &INJURY_TYPES[0];
    for entry in INJURY_TYPES {
        if roll < entry.3 {
            picked = entry;
            break;
        }
        roll -= entry.3;
    }

    let recovery_days = match picked.2 {
        InjurySeverity::Minor => rng.gen_range(7..=21),
        InjurySeverity::Moderate => rng.gen_range(21..=56),
        InjurySeverity::Severe => rng.gen_range(56..=150),
    };

    InjuryDraw {
        description: picked.0,
        body_part: picked.1,
        severity: picked.2,
        recovery_days,
    }
}

/// Random date within `[start, end]`.
pub fn date_between(rng: &mut StdRng, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days().max(0);
    start + chrono::Duration::days(rng.gen_range(0..=span))
}

pub fn plan_template(rng: &mut StdRng) -> (&'static str, &'static str) {
    PLAN_TEMPLATES
        .choose(rng)
        .copied()
        .unwrap_or(PLAN_TEMPLATES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_recovery_windows_follow_severity() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let draw = draw_injury(&mut rng);
            let range = match draw.severity {
                InjurySeverity::Minor => 7..=21,
                InjurySeverity::Moderate => 21..=56,
                InjurySeverity::Severe => 56..=150,
            };
            assert!(range.contains(&draw.recovery_days));
        }
    }

    #[test]
    fn test_older_squads_get_injured_more() {
        assert!(injury_probability(18) > injury_probability(8));
        assert!(injury_probability(8) > 0.0);
        assert!(injury_probability(18) < 0.25);
    }

    #[test]
    fn test_date_between_bounds() {
        let mut rng = StdRng::seed_from_u64(12);
        let start = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();

        for _ in 0..100 {
            let date = date_between(&mut rng, start, end);
            assert!(date >= start && date <= end);
        }
    }
}
