use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::names;
use crate::models::{AgeGroup, DominantFoot, Position};

/// Generated identity and attributes of one academy player, carried
/// across seasons by the seeder.
#[derive(Debug, Clone)]
pub struct PlayerSeed {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub position: Position,
    pub foot: DominantFoot,
    pub height_cm: i64,
    pub weight_kg: f64,
    /// Rough playing quality, feeds match score generation.
    pub strength: f64,
    /// How reliably the player shows up to training.
    pub attendance_propensity: f64,
    /// Set once the players row exists in the database.
    pub persisted: bool,
}

pub type Rosters = BTreeMap<AgeGroup, Vec<PlayerSeed>>;

const DROPOUT_PROBABILITY: f64 = 0.08;
const MIN_SQUAD: usize = 14;
const MAX_SQUAD: usize = 20;

pub fn new_player(rng: &mut StdRng, group: AgeGroup, season_start_year: i32) -> PlayerSeed {
    let birth_year = group.birth_year(season_start_year);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    let birth_date =
        NaiveDate::from_ymd_opt(birth_year, month, day).expect("day <= 28 is always valid");

    let position = random_position(rng);
    let foot = if rng.gen_bool(0.25) {
        DominantFoot::Left
    } else {
        DominantFoot::Right
    };

    let age = group.age();
    let height_cm = base_height(age) + rng.gen_range(-6..=6);
    let weight_kg = base_weight(age) + rng.gen_range(-30..=30) as f64 / 10.0;

    PlayerSeed {
        id: Uuid::new_v4(),
        first_name: names::male_given_name(rng).to_string(),
        last_name: names::surname(rng).to_string(),
        birth_date,
        position,
        foot,
        height_cm,
        weight_kg,
        strength: rng.gen_range(0.30..0.70),
        attendance_propensity: rng.gen_range(0.70..0.97),
        persisted: false,
    }
}

/// Season rollover: every squad ages up one group, U18 players graduate
/// out, and a small share drops out of the academy.
pub fn roll_over(rng: &mut StdRng, rosters: Rosters) -> Rosters {
    let mut next = Rosters::new();

    for (group, players) in rosters {
        let Some(next_group) = group.next() else {
            continue; // U18 graduates
        };

        let kept: Vec<PlayerSeed> = players
            .into_iter()
            .filter(|_| !rng.gen_bool(DROPOUT_PROBABILITY))
            .collect();

        next.insert(next_group, kept);
    }

    next
}

/// Top every age group up to squad size with fresh intake. Growth is
/// applied to the returning players first.
pub fn fill_squads(rng: &mut StdRng, rosters: &mut Rosters, season_start_year: i32) {
    for group in AgeGroup::ALL {
        let squad = rosters.entry(group).or_default();

        for player in squad.iter_mut() {
            grow(rng, player);
        }

        let target = rng.gen_range(MIN_SQUAD..=MAX_SQUAD);
        while squad.len() < target {
            squad.push(new_player(rng, group, season_start_year));
        }
    }
}

fn grow(rng: &mut StdRng, player: &mut PlayerSeed) {
    player.height_cm += rng.gen_range(3..=7);
    player.weight_kg += rng.gen_range(15..=45) as f64 / 10.0;
    // Development is noisy but trends slightly upward.
    player.strength = (player.strength + rng.gen_range(-0.05..0.09)).clamp(0.2, 0.85);
}

fn random_position(rng: &mut StdRng) -> Position {
    match rng.gen_range(0..16) {
        0..=1 => Position::Goalkeeper,
        2..=6 => Position::Defender,
        7..=12 => Position::Midfielder,
        _ => Position::Forward,
    }
}

fn base_height(age: i32) -> i64 {
    // Rough growth curve, ~130cm at 8 to ~177cm at 18.
    (130 + (age - 8) * 5) as i64
}

fn base_weight(age: i32) -> f64 {
    28.0 + (age - 8) as f64 * 4.0
}

/// Average squad strength, used to weight generated scores.
pub fn squad_strength(players: &[PlayerSeed]) -> f64 {
    if players.is_empty() {
        return 0.5;
    }
    players.iter().map(|p| p.strength).sum::<f64>() / players.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_new_players_land_in_their_cohort() {
        let mut rng = StdRng::seed_from_u64(1);

        for group in AgeGroup::ALL {
            let player = new_player(&mut rng, group, 2025);
            assert_eq!(
                player.birth_date.format("%Y").to_string(),
                group.birth_year(2025).to_string()
            );
        }
    }

    #[test]
    fn test_roll_over_graduates_u18_and_ages_up() {
        let mut rng = StdRng::seed_from_u64(2);

        let mut rosters = Rosters::new();
        rosters.insert(AgeGroup::U17, vec![new_player(&mut rng, AgeGroup::U17, 2024)]);
        rosters.insert(AgeGroup::U18, vec![new_player(&mut rng, AgeGroup::U18, 2024)]);

        let next = roll_over(&mut rng, rosters);

        // U18 graduated out entirely; U17 moved up into U18.
        assert!(next.keys().all(|g| *g == AgeGroup::U18));
    }

    #[test]
    fn test_fill_squads_reaches_min_size() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rosters = Rosters::new();

        fill_squads(&mut rng, &mut rosters, 2025);

        for group in AgeGroup::ALL {
            let squad = rosters.get(&group).expect("every group fielded");
            assert!(squad.len() >= MIN_SQUAD && squad.len() <= MAX_SQUAD);
        }
    }
}
