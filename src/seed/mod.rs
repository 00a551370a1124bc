// Demo-data generation: a believable Hungarian youth academy with a few
// seasons of history behind it.

pub mod fixtures;
pub mod medical;
pub mod names;
pub mod roster;
pub mod sessions;

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sqlx::SqlitePool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::auth::UserRole;
use crate::models::{
    AgeGroup, AttendanceMethod, CreateDevelopmentPlan, CreateExternalTeam, CreateFamilyLink,
    CreateInjury, CreateMatch, CreatePlayer, CreateTeam, CreateTraining, InjuryStatus, MatchResult,
    Position, Relationship, TrainingStatus, UpdateDevelopmentPlan, UpdateInjury, UpdatePlayer,
    UpdatePrivacySettings, UpdateTraining,
};
use crate::services::{
    AttendanceService, DevelopmentPlanService, ExternalTeamService, FamilyService, InjuryService,
    MatchService, PlayerService, TeamService, TrainingService,
};
use self::fixtures::OpponentSeed;

/// Every generated account logs in with this.
pub const DEMO_PASSWORD: &str = "Akademia2025";

const OPPONENTS_PER_GROUP: usize = 6;

#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Number of seasons to generate, ending with the current one.
    pub seasons: u32,
    /// Wipe all academy data before seeding.
    pub clear: bool,
    /// Fixed RNG seed; the same seed replays the identical academy.
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            seasons: 3,
            clear: false,
            rng_seed: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SeedSummary {
    pub seasons: Vec<String>,
    pub users: usize,
    pub teams: usize,
    pub players: usize,
    pub external_teams: usize,
    pub matches: usize,
    pub trainings: usize,
    pub attendance_records: usize,
    pub injuries: usize,
    pub development_plans: usize,
    pub parent_links: usize,
}

impl SeedSummary {
    pub fn log(&self) {
        tracing::info!(seasons = ?self.seasons, "seeded seasons");
        tracing::info!(
            users = self.users,
            teams = self.teams,
            players = self.players,
            external_teams = self.external_teams,
            matches = self.matches,
            trainings = self.trainings,
            attendance = self.attendance_records,
            injuries = self.injuries,
            development_plans = self.development_plans,
            parent_links = self.parent_links,
            "academy seeding completed"
        );
    }
}

/// Seasons run August to May; July still belongs to the closing season's
/// summer break, so anything from July onward counts as the new one.
pub fn season_start_year(today: NaiveDate) -> i32 {
    if today.month() >= 7 {
        today.year()
    } else {
        today.year() - 1
    }
}

pub fn season_label(start_year: i32) -> String {
    format!("{}/{:02}", start_year, (start_year + 1) % 100)
}

pub struct AcademySeeder {
    db: SqlitePool,
    rng: StdRng,
    config: SeedConfig,
}

impl AcademySeeder {
    pub fn new(db: SqlitePool, config: SeedConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { db, rng, config }
    }

    pub async fn run(mut self) -> Result<SeedSummary> {
        tracing::info!("starting academy seeding");

        if self.config.clear {
            self.clear().await?;
        }

        let today = Utc::now().date_naive();
        let current_start = season_start_year(today);
        let first_start = current_start - (self.config.seasons.max(1) as i32 - 1);

        let mut summary = SeedSummary::default();

        // One bcrypt run shared by every generated account; hashing each
        // of a few hundred users separately would dominate the runtime.
        let password_hash =
            hash_password(DEMO_PASSWORD).map_err(|e| anyhow::anyhow!("demo password: {e}"))?;
        let mut email_counter = 0usize;

        self.insert_user(&password_hash, "admin@akademia.hu", "Vezetőség", UserRole::Admin)
            .await?;
        summary.users += 1;

        let coaches = self
            .seed_coaches(&password_hash, &mut email_counter, &mut summary)
            .await?;
        let opponents = self.seed_opponents(&mut summary).await?;

        let mut rosters = roster::Rosters::new();

        for start_year in first_start..=current_start {
            let season = season_label(start_year);
            tracing::info!(season = %season, "seeding season");
            summary.seasons.push(season.clone());

            rosters = roster::roll_over(&mut self.rng, rosters);
            roster::fill_squads(&mut self.rng, &mut rosters, start_year);

            for group in AgeGroup::ALL {
                self.seed_team_season(
                    group,
                    &season,
                    start_year,
                    today,
                    coaches.get(&group).copied(),
                    &opponents[&group],
                    rosters.get_mut(&group).expect("every group is fielded"),
                    &mut summary,
                )
                .await?;
            }
        }

        self.seed_development_plans(&rosters, &coaches, current_start, &mut summary)
            .await?;
        self.seed_parents(&password_hash, &rosters, &mut email_counter, &mut summary)
            .await?;

        summary.log();
        Ok(summary)
    }

    async fn seed_coaches(
        &mut self,
        password_hash: &str,
        email_counter: &mut usize,
        summary: &mut SeedSummary,
    ) -> Result<HashMap<AgeGroup, Uuid>> {
        let mut coaches = HashMap::new();

        for group in AgeGroup::ALL {
            let name = format!(
                "{} {}",
                names::surname(&mut self.rng),
                names::male_given_name(&mut self.rng)
            );
            *email_counter += 1;
            let email = names::email_for(&name, *email_counter);

            let id = self
                .insert_user(password_hash, &email, &name, UserRole::Coach)
                .await?;
            coaches.insert(group, id);
            summary.users += 1;
        }

        Ok(coaches)
    }

    async fn seed_opponents(
        &mut self,
        summary: &mut SeedSummary,
    ) -> Result<HashMap<AgeGroup, Vec<OpponentSeed>>> {
        let service = ExternalTeamService::new(self.db.clone());
        let mut opponents = HashMap::new();

        for group in AgeGroup::ALL {
            let mut pool = Vec::with_capacity(OPPONENTS_PER_GROUP);
            for _ in 0..OPPONENTS_PER_GROUP {
                let town = names::town(&mut self.rng);
                let name = format!("{} {}", town, names::club_suffix(&mut self.rng));

                let team = service
                    .create_external_team(CreateExternalTeam {
                        name: name.clone(),
                        city: town.to_string(),
                        age_group: group,
                    })
                    .await?;
                summary.external_teams += 1;

                pool.push(OpponentSeed {
                    id: team.id,
                    name,
                    strength: self.rng.gen_range(0.30..0.70),
                });
            }
            opponents.insert(group, pool);
        }

        Ok(opponents)
    }

    #[allow(clippy::too_many_arguments)]
    async fn seed_team_season(
        &mut self,
        group: AgeGroup,
        season: &str,
        start_year: i32,
        today: NaiveDate,
        coach_id: Option<Uuid>,
        opponents: &[OpponentSeed],
        squad: &mut Vec<roster::PlayerSeed>,
        summary: &mut SeedSummary,
    ) -> Result<()> {
        let team_service = TeamService::new(self.db.clone());
        let player_service = PlayerService::new(self.db.clone());

        let team = team_service
            .create_team(CreateTeam {
                name: format!("Akadémia {}", group.as_str()),
                age_group: group,
                season: season.to_string(),
                coach_id,
            })
            .await?;
        summary.teams += 1;

        for player in squad.iter_mut() {
            if player.persisted {
                player_service
                    .update_player(
                        player.id,
                        UpdatePlayer {
                            team_id: Some(team.id),
                            height_cm: Some(player.height_cm),
                            weight_kg: Some(player.weight_kg),
                            ..Default::default()
                        },
                    )
                    .await?;
            } else {
                let created = player_service
                    .create_player(CreatePlayer {
                        first_name: player.first_name.clone(),
                        last_name: player.last_name.clone(),
                        birth_date: player.birth_date,
                        position: player.position,
                        dominant_foot: Some(player.foot),
                        height_cm: Some(player.height_cm),
                        weight_kg: Some(player.weight_kg),
                        team_id: Some(team.id),
                    })
                    .await?;
                player.id = created.id;
                player.persisted = true;
                summary.players += 1;
            }
        }

        self.seed_matches(&team.id, season, start_year, today, opponents, squad, summary)
            .await?;
        self.seed_trainings(&team.id, start_year, today, squad, summary)
            .await?;
        self.seed_injuries(group, start_year, today, squad, summary)
            .await?;

        Ok(())
    }

    async fn seed_matches(
        &mut self,
        team_id: &Uuid,
        season: &str,
        start_year: i32,
        today: NaiveDate,
        opponents: &[OpponentSeed],
        squad: &[roster::PlayerSeed],
        summary: &mut SeedSummary,
    ) -> Result<()> {
        let match_service = MatchService::new(self.db.clone());
        let strength = roster::squad_strength(squad);

        for plan in
            fixtures::schedule_fixtures(&mut self.rng, strength, opponents, start_year, today)
        {
            let fixture = match_service
                .create_match(CreateMatch {
                    team_id: *team_id,
                    opponent_id: plan.opponent_id,
                    kickoff_at: plan.kickoff_at,
                    home: plan.home,
                    competition: plan.competition,
                    season: season.to_string(),
                })
                .await?;
            summary.matches += 1;

            if let Some((goals_for, goals_against)) = plan.result {
                match_service
                    .record_result(
                        fixture.id,
                        MatchResult {
                            goals_for,
                            goals_against,
                        },
                    )
                    .await?;
            }
        }

        Ok(())
    }

    async fn seed_trainings(
        &mut self,
        team_id: &Uuid,
        start_year: i32,
        today: NaiveDate,
        squad: &[roster::PlayerSeed],
        summary: &mut SeedSummary,
    ) -> Result<()> {
        let training_service = TrainingService::new(self.db.clone());
        let attendance_service = AttendanceService::new(self.db.clone());

        for slot in sessions::training_slots(start_year) {
            let training = training_service
                .create_training(CreateTraining {
                    team_id: *team_id,
                    starts_at: slot,
                    ends_at: slot + Duration::minutes(90),
                    location: names::training_location(&mut self.rng).to_string(),
                    focus: Some(names::training_focus(&mut self.rng).to_string()),
                })
                .await?;
            summary.trainings += 1;

            if slot.date_naive() >= today {
                continue;
            }

            training_service
                .update_training(
                    training.id,
                    UpdateTraining {
                        status: Some(TrainingStatus::Completed),
                        ..Default::default()
                    },
                )
                .await?;

            for player in squad {
                let status = sessions::draw_attendance(&mut self.rng, player.attendance_propensity);
                attendance_service
                    .record(training.id, player.id, status, AttendanceMethod::Manual)
                    .await?;
                summary.attendance_records += 1;
            }
        }

        Ok(())
    }

    async fn seed_injuries(
        &mut self,
        group: AgeGroup,
        start_year: i32,
        today: NaiveDate,
        squad: &[roster::PlayerSeed],
        summary: &mut SeedSummary,
    ) -> Result<()> {
        let injury_service = InjuryService::new(self.db.clone());

        let season_start = NaiveDate::from_ymd_opt(start_year, 8, 1).expect("valid date");
        let season_end = NaiveDate::from_ymd_opt(start_year + 1, 5, 31).expect("valid date");
        let window_end = season_end.min(today);
        if window_end <= season_start {
            return Ok(());
        }

        for player in squad {
            if !self.rng.gen_bool(medical::injury_probability(group.age())) {
                continue;
            }

            let draw = medical::draw_injury(&mut self.rng);
            let injured_on = medical::date_between(&mut self.rng, season_start, window_end);
            let expected_return = injured_on + Duration::days(draw.recovery_days);

            let injury = injury_service
                .create_injury(CreateInjury {
                    player_id: player.id,
                    description: draw.description.to_string(),
                    body_part: draw.body_part.to_string(),
                    severity: draw.severity,
                    injured_on,
                    expected_return: Some(expected_return),
                })
                .await?;
            summary.injuries += 1;

            if expected_return <= today {
                injury_service
                    .update_injury(
                        injury.id,
                        UpdateInjury {
                            status: Some(InjuryStatus::Recovered),
                            ..Default::default()
                        },
                    )
                    .await?;
            }
        }

        Ok(())
    }

    async fn seed_development_plans(
        &mut self,
        rosters: &roster::Rosters,
        coaches: &HashMap<AgeGroup, Uuid>,
        current_start: i32,
        summary: &mut SeedSummary,
    ) -> Result<()> {
        let plan_service = DevelopmentPlanService::new(self.db.clone());
        let target_date = NaiveDate::from_ymd_opt(current_start + 1, 5, 31).expect("valid date");

        for (group, squad) in rosters {
            let coach_id = coaches.get(group).copied();

            for player in squad {
                if !self.rng.gen_bool(0.35) {
                    continue;
                }

                // Keep goalkeeper drills off the field players' plans.
                let (goal, focus_area) = loop {
                    let template = medical::plan_template(&mut self.rng);
                    if template.1 != "kapusképzés" || player.position == Position::Goalkeeper {
                        break template;
                    }
                };

                let plan = plan_service
                    .create_plan(CreateDevelopmentPlan {
                        player_id: player.id,
                        coach_id,
                        goal: goal.to_string(),
                        focus_area: focus_area.to_string(),
                        target_date: Some(target_date),
                        notes: None,
                    })
                    .await?;
                summary.development_plans += 1;

                let progress = self.rng.gen_range(0..=90);
                if progress > 0 {
                    plan_service
                        .update_plan(
                            plan.id,
                            UpdateDevelopmentPlan {
                                progress_pct: Some(progress),
                                ..Default::default()
                            },
                        )
                        .await?;
                }
            }
        }

        Ok(())
    }

    async fn seed_parents(
        &mut self,
        password_hash: &str,
        rosters: &roster::Rosters,
        email_counter: &mut usize,
        summary: &mut SeedSummary,
    ) -> Result<()> {
        let family_service = FamilyService::new(self.db.clone());

        for squad in rosters.values() {
            for player in squad {
                let two_parents = self.rng.gen_bool(0.75);
                let relationships = if two_parents {
                    vec![Relationship::Mother, Relationship::Father]
                } else if self.rng.gen_bool(0.8) {
                    vec![Relationship::Mother]
                } else {
                    vec![Relationship::Guardian]
                };

                for relationship in relationships {
                    let given = match relationship {
                        Relationship::Father => names::male_given_name(&mut self.rng),
                        _ => names::female_given_name(&mut self.rng),
                    };
                    let name = format!("{} {}", player.last_name, given);
                    *email_counter += 1;
                    let email = names::email_for(&name, *email_counter);

                    let parent_id = self
                        .insert_user(password_hash, &email, &name, UserRole::Parent)
                        .await?;
                    summary.users += 1;

                    family_service
                        .link(CreateFamilyLink {
                            parent_id,
                            player_id: player.id,
                            relationship,
                        })
                        .await
                        .map_err(|e| anyhow::anyhow!("family link: {e}"))?;
                    summary.parent_links += 1;
                }

                // A handful of families keep medical details to themselves.
                if self.rng.gen_bool(0.1) {
                    family_service
                        .update_privacy(
                            player.id,
                            UpdatePrivacySettings {
                                share_medical: Some(false),
                                ..Default::default()
                            },
                        )
                        .await
                        .map_err(|e| anyhow::anyhow!("privacy settings: {e}"))?;
                }
            }
        }

        Ok(())
    }

    async fn insert_user(
        &self,
        password_hash: &str,
        email: &str,
        full_name: &str,
        role: UserRole,
    ) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO users (id, email, password_hash, full_name, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .bind(full_name)
        .bind(role)
        .bind(now)
        .bind(now)
        .execute(&self.db)
        .await?;

        Ok(id)
    }

    /// Children before parents, the schema enforces its foreign keys.
    async fn clear(&self) -> Result<()> {
        tracing::info!("clearing existing academy data");

        for table in [
            "attendance",
            "checkin_sessions",
            "trainings",
            "matches",
            "development_plans",
            "injuries",
            "parent_child_relationships",
            "family_privacy_settings",
            "players",
            "teams",
            "external_teams",
            "refresh_tokens",
            "token_blacklist",
            "users",
        ] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&self.db)
                .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_boundaries() {
        let spring = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let summer = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();

        assert_eq!(season_start_year(spring), 2025);
        assert_eq!(season_start_year(summer), 2026);
    }

    #[test]
    fn test_season_label_format() {
        assert_eq!(season_label(2025), "2025/26");
        assert_eq!(season_label(1999), "1999/00");
        assert_eq!(season_label(2009), "2009/10");
    }
}
