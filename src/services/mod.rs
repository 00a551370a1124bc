// Business logic services

pub mod attendance_service;
pub mod checkin_service;
pub mod development_plan_service;
pub mod external_team_service;
pub mod family_service;
pub mod injury_service;
pub mod match_service;
pub mod player_service;
pub mod stats_service;
pub mod team_service;
pub mod training_service;
pub mod user_service;

pub use attendance_service::AttendanceService;
pub use checkin_service::CheckinService;
pub use development_plan_service::DevelopmentPlanService;
pub use external_team_service::ExternalTeamService;
pub use family_service::FamilyService;
pub use injury_service::InjuryService;
pub use match_service::MatchService;
pub use player_service::PlayerService;
pub use stats_service::{
    AttendanceSummary, InjuredPlayer, SquadSize, StatsService, TeamMatchRecord, TeamPlanProgress,
};
pub use team_service::TeamService;
pub use training_service::TrainingService;
pub use user_service::UserService;
