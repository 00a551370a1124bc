// Data models for the academy schema

pub mod attendance;
pub mod development_plan;
pub mod external_team;
pub mod family;
pub mod fixture;
pub mod injury;
pub mod player;
pub mod team;
pub mod training;
pub mod user;

pub use attendance::*;
pub use development_plan::*;
pub use external_team::*;
pub use family::*;
pub use fixture::*;
pub use injury::*;
pub use player::*;
pub use team::*;
pub use training::*;
pub use user::*;
