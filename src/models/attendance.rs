use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    Excused,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AttendanceMethod {
    Manual,
    Qr,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    pub id: Uuid,
    pub training_id: Uuid,
    pub player_id: Uuid,
    pub status: AttendanceStatus,
    pub method: AttendanceMethod,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// One line of a coach's attendance sheet.
#[derive(Debug, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub player_id: Uuid,
    pub status: AttendanceStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordAttendanceSheet {
    pub entries: Vec<AttendanceEntry>,
}

/// A short-lived check-in window opened by a coach for one training.
/// Its id doubles as the token embedded in the QR payload.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CheckinSession {
    pub id: Uuid,
    pub training_id: Uuid,
    pub issued_by: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl CheckinSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// What the frontend encodes into the QR image.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckinPayload {
    pub token: Uuid,
    pub training_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckinRequest {
    pub token: Uuid,
    pub player_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckinResponse {
    pub training_id: Uuid,
    pub player_id: Uuid,
    pub status: AttendanceStatus,
    pub already_checked_in: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_expiry_is_a_timestamp_comparison() {
        let now = Utc::now();
        let session = CheckinSession {
            id: Uuid::new_v4(),
            training_id: Uuid::new_v4(),
            issued_by: Uuid::new_v4(),
            issued_at: now,
            expires_at: now + Duration::minutes(15),
            revoked: false,
        };

        assert!(!session.is_expired(now));
        assert!(!session.is_expired(now + Duration::minutes(14)));
        assert!(session.is_expired(now + Duration::minutes(15)));
        assert!(session.is_expired(now + Duration::hours(1)));
    }
}
