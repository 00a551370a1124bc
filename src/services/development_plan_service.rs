use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{CreateDevelopmentPlan, DevelopmentPlan, PlanStatus, UpdateDevelopmentPlan};

const PLAN_COLUMNS: &str = "id, player_id, coach_id, goal, focus_area, target_date, progress_pct,
                            status, notes, created_at, updated_at";

#[derive(Clone)]
pub struct DevelopmentPlanService {
    db: SqlitePool,
}

impl DevelopmentPlanService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_plan(&self, data: CreateDevelopmentPlan) -> Result<DevelopmentPlan> {
        let now = Utc::now();

        let plan = sqlx::query_as::<_, DevelopmentPlan>(&format!(
            "INSERT INTO development_plans (id, player_id, coach_id, goal, focus_area, target_date,
                                            progress_pct, status, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, 0, 'active', ?, ?, ?)
             RETURNING {PLAN_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(data.player_id)
        .bind(data.coach_id)
        .bind(&data.goal)
        .bind(&data.focus_area)
        .bind(data.target_date)
        .bind(data.notes)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(plan)
    }

    pub async fn get_plan_by_id(&self, plan_id: Uuid) -> Result<Option<DevelopmentPlan>> {
        let plan = sqlx::query_as::<_, DevelopmentPlan>(&format!(
            "SELECT {PLAN_COLUMNS} FROM development_plans WHERE id = ?"
        ))
        .bind(plan_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(plan)
    }

    pub async fn list_plans(
        &self,
        player_id: Option<Uuid>,
        status: Option<PlanStatus>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<DevelopmentPlan>> {
        let limit = limit.unwrap_or(50).clamp(1, 100);
        let offset = offset.unwrap_or(0).max(0);

        let mut query = format!("SELECT {PLAN_COLUMNS} FROM development_plans WHERE 1 = 1");
        if player_id.is_some() {
            query.push_str(" AND player_id = ?");
        }
        if status.is_some() {
            query.push_str(" AND status = ?");
        }
        query.push_str(" ORDER BY created_at DESC LIMIT ? OFFSET ?");

        let mut query_builder = sqlx::query_as::<_, DevelopmentPlan>(&query);
        if let Some(player_id) = player_id {
            query_builder = query_builder.bind(player_id);
        }
        if let Some(status) = status {
            query_builder = query_builder.bind(status);
        }

        let plans = query_builder
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await?;

        Ok(plans)
    }

    /// Progress hitting 100 marks the plan completed.
    pub async fn update_plan(
        &self,
        plan_id: Uuid,
        data: UpdateDevelopmentPlan,
    ) -> Result<Option<DevelopmentPlan>> {
        let status = match (data.status, data.progress_pct) {
            (None, Some(pct)) if pct >= 100 => Some(PlanStatus::Completed),
            (status, _) => status,
        };

        let plan = sqlx::query_as::<_, DevelopmentPlan>(&format!(
            "UPDATE development_plans
             SET goal = COALESCE(?, goal),
                 focus_area = COALESCE(?, focus_area),
                 target_date = COALESCE(?, target_date),
                 progress_pct = COALESCE(?, progress_pct),
                 status = COALESCE(?, status),
                 notes = COALESCE(?, notes),
                 updated_at = ?
             WHERE id = ?
             RETURNING {PLAN_COLUMNS}"
        ))
        .bind(data.goal)
        .bind(data.focus_area)
        .bind(data.target_date)
        .bind(data.progress_pct)
        .bind(status)
        .bind(data.notes)
        .bind(Utc::now())
        .bind(plan_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(plan)
    }

    pub async fn delete_plan(&self, plan_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM development_plans WHERE id = ?")
            .bind(plan_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
