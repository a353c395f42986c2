use crate::error::EngineResult;

use super::models::{CoupleStatistics, GameTypeBreakdown};
use super::Db;

impl Db {
    /// Per-couple statistics, folded from completed sessions on every call.
    /// There is no counters table to drift: the session log is the only
    /// source of truth.
    pub async fn compute_statistics(&self, couple_id: i64) -> EngineResult<CoupleStatistics> {
        let (sessions_completed, total_score): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(score), 0)
             FROM parties
             WHERE couple_id = $1 AND status = 'completed'",
        )
        .bind(couple_id)
        .fetch_one(&self.pool)
        .await?;

        let per_game_type = sqlx::query_as::<_, GameTypeBreakdown>(
            "SELECT p.game_type_id, g.name AS game_type_name,
                    COUNT(*) AS sessions_completed,
                    COALESCE(SUM(p.score), 0) AS total_score,
                    COALESCE(MAX(p.score), 0) AS best_score
             FROM parties p
             JOIN game_types g ON g.id = p.game_type_id
             WHERE p.couple_id = $1 AND p.status = 'completed'
             GROUP BY p.game_type_id, g.name
             ORDER BY p.game_type_id",
        )
        .bind(couple_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(CoupleStatistics {
            sessions_completed,
            total_score,
            per_game_type,
        })
    }
}
