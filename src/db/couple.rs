use ulid::Ulid;

use crate::error::{EngineError, EngineResult};

use super::models::{CoupleCreated, NewPartner, Partner};
use super::Db;

impl Db {
    /// Link two partners as a couple and issue each an opaque access token.
    pub async fn create_couple(
        &self,
        partner_a: &str,
        partner_b: &str,
    ) -> EngineResult<CoupleCreated> {
        let mut tx = self.pool.begin().await?;

        let couple_id: i64 = sqlx::query_scalar("INSERT INTO couples DEFAULT VALUES RETURNING id")
            .fetch_one(&mut *tx)
            .await?;

        let mut partners = Vec::with_capacity(2);
        for name in [partner_a, partner_b] {
            let access_token = Ulid::new().to_string();
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO partners (couple_id, display_name, access_token)
                 VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(couple_id)
            .bind(name)
            .bind(&access_token)
            .fetch_one(&mut *tx)
            .await?;

            partners.push(NewPartner {
                id,
                display_name: name.to_string(),
                access_token,
            });
        }

        tx.commit().await?;

        tracing::info!("couple {couple_id} linked");
        Ok(CoupleCreated {
            couple_id,
            partners,
        })
    }

    pub async fn partner_by_token(&self, token: &str) -> EngineResult<Option<Partner>> {
        let partner = sqlx::query_as::<_, Partner>(
            "SELECT id, couple_id, display_name FROM partners WHERE access_token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(partner)
    }

    /// The other member of `partner_id`'s couple.
    pub async fn other_partner(&self, couple_id: i64, partner_id: i64) -> EngineResult<Partner> {
        let partner = sqlx::query_as::<_, Partner>(
            "SELECT id, couple_id, display_name FROM partners
             WHERE couple_id = $1 AND id != $2",
        )
        .bind(couple_id)
        .bind(partner_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(EngineError::NotFound)?;

        Ok(partner)
    }
}
