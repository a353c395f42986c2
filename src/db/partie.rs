use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{EngineError, EngineResult};

use super::models::{Partie, PartieQuestion, PartieStatus, PartieSummary, Partner};
use super::Db;

impl Db {
    /// Start a new session of `game_type_id` for the caller's couple.
    ///
    /// The caller is the guesser; the other partner is the subject (you
    /// start a game to guess about your partner). Roles are fixed for the
    /// whole session. Returns the new session id.
    pub async fn start_partie(
        &self,
        actor: &Partner,
        game_type_id: &str,
        sub_quiz_id: Option<&str>,
    ) -> EngineResult<i64> {
        let game_type = match self.get_game_type(game_type_id).await {
            Err(EngineError::NotFound) => return Err(EngineError::InvalidGameType),
            other => other?,
        };
        if !game_type.active {
            return Err(EngineError::InvalidGameType);
        }

        let sub = match sub_quiz_id {
            Some(id) => match self.get_sub_quiz(id).await {
                Err(EngineError::NotFound) => return Err(EngineError::InvalidGameType),
                other => {
                    let sub = other?;
                    if sub.game_type_id != game_type.id {
                        return Err(EngineError::InvalidGameType);
                    }
                    Some(sub)
                }
            },
            None => None,
        };

        let pool = self.get_question_pool(game_type_id, sub_quiz_id).await?;

        let required = sub
            .as_ref()
            .map(|s| s.max_questions)
            .unwrap_or(game_type.min_questions);
        if (pool.len() as i64) < required {
            return Err(EngineError::InsufficientQuestions {
                available: pool.len() as i64,
                required,
            });
        }

        let shuffle_seed = rand::random::<i64>();
        let mut rng = StdRng::seed_from_u64(shuffle_seed as u64);

        // Sub-variants play a fixed question count; otherwise draw N
        // uniformly from [min, min(max, pool)].
        let question_count = match &sub {
            Some(s) => s.max_questions,
            None => {
                let upper = game_type.max_questions.min(pool.len() as i64);
                rng.gen_range(game_type.min_questions..=upper)
            }
        };

        let mut selected: Vec<i64> = pool.iter().map(|q| q.id).collect();
        selected.shuffle(&mut rng);
        selected.truncate(question_count as usize);

        let subject = self.other_partner(actor.couple_id, actor.id).await?;

        // Transaction: insert partie + partie_questions atomically
        let mut tx = self.pool.begin().await?;

        let partie_id: i64 = sqlx::query_scalar(
            "INSERT INTO parties (couple_id, game_type_id, sub_quiz_id, subject_partner_id,
                                  guesser_partner_id, shuffle_seed, question_count)
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(actor.couple_id)
        .bind(game_type_id)
        .bind(sub_quiz_id)
        .bind(subject.id)
        .bind(actor.id)
        .bind(shuffle_seed)
        .bind(question_count)
        .fetch_one(&mut *tx)
        .await?;

        for (question_number, question_id) in selected.iter().copied().enumerate() {
            sqlx::query(
                "INSERT INTO partie_questions (partie_id, question_number, question_id)
                 VALUES ($1, $2, $3)",
            )
            .bind(partie_id)
            .bind(question_number as i64)
            .bind(question_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "partie created for couple={}: partie_id={partie_id}, game_type={game_type_id}, questions={question_count}",
            actor.couple_id
        );
        Ok(partie_id)
    }

    pub async fn get_partie(&self, partie_id: i64) -> EngineResult<Partie> {
        let partie = sqlx::query_as::<_, Partie>(
            "SELECT id, couple_id, game_type_id, sub_quiz_id, subject_partner_id,
                    guesser_partner_id, question_count, status, score, started_at, ended_at
             FROM parties WHERE id = $1",
        )
        .bind(partie_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(EngineError::NotFound)?;

        Ok(partie)
    }

    /// Fetch a session, refusing access to anyone outside the owning couple.
    pub async fn partie_for_couple(&self, partie_id: i64, couple_id: i64) -> EngineResult<Partie> {
        let partie = self.get_partie(partie_id).await?;
        if partie.couple_id != couple_id {
            return Err(EngineError::Forbidden);
        }
        Ok(partie)
    }

    pub async fn list_parties(&self, couple_id: i64) -> EngineResult<Vec<PartieSummary>> {
        let parties = sqlx::query_as::<_, PartieSummary>(
            "SELECT p.id, p.game_type_id, g.name AS game_type_name, p.sub_quiz_id,
                    p.question_count, p.status, p.score, p.started_at, p.ended_at
             FROM parties p
             JOIN game_types g ON g.id = p.game_type_id
             WHERE p.couple_id = $1
             ORDER BY p.id DESC",
        )
        .bind(couple_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(parties)
    }

    pub async fn partie_questions(&self, partie_id: i64) -> EngineResult<Vec<PartieQuestion>> {
        let questions = sqlx::query_as::<_, PartieQuestion>(
            "SELECT pq.question_number, pq.question_id, q.text, q.option_a, q.option_b,
                    q.points, pq.subject_answer, pq.guesser_answer, pq.verdict, pq.corrected_by
             FROM partie_questions pq
             JOIN questions q ON q.id = pq.question_id
             WHERE pq.partie_id = $1
             ORDER BY pq.question_number",
        )
        .bind(partie_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    pub async fn get_partie_question(
        &self,
        partie_id: i64,
        question_number: i64,
    ) -> EngineResult<PartieQuestion> {
        let question = sqlx::query_as::<_, PartieQuestion>(
            "SELECT pq.question_number, pq.question_id, q.text, q.option_a, q.option_b,
                    q.points, pq.subject_answer, pq.guesser_answer, pq.verdict, pq.corrected_by
             FROM partie_questions pq
             JOIN questions q ON q.id = pq.question_id
             WHERE pq.partie_id = $1 AND pq.question_number = $2",
        )
        .bind(partie_id)
        .bind(question_number)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(EngineError::NotFound)?;

        Ok(question)
    }

    /// Complete a session: every correction-needing question must carry a
    /// verdict, every other question at least one answer. Computes the
    /// score and transitions `in_progress -> completed` with a
    /// compare-and-set on the status column.
    pub async fn complete_partie(&self, partie: &Partie) -> EngineResult<i64> {
        if partie.status != PartieStatus::InProgress {
            return Err(EngineError::SessionNotActive);
        }

        let game_type = self.get_game_type(&partie.game_type_id).await?;

        let (remaining, score): (i64, i64) = if game_type.needs_correction {
            let remaining = sqlx::query_scalar(
                "SELECT COUNT(*) FROM partie_questions WHERE partie_id = $1 AND verdict IS NULL",
            )
            .bind(partie.id)
            .fetch_one(&self.pool)
            .await?;

            let score = sqlx::query_scalar(
                "SELECT COALESCE(SUM(q.points), 0)
                 FROM partie_questions pq
                 JOIN questions q ON q.id = pq.question_id
                 WHERE pq.partie_id = $1 AND pq.verdict = 'correct'",
            )
            .bind(partie.id)
            .fetch_one(&self.pool)
            .await?;

            (remaining, score)
        } else {
            let remaining = sqlx::query_scalar(
                "SELECT COUNT(*) FROM partie_questions
                 WHERE partie_id = $1 AND subject_answer IS NULL AND guesser_answer IS NULL",
            )
            .bind(partie.id)
            .fetch_one(&self.pool)
            .await?;

            let score = sqlx::query_scalar(
                "SELECT COALESCE(SUM(q.points), 0)
                 FROM partie_questions pq
                 JOIN questions q ON q.id = pq.question_id
                 WHERE pq.partie_id = $1
                   AND (pq.subject_answer IS NOT NULL OR pq.guesser_answer IS NOT NULL)",
            )
            .bind(partie.id)
            .fetch_one(&self.pool)
            .await?;

            (remaining, score)
        };

        if remaining > 0 {
            return Err(EngineError::NotYetAnswerable);
        }

        let result = sqlx::query(
            "UPDATE parties SET status = 'completed', score = $1, ended_at = CURRENT_TIMESTAMP
             WHERE id = $2 AND status = 'in_progress'",
        )
        .bind(score)
        .bind(partie.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(EngineError::SessionNotActive);
        }

        tracing::info!("partie {} completed with score {score}", partie.id);
        Ok(score)
    }

    /// Either partner may abandon an in-progress session. No score.
    pub async fn abandon_partie(&self, partie: &Partie) -> EngineResult<()> {
        let result = sqlx::query(
            "UPDATE parties SET status = 'abandoned', ended_at = CURRENT_TIMESTAMP
             WHERE id = $1 AND status = 'in_progress'",
        )
        .bind(partie.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(EngineError::SessionNotActive);
        }

        tracing::info!("partie {} abandoned", partie.id);
        Ok(())
    }
}
