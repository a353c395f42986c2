//! Answer and correction rules.
//!
//! Answers land in per-role columns (`subject_answer` / `guesser_answer`),
//! so the two partners' concurrent submissions are isolated from each
//! other. Both the answer write and the verdict write are single guarded
//! UPDATE statements: the precondition sits in the WHERE clause, so the
//! check and the mutation are atomic and a lost-update race between two
//! rapid calls is impossible.

use crate::error::{EngineError, EngineResult};

use super::models::{Partie, PartieStatus, Role, Verdict};
use super::Db;

impl Db {
    fn role_of(partie: &Partie, actor_id: i64) -> EngineResult<Role> {
        if actor_id == partie.subject_partner_id {
            Ok(Role::Subject)
        } else if actor_id == partie.guesser_partner_id {
            Ok(Role::Guesser)
        } else {
            Err(EngineError::Forbidden)
        }
    }

    /// Record `actor_id`'s answer to question `question_number`.
    ///
    /// Re-answering overwrites only the actor's own slot, and only while no
    /// verdict exists; once corrected the row is immutable and this fails
    /// with `AlreadyAnswered`.
    pub async fn record_answer(
        &self,
        partie: &Partie,
        question_number: i64,
        actor_id: i64,
        text: &str,
    ) -> EngineResult<()> {
        if partie.status != PartieStatus::InProgress {
            return Err(EngineError::SessionNotActive);
        }

        let role = Self::role_of(partie, actor_id)?;
        let sql = match role {
            Role::Subject => {
                "UPDATE partie_questions SET subject_answer = $1
                 WHERE partie_id = $2 AND question_number = $3 AND verdict IS NULL"
            }
            Role::Guesser => {
                "UPDATE partie_questions SET guesser_answer = $1
                 WHERE partie_id = $2 AND question_number = $3 AND verdict IS NULL"
            }
        };

        let result = sqlx::query(sql)
            .bind(text)
            .bind(partie.id)
            .bind(question_number)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            // Guard rejected the write: NotFound if the question index is
            // unknown, otherwise the row is locked by a verdict.
            self.get_partie_question(partie.id, question_number).await?;
            return Err(EngineError::AlreadyAnswered);
        }

        tracing::info!(
            "answer recorded for partie={} question={question_number} role={role:?}",
            partie.id
        );
        Ok(())
    }

    /// Record the subject's verdict on the guesser's answer.
    ///
    /// Write-once: the `verdict IS NULL` clause is the compare-and-set, and
    /// both answers must already be present. Only the subject may judge.
    pub async fn record_verdict(
        &self,
        partie: &Partie,
        question_number: i64,
        actor_id: i64,
        verdict: Verdict,
    ) -> EngineResult<()> {
        if partie.status != PartieStatus::InProgress {
            return Err(EngineError::SessionNotActive);
        }

        match Self::role_of(partie, actor_id)? {
            Role::Subject => {}
            Role::Guesser => return Err(EngineError::Forbidden),
        }

        let result = sqlx::query(
            "UPDATE partie_questions SET verdict = $1, corrected_by = $2
             WHERE partie_id = $3 AND question_number = $4
               AND verdict IS NULL
               AND subject_answer IS NOT NULL
               AND guesser_answer IS NOT NULL",
        )
        .bind(verdict)
        .bind(actor_id)
        .bind(partie.id)
        .bind(question_number)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let question = self.get_partie_question(partie.id, question_number).await?;
            if question.verdict.is_some() {
                return Err(EngineError::AlreadyCorrected);
            }
            return Err(EngineError::NotYetAnswerable);
        }

        tracing::info!(
            "verdict {verdict:?} recorded for partie={} question={question_number}",
            partie.id
        );
        Ok(())
    }
}
