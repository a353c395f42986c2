use crate::error::{EngineError, EngineResult};
use crate::models::{CatalogDef, QuestionDef};

use super::models::{GameType, Question, SubQuiz};
use super::Db;

impl Db {
    pub async fn list_game_types(&self) -> EngineResult<Vec<GameType>> {
        let game_types = sqlx::query_as::<_, GameType>(
            "SELECT id, name, description, icon, color, difficulty, duration_min, duration_max,
                    needs_correction, min_questions, max_questions, active
             FROM game_types WHERE active = 1 ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(game_types)
    }

    pub async fn get_game_type(&self, id: &str) -> EngineResult<GameType> {
        let game_type = sqlx::query_as::<_, GameType>(
            "SELECT id, name, description, icon, color, difficulty, duration_min, duration_max,
                    needs_correction, min_questions, max_questions, active
             FROM game_types WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(EngineError::NotFound)?;

        Ok(game_type)
    }

    pub async fn sub_quizzes(&self, game_type_id: &str) -> EngineResult<Vec<SubQuiz>> {
        let subs = sqlx::query_as::<_, SubQuiz>(
            "SELECT id, game_type_id, difficulty, max_questions
             FROM sub_quizzes WHERE game_type_id = $1 ORDER BY id",
        )
        .bind(game_type_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subs)
    }

    pub async fn get_sub_quiz(&self, id: &str) -> EngineResult<SubQuiz> {
        let sub = sqlx::query_as::<_, SubQuiz>(
            "SELECT id, game_type_id, difficulty, max_questions FROM sub_quizzes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(EngineError::NotFound)?;

        Ok(sub)
    }

    /// Active questions for a game type. Without a sub-variant this is the
    /// type's top-level pool (questions not attached to any sub-variant).
    pub async fn get_question_pool(
        &self,
        game_type_id: &str,
        sub_quiz_id: Option<&str>,
    ) -> EngineResult<Vec<Question>> {
        // NotFound on unknown ids, before touching the questions table
        self.get_game_type(game_type_id).await?;

        let questions = match sub_quiz_id {
            Some(sub_id) => {
                let sub = self.get_sub_quiz(sub_id).await?;
                if sub.game_type_id != game_type_id {
                    return Err(EngineError::InvalidGameType);
                }

                sqlx::query_as::<_, Question>(
                    "SELECT id, game_type_id, sub_quiz_id, text, option_a, option_b, points,
                            difficulty, category
                     FROM questions
                     WHERE game_type_id = $1 AND sub_quiz_id = $2 AND active = 1
                     ORDER BY id",
                )
                .bind(game_type_id)
                .bind(sub_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Question>(
                    "SELECT id, game_type_id, sub_quiz_id, text, option_a, option_b, points,
                            difficulty, category
                     FROM questions
                     WHERE game_type_id = $1 AND sub_quiz_id IS NULL AND active = 1
                     ORDER BY id",
                )
                .bind(game_type_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(questions)
    }

    /// Wipe and reload the entire catalog in one transaction. Administrative
    /// offline operation; fails if gameplay data still references the old
    /// catalog. Returns `(game_types, questions)` inserted.
    pub async fn replace_catalog(&self, def: &CatalogDef) -> EngineResult<(usize, usize)> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM questions").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM sub_quizzes").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM game_types").execute(&mut *tx).await?;

        let mut question_count = 0usize;

        for game_type in &def.game_types {
            sqlx::query(
                "INSERT INTO game_types (id, name, description, icon, color, difficulty,
                                         duration_min, duration_max, needs_correction,
                                         min_questions, max_questions)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
            )
            .bind(&game_type.id)
            .bind(&game_type.name)
            .bind(&game_type.description)
            .bind(&game_type.icon)
            .bind(&game_type.color)
            .bind(&game_type.difficulty)
            .bind(game_type.duration_min)
            .bind(game_type.duration_max)
            .bind(game_type.needs_correction)
            .bind(game_type.min_questions)
            .bind(game_type.max_questions)
            .execute(&mut *tx)
            .await?;

            for question in &game_type.questions {
                Self::insert_question_tx(&mut tx, &game_type.id, None, question).await?;
                question_count += 1;
            }

            for sub in &game_type.sub_quizzes {
                sqlx::query(
                    "INSERT INTO sub_quizzes (id, game_type_id, difficulty, max_questions)
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(&sub.id)
                .bind(&game_type.id)
                .bind(&sub.difficulty)
                .bind(sub.max_questions)
                .execute(&mut *tx)
                .await?;

                for question in &sub.questions {
                    Self::insert_question_tx(&mut tx, &game_type.id, Some(&sub.id), question)
                        .await?;
                    question_count += 1;
                }
            }
        }

        tx.commit().await?;

        tracing::info!(
            game_types = def.game_types.len(),
            questions = question_count,
            "catalog replaced"
        );
        Ok((def.game_types.len(), question_count))
    }

    async fn insert_question_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        game_type_id: &str,
        sub_quiz_id: Option<&str>,
        question: &QuestionDef,
    ) -> EngineResult<()> {
        let (text, option_a, option_b) = question.split_text();

        sqlx::query(
            "INSERT INTO questions (game_type_id, sub_quiz_id, text, option_a, option_b,
                                    points, difficulty, category)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(game_type_id)
        .bind(sub_quiz_id)
        .bind(text)
        .bind(option_a)
        .bind(option_b)
        .bind(question.points())
        .bind(question.difficulty())
        .bind(question.category())
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
