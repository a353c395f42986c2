use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    db::models::{Partie, PartieQuestion, PartieStatus, PartieSummary, Verdict},
    extractors::AuthGuard,
    names,
    rejections::AppError,
    AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartPartieBody {
    game_type_id: String,
    #[serde(default)]
    sub_quiz_id: Option<String>,
}

#[derive(Deserialize)]
struct AnswerBody {
    text: String,
}

#[derive(Deserialize)]
struct CorrectionBody {
    verdict: Verdict,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartieDetail {
    pub id: i64,
    pub game_type_id: String,
    pub sub_quiz_id: Option<String>,
    pub status: PartieStatus,
    pub score: Option<i64>,
    pub question_count: i64,
    pub subject_partner_id: i64,
    pub guesser_partner_id: i64,
    pub started_at: String,
    pub ended_at: Option<String>,
    pub questions: Vec<QuestionView>,
}

/// Per-question state as one partner sees it: the partner's answer text is
/// revealed only once both sides have answered, before that only a flag.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub question_number: i64,
    pub text: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub points: i64,
    pub my_answer: Option<String>,
    pub partner_answered: bool,
    pub partner_answer: Option<String>,
    pub verdict: Option<Verdict>,
    pub corrected_by: Option<i64>,
}

fn question_view(partie: &Partie, actor_id: i64, question: PartieQuestion) -> QuestionView {
    let (my_answer, partner_answer) = if actor_id == partie.subject_partner_id {
        (question.subject_answer, question.guesser_answer)
    } else {
        (question.guesser_answer, question.subject_answer)
    };

    let partner_answered = partner_answer.is_some();
    let both_answered = my_answer.is_some() && partner_answered;

    QuestionView {
        question_number: question.question_number,
        text: question.text,
        option_a: question.option_a,
        option_b: question.option_b,
        points: question.points,
        my_answer,
        partner_answered,
        partner_answer: if both_answered { partner_answer } else { None },
        verdict: question.verdict,
        corrected_by: question.corrected_by,
    }
}

async fn partie_detail(
    state: &AppState,
    partie: Partie,
    actor_id: i64,
) -> Result<PartieDetail, AppError> {
    let questions = state
        .db
        .partie_questions(partie.id)
        .await?
        .into_iter()
        .map(|q| question_view(&partie, actor_id, q))
        .collect();

    Ok(PartieDetail {
        id: partie.id,
        game_type_id: partie.game_type_id,
        sub_quiz_id: partie.sub_quiz_id,
        status: partie.status,
        score: partie.score,
        question_count: partie.question_count,
        subject_partner_id: partie.subject_partner_id,
        guesser_partner_id: partie.guesser_partner_id,
        started_at: partie.started_at,
        ended_at: partie.ended_at,
        questions,
    })
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::PARTIES_URL, post(start_partie).get(list_parties))
        .route("/parties/{partie_id}", get(get_partie))
        .route(
            "/parties/{partie_id}/questions/{question_number}/answer",
            post(submit_answer),
        )
        .route(
            "/parties/{partie_id}/questions/{question_number}/correction",
            post(submit_correction),
        )
        .route("/parties/{partie_id}/complete", post(complete_partie))
        .route("/parties/{partie_id}/abandon", post(abandon_partie))
}

async fn start_partie(
    AuthGuard(actor): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<StartPartieBody>,
) -> Result<(StatusCode, Json<PartieDetail>), AppError> {
    let partie_id = state
        .db
        .start_partie(&actor, &body.game_type_id, body.sub_quiz_id.as_deref())
        .await?;

    let partie = state.db.get_partie(partie_id).await?;
    let detail = partie_detail(&state, partie, actor.id).await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

async fn list_parties(
    AuthGuard(actor): AuthGuard,
    State(state): State<AppState>,
) -> Result<Json<Vec<PartieSummary>>, AppError> {
    let parties = state.db.list_parties(actor.couple_id).await?;
    Ok(Json(parties))
}

async fn get_partie(
    AuthGuard(actor): AuthGuard,
    State(state): State<AppState>,
    Path(partie_id): Path<i64>,
) -> Result<Json<PartieDetail>, AppError> {
    let partie = state.db.partie_for_couple(partie_id, actor.couple_id).await?;
    let detail = partie_detail(&state, partie, actor.id).await?;
    Ok(Json(detail))
}

async fn submit_answer(
    AuthGuard(actor): AuthGuard,
    State(state): State<AppState>,
    Path((partie_id, question_number)): Path<(i64, i64)>,
    Json(body): Json<AnswerBody>,
) -> Result<Json<QuestionView>, AppError> {
    let text = body.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("answer text must not be empty"));
    }

    let partie = state.db.partie_for_couple(partie_id, actor.couple_id).await?;
    state
        .db
        .record_answer(&partie, question_number, actor.id, text)
        .await?;

    let question = state
        .db
        .get_partie_question(partie_id, question_number)
        .await?;
    Ok(Json(question_view(&partie, actor.id, question)))
}

async fn submit_correction(
    AuthGuard(actor): AuthGuard,
    State(state): State<AppState>,
    Path((partie_id, question_number)): Path<(i64, i64)>,
    Json(body): Json<CorrectionBody>,
) -> Result<Json<QuestionView>, AppError> {
    let partie = state.db.partie_for_couple(partie_id, actor.couple_id).await?;

    // Correction is not part of the protocol for game types without it.
    let game_type = state.db.get_game_type(&partie.game_type_id).await?;
    if !game_type.needs_correction {
        return Err(crate::error::EngineError::Forbidden.into());
    }

    state
        .db
        .record_verdict(&partie, question_number, actor.id, body.verdict)
        .await?;

    let question = state
        .db
        .get_partie_question(partie_id, question_number)
        .await?;
    Ok(Json(question_view(&partie, actor.id, question)))
}

async fn complete_partie(
    AuthGuard(actor): AuthGuard,
    State(state): State<AppState>,
    Path(partie_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let partie = state.db.partie_for_couple(partie_id, actor.couple_id).await?;
    let score = state.db.complete_partie(&partie).await?;

    Ok(Json(json!({
        "id": partie_id,
        "status": PartieStatus::Completed,
        "score": score,
    })))
}

async fn abandon_partie(
    AuthGuard(actor): AuthGuard,
    State(state): State<AppState>,
    Path(partie_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let partie = state.db.partie_for_couple(partie_id, actor.couple_id).await?;
    state.db.abandon_partie(&partie).await?;

    Ok(StatusCode::NO_CONTENT)
}
