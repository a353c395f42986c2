mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use duojeu::db::Db;
use duojeu::models::CatalogDef;
use duojeu::{names, router, AppState};
use http_body_util::BodyExt;
use tower::ServiceExt;

const TEST_CATALOG: &str = r#"
{
  "gameTypes": [
    {
      "id": "quiz-facile-1",
      "name": "Quiz découverte",
      "needsCorrection": true,
      "minQuestions": 2,
      "maxQuestions": 2,
      "questions": ["Question 1 ?", "Question 2 ?"]
    },
    {
      "id": "dilemmes",
      "name": "Dilemmes",
      "needsCorrection": false,
      "minQuestions": 2,
      "maxQuestions": 2,
      "questions": ["Mer || Montagne", "Thé || Café"]
    }
  ]
}
"#;

async fn seed(db: &Db) {
    let def: CatalogDef = serde_json::from_str(TEST_CATALOG).expect("test catalog parses");
    db.replace_catalog(&def).await.expect("catalog seeds");
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[tokio::test]
async fn protected_routes_reject_requests_without_a_token() {
    let db = common::create_test_db().await;
    let app = router(AppState { db });

    let cases = [
        (Method::GET, names::GAME_TYPES_URL.to_string()),
        (Method::GET, names::PARTIES_URL.to_string()),
        (Method::POST, names::PARTIES_URL.to_string()),
        (Method::GET, names::partie_url(1)),
        (Method::POST, names::answer_url(1, 0)),
        (Method::POST, names::correction_url(1, 0)),
        (Method::POST, names::complete_url(1)),
        (Method::POST, names::abandon_url(1)),
        (Method::GET, names::STATISTICS_URL.to_string()),
    ];

    for (method, uri) in cases {
        let req = Request::builder()
            .method(method)
            .uri(&uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .expect("request build should succeed");

        let resp = app
            .clone()
            .oneshot(req)
            .await
            .expect("router should respond");

        assert_eq!(
            resp.status(),
            StatusCode::UNAUTHORIZED,
            "expected UNAUTHORIZED for {uri}",
        );
    }
}

#[tokio::test]
async fn a_linked_partner_can_play_a_full_session_over_http() {
    let db = common::create_test_db().await;
    seed(&db).await;
    let couple = db.create_couple("Alice", "Benoît").await.unwrap();
    let token_a = couple.partners[0].access_token.clone();
    let token_b = couple.partners[1].access_token.clone();

    let app = router(AppState { db });

    // Catalog is visible with a valid token
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri(names::GAME_TYPES_URL)
                .header(header::AUTHORIZATION, bearer(&token_a))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Partner A starts a session (becoming the guesser)
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(names::PARTIES_URL)
                .header(header::AUTHORIZATION, bearer(&token_a))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"gameTypeId":"quiz-facile-1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let detail: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let partie_id = detail["id"].as_i64().unwrap();
    assert_eq!(detail["status"], "in_progress");
    assert_eq!(detail["questionCount"], 2);

    // Both partners answer question 0, then the subject (B) corrects it
    for token in [&token_b, &token_a] {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(names::answer_url(partie_id, 0))
                    .header(header::AUTHORIZATION, bearer(token))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"text":"bleu"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(names::correction_url(partie_id, 0))
                .header(header::AUTHORIZATION, bearer(&token_b))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"verdict":"correct"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let question: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(question["verdict"], "correct");
}

#[tokio::test]
async fn another_couple_is_forbidden_from_a_session_it_does_not_own() {
    let db = common::create_test_db().await;
    seed(&db).await;

    let owners = db.create_couple("Alice", "Benoît").await.unwrap();
    let guesser = db
        .partner_by_token(&owners.partners[0].access_token)
        .await
        .unwrap()
        .unwrap();
    let partie_id = db.start_partie(&guesser, "quiz-facile-1", None).await.unwrap();

    let strangers = db.create_couple("Chloé", "David").await.unwrap();
    let stranger_token = strangers.partners[0].access_token.clone();

    let app = router(AppState { db });

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri(names::partie_url(partie_id))
                .header(header::AUTHORIZATION, bearer(&stranger_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(names::abandon_url(partie_id))
                .header(header::AUTHORIZATION, bearer(&stranger_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_gameplay_requests_are_rejected() {
    let db = common::create_test_db().await;
    seed(&db).await;
    let couple = db.create_couple("Alice", "Benoît").await.unwrap();
    let token_a = couple.partners[0].access_token.clone();
    let guesser = db
        .partner_by_token(&token_a)
        .await
        .unwrap()
        .unwrap();
    let partie_id = db.start_partie(&guesser, "dilemmes", None).await.unwrap();

    let app = router(AppState { db });

    // Blank answer text
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(names::answer_url(partie_id, 0))
                .header(header::AUTHORIZATION, bearer(&token_a))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"text":"   "}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Correction has no place in a game type without correction
    let resp = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(names::correction_url(partie_id, 0))
                .header(header::AUTHORIZATION, bearer(&token_a))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"verdict":"correct"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
