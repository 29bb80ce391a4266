use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::db::queries::questions::{get_all_questions, get_questions_for_category};
use crate::db::Question;
use crate::quiz;
use crate::server::app::AppState;
use crate::server::error::ApiResponse;
use crate::telemetry::QUIZ_QUESTION_CNTR;

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: Option<QuizCategory>,
}

// clients send the id as a number or a numeric string; "type" rides along
// unused but is part of the wire shape
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    id: Option<i64>,
    #[serde(rename = "type")]
    #[allow(dead_code)]
    label: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum QuizResponse {
    Drawn {
        success: bool,
        question_id: i64,
        question: Question,
    },
    Exhausted {
        question: Option<Question>,
    },
}

async fn next_quiz_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizBody>, JsonRejection>,
) -> ApiResponse<Json<QuizResponse>> {
    let Json(body) = body?;
    // id 0 (or no quiz_category at all) means "all categories"
    let category_id = body
        .quiz_category
        .and_then(|c| c.id)
        .filter(|&id| id != 0);

    let eligible = match category_id {
        Some(id) => get_questions_for_category(&pool, id).await?,
        None => get_all_questions(&pool).await?,
    };
    let seen: HashSet<i64> = body.previous_questions.into_iter().collect();

    let Some(question) = quiz::draw(eligible, &seen) else {
        return Ok(Json(QuizResponse::Exhausted { question: None }));
    };

    let category_label = category_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "all".to_owned());
    QUIZ_QUESTION_CNTR
        .with_label_values(&[category_label.as_str()])
        .inc();
    tracing::debug!(question_id = question.id, "quiz question drawn");

    Ok(Json(QuizResponse::Drawn {
        success: true,
        question_id: question.id,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_quiz_question))
        .with_state(state)
}
