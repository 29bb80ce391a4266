use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::categories::{get_all_categories, get_category};
use crate::db::queries::questions::{
    count_questions, create_question, delete_question, get_all_questions, search_questions,
};
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResponse};

use super::categories::label_map;
use super::{paginate, PageQuery};

#[derive(Deserialize)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    category: Option<i64>,
    difficulty: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct QuestionDeletedResponse {
    success: bool,
    question_deleted: i64,
    total_questions: i64,
}

#[derive(Serialize)]
struct QuestionCreatedResponse {
    success: bool,
    question_created: i64,
    total_questions: i64,
}

// the category shown alongside a page is the one the page's first
// question belongs to; None when that row is missing
async fn current_category(
    pool: &SqlitePool,
    questions: &[Question],
) -> ApiResponse<Option<String>> {
    let Some(category_id) = questions.first().and_then(|q| q.category) else {
        return Ok(None);
    };
    Ok(get_category(pool, category_id).await?.map(|c| c.label))
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    Query(page): Query<PageQuery>,
) -> ApiResponse<Json<QuestionsResponse>> {
    let questions = get_all_questions(&pool).await?;
    let total_questions = questions.len();
    let current_questions = paginate(questions, page.page());
    if current_questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    let categories = label_map(get_all_categories(&pool).await?);
    let current_category = current_category(&pool, &current_questions).await?;

    Ok(Json(QuestionsResponse {
        success: true,
        questions: current_questions,
        total_questions,
        categories,
        current_category,
    }))
}

async fn remove_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResponse<Json<QuestionDeletedResponse>> {
    let deleted = delete_question(&pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::Unprocessable);
    }
    tracing::info!(question_id = id, "question deleted");

    Ok(Json(QuestionDeletedResponse {
        success: true,
        question_deleted: id,
        total_questions: count_questions(&pool).await?,
    }))
}

async fn add_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<NewQuestion>, JsonRejection>,
) -> ApiResponse<Json<QuestionCreatedResponse>> {
    let Json(new_question) = body?;
    let question = match new_question.question.as_deref() {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(ApiError::Unprocessable),
    };

    let id = create_question(
        &pool,
        question,
        new_question.answer.as_deref(),
        new_question.category,
        new_question.difficulty,
    )
    .await
    .map_err(|_| ApiError::Unprocessable)?;
    tracing::info!(question_id = id, "question created");

    Ok(Json(QuestionCreatedResponse {
        success: true,
        question_created: id,
        total_questions: count_questions(&pool).await?,
    }))
}

async fn search(
    State(pool): State<SqlitePool>,
    Query(page): Query<PageQuery>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<Json<SearchResponse>> {
    let Json(body) = body?;
    let term = body.search_term.unwrap_or_default();
    let questions = search_questions(&pool, &term).await?;
    let total_questions = questions.len();
    let current_questions = paginate(questions, page.page());
    if current_questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    let current_category = current_category(&pool, &current_questions).await?;

    Ok(Json(SearchResponse {
        success: true,
        questions: current_questions,
        total_questions,
        current_category,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(add_question))
        .route("/questions/{id}", delete(remove_question))
        .route("/questions/search", post(search))
        .with_state(state)
}
