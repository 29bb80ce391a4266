use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::{get_all_categories, get_category};
use crate::db::queries::questions::get_questions_for_category;
use crate::db::{Category, Question};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResponse};

use super::{paginate, PageQuery};

// `/categories` serves the map shape clients key dropdowns on: {id: label}
pub fn label_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.label)).collect()
}

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
    total_categories: usize,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesResponse>> {
    let categories = label_map(get_all_categories(&pool).await?);
    Ok(Json(CategoriesResponse {
        total_categories: categories.len(),
        success: true,
        categories,
    }))
}

async fn get_category_questions(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Query(page): Query<PageQuery>,
) -> ApiResponse<Json<CategoryQuestionsResponse>> {
    let questions = get_questions_for_category(&pool, id).await?;
    let total_questions = questions.len();
    let current_questions = paginate(questions, page.page());
    if current_questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    let category = get_category(&pool, id).await?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: current_questions,
        total_questions,
        current_category: category.map(|c| c.label),
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
        .with_state(state)
}
