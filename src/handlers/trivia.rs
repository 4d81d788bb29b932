use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config;
use crate::error::{ApiError, ApiResult};
use crate::pager::{page_from_query, paginate};
use crate::quiz::{next_question, CategoryFilter};
use crate::state::AppState;
use crate::store::Question;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Kept as a raw string so a non-numeric value falls back to page 1
    /// instead of failing query extraction
    pub page: Option<String>,
}

/// GET /trivia/categories - all categories as an id -> type map
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let categories = state.categories.scan().await;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({
        "success": true,
        "categories": category_map(&state).await,
        "total_categories": categories.len(),
    })))
}

/// GET /trivia/questions?page= - paginated question listing
pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Value>> {
    let selection = state.questions.scan().await;
    let page = page_from_query(query.page.as_deref());
    let current = paginate(page, config::config().api.page_size, &selection);

    // A page past the end of the listing is a missing resource
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({
        "success": true,
        "questions": format_all(&current),
        "total_questions": selection.len(),
        "categories": category_map(&state).await,
        "current_category": Value::Null,
    })))
}

/// GET /trivia/categories/:id/questions - all questions in one category
pub async fn questions_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let selection = state.questions.scan_where(|q| q.category == category_id).await;
    if selection.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({
        "success": true,
        "questions": format_all(&selection),
        "total_questions": selection.len(),
        "current_category": category_id,
    })))
}

#[derive(Debug, Deserialize)]
struct NewQuestion {
    question: String,
    answer: String,
    category: i64,
    difficulty: u8,
}

/// POST /trivia/questions - create a question, or search when the body
/// carries `searchTerm` (the original API multiplexed both on one route)
pub async fn create_or_search_question(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    if let Some(term) = body.get("searchTerm").and_then(Value::as_str) {
        return search_questions(&state, term, &query).await;
    }

    let input: NewQuestion =
        serde_json::from_value(body).map_err(|_| ApiError::Unprocessable)?;
    if input.question.is_empty() || input.answer.is_empty() || input.difficulty == 0 {
        return Err(ApiError::Unprocessable);
    }
    // category must reference an existing row
    if state.categories.get(input.category).await.is_none() {
        return Err(ApiError::Unprocessable);
    }

    let created = state
        .questions
        .insert(Question {
            id: 0,
            question: input.question,
            answer: input.answer,
            category: input.category,
            difficulty: input.difficulty,
        })
        .await?;
    tracing::info!("created question {}", created.id);

    let selection = state.questions.scan().await;
    let page = page_from_query(query.page.as_deref());
    let current = paginate(page, config::config().api.page_size, &selection);

    Ok(Json(json!({
        "success": true,
        "created": created.id,
        "questions": format_all(&current),
        "total_questions": selection.len(),
    })))
}

async fn search_questions(
    state: &AppState,
    term: &str,
    query: &PageQuery,
) -> ApiResult<Json<Value>> {
    let needle = term.to_lowercase();
    let selection =
        state.questions.scan_where(|q| q.question.to_lowercase().contains(&needle)).await;
    if selection.is_empty() {
        return Err(ApiError::NotFound);
    }

    let page = page_from_query(query.page.as_deref());
    let current = paginate(page, config::config().api.page_size, &selection);

    Ok(Json(json!({
        "success": true,
        "questions": format_all(&current),
        "total_questions": selection.len(),
    })))
}

/// DELETE /trivia/questions/:id
pub async fn delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    state.questions.remove(question_id).await?;
    tracing::info!("deleted question {}", question_id);

    let selection = state.questions.scan().await;
    let current = paginate(1, config::config().api.page_size, &selection);

    Ok(Json(json!({
        "success": true,
        "deleted": question_id,
        "questions": format_all(&current),
        "total_questions": selection.len(),
    })))
}

#[derive(Debug, Deserialize)]
struct QuizRequest {
    quiz_category: QuizCategory,
    #[serde(default)]
    previous_questions: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct QuizCategory {
    #[serde(default)]
    id: Option<i64>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl QuizCategory {
    /// `{"type": "click"}` is the frontend's "All" sentinel, as is id 0
    fn filter(&self) -> Result<CategoryFilter, ApiError> {
        if self.kind.as_deref() == Some("click") {
            return Ok(CategoryFilter::All);
        }
        match self.id {
            Some(0) => Ok(CategoryFilter::All),
            Some(id) => Ok(CategoryFilter::ById(id)),
            None => Err(ApiError::Unprocessable),
        }
    }
}

/// POST /trivia/quizzes - next random unseen question, null when the
/// category is exhausted (quiz complete, not an error)
pub async fn play_quiz(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let request: QuizRequest =
        serde_json::from_value(body).map_err(|_| ApiError::Unprocessable)?;
    let filter = request.quiz_category.filter()?;

    let source = state.questions.scan().await;
    let mut rng = rand::thread_rng();
    let question = next_question(filter, &request.previous_questions, &source, &mut rng);

    Ok(Json(json!({
        "success": true,
        "question": question.map(|q| q.format()),
    })))
}

async fn category_map(state: &AppState) -> Value {
    let mut map = BTreeMap::new();
    for category in state.categories.scan().await {
        map.insert(category.id.to_string(), category.label);
    }
    json!(map)
}

fn format_all(questions: &[Question]) -> Vec<Value> {
    questions.iter().map(Question::format).collect()
}
