//! Practice Test Generation Handler

use axum::{extract::State, Json};

use crate::application::dto::request::GenerateTestRequest;
use crate::application::dto::response::GeneratedTestResponse;
use crate::application::services::{Difficulty, TestSpec};
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

pub const DEFAULT_QUESTION_COUNT: u32 = 10;

/// Generate a practice test
pub async fn generate_test(
    State(state): State<AppState>,
    Json(body): Json<GenerateTestRequest>,
) -> Result<Json<GeneratedTestResponse>, AppError> {
    validate_request(&body)?;

    let difficulty = match body.difficulty.as_deref() {
        None => Difficulty::default(),
        Some(raw) => parse_difficulty(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown difficulty: {}", raw)))?,
    };
    let department_id = body
        .department_id
        .as_deref()
        .map(|raw| parse_id(raw, "department"))
        .transpose()?;

    let test = state.test_generator.generate(&TestSpec {
        subject: body.subject.trim().to_string(),
        topic: body.topic.trim().to_string(),
        difficulty,
        question_count: body.question_count.unwrap_or(DEFAULT_QUESTION_COUNT),
        department_id,
    });

    tracing::debug!(
        test_id = %test.id,
        questions = test.questions.len(),
        "Practice test generated"
    );

    Ok(Json(test.into()))
}

fn parse_difficulty(raw: &str) -> Option<Difficulty> {
    match raw.to_ascii_lowercase().as_str() {
        "easy" => Some(Difficulty::Easy),
        "medium" => Some(Difficulty::Medium),
        "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}
