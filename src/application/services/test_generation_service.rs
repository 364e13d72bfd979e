//! Practice Test Generation
//!
//! Tests are produced by a [`TestGenerator`]. The only generator today is
//! [`StubTestGenerator`], which returns deterministic placeholder questions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CHOICES_PER_QUESTION: usize = 4;

/// Requested difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// Generation parameters, already validated
#[derive(Debug, Clone)]
pub struct TestSpec {
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub question_count: u32,
    pub department_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub number: u32,
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer_index: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedTest {
    pub id: Uuid,
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub department_id: Option<i64>,
    pub status: &'static str,
    pub questions: Vec<Question>,
    pub generated_at: DateTime<Utc>,
}

/// Produces a practice test for a subject and topic.
pub trait TestGenerator: Send + Sync {
    fn generate(&self, params: &TestSpec) -> GeneratedTest;
}

/// Placeholder generator. Same input, same questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubTestGenerator;

impl StubTestGenerator {
    pub const STATUS: &'static str = "stub";
}

impl TestGenerator for StubTestGenerator {
    fn generate(&self, params: &TestSpec) -> GeneratedTest {
        let questions = (1..=params.question_count)
            .map(|number| {
                let answer_index = (number as usize - 1) % CHOICES_PER_QUESTION;
                let choices = (0..CHOICES_PER_QUESTION)
                    .map(|i| {
                        if i == answer_index {
                            format!("Correct statement about {}", params.topic)
                        } else {
                            format!("Distractor {} for {}", (b'A' + i as u8) as char, params.topic)
                        }
                    })
                    .collect();
                Question {
                    number,
                    prompt: format!(
                        "[{}] {}: {} question {} of {}",
                        params.difficulty.as_str(),
                        params.subject,
                        params.topic,
                        number,
                        params.question_count
                    ),
                    choices,
                    answer_index,
                }
            })
            .collect();

        GeneratedTest {
            id: Uuid::new_v4(),
            subject: params.subject.clone(),
            topic: params.topic.clone(),
            difficulty: params.difficulty,
            department_id: params.department_id,
            status: Self::STATUS,
            questions,
            generated_at: Utc::now(),
        }
    }
}
