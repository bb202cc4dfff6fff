use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::BankError;

/// A single trivia entry. Immutable once loaded; drawn by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub question: String,
    pub answer: String,
}

/// Visual theme pair for a drawn capsule: body fill plus a darker shade
/// for the lower half and card accents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeColor {
    pub fill: String,
    pub shade: String,
}

/// Fixed content for the machine: the trivia list and the capsule palette.
///
/// Both lists are baked into the binary at build time and validated once
/// on load. Empty content is a startup failure, never a draw-time one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
    palette: Vec<PrizeColor>,
}

impl QuestionBank {
    /// Load the embedded default bank.
    pub fn load_embedded() -> Result<Self, BankError> {
        const EMBEDDED_BANK: &str = include_str!("../config/questions.json");
        Self::from_json(EMBEDDED_BANK)
    }

    /// Parse and validate a bank from JSON.
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let bank: QuestionBank = serde_json::from_str(json).map_err(BankError::ParseFailed)?;
        bank.validate()?;
        tracing::info!(
            questions = bank.questions.len(),
            colors = bank.palette.len(),
            "Question bank loaded"
        );
        Ok(bank)
    }

    /// Build a bank from already-parsed parts (test convenience).
    pub fn new(questions: Vec<Question>, palette: Vec<PrizeColor>) -> Result<Self, BankError> {
        let bank = Self { questions, palette };
        bank.validate()?;
        Ok(bank)
    }

    fn validate(&self) -> Result<(), BankError> {
        if self.questions.is_empty() {
            return Err(BankError::NoQuestions);
        }
        if self.palette.is_empty() {
            return Err(BankError::NoColors);
        }
        let mut seen = HashSet::new();
        for q in &self.questions {
            if !seen.insert(q.id) {
                return Err(BankError::DuplicateId(q.id));
            }
        }
        Ok(())
    }

    /// Draw one question uniformly at random.
    pub fn draw_question<R: Rng>(&self, rng: &mut R) -> &Question {
        &self.questions[rng.gen_range(0..self.questions.len())]
    }

    /// Draw one prize color uniformly at random.
    pub fn draw_color<R: Rng>(&self, rng: &mut R) -> &PrizeColor {
        &self.palette[rng.gen_range(0..self.palette.len())]
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn palette(&self) -> &[PrizeColor] {
        &self.palette
    }
}
