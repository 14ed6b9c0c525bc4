use crate::domain::questions::{question_bank, question_count};
use crate::foundation::{PollError, Result};

/// In-progress questionnaire session. Created empty when the user opens the
/// questionnaire, mutated one answer at a time, discarded after a successful
/// submission or an explicit restart. Never persisted.
#[derive(Clone, Debug)]
pub struct TestSession {
    answers: Vec<Option<u32>>,
    current_question: usize,
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSession {
    pub fn new() -> Self {
        Self { answers: vec![None; question_count()], current_question: 0 }
    }

    pub fn current_question(&self) -> usize {
        self.current_question
    }

    /// Record the selected option rank (1-based) for the current question and
    /// advance to the next one.
    pub fn select_answer(&mut self, rank: u32) -> Result<()> {
        let index = self.current_question;
        let bank = question_bank();
        // Once every question is answered the questionnaire is showing
        // results; further selections are ignored, not errors.
        if index >= bank.len() {
            return Ok(());
        }
        let option_count = bank[index].options.len() as u32;
        if rank < 1 || rank > option_count {
            return Err(PollError::InvalidAnswer { question: index, rank });
        }
        self.answers[index] = Some(rank);
        if self.current_question < bank.len() {
            self.current_question += 1;
        }
        Ok(())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == question_count()
    }

    /// Collected answer ranks, or `IncompleteAnswers` if any question is
    /// still unanswered.
    pub fn completed_answers(&self) -> Result<Vec<u32>> {
        let answered = self.answered_count();
        let expected = question_count();
        if answered < expected {
            return Err(PollError::IncompleteAnswers { answered, expected });
        }
        Ok(self.answers.iter().map(|a| a.unwrap_or(0)).collect())
    }

    pub fn restart(&mut self) {
        self.answers = vec![None; question_count()];
        self.current_question = 0;
    }
}
