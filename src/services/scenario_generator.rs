use crate::models::question::{Category, Question};
use crate::models::record::Record;
use crate::services::relationship_generator::share;
use crate::utils::time::{long_date, month_year};
use rand::seq::SliceRandom;
use rand::Rng;

const AMOUNT_SHARE: f64 = 0.4;
const GIVER_SHARE: f64 = 0.3;
const RECIPIENT_SHARE: f64 = 0.3;

/// Per-shape targets carved out of one scenario limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioSplit {
    pub amount: usize,
    pub giver: usize,
    pub recipient: usize,
}

impl ScenarioSplit {
    pub fn from_limit(limit: usize) -> Self {
        Self {
            amount: share(limit, AMOUNT_SHARE),
            giver: share(limit, GIVER_SHARE),
            recipient: share(limit, RECIPIENT_SHARE),
        }
    }
}

pub struct ScenarioGenerator;

impl ScenarioGenerator {
    pub fn generate<R: Rng + ?Sized>(records: &[Record], limit: usize, rng: &mut R) -> Vec<Question> {
        let split = ScenarioSplit::from_limit(limit);
        let mut questions = Vec::new();

        // Only the first 2x target rows are scanned for a positive amount.
        let scan = (split.amount * 2).min(records.len());
        questions.extend(
            records[..scan]
                .iter()
                .filter(|r| r.award_amount > 0.0)
                .take(split.amount)
                .map(|r| {
                    Question::new(
                        format!(
                            "What award amount did {} receive from {} on {}?",
                            r.recipient,
                            r.giver,
                            long_date(r.date_received)
                        ),
                        (r.award_amount.trunc() as i64).to_string(),
                        Category::SpecificAward,
                    )
                }),
        );

        if split.giver > 0 {
            for r in records.choose_multiple(rng, split.giver) {
                questions.push(Question::new(
                    format!(
                        "Who gave a recognition to {} on {}?",
                        r.recipient,
                        long_date(r.date_received)
                    ),
                    r.giver.clone(),
                    Category::GiverRecipientRelationship,
                ));
            }
        }

        if split.recipient > 0 {
            for r in records.choose_multiple(rng, split.recipient) {
                questions.push(Question::new(
                    format!(
                        "Who received a {} from {} in {}?",
                        r.program,
                        r.giver,
                        month_year(r.date_received)
                    ),
                    r.recipient.clone(),
                    Category::RecognitionDetails,
                ));
            }
        }

        questions
    }
}
