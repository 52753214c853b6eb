use crate::models::question::{Category, Question};
use crate::models::record::Record;
use crate::utils::time::long_date;
use std::collections::HashMap;

const PAIR_SHARE: f64 = 0.3;
const DATE_SHARE: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairCount<'a> {
    pub giver: &'a str,
    pub recipient: &'a str,
    pub count: usize,
}

pub struct RelationshipGenerator;

impl RelationshipGenerator {
    /// `limit` is split 30/70 between repeat-pair counts and date lookups.
    pub fn generate(records: &[Record], limit: usize) -> Vec<Question> {
        let mut questions = Vec::new();

        let pair_limit = share(limit, PAIR_SHARE);
        for pair in pair_counts(records).into_iter().take(pair_limit) {
            if pair.count > 1 {
                questions.push(Question::new(
                    format!("How many times did {} recognize {}?", pair.giver, pair.recipient),
                    pair.count.to_string(),
                    Category::GiverRecipientRelationship,
                ));
            }
        }

        let date_limit = share(limit, DATE_SHARE);
        for r in records.iter().take(date_limit) {
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

        questions
    }
}

pub(crate) fn share(limit: usize, ratio: f64) -> usize {
    (limit as f64 * ratio) as usize
}

/// (giver, recipient) frequencies, highest first, ties in first-seen order.
pub fn pair_counts(records: &[Record]) -> Vec<PairCount<'_>> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut pairs: Vec<PairCount<'_>> = Vec::new();

    for r in records {
        let key = (r.giver.as_str(), r.recipient.as_str());
        match index.get(&key) {
            Some(&i) => pairs[i].count += 1,
            None => {
                index.insert(key, pairs.len());
                pairs.push(PairCount {
                    giver: key.0,
                    recipient: key.1,
                    count: 1,
                });
            }
        }
    }

    pairs.sort_by(|a, b| b.count.cmp(&a.count));
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn records() -> Vec<Record> {
        let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        vec![
            Record::new("Ann", "Bob", "Kudos", None, 0.0, d(1, 5), None),
            Record::new("Cy", "Dee", "Kudos", None, 0.0, d(1, 6), None),
            Record::new("Ann", "Bob", "Kudos", None, 0.0, d(2, 7), None),
            Record::new("Cy", "Dee", "Kudos", None, 0.0, d(2, 8), None),
            Record::new("Cy", "Dee", "Kudos", None, 0.0, d(3, 9), None),
            Record::new("Eve", "Bob", "Kudos", None, 0.0, d(3, 10), None),
        ]
    }

    #[test]
    fn pair_counts_rank_by_frequency() {
        let recs = records();
        let pairs = pair_counts(&recs);
        assert_eq!(pairs[0], PairCount { giver: "Dee", recipient: "Cy", count: 3 });
        assert_eq!(pairs[1], PairCount { giver: "Bob", recipient: "Ann", count: 2 });
        assert_eq!(pairs[2].count, 1);
    }

    #[test]
    fn splits_limit_between_pairs_and_dates() {
        let qs = RelationshipGenerator::generate(&records(), 10);
        // pair limit 3, only two pairs repeat; date limit 7 capped at 6 rows
        let pair_qs: Vec<_> = qs.iter().filter(|q| q.question.starts_with("How many times")).collect();
        assert_eq!(pair_qs.len(), 2);
        assert_eq!(pair_qs[0].question, "How many times did Dee recognize Cy?");
        assert_eq!(pair_qs[0].answer, "3");

        let date_qs: Vec<_> = qs.iter().filter(|q| q.question.starts_with("Who gave")).collect();
        assert_eq!(date_qs.len(), 6);
        assert_eq!(date_qs[0].question, "Who gave a recognition to Ann on January 05, 2025?");
        assert_eq!(date_qs[0].answer, "Bob");
    }

    #[test]
    fn small_limit_rounds_down() {
        let qs = RelationshipGenerator::generate(&records(), 3);
        // 3 * 0.3 = 0 pair questions, 3 * 0.7 = 2 date questions
        assert_eq!(qs.len(), 2);
        assert!(qs.iter().all(|q| q.question.starts_with("Who gave")));
    }

    #[test]
    fn is_deterministic() {
        let recs = records();
        assert_eq!(
            RelationshipGenerator::generate(&recs, 30),
            RelationshipGenerator::generate(&recs, 30)
        );
    }
}
