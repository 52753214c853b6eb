use crate::models::analysis::AnalysisSnapshot;
use crate::models::question::{Category, Question};

/// Leaderboard positions 2..=6 get their own count questions.
const RUNNER_UPS: usize = 5;

pub struct FactualGenerator;

impl FactualGenerator {
    pub fn generate(analysis: &AnalysisSnapshot) -> Vec<Question> {
        let mut questions = Vec::new();

        if let Some(top) = analysis.top_recipients.first() {
            questions.push(Question::new(
                "Who received the highest number of recognitions?",
                top.name.clone(),
                Category::RecognitionCount,
            ));
            questions.push(Question::new(
                format!("How many recognitions did {} receive?", top.name),
                top.count.to_string(),
                Category::RecognitionCount,
            ));
        }

        if let Some(top) = analysis.top_givers.first() {
            questions.push(Question::new(
                "Who gave the highest number of recognitions?",
                top.name.clone(),
                Category::RecognitionCount,
            ));
            questions.push(Question::new(
                format!("How many recognitions did {} give?", top.name),
                top.count.to_string(),
                Category::RecognitionCount,
            ));
        }

        if let Some(top) = analysis.recipients_with_most_unique_givers.first() {
            questions.push(Question::new(
                "Which recipient has the most unique givers?",
                top.name.clone(),
                Category::UniqueRelationships,
            ));
            questions.push(Question::new(
                format!("How many unique givers did {} receive recognitions from?", top.name),
                top.count.to_string(),
                Category::UniqueRelationships,
            ));
        }

        if let Some(top) = analysis.top_earners.first() {
            questions.push(Question::new(
                "Who received the highest total award amount?",
                top.name.clone(),
                Category::AwardAmount,
            ));
            questions.push(Question::new(
                format!("What was the total award amount received by {}?", top.name),
                (top.total.trunc() as i64).to_string(),
                Category::AwardAmount,
            ));
        }

        if let Some(top) = analysis.programs.first() {
            questions.push(Question::new(
                "Which recognition program was used the most?",
                top.name.clone(),
                Category::ProgramType,
            ));
            questions.push(Question::new(
                format!("How many times was the '{}' program used?", top.name),
                top.count.to_string(),
                Category::ProgramType,
            ));
        }

        for entry in analysis.top_recipients.iter().skip(1).take(RUNNER_UPS) {
            questions.push(Question::new(
                format!("How many recognitions did {} receive?", entry.name),
                entry.count.to_string(),
                Category::RecognitionCount,
            ));
        }

        for entry in analysis.top_givers.iter().skip(1).take(RUNNER_UPS) {
            questions.push(Question::new(
                format!("How many recognitions did {} give?", entry.name),
                entry.count.to_string(),
                Category::RecognitionCount,
            ));
        }

        for entry in &analysis.award_types {
            questions.push(Question::new(
                format!("How many recognitions included '{}' as the award type?", entry.name),
                entry.count.to_string(),
                Category::AwardType,
            ));
        }

        let year = analysis.reference_year;
        questions.push(Question::new(
            format!("How many recognitions were given in April {}?", year),
            analysis.month_count(year, 4).to_string(),
            Category::Timeframe,
        ));
        questions.push(Question::new(
            format!("How many recognitions were given in March {}?", year),
            analysis.month_count(year, 3).to_string(),
            Category::Timeframe,
        ));
        questions.push(Question::new(
            format!("How many recognitions were given in Q1 {}?", year),
            analysis.quarter_count(year, 1).to_string(),
            Category::Timeframe,
        ));

        questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Record;
    use crate::services::analysis_service::AnalysisService;
    use chrono::NaiveDate;

    fn records() -> Vec<Record> {
        let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        vec![
            Record::new("R1", "G1", "Kudos", Some("Points".into()), 100.0, d(1, 5), None),
            Record::new("R1", "G1", "Kudos", Some("Points".into()), 50.5, d(2, 10), None),
            Record::new("R2", "G1", "Spot", None, 0.0, d(1, 20), None),
            Record::new("R3", "G2", "Spot", Some("Cash".into()), 20.0, d(4, 2), None),
        ]
    }

    #[test]
    fn builds_headline_questions() {
        let snap = AnalysisService::analyze(&records(), 2025);
        let qs = FactualGenerator::generate(&snap);

        let find = |text: &str| qs.iter().find(|q| q.question == text).map(|q| q.answer.as_str());
        assert_eq!(find("Who received the highest number of recognitions?"), Some("R1"));
        assert_eq!(find("How many recognitions did R1 receive?"), Some("2"));
        assert_eq!(find("Who gave the highest number of recognitions?"), Some("G1"));
        assert_eq!(find("How many recognitions did G1 give?"), Some("3"));
        assert_eq!(find("What was the total award amount received by R1?"), Some("150"));
        assert_eq!(find("Which recognition program was used the most?"), Some("Kudos"));
        assert_eq!(find("How many recognitions included 'Points' as the award type?"), Some("2"));
        assert_eq!(find("How many recognitions were given in April 2025?"), Some("1"));
        assert_eq!(find("How many recognitions were given in March 2025?"), Some("0"));
        assert_eq!(find("How many recognitions were given in Q1 2025?"), Some("3"));
    }

    #[test]
    fn runner_ups_cover_ranks_two_to_six() {
        let snap = AnalysisService::analyze(&records(), 2025);
        let qs = FactualGenerator::generate(&snap);
        let receive_questions = qs
            .iter()
            .filter(|q| q.question.starts_with("How many recognitions did") && q.question.ends_with("receive?"))
            .count();
        // top recipient plus R2 and R3
        assert_eq!(receive_questions, 3);
    }

    #[test]
    fn is_deterministic() {
        let snap = AnalysisService::analyze(&records(), 2025);
        assert_eq!(FactualGenerator::generate(&snap), FactualGenerator::generate(&snap));
    }

    #[test]
    fn empty_snapshot_only_yields_timeframe_questions() {
        let snap = AnalysisService::analyze(&[], 2025);
        let qs = FactualGenerator::generate(&snap);
        assert_eq!(qs.len(), 3);
        assert!(qs.iter().all(|q| q.category == Category::Timeframe));
    }
}
