use crate::models::analysis::{
    AnalysisSnapshot, ConsecutiveRecipient, MonthBucket, QuarterBucket, RankedAmount, RankedCount,
};
use crate::models::record::Record;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

const LEADERBOARD_SIZE: usize = 10;
/// Months checked for repeat recipients within the reference year.
pub const REFERENCE_WINDOW: [u32; 3] = [1, 2, 3];

/// Counts keyed by first appearance, so equal counts keep input order after a stable sort.
struct FrequencyTable {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl FrequencyTable {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }

    fn add(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.order.push(key.to_string());
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    fn ranked(self) -> Vec<RankedCount> {
        let mut ranked: Vec<RankedCount> = self
            .order
            .into_iter()
            .map(|name| {
                let count = self.counts[&name];
                RankedCount { name, count }
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }
}

pub struct AnalysisService;

impl AnalysisService {
    pub fn analyze(records: &[Record], reference_year: i32) -> AnalysisSnapshot {
        let mut recipients = FrequencyTable::new();
        let mut givers = FrequencyTable::new();
        let mut programs = FrequencyTable::new();
        let mut award_types = FrequencyTable::new();

        let mut earner_order: Vec<String> = Vec::new();
        let mut earnings: HashMap<String, f64> = HashMap::new();
        let mut givers_per_recipient: HashMap<String, HashSet<String>> = HashMap::new();
        let mut pairs: HashSet<(String, String)> = HashSet::new();
        let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
        let mut quarters: BTreeMap<(i32, u32), usize> = BTreeMap::new();
        let mut window: BTreeMap<String, BTreeSet<u32>> = BTreeMap::new();
        let mut total_award_amount = 0.0;

        for r in records {
            recipients.add(&r.recipient);
            givers.add(&r.giver);
            programs.add(&r.program);
            if let Some(t) = &r.award_type {
                award_types.add(t);
            }

            if !earnings.contains_key(&r.recipient) {
                earner_order.push(r.recipient.clone());
            }
            *earnings.entry(r.recipient.clone()).or_insert(0.0) += r.award_amount;
            total_award_amount += r.award_amount;

            givers_per_recipient
                .entry(r.recipient.clone())
                .or_default()
                .insert(r.giver.clone());
            pairs.insert((r.giver.clone(), r.recipient.clone()));

            *months.entry((r.year, r.month)).or_insert(0) += 1;
            *quarters.entry((r.year, r.quarter)).or_insert(0) += 1;

            if r.year == reference_year && REFERENCE_WINDOW.contains(&r.month) {
                window.entry(r.recipient.clone()).or_default().insert(r.month);
            }
        }

        let recipient_ranking = recipients.ranked();
        let giver_ranking = givers.ranked();
        let unique_recipients = recipient_ranking.len();
        let unique_givers = giver_ranking.len();
        let programs = programs.ranked();

        let mut top_earners: Vec<RankedAmount> = earner_order
            .iter()
            .map(|name| RankedAmount {
                name: name.clone(),
                total: earnings[name],
            })
            .collect();
        top_earners.sort_by(|a, b| b.total.total_cmp(&a.total));
        top_earners.truncate(LEADERBOARD_SIZE);

        // earner_order doubles as first-seen recipient order
        let mut unique_giver_counts: Vec<RankedCount> = earner_order
            .iter()
            .map(|name| RankedCount {
                name: name.clone(),
                count: givers_per_recipient.get(name).map_or(0, HashSet::len),
            })
            .collect();
        unique_giver_counts.sort_by(|a, b| b.count.cmp(&a.count));
        unique_giver_counts.truncate(LEADERBOARD_SIZE);

        let consecutive_recipients = window
            .into_iter()
            .filter(|(_, seen)| seen.len() >= 2)
            .map(|(name, seen)| ConsecutiveRecipient {
                name,
                months: seen.into_iter().collect(),
            })
            .collect();

        let avg_award_amount = if records.is_empty() {
            0.0
        } else {
            total_award_amount / records.len() as f64
        };

        AnalysisSnapshot {
            total_records: records.len(),
            unique_recipients,
            unique_givers,
            unique_programs: programs.len(),
            unique_pairs: pairs.len(),
            top_recipients: recipient_ranking.into_iter().take(LEADERBOARD_SIZE).collect(),
            top_givers: giver_ranking.into_iter().take(LEADERBOARD_SIZE).collect(),
            programs,
            award_types: award_types.ranked(),
            total_award_amount,
            avg_award_amount,
            top_earners,
            recipients_with_most_unique_givers: unique_giver_counts,
            monthly_distribution: months
                .into_iter()
                .map(|((year, month), count)| MonthBucket { year, month, count })
                .collect(),
            quarterly_distribution: quarters
                .into_iter()
                .map(|((year, quarter), count)| QuarterBucket { year, quarter, count })
                .collect(),
            reference_year,
            consecutive_recipients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(recipient: &str, giver: &str, amount: f64, y: i32, m: u32, d: u32) -> Record {
        Record::new(
            recipient,
            giver,
            "Kudos",
            None,
            amount,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            None,
        )
    }

    #[test]
    fn aggregates_counts_amounts_and_unique_givers() {
        let records = vec![
            record("R1", "G1", 100.0, 2025, 1, 5),
            record("R1", "G1", 50.0, 2025, 2, 10),
            record("R2", "G1", 0.0, 2025, 1, 20),
        ];
        let snap = AnalysisService::analyze(&records, 2025);

        assert_eq!(snap.top_recipients[0], RankedCount { name: "R1".into(), count: 2 });
        assert_eq!(snap.top_earners[0].name, "R1");
        assert_eq!(snap.top_earners[0].total, 150.0);
        let r1 = snap
            .recipients_with_most_unique_givers
            .iter()
            .find(|e| e.name == "R1")
            .unwrap();
        assert_eq!(r1.count, 1);
        assert_eq!(snap.total_records, 3);
        assert_eq!(snap.unique_pairs, 2);
        assert_eq!(snap.total_award_amount, 150.0);
        assert_eq!(snap.avg_award_amount, 50.0);
        assert_eq!(snap.month_count(2025, 1), 2);
        assert_eq!(snap.quarter_count(2025, 1), 3);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let records = vec![
            record("Zed", "G2", 10.0, 2025, 1, 1),
            record("Amy", "G1", 10.0, 2025, 1, 2),
            record("Amy", "G2", 0.0, 2025, 1, 3),
            record("Zed", "G1", 0.0, 2025, 1, 4),
        ];
        let snap = AnalysisService::analyze(&records, 2025);
        let names: Vec<_> = snap.top_recipients.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
        let givers: Vec<_> = snap.top_givers.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(givers, vec!["G2", "G1"]);
        assert_eq!(snap.top_earners[0].name, "Zed");
    }

    #[test]
    fn flags_recipients_in_two_of_three_window_months() {
        let records = vec![
            record("R1", "G1", 0.0, 2025, 1, 3),
            record("R1", "G2", 0.0, 2025, 3, 9),
            record("R2", "G1", 0.0, 2025, 1, 15),
            record("R3", "G1", 0.0, 2025, 1, 15),
            record("R3", "G1", 0.0, 2025, 1, 28),
            record("R4", "G1", 0.0, 2024, 1, 15),
            record("R4", "G1", 0.0, 2024, 2, 15),
        ];
        let snap = AnalysisService::analyze(&records, 2025);
        assert_eq!(
            snap.consecutive_recipients,
            vec![ConsecutiveRecipient { name: "R1".into(), months: vec![1, 3] }]
        );
    }

    #[test]
    fn leaderboards_are_truncated_to_ten() {
        let records: Vec<Record> = (0..15)
            .map(|i| record(&format!("R{}", i), &format!("G{}", i), 1.0, 2025, 4, 1))
            .collect();
        let snap = AnalysisService::analyze(&records, 2025);
        assert_eq!(snap.top_recipients.len(), 10);
        assert_eq!(snap.top_givers.len(), 10);
        assert_eq!(snap.top_earners.len(), 10);
        assert_eq!(snap.recipients_with_most_unique_givers.len(), 10);
        assert_eq!(snap.unique_recipients, 15);
        assert_eq!(snap.programs.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_snapshot() {
        let snap = AnalysisService::analyze(&[], 2025);
        assert_eq!(snap.total_records, 0);
        assert!(snap.top_recipients.is_empty());
        assert_eq!(snap.avg_award_amount, 0.0);
    }
}
