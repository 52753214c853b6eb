use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAmount {
    pub name: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuarterBucket {
    pub year: i32,
    pub quarter: u32,
    pub count: usize,
}

/// Recipient seen in at least two months of the reference window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsecutiveRecipient {
    pub name: String,
    pub months: Vec<u32>,
}

/// Aggregate views over the full record set. Built once per run, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSnapshot {
    pub total_records: usize,
    pub unique_recipients: usize,
    pub unique_givers: usize,
    pub unique_programs: usize,
    pub unique_pairs: usize,

    /// Top 10 by count.
    pub top_recipients: Vec<RankedCount>,
    /// Top 10 by count.
    pub top_givers: Vec<RankedCount>,
    pub programs: Vec<RankedCount>,
    pub award_types: Vec<RankedCount>,

    pub total_award_amount: f64,
    pub avg_award_amount: f64,
    /// Top 10 by summed award amount.
    pub top_earners: Vec<RankedAmount>,
    /// Top 10 by number of distinct givers.
    pub recipients_with_most_unique_givers: Vec<RankedCount>,

    /// Ordered by (year, month).
    pub monthly_distribution: Vec<MonthBucket>,
    /// Ordered by (year, quarter).
    pub quarterly_distribution: Vec<QuarterBucket>,

    pub reference_year: i32,
    /// Sorted by recipient name.
    pub consecutive_recipients: Vec<ConsecutiveRecipient>,
}

impl AnalysisSnapshot {
    pub fn month_count(&self, year: i32, month: u32) -> usize {
        self.monthly_distribution
            .iter()
            .find(|b| b.year == year && b.month == month)
            .map(|b| b.count)
            .unwrap_or(0)
    }

    pub fn quarter_count(&self, year: i32, quarter: u32) -> usize {
        self.quarterly_distribution
            .iter()
            .find(|b| b.year == year && b.quarter == quarter)
            .map(|b| b.count)
            .unwrap_or(0)
    }
}
