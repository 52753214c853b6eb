use crate::error::Result;
use crate::models::generation::group_by_category;
use crate::models::question::Question;
use rust_xlsxwriter::*;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const JSON_FILE_NAME: &str = "quiz_questions.json";
pub const TEXT_FILE_NAME: &str = "quiz_questions_formatted.txt";
pub const XLSX_FILE_NAME: &str = "quiz_questions.xlsx";

const RULE_WIDTH: usize = 80;

pub struct ExportService;

impl ExportService {
    pub fn to_json(questions: &[Question]) -> Result<String> {
        Ok(serde_json::to_string_pretty(questions)?)
    }

    /// Plain-text report grouped by category label, numbered from 1 inside each group.
    pub fn to_text_report(questions: &[Question]) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "QUIZ QUESTIONS - TOTAL: {}", questions.len());
        let _ = writeln!(out, "{}\n", rule);

        for (label, group) in group_by_category(questions) {
            let _ = writeln!(out, "\n{}", rule);
            let _ = writeln!(out, "CATEGORY: {} ({} questions)", label.to_uppercase(), group.len());
            let _ = writeln!(out, "{}\n", rule);

            for (i, q) in group.iter().enumerate() {
                let _ = writeln!(out, "Q{}: {}", i + 1, q.question);
                let _ = writeln!(out, "Answer: {}\n", q.answer);
            }
        }

        out
    }

    /// Writes the JSON array and the text report into `dir`, returning both paths.
    pub fn write_outputs(dir: &Path, questions: &[Question]) -> Result<(PathBuf, PathBuf)> {
        std::fs::create_dir_all(dir)?;

        let json_path = dir.join(JSON_FILE_NAME);
        std::fs::write(&json_path, Self::to_json(questions)?)?;

        let text_path = dir.join(TEXT_FILE_NAME);
        std::fs::write(&text_path, Self::to_text_report(questions))?;

        tracing::info!(
            "Saved {} questions to {} and {}",
            questions.len(),
            json_path.display(),
            text_path.display()
        );
        Ok((json_path, text_path))
    }

    /// Generate a styled XLSX workbook, one block of rows per category.
    pub fn generate_questions_xlsx(questions: &[Question]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Questions")?;

        // ── Color palette ──
        let primary_color = Color::RGB(0x1E293B); // Slate 800
        let header_bg = Color::RGB(0x0F172A); // Slate 900
        let header_text = Color::White;
        let alt_row_1 = Color::RGB(0xF8FAFC); // Slate 50
        let alt_row_2 = Color::White;
        let border_color = Color::RGB(0xE2E8F0); // Slate 200
        let group_bg = Color::RGB(0xE0E7FF); // Indigo 100

        let columns = [("№", 8.0), ("Category", 28.0), ("Question", 80.0), ("Answer", 36.0)];
        let last_col = (columns.len() - 1) as u16;

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        // ── Title row ──
        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(header_text)
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        worksheet.set_row_height(0, 40)?;
        worksheet.merge_range(0, 0, 0, last_col, "Recognition Quiz Questions", &title_format)?;

        // ── Subtitle row ──
        let subtitle_format = Format::new()
            .set_font_size(10)
            .set_italic()
            .set_font_color(Color::RGB(0x94A3B8))
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        worksheet.set_row_height(1, 22)?;
        let now = chrono::Utc::now().format("%d.%m.%Y %H:%M UTC").to_string();
        let subtitle_text = format!("Exported: {}  •  Total questions: {}", now, questions.len());
        worksheet.merge_range(1, 0, 1, last_col, &subtitle_text, &subtitle_format)?;

        // ── Header row ──
        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let header_row = 2;
        worksheet.set_row_height(header_row, 30)?;
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        let group_fmt = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(primary_color)
            .set_background_color(group_bg)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        // ── Data rows ──
        let mut row: u32 = header_row + 1;
        let mut number = 0usize;
        for (label, group) in group_by_category(questions) {
            worksheet.set_row_height(row, 24)?;
            let group_title = format!("{} ({} questions)", label, group.len());
            worksheet.merge_range(row, 0, row, last_col, &group_title, &group_fmt)?;
            row += 1;

            for (idx, q) in group.iter().enumerate() {
                number += 1;
                let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

                let base_fmt = Format::new()
                    .set_font_size(10)
                    .set_background_color(bg)
                    .set_align(FormatAlign::VerticalCenter)
                    .set_border(FormatBorder::Thin)
                    .set_border_color(border_color);
                let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);
                let wrap_fmt = base_fmt.clone().set_text_wrap();
                let answer_fmt = wrap_fmt.clone().set_bold();

                worksheet.set_row_height(row, 22)?;
                worksheet.write_number_with_format(row, 0, number as f64, &center_fmt)?;
                worksheet.write_string_with_format(row, 1, &label, &base_fmt)?;
                worksheet.write_string_with_format(row, 2, &q.question, &wrap_fmt)?;
                worksheet.write_string_with_format(row, 3, &q.answer, &answer_fmt)?;
                row += 1;
            }
        }

        // ── Summary row ──
        let total_row = row + 1;
        let summary_fmt = group_fmt.clone().set_align(FormatAlign::Center);
        worksheet.set_row_height(total_row, 26)?;
        worksheet.merge_range(
            total_row,
            0,
            total_row,
            last_col,
            &format!("Total: {} questions", questions.len()),
            &summary_fmt,
        )?;

        // Header stays visible while scrolling
        worksheet.set_freeze_panes(header_row + 1, 0)?;

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Category;

    fn sample() -> Vec<Question> {
        vec![
            Question::new("How many recognitions did Ann receive?", "3", Category::RecognitionCount),
            Question::new("Who gave the most?", "Bob Ray", Category::RecognitionCount),
            Question::new("How many in April 2025?", "7", Category::Timeframe),
            Question::new("Who received the highest total award amount?", "Ann", Category::AwardAmount),
        ]
    }

    #[test]
    fn text_report_groups_alphabetically_and_numbers_per_category() {
        let report = ExportService::to_text_report(&sample());
        let rule = "=".repeat(80);

        assert!(report.starts_with(&format!("QUIZ QUESTIONS - TOTAL: 4\n{}\n\n", rule)));

        let award = report.find("CATEGORY: AWARD AMOUNT (1 questions)").unwrap();
        let count = report.find("CATEGORY: RECOGNITION COUNT (2 questions)").unwrap();
        let time = report.find("CATEGORY: TIMEFRAME (1 questions)").unwrap();
        assert!(award < count && count < time);

        let count_block = &report[count..time];
        assert!(count_block.contains("Q1: How many recognitions did Ann receive?\nAnswer: 3\n"));
        assert!(count_block.contains("Q2: Who gave the most?\nAnswer: Bob Ray\n"));
        assert!(report[time..].contains("Q1: How many in April 2025?\nAnswer: 7\n"));
    }

    #[test]
    fn empty_report_has_only_header() {
        let report = ExportService::to_text_report(&[]);
        assert_eq!(report, format!("QUIZ QUESTIONS - TOTAL: 0\n{}\n\n", "=".repeat(80)));
    }

    #[test]
    fn json_uses_category_labels() {
        let json = ExportService::to_json(&sample()).unwrap();
        let back: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 4);
        assert_eq!(back[0]["category"], "Recognition Count");
        assert_eq!(back[2]["answer"], "7");
    }

    #[test]
    fn writes_both_files() {
        let dir = std::env::temp_dir().join(format!("quiz-export-{}", uuid::Uuid::new_v4()));
        let (json_path, text_path) = ExportService::write_outputs(&dir, &sample()).unwrap();

        let saved: Vec<Question> = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(saved, sample());
        assert!(std::fs::read_to_string(&text_path).unwrap().contains("TOTAL: 4"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn xlsx_is_a_zip_container() {
        let bytes = ExportService::generate_questions_xlsx(&sample()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
