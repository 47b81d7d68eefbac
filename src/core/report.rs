use crate::bank::{Dimension, QuestionBank, Statement};
use crate::core::strengths::{self, ContentLookup, Strength};
use crate::core::{DimensionScore, ScoreTable};
use crate::error::ScoringError;
use colored::Colorize;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write as _;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone)]
pub struct FinalReport {
    pub table: ScoreTable,
    pub strengths: Vec<Strength>,
    pub diagnostics: bool,
}

impl FinalReport {
    pub fn build<L>(table: ScoreTable, top_n: usize, lookup: &L, diagnostics: bool) -> Self
    where
        L: ContentLookup + ?Sized,
    {
        let strengths = strengths::select_strengths(&table, top_n, lookup);
        Self {
            table,
            strengths,
            diagnostics,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreLine {
    pub dimension: Dimension,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticLine {
    pub dimension: Dimension,
    pub raw: f64,
    pub max_possible: f64,
    pub contributors: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub preview: bool,
    pub answered: usize,
    pub defaulted: usize,
    pub scores: Vec<ScoreLine>,
    pub strengths: Vec<Strength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Vec<DiagnosticLine>>,
}

impl From<&FinalReport> for JsonReport {
    fn from(report: &FinalReport) -> Self {
        let ranked = report.table.ranked();
        Self {
            preview: report.table.is_preview(),
            answered: report.table.answered(),
            defaulted: report.table.defaulted(),
            scores: ranked
                .iter()
                .map(|entry| ScoreLine {
                    dimension: entry.dimension.clone(),
                    score: entry.score,
                })
                .collect(),
            strengths: report.strengths.clone(),
            diagnostics: report.diagnostics.then(|| {
                ranked
                    .iter()
                    .map(|entry| DiagnosticLine {
                        dimension: entry.dimension.clone(),
                        raw: entry.raw,
                        max_possible: entry.max_possible,
                        contributors: entry.contributors,
                    })
                    .collect()
            }),
        }
    }
}

pub fn label_for_score(score: f64) -> &'static str {
    match score {
        s if s >= 4.5 => "Standout",
        s if s >= 3.5 => "Strong",
        s if s >= 2.5 => "Moderate",
        _ => "Emerging",
    }
}

fn colored_score(score: f64) -> String {
    let text = format!("{score:.2}");
    match label_for_score(score) {
        "Standout" => text.as_str().green().bold().to_string(),
        "Strong" => text.as_str().green().to_string(),
        "Moderate" => text.as_str().yellow().to_string(),
        _ => text.as_str().red().to_string(),
    }
}

fn bar(score: f64) -> String {
    let filled = ((score / 5.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn render_human(report: &FinalReport) -> String {
    let mut out = String::new();
    let table = &report.table;

    if table.is_preview() {
        let banner = format!(
            "PREVIEW: {} of {} statements filled with a neutral rating; not a final result",
            table.defaulted(),
            table.answered() + table.defaulted()
        );
        let _ = writeln!(out, "{}", banner.as_str().yellow().bold());
        out.push('\n');
    }

    let _ = writeln!(out, "{}", "Your Scores per Dimension".bold());
    let width = table
        .ranked()
        .iter()
        .map(|entry| entry.dimension.as_str().chars().count())
        .max()
        .unwrap_or(0);
    for entry in table.ranked() {
        write_score_line(&mut out, entry, width, report.diagnostics);
    }

    if !report.strengths.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "{}", "Top Strengths".bold());
        for strength in &report.strengths {
            let _ = writeln!(
                out,
                "{}. {} (Score: {:.2})",
                strength.rank,
                strength.dimension.as_str().bold(),
                strength.score
            );
            if !strength.learning.is_empty() {
                let _ = writeln!(out, "   learn: {}", strength.learning.join(", "));
            }
            if !strength.careers.is_empty() {
                let _ = writeln!(out, "   careers: {}", strength.careers.join(", "));
            }
        }
    }

    out
}

fn write_score_line(out: &mut String, entry: &DimensionScore, width: usize, diagnostics: bool) {
    let _ = write!(
        out,
        "{:<width$}  {}  {}  {}",
        entry.dimension.as_str(),
        colored_score(entry.score),
        bar(entry.score),
        label_for_score(entry.score),
        width = width
    );
    if diagnostics {
        let _ = write!(
            out,
            "  (raw {:.2} / max {:.2}, {} statements)",
            entry.raw, entry.max_possible, entry.contributors
        );
    }
    out.push('\n');
}

pub fn print_human(report: &FinalReport) {
    print!("{}", render_human(report));
}

/// Explains a rejected response set, quoting statement text where known.
pub fn render_scoring_error(bank: &QuestionBank, err: &ScoringError) -> String {
    let mut out = String::new();
    let heading = match err {
        ScoringError::IncompleteResponse { missing } => {
            format!("{} statement(s) still need a rating", missing.len())
        }
        ScoringError::UnknownStatement { ids } => {
            format!("{} response(s) name statements not in this quiz", ids.len())
        }
        ScoringError::RatingRange { entries } => {
            format!("{} rating(s) are outside 1..=5", entries.len())
        }
    };
    let _ = writeln!(out, "{} {}", "REJECTED".red().bold(), heading);

    match err {
        ScoringError::RatingRange { entries } => {
            for entry in entries {
                let _ = writeln!(out, "- {} = {}", entry.statement, entry.rating);
            }
        }
        _ => {
            for id in err.offending_statements() {
                match bank.statement(id) {
                    Some(statement) => {
                        let _ = writeln!(out, "- {}: {}", id, statement.text());
                    }
                    None => {
                        let _ = writeln!(out, "- {}", id);
                    }
                }
            }
        }
    }
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonScoringError<'a> {
    pub error: &'static str,
    pub message: String,
    pub statements: Vec<&'a str>,
}

impl<'a> From<&'a ScoringError> for JsonScoringError<'a> {
    fn from(err: &'a ScoringError) -> Self {
        Self {
            error: err.kind(),
            message: err.to_string(),
            statements: err.offending_statements(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionLine<'a> {
    pub position: usize,
    pub dimension: &'a Dimension,
    pub primary_statements: usize,
    pub secondary_statements: usize,
}

/// Canonical dimensions with how many statements feed each one.
pub fn dimension_lines(bank: &QuestionBank) -> Vec<DimensionLine<'_>> {
    bank.dimensions()
        .iter()
        .enumerate()
        .map(|(idx, dimension)| {
            let primary_statements = bank
                .all_statements()
                .filter(|statement| statement.primary() == dimension)
                .count();
            let secondary_statements = bank
                .all_statements()
                .filter(|statement| statement.secondary().iter().any(|(dim, _)| dim == dimension))
                .count();
            DimensionLine {
                position: idx + 1,
                dimension,
                primary_statements,
                secondary_statements,
            }
        })
        .collect()
}

pub fn render_dimensions(lines: &[DimensionLine<'_>]) -> String {
    let mut out = String::new();
    for line in lines {
        let _ = writeln!(
            out,
            "{:>2}. {} ({} primary, {} secondary)",
            line.position, line.dimension, line.primary_statements, line.secondary_statements
        );
    }
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionLine<'a> {
    pub position: usize,
    pub id: &'a str,
    pub text: &'a str,
    pub primary: &'a Dimension,
    pub secondary: IndexMap<&'a str, f64>,
}

impl<'a> QuestionLine<'a> {
    pub fn new(position: usize, statement: &'a Statement) -> Self {
        Self {
            position,
            id: statement.id(),
            text: statement.text(),
            primary: statement.primary(),
            secondary: statement
                .secondary()
                .iter()
                .map(|(dim, weight)| (dim.as_str(), weight.as_f64()))
                .collect(),
        }
    }
}

pub fn render_questions(lines: &[QuestionLine<'_>]) -> String {
    let mut out = String::new();
    for line in lines {
        let _ = writeln!(out, "{:>3}. [{}] {}", line.position, line.id, line.text);
        let secondary = line
            .secondary
            .iter()
            .map(|(dim, weight)| format!("{dim} x{weight}"))
            .collect::<Vec<_>>();
        if secondary.is_empty() {
            let _ = writeln!(out, "     {}", line.primary);
        } else {
            let _ = writeln!(out, "     {} (+ {})", line.primary, secondary.join(", "));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::tests::two_statement_bank;
    use crate::core::strengths::{ContentLibrary, DimensionContent};
    use crate::core::{Responses, ScoringEngine};
    use pretty_assertions::assert_eq;

    fn worked_report(diagnostics: bool) -> FinalReport {
        let bank = two_statement_bank();
        let responses: Responses = [("s1", 4), ("s2", 2)].into_iter().collect();
        let table = ScoringEngine::new(&bank).score(&responses).unwrap();
        let mut library = ContentLibrary::default();
        library.insert(
            "A",
            DimensionContent {
                learning: vec!["Atlas reading".to_string()],
                careers: vec!["Cartographer".to_string()],
            },
        );
        FinalReport::build(table, 1, &library, diagnostics)
    }

    #[test]
    fn labels_follow_score_bands() {
        assert_eq!(label_for_score(5.0), "Standout");
        assert_eq!(label_for_score(3.5), "Strong");
        assert_eq!(label_for_score(3.0), "Moderate");
        assert_eq!(label_for_score(1.0), "Emerging");
    }

    #[test]
    fn bar_is_proportional_and_bounded() {
        assert_eq!(bar(5.0), "#".repeat(BAR_WIDTH));
        assert_eq!(bar(2.5).matches('#').count(), BAR_WIDTH / 2);
        assert_eq!(bar(0.0), ".".repeat(BAR_WIDTH));
    }

    #[test]
    fn json_report_ranks_scores_and_hides_diagnostics_by_default() {
        let report = worked_report(false);
        let json = serde_json::to_value(JsonReport::from(&report)).unwrap();

        assert_eq!(json["preview"], false);
        assert_eq!(json["scores"][0]["dimension"], "A");
        assert_eq!(json["scores"][0]["score"], 4.0);
        assert_eq!(json["scores"][1]["dimension"], "B");
        assert_eq!(json["strengths"][0]["rank"], 1);
        assert_eq!(json["strengths"][0]["careers"][0], "Cartographer");
        assert!(json.get("diagnostics").is_none());
    }

    #[test]
    fn json_report_includes_raw_accumulators_on_request() {
        let report = worked_report(true);
        let json = serde_json::to_value(JsonReport::from(&report)).unwrap();
        assert_eq!(json["diagnostics"][1]["raw"], 4.0);
        assert_eq!(json["diagnostics"][1]["max_possible"], 7.5);
        assert_eq!(json["diagnostics"][1]["contributors"], 2);
    }

    #[test]
    fn human_report_lists_scores_and_strengths() {
        colored::control::set_override(false);
        let text = render_human(&worked_report(true));
        assert!(text.contains("A  4.00"));
        assert!(text.contains("B  2.67"));
        assert!(text.contains("1. A (Score: 4.00)"));
        assert!(text.contains("careers: Cartographer"));
        assert!(text.contains("raw 4.00 / max 7.50, 2 statements"));
        assert!(!text.contains("PREVIEW"));
    }

    #[test]
    fn preview_reports_carry_a_banner() {
        colored::control::set_override(false);
        let bank = two_statement_bank();
        let table = ScoringEngine::new(&bank)
            .preview(&[("s1", 5)].into_iter().collect())
            .unwrap();
        let report = FinalReport::build(table, 3, &ContentLibrary::default(), false);
        let text = render_human(&report);
        assert!(text.starts_with("PREVIEW: 1 of 2 statements"));
    }

    #[test]
    fn scoring_errors_quote_statement_text() {
        colored::control::set_override(false);
        let bank = two_statement_bank();
        let err = ScoringError::IncompleteResponse {
            missing: vec!["s2".to_string()],
        };
        let text = render_scoring_error(&bank, &err);
        assert!(text.contains("1 statement(s) still need a rating"));
        assert!(text.contains("- s2: statement s2"));
    }

    #[test]
    fn json_errors_carry_kind_and_statements() {
        let err = ScoringError::UnknownStatement {
            ids: vec!["zz".to_string()],
        };
        let json = serde_json::to_value(JsonScoringError::from(&err)).unwrap();
        assert_eq!(json["error"], "unknown_statement");
        assert_eq!(json["statements"][0], "zz");
    }

    #[test]
    fn dimension_lines_count_feeding_statements() {
        let bank = two_statement_bank();
        let lines = dimension_lines(&bank);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            (lines[1].primary_statements, lines[1].secondary_statements),
            (1, 1)
        );
        let text = render_dimensions(&lines);
        assert!(text.contains(" 1. A (1 primary, 0 secondary)"));
    }

    #[test]
    fn question_lines_show_weights() {
        let bank = two_statement_bank();
        let lines: Vec<QuestionLine<'_>> = bank
            .all_statements()
            .enumerate()
            .map(|(idx, statement)| QuestionLine::new(idx + 1, statement))
            .collect();
        let text = render_questions(&lines);
        assert!(text.contains("  1. [s1] statement s1"));
        assert!(text.contains("A (+ B x0.5)"));

        let json = serde_json::to_value(&lines).unwrap();
        assert_eq!(json[0]["secondary"]["B"], 0.5);
        assert_eq!(json[1]["primary"], "B");
    }
}
