//! Output formatters for console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::{MatcherError, Result};
use crate::output::report::ScoreReport;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting score reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter emitting the flat result record
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            80..=100 => ("STRONG", Color::Green),
            60..=79 => ("GOOD", Color::Yellow),
            40..=59 => ("FAIR", Color::BrightYellow),
            _ => ("WEAK", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_skill_list(&self, skills: &[String], color: Color) -> String {
        if skills.is_empty() {
            return self.colorize("(none)", Color::BrightBlack);
        }
        skills
            .iter()
            .map(|s| self.colorize(s, color))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.result;

        output.push_str(&self.format_header("RESUME MATCH", 1));
        output.push_str(&format!(
            "Resume: {} | Job: {}\n",
            report.metadata.resume_path, report.metadata.job_path
        ));

        output.push_str(&self.format_header("Scores", 2));
        output.push_str(&format!(
            "Skill score:    {:.2} ({}%) {}\n",
            result.skill_score(),
            report.skill_percentage(),
            self.format_score_badge(report.skill_percentage())
        ));
        output.push_str(&format!(
            "Semantic score: {:.4} ({}%) {}\n",
            result.semantic_score(),
            report.semantic_percentage(),
            self.format_score_badge(report.semantic_percentage())
        ));

        output.push_str(&self.format_header("Skills", 2));
        output.push_str(&format!(
            "Matched ({}/{}): {}\n",
            result.matched_skills().len(),
            report.job_skills.len(),
            self.format_skill_list(result.matched_skills(), Color::Green)
        ));
        output.push_str(&format!(
            "Missing: {}\n",
            self.format_skill_list(&report.missing_skills, Color::Red)
        ));

        if self.detailed {
            output.push_str(&self.format_header("Details", 3));
            output.push_str(&format!(
                "Resume skills: {}\n",
                self.format_skill_list(&report.resume_skills, Color::Cyan)
            ));
            output.push_str(&format!(
                "Job skills: {}\n",
                self.format_skill_list(&report.job_skills, Color::Cyan)
            ));
            output.push_str(&format!("Similarity provider: {}\n", report.metadata.provider));
            output.push_str(&format!("Vocabulary size: {}\n", report.metadata.vocabulary_size));
            output.push_str(&format!(
                "Generated: {} | Processing time: {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        Ok(report.result.to_json(self.pretty)?)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn bullet_list(skills: &[String]) -> String {
        if skills.is_empty() {
            return "_None_\n".to_string();
        }
        skills.iter().map(|s| format!("- {}\n", s)).collect()
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let result = &report.result;
        let mut md = String::new();

        md.push_str("# Resume Match Report\n\n");

        if self.include_metadata {
            md.push_str(&format!("- **Resume:** {}\n", report.metadata.resume_path));
            md.push_str(&format!("- **Job description:** {}\n", report.metadata.job_path));
            md.push_str(&format!("- **Similarity provider:** {}\n", report.metadata.provider));
            md.push_str(&format!(
                "- **Generated:** {}\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        md.push_str("## Scores\n\n");
        md.push_str("| Metric | Score |\n|---|---|\n");
        md.push_str(&format!("| Skill score | {:.2} |\n", result.skill_score()));
        md.push_str(&format!("| Semantic score | {:.4} |\n\n", result.semantic_score()));

        md.push_str("## Matched skills\n\n");
        md.push_str(&Self::bullet_list(result.matched_skills()));
        md.push_str("\n## Missing skills\n\n");
        md.push_str(&Self::bullet_list(&report.missing_skills));

        Ok(md)
    }
}

/// Coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &ScoreReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            MatcherError::OutputFormatting(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ReportMetadata;
    use crate::processing::MatchResult;
    use chrono::Utc;

    fn sample_report() -> ScoreReport {
        ScoreReport {
            result: MatchResult::new(0.5, 0.6123, vec!["python".to_string()]),
            resume_skills: vec!["python".to_string(), "sql".to_string()],
            job_skills: vec!["python".to_string(), "django".to_string()],
            missing_skills: vec!["django".to_string()],
            metadata: ReportMetadata {
                resume_path: "resume.pdf".to_string(),
                job_path: "job.txt".to_string(),
                provider: "fixed".to_string(),
                vocabulary_size: 3,
                generated_at: Utc::now(),
                processing_time_ms: 12,
            },
        }
    }

    #[test]
    fn test_json_output_is_flat_result() {
        let report = sample_report();
        let json = JsonFormatter::new(false).format_report(&report).unwrap();

        assert_eq!(MatchResult::from_json(&json).unwrap(), report.result);
        assert!(!json.contains("missing_skills"));
    }

    #[test]
    fn test_console_output_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_report(&sample_report()).unwrap();

        assert!(output.contains("Skill score:    0.50 (50%) [FAIR]"));
        assert!(output.contains("Semantic score: 0.6123 (61%) [GOOD]"));
        assert!(output.contains("Matched (1/2): python"));
        assert!(output.contains("Missing: django"));
        assert!(output.contains("Similarity provider: fixed"));
    }

    #[test]
    fn test_markdown_output() {
        let output = MarkdownFormatter::new(true).format_report(&sample_report()).unwrap();

        assert!(output.starts_with("# Resume Match Report"));
        assert!(output.contains("| Skill score | 0.50 |"));
        assert!(output.contains("## Missing skills\n\n- django\n"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, false, false);
        let report = sample_report();

        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown] {
            assert!(!generator.generate_report(&report, &format).unwrap().is_empty());
        }
    }

    #[test]
    fn test_save_report_creates_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports").join("out.md");

        save_report_to_file("# hi", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# hi");
    }
}
