//! Diagnostics report printed at the end of a run.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::core::stats::PassStats;
use crate::core::types::{SkipReason, UnmatchedPolicy};

/// Summary of one index pass and an optional join pass
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub started_at: String,
    pub scores: PhaseReport,
    /// Distinct features in the score index
    pub features: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loci: Option<PhaseReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmatched: Option<UnmatchedPolicy>,
}

#[derive(Debug, Serialize)]
pub struct PhaseReport {
    pub file: String,
    #[serde(flatten)]
    pub stats: PassStats,
}

impl PhaseReport {
    pub fn new(path: &Path, stats: PassStats) -> Self {
        Self {
            file: path.display().to_string(),
            stats,
        }
    }
}

impl RunReport {
    pub fn new(scores: PhaseReport, features: usize) -> Self {
        Self {
            started_at: chrono::Utc::now().to_rfc3339(),
            scores,
            features,
            loci: None,
            output: None,
            unmatched: None,
        }
    }

    /// Write the report in the requested format
    ///
    /// # Errors
    ///
    /// Returns an error if writing or JSON serialization fails.
    pub fn write(&self, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
        match format {
            OutputFormat::Text => self.write_text(out)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
            OutputFormat::Tsv => self.write_tsv(out)?,
        }
        Ok(())
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        let scores = &self.scores.stats;
        writeln!(out, "\nScores: {}", self.scores.file)?;
        writeln!(
            out,
            "   Lines: {} total → {} indexed, {} distinct features",
            scores.lines, scores.emitted, self.features
        )?;
        writeln!(
            out,
            "   Skipped: {} ({})",
            scores.skipped_total(),
            scores.skipped_summary()
        )?;
        writeln!(out, "   Time: {:.1}s", scores.elapsed.as_secs_f64())?;

        if let Some(loci) = &self.loci {
            let stats = &loci.stats;
            writeln!(out, "\nLoci: {}", loci.file)?;
            if let Some(output) = &self.output {
                writeln!(out, "   Output: {output}")?;
            }
            if let Some(policy) = self.unmatched {
                writeln!(out, "   Unmatched loci: {policy}")?;
            }
            writeln!(
                out,
                "   Lines: {} total → {} rows written",
                stats.lines, stats.emitted
            )?;
            writeln!(
                out,
                "   Skipped: {} ({})",
                stats.skipped_total(),
                stats.skipped_summary()
            )?;
            writeln!(out, "   Time: {:.1}s", stats.elapsed.as_secs_f64())?;
        }
        Ok(())
    }

    fn write_tsv(&self, out: &mut dyn Write) -> io::Result<()> {
        let reasons: Vec<&str> = SkipReason::ALL.iter().map(|r| r.as_str()).collect();
        writeln!(
            out,
            "phase\tfile\tlines\temitted\tskipped\t{}\telapsed_secs",
            reasons.join("\t")
        )?;

        let mut write_row = |phase: &str, report: &PhaseReport| -> io::Result<()> {
            let stats = &report.stats;
            let counts: Vec<String> = SkipReason::ALL
                .iter()
                .map(|&r| stats.skipped_for(r).to_string())
                .collect();
            writeln!(
                out,
                "{phase}\t{}\t{}\t{}\t{}\t{}\t{:.3}",
                report.file,
                stats.lines,
                stats.emitted,
                stats.skipped_total(),
                counts.join("\t"),
                stats.elapsed.as_secs_f64()
            )
        };

        write_row("scores", &self.scores)?;
        if let Some(loci) = &self.loci {
            write_row("loci", loci)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn report() -> RunReport {
        let mut scores = PassStats::new();
        scores.lines = 3;
        scores.emitted = 2;
        scores.skip(SkipReason::MissingScore);
        scores.elapsed = Duration::from_millis(250);

        let mut loci = PassStats::new();
        loci.lines = 5;
        loci.emitted = 4;
        loci.skip(SkipReason::Unmatched);

        let mut report = RunReport::new(PhaseReport::new(Path::new("scores.js"), scores), 2);
        report.loci = Some(PhaseReport::new(Path::new("loci.js.gz"), loci));
        report.output = Some("out.tsv".to_string());
        report.unmatched = Some(UnmatchedPolicy::Skip);
        report
    }

    fn render(report: &RunReport, format: OutputFormat) -> String {
        let mut out = Vec::new();
        report.write(format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_report() {
        let text = render(&report(), OutputFormat::Text);
        assert!(text.contains("Scores: scores.js"));
        assert!(text.contains("Skipped: 1 (1 missing score)"));
        assert!(text.contains("Loci: loci.js.gz"));
        assert!(text.contains("5 total → 4 rows written"));
        assert!(text.contains("Unmatched loci: skip"));
    }

    #[test]
    fn test_json_report() {
        let text = render(&report(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["features"], 2);
        assert_eq!(value["scores"]["file"], "scores.js");
        assert_eq!(value["scores"]["skipped"]["missing_score"], 1);
        assert_eq!(value["loci"]["lines"], 5);
        assert_eq!(value["unmatched"], "skip");
        assert!(value["started_at"].is_string());
    }

    #[test]
    fn test_tsv_report() {
        let text = render(&report(), OutputFormat::Tsv);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            "phase\tfile\tlines\temitted\tskipped\tparse\tmissing_key\tmissing_score\tmissing_locus\tinvalid_locus\tunmatched\telapsed_secs"
        );
        assert_eq!(rows[1], "scores\tscores.js\t3\t2\t1\t0\t0\t1\t0\t0\t0\t0.250");
        assert!(rows[2].starts_with("loci\tloci.js.gz\t5\t4\t1\t0\t0\t0\t0\t0\t1\t"));
    }

    #[test]
    fn test_index_only_report_omits_loci() {
        let report = RunReport::new(PhaseReport::new(Path::new("s.js"), PassStats::new()), 0);
        let value: serde_json::Value =
            serde_json::from_str(&render(&report, OutputFormat::Json)).unwrap();
        assert!(value.get("loci").is_none());
        assert_eq!(render(&report, OutputFormat::Tsv).lines().count(), 2);
    }
}
