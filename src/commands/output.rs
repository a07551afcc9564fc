use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::reconcile::{CitationKey, ReconciliationReport, ReferencesSection};

pub(super) fn write_report(report: &ReconciliationReport, json: bool) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    if json {
        serde_json::to_writer_pretty(&mut output, report)
            .context("failed to serialize report json output")?;
        writeln!(output)?;
    } else {
        write_text_report(&mut output, report)?;
    }
    output.flush()?;
    Ok(())
}

pub(super) fn write_text_report<W: Write>(output: &mut W, report: &ReconciliationReport) -> Result<()> {
    match report.references_section {
        ReferencesSection::Found { heading_index } => {
            writeln!(output, "References heading: paragraph {}", heading_index + 1)?;
        }
        ReferencesSection::Missing => {
            writeln!(output, "References heading: not found")?;
        }
    }
    writeln!(
        output,
        "Citations: distinct={} parenthetical={} narrative={}",
        report.mention_count, report.parenthetical_count, report.narrative_count
    )?;
    writeln!(output, "Reference entries: {}", report.entry_count)?;

    if !report.references_found() {
        write_key_list(output, "Cited in text", &report.mentions)?;
        return Ok(());
    }

    write_key_list(output, "Cited but missing from references", &report.cited_but_missing)?;
    write_key_list(output, "Listed but never cited", &report.listed_but_uncited)?;
    Ok(())
}

fn write_key_list<W: Write>(output: &mut W, title: &str, keys: &[CitationKey]) -> Result<()> {
    writeln!(output, "{title}: {}", keys.len())?;
    if keys.is_empty() {
        writeln!(output, "\tnone")?;
    }
    for key in keys {
        writeln!(output, "\t{key}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::Reconciler;

    fn render(paragraphs: &[&str]) -> String {
        let report = Reconciler::new()
            .expect("default reconciler builds")
            .check(paragraphs);
        let mut buffer = Vec::new();
        write_text_report(&mut buffer, &report).expect("render into memory");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn text_report_lists_both_differences() {
        let rendered = render(&[
            "Prior work (Smith, 2021) showed X. Later, Jones and Lee (2020) argued Y.",
            "References",
            "Smith, J. (2021). Title one. Journal.",
            "Lee, K. (2019). Title two. Journal.",
        ]);

        assert_eq!(
            rendered,
            "References heading: paragraph 2\n\
             Citations: distinct=2 parenthetical=1 narrative=1\n\
             Reference entries: 2\n\
             Cited but missing from references: 1\n\
             \tjones, 2020\n\
             Listed but never cited: 1\n\
             \tlee, 2019\n"
        );
    }

    #[test]
    fn text_report_without_heading_lists_mentions_only() {
        let rendered = render(&["Smith (2021) said so."]);

        assert!(rendered.starts_with("References heading: not found\n"));
        assert!(rendered.contains("Cited in text: 1\n\tsmith, 2021\n"));
        assert!(!rendered.contains("Listed but never cited"));
    }

    #[test]
    fn json_report_tags_boundary_status() {
        let report = Reconciler::new()
            .expect("default reconciler builds")
            .check(&["References"]);
        let value = serde_json::to_value(&report).expect("report serializes");

        assert_eq!(value["references_section"]["status"], "found");
        assert_eq!(value["references_section"]["heading_index"], 0);
        assert_eq!(value["entry_count"], 0);
    }
}
