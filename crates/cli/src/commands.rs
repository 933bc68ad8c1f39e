use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use specimark_client::AnnotationClient;
use specimark_core::model::Annotation;
use specimark_core::query::{ContextFilter, ExportFormat};
use specimark_core::scope::{LabelScope, MediaScope};
use specimark_core::transform::wire_to_domain;
use specimark_core::types::DbId;
use specimark_core::validate::{validate, validate_all};

/// One tab-separated line per annotation: id, shape, anchor, author, label.
pub fn render_annotations(annotations: &[Annotation]) -> String {
    let mut out = String::new();
    for a in annotations {
        let id = a
            .annotation_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{id}\t{}\t{},{}\t{}\t{}",
            a.shape.tag().unwrap_or("?"),
            a.x,
            a.y,
            a.provenance.user_name.as_deref().unwrap_or("-"),
            a.label,
        );
    }
    out
}

pub async fn fetch(
    client: &AnnotationClient,
    media: MediaScope,
    annotation_type: String,
    link: Option<DbId>,
    filter: ContextFilter,
) -> anyhow::Result<()> {
    let mut scope = LabelScope::new(media, annotation_type);
    scope.link_id = link;
    let annotations = client.fetch(&scope, &filter).await?;
    print!("{}", render_annotations(&annotations));
    Ok(())
}

pub async fn stats(
    client: &AnnotationClient,
    media: MediaScope,
    annotation_type: &str,
) -> anyhow::Result<()> {
    let stats = client.try_stats(&media, annotation_type).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

pub async fn export(
    client: &AnnotationClient,
    media: MediaScope,
    annotation_type: &str,
    format: &str,
    filter: ContextFilter,
) -> anyhow::Result<()> {
    let format = ExportFormat::from_str(format)?;
    let out = client.export(&media, &format, annotation_type, &filter).await?;
    println!("{out}");
    Ok(())
}

pub async fn delete(client: &AnnotationClient, media: MediaScope, ids: Vec<DbId>) -> anyhow::Result<()> {
    let result = client.delete(&media, ids).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Validate a file of wire records. Returns the report and whether every
/// record passed.
pub fn validate_file(path: &Path) -> anyhow::Result<(String, bool)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let body: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(validation_report(&wire_to_domain(&body)))
}

fn validation_report(annotations: &[Annotation]) -> (String, bool) {
    let mut out = String::new();
    let failures = validate_all(annotations);

    for (i, a) in annotations.iter().enumerate() {
        for warning in validate(a).warnings {
            let _ = writeln!(out, "[{i}] warning {warning}");
        }
    }
    for (i, result) in &failures {
        for error in &result.errors {
            let _ = writeln!(out, "[{i}] error {error}");
        }
    }
    let _ = writeln!(
        out,
        "{} annotation(s), {} invalid",
        annotations.len(),
        failures.len()
    );
    (out, failures.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn report_lists_errors_and_summary() {
        let annotations = wire_to_domain(&json!([
            {"label": "ok", "type": "rect", "x": 0, "y": 0, "w": 5, "h": 5},
            {"label": "", "type": "poly", "points": [0, 0, 1, 1]},
            {"label": "odd", "type": "hexagon"},
        ]));
        let (report, all_valid) = validation_report(&annotations);

        assert!(!all_valid);
        assert!(report.contains("[1] error label: Label is required"));
        assert!(report.contains("[1] error points:"));
        assert!(report.contains("[2] warning type: Unrecognized shape type 'hexagon'"));
        assert!(report.ends_with("3 annotation(s), 1 invalid\n"));
    }

    #[test]
    fn render_marks_unsaved_rows() {
        let annotations = wire_to_domain(&json!([
            {"annotation_id": 3, "label": "femur", "type": "point", "x": 1, "y": 2, "user_name": "A"},
            {"label": "new", "type": "rect"},
        ]));
        let out = render_annotations(&annotations);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "3\tpoint\t1,2\tA\tfemur");
        assert_eq!(lines[1], "-\trect\t0,0\t-\tnew");
    }
}
