//! Benchmark report rendering.
//!
//! Templates are plain text with literal `__PLACEHOLDER__` tokens; each
//! token is replaced with its value, nothing else is interpreted.

use std::path::Path;

use anyhow::Result;

use crate::ops::bench::{axis_max, performance, BenchReport};
use crate::util::fs::{read_to_string, write_string};

/// Turn a variant name into a placeholder segment: `NamedType` → `NAMED_TYPE`.
pub fn placeholder_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && prev_lower {
                out.push('_');
            }
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
            out.push(c.to_ascii_uppercase());
        } else {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            prev_lower = false;
        }
    }

    out.trim_end_matches('_').to_string()
}

/// Placeholder/value pairs for a benchmark report.
///
/// Comparisons are made against the first variant.
pub fn placeholders(report: &BenchReport) -> Vec<(String, String)> {
    let mut values = vec![
        ("__N_ITERATIONS__".to_string(), report.iterations.to_string()),
        ("__COMPILER__".to_string(), report.compiler.clone()),
        (
            "__MAX_Y_HEADER__".to_string(),
            axis_max(&report.results.iter().map(|r| r.include_only).collect::<Vec<_>>()).to_string(),
        ),
        (
            "__MAX_Y_FULL__".to_string(),
            axis_max(&report.results.iter().map(|r| r.full).collect::<Vec<_>>()).to_string(),
        ),
    ];

    for result in &report.results {
        let name = placeholder_name(&result.name);
        values.push((format!("__{}_HEADER__", name), result.include_only.to_string()));
        values.push((format!("__{}_FULL__", name), result.full.to_string()));
    }

    if let Some((baseline, others)) = report.results.split_first() {
        let base = placeholder_name(&baseline.name);
        for other in others {
            let name = placeholder_name(&other.name);
            values.push((
                format!("__{}_VS_{}_HEADER__", base, name),
                performance(baseline.include_only, other.include_only),
            ));
            values.push((
                format!("__{}_VS_{}_FULL__", base, name),
                performance(baseline.full, other.full),
            ));
        }
    }

    values
}

/// Replace every placeholder in `template`.
///
/// Longer placeholders are substituted first so that a token which is a
/// prefix of another cannot clobber it.
pub fn render_template(template: &str, values: &[(String, String)]) -> String {
    let mut ordered: Vec<&(String, String)> = values.iter().collect();
    ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    ordered
        .into_iter()
        .fold(template.to_string(), |text, (key, value)| text.replace(key.as_str(), value))
}

/// Render `template_path` for `report` into `output_path`.
pub fn render_report(template_path: &Path, output_path: &Path, report: &BenchReport) -> Result<()> {
    let template = read_to_string(template_path)?;
    let rendered = render_template(&template, &placeholders(report));
    write_string(output_path, &rendered)?;
    tracing::info!("rendered report to {}", output_path.display());
    Ok(())
}
