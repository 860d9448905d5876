//! Snapshot formatting for merge outcomes.
//!
//! Outcomes are rendered as plain text so snapshots stay readable and
//! independent of serializer settings.

use std::fmt::Write;

use graphql_merge::MergeOutcome;

/// Render a merge outcome for snapshot testing.
///
/// # Example
///
/// ```ignore
/// use graphql_test_utils::format_outcome;
///
/// let outcome = resolve(&entry, &mut pool).unwrap();
/// insta::assert_snapshot!(format_outcome(&outcome));
/// ```
#[must_use]
pub fn format_outcome(outcome: &MergeOutcome) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "resolution: {:?}", outcome.resolution());
    let _ = writeln!(out, "merged paths: {}", list(&outcome.merged_origins));
    let _ = writeln!(out, "types introduced: {}", list(&outcome.types_introduced));
    let _ = writeln!(
        out,
        "directives introduced: {}",
        list(&outcome.directives_introduced)
    );
    let _ = writeln!(out, "types unresolved: {}", list(&outcome.types_unresolved));
    let _ = writeln!(
        out,
        "directives unresolved: {}",
        list(&outcome.directives_unresolved)
    );

    if !outcome.steps.is_empty() {
        out.push_str("steps:\n");
        for (i, step) in outcome.steps.iter().enumerate() {
            let _ = writeln!(
                out,
                "  [{}] {} {} <- {}",
                i + 1,
                step.pass,
                step.symbol,
                step.source_path
            );
        }
    }

    out.push_str("---\n");
    out.push_str(&outcome.merged_text);
    out
}

/// Format messages one per line with an index, or `(none)`.
pub fn format_messages<T: AsRef<str>>(messages: &[T]) -> String {
    if messages.is_empty() {
        return String::from("(none)");
    }

    messages
        .iter()
        .enumerate()
        .map(|(i, m)| format!("[{}] {}", i + 1, m.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn list(names: &[String]) -> String {
    if names.is_empty() {
        String::from("-")
    } else {
        names.join(", ")
    }
}
