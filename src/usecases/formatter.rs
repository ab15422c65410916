//! Turns raw page text into the chat message. Pure: output depends only on input and date.

use crate::domain::{DomainError, FormattedMessage, WorkoutText};
use chrono::NaiveDate;

pub const HEADER: &str = "🏋️‍♂️ CROSSFIT PANDA - DAILY WOD 🏋️‍♂️";
pub const FOOTER: &str = "💪 !בהצלחה באימון";

/// Normalize whitespace: LF line endings, no trailing spaces, at most one blank line in a row,
/// no leading/trailing blank lines. Idempotent.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_blank = false;

    for line in raw.replace("\r\n", "\n").replace('\r', "\n").lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        pending_blank = false;
        out.push_str(line);
    }

    out.trim().to_string()
}

/// Wrap the normalized workout in the fixed template for `date`.
///
/// Fails with `DomainError::Format` when the input is empty or whitespace-only.
pub fn format_workout(
    workout: &WorkoutText,
    date: NaiveDate,
) -> Result<FormattedMessage, DomainError> {
    let body = normalize(workout.as_str());
    if body.is_empty() {
        return Err(DomainError::Format(
            "workout text is empty or whitespace-only".into(),
        ));
    }

    let text = format!(
        "{}\n{}\n\n{}\n\n{}",
        HEADER,
        date.format("%d/%m/%Y (%A)"),
        body,
        FOOTER
    );
    Ok(FormattedMessage::new(text, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_header_uses_full_weightlifter_emoji() {
        let lifter = "\u{1F3CB}\u{FE0F}\u{200D}\u{2642}\u{FE0F}";
        assert_eq!(HEADER, format!("{lifter} CROSSFIT PANDA - DAILY WOD {lifter}"));
    }

    #[test]
    fn test_whitespace_only_is_format_error() {
        let err = format_workout(&WorkoutText::new("   "), day()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);

        let err = format_workout(&WorkoutText::new(""), day()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_template_wraps_trimmed_text() {
        let raw = WorkoutText::new("\n  5 rounds: 10 pushups  \n\n");
        let msg = format_workout(&raw, day()).unwrap();
        assert_eq!(
            msg.text(),
            format!("{HEADER}\n19/10/2026 (Monday)\n\n5 rounds: 10 pushups\n\n{FOOTER}")
        );
        assert_eq!(msg.body(), "5 rounds: 10 pushups");
    }

    #[test]
    fn test_collapses_blank_lines() {
        let raw = "Warm-up\r\n\r\n\r\n  \nStrength:   \nBack squat 5x5\n\n\n\nMetcon";
        assert_eq!(
            normalize(raw),
            "Warm-up\n\nStrength:\nBack squat 5x5\n\nMetcon"
        );
    }

    #[test]
    fn test_keeps_indentation_inside_lines() {
        assert_eq!(normalize("A)\n  - 10 pullups\n"), "A)\n  - 10 pullups");
    }

    #[test]
    fn test_contains_trimmed_input() {
        for raw in ["x", " AMRAP 12 ", "\tEMOM 10\n", "For time:\n21-15-9\nThrusters"] {
            let msg = format_workout(&WorkoutText::new(raw), day()).unwrap();
            assert!(!msg.text().is_empty());
            assert!(msg.text().contains(raw.trim()));
        }
    }

    #[test]
    fn test_idempotent_on_body() {
        let raw = " Part A\n\n\n\nPart B   \n\n";
        let first = format_workout(&WorkoutText::new(raw), day()).unwrap();
        let second = format_workout(&WorkoutText::new(first.body()), day()).unwrap();
        assert_eq!(first.body(), second.body());
        assert_eq!(first, second);
        assert_eq!(normalize(first.body()), first.body());
    }
}
