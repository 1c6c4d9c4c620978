// Console rendering - the display templates for study results.
//
// Two templates exist, selected purely by the result's display mode:
// - Normal: summary, quiz, and study tip are always present
// - Math: the same sections rendered only when present, plus the math
//   question block
//
// The dark-mode preference is applied here as a presentation concern only;
// it never changes which content is rendered.

use crate::models::{MathMaterials, QuizItem, StudyMaterials, StudyResult};
use crate::store::HistoryEntry;

/// ANSI styling for the two display themes.
struct Theme {
    heading: &'static str,
    accent: &'static str,
    reset: &'static str,
}

impl Theme {
    fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            // Bright headings for dark terminals
            Self {
                heading: "\x1b[1;96m",
                accent: "\x1b[92m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                heading: "\x1b[1m",
                accent: "\x1b[32m",
                reset: "\x1b[0m",
            }
        }
    }
}

/// Render a successful result with the template its mode selects.
pub fn render_result(result: &StudyResult, dark_mode: bool) -> String {
    let theme = Theme::for_mode(dark_mode);
    match result {
        StudyResult::Normal(materials) => render_normal(materials, &theme),
        StudyResult::Math(materials) => render_math(materials, &theme),
    }
}

/// Render an error message. Embedded line breaks are preserved.
pub fn render_error(message: &str) -> String {
    format!("⚠ {}\n", message)
}

/// Render the search history, most recent first, numbered from 1.
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No recent searches.\n".to_string();
    }

    let mut out = String::from("Recent searches:\n");
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {} ({})\n",
            i + 1,
            entry.topic,
            entry.timestamp.format("%Y-%m-%d %H:%M")
        ));
    }
    out
}

fn render_normal(materials: &StudyMaterials, theme: &Theme) -> String {
    let mut out = String::new();

    push_summary(&mut out, &materials.summary, theme);
    push_quiz(&mut out, &materials.quiz, theme);
    push_study_tip(&mut out, &materials.study_tip, theme);
    push_source(&mut out, materials.source.as_deref());

    out
}

fn render_math(materials: &MathMaterials, theme: &Theme) -> String {
    let mut out = String::new();

    // Textual materials are optional in math mode; absent ones render as
    // nothing rather than as empty sections.
    if !materials.summary.is_empty() {
        push_summary(&mut out, &materials.summary, theme);
    }
    if !materials.quiz.is_empty() {
        push_quiz(&mut out, &materials.quiz, theme);
    }
    if let Some(tip) = &materials.study_tip {
        push_study_tip(&mut out, tip, theme);
    }

    out.push_str(&format!(
        "{}🔢 Math Challenge{}\n",
        theme.heading, theme.reset
    ));
    out.push_str(&format!("  {}\n", materials.math_question.question));
    out.push_str(&format!(
        "  {}Answer:{} {}\n",
        theme.accent, theme.reset, materials.math_question.answer
    ));
    out.push_str(&format!(
        "  Explanation: {}\n",
        materials.math_question.explanation
    ));
    push_source(&mut out, materials.source.as_deref());

    out
}

fn push_summary(out: &mut String, summary: &[String], theme: &Theme) {
    out.push_str(&format!("{}📚 Summary{}\n", theme.heading, theme.reset));
    for point in summary {
        out.push_str(&format!("  • {}\n", point));
    }
    out.push('\n');
}

fn push_quiz(out: &mut String, quiz: &[QuizItem], theme: &Theme) {
    out.push_str(&format!("{}📝 Quiz{}\n", theme.heading, theme.reset));
    for (i, item) in quiz.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, item.question));
        let correct = item.correct_index();
        for (j, option) in item.options.iter().enumerate() {
            let letter = QuizItem::option_letter(j).unwrap_or('?');
            if correct == Some(j) {
                out.push_str(&format!(
                    "     {}{}. {} ✓{}\n",
                    theme.accent, letter, option, theme.reset
                ));
            } else {
                out.push_str(&format!("     {}. {}\n", letter, option));
            }
        }
    }
    out.push('\n');
}

fn push_study_tip(out: &mut String, tip: &str, theme: &Theme) {
    out.push_str(&format!(
        "{}💡 Study Tip{}\n  {}\n\n",
        theme.heading, theme.reset, tip
    ));
}

fn push_source(out: &mut String, source: Option<&str>) {
    if let Some(source) = source {
        out.push_str(&format!("Source: {}\n", source));
    }
}
