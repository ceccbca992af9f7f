/// 文本渲染
///
/// 把组件的视图数据渲染为控制台文本
use crate::components::{Dashboard, FormView, ListView, Mounted, QuestionRow, ViewState};
use std::fmt::Write;

pub const TITLE: &str = "🛠️ Admin Question Portal";
pub const EMPTY_MESSAGE: &str = "🚫 No questions found.";
const PLACEHOLDER: &str = "░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░";

/// 渲染整个后台页面
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", render_tabs(dashboard.state()));
    let _ = writeln!(out, "{}", "─".repeat(60));
    match dashboard.mounted() {
        Mounted::Form(form) => out.push_str(&render_form(&form.view())),
        Mounted::List(list) => {
            if let Some(err) = list.last_error() {
                let _ = writeln!(out, "⚠️ {err}");
            }
            out.push_str(&render_list(&list.view()));
        }
    }
    out
}

/// 标签栏，当前视图用方括号标出
pub fn render_tabs(state: &ViewState) -> String {
    let (add, list) = if state.is_add() {
        ("[➕ Add Question]", " 📋 Manage Questions ")
    } else {
        (" ➕ Add Question ", "[📋 Manage Questions]")
    };
    format!("{add}  {list}")
}

pub fn render_form(view: &FormView<'_>) -> String {
    let draft = view.draft;
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.heading);
    if let Some(err) = view.error {
        let _ = writeln!(out, "⚠️ {err}");
    }
    let _ = writeln!(out, "  Branch ID:   {}", draft.branch_id);
    let _ = writeln!(out, "  Test ID:     {}", draft.test_id);
    let _ = writeln!(out, "  Question:    {}", draft.question_text);
    let _ = writeln!(out, "  Options:");
    for (i, option) in draft.options.iter().enumerate() {
        let _ = writeln!(out, "    {}. {}", i + 1, option);
    }
    let _ = writeln!(out, "  Correct Option Index (0 to 3): {}", draft.correct_answer);
    let _ = writeln!(out, "  Difficulty:  {}", draft.difficulty.label());
    let _ = writeln!(out, "  Explanation: {}", draft.explanation);
    let button = if view.submit_disabled {
        format!("  ⏳ {}", view.submit_label)
    } else {
        format!("  [ {} ]", view.submit_label)
    };
    let _ = writeln!(out, "{button}");
    out
}

pub fn render_list(view: &ListView<'_>) -> String {
    match view {
        ListView::Loading { placeholders } => {
            let mut out = String::new();
            for _ in 0..*placeholders {
                let _ = writeln!(out, "  {PLACEHOLDER}");
            }
            out
        }
        ListView::Empty => format!("{EMPTY_MESSAGE}\n"),
        ListView::Rows(rows) => rows
            .iter()
            .enumerate()
            .map(|(i, row)| render_row(i + 1, row))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_row(number: usize, row: &QuestionRow<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{number} {}", row.question_text);
    for option in &row.options {
        if option.is_correct {
            let _ = writeln!(out, "   ✅ {}", option.text);
        } else {
            let _ = writeln!(out, "   •  {}", option.text);
        }
    }
    let _ = writeln!(
        out,
        "   Branch: {} | Test: {} | {}",
        row.branch_id,
        row.test_id,
        row.difficulty.label()
    );
    out
}
