//! Plain-text rendering of application tables and the statistics panel.

use std::fmt::Write;

use crate::domain::{ApplicationStats, LoanApplication, LoanStatus};

const HEADERS: [&str; 6] = ["ID", "Name", "Amount", "Tenure", "Status", "Created"];

/// Render applications as an aligned table, one row per record.
pub fn applications_table(applications: &[LoanApplication]) -> String {
    if applications.is_empty() {
        return "No loan applications.\n".to_string();
    }

    let rows: Vec<[String; 6]> = applications
        .iter()
        .map(|app| {
            [
                app.id.to_string(),
                app.full_name.clone(),
                format!("{:.2}", app.amount),
                format!("{} months", app.tenure),
                app.status.to_string(),
                app.created_at.format("%Y-%m-%d %H:%M").to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

/// Render the administrator statistics panel.
pub fn stats_panel(stats: &ApplicationStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total applications: {}", stats.total);
    for status in LoanStatus::ALL {
        let _ = writeln!(out, "{:<9} {}", status.as_str(), stats.count_by_status(status));
    }
    let _ = writeln!(out, "Average amount: {:.2}", stats.average_amount);
    let _ = writeln!(out, "Approval rate: {:.2}%", stats.approval_rate);
    out
}
