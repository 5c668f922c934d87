//! Terminal rendering of core view models. Nothing in here inspects
//! `AppState` directly; the view model is the only input.

use courier_core::{AppViewModel, Notice, NoticeLevel, ResultRowView};

pub fn selection_summary(view: &AppViewModel) -> String {
    let mut summary = format!("Selected {} image(s)", view.selection_count);
    if let Some(stats) = view.last_add_stats {
        if stats.duplicates > 0 || stats.rejected > 0 {
            summary.push_str(&format!(
                " ({} duplicate(s) ignored, {} non-image file(s) dropped)",
                stats.duplicates, stats.rejected
            ));
        }
    }
    summary
}

pub fn print_selection(view: &AppViewModel) {
    println!("{}", selection_summary(view));
    for row in &view.previews {
        println!("  {} ({})", row.name, row.size_label);
    }
}

pub fn result_line(row: &ResultRowView) -> String {
    match (&row.optimized_label, &row.saved_label) {
        (Some(optimized), Some(saved)) => format!(
            "{}  {} -> {} (saved {})",
            row.filename, row.original_label, optimized, saved
        ),
        _ => format!("{}  {}", row.filename, row.original_label),
    }
}

pub fn print_results(view: &AppViewModel) {
    if !view.results_visible {
        return;
    }
    println!();
    println!("{} result(s):", view.results.len());
    for row in &view.results {
        println!("  {}", result_line(row));
        println!("    {}", row.download_url);
    }
}

pub fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Error => eprintln!("error: {}", notice.message),
        NoticeLevel::Info => println!("{}", notice.message),
    }
}
