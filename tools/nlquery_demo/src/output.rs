// Terminal rendering of responses
use std::path::Path;

use nlquery::{CompiledProgram, InteractiveResponse};

const CELL_WIDTH: usize = 15;
const PREVIEW_ROWS: usize = 20;

/// Print the insight, spec and a preview of the result rows
pub fn print_response(response: &InteractiveResponse) {
    println!("💬 {}", response.insight);
    println!();
    println!("🔧 Program: {}", response.program_version);
    println!(
        "📄 Query spec: {}",
        serde_json::to_string(&response.query_spec).unwrap_or_default()
    );
    println!(
        "📊 Rows: {} returned of {} matched",
        response.stats.returned_rows, response.stats.requested_rows
    );

    if response.data.is_empty() {
        println!("  (No results returned)");
        return;
    }

    print!("    ");
    for column in &response.columns {
        print!("| {:<width$} ", clip(column), width = CELL_WIDTH);
    }
    println!("|");

    print!("    ");
    for _ in &response.columns {
        print!("+{}", "-".repeat(CELL_WIDTH + 2));
    }
    println!("+");

    for row in response.data.iter().take(PREVIEW_ROWS) {
        print!("    ");
        for column in &response.columns {
            let cell = row.get(column).map(|v| v.to_string()).unwrap_or_default();
            print!("| {:<width$} ", clip(&cell), width = CELL_WIDTH);
        }
        println!("|");
    }

    if response.data.len() > PREVIEW_ROWS {
        println!("    ... {} more rows", response.data.len() - PREVIEW_ROWS);
    }
}

/// Print the outcome of a compile run
pub fn print_compile_summary(program: &CompiledProgram, out: &Path) {
    println!("📦 Compiled program {}", program.version);
    println!("  Examples: {}", program.trainset.len());
    println!("  Baseline score: {:.3}", program.baseline_score);
    println!("  Compiled score: {:.3}", program.compiled_score);
    println!("\n💾 Saved to: {}", out.display());
}

fn clip(text: &str) -> String {
    text.chars().take(CELL_WIDTH).collect()
}
