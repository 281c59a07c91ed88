//! Terminal rendering for the `ask` command

use crate::results::Finding;
use crate::storage::SavedPaths;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Characters of each finding shown in the listing
const PREVIEW_CHARS: usize = 200;

pub fn welcome(app_name: &str) {
    let rule = "─".repeat(app_name.chars().count() + 4);
    println!("{}", rule.blue());
    println!("  {}", app_name.bold().blue());
    println!("  {}", "Web research with structured findings and drafted answers".dimmed());
    println!("{}", rule.blue());
}

/// Ask for the query on stdin
pub fn prompt_query() -> io::Result<String> {
    println!("\n{}", "Enter your research query:".bold().cyan());
    print!("> ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
        .template("{spinner:.blue} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn spinner_done(spinner: &ProgressBar, ok: bool) {
    if ok {
        spinner.finish_with_message(format!("{}", "Research completed!".green()));
    } else {
        spinner.finish_with_message(format!("{}", "Research failed!".red()));
    }
}

pub fn failure(message: &str) {
    eprintln!("\n{}", message.bold().red());
}

/// First `PREVIEW_CHARS` characters of `content`, followed by `...`
pub fn preview(content: &str) -> String {
    let head: String = content.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", head)
}

pub fn results(findings: &[Finding], draft: &str, saved: &SavedPaths) {
    println!("\n{}", "Research Results:".bold().green());
    for (i, finding) in findings.iter().enumerate() {
        println!("{} {}", format!("{}.", i + 1).bold(), finding.title);
        println!("{}", preview(&finding.content).dimmed());
        println!("{} {}", "Source:".blue(), finding.source_url);
        println!();
    }

    println!("\n{}", "Drafted Answer:".bold().green());
    println!("{}", "─".repeat(60).green());
    println!("{}", draft);
    println!("{}", "─".repeat(60).green());

    if let Some(ref path) = saved.research_file {
        println!("\n{}", format!("Research results saved to: {}", path.display()).dimmed());
    }
    if let Some(ref path) = saved.draft_file {
        println!("{}", format!("Draft saved to: {}", path.display()).dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview() {
        assert_eq!(preview("short"), "short...");

        let long = "é".repeat(300);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
    }
}
