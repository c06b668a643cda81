use colored::Colorize;

/// Semantic level of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Print a markdown heading
pub fn print_heading(level: usize, text: &str) {
    let line = format!("{} {}", "#".repeat(level), text);
    println!("{}\n", line.bold());
}

/// Print lines followed by a blank line
pub fn print_block(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
    println!();
}

/// Print a status line with its semantic color
pub fn print_status(text: &str, level: StatusLevel) {
    let styled = match level {
        StatusLevel::Info => text.normal(),
        StatusLevel::Success => text.green(),
        StatusLevel::Warning => text.yellow(),
        StatusLevel::Error => text.red(),
    };
    println!("{}\n", styled);
}

/// Print a warning on stderr
pub fn print_warning(text: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), text);
}
