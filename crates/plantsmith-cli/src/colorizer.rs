//! Terminal colorization for PlantUML output and diagnostics
//!
//! Applies ANSI escape codes using crossterm.

use crossterm::style::{Color, Stylize};

/// Colorize PlantUML text line by line
///
/// - `@startuml` / `@enduml` markers: Magenta
/// - Directives (`!theme`, `skinparam`, `title`, `left to right direction`): Blue
/// - Control keywords (`if`, `then`, `else`, `endif`, `start`, `stop`): Yellow
/// - Arrows (`-->`, `..>`, `-->[..]`): Cyan
/// - Quoted text: Green
pub fn colorize_output(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2);

    for line in input.lines() {
        result.push_str(&colorize_line(line));
        result.push('\n');
    }

    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

fn colorize_line(line: &str) -> String {
    let trimmed = line.trim_start();
    if trimmed.starts_with("@startuml") || trimmed.starts_with("@enduml") {
        return line.to_string().with(Color::Magenta).to_string();
    }
    if trimmed.starts_with('!')
        || trimmed.starts_with("skinparam")
        || trimmed.starts_with("title ")
        || trimmed.starts_with("left to right direction")
    {
        return line.to_string().with(Color::Blue).to_string();
    }

    let mut out = String::with_capacity(line.len() * 2);
    let mut in_quote = false;
    let mut quoted = String::new();
    let mut word = String::new();

    for c in line.chars() {
        if in_quote {
            quoted.push(c);
            if c == '"' {
                out.push_str(&quoted.clone().with(Color::Green).to_string());
                quoted.clear();
                in_quote = false;
            }
            continue;
        }
        if c == '"' {
            flush_word(&mut out, &mut word);
            in_quote = true;
            quoted.push(c);
        } else if c.is_whitespace() {
            flush_word(&mut out, &mut word);
            out.push(c);
        } else {
            word.push(c);
        }
    }
    flush_word(&mut out, &mut word);
    // Unterminated quote is left uncolored
    out.push_str(&quoted);
    out
}

fn flush_word(out: &mut String, word: &mut String) {
    if word.is_empty() {
        return;
    }
    let colored = match word.as_str() {
        "if" | "then" | "else" | "endif" | "start" | "stop" => {
            word.clone().with(Color::Yellow).to_string()
        }
        w if is_arrow(w) => w.to_string().with(Color::Cyan).to_string(),
        w => w.to_string(),
    };
    out.push_str(&colored);
    word.clear();
}

fn is_arrow(word: &str) -> bool {
    word.starts_with("-->") || word.starts_with("..>") || word.starts_with("->")
}

/// Green line for an applied fix
pub fn fix_line(message: &str) -> String {
    format!("{} {}", "fixed:".to_string().with(Color::Green), message)
}

/// Yellow line for an issue left in the text
pub fn issue_line(message: &str) -> String {
    format!("{} {}", "issue:".to_string().with(Color::Yellow), message)
}

/// Validation verdict, green when valid and red otherwise
pub fn verdict(valid: bool, message: &str) -> String {
    if valid {
        format!("{} {}", "✓".to_string().with(Color::Green), message)
    } else {
        format!("{} {}", "✗".to_string().with(Color::Red), message)
    }
}
