/// A snippet source split into what the reader should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSnippet {
    pub explanation: String,
    pub presentation_code: String,
}

enum Marker {
    Hide,
    Show,
}

/// `// MARK: Hide` / `// mark: - show`, any case.
fn visibility_marker(line: &str) -> Option<Marker> {
    let rest = line.trim().strip_prefix("//")?.trim_start();
    let rest = rest.get(..5).filter(|p| p.eq_ignore_ascii_case("mark:")).map(|_| &rest[5..])?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('-').unwrap_or(rest).trim();
    if rest.eq_ignore_ascii_case("hide") {
        Some(Marker::Hide)
    } else if rest.eq_ignore_ascii_case("show") {
        Some(Marker::Show)
    } else {
        None
    }
}

fn trim_blank_lines(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(s), Some(e)) => lines[s..=e].join("\n"),
        _ => String::new(),
    }
}

pub fn parse(source: &str) -> ParsedSnippet {
    let mut lines = source.lines().peekable();

    while lines.peek().is_some_and(|l| l.trim().is_empty()) {
        lines.next();
    }

    let mut explanation = Vec::new();
    while let Some(doc) = lines.peek().and_then(|l| l.trim_start().strip_prefix("//!")) {
        explanation.push(doc.strip_prefix(' ').unwrap_or(doc));
        lines.next();
    }

    let mut hidden = false;
    let mut visible = Vec::new();
    for line in lines {
        match visibility_marker(line) {
            Some(Marker::Hide) => hidden = true,
            Some(Marker::Show) => hidden = false,
            None if !hidden => visible.push(line),
            None => {}
        }
    }

    ParsedSnippet {
        explanation: trim_blank_lines(&explanation),
        presentation_code: trim_blank_lines(&visible),
    }
}
