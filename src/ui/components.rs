use textwrap::Options;

use crate::defaults::Defaults;

/// Title line with an underline of matching width.
pub fn heading(title: &str) -> String {
    format!("{title}\n{}\n", "=".repeat(title.chars().count()))
}

/// Paragraph text wrapped to the presentation width, blank lines kept.
pub fn wrapped(text: &str) -> String {
    let opts = Options::new(Defaults::WRAP_WIDTH);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() { String::new() } else { textwrap::fill(line, &opts) }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// First line of an explanation, for list entries.
pub fn summary(text: &str) -> &str {
    text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("")
}

/// `  1. name - summary` lines.
pub fn numbered_list<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for (i, (name, detail)) in items.into_iter().enumerate() {
        if detail.is_empty() {
            out.push_str(&format!("  {}. {name}\n", i + 1));
        } else {
            out.push_str(&format!("  {}. {name} - {detail}\n", i + 1));
        }
    }
    out
}

/// Code block indented so it stands apart from prose.
pub fn code_block(code: &str) -> String {
    code.lines()
        .map(|l| if l.is_empty() { String::new() } else { format!("    {l}") })
        .collect::<Vec<_>>()
        .join("\n")
}
