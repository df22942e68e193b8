//! Two-column help tables with word wrapping.

/// Width descriptions are wrapped to.
pub const MAX_ROW_LENGTH: usize = 72;

/// Terminator appended to every rendered line.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Render `(label, description)` rows as an aligned table.
///
/// Each row starts with two spaces and the label; descriptions all begin at
/// column `longest label + 4` and are wrapped to [`MAX_ROW_LENGTH`].
/// Continuation lines are indented to the description column.
pub fn tabularize(rows: &[(&str, &str)]) -> String {
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let indent = " ".repeat(width + 4);

    let mut out = String::new();
    for (label, description) in rows {
        let mut lines = split_into_lines(description).into_iter();

        out.push_str("  ");
        out.push_str(label);
        out.push_str(&" ".repeat(width - label.chars().count() + 2));
        out.push_str(lines.next().unwrap_or_default());
        out.push_str(LINE_ENDING);

        for line in lines {
            out.push_str(&indent);
            out.push_str(line);
            out.push_str(LINE_ENDING);
        }
    }
    out
}

/// Break one line of text into pieces no longer than `width` chars.
///
/// Breaks at the last space within the first `width + 1` chars (never at the
/// very first char), dropping that space. Without one, the line is cut at
/// exactly `width` chars.
pub fn wrap_line(line: &str, width: usize) -> Vec<&str> {
    if width == 0 {
        return vec![line];
    }

    let mut pieces = Vec::new();
    let mut rest = line;

    loop {
        let window: Vec<(usize, char)> = rest.char_indices().take(width + 1).collect();
        if window.len() <= width {
            break;
        }

        let space = window[1..=width]
            .iter()
            .rev()
            .find(|(_, c)| *c == ' ')
            .map(|(idx, _)| *idx);
        match space {
            Some(idx) => {
                pieces.push(&rest[..idx]);
                rest = &rest[idx + 1..];
            }
            None => {
                let idx = window[width].0;
                pieces.push(&rest[..idx]);
                rest = &rest[idx..];
            }
        }
    }

    pieces.push(rest);
    pieces
}

fn split_into_lines(text: &str) -> Vec<&str> {
    let mut logical: Vec<&str> = text.lines().collect();
    while logical.last().is_some_and(|l| l.is_empty()) {
        logical.pop();
    }
    if logical.is_empty() {
        logical.push("");
    }

    logical
        .into_iter()
        .flat_map(|line| wrap_line(line, MAX_ROW_LENGTH))
        .collect()
}
