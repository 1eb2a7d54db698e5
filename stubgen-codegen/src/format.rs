//! Post-render formatting
//!
//! The emitter's output is valid Go, but it is not gofmt's business to be
//! embedded here: formatting and import normalization are a separate,
//! injectable collaborator so the emitter can be tested as plain text. The
//! default implementation normalizes the import block (sort, dedupe, prune
//! unused) and whitespace; a failed format is fatal to the run, with the
//! unformatted text preserved for diagnosis.

/// A post-render formatting collaborator.
pub trait SourceFormatter {
    /// Format `source` (named `file_name` for messages). Returns the final
    /// text, or a message describing why the source could not be formatted.
    fn format(&self, file_name: &str, source: &str) -> Result<String, String>;
}

/// The default formatter: import-block normalization plus whitespace
/// cleanup, with a structural sanity check standing in for a real parse.
#[derive(Debug, Default)]
pub struct ImportNormalizer;

/// A formatter that returns its input untouched.
#[derive(Debug, Default)]
pub struct Passthrough;

impl SourceFormatter for Passthrough {
    fn format(&self, _file_name: &str, source: &str) -> Result<String, String> {
        Ok(source.to_string())
    }
}

impl SourceFormatter for ImportNormalizer {
    fn format(&self, file_name: &str, source: &str) -> Result<String, String> {
        check_balance(file_name, source)?;
        let source = normalize_imports(source);
        Ok(tidy_whitespace(&source))
    }
}

/// Verify that brackets balance outside strings and comments. A mismatch
/// means the emitter produced structurally broken source, which must fail
/// the run rather than be written out.
fn check_balance(file_name: &str, source: &str) -> Result<(), String> {
    let mut depth: i64 = 0;
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth -= 1;
                if depth < 0 {
                    return Err(format!("{}: unbalanced brackets", file_name));
                }
            }
            '"' => {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    match next {
                        '\\' => {
                            chars.next();
                        }
                        '"' | '\n' => break,
                        _ => {}
                    }
                }
            }
            '`' => {
                for next in chars.by_ref() {
                    if next == '`' {
                        break;
                    }
                }
            }
            '/' => {
                if chars.peek() == Some(&'/') {
                    for next in chars.by_ref() {
                        if next == '\n' {
                            break;
                        }
                    }
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(format!("{}: unbalanced brackets", file_name));
    }
    Ok(())
}

/// Sort, dedupe, and prune the `import ( ... )` block. An import whose
/// identifier never qualifies a name in the rest of the file is dropped;
/// an emptied block disappears entirely.
fn normalize_imports(source: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let Some(open) = lines.iter().position(|l| l.trim() == "import (") else {
        return source.to_string();
    };
    let Some(close_rel) = lines[open..].iter().position(|l| l.trim() == ")") else {
        return source.to_string();
    };
    let close = open + close_rel;

    let mut entries: Vec<(String, String)> = Vec::new();
    for line in &lines[open + 1..close] {
        if let Some(entry) = parse_import_line(line) {
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
    }

    let body: String = lines[close + 1..].join("\n");
    entries.retain(|(ident, _)| is_qualifier_used(&body, ident));
    entries.sort_by(|a, b| a.1.cmp(&b.1));

    let mut out: Vec<String> = lines[..open].iter().map(|l| l.to_string()).collect();
    if !entries.is_empty() {
        out.push("import (".to_string());
        for (ident, path) in &entries {
            if ident == stubgen_resolver::default_import_name(path) {
                out.push(format!("\t\"{}\"", path));
            } else {
                out.push(format!("\t{} \"{}\"", ident, path));
            }
        }
        out.push(")".to_string());
    } else if out.last().is_some_and(|l| l.is_empty()) {
        // Drop the blank line that introduced the block.
        out.pop();
    }
    for line in &lines[close + 1..] {
        out.push(line.to_string());
    }
    out.join("\n")
}

fn parse_import_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (ident_part, quoted) = match line.split_once(' ') {
        Some((ident, rest)) if !ident.starts_with('"') => (Some(ident), rest.trim()),
        _ => (None, line),
    };
    let path = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let ident = match ident_part {
        Some(ident) => ident.to_string(),
        None => stubgen_resolver::default_import_name(path).to_string(),
    };
    Some((ident, path.to_string()))
}

/// Does `ident.` appear in the body as a qualifier (not as a suffix of a
/// longer identifier)?
fn is_qualifier_used(body: &str, ident: &str) -> bool {
    let needle = format!("{}.", ident);
    let mut from = 0;
    while let Some(at) = body[from..].find(&needle) {
        let at = from + at;
        let preceded_by_ident_char = body[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        if !preceded_by_ident_char {
            return true;
        }
        from = at + needle.len();
    }
    false
}

/// Trim trailing whitespace, collapse repeated blank lines, and end with
/// exactly one newline.
fn tidy_whitespace(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut previous_blank = false;
    for line in source.lines() {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            if previous_blank {
                continue;
            }
            previous_blank = true;
        } else {
            previous_blank = false;
        }
        out.push_str(trimmed);
        out.push('\n');
    }
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}
