// src/core/html.rs
use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}

/// Does this opening tag carry `class` among its (space-separated) classes?
fn opener_has_class(opener_lc: &str, class: &str) -> bool {
    let Some(at) = opener_lc.find("class=") else { return false };
    let val = &opener_lc[at + "class=".len()..];
    let (quote, body) = match val.chars().next() {
        Some(q @ ('"' | '\'')) => (Some(q), &val[1..]),
        _ => (None, val),
    };
    let end = match quote {
        Some(q) => body.find(q).unwrap_or(body.len()),
        None => body.find(|c: char| c.is_ascii_whitespace() || c == '>').unwrap_or(body.len()),
    };
    body[..end].split_ascii_whitespace().any(|c| c == class)
}

/// Inner HTML of the first `<div class="…class…">`, honouring nested divs.
/// An unterminated div runs to the end of the document.
pub fn div_inner_by_class<'a>(doc: &'a str, class: &str) -> Option<&'a str> {
    let lc = to_lower(doc);
    let class = to_lower(class);
    let mut from = 0usize;

    while let Some(rel) = lc[from..].find("<div") {
        let start = from + rel;
        let open_end = lc[start..].find('>')? + start + 1;
        from = open_end;
        if !opener_has_class(&lc[start..open_end], &class) {
            continue;
        }

        let mut depth = 1usize;
        let mut pos = open_end;
        loop {
            let next_open = lc[pos..].find("<div").map(|i| pos + i);
            let next_close = lc[pos..].find("</div").map(|i| pos + i);
            match (next_open, next_close) {
                (Some(o), Some(c)) if o < c => {
                    depth += 1;
                    pos = o + 4;
                }
                (_, Some(c)) => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&doc[open_end..c]);
                    }
                    pos = c + 5;
                }
                (_, None) => return Some(&doc[open_end..]),
            }
        }
    }
    None
}

const BREAK_TAGS: &[&str] = &[
    "br", "p", "div", "li", "ul", "ol", "tr", "table", "blockquote", "hr",
    "h1", "h2", "h3", "h4", "h5", "h6", "section", "article", "header", "footer",
];
const SKIP_TAGS: &[&str] = &["script", "style"];

fn tag_name(inner_lc: &str) -> &str {
    let t = inner_lc.trim_start_matches('/');
    let end = t
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .unwrap_or(t.len());
    &t[..end]
}

/// Render an HTML fragment as visible text lines.
/// Block-level tags and `<br>` break lines; inline tags vanish; script/style bodies are dropped.
/// Lines are returned untrimmed, blank lines included.
pub fn render_lines(fragment: &str) -> Vec<String> {
    let lc = to_lower(fragment);
    let mut text = String::with_capacity(fragment.len());
    let mut i = 0usize;

    while i < fragment.len() {
        let rest = &fragment[i..];
        let Some(lt) = rest.find('<') else {
            text.push_str(rest);
            break;
        };
        text.push_str(&rest[..lt]);
        let tag_start = i + lt;
        let Some(gt) = fragment[tag_start..].find('>') else {
            // dangling '<' is text
            text.push_str(&fragment[tag_start..]);
            break;
        };
        let tag_end = tag_start + gt + 1;
        let inner = &lc[tag_start + 1..tag_end - 1];
        let name = tag_name(inner);

        if !inner.starts_with('/') && SKIP_TAGS.contains(&name) {
            let close = format!("</{name}");
            i = match lc[tag_end..].find(&close) {
                Some(c) => {
                    let close_at = tag_end + c;
                    lc[close_at..].find('>').map(|g| close_at + g + 1).unwrap_or(fragment.len())
                }
                None => fragment.len(),
            };
            continue;
        }
        if BREAK_TAGS.contains(&name) {
            text.push('\n');
        }
        i = tag_end;
    }

    normalize_entities(&text)
        .split('\n')
        .map(|l| l.trim_end_matches('\r').to_string())
        .collect()
}
