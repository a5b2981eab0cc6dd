// src/core/sanitize.rs

/// Decode the handful of entities that show up in episode pages.
/// Unknown entities are left as-is.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let semi = tail.find(';').filter(|&i| i <= 10);
        match semi.and_then(|i| decode_entity(&tail[1..i]).map(|ch| (i, ch))) {
            Some((i, ch)) => {
                out.push(ch);
                rest = &tail[i + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "ndash" => Some('–'),
        "mdash" => Some('—'),
        "rsquo" | "lsquo" => Some('\''),
        "rdquo" | "ldquo" => Some('"'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            // NBSP as a real space; everything downstream splits on ASCII space
            if code == 0xA0 { Some(' ') } else { char::from_u32(code) }
        }
    }
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Arrow / greater-than / equals glyphs used as scoreboard separators.
fn is_separator_glyph(ch: char) -> bool {
    matches!(ch, '\u{a0}' | '►' | '▶' | '→' | '➜' | '>' | '=')
}

/// Replace separator glyphs with spaces, then collapse whitespace.
pub fn normalize_glyphs(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|ch| if is_separator_glyph(ch) { ' ' } else { ch })
        .collect();
    normalize_ws(&replaced)
}

/// Trim punctuation a transcriber hangs off a name ("Pat," → "Pat").
pub fn trim_name_punct(tok: &str) -> &str {
    tok.trim_end_matches([',', '.', ':', ';'])
}
