// src/process/keys.rs

/// Already in the shape `to_camel_case` produces: `[a-z0-9]` first, ASCII
/// alphanumerics after, with at most one other character at the very end.
fn is_canonical(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if !(first.is_ascii_lowercase() || first.is_ascii_digit()) {
        return false;
    }
    let rest: Vec<char> = chars.collect();
    match rest.split_last() {
        Some((_, body)) => body.iter().all(|c| c.is_ascii_alphanumeric()),
        None => true,
    }
}

/// Turn a sheet header into a camelCase record key.
///
/// Lower-cases the header, folds each run of non-alphanumerics into an
/// upper-cased following character and lower-cases the first character.
/// Keys that are already camelCase come back unchanged. An empty result
/// means the column is skipped.
pub fn to_camel_case(header: &str) -> String {
    if header.is_empty() {
        return String::new();
    }
    if is_canonical(header) {
        return header.to_string();
    }

    let lower: Vec<char> = header.to_lowercase().chars().collect();
    let mut out = String::with_capacity(lower.len());
    let mut i = 0;

    while i < lower.len() {
        let ch = lower[i];
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            i += 1;
            continue;
        }

        let mut j = i;
        while j < lower.len() && !lower[j].is_ascii_alphanumeric() {
            j += 1;
        }

        if j < lower.len() {
            out.extend(lower[j].to_uppercase());
            i = j + 1;
        } else if j - i == 1 {
            // a lone trailing separator has nothing to fold into
            out.push(ch);
            i = j;
        } else {
            // first char only, so e.g. 'ŉ' cannot grow into a foldable "ʼN"
            out.extend(lower[j - 1].to_uppercase().next());
            i = j;
        }
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
