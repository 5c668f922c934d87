use sha2::{Digest, Sha256};

/// Windows-safe local filename for a downloaded result, preserving the
/// extension the service suggested: `{sanitized_stem}.{ext}`.
pub fn download_filename(suggested: &str, url: &str) -> String {
    assemble(suggested, url, false)
}

/// Like [`download_filename`] with `--{short_hash(url)}` inserted before the
/// extension, for batches where two results suggest the same name.
pub fn disambiguated_filename(suggested: &str, url: &str) -> String {
    assemble(suggested, url, true)
}

fn assemble(suggested: &str, url: &str, tag_with_hash: bool) -> String {
    let (stem, extension) = split_name(suggested);
    let mut stem = sanitize_component(stem);
    if stem.is_empty() {
        stem = format!("file--{}", short_hash(url));
    } else if tag_with_hash {
        stem = format!("{stem}--{}", short_hash(url));
    }
    match extension {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

fn split_name(name: &str) -> (&str, Option<String>) {
    if let Some((stem, ext)) = name.rsplit_once('.') {
        let ext: String = ext
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();
        if !stem.is_empty() && !ext.is_empty() {
            return (stem, Some(ext));
        }
    }
    (name, None)
}

fn sanitize_component(input: &str) -> String {
    let mut cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    // Collapse multiple underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }
    let mut final_name = compacted;
    if final_name.len() > 80 {
        final_name.truncate(80);
    }
    if is_reserved_windows_name(&final_name) {
        final_name.push('_');
    }
    final_name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
