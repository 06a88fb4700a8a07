use crate::domain::AudioFormat;

/// Truncate a response body for inline diagnostics.
pub fn body_excerpt(body: &str, max_chars: usize) -> String {
    let mut excerpt: String = body.chars().take(max_chars).collect();
    if excerpt.len() < body.len() {
        excerpt.push('…');
    }
    excerpt
}

/// Uppercased format label for a queue item, inferred from the filename
/// extension with the form's format choice as fallback.
pub fn format_label(filename: &str, fallback: AudioFormat) -> String {
    filename
        .rsplit('.')
        .next()
        .filter(|ext| !ext.is_empty() && *ext != filename)
        .unwrap_or(fallback.as_str())
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_excerpt() {
        assert_eq!(body_excerpt("short", 100), "short");
        let long = "x".repeat(250);
        let excerpt = body_excerpt(&long, 100);
        assert_eq!(excerpt.chars().count(), 101);
        assert!(excerpt.ends_with('…'));
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label("song - abc123.opus", AudioFormat::Mp3), "OPUS");
        assert_eq!(format_label("no_extension", AudioFormat::M4a), "M4A");
        assert_eq!(format_label("", AudioFormat::Mp3), "MP3");
    }
}
