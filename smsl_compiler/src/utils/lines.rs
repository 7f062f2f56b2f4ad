/// Comment prefix. Everything from its first occurrence to end of line is dropped.
pub const LINE_COMMENT: &str = "//";

/// A non-blank source line after comment stripping, with its 1-indexed number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Strip a trailing line comment and surrounding whitespace
pub fn sanitize_line(raw: &str) -> &str {
    let code = match raw.find(LINE_COMMENT) {
        Some(index) => &raw[..index],
        None => raw,
    };
    code.trim()
}

/// Sanitized, non-blank lines in source order. Line numbers are never renumbered.
pub fn significant_lines<S: AsRef<str>>(lines: &[S]) -> Vec<SourceLine<'_>> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let text = sanitize_line(raw.as_ref());
            (!text.is_empty()).then_some(SourceLine {
                number: index + 1,
                text,
            })
        })
        .collect()
}
