//! Text clean-up for upstream fragments (search highlights, post bodies).

const BASIC_ENTITIES: [(&str, char); 5] = [
    ("&quot;", '"'),
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&#39;", '\''),
];

/// Remove every `<...>` tag; an unclosed `<` is kept as text
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('<') {
        match rest[start..].find('>') {
            Some(end) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + end + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Decode the five basic entities in a single left-to-right pass
pub fn unescape_basic_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match BASIC_ENTITIES.iter().find(|(name, _)| tail.starts_with(name)) {
            Some((name, ch)) => {
                out.push(*ch);
                rest = &tail[name.len()..];
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

/// Tags first, then entities, so an escaped `&lt;b&gt;` survives as text
pub fn clean_fragment(input: &str) -> String {
    unescape_basic_entities(&strip_html(input)).trim().to_string()
}

/// Cleaned text, or `placeholder` when nothing is left
pub fn clean_or(input: Option<&str>, placeholder: &str) -> String {
    input
        .map(clean_fragment)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

pub fn truncate_chars(input: &str, limit: usize) -> String {
    if input.chars().count() <= limit {
        return input.to_string();
    }
    let head: String = input.chars().take(limit).collect();
    format!("{}...", head)
}

/// Split a summary into bullet lines on newlines and list markers
pub fn to_bullets(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let is_break = match c {
            '\n' | '•' | '▪' | '●' | '▲' => true,
            '-' => chars.peek().is_some_and(|next| next.is_whitespace()),
            _ => false,
        };
        if is_break {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// First `count` non-empty lines
pub fn leading_lines(text: &str, count: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(count)
        .map(str::to_string)
        .collect()
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_clean_search_highlight() {
        assert_eq!(clean_fragment("<b>해미읍성</b> &amp; 맛집"), "해미읍성 & 맛집");
    }

    #[test]
    fn test_all_entities() {
        assert_eq!(
            unescape_basic_entities("&quot;a&quot; &lt;b&gt; &#39;c&#39;"),
            "\"a\" <b> 'c'"
        );
    }

    #[test]
    fn test_no_double_decoding() {
        assert_eq!(unescape_basic_entities("&amp;lt;"), "&lt;");
        assert_eq!(unescape_basic_entities("a & b &nbsp;"), "a & b &nbsp;");
    }

    #[test]
    fn test_escaped_tag_kept_as_text() {
        assert_eq!(clean_fragment("&lt;b&gt;굵게"), "<b>굵게");
    }

    #[test]
    fn test_unclosed_tag() {
        assert_eq!(strip_html("3 < 5 <i>ok</i>"), "3 ok");
        assert_eq!(strip_html("a < b"), "a < b");
    }

    #[test]
    fn test_clean_or_placeholder() {
        assert_eq!(clean_or(Some("<br/>"), "제목 없음"), "제목 없음");
        assert_eq!(clean_or(None, "내용 없음"), "내용 없음");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("가나다라", 2), "가나...");
        assert_eq!(truncate_chars("가나", 2), "가나");
    }

    #[test]
    fn test_to_bullets() {
        let bullets = to_bullets("• 첫째 항목\n\n▪ 둘째 - 셋째\nCOVID-19 안내");
        assert_eq!(bullets, vec!["첫째 항목", "둘째", "셋째", "COVID-19 안내"]);
    }

    #[test]
    fn test_leading_lines() {
        let lines = leading_lines("a\n\n b \nc\nd\ne\nf", 5);
        assert_eq!(lines, vec!["a", "b", "c", "d", "e"]);
    }
}
