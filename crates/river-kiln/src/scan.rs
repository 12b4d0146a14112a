//! Wikilink scanning
//!
//! Finds `[[target]]`, `[[target|alias]]`, `[[target#heading]]` and embeds
//! `![[target]]`. Only the target part is kept (alias dropped, subpath kept),
//! ready for [`crate::resolve_link`].

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static WIKILINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[\[([^\]]+)\]\]").expect("wikilink regex"));

static CODE_BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^```[\s\S]*?^```|^    .*$|`[^`]+`").expect("code block regex")
});

/// Link targets anywhere in `text`
pub fn wikilinks(text: &str) -> Vec<String> {
    collect(text, &[])
}

/// Link targets in markdown body text, skipping fenced, indented and inline code
pub fn body_wikilinks(body: &str) -> Vec<String> {
    if !body.contains("[[") {
        return Vec::new();
    }
    let code: Vec<Range<usize>> = CODE_BLOCK_REGEX.find_iter(body).map(|m| m.range()).collect();
    collect(body, &code)
}

fn collect(text: &str, code: &[Range<usize>]) -> Vec<String> {
    WIKILINK_REGEX
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            if code.iter().any(|range| range.contains(&whole.start())) {
                return None;
            }
            let inner = cap.get(2)?.as_str();
            let target = inner.split('|').next().unwrap_or(inner).trim();
            (!target.is_empty()).then(|| target.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wikilink_forms() {
        let links = wikilinks("[[a]] [[b|Bee]] [[c#Heading]] ![[d.png]] [[e#^block|x]]");
        assert_eq!(links, vec!["a", "b", "c#Heading", "d.png", "e#^block"]);
    }

    #[test]
    fn test_body_skips_code() {
        let body = "see [[real]]\n\n```\n[[fenced]]\n```\n\n    [[indented]]\n\nand `[[inline]]` too\n";
        assert_eq!(body_wikilinks(body), vec!["real"]);
    }

    #[test]
    fn test_frontmatter_text_keeps_indented_values() {
        let yaml = "related:\n    - \"[[nested]]\"\n";
        assert_eq!(wikilinks(yaml), vec!["nested"]);
    }

    #[test]
    fn test_no_links() {
        assert!(body_wikilinks("plain text").is_empty());
        assert!(wikilinks("[[ ]]").is_empty());
    }
}
