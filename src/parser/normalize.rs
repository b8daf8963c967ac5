use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// One step of the inline-markup rewrite cascade.
pub struct Rule {
    pub name: &'static str,
    re: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Rule {
            name,
            re: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    pub fn apply<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.re.replace_all(line, self.replacement)
    }
}

/// Rewrite rules in application order. Each rule sees the output of the previous one.
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // links
        Rule::new("piped_link", r"\[\[[^\]|]+\|([^\]|]+)\]\]", "${1}"),
        Rule::new("anchored_link", r"\[\[([^\]|]+)#[^\]]+\]\]", "${1}"),
        Rule::new("bare_link", r"\[\[([^\]|]+)\]\]", "${1}"),
        Rule::new("footnote", r"\[\*[^\]]+\]", ""),
        Rule::new("anchor", r"\[anchor[^\]]+\]", ""),
        // {{{#f00 빨강}}} keeps only the marker character
        Rule::new("color_size", r"\{\{\{([#+])[a-f0-9]{3,6} [^}]+\}\}\}", "${1}"),
        // text styles
        Rule::new("bold", r"'''([^']+)'''", "${1}"),
        Rule::new("italic", r"''([^']+)''", "${1}"),
        Rule::new("italic_underscore", r"___([^_]+)___", "${1}"),
        Rule::new("paren_strike_dash", r"\(--[^-]+--\)", ""),
        Rule::new("paren_strike_tilde", r"\(~~[^~]+~~\)", ""),
        Rule::new("strike_tilde", r"~~[^~]+~~", ""),
        Rule::new("strike_dash", r"--[^-]+--", ""),
        Rule::new("superscript", r"\^\^[^\^]+\^\^", ""),
        Rule::new("subscript", r",,[^,]+,,", ""),
        Rule::new("literal", r"\{\{\{([^}]+)\}\}\}", "${1}"),
        Rule::new("escape", r"\\([\\_-])", "${1}"),
        // heuristics
        Rule::new("trailing_link_hash", r"다\. ?#$", "다."),
        Rule::new("inline_link_hash", r"다\.# ", "다. "),
        Rule::new("ellipsis", r"\(\.\.\.\)", " "),
        Rule::new("whitespace", r"\s+", " "),
    ]
});

/// Strip inline markup from a plain line. Returns an empty string when nothing is left.
pub fn normalize(line: &str) -> String {
    let mut out = line.to_string();
    for rule in RULES.iter() {
        if let Cow::Owned(rewritten) = rule.apply(&out) {
            out = rewritten;
        }
    }

    let out = out.trim();
    // list items become plain lines
    out.strip_prefix("* ").unwrap_or(out).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static Rule {
        RULES.iter().find(|r| r.name == name).unwrap()
    }

    fn assert_stable(line: &str) {
        let once = normalize(line);
        assert_eq!(normalize(&once), once, "normalize not idempotent for {line:?}");
    }

    #[test]
    fn bold_round_trip() {
        assert_eq!(normalize("'''굵게''' 텍스트"), "굵게 텍스트");
    }

    #[test]
    fn piped_link() {
        assert_eq!(normalize("[[서울|서울특별시]]는 크다."), "서울특별시는 크다.");
    }

    #[test]
    fn anchored_link() {
        assert_eq!(rule("anchored_link").apply("[[서울#역사]] 참고"), "서울 참고");
        assert_eq!(normalize("[[서울#역사]] 참고"), "서울 참고");
    }

    #[test]
    fn bare_link() {
        assert_eq!(normalize("[[대한민국]]의 수도"), "대한민국의 수도");
    }

    #[test]
    fn piped_link_wins_over_anchor() {
        assert_eq!(normalize("[[서울#역사|서울의 역사]]를 보라."), "서울의 역사를 보라.");
    }

    #[test]
    fn footnote_and_anchor() {
        assert_eq!(normalize("인구가 많다.[* 2020년 기준]"), "인구가 많다.");
        assert_eq!(normalize("[anchor(top)]본문"), "본문");
    }

    #[test]
    fn color_span_keeps_marker() {
        assert_eq!(normalize("{{{#ff0000 빨간}}} 글씨"), "# 글씨");
        assert_eq!(normalize("{{{+abc 큰}}} 글씨"), "+ 글씨");
    }

    #[test]
    fn short_size_span_falls_through_to_literal() {
        assert_eq!(normalize("{{{+1 큰 글씨}}}다"), "+1 큰 글씨다");
    }

    #[test]
    fn italic() {
        assert_eq!(normalize("''기울임''과 ___밑줄___"), "기울임과 밑줄");
    }

    #[test]
    fn strikethrough_removed() {
        assert_eq!(normalize("값은 ~~10~~ 20이다."), "값은 20이다.");
        assert_eq!(normalize("값은 --10-- 20이다."), "값은 20이다.");
        assert_eq!(normalize("맛있다(~~사실 별로~~)."), "맛있다.");
        assert_eq!(normalize("맛있다(--사실 별로--)."), "맛있다.");
    }

    #[test]
    fn super_and_subscript_removed() {
        assert_eq!(normalize("E=mc^^2^^ 이다"), "E=mc 이다");
        assert_eq!(normalize("H,,2,,O 분자"), "HO 분자");
    }

    #[test]
    fn literal_unwrapped() {
        assert_eq!(normalize("{{{리터럴}}} 텍스트"), "리터럴 텍스트");
        assert_eq!(normalize("{{{[[서울]]}}}"), "서울");
    }

    #[test]
    fn escapes() {
        assert_eq!(rule("escape").apply(r"a\_b\-c\\d"), r"a_b-c\d");
    }

    #[test]
    fn link_hash_heuristics() {
        assert_eq!(normalize("서울은 크다. #"), "서울은 크다.");
        assert_eq!(normalize("서울은 크다.#"), "서울은 크다.");
        assert_eq!(normalize("서울은 크다.# 부산도 크다."), "서울은 크다. 부산도 크다.");
    }

    #[test]
    fn decorative_ellipsis_and_whitespace() {
        assert_eq!(normalize("그리고 (...)   끝\t났다"), "그리고 끝 났다");
    }

    #[test]
    fn list_marker_stripped() {
        assert_eq!(normalize("* [[서울]]"), "서울");
        assert_eq!(normalize("*   항목"), "항목");
    }

    #[test]
    fn only_one_list_marker_stripped() {
        assert_eq!(normalize("* * 중첩 항목"), "* 중첩 항목");
    }

    #[test]
    fn markup_only_line_is_empty() {
        assert_eq!(normalize("[* 각주만 있는 줄]"), "");
        assert_eq!(normalize("~~전부 취소~~"), "");
    }

    #[test]
    fn idempotent_per_rule() {
        for line in [
            "'''굵게''' 텍스트",
            "[[서울|서울특별시]]는 크다.",
            "[[서울#역사]] 참고",
            "[[대한민국]]의 수도",
            "인구가 많다.[* 2020년 기준]",
            "[anchor(top)]본문",
            "{{{#ff0000 빨간}}} 글씨",
            "''기울임''과 ___밑줄___",
            "맛있다(~~사실 별로~~).",
            "값은 ~~10~~ 20이다.",
            "E=mc^^2^^ 이다",
            "{{{리터럴}}} 텍스트",
            r"a\_b\-c",
            "서울은 크다.# 부산도 크다.",
            "그리고 (...)   끝",
        ] {
            assert_stable(line);
        }
    }

    #[test]
    fn rule_order_is_fixed() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names.first(), Some(&"piped_link"));
        assert_eq!(names.last(), Some(&"whitespace"));
        let literal = names.iter().position(|n| *n == "literal").unwrap();
        let color = names.iter().position(|n| *n == "color_size").unwrap();
        assert!(color < literal);
    }
}
