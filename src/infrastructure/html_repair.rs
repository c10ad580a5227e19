//! Mechanical repairs for known-broken Lotus-Notes markup.
//!
//! These are literal substitutions for defects the legacy document system
//! emits on every affected page, applied unconditionally before structural
//! parsing. They are not heuristics.

use once_cell::sync::Lazy;
use regex::Regex;

// The renderer drops the '>' from closing script tags, which swallows the
// rest of the document during parsing.
static UNTERMINATED_SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</script([^>])").expect("static pattern"));

// Attribute runs where a quote style switches mid-tag and a stray comma
// separates the attributes, e.g. `width='50%', align="center"`.
static WIDTH_ALIGN_MIXED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"width='([^']*)',\s*align="([^"]*)""#).expect("static pattern"));
static WIDTH_ALIGN_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"width="([^"]*)",\s*align="([^"]*)""#).expect("static pattern"));
static BORDER_CELLPADDING_MIXED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"border='([^']*)',\s*cellpadding="([^"]*)""#).expect("static pattern")
});

/// Restore the missing `>` on unterminated `</script` tags.
pub fn fix_unterminated_script(html: &str) -> String {
    UNTERMINATED_SCRIPT.replace_all(html, "</script>$1").into_owned()
}

/// Normalize the mixed-quote, comma-separated attribute runs found in the
/// earliest portal's table headers.
pub fn fix_attribute_quote_runs(html: &str) -> String {
    let html = WIDTH_ALIGN_MIXED.replace_all(html, r#"width="$1" align="$2""#);
    let html = WIDTH_ALIGN_COMMA.replace_all(&html, r#"width="$1" align="$2""#);
    BORDER_CELLPADDING_MIXED
        .replace_all(&html, r#"border="$1" cellpadding="$2""#)
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_script_close() {
        let html = "<script>var x = 1;</script<table><tr><td>dato</td></tr></table>";
        let fixed = fix_unterminated_script(html);
        assert!(fixed.contains("</script><table>"));
    }

    #[test]
    fn leaves_wellformed_script_alone() {
        let html = "<script>var x = 1;</script><p>ok</p>";
        assert_eq!(fix_unterminated_script(html), html);
    }

    #[test]
    fn normalizes_mixed_quote_attributes() {
        let html = r#"<td width='50%', align="center">x</td>"#;
        let fixed = fix_attribute_quote_runs(html);
        assert_eq!(fixed, r#"<td width="50%" align="center">x</td>"#);
    }

    #[test]
    fn normalizes_border_cellpadding_run() {
        let html = r#"<table border='1', cellpadding="2">"#;
        let fixed = fix_attribute_quote_runs(html);
        assert_eq!(fixed, r#"<table border="1" cellpadding="2">"#);
    }
}
