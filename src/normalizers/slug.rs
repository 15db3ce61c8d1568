use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_\s-]").unwrap());
static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_]+").unwrap());
static HYPHENS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

/// URL-safe identifier for a title: lowercase ASCII letters, digits and single
/// hyphens. Distinct titles may map to the same slug.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let kept = DISALLOWED_RE.replace_all(lowered.trim(), "");
    let hyphenated = SEPARATOR_RE.replace_all(&kept, "-");
    let collapsed = HYPHENS_RE.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}
