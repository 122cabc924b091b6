use super::ast::{Predicate, TextMatchMode, TextMatcher};
use super::candidate::TraversalCandidate;
use super::error::EvaluationError;
use crate::name::FileType;

pub(crate) fn evaluate_predicate(
    predicate: &Predicate,
    candidate: &TraversalCandidate<'_>,
) -> Result<bool, EvaluationError> {
    match predicate {
        Predicate::Accept(answer) => Ok(*answer),
        Predicate::Empty(want) => Ok(candidate.is_empty()? == *want),
        Predicate::Size(range) => {
            if candidate.file_type() != FileType::File {
                return Ok(false);
            }
            Ok(range.contains(candidate.size()?))
        }
        Predicate::Age {
            cutoff,
            accept_older,
        } => {
            let older = candidate.last_modified()? <= *cutoff;
            Ok(older == *accept_older)
        }
        Predicate::Hidden(want) => Ok(candidate.is_hidden()? == *want),
        Predicate::Readable(want) => Ok(candidate.is_readable()? == *want),
        Predicate::Writable(want) => Ok(candidate.is_writable()? == *want),
        Predicate::Type(file_type) => Ok(candidate.file_type() == *file_type),
        Predicate::Depth { min, max } => Ok((*min..=*max).contains(&candidate.depth())),
        Predicate::Name(matcher) => Ok(match_text(candidate.name().base_name(), matcher)),
        Predicate::Regex(pattern) => Ok(pattern.is_match(candidate.name().base_name())),
    }
}

pub(crate) fn match_text(value: &str, matcher: &TextMatcher) -> bool {
    if matcher.case_sensitive {
        return match_mode(value, &matcher.raw, matcher.mode);
    }
    match_mode(&value.to_lowercase(), &matcher.raw.to_lowercase(), matcher.mode)
}

fn match_mode(value: &str, needle: &str, mode: TextMatchMode) -> bool {
    match mode {
        TextMatchMode::Exact => value == needle,
        TextMatchMode::Prefix => value.starts_with(needle),
        TextMatchMode::Suffix => value.ends_with(needle),
        TextMatchMode::Contains => value.contains(needle),
        TextMatchMode::Wildcard => wildcard_match(value, needle),
    }
}

fn wildcard_match(value: &str, pattern: &str) -> bool {
    let s: Vec<char> = value.chars().collect();
    let p: Vec<char> = pattern.chars().collect();
    let (mut si, mut pi) = (0usize, 0usize);
    let mut backtrack: Option<(usize, usize)> = None;

    while si < s.len() {
        match p.get(pi) {
            Some('*') => {
                backtrack = Some((pi, si));
                pi += 1;
            }
            Some(&c) if c == '?' || c == s[si] => {
                si += 1;
                pi += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    pi = star + 1;
                    si = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    p[pi..].iter().all(|c| *c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(raw: &str, mode: TextMatchMode) -> TextMatcher {
        TextMatcher::new(raw, mode)
    }

    #[test]
    fn wildcard_handles_stars_and_single_chars() {
        assert!(wildcard_match("main.rs", "*.rs"));
        assert!(wildcard_match("main.rs", "m??n.*"));
        assert!(wildcard_match("abcabd", "*abd"));
        assert!(wildcard_match("", "*"));
        assert!(!wildcard_match("main.rs", "*.txt"));
        assert!(!wildcard_match("ab", "a?b"));
    }

    #[test]
    fn text_modes_are_case_insensitive_by_default() {
        assert!(match_text("Report.PDF", &matcher("report", TextMatchMode::Prefix)));
        assert!(match_text("Report.PDF", &matcher(".pdf", TextMatchMode::Suffix)));
        assert!(match_text("Report.PDF", &matcher("PORT", TextMatchMode::Contains)));
        assert!(match_text("Report.PDF", &matcher("report.pdf", TextMatchMode::Exact)));
        assert!(match_text("Report.PDF", &matcher("r*.p?f", TextMatchMode::Wildcard)));
    }

    #[test]
    fn case_sensitive_matching_respects_case() {
        let exact = matcher("Makefile", TextMatchMode::Exact).case_sensitive(true);
        assert!(match_text("Makefile", &exact));
        assert!(!match_text("makefile", &exact));
    }
}
