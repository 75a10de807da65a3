//! Commit-type code extraction from `[CODE] message` prefixes.

use crate::api::models::CommitType;

/// Returns the bracketed code at the start of `message`.
///
/// The code must be one or more ASCII uppercase letters or digits.
///
/// ```
/// use devlog::diff::commit_type_code;
///
/// assert_eq!(commit_type_code("[FIX] account: rounding"), Some("FIX"));
/// assert_eq!(commit_type_code("[I18N] fr.po"), Some("I18N"));
/// assert_eq!(commit_type_code("[fix] lower"), None);
/// ```
#[must_use]
pub fn commit_type_code(message: &str) -> Option<&str> {
    split_commit_type(message).map(|(code, _)| code)
}

/// Splits `message` into its bracketed code and the text after it.
///
/// Leading whitespace after the closing bracket is dropped.
///
/// ```
/// use devlog::diff::split_commit_type;
///
/// assert_eq!(split_commit_type("[FIX] account: rounding"), Some(("FIX", "account: rounding")));
/// assert_eq!(split_commit_type("no prefix"), None);
/// ```
#[must_use]
pub fn split_commit_type(message: &str) -> Option<(&str, &str)> {
    let (code, rest) = message.strip_prefix('[')?.split_once(']')?;
    let well_formed = !code.is_empty()
        && code
            .chars()
            .all(|character| character.is_ascii_uppercase() || character.is_ascii_digit());
    well_formed.then(|| (code, rest.trim_start()))
}

/// Looks up the commit type named by the message prefix.
#[must_use]
pub fn find_commit_type<'a>(message: &str, taxonomy: &'a [CommitType]) -> Option<&'a CommitType> {
    let code = commit_type_code(message)?;
    taxonomy.iter().find(|commit_type| commit_type.code == code)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{commit_type_code, find_commit_type, split_commit_type};
    use crate::api::models::CommitType;

    #[rstest]
    #[case::fix("[FIX] sale: totals", Some("FIX"))]
    #[case::digits("[I18N] translations", Some("I18N"))]
    #[case::empty_code("[] nothing", None)]
    #[case::lowercase("[Fix] mixed", None)]
    #[case::unterminated("[FIX missing bracket", None)]
    #[case::not_at_start("sale: [FIX] late", None)]
    #[case::space_inside("[FI X] gap", None)]
    fn extracts_code(#[case] message: &str, #[case] expected: Option<&str>) {
        assert_eq!(commit_type_code(message), expected);
    }

    #[rstest]
    #[case::with_text("[IMP] stock: faster", Some(("IMP", "stock: faster")))]
    #[case::code_only("[MERGE]", Some(("MERGE", "")))]
    #[case::malformed("[imp] stock", None)]
    fn splits_code_from_text(#[case] message: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(split_commit_type(message), expected);
    }

    #[test]
    fn finds_matching_taxonomy_entry() {
        let taxonomy = vec![
            CommitType {
                code: "FIX".to_owned(),
                label: "Bug fix".to_owned(),
                color: "#ef4444".to_owned(),
            },
            CommitType {
                code: "IMP".to_owned(),
                label: "Improvement".to_owned(),
                color: "#3b82f6".to_owned(),
            },
        ];

        let found = find_commit_type("[IMP] stock: faster", &taxonomy).map(|t| t.label.as_str());
        assert_eq!(found, Some("Improvement"));
        assert!(find_commit_type("[REF] other", &taxonomy).is_none());
    }
}
