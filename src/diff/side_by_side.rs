//! Expansion of a patch into two aligned columns.

use super::classify::{DiffLine, DiffLineKind};

/// Label substituted when the old-version label is empty.
pub const DEFAULT_FROM_LABEL: &str = "old";
/// Label substituted when the new-version label is empty.
pub const DEFAULT_TO_LABEL: &str = "new";

/// One cell of a side-by-side column.
///
/// Text is stored unescaped with its diff marker removed; renderers escape
/// it before wrapping it in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffCell {
    /// Line present only on the old side.
    Removed(String),
    /// Line present only on the new side.
    Added(String),
    /// Unchanged line shown on both sides.
    Context(String),
    /// Blank padding opposite a pure addition or removal.
    Empty,
}

impl DiffCell {
    /// Cell text, or `None` for padding.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Removed(text) | Self::Added(text) | Self::Context(text) => Some(text),
            Self::Empty => None,
        }
    }

    /// Returns true for padding cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Two columns that only ever grow by whole rows, so they stay the same
/// length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffColumns {
    left: Vec<DiffCell>,
    right: Vec<DiffCell>,
}

impl DiffColumns {
    /// Appends one row to both columns.
    pub fn push_row(&mut self, left: DiffCell, right: DiffCell) {
        self.left.push(left);
        self.right.push(right);
    }

    /// Old-version column.
    #[must_use]
    pub fn left(&self) -> &[DiffCell] {
        &self.left
    }

    /// New-version column.
    #[must_use]
    pub fn right(&self) -> &[DiffCell] {
        &self.right
    }

    /// Iterates `(left, right)` pairs in row order.
    pub fn rows(&self) -> impl Iterator<Item = (&DiffCell, &DiffCell)> {
        self.left.iter().zip(self.right.iter())
    }

    /// Number of rows in each column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Returns true when no rows were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// Result of expanding one patch for the side-by-side view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideBySideDiff {
    from_label: String,
    to_label: String,
    body: Option<DiffColumns>,
}

impl SideBySideDiff {
    /// Header label of the old-version column.
    #[must_use]
    pub fn from_label(&self) -> &str {
        &self.from_label
    }

    /// Header label of the new-version column.
    #[must_use]
    pub fn to_label(&self) -> &str {
        &self.to_label
    }

    /// Column pair, or `None` when there was no patch to show.
    #[must_use]
    pub const fn body(&self) -> Option<&DiffColumns> {
        self.body.as_ref()
    }
}

/// Expands `patch` into aligned old/new columns.
///
/// A missing or empty patch yields a result without a body so callers show a
/// "no diff available" placeholder. Empty labels fall back to
/// [`DEFAULT_FROM_LABEL`] and [`DEFAULT_TO_LABEL`].
///
/// # Examples
///
/// ```
/// use devlog::diff::{DiffCell, reconstruct};
///
/// let diff = reconstruct(Some("@@ -1 +1 @@\n-a\n+b"), "14.0", "15.0");
/// let body = diff.body().expect("patch has a body");
/// assert_eq!(body.left(), &[DiffCell::Removed("a".to_owned()), DiffCell::Empty]);
/// assert_eq!(body.right(), &[DiffCell::Empty, DiffCell::Added("b".to_owned())]);
/// ```
#[must_use]
pub fn reconstruct(patch: Option<&str>, from_label: &str, to_label: &str) -> SideBySideDiff {
    let body = patch.filter(|text| !text.is_empty()).map(expand_columns);

    SideBySideDiff {
        from_label: label_or_default(from_label, DEFAULT_FROM_LABEL),
        to_label: label_or_default(to_label, DEFAULT_TO_LABEL),
        body,
    }
}

fn label_or_default(label: &str, fallback: &str) -> String {
    if label.is_empty() {
        fallback.to_owned()
    } else {
        label.to_owned()
    }
}

fn expand_columns(patch: &str) -> DiffColumns {
    let mut columns = DiffColumns::default();
    for line in DiffLine::parse_patch(patch) {
        let text = line.content().to_owned();
        match line.kind() {
            DiffLineKind::Header | DiffLineKind::HunkHeader => {}
            DiffLineKind::Removed => columns.push_row(DiffCell::Removed(text), DiffCell::Empty),
            DiffLineKind::Added => columns.push_row(DiffCell::Empty, DiffCell::Added(text)),
            DiffLineKind::Context => {
                columns.push_row(DiffCell::Context(text.clone()), DiffCell::Context(text));
            }
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DiffCell, reconstruct};

    fn context(text: &str) -> DiffCell {
        DiffCell::Context(text.to_owned())
    }

    #[test]
    fn reconstructs_example_patch() {
        let diff = reconstruct(
            Some("@@ -1,2 +1,2 @@\n-old line\n+new line\n context"),
            "14.0",
            "15.0",
        );

        assert_eq!(diff.from_label(), "14.0");
        assert_eq!(diff.to_label(), "15.0");
        let body = diff.body().expect("patch should have a body");
        let rows: Vec<(&DiffCell, &DiffCell)> = body.rows().collect();
        assert_eq!(
            rows,
            vec![
                (&DiffCell::Removed("old line".to_owned()), &DiffCell::Empty),
                (&DiffCell::Empty, &DiffCell::Added("new line".to_owned())),
                (&context("context"), &context("context")),
            ]
        );
    }

    #[rstest]
    #[case::absent(None)]
    #[case::empty(Some(""))]
    fn missing_patch_has_no_body(#[case] patch: Option<&str>) {
        let diff = reconstruct(patch, "a", "b");
        assert!(diff.body().is_none());
    }

    #[test]
    fn empty_labels_fall_back_to_defaults() {
        let diff = reconstruct(Some(" x"), "", "");
        assert_eq!(diff.from_label(), "old");
        assert_eq!(diff.to_label(), "new");
    }

    #[rstest]
    #[case("--- a/f\n+++ b/f\n@@ -1 +1 @@\n-a\n-b\n+c\n d\n")]
    #[case("+only\n+added\n+lines")]
    #[case("-only\n-removed")]
    #[case("\n\n")]
    #[case("--- a\n+++ b")]
    fn columns_always_have_equal_length(#[case] patch: &str) {
        let diff = reconstruct(Some(patch), "", "");
        let body = diff.body().expect("non-empty patch should have a body");
        assert_eq!(body.left().len(), body.right().len());
    }

    #[test]
    fn structural_lines_never_reach_columns() {
        let diff = reconstruct(Some("--- a/f\n+++ b/f\n@@ -1 +1 @@\n x"), "", "");
        let body = diff.body().expect("patch should have a body");

        assert_eq!(body.len(), 1);
        assert!(
            body.left()
                .iter()
                .chain(body.right())
                .filter_map(DiffCell::text)
                .all(|text| !text.starts_with("---")
                    && !text.starts_with("+++")
                    && !text.starts_with("@@"))
        );
    }

    #[test]
    fn replacement_block_renders_as_separate_padded_runs() {
        let diff = reconstruct(Some("-a\n-b\n+c\n+d"), "", "");
        let body = diff.body().expect("patch should have a body");

        let right_blank: Vec<bool> = body.right().iter().map(DiffCell::is_empty).collect();
        let left_blank: Vec<bool> = body.left().iter().map(DiffCell::is_empty).collect();
        assert_eq!(left_blank, vec![false, false, true, true]);
        assert_eq!(right_blank, vec![true, true, false, false]);
    }
}
