//! Classification of individual unified-diff lines.

/// The role a single line plays inside a unified diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffLineKind {
    /// An old/new file header (`---` or `+++`).
    Header,
    /// A hunk range marker (`@@ ... @@`).
    HunkHeader,
    /// A line present only in the new version.
    Added,
    /// A line present only in the old version.
    Removed,
    /// An unchanged line, or anything else.
    Context,
}

impl DiffLineKind {
    /// Returns true for lines the side-by-side view skips.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::Header | Self::HunkHeader)
    }
}

/// Classifies one line of unified-diff text.
///
/// Classification is total: every string, including the empty string, maps
/// to a kind. The hunk marker wins over everything, and the triple file
/// markers win over single add/remove markers.
///
/// # Examples
///
/// ```
/// use devlog::diff::{DiffLineKind, classify_line};
///
/// assert_eq!(classify_line("+++ b/file.py"), DiffLineKind::Header);
/// assert_eq!(classify_line("+new"), DiffLineKind::Added);
/// assert_eq!(classify_line(""), DiffLineKind::Context);
/// ```
#[must_use]
pub fn classify_line(line: &str) -> DiffLineKind {
    if line.starts_with("@@") {
        DiffLineKind::HunkHeader
    } else if line.starts_with('-') && !line.starts_with("---") {
        DiffLineKind::Removed
    } else if line.starts_with('+') && !line.starts_with("+++") {
        DiffLineKind::Added
    } else if line.starts_with("---") || line.starts_with("+++") {
        DiffLineKind::Header
    } else {
        DiffLineKind::Context
    }
}

/// One line of a patch together with its derived kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffLine<'a> {
    text: &'a str,
    kind: DiffLineKind,
}

impl<'a> DiffLine<'a> {
    /// Classifies `text` and wraps it.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            kind: classify_line(text),
        }
    }

    /// Raw line text, marker included.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Derived line kind.
    #[must_use]
    pub const fn kind(&self) -> DiffLineKind {
        self.kind
    }

    /// Line text with its one-character diff marker removed.
    ///
    /// Structural lines are returned untouched. Context lines lose a leading
    /// space when present.
    #[must_use]
    pub fn content(&self) -> &'a str {
        let marker = match self.kind {
            DiffLineKind::Added => '+',
            DiffLineKind::Removed => '-',
            DiffLineKind::Context => ' ',
            DiffLineKind::Header | DiffLineKind::HunkHeader => return self.text,
        };
        self.text.strip_prefix(marker).unwrap_or(self.text)
    }

    /// Splits a patch into classified lines.
    pub fn parse_patch(patch: &'a str) -> impl Iterator<Item = Self> + 'a {
        patch.lines().map(Self::new)
    }
}
