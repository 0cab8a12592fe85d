//! Rich-text runs and the markup canonicaliser.
//!
//! The comment editor reports what the author typed as an ordered sequence of
//! [`StyleRun`]s: contiguous spans of text that each carry one exact set of
//! active formatting toggles. Rendering collapses that sequence into a single
//! minimal markup string. Because nesting always follows
//! [`Style::PRECEDENCE`], two toggle-click orders that produce the same
//! per-run style sets serialise byte-identically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inline formatting toggles supported by the comment editor.
///
/// The universe is closed; any other style name is a caller error surfaced as
/// [`RichTextError::UnknownStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Bold,
    Italic,
    Strike,
    Underline,
}

impl Style {
    /// Canonical nesting order, outermost first.
    ///
    /// Open tags on the render stack are always a prefix of this array, which
    /// is what makes output independent of the order toggles were clicked.
    pub const PRECEDENCE: [Self; 4] = [Self::Bold, Self::Italic, Self::Strike, Self::Underline];

    /// Markup tag emitted for this style.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Bold => "strong",
            Self::Italic => "em",
            Self::Strike => "s",
            Self::Underline => "u",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Bold => 0b0001,
            Self::Italic => 0b0010,
            Self::Strike => 0b0100,
            Self::Underline => 0b1000,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Strike => "strike",
            Self::Underline => "underline",
        };
        f.write_str(name)
    }
}

impl FromStr for Style {
    type Err = RichTextError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            "strike" => Ok(Self::Strike),
            "underline" => Ok(Self::Underline),
            other => Err(RichTextError::UnknownStyle {
                style: other.to_owned(),
            }),
        }
    }
}

/// Set of styles active for one run.
///
/// Membership is what matters; iteration always follows [`Style::PRECEDENCE`]
/// regardless of insertion order.
///
/// # Examples
/// ```
/// use backend::domain::{Style, StyleSet};
///
/// let mut clicked_bold_first: StyleSet = [Style::Bold, Style::Italic].into_iter().collect();
/// let clicked_italic_first: StyleSet = [Style::Italic, Style::Bold].into_iter().collect();
/// assert_eq!(clicked_bold_first, clicked_italic_first);
/// clicked_bold_first.insert(Style::Bold);
/// assert_eq!(clicked_bold_first.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StyleSet(u8);

impl StyleSet {
    /// The set with no active styles.
    pub const EMPTY: Self = Self(0);

    /// Add a style; inserting an already-active style is a no-op.
    pub fn insert(&mut self, style: Style) {
        self.0 |= style.bit();
    }

    /// Whether the style is active in this set.
    pub fn contains(self, style: Style) -> bool {
        self.0 & style.bit() != 0
    }

    /// Whether no styles are active.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of active styles.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Active styles in canonical precedence order.
    pub fn iter(self) -> impl Iterator<Item = Style> {
        Style::PRECEDENCE
            .into_iter()
            .filter(move |style| self.contains(*style))
    }
}

impl FromIterator<Style> for StyleSet {
    fn from_iter<I: IntoIterator<Item = Style>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for style in iter {
            set.insert(style);
        }
        set
    }
}

/// A contiguous span of comment text sharing one exact style set.
///
/// ## Invariants
/// - `text` is non-empty (the editor never reports zero-width spans).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRun {
    text: String,
    styles: StyleSet,
}

impl StyleRun {
    /// Validate and construct a run.
    ///
    /// # Errors
    /// Returns [`RichTextError::EmptyRunText`] when `text` is empty.
    pub fn new(text: impl Into<String>, styles: StyleSet) -> Result<Self, RichTextError> {
        let text = text.into();
        if text.is_empty() {
            return Err(RichTextError::EmptyRunText);
        }
        Ok(Self { text, styles })
    }

    /// Construct an unstyled run.
    ///
    /// # Errors
    /// Returns [`RichTextError::EmptyRunText`] when `text` is empty.
    pub fn plain(text: impl Into<String>) -> Result<Self, RichTextError> {
        Self::new(text, StyleSet::EMPTY)
    }

    /// The literal text of the span.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Styles active over the whole span.
    pub fn styles(&self) -> StyleSet {
        self.styles
    }
}

/// Contract violations raised by run construction and rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RichTextError {
    /// A run carried no text.
    #[error("a style run must carry at least one character of text")]
    EmptyRunText,
    /// The run sequence itself was empty.
    #[error("a comment must contain at least one style run")]
    EmptyRunSequence,
    /// A style name outside the closed four-element universe.
    #[error("unknown style `{style}`")]
    UnknownStyle {
        /// The rejected style name as received.
        style: String,
    },
}

/// Tag wrapping every rendered comment body.
pub const CONTAINER_TAG: &str = "span";

/// Render a run sequence to its canonical minimal markup.
///
/// The renderer keeps a stack of currently open tags, always a prefix of
/// [`Style::PRECEDENCE`]. For each run it retains the longest shared prefix
/// between the stack and the run's style list, closes everything past that
/// prefix innermost-first, opens whatever is still missing, then appends the
/// run text. Tags that stay valid for the next run are never re-emitted, so
/// adjacent runs with identical style sets merge into a single tag body and
/// prefix-compatible neighbours share their outer tags.
///
/// # Errors
/// Returns [`RichTextError::EmptyRunSequence`] for an empty input slice.
///
/// # Examples
/// ```
/// use backend::domain::{render_markup, Style, StyleRun, StyleSet};
///
/// let bold: StyleSet = [Style::Bold].into_iter().collect();
/// let runs = vec![
///     StyleRun::plain("plain ")?,
///     StyleRun::new("loud", bold)?,
/// ];
/// assert_eq!(render_markup(&runs)?, "<span>plain <strong>loud</strong></span>");
/// # Ok::<(), backend::domain::RichTextError>(())
/// ```
pub fn render_markup(runs: &[StyleRun]) -> Result<String, RichTextError> {
    if runs.is_empty() {
        return Err(RichTextError::EmptyRunSequence);
    }

    let mut markup = String::new();
    push_open(&mut markup, CONTAINER_TAG);

    let mut open: Vec<Style> = Vec::new();
    for run in runs {
        let wanted: Vec<Style> = run.styles().iter().collect();
        let shared = open
            .iter()
            .zip(wanted.iter())
            .take_while(|(lhs, rhs)| lhs == rhs)
            .count();
        for closed in open.drain(shared..).rev() {
            push_close(&mut markup, closed.tag());
        }
        for style in wanted.into_iter().skip(shared) {
            push_open(&mut markup, style.tag());
            open.push(style);
        }
        push_text(&mut markup, run.text());
    }

    for closed in open.drain(..).rev() {
        push_close(&mut markup, closed.tag());
    }
    push_close(&mut markup, CONTAINER_TAG);
    Ok(markup)
}

fn push_open(markup: &mut String, tag: &str) {
    markup.push('<');
    markup.push_str(tag);
    markup.push('>');
}

fn push_close(markup: &mut String, tag: &str) {
    markup.push_str("</");
    markup.push_str(tag);
    markup.push('>');
}

// Run text is a literal child; escape the characters that would otherwise be
// parsed as structure.
fn push_text(markup: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => markup.push_str("&amp;"),
            '<' => markup.push_str("&lt;"),
            '>' => markup.push_str("&gt;"),
            _ => markup.push(ch),
        }
    }
}
