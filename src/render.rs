// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Placeholder substitution for the SVG template.
//!
//! The renderer is a pure function over the template text: every occurrence
//! of a recognized `{{NAME}}` token is replaced with the corresponding
//! metric's textual form, unrecognized placeholder-shaped tokens are left
//! untouched, and all other template bytes pass through unchanged. Free-form
//! replacement text is XML-escaped exactly once before substitution so the
//! output document stays well formed.

use std::{borrow::Cow, fmt::Write as _};

use crate::stats::ProfileStats;

/// Vertical offset between consecutive decorative text fragments.
const ASCII_LINE_OFFSET: &str = "1.2em";

/// Built-in decorative banner used when no ASCII art override is supplied.
pub const DEFAULT_ASCII_ART: &str = r"  ___   ___ _____ ___
 / _ \ / __|_   _/ _ \
| (_) | (__  | || (_) |
 \___/ \___| |_| \___/
";

/// Recognized placeholder tokens, the fixed enumerated substitution set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `{{UPTIME}}` - elapsed-time label.
    Uptime,
    /// `{{REPOS}}` - repository count.
    Repos,
    /// `{{STARS}}` - star sum.
    Stars,
    /// `{{COMMITS}}` - commit metric.
    Commits,
    /// `{{TOP_LANGS}}` - language ranking label.
    TopLangs,
    /// `{{ASCII}}` - decorative text fragments.
    Ascii
}

impl Placeholder {
    /// Every recognized placeholder, in substitution order.
    pub const ALL: [Self; 6] = [
        Self::Uptime,
        Self::Repos,
        Self::Stars,
        Self::Commits,
        Self::TopLangs,
        Self::Ascii
    ];

    /// Returns the literal token this placeholder matches in templates.
    ///
    /// # Examples
    ///
    /// ```
    /// use octoprofile::Placeholder;
    ///
    /// assert_eq!(Placeholder::TopLangs.token(), "{{TOP_LANGS}}");
    /// ```
    pub fn token(self) -> &'static str {
        match self {
            Self::Uptime => "{{UPTIME}}",
            Self::Repos => "{{REPOS}}",
            Self::Stars => "{{STARS}}",
            Self::Commits => "{{COMMITS}}",
            Self::TopLangs => "{{TOP_LANGS}}",
            Self::Ascii => "{{ASCII}}"
        }
    }
}

/// Escapes XML-meaningful characters in replacement text.
///
/// Each special character is escaped exactly once; text without special
/// characters is returned borrowed.
pub fn escape_xml(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len());
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}

/// Reshapes decorative text into vertically stacked `<tspan>` fragments.
///
/// One fragment per input line, each offset below the previous. Blank lines
/// become a single space so the fragment still advances the vertical cursor.
/// Line content is escaped before embedding.
fn ascii_fragments(art: &str) -> String {
    let mut fragments = String::with_capacity(art.len() * 2);

    for (index, line) in art.lines().enumerate() {
        let content = if line.trim().is_empty() {
            Cow::Borrowed(" ")
        } else {
            escape_xml(line)
        };
        let dy = if index == 0 { "0" } else { ASCII_LINE_OFFSET };

        let _ = write!(
            fragments,
            "<tspan x=\"0\" dy=\"{dy}\" xml:space=\"preserve\">{content}</tspan>"
        );
    }

    fragments
}

/// Substitutes the aggregated statistics into the template.
///
/// Every occurrence of each recognized token is replaced; unrecognized
/// `{{FOO}}`-shaped tokens remain verbatim. The function is deterministic
/// and idempotent under unchanged inputs. When `ascii_override` is absent,
/// [`DEFAULT_ASCII_ART`] is reshaped into the `{{ASCII}}` slot instead of
/// leaving it empty.
///
/// # Examples
///
/// ```
/// use octoprofile::{CommitMetric, ProfileStats, render_profile};
///
/// let stats = ProfileStats {
///     uptime:        "1y 2m 3d".to_owned(),
///     repo_count:    12,
///     star_count:    340,
///     commit_metric: CommitMetric::Estimated(57),
///     top_languages: vec!["Rust".to_owned()]
/// };
/// let rendered = render_profile("Repos: {{REPOS}} Stars: {{STARS}}", &stats, None);
/// assert_eq!(rendered, "Repos: 12 Stars: 340");
/// ```
pub fn render_profile(template: &str, stats: &ProfileStats, ascii_override: Option<&str>) -> String {
    let art = ascii_override.unwrap_or(DEFAULT_ASCII_ART);

    Placeholder::ALL.iter().fold(template.to_owned(), |document, placeholder| {
        document.replace(placeholder.token(), &placeholder_value(*placeholder, stats, art))
    })
}

fn placeholder_value(placeholder: Placeholder, stats: &ProfileStats, art: &str) -> String {
    match placeholder {
        Placeholder::Uptime => stats.uptime.clone(),
        Placeholder::Repos => stats.repo_count.to_string(),
        Placeholder::Stars => stats.star_count.to_string(),
        Placeholder::Commits => stats.commit_metric.to_string(),
        Placeholder::TopLangs => escape_xml(&stats.top_languages_label()).into_owned(),
        Placeholder::Ascii => ascii_fragments(art)
    }
}
