//! Tag Writer
//!
//! Appends the group tag to `<name>` and prepends the directory label to
//! `<description>`. Both edits first strip what a previous run wrote, so
//! applying the writer to its own output is a fixed point.

pub mod output;

use crate::document::{escape_text, unescape_text, WorkoutDocument};
use crate::tree::IndexChain;
use regex::Regex;

pub use output::{persist_atomic, OutputMode};

/// Separator between the directory label and the original description
pub const DESCRIPTION_SEPARATOR: &str = "\n";

const TRAILING_TAG: &str = r"\s*\[[0-9]+(?:-[0-9]+)*\]$";

/// Rewrites the two tagged fields of a workout document
#[derive(Debug, Clone)]
pub struct TagWriter {
    trailing_tag: Regex,
}

impl Default for TagWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TagWriter {
    pub fn new() -> Self {
        Self {
            trailing_tag: Regex::new(TRAILING_TAG).expect("trailing tag pattern is valid"),
        }
    }

    /// Name with `chain`'s tag appended, replacing a trailing tag if present.
    ///
    /// Trailing whitespace before the tag collapses to one space. An empty
    /// chain returns the name untouched.
    pub fn tag_name(&self, name: &str, chain: &IndexChain) -> String {
        let Some(tag) = chain.tag() else {
            return name.to_string();
        };
        let base = self.strip_tag(name.trim_end()).trim_end();
        if base.is_empty() {
            tag
        } else {
            format!("{} {}", base, tag)
        }
    }

    /// Name without a recognized trailing tag
    pub fn strip_tag<'a>(&self, name: &'a str) -> &'a str {
        match self.trailing_tag.find(name) {
            Some(m) => &name[..m.start()],
            None => name,
        }
    }

    /// Description with `label` as its first line.
    ///
    /// `is_label` recognizes a previously prepended label; a first line it
    /// accepts is dropped before the new label is added. Field text is raw
    /// (escaped) XML; `label` is plain text and gets escaped here.
    pub fn prefix_description<F>(&self, description: &str, label: &str, is_label: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        let existing = strip_label_line(description, &is_label);
        let label = escape_text(label);
        if existing.is_empty() {
            label.into_owned()
        } else {
            format!("{}{}{}", label, DESCRIPTION_SEPARATOR, existing)
        }
    }

    /// Whether `name` ends with a tag this writer would have appended
    pub fn has_tag(&self, name: &str) -> bool {
        self.trailing_tag.is_match(name.trim_end())
    }

    /// Apply both edits to a document. An empty chain leaves it unchanged.
    ///
    /// A label line is only stripped from the description when the name
    /// already carries a tag; an untagged document keeps its text as is.
    pub fn apply<F>(
        &self,
        document: &mut WorkoutDocument,
        chain: &IndexChain,
        label: &str,
        is_label: F,
    ) where
        F: Fn(&str) -> bool,
    {
        if chain.is_empty() {
            return;
        }
        let tagged_before = self.has_tag(document.name());
        let name = self.tag_name(document.name(), chain);
        let description = self.prefix_description(document.description(), label, |line| {
            tagged_before && is_label(line)
        });
        document.set_name(name);
        document.set_description(description);
    }
}

fn strip_label_line<'a, F>(description: &'a str, is_label: &F) -> &'a str
where
    F: Fn(&str) -> bool,
{
    let (first, rest) = match description.find(DESCRIPTION_SEPARATOR) {
        Some(pos) => (
            &description[..pos],
            &description[pos + DESCRIPTION_SEPARATOR.len()..],
        ),
        None => (description, ""),
    };
    if !first.is_empty() && is_label(&unescape_text(first)) {
        rest
    } else {
        description
    }
}
