//! Workout documents
//!
//! A workout file is kept as its original text plus the byte spans of the
//! `<name>` and `<description>` elements directly under the root element.
//! Edits replace only those spans, so everything else (declaration,
//! attributes, comments, whitespace, other elements) is written back exactly
//! as it was read.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;
use std::ops::Range;
use thiserror::Error;

/// The two fields the writer rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
}

impl Field {
    pub fn element(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
        }
    }

    fn from_element(name: &[u8]) -> Option<Self> {
        match name {
            b"name" => Some(Field::Name),
            b"description" => Some(Field::Description),
            _ => None,
        }
    }
}

/// Why a document could not be loaded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("malformed XML: {0}")]
    Malformed(String),

    #[error("missing <{}> element", .0.element())]
    MissingField(Field),

    #[error("<{}> contains markup; only plain text can be rewritten", .0.element())]
    UnsupportedContent(Field),
}

#[derive(Debug, Clone)]
struct FieldSpan {
    /// Start tag through end tag
    element: Range<usize>,
    /// Raw text between the tags; `None` for a self-closing element
    content: Option<Range<usize>>,
}

/// Parsed workout file with mutable `name` and `description`
#[derive(Debug, Clone)]
pub struct WorkoutDocument {
    source: String,
    name_span: FieldSpan,
    description_span: FieldSpan,
    name: String,
    description: String,
}

impl WorkoutDocument {
    /// Parse a document, locating both target fields.
    ///
    /// Field text is kept in its escaped (raw) form.
    pub fn parse(source: impl Into<String>) -> Result<Self, DocumentError> {
        let source = source.into();
        let (name_span, description_span) = locate_fields(&source)?;

        let name_span = name_span.ok_or(DocumentError::MissingField(Field::Name))?;
        let description_span =
            description_span.ok_or(DocumentError::MissingField(Field::Description))?;
        let name = raw_text(&source, &name_span).to_string();
        let description = raw_text(&source, &description_span).to_string();

        Ok(Self {
            source,
            name_span,
            description_span,
            name,
            description,
        })
    }

    /// Raw (escaped) `<name>` text
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw (escaped) `<description>` text
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replace the raw `<name>` text; the caller escapes inserted content
    pub fn set_name(&mut self, raw: impl Into<String>) {
        self.name = raw.into();
    }

    /// Replace the raw `<description>` text; the caller escapes inserted content
    pub fn set_description(&mut self, raw: impl Into<String>) {
        self.description = raw.into();
    }

    /// Original text as read
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether either field differs from the original
    pub fn is_modified(&self) -> bool {
        self.name != raw_text(&self.source, &self.name_span)
            || self.description != raw_text(&self.source, &self.description_span)
    }

    /// Serialize, splicing the current field text into the original
    pub fn render(&self) -> String {
        let mut edits = [
            (Field::Name, &self.name_span, self.name.as_str()),
            (
                Field::Description,
                &self.description_span,
                self.description.as_str(),
            ),
        ];
        edits.sort_by_key(|(_, span, _)| span.element.start);

        let mut out = String::with_capacity(self.source.len() + 64);
        let mut cursor = 0;
        for (field, span, text) in edits {
            match &span.content {
                Some(content) => {
                    out.push_str(&self.source[cursor..content.start]);
                    out.push_str(text);
                    cursor = content.end;
                }
                None if text.is_empty() => {
                    out.push_str(&self.source[cursor..span.element.end]);
                    cursor = span.element.end;
                }
                None => {
                    out.push_str(&self.source[cursor..span.element.start]);
                    let tag = field.element();
                    out.push_str(&format!("<{}>{}</{}>", tag, text, tag));
                    cursor = span.element.end;
                }
            }
        }
        out.push_str(&self.source[cursor..]);
        out
    }
}

fn raw_text<'a>(source: &'a str, span: &FieldSpan) -> &'a str {
    span.content
        .as_ref()
        .map(|range| &source[range.clone()])
        .unwrap_or("")
}

/// Escape text for insertion into element content
pub fn escape_text(text: &str) -> Cow<'_, str> {
    quick_xml::escape::partial_escape(text)
}

/// Unescape raw element text, falling back to the raw form on bad entities
pub fn unescape_text(raw: &str) -> Cow<'_, str> {
    quick_xml::escape::unescape(raw).unwrap_or(Cow::Borrowed(raw))
}

type Located = (Option<FieldSpan>, Option<FieldSpan>);

/// Find the first `<name>` and `<description>` directly under the root.
///
/// Positions come from `buffer_position` after each tag event, which always
/// sits just past the closing `>`; tag starts are recovered by searching
/// backwards from there.
fn locate_fields(source: &str) -> Result<Located, DocumentError> {
    let mut reader = Reader::from_str(source);
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut open: Option<(Field, usize, usize)> = None;
    let mut name = None;
    let mut description = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| DocumentError::Malformed(e.to_string()))?;
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(ref tag) => {
                if let Some((field, _, _)) = open {
                    return Err(DocumentError::UnsupportedContent(field));
                }
                if depth == 0 {
                    if seen_root {
                        return Err(DocumentError::Malformed(
                            "more than one root element".to_string(),
                        ));
                    }
                    seen_root = true;
                }
                depth += 1;
                if depth == 2 {
                    if let Some(field) = Field::from_element(tag.name().as_ref()) {
                        let start = tag_start(source, after);
                        open = Some((field, start, after));
                    }
                }
            }
            Event::Empty(ref tag) => {
                if let Some((field, _, _)) = open {
                    return Err(DocumentError::UnsupportedContent(field));
                }
                if depth == 0 {
                    if seen_root {
                        return Err(DocumentError::Malformed(
                            "more than one root element".to_string(),
                        ));
                    }
                    seen_root = true;
                }
                if depth == 1 {
                    if let Some(field) = Field::from_element(tag.name().as_ref()) {
                        let span = FieldSpan {
                            element: tag_start(source, after)..after,
                            content: None,
                        };
                        store_first(field, span, &mut name, &mut description);
                    }
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some((field, start, content_start)) = open.take() {
                        let content_end = tag_start(source, after);
                        let span = FieldSpan {
                            element: start..after,
                            content: Some(content_start..content_end),
                        };
                        store_first(field, span, &mut name, &mut description);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::CData(_) | Event::Comment(_) | Event::PI(_) => {
                if let Some((field, _, _)) = open {
                    return Err(DocumentError::UnsupportedContent(field));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(DocumentError::Malformed("no root element".to_string()));
    }
    if depth != 0 {
        return Err(DocumentError::Malformed(
            "unexpected end of document".to_string(),
        ));
    }
    Ok((name, description))
}

fn tag_start(source: &str, tag_end: usize) -> usize {
    source[..tag_end].rfind('<').unwrap_or(0)
}

fn store_first(
    field: Field,
    span: FieldSpan,
    name: &mut Option<FieldSpan>,
    description: &mut Option<FieldSpan>,
) {
    let slot = match field {
        Field::Name => name,
        Field::Description => description,
    };
    if slot.is_none() {
        *slot = Some(span);
    }
}
