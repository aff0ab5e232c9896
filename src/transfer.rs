//! Object transfer: media types and transferables, used for drag and drop
//! between components.
//!
//! A transferable advertises one media type per backing object. Rust objects
//! are advertised as `application/x-rust-object;class=<type name>`.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use logos::Logos;

use crate::component::{ComponentId, ComponentModel, ComponentTree, HasModel, Labelable};
use crate::error::{Error, Result};

/// Primary type and subtype of the media type advertised for Rust objects.
pub const OBJECT_PRIMARY_TYPE: &str = "application";
pub const OBJECT_SUBTYPE: &str = "x-rust-object";

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Media type token. The token class admits `:` so Rust paths need no quoting.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum MediaToken {
    #[regex(r"[!#$%&'*+\-.0-9A-Z^_`a-z|~:]+")]
    Token,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Quoted,

    #[token("/")]
    Slash,

    #[token(";")]
    Semicolon,

    #[token("=")]
    Equals,
}

fn is_token_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~:".contains(ch)
}

/// Failure to parse a media type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaTypeError {
    #[error("empty media type")]
    Empty,
    #[error("unexpected {found:?} at byte {position}")]
    Unexpected { position: usize, found: String },
    #[error("media type ends early, expected {expected}")]
    Truncated { expected: &'static str },
}

impl From<MediaTypeError> for Error {
    fn from(err: MediaTypeError) -> Self {
        Error::InvalidArgument(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// MediaType
// ---------------------------------------------------------------------------

/// A content type: `primary/subtype` with `name=value` parameters.
///
/// Type, subtype and parameter names are lowercase; values keep their case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    primary: String,
    subtype: String,
    params: Vec<(String, String)>,
}

impl MediaType {
    pub fn new(primary: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            primary: primary.into().to_ascii_lowercase(),
            subtype: subtype.into().to_ascii_lowercase(),
            params: Vec::new(),
        }
    }

    /// The type advertised for objects of type `T`.
    pub fn for_type<T: ?Sized>() -> Self {
        Self::new(OBJECT_PRIMARY_TYPE, OBJECT_SUBTYPE).with_param("class", type_name::<T>())
    }

    /// Add or replace a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some(param) => param.1 = value,
            None => self.params.push((name, value)),
        }
        self
    }

    pub fn parse(text: &str) -> std::result::Result<Self, MediaTypeError> {
        let mut tokens = MediaToken::lexer(text)
            .spanned()
            .map(|(token, span)| (token, span.start, &text[span]));
        if text.trim().is_empty() {
            return Err(MediaTypeError::Empty);
        }

        let primary = expect_token(tokens.next(), "type")?;
        expect(tokens.next(), MediaToken::Slash, "'/'")?;
        let subtype = expect_token(tokens.next(), "subtype")?;
        let mut media_type = Self::new(primary, subtype);

        while let Some(next) = tokens.next() {
            expect(Some(next), MediaToken::Semicolon, "';'")?;
            let name = expect_token(tokens.next(), "parameter name")?;
            expect(tokens.next(), MediaToken::Equals, "'='")?;
            let value = match tokens.next() {
                Some((Ok(MediaToken::Token), _, slice)) => slice.to_owned(),
                Some((Ok(MediaToken::Quoted), _, slice)) => unquote(slice),
                Some((_, position, slice)) => {
                    return Err(MediaTypeError::Unexpected {
                        position,
                        found: slice.to_owned(),
                    })
                }
                None => return Err(MediaTypeError::Truncated { expected: "parameter value" }),
            };
            media_type = media_type.with_param(name, value);
        }
        Ok(media_type)
    }

    pub fn primary_type(&self) -> &str {
        &self.primary
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether type and subtype match, ignoring parameters.
    pub fn has_base_type(&self, primary: &str, subtype: &str) -> bool {
        self.primary.eq_ignore_ascii_case(primary) && self.subtype.eq_ignore_ascii_case(subtype)
    }
}

type Spanned<'t> = (std::result::Result<MediaToken, ()>, usize, &'t str);

fn expect<'t>(
    token: Option<Spanned<'t>>,
    kind: MediaToken,
    expected: &'static str,
) -> std::result::Result<&'t str, MediaTypeError> {
    match token {
        Some((Ok(found), _, slice)) if found == kind => Ok(slice),
        Some((_, position, slice)) => Err(MediaTypeError::Unexpected {
            position,
            found: slice.to_owned(),
        }),
        None => Err(MediaTypeError::Truncated { expected }),
    }
}

fn expect_token<'t>(
    token: Option<Spanned<'t>>,
    expected: &'static str,
) -> std::result::Result<&'t str, MediaTypeError> {
    expect(token, MediaToken::Token, expected)
}

fn unquote(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => value.extend(chars.next()),
            _ => value.push(ch),
        }
    }
    value
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.primary, self.subtype)?;
        for (name, value) in &self.params {
            if !value.is_empty() && value.chars().all(is_token_char) {
                write!(f, ";{name}={value}")?;
            } else {
                let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, ";{name}=\"{escaped}\"")?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for MediaType {
    type Err = MediaTypeError;

    fn from_str(text: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(text)
    }
}

// ---------------------------------------------------------------------------
// Transferable
// ---------------------------------------------------------------------------

/// Transferred data, downcast by the receiver.
pub type TransferData = Arc<dyn Any + Send + Sync>;

/// Something that can hand over data in one or more media types.
pub trait Transferable {
    fn content_types(&self) -> Vec<MediaType>;

    fn can_transfer(&self, content_type: &MediaType) -> bool {
        self.content_types().contains(content_type)
    }

    /// Fails with [`Error::UnsupportedContentType`] for a type not advertised.
    fn transfer(&self, content_type: &MediaType) -> Result<TransferData>;
}

/// Transfers a fixed set of Rust objects from a source.
pub struct ObjectTransferable<S> {
    source: S,
    objects: Vec<(MediaType, TransferData)>,
}

impl<S> ObjectTransferable<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            objects: Vec::new(),
        }
    }

    /// Add an object, replacing any earlier object of the same type.
    pub fn with_object<T: Any + Send + Sync>(mut self, object: T) -> Self {
        let content_type = MediaType::for_type::<T>();
        self.objects.retain(|(existing, _)| *existing != content_type);
        self.objects.push((content_type, Arc::new(object)));
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<S> Transferable for ObjectTransferable<S> {
    fn content_types(&self) -> Vec<MediaType> {
        self.objects.iter().map(|(t, _)| t.clone()).collect()
    }

    fn transfer(&self, content_type: &MediaType) -> Result<TransferData> {
        self.objects
            .iter()
            .find(|(t, _)| t == content_type)
            .map(|(_, object)| Arc::clone(object))
            .ok_or_else(|| Error::UnsupportedContentType(content_type.to_string()))
    }
}

impl<S: fmt::Debug> fmt::Debug for ObjectTransferable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectTransferable")
            .field("source", &self.source)
            .field("content_types", &self.content_types())
            .finish()
    }
}

/// Transfer an object of type `T` and downcast it.
pub fn transfer_object<T: Any + Send + Sync>(transferable: &dyn Transferable) -> Result<Arc<T>> {
    let content_type = MediaType::for_type::<T>();
    transferable
        .transfer(&content_type)?
        .downcast::<T>()
        .map_err(|_| Error::UnsupportedContentType(content_type.to_string()))
}

// ---------------------------------------------------------------------------
// Component transfer
// ---------------------------------------------------------------------------

impl ComponentTree {
    /// The data a component offers when dragged: its text value, or else its
    /// label, as a `String`.
    pub fn export_transfer(&self, id: ComponentId) -> Result<ObjectTransferable<ComponentId>> {
        let component = self.component(id)?;
        let text = component
            .value()
            .map(str::to_owned)
            .or_else(|| component.label());
        let transferable = ObjectTransferable::new(id);
        Ok(match text {
            Some(text) => transferable.with_object(text),
            None => transferable,
        })
    }

    /// Drop data onto a component. Text controls take a `String` as their
    /// new value; labels take it as their label.
    ///
    /// Returns whether the component changed.
    pub fn import_transfer(&mut self, id: ComponentId, transferable: &dyn Transferable) -> Result<bool> {
        let accepts_value = match self.component(id)?.model() {
            ComponentModel::TextControl(_) => true,
            ComponentModel::Label => false,
            _ => {
                return Err(Error::invalid_argument(format!(
                    "component {} does not accept dropped data",
                    self.depict_id(id)
                )))
            }
        };
        let text = transfer_object::<String>(transferable)?;
        tracing::debug!(target: "guise::event", component = %self.depict_id(id), "import transfer");
        if accepts_value {
            self.set_value(id, Some(text.as_ref().clone()))
        } else {
            self.set_label(id, Some(text.as_ref().clone()))
        }
    }
}
