//! Tagged text fragments, the token values keyword and operator lexicons produce.

use std::fmt;

/// What kind of word a [`Fragment`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// Keywords and operators
    Reserved,
    /// Names that are not reserved
    Identifier,
    /// Integer literals
    Integer,
    /// Decimal literals
    Decimal,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tag::Reserved => "reserved",
            Tag::Identifier => "identifier",
            Tag::Integer => "integer",
            Tag::Decimal => "decimal",
        };
        write!(f, "{}", name)
    }
}

/// Recognized text together with its [`Tag`].
///
/// Displays as the bare text so error messages read `foo expected`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    text: String,
    tag: Tag,
}

impl Fragment {
    /// `text` tagged with `tag`
    pub fn new(text: impl Into<String>, tag: Tag) -> Self {
        Self {
            text: text.into(),
            tag,
        }
    }

    /// A keyword or operator
    pub fn reserved(text: impl Into<String>) -> Self {
        Self::new(text, Tag::Reserved)
    }

    /// A plain identifier
    pub fn identifier(text: impl Into<String>) -> Self {
        Self::new(text, Tag::Identifier)
    }

    /// The recognized text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// What kind of word this is
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Whether this is a keyword or operator
    pub fn is_reserved(&self) -> bool {
        self.tag == Tag::Reserved
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A map from recognized text to a fragment carrying `tag`
pub fn fragment_map(tag: Tag) -> impl Fn(&str) -> Fragment + Clone + Send + Sync + 'static {
    move |text| Fragment::new(text, tag)
}

/// `text` as an identifier fragment
pub fn identifier_fragment(text: &str) -> Fragment {
    Fragment::new(text, Tag::Identifier)
}

/// `text` as an integer literal fragment
pub fn integer_fragment(text: &str) -> Fragment {
    Fragment::new(text, Tag::Integer)
}

/// `text` as a decimal literal fragment
pub fn decimal_fragment(text: &str) -> Fragment {
    Fragment::new(text, Tag::Decimal)
}
