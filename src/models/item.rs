use serde::{Deserialize, Serialize};

/// Call number scheme tag as supplied by the upstream ILS export.
/// Tags are not trusted for classification — see the cataloguing module —
/// but they decide which items are never classified and how ties rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CallNumberScheme {
    Lc,
    LcPer,
    Dewey,
    DeweyPer,
    Sudoc,
    Alphanum,
    Asis,
    Auto,
    Thesis,
    Xx,
    Harvyench,
    Other,
}

impl CallNumberScheme {
    /// Parse an upstream scheme tag. Total: anything unrecognized degrades
    /// to `Other` instead of erroring.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "LC" => Self::Lc,
            "LCPER" => Self::LcPer,
            "DEWEY" => Self::Dewey,
            "DEWEYPER" => Self::DeweyPer,
            "SUDOC" => Self::Sudoc,
            "ALPHANUM" => Self::Alphanum,
            "ASIS" => Self::Asis,
            "AUTO" => Self::Auto,
            "THESIS" => Self::Thesis,
            "XX" => Self::Xx,
            "HARVYENCH" => Self::Harvyench,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lc => "LC",
            Self::LcPer => "LCPER",
            Self::Dewey => "DEWEY",
            Self::DeweyPer => "DEWEYPER",
            Self::Sudoc => "SUDOC",
            Self::Alphanum => "ALPHANUM",
            Self::Asis => "ASIS",
            Self::Auto => "AUTO",
            Self::Thesis => "THESIS",
            Self::Xx => "XX",
            Self::Harvyench => "HARVYENCH",
            Self::Other => "OTHER",
        }
    }

    /// Periodical variants share the grammar of their base scheme.
    pub fn is_dewey_tag(&self) -> bool {
        matches!(self, Self::Dewey | Self::DeweyPer)
    }

    pub fn is_lc_tag(&self) -> bool {
        matches!(self, Self::Lc | Self::LcPer)
    }
}

impl Default for CallNumberScheme {
    fn default() -> Self {
        Self::Other
    }
}

/// One item/holding attached to a bibliographic record, as delivered by the
/// ingestion layer. Immutable once read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub call_number: Option<String>,
    #[serde(default)]
    pub scheme: CallNumberScheme,
    #[serde(default)]
    pub library: String,
    #[serde(default)]
    pub home_location: String,
    #[serde(default)]
    pub current_location: String,
    pub barcode: String,
    pub public_note: Option<String>,
}

impl Item {
    pub fn new(call_number: &str, scheme: CallNumberScheme, barcode: &str) -> Self {
        Item {
            call_number: Some(call_number.to_string()),
            scheme,
            library: String::new(),
            home_location: String::new(),
            current_location: String::new(),
            barcode: barcode.to_string(),
            public_note: None,
        }
    }
}

/// A bibliographic record as seen by this subsystem: its items plus the two
/// record-level signals used for government documents and online holdings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BibRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub items: Vec<Item>,
    /// Browse-level call number (typically from the 050/090 field), used as a
    /// fallback when every holding is online-only.
    pub browse_call_number: Option<String>,
    /// True when the record carries the government-document metadata field.
    #[serde(default)]
    pub gov_doc_field: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag_degrades_to_other() {
        assert_eq!(CallNumberScheme::from_tag("LC"), CallNumberScheme::Lc);
        assert_eq!(CallNumberScheme::from_tag("deweyper"), CallNumberScheme::DeweyPer);
        assert_eq!(CallNumberScheme::from_tag("WEIRD"), CallNumberScheme::Other);
        assert_eq!(CallNumberScheme::from_tag(""), CallNumberScheme::Other);
    }
}
