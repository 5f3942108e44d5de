//! Named string formats checked by string rules.

use std::sync::OnceLock;

use regex::Regex;

/// Semantic formats a string rule can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Email,
    Url,
    Ip,
    Date,
    HexColor,
}

impl StringFormat {
    /// Look up a format by the name used in rules. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "email" => Some(StringFormat::Email),
            "url" => Some(StringFormat::Url),
            "ip" => Some(StringFormat::Ip),
            "date" => Some(StringFormat::Date),
            "hexColor" => Some(StringFormat::HexColor),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StringFormat::Email => "email",
            StringFormat::Url => "url",
            StringFormat::Ip => "ip",
            StringFormat::Date => "date",
            StringFormat::HexColor => "hexColor",
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        self.pattern().is_match(value)
    }

    fn pattern(&self) -> &'static Regex {
        static EMAIL: OnceLock<Regex> = OnceLock::new();
        static URL: OnceLock<Regex> = OnceLock::new();
        static IP: OnceLock<Regex> = OnceLock::new();
        static DATE: OnceLock<Regex> = OnceLock::new();
        static HEX_COLOR: OnceLock<Regex> = OnceLock::new();

        let (cell, source) = match self {
            // Whitespace is the ASCII set only; NBSP and other Unicode spaces are accepted.
            StringFormat::Email => (&EMAIL, r"^[^\t\n\f\r @]+@[^\t\n\f\r @]+\.[^\t\n\f\r @]+$"),
            StringFormat::Url => (&URL, r"^https?://.+"),
            StringFormat::Ip => (
                &IP,
                r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$|^(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}$",
            ),
            StringFormat::Date => (&DATE, r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"),
            StringFormat::HexColor => (&HEX_COLOR, r"^#?(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$"),
        };
        // Patterns are literals; a failure here is a programming error.
        cell.get_or_init(|| Regex::new(source).expect("valid format pattern"))
    }
}
