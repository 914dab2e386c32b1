/// One line of user input, classified for menu matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// Exactly one ASCII decimal digit.
    Digit(u8),
    /// Anything else, trimmed.
    Text(&'a str),
}

impl<'a> Input<'a> {
    /// Classify raw input. Only a lone digit counts as a menu choice:
    /// `"1"` is a digit, `"01"`, `"1."` and `"１"` are text.
    pub fn parse(raw: &'a str) -> Self {
        let text = raw.trim();
        match text.as_bytes() {
            [b @ b'0'..=b'9'] => Self::Digit(b - b'0'),
            _ => Self::Text(text),
        }
    }

    /// The trimmed text, digits included.
    pub fn as_text(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Text(t) => t.to_string(),
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Digit(0))
    }
}
