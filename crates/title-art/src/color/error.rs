use std::fmt;

/// Why a text colour string was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseColorError {
    /// Nothing but whitespace or a lone `#`
    Empty,
    /// Digit count other than 3 or 6
    DigitCount(usize),
    /// A 4- or 8-digit value carrying alpha
    Alpha,
    /// A character that is not a hex digit, and the channel it fell in
    NotHex { channel: Channel, found: char },
}

/// Colour channel named in parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        })
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::Empty => f.write_str("colour is empty"),
            ParseColorError::DigitCount(n) => {
                write!(f, "expected #RGB or #RRGGBB, got {n} digits")
            }
            ParseColorError::Alpha => {
                f.write_str("alpha is not supported, title text is always opaque")
            }
            ParseColorError::NotHex { channel, found } => {
                write!(f, "{found:?} in the {channel} channel is not a hex digit")
            }
        }
    }
}

impl std::error::Error for ParseColorError {}
