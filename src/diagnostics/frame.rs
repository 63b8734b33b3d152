use std::fmt;

/// One frame of a rendered backtrace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    symbol: String,
    location: Option<String>,
}

impl Frame {
    pub fn new(symbol: impl Into<String>, location: Option<String>) -> Self {
        Self { symbol: symbol.into(), location }
    }

    /// Demangled symbol, without the trailing `::h<hash>` suffix.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// `file:line:col`, when debug info resolved it.
    #[inline]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// The symbol with a leading `<` of a qualified path removed, so that
    /// `<outcome_rail::Outcome<T> as Trait>::f` is matched by its type path.
    pub(crate) fn path(&self) -> &str {
        self.symbol.strip_prefix('<').unwrap_or(&self.symbol)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "   at {} in {location}", self.symbol),
            None => write!(f, "   at {}", self.symbol),
        }
    }
}

/// Parses the text of a `std::backtrace::Backtrace`, innermost frame first.
///
/// Frame lines look like `  12: symbol`, optionally followed by an
/// `at file:line:col` line. Unrecognised lines are ignored, so a disabled or
/// unsupported backtrace parses to no frames.
pub fn parse_frames(text: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                if frame.location.is_none() {
                    frame.location = Some(location.trim().to_owned());
                }
            }
            continue;
        }

        let Some((index, symbol)) = line.split_once(": ") else {
            continue;
        };
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        frames.push(Frame::new(strip_hash(symbol.trim()), None));
    }

    frames
}

fn strip_hash(symbol: &str) -> &str {
    match symbol.rsplit_once("::h") {
        Some((head, hash))
            if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) =>
        {
            head
        },
        _ => symbol,
    }
}
