use std::fmt;

/// A user action decoded from the raw `action` and `item` request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Feed,
    Play,
    /// Purchase from the shop. `None` when the request carried no item.
    Buy(Option<String>),
    /// Anything unrecognised; kept verbatim for logging.
    Other(String),
}

impl Action {
    /// Decodes request parameters. Matching is exact, as in the frame URLs.
    /// A missing action decodes to `Other("")`.
    pub fn parse(action: Option<&str>, item: Option<&str>) -> Self {
        match action.unwrap_or_default() {
            "feed" => Action::Feed,
            "play" => Action::Play,
            "buy" => Action::Buy(item.filter(|i| !i.is_empty()).map(str::to_string)),
            other => Action::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Action::Feed => "feed",
            Action::Play => "play",
            Action::Buy(_) => "buy",
            Action::Other(name) => name,
        }
    }

    pub fn item(&self) -> Option<&str> {
        match self {
            Action::Buy(item) => item.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.item() {
            Some(item) => write!(f, "{}({})", self.name(), item),
            None => f.write_str(self.name()),
        }
    }
}
