use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A tab or form field name that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{name}`")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl UnknownName {
    pub(crate) fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

/// Which screen the session is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    MainMenu,
    Client(ClientTab),
    Courier(CourierTab),
    Reviews,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientTab {
    #[default]
    Create,
    Active,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourierTab {
    #[default]
    Available,
    Current,
    History,
    Stats,
}

impl ClientTab {
    pub const ALL: [ClientTab; 3] = [ClientTab::Create, ClientTab::Active, ClientTab::History];

    pub fn name(&self) -> &'static str {
        match self {
            ClientTab::Create => "create",
            ClientTab::Active => "active",
            ClientTab::History => "history",
        }
    }
}

impl CourierTab {
    pub const ALL: [CourierTab; 4] = [
        CourierTab::Available,
        CourierTab::Current,
        CourierTab::History,
        CourierTab::Stats,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CourierTab::Available => "available",
            CourierTab::Current => "current",
            CourierTab::History => "history",
            CourierTab::Stats => "stats",
        }
    }
}

impl FromStr for ClientTab {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, UnknownName> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownName::new("client tab", s))
    }
}

impl FromStr for CourierTab {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, UnknownName> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownName::new("courier tab", s))
    }
}

impl Screen {
    /// The same role screen switched to the tab called `name`, if that screen has one.
    pub fn with_tab(self, name: &str) -> Option<Screen> {
        match self {
            Screen::Client(_) => name.parse().ok().map(Screen::Client),
            Screen::Courier(_) => name.parse().ok().map(Screen::Courier),
            Screen::MainMenu | Screen::Reviews => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::MainMenu => write!(f, "main menu"),
            Screen::Client(tab) => write!(f, "client/{}", tab.name()),
            Screen::Courier(tab) => write!(f, "courier/{}", tab.name()),
            Screen::Reviews => write!(f, "reviews"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_tab_stays_within_role() {
        let client = Screen::Client(ClientTab::Create);
        assert_eq!(client.with_tab("history"), Some(Screen::Client(ClientTab::History)));
        assert_eq!(client.with_tab("stats"), None);

        let courier = Screen::Courier(CourierTab::Available);
        assert_eq!(courier.with_tab("stats"), Some(Screen::Courier(CourierTab::Stats)));
        assert_eq!(Screen::MainMenu.with_tab("active"), None);
    }

    #[test]
    fn test_unknown_tab_names_the_input() {
        let err = "archive".parse::<ClientTab>().unwrap_err();
        assert_eq!(err, UnknownName::new("client tab", "archive"));
        assert_eq!(err.to_string(), "unknown client tab `archive`");
        assert_eq!("stats".parse::<CourierTab>(), Ok(CourierTab::Stats));
    }
}
