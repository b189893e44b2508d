//! Navigation state: app stage, bottom tabs and the visible view.

use serde::{Deserialize, Serialize};

use crate::advisor::AdvisorAction;
use crate::error::SessionError;

/// Top-level stage of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Landing screen before onboarding.
    #[default]
    Preview,
    Onboarding,
    /// Onboarded and browsing the tabs.
    Main,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preview => write!(f, "preview"),
            Self::Onboarding => write!(f, "onboarding"),
            Self::Main => write!(f, "main"),
        }
    }
}

/// Bottom navigation tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Home,
    Portfolio,
    Insights,
    Products,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Self::Home,
        Self::Portfolio,
        Self::Insights,
        Self::Products,
        Self::Profile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Portfolio => "portfolio",
            Self::Insights => "insights",
            Self::Products => "products",
            Self::Profile => "profile",
        }
    }

    /// Tab an advisor action button leads to.
    pub fn for_action(action: AdvisorAction) -> Option<Tab> {
        match action {
            AdvisorAction::Invest => Some(Self::Products),
            AdvisorAction::Rebalance => Some(Self::Portfolio),
            AdvisorAction::Learn => Some(Self::Insights),
            AdvisorAction::None => None,
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Tab {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| SessionError::UnknownTab(s.to_string()))
    }
}

/// What the main area currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "view", content = "id")]
pub enum View {
    Tab(Tab),
    ProductDetail(String),
    Invest(String),
}
