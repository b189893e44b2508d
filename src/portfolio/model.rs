//! Portfolio data model: the user record, holdings, history and activity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::ProductKind;
use crate::profile::RiskProfile;

/// The signed-in (mock) user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Set once at the end of onboarding and never recomputed.
    pub risk_profile: RiskProfile,
    pub portfolio_value: Decimal,
    pub total_invested: Decimal,
    pub total_gain: Decimal,
    pub today_change: Decimal,
    pub today_change_percent: Decimal,
}

/// A holding in the user's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub kind: ProductKind,
    pub value: Decimal,
    /// Share of the portfolio, in percent.
    pub allocation: Decimal,
    /// Annual return, in percent.
    pub return_rate: Decimal,
}

/// Month-end portfolio value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub month: String,
    pub value: Decimal,
}

/// Chart window on the portfolio screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "1Y")]
    #[default]
    OneYear,
}

impl TimeRange {
    /// Number of trailing monthly points shown; `None` means all.
    pub fn points(&self) -> Option<usize> {
        match self {
            Self::OneMonth => Some(1),
            Self::ThreeMonths => Some(3),
            Self::OneYear => None,
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneMonth => write!(f, "1M"),
            Self::ThreeMonths => write!(f, "3M"),
            Self::OneYear => write!(f, "1Y"),
        }
    }
}

impl std::str::FromStr for TimeRange {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "1M" => Ok(Self::OneMonth),
            "3M" => Ok(Self::ThreeMonths),
            "1Y" => Ok(Self::OneYear),
            _ => Err(format!("Unknown time range: {}", s)),
        }
    }
}

/// What kind of activity a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Portfolio,
    FundPurchase,
    Equity,
    Bond,
}

/// Settlement state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Processing,
    Completed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// An entry in the recent activity list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub title: String,
    pub subtitle: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        amount: Decimal,
        status: TransactionStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            subtitle: subtitle.into(),
            amount,
            percentage: None,
            status,
            created_at: Utc::now(),
        }
    }

    pub fn with_percentage(mut self, percentage: Decimal) -> Self {
        self.percentage = Some(percentage);
        self
    }
}

/// Derived figures for the portfolio header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub value: Decimal,
    pub invested: Decimal,
    pub gain: Decimal,
    /// Gain over invested capital, in percent. Zero when nothing is invested.
    pub gain_percent: Decimal,
    pub today_change: Decimal,
    pub today_change_percent: Decimal,
    /// Sum of asset allocations, in percent.
    pub allocation_total: Decimal,
}

impl PortfolioSummary {
    pub fn from_user(user: &User, assets: &[Asset]) -> Self {
        let gain_percent = if user.total_invested.is_zero() {
            Decimal::ZERO
        } else {
            user.total_gain / user.total_invested * Decimal::ONE_HUNDRED
        };
        Self {
            value: user.portfolio_value,
            invested: user.total_invested,
            gain: user.total_gain,
            gain_percent,
            today_change: user.today_change,
            today_change_percent: user.today_change_percent,
            allocation_total: assets.iter().map(|a| a.allocation).sum(),
        }
    }

    pub fn is_gaining(&self) -> bool {
        self.gain >= Decimal::ZERO
    }
}
