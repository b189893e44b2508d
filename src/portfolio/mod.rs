//! Portfolio dashboards: the mock user, holdings, performance history,
//! recent activity, the public insights feed and the advisory team.

pub mod feed;
pub mod model;
pub mod tiers;

pub use feed::{
    COMMUNITY_STATS, CommunityStats, Engagement, InsightPost, InvestorCounts, PostKind,
    TRENDING_TAGS, Timeframe,
};
pub use model::{
    Asset, PerformancePoint, PortfolioSummary, TimeRange, Transaction, TransactionKind,
    TransactionStatus, User,
};
pub use tiers::{Benefit, TierCarousel, WealthTier};

use rust_decimal_macros::dec;
use serde::Serialize;

use crate::catalog::ProductKind;
use crate::profile::RiskProfile;

/// Dashboard data owned by one session.
#[derive(Debug, Clone, Serialize)]
pub struct Portfolio {
    pub assets: Vec<Asset>,
    pub performance: Vec<PerformancePoint>,
    pub transactions: Vec<Transaction>,
    pub feed: Vec<InsightPost>,
}

impl Portfolio {
    pub fn mock() -> Self {
        Self {
            assets: mock_assets(),
            performance: mock_performance(),
            transactions: mock_transactions(),
            feed: feed::mock_feed(),
        }
    }

    /// Trailing window of the performance history.
    pub fn performance_in(&self, range: TimeRange) -> &[PerformancePoint] {
        match range.points() {
            Some(n) if n < self.performance.len() => {
                &self.performance[self.performance.len() - n..]
            }
            _ => &self.performance,
        }
    }

    /// Most recent transactions first.
    pub fn recent_transactions(&self, limit: usize) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev().take(limit)
    }

    pub fn record(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::mock()
    }
}

/// The demo user, carrying the profile derived during onboarding.
pub fn mock_user(name: &str, risk_profile: RiskProfile) -> User {
    User {
        id: "1".into(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "+20 100 123 4567".into(),
        risk_profile,
        portfolio_value: dec!(125750),
        total_invested: dec!(115000),
        total_gain: dec!(10750),
        today_change: dec!(325),
        today_change_percent: dec!(0.26),
    }
}

fn mock_assets() -> Vec<Asset> {
    vec![
        Asset {
            id: "1".into(),
            name: "Money Market Fund".into(),
            kind: ProductKind::MoneyMarket,
            value: dec!(37725),
            allocation: dec!(30),
            return_rate: dec!(22.5),
        },
        Asset {
            id: "2".into(),
            name: "Fixed Income Fund".into(),
            kind: ProductKind::FixedIncome,
            value: dec!(50300),
            allocation: dec!(40),
            return_rate: dec!(18.2),
        },
        Asset {
            id: "3".into(),
            name: "EGX Equity Fund".into(),
            kind: ProductKind::Equity,
            value: dec!(37725),
            allocation: dec!(30),
            return_rate: dec!(12.8),
        },
    ]
}

fn mock_performance() -> Vec<PerformancePoint> {
    [
        ("Jul", dec!(100000)),
        ("Aug", dec!(102500)),
        ("Sep", dec!(105200)),
        ("Oct", dec!(108900)),
        ("Nov", dec!(115000)),
        ("Dec", dec!(118200)),
        ("Jan", dec!(125750)),
    ]
    .into_iter()
    .map(|(month, value)| PerformancePoint {
        month: month.to_string(),
        value,
    })
    .collect()
}

fn mock_transactions() -> Vec<Transaction> {
    // Oldest first; the dashboard lists them newest first.
    vec![
        Transaction::new(
            TransactionKind::Bond,
            "Egyptian Treasury Bond 14.93%",
            "December 24",
            dec!(180),
            TransactionStatus::Completed,
        )
        .with_percentage(dec!(0.36)),
        Transaction::new(
            TransactionKind::Equity,
            "MF Prime Equity Fund",
            "December 24",
            dec!(375),
            TransactionStatus::Completed,
        )
        .with_percentage(dec!(0.50)),
        Transaction::new(
            TransactionKind::FundPurchase,
            "MF CIB Money Market Fund",
            "Bought",
            dec!(120),
            TransactionStatus::Processing,
        ),
        Transaction::new(
            TransactionKind::Portfolio,
            "Actively Managed Portfolio",
            "December 24, 10:12 AM",
            dec!(550),
            TransactionStatus::Completed,
        )
        .with_percentage(dec!(0.22)),
    ]
}

/// A member of the human advisory team.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Advisor {
    pub name: &'static str,
    pub title: &'static str,
    pub experience: &'static str,
}

pub const ADVISORS: [Advisor; 3] = [
    Advisor {
        name: "Rana",
        title: "Senior Investment Advisor",
        experience: "10+ years of banking experience delivering tailored wealth management and \
investment solutions to individual and high net-worth clients",
    },
    Advisor {
        name: "Mohamed",
        title: "Wealth Management Advisor",
        experience: "15+ years of experience serving VIP clients, specializing in portfolio \
construction, long-term wealth growth and personalized investment strategies",
    },
    Advisor {
        name: "Ingy",
        title: "Principal Wealth Advisor",
        experience: "20+ years of leadership experience, including serving as Deputy General \
Manager for International Banking & Wealth Management at Banque Misr",
    },
];

pub const CONTACT_EMAIL: &str = "hello@masar.com";
pub const CONTACT_HOURS: &str = "Available from Monday to Friday (9:00 - 18:00)";
