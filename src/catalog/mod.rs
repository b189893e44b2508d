//! Product catalog: the fixed list of funds offered in the app.

pub mod model;

pub use model::{InvestmentProduct, ProductKind, ReturnRange, RiskLevel};

use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::CatalogError;
use crate::profile::RiskProfile;

/// In-memory product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<InvestmentProduct>,
}

impl Catalog {
    pub fn new(products: Vec<InvestmentProduct>) -> Self {
        Self { products }
    }

    /// The four funds shipped with the prototype.
    pub fn mock() -> Self {
        Self::new(vec![
            InvestmentProduct {
                id: "1".into(),
                name: "Capital Shield Fund".into(),
                kind: ProductKind::MoneyMarket,
                risk_level: RiskLevel::Low,
                expected_return: ReturnRange {
                    min: dec!(20),
                    max: dec!(24),
                },
                minimum_investment: dec!(500),
                description: "A safe haven for your savings. This fund invests in short-term government \
securities and bank deposits, offering stable returns with minimal risk."
                    .into(),
                suitable_for: "Those who want to protect their capital while earning returns above \
traditional savings accounts."
                    .into(),
                aum: dec!(850000000),
                fee: dec!(0.5),
            },
            InvestmentProduct {
                id: "2".into(),
                name: "Steady Growth Bond Fund".into(),
                kind: ProductKind::FixedIncome,
                risk_level: RiskLevel::Medium,
                expected_return: ReturnRange {
                    min: dec!(16),
                    max: dec!(20),
                },
                minimum_investment: dec!(1000),
                description: "Build wealth steadily with government and corporate bonds. This fund \
provides regular income through interest payments while preserving your capital."
                    .into(),
                suitable_for: "Investors seeking regular income with moderate risk tolerance.".into(),
                aum: dec!(620000000),
                fee: dec!(0.75),
            },
            InvestmentProduct {
                id: "3".into(),
                name: "Egypt Growth Equity Fund".into(),
                kind: ProductKind::Equity,
                risk_level: RiskLevel::High,
                expected_return: ReturnRange {
                    min: dec!(10),
                    max: dec!(25),
                },
                minimum_investment: dec!(1000),
                description: "Participate in Egypt's economic growth by investing in the top companies \
listed on the Egyptian Exchange (EGX)."
                    .into(),
                suitable_for: "Long-term investors comfortable with market fluctuations seeking higher \
potential returns."
                    .into(),
                aum: dec!(420000000),
                fee: dec!(1.0),
            },
            InvestmentProduct {
                id: "4".into(),
                name: "Regional Opportunities Fund".into(),
                kind: ProductKind::Equity,
                risk_level: RiskLevel::High,
                expected_return: ReturnRange {
                    min: dec!(8),
                    max: dec!(22),
                },
                minimum_investment: dec!(2500),
                description: "Diversify across the MENA region with exposure to leading companies in \
UAE, Saudi Arabia, and Egypt."
                    .into(),
                suitable_for: "Experienced investors seeking regional diversification and growth \
opportunities."
                    .into(),
                aum: dec!(280000000),
                fee: dec!(1.25),
            },
        ])
    }

    pub fn list(&self) -> &[InvestmentProduct] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Result<&InvestmentProduct, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }

    pub fn find_by_name(&self, name: &str) -> Option<&InvestmentProduct> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn by_kind(&self, kind: ProductKind) -> impl Iterator<Item = &InvestmentProduct> {
        self.products.iter().filter(move |p| p.kind == kind)
    }

    /// The single fund the advisor points a profile at.
    pub fn recommend_for(&self, profile: RiskProfile) -> Option<&InvestmentProduct> {
        let kind = match profile {
            RiskProfile::Conservative => ProductKind::MoneyMarket,
            RiskProfile::Balanced => ProductKind::FixedIncome,
            RiskProfile::Growth => ProductKind::Equity,
        };
        let pick = self.by_kind(kind).next();
        debug!(profile = %profile, product = ?pick.map(|p| &p.id), "Recommended product");
        pick
    }

    /// Funds whose risk level fits a profile.
    pub fn suitable_for(&self, profile: RiskProfile) -> Vec<&InvestmentProduct> {
        let ceiling = max_risk_for(profile);
        self.products
            .iter()
            .filter(|p| p.risk_level <= ceiling)
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::mock()
    }
}

/// Highest product risk level that suits a profile.
pub fn max_risk_for(profile: RiskProfile) -> RiskLevel {
    match profile {
        RiskProfile::Conservative => RiskLevel::Low,
        RiskProfile::Balanced => RiskLevel::Medium,
        RiskProfile::Growth => RiskLevel::High,
    }
}
