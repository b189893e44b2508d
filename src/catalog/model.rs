//! Product data model: funds, their kinds and risk levels.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::{format_compact_currency, format_currency, format_range};

/// What a fund invests in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductKind {
    MoneyMarket,
    FixedIncome,
    Equity,
}

impl ProductKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MoneyMarket => "Money Market",
            Self::FixedIncome => "Fixed Income",
            Self::Equity => "Equity",
        }
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MoneyMarket => write!(f, "money-market"),
            Self::FixedIncome => write!(f, "fixed-income"),
            Self::Equity => write!(f, "equity"),
        }
    }
}

impl std::str::FromStr for ProductKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "money-market" => Ok(Self::MoneyMarket),
            "fixed-income" => Ok(Self::FixedIncome),
            "equity" => Ok(Self::Equity),
            _ => Err(format!("Unknown product kind: {}", s)),
        }
    }
}

/// Coarse risk rating of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Expected annual return band, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl std::fmt::Display for ReturnRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_range(self.min, self.max))
    }
}

/// An investable fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentProduct {
    pub id: String,
    pub name: String,
    pub kind: ProductKind,
    pub risk_level: RiskLevel,
    pub expected_return: ReturnRange,
    pub minimum_investment: Decimal,
    pub description: String,
    pub suitable_for: String,
    /// Assets under management.
    pub aum: Decimal,
    /// Annual management fee, in percent.
    pub fee: Decimal,
}

impl InvestmentProduct {
    /// One-line listing entry.
    pub fn summary_line(&self) -> String {
        format!(
            "[{}] {} ({}, {} risk) | return {} | min {} | AUM {}",
            self.id,
            self.name,
            self.kind.label(),
            self.risk_level,
            self.expected_return,
            format_currency(self.minimum_investment),
            format_compact_currency(self.aum),
        )
    }

    pub fn fee_disclosure(&self) -> String {
        format!(
            "We charge a simple {}% annual management fee, calculated daily on your investment value. \
No hidden charges, no entry or exit fees. Your returns are shown after fees are deducted.",
            self.fee.normalize()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn kind_display_matches_serde() {
        for kind in [
            ProductKind::MoneyMarket,
            ProductKind::FixedIncome,
            ProductKind::Equity,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(format!("\"{kind}\""), json);
            assert_eq!(kind.to_string().parse::<ProductKind>().unwrap(), kind);
        }
    }

    #[test]
    fn risk_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn fee_disclosure_uses_plain_percentage() {
        let product = InvestmentProduct {
            id: "x".into(),
            name: "Test Fund".into(),
            kind: ProductKind::Equity,
            risk_level: RiskLevel::High,
            expected_return: ReturnRange {
                min: dec!(8),
                max: dec!(22),
            },
            minimum_investment: dec!(2500),
            description: String::new(),
            suitable_for: String::new(),
            aum: dec!(280000000),
            fee: dec!(1.00),
        };
        assert!(product.fee_disclosure().starts_with("We charge a simple 1% annual"));
        let line = product.summary_line();
        assert!(line.contains("8-22%"));
        assert!(line.contains("2,500 EGP"));
        assert!(line.contains("280.0M EGP"));
    }
}
