//! Wealth tiers: service levels unlocked by total invested capital.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Upper bound (inclusive) of the Asas tier.
pub const ASAS_LIMIT: Decimal = dec!(250000);
/// Upper bound (inclusive) of the Tamayoz tier.
pub const TAMAYOZ_LIMIT: Decimal = dec!(2000000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WealthTier {
    Asas,
    Tamayoz,
    Nokhba,
}

/// One line of a tier's benefit list.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Benefit {
    pub title: &'static str,
    pub description: &'static str,
    pub available: bool,
}

const fn benefit(title: &'static str, description: &'static str, available: bool) -> Benefit {
    Benefit {
        title,
        description,
        available,
    }
}

impl WealthTier {
    pub const ALL: [WealthTier; 3] = [Self::Asas, Self::Tamayoz, Self::Nokhba];

    /// Tier for a given amount of invested capital.
    pub fn for_invested(invested: Decimal) -> Self {
        if invested <= ASAS_LIMIT {
            Self::Asas
        } else if invested <= TAMAYOZ_LIMIT {
            Self::Tamayoz
        } else {
            Self::Nokhba
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Asas => "Asas Plan",
            Self::Tamayoz => "Tamayoz",
            Self::Nokhba => "Nokhba",
        }
    }

    pub fn arabic_name(&self) -> &'static str {
        match self {
            Self::Asas => "أساس",
            Self::Tamayoz => "مميز",
            Self::Nokhba => "نخبة",
        }
    }

    pub fn level(&self) -> &'static str {
        match self {
            Self::Asas => "Foundation",
            Self::Tamayoz => "Premium",
            Self::Nokhba => "Private",
        }
    }

    pub fn range(&self) -> &'static str {
        match self {
            Self::Asas => "Up to 250,000 EGP invested",
            Self::Tamayoz => "From 250,000 to 2,000,000 EGP invested",
            Self::Nokhba => "Above 2,000,000 EGP invested",
        }
    }

    pub fn benefits(&self) -> &'static [Benefit] {
        const ASAS: &[Benefit] = &[
            benefit(
                "Guided investment advice",
                "Aligned to your financial goals & risk level",
                true,
            ),
            benefit(
                "Local client support",
                "Responsive, in-country account assistance",
                true,
            ),
            benefit(
                "Digital portfolio monitoring",
                "Track your investments & performance via the app",
                true,
            ),
            benefit(
                "Access to dedicated wealth advisor",
                "Available in higher tiers",
                false,
            ),
        ];
        const TAMAYOZ: &[Benefit] = &[
            benefit(
                "Guided investment advice",
                "Portfolios aligned to your goals, risk profile, and investment horizon",
                true,
            ),
            benefit(
                "Local client support",
                "Priority access to in-country support for your account needs",
                true,
            ),
            benefit(
                "Access to investment specialists",
                "Expert guidance to support key investment decisions",
                true,
            ),
            benefit(
                "Quarterly portfolio review",
                "A structured review of your portfolio performance and positioning",
                true,
            ),
            benefit(
                "Dedicated Wealth Manager",
                "Available in the Private tier",
                false,
            ),
        ];
        const NOKHBA: &[Benefit] = &[
            benefit(
                "Personalized investment advice",
                "Tailored portfolio strategy aligned to your long-term objectives and preferences",
                true,
            ),
            benefit(
                "Dedicated Wealth Manager",
                "A single point of contact providing ongoing, tailored guidance",
                true,
            ),
            benefit(
                "Priority client support",
                "Fast-track support for all account and service needs",
                true,
            ),
            benefit(
                "Quarterly portfolio review & strategy check-in",
                "In-depth reviews to assess performance, risk, and positioning",
                true,
            ),
            benefit(
                "One complimentary advisory session per year",
                "A dedicated session to support complex financial or investment decisions",
                true,
            ),
        ];
        match self {
            Self::Asas => ASAS,
            Self::Tamayoz => TAMAYOZ,
            Self::Nokhba => NOKHBA,
        }
    }
}

/// Browsing position in the tier carousel; wraps in both directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCarousel {
    index: usize,
}

impl TierCarousel {
    /// Start the carousel on a specific tier.
    pub fn at(tier: WealthTier) -> Self {
        let index = WealthTier::ALL
            .iter()
            .position(|t| *t == tier)
            .unwrap_or_default();
        Self { index }
    }

    pub fn current(&self) -> WealthTier {
        WealthTier::ALL[self.index]
    }

    pub fn next(&mut self) -> WealthTier {
        self.index = (self.index + 1) % WealthTier::ALL.len();
        self.current()
    }

    pub fn prev(&mut self) -> WealthTier {
        let len = WealthTier::ALL.len();
        self.index = (self.index + len - 1) % len;
        self.current()
    }
}
