//! Three-step investment wizard: choose an amount, review, done.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::InvestmentProduct;
use crate::error::InvestError;

/// Amount added or removed by the +/- buttons.
pub const STEP: Decimal = dec!(500);

/// Quick-pick amounts on the amount screen.
pub const PRESET_AMOUNTS: [Decimal; 4] = [dec!(1000), dec!(2500), dec!(5000), dec!(10000)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestStep {
    Amount,
    Review,
    Success,
}

impl InvestStep {
    pub const COUNT: usize = 3;

    /// 1-based position for the progress bar.
    pub fn number(&self) -> usize {
        match self {
            Self::Amount => 1,
            Self::Review => 2,
            Self::Success => 3,
        }
    }

    /// Label of the primary button on this step.
    pub fn button(&self) -> &'static str {
        match self {
            Self::Amount => "Continue",
            Self::Review => "Confirm Investment",
            Self::Success => "Back to Home",
        }
    }
}

impl std::fmt::Display for InvestStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Amount => write!(f, "amount"),
            Self::Review => write!(f, "review"),
            Self::Success => write!(f, "success"),
        }
    }
}

/// Record of a (simulated) investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentReceipt {
    pub id: Uuid,
    pub product_id: String,
    pub product_name: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Result of pressing the primary button.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    /// Moved on to another step.
    Step(InvestStep),
    /// The flow is done; nothing was actually executed.
    Finished(InvestmentReceipt),
}

/// Result of pressing back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    Step(InvestStep),
    /// Back from the amount step leaves the flow.
    Exit,
}

/// Wizard state for investing in one product.
#[derive(Debug, Clone, Serialize)]
pub struct InvestFlow {
    product: InvestmentProduct,
    step: InvestStep,
    amount: Decimal,
    finished: bool,
}

impl InvestFlow {
    /// Open the flow on the amount step at the product minimum.
    pub fn new(product: InvestmentProduct) -> Self {
        let amount = product.minimum_investment;
        debug!(product = %product.id, %amount, "Investment flow opened");
        Self {
            product,
            step: InvestStep::Amount,
            amount,
            finished: false,
        }
    }

    pub fn product(&self) -> &InvestmentProduct {
        &self.product
    }

    pub fn step(&self) -> InvestStep {
        self.step
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn minimum(&self) -> Decimal {
        self.product.minimum_investment
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the minus button is enabled.
    pub fn can_decrement(&self) -> bool {
        self.amount > self.minimum()
    }

    /// Index (1-based) of the preset matching the current amount, if any.
    pub fn active_preset(&self) -> Option<usize> {
        PRESET_AMOUNTS
            .iter()
            .position(|p| *p == self.amount)
            .map(|i| i + 1)
    }

    pub fn increment(&mut self) -> Result<Decimal, InvestError> {
        self.ensure_editable()?;
        self.amount = self
            .amount
            .checked_add(STEP)
            .ok_or(InvestError::AmountTooLarge(self.amount))?;
        Ok(self.amount)
    }

    /// Subtract one step, clamped at the product minimum.
    pub fn decrement(&mut self) -> Result<Decimal, InvestError> {
        self.ensure_editable()?;
        if self.can_decrement() {
            self.amount = (self.amount - STEP).max(self.minimum());
        }
        Ok(self.amount)
    }

    /// Pick a preset by its 1-based position.
    pub fn set_preset(&mut self, index: usize) -> Result<Decimal, InvestError> {
        let preset = index
            .checked_sub(1)
            .and_then(|i| PRESET_AMOUNTS.get(i))
            .copied()
            .ok_or(InvestError::UnknownPreset {
                index,
                available: PRESET_AMOUNTS.len(),
            })?;
        self.set_amount(preset)
    }

    /// Enter an amount directly.
    pub fn set_amount(&mut self, amount: Decimal) -> Result<Decimal, InvestError> {
        self.ensure_editable()?;
        if amount <= Decimal::ZERO {
            return Err(InvestError::NonPositive(amount));
        }
        if amount < self.minimum() {
            return Err(InvestError::BelowMinimum {
                amount,
                minimum: self.minimum(),
            });
        }
        self.amount = amount;
        Ok(self.amount)
    }

    fn ensure_editable(&self) -> Result<(), InvestError> {
        if self.finished {
            return Err(InvestError::Finished);
        }
        if self.step != InvestStep::Amount {
            return Err(InvestError::AmountLocked);
        }
        Ok(())
    }

    /// Press the primary button.
    pub fn confirm(&mut self) -> Result<Confirmation, InvestError> {
        if self.finished {
            return Err(InvestError::Finished);
        }
        match self.step {
            InvestStep::Amount => {
                self.step = InvestStep::Review;
                Ok(Confirmation::Step(self.step))
            }
            InvestStep::Review => {
                self.step = InvestStep::Success;
                info!(product = %self.product.id, amount = %self.amount, "Investment confirmed");
                Ok(Confirmation::Step(self.step))
            }
            InvestStep::Success => {
                self.finished = true;
                Ok(Confirmation::Finished(InvestmentReceipt {
                    id: Uuid::new_v4(),
                    product_id: self.product.id.clone(),
                    product_name: self.product.name.clone(),
                    amount: self.amount,
                    created_at: Utc::now(),
                }))
            }
        }
    }

    /// Press back. Leaving from the amount step exits the flow.
    pub fn back(&mut self) -> Retreat {
        match self.step {
            InvestStep::Amount => Retreat::Exit,
            InvestStep::Review => {
                self.step = InvestStep::Amount;
                Retreat::Step(self.step)
            }
            InvestStep::Success => {
                self.step = InvestStep::Review;
                Retreat::Step(self.step)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn flow(id: &str) -> InvestFlow {
        InvestFlow::new(Catalog::mock().get(id).unwrap().clone())
    }

    #[test]
    fn starts_at_minimum() {
        let f = flow("4");
        assert_eq!(f.step(), InvestStep::Amount);
        assert_eq!(f.amount(), dec!(2500));
        assert!(!f.can_decrement());
        assert_eq!(f.active_preset(), Some(2));
    }

    #[test]
    fn increment_and_decrement_by_step() {
        let mut f = flow("1");
        assert_eq!(f.increment().unwrap(), dec!(1000));
        assert_eq!(f.increment().unwrap(), dec!(1500));
        assert_eq!(f.decrement().unwrap(), dec!(1000));
        assert_eq!(f.decrement().unwrap(), dec!(500));
        assert_eq!(f.decrement().unwrap(), dec!(500));
    }

    #[test]
    fn decrement_clamps_at_minimum() {
        let mut f = flow("2");
        f.set_amount(dec!(1200)).unwrap();
        assert_eq!(f.decrement().unwrap(), dec!(1000));
    }

    #[test]
    fn preset_below_minimum_is_rejected() {
        let mut f = flow("4");
        assert_eq!(
            f.set_preset(1).unwrap_err(),
            InvestError::BelowMinimum {
                amount: dec!(1000),
                minimum: dec!(2500)
            }
        );
        assert_eq!(f.amount(), dec!(2500));
        assert_eq!(f.set_preset(4).unwrap(), dec!(10000));
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let mut f = flow("1");
        assert!(matches!(
            f.set_preset(0),
            Err(InvestError::UnknownPreset { index: 0, .. })
        ));
        assert!(matches!(
            f.set_preset(5),
            Err(InvestError::UnknownPreset { index: 5, .. })
        ));
    }

    #[test]
    fn free_entry_validation() {
        let mut f = flow("2");
        assert_eq!(
            f.set_amount(dec!(0)).unwrap_err(),
            InvestError::NonPositive(dec!(0))
        );
        assert!(matches!(
            f.set_amount(dec!(999)),
            Err(InvestError::BelowMinimum { .. })
        ));
        assert_eq!(f.set_amount(dec!(7250)).unwrap(), dec!(7250));
    }

    #[test]
    fn increment_at_decimal_limit_is_an_error() {
        let mut f = flow("1");
        f.set_amount(Decimal::MAX).unwrap();
        assert_eq!(
            f.increment().unwrap_err(),
            InvestError::AmountTooLarge(Decimal::MAX)
        );
        assert_eq!(f.amount(), Decimal::MAX);
        assert_eq!(f.decrement().unwrap(), Decimal::MAX - STEP);
    }

    #[test]
    fn amount_locked_after_amount_step() {
        let mut f = flow("1");
        f.confirm().unwrap();
        assert_eq!(f.increment().unwrap_err(), InvestError::AmountLocked);
    }

    #[test]
    fn full_walk_produces_receipt() {
        let mut f = flow("3");
        f.set_preset(3).unwrap();
        assert_eq!(f.confirm().unwrap(), Confirmation::Step(InvestStep::Review));
        assert_eq!(f.confirm().unwrap(), Confirmation::Step(InvestStep::Success));
        let Confirmation::Finished(receipt) = f.confirm().unwrap() else {
            panic!("expected a receipt");
        };
        assert_eq!(receipt.product_name, "Egypt Growth Equity Fund");
        assert_eq!(receipt.amount, dec!(5000));
        assert!(f.is_finished());
        assert_eq!(f.confirm().unwrap_err(), InvestError::Finished);
    }

    #[test]
    fn back_walks_toward_exit() {
        let mut f = flow("1");
        f.confirm().unwrap();
        f.confirm().unwrap();
        assert_eq!(f.back(), Retreat::Step(InvestStep::Review));
        assert_eq!(f.back(), Retreat::Step(InvestStep::Amount));
        assert_eq!(f.back(), Retreat::Exit);
    }
}
