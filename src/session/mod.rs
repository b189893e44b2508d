//! Session context: everything one user sees during a run of the app.
//!
//! The controller owns a single `Session` and drives it one command at a
//! time. Onboarding, navigation, the advisor chat and the investment flow
//! all hang off it; `logout` throws the whole thing away.

pub mod nav;

pub use nav::{Stage, Tab, View};

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::advisor::{AdvisorAction, AdvisorContext, ChatMessage, Conversation, RulesEngine};
use crate::catalog::{Catalog, InvestmentProduct};
use crate::error::{Result, SessionError};
use crate::invest::{Confirmation, InvestFlow, InvestStep, Retreat};
use crate::onboarding::{Advance, OnboardingState, OnboardingStep};
use crate::portfolio::{
    Portfolio, PortfolioSummary, TierCarousel, TimeRange, Timeframe, Transaction,
    TransactionKind, TransactionStatus, User, WealthTier, mock_user,
};
use crate::profile::RiskAnswer;

/// One user's in-memory session.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    user_name: String,
    stage: Stage,
    onboarding: OnboardingState,
    user: Option<User>,
    tab: Tab,
    selected_product: Option<String>,
    invest: Option<InvestFlow>,
    catalog: Catalog,
    portfolio: Portfolio,
    conversation: Conversation,
    advisor: RulesEngine,
    last_action: AdvisorAction,
    tiers: TierCarousel,
    range: TimeRange,
    timeframe: Timeframe,
}

impl Session {
    /// Fresh session on the preview screen.
    pub fn new(user_name: impl Into<String>) -> Self {
        Self::with_advisor(user_name, RulesEngine::default_rules())
    }

    pub fn with_advisor(user_name: impl Into<String>, advisor: RulesEngine) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            user_name: user_name.into(),
            stage: Stage::Preview,
            onboarding: OnboardingState::new(),
            user: None,
            tab: Tab::Home,
            selected_product: None,
            invest: None,
            catalog: Catalog::mock(),
            portfolio: Portfolio::mock(),
            conversation: Conversation::new(),
            advisor,
            last_action: AdvisorAction::None,
            tiers: TierCarousel::default(),
            range: TimeRange::default(),
            timeframe: Timeframe::default(),
        };
        debug!(session = %session.id, "Session created");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn onboarding(&self) -> &OnboardingState {
        &self.onboarding
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn invest_flow(&self) -> Option<&InvestFlow> {
        self.invest.as_ref()
    }

    pub fn tier(&self) -> WealthTier {
        self.tiers.current()
    }

    pub fn time_range(&self) -> TimeRange {
        self.range
    }

    /// Window for the new-investor counts on the insights feed.
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn last_action(&self) -> AdvisorAction {
        self.last_action
    }

    pub fn selected_product(&self) -> Option<&InvestmentProduct> {
        self.selected_product
            .as_deref()
            .and_then(|id| self.catalog.get(id).ok())
    }

    /// The screen currently in front of the user.
    pub fn view(&self) -> View {
        match (&self.invest, &self.selected_product) {
            (Some(flow), _) => View::Invest(flow.product().id.clone()),
            (None, Some(id)) => View::ProductDetail(id.clone()),
            (None, None) => View::Tab(self.tab),
        }
    }

    pub fn summary(&self) -> Option<PortfolioSummary> {
        self.user
            .as_ref()
            .map(|u| PortfolioSummary::from_user(u, &self.portfolio.assets))
    }

    fn require(&self, stage: Stage, action: &str) -> std::result::Result<(), SessionError> {
        if self.stage != stage {
            debug!(action, stage = %self.stage, "Action rejected in current stage");
            return Err(SessionError::WrongStage {
                action: action.to_string(),
                stage: self.stage.to_string(),
            });
        }
        Ok(())
    }

    // ── Onboarding ──────────────────────────────────────────────────

    /// Leave the preview screen and begin onboarding.
    pub fn start(&mut self) -> Result<OnboardingStep> {
        self.require(Stage::Preview, "start")?;
        self.stage = Stage::Onboarding;
        info!(session = %self.id, "Onboarding started");
        Ok(self.onboarding.step)
    }

    /// Pick an option (1-based) on the current question.
    pub fn select_answer(&mut self, position: usize) -> Result<RiskAnswer> {
        self.require(Stage::Onboarding, "select")?;
        Ok(self.onboarding.select(position)?)
    }

    /// Advance onboarding. Completing the last question creates the user
    /// with the classified profile and enters the main app.
    pub fn next(&mut self) -> Result<Advance> {
        self.require(Stage::Onboarding, "next")?;
        let advance = self.onboarding.next()?;
        if let Advance::Completed(profile) = advance {
            let user = mock_user(&self.user_name, profile);
            self.tiers = TierCarousel::at(WealthTier::for_invested(user.total_invested));
            self.user = Some(user);
            self.stage = Stage::Main;
            self.tab = Tab::Home;
            info!(session = %self.id, profile = %profile, "Onboarding complete");
        }
        Ok(advance)
    }

    /// Step back within whatever is on screen.
    ///
    /// Onboarding moves one question back, the invest flow moves one step
    /// back (leaving to product detail from the amount step) and product
    /// detail returns to the products list.
    pub fn back(&mut self) -> Result<View> {
        match self.stage {
            Stage::Preview => {
                return Err(SessionError::WrongStage {
                    action: "back".into(),
                    stage: self.stage.to_string(),
                }
                .into());
            }
            Stage::Onboarding => {
                self.onboarding.back();
            }
            Stage::Main => {
                if let Some(flow) = self.invest.as_mut() {
                    if flow.back() == Retreat::Exit {
                        self.invest = None;
                    }
                } else if self.selected_product.take().is_some() {
                    self.tab = Tab::Products;
                }
            }
        }
        Ok(self.view())
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Switch tabs, closing any product detail or investment in progress.
    pub fn open_tab(&mut self, tab: Tab) -> Result<()> {
        self.require(Stage::Main, "tab")?;
        if self.invest.take().is_some() {
            debug!("Investment flow abandoned by navigation");
        }
        self.selected_product = None;
        self.tab = tab;
        Ok(())
    }

    pub fn select_product(&mut self, id: &str) -> Result<&InvestmentProduct> {
        self.require(Stage::Main, "product")?;
        let product = self.catalog.get(id)?;
        self.invest = None;
        self.tab = Tab::Products;
        self.selected_product = Some(product.id.clone());
        Ok(product)
    }

    pub fn set_time_range(&mut self, range: TimeRange) -> Result<()> {
        self.require(Stage::Main, "range")?;
        self.range = range;
        Ok(())
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> Result<()> {
        self.require(Stage::Main, "timeframe")?;
        self.timeframe = timeframe;
        Ok(())
    }

    pub fn next_tier(&mut self) -> Result<WealthTier> {
        self.require(Stage::Main, "tier")?;
        Ok(self.tiers.next())
    }

    pub fn prev_tier(&mut self) -> Result<WealthTier> {
        self.require(Stage::Main, "tier")?;
        Ok(self.tiers.prev())
    }

    // ── Investing ───────────────────────────────────────────────────

    /// Open the investment flow for the selected product.
    pub fn start_investing(&mut self) -> Result<&InvestFlow> {
        self.require(Stage::Main, "invest")?;
        let product = self
            .selected_product()
            .cloned()
            .ok_or(SessionError::NoProductSelected)?;
        info!(product = %product.id, "Investment flow started");
        Ok(self.invest.insert(InvestFlow::new(product)))
    }

    /// Mutable access to the flow for amount changes.
    pub fn invest_flow_mut(&mut self) -> Result<&mut InvestFlow> {
        self.require(Stage::Main, "amount")?;
        Ok(self
            .invest
            .as_mut()
            .ok_or(SessionError::NoActiveInvestment)?)
    }

    /// Press the flow's primary button. Finishing records a processing
    /// transaction and returns to the home tab.
    pub fn confirm_investment(&mut self) -> Result<Confirmation> {
        let confirmation = self.invest_flow_mut()?.confirm()?;
        if let Confirmation::Finished(receipt) = &confirmation {
            self.portfolio.record(Transaction::new(
                TransactionKind::FundPurchase,
                receipt.product_name.clone(),
                "Bought",
                receipt.amount,
                TransactionStatus::Processing,
            ));
            self.invest = None;
            self.selected_product = None;
            self.tab = Tab::Home;
            info!(
                receipt = %receipt.id,
                product = %receipt.product_id,
                amount = %receipt.amount,
                "Investment recorded"
            );
        }
        Ok(confirmation)
    }

    /// Whether the flow is waiting on the success screen.
    pub fn investment_succeeded(&self) -> bool {
        self.invest
            .as_ref()
            .is_some_and(|f| f.step() == InvestStep::Success)
    }

    // ── Advisor ─────────────────────────────────────────────────────

    fn advisor_context(&self) -> AdvisorContext {
        AdvisorContext {
            user_name: self.user.as_ref().map(|u| u.name.clone()),
            risk_profile: self.user.as_ref().map(|u| u.risk_profile),
            portfolio_value: self
                .user
                .as_ref()
                .map(|u| u.portfolio_value)
                .unwrap_or_default(),
        }
    }

    /// Open the chat, greeting the user on first use.
    pub fn open_chat(&mut self) -> Result<&ChatMessage> {
        self.require(Stage::Main, "chat")?;
        let name = self.user.as_ref().map(|u| u.name.clone());
        Ok(self.conversation.open(name.as_deref()))
    }

    /// Ask the advisor. Blank questions are ignored.
    pub fn ask(&mut self, text: &str) -> Result<Option<&ChatMessage>> {
        self.require(Stage::Main, "ask")?;
        let ctx = self.advisor_context();
        let reply = self.conversation.ask(&self.advisor, &ctx, text);
        if let Some(message) = &reply {
            self.last_action = message.action;
        }
        Ok(reply)
    }

    /// Press the action button of the last advisor reply.
    pub fn follow_advisor_action(&mut self) -> Result<Option<Tab>> {
        self.require(Stage::Main, "go")?;
        let Some(tab) = Tab::for_action(self.last_action) else {
            return Ok(None);
        };
        self.open_tab(tab)?;
        self.last_action = AdvisorAction::None;
        Ok(Some(tab))
    }

    // ── Logout ──────────────────────────────────────────────────────

    /// Drop all session state and return to the preview screen.
    pub fn logout(&mut self) {
        info!(session = %self.id, "Logged out");
        let advisor = std::mem::replace(&mut self.advisor, RulesEngine::empty());
        *self = Self::with_advisor(std::mem::take(&mut self.user_name), advisor);
    }

    /// Serializable snapshot for debugging.
    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            id: self.id,
            stage: self.stage,
            onboarding_step: self.onboarding.step,
            user: self.user.as_ref(),
            view: self.view(),
            invest: self.invest.as_ref(),
            tier: self.tiers.current(),
            time_range: self.range,
            timeframe: self.timeframe,
            last_action: self.last_action,
            chat_messages: self.conversation.messages().len(),
            transactions: &self.portfolio.transactions,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new("Ahmed")
    }
}

/// Read-only view of a session for the `/state` dump.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub id: Uuid,
    pub stage: Stage,
    pub onboarding_step: OnboardingStep,
    pub user: Option<&'a User>,
    pub view: View,
    pub invest: Option<&'a InvestFlow>,
    pub tier: WealthTier,
    pub time_range: TimeRange,
    pub timeframe: Timeframe,
    pub last_action: AdvisorAction,
    pub chat_messages: usize,
    pub transactions: &'a [Transaction],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, InvestError, OnboardingError};
    use crate::profile::RiskProfile;
    use rust_decimal_macros::dec;

    fn onboarded(answers: [usize; 3]) -> Session {
        let mut s = Session::new("Ahmed");
        s.start().unwrap();
        s.next().unwrap();
        for a in answers {
            s.select_answer(a).unwrap();
            s.next().unwrap();
        }
        s
    }

    #[test]
    fn starts_in_preview() {
        let s = Session::new("Ahmed");
        assert_eq!(s.stage(), Stage::Preview);
        assert!(s.user().is_none());
        assert_eq!(s.onboarding().step, OnboardingStep::Welcome);
        assert_eq!(s.time_range(), TimeRange::OneYear);
    }

    #[test]
    fn actions_outside_stage_are_rejected() {
        let mut s = Session::new("Ahmed");
        assert!(matches!(
            s.open_tab(Tab::Portfolio),
            Err(Error::Session(SessionError::WrongStage { .. }))
        ));
        s.start().unwrap();
        assert!(matches!(s.start(), Err(Error::Session(_))));
    }

    #[test]
    fn back_on_preview_is_rejected() {
        let mut s = Session::new("Ahmed");
        let err = s.back().unwrap_err();
        assert!(matches!(
            &err,
            Error::Session(SessionError::WrongStage { action, stage })
                if action == "back" && stage == "preview"
        ));
        assert_eq!(s.stage(), Stage::Preview);
    }

    #[test]
    fn onboarding_creates_user_with_profile() {
        let s = onboarded([3, 3, 2]);
        assert_eq!(s.stage(), Stage::Main);
        assert_eq!(s.view(), View::Tab(Tab::Home));
        let user = s.user().unwrap();
        assert_eq!(user.name, "Ahmed");
        assert_eq!(user.risk_profile, RiskProfile::Growth);
        assert_eq!(s.tier(), WealthTier::Asas);
    }

    #[test]
    fn next_without_answer_is_rejected() {
        let mut s = Session::new("Ahmed");
        s.start().unwrap();
        s.next().unwrap();
        assert!(matches!(
            s.next(),
            Err(Error::Onboarding(OnboardingError::NoAnswerSelected { question: 1 }))
        ));
    }

    #[test]
    fn product_detail_and_back() {
        let mut s = onboarded([1, 1, 1]);
        s.select_product("2").unwrap();
        assert_eq!(s.view(), View::ProductDetail("2".into()));
        assert_eq!(s.back().unwrap(), View::Tab(Tab::Products));
        assert!(matches!(
            s.select_product("42"),
            Err(Error::Catalog(_))
        ));
    }

    #[test]
    fn invest_requires_selected_product() {
        let mut s = onboarded([2, 2, 2]);
        assert!(matches!(
            s.start_investing(),
            Err(Error::Session(SessionError::NoProductSelected))
        ));
        assert!(matches!(
            s.confirm_investment(),
            Err(Error::Session(SessionError::NoActiveInvestment))
        ));
    }

    #[test]
    fn completing_investment_records_transaction_and_goes_home() {
        let mut s = onboarded([2, 2, 2]);
        let before = s.portfolio().transactions.len();
        s.select_product("1").unwrap();
        s.start_investing().unwrap();
        s.invest_flow_mut().unwrap().set_preset(2).unwrap();
        s.confirm_investment().unwrap();
        s.confirm_investment().unwrap();
        assert!(s.investment_succeeded());
        let Confirmation::Finished(receipt) = s.confirm_investment().unwrap() else {
            panic!("expected receipt");
        };
        assert_eq!(receipt.amount, dec!(2500));
        assert_eq!(s.view(), View::Tab(Tab::Home));
        assert_eq!(s.portfolio().transactions.len(), before + 1);
        let latest = s.portfolio().recent_transactions(1).next().unwrap();
        assert_eq!(latest.title, "Capital Shield Fund");
        assert_eq!(latest.status, TransactionStatus::Processing);
    }

    #[test]
    fn back_from_amount_returns_to_product_detail() {
        let mut s = onboarded([2, 2, 2]);
        s.select_product("3").unwrap();
        s.start_investing().unwrap();
        assert_eq!(s.view(), View::Invest("3".into()));
        assert_eq!(s.back().unwrap(), View::ProductDetail("3".into()));
    }

    #[test]
    fn preset_below_minimum_surfaces_invest_error() {
        let mut s = onboarded([2, 2, 2]);
        s.select_product("4").unwrap();
        s.start_investing().unwrap();
        let err = s.invest_flow_mut().unwrap().set_preset(1).unwrap_err();
        assert!(matches!(err, InvestError::BelowMinimum { .. }));
    }

    #[test]
    fn advisor_action_navigates() {
        let mut s = onboarded([1, 1, 2]);
        let reply = s.ask("How should I diversify?").unwrap().unwrap();
        // "should i" wins over "diversify".
        assert_eq!(reply.action, AdvisorAction::Invest);
        assert_eq!(s.follow_advisor_action().unwrap(), Some(Tab::Products));
        assert_eq!(s.view(), View::Tab(Tab::Products));
        assert_eq!(s.follow_advisor_action().unwrap(), None);
    }

    #[test]
    fn recommendation_uses_onboarded_profile() {
        let mut s = onboarded([1, 1, 2]);
        let reply = s.ask("What's the best fund for me?").unwrap().unwrap();
        assert!(reply.content.contains("Capital Shield Fund"));
        // Welcome, question and reply.
        assert_eq!(s.conversation().messages().len(), 3);
    }

    #[test]
    fn logout_resets_everything() {
        let mut s = onboarded([3, 3, 3]);
        let id = s.id();
        s.ask("market outlook").unwrap();
        s.select_product("1").unwrap();
        s.logout();
        assert_eq!(s.stage(), Stage::Preview);
        assert!(s.user().is_none());
        assert!(s.conversation().is_empty());
        assert_eq!(s.onboarding().step, OnboardingStep::Welcome);
        assert_eq!(s.onboarding().selected(1), None);
        assert_ne!(s.id(), id);
        // The advisor still works after a fresh onboarding.
        s.start().unwrap();
        s.next().unwrap();
        for _ in 0..3 {
            s.select_answer(2).unwrap();
            s.next().unwrap();
        }
        assert_eq!(s.ask("market").unwrap().unwrap().action, AdvisorAction::Learn);
    }

    #[test]
    fn feed_timeframe_is_session_scoped() {
        let mut fresh = Session::new("Ahmed");
        assert!(matches!(
            fresh.set_timeframe(Timeframe::Week),
            Err(Error::Session(SessionError::WrongStage { .. }))
        ));

        let mut s = onboarded([1, 2, 3]);
        assert_eq!(s.timeframe(), Timeframe::Month);
        s.set_timeframe(Timeframe::Year).unwrap();
        assert_eq!(s.timeframe(), Timeframe::Year);
        assert_eq!(serde_json::to_value(s.snapshot()).unwrap()["timeframe"], "year");
        s.logout();
        assert_eq!(s.timeframe(), Timeframe::Month);
    }

    #[test]
    fn snapshot_serializes() {
        let s = onboarded([2, 2, 2]);
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(json["stage"], "main");
        assert_eq!(json["view"]["view"], "tab");
        assert_eq!(json["user"]["risk_profile"], "balanced");
    }
}
