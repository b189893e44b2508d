//! Keyword rules engine for the scripted advisor.
//!
//! Rules are evaluated in order and the first match wins. Matching is a
//! case-insensitive substring test, so "investment" triggers the `invest`
//! keyword. When nothing matches, a fallback reply echoes the question.

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::format::format_currency;
use crate::profile::RiskProfile;

/// Follow-up a reply offers, rendered as a button under the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorAction {
    Invest,
    Rebalance,
    Learn,
    None,
}

impl AdvisorAction {
    /// Button label, if the action shows a button.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Invest => Some("Start Investing"),
            Self::Rebalance => Some("View Portfolio"),
            Self::Learn => Some("Learn More"),
            Self::None => None,
        }
    }
}

impl std::fmt::Display for AdvisorAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invest => write!(f, "invest"),
            Self::Rebalance => write!(f, "rebalance"),
            Self::Learn => write!(f, "learn"),
            Self::None => write!(f, "none"),
        }
    }
}

/// What the advisor knows about the user when composing a reply.
#[derive(Debug, Clone)]
pub struct AdvisorContext {
    pub user_name: Option<String>,
    pub risk_profile: Option<RiskProfile>,
    pub portfolio_value: Decimal,
}

impl AdvisorContext {
    fn profile(&self) -> RiskProfile {
        self.risk_profile.unwrap_or_default()
    }
}

/// Builds reply text from the context and the raw user message.
pub type ReplyFn = fn(&AdvisorContext, &str) -> String;

/// A composed advisor reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorReply {
    /// Name of the rule that produced the reply, or `"fallback"`.
    pub rule: String,
    pub content: String,
    pub suggestions: Vec<String>,
    pub action: AdvisorAction,
}

/// A single keyword rule with a compiled regex.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    /// Short rule identifier for logs.
    pub name: String,
    /// Compiled case-insensitive alternation of the keywords.
    pub regex: Regex,
    pub reply: ReplyFn,
    pub suggestions: Vec<String>,
    pub action: AdvisorAction,
}

impl KeywordRule {
    /// Build a rule matching any of `keywords` as a substring.
    pub fn new(
        name: &str,
        keywords: &[&str],
        reply: ReplyFn,
        suggestions: &[&str],
        action: AdvisorAction,
    ) -> Result<Self, regex::Error> {
        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Self {
            name: name.to_string(),
            regex: Regex::new(&format!("(?i)({alternation})"))?,
            reply,
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            action,
        })
    }

    pub fn matches(&self, message: &str) -> bool {
        self.regex.is_match(message)
    }
}

/// Ordered first-match-wins rule list.
#[derive(Debug, Clone)]
pub struct RulesEngine {
    rules: Vec<KeywordRule>,
}

impl RulesEngine {
    /// The advisor script shipped with the app.
    pub fn default_rules() -> Self {
        let rules = vec![
            builtin(
                "invest",
                &["invest", "should i"],
                invest_reply,
                &[
                    "Tell me more about Capital Shield",
                    "Show me all funds",
                    "What about timing?",
                ],
                AdvisorAction::Invest,
            ),
            builtin(
                "recommend",
                &["best fund", "recommend"],
                recommend_reply,
                &["Compare all funds", "Start investing", "Risk assessment"],
                AdvisorAction::Invest,
            ),
            builtin(
                "diversify",
                &["diversify", "portfolio"],
                |_, _| {
                    "Great question! For optimal diversification in Egypt, I suggest: 30% Money \
Market (stability), 40% Fixed Income (steady returns), 30% Equity (growth). Your current \
allocation looks good, but consider rebalancing if any asset exceeds 50% of your portfolio. 🎯"
                        .to_string()
                },
                &["View my portfolio", "Rebalancing tips", "Risk management"],
                AdvisorAction::Rebalance,
            ),
            builtin(
                "market",
                &["market", "egypt", "outlook"],
                |_, _| {
                    "Egyptian markets are showing strong momentum! 🇪🇬 Key highlights: MASAR now \
has 30,000+ investors, Suez Canal revenues at $7.2B, and CBE maintaining stable policy. The New \
Administrative Capital development is boosting construction sectors. Perfect time for long-term \
Egyptian investors! 🚀"
                        .to_string()
                },
                &["Investment opportunities", "Sector analysis", "Timing strategy"],
                AdvisorAction::Learn,
            ),
            builtin(
                "risk",
                &["risk", "safe"],
                |_, _| {
                    "Risk management is crucial! 🛡️ Based on your profile, never invest more than \
you can afford to lose. For Egyptian investors, I recommend: 1) Start with Money Market funds, \
2) Gradually add Fixed Income, 3) Consider Equity for long-term goals. Always maintain 3-6 \
months emergency fund separately!"
                        .to_string()
                },
                &["Emergency fund tips", "Risk assessment", "Safe investments"],
                AdvisorAction::Learn,
            ),
            builtin(
                "timing",
                &["timing", "when"],
                |_, _| {
                    "Timing the market is tricky, but current conditions favor Egyptian investors! \
📅 With stable CBE policy and EGX momentum, consider dollar-cost averaging: invest fixed amounts \
monthly rather than lump sums. This reduces timing risk and builds discipline. Start with 500 \
EGP monthly!"
                        .to_string()
                },
                &[
                    "Set up monthly investing",
                    "Market timing tips",
                    "Investment schedule",
                ],
                AdvisorAction::Invest,
            ),
        ];
        Self { rules }
    }

    /// Create an empty rules engine (everything falls back).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule after the existing ones.
    pub fn push(&mut self, rule: KeywordRule) {
        self.rules.push(rule);
    }

    /// Find the first matching rule and render its reply.
    pub fn respond(&self, ctx: &AdvisorContext, message: &str) -> AdvisorReply {
        match self.rules.iter().find(|r| r.matches(message)) {
            Some(rule) => {
                debug!(rule = %rule.name, action = %rule.action, "Advisor rule matched");
                AdvisorReply {
                    rule: rule.name.clone(),
                    content: (rule.reply)(ctx, message),
                    suggestions: rule.suggestions.clone(),
                    action: rule.action,
                }
            }
            None => {
                debug!("No advisor rule matched, using fallback");
                fallback_reply(message)
            }
        }
    }
}

fn builtin(
    name: &str,
    keywords: &[&str],
    reply: ReplyFn,
    suggestions: &[&str],
    action: AdvisorAction,
) -> KeywordRule {
    KeywordRule::new(name, keywords, reply, suggestions, action)
        .expect("built-in keywords are escaped")
}

fn invest_reply(ctx: &AdvisorContext, _message: &str) -> String {
    format!(
        "Based on your {} risk profile and current market conditions, I recommend considering the \
Capital Shield Fund. With the EGX30 reaching new highs and CBE maintaining stable rates, it's a \
good time for Egyptian investors. Your current portfolio value of {} shows you're on the right \
track! 📈",
        ctx.profile(),
        format_currency(ctx.portfolio_value)
    )
}

fn recommend_reply(ctx: &AdvisorContext, _message: &str) -> String {
    match ctx.profile() {
        RiskProfile::Conservative => "For your conservative profile, I recommend the **Capital \
Shield Fund** (22.8% returns, low risk). It's perfect for capital preservation while beating \
inflation."
            .to_string(),
        RiskProfile::Growth => "Given your growth appetite, consider the **Egypt Growth Equity \
Fund** (10-25% potential returns). With MASAR reaching 30,000 investors, Egyptian equities look \
promising!"
            .to_string(),
        RiskProfile::Balanced => "For balanced investors like you, the **Steady Growth Bond Fund** \
(16-20% returns) offers great stability with decent growth potential."
            .to_string(),
    }
}

fn fallback_reply(message: &str) -> AdvisorReply {
    AdvisorReply {
        rule: "fallback".to_string(),
        content: format!(
            "I understand you're asking about \"{message}\". As your AI advisor, I'm here to help \
with investment decisions, fund recommendations, portfolio analysis, and Egyptian market \
insights. Could you be more specific about what you'd like to know? 🤔"
        ),
        suggestions: vec![
            "Investment recommendations".to_string(),
            "Portfolio review".to_string(),
            "Market analysis".to_string(),
            "Risk management".to_string(),
        ],
        action: AdvisorAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ctx(profile: Option<RiskProfile>) -> AdvisorContext {
        AdvisorContext {
            user_name: Some("Ahmed".into()),
            risk_profile: profile,
            portfolio_value: dec!(125750),
        }
    }

    fn engine() -> RulesEngine {
        RulesEngine::default_rules()
    }

    #[test]
    fn invest_keyword_mentions_profile_and_value() {
        let reply = engine().respond(&ctx(Some(RiskProfile::Growth)), "Should I invest more now?");
        assert_eq!(reply.rule, "invest");
        assert_eq!(reply.action, AdvisorAction::Invest);
        assert!(reply.content.contains("growth risk profile"));
        assert!(reply.content.contains("125,750 EGP"));
    }

    #[test]
    fn first_match_wins() {
        // "market" would match a later rule, but "should i" comes first.
        let reply = engine().respond(&ctx(None), "should i enter the market?");
        assert_eq!(reply.rule, "invest");
        // "best fund" is checked before "portfolio".
        let reply = engine().respond(&ctx(None), "best fund for my portfolio");
        assert_eq!(reply.rule, "recommend");
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let reply = engine().respond(&ctx(None), "MARKET OUTLOOK");
        assert_eq!(reply.rule, "market");
        // "investment" contains "invest".
        let reply = engine().respond(&ctx(None), "Investment recommendations");
        assert_eq!(reply.rule, "invest");
    }

    #[test]
    fn recommendation_depends_on_profile() {
        let e = engine();
        let conservative = e.respond(&ctx(Some(RiskProfile::Conservative)), "Best fund for me?");
        assert!(conservative.content.contains("Capital Shield Fund"));
        let growth = e.respond(&ctx(Some(RiskProfile::Growth)), "Best fund for me?");
        assert!(growth.content.contains("Egypt Growth Equity Fund"));
        let unknown = e.respond(&ctx(None), "Best fund for me?");
        assert!(unknown.content.contains("Steady Growth Bond Fund"));
    }

    #[test]
    fn diversify_suggests_rebalance() {
        let reply = engine().respond(&ctx(None), "How to diversify?");
        assert_eq!(reply.action, AdvisorAction::Rebalance);
        assert_eq!(reply.suggestions[0], "View my portfolio");
    }

    #[test]
    fn risk_and_timing_rules() {
        let e = engine();
        assert_eq!(e.respond(&ctx(None), "Risk tips").rule, "risk");
        assert_eq!(e.respond(&ctx(None), "Is it safe?").rule, "risk");
        // "When to invest?" contains "invest", which is checked first.
        assert_eq!(e.respond(&ctx(None), "When to invest?").rule, "invest");
        assert_eq!(e.respond(&ctx(None), "what about timing").rule, "timing");
    }

    #[test]
    fn fallback_echoes_question() {
        let reply = engine().respond(&ctx(None), "hello there");
        assert_eq!(reply.rule, "fallback");
        assert_eq!(reply.action, AdvisorAction::None);
        assert!(reply.content.contains("\"hello there\""));
        assert_eq!(reply.suggestions.len(), 4);
    }

    #[test]
    fn empty_engine_always_falls_back() {
        let reply = RulesEngine::empty().respond(&ctx(None), "invest");
        assert_eq!(reply.rule, "fallback");
    }

    #[test]
    fn keywords_are_escaped() {
        let rule = KeywordRule::new(
            "literal",
            &["1+1", "a.b"],
            |_, _| String::new(),
            &[],
            AdvisorAction::None,
        )
        .unwrap();
        assert!(rule.matches("what is 1+1"));
        assert!(!rule.matches("11"));
        assert!(!rule.matches("axb"));
    }

    #[test]
    fn pushed_rules_run_after_defaults() {
        let mut e = engine();
        e.push(
            KeywordRule::new(
                "gold",
                &["gold"],
                |_, _| "Gold funds are coming soon.".to_string(),
                &[],
                AdvisorAction::Learn,
            )
            .unwrap(),
        );
        assert_eq!(e.respond(&ctx(None), "gold?").rule, "gold");
        assert_eq!(e.respond(&ctx(None), "gold market").rule, "market");
    }

    #[test]
    fn action_labels() {
        assert_eq!(AdvisorAction::Invest.label(), Some("Start Investing"));
        assert_eq!(AdvisorAction::None.label(), None);
    }
}
