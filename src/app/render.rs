//! Plain-text renderings of each screen.

use crate::advisor::ChatMessage;
use crate::catalog::InvestmentProduct;
use crate::format::{format_compact_currency, format_count, format_currency, format_percent};
use crate::invest::{InvestFlow, InvestStep, PRESET_AMOUNTS};
use crate::onboarding::{OnboardingState, OnboardingStep};
use crate::portfolio::{
    ADVISORS, COMMUNITY_STATS, CONTACT_EMAIL, CONTACT_HOURS, InsightPost, TRENDING_TAGS, Timeframe,
    WealthTier,
};
use crate::session::{Session, Stage, Tab, View};

/// Render whatever the session currently shows.
pub fn screen(session: &Session) -> String {
    match session.stage() {
        Stage::Preview => preview(),
        Stage::Onboarding => onboarding(session.onboarding()),
        Stage::Main => match session.view() {
            View::Invest(_) => session
                .invest_flow()
                .map(invest)
                .unwrap_or_else(|| tab(session, session.tab())),
            View::ProductDetail(_) => session
                .selected_product()
                .map(product_detail)
                .unwrap_or_else(|| tab(session, Tab::Products)),
            View::Tab(t) => tab(session, t),
        },
    }
}

pub fn preview() -> String {
    [
        "MASAR · Your path to financial growth",
        "",
        "  • Start small, grow big: begin investing with as little as 500 EGP",
        "  • Understand your investments: clear explanations, no confusing jargon",
        "  • Secure & regulated, track performance anytime",
        "",
        "Type `start` to get started.",
    ]
    .join("\n")
}

pub fn onboarding(state: &OnboardingState) -> String {
    let progress = format!("[{}/{}]", state.step.index(), state.total_steps());
    match state.step {
        OnboardingStep::Welcome => format!(
            "{progress} Let's find your investor profile.\n\
Three quick questions help us recommend the right funds for you.\n\n\
Type `next` to begin."
        ),
        OnboardingStep::Question(n) => {
            let Some(question) = state.current_question() else {
                return progress;
            };
            let mut lines = vec![format!("{progress} {}", question.question), String::new()];
            let chosen = state.selected(n);
            for (i, option) in question.options.iter().enumerate() {
                let marker = if chosen == Some(option.value) { "●" } else { "○" };
                lines.push(format!(
                    "  {marker} {}. {} ({})",
                    i + 1,
                    option.label,
                    option.description
                ));
            }
            lines.push(String::new());
            lines.push("`select <n>` to choose, `next` to continue, `back` to go back.".into());
            lines.join("\n")
        }
        OnboardingStep::Complete => match state.profile() {
            Some(profile) => format!(
                "{progress} Your risk profile: {}\n{}",
                profile.label(),
                profile.description()
            ),
            None => progress,
        },
    }
}

fn tab(session: &Session, tab: Tab) -> String {
    match tab {
        Tab::Home => home(session),
        Tab::Portfolio => portfolio(session),
        Tab::Insights => insights(session),
        Tab::Products => products(session),
        Tab::Profile => profile(session),
    }
}

fn nav_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|t| {
            if *t == active {
                format!("[{t}]")
            } else {
                t.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn home(session: &Session) -> String {
    let mut lines = vec![nav_bar(Tab::Home), String::new()];
    if let (Some(user), Some(summary)) = (session.user(), session.summary()) {
        lines.push(format!("Good morning, {}", user.name));
        lines.push(format!("Total Portfolio Value: {}", format_currency(summary.value)));
        lines.push(format!(
            "Today: {} ({})",
            format_currency(summary.today_change),
            format_percent(summary.today_change_percent)
        ));
        lines.push(format!("Risk profile: {}", user.risk_profile.label()));
    }
    lines.push(String::new());
    lines.push("Recent transactions".into());
    for tx in session.portfolio().recent_transactions(4) {
        let pct = tx
            .percentage
            .map(|p| format!(" {}", format_percent(p)))
            .unwrap_or_default();
        lines.push(format!(
            "  {} · {} · {}{} ({})",
            tx.title,
            tx.subtitle,
            format_currency(tx.amount),
            pct,
            tx.status
        ));
    }
    lines.join("\n")
}

fn portfolio(session: &Session) -> String {
    let mut lines = vec![nav_bar(Tab::Portfolio), String::new()];
    if let Some(summary) = session.summary() {
        lines.push(format!("Total Value:    {}", format_currency(summary.value)));
        lines.push(format!("Total Invested: {}", format_currency(summary.invested)));
        lines.push(format!(
            "Total Gain:     {} ({})",
            format_currency(summary.gain),
            format_percent(summary.gain_percent)
        ));
    }
    lines.push(String::new());
    lines.push(format!("Performance ({})", session.time_range()));
    for point in session.portfolio().performance_in(session.time_range()) {
        lines.push(format!("  {:<4} {}", point.month, format_currency(point.value)));
    }
    lines.push(String::new());
    lines.push("Asset Breakdown".into());
    for asset in &session.portfolio().assets {
        lines.push(format!(
            "  {:<20} {:>12}  {:>3}%  {}",
            asset.name,
            format_currency(asset.value),
            asset.allocation.normalize(),
            format_percent(asset.return_rate)
        ));
    }
    lines.join("\n")
}

fn insights(session: &Session) -> String {
    let selected = session.timeframe();
    let timeframes: Vec<String> = Timeframe::ALL
        .iter()
        .map(|t| {
            if *t == selected {
                format!("[{t}]")
            } else {
                t.to_string()
            }
        })
        .collect();
    let stats = COMMUNITY_STATS;
    let mut lines = vec![
        nav_bar(Tab::Insights),
        String::new(),
        "Public Insights · Investment trends and community updates".into(),
        format!("Timeframe: {}", timeframes.join("  ")),
        format!(
            "{} Active Investors · +{}% Avg. Returns · {} Assets Under Mgmt",
            format_count(stats.active_investors),
            stats.average_return.normalize(),
            format_compact_currency(stats.assets_under_management)
        ),
        format!("Trending in Egypt: {}", TRENDING_TAGS.join(" ")),
    ];
    for post in &session.portfolio().feed {
        lines.push(String::new());
        lines.push(insight_post(session, post, selected));
    }
    lines.push(String::new());
    lines.push("`timeframe <week|month|year>` to change the investor window.".into());
    lines.join("\n")
}

fn insight_post(session: &Session, post: &InsightPost, selected: Timeframe) -> String {
    let hot = if post.hot { "🔥 " } else { "" };
    let mut lines = vec![
        format!("{hot}{}", post.title),
        format!("  {} · {}", post.kind.label(), post.posted),
        format!("  {}", post.content),
    ];
    if let Some(performance) = post.performance {
        lines.push(format!("  +{}%", performance.normalize()));
    }
    let counts: Vec<String> = Timeframe::ALL
        .iter()
        .map(|t| {
            let entry = format!("{} this {t}", format_count(post.investors.get(*t)));
            if *t == selected {
                format!("[{entry}]")
            } else {
                entry
            }
        })
        .collect();
    lines.push(format!("  New investors: {}", counts.join(" · ")));
    lines.push(format!(
        "  {} views · {} likes · {} comments",
        format_count(post.engagement.views),
        format_count(post.engagement.likes),
        format_count(post.engagement.comments)
    ));
    if let Some(product) = post
        .fund_name
        .as_deref()
        .and_then(|name| session.catalog().find_by_name(name))
    {
        lines.push(format!("  Invest Now: `product {}`", product.id));
    }
    lines.join("\n")
}

fn products(session: &Session) -> String {
    let mut lines = vec![
        nav_bar(Tab::Products),
        String::new(),
        "Investment Products · Choose the right fund for your goals".into(),
    ];
    let recommended = session
        .user()
        .and_then(|u| session.catalog().recommend_for(u.risk_profile))
        .map(|p| p.id.clone());
    for product in session.catalog().list() {
        let tag = if recommended.as_deref() == Some(product.id.as_str()) {
            "  ★ recommended"
        } else {
            ""
        };
        lines.push(format!("  {}{tag}", product.summary_line()));
    }
    lines.push(String::new());
    lines.push("`product <id>` for details.".into());
    lines.join("\n")
}

pub fn product_detail(product: &InvestmentProduct) -> String {
    [
        format!("{} · {}", product.name, product.kind.label()),
        String::new(),
        product.description.clone(),
        String::new(),
        format!("Expected Return:  {}", product.expected_return),
        format!("Min. Investment:  {}", format_currency(product.minimum_investment)),
        format!("Management Fee:   {}% p.a.", product.fee.normalize()),
        format!("Assets Under Mgmt: {}", format_compact_currency(product.aum)),
        format!("Risk:             {} risk", product.risk_level),
        String::new(),
        format!("Who is this for? {}", product.suitable_for),
        format!("Fee Transparency: {}", product.fee_disclosure()),
        String::new(),
        "`invest` to invest, `back` for all products.".into(),
    ]
    .join("\n")
}

pub fn invest(flow: &InvestFlow) -> String {
    let product = flow.product();
    let progress = format!("[{}/{}]", flow.step().number(), InvestStep::COUNT);
    let mut lines = Vec::new();
    match flow.step() {
        InvestStep::Amount => {
            lines.push(format!("{progress} How much would you like to invest?"));
            lines.push(format!(
                "Minimum investment: {}",
                format_currency(flow.minimum())
            ));
            lines.push(String::new());
            let minus = if flow.can_decrement() { "-" } else { " " };
            lines.push(format!("   {minus}  {}  +", format_currency(flow.amount())));
            lines.push(String::new());
            let presets: Vec<String> = PRESET_AMOUNTS
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let label = format!("{}:{}", i + 1, format_currency(*p));
                    if flow.active_preset() == Some(i + 1) {
                        format!("[{label}]")
                    } else {
                        label
                    }
                })
                .collect();
            lines.push(format!("Presets: {}", presets.join("  ")));
        }
        InvestStep::Review => {
            lines.push(format!("{progress} Review your investment"));
            lines.push(format!("  Investment Amount: {}", format_currency(flow.amount())));
            lines.push(format!("  Product:           {}", product.name));
            lines.push(format!("  Risk Level:        {}", product.risk_level));
            lines.push(format!("  Management Fee:    {}% p.a.", product.fee.normalize()));
            lines.push(format!("  Expected Return:   {}", product.expected_return));
            lines.push(String::new());
            lines.push(
                "Past performance does not guarantee future results. All investments involve \
risk, including the possible loss of principal."
                    .into(),
            );
        }
        InvestStep::Success => {
            lines.push(format!("{progress} Investment Successful!"));
            lines.push(format!(
                "You have invested {} in {}",
                format_currency(flow.amount()),
                product.name
            ));
            lines.push("Your investment will be reflected in your portfolio shortly.".into());
        }
    }
    lines.push(String::new());
    lines.push(format!("`confirm` to {}, `back` to go back.", flow.step().button()));
    lines.join("\n")
}

fn profile(session: &Session) -> String {
    let mut lines = vec![nav_bar(Tab::Profile), String::new()];
    if let Some(user) = session.user() {
        lines.push(format!("{} · {} · {}", user.name, user.email, user.phone));
        lines.push(format!(
            "Your Risk Profile: {} ({})",
            user.risk_profile.label(),
            user.risk_profile.description()
        ));
        lines.push(format!(
            "Current tier: {}",
            WealthTier::for_invested(user.total_invested).name()
        ));
    }
    lines.push(String::new());
    lines.push(wealth_tier(session.tier()));
    lines.push(String::new());
    lines.push("`tier next|prev` to browse tiers, `logout` to sign out. MASAR v1.0.0".into());
    lines.join("\n")
}

pub fn wealth_tier(tier: WealthTier) -> String {
    let mut lines = vec![
        format!("{} ({}) · {}", tier.name(), tier.arabic_name(), tier.level()),
        format!("  {}", tier.range()),
    ];
    for benefit in tier.benefits() {
        let mark = if benefit.available { "✓" } else { "✗" };
        lines.push(format!("  {mark} {}: {}", benefit.title, benefit.description));
    }
    lines.join("\n")
}

pub fn advisors() -> String {
    let mut lines = vec!["Meet your advisors".to_string()];
    for advisor in ADVISORS {
        lines.push(format!("  {} · {}", advisor.name, advisor.title));
        lines.push(format!("    {}", advisor.experience));
    }
    lines.push(String::new());
    lines.push(format!("Contact: {CONTACT_EMAIL} ({CONTACT_HOURS})"));
    lines.join("\n")
}

pub fn chat_message(message: &ChatMessage) -> String {
    let mut lines = vec![format!("Advisor: {}", message.content)];
    if !message.suggestions.is_empty() {
        lines.push(String::new());
        for suggestion in &message.suggestions {
            lines.push(format!("  › {suggestion}"));
        }
    }
    if let Some(label) = message.action.label() {
        lines.push(format!("[{label}] type `go`"));
    }
    lines.join("\n")
}
