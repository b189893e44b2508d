//! Public insights: the community feed shown on the insights tab.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// What a feed post is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    MarketUpdate,
    FundPerformance,
    InvestorMilestone,
    EconomicNews,
}

impl PostKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MarketUpdate => "Market Update",
            Self::FundPerformance => "Fund Performance",
            Self::InvestorMilestone => "Milestone",
            Self::EconomicNews => "Economic News",
        }
    }
}

/// Window for the new-investor counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Week,
    #[default]
    Month,
    Year,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Self::Week, Self::Month, Self::Year];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Timeframe {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(format!("Unknown timeframe: {}", s)),
        }
    }
}

/// New investors attributed to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorCounts {
    pub week: u32,
    pub month: u32,
    pub year: u32,
}

impl InvestorCounts {
    pub fn get(&self, timeframe: Timeframe) -> u32 {
        match timeframe {
            Timeframe::Week => self.week,
            Timeframe::Month => self.month,
            Timeframe::Year => self.year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub views: u32,
    pub likes: u32,
    pub comments: u32,
}

/// One post in the public feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightPost {
    pub id: String,
    pub kind: PostKind,
    pub title: String,
    pub content: String,
    /// Product the post is about; such posts get an invest shortcut.
    pub fund_name: Option<String>,
    /// Reported return, in percent.
    pub performance: Option<Decimal>,
    pub investors: InvestorCounts,
    pub engagement: Engagement,
    pub posted: String,
    pub hot: bool,
}

/// Platform-wide figures for the banner above the feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CommunityStats {
    pub active_investors: u32,
    pub average_return: Decimal,
    pub assets_under_management: Decimal,
}

pub const COMMUNITY_STATS: CommunityStats = CommunityStats {
    active_investors: 47_892,
    average_return: dec!(18.4),
    assets_under_management: dec!(2_100_000_000),
};

pub const TRENDING_TAGS: [&str; 6] = [
    "#EGX30Rally",
    "#CBEPolicy",
    "#YoungInvestors",
    "#SuezCanal",
    "#NewCapital",
    "#InflationHedge",
];

#[allow(clippy::too_many_arguments)]
fn post(
    id: &str,
    kind: PostKind,
    title: &str,
    content: &str,
    fund: Option<(&str, Option<Decimal>)>,
    investors: [u32; 3],
    engagement: [u32; 3],
    posted: &str,
) -> InsightPost {
    let [week, month, year] = investors;
    let [views, likes, comments] = engagement;
    InsightPost {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        content: content.to_string(),
        fund_name: fund.map(|(name, _)| name.to_string()),
        performance: fund.and_then(|(_, perf)| perf),
        investors: InvestorCounts { week, month, year },
        engagement: Engagement {
            views,
            likes,
            comments,
        },
        posted: posted.to_string(),
        hot: false,
    }
}

/// The demo feed, newest first.
pub fn mock_feed() -> Vec<InsightPost> {
    vec![
        InsightPost {
            hot: true,
            ..post(
                "1",
                PostKind::FundPerformance,
                "Capital Shield Fund Reaches New Heights! 🚀",
                "Our Money Market Fund has delivered exceptional returns of 22.8% this quarter, \
beating inflation by 12.3%. With the CBE's recent policy, Egyptian savers are moving from \
traditional deposits to smart investing.",
                Some(("Capital Shield Fund", Some(dec!(22.8)))),
                [1247, 4832, 18650],
                [15420, 892, 156],
                "2 hours ago",
            )
        },
        InsightPost {
            hot: true,
            ..post(
                "2",
                PostKind::InvestorMilestone,
                "10,000+ Egyptians Joined This Month! 🎉",
                "We've reached an incredible milestone with over 10,000 new Egyptian investors \
joining MASAR this month. The future of investing in Egypt is bright!",
                None,
                [2156, 10247, 45890],
                [28750, 1456, 289],
                "5 hours ago",
            )
        },
        post(
            "3",
            PostKind::MarketUpdate,
            "MASAR Reaches 30,000 Investors Milestone! 📈",
            "We've officially welcomed our 30,000th investor to the MASAR community! This \
incredible growth shows Egyptian trust in our platform. CIB, Vodafone Egypt, and EGAS continue \
to drive strong returns in our Egypt Growth Fund.",
            Some(("Egypt Growth Equity Fund", Some(dec!(4.2)))),
            [856, 3421, 12890],
            [12340, 567, 89],
            "1 day ago",
        ),
        post(
            "4",
            PostKind::EconomicNews,
            "CBE Holds Rates at 19.25% - Stability Wins 🏛️",
            "The Central Bank of Egypt maintained the overnight deposit rate at 19.25% and \
lending rate at 20.25%. This signals confidence in Egypt's economic trajectory and provides \
stability for our Fixed Income strategies.",
            Some(("Steady Growth Bond Fund", None)),
            [634, 2890, 9876],
            [9876, 423, 67],
            "1 day ago",
        ),
        post(
            "5",
            PostKind::FundPerformance,
            "Regional Fund Expands to Saudi Market",
            "Our Regional Opportunities Fund now includes top Saudi Arabian companies, offering \
Egyptian investors exposure to the Kingdom's Vision 2030 growth story.",
            Some(("Regional Opportunities Fund", Some(dec!(15.6)))),
            [423, 1567, 5432],
            [7654, 334, 45],
            "2 days ago",
        ),
        post(
            "6",
            PostKind::InvestorMilestone,
            "Young Egyptians Leading Investment Revolution 🇪🇬",
            "68% of our new investors this month are under 35 years old. From Cairo to \
Alexandria, Egyptian millennials and Gen Z are choosing MASAR over traditional savings accounts.",
            None,
            [1890, 6754, 23456],
            [18900, 1123, 234],
            "3 days ago",
        ),
        post(
            "7",
            PostKind::MarketUpdate,
            "New Administrative Capital Boosts Real Estate Funds",
            "The ongoing development of Egypt's New Administrative Capital has created \
opportunities in our Regional Fund's real estate exposure. Construction and materials sectors \
show strong momentum.",
            None,
            [567, 2134, 8901],
            [11200, 445, 78],
            "4 days ago",
        ),
        post(
            "8",
            PostKind::FundPerformance,
            "Suez Canal Revenue Impact on Egyptian Funds 🚢",
            "Record Suez Canal revenues of $7.2B this year are boosting Egyptian economic \
confidence. Our Egypt Growth Fund benefits from increased logistics and shipping sector \
performance.",
            Some(("Egypt Growth Equity Fund", Some(dec!(8.7)))),
            [723, 2987, 11456],
            [13450, 678, 123],
            "5 days ago",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_has_two_hot_posts_first() {
        let feed = mock_feed();
        assert_eq!(feed.len(), 8);
        let hot: Vec<_> = feed.iter().filter(|p| p.hot).map(|p| p.id.as_str()).collect();
        assert_eq!(hot, ["1", "2"]);
    }

    #[test]
    fn performance_only_on_fund_posts() {
        for post in mock_feed() {
            if post.performance.is_some() {
                assert!(post.fund_name.is_some(), "post {}", post.id);
            }
        }
    }

    #[test]
    fn counts_follow_timeframe() {
        let feed = mock_feed();
        let counts = feed[1].investors;
        assert_eq!(counts.get(Timeframe::Week), 2156);
        assert_eq!(counts.get(Timeframe::Month), 10247);
        assert_eq!(counts.get(Timeframe::Year), 45890);
    }

    #[test]
    fn timeframe_parses_case_insensitively() {
        assert_eq!("YEAR".parse::<Timeframe>().unwrap(), Timeframe::Year);
        assert_eq!(Timeframe::default(), Timeframe::Month);
        assert!("decade".parse::<Timeframe>().is_err());
    }
}
