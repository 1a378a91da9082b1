//! User-facing copy. Failures stay short and non-technical.

use km_engine::ReferralStats;

pub const INTRO_CAPTION: &str =
    "Welcome to Kimem UAT your gateway to AAU, ASTU, AASTU and SPHMMC";
pub const CONTINUE_BUTTON: &str = "Okay Continue.";
pub const JOIN_CHANNEL_BUTTON: &str = "Join Channel";
pub const CONFIRM_JOIN_BUTTON: &str = "Confirm Join";
pub const YOUR_INVITES_BUTTON: &str = "Your invites";
pub const DEVELOPER_CHANNEL_BUTTON: &str = "Developer's Channel";
pub const INVITES_BACK_BUTTON: &str = "⬅ Go Back";

pub const NOT_JOINED: &str = "❌ You haven't joined the channel yet.";
pub const JOIN_CHECK_FAILED: &str =
    "⚠️ Could not verify your channel join. Please try again later.";
pub const FORWARD_FAILED: &str = "⚠️ Could not retrieve info. Please try again later.";
pub const REFERRAL_UNAVAILABLE: &str =
    "⚠️ Referral info is unavailable right now. Please try again later.";

pub fn welcome_back(first_name: &str) -> String {
    format!("Welcome back, {}! 👋", first_name)
}

pub fn join_prompt(display_name: &str) -> String {
    format!(
        "Hey There '{}' Welcome to Kimem UAT, We are here to guide you through the UAT journey \
         for free. Please join the following channel First.",
        display_name
    )
}

pub fn join_channel_url(channel_slug: &str) -> String {
    format!("https://t.me/{}", channel_slug)
}

pub fn referral_caption(first_name: &str, stats: &ReferralStats, coins_per_invite: i64) -> String {
    format!(
        "Hello {first_name};\n\
         --------------------------------\n\
         You have invited: {invited} people\n\
         You have: {coins} Kimem Coins\n\
         ----------------------------------\n\
         Your invite link:\n{link}\n\
         ---------------------------------------\n\
         Get {award} Coins per person you invite\n\
         Collect Kimem Coins and get my paid Telegram Bot and Website Development Courses for \
         free. The coins will be listed after the UAT exam.",
        first_name = first_name,
        invited = stats.invited_count,
        coins = stats.coin_balance,
        link = stats.referral_link,
        award = coins_per_invite,
    )
}

pub fn invites_list(stats: &ReferralStats) -> String {
    if stats.invited.is_empty() {
        return "You haven't invited anyone yet.".to_string();
    }

    let mut lines = vec![format!("📋 Invites list ({} total):", stats.invited.len())];
    for entry in &stats.invited {
        lines.push(format!(
            "• {} – {}",
            entry.name,
            entry.date.format("%Y-%m-%d")
        ));
    }
    lines.join("\n")
}
