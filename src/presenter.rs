//! Plain-text drawing of rendered screens.

use std::fmt::Write;

use iu_app::view::{HomeScreen, OnboardingScreen, SendScreen};
use iu_app::Screen;

pub fn present(screen: &Screen) -> String {
    match screen {
        Screen::Loading => "Loading...\n".to_string(),
        Screen::Login { roles } => {
            let mut out = String::from("Welcome to InvestUp\n\n");
            for choice in roles {
                let _ = writeln!(out, "  {:<14}{}", choice.role.as_str(), choice.label);
            }
            out.push_str("\nRun `investup login --role <role>` to continue.\n");
            out
        }
        Screen::Onboarding(screen) => present_onboarding(screen),
        Screen::Dashboard(home) => present_home(home),
        Screen::SendMoney(send) => present_send(send),
    }
}

fn present_onboarding(screen: &OnboardingScreen) -> String {
    let mut out = String::from("Complete your profile");
    if let Some(email) = &screen.email {
        let _ = write!(out, " ({email})");
    }
    out.push('\n');
    let role = screen.form.role.map(|r| r.as_str()).unwrap_or("-");
    let _ = writeln!(out, "  step:     {:?}", screen.step);
    let _ = writeln!(out, "  role:     {role}");
    let _ = writeln!(
        out,
        "  terms:    {}",
        if screen.form.accepted_terms { "accepted" } else { "pending" }
    );
    if !screen.can_submit {
        out.push_str("\nRun `investup onboard --role <role> --accept-terms` to finish.\n");
    }
    out
}

fn present_home(home: &HomeScreen) -> String {
    let mut out = format!("InvestUp [{}]\n", home.role_badge);
    if let Some(email) = &home.email {
        let _ = writeln!(out, "  {email}");
    }
    let _ = writeln!(
        out,
        "  wallet:   {} on {}",
        home.wallet.as_deref().unwrap_or("not connected"),
        home.network
    );
    let _ = writeln!(out, "  balance:  {} {}", home.token_balance, home.token_symbol);
    let _ = writeln!(out, "  gas:      {} {}", home.native_balance, home.native_symbol);
    let _ = writeln!(out, "\n{}", home.coming_soon);
    out.push_str("\nRecent activity\n");
    if home.activity.is_empty() {
        out.push_str("  No activity yet\n");
    }
    for line in &home.activity {
        let _ = writeln!(out, "  {line}");
    }
    out
}

fn present_send(send: &SendScreen) -> String {
    let mut out = format!("Send {}\n", send.token_symbol);
    let _ = writeln!(out, "  available: {} {}", send.available, send.token_symbol);
    let _ = writeln!(out, "  to:        {}", send.recipient);
    let _ = writeln!(out, "  amount:    {}", send.amount);
    let _ = writeln!(
        out,
        "  [{}]{}",
        send.submit_label,
        if send.submit_disabled { " (disabled)" } else { "" }
    );
    out
}
