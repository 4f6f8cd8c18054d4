//! Stateless view renderer.
//!
//! [`render`] turns a controller snapshot into a screen model. It does no
//! I/O and holds no state; frontends only draw what it returns.

use serde::Serialize;

use iu_core::wallet::short_address;
use iu_core::{
    Address, BalanceSnapshot, DashboardState, DashboardView, OnboardingForm, OnboardingStep,
    Role, SendForm, TransferRecord,
};

const ZERO_BALANCE: &str = "0.00";

/// Everything the renderer needs, captured at one point in time.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub state: DashboardState,
    pub balance: Option<BalanceSnapshot>,
    pub wallet_address: Option<Address>,
    pub activity: Vec<TransferRecord>,
    pub send_form: SendForm,
    pub submitting: bool,
    pub token_symbol: String,
    pub native_symbol: String,
    pub network_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Loading,
    Login { roles: Vec<RoleChoice> },
    Onboarding(OnboardingScreen),
    Dashboard(HomeScreen),
    SendMoney(SendScreen),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleChoice {
    pub role: Role,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingScreen {
    pub email: Option<String>,
    pub step: OnboardingStep,
    pub form: OnboardingForm,
    pub can_submit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeScreen {
    pub email: Option<String>,
    pub role_badge: String,
    pub wallet: Option<String>,
    pub network: String,
    pub token_symbol: String,
    pub token_balance: String,
    pub native_symbol: String,
    pub native_balance: String,
    pub coming_soon: &'static str,
    pub activity: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendScreen {
    pub token_symbol: String,
    pub available: String,
    pub recipient: String,
    pub amount: String,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
}

pub fn render(snapshot: &DashboardSnapshot) -> Screen {
    match &snapshot.state {
        DashboardState::Loading => Screen::Loading,
        DashboardState::Login => Screen::Login {
            roles: vec![
                RoleChoice {
                    role: Role::Investor,
                    label: "I want to invest",
                },
                RoleChoice {
                    role: Role::Entrepreneur,
                    label: "I want to raise funds",
                },
            ],
        },
        DashboardState::Onboarding { session, form } => Screen::Onboarding(OnboardingScreen {
            email: session.email.clone(),
            step: form.step,
            form: form.clone(),
            can_submit: form.is_complete(),
        }),
        DashboardState::Dashboard {
            session,
            role,
            view: DashboardView::Home,
        } => Screen::Dashboard(HomeScreen {
            email: session.email.clone(),
            role_badge: role.as_str().to_uppercase(),
            wallet: snapshot.wallet_address.as_ref().map(short_address),
            network: snapshot.network_name.clone(),
            token_symbol: snapshot.token_symbol.clone(),
            token_balance: token_balance(snapshot),
            native_symbol: snapshot.native_symbol.clone(),
            native_balance: snapshot
                .balance
                .as_ref()
                .map(|b| b.native.display())
                .unwrap_or_else(|| ZERO_BALANCE.to_string()),
            coming_soon: coming_soon(*role),
            activity: snapshot.activity.iter().map(ToString::to_string).collect(),
        }),
        DashboardState::Dashboard {
            view: DashboardView::Send,
            ..
        } => Screen::SendMoney(SendScreen {
            token_symbol: snapshot.token_symbol.clone(),
            available: token_balance(snapshot),
            recipient: snapshot.send_form.recipient.clone(),
            amount: snapshot.send_form.amount.clone(),
            submit_label: if snapshot.submitting { "Sending..." } else { "Send" },
            submit_disabled: snapshot.submitting,
        }),
    }
}

fn token_balance(snapshot: &DashboardSnapshot) -> String {
    snapshot
        .balance
        .as_ref()
        .map(|b| b.token.display())
        .unwrap_or_else(|| ZERO_BALANCE.to_string())
}

fn coming_soon(role: Role) -> &'static str {
    match role {
        Role::Investor => "Investment opportunities are coming soon.",
        Role::Entrepreneur => "Fundraising campaigns for your project are coming soon.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use iu_core::{Session, SubmissionId, TokenAmount, UserId, U256};

    fn snapshot(state: DashboardState) -> DashboardSnapshot {
        DashboardSnapshot {
            state,
            balance: None,
            wallet_address: None,
            activity: Vec::new(),
            send_form: SendForm::default(),
            submitting: false,
            token_symbol: "USDC".into(),
            native_symbol: "POL".into(),
            network_name: "Polygon".into(),
        }
    }

    fn dashboard(view: DashboardView) -> DashboardState {
        let mut session = Session::new(UserId::from("u-1"));
        session.email = Some("ana@example.com".into());
        DashboardState::Dashboard {
            session,
            role: Role::Entrepreneur,
            view,
        }
    }

    #[test]
    fn missing_balance_renders_zero() {
        let Screen::Dashboard(home) = render(&snapshot(dashboard(DashboardView::Home))) else {
            panic!("expected dashboard screen");
        };
        assert_eq!(home.token_balance, "0.00");
        assert_eq!(home.native_balance, "0.00");
        assert_eq!(home.role_badge, "ENTREPRENEUR");
        assert!(home.coming_soon.contains("Fundraising"));
    }

    #[test]
    fn home_shows_balances_and_activity_in_order() {
        let mut snap = snapshot(dashboard(DashboardView::Home));
        snap.wallet_address = Some(Address::repeat_byte(0x12));
        snap.balance = Some(BalanceSnapshot {
            token: TokenAmount::new(U256::from(12_345_678u64), 6, "USDC"),
            native: TokenAmount::new(U256::ZERO, 18, "POL"),
            fetched_at: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
        });
        let record = |text: &str| TransferRecord {
            description: text.into(),
            submission_id: SubmissionId("0x1".into()),
            sent_at: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
        };
        snap.activity = vec![record("newest"), record("oldest")];

        let Screen::Dashboard(home) = render(&snap) else {
            panic!("expected dashboard screen");
        };
        assert_eq!(home.token_balance, "12.35");
        assert_eq!(home.wallet.as_deref(), Some("0x1212…1212"));
        assert_eq!(home.activity, vec!["newest", "oldest"]);
    }

    #[test]
    fn send_button_is_disabled_while_submitting() {
        let mut snap = snapshot(dashboard(DashboardView::Send));
        snap.submitting = true;
        snap.send_form = SendForm::new("0xabc", "3");

        let Screen::SendMoney(send) = render(&snap) else {
            panic!("expected send screen");
        };
        assert!(send.submit_disabled);
        assert_eq!(send.submit_label, "Sending...");
        assert_eq!(send.recipient, "0xabc");
    }

    #[test]
    fn onboarding_submit_follows_form_gate() {
        let state = DashboardState::Onboarding {
            session: Session::new(UserId::from("u-1")),
            form: OnboardingForm::with_role(Some(Role::Investor)),
        };
        let Screen::Onboarding(screen) = render(&snapshot(state)) else {
            panic!("expected onboarding screen");
        };
        assert!(!screen.can_submit);
    }

    #[test]
    fn malformed_phone_disables_submit() {
        let state = DashboardState::Onboarding {
            session: Session::new(UserId::from("u-1")),
            form: OnboardingForm {
                role: Some(Role::Investor),
                accepted_terms: true,
                phone: "call me".into(),
                ..Default::default()
            },
        };
        let Screen::Onboarding(screen) = render(&snapshot(state)) else {
            panic!("expected onboarding screen");
        };
        assert!(!screen.can_submit);
    }

    #[test]
    fn login_offers_both_roles() {
        let Screen::Login { roles } = render(&snapshot(DashboardState::Login)) else {
            panic!("expected login screen");
        };
        assert_eq!(roles.len(), 2);
    }
}
