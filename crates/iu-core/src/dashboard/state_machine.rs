//! Dashboard state machine.
//!
//! Defines a pure state transition function for the session flow:
//! loading, login, onboarding and the dashboard itself.

use crate::onboarding::OnboardingForm;
use crate::role::Role;
use crate::session::{AuthStatus, Session, UserId};

/// Screen shown inside the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Home,
    Send,
}

/// Session flow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    /// Waiting for the identity provider.
    Loading,
    /// Signed out, or signed in with the role still being resolved.
    Login,
    /// Signed in without a stored role.
    Onboarding {
        session: Session,
        form: OnboardingForm,
    },
    /// Signed in with a role.
    Dashboard {
        session: Session,
        role: Role,
        view: DashboardView,
    },
}

impl DashboardState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            DashboardState::Onboarding { session, .. }
            | DashboardState::Dashboard { session, .. } => Some(session),
            DashboardState::Loading | DashboardState::Login => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DashboardState::Loading => "loading",
            DashboardState::Login => "login",
            DashboardState::Onboarding { .. } => "onboarding",
            DashboardState::Dashboard { .. } => "dashboard",
        }
    }
}

/// Events that drive the session flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// Identity provider reported its status.
    AuthReported(AuthStatus),
    /// Role lookup finished for an authenticated session.
    RoleResolved {
        session: Session,
        role: Option<Role>,
        /// Role picked on the login screen before authenticating.
        pending: Option<Role>,
    },
    /// Onboarding form edited.
    EditOnboarding(OnboardingForm),
    /// Onboarding form submitted.
    SubmitOnboarding,
    OpenSend,
    CloseSend,
    /// A transfer was accepted by the wallet.
    TransferCompleted,
    Logout,
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    /// Look up the role in the local cache, provider metadata and profile store.
    ResolveRole { session: Session },
    /// Store the chosen role remotely and in the local cache.
    PersistRole {
        session: Session,
        role: Role,
        form: OnboardingForm,
    },
    /// Read balances now.
    RefreshBalances,
    /// Read balances after the post-transfer delay.
    ScheduleBalanceRefresh,
    /// Drop the cached role for the user.
    ClearRoleCache { user_id: UserId },
    /// End the provider session.
    SignOut,
}

/// Pure dashboard state machine.
pub struct DashboardStateMachine;

impl DashboardStateMachine {
    pub fn transition(
        state: DashboardState,
        event: DashboardEvent,
    ) -> (DashboardState, Vec<DashboardAction>) {
        match (state, event) {
            (
                DashboardState::Loading | DashboardState::Login,
                DashboardEvent::AuthReported(AuthStatus::Authenticated(session)),
            ) => (
                DashboardState::Login,
                vec![DashboardAction::ResolveRole { session }],
            ),
            (
                DashboardState::Loading | DashboardState::Login,
                DashboardEvent::AuthReported(AuthStatus::NotReady | AuthStatus::Unauthenticated),
            ) => (DashboardState::Login, Vec::new()),
            (
                DashboardState::Login,
                DashboardEvent::RoleResolved {
                    session,
                    role: Some(role),
                    ..
                },
            ) => (
                DashboardState::Dashboard {
                    session,
                    role,
                    view: DashboardView::Home,
                },
                vec![DashboardAction::RefreshBalances],
            ),
            (
                DashboardState::Login,
                DashboardEvent::RoleResolved {
                    session,
                    role: None,
                    pending,
                },
            ) => (
                DashboardState::Onboarding {
                    session,
                    form: OnboardingForm::with_role(pending),
                },
                Vec::new(),
            ),
            (
                DashboardState::Onboarding { session, .. },
                DashboardEvent::EditOnboarding(mut form),
            ) => {
                form.step = form.reached_step();
                (DashboardState::Onboarding { session, form }, Vec::new())
            }
            (DashboardState::Onboarding { session, form }, DashboardEvent::SubmitOnboarding) => {
                match form.validate() {
                    Ok(role) => (
                        DashboardState::Dashboard {
                            session: session.clone(),
                            role,
                            view: DashboardView::Home,
                        },
                        vec![
                            DashboardAction::PersistRole {
                                session,
                                role,
                                form,
                            },
                            DashboardAction::RefreshBalances,
                        ],
                    ),
                    Err(_) => (DashboardState::Onboarding { session, form }, Vec::new()),
                }
            }
            (
                DashboardState::Dashboard {
                    session,
                    role,
                    view: DashboardView::Home,
                },
                DashboardEvent::OpenSend,
            ) => (
                DashboardState::Dashboard {
                    session,
                    role,
                    view: DashboardView::Send,
                },
                Vec::new(),
            ),
            (
                DashboardState::Dashboard {
                    session,
                    role,
                    view: DashboardView::Send,
                },
                DashboardEvent::CloseSend,
            ) => (
                DashboardState::Dashboard {
                    session,
                    role,
                    view: DashboardView::Home,
                },
                Vec::new(),
            ),
            (
                DashboardState::Dashboard {
                    session,
                    role,
                    view: DashboardView::Send,
                },
                DashboardEvent::TransferCompleted,
            ) => (
                DashboardState::Dashboard {
                    session,
                    role,
                    view: DashboardView::Home,
                },
                vec![DashboardAction::ScheduleBalanceRefresh],
            ),
            (DashboardState::Dashboard { session, .. }, DashboardEvent::Logout) => (
                DashboardState::Login,
                vec![
                    DashboardAction::ClearRoleCache {
                        user_id: session.user_id,
                    },
                    DashboardAction::SignOut,
                ],
            ),
            (state, _event) => (state, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::OnboardingStep;

    fn session() -> Session {
        Session::new(UserId::from("did:privy:user-1"))
    }

    fn dashboard(view: DashboardView) -> DashboardState {
        DashboardState::Dashboard {
            session: session(),
            role: Role::Investor,
            view,
        }
    }

    #[test]
    fn loading_goes_to_login_when_provider_not_ready() {
        let (next, actions) = DashboardStateMachine::transition(
            DashboardState::Loading,
            DashboardEvent::AuthReported(AuthStatus::NotReady),
        );
        assert_eq!(next, DashboardState::Login);
        assert!(actions.is_empty());
    }

    #[test]
    fn authenticated_session_resolves_role_from_login() {
        let (next, actions) = DashboardStateMachine::transition(
            DashboardState::Loading,
            DashboardEvent::AuthReported(AuthStatus::Authenticated(session())),
        );
        assert_eq!(next, DashboardState::Login);
        assert_eq!(
            actions,
            vec![DashboardAction::ResolveRole { session: session() }]
        );
    }

    #[test]
    fn missing_role_leads_to_onboarding_never_dashboard() {
        let (next, actions) = DashboardStateMachine::transition(
            DashboardState::Login,
            DashboardEvent::RoleResolved {
                session: session(),
                role: None,
                pending: Some(Role::Entrepreneur),
            },
        );
        assert_eq!(
            next,
            DashboardState::Onboarding {
                session: session(),
                form: OnboardingForm::with_role(Some(Role::Entrepreneur)),
            }
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn known_role_goes_straight_to_dashboard() {
        let (next, actions) = DashboardStateMachine::transition(
            DashboardState::Login,
            DashboardEvent::RoleResolved {
                session: session(),
                role: Some(Role::Investor),
                pending: None,
            },
        );
        assert_eq!(next, dashboard(DashboardView::Home));
        assert_eq!(actions, vec![DashboardAction::RefreshBalances]);
    }

    #[test]
    fn submit_without_terms_keeps_state_unchanged() {
        let state = DashboardState::Onboarding {
            session: session(),
            form: OnboardingForm::with_role(Some(Role::Investor)),
        };
        let (next, actions) =
            DashboardStateMachine::transition(state.clone(), DashboardEvent::SubmitOnboarding);
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn submit_with_malformed_phone_keeps_state_unchanged() {
        let state = DashboardState::Onboarding {
            session: session(),
            form: OnboardingForm {
                role: Some(Role::Investor),
                accepted_terms: true,
                phone: "call me".into(),
                ..Default::default()
            },
        };
        let (next, actions) =
            DashboardStateMachine::transition(state.clone(), DashboardEvent::SubmitOnboarding);
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn editing_onboarding_moves_to_first_unfilled_step() {
        let state = DashboardState::Onboarding {
            session: session(),
            form: OnboardingForm::default(),
        };
        let edited = OnboardingForm::with_role(Some(Role::Investor));

        let (next, actions) =
            DashboardStateMachine::transition(state, DashboardEvent::EditOnboarding(edited));

        let DashboardState::Onboarding { form, .. } = next else {
            panic!("expected onboarding, got {next:?}");
        };
        assert_eq!(form.step, OnboardingStep::Identity);
        assert!(actions.is_empty());
    }

    #[test]
    fn submit_with_role_and_terms_persists_and_refreshes() {
        let form = OnboardingForm {
            role: Some(Role::Entrepreneur),
            accepted_terms: true,
            ..Default::default()
        };
        let state = DashboardState::Onboarding {
            session: session(),
            form: form.clone(),
        };
        let (next, actions) =
            DashboardStateMachine::transition(state, DashboardEvent::SubmitOnboarding);

        assert!(matches!(
            next,
            DashboardState::Dashboard {
                role: Role::Entrepreneur,
                view: DashboardView::Home,
                ..
            }
        ));
        assert_eq!(
            actions,
            vec![
                DashboardAction::PersistRole {
                    session: session(),
                    role: Role::Entrepreneur,
                    form,
                },
                DashboardAction::RefreshBalances,
            ]
        );
    }

    #[test]
    fn transfer_completion_returns_home_and_schedules_refresh() {
        let (next, actions) = DashboardStateMachine::transition(
            dashboard(DashboardView::Send),
            DashboardEvent::TransferCompleted,
        );
        assert_eq!(next, dashboard(DashboardView::Home));
        assert_eq!(actions, vec![DashboardAction::ScheduleBalanceRefresh]);
    }

    #[test]
    fn logout_clears_role_cache_for_user() {
        let (next, actions) = DashboardStateMachine::transition(
            dashboard(DashboardView::Send),
            DashboardEvent::Logout,
        );
        assert_eq!(next, DashboardState::Login);
        assert_eq!(
            actions,
            vec![
                DashboardAction::ClearRoleCache {
                    user_id: UserId::from("did:privy:user-1"),
                },
                DashboardAction::SignOut,
            ]
        );
    }

    #[test]
    fn unreachable_transitions_are_ignored() {
        let cases = vec![
            (DashboardState::Login, DashboardEvent::Logout),
            (DashboardState::Loading, DashboardEvent::SubmitOnboarding),
            (dashboard(DashboardView::Home), DashboardEvent::TransferCompleted),
            (
                dashboard(DashboardView::Home),
                DashboardEvent::AuthReported(AuthStatus::Unauthenticated),
            ),
            (
                DashboardState::Onboarding {
                    session: session(),
                    form: OnboardingForm::default(),
                },
                DashboardEvent::Logout,
            ),
        ];

        for (state, event) in cases {
            let (next, actions) = DashboardStateMachine::transition(state.clone(), event);
            assert_eq!(next, state);
            assert!(actions.is_empty());
        }
    }
}
