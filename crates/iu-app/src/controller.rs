//! Dashboard controller.
//!
//! Drives [`DashboardStateMachine`] and executes the side effects it asks
//! for. Actions run before the next state is committed; when an action
//! fails the state stays where it was, except for a failed role lookup,
//! which leaves the user on the login screen.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use iu_core::ports::ActiveWalletPort;
use iu_core::{
    AuthStatus, BalanceSnapshot, DashboardAction, DashboardEvent, DashboardState,
    DashboardStateMachine, DashboardView, Erc20Token, NativeCurrency, OnboardingError,
    OnboardingForm, Role, SendForm, Session, TransferError, TransferRecord, UserId,
};

use crate::deps::AppDeps;
use crate::usecases::session::PENDING_ROLE_KEY;
use crate::usecases::{
    BalanceError, ClearRoleCache, PersistRole, RefreshBalances, ResolveRole, SubmitTransfer,
};
use crate::view::DashboardSnapshot;

/// Errors surfaced by the controller. Every one of them has already been
/// logged and alerted when it is returned.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("{0}")]
    Onboarding(#[from] OnboardingError),
    #[error("{0}")]
    Transfer(#[from] TransferError),
    #[error("{0}")]
    Balance(#[from] BalanceError),
    #[error("identity provider error: {0:#}")]
    Provider(anyhow::Error),
    #[error("could not look up your role: {0:#}")]
    RoleLookup(anyhow::Error),
    #[error("could not save your profile: {0:#}")]
    Profile(anyhow::Error),
    #[error("local storage error: {0:#}")]
    Storage(anyhow::Error),
    #[error("wallet unavailable: {0:#}")]
    Wallet(anyhow::Error),
    #[error("could not open ramp: {0:#}")]
    Ramp(anyhow::Error),
    #[error("{action} is not available on the {state} screen")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },
}

/// Values fixed for the lifetime of the controller.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub token: Erc20Token,
    pub native: NativeCurrency,
    pub network_name: String,
    /// Delay between an accepted transfer and the balance re-read.
    pub post_transfer_refresh: Duration,
}

pub struct DashboardController {
    deps: AppDeps,
    settings: ControllerSettings,

    state: Mutex<DashboardState>,
    send_form: Mutex<SendForm>,
    /// Newest first.
    activity: Mutex<Vec<TransferRecord>>,
    wallet: Mutex<Option<(UserId, Arc<dyn ActiveWalletPort>)>>,
    pending_refresh: Mutex<Option<JoinHandle<()>>>,

    resolve_role: ResolveRole,
    persist_role: PersistRole,
    clear_role_cache: ClearRoleCache,
    refresh: RefreshBalances,
    submit: SubmitTransfer,
}

impl DashboardController {
    pub fn new(deps: AppDeps, settings: ControllerSettings) -> Self {
        let resolve_role = ResolveRole::new(deps.local_store.clone(), deps.profiles.clone());
        let persist_role = PersistRole::new(
            deps.local_store.clone(),
            deps.profiles.clone(),
            deps.auth.clone(),
        );
        let clear_role_cache = ClearRoleCache::new(deps.local_store.clone());
        let refresh = RefreshBalances::new(
            deps.chain.clone(),
            deps.clock.clone(),
            deps.notifier.clone(),
            settings.token.clone(),
            settings.native.clone(),
        );
        let submit = SubmitTransfer::new(settings.token.clone(), deps.clock.clone());

        Self {
            deps,
            settings,
            state: Mutex::new(DashboardState::Loading),
            send_form: Mutex::new(SendForm::default()),
            activity: Mutex::new(Vec::new()),
            wallet: Mutex::new(None),
            pending_refresh: Mutex::new(None),
            resolve_role,
            persist_role,
            clear_role_cache,
            refresh,
            submit,
        }
    }

    pub async fn state(&self) -> DashboardState {
        self.state.lock().await.clone()
    }

    /// Asks the identity provider for its status and routes accordingly.
    pub async fn start(&self) -> Result<DashboardState, ControllerError> {
        let status = match self.deps.auth.status().await {
            Ok(status) => status,
            Err(err) => return Err(self.report(ControllerError::Provider(err))),
        };
        self.dispatch(DashboardEvent::AuthReported(status)).await
    }

    /// Logs in, remembering the role picked on the login screen so the
    /// onboarding form can be prefilled with it.
    pub async fn begin_login(
        &self,
        pending_role: Option<Role>,
    ) -> Result<DashboardState, ControllerError> {
        self.require("login", |s| {
            matches!(s, DashboardState::Loading | DashboardState::Login)
        })
        .await?;

        if let Some(role) = pending_role {
            if let Err(err) = self.deps.local_store.set(PENDING_ROLE_KEY, role.as_str()).await {
                return Err(self.report(ControllerError::Storage(err)));
            }
        }
        let session = match self.deps.auth.login().await {
            Ok(session) => session,
            Err(err) => return Err(self.report(ControllerError::Provider(err))),
        };
        self.dispatch(DashboardEvent::AuthReported(AuthStatus::Authenticated(session)))
            .await
    }

    pub async fn update_onboarding(
        &self,
        form: OnboardingForm,
    ) -> Result<DashboardState, ControllerError> {
        self.require("editing onboarding", |s| {
            matches!(s, DashboardState::Onboarding { .. })
        })
        .await?;
        self.dispatch(DashboardEvent::EditOnboarding(form)).await
    }

    /// Submits the onboarding form. An incomplete form is reported and the
    /// state is left unchanged.
    pub async fn submit_onboarding(&self) -> Result<DashboardState, ControllerError> {
        let form = match self.state().await {
            DashboardState::Onboarding { form, .. } => form,
            other => {
                return Err(self.report(ControllerError::InvalidState {
                    action: "submitting onboarding",
                    state: other.name(),
                }))
            }
        };
        if let Err(err) = form.validate() {
            return Err(self.report(err.into()));
        }
        self.dispatch(DashboardEvent::SubmitOnboarding).await
    }

    pub async fn open_send(&self) -> Result<DashboardState, ControllerError> {
        self.require("sending", |s| {
            matches!(s, DashboardState::Dashboard { view: DashboardView::Home, .. })
        })
        .await?;
        self.dispatch(DashboardEvent::OpenSend).await
    }

    pub async fn close_send(&self) -> Result<DashboardState, ControllerError> {
        self.dispatch(DashboardEvent::CloseSend).await
    }

    pub async fn update_send_form(&self, form: SendForm) {
        *self.send_form.lock().await = form;
    }

    pub async fn send_form(&self) -> SendForm {
        self.send_form.lock().await.clone()
    }

    /// Manual balance refresh.
    pub async fn refresh_balances(&self) -> Result<BalanceSnapshot, ControllerError> {
        let session = self.dashboard_session("refreshing balances").await?;
        let wallet = self.active_wallet(&session).await?;
        self.refresh
            .execute(wallet.as_ref())
            .await
            .map_err(|err| self.report(err.into()))
    }

    /// Sends the current send form. On success the record goes to the top
    /// of the activity list, the form is cleared, the view returns home and
    /// a delayed balance refresh is scheduled. On failure the form is kept.
    pub async fn submit_transfer(&self) -> Result<TransferRecord, ControllerError> {
        let session = match self.state().await {
            DashboardState::Dashboard {
                session,
                view: DashboardView::Send,
                ..
            } => session,
            other => {
                return Err(self.report(ControllerError::InvalidState {
                    action: "submitting a transfer",
                    state: other.name(),
                }))
            }
        };
        let wallet = self.active_wallet(&session).await?;
        let form = self.send_form().await;

        let record = self
            .submit
            .execute(wallet.as_ref(), &form)
            .await
            .map_err(|err| self.report(err.into()))?;

        self.activity.lock().await.insert(0, record.clone());
        self.send_form.lock().await.clear();
        self.dispatch(DashboardEvent::TransferCompleted).await?;
        Ok(record)
    }

    /// Returns the fiat funding URL for the active wallet.
    pub async fn open_funding(&self) -> Result<String, ControllerError> {
        let session = self.dashboard_session("funding").await?;
        let wallet = self.active_wallet(&session).await?;
        self.deps
            .ramp
            .open_on_ramp(wallet.address())
            .await
            .map_err(|err| self.report(ControllerError::Ramp(err)))
    }

    /// Returns the off-ramp URL for the active wallet.
    pub async fn open_off_ramp(&self) -> Result<String, ControllerError> {
        let session = self.dashboard_session("withdrawing").await?;
        let wallet = self.active_wallet(&session).await?;
        self.deps
            .ramp
            .open_off_ramp(wallet.address())
            .await
            .map_err(|err| self.report(ControllerError::Ramp(err)))
    }

    /// Signs out and drops everything held for the session.
    pub async fn logout(&self) -> Result<DashboardState, ControllerError> {
        self.require("logout", |s| matches!(s, DashboardState::Dashboard { .. }))
            .await?;
        let state = self.dispatch(DashboardEvent::Logout).await?;

        if let Some(handle) = self.pending_refresh.lock().await.take() {
            handle.abort();
        }
        self.wallet.lock().await.take();
        self.activity.lock().await.clear();
        self.send_form.lock().await.clear();
        self.refresh.clear().await;
        Ok(state)
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            state: self.state().await,
            balance: self.refresh.latest().await,
            wallet_address: self.wallet.lock().await.as_ref().map(|(_, w)| w.address()),
            activity: self.activity.lock().await.clone(),
            send_form: self.send_form().await,
            submitting: self.submit.is_in_progress(),
            token_symbol: self.settings.token.symbol.clone(),
            native_symbol: self.settings.native.symbol.clone(),
            network_name: self.settings.network_name.clone(),
        }
    }

    /// Waits for the post-transfer refresh, if one is scheduled.
    pub async fn wait_for_pending_refresh(&self) {
        let handle = self.pending_refresh.lock().await.take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                if !err.is_cancelled() {
                    warn!(error = %err, "post-transfer refresh task failed");
                }
            }
        }
    }

    async fn dispatch(&self, event: DashboardEvent) -> Result<DashboardState, ControllerError> {
        // Held for the whole dispatch so concurrent calls cannot run the
        // same actions twice.
        let mut state = self.state.lock().await;

        let span = info_span!("usecase.dashboard_controller.dispatch", event = ?event);
        async {
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from = state.name();
                let event_name = format!("{:?}", event);
                let (next, actions) = DashboardStateMachine::transition(state.clone(), event);
                info!(from, to = next.name(), event = %event_name, "dashboard state transition");

                match self.execute_actions(&next, actions).await {
                    Ok(follow_up) => {
                        *state = next;
                        pending_events.extend(follow_up);
                    }
                    Err(err) => {
                        if matches!(err, ControllerError::RoleLookup(_)) {
                            *state = DashboardState::Login;
                        }
                        return Err(self.report(err));
                    }
                }
            }

            Ok(state.clone())
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(
        &self,
        next: &DashboardState,
        actions: Vec<DashboardAction>,
    ) -> Result<Vec<DashboardEvent>, ControllerError> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "dashboard executing action");
            match action {
                DashboardAction::ResolveRole { session } => {
                    let resolution = self
                        .resolve_role
                        .execute(&session)
                        .await
                        .map_err(ControllerError::RoleLookup)?;
                    follow_up_events.push(DashboardEvent::RoleResolved {
                        session,
                        role: resolution.role,
                        pending: resolution.pending,
                    });
                }
                DashboardAction::PersistRole {
                    session,
                    role,
                    form,
                } => {
                    let wallet_address = match self.active_wallet_quiet(&session).await {
                        Ok(wallet) => Some(wallet.address()),
                        Err(err) => {
                            debug!(error = %err, "saving profile without wallet address");
                            None
                        }
                    };
                    self.persist_role
                        .execute(&session, role, &form, wallet_address)
                        .await
                        .map_err(ControllerError::Profile)?;
                }
                DashboardAction::RefreshBalances => {
                    self.refresh_after_transition(next).await;
                }
                DashboardAction::ScheduleBalanceRefresh => {
                    if let Some(session) = next.session() {
                        let wallet = self.active_wallet_quiet(session).await?;
                        let handle = self
                            .refresh
                            .schedule(wallet, self.settings.post_transfer_refresh);
                        if let Some(previous) = self.pending_refresh.lock().await.replace(handle) {
                            debug!(finished = previous.is_finished(), "replacing pending refresh");
                        }
                    }
                }
                DashboardAction::ClearRoleCache { user_id } => {
                    self.clear_role_cache
                        .execute(&user_id)
                        .await
                        .map_err(ControllerError::Storage)?;
                }
                DashboardAction::SignOut => {
                    self.deps.auth.logout().await.map_err(ControllerError::Provider)?;
                }
            }
        }
        Ok(follow_up_events)
    }

    /// Balance read on entering the dashboard. Failures are reported but do
    /// not block the transition.
    async fn refresh_after_transition(&self, next: &DashboardState) {
        let Some(session) = next.session() else {
            return;
        };
        let wallet = match self.active_wallet_quiet(session).await {
            Ok(wallet) => wallet,
            Err(err) => {
                self.report(err);
                return;
            }
        };
        match self.refresh.execute(wallet.as_ref()).await {
            Ok(_) => {}
            Err(BalanceError::WalletNotReady) => debug!("wallet not ready, balances not read"),
            Err(err) => {
                self.report(err.into());
            }
        }
    }

    async fn active_wallet(
        &self,
        session: &Session,
    ) -> Result<Arc<dyn ActiveWalletPort>, ControllerError> {
        self.active_wallet_quiet(session)
            .await
            .map_err(|err| self.report(err))
    }

    async fn active_wallet_quiet(
        &self,
        session: &Session,
    ) -> Result<Arc<dyn ActiveWalletPort>, ControllerError> {
        let mut cached = self.wallet.lock().await;
        if let Some((user_id, wallet)) = cached.as_ref() {
            if *user_id == session.user_id {
                return Ok(wallet.clone());
            }
        }
        let wallet = self
            .deps
            .wallet_connector
            .connect(session)
            .map_err(ControllerError::Wallet)?;
        info!(kind = %wallet.kind(), address = %wallet.address(), "active wallet connected");
        *cached = Some((session.user_id.clone(), wallet.clone()));
        Ok(wallet)
    }

    async fn dashboard_session(&self, action: &'static str) -> Result<Session, ControllerError> {
        match self.state().await {
            DashboardState::Dashboard { session, .. } => Ok(session),
            other => Err(self.report(ControllerError::InvalidState {
                action,
                state: other.name(),
            })),
        }
    }

    async fn require(
        &self,
        action: &'static str,
        allowed: impl Fn(&DashboardState) -> bool,
    ) -> Result<(), ControllerError> {
        let state = self.state.lock().await;
        if allowed(&state) {
            return Ok(());
        }
        let err = ControllerError::InvalidState {
            action,
            state: state.name(),
        };
        drop(state);
        Err(self.report(err))
    }

    fn report(&self, err: ControllerError) -> ControllerError {
        warn!(error = %err, "dashboard operation failed");
        self.deps.notifier.alert(&err.to_string());
        err
    }
}
