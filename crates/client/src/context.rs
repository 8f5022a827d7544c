//! Cached client-side session state.

use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicBool, Ordering},
};

use backstage_auth::Identity;
use chrono::{DateTime, Utc};

use crate::api::{ClientError, SessionApi};
use crate::navigation::Navigator;

/// What dependent UI should render right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    /// Validation still in flight: show a loading affordance, never protected content.
    Loading,
    Authenticated(Identity),
    Anonymous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Loading,
    Ready {
        identity: Option<Identity>,
        validated_at: DateTime<Utc>,
    },
}

struct Inner {
    api: Arc<dyn SessionApi>,
    navigator: Arc<dyn Navigator>,
    state: RwLock<SessionState>,
    mounted: AtomicBool,
}

/// Session context for one application mount.
///
/// Constructed once at startup and handed down by reference (clones share
/// state). There is no background refresh: the identity changes only on
/// [`mount`](Self::mount), [`logout`](Self::logout) or
/// [`note_unauthorized`](Self::note_unauthorized).
#[derive(Clone)]
pub struct ClientSessionContext {
    inner: Arc<Inner>,
}

impl ClientSessionContext {
    pub fn new(api: Arc<dyn SessionApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                navigator,
                state: RwLock::new(SessionState::Loading),
                mounted: AtomicBool::new(false),
            }),
        }
    }

    /// Run the single validation for this mount. Later calls are no-ops.
    ///
    /// Any failure leaves the context signed out.
    pub async fn mount(&self) {
        if self.inner.mounted.swap(true, Ordering::SeqCst) {
            return;
        }

        let identity = match self.inner.api.fetch_session().await {
            Ok(status) if status.authenticated => status.user,
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "session validation failed; treating as signed out");
                None
            }
        };

        self.set_ready(identity);
    }

    pub fn view(&self) -> SessionView {
        match &*self.read() {
            SessionState::Loading => SessionView::Loading,
            SessionState::Ready {
                identity: Some(identity),
                ..
            } => SessionView::Authenticated(identity.clone()),
            SessionState::Ready { identity: None, .. } => SessionView::Anonymous,
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        match &*self.read() {
            SessionState::Ready { identity, .. } => identity.clone(),
            SessionState::Loading => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.read(), SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(
            *self.read(),
            SessionState::Ready {
                identity: Some(_),
                ..
            }
        )
    }

    /// When the cached view was last settled.
    pub fn validated_at(&self) -> Option<DateTime<Utc>> {
        match &*self.read() {
            SessionState::Ready { validated_at, .. } => Some(*validated_at),
            SessionState::Loading => None,
        }
    }

    /// Sign out at the auth service, then forget the identity and go to `/`.
    ///
    /// If the remote call fails the error is returned and local state is
    /// left untouched, since the remote session still exists.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if let Err(e) = self.inner.api.sign_out().await {
            tracing::warn!(error = %e, "sign-out failed");
            return Err(e);
        }

        self.set_ready(None);
        self.inner.navigator.navigate("/");
        Ok(())
    }

    /// Record that a protected API call came back 401.
    ///
    /// The server is the authority: drop the cached identity so the UI
    /// falls back to its signed-out view.
    pub fn note_unauthorized(&self) {
        if self.is_authenticated() {
            tracing::info!("protected call returned 401; clearing cached session");
            self.set_ready(None);
        }
    }

    fn set_ready(&self, identity: Option<Identity>) {
        let mut state = self.inner.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = SessionState::Ready {
            identity,
            validated_at: Utc::now(),
        };
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use backstage_auth::SessionStatus;

    use super::*;

    struct ScriptedApi {
        session: Result<SessionStatus, ClientError>,
        sign_out: Result<(), ClientError>,
        fetches: AtomicUsize,
        sign_outs: AtomicUsize,
    }

    impl ScriptedApi {
        fn new(session: Result<SessionStatus, ClientError>) -> Self {
            Self {
                session,
                sign_out: Ok(()),
                fetches: AtomicUsize::new(0),
                sign_outs: AtomicUsize::new(0),
            }
        }

        fn failing_sign_out(mut self) -> Self {
            self.sign_out = Err(ClientError::Api(500));
            self
        }
    }

    #[async_trait::async_trait]
    impl SessionApi for ScriptedApi {
        async fn fetch_session(&self) -> Result<SessionStatus, ClientError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.session.clone()
        }

        async fn sign_out(&self) -> Result<(), ClientError> {
            self.sign_outs.fetch_add(1, Ordering::SeqCst);
            self.sign_out.clone()
        }
    }

    #[derive(Default)]
    struct RecordingNavigator(Mutex<Vec<String>>);

    impl Navigator for RecordingNavigator {
        fn navigate(&self, path: &str) {
            self.0.lock().unwrap().push(path.to_string());
        }
    }

    fn ada() -> Identity {
        Identity::new("u1", "a@b.com", "Ada")
    }

    fn context(api: Arc<ScriptedApi>) -> (ClientSessionContext, Arc<RecordingNavigator>) {
        let nav = Arc::new(RecordingNavigator::default());
        (ClientSessionContext::new(api, nav.clone()), nav)
    }

    #[tokio::test]
    async fn starts_loading_until_mounted() {
        let api = Arc::new(ScriptedApi::new(Ok(SessionStatus::authenticated(ada()))));
        let (ctx, _) = context(api);

        assert!(ctx.is_loading());
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.view(), SessionView::Loading);
        assert_eq!(ctx.identity(), None);
        assert_eq!(ctx.validated_at(), None);

        ctx.mount().await;

        assert!(!ctx.is_loading());
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.identity(), Some(ada()));
        assert_eq!(ctx.view(), SessionView::Authenticated(ada()));
        assert!(ctx.validated_at().is_some());
    }

    #[tokio::test]
    async fn validates_once_per_mount() {
        let api = Arc::new(ScriptedApi::new(Ok(SessionStatus::authenticated(ada()))));
        let (ctx, _) = context(api.clone());

        ctx.mount().await;
        ctx.mount().await;
        ctx.clone().mount().await;

        assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_validation_is_signed_out() {
        let api = Arc::new(ScriptedApi::new(Err(ClientError::Network("refused".into()))));
        let (ctx, _) = context(api);

        ctx.mount().await;

        assert!(!ctx.is_loading());
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.view(), SessionView::Anonymous);
    }

    #[tokio::test]
    async fn authenticated_flag_without_user_is_signed_out() {
        let status = SessionStatus {
            authenticated: true,
            user: None,
        };
        let api = Arc::new(ScriptedApi::new(Ok(status)));
        let (ctx, _) = context(api);

        ctx.mount().await;
        assert_eq!(ctx.view(), SessionView::Anonymous);
    }

    #[tokio::test]
    async fn logout_clears_identity_and_navigates_home() {
        let api = Arc::new(ScriptedApi::new(Ok(SessionStatus::authenticated(ada()))));
        let (ctx, nav) = context(api.clone());
        ctx.mount().await;

        ctx.logout().await.unwrap();

        assert_eq!(api.sign_outs.load(Ordering::SeqCst), 1);
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.identity(), None);
        assert_eq!(*nav.0.lock().unwrap(), vec!["/".to_string()]);
    }

    #[tokio::test]
    async fn failed_logout_keeps_local_state() {
        let api = Arc::new(ScriptedApi::new(Ok(SessionStatus::authenticated(ada()))).failing_sign_out());
        let (ctx, nav) = context(api);
        ctx.mount().await;

        let err = ctx.logout().await.unwrap_err();

        assert_eq!(err, ClientError::Api(500));
        assert_eq!(ctx.identity(), Some(ada()));
        assert!(nav.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unauthorized_api_response_drops_cached_identity() {
        let api = Arc::new(ScriptedApi::new(Ok(SessionStatus::authenticated(ada()))));
        let (ctx, nav) = context(api.clone());
        ctx.mount().await;

        ctx.note_unauthorized();

        assert_eq!(ctx.view(), SessionView::Anonymous);
        assert!(nav.0.lock().unwrap().is_empty());
        // No silent re-validation.
        assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn closures_work_as_navigators() {
        let api = Arc::new(ScriptedApi::new(Ok(SessionStatus::authenticated(ada()))));
        let visited = Arc::new(Mutex::new(None::<String>));
        let sink = visited.clone();
        let ctx = ClientSessionContext::new(
            api,
            Arc::new(move |path: &str| *sink.lock().unwrap() = Some(path.to_string())),
        );

        ctx.mount().await;
        ctx.logout().await.unwrap();

        assert_eq!(visited.lock().unwrap().as_deref(), Some("/"));
    }
}
