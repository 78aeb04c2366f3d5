//! Cross-origin session check against the admin panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! The public site cannot read the admin origin's storage, so it embeds the
//! admin origin's auth-check page in a hidden frame and waits for that page
//! to post an `AUTH_CHECK_RESULT` message back. The root page runs this once
//! on mount to decide whether a signed-in visitor should be sent straight to
//! their dashboard.
//!
//! DESIGN
//! ======
//! The browser is behind [`CrossOriginChannel`], so the protocol runs against
//! a fake channel in tests. A handshake:
//! 1. opens the embedded context,
//! 2. starts listening,
//! 3. races the listener against the caller's deadline.
//!
//! The first valid message wins. Messages from origins outside the
//! allow-list, of another type, or with a malformed payload are dropped
//! without ending the handshake. Both exits close the embedded context and
//! drop the listener before returning, so late messages have nowhere to go.
//!
//! ERROR HANDLING
//! ==============
//! A timeout is an error, not a logged-out result. [`SessionProbe`] keeps
//! "no answer" apart from "answered: not signed in" so the choice to fall
//! back to the public view stays with the page.

#[cfg(test)]
#[path = "auth_handshake_test.rs"]
mod auth_handshake_test;

use std::future::Future;
use std::time::Duration;

use futures::future::{self, Either};
use futures::{Stream, StreamExt};
use serde::Deserialize;

use super::types::{AuthCheckResult, Role};
use crate::config::{AppConfig, origin_of};

pub const AUTH_CHECK_PATH: &str = "/auth-check";
pub const AUTH_CHECK_RESULT_TYPE: &str = "AUTH_CHECK_RESULT";
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

pub const LOCAL_ADMIN_ORIGIN: &str = "http://localhost:3001";
pub const PRODUCTION_ADMIN_ORIGIN: &str = "https://admin.halaqa.academy";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HandshakeError {
    #[error("auth check timed out after {0:?}")]
    Timeout(Duration),

    #[error("auth check channel failed: {0}")]
    Channel(String),

    #[error("auth check channel closed before a result arrived")]
    ChannelClosed,
}

/// A message delivered to the page from another browsing context.
#[derive(Clone, Debug, PartialEq)]
pub struct InboundMessage {
    pub origin: String,
    pub data: serde_json::Value,
}

/// Browser capability the handshake needs: embed a page, hear its messages,
/// tear the page down.
pub trait CrossOriginChannel {
    type Handle;
    /// Messages posted to this window. Dropping the stream removes the
    /// listener.
    type Messages: Stream<Item = InboundMessage> + Unpin;

    /// Embed `url` in a hidden browsing context.
    ///
    /// # Errors
    ///
    /// [`HandshakeError::Channel`] when the context cannot be created.
    fn open(&self, url: &str) -> Result<Self::Handle, HandshakeError>;

    fn on_message(&self) -> Self::Messages;

    fn close(&self, handle: Self::Handle);
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "data")]
enum HandshakeMessage {
    #[serde(rename = "AUTH_CHECK_RESULT")]
    AuthCheckResult(AuthCheckResult),
}

/// Protocol parameters for one admin origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthHandshake {
    check_url: String,
    allowed_origins: Vec<String>,
    timeout: Duration,
}

impl AuthHandshake {
    /// Handshake against the configured admin origin. The allow-list holds the
    /// local and production admin origins plus the configured one.
    pub fn new(config: &AppConfig) -> Self {
        let mut allowed_origins = vec![LOCAL_ADMIN_ORIGIN.to_owned(), PRODUCTION_ADMIN_ORIGIN.to_owned()];
        if let Some(configured) = config.admin_origin() {
            if !allowed_origins.contains(&configured) {
                allowed_origins.push(configured);
            }
        }
        Self {
            check_url: format!("{}{AUTH_CHECK_PATH}", config.admin_base_url),
            allowed_origins,
            timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn check_url(&self) -> &str {
        &self.check_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Whether `origin` is trusted to report session state.
    pub fn is_allowed_origin(&self, origin: &str) -> bool {
        origin_of(origin).is_some_and(|normalized| self.allowed_origins.iter().any(|o| *o == normalized))
    }

    /// Extract a result from `message`, or `None` if it must be ignored.
    pub fn accept(&self, message: &InboundMessage) -> Option<AuthCheckResult> {
        if !self.is_allowed_origin(&message.origin) {
            leptos::logging::log!("auth handshake: ignoring message from {}", message.origin);
            return None;
        }
        if message.data.get("type").and_then(serde_json::Value::as_str) != Some(AUTH_CHECK_RESULT_TYPE) {
            return None;
        }
        match serde_json::from_value::<HandshakeMessage>(message.data.clone()) {
            Ok(HandshakeMessage::AuthCheckResult(result)) => Some(result),
            Err(e) => {
                leptos::logging::warn!("auth handshake: malformed {AUTH_CHECK_RESULT_TYPE} payload: {e}");
                None
            }
        }
    }

    /// Run one handshake over `channel`, giving up when `deadline` completes.
    ///
    /// `deadline` is normally a `self.timeout()` sleep; it is a parameter so
    /// tests control time.
    ///
    /// # Errors
    ///
    /// [`HandshakeError::Timeout`] when `deadline` wins, or a channel error.
    pub async fn check<C, D>(&self, channel: &C, deadline: D) -> Result<AuthCheckResult, HandshakeError>
    where
        C: CrossOriginChannel,
        D: Future<Output = ()>,
    {
        let handle = channel.open(&self.check_url)?;
        let mut messages = channel.on_message();
        let mut deadline = Box::pin(deadline);

        let outcome = loop {
            match future::select(messages.next(), &mut deadline).await {
                Either::Left((Some(message), _)) => {
                    if let Some(result) = self.accept(&message) {
                        break Ok(result);
                    }
                }
                Either::Left((None, _)) => break Err(HandshakeError::ChannelClosed),
                Either::Right(((), _)) => {
                    leptos::logging::warn!("auth handshake: no result within {:?}", self.timeout);
                    break Err(HandshakeError::Timeout(self.timeout));
                }
            }
        };

        drop(messages);
        channel.close(handle);
        outcome
    }
}

/// Handshake outcome with "unknown" kept apart from "signed out".
#[derive(Clone, Debug, PartialEq)]
pub enum SessionProbe {
    Authenticated(AuthCheckResult),
    Unauthenticated,
    Unknown(HandshakeError),
}

impl From<Result<AuthCheckResult, HandshakeError>> for SessionProbe {
    fn from(outcome: Result<AuthCheckResult, HandshakeError>) -> Self {
        match outcome {
            Ok(result) if result.is_authenticated => Self::Authenticated(result),
            Ok(_) => Self::Unauthenticated,
            Err(e) => Self::Unknown(e),
        }
    }
}

impl SessionProbe {
    /// Where the root page should send the visitor. Only a confirmed session
    /// redirects; unknown and signed-out visitors stay on the public view.
    pub fn redirect_target(&self, config: &AppConfig) -> Option<String> {
        match self {
            Self::Authenticated(result) => {
                let role = result.user.as_ref().map_or(Role::Unknown, |u| u.role);
                Some(dashboard_url(config, role.as_str()))
            }
            Self::Unauthenticated | Self::Unknown(_) => None,
        }
    }
}

/// Dashboard entry point on the admin origin for `role`.
///
/// Every role, recognized or not, lands on the same path; the admin panel
/// picks the role-specific dashboard itself.
pub fn dashboard_url(config: &AppConfig, role: &str) -> String {
    match Role::parse(role) {
        Role::Admin | Role::Teacher | Role::Student | Role::Parent | Role::Unknown => {
            format!("{}/dashboard", config.admin_base_url)
        }
    }
}

/// Run the handshake in the browser with a hidden iframe and a real timer.
///
/// # Errors
///
/// Same as [`AuthHandshake::check`]; outside the browser always
/// [`HandshakeError::Channel`].
pub async fn check_admin_session(config: &AppConfig) -> Result<AuthCheckResult, HandshakeError> {
    let handshake = AuthHandshake::new(config);
    #[cfg(feature = "hydrate")]
    {
        let channel = super::iframe_channel::IframeChannel;
        let deadline = gloo_timers::future::sleep(handshake.timeout());
        handshake.check(&channel, deadline).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = handshake;
        Err(HandshakeError::Channel("not available outside the browser".to_owned()))
    }
}
