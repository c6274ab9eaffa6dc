//! Sessions: identity and cooperative cancellation for engine work.
//! Temp regions are owned per session, and long-running operations poll
//! the session's cancel flag at row granularity.

use crate::error::EngineError;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

///
/// SessionId
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct SessionId(u64);

impl SessionId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

///
/// CancelToken
///
/// One-way cancellation flag shared by clone. Holders poll it at safe
/// points; nothing blocks on it, and no data is published through it, so
/// relaxed loads are enough.
///

#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag. Safe from any thread, any number of times.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

///
/// Session
///

#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    cancel: CancelToken,
}

impl Session {
    #[must_use]
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            cancel: CancelToken::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }
}

///
/// QueryContext
///
/// The slice of a session that engine operations carry: identity for
/// temp-region ownership plus the cancel flag to poll.
///

#[derive(Clone, Debug)]
pub struct QueryContext {
    session_id: SessionId,
    cancel: CancelToken,
}

impl QueryContext {
    #[must_use]
    pub fn new(session: &Session) -> Self {
        Self {
            session_id: session.id(),
            cancel: session.cancel_token().clone(),
        }
    }

    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Bail out once the session has been cancelled.
    pub fn ensure_active(&self) -> Result<(), EngineError> {
        if self.cancel.is_cancelled() {
            return Err(EngineError::cancelled());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CancelToken, QueryContext, Session, SessionId};

    #[test]
    fn cancel_is_visible_across_clones() {
        let token = CancelToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());

        token.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn ensure_active_reflects_the_session_flag() {
        let session = Session::new(SessionId::new(7));
        let context = QueryContext::new(&session);
        assert_eq!(context.session_id(), SessionId::new(7));

        context.ensure_active().expect("fresh session is active");

        session.cancel_token().cancel();
        let err = context
            .ensure_active()
            .expect_err("cancelled session should refuse work");
        assert!(err.is_cancelled());
    }
}
