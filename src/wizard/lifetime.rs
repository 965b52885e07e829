use tokio_util::sync::CancellationToken;

/// Tracks how long a mounted screen stays alive.
///
/// Pending async work holds a [`LifetimeGuard`] derived from the current
/// token. Tearing the screen down cancels that token, so every outstanding
/// guard reports the lifetime as ended and its result is dropped.
#[derive(Debug)]
pub struct ScreenLifetime {
    token: CancellationToken,
}

impl Default for ScreenLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenLifetime {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    pub fn guard(&self) -> LifetimeGuard {
        LifetimeGuard {
            token: self.token.child_token(),
        }
    }

    /// Ends the current lifetime and starts a fresh one for the remounted screen.
    pub fn teardown(&mut self) {
        self.token.cancel();
        self.token = CancellationToken::new();
    }
}

impl Drop for ScreenLifetime {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[derive(Debug, Clone)]
pub struct LifetimeGuard {
    token: CancellationToken,
}

impl LifetimeGuard {
    pub fn is_alive(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Resolves once the owning screen has been torn down.
    pub async fn ended(&self) {
        self.token.cancelled().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teardown_ends_existing_guards_only() {
        let mut lifetime = ScreenLifetime::new();
        let before = lifetime.guard();
        assert!(before.is_alive());

        lifetime.teardown();
        assert!(!before.is_alive());
        assert!(lifetime.guard().is_alive());
    }

    #[test]
    fn dropping_the_screen_ends_guards() {
        let lifetime = ScreenLifetime::new();
        let guard = lifetime.guard();
        drop(lifetime);
        assert!(!guard.is_alive());
    }

    #[tokio::test]
    async fn ended_resolves_after_teardown() {
        let mut lifetime = ScreenLifetime::new();
        let guard = lifetime.guard();
        lifetime.teardown();
        guard.ended().await;
        assert!(!guard.is_alive());
    }
}
