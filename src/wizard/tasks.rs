//! The two asynchronous operations the wizard performs: the simulated submit
//! delay and turning an image into a previewable data URI.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    errors::{OnboardError, Result},
    validation::ImageUpload,
};

use super::lifetime::LifetimeGuard;

/// Result of work raced against a screen lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome<T> {
    Completed(T),
    /// The screen was torn down first; nothing may be applied.
    Cancelled,
}

impl<T> TaskOutcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TaskOutcome::Cancelled)
    }
}

/// Waits `duration` unless the screen goes away first.
pub async fn simulated_delay(duration: Duration, guard: &LifetimeGuard) -> TaskOutcome<()> {
    if !guard.is_alive() {
        return TaskOutcome::Cancelled;
    }
    tokio::select! {
        biased;
        _ = guard.ended() => TaskOutcome::Cancelled,
        _ = tokio::time::sleep(duration) => TaskOutcome::Completed(()),
    }
}

pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Encodes the upload off the async thread.
pub async fn render_preview(
    upload: ImageUpload,
    guard: &LifetimeGuard,
) -> Result<TaskOutcome<String>> {
    if !guard.is_alive() {
        return Ok(TaskOutcome::Cancelled);
    }
    let encode = tokio::task::spawn_blocking(move || data_uri(&upload.mime_type, &upload.bytes));
    tokio::select! {
        biased;
        _ = guard.ended() => Ok(TaskOutcome::Cancelled),
        joined = encode => {
            let uri = joined.map_err(|err| OnboardError::Task(err.to_string()))?;
            Ok(TaskOutcome::Completed(uri))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::lifetime::ScreenLifetime;

    #[test]
    fn data_uri_uses_standard_base64() {
        assert_eq!(data_uri("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[tokio::test(start_paused = true)]
    async fn delay_completes_while_screen_alive() {
        let lifetime = ScreenLifetime::new();
        let outcome = simulated_delay(Duration::from_millis(1500), &lifetime.guard()).await;
        assert_eq!(outcome, TaskOutcome::Completed(()));
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_cancelled_by_teardown() {
        let mut lifetime = ScreenLifetime::new();
        let guard = lifetime.guard();
        let pending = tokio::spawn(async move {
            simulated_delay(Duration::from_millis(1500), &guard).await
        });
        tokio::time::sleep(Duration::from_millis(500)).await;
        lifetime.teardown();
        let outcome = pending.await.expect("join");
        assert!(outcome.is_cancelled());
    }

    #[tokio::test]
    async fn preview_is_rendered_for_live_screen() {
        let lifetime = ScreenLifetime::new();
        let upload = ImageUpload::new("a.gif", "image/gif", vec![1, 2, 3]);
        let outcome = render_preview(upload, &lifetime.guard())
            .await
            .expect("preview");
        assert_eq!(
            outcome,
            TaskOutcome::Completed("data:image/gif;base64,AQID".to_string())
        );
    }

    #[tokio::test]
    async fn preview_for_ended_screen_is_cancelled() {
        let mut lifetime = ScreenLifetime::new();
        let guard = lifetime.guard();
        lifetime.teardown();
        let upload = ImageUpload::new("a.gif", "image/gif", vec![1, 2, 3]);
        let outcome = render_preview(upload, &guard).await.expect("preview");
        assert!(outcome.is_cancelled());
    }
}
