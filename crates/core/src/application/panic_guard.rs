// Panic isolation for background tasks
use tokio::task::JoinError;
use tracing::error;

/// Human-readable reason a spawned task ended without a value
///
/// Panics raised inside a `tokio::spawn`ed task are caught by the runtime
/// and surface here instead of tearing down the caller.
pub fn join_failure_message(join_err: JoinError) -> String {
    if join_err.is_cancelled() {
        error!("Background task cancelled");
        return "task cancelled".to_string();
    }

    let panic_info = join_err.into_panic();
    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    };

    error!(panic_msg = %panic_msg, "Background task panicked");
    format!("task panicked: {}", panic_msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_string_panic_message() {
        let handle = tokio::spawn(async {
            panic!("{}", String::from("boom"));
        });

        let message = join_failure_message(handle.await.unwrap_err());

        assert_eq!(message, "task panicked: boom");
    }

    #[tokio::test]
    async fn test_str_panic_message() {
        let handle = tokio::spawn(async {
            panic!("static boom");
        });

        let message = join_failure_message(handle.await.unwrap_err());

        assert!(message.contains("static boom"));
    }

    #[tokio::test]
    async fn test_cancelled_task() {
        let handle = tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        });
        handle.abort();

        let message = join_failure_message(handle.await.unwrap_err());

        assert_eq!(message, "task cancelled");
    }
}
