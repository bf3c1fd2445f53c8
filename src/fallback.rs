//! Per-section fallback to mock data.
//!
//! [`compose`] is the hard boundary between adapters and the render pass:
//! whatever an adapter does (fail, hang, panic), the caller gets back a
//! complete record and a [`SourceHealth`] saying whether it is live.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::error::SourceError;
use crate::model::{SourceHealth, SourceName};

/// A section's record together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub health: SourceHealth,
}

impl<T> Sourced<T> {
    pub fn is_live(&self) -> bool {
        self.health.is_live
    }
}

/// Resolve an adapter outcome against its mock.
pub fn settle<T>(source: SourceName, mock: T, outcome: Result<T, SourceError>) -> Sourced<T> {
    match outcome {
        Ok(value) => {
            debug!(source = %source, "Live data");
            Sourced {
                value,
                health: SourceHealth::live(source),
            }
        }
        Err(e) => {
            if e.is_internal() {
                error!(source = %source, error = %e, "Adapter bug, serving mock data");
            } else {
                warn!(source = %source, error = %e, "Source degraded, serving mock data");
            }
            Sourced {
                value: mock,
                health: SourceHealth::degraded(source, &e.to_string()),
            }
        }
    }
}

/// Run `fetch` on its own task with a deadline and settle the result.
///
/// A timeout counts as `Unavailable`; a panic inside `fetch` counts as
/// `Internal`. Neither escapes.
pub async fn compose<T, Fut>(
    source: SourceName,
    mock: T,
    timeout: Duration,
    fetch: Fut,
) -> Sourced<T>
where
    T: Send + 'static,
    Fut: Future<Output = Result<T, SourceError>> + Send + 'static,
{
    let mut handle = tokio::spawn(fetch);

    let outcome = match tokio::time::timeout(timeout, &mut handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(SourceError::Internal(join_error.to_string())),
        Err(_) => {
            handle.abort();
            Err(SourceError::Unavailable(format!(
                "no response within {}s",
                timeout.as_secs()
            )))
        }
    };

    settle(source, mock, outcome)
}
