//! Shared transport policy: status checks, rate-limit handling, retries.
//!
//! Transient failures (connect errors, timeouts, 5xx responses) retry with
//! exponential backoff up to a configured attempt cap; 429 responses honor
//! the server-supplied `Retry-After`. Anything that survives the retry
//! budget is returned to the caller — the pagination layer above never
//! retries again.

use std::time::Duration;

use crate::error::ApiError;

/// Base delay for exponential backoff.
const BACKOFF_BASE_MS: u64 = 500;

/// Ceiling for a single backoff sleep.
const BACKOFF_CAP_MS: u64 = 8_000;

/// Send a request, retrying transient failures up to `max_retries` times.
///
/// # Errors
///
/// Returns the terminal [`ApiError`] once the retry budget is exhausted or a
/// non-retryable failure occurs.
pub(crate) async fn send_with_retry(
    request: reqwest::RequestBuilder,
    max_retries: u32,
) -> Result<reqwest::Response, ApiError> {
    let mut attempt: u32 = 0;
    loop {
        let Some(this_try) = request.try_clone() else {
            // Non-cloneable (streaming) bodies cannot be retried.
            return check_response(request.send().await?).await;
        };

        match this_try.send().await {
            Ok(resp) if resp.status() == 429 => {
                let retry_after_secs = parse_retry_after(&resp);
                if attempt >= max_retries {
                    return Err(ApiError::RateLimited { retry_after_secs });
                }
                tracing::debug!(retry_after_secs, attempt, "rate limited; honoring Retry-After");
                tokio::time::sleep(Duration::from_secs(retry_after_secs)).await;
            }
            Ok(resp) if resp.status().is_server_error() => {
                if attempt >= max_retries {
                    return Err(ApiError::Api {
                        status: resp.status().as_u16(),
                        message: resp.text().await.unwrap_or_default(),
                    });
                }
                tracing::debug!(status = resp.status().as_u16(), attempt, "server error; backing off");
                tokio::time::sleep(backoff_delay(attempt)).await;
            }
            Ok(resp) => return check_response(resp).await,
            Err(error) => {
                if attempt >= max_retries || !is_transient(&error) {
                    return Err(ApiError::Http(error));
                }
                tracing::debug!(%error, attempt, "transport error; backing off");
                tokio::time::sleep(backoff_delay(attempt)).await;
            }
        }
        attempt += 1;
    }
}

/// Check a response for common error conditions.
///
/// Returns the response unchanged on success. 429 becomes
/// [`ApiError::RateLimited`] with `Retry-After` parsing; any other
/// non-success status becomes [`ApiError::Api`] with the body as message.
pub(crate) async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if resp.status() == 429 {
        return Err(ApiError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(ApiError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

fn backoff_delay(attempt: u32) -> Duration {
    let exp = 2u64.saturating_pow(attempt);
    Duration::from_millis(BACKOFF_BASE_MS.saturating_mul(exp).min(BACKOFF_CAP_MS))
}

fn is_transient(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout()
}
