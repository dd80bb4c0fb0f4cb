//! Live notification stream (Server-Sent Events).
//!
//! One long-lived task per connected client, alive until the peer
//! disconnects. Each connection:
//! - yields a `connected` hello immediately,
//! - then forwards every fan-out message its buffer managed to hold,
//! - with a periodic `ping` keep-alive when there is no real traffic.
//!
//! Cancellation is cooperative: closing the HTTP connection drops the
//! stream, and dropping the stream unregisters the listener.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::{self, Stream, StreamExt};
use tracing::info;

use crate::auth::CurrentUser;
use crate::state::AppState;

/// Interval of the keep-alive ping in the absence of real traffic.
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// GET /api/notifications/stream
///
/// EventSource clients cannot set headers, so the token may also arrive
/// as a `?token=` query parameter (handled by the auth extractor).
pub async fn stream(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!(user = %user.id, "Notification stream opened");

    let subscription = state.notifier.subscribe();

    let hello = stream::once(async { Ok(Event::default().data("connected")) });
    let messages = subscription.map(|msg| Ok(Event::default().data(msg)));

    Sse::new(hello.chain(messages))
        .keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL).text("ping"))
}
