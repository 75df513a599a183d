//! Stream aggregation
//!
//! Drives the fetch, flatten and write steps across the resolved
//! repositories,
//! yielding the chunks of a JSON array as they become available. Rows
//! cross a bounded channel, which is the backpressure point: a slow
//! consumer suspends the pipeline before the next row, a vanished
//! consumer stops it before the next remote call.

use std::convert::Infallible;
use std::sync::Arc;

use actix_web::web::Bytes;
use serde::Serialize;
use tokio::sync::mpsc::{self, Sender};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info};

use crate::models::{RepoSummary, StreamErrorMarker};
use crate::services::github::HostingApi;
use crate::services::retry::RetryConfig;
use crate::services::stats::{self, MemberNames};

/// Serialized rows allowed between producer and consumer before the
/// pipeline suspends.
const CHANNEL_CAPACITY: usize = 32;

/// Per-request pipeline settings.
#[derive(Debug, Clone, Default)]
pub struct StreamOptions {
    pub retry: RetryConfig,
    pub resolve_member_names: bool,
}

/// Stream the flattened contributor statistics of `repos`, sequentially
/// and in the given order.
///
/// Failures after the first byte cannot change the committed 200 status,
/// so the pipeline stops at the failing repository and appends a
/// [`StreamErrorMarker`] in-band instead of erroring the transport.
pub fn stream_rows(
    api: Arc<dyn HostingApi>,
    repos: Vec<RepoSummary>,
    options: StreamOptions,
) -> ReceiverStream<Result<Bytes, Infallible>> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        info!(
            "streaming contributor stats for {} repositories",
            repos.len()
        );

        let mut sink = ArraySink::new(tx);
        let mut names = MemberNames::new(options.resolve_member_names);

        'repos: for repo in &repos {
            let entries =
                match stats::fetch_contributor_stats(api.as_ref(), &options.retry, repo).await {
                    Ok(entries) => entries,
                    Err(err) => {
                        error!(
                            "aborting stream at {}/{}: {err}",
                            repo.owner.login, repo.name
                        );
                        let marker = StreamErrorMarker {
                            message: err.to_string(),
                            code: err.code(),
                        };
                        let _ = sink.write(&marker).await;
                        break 'repos;
                    }
                };

            for entry in &entries {
                let login = entry.author.as_ref().map(|a| a.login.as_str());
                let member = names
                    .display_name(api.as_ref(), &options.retry, login)
                    .await;
                for row in stats::flatten_entry(repo, entry, &member) {
                    if sink.write(&row).await.is_err() {
                        // Consumer went away; stop fetching data no one
                        // will receive.
                        break 'repos;
                    }
                }
            }
        }

        sink.close().await;
    });

    ReceiverStream::new(rx)
}

/// Consumer of the channel dropped its receiver.
struct Closed;

/// Writes serialized values as elements of one JSON array, opening the
/// bracket lazily so a run with no elements still produces `[]`.
struct ArraySink {
    tx: Sender<Result<Bytes, Infallible>>,
    opened: bool,
}

impl ArraySink {
    fn new(tx: Sender<Result<Bytes, Infallible>>) -> Self {
        Self { tx, opened: false }
    }

    async fn write<T: Serialize>(&mut self, value: &T) -> Result<(), Closed> {
        let payload = match serde_json::to_vec(value) {
            Ok(payload) => payload,
            Err(err) => {
                error!("dropping unencodable record: {err}");
                return Ok(());
            }
        };

        let mut chunk = Vec::with_capacity(payload.len() + 1);
        chunk.push(if self.opened { b',' } else { b'[' });
        chunk.extend_from_slice(&payload);
        self.opened = true;
        self.send(chunk).await
    }

    async fn close(&mut self) {
        let chunk = if self.opened {
            b"]".to_vec()
        } else {
            b"[]".to_vec()
        };
        let _ = self.send(chunk).await;
    }

    async fn send(&self, chunk: Vec<u8>) -> Result<(), Closed> {
        self.tx
            .send(Ok(Bytes::from(chunk)))
            .await
            .map_err(|_| Closed)
    }
}
