/**
 * CPU Usage Stream Handler
 *
 * `GET /api/cpu` streams the global CPU usage percentage once per
 * `cpu_interval` as SSE frames: `data: 12.34\n\n`. The stream ends on server
 * shutdown or when the client goes away.
 */

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
};
use bytes::Bytes;
use futures_util::stream::{self, Stream};
use std::convert::Infallible;
use std::time::Duration;
use sysinfo::System;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

struct CpuSampler {
    system: System,
    ticker: Interval,
    cancel: CancellationToken,
}

impl CpuSampler {
    fn new(period: Duration, cancel: CancellationToken) -> Self {
        let mut system = System::new();
        // Usage is computed between two refreshes; prime the first one.
        system.refresh_cpu_usage();
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { system, ticker, cancel }
    }

    fn sample(&mut self) -> f32 {
        self.system.refresh_cpu_usage();
        self.system.global_cpu_usage()
    }
}

pub(crate) fn cpu_frame(usage: f32) -> Bytes {
    Bytes::from(format!("data: {:.2}\n\n", usage))
}

fn cpu_stream(period: Duration, cancel: CancellationToken) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
    stream::unfold(CpuSampler::new(period, cancel), |mut sampler| async move {
        tokio::select! {
            biased;
            _ = sampler.cancel.cancelled() => None,
            _ = sampler.ticker.tick() => {
                let frame = cpu_frame(sampler.sample());
                Some((Ok(frame), sampler))
            }
        }
    })
}

/// Handle CPU usage subscription (GET /api/cpu)
pub async fn stream_cpu(State(state): State<AppState>) -> Result<Response, BackendError> {
    tracing::debug!("[Cpu] SSE client connected");
    let body = Body::from_stream(cpu_stream(state.cpu_interval, state.shutdown.child_token()));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
        .map_err(|e| BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
