use crate::gui_bridge::model::StatusModel;
use log::{error, info, warn};
use orbitcore::prelude::{ConnectionState, StatusRecord};
use orbitcore::tracking::StatusSink;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{Filter, Rejection, Reply};

fn routes(
    state: Arc<RwLock<StatusModel>>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());

    warp::path("status")
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter)
        .map(|state: Arc<RwLock<StatusModel>>| {
            let model = state
                .read()
                .map(|guard| guard.clone())
                .unwrap_or_default();
            warp::reply::json(&model)
        })
}

/// Holds the latest status and optionally serves it over HTTP for a display client.
#[derive(Clone, Default)]
pub struct StatusBridge {
    state: Arc<RwLock<StatusModel>>,
}

impl StatusBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `GET /status` on a dedicated thread.
    pub fn serve(&self, bind: SocketAddr) {
        let routes = routes(self.state.clone());
        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("status bridge runtime failed: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                match warp::serve(routes).try_bind_ephemeral(bind) {
                    Ok((addr, server)) => {
                        info!("status bridge listening on http://{}/status", addr);
                        server.await;
                    }
                    Err(err) => error!("status bridge could not bind {}: {}", bind, err),
                }
            });
        });
    }

    pub fn snapshot(&self) -> StatusModel {
        self.state
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl StatusSink for StatusBridge {
    fn publish(&self, record: &StatusRecord) {
        if let Ok(mut guard) = self.state.write() {
            guard.apply(record);
        }
        match record.connection_state {
            ConnectionState::Connected => info!("[status] {}", record.message),
            ConnectionState::Reconnecting => warn!("[status] {}", record.message),
        }
    }
}
