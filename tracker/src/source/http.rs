use crate::workflow::config::TrackerConfig;
use anyhow::Context;
use orbitcore::feed::FeedPayload;
use orbitcore::prelude::{Position, TrackError, TrackResult};
use orbitcore::tracking::SampleSource;
use std::future::Future;

/// Fetches fixes from the JSON position endpoint.
pub struct HttpSampleSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSampleSource {
    pub fn new(config: &TrackerConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

fn fetch_error(err: reqwest::Error) -> TrackError {
    if err.is_timeout() {
        TrackError::Fetch(format!("request timed out: {}", err))
    } else {
        TrackError::Fetch(err.to_string())
    }
}

impl SampleSource for HttpSampleSource {
    fn fetch(&mut self) -> impl Future<Output = TrackResult<Position>> {
        let request = self.client.get(&self.endpoint);
        async move {
            let response = request
                .send()
                .await
                .and_then(|response| response.error_for_status())
                .map_err(fetch_error)?;
            let body = response.bytes().await.map_err(fetch_error)?;
            FeedPayload::from_slice(&body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{SocketAddr, TcpListener};
    use std::time::Duration;
    use warp::http::StatusCode;
    use warp::Filter;

    macro_rules! spawn_feed {
        ($route:expr) => {{
            let (addr, server) = warp::serve($route).bind_ephemeral(([127, 0, 0, 1], 0));
            tokio::spawn(server);
            addr
        }};
    }

    fn source_for(addr: SocketAddr, timeout_secs: u64) -> HttpSampleSource {
        let config = TrackerConfig {
            endpoint: format!("http://{}/iss-now.json", addr),
            timeout_secs,
            ..Default::default()
        };
        HttpSampleSource::new(&config).unwrap()
    }

    #[tokio::test]
    async fn fetch_decodes_string_coordinates() {
        let route = warp::path("iss-now.json").map(|| {
            warp::reply::json(&serde_json::json!({
                "message": "success",
                "timestamp": 1_700_000_060,
                "iss_position": {"latitude": "16.1000", "longitude": "80.1000"}
            }))
        });
        let mut source = source_for(spawn_feed!(route), 10);

        let position = source.fetch().await.unwrap();
        assert_eq!(position, Position::new(16.1, 80.1, 1_700_000_060.0));
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let route = warp::path("iss-now.json").map(|| "service unavailable");
        let mut source = source_for(spawn_feed!(route), 10);
        assert!(matches!(source.fetch().await, Err(TrackError::Parse(_))));
    }

    #[tokio::test]
    async fn server_error_is_fetch_error() {
        let route = warp::path("iss-now.json")
            .map(|| warp::reply::with_status("boom", StatusCode::INTERNAL_SERVER_ERROR));
        let mut source = source_for(spawn_feed!(route), 10);
        assert!(matches!(source.fetch().await, Err(TrackError::Fetch(_))));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let route = warp::path("iss-now.json").and_then(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, warp::Rejection>("late")
        });
        let mut source = source_for(spawn_feed!(route), 1);
        match source.fetch().await {
            Err(TrackError::Fetch(message)) => assert!(message.contains("timed out")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn refused_connection_is_fetch_error() {
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let mut source = source_for(addr, 2);
        assert!(matches!(source.fetch().await, Err(TrackError::Fetch(_))));
    }
}
