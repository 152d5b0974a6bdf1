//! Companion server answering `GET /` with a random series

use hyper::{
    body::Body, header, server::conn::Http, service::service_fn, Method, Request, Response,
    StatusCode,
};
use pollchart_config::ServerConfig;
use pollchart_shared::{DataPoint, Series, SeriesPayload};
use rand::Rng;
use std::{convert::Infallible, io, net::SocketAddr, sync::Arc};
use tokio::net::{TcpListener, ToSocketAddrs};

/// `count` points labelled "0".."count-1" with integer values in `0..=max_value`
pub fn random_payload<R: Rng>(rng: &mut R, count: usize, max_value: u32) -> SeriesPayload {
    let points = (0..count)
        .map(|i| DataPoint::new(i.to_string(), i64::from(rng.gen_range(0..=max_value))))
        .collect();
    SeriesPayload {
        data: Series::new(points),
    }
}

fn empty_response(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

fn data_response(settings: &ServerConfig) -> Response<Body> {
    let payload = random_payload(&mut rand::thread_rng(), settings.point_count, settings.max_value);
    match serde_json::to_vec(&payload) {
        Ok(body) => {
            let mut response = Response::new(Body::from(body));
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                header::HeaderValue::from_static("application/json"),
            );
            response
        }
        Err(e) => {
            log::error!("Failed to encode payload: {e}");
            empty_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Dispatches `GET /` to the data handler, everything else is a 404.
/// Every response allows any origin.
pub async fn service_handler(
    req: Request<Body>,
    settings: Arc<ServerConfig>,
) -> Result<Response<Body>, Infallible> {
    let mut response = match (req.method(), req.uri().path()) {
        (&Method::GET, "/") => data_response(&settings),
        _ => empty_response(StatusCode::NOT_FOUND),
    };

    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        header::HeaderValue::from_static("*"),
    );
    log::info!("{} {} -> {}", req.method(), req.uri(), response.status());
    Ok(response)
}

/// Bound listener, not yet accepting
pub struct MockServer {
    listener: TcpListener,
    settings: Arc<ServerConfig>,
}

/// Bind `addr`; port 0 picks a free port, see [`MockServer::local_addr`]
pub async fn bind(addr: impl ToSocketAddrs, settings: ServerConfig) -> io::Result<MockServer> {
    let listener = TcpListener::bind(addr).await?;
    Ok(MockServer {
        listener,
        settings: Arc::new(settings),
    })
}

impl MockServer {
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until the listener fails, one task per connection
    pub async fn run(self) -> io::Result<()> {
        loop {
            let (stream, peer_addr) = self.listener.accept().await?;
            stream.set_nodelay(true).ok();

            let settings = Arc::clone(&self.settings);
            tokio::spawn(async move {
                let service = service_fn(move |req| service_handler(req, Arc::clone(&settings)));
                if let Err(e) = Http::new().serve_connection(stream, service).await {
                    log::warn!("Error serving connection from {peer_addr}: {e}");
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_random_payload() {
        let mut rng = StdRng::seed_from_u64(7);
        let payload = random_payload(&mut rng, 20, 1000);

        assert_eq!(payload.data.len(), 20);
        for (i, point) in payload.data.iter().enumerate() {
            assert_eq!(point.x, i.to_string());
            let value = point.value.as_f64().unwrap();
            assert!((0.0..=1000.0).contains(&value));
            assert_eq!(value.fract(), 0.0);
        }
    }

    #[test]
    fn test_zero_max_value() {
        let mut rng = StdRng::seed_from_u64(1);
        let payload = random_payload(&mut rng, 3, 0);
        assert_eq!(payload.data.value_bounds(), Some((0.0, 0.0)));
    }
}
