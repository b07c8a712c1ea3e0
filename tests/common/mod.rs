//! Stub geolocation providers served by hyper on an ephemeral local port.

#![allow(dead_code)]

use hyper::server::conn::AddrStream;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use std::convert::Infallible;
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const IPINFO_8888: &str = r#"{
    "ip": "8.8.8.8",
    "hostname": "dns.google",
    "city": "Mountain View",
    "region": "California",
    "country": "US",
    "loc": "37.4056,-122.0775",
    "org": "AS15169 Google LLC",
    "postal": "94043",
    "timezone": "America/Los_Angeles"
}"#;

pub const IPINFO_BOGON: &str = r#"{"ip": "10.0.0.1", "bogon": true}"#;

pub const IP_API_8888: &str = r#"{
    "status": "success",
    "country": "United States",
    "countryCode": "US",
    "region": "VA",
    "regionName": "Virginia",
    "city": "Ashburn",
    "zip": "20149",
    "lat": 39.03,
    "lon": -77.5,
    "timezone": "America/New_York",
    "isp": "Google LLC",
    "org": "Google Public DNS",
    "as": "AS15169 Google LLC",
    "query": "8.8.8.8"
}"#;

pub const IP_API_FAIL: &str =
    r#"{"status": "fail", "message": "reserved range", "query": "10.0.0.1"}"#;

#[derive(Clone)]
pub struct StubRoute {
    pub path: &'static str,
    pub status: StatusCode,
    pub body: &'static str,
    pub delay: Duration,
}

impl StubRoute {
    pub fn ok(path: &'static str, body: &'static str) -> Self {
        Self {
            path,
            status: StatusCode::OK,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn status(path: &'static str, status: StatusCode) -> Self {
        Self {
            path,
            status,
            body: "",
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub struct StubServer {
    addr: SocketAddr,
    hits: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Serve `routes` from a background thread, unknown paths get 404.
    pub fn start(routes: Vec<StubRoute>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let routes = Arc::new(routes);
        let hits = Arc::new(Mutex::new(vec![]));
        let server_hits = Arc::clone(&hits);

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let make_service = make_service_fn(move |_connection: &AddrStream| {
                    let routes = Arc::clone(&routes);
                    let hits = Arc::clone(&server_hits);
                    let service = service_fn(move |request: Request<Body>| {
                        let routes = Arc::clone(&routes);
                        let hits = Arc::clone(&hits);
                        async move {
                            let path = request.uri().path().to_owned();
                            hits.lock().unwrap().push(path.clone());
                            let route = routes.iter().find(|route| route.path == path).cloned();
                            let response = match route {
                                Some(route) => {
                                    tokio::time::sleep(route.delay).await;
                                    Response::builder()
                                        .status(route.status)
                                        .header("Content-Type", "application/json")
                                        .body(Body::from(route.body))
                                        .unwrap()
                                }
                                None => Response::builder()
                                    .status(StatusCode::NOT_FOUND)
                                    .body(Body::empty())
                                    .unwrap(),
                            };
                            Ok::<_, Infallible>(response)
                        }
                    });
                    async move { Ok::<_, Infallible>(service) }
                });
                Server::from_tcp(listener)
                    .unwrap()
                    .serve(make_service)
                    .await
                    .unwrap();
            });
        });

        Self { addr, hits }
    }

    pub fn base(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Paths requested so far, in order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    /// Configuration pointing both providers at this server.
    pub fn config_toml(&self, timeout_seconds: f64) -> String {
        let base = self.base();
        format!(
            r#"
timeout = {timeout_seconds:?}

[ipinfo]
uri_template = "{base}/ipinfo/{{target}}/json"
self_uri = "{base}/ipinfo/json"

[ip_api]
uri_template = "{base}/ip-api/{{target}}"
"#
        )
    }
}
