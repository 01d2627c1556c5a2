//! Test backend lifecycle helpers.

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use tubenote_client::ApiClient;

use crate::mock_backend::{router, MockBackend};

/// A mock backend bound to a loopback port, torn down on drop.
pub struct TestBackend {
    pub backend: MockBackend,
    pub base_url: String,
    server: JoinHandle<()>,
}

impl TestBackend {
    /// Bind an ephemeral port and serve the mock backend on it.
    pub async fn spawn() -> Self {
        let backend = MockBackend::new();
        let app = router(backend.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().expect("listener has no local addr");

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend died");
        });

        Self {
            backend,
            base_url: format!("http://{addr}"),
            server,
        }
    }

    /// A client pointed at this backend.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.as_str()).expect("test base url is valid")
    }
}

impl Drop for TestBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// An address nothing is listening on, for transport-failure tests.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind probe listener");
    let addr = listener.local_addr().expect("listener has no local addr");
    drop(listener);
    format!("http://{addr}")
}
