use rusqlite::Connection;
use tokio::net::TcpListener;

use crate::{AppState, build_router};

/// Serve the app with an empty in-memory database on an ephemeral port.
///
/// Returns the base URL of the server, e.g. "http://127.0.0.1:43210".
pub(crate) async fn spawn_test_server() -> String {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    let state = AppState::new(connection, "Etc/UTC").expect("Could not create app state");

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test server");
    let address = listener
        .local_addr()
        .expect("Could not get test server address");

    tokio::spawn(async move {
        axum::serve(listener, build_router(state))
            .await
            .expect("Test server stopped unexpectedly");
    });

    format!("http://{address}")
}
