//! Raw-socket backends shared by the integration tests

#![allow(dead_code)]

use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

/// Accepts connections and never responds
pub async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

/// Sends 503 headers advertising a large body, then never sends it
pub async fn stalled_error_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((mut socket, _)) = listener.accept().await {
            let head = "HTTP/1.1 503 Service Unavailable\r\n\
                        content-type: text/plain\r\n\
                        content-length: 10000000\r\n\r\n";
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.flush().await;
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

/// An address nothing is listening on
pub async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
