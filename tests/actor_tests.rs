//! Integration tests for the network and app actors

use std::time::Duration;

mod common;

use common::{closed_port, silent_server};
use mockito::Server;
use pulseboard::{
    AppActor, Config, FetchRequest, NetworkActor, NetworkCommand, NetworkResponse, RenderState,
    UiEvent,
};
use tokio::sync::mpsc;
use tokio::time::timeout;

async fn healthy_backend() -> mockito::ServerGuard {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/health")
        .with_status(200)
        .with_body(r#"{"status":"ok","message":"healthy"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/message")
        .with_status(200)
        .with_body(r#"{"message":"hello"}"#)
        .create_async()
        .await;
    server
}

fn requests(base: &str) -> [FetchRequest; 2] {
    [
        FetchRequest::new("health", format!("{}/api/health", base)),
        FetchRequest::new("message", format!("{}/api/message", base)),
    ]
}

#[tokio::test]
async fn test_deactivated_activation_never_reports() {
    let backend = healthy_backend().await;
    let silent = silent_server().await;

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
    // Short request timeout: activation 1 would settle as an error if it were not aborted
    let actor = NetworkActor::new(resp_tx, Duration::from_millis(200), None);
    let handle = tokio::spawn(actor.run(cmd_rx));

    cmd_tx
        .send(NetworkCommand::Activate { activation: 1, requests: requests(&silent) })
        .unwrap();
    cmd_tx.send(NetworkCommand::Deactivate(1)).unwrap();
    cmd_tx
        .send(NetworkCommand::Activate { activation: 2, requests: requests(&backend.url()) })
        .unwrap();

    let first = timeout(Duration::from_secs(5), resp_rx.recv()).await.unwrap().unwrap();
    let NetworkResponse::Settled { activation, state, .. } = first;
    assert_eq!(activation, 2);
    assert_eq!(state.label(), "ready");

    assert!(timeout(Duration::from_millis(600), resp_rx.recv()).await.is_err());

    cmd_tx.send(NetworkCommand::Shutdown).unwrap();
    timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();
}

async fn next_render(rx: &mut mpsc::UnboundedReceiver<RenderState>) -> RenderState {
    timeout(Duration::from_secs(5), rx.recv()).await.unwrap().unwrap()
}

#[tokio::test]
async fn test_app_loads_then_ready_then_retries() {
    let backend = healthy_backend().await;
    let config = Config { api_url: backend.url(), ..Config::default() };

    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel();

    let network = tokio::spawn(
        NetworkActor::new(net_resp_tx, config.request_timeout(), None).run(net_cmd_rx),
    );
    let app = tokio::spawn(AppActor::new(config, net_cmd_tx, render_tx).run(ui_rx, net_resp_rx));

    let loading = next_render(&mut render_rx).await;
    assert!(loading.state.is_loading());
    assert_eq!(loading.activation, 1);

    let ready = next_render(&mut render_rx).await;
    assert_eq!(ready.state.label(), "ready");
    assert!(ready.settled_at.is_some());

    ui_tx.send(UiEvent::Refresh).unwrap();
    let reloading = next_render(&mut render_rx).await;
    assert!(reloading.state.is_loading());
    assert_eq!(reloading.activation, 2);
    assert_eq!(next_render(&mut render_rx).await.state.label(), "ready");

    ui_tx.send(UiEvent::Quit).unwrap();
    timeout(Duration::from_secs(5), app).await.unwrap().unwrap();
    timeout(Duration::from_secs(5), network).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_app_reports_unreachable_backend() {
    let config = Config { api_url: closed_port().await, ..Config::default() };

    let (_ui_tx, ui_rx) = mpsc::unbounded_channel();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel();

    tokio::spawn(NetworkActor::new(net_resp_tx, config.request_timeout(), None).run(net_cmd_rx));
    tokio::spawn(AppActor::new(config, net_cmd_tx, render_tx).run(ui_rx, net_resp_rx));

    assert!(next_render(&mut render_rx).await.state.is_loading());
    let settled = next_render(&mut render_rx).await;
    let reason = settled.state.error().expect("expected error state");
    assert!(reason.starts_with("health: connection failed"), "{}", reason);
}
