//! End-to-end page session over WebSocket.
//!
//! A fake page shim connects to the server, sends DOM events and checks the
//! commands that come back.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use futures_util::{SinkExt, StreamExt};
use product_overlay::{PendingServer, WidgetOptions};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type Shim = WebSocketStream<MaybeTlsStream<TcpStream>>;

const READ_TIMEOUT: Duration = Duration::from_secs(5);

async fn send(shim: &mut Shim, event: Value) -> Result<()> {
    shim.send(Message::Text(event.to_string().into())).await?;
    Ok(())
}

/// Reads commands until one with `method` arrives; returns everything read.
async fn read_until(shim: &mut Shim, method: &str) -> Result<Vec<Value>> {
    let mut commands = Vec::new();
    loop {
        let message = timeout(READ_TIMEOUT, shim.next())
            .await
            .with_context(|| format!("timed out waiting for {method}"))?
            .context("socket closed")??;

        let Message::Text(text) = message else {
            continue;
        };
        let command: Value = serde_json::from_str(text.as_str())?;
        let done = command["method"] == method;
        commands.push(command);
        if done {
            return Ok(commands);
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("product_overlay=debug")
        .with_test_writer()
        .try_init();
}

fn load_with_link(element_id: &str, href: &str) -> Value {
    json!({
        "method": "page.load",
        "params": { "links": [{ "elementId": element_id, "tag": "A", "href": href }] }
    })
}

async fn start() -> Result<Shim> {
    init_tracing();

    let server = PendingServer::bind(IpAddr::V4(Ipv4Addr::LOCALHOST), 0).await?;
    let url = server.ws_url();

    tokio::spawn(async move {
        if let Ok(connection) = server.accept().await {
            let _ = connection.run(WidgetOptions::new()).await;
        }
    });

    let (shim, _) = connect_async(url.as_str()).await?;
    Ok(shim)
}

#[tokio::test]
async fn page_session_open_and_close() -> Result<()> {
    let mut shim = start().await?;

    send(
        &mut shim,
        json!({
            "method": "page.load",
            "params": {
                "viewport": { "width": 1280, "height": 720 },
                "links": [
                    { "elementId": "el-1", "tag": "A", "href": "https://gum.co/demo?ref=blog" },
                    { "elementId": "el-2", "tag": "A", "href": "https://example.com/demo" }
                ]
            }
        }),
    )
    .await?;

    let install = read_until(&mut shim, "page.observeInsertions").await?;
    let methods: Vec<_> = install.iter().map(|c| c["method"].clone()).collect();
    assert_eq!(
        methods,
        [
            "page.injectStyles",
            "overlay.create",
            "page.subscribe",
            "page.subscribe",
            "element.bindIntents",
            "page.observeInsertions"
        ]
    );
    assert_eq!(install[4]["params"]["elementId"], "el-1");

    // A link inserted after load is tracked and opens like any other.
    send(
        &mut shim,
        json!({
            "method": "element.added",
            "params": { "nodes": [{ "elementId": "el-3", "tag": "A", "href": "//gum.co/late" }] }
        }),
    )
    .await?;
    let bound = read_until(&mut shim, "element.bindIntents").await?;
    assert_eq!(bound[0]["params"]["elementId"], "el-3");

    send(
        &mut shim,
        json!({ "method": "element.click", "params": { "elementId": "el-3" } }),
    )
    .await?;
    let open = read_until(&mut shim, "overlay.postMessage").await?;
    assert_eq!(open[0]["method"], "overlay.setFrameSource");
    assert_eq!(open[0]["params"]["url"], "/overlay.html?productId=late");
    assert_eq!(open[2]["params"]["style"], "width:1280px;height:720px");
    assert_eq!(open[3]["params"]["message"], "iframe-opened");

    send(
        &mut shim,
        json!({ "method": "window.message", "params": { "data": "gumroad-close" } }),
    )
    .await?;
    let close = read_until(&mut shim, "overlay.setFrameStyle").await?;
    assert_eq!(close.len(), 2);
    assert_eq!(
        close[1]["params"]["style"],
        "max-width:0;max-height:0;width:0;height:0"
    );

    shim.close(None).await?;
    Ok(())
}

#[tokio::test]
async fn garbage_frames_do_not_break_the_session() -> Result<()> {
    let mut shim = start().await?;

    shim.send(Message::Text("{ not json".into())).await?;
    send(&mut shim, json!({ "method": "element.click", "params": { "elementId": "x" } })).await?;
    send(&mut shim, json!({ "method": "page.load" })).await?;

    let install = read_until(&mut shim, "page.observeInsertions").await?;
    if install.iter().any(|c| c["method"] == "element.bindIntents") {
        bail!("no links were on the page, nothing should be bound");
    }

    // Escape while closed produces nothing; the next load produces nothing
    // either, so the first frame after them answers the insertion.
    send(&mut shim, json!({ "method": "document.keyup", "params": { "key": "Escape" } })).await?;
    send(&mut shim, json!({ "method": "page.load" })).await?;
    send(
        &mut shim,
        json!({
            "method": "element.added",
            "params": { "nodes": [{ "elementId": "late", "tag": "A", "href": "https://gum.co/x" }] }
        }),
    )
    .await?;

    let next = read_until(&mut shim, "element.bindIntents").await?;
    assert_eq!(next.len(), 1);

    Ok(())
}

#[tokio::test]
async fn serve_keeps_pages_independent() -> Result<()> {
    init_tracing();

    let server = PendingServer::bind(IpAddr::V4(Ipv4Addr::LOCALHOST), 0).await?;
    let url = server.ws_url();
    tokio::spawn(server.serve(WidgetOptions::new()));

    let (mut first, _) = connect_async(url.as_str()).await?;
    let (mut second, _) = connect_async(url.as_str()).await?;

    send(&mut first, load_with_link("a-1", "https://gum.co/alpha")).await?;
    send(&mut second, load_with_link("b-1", "https://gumroad.com/l/beta")).await?;

    let first_install = read_until(&mut first, "page.observeInsertions").await?;
    let second_install = read_until(&mut second, "page.observeInsertions").await?;
    assert_eq!(first_install[4]["params"]["elementId"], "a-1");
    assert_eq!(second_install[4]["params"]["elementId"], "b-1");

    send(
        &mut first,
        json!({ "method": "element.click", "params": { "elementId": "a-1" } }),
    )
    .await?;
    let open = read_until(&mut first, "overlay.postMessage").await?;
    assert_eq!(open[0]["params"]["url"], "/overlay.html?productId=alpha");

    // The other page never sees the first page's link.
    send(
        &mut second,
        json!({ "method": "element.click", "params": { "elementId": "a-1" } }),
    )
    .await?;
    send(
        &mut second,
        json!({
            "method": "element.added",
            "params": { "nodes": [{ "elementId": "b-2", "tag": "A", "href": "//gum.co/gamma" }] }
        }),
    )
    .await?;
    let bound = read_until(&mut second, "element.bindIntents").await?;
    assert_eq!(bound.len(), 1);
    assert_eq!(bound[0]["params"]["elementId"], "b-2");

    first.close(None).await?;
    second.close(None).await?;
    Ok(())
}
