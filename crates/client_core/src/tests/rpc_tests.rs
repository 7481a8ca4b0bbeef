use super::*;
use crate::test_support::{client, navigator, ScriptedTransport, TOKEN};
use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::json;
use shared::protocol::{Ack, AuthorNameHit, LoginRequest, SavedResponse};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

async fn spawn_rpc_server(
    path: &'static str,
    reply: Value,
) -> anyhow::Result<(String, oneshot::Receiver<Value>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel();
    let tx = Arc::new(Mutex::new(Some(tx)));
    let app = Router::new().route(
        path,
        post(move |Json(body): Json<Value>| {
            let tx = tx.clone();
            let reply = reply.clone();
            async move {
                if let Some(tx) = tx.lock().await.take() {
                    let _ = tx.send(body);
                }
                Json(reply)
            }
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/"), rx))
}

#[test]
fn sign_query_appends_token_field() {
    let body = sign_query(
        &LoginRequest {
            login: "admin".into(),
            password: "secret".into(),
        },
        TOKEN,
    )
    .expect("sign");
    assert_eq!(body["login"], "admin");
    assert_eq!(body["cors_h"], TOKEN);
}

#[test]
fn sign_query_rejects_non_object_queries() {
    assert!(matches!(
        sign_query(&vec![1, 2, 3], TOKEN),
        Err(RpcError::QueryNotAnObject)
    ));
}

#[test]
fn envelope_success_decodes_payload() {
    let reply: Reply<SavedResponse> =
        parse_envelope(json!({ "result": 0, "id": 42 })).expect("envelope");
    match reply {
        Reply::Success(saved) => assert_eq!(saved.id, Some(42)),
        Reply::Failure(code) => panic!("unexpected failure {code:?}"),
    }
}

#[test]
fn envelope_failure_skips_payload_decoding() {
    let reply: Reply<SavedResponse> =
        parse_envelope(json!({ "result": 102 })).expect("envelope");
    assert_eq!(reply, Reply::Failure(FailureCode::InvalidRequest));
}

#[test]
fn envelope_with_unknown_code_is_an_error() {
    let err = parse_envelope::<Ack>(json!({ "result": 250 })).expect_err("unknown code");
    assert!(matches!(err, RpcError::UnknownResultCode(_)));
}

#[test]
fn envelope_without_numeric_result_is_malformed() {
    assert!(matches!(
        parse_envelope::<Ack>(json!({ "id": 1 })),
        Err(RpcError::MalformedEnvelope(_))
    ));
    assert!(matches!(
        parse_envelope::<Ack>(json!({ "result": "0" })),
        Err(RpcError::MalformedEnvelope(_))
    ));
}

#[test]
fn success_with_missing_payload_field_is_a_payload_error() {
    assert!(matches!(
        parse_envelope::<AuthorNameHit>(json!({ "result": 0, "id": 3 })),
        Err(RpcError::Payload(_))
    ));
}

#[tokio::test]
async fn http_transport_posts_signed_json_to_rpc_route() {
    let (root, body_rx) = spawn_rpc_server("/rpc/graffiti/add", json!({ "result": 0, "id": 7 }))
        .await
        .expect("spawn server");
    let rpc = RpcClient::new(Navigator::new(&root, "/graffiti/add").expect("nav"), TOKEN);

    let reply: Reply<SavedResponse> = rpc
        .call(Endpoint::GraffitiAdd, &json!({ "notes": "fresh paint" }))
        .await
        .expect("call");

    assert_eq!(reply, Reply::Success(SavedResponse { id: Some(7) }));
    let body = body_rx.await.expect("server saw body");
    assert_eq!(body["notes"], "fresh paint");
    assert_eq!(body["cors_h"], TOKEN);
}

#[tokio::test]
async fn http_transport_maps_non_2xx_to_status_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route(
        "/rpc/auth/logout",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let rpc = RpcClient::new(
        Navigator::new(&format!("http://{addr}"), "/home").expect("nav"),
        TOKEN,
    );
    let err = rpc
        .call::<_, Ack>(Endpoint::AuthLogout, &json!({}))
        .await
        .expect_err("status error");
    assert!(matches!(err, RpcError::Status(500)));
}

#[tokio::test]
async fn search_reads_hit_list_from_result_field() {
    let transport = ScriptedTransport::new([crate::test_support::Scripted::Json(json!({
        "result": [{ "id": 4, "name": "KAOS" }, { "id": 9, "name": "KAPO" }]
    }))]);
    let rpc = client(transport.clone(), "/graffiti/add");

    let hits: Vec<AuthorNameHit> = rpc
        .search(Endpoint::SearchAuthorNames, "KA")
        .await
        .expect("search");

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[1].name, "KAPO");
    let calls = transport.calls();
    assert_eq!(calls[0].0, navigator("/").rpc_url(Endpoint::SearchAuthorNames));
    assert_eq!(calls[0].1["term"], "KA");
    assert_eq!(calls[0].1["cors_h"], TOKEN);
}
