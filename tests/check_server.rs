mod support;

use axum::body::{to_bytes, Body};
use axum::http::{self, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use factcheck_rs::server;
use support::{pipeline, FakeLlm, FakeProbe, FakeSearcher};

const ANSWER: &str = "# Vérification
📋 Résumé général : **Oui.**
Source : https://fr.wikipedia.org/wiki/Seine
Conclusion : VRAI";

fn app() -> (axum::Router, Arc<FakeSearcher>, Arc<FakeLlm>) {
    let search = Arc::new(FakeSearcher::with_urls(&[
        "https://fr.wikipedia.org/wiki/Seine",
        "https://www.paris.fr/seine",
    ]));
    let llm = Arc::new(FakeLlm::answering(ANSWER));
    let probe = Arc::new(FakeProbe::up(vec!["wikipedia"]));
    (server::router(Arc::new(pipeline(search.clone(), llm.clone(), probe))), search, llm)
}

async fn post_claim(app: axum::Router, claim: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(
            Request::post("/check")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json!({ "claim": claim })).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn check_returns_rendered_report() {
    let (app, search, llm) = app();
    let (status, v) = post_claim(app, "Est-ce que la Seine traverse Paris ?").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["state"], "rendered");
    assert_eq!(v["conclusion"], "true");
    assert_eq!(v["reliability"]["trusted"], 1);
    assert_eq!(v["reliability"]["total"], 2);
    assert_eq!(v["reliability"]["verdict"]["label"], "unproven");
    assert_eq!((search.calls(), llm.calls()), (1, 1));

    let events = v["events"].as_array().unwrap();
    assert_eq!(events[1]["kind"], "section_header");
    assert_eq!(events[1]["decoration"], "heavy_rule");
    let url = events.iter().find(|e| e["kind"] == "url_span").unwrap();
    assert_eq!(
        url["trust"],
        json!({"valid_scheme": true, "trusted_domain": true, "reachable": true})
    );
}

#[tokio::test]
async fn open_question_is_unprocessable_and_costs_nothing() {
    let (app, search, llm) = app();
    let (status, v) = post_claim(app, "Pourquoi la Seine traverse Paris ?").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["state"], "rejected");
    assert_eq!((search.calls(), llm.calls()), (0, 0));
}

#[tokio::test]
async fn health_answers_ok() {
    let (app, _, _) = app();
    let resp = app.oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
