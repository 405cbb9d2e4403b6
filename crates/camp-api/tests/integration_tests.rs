//! # Integration Tests for camp-api
//!
//! Drives the assembled router with `tower::ServiceExt::oneshot`: camper
//! creation and patching, activity listing and cascading delete, signup
//! creation, serialization shapes, health probes, metrics, and OpenAPI.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use camp_core::{CamperId, NewActivity};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use camp_api::state::AppState;

/// Helper: state with two activities, Archery (id 1) and Canoeing (id 2).
async fn seeded_state() -> AppState {
    let state = AppState::new();
    for (name, difficulty) in [("Archery", 2), ("Canoeing", 4)] {
        state
            .add_activity(NewActivity {
                name: name.to_string(),
                difficulty,
            })
            .await
            .unwrap();
    }
    state
}

/// Helper: build the test app over `state`.
fn test_app(state: &AppState) -> axum::Router {
    camp_api::app(state.clone())
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper: create a camper through the API and return its id.
async fn create_camper(state: &AppState, name: &str, age: i64) -> i64 {
    let response = test_app(state)
        .oneshot(send_json(
            "POST",
            "/campers",
            &json!({ "name": name, "age": age }).to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Helper: create a signup through the API and return the response.
async fn post_signup(state: &AppState, body: Value) -> axum::http::Response<Body> {
    test_app(state)
        .oneshot(send_json("POST", "/signups", &body.to_string()))
        .await
        .unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app(&AppState::new())
        .oneshot(get("/health/liveness"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app(&AppState::new())
        .oneshot(get("/health/readiness"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

#[tokio::test]
async fn test_home_is_empty() {
    let response = test_app(&AppState::new()).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "");
}

// -- Campers ------------------------------------------------------------------

#[tokio::test]
async fn test_create_camper_returns_201_without_signups() {
    let state = AppState::new();
    let response = test_app(&state)
        .oneshot(send_json("POST", "/campers", r#"{"name":"Ana","age":12}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "id": 1, "name": "Ana", "age": 12 }));
}

#[tokio::test]
async fn test_create_camper_with_bad_age_returns_405() {
    let state = AppState::new();
    let response = test_app(&state)
        .oneshot(send_json("POST", "/campers", r#"{"name":"Bo","age":5}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "CONSTRUCTION_ERROR");
    assert_eq!(body["error"]["message"], "cannot create new camper");
    assert!(state.store.campers().is_empty());
}

#[tokio::test]
async fn test_create_camper_with_blank_name_returns_405() {
    let state = AppState::new();
    let response = test_app(&state)
        .oneshot(send_json("POST", "/campers", r#"{"name":"   ","age":12}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_create_camper_missing_field_returns_405() {
    let state = AppState::new();
    let response = test_app(&state)
        .oneshot(send_json("POST", "/campers", r#"{"name":"Ana"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["details"]["reason"], "age is required");
}

#[tokio::test]
async fn test_create_camper_malformed_json_returns_405() {
    let state = AppState::new();
    let response = test_app(&state)
        .oneshot(send_json("POST", "/campers", "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_list_campers_is_shallow() {
    let state = seeded_state().await;
    let ana = create_camper(&state, "Ana", 12).await;
    create_camper(&state, "Bo", 9).await;
    post_signup(&state, json!({ "time": 9, "camper_id": ana, "activity_id": 1 })).await;

    let response = test_app(&state).oneshot(get("/campers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let campers = body.as_array().unwrap();
    assert_eq!(campers.len(), 2);
    assert_eq!(campers[0], json!({ "id": 1, "name": "Ana", "age": 12 }));
    assert!(campers.iter().all(|c| c.get("signups").is_none()));
}

#[tokio::test]
async fn test_get_camper_includes_signups_with_activity() {
    let state = seeded_state().await;
    let ana = create_camper(&state, "Ana", 12).await;
    post_signup(&state, json!({ "time": 9, "camper_id": ana, "activity_id": 2 })).await;

    let response = test_app(&state)
        .oneshot(get(&format!("/campers/{ana}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Ana");
    let signups = body["signups"].as_array().unwrap();
    assert_eq!(signups.len(), 1);
    assert_eq!(signups[0]["time"], 9);
    assert_eq!(
        signups[0]["activity"],
        json!({ "id": 2, "name": "Canoeing", "difficulty": 4 })
    );
    assert!(signups[0].get("camper").is_none());
}

#[tokio::test]
async fn test_get_unknown_camper_returns_404() {
    let response = test_app(&AppState::new())
        .oneshot(get("/campers/42"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "camper 42 not found");
}

#[tokio::test]
async fn test_patch_camper_updates_fields() {
    let state = AppState::new();
    let ana = create_camper(&state, "Ana", 12).await;

    let response = test_app(&state)
        .oneshot(send_json(
            "PATCH",
            &format!("/campers/{ana}"),
            r#"{"age":13,"nickname":"ignored"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "id": ana, "name": "Ana", "age": 13 }));
    assert_eq!(
        state.store.camper(CamperId::new(ana)).unwrap().age.get(),
        13
    );
}

#[tokio::test]
async fn test_patch_camper_rejects_all_or_nothing() {
    let state = AppState::new();
    let ana = create_camper(&state, "Ana", 12).await;

    let response = test_app(&state)
        .oneshot(send_json(
            "PATCH",
            &format!("/campers/{ana}"),
            r#"{"name":"Anastasia","age":40}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["details"]["errors"],
        json!(["age must be between 8 and 18, got 40"])
    );

    let stored = state.store.camper(CamperId::new(ana)).unwrap();
    assert_eq!(stored.name.as_str(), "Ana");
    assert_eq!(stored.age.get(), 12);
}

#[tokio::test]
async fn test_patch_camper_reports_every_bad_field() {
    let state = AppState::new();
    let ana = create_camper(&state, "Ana", 12).await;

    let response = test_app(&state)
        .oneshot(send_json(
            "PATCH",
            &format!("/campers/{ana}"),
            r#"{"name":"","age":2}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["details"]["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_patch_camper_malformed_json_returns_400() {
    let state = AppState::new();
    let ana = create_camper(&state, "Ana", 12).await;

    let response = test_app(&state)
        .oneshot(send_json("PATCH", &format!("/campers/{ana}"), "[1, 2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_patches_to_different_fields_both_apply() {
    let state = AppState::new();
    let mut ids = Vec::new();
    for i in 0..50 {
        ids.push(create_camper(&state, &format!("Camper {i}"), 12).await);
    }

    let mut tasks = Vec::new();
    for &id in &ids {
        for body in [json!({ "name": format!("Renamed {id}") }), json!({ "age": 17 })] {
            let app = test_app(&state);
            tasks.push(tokio::spawn(async move {
                app.oneshot(send_json("PATCH", &format!("/campers/{id}"), &body.to_string()))
                    .await
                    .unwrap()
                    .status()
            }));
        }
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    for id in ids {
        let camper = state.store.camper(CamperId::new(id)).unwrap();
        assert_eq!(camper.name.as_str(), format!("Renamed {id}"));
        assert_eq!(camper.age.get(), 17);
    }
}

#[tokio::test]
async fn test_patch_unknown_camper_returns_404() {
    let response = test_app(&AppState::new())
        .oneshot(send_json("PATCH", "/campers/7", r#"{"age":10}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_method_returns_405() {
    let response = test_app(&AppState::new())
        .oneshot(delete("/campers/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// -- Activities ---------------------------------------------------------------

#[tokio::test]
async fn test_list_activities_is_shallow() {
    let state = seeded_state().await;
    let response = test_app(&state).oneshot(get("/activities")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([
            { "id": 1, "name": "Archery", "difficulty": 2 },
            { "id": 2, "name": "Canoeing", "difficulty": 4 },
        ])
    );
}

#[tokio::test]
async fn test_get_activity_includes_signups_with_camper() {
    let state = seeded_state().await;
    let ana = create_camper(&state, "Ana", 12).await;
    post_signup(&state, json!({ "time": 15, "camper_id": ana, "activity_id": 1 })).await;

    let response = test_app(&state).oneshot(get("/activities/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let signups = body["signups"].as_array().unwrap();
    assert_eq!(signups.len(), 1);
    assert_eq!(
        signups[0]["camper"],
        json!({ "id": ana, "name": "Ana", "age": 12 })
    );
}

#[tokio::test]
async fn test_delete_activity_cascades_to_signups() {
    let state = seeded_state().await;
    let ana = create_camper(&state, "Ana", 12).await;
    post_signup(&state, json!({ "time": 9, "camper_id": ana, "activity_id": 1 })).await;
    post_signup(&state, json!({ "time": 10, "camper_id": ana, "activity_id": 2 })).await;

    let response = test_app(&state).oneshot(delete("/activities/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Activity deleted." })
    );

    let remaining = state.store.signups();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].activity_id.get(), 2);

    let response = test_app(&state).oneshot(get("/activities/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = test_app(&state)
        .oneshot(get(&format!("/campers/{ana}")))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["signups"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_activity_returns_404() {
    let response = test_app(&AppState::new())
        .oneshot(delete("/activities/99"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "activity 99 not found");
}

// -- Signups ------------------------------------------------------------------

#[tokio::test]
async fn test_create_signup_returns_201_with_ids_only() {
    let state = seeded_state().await;
    let ana = create_camper(&state, "Ana", 12).await;

    let response =
        post_signup(&state, json!({ "time": 0, "camper_id": ana, "activity_id": 2 })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({ "id": 1, "time": 0, "activity_id": 2, "camper_id": ana })
    );
}

#[tokio::test]
async fn test_create_signup_with_bad_time_returns_405() {
    let state = seeded_state().await;
    let ana = create_camper(&state, "Ana", 12).await;

    let response =
        post_signup(&state, json!({ "time": 24, "camper_id": ana, "activity_id": 1 })).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "cannot create new signup");
    assert!(state.store.signups().is_empty());
}

#[tokio::test]
async fn test_create_signup_for_unknown_camper_returns_405() {
    let state = seeded_state().await;
    let response =
        post_signup(&state, json!({ "time": 9, "camper_id": 77, "activity_id": 1 })).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(state.store.signups().is_empty());
}

#[tokio::test]
async fn test_create_signup_for_unknown_activity_returns_405() {
    let state = seeded_state().await;
    let ana = create_camper(&state, "Ana", 12).await;
    let response =
        post_signup(&state, json!({ "time": 9, "camper_id": ana, "activity_id": 30 })).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_create_signup_missing_field_returns_405() {
    let state = seeded_state().await;
    let response = post_signup(&state, json!({ "time": 9, "activity_id": 1 })).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_deleted_camper_leaves_signup_under_activity() {
    let state = seeded_state().await;
    let ana = create_camper(&state, "Ana", 12).await;
    post_signup(&state, json!({ "time": 11, "camper_id": ana, "activity_id": 1 })).await;

    state.delete_camper(CamperId::new(ana)).await.unwrap().unwrap();

    let response = test_app(&state).oneshot(get("/activities/1")).await.unwrap();
    let body = body_json(response).await;
    let signups = body["signups"].as_array().unwrap();
    assert_eq!(signups.len(), 1);
    assert_eq!(signups[0]["camper_id"], Value::Null);
    assert_eq!(signups[0]["camper"], Value::Null);
}

// -- Operations ---------------------------------------------------------------

#[tokio::test]
async fn test_metrics_count_requests_and_errors() {
    let state = AppState::new();
    let app = test_app(&state);

    let response = app.clone().oneshot(get("/campers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let response = app.clone().oneshot(get("/campers/5")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = app
        .clone()
        .oneshot(send_json("POST", "/campers", r#"{"name":"Bo","age":5}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "requests": 3, "errors": 2, "rejected_creations": 1, "server_errors": 0 })
    );
}

#[tokio::test]
async fn test_openapi_spec_lists_routes() {
    let response = test_app(&AppState::new())
        .oneshot(get("/openapi.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["info"]["title"], "Camp Signups API");
    for path in ["/campers", "/campers/{id}", "/activities/{id}", "/signups"] {
        assert!(body["paths"].get(path).is_some(), "missing {path}");
    }
}
