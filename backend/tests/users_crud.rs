//! End-to-end CRUD contract tests over the real application factory.
//!
//! The in-memory repository stands in for the document store, so every
//! assertion here is about the HTTP contract: routes, status codes, and
//! body shapes.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use serde_json::{json, Value};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::InMemoryUserRepository;
use backend::server::build_app;

fn app_state() -> (web::Data<HttpState>, web::Data<HealthState>) {
    let state = web::Data::new(HttpState::new(Arc::new(InMemoryUserRepository::new())));
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    (state, health_state)
}

async fn create_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    body: Value,
) -> (StatusCode, Value) {
    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

async fn list_users(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> Value {
    let request = actix_test::TestRequest::get().uri("/get_users").to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    actix_test::read_body_json(response).await
}

#[actix_web::test]
async fn create_then_list_round_trips_the_record() {
    let (state, health) = app_state();
    let app = actix_test::init_service(build_app(state, health)).await;

    let (status, created) =
        create_user(&app, json!({ "name": "Alex", "email": "a@x.com", "age": 30 })).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().expect("id").to_owned();
    assert!(!id.is_empty());

    let listed = list_users(&app).await;
    let data = listed["data"].as_array().expect("data");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"].as_str(), Some(id.as_str()));
    assert_eq!(data[0]["name"], "Alex");
    assert_eq!(data[0]["email"], "a@x.com");
    assert_eq!(data[0]["age"], 30);
}

#[actix_web::test]
async fn creation_assigns_a_fresh_id_per_user() {
    let (state, health) = app_state();
    let app = actix_test::init_service(build_app(state, health)).await;

    let (_, first) = create_user(&app, json!({ "name": "Alex", "email": "a@x.com" })).await;
    let (_, second) = create_user(&app, json!({ "name": "Robin", "email": "r@y.org" })).await;
    assert_ne!(first["id"], second["id"]);
}

#[actix_web::test]
async fn invalid_creation_payloads_do_not_persist_anything() {
    let (state, health) = app_state();
    let app = actix_test::init_service(build_app(state, health)).await;

    for body in [
        json!({ "name": "A", "email": "a@x.com" }),
        json!({ "name": "ElevenChars", "email": "a@x.com" }),
        json!({ "name": "Alex", "email": "not-an-email" }),
        json!({ "email": "a@x.com" }),
    ] {
        let (status, error) = create_user(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["error"].is_array(), "per-field error list expected");
    }

    let listed = list_users(&app).await;
    assert!(listed["data"].as_array().expect("data").is_empty());
}

#[actix_web::test]
async fn wrong_typed_age_is_reported_in_the_field_list() {
    let (state, health) = app_state();
    let app = actix_test::init_service(build_app(state, health)).await;

    let (status, error) =
        create_user(&app, json!({ "name": "Alex", "email": "a@x.com", "age": "thirty" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = error["error"].as_array().expect("per-field error list");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "age");
    assert_eq!(errors[0]["code"], "invalid_type");

    let (_, created) = create_user(&app, json!({ "name": "Alex", "email": "a@x.com" })).await;
    let id = created["id"].as_str().expect("id");
    let update = actix_test::TestRequest::put()
        .uri(&format!("/update_user/{id}"))
        .set_json(json!({ "age": "thirty" }))
        .to_request();
    let response = actix_test::call_service(&app, update).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"][0]["field"], "age");
}

#[actix_web::test]
async fn age_only_update_preserves_name_and_email() {
    let (state, health) = app_state();
    let app = actix_test::init_service(build_app(state, health)).await;

    let (_, created) =
        create_user(&app, json!({ "name": "Alex", "email": "a@x.com", "age": 30 })).await;
    let id = created["id"].as_str().expect("id");

    let request = actix_test::TestRequest::put()
        .uri(&format!("/update_user/{id}"))
        .set_json(json!({ "age": 31 }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "user updated successfully");

    let listed = list_users(&app).await;
    assert_eq!(listed["data"][0]["name"], "Alex");
    assert_eq!(listed["data"][0]["email"], "a@x.com");
    assert_eq!(listed["data"][0]["age"], 31);
}

#[actix_web::test]
async fn updates_and_deletes_of_unknown_ids_change_nothing() {
    let (state, health) = app_state();
    let app = actix_test::init_service(build_app(state, health)).await;

    let (_, created) = create_user(&app, json!({ "name": "Alex", "email": "a@x.com" })).await;

    let update = actix_test::TestRequest::put()
        .uri("/update_user/does-not-exist")
        .set_json(json!({ "name": "Robin" }))
        .to_request();
    let response = actix_test::call_service(&app, update).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"], "user not found");

    let delete = actix_test::TestRequest::delete()
        .uri("/delete_user/does-not-exist")
        .to_request();
    let response = actix_test::call_service(&app, delete).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let listed = list_users(&app).await;
    let data = listed["data"].as_array().expect("data");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], created["id"]);
    assert_eq!(data[0]["name"], "Alex");
}

#[actix_web::test]
async fn deleted_users_stay_gone() {
    let (state, health) = app_state();
    let app = actix_test::init_service(build_app(state, health)).await;

    let (_, created) = create_user(&app, json!({ "name": "Alex", "email": "a@x.com" })).await;
    let id = created["id"].as_str().expect("id");

    let delete = actix_test::TestRequest::delete()
        .uri(&format!("/delete_user/{id}"))
        .to_request();
    let response = actix_test::call_service(&app, delete).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "user deleted successfully");

    let update = actix_test::TestRequest::put()
        .uri(&format!("/update_user/{id}"))
        .set_json(json!({ "age": 1 }))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, update).await.status(),
        StatusCode::NOT_FOUND
    );

    let delete_again = actix_test::TestRequest::delete()
        .uri(&format!("/delete_user/{id}"))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, delete_again).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn empty_update_payloads_are_rejected() {
    let (state, health) = app_state();
    let app = actix_test::init_service(build_app(state, health)).await;

    let (_, created) = create_user(&app, json!({ "name": "Alex", "email": "a@x.com" })).await;
    let id = created["id"].as_str().expect("id");

    let request = actix_test::TestRequest::put()
        .uri(&format!("/update_user/{id}"))
        .set_json(json!({}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn explicit_nulls_are_excluded_from_the_update_set() {
    let (state, health) = app_state();
    let app = actix_test::init_service(build_app(state, health)).await;

    let (_, created) =
        create_user(&app, json!({ "name": "Alex", "email": "a@x.com", "age": 30 })).await;
    let id = created["id"].as_str().expect("id");

    let request = actix_test::TestRequest::put()
        .uri(&format!("/update_user/{id}"))
        .set_json(json!({ "name": null, "age": 31 }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed = list_users(&app).await;
    assert_eq!(listed["data"][0]["name"], "Alex");
    assert_eq!(listed["data"][0]["age"], 31);
}

#[actix_web::test]
async fn responses_carry_the_trace_header_and_probes_answer() {
    let (state, health) = app_state();
    let app = actix_test::init_service(build_app(state, health)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/get_users").to_request(),
    )
    .await;
    assert!(response.headers().contains_key("trace-id"));

    for probe in ["/health/ready", "/health/live"] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(probe).to_request(),
        )
        .await;
        assert!(response.status().is_success(), "probe failed: {probe}");
    }
}
