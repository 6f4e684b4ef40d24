//! End-to-end coverage of the forum REST API against in-memory fixtures.
//!
//! Exercises the full handler stack: session middleware, validation,
//! the category write gate, and the paged listing envelope.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use backend::domain::PostService;
use backend::domain::ports::{
    FixtureCategoryRepository, FixturePostRepository, FixtureUserRepository,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{categories, posts, users};

fn fixture_state() -> HttpState {
    let category_repository = Arc::new(FixtureCategoryRepository::default());
    HttpState::new(
        PostService::new(
            Arc::new(FixturePostRepository::default()),
            category_repository.clone(),
        ),
        category_repository,
        Arc::new(FixtureUserRepository::default()),
    )
}

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(fixture_state()))
        .wrap(session)
        .service(
            web::scope("/api/v1")
                .service(users::login)
                .service(users::current_user)
                .service(posts::list_posts)
                .service(posts::create_post)
                .service(posts::find_post)
                .service(categories::list_categories)
                .service(categories::find_category),
        )
}

async fn login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    username: &str,
) -> actix_web::cookie::Cookie<'static> {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"username": username, "password": "password"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}

#[actix_web::test]
async fn posting_and_reading_round_trips() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login(&app, "bob").await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/posts")
            .cookie(cookie)
            .set_json(json!({"title": "First topic", "categoryId": 1}))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created_body: Value = actix_test::read_body_json(created).await;
    let post_id = created_body["id"].as_i64().expect("post id");

    let listing = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/posts?categoryId=1")
            .to_request(),
    )
    .await;
    let listing_body: Value = actix_test::read_body_json(listing).await;
    assert_eq!(listing_body["total"], 1);
    assert_eq!(listing_body["lastPage"], 1);
    assert_eq!(listing_body["records"][0]["title"], "First topic");
    assert_eq!(listing_body["records"][0]["authorFirstName"], "Bob");

    let detail = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/posts/{post_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(detail.status(), StatusCode::OK);
    let detail_body: Value = actix_test::read_body_json(detail).await;
    assert_eq!(detail_body["viewCount"], 1);
    assert_eq!(detail_body["authorFirstName"], "Bob");
}

#[actix_web::test]
async fn the_category_write_gate_spans_the_whole_stack() {
    let app = actix_test::init_service(test_app()).await;

    // Anonymous writes are rejected outright.
    let anonymous = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/posts")
            .set_json(json!({"title": "Notice", "categoryId": 2}))
            .to_request(),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    // Members cannot write into the admin-only category.
    let member_cookie = login(&app, "bob").await;
    let member = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/posts")
            .cookie(member_cookie)
            .set_json(json!({"title": "Notice", "categoryId": 2}))
            .to_request(),
    )
    .await;
    assert_eq!(member.status(), StatusCode::FORBIDDEN);

    // Administrators can.
    let admin_cookie = login(&app, "admin").await;
    let admin = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/posts")
            .cookie(admin_cookie)
            .set_json(json!({"title": "Notice", "categoryId": 2}))
            .to_request(),
    )
    .await;
    assert_eq!(admin.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn categories_and_current_user_expose_the_gate_inputs() {
    let app = actix_test::init_service(test_app()).await;

    let listing = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/categories")
            .to_request(),
    )
    .await;
    assert_eq!(listing.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(listing).await;
    assert_eq!(body["records"][0]["adminWriteOnly"], false);
    assert_eq!(body["records"][1]["adminWriteOnly"], true);

    let cookie = login(&app, "admin").await;
    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let me_body: Value = actix_test::read_body_json(me).await;
    assert_eq!(me_body["roles"], json!(["Admin"]));
}
