//! Category read handlers.
//!
//! ```text
//! GET /api/v1/categories
//! GET /api/v1/categories/{id}
//! ```

use actix_web::{get, web};
use pagination::Page;

use crate::domain::{Category, CategoryId, DomainError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// All categories, wrapped in the same paged envelope as other listings.
///
/// The category set is small enough to always fit one page, so `lastPage`
/// is 1 whenever any category exists.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "All categories", body = crate::inbound::http::schemas::CategoryPageSchema),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["categories"],
    operation_id = "listCategories",
    security([])
)]
#[get("/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<web::Json<Page<Category>>> {
    let records = state
        .categories
        .list()
        .await
        .map_err(|error| DomainError::internal(error.to_string()))?;
    let total = records.len() as u64;
    let last_page = u32::from(!records.is_empty());
    Ok(web::Json(Page {
        records,
        total,
        last_page,
    }))
}

/// One category by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = i64, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "The category", body = Category),
        (status = 404, description = "Not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["categories"],
    operation_id = "findCategory",
    security([])
)]
#[get("/categories/{id}")]
pub async fn find_category(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Category>> {
    let category = state
        .categories
        .find_by_id(CategoryId::new(path.into_inner()))
        .await
        .map_err(|error| DomainError::internal(error.to_string()))?
        .ok_or_else(|| DomainError::not_found("no such category"))?;
    Ok(web::Json(category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{fixture_state, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(fixture_state()))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(list_categories)
                    .service(find_category),
            )
    }

    #[actix_web::test]
    async fn listing_wraps_categories_in_the_paged_envelope() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/categories")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["total"], 2);
        assert_eq!(value["lastPage"], 1);
        assert_eq!(value["records"][1]["adminWriteOnly"], true);
    }

    #[actix_web::test]
    async fn find_returns_the_category_or_not_found() {
        let app = actix_test::init_service(test_app()).await;
        let found = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/categories/2")
                .to_request(),
        )
        .await;
        assert_eq!(found.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(found).await;
        assert_eq!(value["name"], "notices");

        let missing = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/categories/99")
                .to_request(),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
