use crate::services::user_service::{self, CreateUserRequest, UpdateUserRequest, UserStore};
use actix_web::{web, HttpResponse, Responder};
use tokio::sync::Mutex;

/// GET /api/v1/users - Lists the collection
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "Current user collection", body = user_service::ListUsersResponse)
    )
)]
pub async fn list_users(store: web::Data<Mutex<UserStore>>) -> impl Responder {
    let store = store.lock().await;
    let response = user_service::list_users(&store);

    log::info!("📋 GET /users - Listed {} users", response.count);
    HttpResponse::Ok().json(response)
}

/// GET /api/v1/users/{id} - Fetches one record
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The matching user", body = crate::models::user::User),
        (status = 404, description = "No user with that identifier")
    )
)]
pub async fn get_user(store: web::Data<Mutex<UserStore>>, id: web::Path<u64>) -> impl Responder {
    let id = id.into_inner();
    let store = store.lock().await;
    match user_service::get_user(&store, id) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => {
            log::warn!("⚠️ GET /users/{}: {}", id, e);
            HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}

/// POST /api/v1/users - Creates a record from the four form fields
///
/// The request goes through the user form, so every field must be a
/// non-empty string; the store assigns the identifier.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = user_service::CreateUserResponse),
        (status = 400, description = "A required field was empty", body = user_service::CreateUserResponse)
    )
)]
pub async fn create_user(
    store: web::Data<Mutex<UserStore>>,
    request: web::Json<CreateUserRequest>,
) -> impl Responder {
    log::info!("📝 POST /users - Adding {}", request.name);

    let mut store = store.lock().await;
    match user_service::create_user(&mut store, request.into_inner()) {
        Ok(response) => {
            if response.success {
                HttpResponse::Ok().json(response)
            } else {
                log::warn!("⚠️ Failed to add user: {:?}", response.error);
                HttpResponse::BadRequest().json(response)
            }
        }
        Err(e) => {
            log::error!("❌ Error adding user: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}

/// PATCH /api/v1/users/{id} - Merge-updates a record
///
/// Fields left out of the body are preserved; an unknown id still reports
/// success (historical no-op contract).
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    tag = "Users",
    request_body = UpdateUserRequest,
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Update applied", body = user_service::UpdateUserResponse)
    )
)]
pub async fn update_user(
    store: web::Data<Mutex<UserStore>>,
    id: web::Path<u64>,
    request: web::Json<UpdateUserRequest>,
) -> impl Responder {
    let id = id.into_inner();
    log::info!("🔧 PATCH /users/{} - Updating", id);

    let mut store = store.lock().await;
    match user_service::update_user(&mut store, id, request.into_inner()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error updating user {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}

/// DELETE /api/v1/users/{id} - Removes a record
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Delete applied", body = user_service::DeleteUserResponse)
    )
)]
pub async fn delete_user(
    store: web::Data<Mutex<UserStore>>,
    id: web::Path<u64>,
) -> impl Responder {
    let id = id.into_inner();
    log::info!("🗑️ DELETE /users/{}", id);

    let mut store = store.lock().await;
    match user_service::delete_user(&mut store, id) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error deleting user {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}
