use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "User management service. Maintains a user collection persisted as a single JSON snapshot, seeded on first run from a remote demo API.\n\n**Features:**\n- List, create, update and delete users\n- Snapshot rewritten after every mutation\n- One-time remote seed fetch when no snapshot exists\n- Health monitoring"
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Users
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::user::User,
            crate::models::user::UserFields,
            crate::services::user_service::CreateUserRequest,
            crate::services::user_service::UpdateUserRequest,
            crate::services::user_service::UserInfo,
            crate::services::user_service::ListUsersResponse,
            crate::services::user_service::CreateUserResponse,
            crate::services::user_service::UpdateUserResponse,
            crate::services::user_service::DeleteUserResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint for monitoring service status."),
        (name = "Users", description = "User collection endpoints. Create, list, update and delete user records.")
    )
)]
pub struct ApiDoc;
