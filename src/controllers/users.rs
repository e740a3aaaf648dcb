use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::errors::ApiError;
use crate::models::user::{User, DEFAULT_PROFILE_IMAGE};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/userdetails", get(get_user_details))
        .route("/changepassword", post(change_password))
}

// POST /signup
#[derive(Debug, Deserialize)]
struct SignupRequest {
    firstname: String,
    lastname: String,
    email: String,
    username: String,
    password: String,
    profile_image: Option<String>,
}

async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
    )
    .bind(&req.username)
    .bind(&req.email)
    .fetch_one(&state.db.pool)
    .await?;

    if taken {
        return Err(ApiError::Conflict("Username or email already exists".to_string()));
    }

    let profile_image = req
        .profile_image
        .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string());

    let res = sqlx::query(
        "INSERT INTO users (firstname, lastname, email, username, password, profile_image)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&req.firstname)
    .bind(&req.lastname)
    .bind(&req.email)
    .bind(&req.username)
    .bind(&req.password)
    .bind(&profile_image)
    .execute(&state.db.pool)
    .await;

    match res {
        Ok(_) => Ok(Json(json!({"message": "Signup successful!"}))),
        // A concurrent signup can slip between the existence check and the
        // insert; the unique constraint reports it as the same conflict.
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(ApiError::Conflict("Username or email already exists".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

// POST /login
#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = User::find_by_email(&req.email, &state.db)
        .await?
        .filter(|u| u.verify_password(&req.password))
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    Ok(Json(user))
}

// GET /userdetails
#[derive(Debug, Deserialize)]
struct UserDetailsQuery {
    userid: Option<i64>,
    username: Option<String>,
    email: Option<String>,
}

async fn get_user_details(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserDetailsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut q = String::from("SELECT * FROM users WHERE TRUE");
    let mut bind_idx = 1;
    if params.userid.is_some() {
        q.push_str(&format!(" AND userid = ${}", bind_idx));
        bind_idx += 1;
    }
    if params.username.is_some() {
        q.push_str(&format!(" AND username = ${}", bind_idx));
        bind_idx += 1;
    }
    if params.email.is_some() {
        q.push_str(&format!(" AND email = ${}", bind_idx));
    }
    q.push_str(" ORDER BY userid LIMIT 1");

    let mut dbq = sqlx::query_as::<_, User>(&q);
    if let Some(id) = params.userid {
        dbq = dbq.bind(id);
    }
    if let Some(ref username) = params.username {
        dbq = dbq.bind(username);
    }
    if let Some(ref email) = params.email {
        dbq = dbq.bind(email);
    }

    let user = dbq
        .fetch_optional(&state.db.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

// POST /changepassword
#[derive(Debug, Deserialize)]
struct ChangePasswordRequest {
    email: String,
    old_password: String,
    new_password: String,
}

async fn change_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = User::find_by_email(&req.email, &state.db)
        .await?
        .filter(|u| u.verify_password(&req.old_password))
        .ok_or_else(|| ApiError::Unauthorized("Invalid user id or password".to_string()))?;

    let updated = sqlx::query_as::<_, User>(
        "UPDATE users SET password = $1 WHERE userid = $2 RETURNING *",
    )
    .bind(&req.new_password)
    .bind(user.userid)
    .fetch_one(&state.db.pool)
    .await?;

    Ok(Json(updated))
}
