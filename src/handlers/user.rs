use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, put, HttpResponse};

use crate::error::ApiError;
use crate::models::user::User;
use crate::services::user_service::UserService;

#[get("/{size}")]
pub async fn get_users(
    service: Data<UserService>,
    path: Path<String>,
) -> Result<HttpResponse, ApiError> {
    let size = path.into_inner();
    log::debug!("Listing up to {} users", size);

    let users = service.list(&size).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[post("/add")]
pub async fn insert_user(
    service: Data<UserService>,
    payload: Json<User>,
) -> Result<HttpResponse, ApiError> {
    let ack = service.insert(payload.into_inner()).await?;
    log::debug!("Inserted user {}", ack.inserted_id);
    Ok(HttpResponse::Ok().json(ack))
}

#[delete("/{uid}/delete")]
pub async fn delete_user(
    service: Data<UserService>,
    path: Path<String>,
) -> Result<HttpResponse, ApiError> {
    let uid = path.into_inner();

    let deleted = service.delete(&uid).await?;
    Ok(HttpResponse::Ok().json(deleted))
}

#[put("/{uid}/update")]
pub async fn update_user(
    service: Data<UserService>,
    path: Path<String>,
    payload: Json<User>,
) -> Result<HttpResponse, ApiError> {
    let uid = path.into_inner();

    let updated = service.update(&uid, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}
