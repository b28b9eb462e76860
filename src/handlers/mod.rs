pub mod user;

use actix_cors::Cors;
use actix_web::http::{header, Method};
use actix_web::web::{self, Data, JsonConfig, ServiceConfig};

use crate::error::ApiError;
use crate::services::user_service::UserService;

/// Logged at startup; kept in step with the handler attributes by tests.
pub const ROUTES: &[(&str, &str)] = &[
    ("GET", "/api/users/{size}"),
    ("POST", "/api/users/add"),
    ("DELETE", "/api/users/{uid}/delete"),
    ("PUT", "/api/users/{uid}/update"),
];

/// Registers the users API and the JSON body settings it relies on.
pub fn configure(service: UserService) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(Data::new(service))
            .app_data(json_config())
            .service(
                web::scope("/api/users")
                    .service(user::insert_user)
                    .service(user::get_users)
                    .service(user::delete_user)
                    .service(user::update_user),
            );
    }
}

/// Body errors become 400 `{"ERROR": ...}`; any content type is accepted.
fn json_config() -> JsonConfig {
    JsonConfig::default()
        .content_type_required(false)
        .content_type(|_| true)
        .error_handler(|err, _req| ApiError::InvalidArgument(err.to_string()).into())
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allowed_headers(vec![
            header::ORIGIN,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
        ])
        .max_age(50)
}
