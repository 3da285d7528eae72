use actix_web::web::{self, ServiceConfig};

pub mod login;
pub mod logout;
pub mod register;
pub mod validate;

pub fn auth_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(login::login)
            .service(logout::logout)
            .service(register::register),
    );
}
