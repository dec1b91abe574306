pub mod games;

use actix_web::web;

use crate::health;

pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure(cfg);
}
