use rocket::Request;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;

use crate::validation::{ToValidationResponse, ValidationResponse};

fn caught(status: Status, req: &Request<'_>) -> Custom<Json<ValidationResponse>> {
    tracing::warn!(status = status.code, method = %req.method(), uri = %req.uri(), "Request rejected before reaching a handler");
    status.to_validation_response(&format!("Request to {} {}", req.method(), req.uri()))
}

#[catch(400)]
pub fn bad_request(req: &Request<'_>) -> Custom<Json<ValidationResponse>> {
    caught(Status::BadRequest, req)
}

#[catch(401)]
pub fn unauthorized(req: &Request<'_>) -> Custom<Json<ValidationResponse>> {
    caught(Status::Unauthorized, req)
}

#[catch(404)]
pub fn not_found(req: &Request<'_>) -> Custom<Json<ValidationResponse>> {
    caught(Status::NotFound, req)
}

#[catch(422)]
pub fn unprocessable_entity(req: &Request<'_>) -> Custom<Json<ValidationResponse>> {
    caught(Status::UnprocessableEntity, req)
}

#[catch(500)]
pub fn internal_error(req: &Request<'_>) -> Custom<Json<ValidationResponse>> {
    caught(Status::InternalServerError, req)
}

pub fn catchers() -> Vec<rocket::Catcher> {
    catchers![
        bad_request,
        unauthorized,
        not_found,
        unprocessable_entity,
        internal_error
    ]
}
