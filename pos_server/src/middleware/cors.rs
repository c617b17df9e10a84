use actix_cors::Cors;

/// Browser clients may call the API from any origin. Credentials are never shared across origins; clients send
/// their access token explicitly in the `Authorization` header.
pub fn cors_policy() -> Cors {
    Cors::default().allow_any_origin().allow_any_method().allow_any_header().max_age(3600)
}
