//! Request correlation.
//!
//! `TracingLogger` assigns every request an id and records it on the root
//! span; this middleware echoes it back in the `X-Request-ID` header.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{Error, HttpMessage};
use tracing_actix_web::RequestId;

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Copy the tracing request id onto the response.
///
/// Must be wrapped inside `TracingLogger`, which inserts the id.
pub async fn propagate_request_id(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let request_id = req.extensions().get::<RequestId>().cloned();
    let mut res = next.call(req).await?;

    if let Some(id) = request_id {
        if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
            res.headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use actix_web::middleware::from_fn;
    use actix_web::{App, HttpResponse, test, web};
    use tracing_actix_web::TracingLogger;

    use super::*;

    #[actix_web::test]
    async fn response_carries_request_id() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(propagate_request_id))
                .wrap(TracingLogger::default())
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let id = resp.headers().get(REQUEST_ID_HEADER).expect("request id header");
        assert!(!id.is_empty());
    }
}
