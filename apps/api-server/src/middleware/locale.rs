//! Request-scoped locale extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use serde::Deserialize;
use std::convert::Infallible;
use std::future::{Ready, ready};

use blog_core::domain::{Locale, select_locale};

use crate::state::AppState;

#[derive(Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

/// The language for this request's `message` text.
///
/// Read from `Accept-Language`, else the `lang` query parameter, else the
/// configured default. Never fails.
#[derive(Debug, Clone, Copy)]
pub struct RequestLocale(pub Locale);

impl FromRequest for RequestLocale {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let default = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.default_locale)
            .unwrap_or_default();

        let header = req
            .headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());
        let query = web::Query::<LangQuery>::from_query(req.query_string())
            .ok()
            .and_then(|q| q.into_inner().lang);

        ready(Ok(RequestLocale(select_locale(
            header,
            query.as_deref(),
            default,
        ))))
    }
}
