use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;

use crate::{names, rejections::AppError};

/// `true` when the request was issued by htmx rather than a full page load.
pub(crate) fn htmx_request(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

/// Extracts whether the request is an HTMX request by checking the `HX-Request` header.
pub struct IsHtmx(pub bool);

impl<S: Send + Sync> FromRequestParts<S> for IsHtmx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(IsHtmx(htmx_request(&parts.headers)))
    }
}

/// Extracts the locale from the `lang` cookie, falling back to the browser's
/// `Accept-Language` header, then to the default locale.
pub struct Locale(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Locale {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let locale = jar
            .get(names::LOCALE_COOKIE_NAME)
            .and_then(|c| match_supported_locale(c.value()))
            .or_else(|| {
                parts
                    .headers
                    .get(header::ACCEPT_LANGUAGE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(locale_from_accept_language)
            })
            .unwrap_or(names::DEFAULT_LOCALE);
        Ok(Locale(locale.to_string()))
    }
}

/// Match a language tag against the two supported locales.
fn match_supported_locale(lang: &str) -> Option<&'static str> {
    if lang == "ar" || lang.starts_with("ar-") {
        return Some("ar");
    }
    if lang == "en" || lang.starts_with("en-") {
        return Some("en");
    }
    None
}

/// Pick the supported locale with the highest quality value out of an
/// `Accept-Language` header. Entries without a `q` parameter count as 1.0.
fn locale_from_accept_language(header: &str) -> Option<&'static str> {
    let mut best: Option<(&'static str, f32)> = None;

    for entry in header.split(',') {
        let entry = entry.trim();
        let (tag, params) = match entry.split_once(';') {
            Some((tag, params)) => (tag.trim(), Some(params)),
            None => (entry, None),
        };

        let Some(locale) = match_supported_locale(tag) else {
            continue;
        };

        let quality = params
            .and_then(|p| p.split(';').find_map(|part| part.trim().strip_prefix("q=")))
            .and_then(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);

        if best.map_or(true, |(_, q)| quality > q) {
            best = Some((locale, quality));
        }
    }

    best.map(|(locale, _)| locale)
}

/// Carries the quiz attempt token cookie. Requests without one have no
/// active quiz, which is an input error for answer and submit posts.
pub struct AttemptToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for AttemptToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        jar.get(names::ATTEMPT_COOKIE_NAME)
            .map(|c| AttemptToken(c.value().to_string()))
            .ok_or(AppError::Input("no active quiz attempt"))
    }
}
