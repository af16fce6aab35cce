//! Cookie-backed sessions.
//!
//! `SessionMiddleware` turns the signed cookie into a per-request [`Session`]
//! stored in the request extensions. `RequireLogin` wraps protected resources
//! and answers `401 Login required` before the handler runs when that session
//! is anonymous. Handlers read the id through [`CurrentUser`].

use crate::infrastructure::config::Config;
use crate::infrastructure::security::{generate_session_token, validate_session_token};
use crate::presentation::error::ApiError;
use actix_web::body::EitherBody;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, ResponseError};
use std::future::{Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::{debug, error};

pub const SESSION_COOKIE: &str = "eraya_session";

/// Signs and verifies session cookies.
#[derive(Clone)]
pub struct SessionKeys {
    secret: String,
    ttl_secs: u64,
    secure: bool,
}

impl SessionKeys {
    pub fn new(secret: impl Into<String>, ttl_secs: u64, secure: bool) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
            secure,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.secret_key.clone(),
            config.session_ttl_secs,
            config.cookie_secure,
        )
    }

    /// Cookie that binds the client to `user_id`.
    pub fn establish(&self, user_id: i64) -> Result<Cookie<'static>, ApiError> {
        let token = generate_session_token(user_id, &self.secret, self.ttl_secs).map_err(|e| {
            error!(user_id = user_id, error = %e, "Failed to sign session");
            ApiError::Internal(e.to_string())
        })?;
        let max_age = Duration::seconds(i64::try_from(self.ttl_secs).unwrap_or(i64::MAX));
        Ok(self.base_cookie(token).max_age(max_age).finish())
    }

    /// Removal cookie; valid whether or not a session exists.
    pub fn clear(&self) -> Cookie<'static> {
        let mut cookie = self.base_cookie(String::new()).finish();
        cookie.make_removal();
        cookie
    }

    pub fn resolve(&self, token: &str) -> Option<i64> {
        match validate_session_token(token, &self.secret) {
            Ok(user_id) => Some(user_id),
            Err(e) => {
                debug!(error = %e, "Ignoring unusable session cookie");
                None
            }
        }
    }

    fn base_cookie(&self, value: String) -> actix_web::cookie::CookieBuilder<'static> {
        Cookie::build(SESSION_COOKIE, value)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
    }
}

/// The authenticated identity of the current request, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<i64>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }
}

impl FromRequest for Session {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = req.extensions().get::<Session>().copied().unwrap_or_default();
        ready(Ok(session))
    }
}

/// Id of the logged-in user; extraction fails with `401 Login required`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub i64);

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req.extensions().get::<Session>().and_then(Session::user_id);
        ready(user_id.map(CurrentUser).ok_or(ApiError::AuthRequired))
    }
}

// Session Middleware
pub struct SessionMiddleware {
    keys: Arc<SessionKeys>,
}

impl SessionMiddleware {
    pub fn new(keys: Arc<SessionKeys>) -> Self {
        Self { keys }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            keys: Arc::clone(&self.keys),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    keys: Arc<SessionKeys>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let session = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| self.keys.resolve(cookie.value()))
            .map(Session::authenticated)
            .unwrap_or_default();
        req.extensions_mut().insert(session);

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

// Login guard
pub struct RequireLogin;

impl<S, B> Transform<S, ServiceRequest> for RequireLogin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireLoginService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireLoginService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireLoginService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireLoginService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let logged_in = req
            .extensions()
            .get::<Session>()
            .and_then(Session::user_id)
            .is_some();

        if !logged_in {
            let response = ApiError::AuthRequired.error_response();
            return Box::pin(ready(Ok(req.into_response(response).map_into_right_body())));
        }

        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}
