//! Authenticated-session state.
//!
//! One writer (the login flow), many readers. Pages read the current user
//! through `use_auth`; the only durable artifact is the raw token string in
//! LocalStorage.

use chrono::Utc;
use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;

use catalog_shared::claims::{UserClaims, decode_claims};
use catalog_shared::{LoginRequest, STORAGE_TOKEN_KEY};

use crate::api::CatalogApi;

#[derive(Clone, Default)]
pub struct AuthState {
    /// Decoded claims of the current session, if any.
    pub user: Option<UserClaims>,
    pub is_authenticated: bool,
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Rehydrate the session from a persisted token. Expired or undecodable
/// tokens are dropped from storage.
pub fn init_auth(ctx: &AuthContext) {
    let Ok(token) = LocalStorage::get::<String>(STORAGE_TOKEN_KEY) else {
        return;
    };
    match decode_claims(&token) {
        Ok(claims) if !claims.is_expired(Utc::now()) => {
            ctx.set_state.update(|state| {
                state.user = Some(claims);
                state.is_authenticated = true;
            });
        }
        _ => {
            LocalStorage::delete(STORAGE_TOKEN_KEY);
        }
    }
}

/// Exchange credentials for a token, persist it and publish the session.
///
/// Any failure (transport, bad credentials, undecodable token) leaves both
/// storage and the in-memory state untouched.
pub async fn login(
    ctx: &AuthContext,
    api: &CatalogApi,
    email: String,
    password: String,
) -> Result<(), String> {
    let result = api
        .login(&LoginRequest { email, password })
        .await
        .map_err(|e| e.to_string())?;

    let claims = decode_claims(&result.token).map_err(|e| e.to_string())?;

    LocalStorage::set(STORAGE_TOKEN_KEY, &result.token).map_err(|e| e.to_string())?;

    ctx.set_state.update(|state| {
        state.user = Some(claims);
        state.is_authenticated = true;
    });
    Ok(())
}

/// Drop the persisted token and clear the in-memory session.
pub fn logout(ctx: &AuthContext) {
    LocalStorage::delete(STORAGE_TOKEN_KEY);
    ctx.set_state.update(|state| {
        state.user = None;
        state.is_authenticated = false;
    });
}
