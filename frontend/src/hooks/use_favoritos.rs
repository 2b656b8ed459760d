//! Favorites for the signed-in user. Loading applies a bounded retry
//! for exactly one transient connection failure (a truncated chunked
//! response); every other error surfaces immediately.

use yew::prelude::*;

use gloo::timers::future::TimeoutFuture;
use shared::{Favorito, LoadError};
use wasm_bindgen_futures::spawn_local;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::Session;

const RETRY_MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY_MS: u32 = 2_000;

fn is_transient(error: &LoadError) -> bool {
    matches!(error, LoadError::Network(message) if message.contains("ERR_INCOMPLETE_CHUNKED_ENCODING"))
}

#[derive(Clone, PartialEq, Default)]
pub struct FavoritosState {
    pub favoritos: Vec<Favorito>,
    pub loading: bool,
    pub error: Option<String>,
}

impl FavoritosState {
    pub fn es_favorito(&self, producto_id: i64) -> bool {
        self.favoritos.iter().any(|fav| fav.producto_id == producto_id)
    }
}

pub struct UseFavoritosResult {
    pub state: FavoritosState,
    pub actions: UseFavoritosActions,
}

#[derive(Clone, PartialEq)]
pub struct UseFavoritosActions {
    pub reload: Callback<()>,
    /// Adds or removes by product id, then reloads the list.
    pub toggle: Callback<i64>,
}

#[hook]
pub fn use_favoritos(api_client: &ApiClient, session: &Session) -> UseFavoritosResult {
    let favoritos = use_state(Vec::<Favorito>::new);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let reload = {
        let api_client = api_client.clone();
        let session = session.clone();
        let favoritos = favoritos.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            // Anonymous visitors simply have no favorites.
            let Some(token) = session.token() else {
                favoritos.set(Vec::new());
                return;
            };
            let api_client = api_client.clone();
            let session = session.clone();
            let favoritos = favoritos.clone();
            let loading = loading.clone();
            let error = error.clone();

            loading.set(true);
            error.set(None);
            spawn_local(async move {
                let mut attempt = 1;
                let result = loop {
                    match api_client.get_favoritos(&token).await {
                        Err(err) if is_transient(&err) && attempt < RETRY_MAX_ATTEMPTS => {
                            attempt += 1;
                            Logger::warn(
                                "use_favoritos",
                                &format!(
                                    "transient favorites failure, retrying ({attempt}/{RETRY_MAX_ATTEMPTS})"
                                ),
                            );
                            TimeoutFuture::new(RETRY_DELAY_MS).await;
                        }
                        other => break other,
                    }
                };
                match result {
                    Ok(list) => favoritos.set(list),
                    Err(LoadError::Status(401)) => {
                        session.clear();
                        error.set(Some("Sesión expirada. Inicia sesión nuevamente.".to_string()));
                    }
                    Err(err) => {
                        Logger::error("use_favoritos", &err.to_string());
                        error.set(Some(err.to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    let toggle = {
        let api_client = api_client.clone();
        let session = session.clone();
        let favoritos = favoritos.clone();
        let error = error.clone();
        let reload = reload.clone();

        use_callback((), move |producto_id: i64, _| {
            let Some(token) = session.token() else {
                error.set(Some("Inicia sesión para guardar favoritos.".to_string()));
                return;
            };
            let es_favorito = favoritos.iter().any(|fav| fav.producto_id == producto_id);
            let api_client = api_client.clone();
            let session = session.clone();
            let error = error.clone();
            let reload = reload.clone();

            spawn_local(async move {
                let result = if es_favorito {
                    api_client.eliminar_favorito(&token, producto_id).await
                } else {
                    api_client.agregar_favorito(&token, producto_id).await
                };
                match result {
                    Ok(()) => reload.emit(()),
                    Err(LoadError::Status(401)) => {
                        session.clear();
                        error.set(Some("Sesión expirada. Inicia sesión nuevamente.".to_string()));
                    }
                    Err(err) => {
                        Logger::error("use_favoritos", &err.to_string());
                        error.set(Some(err.to_string()));
                    }
                }
            });
        })
    };

    use_effect_with((), {
        let reload = reload.clone();
        move |_| {
            reload.emit(());
            || ()
        }
    });

    UseFavoritosResult {
        state: FavoritosState {
            favoritos: (*favoritos).clone(),
            loading: *loading,
            error: (*error).clone(),
        },
        actions: UseFavoritosActions { reload, toggle },
    }
}
