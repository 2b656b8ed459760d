//! Reviews and rating summary for one product, plus review creation
//! for users the backend says may rate it.

use yew::prelude::*;

use shared::{CrearResenaRequest, LoadError, Resena, ResumenValoraciones};
use wasm_bindgen_futures::spawn_local;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::Session;

#[derive(Clone, PartialEq, Default)]
pub struct ResenasState {
    pub resenas: Vec<Resena>,
    pub resumen: Option<ResumenValoraciones>,
    pub puede_valorar: bool,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseResenasResult {
    pub state: ResenasState,
    pub actions: UseResenasActions,
}

#[derive(Clone, PartialEq)]
pub struct UseResenasActions {
    pub reload: Callback<()>,
    /// `(puntuacion, comentario)`; reloads the list on success.
    pub crear: Callback<(u8, String)>,
}

#[hook]
pub fn use_resenas(
    api_client: &ApiClient,
    session: &Session,
    producto_id: i64,
) -> UseResenasResult {
    let resenas = use_state(Vec::<Resena>::new);
    let resumen = use_state(|| Option::<ResumenValoraciones>::None);
    let puede_valorar = use_state(|| false);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let reload = {
        let api_client = api_client.clone();
        let session = session.clone();
        let resenas = resenas.clone();
        let resumen = resumen.clone();
        let puede_valorar = puede_valorar.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback(producto_id, move |_, producto_id| {
            let producto_id = *producto_id;
            let api_client = api_client.clone();
            let token = session.token();
            let resenas = resenas.clone();
            let resumen = resumen.clone();
            let puede_valorar = puede_valorar.clone();
            let loading = loading.clone();
            let error = error.clone();

            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match api_client.get_resenas(producto_id).await {
                    Ok(list) => resenas.set(list),
                    Err(err) => {
                        Logger::error("use_resenas", &err.to_string());
                        error.set(Some("Error al cargar las reseñas".to_string()));
                    }
                }

                // The summary and the rating-eligibility check are
                // decorative; their failures only log.
                match api_client.get_resumen_valoraciones(producto_id).await {
                    Ok(data) => resumen.set(Some(data)),
                    Err(err) => Logger::warn("use_resenas", &err.to_string()),
                }
                if let Some(token) = token {
                    match api_client.puede_valorar(&token, producto_id).await {
                        Ok(allowed) => puede_valorar.set(allowed),
                        Err(err) => Logger::warn("use_resenas", &err.to_string()),
                    }
                }
                loading.set(false);
            });
        })
    };

    let crear = {
        let api_client = api_client.clone();
        let session = session.clone();
        let error = error.clone();
        let reload = reload.clone();

        use_callback(producto_id, move |(puntuacion, comentario): (u8, String), producto_id| {
            let Some(token) = session.token() else {
                error.set(Some("Debes iniciar sesión para crear reseñas".to_string()));
                return;
            };
            let request = CrearResenaRequest {
                producto_id: *producto_id,
                puntuacion,
                comentario,
            };
            let api_client = api_client.clone();
            let session = session.clone();
            let error = error.clone();
            let reload = reload.clone();

            spawn_local(async move {
                match api_client.crear_resena(&token, &request).await {
                    Ok(_) => reload.emit(()),
                    Err(LoadError::Status(401)) => {
                        session.clear();
                        error.set(Some("Sesión expirada. Inicia sesión nuevamente.".to_string()));
                    }
                    Err(err) => {
                        Logger::error("use_resenas", &err.to_string());
                        error.set(Some("Error al crear la reseña".to_string()));
                    }
                }
            });
        })
    };

    use_effect_with(producto_id, {
        let reload = reload.clone();
        move |_| {
            reload.emit(());
            || ()
        }
    });

    UseResenasResult {
        state: ResenasState {
            resenas: (*resenas).clone(),
            resumen: (*resumen).clone(),
            puede_valorar: *puede_valorar,
            loading: *loading,
            error: (*error).clone(),
        },
        actions: UseResenasActions { reload, crear },
    }
}
