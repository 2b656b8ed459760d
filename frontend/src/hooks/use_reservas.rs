//! The signed-in user's reservations: listing plus the cancel,
//! confirm, and delete actions. Mutations update the local list the
//! way the backend would, without a full reload.

use yew::prelude::*;

use shared::{EstadoReserva, LoadError, Reserva};
use wasm_bindgen_futures::spawn_local;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::Session;

#[derive(Clone, PartialEq, Default)]
pub struct ReservasState {
    pub reservas: Vec<Reserva>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseReservasResult {
    pub state: ReservasState,
    pub actions: UseReservasActions,
}

#[derive(Clone, PartialEq)]
pub struct UseReservasActions {
    pub reload: Callback<()>,
    pub cancelar: Callback<i64>,
    pub confirmar: Callback<i64>,
    pub eliminar: Callback<i64>,
}

#[derive(Clone, Copy, PartialEq)]
enum Mutation {
    Cancelar,
    Confirmar,
    Eliminar,
}

#[hook]
pub fn use_reservas(api_client: &ApiClient, session: &Session) -> UseReservasResult {
    let reservas = use_state(Vec::<Reserva>::new);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let reload = {
        let api_client = api_client.clone();
        let session = session.clone();
        let reservas = reservas.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            let Some(token) = session.token() else {
                error.set(Some("Inicia sesión para ver tus reservas.".to_string()));
                return;
            };
            let api_client = api_client.clone();
            let session = session.clone();
            let reservas = reservas.clone();
            let loading = loading.clone();
            let error = error.clone();

            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match api_client.get_reservas_usuario(&token).await {
                    Ok(list) => reservas.set(list),
                    Err(LoadError::Status(401)) => {
                        session.clear();
                        error.set(Some("Sesión expirada. Inicia sesión nuevamente.".to_string()));
                    }
                    Err(err) => {
                        Logger::error("use_reservas", &err.to_string());
                        error.set(Some(err.to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    let cancelar = use_mutation(api_client, session, &reservas, &error, Mutation::Cancelar);
    let confirmar = use_mutation(api_client, session, &reservas, &error, Mutation::Confirmar);
    let eliminar = use_mutation(api_client, session, &reservas, &error, Mutation::Eliminar);

    use_effect_with((), {
        let reload = reload.clone();
        move |_| {
            reload.emit(());
            || ()
        }
    });

    UseReservasResult {
        state: ReservasState {
            reservas: (*reservas).clone(),
            loading: *loading,
            error: (*error).clone(),
        },
        actions: UseReservasActions {
            reload,
            cancelar,
            confirmar,
            eliminar,
        },
    }
}

#[hook]
fn use_mutation(
    api_client: &ApiClient,
    session: &Session,
    reservas: &UseStateHandle<Vec<Reserva>>,
    error: &UseStateHandle<Option<String>>,
    mutation: Mutation,
) -> Callback<i64> {
    let api_client = api_client.clone();
    let session = session.clone();
    let reservas = reservas.clone();
    let error = error.clone();

    use_callback(mutation, move |reserva_id: i64, mutation| {
        let Some(token) = session.token() else {
            error.set(Some("Inicia sesión para gestionar tus reservas.".to_string()));
            return;
        };
        let mutation = *mutation;
        let api_client = api_client.clone();
        let session = session.clone();
        let reservas = reservas.clone();
        let error = error.clone();

        spawn_local(async move {
            let result = match mutation {
                Mutation::Cancelar => api_client.cancelar_reserva(&token, reserva_id).await,
                Mutation::Confirmar => api_client.confirmar_reserva(&token, reserva_id).await,
                Mutation::Eliminar => api_client.eliminar_reserva(&token, reserva_id).await,
            };
            match result {
                Ok(()) => {
                    let next: Vec<Reserva> = match mutation {
                        Mutation::Cancelar | Mutation::Eliminar => (*reservas)
                            .iter()
                            .filter(|reserva| reserva.id != reserva_id)
                            .cloned()
                            .collect(),
                        Mutation::Confirmar => (*reservas)
                            .iter()
                            .cloned()
                            .map(|mut reserva| {
                                if reserva.id == reserva_id {
                                    reserva.estado = Some(EstadoReserva::Confirmada);
                                }
                                reserva
                            })
                            .collect(),
                    };
                    reservas.set(next);
                }
                Err(LoadError::Status(401)) => {
                    session.clear();
                    error.set(Some("Sesión expirada. Inicia sesión nuevamente.".to_string()));
                }
                Err(err) => {
                    Logger::error("use_reservas", &err.to_string());
                    error.set(Some(err.to_string()));
                }
            }
        });
    })
}
