//! Availability data for one product: explicit load lifecycle, a
//! monotonic ticket against out-of-order responses, and an `apply`
//! action for the atomic replacement after a successful booking.

use yew::prelude::*;

use shared::{AvailabilitySet, AvailabilityState};
use wasm_bindgen_futures::spawn_local;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::Session;

pub struct UseAvailabilityResult {
    pub state: AvailabilityState,
    pub actions: UseAvailabilityActions,
}

#[derive(Clone, PartialEq)]
pub struct UseAvailabilityActions {
    /// Full reload with a visible loading state; failures land in
    /// `AvailabilityState::Failed` and the user retries explicitly.
    pub reload: Callback<()>,
    /// Atomic replacement of the held set, used with the best-effort
    /// refresh a successful booking returns.
    pub apply: Callback<AvailabilitySet>,
}

#[hook]
pub fn use_availability(
    api_client: &ApiClient,
    session: &Session,
    producto_id: i64,
) -> UseAvailabilityResult {
    let state = use_state(|| AvailabilityState::Loading);
    let request_seq = use_mut_ref(|| 0u32);

    let reload = {
        let api_client = api_client.clone();
        let session = session.clone();
        let state = state.clone();
        let request_seq = request_seq.clone();

        use_callback(producto_id, move |_, producto_id| {
            let producto_id = *producto_id;
            let api_client = api_client.clone();
            let token = session.token();
            let state = state.clone();
            let request_seq = request_seq.clone();

            // Each load takes a ticket; a response only lands while its
            // ticket is still the latest, so a slow reply can never
            // clobber fresher data.
            let ticket = {
                let mut seq = request_seq.borrow_mut();
                *seq += 1;
                *seq
            };
            state.set(AvailabilityState::Loading);

            spawn_local(async move {
                let result = api_client
                    .get_disponibilidad(producto_id, token.as_deref())
                    .await;
                if *request_seq.borrow() != ticket {
                    Logger::warn("use_availability", "discarding stale availability response");
                    return;
                }
                match result {
                    Ok(response) => {
                        state.set(AvailabilityState::Ready(AvailabilitySet::from_response(
                            response,
                        )));
                    }
                    Err(err) => {
                        Logger::error("use_availability", &err.to_string());
                        state.set(AvailabilityState::Failed(err));
                    }
                }
            });
        })
    };

    let apply = {
        let state = state.clone();
        let request_seq = request_seq.clone();
        use_callback((), move |set: AvailabilitySet, _| {
            // Invalidate in-flight loads; the applied set is newer.
            *request_seq.borrow_mut() += 1;
            state.set(AvailabilityState::Ready(set));
        })
    };

    use_effect_with(producto_id, {
        let reload = reload.clone();
        move |_| {
            reload.emit(());
            || ()
        }
    });

    UseAvailabilityResult {
        state: (*state).clone(),
        actions: UseAvailabilityActions { reload, apply },
    }
}
