//! The booking dialog controller: draft ownership, local validation,
//! submission, and the dialog's `Closed → Open → Submitting` cycle.
//! The draft survives every failure so the user can retry without
//! re-entering anything; success clears it and hands the refreshed
//! availability to the caller.

use yew::prelude::*;

use shared::{
    derive_quote, submit_and_refresh, validate_dates, validate_renter, AvailabilitySet,
    AvailabilityState, DialogState, PriceQuote, RenterErrors, Reserva, ReservationDraft,
    SubmitError,
};
use wasm_bindgen_futures::spawn_local;

use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;
use crate::services::session::Session;

/// One editable field of the reservation form.
#[derive(Clone, PartialEq)]
pub enum DraftField {
    FechaInicio(String),
    FechaFin(String),
    NombreCompleto(String),
    Email(String),
    Telefono(String),
    Direccion(String),
    Ciudad(String),
    CodigoPostal(String),
    Comentarios(String),
    MetodoPago(String),
}

fn apply_field(draft: &mut ReservationDraft, field: DraftField) {
    // Date inputs send "" when cleared; that means "unset", not a key.
    let as_day = |value: String| if value.is_empty() { None } else { Some(value) };
    match field {
        DraftField::FechaInicio(value) => draft.fecha_inicio = as_day(value),
        DraftField::FechaFin(value) => draft.fecha_fin = as_day(value),
        DraftField::NombreCompleto(value) => draft.renter.nombre_completo = value,
        DraftField::Email(value) => draft.renter.email = value,
        DraftField::Telefono(value) => draft.renter.telefono = value,
        DraftField::Direccion(value) => draft.renter.direccion = value,
        DraftField::Ciudad(value) => draft.renter.ciudad = value,
        DraftField::CodigoPostal(value) => draft.renter.codigo_postal = value,
        DraftField::Comentarios(value) => draft.renter.comentarios = value,
        DraftField::MetodoPago(value) => draft.renter.metodo_pago = value,
    }
}

#[derive(Clone, PartialEq)]
pub struct BookingState {
    pub dialog: DialogState,
    pub draft: ReservationDraft,
    /// Recomputed from the draft on every render.
    pub quote: PriceQuote,
    pub renter_errors: RenterErrors,
    pub error: Option<String>,
}

pub struct UseBookingResult {
    pub state: BookingState,
    pub actions: UseBookingActions,
}

#[derive(Clone, PartialEq)]
pub struct UseBookingActions {
    /// Opens the dialog with a blank draft for the current product.
    pub open: Callback<()>,
    /// Opens the dialog pre-seeded with a completed calendar range.
    pub open_with_range: Callback<(String, String)>,
    pub close: Callback<()>,
    pub update: Callback<DraftField>,
    pub submit: Callback<()>,
}

#[hook]
pub fn use_booking(
    api_client: &ApiClient,
    session: &Session,
    producto: Option<(i64, f64)>,
    availability: &AvailabilityState,
    on_success: Callback<(Reserva, Option<AvailabilitySet>)>,
) -> UseBookingResult {
    let dialog = use_state(DialogState::default);
    let draft = use_state(ReservationDraft::default);
    let renter_errors = use_state(RenterErrors::default);
    let error = use_state(|| Option::<String>::None);

    let open = {
        let dialog = dialog.clone();
        let draft = draft.clone();
        let renter_errors = renter_errors.clone();
        let error = error.clone();
        use_callback(producto, move |_, producto| {
            let Some((producto_id, precio)) = *producto else {
                return;
            };
            draft.set(ReservationDraft::for_product(producto_id, precio));
            renter_errors.set(RenterErrors::default());
            error.set(None);
            dialog.set(DialogState::Open);
        })
    };

    let open_with_range = {
        let dialog = dialog.clone();
        let draft = draft.clone();
        let renter_errors = renter_errors.clone();
        let error = error.clone();
        use_callback(producto, move |(start, end): (String, String), producto| {
            let Some((producto_id, precio)) = *producto else {
                return;
            };
            draft.set(ReservationDraft::with_range(producto_id, precio, &start, &end));
            renter_errors.set(RenterErrors::default());
            error.set(None);
            dialog.set(DialogState::Open);
        })
    };

    let close = {
        let dialog = dialog.clone();
        let draft = draft.clone();
        let renter_errors = renter_errors.clone();
        let error = error.clone();
        use_callback((), move |_, _| {
            dialog.set(DialogState::Closed);
            draft.set(ReservationDraft::default());
            renter_errors.set(RenterErrors::default());
            error.set(None);
        })
    };

    let update = {
        let draft = draft.clone();
        use_callback((), move |field: DraftField, _| {
            let mut next = (*draft).clone();
            apply_field(&mut next, field);
            draft.set(next);
        })
    };

    let submit = {
        let api_client = api_client.clone();
        let session = session.clone();
        let dialog = dialog.clone();
        let draft = draft.clone();
        let renter_errors = renter_errors.clone();
        let error = error.clone();
        let on_success = on_success.clone();

        use_callback(availability.clone(), move |_, availability| {
            let draft_now = (*draft).clone();

            // Validation resolves locally; nothing leaves the page
            // until the draft passes.
            let today = date_utils::current_day_key();
            let known = availability.set().cloned().unwrap_or_default();
            if let Err(err) = validate_dates(&draft_now, &today, &known) {
                error.set(Some(err.to_string()));
                return;
            }
            let field_errors = validate_renter(&draft_now.renter);
            if !field_errors.is_empty() {
                renter_errors.set(field_errors);
                return;
            }
            renter_errors.set(RenterErrors::default());
            error.set(None);
            dialog.set(DialogState::Submitting);

            let api_client = api_client.clone();
            let session = session.clone();
            let token = session.token();
            let dialog = dialog.clone();
            let draft = draft.clone();
            let error = error.clone();
            let on_success = on_success.clone();
            spawn_local(async move {
                match submit_and_refresh(&api_client, token.as_deref(), &draft_now).await {
                    Ok((reserva, refreshed)) => {
                        dialog.set(DialogState::Closed);
                        draft.set(ReservationDraft::default());
                        on_success.emit((reserva, refreshed));
                    }
                    Err(err) => {
                        Logger::error("use_booking", &err.to_string());
                        if matches!(err, SubmitError::Unauthenticated) {
                            session.clear();
                        }
                        // Back to Open with the draft untouched.
                        dialog.set(DialogState::Open);
                        error.set(Some(err.to_string()));
                    }
                }
            });
        })
    };

    UseBookingResult {
        state: BookingState {
            dialog: *dialog,
            draft: (*draft).clone(),
            quote: derive_quote(&draft),
            renter_errors: (*renter_errors).clone(),
            error: (*error).clone(),
        },
        actions: UseBookingActions {
            open,
            open_with_range,
            close,
            update,
            submit,
        },
    }
}
