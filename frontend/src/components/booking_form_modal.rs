//! The reservation dialog: date inputs clamped to the booking window,
//! required renter details, optional extras, and the derived summary.
//! All state lives in `use_booking`; this component only renders it.

use yew::prelude::*;

use shared::Producto;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::hooks::use_booking::{BookingState, DraftField};
use crate::services::date_utils::format_day_display;

#[derive(Properties, PartialEq)]
pub struct BookingFormModalProps {
    pub producto: Producto,
    pub state: BookingState,
    pub fecha_minima: String,
    pub fecha_maxima: String,
    pub on_close: Callback<()>,
    pub on_update: Callback<DraftField>,
    pub on_submit: Callback<()>,
}

#[function_component(BookingFormModal)]
pub fn booking_form_modal(props: &BookingFormModalProps) -> Html {
    if !props.state.dialog.is_open() {
        return html! {};
    }

    let state = &props.state;
    let draft = &state.draft;
    let submitting = state.dialog.is_submitting();

    let input = |make: fn(String) -> DraftField| {
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let target: HtmlInputElement = e.target_unchecked_into();
            on_update.emit(make(target.value()));
        })
    };
    let select = |make: fn(String) -> DraftField| {
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            on_update.emit(make(target.value()));
        })
    };
    let textarea = |make: fn(String) -> DraftField| {
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let target: HtmlTextAreaElement = e.target_unchecked_into();
            on_update.emit(make(target.value()));
        })
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let field_error = |message: Option<&'static str>| match message {
        Some(message) => html! { <span class="field-error">{message}</span> },
        None => html! {},
    };

    let fecha_inicio = draft.fecha_inicio.clone().unwrap_or_default();
    let fecha_fin = draft.fecha_fin.clone().unwrap_or_default();
    let dates_chosen = !fecha_inicio.is_empty() && !fecha_fin.is_empty();

    html! {
        <div class="modal-overlay">
            <div class="modal-content booking-modal">
                <div class="modal-header">
                    <h2>{format!("Reservar {}", props.producto.nombre)}</h2>
                    <button class="close-button" onclick={close.clone()}>{"×"}</button>
                </div>

                <div class="booking-product">
                    {if let Some(url) = props.producto.imagen_principal() {
                        html! { <img src={url} alt={props.producto.nombre.clone()} /> }
                    } else {
                        html! {}
                    }}
                    <div>
                        <h3>{&props.producto.nombre}</h3>
                        <p class="price">{format!("${:.2} por día", props.producto.precio)}</p>
                    </div>
                </div>

                <form class="booking-form" onsubmit={submit}>
                    <fieldset class="form-section">
                        <h4>{"Selección de Fechas"}</h4>
                        <div class="form-row">
                            <div class="form-group">
                                <label for="fecha-inicio">{"Fecha de inicio *"}</label>
                                <input
                                    id="fecha-inicio"
                                    type="date"
                                    value={fecha_inicio.clone()}
                                    min={props.fecha_minima.clone()}
                                    max={props.fecha_maxima.clone()}
                                    onchange={input(DraftField::FechaInicio)}
                                    disabled={submitting}
                                />
                            </div>
                            <div class="form-group">
                                <label for="fecha-fin">{"Fecha de fin *"}</label>
                                <input
                                    id="fecha-fin"
                                    type="date"
                                    value={fecha_fin.clone()}
                                    min={if fecha_inicio.is_empty() { props.fecha_minima.clone() } else { fecha_inicio.clone() }}
                                    max={props.fecha_maxima.clone()}
                                    onchange={input(DraftField::FechaFin)}
                                    disabled={submitting}
                                />
                            </div>
                        </div>
                        {if dates_chosen && state.quote.dias > 0 {
                            html! {
                                <p class="dates-summary">
                                    {format!(
                                        "Tu reserva comienza el {} y termina el {}. Duración: {} día{}.",
                                        format_day_display(&fecha_inicio),
                                        format_day_display(&fecha_fin),
                                        state.quote.dias,
                                        if state.quote.dias == 1 { "" } else { "s" },
                                    )}
                                </p>
                            }
                        } else {
                            html! {}
                        }}
                    </fieldset>

                    <fieldset class="form-section">
                        <h4>{"Datos Personales (Obligatorios)"}</h4>
                        <div class="form-row">
                            <div class="form-group">
                                <label for="nombre-completo">{"Nombre completo *"}</label>
                                <input
                                    id="nombre-completo"
                                    type="text"
                                    placeholder="Tu nombre completo"
                                    value={draft.renter.nombre_completo.clone()}
                                    onchange={input(DraftField::NombreCompleto)}
                                    disabled={submitting}
                                />
                                {field_error(state.renter_errors.nombre_completo)}
                            </div>
                            <div class="form-group">
                                <label for="email">{"Email *"}</label>
                                <input
                                    id="email"
                                    type="email"
                                    placeholder="tu@email.com"
                                    value={draft.renter.email.clone()}
                                    onchange={input(DraftField::Email)}
                                    disabled={submitting}
                                />
                                {field_error(state.renter_errors.email)}
                            </div>
                        </div>
                        <div class="form-row">
                            <div class="form-group">
                                <label for="telefono">{"Teléfono *"}</label>
                                <input
                                    id="telefono"
                                    type="tel"
                                    placeholder="+34 600 000 000"
                                    value={draft.renter.telefono.clone()}
                                    onchange={input(DraftField::Telefono)}
                                    disabled={submitting}
                                />
                                {field_error(state.renter_errors.telefono)}
                            </div>
                            <div class="form-group">
                                <label for="metodo-pago">{"Método de pago preferido"}</label>
                                <select
                                    id="metodo-pago"
                                    onchange={select(DraftField::MetodoPago)}
                                    disabled={submitting}
                                >
                                    <option value="" selected={draft.renter.metodo_pago.is_empty()}>
                                        {"Selecciona un método"}
                                    </option>
                                    {for [
                                        ("tarjeta", "Tarjeta de crédito/débito"),
                                        ("transferencia", "Transferencia bancaria"),
                                        ("efectivo", "Efectivo"),
                                        ("paypal", "PayPal"),
                                    ]
                                    .iter()
                                    .map(|(value, label)| {
                                        html! {
                                            <option
                                                value={*value}
                                                selected={draft.renter.metodo_pago == *value}
                                            >
                                                {*label}
                                            </option>
                                        }
                                    })}
                                </select>
                            </div>
                        </div>
                    </fieldset>

                    <fieldset class="form-section">
                        <h4>{"Información Adicional (Opcional)"}</h4>
                        <div class="form-row">
                            <div class="form-group">
                                <label for="direccion">{"Dirección"}</label>
                                <input
                                    id="direccion"
                                    type="text"
                                    placeholder="Calle, número, piso"
                                    value={draft.renter.direccion.clone()}
                                    onchange={input(DraftField::Direccion)}
                                    disabled={submitting}
                                />
                            </div>
                            <div class="form-group">
                                <label for="ciudad">{"Ciudad"}</label>
                                <input
                                    id="ciudad"
                                    type="text"
                                    placeholder="Tu ciudad"
                                    value={draft.renter.ciudad.clone()}
                                    onchange={input(DraftField::Ciudad)}
                                    disabled={submitting}
                                />
                            </div>
                        </div>
                        <div class="form-row">
                            <div class="form-group">
                                <label for="codigo-postal">{"Código postal"}</label>
                                <input
                                    id="codigo-postal"
                                    type="text"
                                    placeholder="28001"
                                    value={draft.renter.codigo_postal.clone()}
                                    onchange={input(DraftField::CodigoPostal)}
                                    disabled={submitting}
                                />
                            </div>
                            <div class="form-group">
                                <label for="comentarios">{"Comentarios adicionales"}</label>
                                <textarea
                                    id="comentarios"
                                    rows="3"
                                    placeholder="Requisitos especiales, horarios preferidos, etc."
                                    value={draft.renter.comentarios.clone()}
                                    onchange={textarea(DraftField::Comentarios)}
                                    disabled={submitting}
                                />
                            </div>
                        </div>
                    </fieldset>

                    <div class="booking-summary">
                        <h4>{"Resumen de la Reserva"}</h4>
                        <div class="summary-row">
                            <span>{"Duración:"}</span>
                            <strong>{format!(
                                "{} día{}",
                                state.quote.dias,
                                if state.quote.dias == 1 { "" } else { "s" }
                            )}</strong>
                        </div>
                        <div class="summary-row">
                            <span>{"Precio por día:"}</span>
                            <strong>{format!("${:.2}", props.producto.precio)}</strong>
                        </div>
                        <div class="summary-row total">
                            <span>{"Precio total:"}</span>
                            <strong>{format!("${:.2}", state.quote.total)}</strong>
                        </div>
                    </div>

                    {if let Some(error) = &state.error {
                        html! { <div class="form-message error">{error}</div> }
                    } else {
                        html! {}
                    }}

                    <div class="form-actions">
                        <button
                            type="button"
                            class="cancel-button"
                            onclick={close}
                            disabled={submitting}
                        >
                            {"Cancelar"}
                        </button>
                        <button
                            type="submit"
                            class="submit-button"
                            disabled={submitting || !dates_chosen}
                        >
                            {if submitting { "Creando reserva..." } else { "Confirmar Reserva" }}
                        </button>
                    </div>
                </form>

                <p class="disclaimer">{"* Campos obligatorios. La reserva se confirmará una vez procesado el pago."}</p>
            </div>
        </div>
    }
}
