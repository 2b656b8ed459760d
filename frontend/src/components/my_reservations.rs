//! The signed-in user's reservations, filterable by state.

use yew::prelude::*;

use shared::{day_count, EstadoReserva, Reserva};
use web_sys::HtmlSelectElement;

use crate::hooks::use_reservas::use_reservas;
use crate::services::api::ApiClient;
use crate::services::date_utils::format_day_display;
use crate::services::session::Session;

#[derive(Properties, PartialEq)]
pub struct MyReservationsProps {
    pub api_client: ApiClient,
    pub session: Session,
}

#[function_component(MyReservations)]
pub fn my_reservations(props: &MyReservationsProps) -> Html {
    let reservas = use_reservas(&props.api_client, &props.session);
    let filtro = use_state(String::new);

    let on_filtro = {
        let filtro = filtro.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            filtro.set(select.value());
        })
    };

    let visibles: Vec<&Reserva> = reservas
        .state
        .reservas
        .iter()
        .filter(|reserva| {
            filtro.is_empty() || reserva.estado_efectivo().label() == filtro.as_str()
        })
        .collect();

    html! {
        <section class="reservations">
            <h1>{"Mis Reservas"}</h1>

            <div class="reservations-filter">
                <label for="filtro-estado">{"Filtrar por estado:"}</label>
                <select id="filtro-estado" onchange={on_filtro}>
                    <option value="" selected={filtro.is_empty()}>{"Todas"}</option>
                    {for [EstadoReserva::Pendiente, EstadoReserva::Confirmada, EstadoReserva::Cancelada]
                        .iter()
                        .map(|estado| {
                            html! {
                                <option
                                    value={estado.label()}
                                    selected={filtro.as_str() == estado.label()}
                                >
                                    {estado.label()}
                                </option>
                            }
                        })}
                </select>
            </div>

            {if let Some(error) = &reservas.state.error {
                html! { <div class="form-message error">{error}</div> }
            } else {
                html! {}
            }}

            {if reservas.state.loading {
                html! { <div class="loading">{"Cargando reservas..."}</div> }
            } else if visibles.is_empty() {
                html! {
                    <p class="empty-reservations">
                        {if filtro.is_empty() {
                            "No tienes reservas todavía".to_string()
                        } else {
                            format!("No tienes reservas en estado \"{}\"", *filtro)
                        }}
                    </p>
                }
            } else {
                html! {
                    <ul class="reservation-list">
                        {for visibles.into_iter().map(|reserva| view_reserva(reserva, &reservas.actions))}
                    </ul>
                }
            }}
        </section>
    }
}

fn view_reserva(
    reserva: &Reserva,
    actions: &crate::hooks::use_reservas::UseReservasActions,
) -> Html {
    let reserva_id = reserva.id;
    let estado = reserva.estado_efectivo();
    let dias = day_count(&reserva.fecha_inicio, &reserva.fecha_fin).unwrap_or(0);

    let action = |target: &Callback<i64>| {
        let target = target.clone();
        Callback::from(move |_: MouseEvent| target.emit(reserva_id))
    };

    html! {
        <li class="reservation-item" key={reserva_id}>
            <div class="reservation-header">
                {if let Some(producto) = &reserva.producto {
                    html! { <h3>{&producto.nombre}</h3> }
                } else {
                    html! { <h3>{format!("Reserva #{reserva_id}")}</h3> }
                }}
                <span class={format!("reservation-state {}", estado.label().to_lowercase())}>
                    {estado.label()}
                </span>
            </div>
            <div class="reservation-dates">
                <span>{format!("Desde: {}", format_day_display(&reserva.fecha_inicio))}</span>
                <span>{format!("Hasta: {}", format_day_display(&reserva.fecha_fin))}</span>
                <span>{format!("Duración: {dias} día{}", if dias == 1 { "" } else { "s" })}</span>
            </div>
            {if let Some(creada) = &reserva.fecha_creacion {
                html! { <p class="reservation-created">{format!("Creada: {creada}")}</p> }
            } else {
                html! {}
            }}
            <div class="reservation-actions">
                {if estado == EstadoReserva::Pendiente {
                    html! {
                        <>
                            <button class="confirm-button" onclick={action(&actions.confirmar)}>
                                {"Confirmar"}
                            </button>
                            <button class="cancel-button" onclick={action(&actions.cancelar)}>
                                {"Cancelar"}
                            </button>
                        </>
                    }
                } else {
                    html! {}
                }}
                <button class="delete-button" onclick={action(&actions.eliminar)}>
                    {"Eliminar"}
                </button>
            </div>
        </li>
    }
}
