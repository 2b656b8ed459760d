//! The product-detail view: gallery, price, características, and the
//! availability-calendar / booking-dialog pairing. This view owns the
//! availability data for its whole lifetime; the selection and the
//! draft live only as long as one booking attempt.

use yew::prelude::*;

use shared::{AvailabilitySet, Caracteristica, Producto, Reserva};
use wasm_bindgen_futures::spawn_local;

use crate::components::availability_calendar::AvailabilityCalendar;
use crate::components::booking_form_modal::BookingFormModal;
use crate::components::reviews::ReviewsSection;
use crate::hooks::use_availability::use_availability;
use crate::hooks::use_booking::use_booking;
use crate::hooks::use_range_selection::use_range_selection;
use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;
use crate::services::session::Session;

#[derive(Properties, PartialEq)]
pub struct ProductDetailProps {
    pub api_client: ApiClient,
    pub session: Session,
    pub producto_id: i64,
    pub on_back: Callback<()>,
}

#[function_component(ProductDetail)]
pub fn product_detail(props: &ProductDetailProps) -> Html {
    let producto = use_state(|| Option::<Producto>::None);
    let caracteristicas = use_state(Vec::<Caracteristica>::new);
    let imagen_activa = use_state(|| Option::<String>::None);
    let galeria_abierta = use_state(|| false);

    // Product load, with the separate características fetch only when
    // the product payload came without them.
    use_effect_with(props.producto_id, {
        let api_client = props.api_client.clone();
        let session = props.session.clone();
        let producto = producto.clone();
        let caracteristicas = caracteristicas.clone();
        let imagen_activa = imagen_activa.clone();
        move |producto_id| {
            let producto_id = *producto_id;
            let token = session.token();
            spawn_local(async move {
                match api_client.get_producto(producto_id, token.as_deref()).await {
                    Ok(data) => {
                        imagen_activa.set(data.imagen_principal());
                        if data.caracteristicas.is_empty() {
                            match api_client
                                .get_caracteristicas(producto_id, token.as_deref())
                                .await
                            {
                                Ok(list) => caracteristicas.set(list),
                                Err(err) => Logger::warn("product_detail", &err.to_string()),
                            }
                        } else {
                            caracteristicas.set(data.caracteristicas.clone());
                        }
                        producto.set(Some(data));
                    }
                    Err(err) => {
                        Logger::error("product_detail", &err.to_string());
                        producto.set(None);
                    }
                }
            });
            || ()
        }
    });

    let availability = use_availability(&props.api_client, &props.session, props.producto_id);

    // Bumped after each successful booking so the selection clears
    // without tying the callbacks into a cycle.
    let success_tick = use_state(|| 0u32);
    let on_success = {
        let apply = availability.actions.apply.clone();
        let success_tick = success_tick.clone();
        Callback::from(move |(_, refreshed): (Reserva, Option<AvailabilitySet>)| {
            if let Some(set) = refreshed {
                apply.emit(set);
            } else {
                Logger::warn(
                    "product_detail",
                    "availability refresh failed, keeping previous data",
                );
            }
            success_tick.set(*success_tick + 1);
        })
    };

    let producto_info = producto.as_ref().map(|p| (p.id, p.precio));
    let booking = use_booking(
        &props.api_client,
        &props.session,
        producto_info,
        &availability.state,
        on_success,
    );
    let range = use_range_selection(
        &availability.state,
        booking.actions.open_with_range.clone(),
    );

    use_effect_with(*success_tick, {
        let reset = range.actions.reset.clone();
        move |tick| {
            if *tick > 0 {
                reset.emit(());
            }
            || ()
        }
    });

    let Some(producto_data) = (*producto).clone() else {
        return html! {
            <div class="container">
                <h2>{"Producto no encontrado"}</h2>
            </div>
        };
    };

    let back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };
    let on_close = {
        let close = booking.actions.close.clone();
        let reset = range.actions.reset.clone();
        Callback::from(move |_| {
            close.emit(());
            reset.emit(());
        })
    };

    let (fecha_minima, fecha_maxima) = shared::dates::parse_day(&date_utils::current_day_key())
        .map(shared::dates::booking_window)
        .unwrap_or_default();

    let imagenes = producto_data.imagen_urls();
    let abrir_galeria = {
        let galeria_abierta = galeria_abierta.clone();
        Callback::from(move |_: MouseEvent| galeria_abierta.set(true))
    };
    let cerrar_galeria = {
        let galeria_abierta = galeria_abierta.clone();
        Callback::from(move |_: MouseEvent| galeria_abierta.set(false))
    };

    html! {
        <div class="container product-detail">
            <h1 class="product-name">{producto_data.nombre.to_uppercase()}</h1>
            <p class="product-description">{&producto_data.descripcion}</p>
            <p class="product-price">{format!("${:.2}", producto_data.precio)}</p>

            <div class="gallery">
                {if let Some(url) = (*imagen_activa).clone() {
                    html! {
                        <div class="gallery-main">
                            <img src={url} alt={format!("Imagen principal de {}", producto_data.nombre)} />
                        </div>
                    }
                } else {
                    html! {}
                }}
                <div class="gallery-thumbs">
                    {for imagenes.iter().skip(1).take(4).map(|url| {
                        let seleccionar = {
                            let imagen_activa = imagen_activa.clone();
                            let url = url.clone();
                            Callback::from(move |_: MouseEvent| imagen_activa.set(Some(url.clone())))
                        };
                        let class = if Some(url) == (*imagen_activa).as_ref() {
                            "thumb selected"
                        } else {
                            "thumb"
                        };
                        html! {
                            <img
                                class={class}
                                src={url.clone()}
                                alt={format!("Imagen de {}", producto_data.nombre)}
                                onclick={seleccionar}
                            />
                        }
                    })}
                </div>
                {if imagenes.len() > 1 {
                    html! {
                        <button class="gallery-open" onclick={abrir_galeria}>{"Ver Más Imágenes"}</button>
                    }
                } else {
                    html! {}
                }}
            </div>

            {if *galeria_abierta {
                html! {
                    <div class="modal-overlay" onclick={cerrar_galeria.clone()}>
                        <div
                            class="modal-content gallery-modal"
                            onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
                        >
                            <h2>{"Galería completa"}</h2>
                            <div class="gallery-grid">
                                {for imagenes.iter().map(|url| {
                                    html! { <img src={url.clone()} alt={producto_data.nombre.clone()} /> }
                                })}
                            </div>
                            <button class="close-button" onclick={cerrar_galeria}>{"Cerrar"}</button>
                        </div>
                    </div>
                }
            } else {
                html! {}
            }}

            <div class="back-link" onclick={back}>{"← Volver"}</div>

            <AvailabilityCalendar
                availability={availability.state.clone()}
                selector={range.selector.clone()}
                on_day_click={range.actions.click_day.clone()}
                on_retry={availability.actions.reload.clone()}
                on_open_booking={booking.actions.open.clone()}
            />

            <section class="features-section">
                <h2>{"Características"}</h2>
                {if caracteristicas.is_empty() {
                    html! { <p class="no-features">{"Sin características"}</p> }
                } else {
                    html! {
                        <div class="features-grid">
                            {for caracteristicas.iter().map(|caracteristica| {
                                html! {
                                    <div class="feature-item" key={caracteristica.id}>
                                        {if let Some(url) = &caracteristica.imagen_url {
                                            html! { <img class="feature-icon" src={url.clone()} alt={caracteristica.nombre.clone()} /> }
                                        } else {
                                            html! { <span class="feature-icon fallback">{"★"}</span> }
                                        }}
                                        <span class="feature-name">{&caracteristica.nombre}</span>
                                    </div>
                                }
                            })}
                        </div>
                    }
                }}
            </section>

            <ReviewsSection
                api_client={props.api_client.clone()}
                session={props.session.clone()}
                producto_id={props.producto_id}
            />

            <BookingFormModal
                producto={producto_data}
                state={booking.state.clone()}
                fecha_minima={fecha_minima}
                fecha_maxima={fecha_maxima}
                on_close={on_close}
                on_update={booking.actions.update.clone()}
                on_submit={booking.actions.submit.clone()}
            />
        </div>
    }
}
