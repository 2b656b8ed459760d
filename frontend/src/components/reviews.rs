//! Reviews for a product: rating summary, the review list, and a
//! creation form for users the backend allows to rate.

use yew::prelude::*;

use web_sys::{HtmlSelectElement, HtmlTextAreaElement};

use crate::hooks::use_resenas::use_resenas;
use crate::services::api::ApiClient;
use crate::services::session::Session;

#[derive(Properties, PartialEq)]
pub struct StarRowProps {
    pub puntuacion: u8,
}

#[function_component(StarRow)]
pub fn star_row(props: &StarRowProps) -> Html {
    html! {
        <span class="star-row">
            {for (1..=5u8).map(|star| {
                if star <= props.puntuacion {
                    html! { <span class="star filled">{"★"}</span> }
                } else {
                    html! { <span class="star">{"☆"}</span> }
                }
            })}
        </span>
    }
}

#[derive(Properties, PartialEq)]
pub struct ReviewsSectionProps {
    pub api_client: ApiClient,
    pub session: Session,
    pub producto_id: i64,
}

#[function_component(ReviewsSection)]
pub fn reviews_section(props: &ReviewsSectionProps) -> Html {
    let resenas = use_resenas(&props.api_client, &props.session, props.producto_id);
    let puntuacion = use_state(|| 5u8);
    let comentario = use_state(String::new);

    let on_puntuacion = {
        let puntuacion = puntuacion.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            puntuacion.set(select.value().parse().unwrap_or(5));
        })
    };
    let on_comentario = {
        let comentario = comentario.clone();
        Callback::from(move |e: Event| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            comentario.set(area.value());
        })
    };
    let on_submit = {
        let crear = resenas.actions.crear.clone();
        let puntuacion = puntuacion.clone();
        let comentario = comentario.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            crear.emit((*puntuacion, (*comentario).clone()));
            comentario.set(String::new());
        })
    };

    html! {
        <section class="reviews-section">
            <h2>{"Reseñas de usuarios"}</h2>

            {if let Some(resumen) = &resenas.state.resumen {
                html! {
                    <div class="reviews-summary">
                        <div class="summary-average">
                            <span class="average-value">{format!("{:.1}", resumen.puntuacion_media)}</span>
                            <StarRow puntuacion={resumen.puntuacion_media.round() as u8} />
                            <span class="review-count">
                                {format!(
                                    "{} valoraci{}",
                                    resumen.total_resenas,
                                    if resumen.total_resenas == 1 { "ón" } else { "ones" }
                                )}
                            </span>
                        </div>
                        <div class="summary-distribution">
                            {for (1..=5u8).rev().map(|star| {
                                html! {
                                    <div class="distribution-row">
                                        <span>{star}</span>
                                        <span class="distribution-bar" data-share={resumen.porcentaje(star).to_string()}></span>
                                        <span>{resumen.cantidad(star)}</span>
                                    </div>
                                }
                            })}
                        </div>
                    </div>
                }
            } else {
                html! {}
            }}

            {if let Some(error) = &resenas.state.error {
                html! { <div class="form-message error">{error}</div> }
            } else {
                html! {}
            }}

            {if resenas.state.loading {
                html! { <div class="loading">{"Cargando reseñas..."}</div> }
            } else if resenas.state.resenas.is_empty() {
                html! { <p class="empty-reviews">{"Este producto aún no tiene reseñas"}</p> }
            } else {
                html! {
                    <ul class="review-list">
                        {for resenas.state.resenas.iter().map(|resena| {
                            html! {
                                <li class="review-item">
                                    <div class="review-header">
                                        <span class="review-author">{resena.display_name()}</span>
                                        <StarRow puntuacion={resena.puntuacion} />
                                        {if let Some(fecha) = &resena.fecha_creacion {
                                            html! { <span class="review-date">{fecha.clone()}</span> }
                                        } else {
                                            html! {}
                                        }}
                                    </div>
                                    {if let Some(comentario) = &resena.comentario {
                                        html! { <p class="review-comment">{comentario}</p> }
                                    } else {
                                        html! {}
                                    }}
                                </li>
                            }
                        })}
                    </ul>
                }
            }}

            {if resenas.state.puede_valorar {
                html! {
                    <form class="review-form" onsubmit={on_submit}>
                        <h3>{"Deja tu valoración"}</h3>
                        <div class="form-row">
                            <select onchange={on_puntuacion}>
                                {for (1..=5u8).rev().map(|value| {
                                    html! {
                                        <option
                                            value={value.to_string()}
                                            selected={*puntuacion == value}
                                        >
                                            {format!("{value} estrella{}", if value == 1 { "" } else { "s" })}
                                        </option>
                                    }
                                })}
                            </select>
                        </div>
                        <textarea
                            rows="3"
                            placeholder="Cuéntanos tu experiencia..."
                            value={(*comentario).clone()}
                            onchange={on_comentario}
                        />
                        <button type="submit" class="submit-button">{"Publicar reseña"}</button>
                    </form>
                }
            } else {
                html! {}
            }}
        </section>
    }
}
