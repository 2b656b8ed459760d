//! The signed-in user's favorites, as product cards with a remove
//! action.

use yew::prelude::*;

use crate::hooks::use_favoritos::use_favoritos;
use crate::services::api::ApiClient;
use crate::services::session::Session;

#[derive(Properties, PartialEq)]
pub struct FavoritosPageProps {
    pub api_client: ApiClient,
    pub session: Session,
    pub on_select: Callback<i64>,
}

#[function_component(FavoritosPage)]
pub fn favoritos_page(props: &FavoritosPageProps) -> Html {
    let favoritos = use_favoritos(&props.api_client, &props.session);

    if !props.session.is_authenticated() {
        return html! {
            <section class="favorites">
                <h1>{"Favoritos"}</h1>
                <p class="empty-favorites">{"Inicia sesión para ver tus favoritos"}</p>
            </section>
        };
    }

    html! {
        <section class="favorites">
            <h1>{"Favoritos"}</h1>

            {if let Some(error) = &favoritos.state.error {
                html! { <div class="form-message error">{error}</div> }
            } else {
                html! {}
            }}

            {if favoritos.state.loading {
                html! { <div class="loading">{"Cargando favoritos..."}</div> }
            } else if favoritos.state.favoritos.is_empty() {
                html! { <p class="empty-favorites">{"Todavía no has guardado favoritos"}</p> }
            } else {
                html! {
                    <div class="product-grid">
                        {for favoritos.state.favoritos.iter().map(|favorito| {
                            let producto_id = favorito.producto_id;
                            let select = {
                                let on_select = props.on_select.clone();
                                Callback::from(move |_: MouseEvent| on_select.emit(producto_id))
                            };
                            let quitar = {
                                let toggle = favoritos.actions.toggle.clone();
                                Callback::from(move |e: MouseEvent| {
                                    e.stop_propagation();
                                    toggle.emit(producto_id);
                                })
                            };
                            html! {
                                <div class="product-card" key={favorito.id} onclick={select}>
                                    {if let Some(producto) = &favorito.producto {
                                        html! {
                                            <>
                                                {if let Some(url) = producto.imagen_principal() {
                                                    html! { <img class="product-image" src={url} alt={producto.nombre.clone()} /> }
                                                } else {
                                                    html! { <div class="product-image placeholder"></div> }
                                                }}
                                                <div class="product-body">
                                                    <h2 class="product-name">{&producto.nombre}</h2>
                                                    <p class="product-price">{format!("${:.2} por día", producto.precio)}</p>
                                                </div>
                                            </>
                                        }
                                    } else {
                                        html! {
                                            <div class="product-body">
                                                <h2 class="product-name">{format!("Producto #{producto_id}")}</h2>
                                            </div>
                                        }
                                    }}
                                    <button class="favorite-button active" title="Quitar de favoritos" onclick={quitar}>
                                        {"♥"}
                                    </button>
                                </div>
                            }
                        })}
                    </div>
                }
            }}
        </section>
    }
}
