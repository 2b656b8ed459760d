//! The home catalog: search box, category filter, product cards with
//! a favorite toggle for signed-in users.

use yew::prelude::*;

use shared::Producto;
use web_sys::{HtmlInputElement, HtmlSelectElement};

use crate::hooks::use_favoritos::use_favoritos;
use crate::hooks::use_productos::use_productos;
use crate::services::api::ApiClient;
use crate::services::session::Session;

#[derive(Properties, PartialEq)]
pub struct ProductListProps {
    pub api_client: ApiClient,
    pub session: Session,
    pub on_select: Callback<i64>,
}

#[function_component(ProductList)]
pub fn product_list(props: &ProductListProps) -> Html {
    let productos = use_productos(&props.api_client);
    let favoritos = use_favoritos(&props.api_client, &props.session);

    let on_busqueda = {
        let set_busqueda = productos.actions.set_busqueda.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_busqueda.emit(input.value());
        })
    };
    let on_categoria = {
        let set_categoria = productos.actions.set_categoria.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            set_categoria.emit(select.value());
        })
    };

    if productos.state.loading {
        return html! { <div class="loading">{"Cargando catálogo..."}</div> };
    }

    if let Some(error) = &productos.state.error {
        let retry = {
            let reload = productos.actions.reload.clone();
            Callback::from(move |_: MouseEvent| reload.emit(()))
        };
        return html! {
            <div class="catalog-error">
                <p>{error}</p>
                <button class="retry-button" onclick={retry}>{"Reintentar"}</button>
            </div>
        };
    }

    let filtrados = productos.state.filtrados();

    html! {
        <section class="catalog">
            <div class="catalog-filters">
                <input
                    type="search"
                    class="search-input"
                    placeholder="Buscar por nombre..."
                    value={productos.state.busqueda.clone()}
                    oninput={on_busqueda}
                />
                <select class="category-select" onchange={on_categoria}>
                    <option value="" selected={productos.state.categoria.is_empty()}>
                        {"Todas las categorías"}
                    </option>
                    {for productos.state.categorias().into_iter().map(|categoria| {
                        let selected = productos.state.categoria == categoria;
                        html! { <option value={categoria.clone()} {selected}>{categoria}</option> }
                    })}
                </select>
            </div>

            {if let Some(error) = &favoritos.state.error {
                html! { <div class="form-message error">{error}</div> }
            } else {
                html! {}
            }}

            {if filtrados.is_empty() {
                html! { <p class="empty-catalog">{"No hay productos que coincidan con la búsqueda"}</p> }
            } else {
                html! {
                    <div class="product-grid">
                        {for filtrados.into_iter().map(|producto| {
                            view_card(props, producto, &favoritos)
                        })}
                    </div>
                }
            }}
        </section>
    }
}

fn view_card(
    props: &ProductListProps,
    producto: &Producto,
    favoritos: &crate::hooks::use_favoritos::UseFavoritosResult,
) -> Html {
    let producto_id = producto.id;
    let select = {
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(producto_id))
    };
    let es_favorito = favoritos.state.es_favorito(producto_id);
    let toggle = {
        let toggle = favoritos.actions.toggle.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            toggle.emit(producto_id);
        })
    };

    html! {
        <div class="product-card" onclick={select}>
            {if let Some(url) = producto.imagen_principal() {
                html! { <img class="product-image" src={url} alt={producto.nombre.clone()} /> }
            } else {
                html! { <div class="product-image placeholder"></div> }
            }}
            <div class="product-body">
                <h2 class="product-name">{&producto.nombre}</h2>
                <p class="product-description">{&producto.descripcion}</p>
                <p class="product-price">{format!("${:.2} por día", producto.precio)}</p>
                {if let Some(categoria) = &producto.categoria {
                    html! { <span class="product-category">{categoria}</span> }
                } else {
                    html! {}
                }}
            </div>
            {if props.session.is_authenticated() {
                html! {
                    <button
                        class={if es_favorito { "favorite-button active" } else { "favorite-button" }}
                        title={if es_favorito { "Quitar de favoritos" } else { "Agregar a favoritos" }}
                        onclick={toggle}
                    >
                        {if es_favorito { "♥" } else { "♡" }}
                    </button>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
