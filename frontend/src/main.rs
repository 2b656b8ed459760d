//! AutoRent front end: a Yew application over the rental-marketplace
//! REST backend. Views switch in-app (no URL routing); each view owns
//! its own data hooks.

mod components;
mod hooks;
mod services;

use yew::prelude::*;

use components::favoritos_page::FavoritosPage;
use components::header::Header;
use components::my_reservations::MyReservations;
use components::product_detail::ProductDetail;
use components::product_list::ProductList;
use services::api::ApiClient;
use services::session::Session;

#[derive(Clone, Copy, PartialEq)]
enum View {
    Catalogo,
    Detalle(i64),
    Favoritos,
    Reservas,
}

#[function_component(App)]
fn app() -> Html {
    let api_client = ApiClient::new();
    let session = Session::default();
    let view = use_state(|| View::Catalogo);

    let go_catalogo = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Catalogo))
    };
    let go_favoritos = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Favoritos))
    };
    let go_reservas = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Reservas))
    };
    let go_detalle = {
        let view = view.clone();
        Callback::from(move |producto_id: i64| view.set(View::Detalle(producto_id)))
    };

    html! {
        <>
            <Header
                session={session.clone()}
                on_home={go_catalogo.clone()}
                on_favoritos={go_favoritos}
                on_reservas={go_reservas}
            />
            <main class="main">
                {match *view {
                    View::Catalogo => html! {
                        <ProductList
                            api_client={api_client.clone()}
                            session={session.clone()}
                            on_select={go_detalle.clone()}
                        />
                    },
                    View::Detalle(producto_id) => html! {
                        <ProductDetail
                            api_client={api_client.clone()}
                            session={session.clone()}
                            producto_id={producto_id}
                            on_back={go_catalogo.clone()}
                        />
                    },
                    View::Favoritos => html! {
                        <FavoritosPage
                            api_client={api_client.clone()}
                            session={session.clone()}
                            on_select={go_detalle.clone()}
                        />
                    },
                    View::Reservas => html! {
                        <MyReservations
                            api_client={api_client.clone()}
                            session={session.clone()}
                        />
                    },
                }}
            </main>
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
