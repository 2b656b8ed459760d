use yew::prelude::*;

use crate::services::session::Session;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub session: Session,
    pub on_home: Callback<()>,
    pub on_favoritos: Callback<()>,
    pub on_reservas: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let nav = |target: &Callback<()>| {
        let target = target.clone();
        Callback::from(move |_: MouseEvent| target.emit(()))
    };

    html! {
        <header class="header">
            <div class="container">
                <h1 class="brand" onclick={nav(&props.on_home)}>{"AutoRent"}</h1>
                <nav class="header-nav">
                    <button class="nav-link" onclick={nav(&props.on_home)}>{"Catálogo"}</button>
                    {if props.session.is_authenticated() {
                        html! {
                            <>
                                <button class="nav-link" onclick={nav(&props.on_favoritos)}>{"Favoritos"}</button>
                                <button class="nav-link" onclick={nav(&props.on_reservas)}>{"Mis Reservas"}</button>
                            </>
                        }
                    } else {
                        html! {}
                    }}
                </nav>
                {if let Some(name) = props.session.display_name() {
                    html! { <span class="session-user">{name}</span> }
                } else {
                    html! {}
                }}
            </div>
        </header>
    }
}
