//! The home catalog: a random product selection with client-side
//! search and category filtering.

use yew::prelude::*;

use shared::Producto;
use wasm_bindgen_futures::spawn_local;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const CATALOG_SIZE: u32 = 10;

#[derive(Clone, PartialEq, Default)]
pub struct ProductosState {
    pub productos: Vec<Producto>,
    pub loading: bool,
    pub error: Option<String>,
    pub busqueda: String,
    pub categoria: String,
}

impl ProductosState {
    /// Products matching the current search text and category filter.
    pub fn filtrados(&self) -> Vec<&Producto> {
        let busqueda = self.busqueda.trim().to_lowercase();
        self.productos
            .iter()
            .filter(|producto| {
                busqueda.is_empty() || producto.nombre.to_lowercase().contains(&busqueda)
            })
            .filter(|producto| {
                self.categoria.is_empty()
                    || producto.categoria.as_deref() == Some(self.categoria.as_str())
            })
            .collect()
    }

    /// Distinct categories present in the loaded catalog, sorted.
    pub fn categorias(&self) -> Vec<String> {
        let mut categorias: Vec<String> = self
            .productos
            .iter()
            .filter_map(|producto| producto.categoria.clone())
            .collect();
        categorias.sort();
        categorias.dedup();
        categorias
    }
}

pub struct UseProductosResult {
    pub state: ProductosState,
    pub actions: UseProductosActions,
}

#[derive(Clone, PartialEq)]
pub struct UseProductosActions {
    pub reload: Callback<()>,
    pub set_busqueda: Callback<String>,
    pub set_categoria: Callback<String>,
}

#[hook]
pub fn use_productos(api_client: &ApiClient) -> UseProductosResult {
    let productos = use_state(Vec::<Producto>::new);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let busqueda = use_state(String::new);
    let categoria = use_state(String::new);

    let reload = {
        let api_client = api_client.clone();
        let productos = productos.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let productos = productos.clone();
            let loading = loading.clone();
            let error = error.clone();

            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match api_client.get_productos_random(CATALOG_SIZE).await {
                    Ok(list) => productos.set(list),
                    Err(err) => {
                        Logger::error("use_productos", &err.to_string());
                        error.set(Some("Error al cargar el catálogo".to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    let set_busqueda = {
        let busqueda = busqueda.clone();
        use_callback((), move |value: String, _| busqueda.set(value))
    };

    let set_categoria = {
        let categoria = categoria.clone();
        use_callback((), move |value: String, _| categoria.set(value))
    };

    use_effect_with((), {
        let reload = reload.clone();
        move |_| {
            reload.emit(());
            || ()
        }
    });

    UseProductosResult {
        state: ProductosState {
            productos: (*productos).clone(),
            loading: *loading,
            error: (*error).clone(),
            busqueda: (*busqueda).clone(),
            categoria: (*categoria).clone(),
        },
        actions: UseProductosActions {
            reload,
            set_busqueda,
            set_categoria,
        },
    }
}
