//! HTTP client for the marketplace backend. One method per endpoint;
//! bearer credentials are passed in by the caller (the `Session` owns
//! them), and every request carries a 10-second abort-signal timeout so
//! a dead backend surfaces as `LoadError::Timeout` instead of a hung
//! spinner.

use gloo::net::http::{Request, Response};
use gloo::timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use web_sys::{AbortController, AbortSignal};

use shared::{
    AgregarFavoritoRequest, AvailabilityApi, AvailabilitySet, Caracteristica, CrearReservaRequest,
    CrearResenaRequest, DisponibilidadResponse, Favorito, LoadError, Producto, Reserva,
    ReservationApi, Resena, ResumenValoraciones, SubmitError, BOOKING_HORIZON_MONTHS,
};

const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// API client for the rental marketplace backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Same-origin client; paths come out as `/api/...`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Client against another origin, for dev setups without a proxy.
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    // --- disponibilidad / reservas ---

    /// Availability for the whole booking horizon. The credential is
    /// optional here; without one the server may answer with a reduced
    /// view, which is fine.
    pub async fn get_disponibilidad(
        &self,
        producto_id: i64,
        token: Option<&str>,
    ) -> Result<DisponibilidadResponse, LoadError> {
        let url = format!(
            "{}/api/reservas/producto/{}/disponibilidad?meses={}",
            self.base_url, producto_id, BOOKING_HORIZON_MONTHS
        );
        self.get_json(&url, token).await
    }

    pub async fn crear_reserva(
        &self,
        token: &str,
        request: &CrearReservaRequest,
    ) -> Result<Reserva, SubmitError> {
        let url = format!("{}/api/reservas", self.base_url);
        let guard = AbortGuard::new().map_err(load_to_submit)?;
        let signal = guard.signal();
        let built = Request::post(&url)
            .abort_signal(Some(&signal))
            .header("Authorization", &bearer(token))
            .json(request)
            .map_err(|err| SubmitError::Network(err.to_string()))?;
        let response = match built.send().await {
            Ok(response) => response,
            Err(err) => return Err(load_to_submit(guard.finish(err))),
        };
        if response.ok() {
            return response
                .json::<Reserva>()
                .await
                .map_err(|err| SubmitError::Network(err.to_string()));
        }
        let status = response.status();
        let message = response
            .json::<ServerMessage>()
            .await
            .ok()
            .and_then(ServerMessage::into_message);
        Err(SubmitError::from_status(status, message))
    }

    pub async fn get_reservas_usuario(&self, token: &str) -> Result<Vec<Reserva>, LoadError> {
        let url = format!("{}/api/reservas/usuario", self.base_url);
        self.get_json(&url, Some(token)).await
    }

    pub async fn cancelar_reserva(&self, token: &str, reserva_id: i64) -> Result<(), LoadError> {
        let url = format!("{}/api/reservas/{}/cancelar", self.base_url, reserva_id);
        self.send_empty(Request::put(&url), Some(token)).await
    }

    pub async fn confirmar_reserva(&self, token: &str, reserva_id: i64) -> Result<(), LoadError> {
        let url = format!(
            "{}/api/reservas/usuario/{}/confirmar",
            self.base_url, reserva_id
        );
        self.send_empty(Request::put(&url), Some(token)).await
    }

    pub async fn eliminar_reserva(&self, token: &str, reserva_id: i64) -> Result<(), LoadError> {
        let url = format!("{}/api/reservas/usuario/{}", self.base_url, reserva_id);
        self.send_empty(Request::delete(&url), Some(token)).await
    }

    // --- productos ---

    pub async fn get_productos_random(&self, cantidad: u32) -> Result<Vec<Producto>, LoadError> {
        let url = format!("{}/api/productos/random?cantidad={}", self.base_url, cantidad);
        self.get_json(&url, None).await
    }

    pub async fn get_producto(
        &self,
        producto_id: i64,
        token: Option<&str>,
    ) -> Result<Producto, LoadError> {
        let url = format!("{}/api/productos/{}", self.base_url, producto_id);
        self.get_json(&url, token).await
    }

    pub async fn get_caracteristicas(
        &self,
        producto_id: i64,
        token: Option<&str>,
    ) -> Result<Vec<Caracteristica>, LoadError> {
        let url = format!("{}/api/productos/{}/caracteristicas", self.base_url, producto_id);
        self.get_json(&url, token).await
    }

    // --- favoritos ---

    pub async fn get_favoritos(&self, token: &str) -> Result<Vec<Favorito>, LoadError> {
        let url = format!("{}/api/favoritos", self.base_url);
        self.get_json(&url, Some(token)).await
    }

    pub async fn agregar_favorito(&self, token: &str, producto_id: i64) -> Result<(), LoadError> {
        let url = format!("{}/api/favoritos", self.base_url);
        let guard = AbortGuard::new()?;
        let signal = guard.signal();
        let built = Request::post(&url)
            .abort_signal(Some(&signal))
            .header("Authorization", &bearer(token))
            .json(&AgregarFavoritoRequest { producto_id })
            .map_err(|err| LoadError::Network(err.to_string()))?;
        match built.send().await {
            Ok(response) => check_ok(response),
            Err(err) => Err(guard.finish(err)),
        }
    }

    pub async fn eliminar_favorito(&self, token: &str, producto_id: i64) -> Result<(), LoadError> {
        let url = format!("{}/api/favoritos/{}", self.base_url, producto_id);
        self.send_empty(Request::delete(&url), Some(token)).await
    }

    // --- reseñas ---

    pub async fn get_resenas(&self, producto_id: i64) -> Result<Vec<Resena>, LoadError> {
        let url = format!("{}/api/resenas/producto/{}", self.base_url, producto_id);
        self.get_json(&url, None).await
    }

    pub async fn get_resumen_valoraciones(
        &self,
        producto_id: i64,
    ) -> Result<ResumenValoraciones, LoadError> {
        let url = format!("{}/api/resenas/producto/{}/resumen", self.base_url, producto_id);
        self.get_json(&url, None).await
    }

    pub async fn puede_valorar(&self, token: &str, producto_id: i64) -> Result<bool, LoadError> {
        let url = format!(
            "{}/api/resenas/producto/{}/puede-valorar",
            self.base_url, producto_id
        );
        self.get_json(&url, Some(token)).await
    }

    pub async fn crear_resena(
        &self,
        token: &str,
        request: &CrearResenaRequest,
    ) -> Result<Resena, LoadError> {
        let url = format!("{}/api/resenas", self.base_url);
        let guard = AbortGuard::new()?;
        let signal = guard.signal();
        let built = Request::post(&url)
            .abort_signal(Some(&signal))
            .header("Authorization", &bearer(token))
            .json(request)
            .map_err(|err| LoadError::Network(err.to_string()))?;
        match built.send().await {
            Ok(response) => read_json(response).await,
            Err(err) => Err(guard.finish(err)),
        }
    }

    // --- plumbing ---

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<T, LoadError> {
        let guard = AbortGuard::new()?;
        let signal = guard.signal();
        let mut request = Request::get(url).abort_signal(Some(&signal));
        if let Some(token) = token {
            request = request.header("Authorization", &bearer(token));
        }
        match request.send().await {
            Ok(response) => read_json(response).await,
            Err(err) => Err(guard.finish(err)),
        }
    }

    async fn send_empty(
        &self,
        builder: gloo::net::http::RequestBuilder,
        token: Option<&str>,
    ) -> Result<(), LoadError> {
        let guard = AbortGuard::new()?;
        let signal = guard.signal();
        let mut request = builder.abort_signal(Some(&signal));
        if let Some(token) = token {
            request = request.header("Authorization", &bearer(token));
        }
        match request.send().await {
            Ok(response) => check_ok(response),
            Err(err) => Err(guard.finish(err)),
        }
    }
}

impl ReservationApi for ApiClient {
    async fn create_reservation(
        &self,
        token: &str,
        request: &CrearReservaRequest,
    ) -> Result<Reserva, SubmitError> {
        self.crear_reserva(token, request).await
    }
}

impl AvailabilityApi for ApiClient {
    async fn fetch_availability(
        &self,
        token: Option<&str>,
        producto_id: i64,
    ) -> Result<AvailabilitySet, LoadError> {
        self.get_disponibilidad(producto_id, token)
            .await
            .map(AvailabilitySet::from_response)
    }
}

/// Aborts the in-flight request once the timeout fires; dropping the
/// guard cancels the timer, so a finished request never aborts late.
struct AbortGuard {
    controller: AbortController,
    _timer: Timeout,
}

impl AbortGuard {
    fn new() -> Result<Self, LoadError> {
        let controller = AbortController::new()
            .map_err(|_| LoadError::Network("AbortController unavailable".to_string()))?;
        let abort = controller.clone();
        let timer = Timeout::new(REQUEST_TIMEOUT_MS, move || abort.abort());
        Ok(Self {
            controller,
            _timer: timer,
        })
    }

    fn signal(&self) -> AbortSignal {
        self.controller.signal()
    }

    /// Distinguishes our own timeout abort from a genuine transport
    /// failure.
    fn finish(self, error: gloo::net::Error) -> LoadError {
        if self.controller.signal().aborted() {
            LoadError::Timeout
        } else {
            LoadError::Network(error.to_string())
        }
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn check_ok(response: Response) -> Result<(), LoadError> {
    if response.ok() {
        Ok(())
    } else {
        Err(LoadError::Status(response.status()))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, LoadError> {
    if !response.ok() {
        return Err(LoadError::Status(response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|err| LoadError::Decode(err.to_string()))
}

fn load_to_submit(error: LoadError) -> SubmitError {
    match error {
        LoadError::Timeout => SubmitError::Timeout,
        LoadError::Network(message) | LoadError::Decode(message) => SubmitError::Network(message),
        LoadError::Status(status) => SubmitError::from_status(status, None),
    }
}

/// Error payload shape the backend uses for 4xx bodies; both keys are
/// seen in the wild.
#[derive(Debug, Deserialize)]
struct ServerMessage {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ServerMessage {
    fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
