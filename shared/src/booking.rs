//! The booking core: two-click range selection over the calendar,
//! the reservation draft with its derived price quote, field and range
//! validation, and submission against the reservations endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use chrono::Duration;

use crate::availability::{AvailabilitySet, LoadError};
use crate::dates::{day_count, day_key, parse_day};
use crate::{CrearReservaRequest, Reserva};

/// Two-click range selection. Occupied days never change the state; a
/// second click at or before the chosen start restarts the selection
/// from the clicked day, and any click after a completed range starts
/// over. The machine is cyclic: there is no terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RangeSelector {
    #[default]
    Empty,
    StartChosen(String),
    RangeComplete(String, String),
}

impl RangeSelector {
    /// Handles one day click. Day keys compare lexicographically, which
    /// matches chronological order for `YYYY-MM-DD`.
    pub fn click(&self, day: &str, availability: &AvailabilitySet) -> RangeSelector {
        if availability.is_occupied(day) {
            return self.clone();
        }
        match self {
            RangeSelector::Empty | RangeSelector::RangeComplete(..) => {
                RangeSelector::StartChosen(day.to_string())
            }
            RangeSelector::StartChosen(start) => {
                if day > start.as_str() {
                    RangeSelector::RangeComplete(start.clone(), day.to_string())
                } else {
                    RangeSelector::StartChosen(day.to_string())
                }
            }
        }
    }

    pub fn range(&self) -> Option<(&str, &str)> {
        match self {
            RangeSelector::RangeComplete(start, end) => Some((start, end)),
            _ => None,
        }
    }

    pub fn start(&self) -> Option<&str> {
        match self {
            RangeSelector::Empty => None,
            RangeSelector::StartChosen(start) | RangeSelector::RangeComplete(start, _) => {
                Some(start)
            }
        }
    }

    /// Whether `day` falls inside the current selection, for
    /// highlighting.
    pub fn contains(&self, day: &str) -> bool {
        match self {
            RangeSelector::Empty => false,
            RangeSelector::StartChosen(start) => day == start,
            RangeSelector::RangeComplete(start, end) => {
                start.as_str() <= day && day <= end.as_str()
            }
        }
    }
}

/// Contact details collected with a reservation. Only the first three
/// fields are required; the rest are never validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenterInfo {
    pub nombre_completo: String,
    pub email: String,
    pub telefono: String,
    pub direccion: String,
    pub ciudad: String,
    pub codigo_postal: String,
    pub comentarios: String,
    pub metodo_pago: String,
}

/// Field-level problems with the required renter details, keyed the way
/// the form renders them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenterErrors {
    pub nombre_completo: Option<&'static str>,
    pub email: Option<&'static str>,
    pub telefono: Option<&'static str>,
}

impl RenterErrors {
    pub fn is_empty(&self) -> bool {
        self.nombre_completo.is_none() && self.email.is_none() && self.telefono.is_none()
    }
}

pub fn validate_renter(renter: &RenterInfo) -> RenterErrors {
    let mut errors = RenterErrors::default();
    if renter.nombre_completo.trim().is_empty() {
        errors.nombre_completo = Some("El nombre completo es obligatorio");
    }
    let email = renter.email.trim();
    if email.is_empty() {
        errors.email = Some("El email es obligatorio");
    } else if !is_valid_email(email) {
        errors.email = Some("El email no tiene un formato válido");
    }
    if renter.telefono.trim().is_empty() {
        errors.telefono = Some("El teléfono es obligatorio");
    }
    errors
}

/// `local@domain.tld` shape: exactly one `@`, no whitespace, and a dot
/// inside the domain with characters on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Everything collected for one booking attempt. Created when the
/// dialog opens (blank or pre-seeded from a completed range), kept
/// intact on every failure so the user can retry, and discarded
/// wholesale on success or dialog close.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub producto_id: i64,
    pub precio_por_dia: f64,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub renter: RenterInfo,
}

impl ReservationDraft {
    pub fn for_product(producto_id: i64, precio_por_dia: f64) -> Self {
        Self {
            producto_id,
            precio_por_dia,
            ..Self::default()
        }
    }

    pub fn with_range(producto_id: i64, precio_por_dia: f64, start: &str, end: &str) -> Self {
        Self {
            producto_id,
            precio_por_dia,
            fecha_inicio: Some(start.to_string()),
            fecha_fin: Some(end.to_string()),
            ..Self::default()
        }
    }
}

/// Derived price figures; never stored, recomputed whenever the range
/// changes. Zero until both endpoints hold a valid range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceQuote {
    pub dias: u32,
    pub total: f64,
}

pub fn derive_quote(draft: &ReservationDraft) -> PriceQuote {
    let (Some(start), Some(end)) = (&draft.fecha_inicio, &draft.fecha_fin) else {
        return PriceQuote::default();
    };
    match day_count(start, end) {
        Ok(dias) => PriceQuote {
            dias,
            total: dias as f64 * draft.precio_por_dia,
        },
        Err(_) => PriceQuote::default(),
    }
}

/// Why a candidate range cannot be booked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateSelectionError {
    #[error("Por favor selecciona ambas fechas")]
    MissingDates,
    #[error("La fecha de fin debe ser posterior a la fecha de inicio")]
    EndNotAfterStart,
    #[error("No puedes reservar fechas pasadas")]
    StartInPast,
    #[error("El rango seleccionado incluye fechas no disponibles ({dia})")]
    Conflict { dia: String },
}

/// Full pre-submission date validation: presence, order, past-date
/// rejection, then the inclusive occupied scan.
pub fn validate_dates(
    draft: &ReservationDraft,
    today: &str,
    availability: &AvailabilitySet,
) -> Result<(), DateSelectionError> {
    let (Some(start), Some(end)) = (&draft.fecha_inicio, &draft.fecha_fin) else {
        return Err(DateSelectionError::MissingDates);
    };
    let start_day = parse_day(start).map_err(|_| DateSelectionError::MissingDates)?;
    let end_day = parse_day(end).map_err(|_| DateSelectionError::MissingDates)?;
    if end_day <= start_day {
        return Err(DateSelectionError::EndNotAfterStart);
    }
    if start.as_str() < today {
        return Err(DateSelectionError::StartInPast);
    }
    validate_range_against_occupied(start, end, availability)
}

/// Walks every day in `[start, end]` inclusive. The scan is O(days),
/// which the booking horizon bounds to roughly half a year.
pub fn validate_range_against_occupied(
    start: &str,
    end: &str,
    availability: &AvailabilitySet,
) -> Result<(), DateSelectionError> {
    let mut cursor = parse_day(start).map_err(|_| DateSelectionError::MissingDates)?;
    let last = parse_day(end).map_err(|_| DateSelectionError::MissingDates)?;
    while cursor <= last {
        let key = day_key(cursor);
        if availability.is_occupied(&key) {
            return Err(DateSelectionError::Conflict { dia: key });
        }
        cursor += Duration::days(1);
    }
    Ok(())
}

/// Everything that can go wrong submitting a reservation. Validation
/// failures are resolved locally and never reach the network; the rest
/// map from the response. Display strings are the user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Error de conexión. Verifica tu internet e inténtalo de nuevo.")]
    Network(String),
    #[error("El servidor tardó demasiado en responder.")]
    Timeout,
    #[error("Debes iniciar sesión para hacer una reserva.")]
    Unauthenticated,
    #[error("El producto no está disponible en las fechas seleccionadas.")]
    RangeConflict,
    #[error("{0}")]
    Validation(String),
    #[error("Producto no encontrado.")]
    ItemNotFound,
    #[error("Error interno del servidor. Inténtalo más tarde.")]
    Server,
    #[error("Error al crear la reserva (código {0}).")]
    UnknownStatus(u16),
}

impl SubmitError {
    /// Maps a non-2xx reservation response to the taxonomy. `message`
    /// carries the server's own wording for 400s when it sent one.
    pub fn from_status(status: u16, message: Option<String>) -> SubmitError {
        match status {
            401 => SubmitError::Unauthenticated,
            409 => SubmitError::RangeConflict,
            400 => SubmitError::Validation(
                message.unwrap_or_else(|| "Datos de reserva inválidos.".to_string()),
            ),
            404 => SubmitError::ItemNotFound,
            500 => SubmitError::Server,
            other => SubmitError::UnknownStatus(other),
        }
    }
}

/// Booking dialog lifecycle. A failed submission returns to `Open`
/// with the draft intact; only success (or the user closing the
/// dialog) leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
    Submitting,
}

impl DialogState {
    pub fn is_open(self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn is_submitting(self) -> bool {
        matches!(self, DialogState::Submitting)
    }
}

/// Seam to the reservations endpoint, so the HTTP client and the test
/// fakes are interchangeable.
#[allow(async_fn_in_trait)]
pub trait ReservationApi {
    async fn create_reservation(
        &self,
        token: &str,
        request: &CrearReservaRequest,
    ) -> Result<Reserva, SubmitError>;
}

/// Seam to the availability endpoint, used for the post-booking
/// refresh.
#[allow(async_fn_in_trait)]
pub trait AvailabilityApi {
    async fn fetch_availability(
        &self,
        token: Option<&str>,
        producto_id: i64,
    ) -> Result<AvailabilitySet, LoadError>;
}

/// Submits a drafted reservation. Requires a stored credential and
/// fails fast, without touching the transport, when none is present.
/// Callers keep the draft on every error branch.
pub async fn submit_reservation<A: ReservationApi>(
    api: &A,
    token: Option<&str>,
    draft: &ReservationDraft,
) -> Result<Reserva, SubmitError> {
    let Some(token) = token else {
        return Err(SubmitError::Unauthenticated);
    };
    let (Some(start), Some(end)) = (&draft.fecha_inicio, &draft.fecha_fin) else {
        return Err(SubmitError::Validation(
            "Por favor selecciona ambas fechas.".to_string(),
        ));
    };
    let request = CrearReservaRequest {
        producto_id: draft.producto_id,
        fecha_inicio: start.clone(),
        fecha_fin: end.clone(),
    };
    api.create_reservation(token, &request).await
}

/// One full booking attempt: submit, then a best-effort availability
/// refresh on success only. A failed refresh yields `None` and the
/// caller keeps showing the previous (stale but valid) set.
pub async fn submit_and_refresh<A>(
    api: &A,
    token: Option<&str>,
    draft: &ReservationDraft,
) -> Result<(Reserva, Option<AvailabilitySet>), SubmitError>
where
    A: ReservationApi + AvailabilityApi,
{
    let reserva = submit_reservation(api, token, draft).await?;
    let refreshed = api.fetch_availability(token, draft.producto_id).await.ok();
    Ok((reserva, refreshed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    fn occupied(days: &[&str]) -> AvailabilitySet {
        AvailabilitySet::new(Vec::new(), days.iter().map(|d| d.to_string()).collect())
    }

    fn renter() -> RenterInfo {
        RenterInfo {
            nombre_completo: "Ana Ruiz".to_string(),
            email: "ana@example.com".to_string(),
            telefono: "+34 600 000 000".to_string(),
            ..RenterInfo::default()
        }
    }

    #[test]
    fn test_two_qualifying_clicks_complete_a_range() {
        let set = occupied(&[]);
        let selector = RangeSelector::Empty
            .click("2025-06-05", &set)
            .click("2025-06-12", &set);
        assert_eq!(
            selector,
            RangeSelector::RangeComplete("2025-06-05".to_string(), "2025-06-12".to_string())
        );
    }

    #[test]
    fn test_occupied_click_never_changes_state() {
        let set = occupied(&["2025-06-10"]);
        for state in [
            RangeSelector::Empty,
            RangeSelector::StartChosen("2025-06-05".to_string()),
            RangeSelector::RangeComplete("2025-06-05".to_string(), "2025-06-08".to_string()),
        ] {
            assert_eq!(state.click("2025-06-10", &set), state);
        }
    }

    #[test]
    fn test_out_of_order_second_click_restarts() {
        let set = occupied(&[]);
        let started = RangeSelector::Empty.click("2025-06-12", &set);
        assert_eq!(
            started.click("2025-06-05", &set),
            RangeSelector::StartChosen("2025-06-05".to_string())
        );
        assert_eq!(
            started.click("2025-06-12", &set),
            RangeSelector::StartChosen("2025-06-12".to_string())
        );
    }

    #[test]
    fn test_click_after_completion_starts_over() {
        let set = occupied(&[]);
        let complete =
            RangeSelector::RangeComplete("2025-06-05".to_string(), "2025-06-12".to_string());
        assert_eq!(
            complete.click("2025-06-20", &set),
            RangeSelector::StartChosen("2025-06-20".to_string())
        );
    }

    #[test]
    fn test_selection_scenario_with_occupied_day() {
        let set = occupied(&["2025-06-10"]);
        let mut selector = RangeSelector::Empty;
        selector = selector.click("2025-06-05", &set);
        assert_eq!(selector, RangeSelector::StartChosen("2025-06-05".to_string()));
        selector = selector.click("2025-06-10", &set);
        assert_eq!(selector, RangeSelector::StartChosen("2025-06-05".to_string()));
        selector = selector.click("2025-06-12", &set);
        assert_eq!(
            selector,
            RangeSelector::RangeComplete("2025-06-05".to_string(), "2025-06-12".to_string())
        );

        let (start, end) = selector.range().unwrap();
        let draft = ReservationDraft::with_range(1, 50.0, start, end);
        let quote = derive_quote(&draft);
        assert_eq!(quote.dias, 7);
        assert_eq!(quote.total, 350.0);
    }

    #[test]
    fn test_selection_contains_for_highlighting() {
        let complete =
            RangeSelector::RangeComplete("2025-06-05".to_string(), "2025-06-12".to_string());
        assert!(complete.contains("2025-06-05"));
        assert!(complete.contains("2025-06-08"));
        assert!(complete.contains("2025-06-12"));
        assert!(!complete.contains("2025-06-13"));
        assert!(!RangeSelector::Empty.contains("2025-06-05"));
    }

    #[test]
    fn test_quote_is_linear_in_days() {
        for dias in 1u32..=10 {
            let end = day_key(parse_day("2025-06-01").unwrap() + Duration::days(dias as i64));
            let draft = ReservationDraft::with_range(1, 50.0, "2025-06-01", &end);
            let quote = derive_quote(&draft);
            assert_eq!(quote.dias, dias);
            assert_eq!(quote.total, dias as f64 * 50.0);
        }
    }

    #[test]
    fn test_quote_zero_until_both_dates_set() {
        let mut draft = ReservationDraft::for_product(1, 50.0);
        assert_eq!(derive_quote(&draft), PriceQuote::default());
        draft.fecha_inicio = Some("2025-06-05".to_string());
        assert_eq!(derive_quote(&draft), PriceQuote::default());
    }

    #[test]
    fn test_quote_zero_for_reversed_range() {
        let draft = ReservationDraft::with_range(1, 50.0, "2025-06-12", "2025-06-05");
        assert_eq!(derive_quote(&draft), PriceQuote::default());
    }

    #[test]
    fn test_validate_renter_required_fields() {
        let errors = validate_renter(&RenterInfo::default());
        assert!(errors.nombre_completo.is_some());
        assert!(errors.email.is_some());
        assert!(errors.telefono.is_some());

        assert!(validate_renter(&renter()).is_empty());
    }

    #[test]
    fn test_validate_renter_ignores_optional_fields() {
        let mut info = renter();
        info.direccion = String::new();
        info.codigo_postal = "not a postcode at all".to_string();
        info.metodo_pago = "???".to_string();
        assert!(validate_renter(&info).is_empty());
    }

    #[test]
    fn test_email_shapes() {
        for valid in ["ana@example.com", "a.b+c@sub.domain.org", "x@y.zz"] {
            assert!(is_valid_email(valid), "{valid}");
        }
        for invalid in [
            "",
            "plainaddress",
            "@example.com",
            "ana@",
            "ana@example",
            "ana@.com",
            "ana@example.",
            "ana ruiz@example.com",
            "ana@exa@mple.com",
        ] {
            assert!(!is_valid_email(invalid), "{invalid}");
        }
    }

    #[test]
    fn test_validate_dates_happy_path() {
        let draft = ReservationDraft::with_range(1, 50.0, "2025-06-05", "2025-06-12");
        let set = occupied(&["2025-06-20"]);
        assert!(validate_dates(&draft, "2025-06-01", &set).is_ok());
    }

    #[test]
    fn test_validate_dates_rejections() {
        let set = occupied(&[]);

        let draft = ReservationDraft::for_product(1, 50.0);
        assert_eq!(
            validate_dates(&draft, "2025-06-01", &set),
            Err(DateSelectionError::MissingDates)
        );

        let draft = ReservationDraft::with_range(1, 50.0, "2025-06-05", "2025-06-05");
        assert_eq!(
            validate_dates(&draft, "2025-06-01", &set),
            Err(DateSelectionError::EndNotAfterStart)
        );

        let draft = ReservationDraft::with_range(1, 50.0, "2025-05-20", "2025-06-05");
        assert_eq!(
            validate_dates(&draft, "2025-06-01", &set),
            Err(DateSelectionError::StartInPast)
        );
    }

    #[test]
    fn test_occupied_scan_is_inclusive_of_both_endpoints() {
        for blocked in ["2025-06-05", "2025-06-08", "2025-06-12"] {
            let set = occupied(&[blocked]);
            assert_eq!(
                validate_range_against_occupied("2025-06-05", "2025-06-12", &set),
                Err(DateSelectionError::Conflict {
                    dia: blocked.to_string()
                })
            );
        }
    }

    #[test]
    fn test_submit_error_status_mapping() {
        assert_eq!(
            SubmitError::from_status(401, None),
            SubmitError::Unauthenticated
        );
        assert_eq!(
            SubmitError::from_status(409, None),
            SubmitError::RangeConflict
        );
        assert_eq!(
            SubmitError::from_status(400, Some("fechas mal".to_string())),
            SubmitError::Validation("fechas mal".to_string())
        );
        assert_eq!(SubmitError::from_status(404, None), SubmitError::ItemNotFound);
        assert_eq!(SubmitError::from_status(500, None), SubmitError::Server);
        assert_eq!(
            SubmitError::from_status(503, None),
            SubmitError::UnknownStatus(503)
        );
    }

    /// Transport fake that counts calls to each endpoint.
    struct FakeApi {
        create_calls: Cell<u32>,
        availability_calls: Cell<u32>,
        create_response: RefCell<Option<Result<Reserva, SubmitError>>>,
        availability_response: Result<AvailabilitySet, LoadError>,
    }

    impl FakeApi {
        fn new(create_response: Result<Reserva, SubmitError>) -> Self {
            Self {
                create_calls: Cell::new(0),
                availability_calls: Cell::new(0),
                create_response: RefCell::new(Some(create_response)),
                availability_response: Ok(occupied(&["2025-06-05"])),
            }
        }
    }

    impl ReservationApi for FakeApi {
        async fn create_reservation(
            &self,
            _token: &str,
            _request: &CrearReservaRequest,
        ) -> Result<Reserva, SubmitError> {
            self.create_calls.set(self.create_calls.get() + 1);
            self.create_response.borrow_mut().take().unwrap()
        }
    }

    impl AvailabilityApi for FakeApi {
        async fn fetch_availability(
            &self,
            _token: Option<&str>,
            _producto_id: i64,
        ) -> Result<AvailabilitySet, LoadError> {
            self.availability_calls.set(self.availability_calls.get() + 1);
            self.availability_response.clone()
        }
    }

    fn reserva() -> Reserva {
        Reserva {
            id: 99,
            producto_id: Some(1),
            fecha_inicio: "2025-06-05".to_string(),
            fecha_fin: "2025-06-12".to_string(),
            fecha_creacion: None,
            estado: None,
            producto: None,
        }
    }

    #[test]
    fn test_submit_without_credential_skips_transport() {
        let api = FakeApi::new(Ok(reserva()));
        let draft = ReservationDraft::with_range(1, 50.0, "2025-06-05", "2025-06-12");

        let result = block_on(submit_and_refresh(&api, None, &draft));

        assert_eq!(result.unwrap_err(), SubmitError::Unauthenticated);
        assert_eq!(api.create_calls.get(), 0);
        assert_eq!(api.availability_calls.get(), 0);
    }

    #[test]
    fn test_submit_conflict_preserves_draft_and_skips_refresh() {
        let api = FakeApi::new(Err(SubmitError::from_status(409, None)));
        let draft = ReservationDraft::with_range(1, 50.0, "2025-06-05", "2025-06-12");
        let before = draft.clone();

        let result = block_on(submit_and_refresh(&api, Some("tok"), &draft));

        assert_eq!(result.unwrap_err(), SubmitError::RangeConflict);
        assert_eq!(api.create_calls.get(), 1);
        assert_eq!(api.availability_calls.get(), 0);
        assert_eq!(draft, before);
    }

    #[test]
    fn test_submit_success_refreshes_availability() {
        let api = FakeApi::new(Ok(reserva()));
        let draft = ReservationDraft::with_range(1, 50.0, "2025-06-05", "2025-06-12");

        let (created, refreshed) =
            block_on(submit_and_refresh(&api, Some("tok"), &draft)).unwrap();

        assert_eq!(created.id, 99);
        assert_eq!(api.availability_calls.get(), 1);
        assert!(refreshed.unwrap().is_occupied("2025-06-05"));
    }

    #[test]
    fn test_submit_success_tolerates_failed_refresh() {
        let api = FakeApi {
            availability_response: Err(LoadError::Timeout),
            ..FakeApi::new(Ok(reserva()))
        };
        let draft = ReservationDraft::with_range(1, 50.0, "2025-06-05", "2025-06-12");

        let (_, refreshed) = block_on(submit_and_refresh(&api, Some("tok"), &draft)).unwrap();
        assert!(refreshed.is_none());
    }
}
