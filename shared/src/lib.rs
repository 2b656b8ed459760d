//! Shared types for the AutoRent front end: the wire contract spoken by
//! the marketplace backend plus the booking core (date arithmetic,
//! availability classification, range selection, reservation
//! submission). Everything here is plain Rust with no browser
//! dependency, so the whole booking engine is testable with `cargo
//! test` on the host.

use serde::{Deserialize, Serialize};

pub mod availability;
pub mod booking;
pub mod dates;
pub mod product;

pub use availability::{AvailabilitySet, AvailabilityState, DayStatus, LoadError};
pub use booking::{
    derive_quote, is_valid_email, submit_and_refresh, submit_reservation, validate_dates,
    validate_range_against_occupied, validate_renter, AvailabilityApi, DateSelectionError,
    DialogState, PriceQuote, RangeSelector, RenterErrors, RenterInfo, ReservationApi,
    ReservationDraft, SubmitError,
};
pub use dates::{
    booking_window, day_count, day_key, month_grid, next_month, parse_day, prev_month, DateError,
    GridDay, BOOKING_HORIZON_MONTHS,
};
pub use product::{Caracteristica, ImagenRef, Producto};

/// Availability window for one product. Day keys are `YYYY-MM-DD`
/// strings; days missing from both lists are simply unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisponibilidadResponse {
    #[serde(rename = "fechasDisponibles", default)]
    pub fechas_disponibles: Vec<String>,
    #[serde(rename = "fechasOcupadas", default)]
    pub fechas_ocupadas: Vec<String>,
}

/// Body of `POST /api/reservas`. The endpoint takes only the product
/// and the range; renter contact details stay client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrearReservaRequest {
    #[serde(rename = "productoId")]
    pub producto_id: i64,
    #[serde(rename = "fechaInicio")]
    pub fecha_inicio: String,
    #[serde(rename = "fechaFin")]
    pub fecha_fin: String,
}

/// A reservation as returned by the backend. Most fields are optional
/// because the create and list endpoints return different projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reserva {
    pub id: i64,
    #[serde(rename = "productoId", default)]
    pub producto_id: Option<i64>,
    #[serde(rename = "fechaInicio")]
    pub fecha_inicio: String,
    #[serde(rename = "fechaFin")]
    pub fecha_fin: String,
    #[serde(rename = "fechaCreacion", default)]
    pub fecha_creacion: Option<String>,
    #[serde(default)]
    pub estado: Option<EstadoReserva>,
    #[serde(default)]
    pub producto: Option<Producto>,
}

impl Reserva {
    /// Reservations created before the backend tracked states arrive
    /// without one and count as pending.
    pub fn estado_efectivo(&self) -> EstadoReserva {
        self.estado.unwrap_or(EstadoReserva::Pendiente)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoReserva {
    Pendiente,
    Confirmada,
    Cancelada,
}

impl EstadoReserva {
    pub fn label(self) -> &'static str {
        match self {
            EstadoReserva::Pendiente => "PENDIENTE",
            EstadoReserva::Confirmada => "CONFIRMADA",
            EstadoReserva::Cancelada => "CANCELADA",
        }
    }
}

/// A favorite entry. The list endpoint embeds the product; the toggle
/// endpoints only deal in product ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorito {
    pub id: i64,
    #[serde(rename = "productoId")]
    pub producto_id: i64,
    #[serde(default)]
    pub producto: Option<Producto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgregarFavoritoRequest {
    #[serde(rename = "productoId")]
    pub producto_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resena {
    pub id: i64,
    #[serde(rename = "productoId", default)]
    pub producto_id: Option<i64>,
    pub puntuacion: u8,
    #[serde(default)]
    pub comentario: Option<String>,
    #[serde(rename = "nombreUsuario", default)]
    pub nombre_usuario: Option<String>,
    #[serde(rename = "apellidoUsuario", default)]
    pub apellido_usuario: Option<String>,
    #[serde(rename = "fechaCreacion", default)]
    pub fecha_creacion: Option<String>,
}

impl Resena {
    pub fn display_name(&self) -> String {
        match (&self.nombre_usuario, &self.apellido_usuario) {
            (Some(nombre), Some(apellido)) => format!("{nombre} {apellido}"),
            (Some(nombre), None) => nombre.clone(),
            _ => "Usuario Anónimo".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrearResenaRequest {
    #[serde(rename = "productoId")]
    pub producto_id: i64,
    pub puntuacion: u8,
    pub comentario: String,
}

/// Aggregated ratings for one product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumenValoraciones {
    #[serde(rename = "puntuacionMedia", default)]
    pub puntuacion_media: f64,
    #[serde(rename = "totalResenas", default)]
    pub total_resenas: u32,
    #[serde(rename = "puntuacion1", default)]
    pub puntuacion_1: u32,
    #[serde(rename = "puntuacion2", default)]
    pub puntuacion_2: u32,
    #[serde(rename = "puntuacion3", default)]
    pub puntuacion_3: u32,
    #[serde(rename = "puntuacion4", default)]
    pub puntuacion_4: u32,
    #[serde(rename = "puntuacion5", default)]
    pub puntuacion_5: u32,
}

impl ResumenValoraciones {
    pub fn cantidad(&self, puntuacion: u8) -> u32 {
        match puntuacion {
            1 => self.puntuacion_1,
            2 => self.puntuacion_2,
            3 => self.puntuacion_3,
            4 => self.puntuacion_4,
            5 => self.puntuacion_5,
            _ => 0,
        }
    }

    /// Share of reviews with the given score, as a whole percentage.
    pub fn porcentaje(&self, puntuacion: u8) -> u32 {
        if self.total_resenas == 0 {
            return 0;
        }
        let cantidad = self.cantidad(puntuacion) as f64;
        ((cantidad / self.total_resenas as f64) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disponibilidad_parses_camel_case_wire_names() {
        let json = r#"{
            "fechasDisponibles": ["2025-06-05", "2025-06-06"],
            "fechasOcupadas": ["2025-06-10"]
        }"#;
        let parsed: DisponibilidadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.fechas_disponibles.len(), 2);
        assert_eq!(parsed.fechas_ocupadas, vec!["2025-06-10".to_string()]);
    }

    #[test]
    fn test_disponibilidad_missing_lists_default_to_empty() {
        let parsed: DisponibilidadResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.fechas_disponibles.is_empty());
        assert!(parsed.fechas_ocupadas.is_empty());
    }

    #[test]
    fn test_crear_reserva_serializes_wire_names() {
        let request = CrearReservaRequest {
            producto_id: 7,
            fecha_inicio: "2025-06-05".to_string(),
            fecha_fin: "2025-06-12".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["productoId"], 7);
        assert_eq!(json["fechaInicio"], "2025-06-05");
        assert_eq!(json["fechaFin"], "2025-06-12");
    }

    #[test]
    fn test_estado_reserva_wire_format() {
        let parsed: EstadoReserva = serde_json::from_str("\"CONFIRMADA\"").unwrap();
        assert_eq!(parsed, EstadoReserva::Confirmada);
        assert_eq!(serde_json::to_string(&EstadoReserva::Pendiente).unwrap(), "\"PENDIENTE\"");
    }

    #[test]
    fn test_reserva_without_estado_counts_as_pendiente() {
        let json = r#"{"id": 1, "fechaInicio": "2025-06-05", "fechaFin": "2025-06-12"}"#;
        let reserva: Reserva = serde_json::from_str(json).unwrap();
        assert_eq!(reserva.estado_efectivo(), EstadoReserva::Pendiente);
    }

    #[test]
    fn test_resena_display_name_falls_back_to_anonymous() {
        let resena: Resena = serde_json::from_str(r#"{"id": 1, "puntuacion": 4}"#).unwrap();
        assert_eq!(resena.display_name(), "Usuario Anónimo");

        let resena: Resena = serde_json::from_str(
            r#"{"id": 2, "puntuacion": 5, "nombreUsuario": "Ana", "apellidoUsuario": "Ruiz"}"#,
        )
        .unwrap();
        assert_eq!(resena.display_name(), "Ana Ruiz");
    }

    #[test]
    fn test_resumen_porcentaje() {
        let resumen = ResumenValoraciones {
            puntuacion_media: 4.5,
            total_resenas: 4,
            puntuacion_5: 3,
            puntuacion_4: 1,
            ..Default::default()
        };
        assert_eq!(resumen.porcentaje(5), 75);
        assert_eq!(resumen.porcentaje(4), 25);
        assert_eq!(resumen.porcentaje(1), 0);
        assert_eq!(ResumenValoraciones::default().porcentaje(5), 0);
    }
}
