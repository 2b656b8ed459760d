pub mod use_availability;
pub mod use_booking;
pub mod use_favoritos;
pub mod use_productos;
pub mod use_range_selection;
pub mod use_resenas;
pub mod use_reservas;
