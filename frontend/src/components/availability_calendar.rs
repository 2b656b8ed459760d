//! Two consecutive months of availability, purely reactive over the
//! load state and the current selection. Out-of-month padding cells
//! and occupied days are not clickable.

use yew::prelude::*;

use shared::dates::{month_grid, next_month, prev_month};
use shared::{AvailabilityState, DayStatus, GridDay, RangeSelector};

use crate::services::date_utils::{self, format_month_title};

const WEEKDAYS: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];

#[derive(Properties, PartialEq)]
pub struct AvailabilityCalendarProps {
    pub availability: AvailabilityState,
    pub selector: RangeSelector,
    pub on_day_click: Callback<String>,
    pub on_retry: Callback<()>,
    /// Opens the booking dialog without a pre-selected range.
    pub on_open_booking: Callback<()>,
}

#[function_component(AvailabilityCalendar)]
pub fn availability_calendar(props: &AvailabilityCalendarProps) -> Html {
    let cursor = use_state(date_utils::current_year_month);
    let (year, month) = *cursor;

    let go_prev = {
        let cursor = cursor.clone();
        Callback::from(move |_: MouseEvent| cursor.set(prev_month(cursor.0, cursor.1)))
    };
    let go_next = {
        let cursor = cursor.clone();
        Callback::from(move |_: MouseEvent| cursor.set(next_month(cursor.0, cursor.1)))
    };

    if props.availability.is_loading() {
        return html! {
            <section class="calendar-section">
                <h2>{"Calendario de Disponibilidad"}</h2>
                <div class="loading">{"Cargando disponibilidad..."}</div>
            </section>
        };
    }

    if let AvailabilityState::Failed(err) = &props.availability {
        let retry = {
            let on_retry = props.on_retry.clone();
            Callback::from(move |_: MouseEvent| on_retry.emit(()))
        };
        return html! {
            <section class="calendar-section">
                <h2>{"Calendario de Disponibilidad"}</h2>
                <div class="calendar-error">
                    <p>{format!("Error al cargar la disponibilidad de fechas: {err}")}</p>
                    <button class="retry-button" onclick={retry}>{"Reintentar"}</button>
                </div>
            </section>
        };
    }

    let second = next_month(year, month);
    let open_booking = {
        let on_open_booking = props.on_open_booking.clone();
        Callback::from(move |_: MouseEvent| on_open_booking.emit(()))
    };

    html! {
        <section class="calendar-section">
            <h2>{"Calendario de Disponibilidad"}</h2>
            <div class="calendar-pair">
                {view_month(props, year, month, &go_prev, &go_next)}
                {view_month(props, second.0, second.1, &go_prev, &go_next)}
            </div>
            <div class="calendar-legend">
                <span class="legend-item available">{"Disponible (Click para reservar)"}</span>
                <span class="legend-item occupied">{"Ocupada"}</span>
                <span class="legend-item indefinite">{"Indefinida"}</span>
            </div>
            <div class="quick-booking">
                <button class="booking-button" onclick={open_booking}>{"Reservar Fechas"}</button>
            </div>
        </section>
    }
}

fn view_month(
    props: &AvailabilityCalendarProps,
    year: i32,
    month: u32,
    go_prev: &Callback<MouseEvent>,
    go_next: &Callback<MouseEvent>,
) -> Html {
    html! {
        <div class="calendar">
            <div class="calendar-header">
                <button class="calendar-nav-btn" onclick={go_prev.clone()}>{"‹"}</button>
                <h3 class="calendar-title">{format_month_title(year, month)}</h3>
                <button class="calendar-nav-btn" onclick={go_next.clone()}>{"›"}</button>
            </div>
            <div class="calendar-weekdays">
                {for WEEKDAYS.iter().map(|day| html! { <div class="weekday">{day}</div> })}
            </div>
            <div class="calendar-grid">
                {for month_grid(year, month).iter().map(|cell| view_day(props, cell))}
            </div>
        </div>
    }
}

fn view_day(props: &AvailabilityCalendarProps, cell: &GridDay) -> Html {
    if !cell.in_current_month {
        return html! { <div class="calendar-day other-month">{cell.day_of_month}</div> };
    }

    let status = props.availability.classify(&cell.day);
    let status_class = match status {
        DayStatus::Available => "available",
        DayStatus::Occupied => "occupied",
        DayStatus::Indefinite => "indefinite",
    };
    let selected = if props.selector.contains(&cell.day) {
        " selected"
    } else {
        ""
    };

    let onclick = (status != DayStatus::Occupied).then(|| {
        let on_day_click = props.on_day_click.clone();
        let day = cell.day.clone();
        Callback::from(move |_: MouseEvent| on_day_click.emit(day.clone()))
    });

    let title = format!(
        "{} - {}",
        date_utils::format_day_display(&cell.day),
        match status {
            DayStatus::Available => "Disponible (Click para reservar)",
            DayStatus::Occupied => "Ocupada",
            DayStatus::Indefinite => "Indefinida",
        }
    );

    html! {
        <div
            class={format!("calendar-day {status_class}{selected}")}
            title={title}
            onclick={onclick}
        >
            {cell.day_of_month}
        </div>
    }
}
