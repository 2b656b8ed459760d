//! Calendar click handling on top of the `RangeSelector` machine.
//! Completing a range notifies the booking dialog through
//! `on_range_ready`.

use yew::prelude::*;

use shared::{AvailabilityState, RangeSelector};

pub struct UseRangeSelectionResult {
    pub selector: RangeSelector,
    pub actions: UseRangeSelectionActions,
}

#[derive(Clone, PartialEq)]
pub struct UseRangeSelectionActions {
    pub click_day: Callback<String>,
    pub reset: Callback<()>,
}

#[hook]
pub fn use_range_selection(
    availability: &AvailabilityState,
    on_range_ready: Callback<(String, String)>,
) -> UseRangeSelectionResult {
    let selector = use_state(RangeSelector::default);

    let click_day = {
        let selector = selector.clone();
        use_callback(
            (availability.clone(), on_range_ready),
            move |day: String, (availability, on_range_ready)| {
                // Clicks mean nothing until a load has succeeded.
                let Some(set) = availability.set() else {
                    return;
                };
                let next = selector.click(&day, set);
                if let RangeSelector::RangeComplete(start, end) = &next {
                    on_range_ready.emit((start.clone(), end.clone()));
                }
                selector.set(next);
            },
        )
    };

    let reset = {
        let selector = selector.clone();
        use_callback((), move |_, _| selector.set(RangeSelector::Empty))
    };

    UseRangeSelectionResult {
        selector: (*selector).clone(),
        actions: UseRangeSelectionActions { click_day, reset },
    }
}
