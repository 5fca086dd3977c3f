// templates/pages/home.rs

use std::time::Duration;

use crate::api::ImageHost;
use crate::domain::Listing;
use crate::explore::map_view::markers;
use crate::templates::{
    components::{house_list, houses_error, map_view, marker_data, MapVm},
    desktop_layout,
};
use maud::{html, Markup};

pub struct PanelVm {
    pub houses: Vec<Listing>,
    /// Set while map bounds are still settling.
    pub refetch_in: Option<Duration>,
}

/// List plus marker data; swapped in place whenever the map moves.
pub fn houses_panel(vm: &PanelVm, images: &dyn ImageHost) -> Markup {
    let trigger = match vm.refetch_in {
        Some(wait) => format!("refresh, load delay:{}ms", wait.as_millis().max(1)),
        None => "refresh".to_string(),
    };

    html! {
        div
            id="houses-panel"
            hx-get="/houses/panel"
            hx-trigger=(trigger)
            hx-swap="outerHTML"
        {
            (house_list(&vm.houses, images))
            (marker_data(&markers(&vm.houses)))
        }
    }
}

pub fn home_page(map: &MapVm, panel: &PanelVm, images: &dyn ImageHost) -> Markup {
    desktop_layout(
        "Houses",
        html! {
            div class="flex" {
                div class="w-1/2 pb-4" style="max-height: calc(100vh - 64px); overflow-x: scroll;" {
                    (houses_panel(panel, images))
                }
                div class="w-1/2" {
                    (map_view(map))
                }
            }
        },
    )
}

pub fn home_error_page() -> Markup {
    desktop_layout("Houses", houses_error())
}
