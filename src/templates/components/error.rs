use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Basic HTML error page
pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        html! {
            div class="container" {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to home" } }
            }
        },
    )
}

/// Shown in place of the list/map when the listings query fails.
pub fn houses_error() -> Markup {
    html! {
        div class="error" role="alert" { "Error loading houses" }
    }
}
