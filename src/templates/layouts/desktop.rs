use maud::{html, Markup, DOCTYPE};

const HTMX_JS: &str = "https://unpkg.com/htmx.org@1.9.12";
const MAPBOX_JS: &str = "https://api.mapbox.com/mapbox-gl-js/v2.15.0/mapbox-gl.js";
const MAPBOX_CSS: &str = "https://api.mapbox.com/mapbox-gl-js/v2.15.0/mapbox-gl.css";

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="icon" type="image/svg+xml" href="/static/home-solid.svg";
                link rel="stylesheet" href="/static/main.css";
                link rel="stylesheet" href=(MAPBOX_CSS);
                script src=(HTMX_JS) defer {}
                script src=(MAPBOX_JS) {}
            }
            body {
              header class="flex items-center justify-between px-6 py-3 shadow" {
                  img src="/static/home-solid.svg" alt="" width="24" height="24";
                  h3 { a href="/" { "Househunt" } }
                  nav {
                      ul {
                          li { a href="/" { "Browse" } }
                          li { a href="/houses/new" { "Add House" } }
                      }
                  }
              }
              main { (content) }
            }
        }
    }
}
