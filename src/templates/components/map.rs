use crate::domain::Viewport;
use crate::explore::map_view::{Marker, Popup};
use maud::{html, Markup, PreEscaped};

pub struct MapVm<'a> {
    pub viewport: Viewport,
    pub token: &'a str,
    pub style: &'a str,
}

// Drives mapbox-gl and reports back to the server:
// viewport on every move, bounds only on load and when a drag ends.
const MAP_SCRIPT: &str = r##"
(function () {
  var el = document.getElementById("map");
  if (!el || !window.mapboxgl) return;
  mapboxgl.accessToken = el.dataset.token;
  var map = new mapboxgl.Map({
    container: el,
    style: el.dataset.style,
    center: [parseFloat(el.dataset.longitude), parseFloat(el.dataset.latitude)],
    zoom: parseFloat(el.dataset.zoom),
    minZoom: 5,
    maxZoom: 15
  });
  var dragging = false;
  var markers = [];

  function post(url, fields) {
    return fetch(url, {
      method: "POST",
      headers: { "Content-Type": "application/x-www-form-urlencoded" },
      body: new URLSearchParams(fields).toString(),
      credentials: "same-origin"
    });
  }

  function sendBounds(event) {
    var b = map.getBounds().toArray();
    post("/map/bounds", { bounds: JSON.stringify(b), event: event, dragging: String(dragging) })
      .then(function () { htmx.trigger("#houses-panel", "refresh"); });
  }

  function syncMarkers() {
    markers.forEach(function (m) { m.remove(); });
    markers = [];
    document.querySelectorAll("#houses-panel [data-marker]").forEach(function (node) {
      var button = document.createElement("button");
      button.type = "button";
      button.className = "marker";
      button.innerHTML = '<img src="/static/home-solid.svg" alt="house" class="w-8">';
      var lngLat = [parseFloat(node.dataset.longitude), parseFloat(node.dataset.latitude)];
      button.addEventListener("click", function () {
        fetch("/map/popup?id=" + encodeURIComponent(node.dataset.id), { credentials: "same-origin" })
          .then(function (r) { return r.ok ? r.text() : ""; })
          .then(function (html) {
            if (!html) return;
            new mapboxgl.Popup({ closeOnClick: false }).setLngLat(lngLat).setHTML(html).addTo(map);
          });
      });
      markers.push(new mapboxgl.Marker({ element: button }).setLngLat(lngLat).addTo(map));
    });
  }

  map.on("load", function () { sendBounds("load"); syncMarkers(); });
  map.on("move", function () {
    var c = map.getCenter();
    post("/map/viewport", { latitude: c.lat, longitude: c.lng, zoom: map.getZoom() });
  });
  map.on("dragstart", function () { dragging = true; });
  map.on("moveend", function () { dragging = false; sendBounds("interaction"); });
  document.body.addEventListener("htmx:afterSwap", syncMarkers);
})();
"##;

pub fn map_view(vm: &MapVm) -> Markup {
    html! {
        div class="text-black relative" {
            div
                id="map"
                style="width: 100%; height: calc(100vh - 64px);"
                data-latitude=(vm.viewport.latitude)
                data-longitude=(vm.viewport.longitude)
                data-zoom=(vm.viewport.zoom)
                data-token=(vm.token)
                data-style=(vm.style)
            {}
            script { (PreEscaped(MAP_SCRIPT)) }
        }
    }
}

/// Invisible marker data the map script turns into pins.
pub fn marker_data(markers: &[Marker]) -> Markup {
    html! {
        ul class="markers" hidden {
            @for m in markers {
                li data-marker data-id=(m.id) data-latitude=(m.latitude) data-longitude=(m.longitude) {}
            }
        }
    }
}

pub fn popup(p: &Popup) -> Markup {
    html! {
        div class="text-center" {
            h3 { (p.title) }
            img class="mx-auto my-4" src=(p.image_url) width=(p.image_width) height=(p.image_height) alt=(p.title);
            a href=(p.href) { "View House" }
        }
    }
}
