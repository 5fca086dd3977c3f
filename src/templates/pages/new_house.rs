// templates/pages/new_house.rs

use crate::listing::form::{
    FieldErrors, FormFailure, FormState, HouseFormInput, MAX_BEDROOMS, MIN_BEDROOMS,
};
use crate::templates::desktop_layout;
use maud::{html, Markup, PreEscaped};

const PREVIEW_WIDTH: u32 = 576;

// The address search widget calls `window.onSelectAddress(address, lat, lng)`.
// Picking a file fills the hidden `image` field with a data URL and previews it.
const FORM_SCRIPT: &str = r#"
(function () {
  var form = document.getElementById("house-form");
  if (!form) return;
  window.onSelectAddress = function (address, latitude, longitude) {
    form.elements["address"].value = address;
    form.elements["latitude"].value = latitude;
    form.elements["longitude"].value = longitude;
    document.getElementById("after-address").hidden = !address;
  };
  var file = document.getElementById("image-file");
  file.addEventListener("change", function (event) {
    var f = event.target.files && event.target.files[0];
    if (!f) return;
    var reader = new FileReader();
    reader.onloadend = function () {
      form.elements["image"].value = reader.result;
      var img = document.getElementById("preview");
      img.src = reader.result;
      img.hidden = false;
    };
    reader.readAsDataURL(f);
  });
})();
"#;

fn field_error(msg: Option<&String>) -> Markup {
    html! {
        @if let Some(msg) = msg {
            p class="field-error" { (msg) }
        }
    }
}

/// `stage` is how far the user got (`FormState::from_input`); `failure` is
/// set when re-rendering after a rejected save.
pub fn new_house_page(
    input: &HouseFormInput,
    stage: &FormState,
    failure: Option<&FormFailure>,
) -> Markup {
    let no_errors = FieldErrors::default();
    let errors = failure
        .and_then(FormFailure::field_errors)
        .unwrap_or(&no_errors);
    let preview = stage.preview();

    desktop_layout(
        "Add a new house",
        html! {
            form id="house-form" class="mx-auto max-w-xl py-4" method="post" action="/houses/new" {
                h1 class="text-xl" { "Add a new house" }

                @if let Some(msg) = failure.and_then(FormFailure::message) {
                    div class="form-error" role="alert" { (msg) }
                }

                div class="mt-4" {
                    label for="search" class="block" { "Search for your address" }
                    input id="search" type="text" class="p-2" value=(input.address) autocomplete="off";
                    input type="hidden" name="address" value=(input.address);
                    input type="hidden" name="latitude" value=(input.latitude);
                    input type="hidden" name="longitude" value=(input.longitude);
                    (field_error(errors.address.as_ref()))
                    (field_error(errors.latitude.as_ref()))
                    (field_error(errors.longitude.as_ref()))
                }

                div id="after-address" hidden[!stage.shows_details()] {
                    div class="mt-4" {
                        label
                            for="image-file"
                            class="p-4 border-dashed border-4 border-gray-600 block cursor-pointer"
                        {
                            "Click to add image (16:9)"
                        }
                        input id="image-file" type="file" accept="image/*" style="display: none";
                        input type="hidden" name="image" value=(preview.unwrap_or_default());
                        img
                            id="preview"
                            class="mt-4 object-cover"
                            src=(preview.unwrap_or_default())
                            hidden[preview.is_none()]
                            style=(format!("width: {PREVIEW_WIDTH}px; height: {}px;", PREVIEW_WIDTH * 9 / 16));
                        (field_error(errors.image.as_ref()))
                    }

                    div class="mt-4" {
                        label for="bedrooms" class="block" { "Beds" }
                        input
                            type="number"
                            id="bedrooms"
                            name="bedrooms"
                            class="p-2"
                            min=(MIN_BEDROOMS)
                            max=(MAX_BEDROOMS)
                            value=(input.bedrooms);
                        (field_error(errors.bedrooms.as_ref()))
                    }

                    div class="mt-4" {
                        button class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded" type="submit" {
                            "Save"
                        }
                        " "
                        a href="/" { "Cancel" }
                    }
                }
            }
            script { (PreEscaped(FORM_SCRIPT)) }
        },
    )
}
