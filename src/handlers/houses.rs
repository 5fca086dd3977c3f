// src/handlers/houses.rs
use astra::Request;

use crate::app::App;
use crate::errors::{ResultResp, ServerError};
use crate::handlers::read_form;
use crate::listing::form::FormFailure;
use crate::listing::{FormState, HouseFormInput};
use crate::responses::{html_response, html_response_with_status, redirect};
use crate::templates::pages::new_house_page;

pub fn new_form(_req: Request, _app: &App) -> ResultResp {
    let input = HouseFormInput::default();
    html_response(new_house_page(&input, &FormState::from_input(&input), None))
}

pub fn create(req: Request, app: &App) -> ResultResp {
    let input = HouseFormInput::from_pairs(read_form(req)?);

    let stage = FormState::from_input(&input);
    let state = FormState::begin_submit(&input);
    if let Some(failure) = state.failure() {
        return html_response_with_status(400, new_house_page(&input, &stage, Some(failure)));
    }

    match state.finish(app.api.as_ref(), app.images.as_ref()) {
        FormState::Success { id } => {
            // Listings changed; make every open map query again.
            app.explore.invalidate_all()?;
            redirect(&format!("/houses/{id}"))
        }
        failed => {
            let failure = failed.failure();
            let err = ServerError::Upstream(
                failure
                    .and_then(FormFailure::message)
                    .unwrap_or("submission failed")
                    .to_string(),
            );
            tracing::warn!(error = %err, "house submission failed");
            html_response_with_status(err.status(), new_house_page(&input, &stage, failure))
        }
    }
}
