pub mod home;
pub mod new_house;

pub use home::{home_error_page, home_page, houses_panel, PanelVm};
pub use new_house::new_house_page;
