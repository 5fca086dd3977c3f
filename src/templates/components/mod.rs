pub mod error;
pub mod house_list;
pub mod map;

pub use error::houses_error;
pub use house_list::house_list;
pub use map::{map_view, marker_data, popup, MapVm};
