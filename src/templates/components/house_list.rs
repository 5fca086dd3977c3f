use crate::api::ImageHost;
use crate::domain::Listing;
use maud::{html, Markup};

const THUMB_WIDTH: u32 = 350;

pub fn house_list(houses: &[Listing], images: &dyn ImageHost) -> Markup {
    html! {
        @if houses.is_empty() {
            p class="empty" { "No houses in this area yet." }
        } @else {
            ul class="house-list" {
                @for house in houses {
                    li class="house" data-id=(house.id) {
                        a href=(house.href()) {
                            img
                                src=(images.delivery_url(&house.public_id, THUMB_WIDTH, THUMB_WIDTH * 9 / 16))
                                alt=(house.address)
                                loading="lazy";
                            h2 { (house.address) }
                            p {
                                (house.bedrooms)
                                @if house.bedrooms == 1 { " bedroom" } @else { " bedrooms" }
                            }
                        }
                    }
                }
            }
        }
    }
}
