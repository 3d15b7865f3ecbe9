mod create_meeting;
mod get_group_meetings;
mod get_meeting;
mod register_for_meeting;
#[cfg(test)]
mod test_utils;

use actix_web::web;
use create_meeting::create_meeting_controller;
use get_group_meetings::get_group_meetings_controller;
use get_meeting::get_meeting_controller;
use register_for_meeting::register_for_meeting_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/groups/{group_id}/meetings",
        web::post().to(create_meeting_controller),
    );
    cfg.route(
        "/groups/{group_id}/meetings",
        web::get().to(get_group_meetings_controller),
    );
    cfg.route(
        "/groups/{group_id}/meetings/{meeting_id}",
        web::get().to(get_meeting_controller),
    );
    cfg.route(
        "/groups/{group_id}/meetings/{meeting_id}/register",
        web::post().to(register_for_meeting_controller),
    );
}
