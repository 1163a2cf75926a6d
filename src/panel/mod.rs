// ABOUTME: Panel module: the chat panel controller and its static HTML.
// ABOUTME: The controller is the only owner of the panel handle.

pub mod controller;
pub mod html;

pub use controller::{PanelController, PanelSubscription, VIEW_TYPE};
pub use html::render_panel_html;
