//! CardScope - A card-game statistics dashboard client written in Rust
//!
//! CardScope is a desktop application for watching live card-game statistics.
//! It fetches per-minute occurrence series from a statistics server, renders
//! the "AA" and "four-of-a-kind" charts, and lets the operator record round
//! outcomes through a validated card-selection panel.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use cardscope::app::CardScopeApp;

/// Set the macOS application name for the dock
#[cfg(target_os = "macos")]
fn set_macos_app_name() {
    use objc2::{class, msg_send};
    use objc2_foundation::NSString;

    unsafe {
        let app_name = NSString::from_str("CardScope");
        let process_info_class = class!(NSProcessInfo);
        let process_info: *mut objc2::runtime::AnyObject =
            msg_send![process_info_class, processInfo];
        let _: () = msg_send![process_info, setProcessName: &*app_name];
    }
}

#[cfg(not(target_os = "macos"))]
fn set_macos_app_name() {}

fn main() -> eframe::Result<()> {
    // Set macOS app name before anything else
    set_macos_app_name();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Configure native options
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([900.0, 700.0])
            .with_title("CardScope - Card Game Statistics")
            .with_app_id("CardScope"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "CardScope",
        native_options,
        Box::new(|cc| Ok(Box::new(CardScopeApp::new(cc)))),
    )
}
