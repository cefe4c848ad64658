//! Area Decor
//!
//! Decorates a single stand-in client window with an Area frame and reacts
//! to pointer presses on it: close quits, maximize toggles between the
//! screen size and the original geometry, minimize shades the frame.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{ConnectionExt, CreateWindowAux, EventMask, WindowClass};
use x11rb::protocol::Event;

use area_decor::icons::ThemedIcons;
use area_decor::x11::{coord, extent, X11Backend};
use area_decor::{
    classify, paint_frame, reset_frame, BorderAction, Config, DecoratedWindow, StatusFlags, Theme,
};

const CLIENT_WIDTH: i32 = 480;
const CLIENT_HEIGHT: i32 = 320;
const CLIENT_BACKGROUND: u32 = 0xffffff;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "area_decor=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Area decoration demo");

    let config = Config::load().context("Failed to load decoration config")?;
    let (conn, screen_num) = x11rb::connect(None).context("Failed to connect to X server")?;
    let screen = conn
        .setup()
        .roots
        .get(screen_num)
        .cloned()
        .with_context(|| format!("X server has no screen {}", screen_num))?;

    let mut backend = X11Backend::new(&conn, screen_num).context("Failed to set up X11 backend")?;
    let mut icons = ThemedIcons::system(config.frame.title_height.clamp(16, 256) as u16);
    let theme = Theme::startup(&config, &mut icons);

    let frame = conn.generate_id()?;
    let client = conn.generate_id()?;
    let mut window = DecoratedWindow::new(client, frame, 96, 96, CLIENT_WIDTH, CLIENT_HEIGHT);
    window.name = Some("Area decoration demo".into());
    window.state.status |= StatusFlags::ACTIVE;

    let outer = window.frame_rect(&theme.frame);
    conn.create_window(
        screen.root_depth,
        frame,
        screen.root,
        coord(outer.x),
        coord(outer.y),
        extent(outer.width).max(1),
        extent(outer.height).max(1),
        0,
        WindowClass::INPUT_OUTPUT,
        0,
        &CreateWindowAux::new().event_mask(
            EventMask::EXPOSURE | EventMask::BUTTON_PRESS | EventMask::STRUCTURE_NOTIFY,
        ),
    )?;

    let insets = window.insets(&theme.frame);
    conn.create_window(
        screen.root_depth,
        client,
        frame,
        coord(insets.west),
        coord(insets.north),
        extent(CLIENT_WIDTH),
        extent(CLIENT_HEIGHT),
        0,
        WindowClass::INPUT_OUTPUT,
        0,
        &CreateWindowAux::new().background_pixel(CLIENT_BACKGROUND),
    )?;
    conn.map_window(client)?;
    conn.map_window(frame)?;

    window.icon = match backend.net_wm_icon(client) {
        Ok(icon) => icon,
        Err(e) => {
            warn!("Could not read client icon: {}", e);
            None
        }
    };

    reset_frame(&mut backend, &theme, &window).context("Failed to place frame")?;
    conn.flush()?;

    // Client geometry to return to when leaving the maximized state.
    let mut restore = (window.x, window.y, window.width, window.height);

    loop {
        let event = conn.wait_for_event()?;
        match event {
            Event::Expose(e) if e.window == frame && e.count == 0 => {
                paint_frame(&mut backend, &theme, &window).context("Failed to paint frame")?;
            }
            Event::ButtonPress(e) if e.event == frame => {
                let action = classify(
                    &window.state,
                    &theme.frame,
                    window.width,
                    window.height,
                    i32::from(e.event_x),
                    i32::from(e.event_y),
                );
                debug!("Press at ({}, {}): {:?}", e.event_x, e.event_y, action);

                match action {
                    BorderAction::Close => {
                        info!("Close requested");
                        break;
                    }
                    BorderAction::Maximize => {
                        let status = &mut window.state.status;
                        if status.is_maximized() {
                            status.remove(StatusFlags::maximized());
                            (window.x, window.y, window.width, window.height) = restore;
                        } else {
                            restore = (window.x, window.y, window.width, window.height);
                            status.insert(StatusFlags::maximized());
                            let insets = window.insets(&theme.frame);
                            window.x = insets.west;
                            window.y = insets.north;
                            window.width = i32::from(screen.width_in_pixels) - insets.west - insets.east;
                            window.height =
                                i32::from(screen.height_in_pixels) - insets.north - insets.south;
                        }
                    }
                    BorderAction::Minimize => window.state.status.toggle(StatusFlags::SHADED),
                    other => {
                        info!("{:?} is not handled by the demo", other);
                        continue;
                    }
                }

                reset_frame(&mut backend, &theme, &window).context("Failed to reset frame")?;
                paint_frame(&mut backend, &theme, &window).context("Failed to paint frame")?;
            }
            Event::DestroyNotify(e) if e.window == frame => break,
            _ => {}
        }
        conn.flush()?;
    }

    conn.destroy_window(frame)?;
    conn.flush()?;
    info!("Area decoration demo finished");
    Ok(())
}
