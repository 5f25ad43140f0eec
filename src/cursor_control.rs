//! Cursor control for the tracking pipeline.
//!
//! The pipeline moves the cursor through the [`PointerDevice`] trait. On X11
//! systems [`X11Pointer`] warps the real pointer; [`NullPointer`] discards
//! moves for dry runs.

use crate::error::{Error, Result};
use log::{debug, info};
use x11rb::{
    connection::Connection,
    protocol::xproto::{ConnectionExt, Window},
    rust_connection::RustConnection,
};

/// Something that can place the pointer at absolute coordinates
pub trait PointerDevice {
    /// Move the pointer to `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns an error if the move cannot be delivered
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;

    /// Size of the pointer's surface, if known
    fn screen_size(&self) -> Option<(u32, u32)> {
        None
    }
}

/// Pointer device that ignores every move
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPointer;

impl PointerDevice for NullPointer {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        debug!("Dry run: cursor would move to ({}, {})", x, y);
        Ok(())
    }
}

/// X11 pointer warping
pub struct X11Pointer {
    connection: RustConnection,
    root: Window,
    screen_width: u16,
    screen_height: u16,
}

impl X11Pointer {
    /// Connect to the default X11 display
    ///
    /// # Errors
    ///
    /// Returns an error if no display is reachable
    pub fn new() -> Result<Self> {
        info!("Initializing X11 cursor controller");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| Error::X11(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::X11("Failed to get screen".to_string()))?;

        let root = screen.root;
        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!("Connected to X11 display, screen: {}x{}", screen_width, screen_height);

        Ok(Self {
            connection,
            root,
            screen_width,
            screen_height,
        })
    }
}

impl PointerDevice for X11Pointer {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        let max_x = i32::from(self.screen_width.saturating_sub(1)).min(i32::from(i16::MAX));
        let max_y = i32::from(self.screen_height.saturating_sub(1)).min(i32::from(i16::MAX));
        let x = i16::try_from(x.clamp(0, max_x)).unwrap_or(i16::MAX);
        let y = i16::try_from(y.clamp(0, max_y)).unwrap_or(i16::MAX);

        debug!("Setting cursor position to ({}, {})", x, y);

        self.connection
            .warp_pointer(x11rb::NONE, self.root, 0, 0, 0, 0, x, y)
            .map_err(|e| Error::CursorControl(format!("Failed to warp pointer: {e}")))?;

        self.connection
            .flush()
            .map_err(|e| Error::CursorControl(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }

    fn screen_size(&self) -> Option<(u32, u32)> {
        Some((u32::from(self.screen_width), u32::from(self.screen_height)))
    }
}
