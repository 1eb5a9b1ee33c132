//! Shared crate-wide constants.

/// Minimum managed window width, in desktop pixels.
pub const MIN_WINDOW_WIDTH: i32 = 200;

/// Minimum managed window height, in desktop pixels.
pub const MIN_WINDOW_HEIGHT: i32 = 100;

/// Size given to a freshly opened window, in desktop pixels.
pub const DEFAULT_WINDOW_WIDTH: i32 = 400;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 300;

/// Base point new windows are placed around, in desktop pixels.
pub const WINDOW_BASE_X: i32 = 50;
pub const WINDOW_BASE_Y: i32 = 50;

/// Exclusive upper bound of the random offset added to the base point on
/// each axis so successive windows do not stack exactly.
pub const WINDOW_PLACEMENT_JITTER: i32 = 100;

/// Pixel size of one terminal cell used to project the desktop onto the
/// terminal grid. 8x16 matches the classic VGA text font.
pub const DEFAULT_CELL_WIDTH: u16 = 8;
pub const DEFAULT_CELL_HEIGHT: u16 = 16;

/// Rows reserved at the bottom of the terminal for the taskbar.
pub const TASKBAR_HEIGHT: u16 = 1;

/// How often the taskbar clock re-reads the wall clock.
pub const CLOCK_REFRESH_MS: u64 = 1_000;

/// How long a toast notification stays on screen.
pub const TOAST_DURATION_MS: u64 = 3_000;

/// Pending notifications beyond this are dropped, oldest first.
pub const TOAST_CAPACITY: usize = 8;
