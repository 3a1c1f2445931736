//! ILI9341 command opcodes and panel constants

/// Software reset
pub const SWRESET: u8 = 0x01;
/// Read display identification (dummy byte + 3 ID bytes)
pub const RDDID: u8 = 0x04;
/// Read display self-diagnostic result
pub const RDDSDR: u8 = 0x0F;
/// Sleep out
pub const SLPOUT: u8 = 0x11;
/// Gamma curve select
pub const GAMMASET: u8 = 0x26;
/// Display on
pub const DISPON: u8 = 0x29;
/// Column address set
pub const CASET: u8 = 0x2A;
/// Page (row) address set
pub const PASET: u8 = 0x2B;
/// Memory write
pub const RAMWR: u8 = 0x2C;
/// Memory read
pub const RAMRD: u8 = 0x2E;
/// Memory access control (orientation, BGR)
pub const MADCTL: u8 = 0x36;
/// Vertical scrolling start address
pub const VSCRSADD: u8 = 0x37;
/// Pixel format set
pub const PIXSET: u8 = 0x3A;
/// Frame rate control (normal mode)
pub const FRMCTL1: u8 = 0xB1;
/// Blanking porch control
pub const PRCTL: u8 = 0xB5;
/// Display function control
pub const DISCTL: u8 = 0xB6;
/// Power control 1
pub const PWCTL1: u8 = 0xC0;
/// Power control 2
pub const PWCTL2: u8 = 0xC1;
/// VCOM control 1
pub const VMCTL1: u8 = 0xC5;
/// VCOM control 2
pub const VMCTL2: u8 = 0xC7;
/// Power control A
pub const PWCTLA: u8 = 0xCB;
/// Power control B
pub const PWCTLB: u8 = 0xCF;
/// Positive gamma correction
pub const PGAMCTL: u8 = 0xE0;
/// Negative gamma correction
pub const NGAMCTL: u8 = 0xE1;
/// Driver timing control A
pub const DTCTLA: u8 = 0xE8;
/// Driver timing control B
pub const DTCTLB: u8 = 0xEA;
/// Power on sequence control
pub const PWRONCTL: u8 = 0xED;
/// Enable 3-gamma control
pub const ENA3G: u8 = 0xF2;

/// Settle time after a hardware or software reset
pub const RESET_SETTLE_MS: u32 = 50;
/// Wait after SLPOUT before further commands
pub const SLEEP_OUT_SETTLE_MS: u32 = 120;
/// Wait after DISPON
pub const DISPLAY_ON_SETTLE_MS: u32 = 50;
