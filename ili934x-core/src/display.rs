//! Display handle
//!
//! Owns the bus, the optional reset line, the transfer buffer and all
//! drawing state. Construction runs the init sequence, so a `Display`
//! value is always a panel that is on and ready.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use ili934x_fonts::{Font, GLCD};
use ili934x_hal::ScopedBus;

use crate::blit::{self, MonoBitmap};
use crate::bus::CommandBus;
use crate::cmd;
use crate::config::{BusConfig, DisplayConfig};
use crate::error::Error;
use crate::init::{InitSequencer, InitState};
use crate::layout::{Cursor, ScrollState};
use crate::palette::{color565, Palette};
use crate::traits::Platform;
use crate::window::{self, Window, BUFFER_LEN};

/// ILI9341 display
///
/// `'f` is the lifetime of the active font. Callers serialize access;
/// one drawing operation runs at a time.
pub struct Display<'f, B, RST> {
    pub(crate) bus: CommandBus<B>,
    reset: Option<RST>,
    pub(crate) config: DisplayConfig,
    init: InitSequencer,
    pub(crate) cursor: Cursor,
    palette: Palette,
    pub(crate) scroll: ScrollState,
    pub(crate) font: &'f dyn Font,
    buf: [u8; BUFFER_LEN],
}

impl<B, RST> Display<'static, B, RST>
where
    B: ScopedBus,
    RST: OutputPin,
{
    /// Resolve `bus`, open it through `platform` and initialize the panel
    pub fn open<P, D>(
        platform: &mut P,
        bus: &BusConfig,
        config: DisplayConfig,
        delay: &mut D,
    ) -> Result<Self, Error<B::Error>>
    where
        P: Platform<Bus = B, ResetPin = RST>,
        D: DelayNs,
    {
        let settings = bus.resolve()?;
        config.validate()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("opening {}", settings);

        let transport = platform.open_bus(&settings)?;
        let reset = settings
            .rst
            .map(|pin| platform.reset_pin(pin))
            .transpose()?;
        Self::new(transport, reset, config, delay)
    }
}

impl<'f, B, RST> Display<'f, B, RST>
where
    B: ScopedBus,
    RST: OutputPin,
{
    /// Take ownership of an opened bus and run the init sequence
    ///
    /// Without a reset pin the panel is reset by command. Text state
    /// starts at (0, 0), white on black, with the built-in 5x7 font.
    pub fn new<D: DelayNs>(
        bus: B,
        reset: Option<RST>,
        config: DisplayConfig,
        delay: &mut D,
    ) -> Result<Self, Error<B::Error>> {
        config.validate()?;

        let mut display = Self {
            bus: CommandBus::new(bus),
            reset,
            config,
            init: InitSequencer::new(config.madctl),
            cursor: Cursor::default(),
            palette: Palette::default(),
            scroll: ScrollState::default(),
            font: &GLCD,
            buf: [0; BUFFER_LEN],
        };
        display
            .init
            .run(&mut display.bus, display.reset.as_mut(), delay)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "display on: {}x{} madctl={=u8:#x}",
            config.width,
            config.height,
            config.madctl
        );

        Ok(display)
    }

    pub fn width(&self) -> u16 {
        self.config.width
    }

    pub fn height(&self) -> u16 {
        self.config.height
    }

    pub fn init_state(&self) -> InitState {
        self.init.state()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn font(&self) -> &'f dyn Font {
        self.font
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll.offset()
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling()
    }

    /// Set text colors (RGB565)
    pub fn set_color(&mut self, foreground: u16, background: u16) {
        self.palette.set(foreground, background);
    }

    /// Move the text cursor; no bounds check
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Cursor { x, y };
    }

    pub fn set_font(&mut self, font: &'f dyn Font) {
        self.font = font;
    }

    /// Fill the whole panel with the background color
    pub fn erase_all(&mut self) -> Result<(), Error<B::Error>> {
        let (width, height) = (i32::from(self.config.width), i32::from(self.config.height));
        self.fill_rect(0, 0, width, height, None)
    }

    /// Fill a clamped rectangle with `color`, or the background if `None`
    pub fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Option<u16>,
    ) -> Result<(), Error<B::Error>> {
        let window = self.clamp(x, y, w, h);
        let color = match color {
            Some(color) => color.to_be_bytes(),
            None => self.palette.resolve(false),
        };
        window::fill(&mut self.bus, &mut self.buf, &window, color)
    }

    /// Draw `text` as one run at (`x`, `y`) and return the x just past it
    ///
    /// No wrapping; the run is cut at the panel edge. Empty text draws
    /// nothing.
    pub fn draw_glyphs(&mut self, text: &str, x: u16, y: u16) -> Result<u16, Error<B::Error>> {
        self.draw_run(text.chars(), x, y)
    }

    pub(crate) fn draw_run<I>(&mut self, chars: I, x: u16, y: u16) -> Result<u16, Error<B::Error>>
    where
        I: Iterator<Item = char> + Clone,
    {
        let font = self.font;
        let run_w = blit::run_width(font, chars.clone());
        if run_w == 0 {
            return Ok(x);
        }

        let window = self.clamp(
            i32::from(x),
            i32::from(y),
            i32::try_from(run_w).unwrap_or(i32::MAX),
            i32::from(font.height()),
        );
        blit::stream_run(
            &mut self.bus,
            &mut self.buf,
            &self.palette,
            font,
            chars,
            &window,
        )?;

        let end = u32::from(x) + run_w;
        Ok(u16::try_from(end).unwrap_or(u16::MAX))
    }

    /// Draw a 1-bit bitmap with the current palette
    ///
    /// The `w` x `h` region is clamped like [`fill_rect`](Self::fill_rect);
    /// bitmap pixels outside its own bounds draw as background.
    pub fn blit<M>(&mut self, bitmap: &M, x: i32, y: i32, w: i32, h: i32) -> Result<(), Error<B::Error>>
    where
        M: MonoBitmap + ?Sized,
    {
        let window = self.clamp(x, y, w, h);
        blit::stream_bitmap(&mut self.bus, &mut self.buf, &self.palette, bitmap, &window)
    }

    /// Write one pixel; coordinates off the panel are ignored
    pub fn write_pixel(&mut self, x: i32, y: i32, color: u16) -> Result<(), Error<B::Error>> {
        let on_panel = (0..i32::from(self.config.width)).contains(&x)
            && (0..i32::from(self.config.height)).contains(&y);
        if !on_panel {
            return Ok(());
        }
        let window = self.clamp(x, y, 1, 1);
        window::address_window(&mut self.bus, &window)?;
        self.bus.data(&color.to_be_bytes())
    }

    /// Read one pixel back as RGB565; coordinates are clamped to the panel
    pub fn read_pixel(&mut self, x: i32, y: i32) -> Result<u16, Error<B::Error>> {
        let window = self.clamp(x, y, 1, 1);
        window::set_window(&mut self.bus, &window)?;

        // Dummy byte, then 8-bit R, G, B
        let mut reply = [0u8; 4];
        self.bus.read(cmd::RAMRD, &mut reply)?;
        Ok(color565(reply[1], reply[2], reply[3]))
    }

    /// Read the three display identification bytes
    pub fn read_id(&mut self) -> Result<[u8; 3], Error<B::Error>> {
        let mut reply = [0u8; 4];
        self.bus.read(cmd::RDDID, &mut reply)?;
        Ok([reply[1], reply[2], reply[3]])
    }

    pub fn transport(&self) -> &B {
        self.bus.inner()
    }

    pub fn transport_mut(&mut self) -> &mut B {
        self.bus.inner_mut()
    }

    /// Give back the bus and reset line
    pub fn release(self) -> (B, Option<RST>) {
        (self.bus.release(), self.reset)
    }

    fn clamp(&self, x: i32, y: i32, w: i32, h: i32) -> Window {
        Window::clamped(x, y, w, h, self.config.width, self.config.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blit::MonoVlsb;
    use crate::config::BusSettings;
    use crate::error::ConfigError;
    use crate::mock::{ready_display, BusFault, MockDelay, MockPanel, MockPin, PANEL_ID};
    use ili934x_hal::NoPin;

    #[test]
    fn test_new_runs_init_and_sets_defaults() {
        let mut delay = MockDelay::default();
        let display: Display<'_, _, NoPin> = Display::new(
            MockPanel::new(240, 320),
            None,
            DisplayConfig::default(),
            &mut delay,
        )
        .unwrap();

        assert_eq!(display.init_state(), InitState::On);
        assert_eq!(display.width(), 240);
        assert_eq!(display.height(), 320);
        assert_eq!(display.cursor(), Cursor::default());
        assert_eq!(display.palette().foreground(), 0xFFFF);
        assert_eq!(display.palette().background(), 0x0000);
        assert_eq!(display.font().height(), 8);
        assert!(!display.is_scrolling());
        assert_eq!(display.transport().commands().first(), Some(&cmd::SWRESET));
        assert_eq!(display.transport().commands().last(), Some(&cmd::DISPON));
    }

    #[test]
    fn test_invalid_dimensions_send_nothing() {
        let config = DisplayConfig {
            width: 0,
            ..DisplayConfig::default()
        };
        let result: Result<Display<'_, _, NoPin>, _> =
            Display::new(MockPanel::new(1, 1), None, config, &mut MockDelay::default());

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidDimensions))
        ));
    }

    #[test]
    fn test_init_failure_is_reported() {
        let mut panel = MockPanel::new(8, 8);
        panel.fail_on_write = Some(1);
        let result: Result<Display<'_, _, NoPin>, _> = Display::new(
            panel,
            None,
            DisplayConfig::default(),
            &mut MockDelay::default(),
        );

        assert!(matches!(result, Err(Error::Transport(BusFault))));
    }

    #[test]
    fn test_erase_all_is_idempotent() {
        let mut display = ready_display(240, 320);

        display.erase_all().unwrap();
        let first = display.transport().transactions();
        assert!(display.transport().region_is(0, 0, 239, 319, 0x0000));

        display.transport_mut().clear_events();
        display.erase_all().unwrap();

        assert_eq!(display.transport().transactions(), first);
        // 76800 pixels = 75 full chunks
        assert_eq!(display.transport().ramwr_flushes(), vec![1024; 75]);
    }

    #[test]
    fn test_fill_rect_colors() {
        let mut display = ready_display(32, 32);
        display.set_color(0xFFFF, 0x001F);

        display.fill_rect(0, 0, 8, 8, None).unwrap();
        display.fill_rect(8, 0, 8, 8, Some(0xF800)).unwrap();
        // Explicit black is honored rather than read as "background"
        display.fill_rect(16, 0, 8, 8, Some(0x0000)).unwrap();

        let panel = display.transport();
        assert!(panel.region_is(0, 0, 7, 7, 0x001F));
        assert!(panel.region_is(8, 0, 15, 7, 0xF800));
        assert!(panel.region_is(16, 0, 23, 7, 0x0000));
        assert_eq!(panel.pixel(24, 0), 0x1234);
    }

    #[test]
    fn test_fill_rect_clamps_to_panel() {
        let mut display = ready_display(32, 32);
        display.fill_rect(-4, 28, 100, 100, Some(0x07E0)).unwrap();

        let panel = display.transport();
        assert_eq!(panel.params(cmd::CASET), vec![vec![0, 0, 0, 31]]);
        assert_eq!(panel.params(cmd::PASET), vec![vec![0, 28, 0, 31]]);
        assert!(panel.region_is(0, 28, 31, 31, 0x07E0));
    }

    #[test]
    fn test_draw_glyphs_returns_end_x() {
        let mut display = ready_display(240, 320);
        display.set_color(0xF800, 0x0000);

        let end = display.draw_glyphs("!", 10, 20).unwrap();

        assert_eq!(end, 16);
        let panel = display.transport();
        // '!' in the 5x7 face: column 2 lit on rows 0-4 and 6
        assert_eq!(panel.pixel(12, 20), 0xF800);
        assert_eq!(panel.pixel(12, 25), 0x0000);
        assert_eq!(panel.pixel(12, 26), 0xF800);
        assert_eq!(panel.pixel(10, 20), 0x0000);
    }

    #[test]
    fn test_draw_glyphs_empty_is_noop() {
        let mut display = ready_display(240, 320);
        assert_eq!(display.draw_glyphs("", 33, 44).unwrap(), 33);
        assert!(display.transport().events.is_empty());
    }

    #[test]
    fn test_draw_glyphs_past_right_edge() {
        let mut display = ready_display(240, 320);
        let end = display.draw_glyphs("abc", 230, 0).unwrap();

        assert_eq!(end, 248);
        assert_eq!(
            display.transport().params(cmd::CASET),
            vec![vec![0, 230, 0, 239]]
        );
    }

    #[test]
    fn test_pixel_round_trip() {
        let mut display = ready_display(16, 16);
        let color = color565(0xA8, 0x54, 0xFC);

        display.write_pixel(3, 4, color).unwrap();

        assert_eq!(display.transport().pixel(3, 4), color);
        assert_eq!(display.read_pixel(3, 4).unwrap(), color);
    }

    #[test]
    fn test_write_pixel_off_panel_is_ignored() {
        let mut display = ready_display(16, 16);

        display.write_pixel(16, 0, 0xFFFF).unwrap();
        display.write_pixel(-1, 3, 0xFFFF).unwrap();
        display.write_pixel(0, 99, 0xFFFF).unwrap();

        assert!(display.transport().events.is_empty());
    }

    #[test]
    fn test_read_pixel_clamps() {
        let mut display = ready_display(16, 16);
        display.transport_mut().set_pixel(15, 15, 0xF81F);

        assert_eq!(display.read_pixel(40, 40).unwrap(), 0xF81F);
        assert_eq!(display.transport().params(cmd::CASET), vec![vec![0, 15, 0, 15]]);
    }

    #[test]
    fn test_read_id() {
        let mut display = ready_display(16, 16);
        assert_eq!(display.read_id().unwrap(), PANEL_ID);
    }

    #[test]
    fn test_blit_bitmap() {
        let mut display = ready_display(16, 16);
        display.set_color(0x07E0, 0x0000);
        let data = [0x01, 0x02, 0x04, 0x08];
        let bmp = MonoVlsb::new(&data, 4, 8);

        display.blit(&bmp, 2, 2, 4, 8).unwrap();

        let panel = display.transport();
        for i in 0..4 {
            assert_eq!(panel.pixel(2 + i, 2 + i), 0x07E0);
            assert_eq!(panel.pixel(2 + i, 3 + i), 0x0000);
        }
    }

    #[test]
    fn test_release_returns_parts() {
        let mut delay = MockDelay::default();
        let display = Display::new(
            MockPanel::new(8, 8),
            Some(MockPin::default()),
            DisplayConfig::default(),
            &mut delay,
        )
        .unwrap();

        let (panel, pin) = display.release();
        assert!(!panel.events.is_empty());
        assert_eq!(pin.map(|p| p.levels), Some(vec![false, true]));
    }

    struct MockPlatform {
        claimed: Vec<u8>,
        opened: Option<BusSettings>,
    }

    impl Platform for MockPlatform {
        type Bus = MockPanel;
        type ResetPin = MockPin;

        fn open_bus(&mut self, settings: &BusSettings) -> Result<MockPanel, ConfigError> {
            for pin in [settings.cs, settings.dc] {
                if self.claimed.contains(&pin) {
                    return Err(ConfigError::PinUnavailable(pin));
                }
            }
            self.opened = Some(*settings);
            Ok(MockPanel::new(240, 320))
        }

        fn reset_pin(&mut self, pin: u8) -> Result<MockPin, ConfigError> {
            if self.claimed.contains(&pin) {
                return Err(ConfigError::PinUnavailable(pin));
            }
            Ok(MockPin::default())
        }
    }

    #[test]
    fn test_open_through_platform() {
        let mut platform = MockPlatform {
            claimed: Vec::new(),
            opened: None,
        };
        let bus = BusConfig {
            rst: Some(4),
            ..BusConfig::default()
        };

        let display = Display::open(
            &mut platform,
            &bus,
            DisplayConfig::default(),
            &mut MockDelay::default(),
        )
        .unwrap();

        let settings = platform.opened.unwrap();
        assert_eq!(settings.cs, 22);
        assert_eq!(settings.pins.sck, 18);
        // Hardware reset used instead of SWRESET
        assert!(!display.transport().commands().contains(&cmd::SWRESET));
    }

    #[test]
    fn test_open_rejects_bad_config() {
        let mut platform = MockPlatform {
            claimed: vec![4],
            opened: None,
        };

        let bad_bus = BusConfig {
            bus: 7,
            ..BusConfig::default()
        };
        let result = Display::open(
            &mut platform,
            &bad_bus,
            DisplayConfig::default(),
            &mut MockDelay::default(),
        );
        assert!(matches!(result, Err(Error::Config(ConfigError::InvalidBus(7)))));
        assert!(platform.opened.is_none());

        let busy_reset = BusConfig {
            rst: Some(4),
            ..BusConfig::default()
        };
        let result = Display::open(
            &mut platform,
            &busy_reset,
            DisplayConfig::default(),
            &mut MockDelay::default(),
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::PinUnavailable(4)))
        ));
    }
}
