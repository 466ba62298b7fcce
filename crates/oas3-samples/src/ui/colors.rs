use std::io::IsTerminal;

use clap::{ValueEnum, builder::styling::Ansi256Color};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// One color per role in CLI output.
#[derive(Debug, Clone, Copy)]
struct Palette {
  timestamp: Color,
  primary: Color,
  accent: Color,
  info: Color,
  success: Color,
  label: Color,
  value: Color,
}

const DARK: Palette = Palette {
  timestamp: Color::Rgb { r: 120, g: 150, b: 170 },
  primary: Color::Rgb { r: 140, g: 190, b: 120 },
  accent: Color::Rgb { r: 214, g: 110, b: 90 },
  info: Color::Rgb { r: 120, g: 170, b: 200 },
  success: Color::Rgb { r: 110, g: 190, b: 150 },
  label: Color::Rgb { r: 200, g: 170, b: 230 },
  value: Color::Rgb { r: 235, g: 215, b: 120 },
};

const LIGHT: Palette = Palette {
  timestamp: Color::Rgb { r: 80, g: 90, b: 110 },
  primary: Color::Rgb { r: 40, g: 100, b: 40 },
  accent: Color::Rgb { r: 180, g: 60, b: 40 },
  info: Color::Rgb { r: 30, g: 90, b: 150 },
  success: Color::Rgb { r: 20, g: 120, b: 80 },
  label: Color::Rgb { r: 110, g: 60, b: 150 },
  value: Color::Rgb { r: 150, g: 100, b: 20 },
};

#[derive(Debug, Clone, Copy)]
pub struct Colors {
  enabled: bool,
  theme: Theme,
}

pub trait IntoComfyColor {
  fn into(self) -> ComfyColor;
}

impl IntoComfyColor for Color {
  fn into(self) -> ComfyColor {
    match self {
      Color::Reset => ComfyColor::Reset,
      Color::Black => ComfyColor::Black,
      Color::DarkGrey => ComfyColor::DarkGrey,
      Color::Red => ComfyColor::Red,
      Color::DarkRed => ComfyColor::DarkRed,
      Color::Green => ComfyColor::Green,
      Color::DarkGreen => ComfyColor::DarkGreen,
      Color::Yellow => ComfyColor::Yellow,
      Color::DarkYellow => ComfyColor::DarkYellow,
      Color::Blue => ComfyColor::Blue,
      Color::DarkBlue => ComfyColor::DarkBlue,
      Color::Magenta => ComfyColor::Magenta,
      Color::DarkMagenta => ComfyColor::DarkMagenta,
      Color::Cyan => ComfyColor::Cyan,
      Color::DarkCyan => ComfyColor::DarkCyan,
      Color::White => ComfyColor::White,
      Color::Grey => ComfyColor::Grey,
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(val) => ComfyColor::AnsiValue(val),
    }
  }
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn palette(&self) -> &'static Palette {
    match self.theme {
      Theme::Dark => &DARK,
      Theme::Light => &LIGHT,
    }
  }

  const fn pick(&self, color: Color) -> Color {
    if self.enabled { color } else { Color::Reset }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(self.palette().timestamp)
  }

  pub const fn primary(&self) -> Color {
    self.pick(self.palette().primary)
  }

  pub const fn accent(&self) -> Color {
    self.pick(self.palette().accent)
  }

  pub const fn info(&self) -> Color {
    self.pick(self.palette().info)
  }

  pub const fn success(&self) -> Color {
    self.pick(self.palette().success)
  }

  pub const fn label(&self) -> Color {
    self.pick(self.palette().label)
  }

  pub const fn value(&self) -> Color {
    self.pick(self.palette().value)
  }

  const fn to_clap(color: Color) -> Option<clap::builder::styling::Color> {
    use clap::builder::styling::{AnsiColor, Color as ClapColor, RgbColor};

    match color {
      Color::Black => Some(ClapColor::Ansi(AnsiColor::Black)),
      Color::Blue | Color::DarkBlue => Some(ClapColor::Ansi(AnsiColor::Blue)),
      Color::Cyan | Color::DarkCyan => Some(ClapColor::Ansi(AnsiColor::Cyan)),
      Color::DarkGreen | Color::Green => Some(ClapColor::Ansi(AnsiColor::Green)),
      Color::DarkGrey | Color::Grey => Some(ClapColor::Ansi(AnsiColor::BrightBlack)),
      Color::DarkMagenta | Color::Magenta => Some(ClapColor::Ansi(AnsiColor::Magenta)),
      Color::DarkRed | Color::Red => Some(ClapColor::Ansi(AnsiColor::Red)),
      Color::DarkYellow | Color::Yellow => Some(ClapColor::Ansi(AnsiColor::Yellow)),
      Color::White => Some(ClapColor::Ansi(AnsiColor::White)),
      Color::AnsiValue(val) => Some(ClapColor::Ansi256(Ansi256Color(val))),
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      Color::Reset => None,
    }
  }

  pub const fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{Style, Styles};

    let colors = Self::new(true, Theme::Dark);

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::to_clap(colors.label())))
      .usage(Style::new().bold().fg_color(Self::to_clap(colors.label())))
      .literal(Style::new().fg_color(Self::to_clap(colors.primary())))
      .placeholder(Style::new().fg_color(Self::to_clap(colors.info())))
      .error(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
      .valid(Style::new().fg_color(Self::to_clap(colors.success())))
      .invalid(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => detect_terminal_theme(),
  }
}

/// `COLORFGBG` is `fg;bg`; background codes 8 and up are light.
fn detect_terminal_theme() -> Theme {
  if let Ok(colorfgbg) = std::env::var("COLORFGBG")
    && let Some(bg) = colorfgbg.split(';').next_back()
    && let Ok(bg_num) = bg.parse::<u8>()
  {
    return if bg_num >= 8 { Theme::Light } else { Theme::Dark };
  }

  Theme::Dark
}
