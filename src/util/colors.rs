use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x004fc1a6);
pub const SECONDARY: Color = Color::from_u32(0x00287f6d);
pub const NEUTRAL: Color = Color::from_u32(0x00404040);
pub const BACKGROUND: Color = Color::from_u32(0x000d0d0d);
pub const ACCENT: Color = Color::from_u32(0x0088c9fe);
pub const ERROR: Color = Color::from_u32(0x00e05561);
