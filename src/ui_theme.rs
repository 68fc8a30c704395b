use iced::Color;

// Dimensions
pub const CARD_WIDTH: f32 = 360.0;
pub const CARD_IMAGE_HEIGHT: f32 = 240.0;
pub const CARD_INFO_HEIGHT: f32 = 56.0;
pub const CARD_HEIGHT: f32 = CARD_IMAGE_HEIGHT + CARD_INFO_HEIGHT;
pub const SEARCH_INPUT_WIDTH: f32 = 420.0;
pub const TOAST_WIDTH: f32 = 340.0;

// Preview downloads are scaled to the card image box; full images to a large screen.
pub const PREVIEW_MAX_WIDTH: u32 = CARD_WIDTH as u32;
pub const PREVIEW_MAX_HEIGHT: u32 = CARD_IMAGE_HEIGHT as u32;
pub const FULL_MAX_WIDTH: u32 = 1920;
pub const FULL_MAX_HEIGHT: u32 = 1080;

// --- Design System Primitives ---
pub const COLOR_ABYSS_DARK: Color = Color::from_rgb(0.04, 0.06, 0.09); // #0B1016
pub const COLOR_DEEP_SLATE: Color = Color::from_rgb(0.09, 0.13, 0.19); // #162231
pub const COLOR_CYAN_GLOW: Color = Color::from_rgb(0.30, 0.79, 0.94); // #4CC9F0
pub const COLOR_SOFT_WHITE: Color = Color::from_rgb(0.94, 0.96, 0.97); // #F0F4F8
pub const COLOR_MUTED_STEEL: Color = Color::from_rgb(0.58, 0.64, 0.72); // #94A3B8

// --- Semantic Mappings ---

// Backgrounds
pub const COLOR_BACKGROUND: Color = COLOR_ABYSS_DARK;
pub const COLOR_PANEL: Color = COLOR_DEEP_SLATE;

// Typography
pub const COLOR_TEXT_BRIGHT: Color = COLOR_SOFT_WHITE;
pub const COLOR_TEXT_MUTED: Color = COLOR_MUTED_STEEL;
pub const COLOR_TEXT_DIM: Color = Color::from_rgb(0.40, 0.44, 0.50); // Darker steel

// Accents & Interactions
pub const COLOR_ACCENT: Color = COLOR_CYAN_GLOW;

// Overlays
pub const COLOR_OVERLAY_STRONG: Color = Color::from_rgba(0.04, 0.06, 0.09, 0.92); // Abyss Dark @ 92%

// Toast Colors
pub const COLOR_SUCCESS: Color = Color::from_rgb(0.3, 0.69, 0.31);
pub const COLOR_INFO: Color = Color::from_rgb(0.13, 0.59, 0.95);
pub const COLOR_ERROR: Color = Color::from_rgb(0.96, 0.26, 0.21);

// Layout Constants
pub const ITEM_SPACING: f32 = 24.0;
pub const PAGE_PADDING: f32 = 24.0;
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 860.0;

// Font sizes
pub const FONT_TITLE: f32 = 20.0;
pub const FONT_BODY: f32 = 16.0;
pub const FONT_LABEL: f32 = 12.0;

// Timing Constants (in milliseconds)
pub const SPINNER_TICK_MS: u64 = 150;
pub const TOAST_CHECK_MS: u64 = 250;
pub const SCROLL_FRAME_MS: u64 = 16;
pub const SCROLL_DURATION_MS: u64 = 400;
