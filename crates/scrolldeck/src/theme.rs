use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub muted: Color32,
    pub card_background: Color32,
    /// Sizes in viewport units (1 unit = 1% of viewport height).
    pub heading_size: f32,
    pub body_size: f32,
    pub note_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x14, 0x16, 0x1A),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            muted: Color32::from_rgb(0x4A, 0x4F, 0x58),
            card_background: Color32::from_rgb(0x21, 0x24, 0x2B),
            heading_size: 7.0,
            body_size: 3.2,
            note_size: 2.2,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            muted: Color32::from_rgb(0xC2, 0xC6, 0xCE),
            card_background: Color32::from_rgb(0xF2, 0xF3, 0xF6),
            heading_size: 7.0,
            body_size: 3.2,
            note_size: 2.2,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}
