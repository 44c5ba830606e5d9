use crate::models::{SizePreset, StylePreset};

impl StylePreset {
    pub const ALL: [StylePreset; 8] = [
        StylePreset::None,
        StylePreset::Photorealistic,
        StylePreset::Anime,
        StylePreset::DigitalArt,
        StylePreset::OilPainting,
        StylePreset::Watercolor,
        StylePreset::Cyberpunk,
        StylePreset::PencilSketch,
    ];

    /// Suffix appended verbatim to the user's prompt. Empty for `None`, so
    /// the composed prompt equals the raw prompt in that case.
    pub fn suffix(&self) -> &'static str {
        match self {
            StylePreset::None => "",
            StylePreset::Photorealistic => ", photorealistic, 4k, sharp focus, professional photography",
            StylePreset::Anime => ", anime style, vibrant colors, Studio Ghibli inspired, detailed illustration",
            StylePreset::DigitalArt => ", digital art, trending on artstation, highly detailed, concept art",
            StylePreset::OilPainting => ", oil painting, textured brush strokes, classical composition, rich colors",
            StylePreset::Watercolor => ", watercolor painting, soft washes, delicate pigment blooms, paper texture",
            StylePreset::Cyberpunk => ", cyberpunk, neon lights, futuristic cityscape, cinematic lighting",
            StylePreset::PencilSketch => ", pencil sketch, graphite shading, hand drawn, monochrome",
        }
    }
}

impl SizePreset {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            SizePreset::Square => (512, 512),
            SizePreset::Portrait => (512, 768),
            SizePreset::Landscape => (768, 512),
        }
    }

    /// Bare "WxH" form stored on history entries.
    pub fn dimension_label(&self) -> String {
        let (w, h) = self.dimensions();
        format!("{}x{}", w, h)
    }
}

/// Builds the prompt actually sent to the model: plain concatenation, no
/// trimming and no punctuation dedup. A trailing comma on the raw prompt
/// stays next to the suffix's leading one.
pub fn compose(raw_prompt: &str, style: StylePreset) -> String {
    format!("{}{}", raw_prompt, style.suffix())
}
