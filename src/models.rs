use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerateRequest {
    pub session_id: Uuid,
    pub prompt: String,
    #[serde(default)]
    pub style: StylePreset,
    #[serde(default)]
    pub size: SizePreset,
}

/// Canned prompt suffixes selectable in the UI. Serialized as the label the
/// user sees, so the frontend sends values like "Oil Painting" verbatim.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum StylePreset {
    #[default]
    None,
    Photorealistic,
    Anime,
    #[serde(rename = "Digital Art")]
    DigitalArt,
    #[serde(rename = "Oil Painting")]
    OilPainting,
    Watercolor,
    Cyberpunk,
    #[serde(rename = "Pencil Sketch")]
    PencilSketch,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizePreset {
    #[default]
    #[serde(rename = "Square (512x512)")]
    Square,
    #[serde(rename = "Portrait (512x768)")]
    Portrait,
    #[serde(rename = "Landscape (768x512)")]
    Landscape,
}

/// One successful generation, as displayed and downloaded from the history
/// panel. Immutable once recorded.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Generation {
    pub id: Uuid,
    pub original_prompt: String,
    pub enhanced_prompt: String,
    pub style: StylePreset,
    pub size_label: String,
    pub width: u32,
    pub height: u32,
    pub image_base64: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StatusResponse {
    pub token_configured: bool,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
    pub hint: String,
}
