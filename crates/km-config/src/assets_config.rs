use serde::Deserialize;

/// Photos shown by the intro and referral screens, as transport file ids or
/// HTTP URLs. Empty values degrade the screen to plain text.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AssetsConfig {
    pub cover_photo: String,
    pub referral_photo: String,
}

impl AssetsConfig {
    pub fn cover_photo(&self) -> Option<&str> {
        if self.cover_photo.trim().is_empty() {
            None
        } else {
            Some(&self.cover_photo)
        }
    }

    pub fn referral_photo(&self) -> Option<&str> {
        if self.referral_photo.trim().is_empty() {
            None
        } else {
            Some(&self.referral_photo)
        }
    }
}
