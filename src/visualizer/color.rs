// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use image::Rgb;

/// Color type for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Blue color, used for hand joints.
    pub const BLUE: Color = Color(0, 0, 255);
    /// White color, used for foot keypoints.
    pub const WHITE: Color = Color(255, 255, 255);

    /// Get a color from the OpenPose palette, cycling by `index mod 18`.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        let color = OPENPOSE_COLORS[index % OPENPOSE_COLORS.len()];
        Self(color[0], color[1], color[2])
    }

    /// Scale every channel by `factor`, truncating toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn scaled(self, factor: f32) -> Self {
        let scale = |c: u8| (f32::from(c) * factor).clamp(0.0, 255.0) as u8;
        Self(scale(self.0), scale(self.1), scale(self.2))
    }

    /// Same color with the red and blue channels swapped.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self(self.2, self.1, self.0)
    }

    /// Convert HSV (each component in [0, 1]) to RGB, truncating to `u8`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::many_single_char_names
    )]
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let h = h.rem_euclid(1.0) * 6.0;
        let i = (h.floor() as i32).rem_euclid(6);
        let f = h - h.floor();
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match i {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        let to_u8 = |c: f32| (c * 255.0).clamp(0.0, 255.0) as u8;
        Self(to_u8(r), to_u8(g), to_u8(b))
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Self([color.0, color.1, color.2])
    }
}

/// OpenPose limb/joint palette (18 entries, RGB).
pub const OPENPOSE_COLORS: [[u8; 3]; 18] = [
    [255, 0, 0],   // #ff0000
    [255, 85, 0],  // #ff5500
    [255, 170, 0], // #ffaa00
    [255, 255, 0], // #ffff00
    [170, 255, 0], // #aaff00
    [85, 255, 0],  // #55ff00
    [0, 255, 0],   // #00ff00
    [0, 255, 85],  // #00ff55
    [0, 255, 170], // #00ffaa
    [0, 255, 255], // #00ffff
    [0, 170, 255], // #00aaff
    [0, 85, 255],  // #0055ff
    [0, 0, 255],   // #0000ff
    [85, 0, 255],  // #5500ff
    [170, 0, 255], // #aa00ff
    [255, 0, 255], // #ff00ff
    [255, 0, 170], // #ff00aa
    [255, 0, 85],  // #ff0055
];
