use std::{fmt, str::FromStr};

use sha2::Digest as _;

use crate::foundation::error::{CardError, CardResult};

/// Longest canvas edge in pixels.
pub const MAX_DIM: u32 = 1000;

/// Output canvas proportions.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Aspect {
    /// 1000x1000.
    #[default]
    #[serde(rename = "square", alias = "1:1")]
    Square,
    /// 750x1000. Labelled `4:3` in the dashboard although the image is 3:4 (portrait).
    #[serde(rename = "portrait", alias = "4:3", alias = "3:4")]
    Portrait,
}

impl Aspect {
    /// Both selectable aspects, square first.
    pub const ALL: [Aspect; 2] = [Aspect::Square, Aspect::Portrait];

    /// Canvas dimensions for this aspect.
    pub fn canvas(self) -> Canvas {
        Canvas::for_aspect(self)
    }

    /// The label the dashboard shows for this choice.
    pub fn ratio_label(self) -> &'static str {
        match self {
            Aspect::Square => "1:1",
            Aspect::Portrait => "4:3",
        }
    }

    /// The aspect not currently selected (used for side-by-side previews).
    pub fn other(self) -> Aspect {
        match self {
            Aspect::Square => Aspect::Portrait,
            Aspect::Portrait => Aspect::Square,
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ratio_label())
    }
}

impl FromStr for Aspect {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1:1" | "square" => Ok(Aspect::Square),
            "4:3" | "3:4" | "portrait" => Ok(Aspect::Portrait),
            other => Err(CardError::validation(format!(
                "unknown aspect '{other}' (expected 1:1, 4:3, square or portrait)"
            ))),
        }
    }
}

/// Pixel dimensions of an output card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn for_aspect(aspect: Aspect) -> Self {
        match aspect {
            Aspect::Square => Self {
                width: MAX_DIM,
                height: MAX_DIM,
            },
            Aspect::Portrait => Self {
                width: MAX_DIM * 3 / 4,
                height: MAX_DIM,
            },
        }
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Width over height.
    pub fn ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Opaque 8-bit RGB color, serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(s: &str) -> CardResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CardError::validation(format!("invalid color '{s}'")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| CardError::validation(format!("invalid color '{s}'")))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Fully opaque RGBA; premultiplied and straight forms coincide.
    pub fn opaque_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb8> for String {
    fn from(value: Rgb8) -> Self {
        value.to_hex()
    }
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
