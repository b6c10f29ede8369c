use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{CardError, CardResult, foundation::core::sha256_hex};

/// Where a [`FontFace`] was loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    File(PathBuf),
    System,
    Memory,
}

/// Caption font: raw font bytes plus the family name they register under.
///
/// Construction fails when the bytes are missing or unparseable. There is no silent fallback
/// face: a card drawn without CJK coverage is unusable.
///
/// The bytes are loaded once and shared by reference with Parley and vello_cpu, so cloning a face
/// or rendering with it never copies the font.
#[derive(Clone)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    blob: parley::fontique::Blob<u8>,
    data: vello_cpu::peniko::FontData,
    index: u32,
    family: String,
    origin: FontOrigin,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("family", &self.family)
            .field("origin", &self.origin)
            .finish()
    }
}

impl FontFace {
    /// Read a TrueType/OpenType file.
    pub fn load(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            CardError::font(format!("read font file '{}': {e}", path.display()))
        })?;
        let mut face = Self::from_bytes(bytes)?;
        face.origin = FontOrigin::File(path.to_path_buf());
        Ok(face)
    }

    /// Parse in-memory font bytes (face index 0).
    pub fn from_bytes(bytes: Vec<u8>) -> CardResult<Self> {
        Self::assemble(bytes, 0, None, FontOrigin::Memory)
    }

    fn assemble(
        bytes: Vec<u8>,
        index: u32,
        family: Option<String>,
        origin: FontOrigin,
    ) -> CardResult<Self> {
        let bytes = Arc::new(bytes);
        let blob = parley::fontique::Blob::new(bytes.clone());
        let family = match family {
            Some(name) => name,
            None => registered_family_name(&blob)?,
        };
        let data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::new(bytes.clone()), index);
        Ok(Self {
            bytes,
            blob,
            data,
            index,
            family,
            origin,
        })
    }

    /// Pick an installed font, preferring `families` in order and bold weight.
    ///
    /// Falls back to any installed face when none of the named families exist; fails only when
    /// the system has no fonts at all.
    pub fn system(families: &[&str]) -> CardResult<Self> {
        use usvg::fontdb::{Database, Family, Query, Stretch, Style, Weight};

        let mut db = Database::new();
        db.load_system_fonts();

        let mut wanted: Vec<Family<'_>> = families.iter().map(|n| Family::Name(n)).collect();
        wanted.push(Family::SansSerif);
        let query = Query {
            families: &wanted,
            weight: Weight::BOLD,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };

        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|f| f.id))
            .ok_or_else(|| CardError::font("no system fonts installed"))?;
        let (family, index) = db
            .face(id)
            .map(|f| {
                let name = f.families.first().map(|(n, _)| n.clone());
                (name, f.index)
            })
            .ok_or_else(|| CardError::font("system font face vanished during lookup"))?;
        let bytes = db
            .with_face_data(id, |data, _| data.to_vec())
            .ok_or_else(|| CardError::font("read system font data"))?;

        Self::assemble(bytes, index, family, FontOrigin::System)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle for registering the face with Parley.
    pub fn blob(&self) -> &parley::fontique::Blob<u8> {
        &self.blob
    }

    /// Shared handle for drawing glyph runs with vello_cpu.
    pub fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }

    /// Face index inside a font collection (0 for single-face files).
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    /// Hex SHA-256 of the font bytes, for diagnostics.
    pub fn sha256_hex(&self) -> String {
        sha256_hex(&self.bytes)
    }
}

fn registered_family_name(blob: &parley::fontique::Blob<u8>) -> CardResult<String> {
    let mut font_ctx = parley::FontContext::default();
    let families = font_ctx.collection.register_fonts(blob.clone(), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| CardError::font("no font families registered from font bytes"))?;
    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_string)
        .ok_or_else(|| CardError::font("registered font family has no name"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
