//! Dimension style table entry

use super::{retarget_name, retarget_optional, same_name, TableKind, TableObject, TableRef};
use crate::types::{Color, Handle, LineWeight};

/// A dimension style table entry.
///
/// Besides its numeric settings a dimension style names one text style,
/// up to three arrow blocks and three line types; each of these names is
/// kept registered in its own table while the style is live.
#[derive(Debug, Clone)]
pub struct DimStyle {
    /// Unique handle
    pub handle: Handle,
    /// Owning table handle
    pub owner: Handle,
    /// Style name
    pub name: String,

    // ─── Dimension line ───
    /// Dimension line color (DIMCLRD)
    pub dimclrd: Color,
    /// Dimension line weight (DIMLWD)
    pub dimlwd: LineWeight,
    /// Dimension line gap (DIMGAP)
    pub dimgap: f64,
    /// Dimension line line type (DIMLTYPE)
    pub dimltype: String,

    // ─── Extension lines ───
    /// Extension line color (DIMCLRE)
    pub dimclre: Color,
    /// Extension line extension (DIMEXE)
    pub dimexe: f64,
    /// Extension line offset (DIMEXO)
    pub dimexo: f64,
    /// First extension line line type (DIMLTEX1)
    pub dimltex1: String,
    /// Second extension line line type (DIMLTEX2)
    pub dimltex2: String,

    // ─── Arrows ───
    /// Arrow size (DIMASZ)
    pub dimasz: f64,
    /// Arrow block (DIMBLK), `None` for the default closed filled arrow
    pub dimblk: Option<String>,
    /// First arrow block (DIMBLK1)
    pub dimblk1: Option<String>,
    /// Second arrow block (DIMBLK2)
    pub dimblk2: Option<String>,
    /// Use separate arrow blocks (DIMSAH)
    pub dimsah: bool,

    // ─── Text ───
    /// Text height (DIMTXT)
    pub dimtxt: f64,
    /// Text color (DIMCLRT)
    pub dimclrt: Color,
    /// Text style (DIMTXSTY)
    pub dimtxsty: String,

    // ─── Scale / units ───
    /// Overall scale factor (DIMSCALE)
    pub dimscale: f64,
    /// Linear scale factor (DIMLFAC)
    pub dimlfac: f64,
    /// Decimal places (DIMDEC)
    pub dimdec: i16,
}

impl DimStyle {
    pub const DEFAULT_NAME: &'static str = "Standard";

    /// Create a new dimension style
    pub fn new(name: impl Into<String>) -> Self {
        DimStyle {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            dimclrd: Color::ByBlock,
            dimlwd: LineWeight::ByBlock,
            dimgap: 0.625,
            dimltype: "ByBlock".to_string(),
            dimclre: Color::ByBlock,
            dimexe: 1.25,
            dimexo: 0.625,
            dimltex1: "ByBlock".to_string(),
            dimltex2: "ByBlock".to_string(),
            dimasz: 0.18,
            dimblk: None,
            dimblk1: None,
            dimblk2: None,
            dimsah: false,
            dimtxt: 0.18,
            dimclrt: Color::ByBlock,
            dimtxsty: "Standard".to_string(),
            dimscale: 1.0,
            dimlfac: 1.0,
            dimdec: 2,
        }
    }

    /// Create the standard dimension style
    pub fn standard() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }

    /// Arrow blocks in use, skipping the unset ones
    pub fn arrow_blocks(&self) -> impl Iterator<Item = &str> {
        [&self.dimblk, &self.dimblk1, &self.dimblk2]
            .into_iter()
            .filter_map(|b| b.as_deref())
    }
}

impl TableObject for DimStyle {
    const KIND: TableKind = TableKind::DimStyle;

    fn handle(&self) -> Handle {
        self.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    fn owner(&self) -> Handle {
        self.owner
    }

    fn set_owner(&mut self, owner: Handle) {
        self.owner = owner;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn is_reserved(&self) -> bool {
        same_name(&self.name, Self::DEFAULT_NAME)
    }

    fn references(&self) -> Vec<TableRef> {
        let mut refs = vec![TableRef::new(TableKind::TextStyle, &self.dimtxsty)];
        refs.extend(
            self.arrow_blocks()
                .map(|block| TableRef::new(TableKind::BlockRecord, block)),
        );
        refs.extend(
            [&self.dimltype, &self.dimltex1, &self.dimltex2]
                .into_iter()
                .map(|lt| TableRef::new(TableKind::LineType, lt)),
        );
        refs
    }

    fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        match kind {
            TableKind::TextStyle => retarget_name(&mut self.dimtxsty, old, new),
            TableKind::BlockRecord => {
                retarget_optional(&mut self.dimblk, old, new);
                retarget_optional(&mut self.dimblk1, old, new);
                retarget_optional(&mut self.dimblk2, old, new);
            }
            TableKind::LineType => {
                retarget_name(&mut self.dimltype, old, new);
                retarget_name(&mut self.dimltex1, old, new);
                retarget_name(&mut self.dimltex2, old, new);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard() {
        let style = DimStyle::standard();
        assert!(style.is_reserved());
        assert_eq!(style.dimtxsty, "Standard");
        assert_eq!(style.arrow_blocks().count(), 0);
    }

    #[test]
    fn test_references_skip_unset_blocks() {
        let mut style = DimStyle::new("Arch");
        style.dimblk1 = Some("_Dot".to_string());

        let refs = style.references();
        assert_eq!(refs.len(), 5);
        assert_eq!(refs[0], TableRef::new(TableKind::TextStyle, "Standard"));
        assert_eq!(refs[1], TableRef::new(TableKind::BlockRecord, "_Dot"));
        assert_eq!(
            refs.iter().filter(|r| r.kind == TableKind::LineType).count(),
            3
        );
    }

    #[test]
    fn test_retarget_line_types() {
        let mut style = DimStyle::new("Arch");
        style.dimltex2 = "Dashed".to_string();
        style.retarget(TableKind::LineType, "dashed", "Hidden");
        assert_eq!(style.dimltex2, "Hidden");
        assert_eq!(style.dimltype, "ByBlock");
    }
}
