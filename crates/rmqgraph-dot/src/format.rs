//! Output formats.

use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use rmqgraph_core::{Error, Result};

/// Output format of the rendered artifact, named as Graphviz names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// DOT source, produced without any external engine
    #[default]
    Dot,
    /// DOT source under its alternative extension
    Gv,

    // Graphviz text outputs
    Canon,
    Xdot,
    #[strum(serialize = "xdot1.2")]
    Xdot12,
    #[strum(serialize = "xdot1.4")]
    Xdot14,
    Plain,
    #[strum(serialize = "plain-ext")]
    PlainExt,
    Json,
    Json0,
    #[strum(serialize = "dot_json")]
    DotJson,
    #[strum(serialize = "xdot_json")]
    XdotJson,

    // Image maps
    Cmap,
    Cmapx,
    #[strum(serialize = "cmapx_np")]
    CmapxNp,
    Imap,
    #[strum(serialize = "imap_np")]
    ImapNp,
    Ismap,

    // Vector formats
    Svg,
    Svgz,
    Pdf,
    Ps,
    Ps2,
    Eps,
    Fig,
    Mp,
    Pic,
    Pov,
    Vml,
    Vmlz,
    Vrml,
    Vdx,
    Tk,

    // Raster formats
    Png,
    Jpg,
    Jpeg,
    Jpe,
    Gif,
    Bmp,
    Ico,
    Webp,
    Tif,
    Tiff,
    Wbmp,
    Gd,
    Gd2,
    Pct,
    Pict,
    Psd,
    Sgi,
    Tga,
    Exr,
    Jp2,
}

impl OutputFormat {
    /// Parse a user-supplied format name, case-insensitively.
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name.trim()).map_err(|err| {
            Error::unsupported_format(name)
                .with_operation("format::parse")
                .with_context("supported", Self::supported().join(","))
                .set_source(err)
        })
    }

    /// Every accepted format name, in declaration order.
    pub fn supported() -> Vec<&'static str> {
        Self::iter().map(|format| format.as_str()).collect()
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Whether the DOT serializer produces this format on its own.
    pub fn is_native(&self) -> bool {
        matches!(self, OutputFormat::Dot | OutputFormat::Gv)
    }
}
