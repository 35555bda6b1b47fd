// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

//! Format Parsers (§4.4): ten small, independent parsers sharing only the
//! Pull Stream contract. The cleanest mapping for this - per the spec's own
//! design notes - is a tagged variant (`Format`) plus a function-per-variant
//! dispatch, the same shape `little_exif::filetype::FileExtension` takes
//! alongside its per-format `jpg.rs`/`png.rs`/`webp.rs` modules, rather than
//! any kind of parser trait object hierarchy.

pub(crate) mod bmp;
pub(crate) mod gif;
pub(crate) mod ico;
pub(crate) mod jpeg;
pub(crate) mod png;
pub(crate) mod psd;
pub(crate) mod svg;
pub(crate) mod tiff;
pub(crate) mod webp;

use crate::chunk_source::ChunkSource;
use crate::format::Format;
use crate::stream::PullStream;

/// `(width, height, orientation)`. Every parser that doesn't carry
/// orientation information of its own (everything except JPEG/TIFF)
/// reports `1`.
pub(crate) type ParseResult = std::io::Result<(u32, u32, u16)>;

/// Runs the parser selected by the dispatcher. The stream is positioned at
/// absolute offset 0; every parser consumes bytes forward from there.
pub(crate) fn
parse
<C: ChunkSource>
(
	format: Format,
	stream: &mut PullStream<C>,
)
-> ParseResult
{
	match format
	{
		Format::Bmp  => bmp::parse(stream),
		Format::Gif  => gif::parse(stream),
		Format::Jpeg => jpeg::parse(stream),
		Format::Png  => png::parse(stream),
		Format::Tiff => tiff::parse(stream),
		Format::Psd  => psd::parse(stream),
		Format::Ico  => ico::parse(stream),
		Format::Cur  => ico::parse(stream),
		Format::Webp => webp::parse(stream),
		Format::Svg  => svg::parse(stream),
	}
}
