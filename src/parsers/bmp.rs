// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

use crate::chunk_source::ChunkSource;
use crate::endian::from_u8_vec_macro;
use crate::endian::Endian;
use crate::stream::PullStream;

use super::ParseResult;

const BITMAPINFOHEADER_LENGTH: u32 = 40;

pub(crate) fn
parse
<C: ChunkSource>
(
	stream: &mut PullStream<C>
)
-> ParseResult
{
	let header = stream.read(32)?;

	let dib_header_length = from_u8_vec_macro!(u32, &header[14..18], &Endian::Little);

	let (width, height) = if dib_header_length == BITMAPINFOHEADER_LENGTH
	{
		let width  = from_u8_vec_macro!(i32, &header[18..22], &Endian::Little);
		let height = from_u8_vec_macro!(i32, &header[22..26], &Endian::Little);
		(width as i64, height as i64)
	}
	else
	{
		// BITMAPCOREHEADER: width/height are unsigned 16-bit
		let width  = from_u8_vec_macro!(u16, &header[18..20], &Endian::Little);
		let height = from_u8_vec_macro!(u16, &header[20..22], &Endian::Little);
		(width as i64, height as i64)
	};

	// Top-down bitmaps store a negative height; the reported dimension is
	// always non-negative.
	Ok((width as u32, height.unsigned_abs() as u32, 1))
}
