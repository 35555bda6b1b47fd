// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

//! WEBP's RIFF container carries one of three mutually exclusive chunk
//! formats; each stores width/height in its own bit-packed layout. EXIF
//! orientation within VP8X's optional EXIF chunk is out of scope (Non-goal),
//! so this parser always reports orientation `1`.

use crate::chunk_source::ChunkSource;
use crate::endian::from_u8_vec_macro;
use crate::endian::Endian;
use crate::general_file_io::io_error;
use crate::stream::PullStream;

use super::ParseResult;

pub(crate) fn
parse
<C: ChunkSource>
(
	stream: &mut PullStream<C>
)
-> ParseResult
{
	let header = stream.read(16)?;
	let sub_format = &header[12..16];

	stream.skip(4)?; // chunk length, unused

	match sub_format
	{
		b"VP8 " => parse_vp8(stream),
		b"VP8L" => parse_vp8l(stream),
		b"VP8X" => parse_vp8x(stream),
		_ => io_error!(InvalidData, "unrecognized WEBP sub-format"),
	}
}

fn
parse_vp8
<C: ChunkSource>
(
	stream: &mut PullStream<C>
)
-> ParseResult
{
	let bytes = stream.read(10)?;

	let width  = from_u8_vec_macro!(u16, &bytes[6..8], &Endian::Little) & 0x3FFF;
	let height = from_u8_vec_macro!(u16, &bytes[8..10], &Endian::Little) & 0x3FFF;

	Ok((width as u32, height as u32, 1))
}

fn
parse_vp8l
<C: ChunkSource>
(
	stream: &mut PullStream<C>
)
-> ParseResult
{
	stream.skip(1)?; // 0x2F signature byte

	let bytes = stream.read(4)?;
	let (b1, b2, b3, b4) = (bytes[0] as u32, bytes[1] as u32, bytes[2] as u32, bytes[3] as u32);

	let width  = 1 + (((b2 & 0x3F) << 8) | b1);
	let height = 1 + (((b4 & 0x0F) << 10) | (b3 << 2) | ((b2 & 0xC0) >> 6));

	Ok((width, height, 1))
}

fn
parse_vp8x
<C: ChunkSource>
(
	stream: &mut PullStream<C>
)
-> ParseResult
{
	stream.skip(4)?; // flags byte + 3 reserved bytes

	let bytes = stream.read(6)?;
	let (b1, b2, b3, b4, b5, b6) = (
		bytes[0] as u32, bytes[1] as u32, bytes[2] as u32,
		bytes[3] as u32, bytes[4] as u32, bytes[5] as u32,
	);

	let width  = 1 + b1 + (b2 << 8) + (b3 << 16);
	let height = 1 + b4 + (b5 << 8) + (b6 << 16);

	Ok((width, height, 1))
}
