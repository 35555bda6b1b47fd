// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

use crate::chunk_source::ChunkSource;
use crate::endian::from_u8_vec_macro;
use crate::endian::Endian;
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
	let header = stream.read(11)?;

	let width  = from_u8_vec_macro!(u16, &header[6..8], &Endian::Little);
	let height = from_u8_vec_macro!(u16, &header[8..10], &Endian::Little);

	Ok((width as u32, height as u32, 1))
}
