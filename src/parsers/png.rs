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
	let header = stream.read(25)?;

	let width  = from_u8_vec_macro!(u32, &header[16..20], &Endian::Big);
	let height = from_u8_vec_macro!(u32, &header[20..24], &Endian::Big);

	Ok((width, height, 1))
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::chunk_source::SequentialChunkSource;
	use std::io::Cursor;

	#[test]
	fn
	reads_ihdr_dimensions()
	{
		let mut bytes = vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a]; // signature
		bytes.extend_from_slice(&[0u8; 4]); // IHDR chunk length
		bytes.extend_from_slice(b"IHDR");
		bytes.extend_from_slice(&1920u32.to_be_bytes());
		bytes.extend_from_slice(&1080u32.to_be_bytes());
		bytes.push(8); // bit depth, unread

		let mut stream = PullStream::new(SequentialChunkSource::new(Cursor::new(bytes)));
		assert_eq!(parse(&mut stream).unwrap(), (1920, 1080, 1));
	}
}
