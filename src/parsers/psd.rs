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
	let header = stream.read(26)?;

	let height = from_u8_vec_macro!(u32, &header[14..18], &Endian::Big);
	let width  = from_u8_vec_macro!(u32, &header[18..22], &Endian::Big);

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
	reads_width_and_height_from_file_header()
	{
		let mut bytes = b"8BPS".to_vec();
		bytes.extend_from_slice(&[0u8; 10]); // version, reserved, channels
		bytes.extend_from_slice(&800u32.to_be_bytes());  // height
		bytes.extend_from_slice(&600u32.to_be_bytes());  // width
		bytes.extend_from_slice(&[0u8; 4]);

		let mut stream = PullStream::new(SequentialChunkSource::new(Cursor::new(bytes)));
		assert_eq!(parse(&mut stream).unwrap(), (600, 800, 1));
	}
}
