// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

//! A bare TIFF file *is* an EXIF/TIFF structure, so this parser is a thin
//! wrapper around the shared sub-parser in `exif.rs` rather than its own
//! state machine.

use crate::chunk_source::ChunkSource;
use crate::exif;
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
	let parsed = exif::parse(stream)?;

	let (width, height) = match (parsed.width, parsed.height)
	{
		(Some(width), Some(height)) => (width, height),
		_ => return io_error!(InvalidData, "TIFF IFD0 did not contain both width and height tags"),
	};

	Ok(if parsed.rotated()
	{
		(height, width, parsed.orientation)
	}
	else
	{
		(width, height, parsed.orientation)
	})
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::chunk_source::SequentialChunkSource;
	use std::io::Cursor;

	fn
	ifd_entry
	(
		tag:   u16,
		value: u16,
	)
	-> Vec<u8>
	{
		let mut bytes = Vec::new();
		bytes.extend_from_slice(&tag.to_le_bytes());
		bytes.extend_from_slice(&[0u8; 6]);
		bytes.extend_from_slice(&value.to_le_bytes());
		bytes.extend_from_slice(&[0u8; 2]);
		bytes
	}

	fn
	tiff_bytes
	(
		entries: &[(u16, u16)]
	)
	-> Vec<u8>
	{
		let mut bytes = Vec::new();
		bytes.extend_from_slice(b"II");
		bytes.extend_from_slice(&42u16.to_le_bytes());
		bytes.extend_from_slice(&8u32.to_le_bytes());
		bytes.extend_from_slice(&(entries.len() as u16).to_le_bytes());

		for (tag, value) in entries
		{
			bytes.extend_from_slice(&ifd_entry(*tag, *value));
		}

		bytes
	}

	#[test]
	fn
	reads_dimensions_without_rotation()
	{
		let data = tiff_bytes(&[(0x0100, 230), (0x0101, 408)]);
		let mut stream = PullStream::new(SequentialChunkSource::new(Cursor::new(data)));
		assert_eq!(parse(&mut stream).unwrap(), (230, 408, 1));
	}

	#[test]
	fn
	swaps_dimensions_when_rotated()
	{
		let data = tiff_bytes(&[(0x0100, 230), (0x0101, 408), (0x0112, 6)]);
		let mut stream = PullStream::new(SequentialChunkSource::new(Cursor::new(data)));
		assert_eq!(parse(&mut stream).unwrap(), (408, 230, 6));
	}

	#[test]
	fn
	missing_dimension_tags_fail()
	{
		let data = tiff_bytes(&[(0x0112, 3)]);
		let mut stream = PullStream::new(SequentialChunkSource::new(Cursor::new(data)));
		assert!(parse(&mut stream).is_err());
	}
}
