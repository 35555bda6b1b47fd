// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

use crate::chunk_source::ChunkSource;
use crate::endian::from_u8_vec_macro;
use crate::endian::Endian;
use crate::stream::PullStream;

use super::ParseResult;

const DIRECTORY_ENTRY_LENGTH: usize = 16;

/// ICO and CUR share an identical directory layout; the only difference
/// (hotspot coordinates vs. color planes in bytes 4-7 of each entry) is
/// irrelevant to recovering dimensions, so one parser serves both.
pub(crate) fn
parse
<C: ChunkSource>
(
	stream: &mut PullStream<C>
)
-> ParseResult
{
	let header = stream.read(6)?;
	let entry_count = from_u8_vec_macro!(u16, &header[4..6], &Endian::Little);

	let mut best: Option<(u32, u32, u32)> = None; // (width, height, area)

	for _ in 0..entry_count
	{
		let entry = stream.read(DIRECTORY_ENTRY_LENGTH)?;

		let width  = if entry[0] == 0 { 256 } else { entry[0] as u32 };
		let height = if entry[1] == 0 { 256 } else { entry[1] as u32 };
		let area   = width * height;

		// Ties broken by later-seen entry: a `>=` comparison lets a later
		// entry of equal area overwrite an earlier one.
		if best.map(|(_, _, best_area)| area >= best_area).unwrap_or(true)
		{
			best = Some((width, height, area));
		}
	}

	match best
	{
		Some((width, height, _)) => Ok((width, height, 1)),
		None => crate::general_file_io::io_error!(InvalidData, "ICO/CUR directory has no entries"),
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::chunk_source::SequentialChunkSource;
	use std::io::Cursor;

	fn
	directory_entry
	(
		width:  u8,
		height: u8,
	)
	-> Vec<u8>
	{
		let mut entry = vec![width, height];
		entry.extend_from_slice(&[0u8; 14]);
		entry
	}

	fn
	ico_bytes
	(
		entries: &[(u8, u8)]
	)
	-> Vec<u8>
	{
		let mut bytes = vec![0x00, 0x00, 0x01, 0x00];
		bytes.extend_from_slice(&(entries.len() as u16).to_le_bytes());

		for (w, h) in entries
		{
			bytes.extend_from_slice(&directory_entry(*w, *h));
		}

		bytes
	}

	#[test]
	fn
	zero_byte_dimension_means_256()
	{
		let mut stream = PullStream::new(SequentialChunkSource::new(Cursor::new(ico_bytes(&[(0, 0)]))));
		assert_eq!(parse(&mut stream).unwrap(), (256, 256, 1));
	}

	#[test]
	fn
	picks_entry_with_largest_area()
	{
		let mut stream = PullStream::new(SequentialChunkSource::new(Cursor::new(ico_bytes(&[(16, 16), (32, 32), (24, 24)]))));
		assert_eq!(parse(&mut stream).unwrap(), (32, 32, 1));
	}

	#[test]
	fn
	ties_broken_by_later_entry()
	{
		// Two entries with equal area (32*32 == 64*16); the later one wins.
		let mut stream = PullStream::new(SequentialChunkSource::new(Cursor::new(ico_bytes(&[(32, 32), (64, 16)]))));
		assert_eq!(parse(&mut stream).unwrap(), (64, 16, 1));
	}
}
