// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

//! Chunk Source (§4.1): "produce the next 256-byte chunk, or signal
//! end-of-input." Two concrete producers share one trait, the same shape
//! as the teacher's small single-purpose traits (`U8conversion`,
//! `ifd::tag_trait::TagTrait`): one trait, a couple of methods, one impl
//! per concrete case - no inheritance, no generic producer hierarchy.

use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

use crate::general_file_io::CHUNK_SIZE;

/// A stateful pull iterator over 256-byte windows of the underlying input.
/// `next_chunk` returns `Ok(None)` exactly at end-of-input; a non-empty but
/// short final chunk (fewer than `CHUNK_SIZE` bytes) is not itself an
/// end-of-input signal - the *following* call is.
pub(crate) trait
ChunkSource
{
	fn
	next_chunk
	(
		&mut self
	)
	-> std::io::Result<Option<Vec<u8>>>;
}

/// Reads repeatedly until either `CHUNK_SIZE` bytes have been gathered or
/// the underlying reader reports true EOF (a zero-byte read).
fn
fill_chunk
<R: Read>
(
	reader: &mut R
)
-> std::io::Result<Option<Vec<u8>>>
{
	let mut buffer = vec![0u8; CHUNK_SIZE];
	let mut filled = 0;

	while filled < CHUNK_SIZE
	{
		let bytes_read = reader.read(&mut buffer[filled..])?;

		if bytes_read == 0
		{
			break;
		}

		filled += bytes_read;
	}

	if filled == 0
	{
		return Ok(None);
	}

	buffer.truncate(filled);
	Ok(Some(buffer))
}

/// For sources whose natural read primitive always returns the first
/// window unless told an explicit offset (random-access / range-style
/// sources). Holds a running offset and seeks to it before every read.
pub(crate) struct
OffsetChunkSource
<R: Read + Seek>
{
	reader: R,
	offset: u64,
}

impl<R: Read + Seek> OffsetChunkSource<R>
{
	pub(crate) fn
	new
	(
		reader: R
	)
	-> Self
	{
		OffsetChunkSource { reader, offset: 0 }
	}

	pub(crate) fn
	into_inner
	(
		self
	)
	-> R
	{
		self.reader
	}
}

impl<R: Read + Seek> ChunkSource for OffsetChunkSource<R>
{
	fn
	next_chunk
	(
		&mut self
	)
	-> std::io::Result<Option<Vec<u8>>>
	{
		self.reader.seek(SeekFrom::Start(self.offset))?;

		let chunk = fill_chunk(&mut self.reader)?;

		if let Some(ref bytes) = chunk
		{
			self.offset += bytes.len() as u64;
		}

		Ok(chunk)
	}
}

/// For sources that naturally advance their own cursor on read (plain
/// sequential streams with no seek capability).
pub(crate) struct
SequentialChunkSource
<R: Read>
{
	reader: R,
}

impl<R: Read> SequentialChunkSource<R>
{
	pub(crate) fn
	new
	(
		reader: R
	)
	-> Self
	{
		SequentialChunkSource { reader }
	}

	pub(crate) fn
	into_inner
	(
		self
	)
	-> R
	{
		self.reader
	}
}

impl<R: Read> ChunkSource for SequentialChunkSource<R>
{
	fn
	next_chunk
	(
		&mut self
	)
	-> std::io::Result<Option<Vec<u8>>>
	{
		fill_chunk(&mut self.reader)
	}
}
