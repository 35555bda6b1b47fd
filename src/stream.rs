// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

//! Pull Stream (§4.2): the single byte-cursor interface every format parser
//! sees. Forward-only, backed by a rolling buffer fed from a `ChunkSource`.

use crate::chunk_source::ChunkSource;
use crate::endian::from_u8_vec_macro;
use crate::endian::Endian;
use crate::general_file_io::io_error;

pub(crate) struct
PullStream
<C: ChunkSource>
{
	source:   C,
	buffer:   Vec<u8>,
	buf_pos:  usize,  // index into `buffer` where the cursor currently sits
	position: u64,    // absolute byte position since construction
}

impl<C: ChunkSource> PullStream<C>
{
	pub(crate) fn
	new
	(
		source: C
	)
	-> Self
	{
		PullStream { source, buffer: Vec::new(), buf_pos: 0, position: 0 }
	}

	pub(crate) fn
	position
	(
		&self
	)
	-> u64
	{
		self.position
	}

	/// Hands the `ChunkSource` back to the caller, e.g. so the orchestrator
	/// can recover the underlying reader to rewind it once parsing ends.
	pub(crate) fn
	into_source
	(
		self
	)
	-> C
	{
		self.source
	}

	/// Drops already-consumed bytes from the front of the buffer. Never
	/// called between `peek` and the read/skip that follows it, so the
	/// bytes a `peek` just returned are never invalidated out from under
	/// the caller.
	fn
	compact
	(
		&mut self
	)
	{
		if self.buf_pos > 0
		{
			self.buffer.drain(0..self.buf_pos);
			self.buf_pos = 0;
		}
	}

	/// Pulls chunks from the source, appending them to the buffer, until
	/// at least `n` bytes are available past the cursor.
	fn
	ensure
	(
		&mut self,
		n: usize
	)
	-> std::io::Result<()>
	{
		while self.buffer.len() - self.buf_pos < n
		{
			match self.source.next_chunk()?
			{
				Some(chunk) if !chunk.is_empty() =>
				{
					self.buffer.extend_from_slice(&chunk);
				},

				_ =>
				{
					return io_error!(UnexpectedEof, "ran out of input while trying to read more bytes");
				},
			}
		}

		Ok(())
	}

	/// Returns the next `n` bytes without advancing the cursor.
	pub(crate) fn
	peek
	(
		&mut self,
		n: usize
	)
	-> std::io::Result<Vec<u8>>
	{
		self.ensure(n)?;
		Ok(self.buffer[self.buf_pos .. self.buf_pos + n].to_vec())
	}

	/// Equivalent to `peek(n)` followed by advancing the cursor by `n`.
	pub(crate) fn
	read
	(
		&mut self,
		n: usize
	)
	-> std::io::Result<Vec<u8>>
	{
		let bytes = self.peek(n)?;

		self.buf_pos  += n;
		self.position += n as u64;
		self.compact();

		Ok(bytes)
	}

	/// Advances the cursor by `n` bytes without materializing intermediate
	/// chunks: whole chunks between the cursor and the target are fetched
	/// and discarded directly, only the residual fragment straddling the
	/// target is kept.
	pub(crate) fn
	skip
	(
		&mut self,
		mut n: u64
	)
	-> std::io::Result<()>
	{
		let available    = (self.buffer.len() - self.buf_pos) as u64;
		let from_buffer  = available.min(n);

		self.buf_pos  += from_buffer as usize;
		self.position += from_buffer;
		n             -= from_buffer;
		self.compact();

		while n > 0
		{
			match self.source.next_chunk()?
			{
				Some(chunk) if !chunk.is_empty() =>
				{
					let len = chunk.len() as u64;

					if len <= n
					{
						self.position += len;
						n             -= len;
					}
					else
					{
						let consumed = n as usize;
						self.buffer   = chunk[consumed..].to_vec();
						self.buf_pos  = 0;
						self.position += n;
						n = 0;
					}
				},

				_ =>
				{
					return io_error!(UnexpectedEof, "skip() ran past the end of input");
				},
			}
		}

		Ok(())
	}

	pub(crate) fn
	read_u16
	(
		&mut self,
		endian: &Endian
	)
	-> std::io::Result<u16>
	{
		Ok(from_u8_vec_macro!(u16, &self.read(2)?, endian))
	}

	pub(crate) fn
	read_i16
	(
		&mut self,
		endian: &Endian
	)
	-> std::io::Result<i16>
	{
		Ok(from_u8_vec_macro!(i16, &self.read(2)?, endian))
	}

	pub(crate) fn
	read_u32
	(
		&mut self,
		endian: &Endian
	)
	-> std::io::Result<u32>
	{
		Ok(from_u8_vec_macro!(u32, &self.read(4)?, endian))
	}

	pub(crate) fn
	read_i32
	(
		&mut self,
		endian: &Endian
	)
	-> std::io::Result<i32>
	{
		Ok(from_u8_vec_macro!(i32, &self.read(4)?, endian))
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::chunk_source::SequentialChunkSource;
	use std::io::Cursor;

	fn
	stream_of
	(
		data: Vec<u8>
	)
	-> PullStream<SequentialChunkSource<Cursor<Vec<u8>>>>
	{
		PullStream::new(SequentialChunkSource::new(Cursor::new(data)))
	}

	#[test]
	fn
	peek_does_not_advance_position()
	{
		let mut stream = stream_of(vec![1, 2, 3, 4, 5]);
		assert_eq!(stream.peek(3).unwrap(), vec![1, 2, 3]);
		assert_eq!(stream.position(), 0);
		assert_eq!(stream.peek(3).unwrap(), vec![1, 2, 3]);
	}

	#[test]
	fn
	read_advances_position_by_exactly_n()
	{
		let mut stream = stream_of(vec![1, 2, 3, 4, 5]);
		assert_eq!(stream.read(2).unwrap(), vec![1, 2]);
		assert_eq!(stream.position(), 2);
		assert_eq!(stream.read(2).unwrap(), vec![3, 4]);
		assert_eq!(stream.position(), 4);
	}

	#[test]
	fn
	skip_advances_position_without_reading()
	{
		let mut stream = stream_of((0..=255u8).collect::<Vec<_>>());
		stream.skip(200).unwrap();
		assert_eq!(stream.position(), 200);
		assert_eq!(stream.read(2).unwrap(), vec![200, 201]);
	}

	#[test]
	fn
	skip_spanning_multiple_chunks()
	{
		let data: Vec<u8> = (0..600u32).map(|i| (i % 256) as u8).collect();
		let mut stream = stream_of(data.clone());
		stream.skip(500).unwrap();
		assert_eq!(stream.position(), 500);
		assert_eq!(stream.read(3).unwrap(), vec![data[500], data[501], data[502]]);
	}

	#[test]
	fn
	peek_past_end_fails
	()
	{
		let mut stream = stream_of(vec![1, 2, 3]);
		assert!(stream.peek(10).is_err());
	}

	#[test]
	fn
	read_big_endian_u16()
	{
		let mut stream = stream_of(vec![0x01, 0x02]);
		assert_eq!(stream.read_u16(&Endian::Big).unwrap(), 0x0102);
	}
}
