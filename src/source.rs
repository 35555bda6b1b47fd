// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

//! Byte Source: the boundary collaborator named in §1's Out of Scope -
//! "a thing the orchestrator can open, read positionally or sequentially
//! from, and optionally rewind." Path-based sources are opened and closed
//! by the orchestrator exactly as `general_file_io::open_read_file` is used
//! by the teacher's own `file_read_metadata`-style helpers; caller-supplied
//! sources are only borrowed and rewound.

use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;

use crate::chunk_source::ChunkSource;
use crate::chunk_source::OffsetChunkSource;
use crate::chunk_source::SequentialChunkSource;
use crate::general_file_io::open_read_file;

/// Either of the two `ChunkSource` flavors, picked once at construction
/// time depending on whether the underlying reader supports seeking.
pub(crate) enum
AnyChunkSource
<R: Read + Seek>
{
	Offset(OffsetChunkSource<R>),
	Sequential(SequentialChunkSource<R>),
}

impl<R: Read + Seek> ChunkSource for AnyChunkSource<R>
{
	fn
	next_chunk
	(
		&mut self
	)
	-> std::io::Result<Option<Vec<u8>>>
	{
		match self
		{
			AnyChunkSource::Offset(source)     => source.next_chunk(),
			AnyChunkSource::Sequential(source) => source.next_chunk(),
		}
	}
}

impl<R: Read + Seek> AnyChunkSource<R>
{
	/// Recovers the underlying reader once a parse has finished with it, so
	/// the orchestrator can rewind (caller-supplied readers) or simply let
	/// it drop (path-opened files).
	pub(crate) fn
	into_inner
	(
		self
	)
	-> R
	{
		match self
		{
			AnyChunkSource::Offset(source)     => source.into_inner(),
			AnyChunkSource::Sequential(source) => source.into_inner(),
		}
	}
}

/// Owns a `Read + Seek` reader for the duration of one parse. `from_path`
/// opens (and will be responsible for dropping/closing) the file itself;
/// `from_reader` only borrows what the caller already owns.
pub(crate) struct
ByteSource
<R: Read + Seek>
{
	reader: R,
}

impl ByteSource<File>
{
	pub(crate) fn
	from_path
	(
		path: &Path
	)
	-> std::io::Result<Self>
	{
		Ok(ByteSource { reader: open_read_file(path)? })
	}
}

impl<R: Read + Seek> ByteSource<R>
{
	pub(crate) fn
	from_reader
	(
		reader: R
	)
	-> Self
	{
		ByteSource { reader }
	}

	pub(crate) fn
	into_reader
	(
		self
	)
	-> R
	{
		self.reader
	}

	/// All concrete readers backing a `ByteSource` are seekable, so this
	/// crate always picks the offset-addressed chunk variant - the
	/// sequential variant exists in `chunk_source.rs` for callers of the
	/// EXIF sub-parser's internal sub-streams (§4.5), which wrap an
	/// in-memory buffer that has already been extracted from the main
	/// stream and has no need of further seeking.
	pub(crate) fn
	into_chunk_source
	(
		self
	)
	-> AnyChunkSource<R>
	{
		AnyChunkSource::Offset(OffsetChunkSource::new(self.reader))
	}

	/// Rewinds the underlying reader to position 0, per §5/§7: every exit
	/// path must leave an externally-visible source unmoved.
	pub(crate) fn
	rewind
	(
		reader: &mut R
	)
	-> std::io::Result<()>
	{
		reader.seek(SeekFrom::Start(0)).map(|_| ())
	}
}
