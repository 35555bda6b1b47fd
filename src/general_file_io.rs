// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

use std::fs::File;
use std::io::Error;
use std::path::Path;

/// The 6-byte marker that precedes the TIFF header inside a JPEG APP1 segment:
/// the ASCII string "Exif" followed by two NUL bytes.
pub(crate) const EXIF_HEADER: [u8; 6] = [0x45, 0x78, 0x69, 0x66, 0x00, 0x00];

/// Fixed chunk size used by both `ChunkSource` implementations (§4.1).
pub(crate) const CHUNK_SIZE: usize = 256;

macro_rules! io_error {
	($kind:ident, $message:expr)
	=>
	{
		Err(std::io::Error::new(
			std::io::ErrorKind::$kind,
			$message
		))
	};
}

pub(crate) use io_error;

/// Opens `path` for reading, translating "it's a directory" and "it doesn't
/// exist" into the same `io::Error` kinds the rest of the crate already
/// expects from a failed read - this is the one spot path-ness is still
/// allowed to leak into the otherwise source-agnostic core.
pub(crate) fn
open_read_file
(
	path: &Path
)
-> Result<File, Error>
{
	if path.is_dir()
	{
		return io_error!(InvalidInput, format!("'{}' is a directory, not a file!", path.display()));
	}

	if !path.exists()
	{
		return io_error!(NotFound, format!("'{}' does not exist!", path.display()));
	}

	File::open(path)
}
