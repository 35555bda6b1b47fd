// Adapted in the style of this crate's teacher (`little_exif`), which leans
// on plain `std::io::Error` for its internal plumbing, and of the other
// image-metadata crates in the wider pack (`jpegxr`, `async-tiff`,
// `exiftool-rs`), which expose a small closed `thiserror` enum at their
// public boundary. This crate does both: internal helpers keep propagating
// `std::io::Error` (see `general_file_io::io_error!`), and the orchestrator
// (`lib.rs`) is the single place that classifies a terminal internal failure
// into one of the three variants below, per §7 of the spec's propagation
// policy: a parser/EXIF-sub-parser failure is always surfaced as either
// `SizeNotFound` or `ImageFetchFailure`, never as a distinct fourth kind.

use thiserror::Error;

/// The closed error taxonomy surfaced to callers when `Options::raise_on_failure`
/// is set. Without that flag, all of these collapse to an absent (`None`) result.
#[derive(Error, Debug)]
pub enum
ImageError
{
	/// The underlying byte source could not be read: a missing path, a
	/// directory instead of a file, an I/O error, or premature truncation
	/// before any format decision could be made.
	#[error("could not read image source: {0}")]
	ImageFetchFailure(std::io::Error),

	/// The format dispatcher could not match any of the ten known
	/// signatures against the source's leading bytes.
	#[error("unknown image type")]
	UnknownImageType,

	/// The format was identified, but its parser (or the shared EXIF
	/// sub-parser) could not recover dimensions from the header - whether
	/// from running out of input or from structurally invalid data.
	#[error("could not find image size")]
	SizeNotFound,
}
