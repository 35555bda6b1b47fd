// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

//! # imagesniff
//! A small crate that identifies an image's format and pixel dimensions by
//! reading as little of the file as possible, recovering EXIF orientation
//! for JPEG and TIFF along the way. Supports BMP, GIF, JPEG, PNG, TIFF,
//! PSD, ICO, CUR, WebP (VP8/VP8L/VP8X) and SVG.
//!
//! # Usage
//! ```no_run
//! use imagesniff::{size_from_path, Options};
//!
//! let dimensions = size_from_path(std::path::Path::new("photo.jpg"), Options::default());
//! ```

#![forbid(unsafe_code)]
#![crate_type = "lib"]
#![crate_name = "imagesniff"]

mod chunk_source;
mod dispatcher;
mod endian;
mod error;
mod exif;
mod format;
mod general_file_io;
mod parsers;
mod source;
mod stream;

pub use error::ImageError;
pub use format::Format;

use std::io::Read;
use std::io::Seek;
use std::path::Path;

use source::ByteSource;
use stream::PullStream;

/// Configuration shared by every entry point (§6). The entire configuration
/// surface of this crate - there is no file- or environment-based config,
/// matching the Non-goals.
#[derive(Clone, Copy, Debug, Default)]
pub struct
Options
{
	/// Skip dimension/orientation parsing once the format is known.
	pub type_only: bool,

	/// Convert an absent result into a returned `ImageError` instead of `None`.
	pub raise_on_failure: bool,
}

/// The full result of a successful parse (§3): format, display-oriented
/// width/height, and EXIF orientation (1 when absent).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct
ImageFacts
{
	pub format:      Format,
	pub width:       u32,
	pub height:      u32,
	pub orientation: u16,
}

/// What the orchestrator settles on internally before translating a
/// terminal failure into the public `ImageError` taxonomy (§7).
enum
Outcome
{
	Facts(ImageFacts),
	TypeOnly(Format),
}

fn
orchestrate
<R: Read + Seek>
(
	reader:  R,
	options: Options,
)
-> (Result<Outcome, ImageError>, R)
{
	let mut stream = PullStream::new(ByteSource::from_reader(reader).into_chunk_source());

	let format = match dispatcher::dispatch(&mut stream)
	{
		Ok(format) => format,

		Err(dispatcher::DispatchError::Fetch(cause)) =>
		{
			let reader = stream.into_source().into_inner();
			return (Err(ImageError::ImageFetchFailure(cause)), reader);
		},

		Err(dispatcher::DispatchError::NoMatch) =>
		{
			let reader = stream.into_source().into_inner();
			return (Err(ImageError::UnknownImageType), reader);
		},
	};

	if options.type_only
	{
		let reader = stream.into_source().into_inner();
		return (Ok(Outcome::TypeOnly(format)), reader);
	}

	let result = match parsers::parse(format, &mut stream)
	{
		Ok((width, height, orientation)) => Ok(Outcome::Facts(ImageFacts { format, width, height, orientation })),
		Err(_) => Err(ImageError::SizeNotFound),
	};

	let reader = stream.into_source().into_inner();
	(result, reader)
}

/// Runs the orchestrator against a caller-supplied `Read + Seek` source,
/// rewinding it to position 0 on every exit path per §5/§7.
fn
run
<R: Read + Seek>
(
	reader:  R,
	options: Options,
)
-> Result<Outcome, ImageError>
{
	let (result, mut reader) = orchestrate(reader, options);
	let _ = ByteSource::rewind(&mut reader);
	result
}

fn
collapse
(
	result:          Result<Outcome, ImageError>,
	raise_on_failure: bool,
)
-> Result<Option<Outcome>, ImageError>
{
	match result
	{
		Ok(outcome) => Ok(Some(outcome)),
		Err(err) if raise_on_failure => Err(err),
		Err(_) => Ok(None),
	}
}

/// Returns `(width, height)` in pixels, or `None` if `raise_on_failure` is
/// false and any failure occurred along the way.
pub fn
size
<R: Read + Seek>
(
	reader:  R,
	options: Options,
)
-> Result<Option<(u32, u32)>, ImageError>
{
	let result = run(reader, options);

	Ok(collapse(result, options.raise_on_failure)?.and_then(|outcome| match outcome
	{
		Outcome::Facts(facts) => Some((facts.width, facts.height)),
		Outcome::TypeOnly(_)  => None,
	}))
}

/// Returns the detected format tag, or `None` under the same rules as [`size`].
pub fn
image_type
<R: Read + Seek>
(
	reader:  R,
	options: Options,
)
-> Result<Option<Format>, ImageError>
{
	let mut type_only_options = options;
	type_only_options.type_only = true;

	let result = run(reader, type_only_options);

	Ok(collapse(result, options.raise_on_failure)?.map(|outcome| match outcome
	{
		Outcome::Facts(facts)  => facts.format,
		Outcome::TypeOnly(fmt) => fmt,
	}))
}

/// Full parse exposing orientation, or `None` under the same rules as [`size`].
pub fn
parse
<R: Read + Seek>
(
	reader:  R,
	options: Options,
)
-> Result<Option<ImageFacts>, ImageError>
{
	let result = run(reader, options);

	Ok(collapse(result, options.raise_on_failure)?.and_then(|outcome| match outcome
	{
		Outcome::Facts(facts) => Some(facts),
		Outcome::TypeOnly(_)  => None,
	}))
}

/// `_path` entry points open (and always close) the file themselves,
/// mirroring the teacher's split between `file_*` and generic/in-memory
/// entry points (`jpg.rs`, `tiff/file.rs`).

pub fn
size_from_path
(
	path:    &Path,
	options: Options,
)
-> Result<Option<(u32, u32)>, ImageError>
{
	match ByteSource::from_path(path)
	{
		Ok(source) => size(source.into_reader(), options),
		Err(cause) => raise_or_none(ImageError::ImageFetchFailure(cause), options.raise_on_failure),
	}
}

pub fn
image_type_from_path
(
	path:    &Path,
	options: Options,
)
-> Result<Option<Format>, ImageError>
{
	match ByteSource::from_path(path)
	{
		Ok(source) => image_type(source.into_reader(), options),
		Err(cause) => raise_or_none(ImageError::ImageFetchFailure(cause), options.raise_on_failure),
	}
}

pub fn
parse_from_path
(
	path:    &Path,
	options: Options,
)
-> Result<Option<ImageFacts>, ImageError>
{
	match ByteSource::from_path(path)
	{
		Ok(source) => parse(source.into_reader(), options),
		Err(cause) => raise_or_none(ImageError::ImageFetchFailure(cause), options.raise_on_failure),
	}
}

fn
raise_or_none<T>
(
	error:            ImageError,
	raise_on_failure: bool,
)
-> Result<Option<T>, ImageError>
{
	if raise_on_failure
	{
		Err(error)
	}
	else
	{
		Ok(None)
	}
}
