// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

//! Format Dispatcher (§4.3): inspects the first 2-12 bytes and decides
//! which format parser to run, or reports "unknown". Only ever peeks -
//! never consumes - so the chosen parser always starts from position 0.

use crate::chunk_source::ChunkSource;
use crate::format::Format;
use crate::stream::PullStream;

/// Distinguishes "the prefix plainly doesn't match any known signature"
/// from "the source ran out of bytes before dispatch could even get its
/// first 2 bytes" - the orchestrator needs this split to tell
/// *UnknownImageType* apart from *ImageFetchFailure* (§7). Any lookahead
/// peek failure *after* a prefix has already partially matched (e.g. "RI"
/// with fewer than 12 bytes following, or the SVG scan running off the end
/// of a short file) is treated the same as "doesn't match" - by that point
/// a format decision was already attempted and simply couldn't be
/// confirmed, which is exactly the documented behavior for the SVG scan.
pub(crate) enum
DispatchError
{
	NoMatch,
	Fetch(std::io::Error),
}

const SVG_SCAN_ITERATIONS: usize = 25;
const SVG_SCAN_STEP:       usize = 10;
const SVG_NEEDLE:          &[u8] = b"<svg";

pub(crate) fn
dispatch
<C: ChunkSource>
(
	stream: &mut PullStream<C>
)
-> Result<Format, DispatchError>
{
	let prefix = stream.peek(2).map_err(DispatchError::Fetch)?;

	let result = match (prefix[0], prefix[1])
	{
		(b'B', b'M') => Ok(Format::Bmp),
		(b'G', b'I') => Ok(Format::Gif),
		(0xFF, 0xD8) => Ok(Format::Jpeg),
		(0x89, b'P') => Ok(Format::Png),
		(b'I', b'I') | (b'M', b'M') => Ok(Format::Tiff),
		(b'8', b'B') => Ok(Format::Psd),

		(0x00, 0x00) =>
		{
			let probe = stream.peek(3).map_err(|_| DispatchError::NoMatch)?;

			match probe[2]
			{
				1 => Ok(Format::Ico),
				2 => Ok(Format::Cur),
				_ => Err(DispatchError::NoMatch),
			}
		},

		(b'R', b'I') =>
		{
			let probe = stream.peek(12).map_err(|_| DispatchError::NoMatch)?;

			if &probe[8..12] == b"WEBP"
			{
				Ok(Format::Webp)
			}
			else
			{
				Err(DispatchError::NoMatch)
			}
		},

		(b'<', b's') | (b'<', b'?') | (b'<', b'!') => scan_for_svg(stream),

		_ => Err(DispatchError::NoMatch),
	};

	match &result
	{
		Ok(format)  => log::debug!("dispatched format {format}"),
		Err(DispatchError::NoMatch) => log::debug!("no format signature matched the input prefix"),
		Err(DispatchError::Fetch(_)) => {},
	}

	result
}

/// `<svg` should appear within the first 250 bytes if the document really
/// is SVG - so peek progressively larger windows (10, 20, ..., 250 bytes)
/// until the literal turns up, or give up.
fn
scan_for_svg
<C: ChunkSource>
(
	stream: &mut PullStream<C>
)
-> Result<Format, DispatchError>
{
	for n in 1..=SVG_SCAN_ITERATIONS
	{
		let window = stream.peek(SVG_SCAN_STEP * n).map_err(|_| DispatchError::NoMatch)?;

		if contains_subslice(&window, SVG_NEEDLE)
		{
			return Ok(Format::Svg);
		}
	}

	log::warn!("gave up scanning for '<svg' after {SVG_SCAN_ITERATIONS} peeks");
	Err(DispatchError::NoMatch)
}

fn
contains_subslice
(
	haystack: &[u8],
	needle:   &[u8]
)
-> bool
{
	haystack.windows(needle.len()).any(|window| window == needle)
}
