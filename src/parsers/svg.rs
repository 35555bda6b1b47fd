// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

//! SVG carries its dimensions as attribute text on the root `<svg>` element
//! rather than in a fixed binary layout, so this parser is a small
//! byte-by-byte attribute scanner rather than a general XML parser -
//! deliberately so, to stay byte-exact with the scanning quirks described
//! for this format rather than pull in a full XML dependency for three
//! attributes.

use crate::chunk_source::ChunkSource;
use crate::general_file_io::io_error;
use crate::stream::PullStream;

use super::ParseResult;

#[derive(PartialEq)]
enum
ScanState
{
	None,
	Started,
	Stop,
}

struct
SvgScanState
{
	attr_name:       Vec<u8>,
	state:           ScanState,
	width:           Option<u64>,
	height:          Option<u64>,
	ratio:           Option<f64>,
	viewbox_width:   Option<u64>,
	viewbox_height:  Option<u64>,
}

pub(crate) fn
parse
<C: ChunkSource>
(
	stream: &mut PullStream<C>
)
-> ParseResult
{
	let mut scan = SvgScanState
	{
		attr_name:      Vec::new(),
		state:          ScanState::None,
		width:          None,
		height:         None,
		ratio:          None,
		viewbox_width:  None,
		viewbox_height: None,
	};

	loop
	{
		let byte = match stream.read(1)
		{
			Ok(bytes) => bytes[0],
			Err(_) => break,
		};

		match byte
		{
			b'<' =>
			{
				scan.attr_name.clear();
			},

			b'>' =>
			{
				if scan.state == ScanState::Started
				{
					scan.state = ScanState::Stop;
				}
			},

			b'=' =>
			{
				let name = scan.attr_name.to_ascii_lowercase();

				// Matched as a substring, not an exact attribute name, so
				// e.g. `stroke-width` is (imprecisely, but deliberately)
				// indistinguishable from `width` here.
				if contains_subslice(&name, b"width")
				{
					scan.width = read_string_int(stream)?;

					if scan.height.is_some()
					{
						break;
					}
				}
				else if contains_subslice(&name, b"height")
				{
					scan.height = read_string_int(stream)?;

					if scan.width.is_some()
					{
						break;
					}
				}
				else if contains_subslice(&name, b"viewbox")
				{
					if let Some(value) = extract_quoted_value(stream)?
					{
						apply_viewbox(&mut scan, &value);
					}
				}

				scan.attr_name.clear();
			},

			b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b':' =>
			{
				scan.attr_name.push(byte);
			},

			_ =>
			{
				if scan.attr_name.eq_ignore_ascii_case(b"svg")
				{
					scan.state = ScanState::Started;
				}

				scan.attr_name.clear();
			},
		}

		if scan.state == ScanState::Stop
		{
			break;
		}
	}

	resolve_dimensions(&scan)
}

/// Consumes the opening quote and accumulates digits until the first
/// non-digit byte, which is discarded (the stream has no rewind).
fn
read_string_int
<C: ChunkSource>
(
	stream: &mut PullStream<C>
)
-> std::io::Result<Option<u64>>
{
	stream.read(1)?; // opening quote

	let mut digits = Vec::new();

	loop
	{
		let byte = stream.read(1)?[0];

		if byte.is_ascii_digit()
		{
			digits.push(byte);
		}
		else
		{
			break;
		}
	}

	if digits.is_empty()
	{
		return Ok(None);
	}

	let text = String::from_utf8_lossy(&digits);
	Ok(text.parse::<u64>().ok())
}

/// Consumes the opening quote and accumulates until the matching closing
/// quote, returning the full quoted text.
fn
extract_quoted_value
<C: ChunkSource>
(
	stream: &mut PullStream<C>
)
-> std::io::Result<Option<String>>
{
	let quote = stream.read(1)?[0];

	if quote != b'"' && quote != b'\''
	{
		return Ok(None);
	}

	let mut value = Vec::new();

	loop
	{
		let byte = stream.read(1)?[0];

		if byte == quote
		{
			break;
		}

		value.push(byte);
	}

	Ok(Some(String::from_utf8_lossy(&value).into_owned()))
}

fn
apply_viewbox
(
	scan:  &mut SvgScanState,
	value: &str,
)
{
	let tokens: Vec<f64> = value
		.split(|c: char| c == ' ' || c == ',')
		.filter(|token| !token.is_empty())
		.filter_map(|token| token.parse::<f64>().ok())
		.collect();

	if tokens.len() == 4 && tokens[2] > 0.0 && tokens[3] > 0.0
	{
		scan.ratio           = Some(tokens[2] / tokens[3]);
		scan.viewbox_width   = Some(tokens[2].floor() as u64);
		scan.viewbox_height  = Some(tokens[3].floor() as u64);
	}
}

fn
contains_subslice
(
	haystack: &[u8],
	needle:   &[u8],
)
-> bool
{
	haystack.windows(needle.len()).any(|window| window == needle)
}

/// Tier precedence: explicit width+height, then width+ratio, then
/// height+ratio, then the viewBox extents; anything short of that fails.
fn
resolve_dimensions
(
	scan: &SvgScanState
)
-> ParseResult
{
	if let (Some(width), Some(height)) = (scan.width, scan.height)
	{
		return Ok((width as u32, height as u32, 1));
	}

	if let (Some(width), Some(ratio)) = (scan.width, scan.ratio)
	{
		return Ok((width as u32, (width as f64 / ratio).round() as u32, 1));
	}

	if let (Some(height), Some(ratio)) = (scan.height, scan.ratio)
	{
		return Ok(((height as f64 * ratio).round() as u32, height as u32, 1));
	}

	if let (Some(width), Some(height)) = (scan.viewbox_width, scan.viewbox_height)
	{
		return Ok((width as u32, height as u32, 1));
	}

	io_error!(InvalidData, "SVG root element carried no usable width/height information")
}
