// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

//! Walks the JPEG segment chain looking for the first APP1/EXIF segment
//! (for orientation) and the SOF segment (for dimensions), in the spirit
//! of `little_exif::jpg::generic_read_metadata`'s own marker-prefix state
//! machine - but stopping as soon as a SOF has been read, rather than
//! scanning all the way to the entropy-coded image data.

use std::io::Cursor;

use crate::chunk_source::ChunkSource;
use crate::chunk_source::SequentialChunkSource;
use crate::endian::Endian;
use crate::exif;
use crate::exif::Exif;
use crate::general_file_io::EXIF_HEADER;
use crate::stream::PullStream;

use super::ParseResult;

enum
State
{
	Started,
	Sof,
	SkipFrame,
	ReadSize,
}

const APP1_MARKER: u8 = 0xE1;

pub(crate) fn
parse
<C: ChunkSource>
(
	stream: &mut PullStream<C>
)
-> ParseResult
{
	stream.skip(2)?; // SOI

	let mut state = State::Started;
	let mut exif: Option<Exif> = None;

	loop
	{
		match state
		{
			State::Started =>
			{
				let byte = stream.read(1)?[0];

				if byte == 0xFF
				{
					state = State::Sof;
				}
			},

			State::Sof =>
			{
				let marker = stream.read(1)?[0];

				match marker
				{
					APP1_MARKER =>
					{
						read_app1(stream, &mut exif)?;
						state = State::Started;
					},

					0xE0..=0xEF => state = State::SkipFrame,

					0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF => state = State::ReadSize,

					// Fill byte: stay in this state and treat the next
					// byte as another marker candidate.
					0xFF => {},

					_ => state = State::SkipFrame,
				}
			},

			State::SkipFrame =>
			{
				let length = stream.read_u16(&Endian::Big)?;
				stream.skip((length as u64).saturating_sub(2))?;
				state = State::Started;
			},

			State::ReadSize =>
			{
				stream.skip(3)?; // segment length (2) + sample precision (1)

				let height = stream.read_u16(&Endian::Big)? as u32;
				let width  = stream.read_u16(&Endian::Big)? as u32;

				let orientation = exif.as_ref().map_or(1, |e| e.orientation);

				return if exif.as_ref().map_or(false, Exif::rotated)
				{
					Ok((height, width, orientation))
				}
				else
				{
					Ok((width, height, orientation))
				};
			},
		}
	}
}

/// Reads an APP1 segment's payload and, if it is an EXIF segment and no
/// earlier APP1 has already supplied orientation, hands the TIFF payload
/// to the shared EXIF sub-parser.
fn
read_app1
<C: ChunkSource>
(
	stream: &mut PullStream<C>,
	exif:   &mut Option<Exif>,
)
-> std::io::Result<()>
{
	let length = stream.read_u16(&Endian::Big)?;
	let remaining = (length as usize).saturating_sub(2);
	let payload = stream.read(remaining)?;

	if exif.is_none() && payload.len() >= EXIF_HEADER.len() && &payload[0..4] == b"Exif"
	{
		let tiff_bytes = payload[EXIF_HEADER.len()..].to_vec();
		let mut tiff_stream = PullStream::new(SequentialChunkSource::new(Cursor::new(tiff_bytes)));

		if let Ok(parsed) = exif::parse(&mut tiff_stream)
		{
			*exif = Some(parsed);
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::chunk_source::SequentialChunkSource;

	fn
	sof_segment
	(
		marker: u8,
		width:  u16,
		height: u16,
	)
	-> Vec<u8>
	{
		let mut bytes = vec![0xFF, marker];
		bytes.extend_from_slice(&8u16.to_be_bytes()); // length
		bytes.push(8);                                // sample precision
		bytes.extend_from_slice(&height.to_be_bytes());
		bytes.extend_from_slice(&width.to_be_bytes());
		bytes
	}

	fn
	exif_app1_segment
	(
		orientation: u16
	)
	-> Vec<u8>
	{
		let mut tiff = Vec::new();
		tiff.extend_from_slice(b"II");
		tiff.extend_from_slice(&42u16.to_le_bytes());
		tiff.extend_from_slice(&8u32.to_le_bytes());
		tiff.extend_from_slice(&1u16.to_le_bytes());
		tiff.extend_from_slice(&0x0112u16.to_le_bytes());
		tiff.extend_from_slice(&[0u8; 6]);
		tiff.extend_from_slice(&orientation.to_le_bytes());
		tiff.extend_from_slice(&[0u8; 2]);

		let mut payload = EXIF_HEADER.to_vec();
		payload.extend_from_slice(&tiff);

		let mut bytes = vec![0xFF, APP1_MARKER];
		bytes.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
		bytes.extend_from_slice(&payload);
		bytes
	}

	fn
	parse_bytes
	(
		data: Vec<u8>
	)
	-> (u32, u32, u16)
	{
		let mut stream = PullStream::new(SequentialChunkSource::new(Cursor::new(data)));
		parse(&mut stream).unwrap()
	}

	#[test]
	fn
	reads_dimensions_without_exif()
	{
		let mut bytes = vec![0xFF, 0xD8];
		bytes.extend_from_slice(&sof_segment(0xC0, 600, 450));
		assert_eq!(parse_bytes(bytes), (600, 450, 1));
	}

	#[test]
	fn
	applies_orientation_without_rotation()
	{
		let mut bytes = vec![0xFF, 0xD8];
		bytes.extend_from_slice(&exif_app1_segment(3));
		bytes.extend_from_slice(&sof_segment(0xC0, 600, 450));
		assert_eq!(parse_bytes(bytes), (600, 450, 3));
	}

	#[test]
	fn
	swaps_dimensions_for_rotated_orientation()
	{
		let mut bytes = vec![0xFF, 0xD8];
		bytes.extend_from_slice(&exif_app1_segment(6));
		bytes.extend_from_slice(&sof_segment(0xC0, 230, 408));
		assert_eq!(parse_bytes(bytes), (408, 230, 6));
	}

	#[test]
	fn
	truncated_jpeg_with_only_soi_fails()
	{
		let mut stream = PullStream::new(SequentialChunkSource::new(Cursor::new(vec![0xFF, 0xD8])));
		assert!(parse(&mut stream).is_err());
	}

	#[test]
	fn
	skips_unrelated_app_segments()
	{
		let mut bytes = vec![0xFF, 0xD8];
		bytes.extend_from_slice(&[0xFF, 0xE2]); // APP2, irrelevant
		bytes.extend_from_slice(&6u16.to_be_bytes());
		bytes.extend_from_slice(&[0u8; 4]);
		bytes.extend_from_slice(&sof_segment(0xC2, 100, 50));
		assert_eq!(parse_bytes(bytes), (100, 50, 1));
	}
}
