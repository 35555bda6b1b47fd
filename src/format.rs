// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

//! The ten-variant format tag, in the shape of the teacher's own
//! `filetype::FileExtension`: a small `Copy` enum plus a string mapping,
//! rather than anything resembling inheritance.

use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum
Format
{
	Bmp,
	Gif,
	Jpeg,
	Png,
	Tiff,
	Psd,
	Ico,
	Cur,
	Webp,
	Svg,
}

impl Format
{
	pub fn
	as_str
	(
		&self
	)
	-> &'static str
	{
		match self
		{
			Format::Bmp  => "bmp",
			Format::Gif  => "gif",
			Format::Jpeg => "jpeg",
			Format::Png  => "png",
			Format::Tiff => "tiff",
			Format::Psd  => "psd",
			Format::Ico  => "ico",
			Format::Cur  => "cur",
			Format::Webp => "webp",
			Format::Svg  => "svg",
		}
	}
}

impl fmt::Display for Format
{
	fn
	fmt
	(
		&self,
		f: &mut fmt::Formatter<'_>
	)
	-> fmt::Result
	{
		write!(f, "{}", self.as_str())
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn
	as_str_matches_spec_tags()
	{
		let table = [
			(Format::Bmp,  "bmp"),
			(Format::Gif,  "gif"),
			(Format::Jpeg, "jpeg"),
			(Format::Png,  "png"),
			(Format::Tiff, "tiff"),
			(Format::Psd,  "psd"),
			(Format::Ico,  "ico"),
			(Format::Cur,  "cur"),
			(Format::Webp, "webp"),
			(Format::Svg,  "svg"),
		];

		for (format, expected) in table
		{
			assert_eq!(format.as_str(), expected);
		}
	}
}
